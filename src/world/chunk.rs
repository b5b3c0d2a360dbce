//! Chunk - square grid of cell classifications

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Terrain classification of a single grid cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellClass {
    Ground,
    #[default]
    Water,
}

impl CellClass {
    /// Classify a height sample. Ground requires a height strictly above the water level.
    #[inline]
    pub fn from_height(height: f64, water_level: f64) -> Self {
        if height > water_level {
            CellClass::Ground
        } else {
            CellClass::Water
        }
    }

    /// Single-character glyph used by text previews
    pub fn glyph(self) -> char {
        match self {
            CellClass::Ground => '#',
            CellClass::Water => '~',
        }
    }
}

/// A `size` x `size` region of the world
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Chunk coordinates (in chunk space, not cell space)
    coord: IVec2,

    /// Side length in cells
    size: usize,

    /// Cell data, row-major order
    /// Index = y * size + x
    cells: Vec<CellClass>,
}

impl Chunk {
    /// Chunk with every cell set to `value`
    pub fn filled(coord: IVec2, size: usize, value: CellClass) -> Self {
        Self {
            coord,
            size,
            cells: vec![value; size * size],
        }
    }

    /// Chunk whose cells are computed from local coordinates.
    ///
    /// The grid is fully built before the chunk is returned.
    pub fn from_fn(coord: IVec2, size: usize, mut f: impl FnMut(usize, usize) -> CellClass) -> Self {
        let mut cells = Vec::with_capacity(size * size);
        for y in 0..size {
            for x in 0..size {
                cells.push(f(x, y));
            }
        }
        Self { coord, size, cells }
    }

    pub fn coord(&self) -> IVec2 {
        self.coord
    }

    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let size = self.size as i64;
        let (x, y) = (x as i64, y as i64);
        if x < 0 || y < 0 || x >= size || y >= size {
            return None;
        }
        Some((y * size + x) as usize)
    }

    /// Get cell at local coordinates, `None` outside `[0, size)`
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<CellClass> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Set cell at local coordinates; out-of-range writes are ignored
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, value: CellClass) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = value;
        }
    }

    /// Number of cells with the given classification
    pub fn count(&self, class: CellClass) -> usize {
        self.cells.iter().filter(|&&c| c == class).count()
    }

    /// Raw row-major cell slice
    pub fn cells(&self) -> &[CellClass] {
        &self.cells
    }
}
