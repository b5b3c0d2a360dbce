//! Chunk streaming - generation around the observer and eviction behind it

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::chunk_store::ChunkStore;
use super::generation::WorldGenerator;
use super::sink::CellSink;
use super::CellClass;
use crate::error::{Result, WorldError};

/// Grid geometry and retention radius, fixed at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamingSettings {
    /// Cells per chunk edge
    pub chunk_size: u32,
    /// Chunks kept around the observer in each axis (3 = 7x7 grid = 49 chunks)
    pub view_distance: i32,
    /// World units per cell
    pub block_size: f32,
}

impl Default for StreamingSettings {
    fn default() -> Self {
        Self {
            chunk_size: 16,
            view_distance: 3,
            block_size: 1.0,
        }
    }
}

impl StreamingSettings {
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(WorldError::InvalidConfig(
                "chunk_size must be at least 1".to_string(),
            ));
        }
        if self.view_distance < 0 {
            return Err(WorldError::InvalidConfig(format!(
                "view_distance must not be negative, got {}",
                self.view_distance
            )));
        }
        if !(self.block_size.is_finite() && self.block_size > 0.0) {
            return Err(WorldError::InvalidConfig(format!(
                "block_size must be positive, got {}",
                self.block_size
            )));
        }
        let window = (2 * self.view_distance as i64 + 1) * self.chunk_size as i64;
        if window > i32::MAX as i64 {
            return Err(WorldError::InvalidConfig(format!(
                "view window of {window} cells does not fit the world grid"
            )));
        }
        Ok(())
    }

    /// Distance beyond which a stored chunk is evicted
    pub fn retention_radius(&self) -> f32 {
        self.view_distance as f32 + 1.0
    }

    /// Whether a chunk at `distance` lies outside the retention radius
    pub fn is_beyond_retention(&self, distance: f32) -> bool {
        distance > self.retention_radius()
    }

    /// Largest observer chunk coordinate (in absolute value) whose whole view
    /// window still has world cells addressable as `i32`
    pub fn max_center_coord(&self) -> i32 {
        let size = self.chunk_size.max(1) as i64;
        let last_chunk = i32::MAX as i64 / size - 1;
        (last_chunk - self.view_distance.max(0) as i64).clamp(0, i32::MAX as i64) as i32
    }
}

/// Outcome of one streaming tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    /// Observer chunk this tick was computed for
    pub center: IVec2,
    /// Chunks generated and inserted
    pub generated: usize,
    /// Chunks removed from the store
    pub evicted: usize,
    /// True when the observer stayed in the same chunk and no work was done
    pub skipped: bool,
}

/// Keeps the chunk store consistent with the observer position
pub struct StreamingManager {
    settings: StreamingSettings,
    generator: WorldGenerator,
    store: ChunkStore,

    /// Observer chunk of the last completed tick
    last_center: Option<IVec2>,
}

impl StreamingManager {
    pub fn new(settings: StreamingSettings, generator: WorldGenerator) -> Self {
        Self {
            settings,
            generator,
            store: ChunkStore::new(),
            last_center: None,
        }
    }

    /// Convert a world position to the chunk containing it (floor, so negatives round down).
    ///
    /// Positions past the `i32` chunk range saturate.
    pub fn world_to_chunk(pos: Vec2, chunk_size: u32, block_size: f32) -> IVec2 {
        let span = chunk_size as f32 * block_size;
        IVec2::new(
            (pos.x / span).floor() as i32,
            (pos.y / span).floor() as i32,
        )
    }

    /// Convert a world cell to chunk coordinates + local offset
    pub fn world_cell_to_chunk(world_cell: IVec2, chunk_size: u32) -> (IVec2, i32, i32) {
        let size = chunk_size as i32;
        let chunk = IVec2::new(world_cell.x.div_euclid(size), world_cell.y.div_euclid(size));
        let local_x = world_cell.x.rem_euclid(size);
        let local_y = world_cell.y.rem_euclid(size);
        (chunk, local_x, local_y)
    }

    /// Square of side `2 * view_distance + 1` centred on `center`
    pub fn required_coords(center: IVec2, view_distance: i32) -> impl Iterator<Item = IVec2> {
        let range = -view_distance..=view_distance;
        range.clone().flat_map(move |dy| {
            range
                .clone()
                .map(move |dx| center.saturating_add(IVec2::new(dx, dy)))
        })
    }

    /// Euclidean distance between two chunk coordinates
    pub fn chunk_distance(a: IVec2, b: IVec2) -> f32 {
        (a.as_vec2() - b.as_vec2()).length()
    }

    /// Run one streaming step for the given observer position.
    ///
    /// Missing chunks are generated before the eviction scan, so nothing is generated
    /// and evicted in the same tick. If the observer is still in the chunk of the
    /// previous tick the store is already consistent and the tick is skipped.
    pub fn tick<S: CellSink + ?Sized>(&mut self, observer: Vec2, sink: &mut S) -> TickReport {
        let center = self.observer_chunk(observer);

        if self.last_center == Some(center) {
            log::trace!("Observer still in chunk ({}, {}), skipping", center.x, center.y);
            return TickReport {
                center,
                generated: 0,
                evicted: 0,
                skipped: true,
            };
        }

        let generated = self.generate_missing(center, sink);
        let evicted = self.evict_distant(center, sink);
        self.last_center = Some(center);

        log::info!(
            "Observer entered chunk ({}, {}): generated {}, evicted {}, {} loaded",
            center.x,
            center.y,
            generated,
            evicted,
            self.store.len()
        );

        TickReport {
            center,
            generated,
            evicted,
            skipped: false,
        }
    }

    fn generate_missing<S: CellSink + ?Sized>(&mut self, center: IVec2, sink: &mut S) -> usize {
        let mut generated = 0;

        for coord in Self::required_coords(center, self.settings.view_distance) {
            if self.store.contains(coord) {
                continue;
            }

            let chunk = self.generator.generate_chunk(
                coord,
                self.settings.chunk_size,
                self.settings.block_size,
                &mut *sink,
            );
            log::debug!(
                "Generated chunk ({}, {}) - {} ground cells",
                coord.x,
                coord.y,
                chunk.count(CellClass::Ground)
            );
            self.store.insert(coord, chunk);
            generated += 1;
        }

        generated
    }

    fn evict_distant<S: CellSink + ?Sized>(&mut self, center: IVec2, sink: &mut S) -> usize {
        let settings = &self.settings;
        let to_evict: Vec<IVec2> = self
            .store
            .coords()
            .filter(|&coord| settings.is_beyond_retention(Self::chunk_distance(coord, center)))
            .collect();

        for &coord in &to_evict {
            if self.store.remove(coord).is_some() {
                sink.teardown(coord);
                log::debug!("Evicted chunk ({}, {})", coord.x, coord.y);
            }
        }

        to_evict.len()
    }

    /// Chunk the streaming window is centred on for a world position.
    ///
    /// This is the chunk containing `observer`, clamped so that every cell of
    /// the view window has an `i32` world coordinate. Observers beyond that
    /// edge keep seeing the outermost window.
    pub fn observer_chunk(&self, observer: Vec2) -> IVec2 {
        let chunk =
            Self::world_to_chunk(observer, self.settings.chunk_size, self.settings.block_size);
        let bound = IVec2::splat(self.settings.max_center_coord());
        let center = chunk.clamp(-bound, bound);
        if center != chunk {
            log::debug!(
                "Observer chunk ({}, {}) is off the world grid, clamped to ({}, {})",
                chunk.x,
                chunk.y,
                center.x,
                center.y
            );
        }
        center
    }

    /// Classification of a world cell, if its chunk is loaded
    pub fn cell_at(&self, world_cell: IVec2) -> Option<CellClass> {
        let (chunk, local_x, local_y) =
            Self::world_cell_to_chunk(world_cell, self.settings.chunk_size);
        self.store.get(chunk)?.get(local_x, local_y)
    }

    pub fn store(&self) -> &ChunkStore {
        &self.store
    }

    pub fn settings(&self) -> &StreamingSettings {
        &self.settings
    }

    pub fn generator(&self) -> &WorldGenerator {
        &self.generator
    }

    pub fn last_center(&self) -> Option<IVec2> {
        self.last_center
    }
}
