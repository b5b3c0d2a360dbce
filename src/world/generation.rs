use glam::{IVec2, Vec2};

use crate::world::chunk::{CellClass, Chunk};
use crate::world::noise_field::{NoiseConfig, NoiseField};
use crate::world::sink::CellSink;

/// World generator classifying cells from the layered height field
#[derive(Clone)]
pub struct WorldGenerator {
    field: NoiseField,
}

impl WorldGenerator {
    /// Create a generator from a seed-resolved configuration
    pub fn new(config: NoiseConfig) -> Self {
        Self {
            field: NoiseField::new(config),
        }
    }

    pub fn field(&self) -> &NoiseField {
        &self.field
    }

    /// Classification of a single world cell (block size not applied)
    pub fn cell_at(&self, world_x: i32, world_y: i32) -> CellClass {
        let height = self.field.height(world_x as f64, world_y as f64);
        CellClass::from_height(height, self.field.config().water_level)
    }

    /// Generate a complete chunk, notifying `sink` once per cell.
    ///
    /// The chunk is fully populated before it is returned.
    pub fn generate_chunk<S: CellSink + ?Sized>(
        &self,
        coord: IVec2,
        chunk_size: u32,
        block_size: f32,
        sink: &mut S,
    ) -> Chunk {
        let size = chunk_size as i32;
        // Saturates at the edge of the i32 cell grid
        let origin = coord.saturating_mul(IVec2::splat(size));

        Chunk::from_fn(coord, chunk_size as usize, |local_x, local_y| {
            let world = origin.saturating_add(IVec2::new(local_x as i32, local_y as i32));
            let cell = self.cell_at(world.x, world.y);
            sink.materialize(coord, cell_to_world(world, block_size), cell);
            cell
        })
    }
}

/// World-space position of a world cell after applying block size
pub fn cell_to_world(world_cell: IVec2, block_size: f32) -> Vec2 {
    world_cell.as_vec2() * block_size
}
