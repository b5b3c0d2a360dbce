//! # Terrastream - infinite 2D chunked terrain
//!
//! Streams fixed-size chunks of Ground/Water cells in and out around a moving
//! observer. Cell classification comes from a deterministic multi-octave height
//! field, so chunks tile seamlessly no matter when they are generated.

pub mod config;
pub mod error;
pub mod preview;
pub mod world;

pub use crate::config::TerrainConfig;
pub use crate::error::WorldError;
pub use crate::world::World;

/// Common imports for internal use
pub mod prelude {
    pub use crate::world::{
        CellClass, CellSink, Chunk, ChunkStore, NoiseConfig, NoiseField, ObserverSource,
        StreamingManager, StreamingSettings, World,
    };
    pub use glam::{IVec2, Vec2};
}
