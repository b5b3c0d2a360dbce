//! World management - chunks, generation, streaming

mod chunk;
mod chunk_store;
pub mod generation;
pub mod noise_field;
mod sink;
pub mod streaming;
#[allow(clippy::module_inception)]
mod world;

pub use chunk::{CellClass, Chunk};
pub use chunk_store::ChunkStore;
pub use generation::WorldGenerator;
pub use noise_field::{NoiseConfig, NoiseField};
pub use sink::{CellSink, CellTally, NullSink, ObserverSource};
pub use streaming::{StreamingManager, StreamingSettings, TickReport};
pub use world::World;
