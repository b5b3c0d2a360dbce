//! World - ties the observer, the streaming manager and the cell sink together

use glam::IVec2;
use rand::Rng;

use super::generation::WorldGenerator;
use super::sink::{CellSink, ObserverSource};
use super::streaming::{StreamingManager, TickReport};
use super::CellClass;
use crate::config::TerrainConfig;
use crate::error::{Result, WorldError};

/// A streamed world following one observer
pub struct World<O, S> {
    observer: O,
    sink: S,
    streaming: StreamingManager,
}

impl<O: ObserverSource, S: CellSink> World<O, S> {
    /// Create a world, picking a random seed if the configured one is 0.
    ///
    /// Fails with [`WorldError::NoObserver`] if the observer has no position yet;
    /// nothing is generated in that case.
    pub fn new(config: TerrainConfig, observer: O, sink: S) -> Result<Self> {
        Self::with_rng(config, observer, sink, &mut rand::rng())
    }

    /// Like [`World::new`], drawing an unset seed from `rng`
    pub fn with_rng<R: Rng>(
        config: TerrainConfig,
        observer: O,
        sink: S,
        rng: &mut R,
    ) -> Result<Self> {
        config.validate()?;

        let Some(start) = observer.position() else {
            log::error!("No observer found to follow, refusing to start streaming");
            return Err(WorldError::NoObserver);
        };

        let noise = config.noise.resolve_seed(rng);
        log::info!(
            "Starting terrain streaming: seed {}, chunk size {}, view distance {}, observer at {:?}",
            noise.seed,
            config.streaming.chunk_size,
            config.streaming.view_distance,
            start
        );

        let generator = WorldGenerator::new(noise);
        Ok(Self {
            observer,
            sink,
            streaming: StreamingManager::new(config.streaming, generator),
        })
    }

    /// Poll the observer once and run a streaming tick.
    ///
    /// Returns `None` if the observer has disappeared; the store is left untouched.
    pub fn update(&mut self) -> Option<TickReport> {
        match self.observer.position() {
            Some(pos) => Some(self.streaming.tick(pos, &mut self.sink)),
            None => {
                log::warn!("Observer has no position, skipping streaming tick");
                None
            }
        }
    }

    /// Classification of a loaded world cell
    pub fn cell_at(&self, world_cell: IVec2) -> Option<CellClass> {
        self.streaming.cell_at(world_cell)
    }

    /// Seed the height field was built with
    pub fn seed(&self) -> i32 {
        self.streaming.generator().field().config().seed
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn streaming(&self) -> &StreamingManager {
        &self.streaming
    }
}
