//! Collaborator traits: where the observer comes from and where cells go

use glam::{IVec2, Vec2};

use super::CellClass;

/// Receives generated cells and evicted chunks.
///
/// Implemented by whatever owns the visual or physical representation of the
/// terrain. Calls are fire-and-forget.
pub trait CellSink {
    /// A cell of `chunk` was generated at `position` (world units, block size applied)
    fn materialize(&mut self, chunk: IVec2, position: Vec2, cell: CellClass);

    /// Every representation belonging to `chunk` should be torn down
    fn teardown(&mut self, chunk: IVec2);
}

/// Supplies the world-space position the streaming system follows
pub trait ObserverSource {
    /// Current position, or `None` if there is nothing to follow
    fn position(&self) -> Option<Vec2>;
}

impl ObserverSource for Vec2 {
    fn position(&self) -> Option<Vec2> {
        Some(*self)
    }
}

impl ObserverSource for Option<Vec2> {
    fn position(&self) -> Option<Vec2> {
        *self
    }
}

impl<T: CellSink + ?Sized> CellSink for &mut T {
    fn materialize(&mut self, chunk: IVec2, position: Vec2, cell: CellClass) {
        (**self).materialize(chunk, position, cell);
    }

    fn teardown(&mut self, chunk: IVec2) {
        (**self).teardown(chunk);
    }
}

/// A no-op sink for when nothing needs to be materialized
#[derive(Default, Debug, Clone, Copy)]
pub struct NullSink;

impl CellSink for NullSink {
    fn materialize(&mut self, _chunk: IVec2, _position: Vec2, _cell: CellClass) {}
    fn teardown(&mut self, _chunk: IVec2) {}
}

/// Sink that only counts what passes through it
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct CellTally {
    pub ground: usize,
    pub water: usize,
    pub teardowns: usize,
}

impl CellTally {
    pub fn cells(&self) -> usize {
        self.ground + self.water
    }
}

impl CellSink for CellTally {
    fn materialize(&mut self, _chunk: IVec2, _position: Vec2, cell: CellClass) {
        match cell {
            CellClass::Ground => self.ground += 1,
            CellClass::Water => self.water += 1,
        }
    }

    fn teardown(&mut self, _chunk: IVec2) {
        self.teardowns += 1;
    }
}
