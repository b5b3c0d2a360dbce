//! Authoritative mapping of chunk coordinates to loaded chunks

use ahash::AHashMap;
use glam::IVec2;
use std::collections::hash_map::Entry;

use super::Chunk;
use crate::error::{Result, WorldError};

/// Owns every loaded chunk. Lifecycle decisions are made by the caller.
#[derive(Default)]
pub struct ChunkStore {
    chunks: AHashMap<IVec2, Chunk>,
}

impl ChunkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if chunk is loaded
    pub fn contains(&self, coord: IVec2) -> bool {
        self.chunks.contains_key(&coord)
    }

    pub fn get(&self, coord: IVec2) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    /// Insert a chunk at a coordinate that must not be present yet.
    ///
    /// # Panics
    /// Panics if `coord` is already occupied. The streaming manager only inserts
    /// after a miss, so a duplicate means its bookkeeping is broken.
    pub fn insert(&mut self, coord: IVec2, chunk: Chunk) {
        if let Err(e) = self.try_insert(coord, chunk) {
            panic!("{e}");
        }
    }

    /// Insert a chunk, reporting an occupied coordinate as an error
    pub fn try_insert(&mut self, coord: IVec2, chunk: Chunk) -> Result<()> {
        match self.chunks.entry(coord) {
            Entry::Occupied(_) => Err(WorldError::DuplicateChunk(coord)),
            Entry::Vacant(e) => {
                e.insert(chunk);
                Ok(())
            }
        }
    }

    /// Remove and return a chunk so the caller can run teardown
    pub fn remove(&mut self, coord: IVec2) -> Option<Chunk> {
        self.chunks.remove(&coord)
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Loaded coordinates, in no particular order
    pub fn coords(&self) -> impl Iterator<Item = IVec2> + '_ {
        self.chunks.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&IVec2, &Chunk)> {
        self.chunks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::CellClass;

    fn chunk(x: i32, y: i32) -> Chunk {
        Chunk::filled(IVec2::new(x, y), 4, CellClass::Water)
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = ChunkStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert!(!store.contains(IVec2::ZERO));
        assert!(store.get(IVec2::ZERO).is_none());
    }

    #[test]
    fn test_insert_and_get() {
        let mut store = ChunkStore::new();
        store.insert(IVec2::new(5, -10), chunk(5, -10));

        assert!(store.contains(IVec2::new(5, -10)));
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.get(IVec2::new(5, -10)).map(|c| c.coord()),
            Some(IVec2::new(5, -10))
        );
        assert!(store.get(IVec2::new(5, 10)).is_none());
    }

    #[test]
    fn test_try_insert_rejects_duplicate() {
        let mut store = ChunkStore::new();
        assert!(store.try_insert(IVec2::ZERO, chunk(0, 0)).is_ok());

        let mut replacement = chunk(0, 0);
        replacement.set(0, 0, CellClass::Ground);
        assert_eq!(
            store.try_insert(IVec2::ZERO, replacement),
            Err(WorldError::DuplicateChunk(IVec2::ZERO))
        );

        // Original chunk untouched
        assert_eq!(
            store.get(IVec2::ZERO).and_then(|c| c.get(0, 0)),
            Some(CellClass::Water)
        );
    }

    #[test]
    #[should_panic(expected = "already present")]
    fn test_insert_duplicate_panics() {
        let mut store = ChunkStore::new();
        store.insert(IVec2::new(1, 1), chunk(1, 1));
        store.insert(IVec2::new(1, 1), chunk(1, 1));
    }

    #[test]
    fn test_remove_returns_chunk() {
        let mut store = ChunkStore::new();
        store.insert(IVec2::new(2, 3), chunk(2, 3));

        let removed = store.remove(IVec2::new(2, 3));
        assert_eq!(removed.map(|c| c.coord()), Some(IVec2::new(2, 3)));
        assert!(store.is_empty());
        assert!(store.remove(IVec2::new(2, 3)).is_none());
    }

    #[test]
    fn test_coords_lists_every_key() {
        let mut store = ChunkStore::new();
        for cy in -1..=1 {
            for cx in -1..=1 {
                store.insert(IVec2::new(cx, cy), chunk(cx, cy));
            }
        }

        let mut coords: Vec<_> = store.coords().map(|c| (c.x, c.y)).collect();
        coords.sort();
        assert_eq!(coords.len(), 9);
        assert_eq!(coords[0], (-1, -1));
        assert_eq!(coords[8], (1, 1));
        assert_eq!(store.iter().count(), 9);
    }
}
