//! End-to-end streaming tests driving a `World` with a moving observer

use std::collections::HashSet;

use glam::{IVec2, Vec2};
use terrastream::world::{CellClass, CellSink, NoiseConfig, StreamingManager, StreamingSettings};
use terrastream::{TerrainConfig, World};

/// Sink that remembers which chunks currently have a representation
#[derive(Default)]
struct SceneRecorder {
    live: HashSet<IVec2>,
    materialized: usize,
    teardowns: Vec<IVec2>,
}

impl CellSink for SceneRecorder {
    fn materialize(&mut self, chunk: IVec2, _position: Vec2, _cell: CellClass) {
        self.live.insert(chunk);
        self.materialized += 1;
    }

    fn teardown(&mut self, chunk: IVec2) {
        assert!(self.live.remove(&chunk), "teardown of unknown chunk {chunk:?}");
        self.teardowns.push(chunk);
    }
}

fn config(seed: i32, view_distance: i32) -> TerrainConfig {
    TerrainConfig {
        noise: NoiseConfig {
            seed,
            ..NoiseConfig::default()
        },
        streaming: StreamingSettings {
            chunk_size: 8,
            view_distance,
            block_size: 2.0,
        },
    }
}

fn assert_store_invariant(world: &World<Vec2, SceneRecorder>) {
    let streaming = world.streaming();
    let settings = streaming.settings();
    let center = streaming.observer_chunk(*world.observer());

    for coord in StreamingManager::required_coords(center, settings.view_distance) {
        assert!(
            streaming.store().contains(coord),
            "required chunk {coord:?} missing around {center:?}"
        );
    }
    for coord in streaming.store().coords() {
        assert!(
            StreamingManager::chunk_distance(coord, center) <= settings.retention_radius(),
            "chunk {coord:?} kept beyond retention radius around {center:?}"
        );
    }
}

#[test]
fn test_walk_keeps_store_consistent() {
    let mut world = World::new(config(2024, 2), Vec2::ZERO, SceneRecorder::default())
        .expect("observer is present");

    // Walk diagonally through negative and positive chunk space
    for step in 0..200 {
        let t = step as f32;
        *world.observer_mut() = Vec2::new(-150.0 + t * 1.7, 90.0 - t * 1.3);
        world.update().expect("observer is present");
        assert_store_invariant(&world);

        // The sink mirrors exactly what the store holds
        let stored: HashSet<IVec2> = world.streaming().store().coords().collect();
        assert_eq!(stored, world.sink().live);
    }

    assert!(!world.sink().teardowns.is_empty());
}

#[test]
fn test_each_generated_cell_materialized_once() {
    let mut world = World::new(config(-9, 1), Vec2::ZERO, SceneRecorder::default()).unwrap();
    let report = world.update().unwrap();

    assert_eq!(report.generated, 9);
    assert_eq!(world.sink().materialized, 9 * 8 * 8);
}

#[test]
fn test_returning_regenerates_identical_terrain() {
    let mut world = World::new(config(555, 1), Vec2::ZERO, SceneRecorder::default()).unwrap();
    world.update();

    let origin_cells: Vec<_> = (0..8)
        .flat_map(|y| (0..8).map(move |x| IVec2::new(x, y)))
        .map(|cell| world.cell_at(cell))
        .collect();

    // Walk far enough away for chunk (0, 0) to be evicted, then come back
    *world.observer_mut() = Vec2::new(16.0 * 10.0, 0.0);
    world.update();
    assert!(!world.streaming().store().contains(IVec2::ZERO));

    *world.observer_mut() = Vec2::ZERO;
    world.update();
    let again: Vec<_> = (0..8)
        .flat_map(|y| (0..8).map(move |x| IVec2::new(x, y)))
        .map(|cell| world.cell_at(cell))
        .collect();

    assert_eq!(origin_cells, again);
    assert!(again.iter().all(Option::is_some));
}

#[test]
fn test_independent_worlds_share_nothing() {
    let mut a = World::new(config(77, 1), Vec2::ZERO, SceneRecorder::default()).unwrap();
    let mut b = World::new(config(77, 1), Vec2::new(1000.0, 1000.0), SceneRecorder::default())
        .unwrap();

    a.update();
    b.update();

    assert!(a.streaming().store().contains(IVec2::ZERO));
    assert!(!b.streaming().store().contains(IVec2::ZERO));
}

#[test]
fn test_same_seed_same_world() {
    let mut a = World::new(config(4242, 1), Vec2::new(-30.0, 12.0), SceneRecorder::default())
        .unwrap();
    let mut b = World::new(config(4242, 1), Vec2::new(-30.0, 12.0), SceneRecorder::default())
        .unwrap();
    a.update();
    b.update();

    for coord in a.streaming().store().coords() {
        assert_eq!(
            a.streaming().store().get(coord),
            b.streaming().store().get(coord)
        );
    }
}
