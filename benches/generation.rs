use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use glam::{IVec2, Vec2};
use terrastream::world::{
    NoiseConfig, NoiseField, NullSink, StreamingManager, StreamingSettings, WorldGenerator,
};

fn noise_config() -> NoiseConfig {
    NoiseConfig {
        seed: 1234,
        ..NoiseConfig::default()
    }
}

fn bench_height_sample(c: &mut Criterion) {
    let field = NoiseField::new(noise_config());

    c.bench_function("height_sample", |b| {
        let mut x = 0.0;
        b.iter(|| {
            x += 0.37;
            field.height(black_box(x), black_box(-x * 0.5))
        });
    });
}

fn bench_generate_chunk_16(c: &mut Criterion) {
    let generator = WorldGenerator::new(noise_config());

    c.bench_function("generate_chunk_16", |b| {
        b.iter(|| generator.generate_chunk(black_box(IVec2::new(3, -7)), 16, 1.0, &mut NullSink));
    });
}

fn bench_generate_chunk_64(c: &mut Criterion) {
    let generator = WorldGenerator::new(noise_config());

    c.bench_function("generate_chunk_64", |b| {
        b.iter(|| generator.generate_chunk(black_box(IVec2::new(3, -7)), 64, 1.0, &mut NullSink));
    });
}

fn bench_streaming_walk(c: &mut Criterion) {
    c.bench_function("streaming_walk_chunk_crossings", |b| {
        b.iter(|| {
            let mut manager = StreamingManager::new(
                StreamingSettings::default(),
                WorldGenerator::new(noise_config()),
            );
            for step in 0..32 {
                let pos = Vec2::new(step as f32 * 16.0, step as f32 * 4.0);
                black_box(manager.tick(pos, &mut NullSink));
            }
        });
    });
}

criterion_group!(
    benches,
    bench_height_sample,
    bench_generate_chunk_16,
    bench_generate_chunk_64,
    bench_streaming_walk,
);
criterion_main!(benches);
