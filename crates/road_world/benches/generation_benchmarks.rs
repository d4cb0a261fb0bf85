//! Benchmarks for chunk generation and window streaming.
//!
//! Streaming cost is dominated by terrain and decoration generation for the
//! chunk entering the window; these cover each generator and a full
//! recenter step.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use road_world::render::mesh::create_terrain_mesh;
use road_world::{
  BillboardCatalog, BillboardEntry, ChunkGenerator, ChunkIndex, GenerationConfig, RoadWorld,
  StreamingConfig,
};

fn catalog() -> BillboardCatalog {
  BillboardCatalog::new(
    (0..16)
      .map(|i| BillboardEntry::new(format!("Board {i}"), "Buy more road"))
      .collect(),
  )
}

fn bench_generators(c: &mut Criterion) {
  let mut group = c.benchmark_group("generation/chunk");
  group.throughput(Throughput::Elements(1));
  let generator = ChunkGenerator::new(GenerationConfig::default(), 42);
  let catalog = catalog();

  group.bench_function("road", |b| {
    let mut i = 0;
    b.iter(|| {
      i += 1;
      black_box(generator.road(ChunkIndex(i), &catalog))
    })
  });
  group.bench_function("terrain", |b| {
    let mut i = 0;
    b.iter(|| {
      i += 1;
      black_box(generator.terrain(ChunkIndex(i)))
    })
  });
  group.bench_function("stars", |b| {
    let mut i = 0;
    b.iter(|| {
      i += 1;
      black_box(generator.stars(ChunkIndex(i)))
    })
  });
  group.finish();
}

fn bench_terrain_mesh(c: &mut Criterion) {
  let mut group = c.benchmark_group("generation/terrain_mesh");
  for segments in [10u32, 40, 100] {
    let mut config = GenerationConfig::default();
    config.terrain.segments = segments;
    let generator = ChunkGenerator::new(config, 42);
    let chunk = generator.terrain(ChunkIndex(3));
    let heightfield = generator.config().terrain.heightfield;

    group.throughput(Throughput::Elements(((segments + 1) * (segments + 1)) as u64));
    group.bench_with_input(BenchmarkId::new("build", segments), &chunk, |b, chunk| {
      b.iter(|| black_box(create_terrain_mesh(chunk, &heightfield)))
    });
  }
  group.finish();
}

fn bench_streaming(c: &mut Criterion) {
  let mut group = c.benchmark_group("generation/streaming");
  for render_distance in [5, 10, 20] {
    group.bench_with_input(
      BenchmarkId::new("recenter", render_distance),
      &render_distance,
      |b, &render_distance| {
        let mut world = RoadWorld::new(
          ChunkGenerator::new(GenerationConfig::default(), 42),
          catalog(),
          StreamingConfig { render_distance },
        );
        world.initialize_at(ChunkIndex::ORIGIN);
        let mut center = 0;
        b.iter(|| {
          center += 1;
          black_box(world.update_center(ChunkIndex(center)))
        })
      },
    );
    group.bench_with_input(
      BenchmarkId::new("initialize", render_distance),
      &render_distance,
      |b, &render_distance| {
        b.iter(|| {
          let mut world = RoadWorld::new(
            ChunkGenerator::new(GenerationConfig::default(), 42),
            BillboardCatalog::default(),
            StreamingConfig { render_distance },
          );
          black_box(world.initialize_at(ChunkIndex::ORIGIN))
        })
      },
    );
  }
  group.finish();
}

criterion_group!(
  benches,
  bench_generators,
  bench_terrain_mesh,
  bench_streaming
);
criterion_main!(benches);
