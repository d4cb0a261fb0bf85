//! Chunk content properties across neighbouring and revisited chunks.
//!
//! Run: cargo test -p road_world --test chunk_content

use road_world::{
  BillboardCatalog, BillboardEntry, BillboardPolicy, ChunkGenerator, ChunkIndex, GenerationConfig,
  RoadWorld, StreamingConfig,
};

fn catalog() -> BillboardCatalog {
  BillboardCatalog::new(vec![
    BillboardEntry::new("One", "first"),
    BillboardEntry::new("Two", "second"),
    BillboardEntry::new("Three", "third\nline"),
  ])
}

#[test]
fn terrain_edges_match_between_neighbours() {
  let generator = ChunkGenerator::new(GenerationConfig::default(), 12);
  for i in -5..5 {
    let here = generator.terrain(ChunkIndex(i));
    let next = generator.terrain(ChunkIndex(i + 1));
    let last_row = here.stride() - 1;
    for col in 0..here.stride() {
      assert_eq!(
        here.height_at(col, last_row),
        next.height_at(col, 0),
        "seam between {} and {} at column {}",
        i,
        i + 1,
        col
      );
    }
  }
}

#[test]
fn revisited_chunks_are_rebuilt_identically() {
  let mut world = RoadWorld::new(
    ChunkGenerator::new(GenerationConfig::default(), 99),
    catalog(),
    StreamingConfig { render_distance: 2 },
  );
  world.initialize_at(ChunkIndex(0));
  let road = world.road_chunk(ChunkIndex(1)).cloned().unwrap();
  let terrain = world.terrain_chunk(ChunkIndex(1)).cloned().unwrap();
  let stars = world.stars_chunk(ChunkIndex(1)).cloned().unwrap();

  world.update_center(ChunkIndex(40));
  assert!(!world.is_active(ChunkIndex(1)));
  world.update_center(ChunkIndex(0));

  assert_eq!(world.road_chunk(ChunkIndex(1)), Some(&road));
  assert_eq!(world.terrain_chunk(ChunkIndex(1)), Some(&terrain));
  assert_eq!(world.stars_chunk(ChunkIndex(1)), Some(&stars));
}

#[test]
fn generation_order_does_not_matter() {
  let a = ChunkGenerator::new(GenerationConfig::default(), 5);
  let b = ChunkGenerator::new(GenerationConfig::default(), 5);
  let catalog = catalog();

  let forward: Vec<_> = (0..10).map(|i| a.road(ChunkIndex(i), &catalog)).collect();
  let backward: Vec<_> = (0..10)
    .rev()
    .map(|i| b.road(ChunkIndex(i), &catalog))
    .collect();
  assert!(forward.iter().eq(backward.iter().rev()));
}

#[test]
fn empty_catalog_means_no_billboards() {
  let generator = ChunkGenerator::new(GenerationConfig::default(), 3);
  let empty = BillboardCatalog::default();
  assert!((-50..50).all(|i| generator.road(ChunkIndex(i), &empty).billboard.is_none()));
}

#[test]
fn sequential_boards_rotate_through_the_catalog() {
  let generator = ChunkGenerator::new(GenerationConfig::default(), 8);
  let catalog = catalog();
  assert_eq!(
    generator.config().billboard.policy,
    BillboardPolicy::Sequential
  );

  let mut seen = 0;
  for i in -30..30 {
    if let Some(board) = generator.road(ChunkIndex(i), &catalog).billboard {
      let expected = &catalog.entries()[i.rem_euclid(3) as usize];
      assert_eq!(&board.entry, expected);
      assert_eq!(board.position.z, ChunkIndex(i).offset(50.0));
      seen += 1;
    }
  }
  assert!(seen > 0);
}
