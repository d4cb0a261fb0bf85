//! Chunk content generation.
//!
//! Every chunk is a pure function of `(world seed, chunk index)`: each index
//! gets its own RNG streams, so a chunk that leaves the window and comes back
//! is rebuilt identically, and generation order does not matter.

mod billboard;
mod heightfield;
mod road;
mod stars;
mod terrain;

use std::fmt;

pub use billboard::{
  BACK_FACE_CONTENT, BACK_FACE_TITLE, Billboard, BillboardCatalog, BillboardConfig,
  BillboardEntry, BillboardPolicy, CatalogError, RoadSide,
};
pub use heightfield::Heightfield;
use rand::SeedableRng;
use rand::rngs::StdRng;
pub use road::{Barrier, BarrierConfig, RoadChunk, RoadSurface};
use serde::Deserialize;
pub use stars::{StarsChunk, StarsConfig};
pub use terrain::{Decoration, DecorationKind, TerrainChunk, TerrainConfig};

use crate::coords::{CHUNK_SIZE, ChunkIndex, ROAD_WIDTH};

/// Layout parameters shared by all generated chunks.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GenerationConfig {
  pub chunk_size: f32,
  pub road_width: f32,
  pub barrier: BarrierConfig,
  pub terrain: TerrainConfig,
  pub billboard: BillboardConfig,
  pub stars: StarsConfig,
}

impl Default for GenerationConfig {
  fn default() -> Self {
    Self {
      chunk_size: CHUNK_SIZE,
      road_width: ROAD_WIDTH,
      barrier: BarrierConfig::default(),
      terrain: TerrainConfig::default(),
      billboard: BillboardConfig::default(),
      stars: StarsConfig::default(),
    }
  }
}

impl GenerationConfig {
  /// Checks every value the generators sample ranges from.
  pub fn validate(&self) -> Result<(), InvalidGenerationConfig> {
    let positive = [
      ("chunk_size", self.chunk_size),
      ("road_width", self.road_width),
      ("terrain.width", self.terrain.width),
    ];
    for (field, value) in positive {
      if !(value.is_finite() && value > 0.0) {
        return Err(InvalidGenerationConfig::new(field, value));
      }
    }
    if self.terrain.segments == 0 {
      return Err(InvalidGenerationConfig::new("terrain.segments", 0.0));
    }
    if !(self.stars.spread.is_finite() && self.stars.spread >= 0.0) {
      return Err(InvalidGenerationConfig::new("stars.spread", self.stars.spread));
    }
    let finite = [
      ("barrier.height", self.barrier.height),
      ("barrier.thickness", self.barrier.thickness),
      ("terrain.base_y", self.terrain.base_y),
      ("terrain.bush_size", self.terrain.bush_size),
      ("terrain.tree_height", self.terrain.tree_height),
      ("terrain.heightfield.max_height", self.terrain.heightfield.max_height),
      ("terrain.heightfield.x_frequency", self.terrain.heightfield.x_frequency),
      ("terrain.heightfield.z_frequency", self.terrain.heightfield.z_frequency),
      ("stars.min_height", self.stars.min_height),
      ("stars.max_height", self.stars.max_height),
      ("billboard.edge_offset", self.billboard.edge_offset),
      ("billboard.placement_chance", self.billboard.placement_chance as f32),
    ];
    for (field, value) in finite {
      if !value.is_finite() {
        return Err(InvalidGenerationConfig::new(field, value));
      }
    }
    Ok(())
  }

  /// Returns `self` if valid, otherwise warns and returns the defaults.
  pub fn or_default(self) -> Self {
    match self.validate() {
      Ok(()) => self,
      Err(e) => {
        bevy::log::warn!("Using default generation config: {}", e);
        Self::default()
      }
    }
  }
}

/// A generation value outside the range chunks can be built from.
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidGenerationConfig {
  pub field: &'static str,
  pub value: f32,
}

impl InvalidGenerationConfig {
  fn new(field: &'static str, value: f32) -> Self {
    Self { field, value }
  }
}

impl fmt::Display for InvalidGenerationConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "invalid {} = {}", self.field, self.value)
  }
}

impl std::error::Error for InvalidGenerationConfig {}

/// Independent random streams per chunk.
#[derive(Clone, Copy)]
enum Stream {
  Billboard = 1,
  Terrain = 2,
  Stars = 3,
}

/// Deterministic per-index chunk builder.
#[derive(Debug, Clone)]
pub struct ChunkGenerator {
  config: GenerationConfig,
  seed: u64,
}

impl ChunkGenerator {
  /// Invalid configs fall back to [`GenerationConfig::default`].
  pub fn new(config: GenerationConfig, seed: u64) -> Self {
    Self {
      config: config.or_default(),
      seed,
    }
  }

  pub fn config(&self) -> &GenerationConfig {
    &self.config
  }

  pub fn seed(&self) -> u64 {
    self.seed
  }

  /// Builds the road segment for `index`.
  ///
  /// An empty `catalog` yields a chunk without a billboard.
  pub fn road(&self, index: ChunkIndex, catalog: &BillboardCatalog) -> RoadChunk {
    let config = &self.config;
    let mut rng = self.rng(index, Stream::Billboard);
    let board = billboard::place(
      catalog,
      &config.billboard,
      config.road_width,
      index,
      index.offset(config.chunk_size),
      &mut rng,
    );
    RoadChunk::build(
      index,
      config.chunk_size,
      config.road_width,
      &config.barrier,
      board,
    )
  }

  /// Builds the terrain segment for `index`.
  pub fn terrain(&self, index: ChunkIndex) -> TerrainChunk {
    let mut rng = self.rng(index, Stream::Terrain);
    TerrainChunk::build(
      index,
      self.config.chunk_size,
      self.config.road_width,
      &self.config.terrain,
      &mut rng,
    )
  }

  /// Builds the star cluster for `index`.
  pub fn stars(&self, index: ChunkIndex) -> StarsChunk {
    let mut rng = self.rng(index, Stream::Stars);
    StarsChunk::build(index, self.config.chunk_size, &self.config.stars, &mut rng)
  }

  fn rng(&self, index: ChunkIndex, stream: Stream) -> StdRng {
    StdRng::seed_from_u64(chunk_seed(self.seed, index, stream as u64))
  }
}

/// Mixes world seed, chunk index and stream id into one RNG seed.
fn chunk_seed(world_seed: u64, index: ChunkIndex, stream: u64) -> u64 {
  let mut z = world_seed
    ^ (index.0 as i64 as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
    ^ stream.wrapping_mul(0xD6E8_FEB8_6659_FD93);
  // splitmix64 finalizer
  z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
  z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
  z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn catalog() -> BillboardCatalog {
    BillboardCatalog::new(vec![
      BillboardEntry::new("EAT", "at Joe's"),
      BillboardEntry::new("SLEEP", "Motel 6 miles"),
    ])
  }

  #[test]
  fn same_index_same_content() {
    let generator = ChunkGenerator::new(GenerationConfig::default(), 42);
    let catalog = catalog();
    for i in [-7, 0, 3, 1000] {
      let index = ChunkIndex(i);
      assert_eq!(generator.road(index, &catalog), generator.road(index, &catalog));
      assert_eq!(generator.terrain(index), generator.terrain(index));
      assert_eq!(generator.stars(index), generator.stars(index));
    }
  }

  #[test]
  fn world_seed_changes_decoration() {
    let a = ChunkGenerator::new(GenerationConfig::default(), 1).terrain(ChunkIndex(4));
    let b = ChunkGenerator::new(GenerationConfig::default(), 2).terrain(ChunkIndex(4));
    assert_eq!(a.heights, b.heights);
    assert_ne!(a.decorations, b.decorations);
  }

  #[test]
  fn chunk_seeds_differ_per_index_and_stream() {
    let s = |i, stream| chunk_seed(0, ChunkIndex(i), stream);
    assert_ne!(s(0, 1), s(1, 1));
    assert_ne!(s(0, 1), s(0, 2));
    assert_ne!(s(-1, 1), s(1, 1));
  }

  #[test]
  fn shipped_defaults_are_valid() {
    assert_eq!(GenerationConfig::default().validate(), Ok(()));
  }

  #[test]
  fn out_of_range_values_are_rejected() {
    fn with(edit: impl FnOnce(&mut GenerationConfig)) -> Result<(), &'static str> {
      let mut config = GenerationConfig::default();
      edit(&mut config);
      config.validate().map_err(|e| e.field)
    }
    assert_eq!(with(|c| c.chunk_size = 0.0), Err("chunk_size"));
    assert_eq!(with(|c| c.road_width = -10.0), Err("road_width"));
    assert_eq!(with(|c| c.terrain.segments = 0), Err("terrain.segments"));
    assert_eq!(with(|c| c.stars.spread = -1.0), Err("stars.spread"));
    assert_eq!(
      with(|c| c.billboard.placement_chance = f64::NAN),
      Err("billboard.placement_chance")
    );
    assert_eq!(with(|c| c.stars.spread = 0.0), Ok(()));
  }

  #[test]
  fn invalid_config_builds_default_chunks() {
    let catalog = catalog();
    let broken = [
      GenerationConfig {
        chunk_size: 0.0,
        ..GenerationConfig::default()
      },
      GenerationConfig {
        stars: StarsConfig {
          spread: -5.0,
          ..StarsConfig::default()
        },
        ..GenerationConfig::default()
      },
      GenerationConfig {
        billboard: BillboardConfig {
          placement_chance: f64::NAN,
          ..BillboardConfig::default()
        },
        ..GenerationConfig::default()
      },
    ];
    let reference = ChunkGenerator::new(GenerationConfig::default(), 1);
    for config in broken {
      let generator = ChunkGenerator::new(config, 1);
      assert_eq!(generator.config(), &GenerationConfig::default());
      assert_eq!(generator.terrain(ChunkIndex(0)), reference.terrain(ChunkIndex(0)));
      assert_eq!(generator.stars(ChunkIndex(3)), reference.stars(ChunkIndex(3)));
      assert_eq!(
        generator.road(ChunkIndex(-2), &catalog),
        reference.road(ChunkIndex(-2), &catalog)
      );
    }
  }

  #[test]
  fn some_chunks_carry_billboards() {
    let generator = ChunkGenerator::new(GenerationConfig::default(), 7);
    let catalog = catalog();
    let with_board = (-50..50)
      .filter(|&i| generator.road(ChunkIndex(i), &catalog).billboard.is_some())
      .count();
    assert!(with_board > 10 && with_board < 90, "{with_board} of 100");
  }
}
