//! Night-sky point clusters, one per chunk.

use bevy::math::Vec3;
use rand::Rng;
use serde::Deserialize;

use crate::coords::ChunkIndex;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct StarsConfig {
  pub count: u32,
  /// Half-width of the scatter band across the road.
  pub spread: f32,
  pub min_height: f32,
  pub max_height: f32,
}

impl Default for StarsConfig {
  fn default() -> Self {
    Self {
      count: 40,
      spread: 250.0,
      min_height: 80.0,
      max_height: 160.0,
    }
  }
}

/// Star positions above one chunk, in world space.
#[derive(Debug, Clone, PartialEq)]
pub struct StarsChunk {
  pub index: ChunkIndex,
  pub points: Vec<Vec3>,
}

impl StarsChunk {
  pub(crate) fn build<R: Rng>(
    index: ChunkIndex,
    chunk_size: f32,
    config: &StarsConfig,
    rng: &mut R,
  ) -> Self {
    let offset = index.offset(chunk_size);
    let low = config.min_height;
    let high = config.max_height.max(low);
    let points = (0..config.count)
      .map(|_| {
        Vec3::new(
          rng.random_range(-config.spread..=config.spread),
          rng.random_range(low..=high),
          offset + rng.random_range(-chunk_size / 2.0..chunk_size / 2.0),
        )
      })
      .collect();
    Self { index, points }
  }
}
