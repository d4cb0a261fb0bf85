//! Terrain segment content: heightfield grid plus scattered decoration.

use bevy::math::Vec3;
use rand::Rng;
use serde::Deserialize;

use super::heightfield::Heightfield;
use crate::coords::ChunkIndex;

/// Terrain layout parameters.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct TerrainConfig {
  /// Total width across the road, in world units.
  pub width: f32,
  /// Grid quads per side.
  pub segments: u32,
  /// Vertical offset of the heightfield below the road surface.
  pub base_y: f32,
  pub heightfield: Heightfield,
  pub bush_count: u32,
  pub bush_size: f32,
  pub tree_count: u32,
  pub tree_height: f32,
}

impl Default for TerrainConfig {
  fn default() -> Self {
    Self {
      width: crate::coords::ROAD_WIDTH * 50.0,
      segments: 10,
      base_y: -5.0,
      heightfield: Heightfield::default(),
      bush_count: 15,
      bush_size: 3.0,
      tree_count: 3,
      tree_height: 8.0,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecorationKind {
  Bush,
  Tree,
}

/// A decoration resting on the terrain surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decoration {
  pub kind: DecorationKind,
  /// World-space point on the surface the decoration stands on.
  pub position: Vec3,
  pub size: f32,
}

/// Generated content of one terrain chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainChunk {
  pub index: ChunkIndex,
  /// World-space center of the grid at `y = base_y`.
  pub origin: Vec3,
  pub width: f32,
  pub length: f32,
  pub segments: u32,
  /// Row-major heights, `(segments + 1)^2` entries, rows along +Z.
  pub heights: Vec<f32>,
  pub decorations: Vec<Decoration>,
}

impl TerrainChunk {
  /// Number of vertices along one side of the grid.
  pub fn stride(&self) -> usize {
    self.segments as usize + 1
  }

  /// Local `(x, z)` of grid vertex `(col, row)` relative to `origin`.
  pub fn vertex_local(&self, col: usize, row: usize) -> (f32, f32) {
    let step_x = self.width / self.segments as f32;
    let step_z = self.length / self.segments as f32;
    (
      -self.width / 2.0 + col as f32 * step_x,
      -self.length / 2.0 + row as f32 * step_z,
    )
  }

  pub fn height_at(&self, col: usize, row: usize) -> f32 {
    self.heights[row * self.stride() + col]
  }

  pub(crate) fn build<R: Rng>(
    index: ChunkIndex,
    chunk_size: f32,
    road_width: f32,
    config: &TerrainConfig,
    rng: &mut R,
  ) -> Self {
    let offset = index.offset(chunk_size);
    let segments = config.segments.max(1);
    let mut chunk = Self {
      index,
      origin: Vec3::new(0.0, config.base_y, offset),
      width: config.width,
      length: chunk_size,
      segments,
      heights: Vec::with_capacity((segments as usize + 1).pow(2)),
      decorations: Vec::with_capacity((config.bush_count + config.tree_count) as usize),
    };

    for row in 0..chunk.stride() {
      for col in 0..chunk.stride() {
        let (x, z) = chunk.vertex_local(col, row);
        chunk.heights.push(config.heightfield.sample(x, offset + z));
      }
    }

    let kinds = std::iter::repeat_n(DecorationKind::Bush, config.bush_count as usize)
      .chain(std::iter::repeat_n(DecorationKind::Tree, config.tree_count as usize));
    for kind in kinds {
      let size = match kind {
        DecorationKind::Bush => config.bush_size,
        DecorationKind::Tree => config.tree_height,
      };
      if let Some(position) = scatter(config, chunk_size, road_width, offset, rng) {
        chunk.decorations.push(Decoration {
          kind,
          position,
          size,
        });
      }
    }

    chunk
  }
}

/// Picks a point off the road, resting on the terrain surface.
///
/// Rejected samples are retried a bounded number of times.
fn scatter<R: Rng>(
  config: &TerrainConfig,
  chunk_size: f32,
  road_width: f32,
  offset: f32,
  rng: &mut R,
) -> Option<Vec3> {
  const MAX_ATTEMPTS: usize = 8;
  let half_width = config.width / 2.0;
  if half_width <= road_width / 2.0 {
    return None;
  }

  for _ in 0..MAX_ATTEMPTS {
    let x = rng.random_range(-half_width..half_width);
    let z = offset + rng.random_range(-chunk_size / 2.0..chunk_size / 2.0);
    if x.abs() <= road_width / 2.0 {
      continue;
    }
    let y = config.base_y + config.heightfield.sample(x, z);
    return Some(Vec3::new(x, y, z));
  }
  None
}
