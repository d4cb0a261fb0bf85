//! Road segment content: surface strip, two barriers, optional billboard.

use bevy::math::Vec3;
use serde::Deserialize;

use super::billboard::{Billboard, RoadSide};
use crate::collision::Aabb;
use crate::coords::ChunkIndex;

/// Barrier dimensions.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct BarrierConfig {
  pub height: f32,
  pub thickness: f32,
}

impl Default for BarrierConfig {
  fn default() -> Self {
    Self {
      height: 2.0,
      thickness: 0.2,
    }
  }
}

/// Flat drivable strip, centered on `center`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoadSurface {
  pub center: Vec3,
  pub width: f32,
  pub length: f32,
}

/// One roadside barrier and its collision extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Barrier {
  pub side: RoadSide,
  pub extent: Aabb,
}

/// Generated content of one road chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadChunk {
  pub index: ChunkIndex,
  pub surface: RoadSurface,
  pub barriers: [Barrier; 2],
  pub billboard: Option<Billboard>,
}

impl RoadChunk {
  pub(crate) fn build(
    index: ChunkIndex,
    chunk_size: f32,
    road_width: f32,
    barrier: &BarrierConfig,
    billboard: Option<Billboard>,
  ) -> Self {
    let offset = index.offset(chunk_size);
    let center = Vec3::new(0.0, 0.0, offset);

    let make_barrier = |side: RoadSide| {
      let x = side.sign() * road_width / 2.0;
      Barrier {
        side,
        extent: Aabb::from_center(
          Vec3::new(x, barrier.height / 2.0, offset),
          Vec3::new(barrier.thickness / 2.0, barrier.height / 2.0, chunk_size / 2.0),
        ),
      }
    };

    Self {
      index,
      surface: RoadSurface {
        center,
        width: road_width,
        length: chunk_size,
      },
      barriers: [make_barrier(RoadSide::Left), make_barrier(RoadSide::Right)],
      billboard,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn barriers_flank_the_surface() {
    let chunk = RoadChunk::build(ChunkIndex(3), 50.0, 10.0, &BarrierConfig::default(), None);
    assert_eq!(chunk.surface.center.z, 150.0);

    let [left, right] = chunk.barriers;
    assert!((left.extent.center().x + 5.0).abs() < 1e-5);
    assert!((right.extent.center().x - 5.0).abs() < 1e-5);
    assert_eq!(right.extent.min.z, 125.0);
    assert_eq!(right.extent.max.z, 175.0);
    assert_eq!(right.extent.min.y, 0.0);
    assert_eq!(right.extent.max.y, 2.0);
  }
}
