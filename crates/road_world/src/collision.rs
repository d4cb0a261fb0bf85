//! Discrete barrier collision check.
//!
//! The vehicle's axis-aligned extent is tested against the barrier extents of
//! the chunk the vehicle is in and its two longitudinal neighbours. The test
//! is not swept: at extreme speeds the vehicle can tunnel through a barrier
//! thinner than one tick of travel.

use bevy::math::Vec3;

use crate::coords::ChunkIndex;
use crate::generation::RoadChunk;
use crate::vehicle::VehicleBody;

/// Axis-aligned box in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
  pub min: Vec3,
  pub max: Vec3,
}

impl Aabb {
  pub const fn new(min: Vec3, max: Vec3) -> Self {
    Self { min, max }
  }

  /// Creates a box from its center and half extents.
  pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
    Self {
      min: center - half_extents,
      max: center + half_extents,
    }
  }

  pub fn center(&self) -> Vec3 {
    (self.min + self.max) * 0.5
  }

  pub fn size(&self) -> Vec3 {
    self.max - self.min
  }

  /// Returns true if the two boxes overlap or touch.
  pub fn intersects(&self, other: &Aabb) -> bool {
    self.min.x <= other.max.x
      && self.max.x >= other.min.x
      && self.min.y <= other.max.y
      && self.max.y >= other.min.y
      && self.min.z <= other.max.z
      && self.max.z >= other.min.z
  }
}

/// Computes the world-space bounding box of the vehicle body at a pose.
///
/// The body's footprint is rotated by `heading` and enclosed in an
/// axis-aligned box; the box rests on `position.y`.
pub fn vehicle_extent(position: Vec3, heading: f32, body: &VehicleBody) -> Aabb {
  let (sin, cos) = heading.sin_cos();
  let half_width = body.width / 2.0;
  let half_length = body.length / 2.0;

  let half_x = cos.abs() * half_width + sin.abs() * half_length;
  let half_z = sin.abs() * half_width + cos.abs() * half_length;

  Aabb {
    min: Vec3::new(position.x - half_x, position.y, position.z - half_z),
    max: Vec3::new(
      position.x + half_x,
      position.y + body.height,
      position.z + half_z,
    ),
  }
}

/// Returns true if `extent` overlaps any barrier near `current`.
///
/// `lookup` resolves an index to its active road chunk. When the current
/// chunk is absent the check reports no collision; absent neighbours simply
/// contribute no barriers.
pub fn hits_barrier<'a, F>(extent: &Aabb, current: ChunkIndex, lookup: F) -> bool
where
  F: Fn(ChunkIndex) -> Option<&'a RoadChunk>,
{
  if lookup(current).is_none() {
    return false;
  }

  [current, current.prev(), current.next()]
    .into_iter()
    .filter_map(&lookup)
    .flat_map(|chunk| chunk.barriers.iter())
    .any(|barrier| extent.intersects(&barrier.extent))
}
