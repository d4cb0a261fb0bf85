//! Chunk indexing along the travel axis.
//!
//! The world is cut into fixed-length segments along +Z. A [`ChunkIndex`]
//! names one segment; `index * chunk_size` is the segment's center offset on
//! the travel axis, so chunk `0` spans `[-chunk_size/2, chunk_size/2)`.

use std::fmt;
use std::ops::{Add, Sub};

/// Default length of one chunk along the travel axis, in world units.
pub const CHUNK_SIZE: f32 = 50.0;

/// Default width of the drivable road surface.
pub const ROAD_WIDTH: f32 = 10.0;

/// Default number of chunks kept alive on each side of the vehicle's chunk.
pub const RENDER_DISTANCE: i32 = 10;

/// Integer identifier of a longitudinal world segment.
///
/// Indices are unbounded in both directions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChunkIndex(pub i32);

impl ChunkIndex {
  pub const ORIGIN: ChunkIndex = ChunkIndex(0);

  pub const fn new(index: i32) -> Self {
    Self(index)
  }

  /// Returns the chunk whose center is nearest to `along_axis`.
  ///
  /// Transitions happen halfway between chunk centers. A halfway point
  /// belongs to the chunk towards +Z, on both sides of the origin.
  pub fn containing(along_axis: f32, chunk_size: f32) -> Self {
    Self((along_axis / chunk_size + 0.5).floor() as i32)
  }

  /// World-space offset of this chunk's center on the travel axis.
  #[inline]
  pub fn offset(self, chunk_size: f32) -> f32 {
    self.0 as f32 * chunk_size
  }

  /// Index of the previous chunk (towards -Z).
  #[inline]
  pub fn prev(self) -> Self {
    Self(self.0 - 1)
  }

  /// Index of the next chunk (towards +Z).
  #[inline]
  pub fn next(self) -> Self {
    Self(self.0 + 1)
  }
}

impl Add<i32> for ChunkIndex {
  type Output = ChunkIndex;

  fn add(self, rhs: i32) -> ChunkIndex {
    ChunkIndex(self.0 + rhs)
  }
}

impl Sub<i32> for ChunkIndex {
  type Output = ChunkIndex;

  fn sub(self, rhs: i32) -> ChunkIndex {
    ChunkIndex(self.0 - rhs)
  }
}

impl fmt::Display for ChunkIndex {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "chunk#{}", self.0)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn containing_rounds_to_nearest_center() {
    assert_eq!(ChunkIndex::containing(0.0, CHUNK_SIZE), ChunkIndex(0));
    assert_eq!(ChunkIndex::containing(24.9, CHUNK_SIZE), ChunkIndex(0));
    assert_eq!(ChunkIndex::containing(25.1, CHUNK_SIZE), ChunkIndex(1));
    assert_eq!(ChunkIndex::containing(-25.1, CHUNK_SIZE), ChunkIndex(-1));
    assert_eq!(ChunkIndex::containing(750.0, CHUNK_SIZE), ChunkIndex(15));
  }

  #[test]
  fn halfway_points_belong_to_the_chunk_ahead() {
    assert_eq!(ChunkIndex::containing(25.0, CHUNK_SIZE), ChunkIndex(1));
    assert_eq!(ChunkIndex::containing(-25.0, CHUNK_SIZE), ChunkIndex(0));
    assert_eq!(ChunkIndex::containing(-75.0, CHUNK_SIZE), ChunkIndex(-1));
    assert_eq!(ChunkIndex::containing(-75.1, CHUNK_SIZE), ChunkIndex(-2));
  }

  #[test]
  fn offset_is_index_times_size() {
    assert_eq!(ChunkIndex(-3).offset(CHUNK_SIZE), -150.0);
    assert_eq!(ChunkIndex(7).next().offset(10.0), 80.0);
  }
}
