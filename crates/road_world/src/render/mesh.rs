//! Mesh builders for chunk content.
//!
//! Meshes are built in chunk-local space; the caller places the entity.

use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;

use crate::generation::{Heightfield, TerrainChunk};

fn empty_mesh() -> Mesh {
  Mesh::new(
    PrimitiveTopology::TriangleList,
    RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
  )
}

/// Creates the terrain grid of `chunk`, relative to `chunk.origin`.
///
/// Normals come from the heightfield so shading matches across chunk seams.
pub fn create_terrain_mesh(chunk: &TerrainChunk, heightfield: &Heightfield) -> Mesh {
  let stride = chunk.stride();
  let segments = chunk.segments as f32;
  let mut positions = Vec::with_capacity(stride * stride);
  let mut normals = Vec::with_capacity(stride * stride);
  let mut uvs = Vec::with_capacity(stride * stride);

  for row in 0..stride {
    for col in 0..stride {
      let (x, z) = chunk.vertex_local(col, row);
      positions.push([x, chunk.height_at(col, row), z]);
      normals.push(heightfield.normal(x, chunk.origin.z + z).to_array());
      uvs.push([col as f32 / segments, row as f32 / segments]);
    }
  }

  let mut indices = Vec::with_capacity((stride - 1) * (stride - 1) * 6);
  for row in 0..stride - 1 {
    for col in 0..stride - 1 {
      let a = (row * stride + col) as u32;
      let b = a + 1;
      let c = a + stride as u32;
      let d = c + 1;
      // Counter-clockwise seen from above.
      indices.extend_from_slice(&[a, c, b, b, c, d]);
    }
  }

  empty_mesh()
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
    .with_inserted_indices(Indices::U32(indices))
}

/// Two vertical quads crossed at right angles, standing on `y = 0`.
///
/// Rendered double-sided for bushes and tree crowns.
pub fn create_crossed_planes(width: f32, height: f32) -> Mesh {
  let hw = width / 2.0;
  let positions = vec![
    [-hw, 0.0, 0.0],
    [hw, 0.0, 0.0],
    [hw, height, 0.0],
    [-hw, height, 0.0],
    [0.0, 0.0, -hw],
    [0.0, 0.0, hw],
    [0.0, height, hw],
    [0.0, height, -hw],
  ];
  let normals = vec![
    [0.0, 0.0, 1.0],
    [0.0, 0.0, 1.0],
    [0.0, 0.0, 1.0],
    [0.0, 0.0, 1.0],
    [-1.0, 0.0, 0.0],
    [-1.0, 0.0, 0.0],
    [-1.0, 0.0, 0.0],
    [-1.0, 0.0, 0.0],
  ];
  let uvs = vec![
    [0.0, 1.0],
    [1.0, 1.0],
    [1.0, 0.0],
    [0.0, 0.0],
    [0.0, 1.0],
    [1.0, 1.0],
    [1.0, 0.0],
    [0.0, 0.0],
  ];

  empty_mesh()
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
    .with_inserted_indices(Indices::U32(vec![0, 1, 2, 0, 2, 3, 4, 5, 6, 4, 6, 7]))
}

/// One small crossed quad per star, relative to `origin`.
pub fn create_star_mesh(points: &[Vec3], origin: Vec3, size: f32) -> Mesh {
  let h = size / 2.0;
  let mut positions = Vec::with_capacity(points.len() * 8);
  let mut indices = Vec::with_capacity(points.len() * 12);

  for point in points {
    let p = *point - origin;
    let base = positions.len() as u32;
    positions.extend_from_slice(&[
      [p.x - h, p.y - h, p.z],
      [p.x + h, p.y - h, p.z],
      [p.x + h, p.y + h, p.z],
      [p.x - h, p.y + h, p.z],
      [p.x, p.y - h, p.z - h],
      [p.x, p.y - h, p.z + h],
      [p.x, p.y + h, p.z + h],
      [p.x, p.y + h, p.z - h],
    ]);
    for quad in [0, 4] {
      let q = base + quad;
      indices.extend_from_slice(&[q, q + 1, q + 2, q, q + 2, q + 3]);
    }
  }

  let normals = vec![[0.0, 0.0, -1.0]; positions.len()];
  empty_mesh()
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
    .with_inserted_indices(Indices::U32(indices))
}
