//! Chunk rendering.
//!
//! [`ChunkAssets`] holds the meshes and materials shared by every chunk.
//! Per-chunk assets (terrain grid, star cluster, billboard face) are created
//! on spawn and owned only by the chunk's entities, so despawning a chunk
//! releases them.

mod canvas;
pub mod face;
pub mod mesh;
mod rgba;
pub mod textures;

use std::f32::consts::PI;

use bevy::ecs::system::SystemParam;
use bevy::math::Affine2;
use bevy::prelude::*;
use bevy::render::render_resource::Face;
pub use canvas::Canvas;
pub use rgba::Rgba;

use crate::generation::{
  BACK_FACE_CONTENT, BACK_FACE_TITLE, Billboard, DecorationKind, GenerationConfig, StarsChunk,
  TerrainChunk,
};
use crate::text::CpuFont;

const PILLAR_SIZE: Vec3 = Vec3::new(0.5, 15.0, 0.5);
const PILLAR_Y: f32 = 1.0;
const DISPLAY_SIZE: Vec3 = Vec3::new(20.0, 8.0, 0.2);
const DISPLAY_Y: f32 = 12.0;
const FACE_OFFSET: f32 = 0.11;
const STAR_SIZE: f32 = 0.8;

/// Marker for the star cluster of a chunk. Visible only at night.
#[derive(Component)]
pub struct ChunkStars;

/// Meshes, materials and font shared by all chunks.
#[derive(Resource)]
pub struct ChunkAssets {
  road_mesh: Handle<Mesh>,
  road_material: Handle<StandardMaterial>,
  barrier_mesh: Handle<Mesh>,
  barrier_material: Handle<StandardMaterial>,
  terrain_material: Handle<StandardMaterial>,
  bush_mesh: Handle<Mesh>,
  foliage_material: Handle<StandardMaterial>,
  trunk_mesh: Handle<Mesh>,
  trunk_material: Handle<StandardMaterial>,
  pillar_mesh: Handle<Mesh>,
  pillar_material: Handle<StandardMaterial>,
  display_mesh: Handle<Mesh>,
  display_material: Handle<StandardMaterial>,
  face_mesh: Handle<Mesh>,
  back_face_material: Handle<StandardMaterial>,
  star_material: Handle<StandardMaterial>,
  font: Option<CpuFont>,
}

impl ChunkAssets {
  /// Creates the shared assets for chunks laid out by `config`.
  ///
  /// Without a font billboard faces are left blank.
  pub fn new(
    config: &GenerationConfig,
    font: Option<CpuFont>,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    images: &mut Assets<Image>,
  ) -> Self {
    let road_texture = images.add(textures::create_tiling_texture(textures::paint_road(1)));
    let barrier_texture = images.add(textures::create_tiling_texture(textures::paint_barrier()));
    let grass_texture = images.add(textures::create_tiling_texture(textures::paint_grass(2)));
    let foliage_texture = images.add(textures::paint_foliage(3).into_image());

    let terrain = &config.terrain;
    let back_face = face_material(
      materials,
      images,
      face::paint_face(font.as_ref(), BACK_FACE_TITLE, BACK_FACE_CONTENT),
    );

    Self {
      road_mesh: meshes.add(Plane3d::default().mesh().size(config.road_width, config.chunk_size)),
      road_material: materials.add(StandardMaterial {
        base_color_texture: Some(road_texture),
        perceptual_roughness: 0.9,
        uv_transform: Affine2::from_scale(Vec2::new(1.0, 10.0)),
        ..default()
      }),
      barrier_mesh: meshes.add(Cuboid::new(
        config.barrier.thickness,
        config.barrier.height,
        config.chunk_size,
      )),
      barrier_material: materials.add(StandardMaterial {
        base_color_texture: Some(barrier_texture),
        uv_transform: Affine2::from_scale(Vec2::new(10.0, 1.0)),
        ..default()
      }),
      terrain_material: materials.add(StandardMaterial {
        base_color_texture: Some(grass_texture),
        perceptual_roughness: 1.0,
        uv_transform: Affine2::from_scale(Vec2::splat(50.0)),
        ..default()
      }),
      bush_mesh: meshes.add(mesh::create_crossed_planes(terrain.bush_size, terrain.bush_size)),
      foliage_material: materials.add(StandardMaterial {
        base_color_texture: Some(foliage_texture),
        alpha_mode: AlphaMode::Mask(0.5),
        cull_mode: None,
        double_sided: true,
        ..default()
      }),
      trunk_mesh: meshes.add(Cuboid::new(0.4, 1.0, 0.4)),
      trunk_material: materials.add(Color::srgb_u8(0x5b, 0x3a, 0x1e)),
      pillar_mesh: meshes.add(Cuboid::from_size(PILLAR_SIZE)),
      pillar_material: materials.add(Color::BLACK),
      display_mesh: meshes.add(Cuboid::from_size(DISPLAY_SIZE)),
      display_material: materials.add(Color::WHITE),
      face_mesh: meshes.add(Rectangle::new(DISPLAY_SIZE.x, DISPLAY_SIZE.y)),
      back_face_material: back_face,
      star_material: materials.add(StandardMaterial {
        base_color: Color::WHITE,
        unlit: true,
        fog_enabled: false,
        cull_mode: None,
        double_sided: true,
        ..default()
      }),
      font,
    }
  }

  pub fn has_font(&self) -> bool {
    self.font.is_some()
  }
}

fn face_material(
  materials: &mut Assets<StandardMaterial>,
  images: &mut Assets<Image>,
  canvas: Canvas,
) -> Handle<StandardMaterial> {
  let texture = images.add(canvas.into_image());
  materials.add(StandardMaterial {
    base_color_texture: Some(texture),
    unlit: true,
    cull_mode: Some(Face::Back),
    ..default()
  })
}

/// Asset access for spawning chunk visuals.
///
/// Every field is absent in headless apps, in which case chunks are spawned
/// as bare roots.
#[derive(SystemParam)]
pub struct ChunkRenderer<'w> {
  assets: Option<Res<'w, ChunkAssets>>,
  meshes: Option<ResMut<'w, Assets<Mesh>>>,
  materials: Option<ResMut<'w, Assets<StandardMaterial>>>,
  images: Option<ResMut<'w, Assets<Image>>>,
}

impl ChunkRenderer<'_> {
  /// Spawns the visual children of one chunk under `root`.
  ///
  /// `root` sits at the chunk's center on the travel axis.
  pub fn populate(
    &mut self,
    commands: &mut Commands,
    root: Entity,
    config: &GenerationConfig,
    slot: &crate::world::ChunkSlot,
  ) {
    let (Some(assets), Some(meshes), Some(materials), Some(images)) = (
      self.assets.as_deref(),
      self.meshes.as_deref_mut(),
      self.materials.as_deref_mut(),
      self.images.as_deref_mut(),
    ) else {
      return;
    };
    let offset = slot.road.surface.center.z;

    commands.spawn((
      Mesh3d(assets.road_mesh.clone()),
      MeshMaterial3d(assets.road_material.clone()),
      Transform::IDENTITY,
      ChildOf(root),
    ));
    for barrier in &slot.road.barriers {
      let center = barrier.extent.center();
      commands.spawn((
        Mesh3d(assets.barrier_mesh.clone()),
        MeshMaterial3d(assets.barrier_material.clone()),
        Transform::from_xyz(center.x, center.y, center.z - offset),
        ChildOf(root),
      ));
    }

    spawn_terrain(commands, root, assets, meshes, config, &slot.terrain, offset);
    spawn_stars(commands, root, assets, meshes, &slot.stars, offset);
    if let Some(board) = &slot.road.billboard {
      spawn_billboard(commands, root, assets, materials, images, board, offset);
    }
  }
}

fn spawn_terrain(
  commands: &mut Commands,
  root: Entity,
  assets: &ChunkAssets,
  meshes: &mut Assets<Mesh>,
  config: &GenerationConfig,
  terrain: &TerrainChunk,
  offset: f32,
) {
  let grid = meshes.add(mesh::create_terrain_mesh(terrain, &config.terrain.heightfield));
  commands.spawn((
    Mesh3d(grid),
    MeshMaterial3d(assets.terrain_material.clone()),
    Transform::from_xyz(terrain.origin.x, terrain.origin.y, terrain.origin.z - offset),
    ChildOf(root),
  ));

  for decoration in &terrain.decorations {
    let local = decoration.position - Vec3::Z * offset;
    match decoration.kind {
      DecorationKind::Bush => {
        commands.spawn((
          Mesh3d(assets.bush_mesh.clone()),
          MeshMaterial3d(assets.foliage_material.clone()),
          Transform::from_translation(local),
          ChildOf(root),
        ));
      }
      DecorationKind::Tree => {
        let trunk_height = decoration.size * 0.5;
        commands.spawn((
          Mesh3d(assets.trunk_mesh.clone()),
          MeshMaterial3d(assets.trunk_material.clone()),
          Transform::from_translation(local + Vec3::Y * trunk_height / 2.0)
            .with_scale(Vec3::new(1.0, trunk_height, 1.0)),
          ChildOf(root),
        ));
        commands.spawn((
          Mesh3d(assets.bush_mesh.clone()),
          MeshMaterial3d(assets.foliage_material.clone()),
          Transform::from_translation(local + Vec3::Y * trunk_height * 0.8)
            .with_scale(Vec3::splat(decoration.size * 0.6 / config.terrain.bush_size.max(0.01))),
          ChildOf(root),
        ));
      }
    }
  }
}

fn spawn_stars(
  commands: &mut Commands,
  root: Entity,
  assets: &ChunkAssets,
  meshes: &mut Assets<Mesh>,
  stars: &StarsChunk,
  offset: f32,
) {
  if stars.points.is_empty() {
    return;
  }
  let cluster = meshes.add(mesh::create_star_mesh(
    &stars.points,
    Vec3::Z * offset,
    STAR_SIZE,
  ));
  commands.spawn((
    ChunkStars,
    Mesh3d(cluster),
    MeshMaterial3d(assets.star_material.clone()),
    Transform::IDENTITY,
    Visibility::Hidden,
    ChildOf(root),
  ));
}

fn spawn_billboard(
  commands: &mut Commands,
  root: Entity,
  assets: &ChunkAssets,
  materials: &mut Assets<StandardMaterial>,
  images: &mut Assets<Image>,
  board: &Billboard,
  offset: f32,
) {
  // Turned to face oncoming traffic.
  let group = commands
    .spawn((
      Transform::from_xyz(board.position.x, board.position.y, board.position.z - offset)
        .with_rotation(Quat::from_rotation_y(PI)),
      Visibility::default(),
      ChildOf(root),
    ))
    .id();

  commands.spawn((
    Mesh3d(assets.pillar_mesh.clone()),
    MeshMaterial3d(assets.pillar_material.clone()),
    Transform::from_xyz(0.0, PILLAR_Y, 0.0),
    ChildOf(group),
  ));
  commands.spawn((
    Mesh3d(assets.display_mesh.clone()),
    MeshMaterial3d(assets.display_material.clone()),
    Transform::from_xyz(0.0, DISPLAY_Y, 0.0),
    ChildOf(group),
  ));

  let front = face_material(
    materials,
    images,
    face::paint_face(
      assets.font.as_ref(),
      &board.entry.title,
      &board.entry.content,
    ),
  );
  commands.spawn((
    Mesh3d(assets.face_mesh.clone()),
    MeshMaterial3d(front),
    Transform::from_xyz(0.0, DISPLAY_Y, FACE_OFFSET),
    ChildOf(group),
  ));
  commands.spawn((
    Mesh3d(assets.face_mesh.clone()),
    MeshMaterial3d(assets.back_face_material.clone()),
    Transform::from_xyz(0.0, DISPLAY_Y, -FACE_OFFSET).with_rotation(Quat::from_rotation_y(PI)),
    ChildOf(group),
  ));
}
