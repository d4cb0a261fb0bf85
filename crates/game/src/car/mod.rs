//! The player's car: model, lights and render interpolation.

pub mod interpolation;
pub mod lights;

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use bevy::prelude::*;
pub use interpolation::{CarPose, Pose};
pub use lights::{TailLight, TailLightGlow, TailLightKind, tail_light_state};
use road_world::{RoadWorldSet, RoadWorldSettings};

/// Marker for the car's root entity.
#[derive(Component)]
pub struct Car;

/// Ordering of car systems.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum CarSet {
  /// Moves the car transform to the interpolated pose (`Update`).
  Interpolate,
}

const BODY_COLOR: u32 = 0xff0000;
const CABIN_COLOR: u32 = 0xffffff;
const HEADLIGHT_LUMENS: f32 = 400_000.0;
const HEADLIGHT_RANGE: f32 = 100.0;

pub struct CarPlugin;

impl Plugin for CarPlugin {
  fn build(&self, app: &mut App) {
    app
      .add_systems(Startup, spawn_car)
      .add_systems(FixedFirst, interpolation::shift_poses)
      .add_systems(
        FixedUpdate,
        interpolation::store_current_pose.after(RoadWorldSet::Simulate),
      )
      .add_systems(
        Update,
        (
          interpolation::interpolate_car.in_set(CarSet::Interpolate),
          lights::update_tail_lights,
        ),
      );
  }
}

fn hex(rgb: u32) -> Color {
  Color::srgb_u8((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

fn spawn_car(
  mut commands: Commands,
  settings: Res<RoadWorldSettings>,
  mut meshes: ResMut<Assets<Mesh>>,
  mut materials: ResMut<Assets<StandardMaterial>>,
) {
  let start = settings.start;
  let tail = lights::TailLightMaterials::new(&mut materials);

  let car = commands
    .spawn((
      Car,
      Name::new("Car"),
      CarPose::new(Pose::new(start, 0.0)),
      Transform::from_translation(start),
      Visibility::default(),
    ))
    .id();

  commands.spawn((
    Name::new("Body"),
    Mesh3d(meshes.add(Cuboid::new(2.0, 1.0, 4.0))),
    MeshMaterial3d(materials.add(StandardMaterial::from(hex(BODY_COLOR)))),
    Transform::from_xyz(0.0, 0.5, 0.0),
    ChildOf(car),
  ));
  commands.spawn((
    Name::new("Cabin"),
    Mesh3d(meshes.add(Cuboid::new(1.8, 0.8, 2.0))),
    MeshMaterial3d(materials.add(StandardMaterial::from(hex(CABIN_COLOR)))),
    Transform::from_xyz(0.0, 1.4, -0.5),
    ChildOf(car),
  ));

  lights::spawn_tail_lights(&mut commands, car, &tail, &mut meshes);
  commands.insert_resource(tail);

  for x in [-0.7, 0.7] {
    commands.spawn((
      Name::new("Headlight"),
      SpotLight {
        color: Color::WHITE,
        intensity: HEADLIGHT_LUMENS,
        range: HEADLIGHT_RANGE,
        outer_angle: FRAC_PI_2,
        inner_angle: FRAC_PI_4,
        shadows_enabled: false,
        ..default()
      },
      Transform::from_xyz(x, 0.5, 2.0).looking_at(Vec3::new(x, 0.5, 10.0), Vec3::Y),
      ChildOf(car),
    ));
  }

  debug!("Car spawned at {}", start);
}
