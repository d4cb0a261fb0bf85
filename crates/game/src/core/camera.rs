use bevy::pbr::{DistanceFog, FogFalloff};
use bevy::prelude::*;

use crate::car::Car;
use crate::config::{CameraConfig, ConfigLoaded};

/// Marker component for the game camera
#[derive(Component)]
pub struct GameCamera;

/// Eye position and look-at target of the chase camera.
///
/// The eye sits at the configured offset rotated by the vehicle's heading.
/// The target is `look_ahead` units in front of the vehicle, raised so the
/// view pitches up by `pitch_up_deg` from the eye.
pub fn chase_pose(car_position: Vec3, heading: f32, config: &CameraConfig) -> (Vec3, Vec3) {
  let rotation = Quat::from_rotation_y(heading);
  let eye = car_position + rotation * Vec3::from_array(config.offset);
  let mut target = car_position + rotation * Vec3::Z * config.look_ahead;
  let horizontal = Vec2::new(target.x - eye.x, target.z - eye.z).length();
  target.y = eye.y + horizontal * config.pitch_up_deg.to_radians().tan();
  (eye, target)
}

pub fn setup_camera(mut commands: Commands, config: Res<ConfigLoaded>) {
  let sky = config
    .sky
    .keyframes
    .first()
    .map(|k| Color::srgb(k.color[0], k.color[1], k.color[2]))
    .unwrap_or(Color::BLACK);
  let (eye, target) = chase_pose(road_world::vehicle::SPAWN_POSITION, 0.0, &config.camera);

  commands.spawn((
    GameCamera,
    Name::new("Chase Camera"),
    Camera3d::default(),
    Projection::Perspective(PerspectiveProjection {
      fov: config.camera.fov_deg.to_radians(),
      near: config.camera.near,
      far: config.camera.far,
      ..default()
    }),
    DistanceFog {
      color: sky,
      falloff: FogFalloff::Linear {
        start: config.sky.fog_start,
        end: config.sky.fog_end,
      },
      ..default()
    },
    Transform::from_translation(eye).looking_at(target, Vec3::Y),
  ));

  commands.insert_resource(ClearColor(sky));
  commands.insert_resource(AmbientLight {
    color: Color::WHITE,
    brightness: config.sky.ambient_brightness,
    ..default()
  });
}

/// Places the camera behind the interpolated vehicle every frame.
pub fn camera_follow(
  config: Res<ConfigLoaded>,
  car_query: Query<&Transform, (With<Car>, Without<GameCamera>)>,
  mut camera_query: Query<&mut Transform, With<GameCamera>>,
) {
  let Ok(car) = car_query.single() else {
    return;
  };
  let Ok(mut camera_transform) = camera_query.single_mut() else {
    return;
  };

  let (heading, _, _) = car.rotation.to_euler(EulerRot::YXZ);
  let (eye, target) = chase_pose(car.translation, heading, &config.camera);
  *camera_transform = Transform::from_translation(eye).looking_at(target, Vec3::Y);
}

#[cfg(test)]
mod tests {
  use std::f32::consts::FRAC_PI_2;

  use super::*;

  #[test]
  fn camera_sits_behind_and_above() {
    let config = CameraConfig::default();
    let (eye, target) = chase_pose(Vec3::new(2.5, 0.0, 100.0), 0.0, &config);
    assert_eq!(eye, Vec3::new(2.5, 4.0, 85.0));
    assert!((target.z - 105.0).abs() < 1e-4);
    let expected_y = 4.0 + 20.0 * 15f32.to_radians().tan();
    assert!((target.y - expected_y).abs() < 1e-4);
  }

  #[test]
  fn offset_turns_with_the_vehicle() {
    let config = CameraConfig::default();
    let (eye, target) = chase_pose(Vec3::ZERO, FRAC_PI_2, &config);
    // Facing +X, so "behind" is -X.
    assert!((eye.x + 15.0).abs() < 1e-4);
    assert!(eye.z.abs() < 1e-4);
    assert!((target.x - 5.0).abs() < 1e-4);
  }
}
