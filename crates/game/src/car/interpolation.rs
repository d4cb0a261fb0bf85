use bevy::prelude::*;
use road_world::DrivingSession;

use super::Car;

/// Position and heading of the car at one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
  pub translation: Vec3,
  pub heading: f32,
}

impl Pose {
  pub fn new(translation: Vec3, heading: f32) -> Self {
    Self {
      translation,
      heading,
    }
  }

  pub fn lerp(&self, other: &Pose, t: f32) -> Pose {
    Pose {
      translation: self.translation.lerp(other.translation, t),
      heading: self.heading + (other.heading - self.heading) * t,
    }
  }
}

/// Stores tick poses for fixed-timestep interpolation.
#[derive(Component, Debug, Clone, Copy)]
pub struct CarPose {
  pub previous: Pose,
  pub current: Pose,
}

impl CarPose {
  pub fn new(pose: Pose) -> Self {
    Self {
      previous: pose,
      current: pose,
    }
  }
}

/// Runs in FixedFirst: Shift poses for interpolation
pub fn shift_poses(mut cars: Query<&mut CarPose, With<Car>>) {
  for mut pose in &mut cars {
    pose.previous = pose.current;
  }
}

/// Runs after the vehicle tick: Store the committed pose
pub fn store_current_pose(
  session: Option<Res<DrivingSession>>,
  mut cars: Query<&mut CarPose, With<Car>>,
) {
  let Some(session) = session else {
    return;
  };
  let vehicle = &session.vehicle;
  for mut pose in &mut cars {
    pose.current = Pose::new(vehicle.position, vehicle.heading);
  }
}

/// Runs in Update: Moves the car between the last two tick poses
pub fn interpolate_car(
  mut cars: Query<(&CarPose, &mut Transform), With<Car>>,
  fixed_time: Res<Time<Fixed>>,
) {
  let t = fixed_time.overstep_fraction();

  for (pose, mut transform) in &mut cars {
    let visual = pose.previous.lerp(&pose.current, t);
    transform.translation = visual.translation;
    transform.rotation = Quat::from_rotation_y(visual.heading);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn lerp_blends_translation_and_heading() {
    let a = Pose::new(Vec3::new(0.0, 0.0, 10.0), 0.0);
    let b = Pose::new(Vec3::new(0.0, 0.0, 11.0), 0.2);
    let mid = a.lerp(&b, 0.5);
    assert!((mid.translation.z - 10.5).abs() < 1e-6);
    assert!((mid.heading - 0.1).abs() < 1e-6);
    assert_eq!(a.lerp(&b, 1.0), b);
  }
}
