//! Vehicle state and the arcade motion model.

mod motion;
mod signals;
mod tuning;


use bevy::math::Vec3;
pub use motion::{advance, rollback};
pub use signals::{EngineVolume, VehicleSignals};
pub use tuning::{VehicleBody, VehicleTuning};

/// Where the vehicle starts: the left-hand lane of chunk 0, facing +Z.
pub const SPAWN_POSITION: Vec3 = Vec3::new(2.5, 0.0, 0.0);

/// Complete kinematic state of the vehicle.
///
/// Mutated only by the motion model; `acceleration`, `induced_friction` and
/// `effective_max_steering` are recomputed every tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VehicleState {
  pub position: Vec3,
  /// Yaw in radians; 0 faces +Z, positive turns towards +X.
  pub heading: f32,
  /// Signed speed along the heading, forward positive.
  pub speed: f32,
  pub steering_angle: f32,
  pub acceleration: f32,
  pub induced_friction: f32,
  pub effective_max_steering: f32,
  /// True until the player presses any control.
  pub attract_mode: bool,
}

impl VehicleState {
  /// A stationary vehicle at `position`, facing +Z.
  pub fn at(position: Vec3) -> Self {
    Self {
      position,
      heading: 0.0,
      speed: 0.0,
      steering_angle: 0.0,
      acceleration: 0.0,
      induced_friction: 0.0,
      effective_max_steering: VehicleTuning::default().max_steering_angle,
      attract_mode: false,
    }
  }

  /// Same as [`VehicleState::at`] but creeping forward until the first input.
  pub fn attract(position: Vec3) -> Self {
    Self {
      attract_mode: true,
      ..Self::at(position)
    }
  }

  /// Unit vector the vehicle is facing, in the XZ plane.
  pub fn forward(&self) -> Vec3 {
    Vec3::new(self.heading.sin(), 0.0, self.heading.cos())
  }
}

impl Default for VehicleState {
  fn default() -> Self {
    Self::attract(SPAWN_POSITION)
  }
}
