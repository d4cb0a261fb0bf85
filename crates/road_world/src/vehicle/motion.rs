//! Per-tick arcade integrator.
//!
//! Converts latched input into the next speed, steering angle and pose. The
//! integrator knows nothing about barriers; the session runs the collision
//! check on the tentative pose and calls [`rollback`] when it hits.

use bevy::math::Vec3;

use super::VehicleState;
use super::tuning::VehicleTuning;
use crate::input::InputState;

/// Advances `state` by one tick and returns the tentative next state.
#[cfg_attr(feature = "tracy", tracing::instrument(skip_all))]
pub fn advance(state: &VehicleState, input: &InputState, tuning: &VehicleTuning) -> VehicleState {
  let mut next = *state;

  // The first press of any control hands the car over to the player.
  if input.any() {
    next.attract_mode = false;
  }

  let speed_ratio = tuning.speed_ratio(state.speed);
  let creeping = next.attract_mode && next.speed < tuning.attract_speed;

  if input.forward || creeping {
    next.acceleration = if next.speed < 0.0 {
      tuning.brake_acceleration
    } else {
      tuning.max_acceleration * (1.0 - speed_ratio)
    };
    next.speed += next.acceleration;
  } else if input.backward {
    next.acceleration = if next.speed > 0.0 {
      -tuning.brake_acceleration
    } else {
      -tuning.max_acceleration * (1.0 - speed_ratio)
    };
    next.speed += next.acceleration;
  } else {
    next.speed *= tuning.friction;
    next.acceleration = 0.0;
  }

  next.effective_max_steering = tuning.effective_max_steering(next.speed);
  next.steering_angle = steer(next.steering_angle, next.speed, input, tuning);
  next.steering_angle = next
    .steering_angle
    .clamp(-next.effective_max_steering, next.effective_max_steering);

  // Exact comparison: skips the tick the car leaves standstill, where speed
  // equals the acceleration just added.
  if next.speed != 0.0 && next.speed != next.acceleration {
    let turn_ratio = next.steering_angle.abs() / tuning.max_steering_angle;
    next.induced_friction = turn_ratio * tuning.induced_friction_factor;
    next.speed *= 1.0 - next.induced_friction;
  } else {
    next.induced_friction = 0.0;
  }

  next.speed = next.speed.clamp(tuning.min_speed(), tuning.max_speed);
  if next.speed.abs() < tuning.stop_threshold {
    next.speed = 0.0;
  }

  // Heading 0 faces +Z.
  next.position += Vec3::new(next.heading.sin(), 0.0, next.heading.cos()) * next.speed;
  if next.speed.abs() > tuning.turn_threshold {
    next.heading += (next.speed / tuning.wheelbase) * next.steering_angle.tan();
  }

  next
}

/// Applies left/right input, or auto-centers when neither is held.
fn steer(angle: f32, speed: f32, input: &InputState, tuning: &VehicleTuning) -> f32 {
  if input.left {
    return angle + tuning.steering_speed;
  }
  if input.right {
    return angle - tuning.steering_speed;
  }
  if speed == 0.0 {
    return angle;
  }

  let step = tuning.auto_center_speed * tuning.speed_ratio(speed);
  if angle > 0.0 {
    (angle - step).max(0.0)
  } else if angle < 0.0 {
    (angle + step).min(0.0)
  } else {
    angle
  }
}

/// Reverts the pose of a tentative state and stops the vehicle.
///
/// Steering, acceleration and friction telemetry of the tentative tick are
/// kept so the HUD still reflects the player's input.
pub fn rollback(previous: &VehicleState, tentative: &VehicleState) -> VehicleState {
  VehicleState {
    position: previous.position,
    heading: previous.heading,
    speed: 0.0,
    ..*tentative
  }
}
