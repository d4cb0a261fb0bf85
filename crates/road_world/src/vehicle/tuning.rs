//! Tuning constants for the arcade motion model.
//!
//! All rates are per tick, not per second. The model is meant to run on a
//! fixed-rate schedule (60 Hz in the game), which keeps the reference feel
//! while making it independent of the display refresh rate.

use serde::{Deserialize, Deserializer};

/// Per-tick tuning of the vehicle motion model.
///
/// Angles are stored in radians; in TOML they are written in degrees.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct VehicleTuning {
  /// Top forward speed, in world units per tick. Reverse is capped at half.
  pub max_speed: f32,
  /// Forward acceleration at standstill; tapers to zero at `max_speed`.
  pub max_acceleration: f32,
  /// Deceleration applied when pushing against the current direction.
  pub brake_acceleration: f32,
  /// Speed multiplier applied on coasting ticks (exponential decay).
  pub friction: f32,
  /// Speed bled per tick at full steering lock.
  pub induced_friction_factor: f32,
  /// Speed below which the full steering range is available.
  pub max_full_turn_speed: f32,
  /// Distance between axles for the bicycle-model heading update.
  pub wheelbase: f32,
  #[serde(rename = "max_steering_deg", deserialize_with = "deserialize_degrees")]
  pub max_steering_angle: f32,
  #[serde(rename = "min_steering_deg", deserialize_with = "deserialize_degrees")]
  pub min_steering_angle: f32,
  /// Steering change per tick while left/right is held.
  #[serde(rename = "steering_speed_deg", deserialize_with = "deserialize_degrees")]
  pub steering_speed: f32,
  /// Auto-centering per tick at top speed; scales with the speed ratio.
  #[serde(rename = "auto_center_speed_deg", deserialize_with = "deserialize_degrees")]
  pub auto_center_speed: f32,
  /// Speed the vehicle creeps up to before the first control is pressed.
  pub attract_speed: f32,
  /// Speeds below this magnitude are snapped to zero.
  pub stop_threshold: f32,
  /// Minimum speed at which steering turns the vehicle.
  pub turn_threshold: f32,
  pub body: VehicleBody,
}

/// Collision body of the vehicle, in vehicle-local space.
///
/// The box is centered on the vehicle's origin in X/Z and rests on Y = 0.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct VehicleBody {
  pub width: f32,
  pub height: f32,
  pub length: f32,
}

impl Default for VehicleBody {
  fn default() -> Self {
    Self {
      width: 2.0,
      height: 1.8,
      length: 4.2,
    }
  }
}

impl Default for VehicleTuning {
  fn default() -> Self {
    let max_acceleration = 0.001;
    let max_steering_angle = 30f32.to_radians();
    Self {
      max_speed: 0.9,
      max_acceleration,
      brake_acceleration: max_acceleration * 2.0,
      friction: 0.999,
      induced_friction_factor: 0.005,
      max_full_turn_speed: 0.2,
      wheelbase: 2.4,
      max_steering_angle,
      min_steering_angle: 5f32.to_radians(),
      steering_speed: max_steering_angle / 180.0,
      auto_center_speed: max_steering_angle / 30.0,
      attract_speed: 0.25,
      stop_threshold: 0.001,
      turn_threshold: 0.01,
      body: VehicleBody::default(),
    }
  }
}

impl VehicleTuning {
  /// Lowest speed the vehicle may reach (reverse top speed).
  #[inline]
  pub fn min_speed(&self) -> f32 {
    -self.max_speed / 2.0
  }

  /// Returns `|speed| / max_speed`.
  #[inline]
  pub fn speed_ratio(&self, speed: f32) -> f32 {
    speed.abs() / self.max_speed
  }

  /// Steering cap at the given speed.
  ///
  /// Full range up to `max_full_turn_speed`, then narrowing linearly to
  /// `min_steering_angle` at `max_speed`.
  pub fn effective_max_steering(&self, speed: f32) -> f32 {
    let magnitude = speed.abs();
    let speed_t = if magnitude > self.max_full_turn_speed {
      ((magnitude - self.max_full_turn_speed) / (self.max_speed - self.max_full_turn_speed)).min(1.0)
    } else {
      0.0
    };
    self.max_steering_angle - (self.max_steering_angle - self.min_steering_angle) * speed_t
  }
}

fn deserialize_degrees<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
  D: Deserializer<'de>,
{
  let degrees: f32 = Deserialize::deserialize(deserializer)?;
  Ok(degrees.to_radians())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn steering_cap_narrows_with_speed() {
    let tuning = VehicleTuning::default();
    assert_eq!(tuning.effective_max_steering(0.0), tuning.max_steering_angle);
    assert_eq!(tuning.effective_max_steering(0.2), tuning.max_steering_angle);
    assert!((tuning.effective_max_steering(0.9) - tuning.min_steering_angle).abs() < 1e-6);

    let mid = tuning.effective_max_steering(0.55);
    assert!(mid < tuning.max_steering_angle && mid > tuning.min_steering_angle);
  }

  #[test]
  fn toml_angles_are_read_as_degrees() {
    let tuning: VehicleTuning = toml::from_str(
      r#"
        max_speed = 0.45
        max_steering_deg = 45.0
        [body]
        length = 5.0
      "#,
    )
    .unwrap();

    assert_eq!(tuning.max_speed, 0.45);
    assert!((tuning.max_steering_angle - 45f32.to_radians()).abs() < 1e-6);
    assert_eq!(tuning.min_steering_angle, 5f32.to_radians());
    assert_eq!(tuning.body.length, 5.0);
    assert_eq!(tuning.body.width, 2.0);
  }
}
