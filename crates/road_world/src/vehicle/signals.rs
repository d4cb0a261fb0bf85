//! Signals derived from the committed vehicle state.

use super::VehicleState;
use super::tuning::VehicleTuning;
use crate::input::InputState;

/// Engine loop volume, bucketed by speed magnitude.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineVolume {
  Idle,
  Cruise,
  Fast,
}

impl EngineVolume {
  pub fn from_speed(speed: f32) -> Self {
    let magnitude = speed.abs();
    if magnitude > 0.2 {
      EngineVolume::Fast
    } else if magnitude > 0.05 {
      EngineVolume::Cruise
    } else {
      EngineVolume::Idle
    }
  }

  /// Linear playback volume for this band.
  pub fn level(self) -> f32 {
    match self {
      EngineVolume::Idle => 0.1,
      EngineVolume::Cruise => 0.2,
      EngineVolume::Fast => 0.5,
    }
  }
}

/// Per-tick outputs for lights, audio and the HUD.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VehicleSignals {
  /// Backward held while still rolling forward.
  pub braking: bool,
  /// Rolling backwards. Overrides the brake lights.
  pub reversing: bool,
  pub engine_volume: EngineVolume,
  /// `|speed| / max_speed`, for the speedometer.
  pub speed_ratio: f32,
  pub steering_angle: f32,
}

impl VehicleSignals {
  pub fn derive(state: &VehicleState, input: &InputState, tuning: &VehicleTuning) -> Self {
    let reversing = state.speed < 0.0;
    Self {
      braking: input.backward && state.speed > 0.0,
      reversing,
      engine_volume: EngineVolume::from_speed(state.speed),
      speed_ratio: tuning.speed_ratio(state.speed),
      steering_angle: state.steering_angle,
    }
  }
}

impl Default for VehicleSignals {
  fn default() -> Self {
    Self {
      braking: false,
      reversing: false,
      engine_volume: EngineVolume::Idle,
      speed_ratio: 0.0,
      steering_angle: 0.0,
    }
  }
}
