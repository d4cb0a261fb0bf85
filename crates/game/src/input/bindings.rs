use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;

use super::actions::{Accelerate, Brake, DriveInput, SteerLeft, SteerRight, ToggleDebugOverlay};

pub fn drive_input_actions() -> impl Bundle {
  actions!(DriveInput[
      (
          Action::<Accelerate>::new(),
          bindings![KeyCode::KeyW, KeyCode::ArrowUp],
      ),
      (
          Action::<Brake>::new(),
          bindings![KeyCode::KeyS, KeyCode::ArrowDown],
      ),
      (
          Action::<SteerLeft>::new(),
          bindings![KeyCode::KeyA, KeyCode::ArrowLeft],
      ),
      (
          Action::<SteerRight>::new(),
          bindings![KeyCode::KeyD, KeyCode::ArrowRight],
      ),
      (
          Action::<ToggleDebugOverlay>::new(),
          bindings![KeyCode::F3],
      ),
  ])
}
