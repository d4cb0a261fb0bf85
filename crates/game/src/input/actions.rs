use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;

/// Input context of the driver.
#[derive(Component)]
pub struct DriveInput;

#[derive(Debug, InputAction)]
#[action_output(bool)]
pub struct Accelerate;

#[derive(Debug, InputAction)]
#[action_output(bool)]
pub struct Brake;

#[derive(Debug, InputAction)]
#[action_output(bool)]
pub struct SteerLeft;

#[derive(Debug, InputAction)]
#[action_output(bool)]
pub struct SteerRight;

#[derive(Debug, InputAction)]
#[action_output(bool)]
pub struct ToggleDebugOverlay;
