//! Keyboard bindings for the four driving controls.
//!
//! Held actions are compared against the session's latch once per fixed
//! tick; only transitions reach the session, as press/release events.

pub mod actions;
mod bindings;

pub use actions::{Accelerate, Brake, DriveInput, SteerLeft, SteerRight, ToggleDebugOverlay};
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;
pub use bindings::drive_input_actions;
use road_world::{Control, ControlEvent, DrivingSession, InputState, RoadWorldSet};

pub struct InputPlugin;

impl Plugin for InputPlugin {
  fn build(&self, app: &mut App) {
    app
      .add_plugins(EnhancedInputPlugin)
      .add_input_context::<DriveInput>()
      .add_systems(Startup, spawn_driver)
      .add_systems(FixedUpdate, latch_controls.in_set(RoadWorldSet::Input));
  }
}

/// Marker for the entity carrying the driver's input context.
#[derive(Component)]
pub struct Driver;

fn spawn_driver(mut commands: Commands) {
  commands.spawn((Name::new("Driver"), Driver, DriveInput, drive_input_actions()));
}

fn is_held(state: &ActionState) -> bool {
  matches!(state, ActionState::Fired | ActionState::Ongoing)
}

/// Current state of the four driving actions.
#[derive(SystemParam)]
pub struct DriveActions<'w, 's> {
  accelerate: Query<'w, 's, &'static ActionState, With<Action<Accelerate>>>,
  brake: Query<'w, 's, &'static ActionState, With<Action<Brake>>>,
  steer_left: Query<'w, 's, &'static ActionState, With<Action<SteerLeft>>>,
  steer_right: Query<'w, 's, &'static ActionState, With<Action<SteerRight>>>,
}

impl DriveActions<'_, '_> {
  pub fn held(&self, control: Control) -> bool {
    match control {
      Control::Forward => self.accelerate.iter().any(is_held),
      Control::Backward => self.brake.iter().any(is_held),
      Control::Left => self.steer_left.iter().any(is_held),
      Control::Right => self.steer_right.iter().any(is_held),
    }
  }
}

/// Press/release events that bring `latched` in line with `held`.
pub fn control_transitions(
  latched: &InputState,
  held: impl Fn(Control) -> bool,
) -> Vec<ControlEvent> {
  Control::ALL
    .into_iter()
    .filter_map(|control| match (latched.is_pressed(control), held(control)) {
      (false, true) => Some(ControlEvent::Pressed(control)),
      (true, false) => Some(ControlEvent::Released(control)),
      _ => None,
    })
    .collect()
}

/// System: Forwards key transitions to the session before the tick.
fn latch_controls(actions: DriveActions, session: Option<ResMut<DrivingSession>>) {
  let Some(mut session) = session else {
    return;
  };
  for event in control_transitions(&session.input, |control| actions.held(control)) {
    trace!("{:?}", event);
    session.apply(event);
  }
}
