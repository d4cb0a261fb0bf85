//! Debug parameter window, toggled with F3 or `--debug-overlay`.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};
use bevy_enhanced_input::prelude::*;
use road_world::{DayNightClock, DrivingSession, TickTelemetry, VehicleState};

use crate::input::ToggleDebugOverlay;

/// Whether the debug window is shown.
#[derive(Resource, Default)]
pub struct DebugOverlayVisible(pub bool);

/// Vehicle parameters in the order and precision the window shows them.
pub fn debug_lines(vehicle: &VehicleState) -> Vec<String> {
  vec![
    format!("Steering Angle: {:.2}°", vehicle.steering_angle.to_degrees()),
    format!(
      "Effective Max Angle: {:.2}°",
      vehicle.effective_max_steering.to_degrees()
    ),
    format!("Speed: {:.3}", vehicle.speed),
    format!("Acceleration: {:.3}", vehicle.acceleration),
    format!("Induced Friction: {:.4}", vehicle.induced_friction),
  ]
}

/// Flips visibility once per key press.
pub(super) fn toggle_debug_overlay(
  action_states: Query<&ActionState, With<Action<ToggleDebugOverlay>>>,
  mut visible: ResMut<DebugOverlayVisible>,
  mut toggled_this_press: Local<bool>,
) {
  for action_state in &action_states {
    match action_state {
      ActionState::Fired => {
        if !*toggled_this_press {
          *toggled_this_press = true;
          visible.0 = !visible.0;
        }
      }
      ActionState::None => *toggled_this_press = false,
      _ => {}
    }
  }
}

pub(super) fn draw_debug_overlay(
  mut contexts: EguiContexts,
  session: Option<Res<DrivingSession>>,
  telemetry: Res<TickTelemetry>,
  clock: Res<DayNightClock>,
) {
  let Some(session) = session else {
    return;
  };
  let Ok(ctx) = contexts.ctx_mut() else {
    return;
  };

  let world = session.world();
  let window = world.window();
  let stats = world.stats();

  egui::Window::new("Debug Params")
    .anchor(egui::Align2::RIGHT_TOP, [-10.0, 10.0])
    .default_width(220.0)
    .resizable(false)
    .movable(false)
    .frame(egui::Frame::NONE.fill(egui::Color32::from_rgba_unmultiplied(20, 20, 25, 200)))
    .show(ctx, |ui| {
      for line in debug_lines(&session.vehicle) {
        ui.label(egui::RichText::new(line).monospace());
      }

      ui.separator();
      let pos = session.vehicle.position;
      ui.label(
        egui::RichText::new(format!("Position: ({:.1}, {:.1})", pos.x, pos.z))
          .monospace()
          .size(10.0),
      );
      ui.label(
        egui::RichText::new(format!(
          "Tick {}  collisions {}",
          telemetry.tick, telemetry.collisions
        ))
        .monospace()
        .size(10.0),
      );
      ui.label(
        egui::RichText::new(format!(
          "Window {}..={} ({} active)",
          window.first().0,
          window.last().0,
          world.active_count()
        ))
        .monospace()
        .size(10.0),
      );
      ui.label(
        egui::RichText::new(format!(
          "Chunks +{} / -{}",
          stats.activations, stats.deactivations
        ))
        .monospace()
        .size(10.0),
      );
      ui.label(
        egui::RichText::new(format!(
          "{:?} {:.1}s / {:.0}s",
          clock.phase(),
          clock.elapsed(),
          clock.cycle_seconds()
        ))
        .monospace()
        .size(10.0),
      );
    });
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn lines_use_degrees_and_fixed_precision() {
    let vehicle = VehicleState {
      steering_angle: 15f32.to_radians(),
      speed: 0.45,
      acceleration: 0.0005,
      induced_friction: 0.0015,
      ..VehicleState::at(Vec3::ZERO)
    };
    let lines = debug_lines(&vehicle);
    assert_eq!(lines[0], "Steering Angle: 15.00°");
    assert_eq!(lines[1], "Effective Max Angle: 30.00°");
    assert_eq!(lines[2], "Speed: 0.450");
    assert_eq!(lines[3], "Acceleration: 0.001");
    assert_eq!(lines[4], "Induced Friction: 0.0015");
  }
}
