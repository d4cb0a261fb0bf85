//! Bar-graph speedometer, speed readout and steering indicator.

use std::f32::consts::{FRAC_PI_2, PI};

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};
use road_world::TickTelemetry;

pub const BAR_COUNT: usize = 20;
/// Share of the bars drawn green; the rest are red.
const GREEN_SHARE: f32 = 0.7;
const BAR_WIDTH: f32 = 5.0;
const BAR_GAP: f32 = 2.0;
const WHEEL_SIZE: f32 = 80.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BarColor {
  Green,
  Red,
  Off,
}

impl BarColor {
  fn to_egui(self) -> egui::Color32 {
    match self {
      BarColor::Green => egui::Color32::from_rgb(0, 200, 0),
      BarColor::Red => egui::Color32::from_rgb(220, 0, 0),
      BarColor::Off => egui::Color32::from_gray(85),
    }
  }
}

/// Colour of every bar for a speed ratio in `[0, 1]`.
pub fn bar_colors(speed_ratio: f32) -> [BarColor; BAR_COUNT] {
  let active = (speed_ratio.clamp(0.0, 1.0) * BAR_COUNT as f32).round() as usize;
  let green = (BAR_COUNT as f32 * GREEN_SHARE).round() as usize;
  std::array::from_fn(|i| match i {
    i if i >= active => BarColor::Off,
    i if i < green => BarColor::Green,
    _ => BarColor::Red,
  })
}

/// Bars grow two pixels taller each step.
pub fn bar_height(index: usize) -> f32 {
  5.0 + 2.0 * index as f32
}

pub fn speed_label(speed_ratio: f32) -> String {
  format!("{} km/h", (speed_ratio * 100.0).round() as i32)
}

/// Indicator rotation in degrees, clockwise positive.
pub fn steering_indicator_degrees(steering_angle: f32) -> f32 {
  -steering_angle.to_degrees() * 5.0
}

pub(super) fn draw_instruments(mut contexts: EguiContexts, telemetry: Res<TickTelemetry>) {
  let Ok(ctx) = contexts.ctx_mut() else {
    return;
  };
  let signals = telemetry.signals;

  egui::Area::new(egui::Id::new("speedometer"))
    .anchor(egui::Align2::LEFT_BOTTOM, egui::vec2(20.0, -20.0))
    .interactable(false)
    .show(ctx, |ui| {
      let size = egui::vec2(
        BAR_COUNT as f32 * (BAR_WIDTH + BAR_GAP),
        bar_height(BAR_COUNT - 1),
      );
      let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
      let origin = response.rect.left_bottom();
      for (i, color) in bar_colors(signals.speed_ratio).into_iter().enumerate() {
        let x = origin.x + i as f32 * (BAR_WIDTH + BAR_GAP);
        let rect = egui::Rect::from_min_max(
          egui::pos2(x, origin.y - bar_height(i)),
          egui::pos2(x + BAR_WIDTH, origin.y),
        );
        painter.rect_filled(rect, 0.0, color.to_egui());
      }

      ui.label(
        egui::RichText::new(speed_label(signals.speed_ratio))
          .monospace()
          .size(24.0)
          .color(egui::Color32::WHITE),
      );
    });

  egui::Area::new(egui::Id::new("steering_indicator"))
    .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-20.0, -20.0))
    .interactable(false)
    .show(ctx, |ui| {
      let (response, painter) =
        ui.allocate_painter(egui::vec2(WHEEL_SIZE, WHEEL_SIZE), egui::Sense::hover());
      let center = response.rect.center();
      let radius = WHEEL_SIZE / 2.0 - 4.0;
      let rotation = steering_indicator_degrees(signals.steering_angle).to_radians();
      let rim = egui::Stroke::new(6.0, egui::Color32::from_gray(230));
      let spoke = egui::Stroke::new(4.0, egui::Color32::from_gray(230));

      painter.circle_stroke(center, radius, rim);
      for base in [0.0, FRAC_PI_2, PI] {
        let angle = base + rotation;
        let end = center + egui::vec2(angle.cos(), angle.sin()) * radius;
        painter.line_segment([center, end], spoke);
      }
      let top = -FRAC_PI_2 + rotation;
      painter.circle_filled(
        center + egui::vec2(top.cos(), top.sin()) * radius,
        4.0,
        egui::Color32::from_rgb(220, 0, 0),
      );
    });
}
