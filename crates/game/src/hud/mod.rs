//! On-screen instruments and the debug parameter window.

mod debug_overlay;
mod speedometer;

use bevy::prelude::*;
use bevy_egui::{EguiPlugin, EguiPrimaryContextPass};
pub use debug_overlay::{DebugOverlayVisible, debug_lines};
pub use speedometer::{
  BAR_COUNT, BarColor, bar_colors, bar_height, speed_label, steering_indicator_degrees,
};

pub struct HudPlugin;

impl Plugin for HudPlugin {
  fn build(&self, app: &mut App) {
    if !app.is_plugin_added::<EguiPlugin>() {
      app.add_plugins(EguiPlugin::default());
    }
    app
      .init_resource::<DebugOverlayVisible>()
      .add_systems(Update, debug_overlay::toggle_debug_overlay)
      .add_systems(
        EguiPrimaryContextPass,
        (
          speedometer::draw_instruments,
          debug_overlay::draw_debug_overlay
            .run_if(|visible: Option<Res<DebugOverlayVisible>>| visible.is_some_and(|v| v.0)),
        ),
      );
  }
}
