//! Sky, sun and ambient sound, all driven by the day/night clock.

mod audio;
mod sky;
mod sun;

pub use audio::{AmbienceMix, step_toward};
use bevy::prelude::*;
pub use sky::interpolate_sky_color;
pub use sun::Sun;

pub struct AmbiancePlugin;

impl Plugin for AmbiancePlugin {
  fn build(&self, app: &mut App) {
    app.add_plugins((sky::SkyPlugin, sun::SunPlugin, audio::AmbientAudioPlugin));
  }
}
