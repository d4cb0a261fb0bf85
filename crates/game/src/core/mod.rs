pub(crate) mod camera;

use bevy::prelude::*;
pub use camera::{GameCamera, chase_pose};

use crate::car::CarSet;

pub struct CorePlugin;

impl Plugin for CorePlugin {
  fn build(&self, app: &mut App) {
    app
      .add_systems(Startup, camera::setup_camera)
      .add_systems(Update, camera::camera_follow.after(CarSet::Interpolate));
  }
}
