use bevy::prelude::*;
use road_world::{DayNightClock, DrivingSession};

use crate::config::ConfigLoaded;

/// Marker for the directional sun light.
#[derive(Component)]
pub struct Sun;

pub struct SunPlugin;

impl Plugin for SunPlugin {
  fn build(&self, app: &mut App) {
    app
      .add_systems(Startup, spawn_sun)
      .add_systems(Update, update_sun);
  }
}

fn spawn_sun(mut commands: Commands, config: Res<ConfigLoaded>) {
  commands.spawn((
    Sun,
    Name::new("Sun"),
    DirectionalLight {
      illuminance: config.sky.sun_illuminance,
      shadows_enabled: true,
      ..default()
    },
    Transform::from_xyz(-50.0, 50.0, -50.0).looking_at(Vec3::ZERO, Vec3::Y),
  ));
}

/// Moves the sun along its arc relative to the vehicle; dark at night.
fn update_sun(
  clock: Res<DayNightClock>,
  config: Res<ConfigLoaded>,
  session: Option<Res<DrivingSession>>,
  mut suns: Query<(&mut DirectionalLight, &mut Transform), With<Sun>>,
) {
  let Some(session) = session else {
    return;
  };
  let anchor = session.vehicle.position;
  let illuminance = config.sky.sun_illuminance * clock.sun_intensity();

  for (mut light, mut transform) in &mut suns {
    if light.illuminance != illuminance {
      light.illuminance = illuminance;
    }
    if let Some(offset) = clock.sun_offset() {
      *transform = Transform::from_translation(anchor + offset).looking_at(anchor, Vec3::Y);
    }
  }
}
