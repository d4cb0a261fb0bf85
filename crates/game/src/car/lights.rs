//! Brake and reverse lights.
//!
//! Each rear lamp is a small box whose material swaps between a dull and a
//! bright variant, plus a short-range point light behind the car that is
//! switched on with it.

use bevy::prelude::*;
use road_world::{TickTelemetry, VehicleSignals};

use super::hex;

const LAMP_SIZE: Vec3 = Vec3::new(0.3, 0.2, 0.1);
const LAMP_X: f32 = 0.7;
const LAMP_Z: f32 = -2.05;
const GLOW_Z: f32 = -3.0;
const GLOW_RANGE: f32 = 5.0;
const GLOW_LUMENS: f32 = 20_000.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TailLightKind {
  Brake,
  Reverse,
}

impl TailLightKind {
  fn height(self) -> f32 {
    match self {
      TailLightKind::Brake => 0.5,
      TailLightKind::Reverse => 0.7,
    }
  }

  fn dull(self) -> u32 {
    match self {
      TailLightKind::Brake => 0x880000,
      TailLightKind::Reverse => 0xcccccc,
    }
  }

  fn bright(self) -> u32 {
    match self {
      TailLightKind::Brake => 0xff0000,
      TailLightKind::Reverse => 0xffffff,
    }
  }
}

/// Lamp mesh of a tail light.
#[derive(Component)]
pub struct TailLight(pub TailLightKind);

/// Point light cast by a tail light.
#[derive(Component)]
pub struct TailLightGlow(pub TailLightKind);

/// Which tail lights are lit as `(brake, reverse)`.
///
/// Reversing forces the brake lights off.
pub fn tail_light_state(signals: &VehicleSignals) -> (bool, bool) {
  if signals.reversing {
    (false, true)
  } else {
    (signals.braking, false)
  }
}

#[derive(Resource)]
pub struct TailLightMaterials {
  brake_dull: Handle<StandardMaterial>,
  brake_bright: Handle<StandardMaterial>,
  reverse_dull: Handle<StandardMaterial>,
  reverse_bright: Handle<StandardMaterial>,
}

impl TailLightMaterials {
  pub fn new(materials: &mut Assets<StandardMaterial>) -> Self {
    let mut add = |rgb: u32, lit: bool| {
      let color = hex(rgb);
      materials.add(StandardMaterial {
        base_color: color,
        emissive: if lit { color.into() } else { LinearRgba::BLACK },
        ..default()
      })
    };
    Self {
      brake_dull: add(TailLightKind::Brake.dull(), false),
      brake_bright: add(TailLightKind::Brake.bright(), true),
      reverse_dull: add(TailLightKind::Reverse.dull(), false),
      reverse_bright: add(TailLightKind::Reverse.bright(), true),
    }
  }

  fn get(&self, kind: TailLightKind, lit: bool) -> Handle<StandardMaterial> {
    match (kind, lit) {
      (TailLightKind::Brake, false) => self.brake_dull.clone(),
      (TailLightKind::Brake, true) => self.brake_bright.clone(),
      (TailLightKind::Reverse, false) => self.reverse_dull.clone(),
      (TailLightKind::Reverse, true) => self.reverse_bright.clone(),
    }
  }
}

pub(super) fn spawn_tail_lights(
  commands: &mut Commands,
  car: Entity,
  materials: &TailLightMaterials,
  meshes: &mut Assets<Mesh>,
) {
  let lamp = meshes.add(Cuboid::from_size(LAMP_SIZE));

  for kind in [TailLightKind::Brake, TailLightKind::Reverse] {
    for x in [-LAMP_X, LAMP_X] {
      let y = kind.height();
      commands.spawn((
        TailLight(kind),
        Mesh3d(lamp.clone()),
        MeshMaterial3d(materials.get(kind, false)),
        Transform::from_xyz(x, y, LAMP_Z),
        ChildOf(car),
      ));
      commands.spawn((
        TailLightGlow(kind),
        PointLight {
          color: hex(kind.bright()),
          intensity: 0.0,
          range: GLOW_RANGE,
          ..default()
        },
        Transform::from_xyz(x, y, GLOW_Z),
        ChildOf(car),
      ));
    }
  }
}

/// System: Lights the lamps from the last tick's signals.
pub fn update_tail_lights(
  telemetry: Res<TickTelemetry>,
  materials: Option<Res<TailLightMaterials>>,
  mut lamps: Query<(&TailLight, &mut MeshMaterial3d<StandardMaterial>)>,
  mut glows: Query<(&TailLightGlow, &mut PointLight)>,
) {
  let Some(materials) = materials else {
    return;
  };
  let (brake, reverse) = tail_light_state(&telemetry.signals);
  let lit = |kind: TailLightKind| match kind {
    TailLightKind::Brake => brake,
    TailLightKind::Reverse => reverse,
  };

  for (lamp, mut material) in &mut lamps {
    let handle = materials.get(lamp.0, lit(lamp.0));
    if material.0 != handle {
      material.0 = handle;
    }
  }
  for (glow, mut light) in &mut glows {
    let intensity = if lit(glow.0) { GLOW_LUMENS } else { 0.0 };
    if light.intensity != intensity {
      light.intensity = intensity;
    }
  }
}
