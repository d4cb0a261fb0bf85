//! Looping day/night ambience and engine sound.
//!
//! The ambience tracks fade linearly towards their targets, so a full swap
//! from silence to `ambience_volume` takes `fade_seconds`. Missing sound
//! files only produce an asset error; the game stays silent.

use bevy::audio::{AudioSinkPlayback, Volume};
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use road_world::{DayNightClock, DayPhase, DayPhaseChanged, TickTelemetry};

use crate::config::ConfigLoaded;

#[derive(Component)]
struct DayAmbience;

#[derive(Component)]
struct NightAmbience;

#[derive(Component)]
struct EngineSound;

/// Current and target volumes of the two ambience loops.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct AmbienceMix {
  pub day: f32,
  pub night: f32,
  pub day_target: f32,
  pub night_target: f32,
}

impl AmbienceMix {
  /// Points the fade at `phase`, with the active loop at `volume`.
  pub fn retarget(&mut self, phase: DayPhase, volume: f32) {
    let (day, night) = match phase {
      DayPhase::Day => (volume, 0.0),
      DayPhase::Night => (0.0, volume),
    };
    self.day_target = day;
    self.night_target = night;
  }

  /// Moves both loops towards their targets by at most `max_step`.
  pub fn step(&mut self, max_step: f32) {
    self.day = step_toward(self.day, self.day_target, max_step);
    self.night = step_toward(self.night, self.night_target, max_step);
  }
}

/// Moves `current` towards `target` by at most `max_step`.
pub fn step_toward(current: f32, target: f32, max_step: f32) -> f32 {
  let delta = target - current;
  if delta.abs() <= max_step {
    target
  } else {
    current + max_step.copysign(delta)
  }
}

pub struct AmbientAudioPlugin;

impl Plugin for AmbientAudioPlugin {
  fn build(&self, app: &mut App) {
    app
      .init_resource::<AmbienceMix>()
      .add_systems(Startup, init_mix)
      .add_systems(Update, (retarget_on_phase_change, fade_ambience).chain());

    if app.is_plugin_added::<bevy::audio::AudioPlugin>() {
      app.add_systems(Startup, spawn_sounds).add_systems(
        Update,
        (apply_ambience_volume.after(fade_ambience), apply_engine_volume),
      );
    }
  }
}

fn init_mix(clock: Res<DayNightClock>, config: Res<ConfigLoaded>, mut mix: ResMut<AmbienceMix>) {
  mix.retarget(clock.phase(), config.audio.ambience_volume);
}

fn spawn_sounds(mut commands: Commands, asset_server: Res<AssetServer>, config: Res<ConfigLoaded>) {
  let silent = PlaybackSettings::LOOP.with_volume(Volume::Linear(0.0));
  commands.spawn((
    Name::new("Day Ambience"),
    DayAmbience,
    AudioPlayer::new(asset_server.load(config.audio.day_ambience.clone())),
    silent,
  ));
  commands.spawn((
    Name::new("Night Ambience"),
    NightAmbience,
    AudioPlayer::new(asset_server.load(config.audio.night_ambience.clone())),
    silent,
  ));
  commands.spawn((
    Name::new("Engine"),
    EngineSound,
    AudioPlayer::new(asset_server.load(config.audio.engine.clone())),
    silent,
  ));
}

fn retarget_on_phase_change(
  mut changes: MessageReader<DayPhaseChanged>,
  config: Res<ConfigLoaded>,
  mut mix: ResMut<AmbienceMix>,
) {
  if let Some(change) = changes.read().last() {
    debug!("Ambience fading to {:?}", change.phase);
    mix.retarget(change.phase, config.audio.ambience_volume);
  }
}

fn fade_ambience(time: Res<Time>, config: Res<ConfigLoaded>, mut mix: ResMut<AmbienceMix>) {
  let fade = config.audio.fade_seconds;
  let max_step = if fade > 0.0 {
    config.audio.ambience_volume * time.delta_secs() / fade
  } else {
    f32::INFINITY
  };
  let mut next = *mix;
  next.step(max_step);
  mix.set_if_neq(next);
}

fn apply_ambience_volume(
  mix: Res<AmbienceMix>,
  mut day: Query<&mut AudioSink, (With<DayAmbience>, Without<NightAmbience>)>,
  mut night: Query<&mut AudioSink, (With<NightAmbience>, Without<DayAmbience>)>,
) {
  if !mix.is_changed() {
    return;
  }
  for mut sink in &mut day {
    sink.set_volume(Volume::Linear(mix.day));
  }
  for mut sink in &mut night {
    sink.set_volume(Volume::Linear(mix.night));
  }
}

fn apply_engine_volume(
  telemetry: Res<TickTelemetry>,
  mut engine: Query<&mut AudioSink, With<EngineSound>>,
) {
  if !telemetry.is_changed() {
    return;
  }
  let level = telemetry.signals.engine_volume.level();
  for mut sink in &mut engine {
    sink.set_volume(Volume::Linear(level));
  }
}
