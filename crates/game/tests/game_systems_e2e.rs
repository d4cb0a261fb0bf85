//! E2E tests for the game-side systems running on a headless app.
//!
//! Uses the shipped config through `ConfigPlugin`, steps the fixed schedule
//! by hand, and checks what the car, tail lights, sun and ambience mirror.
//!
//! Run: cargo test -p endless_drive --test game_systems_e2e

use std::path::PathBuf;
use std::time::Duration;

use bevy::app::FixedMain;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use endless_drive::ambiance::{AmbiancePlugin, AmbienceMix, Sun};
use endless_drive::car::{Car, CarPlugin, CarPose, TailLightGlow, TailLightKind};
use endless_drive::config::{ConfigLoaded, ConfigPlugin, GameConfig};
use road_world::{
  ChunkRoot, Control, ControlEvent, DayNightClock, DayPhase, DayPhaseChanged, DrivingSession,
  RoadWorldPlugin, TickTelemetry,
};

struct GameHarness {
  app: App,
}

impl GameHarness {
  fn new() -> Self {
    let config_path =
      PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/config/game.config.toml");
    let config = GameConfig::load(&config_path).expect("shipped config parses");
    let mut settings = config.road_world_settings();
    settings.attract_mode = false;

    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::ZERO));
    app.init_resource::<Assets<Mesh>>();
    app.init_resource::<Assets<StandardMaterial>>();
    app.add_plugins(ConfigPlugin::new(config_path));
    app.add_plugins(RoadWorldPlugin::new(settings));
    app.add_plugins(CarPlugin);
    app.add_plugins(AmbiancePlugin);
    app.update();
    Self { app }
  }

  fn session(&mut self) -> Mut<'_, DrivingSession> {
    self.app.world_mut().resource_mut::<DrivingSession>()
  }

  fn tick(&mut self, ticks: usize) {
    for _ in 0..ticks {
      self.app.world_mut().run_schedule(FixedMain);
    }
  }

  fn car_pose(&mut self) -> CarPose {
    let world = self.app.world_mut();
    let mut cars = world.query_filtered::<&CarPose, With<Car>>();
    *cars.single(world).expect("one car")
  }

  fn glow(&mut self, kind: TailLightKind) -> Vec<f32> {
    let world = self.app.world_mut();
    let mut glows = world.query::<(&TailLightGlow, &PointLight)>();
    glows
      .iter(world)
      .filter(|(glow, _)| glow.0 == kind)
      .map(|(_, light)| light.intensity)
      .collect()
  }

  fn chunk_roots(&mut self) -> usize {
    let world = self.app.world_mut();
    let mut roots = world.query::<&ChunkRoot>();
    roots.iter(world).count()
  }
}

#[test]
fn car_pose_follows_the_committed_vehicle() {
  let mut harness = GameHarness::new();
  harness.session().apply(ControlEvent::Pressed(Control::Forward));
  harness.tick(30);

  let position = harness.session().vehicle.position;
  let pose = harness.car_pose();
  assert_eq!(pose.current.translation, position);
  assert!(pose.previous.translation.z < pose.current.translation.z);

  // Zero overstep shows the previous tick's pose.
  harness.app.update();
  let world = harness.app.world_mut();
  let mut cars = world.query_filtered::<&Transform, With<Car>>();
  let transform = cars.single(world).expect("one car");
  assert!((transform.translation - pose.previous.translation).length() < 1e-5);
}

#[test]
fn brake_lights_follow_the_last_tick() {
  let mut harness = GameHarness::new();
  harness.session().vehicle.speed = 0.5;
  harness.session().apply(ControlEvent::Pressed(Control::Backward));
  harness.tick(1);
  harness.app.update();

  assert!(harness.app.world().resource::<TickTelemetry>().signals.braking);
  assert!(harness.glow(TailLightKind::Brake).iter().all(|i| *i > 0.0));
  assert!(harness.glow(TailLightKind::Reverse).iter().all(|i| *i == 0.0));

  harness.session().apply(ControlEvent::Released(Control::Backward));
  harness.tick(1);
  harness.app.update();
  assert!(harness.glow(TailLightKind::Brake).iter().all(|i| *i == 0.0));
}

#[test]
fn reversing_lights_only_the_reverse_lamps() {
  let mut harness = GameHarness::new();
  harness.session().vehicle.speed = -0.2;
  harness.tick(1);
  harness.app.update();

  assert_eq!(harness.glow(TailLightKind::Reverse).len(), 2);
  assert!(harness.glow(TailLightKind::Reverse).iter().all(|i| *i > 0.0));
  assert!(harness.glow(TailLightKind::Brake).iter().all(|i| *i == 0.0));
}

#[test]
fn config_change_retunes_the_session_and_window() {
  let mut harness = GameHarness::new();
  assert_eq!(harness.chunk_roots(), 21);

  {
    let mut config = harness.app.world_mut().resource_mut::<ConfigLoaded>();
    config.vehicle.max_speed = 0.5;
    config.world.streaming.render_distance = 3;
  }
  harness.app.update();
  harness.app.update();

  assert_eq!(harness.session().tuning.max_speed, 0.5);
  assert_eq!(harness.session().world().active_count(), 7);
  assert_eq!(harness.chunk_roots(), 7);
}

#[test]
fn sun_rides_the_arc_above_the_vehicle() {
  let mut harness = GameHarness::new();
  harness
    .app
    .world_mut()
    .resource_mut::<DayNightClock>()
    .set_elapsed(3.0);
  harness.app.update();

  let anchor = harness.session().vehicle.position;
  let offset = harness
    .app
    .world()
    .resource::<DayNightClock>()
    .sun_offset()
    .expect("daytime");
  let world = harness.app.world_mut();
  let mut suns = world.query_filtered::<(&Transform, &DirectionalLight), With<Sun>>();
  let (transform, light) = suns.single(world).expect("one sun");
  assert!((transform.translation - (anchor + offset)).length() < 1e-3);
  assert!(light.illuminance > 0.0);
}

#[test]
fn night_dims_the_sun_and_crossfades_the_ambience() {
  let mut harness = GameHarness::new();
  harness
    .app
    .world_mut()
    .resource_mut::<DayNightClock>()
    .set_elapsed(20.0);
  harness
    .app
    .world_mut()
    .write_message(DayPhaseChanged {
      phase: DayPhase::Night,
    });
  harness.app.update();

  {
    let world = harness.app.world_mut();
    let mut suns = world.query_filtered::<&DirectionalLight, With<Sun>>();
    assert_eq!(suns.single(world).expect("one sun").illuminance, 0.0);
  }
  let mix = *harness.app.world().resource::<AmbienceMix>();
  assert_eq!((mix.day_target, mix.night_target), (0.0, 0.5));

  // Two seconds of fade; virtual time caps each frame at a quarter second.
  harness
    .app
    .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(250)));
  for _ in 0..10 {
    harness.app.update();
  }
  let mix = *harness.app.world().resource::<AmbienceMix>();
  assert_eq!((mix.day, mix.night), (0.0, 0.5));
}
