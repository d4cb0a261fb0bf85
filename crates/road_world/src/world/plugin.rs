//! ECS plugin and systems for the road world.
//!
//! Owns the [`DrivingSession`] resource, ticks it on the fixed schedule and
//! keeps one entity hierarchy per active chunk in sync with the streaming
//! window.

use std::path::PathBuf;

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use super::{RoadWorld, StreamingConfig, StreamingDelta};
use crate::coords::ChunkIndex;
use crate::day_night::{DayNightClock, DayNightConfig, DayPhase};
use crate::generation::{BillboardCatalog, ChunkGenerator, GenerationConfig};
use crate::render::{ChunkAssets, ChunkRenderer, ChunkStars};
use crate::session::DrivingSession;
use crate::text::CpuFont;
use crate::vehicle::{SPAWN_POSITION, VehicleSignals, VehicleState, VehicleTuning};

/// Ordering of road world work within a frame.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum RoadWorldSet {
  /// Latches player input into the session (`FixedUpdate`).
  Input,
  /// Runs the vehicle tick (`FixedUpdate`).
  Simulate,
  /// Applies streaming deltas to chunk entities (`Update`).
  Stream,
}

/// Startup parameters of the road world.
#[derive(Resource, Clone, Debug)]
pub struct RoadWorldSettings {
  pub seed: u64,
  pub generation: GenerationConfig,
  pub streaming: StreamingConfig,
  pub tuning: VehicleTuning,
  pub day_night: DayNightConfig,
  /// Where the vehicle starts.
  pub start: Vec3,
  /// Creep forward until the first control is pressed.
  pub attract_mode: bool,
  /// Fonts tried in order for billboard faces.
  pub font_paths: Vec<PathBuf>,
}

impl Default for RoadWorldSettings {
  fn default() -> Self {
    Self {
      seed: 42,
      generation: GenerationConfig::default(),
      streaming: StreamingConfig::default(),
      tuning: VehicleTuning::default(),
      day_night: DayNightConfig::default(),
      start: SPAWN_POSITION,
      attract_mode: true,
      font_paths: Vec::new(),
    }
  }
}

/// Root entity of one active chunk.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkRoot {
  pub index: ChunkIndex,
}

/// Streaming deltas not yet applied to entities, oldest first.
#[derive(Resource, Default, Debug)]
pub struct PendingStreaming(pub Vec<StreamingDelta>);

/// Outcome of the most recent tick.
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct TickTelemetry {
  pub tick: u64,
  pub collided: bool,
  /// Ticks that ended in a rollback since startup.
  pub collisions: u64,
  pub signals: VehicleSignals,
}

/// Sent when the day/night clock crosses into a new phase.
#[derive(bevy::prelude::Message, Clone, Copy, Debug)]
pub struct DayPhaseChanged {
  pub phase: DayPhase,
}

/// Marker resource inserted when rendering is available.
#[derive(Resource)]
pub(crate) struct RenderingEnabled;

/// Plugin that streams road chunks around the vehicle.
///
/// Insert a [`BillboardCatalog`] resource before `Startup` to give chunks
/// billboard content; without one the road has no billboards.
#[derive(Default)]
pub struct RoadWorldPlugin {
  pub settings: RoadWorldSettings,
}

impl RoadWorldPlugin {
  pub fn new(settings: RoadWorldSettings) -> Self {
    Self { settings }
  }
}

impl Plugin for RoadWorldPlugin {
  fn build(&self, app: &mut App) {
    if app.is_plugin_added::<bevy::render::RenderPlugin>() {
      app.insert_resource(RenderingEnabled);
    }

    // Chunk assets and the generator both size meshes from this config.
    let mut settings = self.settings.clone();
    settings.generation = settings.generation.or_default();

    app
      .insert_resource(settings.clone())
      .insert_resource(DayNightClock::new(settings.day_night))
      .init_resource::<PendingStreaming>()
      .init_resource::<TickTelemetry>()
      .add_message::<DayPhaseChanged>()
      .configure_sets(
        FixedUpdate,
        (RoadWorldSet::Input, RoadWorldSet::Simulate).chain(),
      )
      .add_systems(
        Startup,
        (
          setup_chunk_assets.run_if(resource_exists::<RenderingEnabled>),
          setup_session,
        )
          .chain(),
      )
      .add_systems(FixedUpdate, tick_session.in_set(RoadWorldSet::Simulate))
      .add_systems(
        Update,
        (
          apply_streaming.in_set(RoadWorldSet::Stream),
          advance_day_night,
          update_star_visibility.after(advance_day_night),
        ),
      );
  }
}

/// Builds shared chunk meshes and materials and loads the billboard font.
fn setup_chunk_assets(
  mut commands: Commands,
  settings: Res<RoadWorldSettings>,
  mut meshes: ResMut<Assets<Mesh>>,
  mut materials: ResMut<Assets<StandardMaterial>>,
  mut images: ResMut<Assets<Image>>,
) {
  let font = match CpuFont::load_first(settings.font_paths.iter().map(PathBuf::as_path)) {
    Ok(font) => Some(font),
    Err(e) => {
      warn!("Billboard font unavailable, faces stay blank: {}", e);
      None
    }
  };
  commands.insert_resource(ChunkAssets::new(
    &settings.generation,
    font,
    &mut meshes,
    &mut materials,
    &mut images,
  ));
}

/// Creates the driving session and queues the initial window.
fn setup_session(
  mut commands: Commands,
  settings: Res<RoadWorldSettings>,
  catalog: Option<Res<BillboardCatalog>>,
  mut pending: ResMut<PendingStreaming>,
) {
  let catalog = catalog.map(|c| c.clone()).unwrap_or_default();
  info!(
    "Starting road world with seed {} and {} billboard entries",
    settings.seed,
    catalog.len()
  );
  let world = RoadWorld::new(
    ChunkGenerator::new(settings.generation.clone(), settings.seed),
    catalog,
    settings.streaming,
  );
  let vehicle = if settings.attract_mode {
    VehicleState::attract(settings.start)
  } else {
    VehicleState::at(settings.start)
  };
  let (session, delta) = DrivingSession::new(vehicle, settings.tuning.clone(), world);
  pending.0.push(delta);
  commands.insert_resource(session);
}

/// System: Runs one vehicle tick.
#[cfg_attr(feature = "tracy", tracing::instrument(skip_all))]
fn tick_session(
  session: Option<ResMut<DrivingSession>>,
  mut pending: ResMut<PendingStreaming>,
  mut telemetry: ResMut<TickTelemetry>,
) {
  let Some(mut session) = session else {
    return;
  };
  let report = session.tick();
  if report.collided {
    telemetry.collisions += 1;
  }
  telemetry.tick = report.tick;
  telemetry.collided = report.collided;
  telemetry.signals = report.signals;
  if !report.delta.is_empty() {
    pending.0.push(report.delta);
  }
}

/// System: Spawns and despawns chunk entities for queued deltas.
///
/// An index that enters and leaves the window between two runs is never
/// spawned; one that already has a live entity is not spawned twice.
#[cfg_attr(feature = "tracy", tracing::instrument(skip_all))]
fn apply_streaming(
  mut commands: Commands,
  session: Option<ResMut<DrivingSession>>,
  mut pending: ResMut<PendingStreaming>,
  mut renderer: ChunkRenderer,
) {
  let Some(mut session) = session else {
    return;
  };
  if pending.0.is_empty() {
    return;
  }

  for delta in pending.0.drain(..) {
    for (index, entity) in delta.to_despawn {
      if let Some(entity) = entity {
        debug!("Despawning {}", index);
        commands.entity(entity).despawn();
      }
    }

    for index in delta.to_spawn {
      let world = session.world();
      let Some(slot) = world.slot(index) else {
        continue;
      };
      if slot.entity.is_some() {
        continue;
      }

      let root = commands
        .spawn((
          ChunkRoot { index },
          Name::new(format!("Chunk {}", index.0)),
          Transform::from_xyz(0.0, 0.0, index.offset(world.chunk_size())),
          Visibility::default(),
        ))
        .id();
      renderer.populate(&mut commands, root, world.generator().config(), slot);

      if !session.world_mut().register_chunk_entity(index, root) {
        commands.entity(root).despawn();
      }
    }
  }
}

/// System: Advances the day/night clock by measured frame time.
fn advance_day_night(
  time: Res<Time>,
  mut clock: ResMut<DayNightClock>,
  mut changed: MessageWriter<DayPhaseChanged>,
) {
  if let Some(phase) = clock.advance(time.delta_secs()) {
    debug!("Day/night phase is now {:?}", phase);
    changed.write(DayPhaseChanged { phase });
  }
}

/// System: Shows star clusters only at night.
fn update_star_visibility(
  clock: Res<DayNightClock>,
  mut stars: Query<&mut Visibility, With<ChunkStars>>,
) {
  let target = if clock.is_night() {
    Visibility::Inherited
  } else {
    Visibility::Hidden
  };
  for mut visibility in &mut stars {
    visibility.set_if_neq(target);
  }
}
