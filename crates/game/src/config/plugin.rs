use std::path::PathBuf;

#[cfg(not(target_family = "wasm"))]
use bevy::{asset::AssetEvent, ecs::message::MessageReader};
use bevy::{prelude::*, window::PrimaryWindow};
#[cfg(not(target_family = "wasm"))]
use bevy_common_assets::toml::TomlAssetPlugin;
use road_world::{DayNightClock, DrivingSession, PendingStreaming};

#[cfg(not(target_family = "wasm"))]
use super::{ConfigHandle, resolve_data_path};
use super::{CONFIG_ASSET_PATH, ConfigLoaded, DEFAULT_CONFIG_PATH, GameConfig};
use crate::core::camera::GameCamera;

/// Where the config comes from.
#[derive(Resource, Clone, Debug)]
struct ConfigSource {
  path: PathBuf,
  /// Asset path watched for hot reload, when the file lives under `assets/`.
  asset_path: Option<String>,
}

pub struct ConfigPlugin {
  pub path: PathBuf,
}

impl Default for ConfigPlugin {
  fn default() -> Self {
    Self {
      path: PathBuf::from(DEFAULT_CONFIG_PATH),
    }
  }
}

impl ConfigPlugin {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }
}

impl Plugin for ConfigPlugin {
  fn build(&self, app: &mut App) {
    let asset_path = (self.path == PathBuf::from(DEFAULT_CONFIG_PATH))
      .then(|| CONFIG_ASSET_PATH.to_string());

    // Native: asset-based config with hot-reload
    #[cfg(not(target_family = "wasm"))]
    if app.is_plugin_added::<AssetPlugin>() {
      app
        .add_plugins(TomlAssetPlugin::<GameConfig>::new(&["config.toml"]))
        .add_systems(Update, watch_config_changes);
    }

    app
      .insert_resource(ConfigSource {
        path: self.path.clone(),
        asset_path,
      })
      .add_systems(PreStartup, load_config_sync)
      .add_systems(
        Update,
        (
          update_window_on_config_change,
          update_vehicle_on_config_change,
          update_day_night_on_config_change,
          update_camera_on_config_change,
        ),
      );
  }
}

fn load_config_sync(
  mut commands: Commands,
  source: Res<ConfigSource>,
  #[cfg(not(target_family = "wasm"))] asset_server: Option<Res<AssetServer>>,
) {
  // Native: set up asset handle for hot-reload
  #[cfg(not(target_family = "wasm"))]
  if let (Some(asset_server), Some(asset_path)) = (asset_server, &source.asset_path) {
    let handle: Handle<GameConfig> = asset_server.load(asset_path.clone());
    commands.insert_resource(ConfigHandle(handle));
  }

  // WASM: embed config at compile time
  #[cfg(target_family = "wasm")]
  let config = GameConfig::from_toml_str(include_str!("../../assets/config/game.config.toml"))
    .unwrap_or_else(|e| {
      warn!("Using default config: {}", e);
      GameConfig::default()
    });
  #[cfg(not(target_family = "wasm"))]
  let config = GameConfig::load_or_default(&resolve_data_path(&source.path));

  commands.insert_resource(ConfigLoaded::from(config));
}

#[cfg(not(target_family = "wasm"))]
fn watch_config_changes(
  mut commands: Commands,
  config_handle: Option<Res<ConfigHandle>>,
  mut messages: MessageReader<AssetEvent<GameConfig>>,
  configs: Res<Assets<GameConfig>>,
) {
  let Some(config_handle) = config_handle else {
    return;
  };
  for event in messages.read() {
    if let AssetEvent::Modified { id } = event {
      if config_handle.0.id() == *id {
        if let Some(config) = configs.get(&config_handle.0) {
          info!("Config reloaded!");
          commands.insert_resource(ConfigLoaded::from(config.clone()));
        }
      }
    }
  }
}

fn update_window_on_config_change(
  config: Res<ConfigLoaded>,
  mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
  if config.is_changed() {
    if let Ok(mut window) = windows.single_mut() {
      window
        .resolution
        .set(config.window.width as f32, config.window.height as f32);
      window.title.clone_from(&config.window.title);
    }
  }
}

/// Applies vehicle tuning and render distance to the running session.
fn update_vehicle_on_config_change(
  config: Res<ConfigLoaded>,
  session: Option<ResMut<DrivingSession>>,
  mut pending: ResMut<PendingStreaming>,
) {
  if !config.is_changed() {
    return;
  }
  let Some(mut session) = session else {
    return;
  };
  if session.tuning != config.vehicle {
    debug!("Vehicle tuning updated");
    session.tuning = config.vehicle.clone();
  }
  let delta = session
    .world_mut()
    .set_render_distance(config.world.streaming.render_distance);
  if !delta.is_empty() {
    pending.0.push(delta);
  }
}

fn update_day_night_on_config_change(config: Res<ConfigLoaded>, mut clock: ResMut<DayNightClock>) {
  if config.is_changed() && clock.config != config.day_night {
    clock.config = config.day_night;
  }
}

fn update_camera_on_config_change(
  config: Res<ConfigLoaded>,
  mut camera_query: Query<&mut Projection, With<GameCamera>>,
) {
  if config.is_changed() {
    for mut projection in camera_query.iter_mut() {
      if let Projection::Perspective(ref mut perspective) = *projection {
        perspective.fov = config.camera.fov_deg.to_radians();
        perspective.near = config.camera.near;
        perspective.far = config.camera.far;
      }
    }
  }
}
