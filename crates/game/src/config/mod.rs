//! Game configuration.
//!
//! Every value has an in-code default;
//! `assets/config/game.config.toml` overrides any subset of them.

mod plugin;

use std::path::{Path, PathBuf};
use std::{fmt, io};

use bevy::{asset::Asset, prelude::*, reflect::TypePath};
pub use plugin::ConfigPlugin;
use road_world::{
  DayNightConfig, GenerationConfig, RoadWorldSettings, StreamingConfig, VehicleTuning,
};
use serde::{Deserialize, Deserializer, de};

/// Config file read at startup; see [`resolve_data_path`].
pub const DEFAULT_CONFIG_PATH: &str = "assets/config/game.config.toml";
/// Same file as seen by the asset server, for hot reload.
pub const CONFIG_ASSET_PATH: &str = "config/game.config.toml";

#[derive(Asset, TypePath, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct GameConfig {
  pub window: WindowConfig,
  pub world: WorldConfig,
  pub vehicle: VehicleTuning,
  pub camera: CameraConfig,
  pub sky: SkyConfig,
  pub day_night: DayNightConfig,
  pub audio: AudioConfig,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WindowConfig {
  pub width: u32,
  pub height: u32,
  pub title: String,
  pub fullscreen: bool,
}

impl Default for WindowConfig {
  fn default() -> Self {
    Self {
      width: 1280,
      height: 720,
      title: "Endless Drive".to_string(),
      fullscreen: false,
    }
  }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WorldConfig {
  pub seed: u64,
  /// Billboard catalog, relative to the working directory.
  pub billboards: PathBuf,
  /// Fonts tried in order for billboard faces.
  pub font_paths: Vec<PathBuf>,
  /// Creep forward until the first key press.
  pub attract_mode: bool,
  pub generation: GenerationConfig,
  pub streaming: StreamingConfig,
}

impl Default for WorldConfig {
  fn default() -> Self {
    Self {
      seed: 42,
      billboards: PathBuf::from("assets/billboards.toml"),
      font_paths: vec![
        PathBuf::from("assets/fonts/billboard.ttf"),
        PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf"),
        PathBuf::from("/usr/share/fonts/TTF/DejaVuSans-Bold.ttf"),
        PathBuf::from("C:\\Windows\\Fonts\\arialbd.ttf"),
        PathBuf::from("/System/Library/Fonts/Supplemental/Arial Bold.ttf"),
      ],
      attract_mode: true,
      generation: GenerationConfig::default(),
      streaming: StreamingConfig::default(),
    }
  }
}

/// Chase camera placement.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct CameraConfig {
  /// Offset from the vehicle in vehicle space (+Z is ahead).
  pub offset: [f32; 3],
  /// Distance ahead of the vehicle the camera aims at.
  pub look_ahead: f32,
  /// Upward pitch of the view above the horizontal, in degrees.
  pub pitch_up_deg: f32,
  pub fov_deg: f32,
  pub near: f32,
  pub far: f32,
}

impl Default for CameraConfig {
  fn default() -> Self {
    Self {
      offset: [0.0, 4.0, -15.0],
      look_ahead: 5.0,
      pitch_up_deg: 15.0,
      fov_deg: 75.0,
      near: 0.1,
      far: 1000.0,
    }
  }
}

/// Sky, fog and scene lighting.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SkyConfig {
  pub fog_start: f32,
  pub fog_end: f32,
  /// Sky colour over one day/night cycle; `at` is the cycle fraction.
  pub keyframes: Vec<SkyKeyframe>,
  pub sun_illuminance: f32,
  pub ambient_brightness: f32,
}

impl Default for SkyConfig {
  fn default() -> Self {
    let day = [135.0 / 255.0, 206.0 / 255.0, 235.0 / 255.0];
    let night = [0.0, 0.0, 0.0];
    Self {
      fog_start: 100.0,
      fog_end: 200.0,
      keyframes: vec![
        SkyKeyframe { at: 0.0, color: day },
        SkyKeyframe { at: 0.48, color: day },
        SkyKeyframe { at: 0.5, color: night },
        SkyKeyframe { at: 0.98, color: night },
      ],
      sun_illuminance: 10_000.0,
      ambient_brightness: 80.0,
    }
  }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct SkyKeyframe {
  pub at: f32,
  #[serde(deserialize_with = "deserialize_hex_color")]
  pub color: [f32; 3],
}

/// Looping sounds, as asset paths.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct AudioConfig {
  pub day_ambience: String,
  pub night_ambience: String,
  pub engine: String,
  /// Volume the active ambience fades up to.
  pub ambience_volume: f32,
  pub fade_seconds: f32,
}

impl Default for AudioConfig {
  fn default() -> Self {
    Self {
      day_ambience: "audio/outside-day.ogg".to_string(),
      night_ambience: "audio/outside-night.ogg".to_string(),
      engine: "audio/driving.ogg".to_string(),
      ambience_volume: 0.5,
      fade_seconds: 2.0,
    }
  }
}

fn deserialize_hex_color<'de, D>(deserializer: D) -> Result<[f32; 3], D::Error>
where
  D: Deserializer<'de>,
{
  let s: String = Deserialize::deserialize(deserializer)?;
  let s = s.trim_start_matches('#');
  if s.len() != 6 || !s.is_ascii() {
    return Err(de::Error::custom("hex color must be 6 ASCII hex digits"));
  }
  let r = u8::from_str_radix(&s[0..2], 16).map_err(de::Error::custom)?;
  let g = u8::from_str_radix(&s[2..4], 16).map_err(de::Error::custom)?;
  let b = u8::from_str_radix(&s[4..6], 16).map_err(de::Error::custom)?;
  Ok([r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0])
}

/// Finds a data file given relative to the game crate.
///
/// Paths that exist from the working directory are used as they are.
/// Otherwise relative paths are taken from the asset server's base
/// directory (`BEVY_ASSET_ROOT`, `CARGO_MANIFEST_DIR` or the executable's
/// directory), so `cargo run -p endless_drive` works from the workspace root.
pub fn resolve_data_path(path: &Path) -> PathBuf {
  if path.is_absolute() || path.exists() {
    return path.to_path_buf();
  }
  #[cfg(not(target_family = "wasm"))]
  {
    let based = bevy::asset::io::file::FileAssetReader::get_base_path().join(path);
    if based.exists() {
      return based;
    }
  }
  path.to_path_buf()
}

impl GameConfig {
  pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
    Ok(toml::from_str(source)?)
  }

  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
      path: path.to_path_buf(),
      source,
    })?;
    Self::from_toml_str(&source)
  }

  /// Loads `path`, falling back to the built-in defaults on any error.
  pub fn load_or_default(path: &Path) -> Self {
    match Self::load(path) {
      Ok(config) => config,
      Err(e) => {
        warn!("Using default config: {}", e);
        Self::default()
      }
    }
  }

  /// Startup parameters for the road world plugin.
  pub fn road_world_settings(&self) -> RoadWorldSettings {
    RoadWorldSettings {
      seed: self.world.seed,
      generation: self.world.generation.clone(),
      streaming: self.world.streaming,
      tuning: self.vehicle.clone(),
      day_night: self.day_night,
      attract_mode: self.world.attract_mode,
      font_paths: self
        .world
        .font_paths
        .iter()
        .map(|path| resolve_data_path(path))
        .collect(),
      ..default()
    }
  }
}

/// Error loading the game config.
#[derive(Debug)]
pub enum ConfigError {
  Io { path: PathBuf, source: io::Error },
  Parse(toml::de::Error),
}

impl From<toml::de::Error> for ConfigError {
  fn from(err: toml::de::Error) -> Self {
    Self::Parse(err)
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Io { path, source } => write!(f, "cannot read {}: {}", path.display(), source),
      Self::Parse(e) => write!(f, "invalid config: {}", e),
    }
  }
}

impl std::error::Error for ConfigError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::Io { source, .. } => Some(source),
      Self::Parse(e) => Some(e),
    }
  }
}

#[derive(Resource)]
pub struct ConfigHandle(pub Handle<GameConfig>);

/// The config currently in effect. Replaced wholesale on hot reload.
#[derive(Resource, Debug, Clone)]
pub struct ConfigLoaded {
  pub window: WindowConfig,
  pub world: WorldConfig,
  pub vehicle: VehicleTuning,
  pub camera: CameraConfig,
  pub sky: SkyConfig,
  pub day_night: DayNightConfig,
  pub audio: AudioConfig,
}

impl From<GameConfig> for ConfigLoaded {
  fn from(config: GameConfig) -> Self {
    Self {
      window: config.window,
      world: config.world,
      vehicle: config.vehicle,
      camera: config.camera,
      sky: config.sky,
      day_night: config.day_night,
      audio: config.audio,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_file_is_all_defaults() {
    let config = GameConfig::from_toml_str("").unwrap();
    assert_eq!(config.window.title, "Endless Drive");
    assert_eq!(config.vehicle, VehicleTuning::default());
    assert_eq!(config.world.streaming.render_distance, 10);
    assert_eq!(config.sky.keyframes.len(), 4);
  }

  #[test]
  fn partial_sections_keep_other_defaults() {
    let config = GameConfig::from_toml_str(
      r#"
        [vehicle]
        max_speed = 1.2
        max_steering_deg = 45.0

        [camera]
        fov_deg = 60.0
      "#,
    )
    .unwrap();
    assert_eq!(config.vehicle.max_speed, 1.2);
    assert!((config.vehicle.max_steering_angle - 45f32.to_radians()).abs() < 1e-6);
    assert_eq!(config.vehicle.friction, VehicleTuning::default().friction);
    assert_eq!(config.camera.fov_deg, 60.0);
    assert_eq!(config.camera.offset, [0.0, 4.0, -15.0]);
  }

  #[test]
  fn hex_colors_parse_with_or_without_hash() {
    let config = GameConfig::from_toml_str(
      r##"
        [[sky.keyframes]]
        at = 0.0
        color = "#87CEEB"

        [[sky.keyframes]]
        at = 0.5
        color = "000000"
      "##,
    )
    .unwrap();
    let day = config.sky.keyframes[0].color;
    assert!((day[0] - 135.0 / 255.0).abs() < 1e-6);
    assert_eq!(config.sky.keyframes[1].color, [0.0, 0.0, 0.0]);
  }

  #[test]
  fn short_hex_color_is_rejected() {
    let err = GameConfig::from_toml_str(
      r##"
        [[sky.keyframes]]
        at = 0.0
        color = "#fff"
      "##,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
  }

  #[test]
  fn multibyte_hex_color_is_rejected() {
    // Six bytes, three characters.
    let err = GameConfig::from_toml_str(
      r##"
        [[sky.keyframes]]
        at = 0.0
        color = "é€a"
      "##,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
  }

  #[test]
  fn data_paths_resolve_from_the_asset_base() {
    let resolved = resolve_data_path(Path::new("assets/billboards.toml"));
    assert!(resolved.is_file(), "{}", resolved.display());

    let absent = Path::new("assets/no-such-file.toml");
    assert_eq!(resolve_data_path(absent), absent);

    let dir = tempfile::tempdir().unwrap();
    assert_eq!(resolve_data_path(dir.path()), dir.path());
  }

  #[test]
  fn missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.config.toml");
    assert!(matches!(GameConfig::load(&path), Err(ConfigError::Io { .. })));
    assert_eq!(GameConfig::load_or_default(&path).world.seed, 42);
  }

  #[test]
  fn settings_carry_world_and_vehicle_values() {
    let mut config = GameConfig::default();
    config.world.seed = 7;
    config.world.attract_mode = false;
    config.vehicle.max_speed = 0.5;
    let settings = config.road_world_settings();
    assert_eq!(settings.seed, 7);
    assert!(!settings.attract_mode);
    assert_eq!(settings.tuning.max_speed, 0.5);
    assert_eq!(settings.start, road_world::vehicle::SPAWN_POSITION);
  }
}
