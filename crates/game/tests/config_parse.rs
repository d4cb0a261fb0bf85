//! The shipped config and billboard catalog parse and match the built-in
//! defaults where they restate them.

use std::path::PathBuf;

use endless_drive::config::GameConfig;
use road_world::{BillboardCatalog, DayNightConfig, GenerationConfig, VehicleTuning};

fn asset(path: &str) -> PathBuf {
  PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets").join(path)
}

fn shipped_config() -> GameConfig {
  GameConfig::load(&asset("config/game.config.toml")).expect("shipped config parses")
}

#[test]
fn shipped_world_section_restates_defaults() {
  let config = shipped_config();
  assert_eq!(config.world.seed, 42);
  assert!(config.world.attract_mode);
  assert_eq!(config.world.generation, GenerationConfig::default());
  assert_eq!(config.world.streaming.render_distance, 10);
  assert!(!config.world.font_paths.is_empty());
}

#[test]
fn shipped_vehicle_section_restates_defaults() {
  let tuning = shipped_config().vehicle;
  let defaults = VehicleTuning::default();
  assert_eq!(tuning.max_speed, defaults.max_speed);
  assert_eq!(tuning.max_acceleration, defaults.max_acceleration);
  assert_eq!(tuning.friction, defaults.friction);
  assert_eq!(tuning.attract_speed, defaults.attract_speed);
  for (shipped, default) in [
    (tuning.max_steering_angle, defaults.max_steering_angle),
    (tuning.min_steering_angle, defaults.min_steering_angle),
    (tuning.steering_speed, defaults.steering_speed),
    (tuning.auto_center_speed, defaults.auto_center_speed),
  ] {
    assert!((shipped - default).abs() < 1e-6, "{shipped} != {default}");
  }
}

#[test]
fn shipped_sky_and_clock() {
  let config = shipped_config();
  assert_eq!(config.day_night, DayNightConfig::default());
  assert_eq!(config.sky.keyframes.len(), 4);
  assert_eq!(config.sky.keyframes[2].color, [0.0, 0.0, 0.0]);
  assert_eq!((config.sky.fog_start, config.sky.fog_end), (100.0, 200.0));
  assert_eq!(config.camera.offset, [0.0, 4.0, -15.0]);
}

#[test]
fn shipped_catalog_keeps_order_and_line_breaks() {
  let catalog = BillboardCatalog::load(&asset("billboards.toml")).expect("catalog parses");
  assert_eq!(catalog.len(), 8);
  assert_eq!(catalog.entries()[0].title, "WELCOME");
  assert_eq!(catalog.entries()[3].content, "THE BARRIERS ARE\nNOT DECORATIVE");
}

#[test]
fn config_world_paths_point_at_shipped_files() {
  let config = shipped_config();
  let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
  assert!(manifest.join(&config.world.billboards).is_file());
}
