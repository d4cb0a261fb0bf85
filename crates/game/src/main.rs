use std::path::PathBuf;

use bevy::{
  prelude::*,
  window::{MonitorSelection, PresentMode, WindowMode, WindowResolution},
};
use clap::Parser;
use endless_drive::{ambiance, car, config, hud, input};
use road_world::{BillboardCatalog, RoadWorldPlugin};

/// Endless procedural road.
#[derive(Parser, Debug)]
#[command(name = "endless_drive", version)]
struct Args {
  /// World seed; overrides `world.seed` from the config
  #[arg(long)]
  seed: Option<u64>,
  /// Config file to load instead of the bundled one
  #[arg(long, default_value = config::DEFAULT_CONFIG_PATH)]
  config: PathBuf,
  /// Show the debug parameter window at startup
  #[arg(long)]
  debug_overlay: bool,
}

fn main() {
  let args = Args::parse();

  #[cfg(target_family = "wasm")]
  let game_config =
    config::GameConfig::from_toml_str(include_str!("../assets/config/game.config.toml"))
      .unwrap_or_default();
  #[cfg(not(target_family = "wasm"))]
  let game_config = config::GameConfig::load_or_default(&config::resolve_data_path(&args.config));

  let mut settings = game_config.road_world_settings();
  if let Some(seed) = args.seed {
    settings.seed = seed;
  }

  let catalog_path = config::resolve_data_path(&game_config.world.billboards);
  let catalog = match BillboardCatalog::load(&catalog_path) {
    Ok(catalog) => catalog,
    Err(e) => {
      warn!("Road has no billboards: {}", e);
      BillboardCatalog::default()
    }
  };

  let window = &game_config.window;
  let mut app = App::new();

  app.insert_resource(Time::<Fixed>::from_hz(60.0));

  let default_plugins = DefaultPlugins.set(WindowPlugin {
    primary_window: Some(Window {
      resolution: WindowResolution::new(window.width, window.height),
      title: window.title.clone(),
      // WASM: only Fifo (vsync) is supported on WebGL2
      #[cfg(target_family = "wasm")]
      present_mode: PresentMode::Fifo,
      #[cfg(not(target_family = "wasm"))]
      present_mode: PresentMode::AutoVsync,
      mode: if window.fullscreen {
        WindowMode::BorderlessFullscreen(MonitorSelection::Primary)
      } else {
        WindowMode::Windowed
      },
      #[cfg(target_family = "wasm")]
      canvas: Some("#bevy".to_string()),
      #[cfg(target_family = "wasm")]
      fit_canvas_to_parent: true,
      ..default()
    }),
    ..default()
  });
  #[cfg(feature = "tracy")]
  let default_plugins = default_plugins.set(bevy::log::LogPlugin {
    custom_layer: road_world::tracy_layer,
    ..default()
  });

  app
    .add_plugins(default_plugins)
    .insert_resource(catalog)
    .insert_resource(hud::DebugOverlayVisible(args.debug_overlay))
    .add_plugins(config::ConfigPlugin::new(args.config))
    .add_plugins(RoadWorldPlugin::new(settings))
    .add_plugins(endless_drive::core::CorePlugin)
    .add_plugins(input::InputPlugin)
    .add_plugins(car::CarPlugin)
    .add_plugins(ambiance::AmbiancePlugin)
    .add_plugins(hud::HudPlugin);

  app.run();
}
