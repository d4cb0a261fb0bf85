//! Tracy profiler integration.

use bevy::log::BoxedLayer;
use bevy::prelude::App;

/// `LogPlugin::custom_layer` hook that forwards spans to Tracy.
pub fn tracy_layer(_app: &mut App) -> Option<BoxedLayer> {
  Some(Box::new(tracing_tracy::TracyLayer::default()))
}
