use bevy::pbr::{DistanceFog, FogFalloff};
use bevy::prelude::*;
use road_world::DayNightClock;

use crate::config::{ConfigLoaded, SkyKeyframe};
use crate::core::GameCamera;

pub struct SkyPlugin;

impl Plugin for SkyPlugin {
  fn build(&self, app: &mut App) {
    app.add_systems(Update, update_sky_color);
  }
}

/// Tints the clear colour and the camera fog from the cycle position.
fn update_sky_color(
  clock: Res<DayNightClock>,
  config: Res<ConfigLoaded>,
  clear_color: Option<ResMut<ClearColor>>,
  mut fog_query: Query<&mut DistanceFog, With<GameCamera>>,
) {
  if !clock.is_changed() && !config.is_changed() {
    return;
  }

  let [r, g, b] = interpolate_sky_color(clock.cycle_fraction(), &config.sky.keyframes);
  let color = Color::srgb(r, g, b);

  if let Some(mut clear_color) = clear_color {
    clear_color.0 = color;
  }
  for mut fog in &mut fog_query {
    fog.color = color;
    if config.is_changed() {
      fog.falloff = FogFalloff::Linear {
        start: config.sky.fog_start,
        end: config.sky.fog_end,
      };
    }
  }
}

/// Sky colour at cycle fraction `at`.
///
/// Keyframes are sorted by `at` in `[0, 1)`; the cycle wraps from the last
/// keyframe back to the first.
pub fn interpolate_sky_color(at: f32, keyframes: &[SkyKeyframe]) -> [f32; 3] {
  let (first, last) = match keyframes {
    [] => return [0.0, 0.0, 0.0],
    [only] => return only.color,
    [first, .., last] => (first, last),
  };

  let at = at.rem_euclid(1.0);
  let (prev, next) = match keyframes.iter().position(|k| k.at > at) {
    Some(0) | None => (last, first),
    Some(i) => (&keyframes[i - 1], &keyframes[i]),
  };

  let mut span = next.at - prev.at;
  if span <= 0.0 {
    span += 1.0;
  }
  let mut offset = at - prev.at;
  if offset < 0.0 {
    offset += 1.0;
  }
  let t = (offset / span).clamp(0.0, 1.0);

  [
    prev.color[0] + t * (next.color[0] - prev.color[0]),
    prev.color[1] + t * (next.color[1] - prev.color[1]),
    prev.color[2] + t * (next.color[2] - prev.color[2]),
  ]
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::SkyConfig;

  fn close(a: [f32; 3], b: [f32; 3]) -> bool {
    a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-4)
  }

  #[test]
  fn holds_day_and_night_between_transitions() {
    let keys = SkyConfig::default().keyframes;
    let day = keys[0].color;
    assert!(close(interpolate_sky_color(0.2, &keys), day));
    assert!(close(interpolate_sky_color(0.7, &keys), [0.0, 0.0, 0.0]));
  }

  #[test]
  fn blends_across_dusk_and_wraps_at_dawn() {
    let keys = SkyConfig::default().keyframes;
    let day = keys[0].color;
    let half = [day[0] / 2.0, day[1] / 2.0, day[2] / 2.0];
    assert!(close(interpolate_sky_color(0.49, &keys), half));
    assert!(close(interpolate_sky_color(0.99, &keys), half));
    assert!(close(interpolate_sky_color(1.0, &keys), day));
  }

  #[test]
  fn degenerate_keyframe_lists() {
    assert_eq!(interpolate_sky_color(0.3, &[]), [0.0, 0.0, 0.0]);
    let one = [SkyKeyframe {
      at: 0.5,
      color: [0.1, 0.2, 0.3],
    }];
    assert_eq!(interpolate_sky_color(0.9, &one), [0.1, 0.2, 0.3]);
  }
}
