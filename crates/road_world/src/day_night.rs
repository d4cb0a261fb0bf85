//! Day/night clock.
//!
//! Unlike the vehicle model this runs on measured elapsed time. The cycle is
//! a lit phase, during which the sun arcs over the road, followed by a dark
//! phase of equal or different length.

use std::f32::consts::PI;

use bevy::prelude::*;
use serde::Deserialize;

/// Durations and sun geometry of the cycle.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct DayNightConfig {
  /// Seconds the sun is up.
  pub day_seconds: f32,
  /// Seconds of darkness.
  pub night_seconds: f32,
  /// Horizontal radius of the sun's arc across the road.
  pub sun_arc_radius: f32,
  /// Peak height of the sun.
  pub sun_arc_height: f32,
  /// How far the sun trails behind the vehicle on the travel axis.
  pub sun_trail: f32,
}

impl Default for DayNightConfig {
  fn default() -> Self {
    Self {
      day_seconds: 15.0,
      night_seconds: 15.0,
      sun_arc_radius: 100.0,
      sun_arc_height: 50.0,
      sun_trail: 50.0,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPhase {
  Day,
  Night,
}

/// Elapsed-time clock driving sun, sky and ambience.
#[derive(Resource, Debug, Clone)]
pub struct DayNightClock {
  pub config: DayNightConfig,
  elapsed: f32,
  pub paused: bool,
}

impl DayNightClock {
  pub fn new(config: DayNightConfig) -> Self {
    Self {
      config,
      elapsed: 0.0,
      paused: false,
    }
  }

  pub fn cycle_seconds(&self) -> f32 {
    (self.config.day_seconds + self.config.night_seconds).max(f32::EPSILON)
  }

  /// Seconds into the current cycle.
  pub fn elapsed(&self) -> f32 {
    self.elapsed
  }

  /// Position in the cycle as a fraction in `[0, 1)`.
  pub fn cycle_fraction(&self) -> f32 {
    self.elapsed / self.cycle_seconds()
  }

  pub fn phase(&self) -> DayPhase {
    if self.elapsed < self.config.day_seconds {
      DayPhase::Day
    } else {
      DayPhase::Night
    }
  }

  pub fn is_night(&self) -> bool {
    self.phase() == DayPhase::Night
  }

  /// Advances the clock. Returns the new phase when it changed.
  pub fn advance(&mut self, seconds: f32) -> Option<DayPhase> {
    if self.paused || seconds <= 0.0 {
      return None;
    }
    let before = self.phase();
    self.elapsed = (self.elapsed + seconds).rem_euclid(self.cycle_seconds());
    let after = self.phase();
    (before != after).then_some(after)
  }

  /// Jumps to `seconds` into the cycle.
  pub fn set_elapsed(&mut self, seconds: f32) {
    self.elapsed = seconds.rem_euclid(self.cycle_seconds());
  }

  /// Progress of the sun across the sky in `[0, 1)`, or `None` at night.
  pub fn sun_progress(&self) -> Option<f32> {
    match self.phase() {
      DayPhase::Day if self.config.day_seconds > 0.0 => {
        Some(self.elapsed / self.config.day_seconds)
      }
      _ => None,
    }
  }

  /// Sun position relative to the vehicle, or `None` at night.
  pub fn sun_offset(&self) -> Option<Vec3> {
    self.sun_progress().map(|progress| {
      let angle = progress * PI;
      Vec3::new(
        self.config.sun_arc_radius * angle.cos(),
        self.config.sun_arc_height * angle.sin(),
        -self.config.sun_trail,
      )
    })
  }

  /// Sun light intensity factor: 1 by day, 0 at night.
  pub fn sun_intensity(&self) -> f32 {
    if self.is_night() { 0.0 } else { 1.0 }
  }
}

impl Default for DayNightClock {
  fn default() -> Self {
    Self::new(DayNightConfig::default())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn phases_alternate_every_fifteen_seconds() {
    let mut clock = DayNightClock::default();
    assert_eq!(clock.phase(), DayPhase::Day);
    assert_eq!(clock.advance(14.0), None);
    assert_eq!(clock.advance(2.0), Some(DayPhase::Night));
    assert_eq!(clock.sun_offset(), None);
    assert_eq!(clock.sun_intensity(), 0.0);
    assert_eq!(clock.advance(14.5), Some(DayPhase::Day));
    assert!((clock.elapsed() - 0.5).abs() < 1e-4);
  }

  #[test]
  fn sun_arcs_from_east_through_zenith() {
    let mut clock = DayNightClock::default();
    let start = clock.sun_offset().unwrap();
    assert!((start.x - 100.0).abs() < 1e-4);
    assert!(start.y.abs() < 1e-4);
    assert_eq!(start.z, -50.0);

    clock.set_elapsed(7.5);
    let noon = clock.sun_offset().unwrap();
    assert!(noon.x.abs() < 1e-3);
    assert!((noon.y - 50.0).abs() < 1e-3);
  }

  #[test]
  fn paused_clock_does_not_move() {
    let mut clock = DayNightClock::default();
    clock.paused = true;
    assert_eq!(clock.advance(20.0), None);
    assert_eq!(clock.elapsed(), 0.0);
  }
}
