//! Rolling-hills heightfield.
//!
//! Height is a pure function of absolute world-space `(x, z)`, so the edges of
//! neighbouring terrain chunks line up without stitching.

use bevy::math::Vec3;
use serde::Deserialize;

/// Parameters of the terrain height function.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct Heightfield {
  /// Peak-to-trough amplitude before centering.
  pub max_height: f32,
  /// Angular frequency across the road.
  pub x_frequency: f32,
  /// Angular frequency along the road.
  pub z_frequency: f32,
}

impl Default for Heightfield {
  fn default() -> Self {
    Self {
      max_height: 5.0,
      x_frequency: 0.1,
      z_frequency: 0.05,
    }
  }
}

impl Heightfield {
  /// Height at world-space `(x, z)`, centered on zero.
  #[inline]
  pub fn sample(&self, x: f32, z: f32) -> f32 {
    let wave = (x * self.x_frequency).sin() * 0.5 + (z * self.z_frequency).cos() * 0.5;
    wave * self.max_height - self.max_height / 2.0
  }

  /// Surface normal at world-space `(x, z)`.
  pub fn normal(&self, x: f32, z: f32) -> Vec3 {
    let dx = (x * self.x_frequency).cos() * 0.5 * self.x_frequency * self.max_height;
    let dz = -(z * self.z_frequency).sin() * 0.5 * self.z_frequency * self.max_height;
    Vec3::new(-dx, 1.0, -dz).normalize()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn sample_stays_within_amplitude() {
    let field = Heightfield::default();
    for i in -200..200 {
      let x = i as f32 * 1.37;
      let z = i as f32 * -2.11;
      let h = field.sample(x, z);
      let half = field.max_height / 2.0;
      assert!(h >= -3.0 * half - 1e-4 && h <= half + 1e-4, "h = {h}");
    }
  }

  #[test]
  fn origin_height_matches_closed_form() {
    let field = Heightfield::default();
    // sin(0) * 0.5 + cos(0) * 0.5 = 0.5, then 0.5 * 5 - 2.5
    assert!(field.sample(0.0, 0.0).abs() < 1e-6);
    let z = std::f32::consts::PI / field.z_frequency;
    assert!((field.sample(0.0, z) + field.max_height).abs() < 1e-4);
  }

  #[test]
  fn normal_matches_finite_difference() {
    let field = Heightfield::default();
    let (x, z) = (3.3, -17.0);
    let eps = 1e-3;
    let dx = (field.sample(x + eps, z) - field.sample(x - eps, z)) / (2.0 * eps);
    let dz = (field.sample(x, z + eps) - field.sample(x, z - eps)) / (2.0 * eps);
    let expected = Vec3::new(-dx, 1.0, -dz).normalize();
    assert!(field.normal(x, z).distance(expected) < 1e-2);
  }
}
