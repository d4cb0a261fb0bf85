//! RGBA pixel type for CPU-painted textures.

use bevy::color::Color;

/// RGBA pixel with 8 bits per channel, sRGB encoded.
#[repr(C)]
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct Rgba {
  pub r: u8,
  pub g: u8,
  pub b: u8,
  pub a: u8,
}

impl Rgba {
  #[inline]
  pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
    Self { r, g, b, a }
  }

  /// Creates an opaque RGB pixel (alpha = 255).
  #[inline]
  pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
    Self { r, g, b, a: 255 }
  }

  /// Creates an opaque pixel from a `0xRRGGBB` literal.
  pub const fn hex(value: u32) -> Self {
    Self::rgb(
      ((value >> 16) & 0xff) as u8,
      ((value >> 8) & 0xff) as u8,
      (value & 0xff) as u8,
    )
  }

  pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

  pub const BLACK: Self = Self::rgb(0, 0, 0);

  pub const WHITE: Self = Self::rgb(255, 255, 255);

  /// Blends `self` over `dst` with `coverage` in `[0, 1]`.
  ///
  /// The destination alpha is kept.
  pub fn over(self, dst: Rgba, coverage: f32) -> Rgba {
    let t = (coverage * self.a as f32 / 255.0).clamp(0.0, 1.0);
    let mix = |src: u8, dst: u8| (dst as f32 + (src as f32 - dst as f32) * t).round() as u8;
    Rgba::new(
      mix(self.r, dst.r),
      mix(self.g, dst.g),
      mix(self.b, dst.b),
      dst.a,
    )
  }
}

impl From<Rgba> for Color {
  fn from(c: Rgba) -> Self {
    Color::srgba_u8(c.r, c.g, c.b, c.a)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn hex_splits_channels() {
    assert_eq!(Rgba::hex(0x87ceeb), Rgba::rgb(0x87, 0xce, 0xeb));
  }

  #[test]
  fn full_coverage_replaces_color_and_keeps_alpha() {
    let dst = Rgba::new(255, 255, 255, 200);
    assert_eq!(Rgba::BLACK.over(dst, 1.0), Rgba::new(0, 0, 0, 200));
    assert_eq!(Rgba::BLACK.over(dst, 0.0), dst);
    assert_eq!(Rgba::BLACK.over(Rgba::WHITE, 0.5).r, 128);
  }
}
