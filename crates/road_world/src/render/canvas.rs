//! CPU pixel buffer uploaded as a texture.
//!
//! # Coordinate System
//!
//! Rows are stored top-first to match image upload order:
//! - **X+** is to the right
//! - **Y+** is downward
//! - **(0, 0)** is the top-left corner

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

use super::Rgba;

const _: () = assert!(std::mem::size_of::<Rgba>() == 4);

/// A 2D RGBA buffer painted on the CPU.
pub struct Canvas {
  data: Box<[Rgba]>,
  width: u32,
  height: u32,
}

impl Canvas {
  /// Creates a canvas filled with `value`.
  pub fn filled(width: u32, height: u32, value: Rgba) -> Self {
    let len = (width as usize) * (height as usize);
    Self {
      data: vec![value; len].into_boxed_slice(),
      width,
      height,
    }
  }

  #[inline]
  pub fn width(&self) -> u32 {
    self.width
  }

  #[inline]
  pub fn height(&self) -> u32 {
    self.height
  }

  #[inline]
  fn index_of(&self, x: i32, y: i32) -> Option<usize> {
    if x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height {
      Some((y as usize) * (self.width as usize) + (x as usize))
    } else {
      None
    }
  }

  /// Returns the pixel at (x, y), or `None` if out of bounds.
  #[inline]
  pub fn get(&self, x: i32, y: i32) -> Option<Rgba> {
    self.index_of(x, y).map(|i| self.data[i])
  }

  /// Sets the pixel at (x, y). Out-of-bounds writes are ignored.
  #[inline]
  pub fn set(&mut self, x: i32, y: i32, value: Rgba) {
    if let Some(i) = self.index_of(x, y) {
      self.data[i] = value;
    }
  }

  /// Blends `color` into the pixel at (x, y) with the given coverage.
  #[inline]
  pub fn blend(&mut self, x: i32, y: i32, color: Rgba, coverage: f32) {
    if let Some(i) = self.index_of(x, y) {
      self.data[i] = color.over(self.data[i], coverage);
    }
  }

  /// Fills an axis-aligned rectangle, clipped to the canvas.
  pub fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, value: Rgba) {
    for py in y..y + height as i32 {
      for px in x..x + width as i32 {
        self.set(px, py, value);
      }
    }
  }

  pub fn fill(&mut self, value: Rgba) {
    self.data.fill(value);
  }

  /// Raw bytes in upload order.
  pub fn to_bytes(&self) -> Vec<u8> {
    self
      .data
      .iter()
      .flat_map(|p| [p.r, p.g, p.b, p.a])
      .collect()
  }

  /// Converts the canvas into an sRGB image asset.
  pub fn into_image(self) -> Image {
    let size = Extent3d {
      width: self.width,
      height: self.height,
      depth_or_array_layers: 1,
    };
    Image::new(
      size,
      TextureDimension::D2,
      self.to_bytes(),
      TextureFormat::Rgba8UnormSrgb,
      RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn out_of_bounds_access_is_ignored() {
    let mut canvas = Canvas::filled(4, 2, Rgba::WHITE);
    canvas.set(-1, 0, Rgba::BLACK);
    canvas.set(4, 1, Rgba::BLACK);
    assert_eq!(canvas.get(4, 1), None);
    assert!(canvas.to_bytes().iter().all(|&b| b == 255));
  }

  #[test]
  fn rows_are_stored_top_first() {
    let mut canvas = Canvas::filled(2, 2, Rgba::WHITE);
    canvas.fill_rect(0, 0, 2, 1, Rgba::BLACK);
    let bytes = canvas.to_bytes();
    assert_eq!(&bytes[0..4], &[0, 0, 0, 255]);
    assert_eq!(&bytes[8..12], &[255, 255, 255, 255]);
  }

  #[test]
  fn image_has_canvas_dimensions() {
    let image = Canvas::filled(8, 4, Rgba::BLACK).into_image();
    assert_eq!(image.width(), 8);
    assert_eq!(image.height(), 4);
  }
}
