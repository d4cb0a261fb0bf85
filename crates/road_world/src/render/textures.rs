//! Procedural surface textures.
//!
//! Painted once at startup and shared by every chunk.

use bevy::image::{ImageAddressMode, ImageSampler, ImageSamplerDescriptor};
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{Canvas, Rgba};

const ASPHALT: Rgba = Rgba::hex(0x3a3a3c);
const LANE_MARK: Rgba = Rgba::hex(0xf2f2f2);
const EDGE_MARK: Rgba = Rgba::hex(0xe8c547);
const GRASS: Rgba = Rgba::hex(0x4f7a33);

/// Wraps `canvas` in an image that tiles in both directions.
pub fn create_tiling_texture(canvas: Canvas) -> Image {
  let mut image = canvas.into_image();
  image.sampler = ImageSampler::Descriptor(ImageSamplerDescriptor {
    address_mode_u: ImageAddressMode::Repeat,
    address_mode_v: ImageAddressMode::Repeat,
    ..ImageSamplerDescriptor::linear()
  });
  image
}

/// Asphalt with a dashed center line and solid edge lines.
///
/// One tile spans the road width and a tenth of a chunk.
pub fn paint_road(seed: u64) -> Canvas {
  const SIZE: u32 = 128;
  let mut rng = StdRng::seed_from_u64(seed);
  let mut canvas = Canvas::filled(SIZE, SIZE, ASPHALT);
  speckle(&mut canvas, &mut rng, 18);

  canvas.fill_rect(4, 0, 3, SIZE, EDGE_MARK);
  canvas.fill_rect(SIZE as i32 - 7, 0, 3, SIZE, EDGE_MARK);
  canvas.fill_rect(SIZE as i32 / 2 - 2, 0, 4, SIZE / 2, LANE_MARK);
  canvas
}

/// Concrete barrier with a red and white band.
pub fn paint_barrier() -> Canvas {
  const SIZE: u32 = 64;
  let mut canvas = Canvas::filled(SIZE, SIZE, Rgba::hex(0xb8b8b0));
  for stripe in 0..4 {
    let color = if stripe % 2 == 0 {
      Rgba::hex(0xc0392b)
    } else {
      Rgba::WHITE
    };
    canvas.fill_rect(stripe * 16, 8, 16, 12, color);
  }
  canvas
}

/// Mottled grass.
pub fn paint_grass(seed: u64) -> Canvas {
  const SIZE: u32 = 64;
  let mut rng = StdRng::seed_from_u64(seed);
  let mut canvas = Canvas::filled(SIZE, SIZE, GRASS);
  speckle(&mut canvas, &mut rng, 30);
  canvas
}

/// Round foliage blob on a transparent background.
pub fn paint_foliage(seed: u64) -> Canvas {
  const SIZE: u32 = 64;
  let mut rng = StdRng::seed_from_u64(seed);
  let mut canvas = Canvas::filled(SIZE, SIZE, Rgba::TRANSPARENT);
  let center = SIZE as f32 / 2.0;
  for y in 0..SIZE as i32 {
    for x in 0..SIZE as i32 {
      let dx = x as f32 + 0.5 - center;
      let dy = y as f32 + 0.5 - center;
      let jitter = rng.random_range(-3.0..3.0);
      if (dx * dx + dy * dy).sqrt() + jitter < center - 2.0 {
        let shade = rng.random_range(70..130);
        canvas.set(x, y, Rgba::rgb(shade / 3, shade, shade / 4));
      }
    }
  }
  canvas
}

/// Darkens or lightens random pixels by up to `amount`.
fn speckle(canvas: &mut Canvas, rng: &mut StdRng, amount: i16) {
  for y in 0..canvas.height() as i32 {
    for x in 0..canvas.width() as i32 {
      let Some(pixel) = canvas.get(x, y) else {
        continue;
      };
      let delta = rng.random_range(-amount..=amount);
      let shift = |c: u8| (c as i16 + delta).clamp(0, 255) as u8;
      canvas.set(x, y, Rgba::new(shift(pixel.r), shift(pixel.g), shift(pixel.b), pixel.a));
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn painting_is_deterministic_per_seed() {
    assert_eq!(paint_grass(4).to_bytes(), paint_grass(4).to_bytes());
    assert_ne!(paint_grass(4).to_bytes(), paint_grass(5).to_bytes());
  }

  #[test]
  fn foliage_has_a_transparent_border() {
    let canvas = paint_foliage(1);
    assert_eq!(canvas.get(0, 0).map(|p| p.a), Some(0));
    assert_eq!(canvas.get(32, 32).map(|p| p.a), Some(255));
  }

  #[test]
  fn road_has_lane_marks() {
    let canvas = paint_road(2);
    assert_eq!(canvas.get(64, 10), Some(LANE_MARK));
    assert_eq!(canvas.get(5, 100), Some(EDGE_MARK));
  }
}
