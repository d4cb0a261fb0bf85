//! Billboard face painting.
//!
//! A face is a 512x256 canvas: white background, black title near the top
//! and content centered below it, split on newlines. Content shrinks as it
//! gets longer.

use super::{Canvas, Rgba};
use crate::text::{CpuFont, TextAlign, TextStyle, draw_text};

pub const FACE_WIDTH: u32 = 512;
pub const FACE_HEIGHT: u32 = 256;

const TITLE_SIZE: f32 = 40.0;
const TITLE_BASELINE: i32 = 50;
const CONTENT_CENTER: f32 = 160.0;
const LINE_GAP: f32 = 10.0;

/// Content font size for a string of `chars` characters.
pub fn content_font_size(chars: usize) -> f32 {
  if chars > 25 {
    34.0
  } else if chars > 15 {
    42.0
  } else {
    50.0
  }
}

/// Baselines of each content line, top to bottom.
pub fn content_baselines(lines: usize, font_size: f32) -> Vec<i32> {
  let start = CONTENT_CENTER - lines.saturating_sub(1) as f32 * (font_size / 2.0 + 5.0);
  (0..lines)
    .map(|i| (start + i as f32 * (font_size + LINE_GAP)).round() as i32)
    .collect()
}

/// Paints a billboard face.
///
/// Without a font only the blank background is painted.
pub fn paint_face(font: Option<&CpuFont>, title: &str, content: &str) -> Canvas {
  let mut canvas = Canvas::filled(FACE_WIDTH, FACE_HEIGHT, Rgba::WHITE);
  let Some(font) = font else {
    return canvas;
  };
  let center_x = FACE_WIDTH as i32 / 2;

  let title_style = TextStyle {
    font_scale: TITLE_SIZE,
    color: Rgba::BLACK,
    align: TextAlign::Center,
    bold: true,
    ..Default::default()
  };
  draw_text(&mut canvas, font, title, center_x, TITLE_BASELINE, &title_style);

  let content_style = TextStyle {
    font_scale: content_font_size(content.chars().count()),
    bold: false,
    ..title_style
  };
  let lines: Vec<&str> = content.split('\n').collect();
  let baselines = content_baselines(lines.len(), content_style.font_scale);
  for (line, baseline) in lines.iter().zip(baselines) {
    draw_text(&mut canvas, font, line, center_x, baseline, &content_style);
  }

  canvas
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn font_size_steps_down_with_length() {
    assert_eq!(content_font_size(15), 50.0);
    assert_eq!(content_font_size(16), 42.0);
    assert_eq!(content_font_size(25), 42.0);
    assert_eq!(content_font_size(26), 34.0);
  }

  #[test]
  fn multiline_content_is_centered_on_the_block() {
    assert_eq!(content_baselines(1, 50.0), vec![160]);
    // 160 - (42/2 + 5) = 134, then one line step of 52.
    assert_eq!(content_baselines(2, 42.0), vec![134, 186]);
  }

  #[test]
  fn missing_font_leaves_a_blank_face() {
    let canvas = paint_face(None, "Title", "Body");
    assert_eq!(canvas.width(), FACE_WIDTH);
    assert_eq!(canvas.height(), FACE_HEIGHT);
    assert!(canvas.to_bytes().iter().all(|&b| b == 255));
  }
}
