//! Font rendering for canvases.
//!
//! Uses `ab_glyph` for font rasterization. Fonts are loaded from disk at
//! startup; text is rendered as a coverage mask and blended onto a
//! [`Canvas`].

use std::path::{Path, PathBuf};
use std::{fmt, io};

use ab_glyph::{Font, FontVec, Glyph, InvalidFont, PxScale, ScaleFont};

use crate::render::{Canvas, Rgba};

/// A CPU-side font for text rasterization.
pub struct CpuFont {
  font: FontVec,
}

impl CpuFont {
  /// Creates a font from raw TTF/OTF bytes.
  pub fn from_bytes(data: Vec<u8>) -> Result<Self, FontError> {
    Ok(Self {
      font: FontVec::try_from_vec(data)?,
    })
  }

  /// Reads a font file.
  pub fn load(path: &Path) -> Result<Self, FontError> {
    let data = std::fs::read(path).map_err(|source| FontError::Io {
      path: path.to_path_buf(),
      source,
    })?;
    Self::from_bytes(data)
  }

  /// Loads the first candidate that parses.
  ///
  /// Returns the last error when none does.
  pub fn load_first<'a>(candidates: impl IntoIterator<Item = &'a Path>) -> Result<Self, FontError> {
    let mut last = FontError::NoCandidates;
    for path in candidates {
      match Self::load(path) {
        Ok(font) => return Ok(font),
        Err(e) => last = e,
      }
    }
    Err(last)
  }
}

/// Error loading a font.
#[derive(Debug)]
pub enum FontError {
  Io { path: PathBuf, source: io::Error },
  Invalid(InvalidFont),
  NoCandidates,
}

impl From<InvalidFont> for FontError {
  fn from(err: InvalidFont) -> Self {
    Self::Invalid(err)
  }
}

impl fmt::Display for FontError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Io { path, source } => write!(f, "cannot read font {}: {}", path.display(), source),
      Self::Invalid(e) => write!(f, "invalid font data: {}", e),
      Self::NoCandidates => write!(f, "no font paths configured"),
    }
  }
}

impl std::error::Error for FontError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::Io { source, .. } => Some(source),
      Self::Invalid(e) => Some(e),
      Self::NoCandidates => None,
    }
  }
}

/// A coverage mask from rasterized text.
///
/// `left` and `top` place the mask relative to the pen origin on the
/// baseline; `top` is negative for glyphs that rise above the baseline.
pub struct TextMask {
  data: Vec<f32>,
  width: u32,
  height: u32,
  left: i32,
  top: i32,
  advance: f32,
}

impl TextMask {
  pub fn width(&self) -> u32 {
    self.width
  }

  pub fn height(&self) -> u32 {
    self.height
  }

  /// Horizontal pen advance of the whole run.
  pub fn advance(&self) -> f32 {
    self.advance
  }

  /// Returns the coverage at (x, y) in `[0, 1]`.
  ///
  /// Returns `0.0` for out-of-bounds coordinates.
  pub fn get(&self, x: u32, y: u32) -> f32 {
    if x < self.width && y < self.height {
      self.data[(y as usize) * (self.width as usize) + (x as usize)]
    } else {
      0.0
    }
  }
}

/// Positions glyphs along the baseline at `y = 0`.
///
/// Returns the glyphs and the pen advance.
fn layout_glyphs<SF: ScaleFont<F>, F: Font>(
  scaled_font: &SF,
  text: &str,
  scale: PxScale,
  char_spacing: f32,
) -> (Vec<Glyph>, f32) {
  let mut glyphs = Vec::new();
  let mut cursor_x = 0.0f32;
  let mut previous = None;

  for ch in text.chars() {
    let glyph_id = scaled_font.glyph_id(ch);
    if let Some(prev) = previous {
      cursor_x += scaled_font.kern(prev, glyph_id);
    }
    let glyph = glyph_id.with_scale_and_position(scale, ab_glyph::point(cursor_x, 0.0));
    cursor_x += scaled_font.h_advance(glyph_id) + char_spacing;
    previous = Some(glyph_id);
    glyphs.push(glyph);
  }

  if !glyphs.is_empty() {
    cursor_x -= char_spacing;
  }
  (glyphs, cursor_x)
}

/// Computes the aggregate bounding box for a list of glyphs.
///
/// Returns `Some((min_x, min_y, max_x, max_y))` or `None` if bounds collapse.
fn compute_glyph_bounds<SF: ScaleFont<F>, F: Font>(
  scaled_font: &SF,
  glyphs: &[Glyph],
) -> Option<(i32, i32, i32, i32)> {
  let mut min_x = i32::MAX;
  let mut min_y = i32::MAX;
  let mut max_x = i32::MIN;
  let mut max_y = i32::MIN;

  for glyph in glyphs {
    if let Some(outlined) = scaled_font.outline_glyph(glyph.clone()) {
      let bounds = outlined.px_bounds();
      min_x = min_x.min(bounds.min.x.floor() as i32);
      min_y = min_y.min(bounds.min.y.floor() as i32);
      max_x = max_x.max(bounds.max.x.ceil() as i32);
      max_y = max_y.max(bounds.max.y.ceil() as i32);
    }
  }

  if min_x >= max_x || min_y >= max_y {
    None
  } else {
    Some((min_x, min_y, max_x, max_y))
  }
}

/// Rasterizes glyphs into a coverage buffer.
fn rasterize_glyphs<SF: ScaleFont<F>, F: Font>(
  scaled_font: &SF,
  glyphs: Vec<Glyph>,
  min_x: i32,
  min_y: i32,
  width: u32,
  height: u32,
) -> Vec<f32> {
  let mut data = vec![0.0; (width * height) as usize];

  for glyph in glyphs {
    if let Some(outlined) = scaled_font.outline_glyph(glyph) {
      let bounds = outlined.px_bounds();
      outlined.draw(|px, py, coverage| {
        let x = (bounds.min.x.floor() as i32 + px as i32 - min_x) as u32;
        let y = (bounds.min.y.floor() as i32 + py as i32 - min_y) as u32;
        if x < width && y < height {
          let cell = &mut data[(y as usize) * (width as usize) + (x as usize)];
          *cell = (*cell + coverage).min(1.0);
        }
      });
    }
  }

  data
}

/// Rasterizes a single line of text into a coverage mask.
///
/// Returns `None` if the text is empty or contains no renderable glyphs.
pub fn rasterize_text(
  font: &CpuFont,
  text: &str,
  font_scale: f32,
  char_spacing: f32,
) -> Option<TextMask> {
  if text.is_empty() {
    return None;
  }

  let scale = PxScale::from(font_scale);
  let scaled_font = font.font.as_scaled(scale);

  let (glyphs, advance) = layout_glyphs(&scaled_font, text, scale, char_spacing);
  let (min_x, min_y, max_x, max_y) = compute_glyph_bounds(&scaled_font, &glyphs)?;

  let width = (max_x - min_x) as u32;
  let height = (max_y - min_y) as u32;
  let data = rasterize_glyphs(&scaled_font, glyphs, min_x, min_y, width, height);

  Some(TextMask {
    data,
    width,
    height,
    left: min_x,
    top: min_y,
    advance,
  })
}

/// Horizontal anchor of a text run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
  #[default]
  Left,
  Center,
}

/// Text rendering style.
#[derive(Clone, Copy, Debug)]
pub struct TextStyle {
  /// Font size in pixels.
  pub font_scale: f32,
  /// Extra spacing between characters in pixels.
  pub char_spacing: f32,
  pub color: Rgba,
  pub align: TextAlign,
  /// Thickens strokes by stamping the mask a second time one pixel right.
  pub bold: bool,
}

impl Default for TextStyle {
  fn default() -> Self {
    Self {
      font_scale: 16.0,
      char_spacing: 0.0,
      color: Rgba::BLACK,
      align: TextAlign::Left,
      bold: false,
    }
  }
}

/// Blends a text mask onto a canvas.
///
/// `(x, baseline)` is the pen origin; with [`TextAlign::Center`] `x` is the
/// center of the run's advance.
pub fn stamp_text(canvas: &mut Canvas, mask: &TextMask, x: i32, baseline: i32, style: &TextStyle) {
  let pen_x = match style.align {
    TextAlign::Left => x,
    TextAlign::Center => x - (mask.advance / 2.0).round() as i32,
  };
  let origin_x = pen_x + mask.left;
  let origin_y = baseline + mask.top;
  let passes = if style.bold { 2 } else { 1 };

  for pass in 0..passes {
    for my in 0..mask.height() {
      for mx in 0..mask.width() {
        let coverage = mask.get(mx, my);
        if coverage > 0.0 {
          canvas.blend(
            origin_x + mx as i32 + pass,
            origin_y + my as i32,
            style.color,
            coverage,
          );
        }
      }
    }
  }
}

/// Renders a single line of text directly onto a canvas.
///
/// Convenience function combining [`rasterize_text`] and [`stamp_text`].
pub fn draw_text(
  canvas: &mut Canvas,
  font: &CpuFont,
  text: &str,
  x: i32,
  baseline: i32,
  style: &TextStyle,
) {
  if let Some(mask) = rasterize_text(font, text, style.font_scale, style.char_spacing) {
    stamp_text(canvas, &mask, x, baseline, style);
  }
}
