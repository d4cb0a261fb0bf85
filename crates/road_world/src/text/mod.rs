//! CPU text rasterization for billboard faces.

mod font;

pub use font::{CpuFont, FontError, TextAlign, TextMask, TextStyle, draw_text, rasterize_text, stamp_text};
