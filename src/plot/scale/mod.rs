//! Color scales and palettes

mod colour;
pub mod palettes;

pub use colour::{categorical_colors, ColorMapping, ContinuousScale};
pub use palettes::{parse_color, resolve_palette, ColorSpace, Rgb};
