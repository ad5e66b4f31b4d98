//! Output format writers for synthplot
//!
//! Writers turn a composed [`Figure`] into encoded image bytes. The export
//! layer picks a writer from the destination extension and puts the bytes on
//! disk atomically.
//!
//! # Architecture
//!
//! All writers implement the `Writer` trait, which provides:
//! - Figure -> output format conversion
//! - Validation before drawing starts
//!
//! # Example
//!
//! ```rust,ignore
//! use synthplot::writer::{ImageFormat, PlottersWriter, Writer};
//!
//! let writer = PlottersWriter::new(ImageFormat::Png);
//! let png = writer.write(&figure)?;
//! ```

mod canvas;
mod export;

pub use canvas::PlottersWriter;
pub use export::{encode_raster, export, tight_crop, write_atomic, ImageFormat};

use crate::render::Figure;
use crate::Result;

/// Trait for figure output writers
pub trait Writer {
    /// The type of output produced (e.g. encoded image bytes)
    type Output;

    /// Draw and encode a figure
    fn write(&self, figure: &Figure) -> Result<Self::Output>;

    /// Check that this writer can produce the figure
    fn validate(&self, figure: &Figure) -> Result<()>;
}
