//! Plotters writer implementation
//!
//! Draws a [`Figure`] onto a plotters backend: an in-memory RGB buffer for
//! raster formats, an SVG string for vector output.
//!
//! # Mapping Strategy
//!
//! - Figure layout -> evenly split drawing areas
//! - Sequence geometries -> 2D cartesian charts
//! - Surface geometry -> 3D cartesian chart with a projection
//! - Pie wedges -> pixel-space polygons
//! - Continuous color mapping -> colorbar strip beside the panel

mod renderer;

use plotters::prelude::*;
use tracing::debug;

use crate::plot::scale::parse_color;
use crate::plot::ExportOptions;
use crate::render::Figure;
use crate::writer::export::{encode_raster, tight_crop, ImageFormat};
use crate::writer::Writer;
use crate::{Result, SynthplotError};

use renderer::{draw_figure, render_err};

/// Plotters-backed image writer
#[derive(Debug, Clone)]
pub struct PlottersWriter {
    format: ImageFormat,
    options: ExportOptions,
}

impl PlottersWriter {
    pub fn new(format: ImageFormat) -> Self {
        Self {
            format,
            options: ExportOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ExportOptions) -> Self {
        self.options = options;
        self
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    fn write_svg(&self, figure: &Figure) -> Result<Vec<u8>> {
        let size = figure.config.pixel_size();
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
            draw_figure(&root, figure)?;
        }
        Ok(svg.into_bytes())
    }

    fn write_raster(&self, figure: &Figure) -> Result<Vec<u8>> {
        let (width, height) = figure.config.pixel_size();
        let mut buf = vec![0u8; width as usize * height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buf, (width, height)).into_drawing_area();
            draw_figure(&root, figure)?;
        }

        let (buf, width, height) = if self.options.tight_bbox {
            let bg = parse_color(&figure.config.background)?;
            let pad = (self.options.pad.max(0.0) * figure.config.dpi as f64).round() as u32;
            tight_crop(buf, width, height, [bg.red, bg.green, bg.blue], pad)
        } else {
            (buf, width, height)
        };
        encode_raster(buf, width, height, self.format)
    }
}

impl Writer for PlottersWriter {
    type Output = Vec<u8>;

    fn write(&self, figure: &Figure) -> Result<Vec<u8>> {
        self.validate(figure)?;
        if self.format.is_raster() {
            self.write_raster(figure)
        } else {
            if self.options.tight_bbox {
                debug!(
                    format = %self.format,
                    "tight bounding box only applies to raster output"
                );
            }
            self.write_svg(figure)
        }
    }

    fn validate(&self, figure: &Figure) -> Result<()> {
        figure.config.validate()?;
        if !(self.options.pad.is_finite() && self.options.pad >= 0.0) {
            return Err(SynthplotError::ConfigError(format!(
                "Export padding must be a non-negative number of inches, got {}",
                self.options.pad
            )));
        }
        for cell in &figure.cells {
            if cell.row >= figure.layout.rows || cell.col >= figure.layout.cols {
                return Err(render_err(format!(
                    "Cell ({}, {}) is outside the {} grid",
                    cell.row, cell.col, figure.layout
                )));
            }
        }
        Ok(())
    }
}
