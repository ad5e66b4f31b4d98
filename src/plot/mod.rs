//! Chart specification types
//!
//! This module contains the declarative side of the pipeline: what each
//! panel draws and how the figure is laid out.
//!
//! # Architecture
//!
//! The module is organized into submodules:
//!
//! - `main` - FigureSpec, PanelSpec, RenderConfig and ExportOptions
//! - `chart` - ChartSpec and the closed set of chart kinds
//! - `scale` - color mappings and named palettes
//! - `facet` - rows x columns grid layout

pub mod chart;
pub mod facet;
pub mod main;
pub mod scale;

// Re-export all types for convenience
pub use chart::*;
pub use facet::*;
pub use main::*;
pub use scale::*;
