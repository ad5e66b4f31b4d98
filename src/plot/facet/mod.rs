//! Panel grid layout
//!
//! This module places the panels of a figure into a rows x columns grid.

mod types;

pub use types::{Layout, MAX_CELLS};
