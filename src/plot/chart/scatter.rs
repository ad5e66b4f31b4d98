//! Scatter chart implementation

use serde::{Deserialize, Serialize};

use super::{ChartTrait, ChartType};
use crate::{Result, SynthplotError};

/// Scatter chart - one marker per point, optionally sized by a size channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scatter {
    /// Marker radius in points when no size channel is present
    pub marker_size: f64,
    /// Radius range the size channel is mapped onto
    pub size_range: [f64; 2],
    pub opacity: f64,
}

impl Default for Scatter {
    fn default() -> Self {
        Self {
            marker_size: 5.0,
            size_range: [3.0, 15.0],
            opacity: 0.8,
        }
    }
}

impl ChartTrait for Scatter {
    fn chart_type(&self) -> ChartType {
        ChartType::Scatter
    }

    fn validate(&self) -> Result<()> {
        super::check_opacity(self.opacity)?;
        let [lo, hi] = self.size_range;
        if self.marker_size <= 0.0 || lo <= 0.0 || lo > hi {
            return Err(SynthplotError::ConfigError(format!(
                "Invalid scatter marker sizes: marker_size={}, size_range=[{}, {}]",
                self.marker_size, lo, hi
            )));
        }
        Ok(())
    }
}

impl std::fmt::Display for Scatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "scatter")
    }
}
