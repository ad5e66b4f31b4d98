//! Box plot implementation

use serde::{Deserialize, Serialize};

use super::{ChartTrait, ChartType};
use crate::{Result, SynthplotError};

/// Box plot - five-number summary per label group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxPlot {
    /// Whisker reach in multiples of the interquartile range
    pub whisker: f64,
    pub show_outliers: bool,
}

impl Default for BoxPlot {
    fn default() -> Self {
        Self {
            whisker: 1.5,
            show_outliers: true,
        }
    }
}

impl ChartTrait for BoxPlot {
    fn chart_type(&self) -> ChartType {
        ChartType::Box
    }

    fn validate(&self) -> Result<()> {
        if !(self.whisker.is_finite() && self.whisker >= 0.0) {
            return Err(SynthplotError::ConfigError(format!(
                "Box plot whisker must be a non-negative number, got {}",
                self.whisker
            )));
        }
        Ok(())
    }
}

impl std::fmt::Display for BoxPlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "box")
    }
}
