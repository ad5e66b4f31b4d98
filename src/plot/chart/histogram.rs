//! Histogram chart implementation

use serde::{Deserialize, Serialize};

use super::{ChartTrait, ChartType};
use crate::{Result, SynthplotError};

/// Histogram - counts of `y` values in equal-width bins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Histogram {
    pub bins: usize,
}

impl Default for Histogram {
    fn default() -> Self {
        Self { bins: 30 }
    }
}

impl ChartTrait for Histogram {
    fn chart_type(&self) -> ChartType {
        ChartType::Histogram
    }

    fn validate(&self) -> Result<()> {
        if self.bins == 0 {
            return Err(SynthplotError::ConfigError(
                "Histogram bin count must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl std::fmt::Display for Histogram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "histogram")
    }
}
