//! Bar chart implementation

use serde::{Deserialize, Serialize};

use super::{ChartTrait, ChartType};
use crate::{Result, SynthplotError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

/// Bar chart - one bar per category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bar {
    pub orientation: Orientation,
    /// Bar width as a fraction of the category slot
    pub width: f64,
}

impl Default for Bar {
    fn default() -> Self {
        Self {
            orientation: Orientation::Vertical,
            width: 0.8,
        }
    }
}

impl Bar {
    pub fn horizontal() -> Self {
        Self {
            orientation: Orientation::Horizontal,
            ..Self::default()
        }
    }
}

impl ChartTrait for Bar {
    fn chart_type(&self) -> ChartType {
        ChartType::Bar
    }

    fn validate(&self) -> Result<()> {
        if !(self.width > 0.0 && self.width <= 1.0) {
            return Err(SynthplotError::ConfigError(format!(
                "Bar width must be in (0, 1], got {}",
                self.width
            )));
        }
        Ok(())
    }
}

impl std::fmt::Display for Bar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "bar")
    }
}
