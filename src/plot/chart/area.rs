//! Area chart implementation

use serde::{Deserialize, Serialize};

use super::{ChartTrait, ChartType};
use crate::Result;

/// Area chart - filled band between `y` and a baseline (`z`, or zero)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Area {
    pub opacity: f64,
}

impl Default for Area {
    fn default() -> Self {
        Self { opacity: 0.5 }
    }
}

impl ChartTrait for Area {
    fn chart_type(&self) -> ChartType {
        ChartType::Area
    }

    fn validate(&self) -> Result<()> {
        super::check_opacity(self.opacity)
    }
}

impl std::fmt::Display for Area {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "area")
    }
}
