//! Pie chart implementation

use serde::{Deserialize, Serialize};

use super::{ChartTrait, ChartType};

/// Pie chart - one wedge per category, sized by value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pie {
    /// Angle of the first wedge edge, degrees counter-clockwise from 3 o'clock
    pub start_angle: f64,
    pub show_percent: bool,
}

impl Default for Pie {
    fn default() -> Self {
        Self {
            start_angle: 90.0,
            show_percent: true,
        }
    }
}

impl ChartTrait for Pie {
    fn chart_type(&self) -> ChartType {
        ChartType::Pie
    }

    fn has_axes(&self) -> bool {
        false
    }
}

impl std::fmt::Display for Pie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "pie")
    }
}
