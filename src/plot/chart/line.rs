//! Line chart implementation

use serde::{Deserialize, Serialize};

use super::{ChartTrait, ChartType};
use crate::Result;

/// Line chart - connected points in x order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Line {
    pub line_width: f64,
}

impl Default for Line {
    fn default() -> Self {
        Self { line_width: 2.0 }
    }
}

impl ChartTrait for Line {
    fn chart_type(&self) -> ChartType {
        ChartType::Line
    }

    fn validate(&self) -> Result<()> {
        super::check_line_width(self.line_width)
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line")
    }
}
