//! Step chart implementation

use serde::{Deserialize, Serialize};

use super::{ChartTrait, ChartType};
use crate::Result;

/// Where the vertical riser sits relative to each sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepPosition {
    /// Value holds up to and including its own x
    #[default]
    Pre,
    /// Value holds from its own x to the next
    Post,
    /// Risers halfway between samples
    Mid,
}

/// Step chart - piecewise-constant line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Step {
    pub position: StepPosition,
    pub line_width: f64,
}

impl Default for Step {
    fn default() -> Self {
        Self {
            position: StepPosition::Pre,
            line_width: 2.0,
        }
    }
}

impl ChartTrait for Step {
    fn chart_type(&self) -> ChartType {
        ChartType::Step
    }

    fn validate(&self) -> Result<()> {
        super::check_line_width(self.line_width)
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "step")
    }
}
