//! Surface chart implementation

use serde::{Deserialize, Serialize};

use super::{ChartTrait, ChartType, DataShape};

/// 3D surface over a grid dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Surface {
    /// Rotation around the vertical axis, radians
    pub yaw: f64,
    /// Elevation of the view, radians
    pub pitch: f64,
}

impl Default for Surface {
    fn default() -> Self {
        Self {
            yaw: 0.8,
            pitch: 0.5,
        }
    }
}

impl ChartTrait for Surface {
    fn chart_type(&self) -> ChartType {
        ChartType::Surface
    }

    fn input(&self) -> DataShape {
        DataShape::Grid
    }
}

impl std::fmt::Display for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "surface")
    }
}
