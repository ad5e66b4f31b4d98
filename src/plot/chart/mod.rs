//! Chart kinds and per-panel chart specifications
//!
//! Each chart kind is its own options struct implementing [`ChartTrait`];
//! [`ChartKind`] is the closed enum the renderer dispatches on.
//!
//! # Architecture
//!
//! - `ChartType`: fieldless enum for logging and pattern matching
//! - `ChartTrait`: per-kind behavior (input shape, validation, axes)
//! - `ChartKind`: tagged enum holding one options struct per kind
//! - `ChartSpec`: kind plus title, labels, color mapping and legend

use serde::{Deserialize, Serialize};

use crate::plot::scale::ColorMapping;
use crate::{Result, SynthplotError};

mod area;
mod bar;
mod boxplot;
mod histogram;
mod line;
mod pie;
mod scatter;
mod step;
mod surface;

pub use area::Area;
pub use bar::{Bar, Orientation};
pub use boxplot::BoxPlot;
pub use histogram::Histogram;
pub use line::Line;
pub use pie::Pie;
pub use scatter::Scatter;
pub use step::{Step, StepPosition};
pub use surface::Surface;

/// Enum of all chart types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Scatter,
    Bar,
    Line,
    Surface,
    Histogram,
    Box,
    Pie,
    Area,
    Step,
}

impl ChartType {
    pub const ALL: &'static [ChartType] = &[
        ChartType::Scatter,
        ChartType::Bar,
        ChartType::Line,
        ChartType::Surface,
        ChartType::Histogram,
        ChartType::Box,
        ChartType::Pie,
        ChartType::Area,
        ChartType::Step,
    ];
}

impl std::fmt::Display for ChartType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ChartType::Scatter => "scatter",
            ChartType::Bar => "bar",
            ChartType::Line => "line",
            ChartType::Surface => "surface",
            ChartType::Histogram => "histogram",
            ChartType::Box => "box",
            ChartType::Pie => "pie",
            ChartType::Area => "area",
            ChartType::Step => "step",
        };
        write!(f, "{}", s)
    }
}

/// Dataset shape a chart kind consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataShape {
    Sequence,
    Grid,
}

impl std::fmt::Display for DataShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataShape::Sequence => write!(f, "sequence"),
            DataShape::Grid => write!(f, "grid"),
        }
    }
}

/// Core trait for chart kind behavior
pub trait ChartTrait: std::fmt::Debug + std::fmt::Display + Send + Sync {
    fn chart_type(&self) -> ChartType;

    /// Dataset shape this kind draws from
    fn input(&self) -> DataShape {
        DataShape::Sequence
    }

    /// Whether the panel has cartesian x/y axes
    fn has_axes(&self) -> bool {
        true
    }

    /// Validate kind-specific options
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

fn check_opacity(opacity: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&opacity) {
        return Err(SynthplotError::ConfigError(format!(
            "Opacity must be in [0, 1], got {}",
            opacity
        )));
    }
    Ok(())
}

fn check_line_width(width: f64) -> Result<()> {
    if !(width.is_finite() && width > 0.0) {
        return Err(SynthplotError::ConfigError(format!(
            "Line width must be positive, got {}",
            width
        )));
    }
    Ok(())
}

/// Closed set of chart kinds, each with its own options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ChartKind {
    Scatter(Scatter),
    Bar(Bar),
    Line(Line),
    Surface(Surface),
    Histogram(Histogram),
    #[serde(rename = "box")]
    BoxPlot(BoxPlot),
    Pie(Pie),
    Area(Area),
    Step(Step),
}

impl ChartKind {
    /// Borrow the options struct as a trait object
    pub fn as_trait(&self) -> &dyn ChartTrait {
        match self {
            ChartKind::Scatter(c) => c,
            ChartKind::Bar(c) => c,
            ChartKind::Line(c) => c,
            ChartKind::Surface(c) => c,
            ChartKind::Histogram(c) => c,
            ChartKind::BoxPlot(c) => c,
            ChartKind::Pie(c) => c,
            ChartKind::Area(c) => c,
            ChartKind::Step(c) => c,
        }
    }

    pub fn chart_type(&self) -> ChartType {
        self.as_trait().chart_type()
    }

    /// Default kind with default options for a chart type
    pub fn of(chart_type: ChartType) -> Self {
        match chart_type {
            ChartType::Scatter => ChartKind::Scatter(Scatter::default()),
            ChartType::Bar => ChartKind::Bar(Bar::default()),
            ChartType::Line => ChartKind::Line(Line::default()),
            ChartType::Surface => ChartKind::Surface(Surface::default()),
            ChartType::Histogram => ChartKind::Histogram(Histogram::default()),
            ChartType::Box => ChartKind::BoxPlot(BoxPlot::default()),
            ChartType::Pie => ChartKind::Pie(Pie::default()),
            ChartType::Area => ChartKind::Area(Area::default()),
            ChartType::Step => ChartKind::Step(Step::default()),
        }
    }
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_trait())
    }
}

fn default_x_label() -> String {
    "x".to_string()
}

fn default_y_label() -> String {
    "y".to_string()
}

/// Axis titles for a panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisLabels {
    #[serde(default = "default_x_label")]
    pub x: String,
    #[serde(default = "default_y_label")]
    pub y: String,
    /// Vertical axis of a surface
    #[serde(default)]
    pub z: Option<String>,
}

impl Default for AxisLabels {
    fn default() -> Self {
        Self {
            x: default_x_label(),
            y: default_y_label(),
            z: None,
        }
    }
}

fn default_true() -> bool {
    true
}

/// What to draw in one panel and how to color it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    #[serde(flatten)]
    pub kind: ChartKind,
    /// Panel title; `None` falls back to the chart type name
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub labels: AxisLabels,
    #[serde(default)]
    pub color: ColorMapping,
    /// Legend entry for single-series panels
    #[serde(default)]
    pub legend: Option<String>,
    #[serde(default = "default_true")]
    pub grid: bool,
}

impl ChartSpec {
    pub fn new(kind: ChartKind) -> Self {
        Self {
            kind,
            title: None,
            labels: AxisLabels::default(),
            color: ColorMapping::default(),
            legend: None,
            grid: true,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_labels(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.labels.x = x.into();
        self.labels.y = y.into();
        self
    }

    pub fn with_z_label(mut self, z: impl Into<String>) -> Self {
        self.labels.z = Some(z.into());
        self
    }

    pub fn with_color(mut self, color: ColorMapping) -> Self {
        self.color = color;
        self
    }

    pub fn with_legend(mut self, legend: impl Into<String>) -> Self {
        self.legend = Some(legend.into());
        self
    }

    pub fn without_grid(mut self) -> Self {
        self.grid = false;
        self
    }

    /// Title shown on the panel
    pub fn resolved_title(&self) -> String {
        match &self.title {
            Some(title) => title.clone(),
            None => self.kind.chart_type().to_string(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.kind.as_trait().validate()?;
        self.color.validate()
    }
}
