//! Figure description: panels, layout, render and export settings
//!
//! A [`FigureSpec`] is the declarative input to the pipeline. It can be built
//! in code or read from JSON:
//!
//! ```json
//! {
//!   "title": "Sine waves",
//!   "layout": {"rows": 2, "cols": 2},
//!   "config": {"width": 12, "height": 8, "dpi": 150},
//!   "panels": [
//!     {"data": {"mode": "formula", "x": {"lower": 0, "upper": 1, "count": 500},
//!               "formula": {"name": "sine", "frequency": 2}},
//!      "chart": {"type": "line", "title": "2 Hz"}}
//!   ]
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::chart::ChartSpec;
use super::facet::Layout;
use crate::data::Synthesis;
use crate::{Result, SynthplotError};

/// Figure size, resolution and theme.
///
/// Passed explicitly into rendering; there is no global plotting state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Width in inches
    pub width: f64,
    /// Height in inches
    pub height: f64,
    pub dpi: u32,
    pub background: String,
    pub font_family: String,
    /// Demote render-time warnings to debug level
    pub quiet: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 10.0,
            height: 6.0,
            dpi: 100,
            background: "white".to_string(),
            font_family: "sans-serif".to_string(),
            quiet: false,
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<()> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.width) || !positive(self.height) || self.dpi == 0 {
            return Err(SynthplotError::ConfigError(format!(
                "Figure size must be positive, got {}x{} in at {} dpi",
                self.width, self.height, self.dpi
            )));
        }
        let (w, h) = self.pixel_size();
        if w == 0 || h == 0 || w > 20_000 || h > 20_000 {
            return Err(SynthplotError::ConfigError(format!(
                "Figure pixel size {}x{} is out of range",
                w, h
            )));
        }
        crate::plot::scale::parse_color(&self.background)?;
        Ok(())
    }

    /// Canvas size in pixels: inches times dpi
    pub fn pixel_size(&self) -> (u32, u32) {
        let px = |inches: f64| (inches * self.dpi as f64).round() as u32;
        (px(self.width), px(self.height))
    }

    /// Font size in pixels for a size in points
    pub fn font_px(&self, points: f64) -> f64 {
        points * self.dpi as f64 / 72.0
    }

    /// Length in pixels for a length in points
    pub fn scale_px(&self, points: f64) -> u32 {
        self.font_px(points).round().max(1.0) as u32
    }
}

fn default_pad() -> f64 {
    0.1
}

/// Export-time options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportOptions {
    /// Crop uniform background margins
    #[serde(default)]
    pub tight_bbox: bool,
    /// Padding kept around the cropped content, inches
    #[serde(default = "default_pad")]
    pub pad: f64,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            tight_bbox: false,
            pad: default_pad(),
        }
    }
}

/// One panel: how to make the data and how to draw it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelSpec {
    pub data: Synthesis,
    pub chart: ChartSpec,
}

impl PanelSpec {
    pub fn new(data: Synthesis, chart: ChartSpec) -> Self {
        Self { data, chart }
    }
}

/// Complete figure description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigureSpec {
    /// Figure-level title, independent of panel titles
    #[serde(default)]
    pub title: Option<String>,
    /// Panel grid; derived from the panel count when absent
    #[serde(default)]
    pub layout: Option<Layout>,
    #[serde(default)]
    pub config: RenderConfig,
    #[serde(default)]
    pub export: ExportOptions,
    /// Default output path
    #[serde(default)]
    pub output: Option<PathBuf>,
    pub panels: Vec<PanelSpec>,
}

impl FigureSpec {
    pub fn single(panel: PanelSpec) -> Self {
        Self::grid(Layout::default(), vec![panel])
    }

    pub fn grid(layout: Layout, panels: Vec<PanelSpec>) -> Self {
        Self {
            title: None,
            layout: Some(layout),
            config: RenderConfig::default(),
            export: ExportOptions::default(),
            output: None,
            panels,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Parse a JSON figure description.
    ///
    /// An unknown chart type, formula, distribution or mode is a
    /// `ConfigError`; any other malformed input is a `SpecError`.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| {
            let message = e.to_string();
            if e.is_data() && message.contains("unknown variant") {
                SynthplotError::ConfigError(format!("Unsupported option: {}", message))
            } else {
                SynthplotError::SpecError(message)
            }
        })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content).map_err(|e| match e {
            SynthplotError::SpecError(msg) => {
                SynthplotError::SpecError(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| SynthplotError::SpecError(e.to_string()))
    }

    /// Effective grid layout
    pub fn layout(&self) -> Result<Layout> {
        let layout = self
            .layout
            .unwrap_or_else(|| Layout::auto(self.panels.len()));
        layout.validate()?;
        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::chart::ChartType;

    const SINE_GRID: &str = r#"{
        "title": "Sine waves",
        "layout": {"rows": 2, "cols": 2},
        "config": {"width": 12, "height": 8, "dpi": 150},
        "panels": [
            {"data": {"mode": "formula", "x": {"lower": 0, "upper": 1, "count": 500},
                      "formula": {"name": "sine", "frequency": 2}},
             "chart": {"type": "line", "title": "2 Hz"}}
        ]
    }"#;

    #[test]
    fn test_from_json_with_defaults() {
        let spec = FigureSpec::from_json(SINE_GRID).unwrap();
        assert_eq!(spec.panels.len(), 1);
        assert_eq!(spec.config.pixel_size(), (1800, 1200));
        assert_eq!(spec.config.background, "white");
        assert!(!spec.export.tight_bbox);
        assert_eq!(spec.layout().unwrap(), Layout { rows: 2, cols: 2 });
        assert_eq!(spec.panels[0].chart.kind.chart_type(), ChartType::Line);
    }

    #[test]
    fn test_malformed_json_is_spec_error() {
        let err = FigureSpec::from_json(r#"{"panels": [{"data": {}}]}"#).unwrap_err();
        assert!(matches!(err, SynthplotError::SpecError(_)));
    }

    #[test]
    fn test_unknown_chart_type_is_config_error() {
        let json = SINE_GRID.replace(r#""type": "line""#, r#""type": "heatmap""#);
        let err = FigureSpec::from_json(&json).unwrap_err();
        match err {
            SynthplotError::ConfigError(msg) => assert!(msg.contains("heatmap")),
            other => panic!("unexpected error {:?}", other),
        }

        let json = SINE_GRID.replace(r#""name": "sine""#, r#""name": "sawtooth""#);
        assert!(matches!(
            FigureSpec::from_json(&json),
            Err(SynthplotError::ConfigError(_))
        ));
    }

    #[test]
    fn test_oversized_layout_is_config_error() {
        let json = SINE_GRID.replace(
            r#""layout": {"rows": 2, "cols": 2}"#,
            r#""layout": {"rows": 4294967296, "cols": 4294967296}"#,
        );
        let spec = FigureSpec::from_json(&json).unwrap();
        assert!(matches!(spec.layout(), Err(SynthplotError::ConfigError(_))));
        assert!(matches!(
            crate::prepare(&spec),
            Err(SynthplotError::ConfigError(_))
        ));
    }

    #[test]
    fn test_missing_layout_is_derived() {
        let mut spec = FigureSpec::from_json(SINE_GRID).unwrap();
        spec.layout = None;
        let panel = spec.panels[0].clone();
        spec.panels.extend(vec![panel; 4]);
        assert_eq!(spec.layout().unwrap(), Layout { rows: 2, cols: 3 });
    }

    #[test]
    fn test_json_round_trip_through_file() {
        let spec = FigureSpec::from_json(SINE_GRID).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("figure.json");
        std::fs::write(&path, spec.to_json().unwrap()).unwrap();
        assert_eq!(FigureSpec::from_file(&path).unwrap(), spec);
    }

    #[test]
    fn test_render_config_scaling() {
        let config = RenderConfig {
            dpi: 300,
            ..RenderConfig::default()
        };
        assert_eq!(config.pixel_size(), (3000, 1800));
        assert_eq!(config.font_px(12.0), 50.0);
        assert!(config.validate().is_ok());

        let bad = RenderConfig {
            width: 0.0,
            ..RenderConfig::default()
        };
        assert!(bad.validate().is_err());
    }
}
