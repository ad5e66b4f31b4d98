//! Color mappings from data values to colors

use serde::{Deserialize, Serialize};

use super::palettes::{self, ColorSpace, Rgb};
use crate::{Result, SynthplotError};

fn default_categorical() -> String {
    "tableau10".to_string()
}

/// How a panel's elements are colored
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ColorMapping {
    /// One palette color per panel; categorical when the data has labels
    #[default]
    Auto,
    /// Every element in one CSS color
    Fixed { color: String },
    /// One palette color per category, cycling
    Categorical {
        #[serde(default = "default_categorical")]
        palette: String,
    },
    /// Values normalized over a domain and sampled from a gradient
    Continuous {
        palette: String,
        /// Explicit `[min, max]`; the data range when absent
        #[serde(default)]
        domain: Option<[f64; 2]>,
        /// Colorbar title
        #[serde(default)]
        label: Option<String>,
    },
}

impl ColorMapping {
    pub fn fixed(color: impl Into<String>) -> Self {
        ColorMapping::Fixed {
            color: color.into(),
        }
    }

    pub fn categorical(palette: impl Into<String>) -> Self {
        ColorMapping::Categorical {
            palette: palette.into(),
        }
    }

    pub fn continuous(palette: impl Into<String>) -> Self {
        ColorMapping::Continuous {
            palette: palette.into(),
            domain: None,
            label: None,
        }
    }

    pub fn with_domain(self, min: f64, max: f64) -> Self {
        match self {
            ColorMapping::Continuous { palette, label, .. } => ColorMapping::Continuous {
                palette,
                domain: Some([min, max]),
                label,
            },
            other => other,
        }
    }

    pub fn with_label(self, text: impl Into<String>) -> Self {
        match self {
            ColorMapping::Continuous {
                palette, domain, ..
            } => ColorMapping::Continuous {
                palette,
                domain,
                label: Some(text.into()),
            },
            other => other,
        }
    }

    /// Check colors, palette names and explicit domains
    pub fn validate(&self) -> Result<()> {
        match self {
            ColorMapping::Auto => Ok(()),
            ColorMapping::Fixed { color } => palettes::parse_color(color).map(|_| ()),
            ColorMapping::Categorical { palette } => palettes::resolve_palette(palette).map(|_| ()),
            ColorMapping::Continuous {
                palette, domain, ..
            } => {
                palettes::resolve_palette(palette)?;
                if let Some([lo, hi]) = domain {
                    if !lo.is_finite() || !hi.is_finite() || lo > hi {
                        return Err(SynthplotError::ConfigError(format!(
                            "Color domain must be finite with min <= max, got [{}, {}]",
                            lo, hi
                        )));
                    }
                }
                Ok(())
            }
        }
    }
}

/// A gradient stretched over a value domain
#[derive(Debug, Clone, PartialEq)]
pub struct ContinuousScale {
    pub stops: Vec<Rgb>,
    pub domain: (f64, f64),
    pub space: ColorSpace,
}

impl ContinuousScale {
    pub fn new(stops: Vec<Rgb>, domain: (f64, f64)) -> Self {
        Self {
            stops,
            domain,
            space: ColorSpace::Oklab,
        }
    }

    /// Resolve a palette spec over a domain
    pub fn from_palette(palette: &str, domain: (f64, f64)) -> Result<Self> {
        Ok(Self::new(palettes::resolve_palette(palette)?, domain))
    }

    /// A zero-width (or non-finite) domain maps everything to the start color
    pub fn is_degenerate(&self) -> bool {
        let (lo, hi) = self.domain;
        !(lo.is_finite() && hi.is_finite() && hi > lo)
    }

    /// Position of `value` in the domain, clamped to `[0, 1]`
    pub fn normalize(&self, value: f64) -> f64 {
        if self.is_degenerate() || value.is_nan() {
            return 0.0;
        }
        let (lo, hi) = self.domain;
        ((value - lo) / (hi - lo)).clamp(0.0, 1.0)
    }

    pub fn sample(&self, t: f64) -> Rgb {
        palettes::sample_gradient(&self.stops, t, self.space)
    }

    pub fn map(&self, value: f64) -> Rgb {
        self.sample(self.normalize(value))
    }

    pub fn start(&self) -> Rgb {
        self.sample(0.0)
    }

    pub fn end(&self) -> Rgb {
        self.sample(1.0)
    }
}

/// `n` colors cycling through a palette
pub fn categorical_colors(palette: &[Rgb], n: usize) -> Vec<Rgb> {
    palette.iter().copied().cycle().take(n).collect()
}
