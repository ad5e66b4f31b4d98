//! Closed-form formulas evaluated over 1D and 2D domains

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::{Result, SynthplotError};

fn default_one() -> f64 {
    1.0
}

/// A function `y = f(x)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum Formula {
    /// `y = amplitude * sin(2*pi*frequency*x + phase)`
    Sine {
        #[serde(default = "default_one")]
        frequency: f64,
        #[serde(default = "default_one")]
        amplitude: f64,
        #[serde(default)]
        phase: f64,
    },
    /// `y = amplitude * cos(2*pi*frequency*x + phase)`
    Cosine {
        #[serde(default = "default_one")]
        frequency: f64,
        #[serde(default = "default_one")]
        amplitude: f64,
        #[serde(default)]
        phase: f64,
    },
    /// `y = sum(c[i] * x^i)`
    Polynomial { coefficients: Vec<f64> },
    /// `y = scale * exp(rate * x)`
    Exponential {
        #[serde(default = "default_one")]
        rate: f64,
        #[serde(default = "default_one")]
        scale: f64,
    },
    Tanh,
}

impl Formula {
    /// Formula names accepted in figure descriptions
    pub const NAMES: &'static [&'static str] =
        &["sine", "cosine", "polynomial", "exponential", "tanh"];

    pub fn sine(frequency: f64) -> Self {
        Formula::Sine {
            frequency,
            amplitude: 1.0,
            phase: 0.0,
        }
    }

    pub fn cosine(frequency: f64) -> Self {
        Formula::Cosine {
            frequency,
            amplitude: 1.0,
            phase: 0.0,
        }
    }

    pub fn polynomial(coefficients: impl Into<Vec<f64>>) -> Self {
        Formula::Polynomial {
            coefficients: coefficients.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let params: Vec<(&str, f64)> = match self {
            Formula::Sine {
                frequency,
                amplitude,
                phase,
            }
            | Formula::Cosine {
                frequency,
                amplitude,
                phase,
            } => vec![
                ("frequency", *frequency),
                ("amplitude", *amplitude),
                ("phase", *phase),
            ],
            Formula::Polynomial { coefficients } => {
                if coefficients.is_empty() {
                    return Err(SynthplotError::ConfigError(
                        "Polynomial needs at least one coefficient".to_string(),
                    ));
                }
                coefficients.iter().map(|c| ("coefficient", *c)).collect()
            }
            Formula::Exponential { rate, scale } => vec![("rate", *rate), ("scale", *scale)],
            Formula::Tanh => vec![],
        };

        match params.iter().find(|(_, v)| !v.is_finite()) {
            Some((name, value)) => Err(SynthplotError::ConfigError(format!(
                "Formula '{}' has non-finite {}: {}",
                self, name, value
            ))),
            None => Ok(()),
        }
    }

    pub fn eval(&self, x: f64) -> f64 {
        match self {
            Formula::Sine {
                frequency,
                amplitude,
                phase,
            } => amplitude * (TAU * frequency * x + phase).sin(),
            Formula::Cosine {
                frequency,
                amplitude,
                phase,
            } => amplitude * (TAU * frequency * x + phase).cos(),
            // Horner's method, highest degree first
            Formula::Polynomial { coefficients } => {
                coefficients.iter().rev().fold(0.0, |acc, c| acc * x + c)
            }
            Formula::Exponential { rate, scale } => scale * (rate * x).exp(),
            Formula::Tanh => x.tanh(),
        }
    }
}

impl std::fmt::Display for Formula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Formula::Sine { .. } => "sine",
            Formula::Cosine { .. } => "cosine",
            Formula::Polynomial { .. } => "polynomial",
            Formula::Exponential { .. } => "exponential",
            Formula::Tanh => "tanh",
        };
        write!(f, "{}", s)
    }
}

/// A function `z = f(x, y)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceFormula {
    /// `z = sin(sqrt(x^2 + y^2))`
    RadialSine,
    /// `z = cos(sqrt(x^2 + y^2))`
    RadialCosine,
    /// `z = sin(x) * cos(y)`
    SinCos,
    /// `z = x^2 - y^2`
    Saddle,
    /// `z = x^2 + y^2`
    Paraboloid,
    /// `z = sin(x)cos(y) + sin(x^2)cos(y^2)`
    Interference,
}

impl SurfaceFormula {
    pub const NAMES: &'static [&'static str] = &[
        "radial_sine",
        "radial_cosine",
        "sin_cos",
        "saddle",
        "paraboloid",
        "interference",
    ];

    pub fn eval(&self, x: f64, y: f64) -> f64 {
        match self {
            SurfaceFormula::RadialSine => x.hypot(y).sin(),
            SurfaceFormula::RadialCosine => x.hypot(y).cos(),
            SurfaceFormula::SinCos => x.sin() * y.cos(),
            SurfaceFormula::Saddle => x * x - y * y,
            SurfaceFormula::Paraboloid => x * x + y * y,
            SurfaceFormula::Interference => x.sin() * y.cos() + (x * x).sin() * (y * y).cos(),
        }
    }
}

impl std::fmt::Display for SurfaceFormula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SurfaceFormula::RadialSine => "radial_sine",
            SurfaceFormula::RadialCosine => "radial_cosine",
            SurfaceFormula::SinCos => "sin_cos",
            SurfaceFormula::Saddle => "saddle",
            SurfaceFormula::Paraboloid => "paraboloid",
            SurfaceFormula::Interference => "interference",
        };
        write!(f, "{}", s)
    }
}
