//! Data synthesis
//!
//! Every chart is drawn from a [`Dataset`] produced here, either by
//! evaluating a closed-form formula over a regular domain, by seeded random
//! draws, or from literal values. Datasets are immutable once synthesized.

mod domain;
mod formula;
mod random;

pub use domain::{linspace, meshgrid, Domain};
pub use formula::{Formula, SurfaceFormula};
pub use random::{Distribution, GroupSpec, GroupsSpec, Noise, RandomSpec, SampleSpec};

use serde::{Deserialize, Serialize};

use crate::{Result, SynthplotError};

/// Ordered 1D data with optional extra channels
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// Third value channel (continuous color or area baseline)
    pub z: Option<Vec<f64>>,
    pub sizes: Option<Vec<f64>>,
    pub labels: Option<Vec<String>>,
}

impl Sequence {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        Self {
            x,
            y,
            z: None,
            sizes: None,
            labels: None,
        }
    }

    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    /// Min and max of `y`, ignoring non-finite values
    pub fn value_range(&self) -> Option<(f64, f64)> {
        finite_range(self.y.iter().copied())
    }

    /// Distinct labels in order of first appearance
    pub fn categories(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        if let Some(labels) = &self.labels {
            for label in labels {
                if !seen.contains(label) {
                    seen.push(label.clone());
                }
            }
        }
        seen
    }
}

/// Values over a 2D grid: `z[j][i]` is the value at `(x[i], y[j])`
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<Vec<f64>>,
}

impl Grid {
    /// `(x count, y count)`
    pub fn shape(&self) -> (usize, usize) {
        (self.x.len(), self.y.len())
    }

    pub fn value_range(&self) -> Option<(f64, f64)> {
        finite_range(self.z.iter().flatten().copied())
    }
}

pub(crate) fn finite_range(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Synthesized data: a sequence or a grid
#[derive(Debug, Clone, PartialEq)]
pub enum Dataset {
    Sequence(Sequence),
    Grid(Grid),
}

/// Dataset shape, `n` for sequences and `nx x ny` for grids
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Sequence(usize),
    Grid(usize, usize),
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Shape::Sequence(n) => write!(f, "{}", n),
            Shape::Grid(nx, ny) => write!(f, "{}x{}", nx, ny),
        }
    }
}

impl Dataset {
    pub fn shape(&self) -> Shape {
        match self {
            Dataset::Sequence(seq) => Shape::Sequence(seq.len()),
            Dataset::Grid(grid) => {
                let (nx, ny) = grid.shape();
                Shape::Grid(nx, ny)
            }
        }
    }

    /// Value domain: `y` for sequences, `z` for grids
    pub fn value_range(&self) -> Option<(f64, f64)> {
        match self {
            Dataset::Sequence(seq) => seq.value_range(),
            Dataset::Grid(grid) => grid.value_range(),
        }
    }

    pub fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            Dataset::Sequence(seq) => Some(seq),
            Dataset::Grid(_) => None,
        }
    }

    pub fn as_grid(&self) -> Option<&Grid> {
        match self {
            Dataset::Grid(grid) => Some(grid),
            Dataset::Sequence(_) => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Dataset::Sequence(_) => "sequence",
            Dataset::Grid(_) => "grid",
        }
    }
}

/// Named categories with one value each
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiteralSpec {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl LiteralSpec {
    pub fn new<S: Into<String>>(pairs: impl IntoIterator<Item = (S, f64)>) -> Self {
        let (labels, values) = pairs.into_iter().map(|(l, v)| (l.into(), v)).unzip();
        Self { labels, values }
    }

    pub fn synthesize(&self) -> Result<Sequence> {
        if self.values.is_empty() {
            return Err(SynthplotError::ConfigError(
                "Literal data needs at least one value".to_string(),
            ));
        }
        if self.labels.len() != self.values.len() {
            return Err(SynthplotError::ConfigError(format!(
                "Literal data has {} labels but {} values",
                self.labels.len(),
                self.values.len()
            )));
        }
        if let Some(v) = self.values.iter().find(|v| !v.is_finite()) {
            return Err(SynthplotError::ConfigError(format!(
                "Literal value must be finite, got {}",
                v
            )));
        }
        let x = (0..self.values.len()).map(|i| i as f64).collect();
        let mut seq = Sequence::new(x, self.values.clone());
        seq.labels = Some(self.labels.clone());
        Ok(seq)
    }
}

/// How a panel's data is produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Synthesis {
    /// `y = f(x)` over a 1D domain, with an optional second curve as baseline
    Formula {
        x: Domain,
        formula: Formula,
        #[serde(default)]
        noise: Option<Noise>,
        #[serde(default)]
        baseline: Option<Formula>,
    },
    /// `z = f(x, y)` over a 2D grid
    Surface {
        x: Domain,
        y: Domain,
        formula: SurfaceFormula,
        #[serde(default)]
        noise: Option<Noise>,
    },
    Random(RandomSpec),
    Groups(GroupsSpec),
    Sample(SampleSpec),
    Literal(LiteralSpec),
}

impl Synthesis {
    pub fn formula(x: Domain, formula: Formula) -> Self {
        Synthesis::Formula {
            x,
            formula,
            noise: None,
            baseline: None,
        }
    }

    pub fn synthesize(&self) -> Result<Dataset> {
        match self {
            Synthesis::Formula {
                x,
                formula,
                noise,
                baseline,
            } => {
                x.validate()?;
                formula.validate()?;
                let xs = x.samples();
                let mut ys: Vec<f64> = xs.iter().map(|&v| formula.eval(v)).collect();
                if let Some(noise) = noise {
                    noise.apply(&mut ys)?;
                }
                let z = match baseline {
                    Some(base) => {
                        base.validate()?;
                        Some(xs.iter().map(|&v| base.eval(v)).collect())
                    }
                    None => None,
                };
                let mut seq = Sequence::new(xs, ys);
                seq.z = z;
                Ok(Dataset::Sequence(seq))
            }
            Synthesis::Surface {
                x,
                y,
                formula,
                noise,
            } => {
                x.validate()?;
                y.validate()?;
                let xs = x.samples();
                let ys = y.samples();
                let (xx, yy) = meshgrid(&xs, &ys);
                let mut z: Vec<Vec<f64>> = xx
                    .iter()
                    .zip(&yy)
                    .map(|(xrow, yrow)| {
                        xrow.iter()
                            .zip(yrow)
                            .map(|(&xv, &yv)| formula.eval(xv, yv))
                            .collect()
                    })
                    .collect();
                if let Some(noise) = noise {
                    let mut flat: Vec<f64> = z.iter().flatten().copied().collect();
                    noise.apply(&mut flat)?;
                    z = flat.chunks(xs.len()).map(<[f64]>::to_vec).collect();
                }
                Ok(Dataset::Grid(Grid { x: xs, y: ys, z }))
            }
            Synthesis::Random(spec) => spec.synthesize().map(Dataset::Sequence),
            Synthesis::Groups(spec) => spec.synthesize().map(Dataset::Sequence),
            Synthesis::Sample(spec) => spec.synthesize().map(Dataset::Sequence),
            Synthesis::Literal(spec) => spec.synthesize().map(Dataset::Sequence),
        }
    }
}
