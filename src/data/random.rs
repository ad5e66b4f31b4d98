//! Seeded pseudo-random synthesis

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution as _, Normal, Uniform};
use serde::{Deserialize, Serialize};

use super::Sequence;
use crate::{Result, SynthplotError};

/// A named value distribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "dist", rename_all = "snake_case")]
pub enum Distribution {
    /// Uniform over `[low, high)`
    Uniform { low: f64, high: f64 },
    /// Gaussian with the given mean and standard deviation
    Normal { mean: f64, std_dev: f64 },
    /// Integers in `[low, high)`
    Integer { low: i64, high: i64 },
}

impl Distribution {
    pub const NAMES: &'static [&'static str] = &["uniform", "normal", "integer"];

    pub fn unit() -> Self {
        Distribution::Uniform {
            low: 0.0,
            high: 1.0,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match *self {
            Distribution::Uniform { low, high } => {
                if !(high - low).is_finite() || low >= high {
                    return Err(SynthplotError::ConfigError(format!(
                        "Uniform distribution needs low < high with a finite width, \
                         got [{}, {})",
                        low, high
                    )));
                }
            }
            Distribution::Normal { mean, std_dev } => {
                if !mean.is_finite() || !std_dev.is_finite() || std_dev <= 0.0 {
                    return Err(SynthplotError::ConfigError(format!(
                        "Normal distribution needs finite mean and std_dev > 0, \
                         got mean={} std_dev={}",
                        mean, std_dev
                    )));
                }
            }
            Distribution::Integer { low, high } => {
                if low >= high {
                    return Err(SynthplotError::ConfigError(format!(
                        "Integer distribution needs low < high, got [{}, {})",
                        low, high
                    )));
                }
            }
        }
        Ok(())
    }

    /// Draw `n` values from this distribution
    pub fn sample_n<R: Rng>(&self, rng: &mut R, n: usize) -> Result<Vec<f64>> {
        self.validate()?;
        let values = match *self {
            Distribution::Uniform { low, high } => {
                let dist = Uniform::new(low, high);
                dist.sample_iter(rng).take(n).collect()
            }
            Distribution::Normal { mean, std_dev } => {
                let dist = Normal::new(mean, std_dev)
                    .map_err(|e| SynthplotError::ConfigError(e.to_string()))?;
                dist.sample_iter(rng).take(n).collect()
            }
            Distribution::Integer { low, high } => {
                (0..n).map(|_| rng.gen_range(low..high) as f64).collect()
            }
        };
        Ok(values)
    }
}

fn check_count(count: usize, what: &str) -> Result<()> {
    if count == 0 {
        return Err(SynthplotError::ConfigError(format!(
            "{} count must be positive",
            what
        )));
    }
    Ok(())
}

/// Independent draws for x, y and optional color/size/category channels.
///
/// Channels are drawn from one generator in a fixed order (x, y, color,
/// size, categories) so the same seed always yields the same dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomSpec {
    pub seed: u64,
    pub count: usize,
    #[serde(default = "Distribution::unit")]
    pub x: Distribution,
    #[serde(default = "Distribution::unit")]
    pub y: Distribution,
    #[serde(default)]
    pub color: Option<Distribution>,
    #[serde(default)]
    pub size: Option<Distribution>,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl RandomSpec {
    pub fn uniform(seed: u64, count: usize) -> Self {
        Self {
            seed,
            count,
            x: Distribution::unit(),
            y: Distribution::unit(),
            color: None,
            size: None,
            categories: Vec::new(),
        }
    }

    pub fn synthesize(&self) -> Result<Sequence> {
        check_count(self.count, "Random sample")?;
        let mut rng = StdRng::seed_from_u64(self.seed);

        let x = self.x.sample_n(&mut rng, self.count)?;
        let y = self.y.sample_n(&mut rng, self.count)?;
        let mut seq = Sequence::new(x, y);

        if let Some(dist) = &self.color {
            seq.z = Some(dist.sample_n(&mut rng, self.count)?);
        }
        if let Some(dist) = &self.size {
            seq.sizes = Some(dist.sample_n(&mut rng, self.count)?);
        }
        if !self.categories.is_empty() {
            let labels = (0..self.count)
                .map(|_| self.categories[rng.gen_range(0..self.categories.len())].clone())
                .collect();
            seq.labels = Some(labels);
        }
        Ok(seq)
    }
}

/// One labeled cluster of points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSpec {
    pub label: String,
    pub count: usize,
    pub x: Distribution,
    pub y: Distribution,
}

/// Several labeled clusters drawn from one seeded generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupsSpec {
    pub seed: u64,
    pub groups: Vec<GroupSpec>,
}

impl GroupsSpec {
    pub fn synthesize(&self) -> Result<Sequence> {
        if self.groups.is_empty() {
            return Err(SynthplotError::ConfigError(
                "At least one group is required".to_string(),
            ));
        }
        let mut rng = StdRng::seed_from_u64(self.seed);
        let total = self.groups.iter().map(|g| g.count).sum();
        let mut x = Vec::with_capacity(total);
        let mut y = Vec::with_capacity(total);
        let mut labels = Vec::with_capacity(total);

        for group in &self.groups {
            check_count(group.count, &format!("Group '{}'", group.label))?;
            x.extend(group.x.sample_n(&mut rng, group.count)?);
            y.extend(group.y.sample_n(&mut rng, group.count)?);
            labels.extend(std::iter::repeat(group.label.clone()).take(group.count));
        }

        let mut seq = Sequence::new(x, y);
        seq.labels = Some(labels);
        Ok(seq)
    }
}

fn default_series() -> usize {
    1
}

/// A univariate sample for histograms and box plots.
///
/// The sample index becomes `x`; with more than one series every value is
/// labeled with its 1-based series number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleSpec {
    pub seed: u64,
    pub count: usize,
    pub distribution: Distribution,
    #[serde(default = "default_series")]
    pub series: usize,
}

impl SampleSpec {
    pub fn synthesize(&self) -> Result<Sequence> {
        check_count(self.count, "Sample")?;
        check_count(self.series, "Series")?;
        let mut rng = StdRng::seed_from_u64(self.seed);

        let total = self.count * self.series;
        let y = self.distribution.sample_n(&mut rng, total)?;
        let x = (0..total).map(|i| (i % self.count) as f64).collect();
        let mut seq = Sequence::new(x, y);
        if self.series > 1 {
            seq.labels = Some(
                (0..total)
                    .map(|i| (i / self.count + 1).to_string())
                    .collect(),
            );
        }
        Ok(seq)
    }
}

/// Additive Gaussian noise
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Noise {
    pub seed: u64,
    pub std_dev: f64,
}

impl Noise {
    pub fn apply(&self, values: &mut [f64]) -> Result<()> {
        let dist = Distribution::Normal {
            mean: 0.0,
            std_dev: self.std_dev,
        };
        let mut rng = StdRng::seed_from_u64(self.seed);
        let draws = dist.sample_n(&mut rng, values.len())?;
        for (v, n) in values.iter_mut().zip(draws) {
            *v += n;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let dist = Distribution::Uniform {
            low: -2.0,
            high: 3.0,
        };
        let values = dist.sample_n(&mut rng, 500).unwrap();
        assert_eq!(values.len(), 500);
        assert!(values.iter().all(|v| (-2.0..3.0).contains(v)));
    }

    #[test]
    fn test_integer_draws_are_whole() {
        let mut rng = StdRng::seed_from_u64(7);
        let dist = Distribution::Integer { low: 10, high: 100 };
        let values = dist.sample_n(&mut rng, 200).unwrap();
        assert!(values.iter().all(|v| v.fract() == 0.0 && (10.0..100.0).contains(v)));
    }

    #[test]
    fn test_invalid_distributions() {
        let mut rng = StdRng::seed_from_u64(0);
        let bad = [
            Distribution::Uniform {
                low: 1.0,
                high: 1.0,
            },
            Distribution::Normal {
                mean: 0.0,
                std_dev: 0.0,
            },
            Distribution::Integer { low: 5, high: 2 },
        ];
        for dist in bad {
            assert!(matches!(
                dist.sample_n(&mut rng, 3),
                Err(SynthplotError::ConfigError(_))
            ));
        }
    }

    #[test]
    fn test_uniform_with_overflowing_width_is_config_error() {
        let spec = RandomSpec {
            x: Distribution::Uniform {
                low: -1e308,
                high: 1e308,
            },
            ..RandomSpec::uniform(1, 10)
        };
        assert!(matches!(
            spec.synthesize(),
            Err(SynthplotError::ConfigError(_))
        ));

        let wide = Distribution::Uniform {
            low: -1e300,
            high: 1e300,
        };
        let values = wide.sample_n(&mut StdRng::seed_from_u64(3), 20).unwrap();
        assert!(values.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_random_spec_channels() {
        let mut spec = RandomSpec::uniform(42, 30);
        spec.color = Some(Distribution::unit());
        spec.size = Some(Distribution::Uniform {
            low: 10.0,
            high: 100.0,
        });
        spec.categories = vec!["A".into(), "B".into(), "C".into()];

        let seq = spec.synthesize().unwrap();
        assert_eq!(seq.len(), 30);
        assert_eq!(seq.z.as_ref().map(Vec::len), Some(30));
        assert_eq!(seq.sizes.as_ref().map(Vec::len), Some(30));
        let labels = seq.labels.as_ref().unwrap();
        assert!(labels.iter().all(|l| spec.categories.contains(l)));
    }

    #[test]
    fn test_random_spec_zero_count() {
        assert!(RandomSpec::uniform(1, 0).synthesize().is_err());
    }

    #[test]
    fn test_groups_are_labeled_in_order() {
        let normal = |mean| Distribution::Normal { mean, std_dev: 1.0 };
        let spec = GroupsSpec {
            seed: 0,
            groups: vec![
                GroupSpec {
                    label: "Group 1".into(),
                    count: 10,
                    x: normal(0.0),
                    y: normal(0.0),
                },
                GroupSpec {
                    label: "Group 2".into(),
                    count: 5,
                    x: normal(2.0),
                    y: normal(2.0),
                },
            ],
        };
        let seq = spec.synthesize().unwrap();
        assert_eq!(seq.len(), 15);
        assert_eq!(seq.categories(), vec!["Group 1", "Group 2"]);
    }

    #[test]
    fn test_sample_series_labels() {
        let spec = SampleSpec {
            seed: 3,
            count: 4,
            distribution: Distribution::Normal {
                mean: 0.0,
                std_dev: 1.0,
            },
            series: 3,
        };
        let seq = spec.synthesize().unwrap();
        assert_eq!(seq.len(), 12);
        assert_eq!(seq.x[5], 1.0);
        assert_eq!(seq.categories(), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_noise_is_seeded() {
        let noise = Noise {
            seed: 9,
            std_dev: 0.1,
        };
        let mut a = vec![0.0; 20];
        let mut b = vec![0.0; 20];
        noise.apply(&mut a).unwrap();
        noise.apply(&mut b).unwrap();
        assert_eq!(a, b);
        assert!(a.iter().any(|v| *v != 0.0));
    }
}
