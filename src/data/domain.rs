//! Sampling domains and regular grids

use serde::{Deserialize, Serialize};

use crate::{Result, SynthplotError};

/// A closed interval sampled at `count` evenly spaced points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

impl Domain {
    /// Create a validated domain
    pub fn new(lower: f64, upper: f64, count: usize) -> Result<Self> {
        let domain = Self {
            lower,
            upper,
            count,
        };
        domain.validate()?;
        Ok(domain)
    }

    /// Check the sample count and bounds.
    ///
    /// A single-sample domain only needs finite bounds; every other domain
    /// needs `lower < upper`.
    pub fn validate(&self) -> Result<()> {
        if self.count == 0 {
            return Err(SynthplotError::ConfigError(
                "Sample count must be positive".to_string(),
            ));
        }
        if !self.lower.is_finite() || !self.upper.is_finite() {
            return Err(SynthplotError::ConfigError(format!(
                "Domain bounds must be finite, got [{}, {}]",
                self.lower, self.upper
            )));
        }
        if self.count > 1 && self.lower >= self.upper {
            return Err(SynthplotError::ConfigError(format!(
                "Domain lower bound must be below upper bound, got [{}, {}]",
                self.lower, self.upper
            )));
        }
        Ok(())
    }

    /// Evenly spaced sample points over the domain
    pub fn samples(&self) -> Vec<f64> {
        linspace(self.lower, self.upper, self.count)
    }
}

/// `count` evenly spaced values from `lower` to `upper` inclusive.
///
/// A count of 1 yields `[lower]`, a count of 0 yields an empty vector.
pub fn linspace(lower: f64, upper: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![lower],
        _ => {
            // Weighted endpoints stay finite where `upper - lower` would overflow
            let last = (count - 1) as f64;
            let mut values: Vec<f64> = (0..count)
                .map(|i| {
                    let t = i as f64 / last;
                    lower * (1.0 - t) + upper * t
                })
                .collect();
            // Accumulated rounding must not move the endpoint
            values[count - 1] = upper;
            values
        }
    }
}

/// Coordinate matrices for a 2D grid, `xy` indexed.
///
/// Row `j` of both matrices corresponds to `ys[j]`, column `i` to `xs[i]`.
pub fn meshgrid(xs: &[f64], ys: &[f64]) -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
    let xx = ys.iter().map(|_| xs.to_vec()).collect();
    let yy = ys.iter().map(|&y| vec![y; xs.len()]).collect();
    (xx, yy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_linspace_endpoints() {
        let values = linspace(-5.0, 5.0, 11);
        assert_eq!(values.len(), 11);
        assert_eq!(values[0], -5.0);
        assert_eq!(values[5], 0.0);
        assert_eq!(values[10], 5.0);
    }

    #[test]
    fn test_linspace_single_and_empty() {
        assert_eq!(linspace(2.0, 3.0, 1), vec![2.0]);
        assert!(linspace(2.0, 3.0, 0).is_empty());
    }

    #[test]
    fn test_domain_rejects_invalid() {
        assert!(Domain::new(0.0, 1.0, 0).is_err());
        assert!(Domain::new(1.0, 0.0, 10).is_err());
        assert!(Domain::new(1.0, 1.0, 10).is_err());
        assert!(Domain::new(f64::NAN, 1.0, 10).is_err());
        assert!(Domain::new(1.0, 1.0, 1).is_ok());
    }

    #[test]
    fn test_linspace_spans_whole_f64_range() {
        let values = Domain::new(-1e308, 1e308, 5).unwrap().samples();
        assert_eq!(values[0], -1e308);
        assert_eq!(values[2], 0.0);
        assert_eq!(values[4], 1e308);
        assert!(values.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_meshgrid_shape() {
        let (xx, yy) = meshgrid(&[1.0, 2.0, 3.0], &[10.0, 20.0]);
        assert_eq!(xx.len(), 2);
        assert_eq!(xx[0], vec![1.0, 2.0, 3.0]);
        assert_eq!(yy[1], vec![20.0, 20.0, 20.0]);
    }

    proptest! {
        #[test]
        fn prop_linspace_count_and_bounds(
            lower in -1e6f64..1e6,
            width in 1e-3f64..1e6,
            count in 2usize..2000,
        ) {
            let upper = lower + width;
            let values = linspace(lower, upper, count);
            prop_assert_eq!(values.len(), count);
            prop_assert_eq!(values[0], lower);
            prop_assert_eq!(values[count - 1], upper);
        }

        #[test]
        fn prop_linspace_finite_at_extremes(
            lower in -f64::MAX..-1e300,
            upper in 1e300..f64::MAX,
            count in 2usize..200,
        ) {
            let values = linspace(lower, upper, count);
            prop_assert_eq!(values[0], lower);
            prop_assert_eq!(values[count - 1], upper);
            prop_assert!(values.iter().all(|v| v.is_finite()));
            prop_assert!(values.windows(2).all(|w| w[0] <= w[1]));
        }

        #[test]
        fn prop_meshgrid_is_reproducible(nx in 1usize..60, ny in 1usize..60) {
            let xs = linspace(-1.0, 1.0, nx);
            let ys = linspace(0.0, 3.0, ny);
            let first = meshgrid(&xs, &ys);
            let second = meshgrid(&linspace(-1.0, 1.0, nx), &linspace(0.0, 3.0, ny));
            let cells: usize = first.0.iter().map(|row| row.len()).sum();
            prop_assert_eq!(cells, nx * ny);
            prop_assert_eq!(first, second);
        }
    }
}
