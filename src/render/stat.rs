//! Derived geometry and statistics computed while composing a panel

use crate::data::{linspace, Grid};
use crate::plot::{Orientation, StepPosition};
use crate::{Result, SynthplotError};

/// Five-number summary with whiskers and outliers
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Lowest value within `q1 - k*IQR`
    pub lower: f64,
    /// Highest value within `q3 + k*IQR`
    pub upper: f64,
    pub outliers: Vec<f64>,
}

/// One pie wedge, angles in degrees counter-clockwise from 3 o'clock
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wedge {
    pub start: f64,
    pub end: f64,
    pub fraction: f64,
}

impl Wedge {
    pub fn mid_angle(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

/// Drawable primitives of one panel
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Points {
        x: Vec<f64>,
        y: Vec<f64>,
        /// Third channel, used for continuous color
        z: Option<Vec<f64>>,
        sizes: Option<Vec<f64>>,
        labels: Option<Vec<String>>,
        /// Radius in points when there is no size channel
        marker_size: f64,
        opacity: f64,
    },
    Path {
        x: Vec<f64>,
        y: Vec<f64>,
        width: f64,
    },
    Band {
        x: Vec<f64>,
        upper: Vec<f64>,
        lower: Vec<f64>,
        opacity: f64,
    },
    Bars {
        labels: Vec<String>,
        values: Vec<f64>,
        width: f64,
        orientation: Orientation,
    },
    Bins {
        edges: Vec<f64>,
        counts: Vec<usize>,
    },
    Boxes {
        labels: Vec<String>,
        stats: Vec<BoxStats>,
        show_outliers: bool,
    },
    Wedges {
        labels: Vec<String>,
        values: Vec<f64>,
        wedges: Vec<Wedge>,
        show_percent: bool,
    },
    Surface {
        grid: Grid,
        yaw: f64,
        pitch: f64,
    },
}

impl Geometry {
    /// Values driving a continuous color scale, one per colored item
    pub fn color_values(&self) -> Vec<f64> {
        match self {
            Geometry::Points { y, z, .. } => z.clone().unwrap_or_else(|| y.clone()),
            Geometry::Path { y, .. } => y.clone(),
            Geometry::Band { upper, .. } => upper.clone(),
            Geometry::Bars { values, .. } | Geometry::Wedges { values, .. } => values.clone(),
            Geometry::Bins { counts, .. } => counts.iter().map(|&c| c as f64).collect(),
            Geometry::Boxes { stats, .. } => stats.iter().map(|s| s.median).collect(),
            Geometry::Surface { grid, .. } => surface_cell_means(grid),
        }
    }

    /// Domain a continuous scale spans when none is given
    pub fn value_domain(&self) -> Option<(f64, f64)> {
        match self {
            Geometry::Surface { grid, .. } => grid.value_range(),
            other => crate::data::finite_range(other.color_values()),
        }
    }

    /// Category names and the category index of every item
    pub fn categories(&self) -> Option<(Vec<String>, Vec<usize>)> {
        match self {
            Geometry::Points {
                labels: Some(labels),
                ..
            } => {
                let mut names: Vec<String> = Vec::new();
                let index = labels
                    .iter()
                    .map(|label| match names.iter().position(|n| n == label) {
                        Some(i) => i,
                        None => {
                            names.push(label.clone());
                            names.len() - 1
                        }
                    })
                    .collect();
                Some((names, index))
            }
            Geometry::Bars { labels, .. }
            | Geometry::Boxes { labels, .. }
            | Geometry::Wedges { labels, .. } => {
                Some((labels.clone(), (0..labels.len()).collect()))
            }
            _ => None,
        }
    }
}

/// Mean of the four corners of every grid cell, row-major over `(j, i)`
pub fn surface_cell_means(grid: &Grid) -> Vec<f64> {
    let (nx, ny) = grid.shape();
    let mut means = Vec::with_capacity(nx.saturating_sub(1) * ny.saturating_sub(1));
    for j in 0..ny.saturating_sub(1) {
        for i in 0..nx.saturating_sub(1) {
            let z = &grid.z;
            means.push((z[j][i] + z[j][i + 1] + z[j + 1][i] + z[j + 1][i + 1]) / 4.0);
        }
    }
    means
}

/// Equal-width histogram over the finite values.
///
/// The last bin is closed on the right. A constant sample gets a unit-wide
/// range centered on the value.
pub fn histogram(values: &[f64], bins: usize) -> Result<(Vec<f64>, Vec<usize>)> {
    if bins == 0 {
        return Err(SynthplotError::ConfigError(
            "Histogram bin count must be positive".to_string(),
        ));
    }
    let (lo, hi) = match crate::data::finite_range(values.iter().copied()) {
        Some((lo, hi)) if hi > lo => (lo, hi),
        Some((v, _)) => (v - 0.5, v + 0.5),
        None => (0.0, 1.0),
    };
    let edges = linspace(lo, hi, bins + 1);
    let mut counts = vec![0usize; bins];
    for v in values.iter().filter(|v| v.is_finite()) {
        let idx = (((v - lo) / (hi - lo)) * bins as f64).floor() as usize;
        counts[idx.min(bins - 1)] += 1;
    }
    Ok((edges, counts))
}

/// Quantile of sorted data with linear interpolation between order statistics
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let pos = q.clamp(0.0, 1.0) * (n - 1) as f64;
            let lo = pos.floor() as usize;
            let hi = pos.ceil() as usize;
            sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
        }
    }
}

/// Box-plot summary with whiskers reaching `whisker * IQR` past the quartiles
pub fn box_summary(values: &[f64], whisker: f64) -> Result<BoxStats> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return Err(SynthplotError::ConfigError(
            "Box plot group has no finite values".to_string(),
        ));
    }
    sorted.sort_by(|a, b| a.total_cmp(b));

    let q1 = quantile(&sorted, 0.25);
    let median = quantile(&sorted, 0.5);
    let q3 = quantile(&sorted, 0.75);
    let reach = whisker * (q3 - q1);
    let (low_fence, high_fence) = (q1 - reach, q3 + reach);

    let inside = || sorted.iter().copied().filter(|v| *v >= low_fence && *v <= high_fence);
    let lower = inside().fold(f64::INFINITY, f64::min);
    let upper = inside().fold(f64::NEG_INFINITY, f64::max);
    let outliers = sorted
        .iter()
        .copied()
        .filter(|v| *v < low_fence || *v > high_fence)
        .collect();

    Ok(BoxStats {
        q1,
        median,
        q3,
        lower,
        upper,
        outliers,
    })
}

/// Wedges proportional to `values`, laid out counter-clockwise from `start_angle`
pub fn pie_wedges(values: &[f64], start_angle: f64) -> Result<Vec<Wedge>> {
    if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
        return Err(SynthplotError::ConfigError(
            "Pie values must be finite and non-negative".to_string(),
        ));
    }
    let total: f64 = values.iter().sum();
    if total <= 0.0 {
        return Err(SynthplotError::ConfigError(
            "Pie values must have a positive sum".to_string(),
        ));
    }

    let mut angle = start_angle;
    Ok(values
        .iter()
        .map(|v| {
            let fraction = v / total;
            let start = angle;
            angle += fraction * 360.0;
            Wedge {
                start,
                end: angle,
                fraction,
            }
        })
        .collect())
}

/// Expand samples into the vertices of a piecewise-constant path
pub fn step_path(x: &[f64], y: &[f64], position: StepPosition) -> (Vec<f64>, Vec<f64>) {
    let n = x.len().min(y.len());
    if n < 2 {
        return (x[..n].to_vec(), y[..n].to_vec());
    }
    let mut xs = Vec::with_capacity(2 * n);
    let mut ys = Vec::with_capacity(2 * n);
    xs.push(x[0]);
    ys.push(y[0]);
    for i in 1..n {
        let riser = match position {
            StepPosition::Pre => x[i - 1],
            StepPosition::Post => x[i],
            StepPosition::Mid => (x[i - 1] + x[i]) / 2.0,
        };
        let (before, after) = match position {
            StepPosition::Pre => (y[i], y[i]),
            StepPosition::Post | StepPosition::Mid => (y[i - 1], y[i]),
        };
        xs.push(riser);
        ys.push(before);
        xs.push(riser);
        ys.push(after);
        xs.push(x[i]);
        ys.push(y[i]);
    }
    dedup_vertices(xs, ys)
}

fn dedup_vertices(xs: Vec<f64>, ys: Vec<f64>) -> (Vec<f64>, Vec<f64>) {
    let mut out_x: Vec<f64> = Vec::with_capacity(xs.len());
    let mut out_y: Vec<f64> = Vec::with_capacity(ys.len());
    for (x, y) in xs.into_iter().zip(ys) {
        if out_x.last() == Some(&x) && out_y.last() == Some(&y) {
            continue;
        }
        out_x.push(x);
        out_y.push(y);
    }
    (out_x, out_y)
}

/// Axis range with a 5% margin; constant or empty ranges widen to one unit
pub fn pad_range(range: Option<(f64, f64)>) -> (f64, f64) {
    match range {
        Some((lo, hi)) if hi > lo => {
            let margin = (hi - lo) * 0.05;
            (lo - margin, hi + margin)
        }
        Some((v, _)) => (v - 0.5, v + 0.5),
        None => (0.0, 1.0),
    }
}

/// Short tick label: integers without a fractional part
pub fn format_tick(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_counts_everything() {
        let values: Vec<f64> = (0..100).map(|i| i as f64).collect();
        let (edges, counts) = histogram(&values, 10).unwrap();
        assert_eq!(edges.len(), 11);
        assert_eq!(edges[0], 0.0);
        assert_eq!(edges[10], 99.0);
        assert_eq!(counts.iter().sum::<usize>(), 100);
        // Max value lands in the closed last bin
        assert_eq!(counts[9], 10);
    }

    #[test]
    fn test_histogram_constant_and_empty() {
        let (edges, counts) = histogram(&[2.0, 2.0, 2.0], 4).unwrap();
        assert_eq!(edges[0], 1.5);
        assert_eq!(edges[4], 2.5);
        assert_eq!(counts.iter().sum::<usize>(), 3);

        let (_, counts) = histogram(&[], 3).unwrap();
        assert_eq!(counts, vec![0, 0, 0]);
        assert!(histogram(&[1.0], 0).is_err());
    }

    #[test]
    fn test_quantile_interpolates() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&sorted, 0.5), 2.5);
        assert_eq!(quantile(&sorted, 0.25), 1.75);
        assert_eq!(quantile(&sorted, 1.0), 4.0);
    }

    #[test]
    fn test_box_summary_outliers() {
        let mut values: Vec<f64> = (1..=9).map(|v| v as f64).collect();
        values.push(100.0);
        let stats = box_summary(&values, 1.5).unwrap();
        assert_eq!(stats.median, 5.5);
        assert_eq!(stats.outliers, vec![100.0]);
        assert_eq!(stats.lower, 1.0);
        assert_eq!(stats.upper, 9.0);
        assert!(box_summary(&[f64::NAN], 1.5).is_err());
    }

    #[test]
    fn test_pie_wedges() {
        let wedges = pie_wedges(&[1.0, 1.0, 2.0], 90.0).unwrap();
        assert_eq!(wedges.len(), 3);
        assert_eq!(wedges[0].start, 90.0);
        assert_eq!(wedges[0].end, 180.0);
        assert_eq!(wedges[2].fraction, 0.5);
        assert_eq!(wedges[2].end, 450.0);

        assert!(pie_wedges(&[0.0, 0.0], 0.0).is_err());
        assert!(pie_wedges(&[1.0, -1.0], 0.0).is_err());
    }

    #[test]
    fn test_step_positions() {
        let x = [0.0, 1.0, 2.0];
        let y = [1.0, 3.0, 2.0];

        let (px, py) = step_path(&x, &y, StepPosition::Post);
        assert_eq!(px, vec![0.0, 1.0, 1.0, 2.0, 2.0]);
        assert_eq!(py, vec![1.0, 1.0, 3.0, 3.0, 2.0]);

        let (px, py) = step_path(&x, &y, StepPosition::Pre);
        assert_eq!(px, vec![0.0, 0.0, 1.0, 1.0, 2.0]);
        assert_eq!(py, vec![1.0, 3.0, 3.0, 2.0, 2.0]);

        let (px, _) = step_path(&x, &y, StepPosition::Mid);
        assert_eq!(px, vec![0.0, 0.5, 0.5, 1.0, 1.5, 1.5, 2.0]);
    }

    #[test]
    fn test_pad_range() {
        assert_eq!(pad_range(Some((0.0, 10.0))), (-0.5, 10.5));
        assert_eq!(pad_range(Some((3.0, 3.0))), (2.5, 3.5));
        assert_eq!(pad_range(None), (0.0, 1.0));
    }

    #[test]
    fn test_surface_cell_means() {
        let grid = Grid {
            x: vec![0.0, 1.0, 2.0],
            y: vec![0.0, 1.0],
            z: vec![vec![0.0, 1.0, 2.0], vec![1.0, 2.0, 3.0]],
        };
        assert_eq!(surface_cell_means(&grid), vec![1.0, 2.0]);
    }

    #[test]
    fn test_point_categories_first_seen_order() {
        let geometry = Geometry::Points {
            x: vec![0.0; 4],
            y: vec![0.0; 4],
            z: None,
            sizes: None,
            labels: Some(vec!["b".into(), "a".into(), "b".into(), "c".into()]),
            marker_size: 5.0,
            opacity: 1.0,
        };
        let (names, index) = geometry.categories().unwrap();
        assert_eq!(names, vec!["b", "a", "c"]);
        assert_eq!(index, vec![0, 1, 0, 2]);
    }
}
