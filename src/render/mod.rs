//! Figure composition
//!
//! Turns (dataset, chart spec) pairs into a [`Figure`]: panels placed on the
//! grid, derived statistics computed, and every color resolved. A figure is
//! complete once built; the writer only draws it.

mod encoding;
mod stat;

pub use encoding::{Colorbar, Encoding, Fill, LegendEntry};
pub use stat::{
    box_summary, format_tick, histogram, pad_range, pie_wedges, quantile, step_path,
    surface_cell_means, BoxStats, Geometry, Wedge,
};

use tracing::{debug, warn};

use crate::data::{Dataset, Sequence};
use crate::plot::{AxisLabels, ChartKind, ChartSpec, ChartType, DataShape, Layout, RenderConfig};
use crate::{Result, SynthplotError};

/// One populated grid cell
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    pub title: String,
    pub labels: AxisLabels,
    pub chart_type: ChartType,
    pub geometry: Geometry,
    pub encoding: Encoding,
    pub legend: Vec<LegendEntry>,
    pub grid: bool,
    /// Drawn on cartesian axes (false for pie panels)
    pub axes: bool,
}

/// A composed figure ready for export
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub title: Option<String>,
    pub layout: Layout,
    pub cells: Vec<Cell>,
    pub config: RenderConfig,
}

impl Figure {
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.cells.iter().find(|c| c.row == row && c.col == col)
    }
}

/// Log a render-time warning, demoted to debug when `quiet` is set
pub(crate) fn notice(quiet: bool, message: &str) {
    if quiet {
        debug!("{}", message);
    } else {
        warn!("{}", message);
    }
}

/// Compose panels into a figure on `layout`.
///
/// Panels fill the grid row-major from the top-left; cells past the last
/// panel stay blank.
pub fn render(
    panels: Vec<(Dataset, ChartSpec)>,
    layout: Layout,
    title: Option<String>,
    config: RenderConfig,
) -> Result<Figure> {
    config.validate()?;
    let placement = layout.place(panels.len())?;
    if panels.len() < layout.capacity() {
        notice(
            config.quiet,
            &format!(
                "{} of {} grid cells left blank",
                layout.capacity() - panels.len(),
                layout.capacity()
            ),
        );
    }

    let mut cells = Vec::with_capacity(panels.len());
    for (index, ((dataset, chart), (row, col))) in panels.into_iter().zip(placement).enumerate() {
        chart.validate()?;
        let geometry = build_geometry(&dataset, &chart.kind)?;
        let (encoding, legend) = encoding::resolve(&chart, &geometry, index, &config)?;
        debug!(
            panel = index,
            row,
            col,
            chart = %chart.kind,
            "placed panel"
        );

        cells.push(Cell {
            row,
            col,
            title: chart.resolved_title(),
            labels: chart.labels,
            chart_type: chart.kind.chart_type(),
            geometry,
            encoding,
            legend,
            grid: chart.grid,
            axes: chart.kind.as_trait().has_axes(),
        });
    }

    Ok(Figure {
        title,
        layout,
        cells,
        config,
    })
}

fn expect_sequence<'a>(dataset: &'a Dataset, kind: &ChartKind) -> Result<&'a Sequence> {
    dataset.as_sequence().ok_or_else(|| shape_mismatch(dataset, kind))
}

fn shape_mismatch(dataset: &Dataset, kind: &ChartKind) -> SynthplotError {
    SynthplotError::ConfigError(format!(
        "{} chart needs a {} dataset, got a {}",
        kind,
        kind.as_trait().input(),
        dataset.kind_name()
    ))
}

fn category_labels(seq: &Sequence) -> Vec<String> {
    match &seq.labels {
        Some(labels) => labels.clone(),
        None => seq.x.iter().map(|v| format_tick(*v)).collect(),
    }
}

/// Group `y` values by label in first-seen order
fn grouped_values(seq: &Sequence) -> (Vec<String>, Vec<Vec<f64>>) {
    let Some(labels) = &seq.labels else {
        return (vec![String::new()], vec![seq.y.clone()]);
    };
    let names = seq.categories();
    let mut groups = vec![Vec::new(); names.len()];
    for (label, value) in labels.iter().zip(&seq.y) {
        if let Some(i) = names.iter().position(|n| n == label) {
            groups[i].push(*value);
        }
    }
    (names, groups)
}

fn build_geometry(dataset: &Dataset, kind: &ChartKind) -> Result<Geometry> {
    if kind.as_trait().input() == DataShape::Grid {
        let ChartKind::Surface(options) = kind else {
            return Err(shape_mismatch(dataset, kind));
        };
        let grid = dataset
            .as_grid()
            .ok_or_else(|| shape_mismatch(dataset, kind))?;
        if grid.x.len() < 2 || grid.y.len() < 2 {
            return Err(SynthplotError::ConfigError(format!(
                "Surface needs at least 2x2 grid points, got {}",
                dataset.shape()
            )));
        }
        return Ok(Geometry::Surface {
            grid: grid.clone(),
            yaw: options.yaw,
            pitch: options.pitch,
        });
    }

    let seq = expect_sequence(dataset, kind)?;
    let geometry = match kind {
        ChartKind::Scatter(options) => Geometry::Points {
            x: seq.x.clone(),
            y: seq.y.clone(),
            z: seq.z.clone(),
            sizes: seq.sizes.clone(),
            labels: seq.labels.clone(),
            marker_size: options.marker_size,
            opacity: options.opacity,
        },
        ChartKind::Line(options) => Geometry::Path {
            x: seq.x.clone(),
            y: seq.y.clone(),
            width: options.line_width,
        },
        ChartKind::Step(options) => {
            let (x, y) = step_path(&seq.x, &seq.y, options.position);
            Geometry::Path {
                x,
                y,
                width: options.line_width,
            }
        }
        ChartKind::Area(options) => Geometry::Band {
            x: seq.x.clone(),
            upper: seq.y.clone(),
            lower: seq.z.clone().unwrap_or_else(|| vec![0.0; seq.len()]),
            opacity: options.opacity,
        },
        ChartKind::Bar(options) => Geometry::Bars {
            labels: category_labels(seq),
            values: seq.y.clone(),
            width: options.width,
            orientation: options.orientation,
        },
        ChartKind::Histogram(options) => {
            let (edges, counts) = histogram(&seq.y, options.bins)?;
            Geometry::Bins { edges, counts }
        }
        ChartKind::BoxPlot(options) => {
            let (labels, groups) = grouped_values(seq);
            let stats = groups
                .iter()
                .map(|values| box_summary(values, options.whisker))
                .collect::<Result<Vec<_>>>()?;
            Geometry::Boxes {
                labels,
                stats,
                show_outliers: options.show_outliers,
            }
        }
        ChartKind::Pie(options) => Geometry::Wedges {
            labels: category_labels(seq),
            values: seq.y.clone(),
            wedges: pie_wedges(&seq.y, options.start_angle)?,
            show_percent: options.show_percent,
        },
        ChartKind::Surface(_) => return Err(shape_mismatch(dataset, kind)),
    };
    Ok(geometry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Distribution, Domain, Formula, LiteralSpec, SampleSpec, Synthesis};
    use crate::plot::{ColorMapping, Histogram};

    fn line_panel(freq: f64) -> (Dataset, ChartSpec) {
        let data = Synthesis::formula(Domain::new(0.0, 1.0, 50).unwrap(), Formula::sine(freq))
            .synthesize()
            .unwrap();
        (data, ChartSpec::new(ChartKind::of(ChartType::Line)))
    }

    #[test]
    fn test_render_places_row_major() {
        let panels = (1..=5).map(|f| line_panel(f as f64)).collect();
        let figure = render(
            panels,
            Layout::new(2, 3).unwrap(),
            Some("Waves".into()),
            RenderConfig::default(),
        )
        .unwrap();
        assert_eq!(figure.cells.len(), 5);
        assert!(figure.cell(1, 1).is_some());
        assert!(figure.cell(1, 2).is_none());
        // Every populated cell has a title and a determinate color
        for cell in &figure.cells {
            assert_eq!(cell.title, "line");
            assert!(matches!(cell.encoding.fill, Fill::Uniform(_)));
        }
    }

    #[test]
    fn test_overfull_grid_is_config_error() {
        let panels = vec![line_panel(1.0), line_panel(2.0)];
        let err = render(panels, Layout::default(), None, RenderConfig::default()).unwrap_err();
        assert!(matches!(err, SynthplotError::ConfigError(_)));
    }

    #[test]
    fn test_surface_requires_grid() {
        let (data, _) = line_panel(1.0);
        let chart = ChartSpec::new(ChartKind::of(ChartType::Surface));
        let err = render(vec![(data, chart)], Layout::default(), None, RenderConfig::default())
            .unwrap_err();
        assert!(err.to_string().contains("grid"));
    }

    #[test]
    fn test_histogram_and_box_geometry() {
        let data = Synthesis::Sample(SampleSpec {
            seed: 1,
            count: 200,
            distribution: Distribution::Normal {
                mean: 0.0,
                std_dev: 1.0,
            },
            series: 3,
        })
        .synthesize()
        .unwrap();

        let hist = ChartSpec::new(ChartKind::Histogram(Histogram { bins: 20 }));
        let boxes = ChartSpec::new(ChartKind::of(ChartType::Box));
        let figure = render(
            vec![(data.clone(), hist), (data, boxes)],
            Layout::new(1, 2).unwrap(),
            None,
            RenderConfig::default(),
        )
        .unwrap();

        match &figure.cells[0].geometry {
            Geometry::Bins { counts, .. } => {
                assert_eq!(counts.len(), 20);
                assert_eq!(counts.iter().sum::<usize>(), 600);
            }
            other => panic!("unexpected geometry {:?}", other),
        }
        match &figure.cells[1].geometry {
            Geometry::Boxes { labels, stats, .. } => {
                assert_eq!(labels, &vec!["1", "2", "3"]);
                assert_eq!(stats.len(), 3);
            }
            other => panic!("unexpected geometry {:?}", other),
        }
    }

    #[test]
    fn test_pie_with_zero_total_fails() {
        let data = Synthesis::Literal(LiteralSpec::new([("a", 0.0), ("b", 0.0)]))
            .synthesize()
            .unwrap();
        let chart = ChartSpec::new(ChartKind::of(ChartType::Pie));
        assert!(render(vec![(data, chart)], Layout::default(), None, RenderConfig::default())
            .is_err());
    }

    #[test]
    fn test_pie_auto_colors_are_categorical() {
        let data = Synthesis::Literal(LiteralSpec::new([("a", 1.0), ("b", 2.0), ("c", 3.0)]))
            .synthesize()
            .unwrap();
        let chart = ChartSpec::new(ChartKind::of(ChartType::Pie));
        let figure =
            render(vec![(data, chart)], Layout::default(), None, RenderConfig::default()).unwrap();
        assert_eq!(figure.cells[0].legend.len(), 3);
        assert!(!figure.cells[0].axes);
    }

    #[test]
    fn test_axes_flag_follows_chart_kind() {
        let panels = vec![line_panel(1.0), line_panel(2.0)];
        let figure = render(panels, Layout::new(1, 2).unwrap(), None, RenderConfig::default())
            .unwrap();
        assert!(figure.cells.iter().all(|c| c.axes));
    }

    #[test]
    fn test_invalid_palette_surfaces_during_render() {
        let (data, chart) = line_panel(1.0);
        let chart = chart.with_color(ColorMapping::categorical("missing"));
        assert!(render(vec![(data, chart)], Layout::default(), None, RenderConfig::default())
            .is_err());
    }
}
