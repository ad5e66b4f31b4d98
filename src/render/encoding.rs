//! Resolution of a panel's color mapping into concrete colors

use super::stat::Geometry;
use crate::plot::scale::palettes::{self, Rgb};
use crate::plot::scale::{categorical_colors, ColorMapping, ContinuousScale};
use crate::plot::{ChartKind, ChartSpec, RenderConfig};
use crate::Result;

/// Palette used for continuous mappings left on `auto`
const AUTO_CONTINUOUS: &str = "viridis";

/// Fill color of a panel's items
#[derive(Debug, Clone, PartialEq)]
pub enum Fill {
    Uniform(Rgb),
    PerItem(Vec<Rgb>),
}

impl Fill {
    /// Color of item `i`; short color lists repeat their last entry
    pub fn color(&self, i: usize) -> Rgb {
        match self {
            Fill::Uniform(c) => *c,
            Fill::PerItem(colors) => colors
                .get(i)
                .or_else(|| colors.last())
                .copied()
                .unwrap_or_else(|| Rgb::new(0, 0, 0)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Colorbar {
    pub scale: ContinuousScale,
    pub label: Option<String>,
}

/// Concrete visual encoding of one panel
#[derive(Debug, Clone, PartialEq)]
pub struct Encoding {
    pub fill: Fill,
    pub colorbar: Option<Colorbar>,
    /// Per-point marker radius in points
    pub sizes: Option<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: Rgb,
}

/// Resolve the color mapping of `chart` against its geometry.
///
/// `panel` is the panel index; `auto` mappings use it to give every panel
/// its own palette color.
pub fn resolve(
    chart: &ChartSpec,
    geometry: &Geometry,
    panel: usize,
    config: &RenderConfig,
) -> Result<(Encoding, Vec<LegendEntry>)> {
    let (fill, colorbar, mut legend) = match &chart.color {
        ColorMapping::Fixed { color } => {
            let fill = Fill::Uniform(palettes::parse_color(color)?);
            (fill, None, vec![])
        }
        ColorMapping::Categorical { palette } => {
            let (fill, legend) = categorical(geometry, &palettes::resolve_palette(palette)?);
            (fill, None, legend)
        }
        ColorMapping::Continuous {
            palette,
            domain,
            label,
        } => {
            let (fill, bar) = continuous(geometry, palette, *domain, label.clone(), config)?;
            (fill, Some(bar), vec![])
        }
        ColorMapping::Auto => match geometry {
            Geometry::Surface { .. } | Geometry::Points { z: Some(_), labels: None, .. } => {
                let label = match geometry {
                    Geometry::Surface { .. } => chart.labels.z.clone(),
                    _ => None,
                };
                let (fill, bar) = continuous(geometry, AUTO_CONTINUOUS, None, label, config)?;
                (fill, Some(bar), vec![])
            }
            Geometry::Points { labels: Some(_), .. } | Geometry::Wedges { .. } => {
                let palette = default_palette()?;
                let (fill, legend) = categorical(geometry, &palette);
                (fill, None, legend)
            }
            _ => {
                let palette = default_palette()?;
                (Fill::Uniform(palette[panel % palette.len()]), None, vec![])
            }
        },
    };

    if let (Some(label), true) = (&chart.legend, legend.is_empty()) {
        legend.push(LegendEntry {
            label: label.clone(),
            color: fill.color(0),
        });
    }

    let sizes = match (&chart.kind, geometry) {
        (
            ChartKind::Scatter(options),
            Geometry::Points {
                sizes: Some(raw), ..
            },
        ) => Some(marker_radii(raw, options.size_range)),
        _ => None,
    };

    Ok((
        Encoding {
            fill,
            colorbar,
            sizes,
        },
        legend,
    ))
}

fn default_palette() -> Result<Vec<Rgb>> {
    palettes::default_color_palette()
        .iter()
        .map(|c| palettes::parse_color(c))
        .collect()
}

fn categorical(geometry: &Geometry, palette: &[Rgb]) -> (Fill, Vec<LegendEntry>) {
    let Some((names, index)) = geometry.categories() else {
        return (Fill::Uniform(palette[0]), vec![]);
    };
    let colors = categorical_colors(palette, names.len());
    let fill = Fill::PerItem(index.iter().map(|&i| colors[i]).collect());

    let legend = match geometry {
        Geometry::Points { .. } | Geometry::Wedges { .. } => names
            .into_iter()
            .zip(colors)
            .map(|(label, color)| LegendEntry { label, color })
            .collect(),
        _ => vec![],
    };
    (fill, legend)
}

fn continuous(
    geometry: &Geometry,
    palette: &str,
    domain: Option<[f64; 2]>,
    label: Option<String>,
    config: &RenderConfig,
) -> Result<(Fill, Colorbar)> {
    let domain = match domain {
        Some([lo, hi]) => (lo, hi),
        None => geometry.value_domain().unwrap_or((0.0, 0.0)),
    };
    let scale = ContinuousScale::from_palette(palette, domain)?;
    if scale.is_degenerate() {
        super::notice(
            config.quiet,
            &format!(
                "color domain [{}, {}] has zero width; using constant color {}",
                domain.0,
                domain.1,
                palettes::color_to_hex(scale.start())
            ),
        );
    }

    let fill = Fill::PerItem(
        geometry
            .color_values()
            .into_iter()
            .map(|v| scale.map(v))
            .collect(),
    );
    Ok((fill, Colorbar { scale, label }))
}

/// Map a raw size channel linearly onto a radius range
fn marker_radii(raw: &[f64], [min_r, max_r]: [f64; 2]) -> Vec<f64> {
    match crate::data::finite_range(raw.iter().copied()) {
        Some((lo, hi)) if hi > lo => raw
            .iter()
            .map(|v| {
                let t = if v.is_finite() { (v - lo) / (hi - lo) } else { 0.0 };
                min_r + t * (max_r - min_r)
            })
            .collect(),
        _ => vec![(min_r + max_r) / 2.0; raw.len()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Grid;
    use crate::plot::{ChartType, Scatter};

    fn points(z: Option<Vec<f64>>, labels: Option<Vec<String>>) -> Geometry {
        Geometry::Points {
            x: vec![0.0, 1.0, 2.0],
            y: vec![0.0, 5.0, 10.0],
            z,
            sizes: Some(vec![10.0, 55.0, 100.0]),
            labels,
            marker_size: 5.0,
            opacity: 0.8,
        }
    }

    fn scatter(color: ColorMapping) -> ChartSpec {
        ChartSpec::new(ChartKind::Scatter(Scatter::default())).with_color(color)
    }

    #[test]
    fn test_auto_uses_panel_color() {
        let chart = ChartSpec::new(ChartKind::of(ChartType::Line));
        let geometry = Geometry::Path {
            x: vec![0.0, 1.0],
            y: vec![0.0, 1.0],
            width: 2.0,
        };
        let config = RenderConfig::default();
        let (first, _) = resolve(&chart, &geometry, 0, &config).unwrap();
        let (second, _) = resolve(&chart, &geometry, 1, &config).unwrap();
        assert_ne!(first.fill, second.fill);
        assert!(first.colorbar.is_none());
    }

    #[test]
    fn test_continuous_endpoints_and_colorbar() {
        let chart = scatter(ColorMapping::continuous("red->yellow").with_label("value"));
        let (encoding, legend) =
            resolve(&chart, &points(None, None), 0, &RenderConfig::default()).unwrap();
        assert_eq!(encoding.fill.color(0), Rgb::new(255, 0, 0));
        assert_eq!(encoding.fill.color(2), Rgb::new(255, 255, 0));
        let bar = encoding.colorbar.unwrap();
        assert_eq!(bar.scale.domain, (0.0, 10.0));
        assert_eq!(bar.label.as_deref(), Some("value"));
        assert!(legend.is_empty());
    }

    #[test]
    fn test_degenerate_domain_uses_start_color() {
        let chart = scatter(ColorMapping::continuous("red->yellow"));
        let geometry = points(Some(vec![4.0, 4.0, 4.0]), None);
        let (encoding, _) = resolve(&chart, &geometry, 0, &RenderConfig::default()).unwrap();
        for i in 0..3 {
            assert_eq!(encoding.fill.color(i), Rgb::new(255, 0, 0));
        }
    }

    #[test]
    fn test_categorical_points_get_legend() {
        let labels = vec!["A".to_string(), "B".to_string(), "A".to_string()];
        let chart = scatter(ColorMapping::categorical("set1"));
        let (encoding, legend) =
            resolve(&chart, &points(None, Some(labels)), 0, &RenderConfig::default()).unwrap();
        assert_eq!(encoding.fill.color(0), encoding.fill.color(2));
        assert_ne!(encoding.fill.color(0), encoding.fill.color(1));
        assert_eq!(legend.len(), 2);
        assert_eq!(legend[1].label, "B");
    }

    #[test]
    fn test_marker_sizes_span_range() {
        let chart = scatter(ColorMapping::Auto);
        let (encoding, _) =
            resolve(&chart, &points(None, None), 0, &RenderConfig::default()).unwrap();
        assert_eq!(encoding.sizes, Some(vec![3.0, 9.0, 15.0]));
    }

    #[test]
    fn test_auto_surface_is_continuous() {
        let chart = ChartSpec::new(ChartKind::of(ChartType::Surface)).with_z_label("Z");
        let geometry = Geometry::Surface {
            grid: Grid {
                x: vec![0.0, 1.0],
                y: vec![0.0, 1.0],
                z: vec![vec![0.0, 1.0], vec![1.0, 2.0]],
            },
            yaw: 0.8,
            pitch: 0.5,
        };
        let (encoding, _) = resolve(&chart, &geometry, 0, &RenderConfig::default()).unwrap();
        let bar = encoding.colorbar.unwrap();
        assert_eq!(bar.scale.domain, (0.0, 2.0));
        assert_eq!(bar.label.as_deref(), Some("Z"));
    }

    #[test]
    fn test_single_series_legend() {
        let chart = ChartSpec::new(ChartKind::of(ChartType::Line))
            .with_color(ColorMapping::fixed("red"))
            .with_legend("sin(x)");
        let geometry = Geometry::Path {
            x: vec![0.0, 1.0],
            y: vec![0.0, 1.0],
            width: 2.0,
        };
        let (_, legend) = resolve(&chart, &geometry, 0, &RenderConfig::default()).unwrap();
        assert_eq!(
            legend,
            vec![LegendEntry {
                label: "sin(x)".into(),
                color: Rgb::new(255, 0, 0)
            }]
        );
    }

    #[test]
    fn test_unknown_palette_is_error() {
        let chart = scatter(ColorMapping::continuous("nope"));
        assert!(resolve(&chart, &points(None, None), 0, &RenderConfig::default()).is_err());
    }
}
