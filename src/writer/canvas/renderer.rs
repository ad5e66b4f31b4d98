//! Figure drawing on any plotters backend

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::data::finite_range;
use crate::plot::scale::palettes::interpolate_colors;
use crate::plot::scale::{parse_color, Rgb};
use crate::plot::{Orientation, RenderConfig};
use crate::render::{pad_range, BoxStats, Cell, Colorbar, Figure, Fill, Geometry, LegendEntry};
use crate::{Result, SynthplotError};

type Area<DB> = DrawingArea<DB, Shift>;

/// Share of a panel's width given to the plot when a colorbar is present
const PLOT_SHARE: f64 = 0.85;
/// Colorbar resolution
const COLORBAR_STEPS: usize = 128;

pub(crate) fn render_err<E: std::fmt::Display>(e: E) -> SynthplotError {
    SynthplotError::RenderError(e.to_string())
}

fn rgb(color: Rgb) -> RGBColor {
    RGBColor(color.red, color.green, color.blue)
}

fn font(cfg: &RenderConfig, points: f64) -> TextStyle<'_> {
    (cfg.font_family.as_str(), cfg.font_px(points))
        .into_font()
        .color(&BLACK)
}

fn centered(style: TextStyle<'_>) -> TextStyle<'_> {
    style.pos(Pos::new(HPos::Center, VPos::Center))
}

/// Draw a whole figure: background, figure title, then every populated cell
pub fn draw_figure<DB: DrawingBackend>(root: &Area<DB>, figure: &Figure) -> Result<()> {
    let cfg = &figure.config;
    let background = rgb(parse_color(&cfg.background)?);
    root.fill(&background).map_err(render_err)?;

    let body = match figure.title.as_deref() {
        Some(title) if !title.is_empty() => {
            root.titled(title, font(cfg, 16.0)).map_err(render_err)?
        }
        _ => root.clone(),
    };

    let panels = body.split_evenly((figure.layout.rows, figure.layout.cols));
    for cell in &figure.cells {
        let area = panels
            .get(cell.row * figure.layout.cols + cell.col)
            .ok_or_else(|| {
                SynthplotError::RenderError(format!(
                    "Cell ({}, {}) is outside the {} grid",
                    cell.row, cell.col, figure.layout
                ))
            })?;
        draw_cell(area, cell, cfg)?;
    }

    root.present().map_err(render_err)
}

fn draw_cell<DB: DrawingBackend>(area: &Area<DB>, cell: &Cell, cfg: &RenderConfig) -> Result<()> {
    let plot_area = match &cell.encoding.colorbar {
        Some(bar) => {
            let (width, _) = area.dim_in_pixel();
            let split = (width as f64 * PLOT_SHARE).round() as i32;
            let (left, right) = area.split_horizontally(split);
            draw_colorbar(&right, bar, cfg)?;
            left
        }
        None => area.clone(),
    };

    if !cell.axes {
        return draw_pie(&plot_area, cell, cfg);
    }
    match &cell.geometry {
        Geometry::Surface { .. } => draw_surface(&plot_area, cell, cfg),
        _ => draw_cartesian(&plot_area, cell, cfg),
    }
}

/// Label for an index-positioned category tick; blank between categories
fn category_at(labels: &[String], value: f64) -> String {
    let nearest = value.round();
    if (value - nearest).abs() > 1e-6 || nearest < 0.0 {
        return String::new();
    }
    labels.get(nearest as usize).cloned().unwrap_or_default()
}

/// Value range for bars anchored at zero
fn bar_range(values: impl IntoIterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = finite_range(values).unwrap_or((0.0, 1.0));
    let (padded_lo, padded_hi) = pad_range(Some((lo.min(0.0), hi.max(0.0))));
    (
        if lo >= 0.0 { 0.0 } else { padded_lo },
        if hi <= 0.0 { 0.0 } else { padded_hi },
    )
}

fn category_range(n: usize) -> (f64, f64) {
    (-0.5, n.max(1) as f64 - 0.5)
}

fn box_extent(stats: &[BoxStats]) -> Option<(f64, f64)> {
    finite_range(stats.iter().flat_map(|s| {
        [s.lower, s.upper, s.q1, s.q3]
            .into_iter()
            .chain(s.outliers.iter().copied())
    }))
}

/// Data ranges of the x and y axes
fn cartesian_ranges(geometry: &Geometry) -> ((f64, f64), (f64, f64)) {
    match geometry {
        Geometry::Points { x, y, .. } | Geometry::Path { x, y, .. } => (
            pad_range(finite_range(x.iter().copied())),
            pad_range(finite_range(y.iter().copied())),
        ),
        Geometry::Band { x, upper, lower, .. } => (
            pad_range(finite_range(x.iter().copied())),
            pad_range(finite_range(upper.iter().chain(lower).copied())),
        ),
        Geometry::Bars {
            labels,
            values,
            orientation,
            ..
        } => {
            let categories = category_range(labels.len());
            let values = bar_range(values.iter().copied());
            match orientation {
                Orientation::Vertical => (categories, values),
                Orientation::Horizontal => (values, categories),
            }
        }
        Geometry::Bins { edges, counts } => (
            pad_range(finite_range(edges.iter().copied())),
            bar_range(counts.iter().map(|&c| c as f64)),
        ),
        Geometry::Boxes { labels, stats, .. } => {
            (category_range(labels.len()), pad_range(box_extent(stats)))
        }
        Geometry::Wedges { .. } | Geometry::Surface { .. } => ((0.0, 1.0), (0.0, 1.0)),
    }
}

fn draw_cartesian<DB: DrawingBackend>(
    area: &Area<DB>,
    cell: &Cell,
    cfg: &RenderConfig,
) -> Result<()> {
    let ((x0, x1), (y0, y1)) = cartesian_ranges(&cell.geometry);

    let mut builder = ChartBuilder::on(area);
    builder
        .margin(cfg.scale_px(6.0))
        .x_label_area_size(cfg.scale_px(26.0))
        .y_label_area_size(cfg.scale_px(38.0));
    if !cell.title.is_empty() {
        builder.caption(&cell.title, font(cfg, 12.0));
    }
    let mut chart = builder
        .build_cartesian_2d(x0..x1, y0..y1)
        .map_err(render_err)?;

    // Category names replace index ticks on bar and box axes
    let (x_categories, y_categories): (Option<&[String]>, Option<&[String]>) =
        match &cell.geometry {
            Geometry::Bars {
                labels,
                orientation: Orientation::Vertical,
                ..
            }
            | Geometry::Boxes { labels, .. } => (Some(labels), None),
            Geometry::Bars {
                labels,
                orientation: Orientation::Horizontal,
                ..
            } => (None, Some(labels)),
            _ => (None, None),
        };
    let x_fmt = |v: &f64| x_categories.map_or_else(|| format!("{}", v), |l| category_at(l, *v));
    let y_fmt = |v: &f64| y_categories.map_or_else(|| format!("{}", v), |l| category_at(l, *v));

    let mut mesh = chart.configure_mesh();
    mesh.x_desc(cell.labels.x.as_str())
        .y_desc(cell.labels.y.as_str())
        .label_style(font(cfg, 9.0))
        .axis_desc_style(font(cfg, 10.0))
        .light_line_style(BLACK.mix(0.04))
        .bold_line_style(BLACK.mix(0.12));
    if let Some(labels) = x_categories {
        mesh.x_labels(labels.len().min(24)).x_label_formatter(&x_fmt);
    }
    if let Some(labels) = y_categories {
        mesh.y_labels(labels.len().min(24)).y_label_formatter(&y_fmt);
    }
    if !cell.grid {
        mesh.disable_mesh();
    }
    mesh.draw().map_err(render_err)?;

    let fill = &cell.encoding.fill;
    match &cell.geometry {
        Geometry::Points {
            x,
            y,
            marker_size,
            opacity,
            ..
        } => {
            let sizes = cell.encoding.sizes.as_deref();
            chart
                .draw_series(x.iter().zip(y).enumerate().map(|(i, (&px, &py))| {
                    let radius = sizes.and_then(|s| s.get(i)).copied().unwrap_or(*marker_size);
                    Circle::new(
                        (px, py),
                        cfg.scale_px(radius),
                        rgb(fill.color(i)).mix(*opacity).filled(),
                    )
                }))
                .map_err(render_err)?;
        }
        Geometry::Path { x, y, width } => {
            let stroke = cfg.scale_px(*width);
            match fill {
                Fill::Uniform(color) => {
                    chart
                        .draw_series(LineSeries::new(
                            x.iter().copied().zip(y.iter().copied()),
                            rgb(*color).stroke_width(stroke),
                        ))
                        .map_err(render_err)?;
                }
                Fill::PerItem(_) => {
                    chart
                        .draw_series((1..x.len().min(y.len())).map(|i| {
                            PathElement::new(
                                vec![(x[i - 1], y[i - 1]), (x[i], y[i])],
                                rgb(fill.color(i - 1)).stroke_width(stroke),
                            )
                        }))
                        .map_err(render_err)?;
                }
            }
        }
        Geometry::Band {
            x,
            upper,
            lower,
            opacity,
        } => {
            let n = x.len().min(upper.len()).min(lower.len());
            match fill {
                Fill::Uniform(color) => {
                    let outline: Vec<(f64, f64)> =
                        (0..n).map(|i| (x[i], upper[i])).collect();
                    let mut polygon = outline.clone();
                    polygon.extend((0..n).rev().map(|i| (x[i], lower[i])));
                    chart
                        .draw_series(std::iter::once(Polygon::new(
                            polygon,
                            rgb(*color).mix(*opacity).filled(),
                        )))
                        .map_err(render_err)?;
                    chart
                        .draw_series(LineSeries::new(outline, rgb(*color).stroke_width(1)))
                        .map_err(render_err)?;
                }
                Fill::PerItem(_) => {
                    chart
                        .draw_series((1..n).map(|i| {
                            Polygon::new(
                                vec![
                                    (x[i - 1], upper[i - 1]),
                                    (x[i], upper[i]),
                                    (x[i], lower[i]),
                                    (x[i - 1], lower[i - 1]),
                                ],
                                rgb(fill.color(i - 1)).mix(*opacity).filled(),
                            )
                        }))
                        .map_err(render_err)?;
                }
            }
        }
        Geometry::Bars {
            values,
            width,
            orientation,
            ..
        } => {
            let half = width / 2.0;
            chart
                .draw_series(values.iter().enumerate().map(|(i, &v)| {
                    let pos = i as f64;
                    let corners = match orientation {
                        Orientation::Vertical => [(pos - half, 0.0), (pos + half, v)],
                        Orientation::Horizontal => [(0.0, pos - half), (v, pos + half)],
                    };
                    Rectangle::new(corners, rgb(fill.color(i)).filled())
                }))
                .map_err(render_err)?;
        }
        Geometry::Bins { edges, counts } => {
            chart
                .draw_series(counts.iter().enumerate().map(|(i, &count)| {
                    Rectangle::new(
                        [(edges[i], 0.0), (edges[i + 1], count as f64)],
                        rgb(fill.color(i)).mix(0.85).filled(),
                    )
                }))
                .map_err(render_err)?;
            chart
                .draw_series(counts.iter().enumerate().map(|(i, &count)| {
                    Rectangle::new(
                        [(edges[i], 0.0), (edges[i + 1], count as f64)],
                        WHITE.stroke_width(1),
                    )
                }))
                .map_err(render_err)?;
        }
        Geometry::Boxes {
            stats,
            show_outliers,
            ..
        } => {
            const HALF: f64 = 0.3;
            chart
                .draw_series(stats.iter().enumerate().map(|(i, s)| {
                    let pos = i as f64;
                    Rectangle::new(
                        [(pos - HALF, s.q1), (pos + HALF, s.q3)],
                        rgb(fill.color(i)).mix(0.7).filled(),
                    )
                }))
                .map_err(render_err)?;
            chart
                .draw_series(stats.iter().enumerate().map(|(i, s)| {
                    let pos = i as f64;
                    Rectangle::new([(pos - HALF, s.q1), (pos + HALF, s.q3)], BLACK.stroke_width(1))
                }))
                .map_err(render_err)?;
            chart
                .draw_series(stats.iter().enumerate().flat_map(|(i, s)| {
                    let pos = i as f64;
                    let cap = HALF / 2.0;
                    [
                        vec![(pos - HALF, s.median), (pos + HALF, s.median)],
                        vec![(pos, s.q3), (pos, s.upper)],
                        vec![(pos, s.q1), (pos, s.lower)],
                        vec![(pos - cap, s.upper), (pos + cap, s.upper)],
                        vec![(pos - cap, s.lower), (pos + cap, s.lower)],
                    ]
                    .into_iter()
                    .map(|points| PathElement::new(points, BLACK.stroke_width(1)))
                }))
                .map_err(render_err)?;
            if *show_outliers {
                let radius = cfg.scale_px(2.5);
                chart
                    .draw_series(stats.iter().enumerate().flat_map(|(i, s)| {
                        s.outliers.iter().map(move |&o| {
                            Circle::new((i as f64, o), radius, BLACK.stroke_width(1))
                        })
                    }))
                    .map_err(render_err)?;
            }
        }
        Geometry::Wedges { .. } | Geometry::Surface { .. } => {}
    }

    if !cell.legend.is_empty() {
        let swatch = cfg.scale_px(4.0) as i32;
        for entry in &cell.legend {
            let color = rgb(entry.color);
            chart
                .draw_series(std::iter::empty::<Circle<(f64, f64), u32>>())
                .map_err(render_err)?
                .label(entry.label.as_str())
                .legend(move |(x, y)| {
                    Rectangle::new([(x, y - swatch), (x + 3 * swatch, y + swatch)], color.filled())
                });
        }
        chart
            .configure_series_labels()
            .label_font(font(cfg, 9.0))
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .position(SeriesLabelPosition::UpperRight)
            .draw()
            .map_err(render_err)?;
    }

    Ok(())
}

/// Vertical gradient strip with value ticks for a continuous scale
fn draw_colorbar<DB: DrawingBackend>(
    area: &Area<DB>,
    bar: &Colorbar,
    cfg: &RenderConfig,
) -> Result<()> {
    let scale = &bar.scale;
    let (lo, hi) = if scale.is_degenerate() {
        pad_range(Some((scale.domain.0, scale.domain.0)))
    } else {
        scale.domain
    };

    let mut builder = ChartBuilder::on(area);
    builder
        .margin_top(cfg.scale_px(24.0))
        .margin_bottom(cfg.scale_px(30.0))
        .margin_left(cfg.scale_px(4.0))
        .set_label_area_size(LabelAreaPosition::Right, cfg.scale_px(40.0));
    let mut chart = builder
        .build_cartesian_2d(0.0..1.0, lo..hi)
        .map_err(render_err)?;

    let mut mesh = chart.configure_mesh();
    mesh.disable_mesh()
        .disable_x_axis()
        .y_labels(6)
        .label_style(font(cfg, 8.0))
        .axis_desc_style(font(cfg, 9.0));
    if let Some(label) = &bar.label {
        mesh.y_desc(label.as_str());
    }
    mesh.draw().map_err(render_err)?;

    let strip = if scale.is_degenerate() {
        vec![scale.start(); COLORBAR_STEPS]
    } else {
        interpolate_colors(&scale.stops, COLORBAR_STEPS, scale.space)
    };
    let step = (hi - lo) / COLORBAR_STEPS as f64;
    chart
        .draw_series(strip.iter().enumerate().map(|(k, &color)| {
            let v0 = lo + step * k as f64;
            Rectangle::new([(0.0, v0), (1.0, v0 + step)], rgb(color).filled())
        }))
        .map_err(render_err)?;
    Ok(())
}

/// Swatch list in the top-right corner of a panel without axes
fn draw_pixel_legend<DB: DrawingBackend>(
    area: &Area<DB>,
    entries: &[LegendEntry],
    cfg: &RenderConfig,
) -> Result<()> {
    let (width, _) = area.dim_in_pixel();
    let line = cfg.font_px(11.0).round() as i32;
    let swatch = (line / 2).max(2);
    let longest = entries.iter().map(|e| e.label.chars().count()).max().unwrap_or(0) as i32;
    let left = width as i32 - line - swatch * 3 - longest * line / 2;

    for (i, entry) in entries.iter().enumerate() {
        let top = line / 2 + i as i32 * line;
        area.draw(&Rectangle::new(
            [(left, top), (left + swatch * 2, top + swatch)],
            rgb(entry.color).filled(),
        ))
        .map_err(render_err)?;
        area.draw(&Text::new(
            entry.label.clone(),
            (left + swatch * 3, top + swatch / 2),
            font(cfg, 9.0).pos(Pos::new(HPos::Left, VPos::Center)),
        ))
        .map_err(render_err)?;
    }
    Ok(())
}

fn draw_pie<DB: DrawingBackend>(area: &Area<DB>, cell: &Cell, cfg: &RenderConfig) -> Result<()> {
    let Geometry::Wedges {
        labels,
        wedges,
        show_percent,
        ..
    } = &cell.geometry
    else {
        return Err(SynthplotError::RenderError(format!(
            "{} panel has no axes but is not a pie",
            cell.chart_type
        )));
    };

    let area = if cell.title.is_empty() {
        area.clone()
    } else {
        area.titled(&cell.title, font(cfg, 12.0)).map_err(render_err)?
    };
    let (width, height) = area.dim_in_pixel();
    let (cx, cy) = (width as f64 / 2.0, height as f64 / 2.0);
    let radius = 0.38 * width.min(height) as f64;
    let at = |angle: f64, r: f64| {
        let a = angle.to_radians();
        ((cx + r * a.cos()).round() as i32, (cy - r * a.sin()).round() as i32)
    };

    for (i, wedge) in wedges.iter().enumerate() {
        if wedge.fraction <= 0.0 {
            continue;
        }
        let steps = ((wedge.end - wedge.start).abs().ceil() as usize).max(2);
        let mut points = vec![at(0.0, 0.0)];
        points.extend((0..=steps).map(|k| {
            let angle = wedge.start + (wedge.end - wedge.start) * k as f64 / steps as f64;
            at(angle, radius)
        }));
        let color = rgb(cell.encoding.fill.color(i));
        area.draw(&Polygon::new(points.clone(), color.filled()))
            .map_err(render_err)?;
        points.push(at(0.0, 0.0));
        area.draw(&PathElement::new(points, WHITE.stroke_width(cfg.scale_px(1.0))))
            .map_err(render_err)?;

        let mid = wedge.mid_angle();
        if let Some(label) = labels.get(i) {
            area.draw(&Text::new(
                label.clone(),
                at(mid, radius * 1.12),
                centered(font(cfg, 9.0)),
            ))
            .map_err(render_err)?;
        }
        if *show_percent {
            area.draw(&Text::new(
                format!("{:.1}%", wedge.fraction * 100.0),
                at(mid, radius * 0.6),
                centered(font(cfg, 8.0)),
            ))
            .map_err(render_err)?;
        }
    }

    if !cell.legend.is_empty() {
        draw_pixel_legend(&area, &cell.legend, cfg)?;
    }
    Ok(())
}

fn draw_surface<DB: DrawingBackend>(
    area: &Area<DB>,
    cell: &Cell,
    cfg: &RenderConfig,
) -> Result<()> {
    let Geometry::Surface { grid, yaw, pitch } = &cell.geometry else {
        return Ok(());
    };
    let (x0, x1) = pad_range(finite_range(grid.x.iter().copied()));
    let (y0, y1) = pad_range(finite_range(grid.y.iter().copied()));
    let (z0, z1) = pad_range(grid.value_range());

    let (_, height) = area.dim_in_pixel();
    let caption_px = cfg.font_px(9.0);
    let (plot_area, label_area) =
        area.split_vertically(height as i32 - (caption_px * 2.0).round() as i32);

    let mut builder = ChartBuilder::on(&plot_area);
    builder.margin(cfg.scale_px(6.0));
    if !cell.title.is_empty() {
        builder.caption(&cell.title, font(cfg, 12.0));
    }
    // Plotters' vertical axis is the second one
    let mut chart = builder
        .build_cartesian_3d(x0..x1, z0..z1, y0..y1)
        .map_err(render_err)?;
    let (yaw, pitch) = (*yaw, *pitch);
    chart.with_projection(|mut p| {
        p.yaw = yaw;
        p.pitch = pitch;
        p.scale = 0.85;
        p.into_matrix()
    });
    chart
        .configure_axes()
        .light_grid_style(BLACK.mix(0.15))
        .max_light_lines(3)
        .draw()
        .map_err(render_err)?;

    let (nx, ny) = grid.shape();
    let (xs, ys, zs) = (&grid.x, &grid.y, &grid.z);
    let fill = &cell.encoding.fill;
    chart
        .draw_series((0..ny - 1).flat_map(move |j| {
            (0..nx - 1).map(move |i| {
                Polygon::new(
                    vec![
                        (xs[i], zs[j][i], ys[j]),
                        (xs[i + 1], zs[j][i + 1], ys[j]),
                        (xs[i + 1], zs[j + 1][i + 1], ys[j + 1]),
                        (xs[i], zs[j + 1][i], ys[j + 1]),
                    ],
                    rgb(fill.color(j * (nx - 1) + i)).filled(),
                )
            })
        }))
        .map_err(render_err)?;

    let z_label = cell.labels.z.as_deref().unwrap_or("z");
    let (width, label_height) = label_area.dim_in_pixel();
    label_area
        .draw(&Text::new(
            format!(
                "x: {}    y: {}    z: {}",
                cell.labels.x, cell.labels.y, z_label
            ),
            (width as i32 / 2, label_height as i32 / 2),
            centered(font(cfg, 9.0)),
        ))
        .map_err(render_err)?;
    Ok(())
}
