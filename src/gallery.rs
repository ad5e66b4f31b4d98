//! Built-in figure descriptions
//!
//! Ready-made figures covering every chart kind, usable from the command
//! line (`synthplot gallery <name>`) or as starting points for JSON files
//! (`FigureSpec::to_json`).

use crate::data::{
    Distribution, Domain, Formula, GroupSpec, GroupsSpec, LiteralSpec, Noise, RandomSpec,
    SampleSpec, SurfaceFormula, Synthesis,
};
use crate::plot::{
    Area, Bar, BoxPlot, ChartKind, ChartSpec, ColorMapping, ExportOptions, FigureSpec, Histogram,
    Layout, Line, PanelSpec, Pie, Scatter, Step, StepPosition, Surface,
};
use crate::{Result, SynthplotError};

const ENTRIES: &[(&str, &str)] = &[
    ("radial-sine-surface", "z = sin(sqrt(x^2 + y^2)), red to yellow"),
    ("radial-cosine-surface", "z = cos(sqrt(x^2 + y^2)), coolwarm"),
    ("wave-surface", "z = sin(x) cos(y), viridis"),
    ("noisy-surface", "interference pattern with gaussian noise, 300 dpi, tight"),
    ("random-scatter", "50 uniform points with color and size channels"),
    ("group-scatter", "three normal clusters in red, blue and green"),
    ("campaign-scatter", "marketing channels by spend and conversions"),
    ("monthly-bar", "monthly sales"),
    ("product-bar", "units sold per product"),
    ("weekly-bar", "random weekly counts for a year"),
    ("cubic-line", "y = x^3 - 3x"),
    ("sine-grid", "2x2 grid of sine waves from 100 to 400 Hz"),
    ("cosine-grid", "3x4 grid of cosines with doubling frequency"),
    ("variety-grid", "4x3 grid with one panel per chart kind"),
];

/// Names of all gallery entries
pub fn names() -> impl Iterator<Item = &'static str> {
    ENTRIES.iter().map(|(name, _)| *name)
}

/// One-line description of an entry
pub fn describe(name: &str) -> Option<&'static str> {
    ENTRIES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, description)| *description)
}

/// Build the figure description for a gallery entry
pub fn entry(name: &str) -> Result<FigureSpec> {
    let spec = match name {
        "radial-sine-surface" => radial_surface(
            SurfaceFormula::RadialSine,
            5.0,
            100,
            "red->yellow",
            "z = sin(sqrt(x^2 + y^2))",
        )?,
        "radial-cosine-surface" => radial_surface(
            SurfaceFormula::RadialCosine,
            15.0,
            200,
            "coolwarm",
            "z = cos(sqrt(x^2 + y^2))",
        )?,
        "wave-surface" => radial_surface(
            SurfaceFormula::SinCos,
            2.0 * std::f64::consts::PI,
            80,
            "viridis",
            "z = sin(x) cos(y)",
        )?,
        "noisy-surface" => noisy_surface()?,
        "random-scatter" => random_scatter(),
        "group-scatter" => group_scatter(),
        "campaign-scatter" => campaign_scatter(),
        "monthly-bar" => monthly_bar(),
        "product-bar" => product_bar(),
        "weekly-bar" => weekly_bar(),
        "cubic-line" => cubic_line()?,
        "sine-grid" => sine_grid()?,
        "cosine-grid" => cosine_grid()?,
        "variety-grid" => variety_grid()?,
        other => {
            return Err(SynthplotError::ConfigError(format!(
                "Unknown gallery entry '{}'. Available: {}",
                other,
                names().collect::<Vec<_>>().join(", ")
            )))
        }
    };
    Ok(spec)
}

fn radial_surface(
    formula: SurfaceFormula,
    extent: f64,
    count: usize,
    palette: &str,
    title: &str,
) -> Result<FigureSpec> {
    let data = Synthesis::Surface {
        x: Domain::new(-extent, extent, count)?,
        y: Domain::new(-extent, extent, count)?,
        formula,
        noise: None,
    };
    let chart = ChartSpec::new(ChartKind::Surface(Surface::default()))
        .with_title(title)
        .with_labels("X", "Y")
        .with_z_label("Z")
        .with_color(ColorMapping::continuous(palette).with_label("Z"));
    Ok(FigureSpec::single(PanelSpec::new(data, chart)))
}

fn noisy_surface() -> Result<FigureSpec> {
    let data = Synthesis::Surface {
        x: Domain::new(-3.0, 3.0, 60)?,
        y: Domain::new(-3.0, 3.0, 60)?,
        formula: SurfaceFormula::Interference,
        noise: Some(Noise {
            seed: 7,
            std_dev: 0.1,
        }),
    };
    let chart = ChartSpec::new(ChartKind::Surface(Surface {
        yaw: 0.6,
        pitch: 0.4,
    }))
    .with_title("Interference with noise")
    .with_labels("X", "Y")
    .with_z_label("Z")
    .with_color(ColorMapping::continuous("plasma"));

    let mut spec = FigureSpec::single(PanelSpec::new(data, chart));
    spec.config.dpi = 300;
    spec.config.width = 8.0;
    spec.config.height = 6.0;
    spec.export = ExportOptions {
        tight_bbox: true,
        pad: 0.1,
    };
    Ok(spec)
}

fn random_scatter() -> FigureSpec {
    let data = Synthesis::Random(RandomSpec {
        color: Some(Distribution::unit()),
        size: Some(Distribution::Uniform {
            low: 20.0,
            high: 200.0,
        }),
        ..RandomSpec::uniform(42, 50)
    });
    let chart = ChartSpec::new(ChartKind::Scatter(Scatter::default()))
        .with_title("Random scatter")
        .with_labels("X", "Y")
        .with_color(ColorMapping::continuous("viridis").with_label("Color value"));
    FigureSpec::single(PanelSpec::new(data, chart))
}

fn normal(mean: f64) -> Distribution {
    Distribution::Normal { mean, std_dev: 1.0 }
}

fn group_scatter() -> FigureSpec {
    let groups = [("Group 1", 0.0), ("Group 2", 2.0), ("Group 3", -2.0)]
        .into_iter()
        .map(|(label, mean)| GroupSpec {
            label: label.to_string(),
            count: 50,
            x: normal(mean),
            y: normal(mean),
        })
        .collect();
    let data = Synthesis::Groups(GroupsSpec { seed: 0, groups });
    let chart = ChartSpec::new(ChartKind::Scatter(Scatter::default()))
        .with_title("Three groups")
        .with_labels("X", "Y")
        .with_color(ColorMapping::categorical("red,blue,green"));
    FigureSpec::single(PanelSpec::new(data, chart))
}

fn campaign_scatter() -> FigureSpec {
    let data = Synthesis::Random(RandomSpec {
        seed: 2024,
        count: 80,
        x: Distribution::Uniform {
            low: 1_000.0,
            high: 10_000.0,
        },
        y: Distribution::Uniform {
            low: 10.0,
            high: 500.0,
        },
        color: None,
        size: Some(Distribution::Uniform {
            low: 1.0,
            high: 10.0,
        }),
        categories: ["Email", "Social", "Search", "Display"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
    });
    let chart = ChartSpec::new(ChartKind::Scatter(Scatter {
        opacity: 0.6,
        ..Scatter::default()
    }))
    .with_title("Campaign performance")
    .with_labels("Spend ($)", "Conversions")
    .with_color(ColorMapping::categorical("set2"));
    FigureSpec::single(PanelSpec::new(data, chart))
}

fn monthly_sales() -> Synthesis {
    Synthesis::Literal(LiteralSpec::new([
        ("Jan", 120.0),
        ("Feb", 135.0),
        ("Mar", 150.0),
        ("Apr", 110.0),
        ("May", 170.0),
        ("Jun", 190.0),
    ]))
}

fn monthly_bar() -> FigureSpec {
    let chart = ChartSpec::new(ChartKind::Bar(Bar::default()))
        .with_title("Monthly sales")
        .with_labels("Month", "Sales")
        .with_color(ColorMapping::categorical("tableau10"));
    FigureSpec::single(PanelSpec::new(monthly_sales(), chart))
}

fn product_bar() -> FigureSpec {
    let data = Synthesis::Literal(LiteralSpec::new([
        ("Product A", 23.0),
        ("Product B", 45.0),
        ("Product C", 12.0),
        ("Product D", 67.0),
        ("Product E", 34.0),
    ]));
    let chart = ChartSpec::new(ChartKind::Bar(Bar::default()))
        .with_title("Units sold")
        .with_labels("Product", "Units")
        .with_color(ColorMapping::fixed("skyblue"));
    FigureSpec::single(PanelSpec::new(data, chart))
}

fn weekly_bar() -> FigureSpec {
    let data = Synthesis::Sample(SampleSpec {
        seed: 52,
        count: 52,
        distribution: Distribution::Integer { low: 50, high: 500 },
        series: 1,
    });
    let chart = ChartSpec::new(ChartKind::Bar(Bar::default()))
        .with_title("Weekly orders")
        .with_labels("Week", "Orders")
        .without_grid();
    let mut spec = FigureSpec::single(PanelSpec::new(data, chart));
    spec.config.width = 14.0;
    spec
}

fn cubic() -> Formula {
    Formula::polynomial([0.0, -3.0, 0.0, 1.0])
}

fn cubic_line() -> Result<FigureSpec> {
    let data = Synthesis::formula(Domain::new(-2.5, 2.5, 200)?, cubic());
    let chart = ChartSpec::new(ChartKind::Line(Line::default()))
        .with_title("y = x^3 - 3x")
        .with_labels("x", "y")
        .with_legend("x^3 - 3x")
        .with_color(ColorMapping::fixed("darkorange"));
    Ok(FigureSpec::single(PanelSpec::new(data, chart)))
}

fn sine_grid() -> Result<FigureSpec> {
    let time = Domain::new(0.0, 0.02, 500)?;
    let panels = (1..=4)
        .map(|i| {
            let hz = 100.0 * f64::from(i);
            PanelSpec::new(
                Synthesis::formula(time, Formula::sine(hz)),
                ChartSpec::new(ChartKind::Line(Line::default()))
                    .with_title(format!("{} Hz", hz))
                    .with_labels("Time (s)", "Amplitude"),
            )
        })
        .collect();
    Ok(FigureSpec::grid(Layout::new(2, 2)?, panels).with_title("Sine waves"))
}

fn cosine_grid() -> Result<FigureSpec> {
    let x = Domain::new(0.0, 2.0, 400)?;
    let panels = (0..12)
        .map(|i| {
            let frequency = 2f64.powi(i) / 8.0;
            PanelSpec::new(
                Synthesis::formula(x, Formula::cosine(frequency)),
                ChartSpec::new(ChartKind::Line(Line {
                    line_width: 1.0,
                }))
                .with_title(format!("f = {}", frequency)),
            )
        })
        .collect();
    let mut spec = FigureSpec::grid(Layout::new(3, 4)?, panels).with_title("Cosine frequencies");
    spec.config.width = 16.0;
    spec.config.height = 10.0;
    Ok(spec)
}

fn variety_grid() -> Result<FigureSpec> {
    let x = Domain::new(0.0, 10.0, 100)?;
    let sample = |seed: u64, series: usize| {
        Synthesis::Sample(SampleSpec {
            seed,
            count: 200,
            distribution: normal(0.0),
            series,
        })
    };

    let panels = vec![
        PanelSpec::new(
            Synthesis::formula(x, Formula::sine(0.2)),
            ChartSpec::new(ChartKind::Line(Line::default())).with_title("Line"),
        ),
        PanelSpec::new(
            monthly_sales(),
            ChartSpec::new(ChartKind::Bar(Bar::default())).with_title("Bar"),
        ),
        PanelSpec::new(
            Synthesis::Random(RandomSpec::uniform(1, 60)),
            ChartSpec::new(ChartKind::Scatter(Scatter::default())).with_title("Scatter"),
        ),
        PanelSpec::new(
            sample(2, 1),
            ChartSpec::new(ChartKind::Histogram(Histogram { bins: 20 })).with_title("Histogram"),
        ),
        PanelSpec::new(
            sample(3, 3),
            ChartSpec::new(ChartKind::BoxPlot(BoxPlot::default())).with_title("Box"),
        ),
        PanelSpec::new(
            Synthesis::Literal(LiteralSpec::new([
                ("A", 15.0),
                ("B", 30.0),
                ("C", 45.0),
                ("D", 10.0),
            ])),
            ChartSpec::new(ChartKind::Pie(Pie::default())).with_title("Pie"),
        ),
        PanelSpec::new(
            Synthesis::formula(x, Formula::sine(0.1)),
            ChartSpec::new(ChartKind::Area(Area::default())).with_title("Area"),
        ),
        PanelSpec::new(
            Synthesis::formula(Domain::new(0.0, 10.0, 11)?, Formula::polynomial([0.0, 1.0])),
            ChartSpec::new(ChartKind::Step(Step {
                position: StepPosition::Mid,
                ..Step::default()
            }))
            .with_title("Step"),
        ),
        PanelSpec::new(
            monthly_sales(),
            ChartSpec::new(ChartKind::Bar(Bar::horizontal())).with_title("Horizontal bar"),
        ),
        PanelSpec::new(
            Synthesis::Formula {
                x,
                formula: Formula::sine(0.1),
                noise: None,
                baseline: Some(Formula::cosine(0.1)),
            },
            ChartSpec::new(ChartKind::Area(Area::default())).with_title("Between curves"),
        ),
        PanelSpec::new(
            Synthesis::formula(Domain::new(-2.0, 2.0, 100)?, Formula::Exponential {
                rate: 1.0,
                scale: 1.0,
            }),
            ChartSpec::new(ChartKind::Line(Line::default())).with_title("Exponential"),
        ),
        PanelSpec::new(
            Synthesis::formula(Domain::new(-3.0, 3.0, 100)?, Formula::Tanh),
            ChartSpec::new(ChartKind::Line(Line::default())).with_title("Tanh"),
        ),
    ];

    let mut spec = FigureSpec::grid(Layout::new(4, 3)?, panels).with_title("Chart kinds");
    spec.config.width = 15.0;
    spec.config.height = 16.0;
    Ok(spec)
}
