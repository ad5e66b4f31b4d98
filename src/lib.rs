/*!
# synthplot - synthetic data charts

Generates numeric data from closed-form formulas or seeded random draws and
renders it as 2D/3D charts (scatter, bar, line, surface, histogram, box, pie,
area, step) arranged in a grid of panels, saved to an image file.

## Example

```rust,no_run
use synthplot::data::{Domain, SurfaceFormula, Synthesis};
use synthplot::plot::{ChartKind, ChartSpec, ColorMapping, FigureSpec, PanelSpec, Surface};

let data = Synthesis::Surface {
    x: Domain::new(-5.0, 5.0, 100)?,
    y: Domain::new(-5.0, 5.0, 100)?,
    formula: SurfaceFormula::RadialSine,
    noise: None,
};
let chart = ChartSpec::new(ChartKind::Surface(Surface::default()))
    .with_title("z = sin(sqrt(x^2 + y^2))")
    .with_color(ColorMapping::continuous("red->yellow"));

let spec = FigureSpec::single(PanelSpec::new(data, chart));
synthplot::generate(&spec, "surface.png")?;
# Ok::<(), synthplot::SynthplotError>(())
```

## Architecture

The pipeline has three stages, each a plain function over typed values:

- [`data`] - synthesizes a [`Dataset`] (sequence or grid)
- [`render`] - composes datasets and chart specs into a [`Figure`]
- [`writer`] - draws the figure with plotters and writes the image file
*/

use std::path::{Path, PathBuf};

use tracing::debug;

pub mod data;
pub mod gallery;
pub mod plot;
pub mod render;
pub mod writer;

// Re-export key types for convenience
pub use data::{Dataset, Grid, Sequence, Synthesis};
pub use plot::{ChartKind, ChartSpec, ColorMapping, FigureSpec, Layout, PanelSpec, RenderConfig};
pub use render::{Cell, Figure};
pub use writer::{ImageFormat, PlottersWriter, Writer};

/// Main library error type
#[derive(thiserror::Error, Debug)]
pub enum SynthplotError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Figure description error: {0}")]
    SpecError(String),

    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    #[error("Render error: {0}")]
    RenderError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SynthplotError>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Synthesize every panel of a figure description and compose the figure.
///
/// Nothing is written to disk; this is the whole pipeline minus export.
pub fn prepare(spec: &FigureSpec) -> Result<Figure> {
    let mut panels = Vec::with_capacity(spec.panels.len());
    for (idx, panel) in spec.panels.iter().enumerate() {
        let dataset = panel.data.synthesize()?;
        debug!(panel = idx, shape = %dataset.shape(), "synthesized dataset");
        panels.push((dataset, panel.chart.clone()));
    }

    render::render(
        panels,
        spec.layout()?,
        spec.title.clone(),
        spec.config.clone(),
    )
}

/// Run the full pipeline and write the image to `path`.
///
/// The output format is checked before any data is synthesized, so an
/// unsupported extension never leaves a file behind.
pub fn generate(spec: &FigureSpec, path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    ImageFormat::from_path(path)?;
    let figure = prepare(spec)?;
    writer::export(&figure, path, &spec.export)
}
