/*!
synthplot Command Line Interface

Renders figure descriptions (JSON files or built-in gallery entries) to image files.
*/

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use synthplot::data::{Distribution, Formula, SurfaceFormula};
use synthplot::plot::palettes::PALETTE_NAMES;
use synthplot::plot::ChartType;
use synthplot::{gallery, FigureSpec, VERSION};

#[derive(Parser)]
#[command(name = "synthplot")]
#[command(about = "Render charts of synthesized data to image files")]
#[command(version = VERSION)]
pub struct Cli {
    /// Log pipeline details
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a JSON figure description
    Render {
        /// Path to the figure description
        file: PathBuf,

        /// Output image path (png, jpg, bmp or svg)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Override the resolution
        #[arg(long)]
        dpi: Option<u32>,

        /// Crop background margins
        #[arg(long)]
        tight: bool,
    },

    /// Render a built-in gallery entry
    Gallery {
        /// Entry name (see `synthplot list`)
        name: String,

        /// Output image path (png, jpg, bmp or svg)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Override the resolution
        #[arg(long)]
        dpi: Option<u32>,

        /// Crop background margins
        #[arg(long)]
        tight: bool,
    },

    /// Check a figure description without writing anything
    Validate {
        /// Path to the figure description
        file: PathBuf,
    },

    /// List gallery entries, palettes, formulas and chart types
    List,
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "synthplot=debug"
    } else {
        "synthplot=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// `output` flag, else the description's own path, else a timestamped name
fn output_path(flag: Option<PathBuf>, spec: &FigureSpec) -> PathBuf {
    flag.or_else(|| spec.output.clone()).unwrap_or_else(|| {
        PathBuf::from(format!(
            "chart_{}.png",
            chrono::Local::now().format("%Y%m%d-%H%M%S")
        ))
    })
}

fn run(
    mut spec: FigureSpec,
    output: Option<PathBuf>,
    dpi: Option<u32>,
    tight: bool,
) -> anyhow::Result<()> {
    if let Some(dpi) = dpi {
        spec.config.dpi = dpi;
    }
    if tight {
        spec.export.tight_bbox = true;
    }
    let path = output_path(output, &spec);
    let written = synthplot::generate(&spec, &path)
        .with_context(|| format!("Failed to render {}", path.display()))?;
    println!("{}", written.display());
    Ok(())
}

fn load(file: &Path) -> anyhow::Result<FigureSpec> {
    FigureSpec::from_file(file).with_context(|| format!("Failed to load {}", file.display()))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Render {
            file,
            output,
            dpi,
            tight,
        } => run(load(&file)?, output, dpi, tight),
        Commands::Gallery {
            name,
            output,
            dpi,
            tight,
        } => run(gallery::entry(&name)?, output, dpi, tight),
        Commands::Validate { file } => {
            let spec = load(&file)?;
            let figure = synthplot::prepare(&spec)?;
            info!(
                panels = figure.cells.len(),
                layout = %figure.layout,
                "figure description is valid"
            );
            println!(
                "{}: {} panel(s) on a {} grid",
                file.display(),
                figure.cells.len(),
                figure.layout
            );
            Ok(())
        }
        Commands::List => {
            println!("Gallery entries:");
            for name in gallery::names() {
                println!("  {:<24}{}", name, gallery::describe(name).unwrap_or_default());
            }
            let types: Vec<String> = ChartType::ALL.iter().map(|t| t.to_string()).collect();
            println!("\nChart types: {}", types.join(", "));
            println!("Palettes: {}", PALETTE_NAMES.join(", "));
            println!("Formulas: {}", Formula::NAMES.join(", "));
            println!("Surface formulas: {}", SurfaceFormula::NAMES.join(", "));
            println!("Distributions: {}", Distribution::NAMES.join(", "));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_gallery_command() {
        let cli = Cli::try_parse_from([
            "synthplot", "-v", "gallery", "monthly-bar", "--output", "out.svg", "--dpi", "150",
            "--tight",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Gallery {
                name,
                output,
                dpi,
                tight,
            } => {
                assert_eq!(name, "monthly-bar");
                assert_eq!(output, Some(PathBuf::from("out.svg")));
                assert_eq!(dpi, Some(150));
                assert!(tight);
            }
            _ => panic!("expected gallery command"),
        }
    }

    #[test]
    fn test_output_path_precedence() {
        let mut spec = gallery::entry("cubic-line").unwrap();
        spec.output = Some(PathBuf::from("from_spec.png"));
        assert_eq!(
            output_path(Some(PathBuf::from("flag.png")), &spec),
            PathBuf::from("flag.png")
        );
        assert_eq!(output_path(None, &spec), PathBuf::from("from_spec.png"));

        spec.output = None;
        let name = output_path(None, &spec);
        let name = name.to_string_lossy();
        assert!(name.starts_with("chart_") && name.ends_with(".png"));
    }
}
