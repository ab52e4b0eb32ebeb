//! Command-line parsing for the `baserah` binary.
//!
//! Argument parsing and command dispatch stay separate from the math, fitting
//! and catalog code. Key settings can also come from `BASERAH_*` environment
//! variables (a `.env` file is loaded first).

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::domain::{Category, Complexity};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "baserah", version, about = "Sigmoid/linear curve inference and shape catalog")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Infer the best curve family for the given samples.
    Fit(FitArgs),
    /// Generate seeded synthetic samples from a known curve and fit them back.
    Sample(SampleArgs),
    /// Plot a previously exported fit JSON.
    Plot(PlotArgs),
    /// Browse, search, transform and export the shape catalog.
    Shapes(ShapesArgs),
}

/// Search settings shared by every command that runs the inference.
#[derive(Debug, Args, Clone)]
pub struct InferenceArgs {
    /// Sharpness exponents `n` to try (comma separated).
    #[arg(long, value_delimiter = ',', default_values_t = [1u32, 2, 3])]
    pub sharpness: Vec<u32>,

    /// Steepness magnitudes to try; each is used with both signs (comma separated).
    #[arg(
        long = "k-grid",
        value_delimiter = ',',
        default_values_t = [0.25, 0.5, 0.75, 1.0, 1.5, 2.0, 3.0, 4.0, 5.0, 7.5, 10.0]
    )]
    pub k_grid: Vec<f64>,

    /// Number of midpoint candidates across the x-range (made odd).
    #[arg(long, default_value_t = 13)]
    pub x0_steps: usize,

    /// Largest quantum factor tried for the quantized family.
    #[arg(long, env = "BASERAH_MAX_QUANTUM", default_value_t = 16)]
    pub max_quantum: u32,

    /// Pattern-search iterations used to refine the best sigmoid.
    #[arg(long, env = "BASERAH_REFINE_ITERS", default_value_t = 200)]
    pub refine_iters: usize,
}

/// Terminal output and export options for a fit.
#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, env = "BASERAH_PLOT_WIDTH", default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, env = "BASERAH_PLOT_HEIGHT", default_value_t = 20)]
    pub height: usize,

    /// Show the N largest residuals.
    #[arg(long, default_value_t = 5)]
    pub top: usize,

    /// Export the fit (result + samples + fitted grid) to JSON.
    #[arg(long)]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct FitArgs {
    /// Sample x values (comma separated).
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true, required = true)]
    pub x: Vec<f64>,

    /// Sample y values (comma separated).
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true, required = true)]
    pub y: Vec<f64>,

    #[command(flatten)]
    pub inference: InferenceArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Curve families available to the sample generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SampleFamily {
    Linear,
    Sigmoid,
    Quantized,
    Stepped,
}

#[derive(Debug, Args, Clone)]
pub struct SampleArgs {
    /// Family to draw from.
    #[arg(long, value_enum, default_value_t = SampleFamily::Sigmoid)]
    pub family: SampleFamily,

    /// Sharpness exponent.
    #[arg(long, default_value_t = 1)]
    pub n: u32,

    /// Steepness.
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    pub k: f64,

    /// Midpoint.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub x0: f64,

    /// Amplitude.
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    pub alpha: f64,

    /// Linear slope.
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    pub beta: f64,

    /// Linear intercept.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub gamma: f64,

    /// Quantum factor (quantized) or level count (stepped).
    #[arg(long, default_value_t = 4)]
    pub levels: u32,

    #[arg(long, default_value_t = -5.0, allow_negative_numbers = true)]
    pub x_min: f64,

    #[arg(long, default_value_t = 5.0, allow_negative_numbers = true)]
    pub x_max: f64,

    /// Number of samples.
    #[arg(short = 'c', long, default_value_t = 41)]
    pub count: usize,

    /// Standard deviation of Gaussian noise added to y.
    #[arg(long, default_value_t = 0.0)]
    pub noise: f64,

    /// Draw x uniformly at random instead of on an even grid.
    #[arg(long)]
    pub random_x: bool,

    /// Random seed.
    #[arg(long, env = "BASERAH_SEED", default_value_t = 42)]
    pub seed: u64,

    #[command(flatten)]
    pub inference: InferenceArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args, Clone)]
pub struct PlotArgs {
    /// Fit JSON produced by `baserah fit --export`.
    #[arg(long, value_name = "JSON")]
    pub fit: PathBuf,

    /// Plot width (columns).
    #[arg(long, env = "BASERAH_PLOT_WIDTH", default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, env = "BASERAH_PLOT_HEIGHT", default_value_t = 20)]
    pub height: usize,
}

#[derive(Debug, Args)]
pub struct ShapesArgs {
    /// Load the catalog from a JSON export instead of the built-in shapes.
    #[arg(long, env = "BASERAH_CATALOG", global = true)]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: ShapesCommand,
}

#[derive(Debug, Subcommand)]
pub enum ShapesCommand {
    /// List shapes, optionally filtered by category and/or complexity.
    List {
        #[arg(long, value_enum)]
        category: Option<Category>,
        #[arg(long, value_enum)]
        complexity: Option<Complexity>,
    },
    /// Show one shape in detail.
    Show {
        id: String,
        /// Plot the shape equation over its domain.
        #[arg(long)]
        plot: bool,
        /// Override the left end of the plotted domain.
        #[arg(long, allow_negative_numbers = true)]
        x_min: Option<f64>,
        /// Override the right end of the plotted domain.
        #[arg(long, allow_negative_numbers = true)]
        x_max: Option<f64>,
    },
    /// Case-insensitive search over English and Arabic names.
    Search { query: String },
    /// Interpolate between two shapes.
    Transform {
        source: String,
        target: String,
        #[arg(long, default_value_t = 10)]
        steps: usize,
        /// Print the sequence as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Counts by category/complexity and average beauty.
    Summary,
    /// Export the catalog to JSON (default: shapes_catalog_<timestamp>.json).
    Export { path: Option<PathBuf> },
}
