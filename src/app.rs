//! Top-level application orchestration.
//!
//! `src/main.rs` is tiny; this module is the real entry point that:
//! - loads `.env` and installs the tracing subscriber
//! - parses CLI arguments
//! - runs inference or catalog commands
//! - prints reports/plots and writes optional exports

use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::cli::{
    Cli, Command, FitArgs, InferenceArgs, OutputArgs, PlotArgs, SampleArgs, SampleFamily,
    ShapesArgs, ShapesCommand,
};
use crate::data::SampleSpec;
use crate::domain::{CurveParams, InferenceConfig, Point, ShapeRecord};
use crate::error::{Error, Result};
use crate::models::evaluate_components;

pub mod pipeline;

/// Entry point for the `baserah` binary.
pub fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::Sample(args) => handle_sample(args),
        Command::Plot(args) => handle_plot(args),
        Command::Shapes(args) => handle_shapes(args),
    }
}

/// Logs go to stderr so reports on stdout stay clean. `RUST_LOG` overrides the
/// default `warn` level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // A second init (e.g. from tests) is harmless.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();
}

fn handle_fit(args: FitArgs) -> Result<()> {
    if args.x.len() != args.y.len() {
        return Err(Error::invalid_input(format!(
            "--x has {} values but --y has {}",
            args.x.len(),
            args.y.len()
        )));
    }
    let points: Vec<Point> = args
        .x
        .iter()
        .zip(&args.y)
        .map(|(&x, &y)| Point::new(x, y))
        .collect();
    let config = inference_config_from_args(&args.inference);
    let run = pipeline::run_fit(points, &config)?;
    print_run(&run, &args.output)
}

fn handle_sample(args: SampleArgs) -> Result<()> {
    let spec = sample_spec_from_args(&args);
    let config = inference_config_from_args(&args.inference);
    let run = pipeline::run_sample(&spec, &config)?;

    println!("Generated {} samples from: {}", run.points.len(), spec.params.equation());
    if let Some(steps) = spec.steps {
        println!("(floored to {steps} levels)");
    }
    println!();
    print_run(&run, &args.output)
}

fn print_run(run: &pipeline::FitRun, output: &OutputArgs) -> Result<()> {
    println!("{}", crate::report::format_fit_summary(&run.points, &run.fit));

    if output.top > 0 {
        let top = crate::report::largest_residuals(&run.residuals, output.top);
        println!("{}", crate::report::format_residuals(&top));
    }

    if !output.no_plot {
        let plot = crate::plot::render_ascii_plot(&run.points, &run.fit.params, output.width, output.height);
        println!("{plot}");
    }

    if let Some(path) = &output.export {
        crate::io::write_fit_json(path, &run.fit, &run.points)?;
        println!("Wrote fit to {}", path.display());
    }
    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<()> {
    let file = crate::io::read_fit_json(&args.fit)?;
    println!("{}", file.equation);
    println!("{}", crate::plot::render_fit_file_plot(&file, args.width, args.height));
    Ok(())
}

fn handle_shapes(args: ShapesArgs) -> Result<()> {
    let catalog = pipeline::load_catalog(args.catalog.as_deref())?;

    match args.command {
        ShapesCommand::List {
            category,
            complexity,
        } => {
            let shapes: Vec<&ShapeRecord> = catalog
                .iter()
                .filter(|s| category.is_none_or(|c| s.category == c))
                .filter(|s| complexity.is_none_or(|c| s.complexity == c))
                .collect();
            print!("{}", crate::report::format_shape_list(&shapes));
        }
        ShapesCommand::Show {
            id,
            plot,
            x_min,
            x_max,
        } => {
            let shape = catalog.get(&id)?;
            print!("{}", crate::report::format_shape(shape));
            if plot {
                let (lo, hi) = shape.domain();
                let (x_min, x_max) = (x_min.unwrap_or(lo), x_max.unwrap_or(hi));
                if !(x_min.is_finite() && x_max.is_finite() && x_max > x_min) {
                    return Err(Error::invalid_argument(format!(
                        "invalid plot range [{x_min}, {x_max}]"
                    )));
                }
                let plot = crate::plot::render_function_plot(
                    |x| evaluate_components(&shape.components, x),
                    x_min,
                    x_max,
                    80,
                    20,
                );
                println!("\n{plot}");
            }
        }
        ShapesCommand::Search { query } => {
            let hits = catalog.search(&query);
            print!("{}", crate::report::format_shape_list(&hits));
        }
        ShapesCommand::Transform {
            source,
            target,
            steps,
            json,
        } => {
            let sequence = catalog.transform(&source, &target, steps)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&sequence)?);
            } else {
                print!("{}", crate::report::format_transform(&sequence));
            }
        }
        ShapesCommand::Summary => {
            print!("{}", crate::report::format_summary(&catalog.summary()));
        }
        ShapesCommand::Export { path } => {
            let path = path.unwrap_or_else(crate::io::default_export_path);
            crate::io::write_catalog_json(&path, &catalog)?;
            println!("Exported {} shapes to {}", catalog.len(), path.display());
        }
    }
    Ok(())
}

pub fn inference_config_from_args(args: &InferenceArgs) -> InferenceConfig {
    InferenceConfig {
        sharpness: args.sharpness.clone(),
        k_magnitudes: args.k_grid.clone(),
        x0_steps: args.x0_steps,
        max_quantum: args.max_quantum,
        refine_iters: args.refine_iters,
    }
}

pub fn sample_spec_from_args(args: &SampleArgs) -> SampleSpec {
    let sigmoid = CurveParams::Sigmoid {
        n: args.n.max(1),
        k: args.k,
        x0: args.x0,
        alpha: args.alpha,
    };
    let (params, steps) = match args.family {
        SampleFamily::Linear => (
            CurveParams::Linear {
                beta: args.beta,
                gamma: args.gamma,
            },
            None,
        ),
        SampleFamily::Sigmoid => (sigmoid, None),
        SampleFamily::Quantized => (
            CurveParams::QuantizedSigmoid {
                n: args.n.max(1),
                k: args.k,
                x0: args.x0,
                alpha: args.alpha,
                quantum_factor: args.levels as f64,
            },
            None,
        ),
        SampleFamily::Stepped => (sigmoid, Some(args.levels)),
    };

    SampleSpec {
        params,
        steps,
        x_min: args.x_min,
        x_max: args.x_max,
        count: args.count,
        noise: args.noise,
        random_x: args.random_x,
        seed: args.seed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_flags_match_default_config() {
        let cli = Cli::try_parse_from(["baserah", "fit", "--x", "0,1", "--y", "1,2"]).unwrap();
        let Command::Fit(args) = cli.command else {
            panic!("expected fit");
        };
        assert_eq!(args.x, [0.0, 1.0]);
        let config = inference_config_from_args(&args.inference);
        // Env vars may override these two; compare the rest.
        assert_eq!(config.sharpness, InferenceConfig::default().sharpness);
        assert_eq!(config.k_magnitudes, InferenceConfig::default().k_magnitudes);
        assert_eq!(config.x0_steps, InferenceConfig::default().x0_steps);
    }

    #[test]
    fn negative_values_parse() {
        let cli = Cli::try_parse_from([
            "baserah", "fit", "--x", "-2,-1,0", "--y", "-1,0,1", "--k-grid", "1,2",
        ])
        .unwrap();
        let Command::Fit(args) = cli.command else {
            panic!("expected fit");
        };
        assert_eq!(args.x, [-2.0, -1.0, 0.0]);
        assert_eq!(args.inference.k_grid, [1.0, 2.0]);
    }

    #[test]
    fn stepped_sample_uses_levels() {
        let cli = Cli::try_parse_from([
            "baserah", "sample", "--family", "stepped", "--levels", "3", "--k", "-2",
        ])
        .unwrap();
        let Command::Sample(args) = cli.command else {
            panic!("expected sample");
        };
        let spec = sample_spec_from_args(&args);
        assert_eq!(spec.steps, Some(3));
        assert!(matches!(spec.params, CurveParams::Sigmoid { k, .. } if k == -2.0));
    }

    #[test]
    fn show_range_is_optional() {
        let cli = Cli::try_parse_from(["baserah", "shapes", "show", "circle_basic", "--plot", "--x-min", "-1"])
            .unwrap();
        let Command::Shapes(args) = cli.command else {
            panic!("expected shapes");
        };
        assert!(matches!(
            args.command,
            ShapesCommand::Show { plot: true, x_min: Some(x), x_max: None, .. } if x == -1.0
        ));
    }

    #[test]
    fn shapes_list_parses_tags() {
        let cli = Cli::try_parse_from([
            "baserah", "shapes", "list", "--category", "organic", "--complexity", "basic",
        ])
        .unwrap();
        let Command::Shapes(args) = cli.command else {
            panic!("expected shapes");
        };
        assert!(matches!(
            args.command,
            ShapesCommand::List {
                category: Some(crate::domain::Category::Organic),
                complexity: Some(crate::domain::Complexity::Basic),
            }
        ));
    }
}
