//! Command-line entry point: run one MAEcce study and print its report.

use clap::Parser;
use maecce::pipeline::{load_options, Study};
use maecce::StudyOptions;
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[clap(
    name = "maecce",
    version,
    about = "Y-randomization (MAEcce) validity check of a PLS regression model."
)]
struct Args {
    /// TOML file with study options; unspecified keys use the defaults.
    #[clap(long)]
    config: Option<PathBuf>,

    /// Number of y-randomizations.
    #[clap(long)]
    permutations: Option<usize>,

    /// Seed for y-randomization, for a reproducible null distribution.
    #[clap(long)]
    seed: Option<u64>,

    /// Histogram output path (.png or .svg).
    #[clap(long)]
    output: Option<PathBuf>,

    /// Skip writing the histogram.
    #[clap(long, conflicts_with = "output")]
    no_plot: bool,
}

fn options_from_args(args: &Args) -> Result<StudyOptions, maecce::StudyError> {
    let mut options = match args.config {
        Some(ref path) => load_options(path)?,
        None => StudyOptions::default(),
    };
    if let Some(n) = args.permutations {
        options.n_permutations = n;
    }
    if let Some(seed) = args.seed {
        options.permutation_seed = Some(seed);
    }
    if let Some(ref path) = args.output {
        options.plot_path = Some(path.clone());
    }
    if args.no_plot {
        options.plot_path = None;
    }
    Ok(options)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let study = match options_from_args(&args).and_then(Study::new) {
        Ok(study) => study,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let report = match study.run(|i, n| println!("{} / {}", i, n)) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Fatal error during study: {}", e);
            process::exit(1);
        }
    };

    println!();
    println!("{}", report.statistics);
    if let Some(summary) = report.summary {
        println!("{}", summary);
    }
    if let Some(path) = report.plot_path {
        println!("Histogram: {}", path.display());
    }
}
