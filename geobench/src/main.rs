//! GeoBench CLI

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use geobench::{
    analysis::aggregate,
    config::Config,
    dataset::dataset_from_dir,
    logs::load_eval_runs,
    reporting::generate_reports,
};

#[derive(Parser)]
#[command(name = "geobench")]
#[command(about = "Image-geolocation accuracy benchmark reporting for vision LLMs")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate report documents from persisted evaluation runs
    Report {
        /// Directory of evaluation-run log files
        #[arg(short, long)]
        logs: Option<PathBuf>,

        /// Directory of source images
        #[arg(short, long)]
        images: Option<PathBuf>,

        /// Output directory for documents
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip the scoreboard document
        #[arg(long)]
        no_scoreboard: bool,

        /// Skip the per-model documents
        #[arg(long)]
        no_models: bool,

        /// Skip the answer-key document
        #[arg(long)]
        no_answers: bool,
    },

    /// List loaded evaluation runs and their sample counts
    ListRuns {
        /// Directory of evaluation-run log files
        #[arg(short, long)]
        logs: Option<PathBuf>,
    },

    /// List dataset images and their ground-truth labels
    ListImages {
        /// Directory of source images
        #[arg(short, long)]
        images: Option<PathBuf>,
    },

    /// Generate sample configuration
    InitConfig {
        /// Output path for configuration file
        #[arg(short, long, default_value = "config/geobench.toml")]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("geobench=debug,info")
    } else {
        EnvFilter::new("geobench=info,warn")
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load_or_default(),
    };

    match cli.command {
        Commands::Report {
            logs,
            images,
            output,
            no_scoreboard,
            no_models,
            no_answers,
        } => {
            let log_dir = logs.unwrap_or_else(|| PathBuf::from(&config.paths.log_dir));
            let images_dir = images.unwrap_or_else(|| PathBuf::from(&config.paths.images_dir));
            let output_dir = output.unwrap_or_else(|| PathBuf::from(&config.paths.output_dir));

            let mut options = config.report.to_options();
            options.scoreboard &= !no_scoreboard;
            options.model_tables &= !no_models;
            options.answer_key &= !no_answers;

            let runs = load_eval_runs(&log_dir)?;
            let results = aggregate(&runs)?;
            let written = generate_reports(&results, &images_dir, &output_dir, &options)?;
            println!(
                "Generated {} document(s) in {}",
                written.len(),
                output_dir.display()
            );
        }

        Commands::ListRuns { logs } => {
            let log_dir = logs.unwrap_or_else(|| PathBuf::from(&config.paths.log_dir));
            let runs = load_eval_runs(&log_dir)?;
            println!("{} run(s) in {}:\n", runs.len(), log_dir.display());
            for run in &runs {
                println!("  {} ({} samples)", run.model, run.samples.len());
            }
        }

        Commands::ListImages { images } => {
            let images_dir = images.unwrap_or_else(|| PathBuf::from(&config.paths.images_dir));
            let samples = dataset_from_dir(&images_dir)?;
            println!("{} image(s) in {}:\n", samples.len(), images_dir.display());
            for sample in &samples {
                println!("  {} -> {}", sample.filename, sample.targets.join(", "));
            }
        }

        Commands::InitConfig { output } => {
            Config::default().save_toml(&output)?;
            println!("Wrote sample configuration to {}", output.display());
        }
    }

    Ok(())
}
