mod atomic;
mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use schemars::schema_for;
use thiserror::Error;
use vendsynth_core::{ConfigError, DatasetConfig};
use vendsynth_generate::{GenerateOptions, GenerationEngine, GenerationError};

use atomic::write_bytes_atomic;
use logging::{LogFormat, init_logging};

#[derive(Debug, Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("logging error: {0}")]
    Logging(String),
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

#[derive(Parser, Debug)]
#[command(
    name = "vendsynth",
    version,
    about = "Synthetic vending-machine dataset generator"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a dataset and print the run directory.
    Generate(GenerateArgs),
    /// Write the default configuration as TOML.
    InitConfig(InitConfigArgs),
    /// Print the JSON Schema of the configuration.
    ConfigSchema,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Configuration file (TOML, or JSON by extension). Defaults apply when
    /// omitted.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Directory where run directories are created.
    #[arg(long, default_value = "out")]
    out_dir: PathBuf,
    /// Override the configured seed.
    #[arg(long)]
    seed: Option<u64>,
    /// Override the configured null marker.
    #[arg(long, value_name = "S")]
    null_marker: Option<String>,
    /// Log output format.
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

#[derive(Args, Debug)]
struct InitConfigArgs {
    /// Destination file.
    #[arg(long, default_value = "vendsynth.toml")]
    out: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::InitConfig(args) => run_init_config(args),
        Command::ConfigSchema => run_config_schema(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    init_logging(args.log_format)?;

    let config = resolve_config(&args)?;
    let engine = GenerationEngine::new(GenerateOptions {
        out_dir: args.out_dir,
        ..GenerateOptions::default()
    });
    let result = engine.run(&config)?;

    tracing::info!(
        run_dir = %result.run_dir.display(),
        run_id = %result.report.run_id,
        bytes_written = result.report.bytes_written,
        "dataset written"
    );
    println!("{}", result.run_dir.display());
    Ok(())
}

/// Load the configuration file when given and apply command-line overrides.
fn resolve_config(args: &GenerateArgs) -> Result<DatasetConfig, CliError> {
    let mut config = match &args.config {
        Some(path) => DatasetConfig::from_path(path)?,
        None => DatasetConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(marker) = &args.null_marker {
        if marker.is_empty() {
            return Err(CliError::InvalidArgs(
                "--null-marker must not be empty".to_string(),
            ));
        }
        config.null_marker = marker.clone();
    }
    Ok(config)
}

fn run_init_config(args: InitConfigArgs) -> Result<(), CliError> {
    let toml = DatasetConfig::default().to_toml_string()?;
    write_bytes_atomic(&args.out, toml.as_bytes())?;
    println!("{}", args.out.display());
    Ok(())
}

fn run_config_schema() -> Result<(), CliError> {
    let schema = schema_for!(DatasetConfig);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
