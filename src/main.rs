// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, warn};
use std::io::Write;
use std::path::{Path, PathBuf};

use crictag::app_config::{self, Config};
use crictag::app_controller::{Controller, RunPaths};
use crictag::file_utils::FileManager;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for crictag
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// crictag - Cricket commentary labeling with a local LLM
///
/// Classifies each commentary segment of a transcript into a fixed label
/// vocabulary using an Ollama model, then writes the labeled transcript as
/// JSON and CSV.
#[derive(Parser, Debug)]
#[command(name = "crictag")]
#[command(version)]
#[command(about = "Label cricket commentary with a local LLM")]
#[command(long_about = "crictag sends each commentary segment to a local Ollama model and records one label per segment.

EXAMPLES:
    crictag                                         # Use data/ next to the executable
    crictag transcript.json labels.json labels.csv  # Explicit input and outputs
    crictag -m llama3.1:8b transcript.json          # Override the model
    crictag --log-level debug transcript.json       # Show raw model answers
    crictag completions bash > crictag.bash         # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Transcript JSON to label [default: <exe dir>/data/transcript_clean.json]
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Labeled JSON output [default: <exe dir>/data/transcript_labeled.json]
    #[arg(value_name = "OUTPUT_JSON")]
    output_json: Option<PathBuf>,

    /// Labeled CSV output [default: <exe dir>/data/transcript_labeled.csv]
    #[arg(value_name = "OUTPUT_CSV")]
    output_csv: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long = "config", default_value = "conf.json")]
    config_path: String,

    /// Model name to use for classification
    #[arg(short, long)]
    model: Option<String>,

    /// Ollama endpoint URL
    #[arg(short, long, env = "OLLAMA_HOST")]
    endpoint: Option<String>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger { level: LevelFilter::Trace }))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());
            let _ = writeln!(
                std::io::stderr(),
                "{}{} {:<5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Info by default; refined once the config is loaded
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "crictag", &mut std::io::stdout());
        return Ok(());
    }

    run_labeling(cli).await
}

async fn run_labeling(options: CommandLineOptions) -> Result<()> {
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let config = load_config(&options)?;
    if options.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    let paths = resolve_paths(&options)?;
    let controller = Controller::with_config(config)?;
    controller.run(&paths).await?;

    Ok(())
}

// Load or create the configuration, then apply CLI overrides
fn load_config(options: &CommandLineOptions) -> Result<Config> {
    let config_path = Path::new(&options.config_path);
    let mut config = if config_path.exists() {
        Config::from_file(config_path)?
    } else {
        warn!("Config file not found at '{}', creating default config.", options.config_path);
        let config = Config::default();
        config.save(config_path)?;
        config
    };

    if let Some(model) = &options.model {
        config.provider.model = model.clone();
    }

    if let Some(endpoint) = &options.endpoint {
        config.provider.endpoint = normalize_endpoint(endpoint);
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    Ok(config)
}

const OLLAMA_DEFAULT_PORT: u16 = 11434;

// OLLAMA_HOST is often given as a bare `host` or `host:port`
fn normalize_endpoint(endpoint: &str) -> String {
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        return endpoint.to_string();
    }

    let with_scheme = format!("http://{}", endpoint);
    let authority = endpoint.split('/').next().unwrap_or_default();
    let explicit_port = authority
        .rsplit_once(':')
        .is_some_and(|(_, port)| port.parse::<u16>().is_ok());

    match url::Url::parse(&with_scheme) {
        Ok(mut parsed) if !explicit_port => {
            if parsed.set_port(Some(OLLAMA_DEFAULT_PORT)).is_err() {
                return with_scheme;
            }
            parsed.as_str().trim_end_matches('/').to_string()
        }
        _ => with_scheme,
    }
}

// Positional paths fall back to the data directory next to the executable
fn resolve_paths(options: &CommandLineOptions) -> Result<RunPaths> {
    let exe = std::env::current_exe().context("Failed to locate the running executable")?;
    let data_dir = exe.parent().unwrap_or(Path::new(".")).join("data");
    FileManager::ensure_dir(&data_dir)?;

    let defaults = RunPaths::in_data_dir(&data_dir);
    Ok(RunPaths {
        input: options.input.clone().unwrap_or(defaults.input),
        output_json: options.output_json.clone().unwrap_or(defaults.output_json),
        output_csv: options.output_csv.clone().unwrap_or(defaults.output_csv),
    })
}
