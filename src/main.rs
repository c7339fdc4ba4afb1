//! Standings CLI
//!
//! Determine the individual, team and overall podiums of tournaments
//! published on chess-results.com.

use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use std::process::ExitCode;

use chess_standings::config::{self, AppConfig};
use chess_standings::ingest::LiveSource;
use chess_standings::logging::{self, Stage};
use chess_standings::model::StandingsError;
use chess_standings::output::{self, OutputFormat};
use chess_standings::pipeline;

#[derive(Parser)]
#[command(name = "chess_standings")]
#[command(
    about = "Determine the individual, team and overall podiums of tournaments hosted on chess-results.com",
    long_about = None
)]
struct Cli {
    /// Tournament links or paths to downloaded standings (.xlsx)
    #[arg(value_name = "INPUT", required = true, num_args = 1..)]
    inputs: Vec<String>,

    /// Output file (.csv, .xlsx, .html, .json); prints to the console if omitted
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Teams/affiliations to leave out of the team ranking
    #[arg(short, long, value_name = "NAME", num_args = 1..)]
    exclude: Vec<String>,

    /// TOML configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// HTTP request timeout in seconds (no timeout by default)
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,
}

fn run(cli: Cli) -> Result<(), StandingsError> {
    let format = OutputFormat::for_target(cli.output.as_deref())?;

    let mut app_config: AppConfig = config::load_config(cli.config.as_deref())?;
    if cli.timeout.is_some() {
        app_config.fetch.timeout_secs = cli.timeout;
    }
    logging::init_logger(
        app_config.logging.min_level()?,
        app_config.logging.file.as_deref(),
        app_config.logging.timestamps,
    );
    let config_source = cli
        .config
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| config::DEFAULT_CONFIG_FILE.to_string());
    logging::debug(
        Stage::Config,
        Some(&config_source),
        &format!("Fetch timeout: {:?}", app_config.fetch.timeout_secs),
    );

    let source = LiveSource::new(&app_config.fetch)?;
    let standings = pipeline::compute_standings(
        &source,
        &cli.inputs,
        &cli.exclude,
        app_config.scoring.weights(),
    )?;

    output::present(&standings.table, format, cli.output.as_deref())?;
    if let Some(path) = &cli.output {
        logging::info(Stage::Output, None, &format!("Wrote standings to {}", path.display()));
    }
    Ok(())
}

fn main() -> ExitCode {
    if std::env::args_os().len() <= 1 {
        // Bare invocation shows usage rather than a missing-argument error
        let _ = Cli::command().print_help();
        return ExitCode::SUCCESS;
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    // Errors before the configured logger exists still need reporting
    logging::init_logger(logging::LogLevel::Info, None, false);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            logging::error(logging::stage_for_error(&e), None, &e.to_string());
            ExitCode::from(1)
        }
    }
}
