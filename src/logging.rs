/// Structured logging for the standings service
///
/// Provides context-rich logging tagged with the pipeline stage and the
/// input (file path or link) being processed, timestamps, and severity
/// levels. Supports both console output and an append-only log file.

use chrono::Utc;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::str::FromStr;
use std::sync::Mutex;

use crate::model::StandingsError;

// ---------------------------------------------------------------------------
// Log Levels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warning => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            other => Err(format!("unknown log level '{}'", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// Pipeline Stages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    /// HTTP retrieval of a standings export
    Fetch,
    /// Spreadsheet decoding and normalization
    Sheet,
    /// Individual/team ranking and cross-event aggregation
    Rank,
    /// Presenting the combined table
    Output,
    Config,
    System,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Fetch => write!(f, "FETCH"),
            Stage::Sheet => write!(f, "SHEET"),
            Stage::Rank => write!(f, "RANK"),
            Stage::Output => write!(f, "OUT"),
            Stage::Config => write!(f, "CFG"),
            Stage::System => write!(f, "SYS"),
        }
    }
}

// ---------------------------------------------------------------------------
// Logger Configuration
// ---------------------------------------------------------------------------

/// Global logger instance
static LOGGER: Mutex<Option<Logger>> = Mutex::new(None);

pub struct Logger {
    /// Minimum log level to display
    min_level: LogLevel,
    /// Optional file path for logging
    log_file: Option<String>,
    /// Whether to include timestamps in console output
    console_timestamps: bool,
}

impl Logger {
    /// Initialize the global logger
    pub fn init(min_level: LogLevel, log_file: Option<String>, console_timestamps: bool) {
        let logger = Logger {
            min_level,
            log_file,
            console_timestamps,
        };

        if let Ok(mut slot) = LOGGER.lock() {
            *slot = Some(logger);
        }
    }

    fn format_entry(level: LogLevel, stage: &Stage, input: Option<&str>, message: &str) -> String {
        let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
        let input_part = input.map(|s| format!(" [{}]", s)).unwrap_or_default();
        format!("{} {} {}{}: {}", timestamp, level, stage, input_part, message)
    }

    fn log(&self, level: LogLevel, stage: &Stage, input: Option<&str>, message: &str) {
        if level < self.min_level {
            return;
        }

        let log_entry = Self::format_entry(level, stage, input, message);

        // Progress goes to stdout, problems to stderr
        let line = self.console_line(level, stage, input, message, &log_entry);
        match level {
            LogLevel::Error | LogLevel::Warning => eprintln!("{}", line),
            LogLevel::Info | LogLevel::Debug => println!("{}", line),
        }

        if let Some(ref path) = self.log_file {
            if let Err(e) = Self::append_to_file(path, &log_entry) {
                eprintln!("Failed to write to log file {}: {}", path, e);
            }
        }
    }

    /// Console form of an entry: the full timestamped entry, or a short
    /// marker-prefixed line when timestamps are off.
    fn console_line(
        &self,
        level: LogLevel,
        stage: &Stage,
        input: Option<&str>,
        message: &str,
        entry: &str,
    ) -> String {
        if self.console_timestamps {
            return entry.to_string();
        }
        let input_part = input.map(|s| format!(" [{}]", s)).unwrap_or_default();
        match level {
            LogLevel::Error => format!("✗ {}{}: {}", stage, input_part, message),
            LogLevel::Warning => format!("⚠ {}{}: {}", stage, input_part, message),
            LogLevel::Info => message.to_string(),
            LogLevel::Debug => format!("· {}{}: {}", stage, input_part, message),
        }
    }

    fn append_to_file(path: &str, entry: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        writeln!(file, "{}", entry)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Public Logging Functions
// ---------------------------------------------------------------------------

/// Initialize the global logger
pub fn init_logger(min_level: LogLevel, log_file: Option<&str>, console_timestamps: bool) {
    Logger::init(min_level, log_file.map(String::from), console_timestamps);
}

fn dispatch(level: LogLevel, stage: Stage, input: Option<&str>, message: &str) {
    if let Ok(guard) = LOGGER.lock() {
        if let Some(logger) = guard.as_ref() {
            logger.log(level, &stage, input, message);
        }
    }
}

/// Log a general informational message
pub fn info(stage: Stage, input: Option<&str>, message: &str) {
    dispatch(LogLevel::Info, stage, input, message);
}

/// Log a warning message
pub fn warn(stage: Stage, input: Option<&str>, message: &str) {
    dispatch(LogLevel::Warning, stage, input, message);
}

/// Log an error message
pub fn error(stage: Stage, input: Option<&str>, message: &str) {
    dispatch(LogLevel::Error, stage, input, message);
}

/// Log a debug message
pub fn debug(stage: Stage, input: Option<&str>, message: &str) {
    dispatch(LogLevel::Debug, stage, input, message);
}

/// Stage an error is reported under.
pub fn stage_for_error(err: &StandingsError) -> Stage {
    match err {
        StandingsError::Fetch(_) => Stage::Fetch,
        StandingsError::InputNotFound(_)
        | StandingsError::Spreadsheet(_)
        | StandingsError::Schema { .. } => Stage::Sheet,
        StandingsError::UnsupportedOutputFormat(_)
        | StandingsError::Export(_)
        | StandingsError::Io(_) => Stage::Output,
        StandingsError::Config(_) => Stage::Config,
        StandingsError::InvalidIdentifier(_) => Stage::System,
    }
}

// ---------------------------------------------------------------------------
// Run Summary Logging
// ---------------------------------------------------------------------------

/// Log a summary of a completed standings run
pub fn log_run_summary(tournaments: usize, affiliations_scored: usize) {
    let message = format!(
        "Standings complete: {} tournament(s) processed, {} affiliation(s) scored",
        tournaments, affiliations_scored
    );

    if affiliations_scored == 0 {
        warn(Stage::Rank, None, &message);
    } else {
        info(Stage::Rank, None, &message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warning);
        assert!(LogLevel::Warning < LogLevel::Error);
    }

    #[test]
    fn test_log_level_parses_case_insensitively() {
        assert_eq!("INFO".parse::<LogLevel>(), Ok(LogLevel::Info));
        assert_eq!("warn".parse::<LogLevel>(), Ok(LogLevel::Warning));
        assert_eq!(" Debug ".parse::<LogLevel>(), Ok(LogLevel::Debug));
        assert!("verbose".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_entry_carries_stage_and_input() {
        let entry = Logger::format_entry(
            LogLevel::Error,
            &Stage::Fetch,
            Some("https://chess-results.com/tnr1.aspx"),
            "HTTP 500",
        );
        assert!(entry.contains("ERROR FETCH [https://chess-results.com/tnr1.aspx]: HTTP 500"));
        assert!(entry.contains("UTC"));
    }

    #[test]
    fn test_debug_lines_reach_console_without_timestamps() {
        let logger = Logger {
            min_level: LogLevel::Debug,
            log_file: None,
            console_timestamps: false,
        };
        let line = logger.console_line(LogLevel::Debug, &Stage::Sheet, Some("open.xlsx"), "12 rows", "entry");
        assert_eq!(line, "· SHEET [open.xlsx]: 12 rows");
        assert_eq!(
            logger.console_line(LogLevel::Info, &Stage::Sheet, Some("open.xlsx"), "Read tournament", "entry"),
            "Read tournament"
        );
    }

    #[test]
    fn test_timestamped_console_uses_full_entry() {
        let logger = Logger {
            min_level: LogLevel::Debug,
            log_file: None,
            console_timestamps: true,
        };
        let line = logger.console_line(LogLevel::Debug, &Stage::Fetch, None, "200 OK", "full entry");
        assert_eq!(line, "full entry");
    }

    #[test]
    fn test_config_errors_are_reported_under_config_stage() {
        assert_eq!(stage_for_error(&StandingsError::Config("bad".to_string())), Stage::Config);
        assert_eq!(stage_for_error(&StandingsError::Fetch("503".to_string())), Stage::Fetch);
        assert_eq!(
            stage_for_error(&StandingsError::UnsupportedOutputFormat("result.txt".to_string())),
            Stage::Output
        );
    }

    #[test]
    fn test_file_output_appends_entries() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("standings.log");
        let path_str = path.to_string_lossy().to_string();

        Logger::append_to_file(&path_str, "first").expect("append first");
        Logger::append_to_file(&path_str, "second").expect("append second");

        let contents = std::fs::read_to_string(&path).expect("read log");
        assert_eq!(contents, "first\nsecond\n");
    }
}
