//! Runtime configuration.
//!
//! Settings come from an optional TOML file, then environment variables
//! (a `.env` file in the working directory is honoured), then command-line
//! flags applied by the binary. Every field has a default so a run needs no
//! configuration at all.

use serde::Deserialize;
use std::path::Path;

use crate::analysis::aggregate::PlacementWeights;
use crate::logging::LogLevel;
use crate::model::StandingsError;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "chess_standings.toml";

pub const ENV_TIMEOUT_SECS: &str = "CHESS_STANDINGS_TIMEOUT_SECS";
pub const ENV_LOG_LEVEL: &str = "CHESS_STANDINGS_LOG_LEVEL";
pub const ENV_LOG_FILE: &str = "CHESS_STANDINGS_LOG_FILE";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub fetch: FetchConfig,
    pub scoring: ScoringConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Request timeout; `None` waits indefinitely.
    pub timeout_secs: Option<u64>,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        FetchConfig {
            timeout_secs: None,
            user_agent: format!("chess_standings/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Points awarded for 1st/2nd/3rd in each category.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub individual: [u32; 3],
    pub team: [u32; 3],
}

impl Default for ScoringConfig {
    fn default() -> Self {
        let weights = PlacementWeights::default();
        ScoringConfig {
            individual: weights.individual,
            team: weights.team,
        }
    }
}

impl ScoringConfig {
    pub fn weights(&self) -> PlacementWeights {
        PlacementWeights {
            individual: self.individual,
            team: self.team,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
    pub timestamps: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
            file: None,
            timestamps: false,
        }
    }
}

impl LoggingConfig {
    pub fn min_level(&self) -> Result<LogLevel, StandingsError> {
        self.level.parse().map_err(StandingsError::Config)
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Parses a TOML document into an `AppConfig`.
pub fn parse_config(text: &str) -> Result<AppConfig, StandingsError> {
    toml::from_str(text).map_err(|e| StandingsError::Config(e.to_string()))
}

/// Loads the configuration.
///
/// An explicit `path` must exist. Without one, `DEFAULT_CONFIG_FILE` is read
/// if present and defaults are used otherwise. Environment overrides are
/// applied last.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, StandingsError> {
    dotenv::dotenv().ok();

    let mut config = match path {
        Some(p) => {
            let text = std::fs::read_to_string(p).map_err(|e| {
                StandingsError::Config(format!("cannot read {}: {}", p.display(), e))
            })?;
            parse_config(&text)?
        }
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                let text = std::fs::read_to_string(default_path).map_err(|e| {
                    StandingsError::Config(format!("cannot read {}: {}", DEFAULT_CONFIG_FILE, e))
                })?;
                parse_config(&text)?
            } else {
                AppConfig::default()
            }
        }
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    Ok(config)
}

/// Applies environment overrides read through `lookup`.
pub fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F) -> Result<(), StandingsError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
        let secs = raw.trim().parse::<u64>().map_err(|_| {
            StandingsError::Config(format!("{} must be a whole number of seconds, got '{}'", ENV_TIMEOUT_SECS, raw))
        })?;
        config.fetch.timeout_secs = Some(secs);
    }
    if let Some(level) = lookup(ENV_LOG_LEVEL) {
        config.logging.level = level;
    }
    if let Some(file) = lookup(ENV_LOG_FILE) {
        config.logging.file = Some(file);
    }
    Ok(())
}
