/// Standings retrieval.
///
/// Submodules:
/// - `chess_results`: input classification and export download.
/// - `spreadsheet`: workbook decoding into a raw cell grid.
///
/// `ResultSource` is the seam between the ranking pipeline and the outside
/// world; `LiveSource` reads local workbooks and downloads linked ones.

pub mod chess_results;
pub mod spreadsheet;

use std::time::Duration;

use crate::config::FetchConfig;
use crate::logging::{self, Stage};
use crate::model::StandingsError;

pub use chess_results::InputIdentifier;
pub use spreadsheet::{RawCell, RawSheet};

/// Anything that can turn an input identifier into a standings grid.
pub trait ResultSource {
    fn load(&self, input: &InputIdentifier) -> Result<RawSheet, StandingsError>;
}

/// Reads workbooks from disk and downloads linked tournaments over HTTP.
pub struct LiveSource {
    client: reqwest::blocking::Client,
}

impl LiveSource {
    pub fn new(fetch: &FetchConfig) -> Result<Self, StandingsError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(fetch.timeout_secs.map(Duration::from_secs))
            .user_agent(fetch.user_agent.clone())
            .build()
            .map_err(|e| StandingsError::Fetch(format!("cannot build HTTP client: {}", e)))?;
        Ok(LiveSource { client })
    }
}

impl ResultSource for LiveSource {
    fn load(&self, input: &InputIdentifier) -> Result<RawSheet, StandingsError> {
        match input {
            InputIdentifier::Workbook(path) => {
                let name = path.display().to_string();
                if !path.exists() {
                    return Err(StandingsError::InputNotFound(name));
                }
                logging::info(Stage::Sheet, Some(&name), &format!("Reading standings from file {}", name));
                spreadsheet::read_workbook_file(path)
            }
            InputIdentifier::Link(link) => {
                logging::info(Stage::Fetch, Some(link), &format!("Fetching standings from {}", link));
                let bytes = chess_results::fetch_export(&self.client, link)?;
                logging::debug(Stage::Fetch, Some(link), &format!("Received {} bytes", bytes.len()));
                spreadsheet::read_workbook_bytes(bytes)
            }
        }
    }
}
