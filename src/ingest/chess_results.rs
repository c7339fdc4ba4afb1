/// chess-results.com client
///
/// Recognizes tournament links and spreadsheet paths, and downloads the
/// Excel export of a tournament's final standings.
///
/// Export query reference: the site's "Excel-Export" button on the final
/// ranking page (`art=1`) produces the same URL.

use regex::Regex;
use std::path::PathBuf;
use std::sync::LazyLock;

use crate::model::StandingsError;

const EXPORT_QUERY: &str = "lan=1&zeilen=0&art=1&rd=-1&turdet=YES&prt=4&excel=2010";

/// Spreadsheet extension accepted for local inputs.
pub const WORKBOOK_EXTENSION: &str = ".xlsx";

static TOURNAMENT_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https://chess-results\.com/tnr\d+\.aspx").expect("tournament link pattern is valid")
});

// ============================================================================
// Input identifiers
// ============================================================================

/// A command-line input, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputIdentifier {
    /// A downloaded standings workbook.
    Workbook(PathBuf),
    /// A tournament page; holds only the matched `.../tnrNNN.aspx` prefix.
    Link(String),
}

impl InputIdentifier {
    /// Classifies `input`. Existence of a workbook path is not checked here.
    pub fn parse(input: &str) -> Result<Self, StandingsError> {
        if input.ends_with(WORKBOOK_EXTENSION) {
            return Ok(InputIdentifier::Workbook(PathBuf::from(input)));
        }

        TOURNAMENT_LINK
            .find(input)
            .map(|m| InputIdentifier::Link(m.as_str().to_string()))
            .ok_or_else(|| StandingsError::InvalidIdentifier(input.to_string()))
    }

    /// Human-readable form used in log lines.
    pub fn display_name(&self) -> String {
        match self {
            InputIdentifier::Workbook(path) => path.display().to_string(),
            InputIdentifier::Link(link) => link.clone(),
        }
    }
}

// ============================================================================
// API Client Functions
// ============================================================================

/// Builds the spreadsheet export URL for a tournament link.
pub fn build_export_url(link: &str) -> String {
    format!("{}?{}", link, EXPORT_QUERY)
}

/// Downloads the standings export for `link`.
///
/// # Returns
/// The raw workbook bytes from the response body.
pub fn fetch_export(
    client: &reqwest::blocking::Client,
    link: &str,
) -> Result<Vec<u8>, StandingsError> {
    let url = build_export_url(link);

    let response = client
        .get(&url)
        .send()
        .map_err(|e| StandingsError::Fetch(format!("request to {} failed: {}", url, e)))?;

    if !response.status().is_success() {
        return Err(StandingsError::Fetch(format!(
            "{} returned HTTP {}",
            url,
            response.status()
        )));
    }

    let body = response
        .bytes()
        .map_err(|e| StandingsError::Fetch(format!("reading body of {} failed: {}", url, e)))?;
    Ok(body.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xlsx_path_is_workbook() {
        assert_eq!(
            InputIdentifier::parse("downloads/open2024.xlsx"),
            Ok(InputIdentifier::Workbook(PathBuf::from("downloads/open2024.xlsx")))
        );
    }

    #[test]
    fn test_link_keeps_only_tournament_prefix() {
        let parsed = InputIdentifier::parse(
            "https://chess-results.com/tnr912345.aspx?lan=32&art=1&rd=9",
        );
        assert_eq!(
            parsed,
            Ok(InputIdentifier::Link("https://chess-results.com/tnr912345.aspx".to_string()))
        );
    }

    #[test]
    fn test_other_inputs_are_invalid() {
        for input in [
            "open2024.xls",
            "open2024.csv",
            "http://chess-results.com/tnr912345.aspx",
            "https://chess-results.com/tnr.aspx",
            "https://example.com/tnr912345.aspx",
            "see https://chess-results.com/tnr912345.aspx",
            "",
        ] {
            assert_eq!(
                InputIdentifier::parse(input),
                Err(StandingsError::InvalidIdentifier(input.to_string())),
                "'{}' should be rejected",
                input
            );
        }
    }

    #[test]
    fn test_export_url_requests_excel_final_ranking() {
        let url = build_export_url("https://chess-results.com/tnr912345.aspx");
        assert_eq!(
            url,
            "https://chess-results.com/tnr912345.aspx?lan=1&zeilen=0&art=1&rd=-1&turdet=YES&prt=4&excel=2010"
        );
    }

    #[test]
    fn test_display_name_matches_input() {
        let link = InputIdentifier::Link("https://chess-results.com/tnr1.aspx".to_string());
        assert_eq!(link.display_name(), "https://chess-results.com/tnr1.aspx");
        let path = InputIdentifier::Workbook(PathBuf::from("a.xlsx"));
        assert_eq!(path.display_name(), "a.xlsx");
    }
}
