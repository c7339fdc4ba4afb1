/// Core data types for the chess standings service.
///
/// This module defines the shared domain model imported by all other modules:
/// normalized standing rows, per-tournament results, the combined output
/// table and the error type. It contains no I/O.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Placements
// ---------------------------------------------------------------------------

/// A podium slot. Only the first three places are ever reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Placement {
    First,
    Second,
    Third,
}

impl Placement {
    /// All podium slots, best first.
    pub const ALL: [Placement; 3] = [Placement::First, Placement::Second, Placement::Third];

    /// Row label used in every rendered table.
    pub fn label(self) -> &'static str {
        match self {
            Placement::First => "1st",
            Placement::Second => "2nd",
            Placement::Third => "3rd",
        }
    }

    /// Zero-based position of the slot.
    pub fn index(self) -> usize {
        match self {
            Placement::First => 0,
            Placement::Second => 1,
            Placement::Third => 2,
        }
    }
}

// ---------------------------------------------------------------------------
// Standings
// ---------------------------------------------------------------------------

/// One player line of a final standings table after normalization.
///
/// Rows read in source order have non-decreasing `rank`; tied players share
/// a rank. `affiliation` is a federation code (e.g. "VIE") or, for events
/// without federations, the club/city column.
#[derive(Debug, Clone, PartialEq)]
pub struct StandingRow {
    pub rank: u32,
    pub affiliation: String,
    pub points: f64,
}

/// An individual podium finish: the player's affiliation and final rank.
#[derive(Debug, Clone, PartialEq)]
pub struct IndividualPlacement {
    pub affiliation: String,
    pub rank: u32,
}

/// A team podium finish. `score` is the sum of the best three ranks.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamPlacement {
    pub affiliation: String,
    pub score: u32,
}

/// Team score inputs for one affiliation. Only built for affiliations with
/// at least three players.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamCandidate {
    pub affiliation: String,
    /// Sum of the ranks of the three best players (lower is better).
    pub best_three_rank_sum: u32,
    /// Points of every player of the affiliation (higher is better).
    pub total_points: f64,
    /// Best rank reached by any player of the affiliation.
    pub min_rank: u32,
}

/// Podium results of a single tournament. Both lists hold at most three
/// entries, best first.
#[derive(Debug, Clone, PartialEq)]
pub struct TournamentResult {
    pub title: String,
    pub individual_top3: Vec<IndividualPlacement>,
    pub team_top3: Vec<TeamPlacement>,
}

impl TournamentResult {
    pub fn individual_at(&self, placement: Placement) -> Option<&IndividualPlacement> {
        self.individual_top3.get(placement.index())
    }

    pub fn team_at(&self, placement: Placement) -> Option<&TeamPlacement> {
        self.team_top3.get(placement.index())
    }
}

// ---------------------------------------------------------------------------
// Combined output table
// ---------------------------------------------------------------------------

/// Column group used for the cross-tournament ranking.
pub const OVERALL_GROUP: &str = "Overall";
pub const INDIVIDUAL_CATEGORY: &str = "Individual";
pub const TEAM_CATEGORY: &str = "Team";

/// Two-level column header: the tournament title and the category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnHeader {
    pub group: String,
    pub category: String,
}

/// One placement row. `cells` lines up with `CombinedTable::columns`;
/// `None` marks a placement nobody earned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub label: String,
    pub cells: Vec<Option<String>>,
}

/// The final table written by the presenters: one row per podium slot,
/// two columns per tournament in input order, then the overall column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinedTable {
    pub columns: Vec<ColumnHeader>,
    pub rows: Vec<TableRow>,
}

impl CombinedTable {
    /// An empty table with the three placement rows and no columns.
    pub fn with_placement_rows() -> Self {
        CombinedTable {
            columns: Vec::new(),
            rows: Placement::ALL
                .iter()
                .map(|p| TableRow {
                    label: p.label().to_string(),
                    cells: Vec::new(),
                })
                .collect(),
        }
    }

    /// Appends a column; `values[i]` fills the row of `Placement::ALL[i]`.
    pub fn push_column(&mut self, header: ColumnHeader, values: [Option<String>; 3]) {
        self.columns.push(header);
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.cells.push(value);
        }
    }

    /// Header groups as (group, span). A tournament's Individual/Team pair
    /// spans two columns; every other column spans one. Tournaments sharing
    /// a title still get separate spans.
    pub fn group_spans(&self) -> Vec<(&str, usize)> {
        let mut spans = Vec::new();
        let mut i = 0;
        while let Some(column) = self.columns.get(i) {
            let pairs_with_next = column.category == INDIVIDUAL_CATEGORY
                && self.columns.get(i + 1).is_some_and(|next| {
                    next.category == TEAM_CATEGORY && next.group == column.group
                });
            let span = if pairs_with_next { 2 } else { 1 };
            spans.push((column.group.as_str(), span));
            i += span;
        }
        spans
    }

    pub fn cell(&self, placement: Placement, column: usize) -> Option<&str> {
        self.rows
            .get(placement.index())
            .and_then(|row| row.cells.get(column))
            .and_then(|cell| cell.as_deref())
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that end a standings run. Every variant is terminal.
#[derive(Debug, PartialEq)]
pub enum StandingsError {
    /// A local spreadsheet path does not exist.
    InputNotFound(String),
    /// The input is neither a spreadsheet path nor a results-site link.
    InvalidIdentifier(String),
    /// Neither affiliation column (nor a required rank/points column) exists.
    Schema { tournament: String, detail: String },
    /// The output path has an extension no presenter handles.
    UnsupportedOutputFormat(String),
    /// Transport failure or non-2xx response from the results site.
    Fetch(String),
    /// The payload could not be decoded as a spreadsheet.
    Spreadsheet(String),
    /// Configuration file or environment override is unusable.
    Config(String),
    /// Reading or writing a local file failed.
    Io(String),
    /// A presenter failed while serializing the table.
    Export(String),
}

impl std::fmt::Display for StandingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StandingsError::InputNotFound(path) => write!(f, "File not found: {}", path),
            StandingsError::InvalidIdentifier(input) => write!(f, "Invalid input: {}", input),
            StandingsError::Schema { tournament, detail } => {
                write!(f, "Unexpected standings layout in '{}': {}", tournament, detail)
            }
            StandingsError::UnsupportedOutputFormat(path) => {
                write!(f, "Unsupported output file type: {}", path)
            }
            StandingsError::Fetch(msg) => write!(f, "Fetch error: {}", msg),
            StandingsError::Spreadsheet(msg) => write!(f, "Spreadsheet error: {}", msg),
            StandingsError::Config(msg) => write!(f, "Config error: {}", msg),
            StandingsError::Io(msg) => write!(f, "IO error: {}", msg),
            StandingsError::Export(msg) => write!(f, "Export error: {}", msg),
        }
    }
}

impl std::error::Error for StandingsError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_labels_and_indices_line_up() {
        let labels: Vec<_> = Placement::ALL.iter().map(|p| p.label()).collect();
        assert_eq!(labels, vec!["1st", "2nd", "3rd"]);
        for (i, p) in Placement::ALL.iter().enumerate() {
            assert_eq!(p.index(), i);
        }
    }

    #[test]
    fn test_push_column_fills_each_placement_row() {
        let mut table = CombinedTable::with_placement_rows();
        table.push_column(
            ColumnHeader {
                group: "Open".to_string(),
                category: INDIVIDUAL_CATEGORY.to_string(),
            },
            [Some("VIE".to_string()), Some("IND".to_string()), None],
        );

        assert_eq!(table.columns.len(), 1);
        assert_eq!(table.cell(Placement::First, 0), Some("VIE"));
        assert_eq!(table.cell(Placement::Second, 0), Some("IND"));
        assert_eq!(table.cell(Placement::Third, 0), None);
        assert_eq!(table.cell(Placement::First, 1), None);
    }

    #[test]
    fn test_group_spans_pair_individual_and_team() {
        let mut table = CombinedTable::with_placement_rows();
        for (group, category) in [("Open", "Individual"), ("Open", "Team"), ("Blitz", "Individual"), ("Open", "Team")] {
            table.push_column(
                ColumnHeader {
                    group: group.to_string(),
                    category: category.to_string(),
                },
                [None, None, None],
            );
        }
        assert_eq!(table.group_spans(), vec![("Open", 2), ("Blitz", 1), ("Open", 1)]);
    }

    #[test]
    fn test_same_titled_tournaments_get_separate_spans() {
        let mut table = CombinedTable::with_placement_rows();
        for (group, category) in [
            ("Open", INDIVIDUAL_CATEGORY),
            ("Open", TEAM_CATEGORY),
            ("Open", INDIVIDUAL_CATEGORY),
            ("Open", TEAM_CATEGORY),
            (OVERALL_GROUP, ""),
        ] {
            table.push_column(
                ColumnHeader {
                    group: group.to_string(),
                    category: category.to_string(),
                },
                [None, None, None],
            );
        }
        assert_eq!(table.group_spans(), vec![("Open", 2), ("Open", 2), ("Overall", 1)]);
    }

    #[test]
    fn test_error_messages_name_the_offending_input() {
        let err = StandingsError::UnsupportedOutputFormat("result.txt".to_string());
        assert!(err.to_string().contains("result.txt"));

        let err = StandingsError::Schema {
            tournament: "Open".to_string(),
            detail: "missing FED".to_string(),
        };
        assert!(err.to_string().contains("Open"));
        assert!(err.to_string().contains("missing FED"));
    }
}
