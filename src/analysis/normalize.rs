/// Turns a raw standings grid into typed `StandingRow`s.
///
/// Layout of a final-ranking export, relative to the first used row:
///   row 1: tournament title
///   row 4: column names
///   row 5..: one player per row, best first
///
/// Tied players share a merged rank cell, so only the first row of a tie
/// carries the rank; the rest are forward-filled.

use crate::ingest::{RawCell, RawSheet};
use crate::model::{StandingRow, StandingsError};

pub const TITLE_ROW: usize = 1;
pub const HEADER_ROW: usize = 4;
pub const FIRST_PLAYER_ROW: usize = HEADER_ROW + 1;

pub const RANK_COLUMN: &str = "Rk.";
pub const POINTS_COLUMN: &str = "Pts.";
pub const FEDERATION_COLUMN: &str = "FED";
pub const CLUB_COLUMN: &str = "Club/City";

/// Title and player rows of one tournament.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedStandings {
    pub title: String,
    /// Header of the column the affiliations were read from.
    pub affiliation_column: &'static str,
    pub rows: Vec<StandingRow>,
}

/// Positions of the three columns used for ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    pub rank: usize,
    pub affiliation: usize,
    pub points: usize,
    /// Which affiliation column was picked (`FED` or `Club/City`).
    pub affiliation_name: &'static str,
}

// ---------------------------------------------------------------------------
// Header handling
// ---------------------------------------------------------------------------

/// First non-empty cell of the title row, or an empty string.
pub fn tournament_title(sheet: &RawSheet) -> String {
    sheet
        .row(TITLE_ROW)
        .iter()
        .find_map(RawCell::as_text)
        .unwrap_or_default()
}

fn find_column(header: &[RawCell], name: &str) -> Option<usize> {
    header
        .iter()
        .position(|cell| cell.as_text().as_deref() == Some(name))
}

/// Finds the rank, affiliation and points columns in the header row.
/// `FED` wins over `Club/City` when both are present.
pub fn locate_columns(sheet: &RawSheet, title: &str) -> Result<ColumnLayout, StandingsError> {
    let header = sheet.row(HEADER_ROW);
    let schema_error = |detail: String| StandingsError::Schema {
        tournament: title.to_string(),
        detail,
    };

    let (affiliation, affiliation_name) = match find_column(header, FEDERATION_COLUMN) {
        Some(col) => (col, FEDERATION_COLUMN),
        None => find_column(header, CLUB_COLUMN)
            .map(|col| (col, CLUB_COLUMN))
            .ok_or_else(|| {
                schema_error(format!(
                    "neither '{}' nor '{}' column found",
                    FEDERATION_COLUMN, CLUB_COLUMN
                ))
            })?,
    };

    let rank = find_column(header, RANK_COLUMN)
        .ok_or_else(|| schema_error(format!("'{}' column not found", RANK_COLUMN)))?;
    let points = find_column(header, POINTS_COLUMN)
        .ok_or_else(|| schema_error(format!("'{}' column not found", POINTS_COLUMN)))?;

    Ok(ColumnLayout {
        rank,
        affiliation,
        points,
        affiliation_name,
    })
}

// ---------------------------------------------------------------------------
// Row handling
// ---------------------------------------------------------------------------

/// A rank cell holds a positive whole number; anything else is blank.
fn parse_rank(cell: &RawCell) -> Option<u32> {
    cell.as_number()
        .filter(|n| *n >= 1.0 && n.fract() == 0.0 && *n <= u32::MAX as f64)
        .map(|n| n as u32)
}

/// Replaces each blank rank with the nearest preceding non-blank one.
/// Leading blanks stay blank.
pub fn forward_fill_ranks(ranks: &[Option<u32>]) -> Vec<Option<u32>> {
    ranks
        .iter()
        .scan(None, |last, rank| {
            if rank.is_some() {
                *last = *rank;
            }
            Some(*last)
        })
        .collect()
}

/// Normalizes one standings sheet.
///
/// Rows still missing a rank, an affiliation or points after forward-fill
/// are dropped.
pub fn normalize(sheet: &RawSheet) -> Result<NormalizedStandings, StandingsError> {
    let title = tournament_title(sheet);
    let layout = locate_columns(sheet, &title)?;

    let player_rows = sheet.rows.get(FIRST_PLAYER_ROW..).unwrap_or(&[]);
    let raw_ranks: Vec<Option<u32>> = player_rows
        .iter()
        .map(|row| parse_rank(row.get(layout.rank).unwrap_or(&RawCell::Empty)))
        .collect();
    let ranks = forward_fill_ranks(&raw_ranks);

    let rows = player_rows
        .iter()
        .zip(ranks)
        .filter_map(|(row, rank)| {
            let affiliation = row
                .get(layout.affiliation)
                .and_then(RawCell::as_text)
                .filter(|s| !s.is_empty())?;
            let points = row.get(layout.points).and_then(RawCell::as_number)?;
            Some(StandingRow {
                rank: rank?,
                affiliation,
                points,
            })
        })
        .collect();

    Ok(NormalizedStandings {
        title,
        affiliation_column: layout.affiliation_name,
        rows,
    })
}
