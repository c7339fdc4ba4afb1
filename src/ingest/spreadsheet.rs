/// Spreadsheet decoding for standings exports.
///
/// Reads the first worksheet of an `.xlsx` workbook (from disk or from an
/// in-memory HTTP payload) into a plain grid of cells. The grid is anchored
/// at A1: blank leading rows and columns are kept as empty cells.

use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Range, Reader, Sheets};
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use crate::model::StandingsError;

// ---------------------------------------------------------------------------
// Grid types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    Empty,
    Text(String),
    Number(f64),
}

impl RawCell {
    /// Cell content as text, trimmed. Whole numbers print without a fraction.
    pub fn as_text(&self) -> Option<String> {
        match self {
            RawCell::Empty => None,
            RawCell::Text(s) => Some(s.trim().to_string()),
            RawCell::Number(n) if n.fract() == 0.0 => Some(format!("{}", *n as i64)),
            RawCell::Number(n) => Some(n.to_string()),
        }
    }

    /// Numeric value; text is parsed accepting either `.` or `,` as the
    /// decimal separator.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            RawCell::Empty => None,
            RawCell::Number(n) => Some(*n),
            RawCell::Text(s) => s.trim().replace(',', ".").parse().ok(),
        }
    }
}

/// Untyped grid of one worksheet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSheet {
    pub rows: Vec<Vec<RawCell>>,
}

impl RawSheet {
    pub fn new(rows: Vec<Vec<RawCell>>) -> Self {
        RawSheet { rows }
    }

    pub fn row(&self, row: usize) -> &[RawCell] {
        self.rows.get(row).map(Vec::as_slice).unwrap_or(&[])
    }
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Reads the first worksheet of a workbook on disk.
pub fn read_workbook_file(path: &Path) -> Result<RawSheet, StandingsError> {
    let workbook = open_workbook_auto(path)
        .map_err(|e| StandingsError::Spreadsheet(format!("{}: {}", path.display(), e)))?;
    first_sheet(workbook)
}

/// Reads the first worksheet of a workbook held in memory.
pub fn read_workbook_bytes(bytes: Vec<u8>) -> Result<RawSheet, StandingsError> {
    let workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| StandingsError::Spreadsheet(e.to_string()))?;
    first_sheet(workbook)
}

fn first_sheet<RS: Read + Seek>(mut workbook: Sheets<RS>) -> Result<RawSheet, StandingsError> {
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| StandingsError::Spreadsheet("workbook has no worksheets".to_string()))?
        .map_err(|e| StandingsError::Spreadsheet(e.to_string()))?;
    Ok(range_to_sheet(&range))
}

fn range_to_sheet(range: &Range<Data>) -> RawSheet {
    let (skip_rows, skip_cols) = range.start().unwrap_or((0, 0));

    let mut rows: Vec<Vec<RawCell>> = vec![Vec::new(); skip_rows as usize];
    rows.extend(range.rows().map(|row| {
        let mut cells = vec![RawCell::Empty; skip_cols as usize];
        cells.extend(row.iter().map(convert_cell));
        cells
    }));
    RawSheet::new(rows)
}

fn convert_cell(data: &Data) -> RawCell {
    match data {
        Data::Empty => RawCell::Empty,
        Data::Int(i) => RawCell::Number(*i as f64),
        Data::Float(f) => RawCell::Number(*f),
        Data::String(s) if s.trim().is_empty() => RawCell::Empty,
        Data::String(s) => RawCell::Text(s.clone()),
        Data::Error(_) => RawCell::Empty,
        other => RawCell::Text(other.to_string()),
    }
}
