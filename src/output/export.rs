//! File exporters: CSV, XLSX and JSON.
//!
//! CSV and XLSX share the console layout: two header rows (tournament,
//! category) with the placement label in the first column. JSON is the
//! `CombinedTable` structure itself so it can be read back losslessly.

use rust_xlsxwriter::{Format, Workbook, XlsxError};
use serde::Serialize;
use std::path::Path;

use crate::model::{CombinedTable, StandingsError};

/// Worksheet name used for XLSX output.
pub const SHEET_NAME: &str = "Standings";

fn export_error(path: &Path, err: impl std::fmt::Display) -> StandingsError {
    StandingsError::Export(format!("{}: {}", path.display(), err))
}

/// Header and body records shared by the tabular exporters.
fn records(table: &CombinedTable) -> Vec<Vec<String>> {
    let mut records = Vec::with_capacity(table.rows.len() + 2);

    let mut groups = vec![String::new()];
    groups.extend(table.columns.iter().map(|c| c.group.clone()));
    records.push(groups);

    let mut categories = vec![String::new()];
    categories.extend(table.columns.iter().map(|c| c.category.clone()));
    records.push(categories);

    for row in &table.rows {
        let mut record = vec![row.label.clone()];
        record.extend(row.cells.iter().map(|c| c.clone().unwrap_or_default()));
        records.push(record);
    }
    records
}

// ============================================================================
// CSV
// ============================================================================

pub fn write_csv(table: &CombinedTable, path: &Path) -> Result<(), StandingsError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| export_error(path, e))?;
    for record in records(table) {
        writer.write_record(&record).map_err(|e| export_error(path, e))?;
    }
    writer.flush().map_err(|e| export_error(path, e))
}

// ============================================================================
// XLSX
// ============================================================================

fn build_workbook(table: &CombinedTable) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    // Tournament titles, merged over their category columns
    let mut col: u16 = 1;
    for (group, span) in table.group_spans() {
        let span = u16::try_from(span).unwrap_or(u16::MAX);
        if span > 1 {
            worksheet.merge_range(0, col, 0, col + span - 1, group, &bold)?;
        } else {
            worksheet.write_string_with_format(0, col, group, &bold)?;
        }
        col = col.saturating_add(span);
    }

    for (record_index, record) in records(table).iter().enumerate().skip(1) {
        let row = record_index as u32;
        for (col_index, value) in record.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            let col = col_index as u16;
            if record_index == 1 || col_index == 0 {
                worksheet.write_string_with_format(row, col, value, &bold)?;
            } else {
                worksheet.write_string(row, col, value)?;
            }
        }
    }

    Ok(workbook)
}

pub fn write_xlsx(table: &CombinedTable, path: &Path) -> Result<(), StandingsError> {
    let mut workbook = build_workbook(table).map_err(|e| export_error(path, e))?;
    workbook.save(path).map_err(|e| export_error(path, e))
}

// ============================================================================
// JSON
// ============================================================================

/// Pretty JSON with 4-space indentation; non-ASCII text is written as-is.
pub fn to_json_string(table: &CombinedTable) -> Result<String, StandingsError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    table
        .serialize(&mut serializer)
        .map_err(|e| StandingsError::Export(e.to_string()))?;
    String::from_utf8(buf).map_err(|e| StandingsError::Export(e.to_string()))
}

/// Reads back a table written by `write_json`.
pub fn from_json_str(json: &str) -> Result<CombinedTable, StandingsError> {
    serde_json::from_str(json).map_err(|e| StandingsError::Export(e.to_string()))
}

pub fn write_json(table: &CombinedTable, path: &Path) -> Result<(), StandingsError> {
    let json = to_json_string(table)?;
    std::fs::write(path, json).map_err(|e| StandingsError::Io(format!("{}: {}", path.display(), e)))
}
