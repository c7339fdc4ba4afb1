/// Presenting the combined standings table.
///
/// The output path's extension picks the format; no path means the table is
/// printed to the console.
///
/// Submodules:
/// - `text`: aligned plain-text rendering for the console.
/// - `html`: a standalone `<table>`.
/// - `export`: CSV, XLSX and JSON files.

pub mod export;
pub mod html;
pub mod text;

use std::path::Path;

use crate::model::{CombinedTable, StandingsError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Console,
    Csv,
    Xlsx,
    Html,
    Json,
}

impl OutputFormat {
    /// Chooses the format for an optional output path. Extensions are
    /// matched case-insensitively.
    pub fn for_target(path: Option<&Path>) -> Result<OutputFormat, StandingsError> {
        let Some(path) = path else {
            return Ok(OutputFormat::Console);
        };

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match extension.as_deref() {
            Some("csv") => Ok(OutputFormat::Csv),
            Some("xlsx") => Ok(OutputFormat::Xlsx),
            Some("html") => Ok(OutputFormat::Html),
            Some("json") => Ok(OutputFormat::Json),
            _ => Err(StandingsError::UnsupportedOutputFormat(path.display().to_string())),
        }
    }
}

/// Writes `table` in `format`. `path` is required for every format except
/// `Console`.
pub fn present(
    table: &CombinedTable,
    format: OutputFormat,
    path: Option<&Path>,
) -> Result<(), StandingsError> {
    let target = || {
        path.ok_or_else(|| StandingsError::Export(format!("{:?} output needs a file path", format)))
    };

    match format {
        OutputFormat::Console => {
            print!("{}", text::render_text(table));
            Ok(())
        }
        OutputFormat::Csv => export::write_csv(table, target()?),
        OutputFormat::Xlsx => export::write_xlsx(table, target()?),
        OutputFormat::Html => {
            let path = target()?;
            std::fs::write(path, html::render_html(table))
                .map_err(|e| StandingsError::Io(format!("{}: {}", path.display(), e)))
        }
        OutputFormat::Json => export::write_json(table, target()?),
    }
}
