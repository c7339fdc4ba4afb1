//! Console rendering.

use crate::model::CombinedTable;

const COLUMN_GAP: &str = "  ";

fn width(s: &str) -> usize {
    s.chars().count()
}

fn pad(s: &str, to: usize) -> String {
    let mut out = s.to_string();
    out.extend(std::iter::repeat_n(' ', to.saturating_sub(width(s))));
    out
}

/// Renders the table as aligned text: two header lines (tournament,
/// category) followed by one line per placement. Missing cells are blank.
pub fn render_text(table: &CombinedTable) -> String {
    let label_width = table.rows.iter().map(|r| width(&r.label)).max().unwrap_or(0);

    let widths: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .map(|(i, header)| {
            let cells = table
                .rows
                .iter()
                .filter_map(|r| r.cells.get(i).and_then(|c| c.as_deref()))
                .map(width);
            cells
                .chain([width(&header.group), width(&header.category)])
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |first: &str, cells: Vec<&str>| -> String {
        let mut parts = vec![pad(first, label_width)];
        parts.extend(cells.iter().zip(&widths).map(|(c, w)| pad(c, *w)));
        parts.join(COLUMN_GAP).trim_end().to_string()
    };

    let mut out = String::new();
    out.push_str(&line("", table.columns.iter().map(|c| c.group.as_str()).collect()));
    out.push('\n');
    out.push_str(&line("", table.columns.iter().map(|c| c.category.as_str()).collect()));
    out.push('\n');
    for row in &table.rows {
        let cells: Vec<&str> = row.cells.iter().map(|c| c.as_deref().unwrap_or("")).collect();
        out.push_str(&line(&row.label, cells));
        out.push('\n');
    }
    out
}
