//! HTML rendering.
//!
//! Produces a single `<table>` with a two-row header: tournament titles
//! spanning their two category columns, then the categories.

use crate::model::CombinedTable;

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render_html(table: &CombinedTable) -> String {
    let mut out = String::from("<table border=\"1\" class=\"standings\">\n  <thead>\n");

    out.push_str("    <tr>\n      <th></th>\n");
    for (group, span) in table.group_spans() {
        if span > 1 {
            out.push_str(&format!("      <th colspan=\"{}\">{}</th>\n", span, escape(group)));
        } else {
            out.push_str(&format!("      <th>{}</th>\n", escape(group)));
        }
    }
    out.push_str("    </tr>\n");

    out.push_str("    <tr>\n      <th></th>\n");
    for column in &table.columns {
        out.push_str(&format!("      <th>{}</th>\n", escape(&column.category)));
    }
    out.push_str("    </tr>\n  </thead>\n  <tbody>\n");

    for row in &table.rows {
        out.push_str(&format!("    <tr>\n      <th>{}</th>\n", escape(&row.label)));
        for cell in &row.cells {
            out.push_str(&format!(
                "      <td>{}</td>\n",
                cell.as_deref().map(escape).unwrap_or_default()
            ));
        }
        out.push_str("    </tr>\n");
    }

    out.push_str("  </tbody>\n</table>\n");
    out
}
