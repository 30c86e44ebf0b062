//! Table Populator
//!
//! Rebuilds the score-band table body (`#tabla-body`) from reference rows.

use serde_json::Value;
use thiserror::Error;

use crate::model::BandRow;

/// Errors from populating a table from untyped input
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    #[error("table rows must be an array")]
    NotAnArray,

    #[error("invalid table row: {0}")]
    InvalidRow(String),
}

/// One cell of a rendered row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCell {
    pub text: String,
    /// Class of the cell itself
    pub cell_class: Option<String>,
    /// Class of the label span wrapping the text
    pub span_class: Option<String>,
}

/// Row layout: range cell, then the labelled band
pub fn row_cells(row: &BandRow) -> [TableCell; 2] {
    [
        TableCell {
            text: row.range.clone(),
            cell_class: Some("score".to_string()),
            span_class: None,
        },
        TableCell {
            text: row.label.clone(),
            cell_class: None,
            span_class: Some(format!("table-label {}", row.class)),
        },
    ]
}

/// A table body that rows can be appended to
pub trait TableBody {
    fn clear(&mut self);
    fn append_row(&mut self, cells: &[TableCell]);
}

impl TableBody for Vec<Vec<TableCell>> {
    fn clear(&mut self) {
        Vec::clear(self);
    }

    fn append_row(&mut self, cells: &[TableCell]) {
        self.push(cells.to_vec());
    }
}

/// Replace the body's rows with `rows`, in order
pub fn populate<B: TableBody + ?Sized>(body: &mut B, rows: &[BandRow]) {
    body.clear();
    for row in rows {
        body.append_row(&row_cells(row));
    }
}

/// Populate from untyped input. Anything but an array of rows is rejected
/// and leaves the body untouched.
pub fn populate_json<B: TableBody + ?Sized>(body: &mut B, value: &Value) -> Result<usize, TableError> {
    if !value.is_array() {
        tracing::debug!("Ignoring non-array table input");
        return Err(TableError::NotAnArray);
    }

    let rows: Vec<BandRow> =
        serde_json::from_value(value.clone()).map_err(|e| TableError::InvalidRow(e.to_string()))?;
    populate(body, &rows);
    Ok(rows.len())
}

/// Rows as escaped HTML, for server-side or static rendering
pub fn render_html(rows: &[BandRow]) -> String {
    rows.iter()
        .map(|row| {
            format!(
                "<tr><td class=\"score\">{}</td><td><span class=\"table-label {}\">{}</span></td></tr>",
                escape(&row.range),
                escape(&row.class),
                escape(&row.label)
            )
        })
        .collect()
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Severity;
    use serde_json::json;

    fn existing() -> Vec<Vec<TableCell>> {
        let mut body = Vec::new();
        populate(&mut body, &Severity::reference_rows());
        body
    }

    #[test]
    fn test_populate_three_rows_in_order() {
        let mut body = existing();
        let input = json!([
            {"range": "< 200", "label": "Crítico", "class": "critical"},
            {"range": "200 - 349", "label": "Moderado", "class": "moderate"},
            {"range": ">= 350", "label": "Bueno", "class": "good"}
        ]);

        assert_eq!(populate_json(&mut body, &input), Ok(3));
        assert_eq!(body.len(), 3);
        assert_eq!(body[0][0].text, "< 200");
        assert_eq!(body[0][0].cell_class.as_deref(), Some("score"));
        assert_eq!(body[1][1].text, "Moderado");
        assert_eq!(body[1][1].span_class.as_deref(), Some("table-label moderate"));
        assert_eq!(body[2][1].span_class.as_deref(), Some("table-label good"));
    }

    #[test]
    fn test_non_array_leaves_rows_untouched() {
        let mut body = existing();

        for input in [json!(null), json!({"range": "x"}), json!("rows"), json!(4)] {
            assert_eq!(populate_json(&mut body, &input), Err(TableError::NotAnArray));
        }
        assert_eq!(body, existing());
    }

    #[test]
    fn test_invalid_row_leaves_rows_untouched() {
        let mut body = existing();
        let input = json!([{"range": "x", "label": "y", "class": "z"}, {"label": 3}]);

        assert!(matches!(populate_json(&mut body, &input), Err(TableError::InvalidRow(_))));
        assert_eq!(body.len(), 4);
    }

    #[test]
    fn test_empty_array_clears() {
        let mut body = existing();
        assert_eq!(populate_json(&mut body, &json!([])), Ok(0));
        assert!(body.is_empty());
    }

    #[test]
    fn test_render_html_escapes() {
        let rows = vec![BandRow {
            range: "< 200".to_string(),
            label: "<b>Crítico</b>".to_string(),
            class: "critical".to_string(),
        }];
        assert_eq!(
            render_html(&rows),
            "<tr><td class=\"score\">&lt; 200</td><td><span class=\"table-label critical\">&lt;b&gt;Crítico&lt;/b&gt;</span></td></tr>"
        );
    }
}
