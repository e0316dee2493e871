//! Result rendering - turns a projected table into aligned text
//!
//! A thin, independently testable layer over [`QueryResult`]; the engine
//! itself only hands back row sets and counts.

use crate::sql::QueryResult;
use crate::types::Value;

/// Render a full result the way the shell prints it.
pub fn format_result(result: &QueryResult) -> String {
    match result {
        QueryResult::Modification {
            affected_rows,
            warnings,
        } => {
            if *warnings > 0 {
                format!(
                    "Query OK, {} rows affected, {} warning",
                    affected_rows, warnings
                )
            } else {
                format!("Query OK, {} rows affected", affected_rows)
            }
        }
        QueryResult::Select { columns, rows } => {
            if rows.is_empty() {
                "Empty set".to_string()
            } else {
                format!(
                    "{}\n{} rows in set",
                    format_table(columns, rows),
                    rows.len()
                )
            }
        }
    }
}

/// ASCII grid with `+---+` borders. Numeric cells are right-aligned, text
/// cells left-aligned, headers left-aligned.
pub fn format_table(columns: &[String], rows: &[Vec<Value>]) -> String {
    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, col)| {
            rows.iter()
                .map(|row| cell_text(&row[i]).len())
                .chain(std::iter::once(col.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let border = {
        let mut s = String::from("+");
        for width in &widths {
            s.push_str(&"-".repeat(width + 2));
            s.push('+');
        }
        s
    };

    let mut out = String::new();
    out.push_str(&border);
    out.push('\n');

    out.push('|');
    for (col, width) in columns.iter().zip(&widths) {
        out.push_str(&format!(" {:<width$} |", col, width = *width));
    }
    out.push('\n');
    out.push_str(&border);
    out.push('\n');

    for row in rows {
        out.push('|');
        for (value, width) in row.iter().zip(&widths) {
            let text = cell_text(value);
            if value.is_numeric() {
                out.push_str(&format!(" {:>width$} |", text, width = *width));
            } else {
                out.push_str(&format!(" {:<width$} |", text, width = *width));
            }
        }
        out.push('\n');
    }

    out.push_str(&border);
    out
}

fn cell_text(value: &Value) -> String {
    value.to_string()
}
