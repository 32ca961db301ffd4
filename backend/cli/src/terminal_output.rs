//! Terminal output utilities: notes, table rendering, ANSI formatting.

use ontodash_core::{cell_text, row_keys, Row};
use ontodash_views::CollectionTable;

// ---------------------------------------------------------------------------
// ANSI Color/Style helpers
// ---------------------------------------------------------------------------

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Check if the terminal supports color output.
pub fn supports_color() -> bool {
    std::env::var("NO_COLOR").is_err()
        && (std::env::var("COLORTERM").is_ok()
            || std::env::var("TERM")
                .map(|t| t != "dumb")
                .unwrap_or(false))
}

/// Strip ANSI escape codes from a string.
pub fn strip_ansi(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            for next in chars.by_ref() {
                if next == 'm' {
                    break;
                }
            }
        } else {
            result.push(c);
        }
    }
    result
}

/// Visible width in characters; French labels are not ASCII.
fn visible_width(s: &str) -> usize {
    strip_ansi(s).chars().count()
}

// ---------------------------------------------------------------------------
// Formatted notes
// ---------------------------------------------------------------------------

pub fn note_info(msg: &str) {
    if supports_color() {
        println!("{CYAN}{BOLD}ℹ{RESET} {msg}");
    } else {
        println!("INFO: {msg}");
    }
}

pub fn note_warn(msg: &str) {
    if supports_color() {
        println!("{YELLOW}{BOLD}⚠{RESET} {msg}");
    } else {
        println!("WARN: {msg}");
    }
}

/// Print a formatted ERROR note to stderr.
pub fn note_error(msg: &str) {
    if supports_color() {
        eprintln!("{RED}{BOLD}✗{RESET} {msg}");
    } else {
        eprintln!("ERROR: {msg}");
    }
}

pub fn note_success(msg: &str) {
    if supports_color() {
        println!("{GREEN}{BOLD}✓{RESET} {msg}");
    } else {
        println!("OK: {msg}");
    }
}

/// Dimmed secondary text, e.g. the SPARQL behind an answer.
pub fn dim(msg: &str) -> String {
    if supports_color() {
        format!("{DIM}{msg}{RESET}")
    } else {
        msg.to_string()
    }
}

// ---------------------------------------------------------------------------
// Table rendering
// ---------------------------------------------------------------------------

/// Column alignment.
pub enum Align {
    Left,
    Right,
}

/// A table column definition.
pub struct Column {
    pub header: String,
    pub align: Align,
    pub max_width: Option<usize>,
}

impl Column {
    pub fn left(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            align: Align::Left,
            max_width: Some(48),
        }
    }

    pub fn right(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            align: Align::Right,
            max_width: None,
        }
    }
}

/// Render a table with given columns and rows. Cells wider than the
/// column's `max_width` are truncated with `…`.
pub fn render_table(columns: &[Column], rows: &[Vec<String>]) -> String {
    let num_cols = columns.len();
    let mut widths: Vec<usize> = columns.iter().map(|c| visible_width(&c.header)).collect();
    for row in rows {
        for (i, cell) in row.iter().take(num_cols).enumerate() {
            let w = visible_width(cell);
            let w = columns[i].max_width.map_or(w, |max| w.min(max));
            widths[i] = widths[i].max(w);
        }
    }

    let bold = if supports_color() { BOLD } else { "" };
    let reset = if supports_color() { RESET } else { "" };
    let mut out = String::new();

    let header_cells: Vec<String> = columns
        .iter()
        .enumerate()
        .map(|(i, col)| pad_cell(&col.header, widths[i], &col.align))
        .collect();
    out.push_str(&format!("{bold}  {}  {reset}\n", header_cells.join("  ")));

    let sep: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&format!("  {}  \n", sep.join("  ")));

    for row in rows {
        let cells: Vec<String> = (0..num_cols)
            .map(|i| {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                pad_cell(&truncate(cell, widths[i]), widths[i], &columns[i].align)
            })
            .collect();
        out.push_str(&format!("  {}  \n", cells.join("  ")));
    }

    out
}

fn truncate(s: &str, width: usize) -> String {
    if visible_width(s) <= width {
        return s.to_string();
    }
    let plain = strip_ansi(s);
    let mut cut: String = plain.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

fn pad_cell(s: &str, width: usize, align: &Align) -> String {
    let pad = width.saturating_sub(visible_width(s));
    match align {
        Align::Left => format!("{s}{}", " ".repeat(pad)),
        Align::Right => format!("{}{s}", " ".repeat(pad)),
    }
}

// ---------------------------------------------------------------------------
// Domain tables
// ---------------------------------------------------------------------------

/// Columns for `headers`, right-aligned where every filled cell is a number.
fn columns_for<S: AsRef<str>>(headers: &[S], rows: &[Vec<String>]) -> Vec<Column> {
    headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            let mut filled = rows
                .iter()
                .filter_map(|row| row.get(i))
                .filter(|cell| cell.as_str() != "-")
                .peekable();
            let numeric = filled.peek().is_some()
                && filled.all(|cell| cell.trim().parse::<f64>().is_ok());
            if numeric {
                Column::right(header.as_ref())
            } else {
                Column::left(header.as_ref())
            }
        })
        .collect()
}

/// Free-form query rows, columns in first-row key order.
pub fn render_rows(rows: &[Row]) -> String {
    let keys = row_keys(rows);
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| keys.iter().map(|k| cell_text(row.get(k))).collect())
        .collect();
    render_table(&columns_for(&keys, &cells), &cells)
}

pub fn render_collection(table: &CollectionTable) -> String {
    render_table(&columns_for(&table.headers, &table.rows), &table.rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strips_ansi() {
        let colored = format!("{GREEN}hello{RESET}");
        assert_eq!(strip_ansi(&colored), "hello");
    }

    #[test]
    fn renders_table() {
        let cols = vec![Column::left("Name"), Column::right("Count")];
        let rows = vec![
            vec!["Alice".to_string(), "42".to_string()],
            vec!["Bob".to_string(), "7".to_string()],
        ];
        let table = strip_ansi(&render_table(&cols, &rows));
        assert!(table.contains("Alice     42"));
        assert!(table.contains("Bob        7"));
    }

    #[test]
    fn accented_cells_align_by_chars() {
        let cols = vec![Column::left("nom"), Column::left("type")];
        let rows = vec![
            vec!["Hébergé".to_string(), "x".to_string()],
            vec!["Abcdefg".to_string(), "y".to_string()],
        ];
        let table = strip_ansi(&render_table(&cols, &rows));
        assert!(table.contains("  Hébergé  x"));
        assert!(table.contains("  Abcdefg  y"));
    }

    #[test]
    fn long_cells_are_truncated() {
        let mut col = Column::left("uri");
        col.max_width = Some(6);
        let table = render_table(&[col], &[vec!["http://example.org".to_string()]]);
        assert!(table.contains("http:…"));
    }

    #[test]
    fn query_rows_follow_first_row_keys() {
        let rows: Vec<Row> = vec![
            json!({"nom": "Ali", "age": 31}).as_object().cloned().unwrap(),
            json!({"nom": "Sara"}).as_object().cloned().unwrap(),
        ];
        let table = strip_ansi(&render_rows(&rows));
        let header = table.lines().next().unwrap();
        assert!(header.find("nom").unwrap() < header.find("age").unwrap());
        assert!(table.contains("Sara"));
    }

    #[test]
    fn numeric_collection_columns_align_right() {
        let table = CollectionTable {
            headers: vec!["nom", "prix"],
            rows: vec![
                vec!["Riad".to_string(), "1200".to_string()],
                vec!["Gîte".to_string(), "-".to_string()],
                vec!["Camp".to_string(), "85.5".to_string()],
            ],
        };
        let out = strip_ansi(&render_collection(&table));
        assert!(out.contains("  Riad  1200  "));
        assert!(out.contains("  Camp  85.5  "));
        assert!(out.contains("  Gîte     -  "));
    }
}
