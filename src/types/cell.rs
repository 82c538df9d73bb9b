//! Tabular values shared by extraction and workbook I/O.

/// A single spreadsheet cell value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
}

impl Cell {
    pub fn text(s: impl Into<String>) -> Self {
        Cell::Text(s.into())
    }

    /// Text cell, or `Empty` when the option is `None`
    pub fn opt_text(s: Option<impl Into<String>>) -> Self {
        s.map(|s| Cell::Text(s.into())).unwrap_or(Cell::Empty)
    }

    #[cfg(test)]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Ordered columns plus ordered rows
///
/// Rows always have exactly `columns.len()` cells; the constructors pad or
/// truncate to keep that invariant.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row, padding short rows with empty text and dropping
    /// cells past the last column. Returns the number of dropped cells.
    pub fn push_row(&mut self, mut row: Vec<Cell>) -> usize {
        let width = self.columns.len();
        let dropped = row.len().saturating_sub(width);
        row.truncate(width);
        row.resize(width, Cell::text(""));
        self.rows.push(row);
        dropped
    }

    /// Set `name` to `value` on every row, appending the column if absent
    pub fn set_column(&mut self, name: &str, value: &str) {
        match self.columns.iter().position(|c| c == name) {
            Some(idx) => {
                for row in &mut self.rows {
                    row[idx] = Cell::text(value);
                }
            }
            None => {
                self.columns.push(name.to_string());
                for row in &mut self.rows {
                    row.push(Cell::text(value));
                }
            }
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
