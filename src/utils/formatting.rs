use core::fmt;

use crate::scan::token::TokenWithSpan;

#[derive(Debug, Default)]
pub struct TableRow {
    cells: Vec<String>,
}

impl TableRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<T>(mut self, cell: T) -> Self
    where
        T: ToString,
    {
        self.cells.push(cell.to_string());
        self
    }
}

/// Left-aligned plain-text table; every column is as wide as its widest cell.
#[derive(Debug, Default)]
pub struct Table {
    rows: Vec<TableRow>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_row(&mut self, row: TableRow) {
        self.rows.push(row);
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let max_cols = self
            .rows
            .iter()
            .map(|row| row.cells.len())
            .max()
            .unwrap_or(0);
        let mut max_widths = vec![0; max_cols];
        for row in &self.rows {
            for (i, cell) in row.cells.iter().enumerate() {
                max_widths[i] = max_widths[i].max(cell.chars().count());
            }
        }
        for row in &self.rows {
            let last = row.cells.len().saturating_sub(1);
            for (i, cell) in row.cells.iter().enumerate() {
                if i == last {
                    write!(f, "{}", cell)?;
                } else {
                    write!(f, "{:width$}", cell, width = max_widths[i] + 1)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// One row per token: position, kind and lexeme.
pub fn token_table(tokens: &[TokenWithSpan]) -> Table {
    let mut table = Table::new();
    table.add_row(TableRow::new().add("LINE").add("COL").add("KIND").add("LEXEME"));
    for tok in tokens {
        table.add_row(
            TableRow::new()
                .add(tok.line())
                .add(tok.column())
                .add(tok.inner.kind)
                .add(tok.inner.lexeme().unwrap_or("")),
        );
    }
    table
}
