//! # Spreadsheet Grid
//!
//! A worksheet described as rows of optional cells plus merged ranges and
//! column widths. Row and column indexes are zero based (row 0 is "1" in a
//! spreadsheet program, column 0 is "A").

use serde::Serialize;

use crate::money::Money;

/// Number format applied to money cells: `Q 1,234.50`.
pub const CURRENCY_FORMAT: &str = "\"Q\" #,##0.00";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Money(Money),
}

impl CellValue {
    /// Text a spreadsheet user sees in the cell, used for column sizing.
    pub fn display(&self) -> String {
        match self {
            CellValue::Text(text) => text.clone(),
            CellValue::Integer(n) => n.to_string(),
            CellValue::Money(m) => m.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CellStyle {
    pub bold: bool,
    pub centered: bool,
    pub font_size: Option<f64>,
    pub currency: bool,
}

impl CellStyle {
    pub fn centered() -> Self {
        CellStyle {
            centered: true,
            ..Default::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn size(mut self, points: f64) -> Self {
        self.font_size = Some(points);
        self
    }

    pub fn currency(mut self) -> Self {
        self.currency = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    pub value: CellValue,
    pub style: CellStyle,
}

impl Cell {
    pub fn new(value: CellValue, style: CellStyle) -> Self {
        Cell { value, style }
    }
}

/// A horizontal merged range on one row, holding a single cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Merge {
    pub row: usize,
    pub first_col: usize,
    pub last_col: usize,
    pub cell: Cell,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<Option<Cell>>>,
    pub merges: Vec<Merge>,
    /// Width per column in characters; columns without an entry keep the
    /// program default.
    pub column_widths: Vec<f64>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Sheet {
            name: name.into(),
            rows: Vec::new(),
            merges: Vec::new(),
            column_widths: Vec::new(),
        }
    }

    /// Appends a row and returns its index.
    pub fn push_row(&mut self, cells: Vec<Cell>) -> usize {
        self.rows.push(cells.into_iter().map(Some).collect());
        self.rows.len() - 1
    }

    pub fn push_blank_row(&mut self) -> usize {
        self.rows.push(Vec::new());
        self.rows.len() - 1
    }

    /// Appends a row whose single cell spans `first_col..=last_col`.
    pub fn push_merged_row(&mut self, first_col: usize, last_col: usize, cell: Cell) -> usize {
        let row = self.push_blank_row();
        self.merges.push(Merge {
            row,
            first_col,
            last_col,
            cell,
        });
        row
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row)?.get(col)?.as_ref()
    }

    /// Sets each column's width to its longest displayed value plus
    /// `padding`, looking only at rows from `from_row` on.
    ///
    /// Merged cells are ignored so a wide title does not stretch column A.
    pub fn autofit_columns(&mut self, from_row: usize, padding: f64) {
        let columns = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut widths = vec![0usize; columns];

        for row in self.rows.iter().skip(from_row) {
            for (col, cell) in row.iter().enumerate() {
                if let Some(cell) = cell {
                    widths[col] = widths[col].max(cell.value.display().chars().count());
                }
            }
        }

        self.column_widths = widths.into_iter().map(|w| w as f64 + padding).collect();
    }
}
