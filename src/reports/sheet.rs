//! Rectangular cell matrix shared by every report layout
//!
//! A `Sheet` is what the report formatters produce and what the CSV and
//! terminal writers consume. Every row holds exactly one cell per column;
//! heading rows are padded and recorded as merges across the full width.

use std::fmt;

use crate::models::Money;

/// A single spreadsheet cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Int(i64),
    /// Fractional quantity such as lecture hours
    Number(f64),
    Money(Money),
    Text(String),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The numeric value, if this is a numeric cell
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(n) => Some(*n as f64),
            Self::Number(n) => Some(*n),
            Self::Money(m) => Some(m.as_rupees_f64()),
            Self::Empty | Self::Text(_) => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Int(n) => write!(f, "{}", n),
            Self::Number(n) => f.write_str(&format_quantity(*n)),
            Self::Money(m) => f.write_str(&m.format_plain()),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Money> for Cell {
    fn from(m: Money) -> Self {
        Self::Money(m)
    }
}

/// Decimal places kept for hour quantities
pub const QUANTITY_DECIMALS: usize = 4;

/// Shortest form up to [`QUANTITY_DECIMALS`] places: "10", "2.5", "1.125"
pub fn format_quantity(value: f64) -> String {
    let formatted = format!("{:.*}", QUANTITY_DECIMALS, value);
    match formatted.trim_end_matches('0').trim_end_matches('.') {
        "-0" => "0".to_string(),
        trimmed => trimmed.to_string(),
    }
}

/// What a row represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Title,
    Blank,
    Header,
    Data,
    Subtotal,
    Total,
}

/// One row of a sheet
#[derive(Debug, Clone, PartialEq)]
pub struct SheetRow {
    pub kind: RowKind,
    pub cells: Vec<Cell>,
}

impl SheetRow {
    pub fn cell(&self, column: usize) -> &Cell {
        &self.cells[column]
    }

    /// Rendered cell values
    pub fn values(&self) -> Vec<String> {
        self.cells.iter().map(Cell::to_string).collect()
    }
}

/// Column title and display width in characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub title: &'static str,
    pub width: usize,
}

/// A horizontal merge across columns of one row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Merge {
    pub row: usize,
    pub first_column: usize,
    pub last_column: usize,
}

/// A named, rectangular matrix of cells
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    name: String,
    columns: Vec<Column>,
    rows: Vec<SheetRow>,
    merges: Vec<Merge>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, columns: &[Column]) -> Self {
        Self {
            name: name.into(),
            columns: columns.to_vec(),
            rows: Vec::new(),
            merges: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn rows(&self) -> &[SheetRow] {
        &self.rows
    }

    pub fn merges(&self) -> &[Merge] {
        &self.merges
    }

    /// Rows of one kind, in order
    pub fn rows_of(&self, kind: RowKind) -> impl Iterator<Item = &SheetRow> {
        self.rows.iter().filter(move |r| r.kind == kind)
    }

    /// A heading line spanning the full width
    pub fn push_title(&mut self, text: impl Into<String>) {
        self.merges.push(Merge {
            row: self.rows.len(),
            first_column: 0,
            last_column: self.column_count().saturating_sub(1),
        });
        self.push_row(RowKind::Title, vec![Cell::Text(text.into())]);
    }

    pub fn push_blank(&mut self) {
        self.push_row(RowKind::Blank, Vec::new());
    }

    /// The column title row
    pub fn push_header(&mut self) {
        let titles = self.columns.iter().map(|c| Cell::from(c.title)).collect();
        self.push_row(RowKind::Header, titles);
    }

    /// Append a row, padding it with empty cells to the column count
    pub fn push_row(&mut self, kind: RowKind, mut cells: Vec<Cell>) {
        debug_assert!(
            cells.len() <= self.column_count(),
            "row has {} cells for {} columns",
            cells.len(),
            self.column_count()
        );
        cells.resize(self.column_count(), Cell::Empty);
        self.rows.push(SheetRow { kind, cells });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLUMNS: [Column; 3] = [
        Column { title: "A", width: 4 },
        Column { title: "B", width: 8 },
        Column { title: "C", width: 6 },
    ];

    #[test]
    fn test_rows_are_padded() {
        let mut sheet = Sheet::new("Test", &COLUMNS);
        sheet.push_title("Heading");
        sheet.push_blank();
        sheet.push_header();
        sheet.push_row(RowKind::Data, vec![Cell::Int(1)]);

        assert!(sheet.rows().iter().all(|r| r.cells.len() == 3));
        assert_eq!(sheet.rows()[2].values(), vec!["A", "B", "C"]);
        assert_eq!(
            sheet.merges(),
            &[Merge {
                row: 0,
                first_column: 0,
                last_column: 2
            }]
        );
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(Cell::Empty.to_string(), "");
        assert_eq!(Cell::Number(10.0).to_string(), "10");
        assert_eq!(Cell::Number(2.5).to_string(), "2.5");
        assert_eq!(Cell::Number(1.25).to_string(), "1.25");
        assert_eq!(Cell::Money(Money::from_rupees(4500)).to_string(), "4500");
        assert_eq!(Cell::Money(Money::from_paise(450050)).to_string(), "4500.50");
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(10.0), "10");
        assert_eq!(format_quantity(100.0), "100");
        assert_eq!(format_quantity(0.0), "0");
        assert_eq!(format_quantity(2.999), "2.999");
        assert_eq!(format_quantity(0.001), "0.001");
        assert_eq!(format_quantity(1.125), "1.125");
        assert_eq!(format_quantity(0.1 + 0.2), "0.3");
    }

    #[test]
    fn test_rows_of_kind() {
        let mut sheet = Sheet::new("Test", &COLUMNS);
        sheet.push_row(RowKind::Data, vec![Cell::Int(1)]);
        sheet.push_row(RowKind::Subtotal, vec![]);
        sheet.push_row(RowKind::Data, vec![Cell::Int(2)]);

        assert_eq!(sheet.rows_of(RowKind::Data).count(), 2);
        assert_eq!(sheet.rows_of(RowKind::Total).count(), 0);
    }

    #[test]
    fn test_numeric_cells() {
        assert_eq!(Cell::Money(Money::from_paise(150)).as_f64(), Some(1.5));
        assert_eq!(Cell::text("x").as_f64(), None);
    }
}
