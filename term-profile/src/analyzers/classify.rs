//! Per-cell value classification.
//!
//! Every cell lands in exactly one [`ValueKind`]. Nulls are `Missing`; all
//! other cells are rendered, trimmed and then checked for emptiness and
//! numeric parseability. Whether a parseable cell counts as a true numeric
//! value or a numeric string depends only on how the data source typed it.

use serde::{Deserialize, Serialize};

use crate::cell::{parse_number, Cell};

/// Effective type of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// Null / absent.
    Missing,
    /// Text that is empty after trimming.
    EmptyString,
    /// A native number.
    TrueNumeric,
    /// Text that parses as a number.
    NumericString,
    /// Text that does not parse as a number.
    NonNumericString,
}

impl ValueKind {
    pub const ALL: [ValueKind; 5] = [
        ValueKind::Missing,
        ValueKind::EmptyString,
        ValueKind::TrueNumeric,
        ValueKind::NumericString,
        ValueKind::NonNumericString,
    ];

    /// Human-readable label used by the formatters.
    pub fn label(&self) -> &'static str {
        match self {
            ValueKind::Missing => "Missing (NaN/None)",
            ValueKind::EmptyString => "Empty strings",
            ValueKind::TrueNumeric => "True numeric values",
            ValueKind::NumericString => "Numeric strings",
            ValueKind::NonNumericString => "Non-numeric strings",
        }
    }
}

/// Classifies a single cell.
pub fn classify(cell: &Cell) -> ValueKind {
    let Some(rendered) = cell.render() else {
        return ValueKind::Missing;
    };

    let trimmed = rendered.trim();
    if trimmed.is_empty() {
        return ValueKind::EmptyString;
    }

    match parse_number(trimmed) {
        None => ValueKind::NonNumericString,
        Some(_) if matches!(cell, Cell::Number(_)) => ValueKind::TrueNumeric,
        Some(_) => ValueKind::NumericString,
    }
}

/// The five classification counters for one column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCounts {
    pub missing: u64,
    pub empty_string: u64,
    pub true_numeric: u64,
    pub numeric_string: u64,
    pub non_numeric_string: u64,
}

impl TypeCounts {
    /// Classifies every cell and tallies the results.
    pub fn from_cells(cells: &[Cell]) -> Self {
        let mut counts = Self::default();
        for cell in cells {
            counts.record(classify(cell));
        }
        counts
    }

    /// Increments the counter for `kind`.
    pub fn record(&mut self, kind: ValueKind) {
        *self.counter_mut(kind) += 1;
    }

    pub fn get(&self, kind: ValueKind) -> u64 {
        match kind {
            ValueKind::Missing => self.missing,
            ValueKind::EmptyString => self.empty_string,
            ValueKind::TrueNumeric => self.true_numeric,
            ValueKind::NumericString => self.numeric_string,
            ValueKind::NonNumericString => self.non_numeric_string,
        }
    }

    fn counter_mut(&mut self, kind: ValueKind) -> &mut u64 {
        match kind {
            ValueKind::Missing => &mut self.missing,
            ValueKind::EmptyString => &mut self.empty_string,
            ValueKind::TrueNumeric => &mut self.true_numeric,
            ValueKind::NumericString => &mut self.numeric_string,
            ValueKind::NonNumericString => &mut self.non_numeric_string,
        }
    }

    /// Total number of classified cells, nulls included.
    pub fn total(&self) -> u64 {
        ValueKind::ALL.iter().map(|kind| self.get(*kind)).sum()
    }

    /// Number of cells that were not null.
    pub fn non_null(&self) -> u64 {
        self.total() - self.missing
    }

    /// Iterates `(kind, count)` pairs in a fixed order.
    pub fn iter(&self) -> impl Iterator<Item = (ValueKind, u64)> + '_ {
        ValueKind::ALL.iter().map(move |kind| (*kind, self.get(*kind)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_each_kind() {
        assert_eq!(classify(&Cell::Null), ValueKind::Missing);
        assert_eq!(classify(&Cell::text("")), ValueKind::EmptyString);
        assert_eq!(classify(&Cell::text("   \t")), ValueKind::EmptyString);
        assert_eq!(classify(&Cell::Number(1.0)), ValueKind::TrueNumeric);
        assert_eq!(classify(&Cell::Number(-2.5)), ValueKind::TrueNumeric);
        assert_eq!(classify(&Cell::text("1")), ValueKind::NumericString);
        assert_eq!(classify(&Cell::text(" 3.25 ")), ValueKind::NumericString);
        assert_eq!(classify(&Cell::text("abc")), ValueKind::NonNumericString);
        assert_eq!(classify(&Cell::text("1,000")), ValueKind::NonNumericString);
    }

    #[test]
    fn test_mixed_column_scenario() {
        let cells = vec![
            Cell::Number(1.0),
            Cell::text("1"),
            Cell::text(""),
            Cell::Null,
            Cell::text("abc"),
            Cell::Number(2.5),
        ];

        let counts = TypeCounts::from_cells(&cells);
        assert_eq!(counts.missing, 1);
        assert_eq!(counts.empty_string, 1);
        assert_eq!(counts.true_numeric, 2);
        assert_eq!(counts.numeric_string, 1);
        assert_eq!(counts.non_numeric_string, 1);
        assert_eq!(counts.total(), 6);
        assert_eq!(counts.non_null(), 5);
    }

    #[test]
    fn test_counts_ignore_order() {
        let mut cells = vec![
            Cell::text("x"),
            Cell::Null,
            Cell::Number(4.0),
            Cell::text(" "),
            Cell::text("7"),
        ];
        let forward = TypeCounts::from_cells(&cells);
        cells.reverse();
        assert_eq!(forward, TypeCounts::from_cells(&cells));
    }

    #[test]
    fn test_iter_order_matches_all() {
        let counts = TypeCounts {
            missing: 1,
            empty_string: 2,
            true_numeric: 3,
            numeric_string: 4,
            non_numeric_string: 5,
        };
        let values: Vec<u64> = counts.iter().map(|(_, n)| n).collect();
        assert_eq!(values, vec![1, 2, 3, 4, 5]);
        assert_eq!(counts.total(), 15);
    }

    #[test]
    fn test_empty_column() {
        let counts = TypeCounts::from_cells(&[]);
        assert_eq!(counts, TypeCounts::default());
        assert_eq!(counts.total(), 0);
    }
}
