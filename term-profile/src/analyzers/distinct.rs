//! Distinct value counting over trimmed string renderings.

use std::collections::HashSet;

use crate::cell::Cell;

/// Identity of a value for distinct counting.
///
/// Matching is exact (case- and trim-sensitive after the outer trim), and a
/// native number never equals a text value even when both render the same.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum DistinctKey {
    Number(String),
    Text(String),
}

/// Distinct non-empty values of a column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistinctValues {
    /// Number of distinct keys.
    pub count: u64,
    /// The first distinct values in first-seen order, text trimmed.
    ///
    /// Samples keep their cell kind so a native `5` and a text `"5"` stay
    /// distinguishable in reports.
    pub samples: Vec<Cell>,
}

impl DistinctValues {
    /// Counts distinct values, keeping up to `sample_size` samples.
    pub fn from_cells(cells: &[Cell], sample_size: usize) -> Self {
        let mut seen = HashSet::new();
        let mut samples = Vec::with_capacity(sample_size.min(cells.len()));

        for cell in cells {
            let Some(rendered) = cell.render() else {
                continue;
            };
            let trimmed = rendered.trim();
            if trimmed.is_empty() {
                continue;
            }

            let key = match cell {
                Cell::Number(_) => DistinctKey::Number(trimmed.to_string()),
                _ => DistinctKey::Text(trimmed.to_string()),
            };
            if seen.contains(&key) {
                continue;
            }
            if samples.len() < sample_size {
                samples.push(match cell {
                    Cell::Number(v) => Cell::Number(*v),
                    _ => Cell::text(trimmed),
                });
            }
            seen.insert(key);
        }

        Self {
            count: seen.len() as u64,
            samples,
        }
    }
}
