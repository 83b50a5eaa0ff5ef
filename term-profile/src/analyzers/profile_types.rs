//! The profile report produced by the column profiler.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::classify::TypeCounts;
use super::distribution::Distribution;
use crate::cell::Cell;

/// Complete profile of one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub column_name: String,
    /// Total number of cells, nulls included.
    pub row_count: u64,
    pub type_counts: TypeCounts,
    pub distribution: Distribution,
    /// Distinct non-empty trimmed renderings of non-null cells.
    pub unique_count: u64,
    /// First distinct values in column order, text trimmed.
    pub sample_values: Vec<Cell>,
    /// Numeric cells left out of the distribution because they were NaN or infinite.
    #[serde(default)]
    pub non_finite_dropped: u64,
    pub profiling_time_ms: u64,
    pub profiled_at: DateTime<Utc>,
}

impl ColumnProfile {
    /// Whether the profile carries a binary frequency or histogram.
    pub fn has_distribution(&self) -> bool {
        !matches!(self.distribution, Distribution::NoNumericData)
    }
}
