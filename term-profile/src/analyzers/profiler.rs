//! Single-column profiling.
//!
//! The ColumnProfiler makes three passes over a loaded column:
//!
//! **Pass 1: Classification**
//! - Every cell is counted as missing, empty, true numeric, numeric string or
//!   non-numeric string
//!
//! **Pass 2: Distribution**
//! - Cells that coerce to numbers are either counted as a binary 0/1
//!   frequency or binned into fixed-width bins aligned to `range_size`
//!
//! **Pass 3: Distinct values**
//! - Distinct non-empty trimmed values are counted and sampled
//!
//! The passes are independent. A cell that fails to parse is a non-numeric
//! string for pass 1 and is simply absent from pass 2.
//!
//! # Example
//!
//! ```rust
//! use term_profile::analyzers::ColumnProfiler;
//! use term_profile::cell::Cell;
//!
//! let profiler = ColumnProfiler::builder().range_size(10.0).build().unwrap();
//! let cells = vec![Cell::Number(5.0), Cell::text("25"), Cell::Null];
//! let profile = profiler.profile_cells("age", &cells).unwrap();
//!
//! assert_eq!(profile.type_counts.missing, 1);
//! assert_eq!(profile.unique_count, 2);
//! ```

use std::sync::Arc;

use chrono::Utc;
use datafusion::prelude::SessionContext;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use super::classify::TypeCounts;
use super::distinct::DistinctValues;
use super::distribution::{coerce, validate_range_size, Distribution};
use super::profile_types::ColumnProfile;
use crate::cell::Cell;
use crate::error::{ProfileError, Result};
use crate::sources::{load_column, CsvSource, DataSource};

/// Table name used when the profiler registers a source itself.
const SOURCE_TABLE: &str = "profile_source";

/// Configuration for the column profiler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfilerConfig {
    /// Width of each histogram bin
    pub range_size: f64,
    /// Largest number of bins a histogram may declare
    pub max_bins: usize,
    /// Number of distinct sample values kept in the profile
    pub sample_size: usize,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            range_size: 10.0,
            max_bins: 10_000,
            sample_size: 10,
        }
    }
}

impl ProfilerConfig {
    /// Checks that the configuration can produce a histogram.
    pub fn validate(&self) -> Result<()> {
        validate_range_size(self.range_size)?;
        if self.max_bins == 0 {
            return Err(ProfileError::configuration("max_bins must be at least 1"));
        }
        Ok(())
    }
}

/// Progress callback for profiling operations
pub type ProgressCallback = Arc<dyn Fn(ProfilerProgress) + Send + Sync>;

/// Progress information during profiling
#[derive(Debug, Clone)]
pub struct ProfilerProgress {
    pub current_pass: u8,
    pub total_passes: u8,
    pub column_name: String,
    pub message: String,
}

/// Builder for ColumnProfiler
#[derive(Default)]
pub struct ColumnProfilerBuilder {
    config: ProfilerConfig,
    progress_callback: Option<ProgressCallback>,
}

impl ColumnProfilerBuilder {
    /// Set the histogram bin width
    pub fn range_size(mut self, range_size: f64) -> Self {
        self.config.range_size = range_size;
        self
    }

    /// Set the maximum number of histogram bins
    pub fn max_bins(mut self, max_bins: usize) -> Self {
        self.config.max_bins = max_bins;
        self
    }

    /// Set how many distinct sample values to keep
    pub fn sample_size(mut self, size: usize) -> Self {
        self.config.sample_size = size;
        self
    }

    /// Replace the whole configuration
    pub fn config(mut self, config: ProfilerConfig) -> Self {
        self.config = config;
        self
    }

    /// Set progress callback
    pub fn progress_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProfilerProgress) + Send + Sync + 'static,
    {
        self.progress_callback = Some(Arc::new(callback));
        self
    }

    /// Build the ColumnProfiler, rejecting an unusable configuration
    pub fn build(self) -> Result<ColumnProfiler> {
        self.config.validate()?;
        Ok(ColumnProfiler {
            config: self.config,
            progress_callback: self.progress_callback,
        })
    }
}

/// Profiles one column at a time.
#[derive(Clone)]
pub struct ColumnProfiler {
    config: ProfilerConfig,
    progress_callback: Option<ProgressCallback>,
}

impl ColumnProfiler {
    /// Create a new builder for ColumnProfiler
    pub fn builder() -> ColumnProfilerBuilder {
        ColumnProfilerBuilder::default()
    }

    /// Create a ColumnProfiler with default configuration
    pub fn new() -> Self {
        Self {
            config: ProfilerConfig::default(),
            progress_callback: None,
        }
    }

    pub fn config(&self) -> &ProfilerConfig {
        &self.config
    }

    /// Profile an already loaded column.
    ///
    /// This is a pure function of `cells` and the configuration apart from
    /// the timing fields of the returned profile.
    #[instrument(skip(self, cells), fields(rows = cells.len(), range_size = self.config.range_size))]
    pub fn profile_cells(&self, column_name: &str, cells: &[Cell]) -> Result<ColumnProfile> {
        let start_time = std::time::Instant::now();

        info!(column = column_name, "Starting column profiling");

        self.report_progress(1, column_name, "Classifying values");
        let type_counts = TypeCounts::from_cells(cells);
        debug!(?type_counts, "Classification complete");

        self.report_progress(2, column_name, "Computing numeric distribution");
        let series = coerce(cells);
        if series.non_finite > 0 {
            warn!(
                column = column_name,
                dropped = series.non_finite,
                "Dropped NaN/infinite values from the numeric distribution"
            );
        }
        let distribution =
            Distribution::compute(&series.values, self.config.range_size, self.config.max_bins)?;
        debug!(coerced = series.values.len(), "Distribution complete");

        self.report_progress(3, column_name, "Counting distinct values");
        let distinct = DistinctValues::from_cells(cells, self.config.sample_size);
        debug!(unique = distinct.count, "Distinct count complete");

        let profiling_time_ms = start_time.elapsed().as_millis() as u64;

        info!(
            column = column_name,
            rows = type_counts.total(),
            time_ms = profiling_time_ms,
            "Completed column profiling"
        );

        Ok(ColumnProfile {
            column_name: column_name.to_string(),
            row_count: type_counts.total(),
            type_counts,
            distribution,
            unique_count: distinct.count,
            sample_values: distinct.samples,
            non_finite_dropped: series.non_finite,
            profiling_time_ms,
            profiled_at: Utc::now(),
        })
    }

    /// Profile a column of a table registered in `ctx`.
    #[instrument(skip(self, ctx))]
    pub async fn profile_column(
        &self,
        ctx: &SessionContext,
        table_name: &str,
        column_name: &str,
    ) -> Result<ColumnProfile> {
        let cells = load_column(ctx, table_name, column_name).await?;
        self.profile_cells(column_name, &cells)
    }

    /// Register `source` in a fresh context and profile one of its columns.
    #[instrument(skip(self, source), fields(data_source = %source.description()))]
    pub async fn profile_source(
        &self,
        source: &dyn DataSource,
        column_name: &str,
    ) -> Result<ColumnProfile> {
        let ctx = SessionContext::new();
        source.register(&ctx, SOURCE_TABLE).await?;
        self.profile_column(&ctx, SOURCE_TABLE, column_name).await
    }

    /// Profile one column of a CSV file with default CSV options.
    pub async fn profile_csv(&self, path: &str, column_name: &str) -> Result<ColumnProfile> {
        let source = CsvSource::new(path)?;
        self.profile_source(&source, column_name).await
    }

    /// Report progress to callback if configured
    fn report_progress(&self, current_pass: u8, column_name: &str, message: &str) {
        if let Some(callback) = &self.progress_callback {
            callback(ProfilerProgress {
                current_pass,
                total_passes: 3,
                column_name: column_name.to_string(),
                message: message.to_string(),
            });
        }
    }
}

impl Default for ColumnProfiler {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ColumnProfiler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColumnProfiler")
            .field("config", &self.config)
            .field("progress_callback", &self.progress_callback.is_some())
            .finish()
    }
}
