//! Column analyzers.
//!
//! - [`classify`]: per-cell value kinds and their counts
//! - [`distribution`]: numeric coercion, binary frequency and aligned histograms
//! - [`distinct`]: distinct value counting and sampling
//! - [`profiler`]: the [`ColumnProfiler`] that runs all three over one column
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use term_profile::analyzers::ColumnProfiler;
//!
//! # async fn example() -> term_profile::error::Result<()> {
//! let profiler = ColumnProfiler::builder().range_size(5.0).build()?;
//! let profile = profiler.profile_csv("data/patients.csv", "age").await?;
//! println!("{} unique values", profile.unique_count);
//! # Ok(())
//! # }
//! ```

pub mod classify;
pub mod distinct;
pub mod distribution;
pub mod profile_types;
pub mod profiler;

pub use classify::{classify, TypeCounts, ValueKind};
pub use distinct::DistinctValues;
pub use distribution::{
    coerce, format_bound, BinLayout, CoercedSeries, Distribution, HistogramBin, NumericHistogram,
};
pub use profile_types::ColumnProfile;
pub use profiler::{
    ColumnProfiler, ColumnProfilerBuilder, ProfilerConfig, ProfilerProgress, ProgressCallback,
};
