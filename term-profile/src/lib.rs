//! # term-profile - Single-Column Data Profiling
//!
//! term-profile describes what a single column of a tabular file actually
//! contains. It loads the column through DataFusion, then reports:
//!
//! - how many cells are missing, empty, native numbers, numeric strings, or
//!   plain text
//! - a binary 0/1 frequency or a histogram with bins aligned to a fixed width
//! - how many distinct non-empty values the column holds
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use term_profile::prelude::*;
//!
//! # async fn example() -> Result<()> {
//! let profiler = ColumnProfiler::builder()
//!     .range_size(10.0)
//!     .build()?;
//!
//! let profile = profiler.profile_csv("data/patients.csv", "age").await?;
//! println!("{}", HumanFormatter::new().format(&profile)?);
//! # Ok(())
//! # }
//! ```
//!
//! Columns already in memory can be profiled without any data source:
//!
//! ```rust
//! use term_profile::analyzers::{ColumnProfiler, Distribution};
//! use term_profile::cell::Cell;
//!
//! let cells = vec![Cell::Number(0.0), Cell::text("1"), Cell::Number(1.0)];
//! let profile = ColumnProfiler::new().profile_cells("flag", &cells).unwrap();
//! assert_eq!(profile.distribution, Distribution::Binary { zeros: 1, ones: 2 });
//! ```
//!
//! ## Architecture
//!
//! - **`cell`**: the raw cell representation and its conversion from Arrow arrays
//! - **`analyzers`**: classification, distribution, distinct counting and the
//!   [`ColumnProfiler`](analyzers::ColumnProfiler)
//! - **`sources`**: data source connectors and column loading
//! - **`formatters`**: human, JSON and Markdown report output
//! - **`logging`**: `tracing` subscriber setup
//! - **`error`**: the crate error type

pub mod analyzers;
pub mod cell;
pub mod error;
pub mod formatters;
pub mod logging;
pub mod prelude;
pub mod sources;
