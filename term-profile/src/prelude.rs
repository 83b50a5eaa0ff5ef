//! Prelude for commonly used types and traits in term-profile.

pub use crate::analyzers::{ColumnProfile, ColumnProfiler, Distribution, ProfilerConfig, TypeCounts};
pub use crate::cell::Cell;
pub use crate::error::{ErrorContext, ProfileError, Result};
pub use crate::formatters::{
    FormatterConfig, HumanFormatter, JsonFormatter, MarkdownFormatter, ProfileFormatter,
};
pub use crate::sources::{CsvOptions, CsvSource, DataSource};
