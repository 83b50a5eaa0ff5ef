//! Report formatting for column profiles.
//!
//! This module provides formatters that turn a [`ColumnProfile`] into
//! console text, JSON, or Markdown.
//!
//! # Examples
//!
//! ```rust
//! use term_profile::analyzers::ColumnProfiler;
//! use term_profile::cell::Cell;
//! use term_profile::formatters::{HumanFormatter, ProfileFormatter};
//!
//! let profile = ColumnProfiler::new()
//!     .profile_cells("age", &[Cell::Number(5.0), Cell::Number(25.0)])
//!     .unwrap();
//! let output = HumanFormatter::new().format(&profile).unwrap();
//! assert!(output.contains("Frequency Distribution"));
//! ```

use std::fmt::Write;

use crate::analyzers::{ColumnProfile, Distribution, HistogramBin, NumericHistogram};
use crate::error::Result;
use crate::logging::truncate_field;

/// Longest sample value printed by the text formatters.
const MAX_SAMPLE_LENGTH: usize = 64;

/// Configuration options for formatting column profiles.
#[derive(Debug, Clone)]
pub struct FormatterConfig {
    /// Whether to use colorized output (for human formatter)
    pub use_colors: bool,
    /// Omit histogram bins with a zero count
    pub compact_bins: bool,
    /// Include the sample unique values
    pub include_samples: bool,
    /// Include profiling time and timestamp
    pub include_timing: bool,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            use_colors: true,
            compact_bins: false,
            include_samples: true,
            include_timing: true,
        }
    }
}

impl FormatterConfig {
    /// Creates a minimal configuration showing only counts and bins.
    pub fn minimal() -> Self {
        Self {
            use_colors: false,
            compact_bins: true,
            include_samples: false,
            include_timing: false,
        }
    }

    /// Creates a detailed configuration showing everything.
    pub fn detailed() -> Self {
        Self::default()
    }

    /// Creates a configuration suitable for CI/CD environments.
    pub fn ci() -> Self {
        Self {
            use_colors: false,
            compact_bins: false,
            include_samples: true,
            include_timing: false,
        }
    }

    /// Sets whether to use colorized output.
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Sets whether zero-count bins are omitted.
    pub fn with_compact_bins(mut self, compact: bool) -> Self {
        self.compact_bins = compact;
        self
    }

    /// Sets whether sample values are included.
    pub fn with_samples(mut self, include: bool) -> Self {
        self.include_samples = include;
        self
    }

    /// Sets whether timing metadata is included.
    pub fn with_timing(mut self, include: bool) -> Self {
        self.include_timing = include;
        self
    }

    /// Bins of `histogram` that this configuration displays.
    fn visible_bins<'a>(&self, histogram: &'a NumericHistogram) -> Vec<&'a HistogramBin> {
        if self.compact_bins {
            histogram.observed_bins().collect()
        } else {
            histogram.bins.iter().collect()
        }
    }
}

/// Trait for formatting column profiles into different output formats.
///
/// # Examples
///
/// ```rust
/// use term_profile::analyzers::ColumnProfile;
/// use term_profile::formatters::ProfileFormatter;
///
/// struct UniqueOnly;
///
/// impl ProfileFormatter for UniqueOnly {
///     fn format(&self, profile: &ColumnProfile) -> term_profile::error::Result<String> {
///         Ok(format!("{}: {}", profile.column_name, profile.unique_count))
///     }
/// }
/// ```
pub trait ProfileFormatter {
    /// Formats a profile into a string representation.
    fn format(&self, profile: &ColumnProfile) -> Result<String>;

    /// Formats a profile with custom configuration.
    fn format_with_config(
        &self,
        profile: &ColumnProfile,
        _config: &FormatterConfig,
    ) -> Result<String> {
        // Default implementation ignores config and uses standard format
        self.format(profile)
    }
}

/// Formats profiles as structured JSON.
#[derive(Debug, Clone)]
pub struct JsonFormatter {
    config: FormatterConfig,
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter with default configuration.
    pub fn new() -> Self {
        Self {
            config: FormatterConfig::default(),
            pretty: true,
        }
    }

    /// Creates a new JSON formatter with the specified configuration.
    pub fn with_config(config: FormatterConfig) -> Self {
        Self {
            config,
            pretty: true,
        }
    }

    /// Sets whether to use pretty-printed JSON.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileFormatter for JsonFormatter {
    fn format(&self, profile: &ColumnProfile) -> Result<String> {
        self.format_with_config(profile, &self.config)
    }

    fn format_with_config(
        &self,
        profile: &ColumnProfile,
        config: &FormatterConfig,
    ) -> Result<String> {
        let filtered = filter_profile_for_config(profile, config);
        let mut value = serde_json::to_value(&filtered)?;

        if let Some(object) = value.as_object_mut() {
            if !config.include_timing {
                object.remove("profiling_time_ms");
                object.remove("profiled_at");
            }
            if !config.include_samples {
                object.remove("sample_values");
            }
        }

        let output = if self.pretty {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };
        Ok(output)
    }
}

/// Formats profiles in a human-readable format suitable for console output.
#[derive(Debug, Clone)]
pub struct HumanFormatter {
    config: FormatterConfig,
}

impl HumanFormatter {
    /// Creates a new human formatter with default configuration.
    pub fn new() -> Self {
        Self {
            config: FormatterConfig::default(),
        }
    }

    /// Creates a new human formatter with the specified configuration.
    pub fn with_config(config: FormatterConfig) -> Self {
        Self { config }
    }
}

impl Default for HumanFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileFormatter for HumanFormatter {
    fn format(&self, profile: &ColumnProfile) -> Result<String> {
        self.format_with_config(profile, &self.config)
    }

    fn format_with_config(
        &self,
        profile: &ColumnProfile,
        config: &FormatterConfig,
    ) -> Result<String> {
        let mut output = String::new();
        let column = &profile.column_name;
        let heading = |text: String| {
            if config.use_colors {
                format!("\x1b[1m{text}\x1b[0m")
            } else {
                text
            }
        };

        writeln!(output)?;
        writeln!(
            output,
            "🧾 {}",
            heading(format!("Detailed Type Analysis for column '{column}':"))
        )?;
        let counts = &profile.type_counts;
        writeln!(output, "❓ Missing (NaN/None): {}", counts.missing)?;
        writeln!(output, "🔲 Empty strings: {}", counts.empty_string)?;
        writeln!(output, "🔢 True numeric values: {}", counts.true_numeric)?;
        writeln!(output, "🔢 Numeric strings: {}", counts.numeric_string)?;
        writeln!(output, "🔤 Non-numeric strings: {}", counts.non_numeric_string)?;

        writeln!(output)?;
        match &profile.distribution {
            Distribution::NoNumericData => {
                if config.use_colors {
                    writeln!(
                        output,
                        "⚠️ \x1b[33mNo valid numeric data to analyze for distribution.\x1b[0m"
                    )?;
                } else {
                    writeln!(output, "⚠️ No valid numeric data to analyze for distribution.")?;
                }
            }
            Distribution::Binary { zeros, ones } => {
                writeln!(
                    output,
                    "📊 {}",
                    heading(format!("Binary Frequency for '{column}':"))
                )?;
                writeln!(output, "0: {zeros}")?;
                writeln!(output, "1: {ones}")?;
            }
            Distribution::Histogram(histogram) => {
                if config.use_colors {
                    writeln!(
                        output,
                        "✅ Numeric Range: \x1b[32m{} to {}\x1b[0m",
                        histogram.min, histogram.max
                    )?;
                } else {
                    writeln!(
                        output,
                        "✅ Numeric Range: {} to {}",
                        histogram.min, histogram.max
                    )?;
                }
                writeln!(output)?;
                writeln!(
                    output,
                    "📊 {}",
                    heading(format!(
                        "Frequency Distribution (bin size = {}):",
                        histogram.range_size
                    ))
                )?;
                for bin in config.visible_bins(histogram) {
                    writeln!(output, "{}: {}", bin.label(), bin.count)?;
                }
            }
        }

        if profile.non_finite_dropped > 0 {
            writeln!(
                output,
                "   ({} NaN/infinite values not included)",
                profile.non_finite_dropped
            )?;
        }

        writeln!(output)?;
        writeln!(
            output,
            "🔢 Total unique values in '{column}' (excluding NaN/None): {}",
            profile.unique_count
        )?;

        if config.include_samples && !profile.sample_values.is_empty() {
            writeln!(output)?;
            writeln!(output, "🔍 Sample unique values:")?;
            for value in &profile.sample_values {
                // text samples print quoted, numbers bare
                writeln!(
                    output,
                    "• {}",
                    truncate_field(&value.to_string(), MAX_SAMPLE_LENGTH)
                )?;
            }
        }

        if config.include_timing {
            writeln!(output)?;
            writeln!(
                output,
                "⏱️  Profiled {} rows in {}ms at {}",
                profile.row_count,
                profile.profiling_time_ms,
                profile.profiled_at.to_rfc3339()
            )?;
        }

        writeln!(output)?;
        Ok(output)
    }
}

/// Formats profiles as Markdown suitable for documentation.
#[derive(Debug, Clone)]
pub struct MarkdownFormatter {
    config: FormatterConfig,
    heading_level: u8,
}

impl MarkdownFormatter {
    /// Creates a new Markdown formatter with default configuration.
    pub fn new() -> Self {
        Self {
            config: FormatterConfig::default(),
            heading_level: 2,
        }
    }

    /// Creates a new Markdown formatter with the specified configuration.
    pub fn with_config(config: FormatterConfig) -> Self {
        Self {
            config,
            heading_level: 2,
        }
    }

    /// Sets the base heading level for the output.
    pub fn with_heading_level(mut self, level: u8) -> Self {
        self.heading_level = level.clamp(1, 6);
        self
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileFormatter for MarkdownFormatter {
    fn format(&self, profile: &ColumnProfile) -> Result<String> {
        self.format_with_config(profile, &self.config)
    }

    fn format_with_config(
        &self,
        profile: &ColumnProfile,
        config: &FormatterConfig,
    ) -> Result<String> {
        let mut output = String::new();
        let h = "#".repeat(self.heading_level as usize);

        writeln!(output, "{h} Column Profile: `{}`", profile.column_name)?;
        writeln!(output)?;
        writeln!(output, "**Rows:** {}", profile.row_count)?;
        writeln!(output, "**Unique values:** {}", profile.unique_count)?;

        if config.include_timing {
            writeln!(output, "**Profiled at:** {}", profile.profiled_at.to_rfc3339())?;
            writeln!(output, "**Profiling time:** {}ms", profile.profiling_time_ms)?;
        }

        writeln!(output)?;
        writeln!(output, "{h}# Value Types")?;
        writeln!(output)?;
        writeln!(output, "| Type | Count |")?;
        writeln!(output, "|------|-------|")?;
        for (kind, count) in profile.type_counts.iter() {
            writeln!(output, "| {} | {count} |", kind.label())?;
        }

        writeln!(output)?;
        writeln!(output, "{h}# Distribution")?;
        writeln!(output)?;
        match &profile.distribution {
            Distribution::NoNumericData => {
                writeln!(output, "> No valid numeric data to analyze for distribution.")?;
            }
            Distribution::Binary { zeros, ones } => {
                writeln!(output, "Binary frequency:")?;
                writeln!(output)?;
                writeln!(output, "| Value | Count |")?;
                writeln!(output, "|-------|-------|")?;
                writeln!(output, "| 0 | {zeros} |")?;
                writeln!(output, "| 1 | {ones} |")?;
            }
            Distribution::Histogram(histogram) => {
                writeln!(
                    output,
                    "Numeric range {} to {}, bin size {}.",
                    histogram.min, histogram.max, histogram.range_size
                )?;
                writeln!(output)?;
                writeln!(output, "| Range | Count |")?;
                writeln!(output, "|-------|-------|")?;
                for bin in config.visible_bins(histogram) {
                    writeln!(output, "| {} | {} |", bin.label(), bin.count)?;
                }
            }
        }

        if config.include_samples && !profile.sample_values.is_empty() {
            writeln!(output)?;
            writeln!(output, "{h}# Sample Values")?;
            writeln!(output)?;
            for value in &profile.sample_values {
                writeln!(
                    output,
                    "- `{}`",
                    truncate_field(&value.to_string(), MAX_SAMPLE_LENGTH)
                )?;
            }
        }

        Ok(output)
    }
}

/// Helper function to filter a profile based on configuration.
fn filter_profile_for_config(profile: &ColumnProfile, config: &FormatterConfig) -> ColumnProfile {
    let mut filtered = profile.clone();

    if config.compact_bins {
        if let Distribution::Histogram(histogram) = &mut filtered.distribution {
            histogram.bins.retain(|bin| bin.count > 0);
        }
    }

    if !config.include_samples {
        filtered.sample_values.clear();
    }

    filtered
}
