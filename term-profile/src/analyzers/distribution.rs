//! Numeric coercion and fixed-width binning.
//!
//! The coerced series is every cell that converts to a finite number,
//! whatever its original representation. From that series the profiler
//! derives one of three [`Distribution`] shapes:
//!
//! - no distribution, when nothing coerced
//! - a binary frequency, when the distinct values are exactly `{0, 1}`
//! - a histogram of bins of width `range_size`, aligned to multiples of the width
//!
//! Bin edges are computed as `lower + i * width` rather than by repeated
//! addition, so fractional widths do not drift across many bins.

use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::error::{ProfileError, Result};

/// Result of coercing a column to numbers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoercedSeries {
    /// Finite coerced values, in column order.
    pub values: Vec<f64>,
    /// Cells that parsed to NaN or an infinity and were dropped.
    pub non_finite: u64,
}

/// Converts every cell that parses as a number, dropping the rest.
pub fn coerce(cells: &[Cell]) -> CoercedSeries {
    let mut series = CoercedSeries::default();
    for value in cells.iter().filter_map(Cell::to_number) {
        if value.is_finite() {
            series.values.push(value);
        } else {
            series.non_finite += 1;
        }
    }
    series
}

/// A single histogram bin `[lower, upper)`.
///
/// The last bin of a histogram is closed on the right.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: u64,
}

impl HistogramBin {
    /// Display label with both bounds rounded to two decimals, e.g. `0–10`.
    pub fn label(&self) -> String {
        format!("{}–{}", format_bound(self.lower), format_bound(self.upper))
    }
}

/// Rounds to two decimal places for display.
pub fn format_bound(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    // avoid printing "-0"
    if rounded == 0.0 {
        "0".to_string()
    } else {
        rounded.to_string()
    }
}

/// Histogram over the coerced series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericHistogram {
    /// Width of every bin.
    pub range_size: f64,
    /// Smallest coerced value.
    pub min: f64,
    /// Largest coerced value.
    pub max: f64,
    /// All declared bins in ascending order, including empty ones.
    pub bins: Vec<HistogramBin>,
}

impl NumericHistogram {
    /// Bins that received at least one value, in ascending order.
    pub fn observed_bins(&self) -> impl Iterator<Item = &HistogramBin> {
        self.bins.iter().filter(|bin| bin.count > 0)
    }

    /// Sum of all bin counts.
    pub fn total_count(&self) -> u64 {
        self.bins.iter().map(|bin| bin.count).sum()
    }
}

/// Distribution of the coerced numeric values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Distribution {
    /// No cell could be coerced to a number.
    NoNumericData,
    /// The coerced values are exactly the two values 0 and 1.
    Binary { zeros: u64, ones: u64 },
    /// Fixed-width histogram.
    Histogram(NumericHistogram),
}

impl Distribution {
    /// Builds the distribution for a coerced series.
    pub fn compute(values: &[f64], range_size: f64, max_bins: usize) -> Result<Self> {
        if values.is_empty() {
            return Ok(Distribution::NoNumericData);
        }

        if let Some((zeros, ones)) = binary_counts(values) {
            return Ok(Distribution::Binary { zeros, ones });
        }

        Ok(Distribution::Histogram(build_histogram(
            values, range_size, max_bins,
        )?))
    }

    pub fn as_histogram(&self) -> Option<&NumericHistogram> {
        match self {
            Distribution::Histogram(histogram) => Some(histogram),
            _ => None,
        }
    }
}

/// Returns `(zeros, ones)` iff the distinct values are exactly `{0, 1}`.
///
/// A column holding a single distinct value, even 0 or 1, is not binary.
fn binary_counts(values: &[f64]) -> Option<(u64, u64)> {
    let mut zeros = 0u64;
    let mut ones = 0u64;
    for value in values {
        if *value == 0.0 {
            zeros += 1;
        } else if *value == 1.0 {
            ones += 1;
        } else {
            return None;
        }
    }
    (zeros > 0 && ones > 0).then_some((zeros, ones))
}

/// Layout of equal-width bins aligned to multiples of the width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinLayout {
    lower: f64,
    width: f64,
    bins: usize,
}

impl BinLayout {
    /// Creates the layout covering `[min, max]`.
    ///
    /// The first edge is the largest multiple of `width` not above `min`, the
    /// last edge the smallest multiple not below `max`. When both coincide a
    /// single bin `[min, min + width)` is used.
    pub fn new(min: f64, max: f64, width: f64, max_bins: usize) -> Result<Self> {
        validate_range_size(width)?;
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(ProfileError::Internal(format!(
                "invalid value range [{min}, {max}] for binning"
            )));
        }

        let lower = (min / width).floor() * width;
        let upper = (max / width).ceil() * width;
        let span = ((upper - lower) / width).round();
        if !lower.is_finite() || !span.is_finite() || span > max_bins as f64 {
            return Err(too_many_bins(min, max, width, max_bins));
        }

        let mut layout = Self {
            lower,
            width,
            bins: (span as usize).max(1),
        };

        // rounding in the alignment above may leave an end of the range uncovered
        if layout.lower > min {
            layout.lower -= width;
            layout.bins += 1;
        }
        while layout.edge(layout.bins) < max && layout.bins <= max_bins {
            layout.bins += 1;
        }
        if layout.bins > max_bins {
            return Err(too_many_bins(min, max, width, max_bins));
        }

        Ok(layout)
    }

    /// Number of bins, always at least one.
    pub fn bin_count(&self) -> usize {
        self.bins
    }

    /// Edge `i`, for `i` in `0..=bin_count()`.
    pub fn edge(&self, i: usize) -> f64 {
        self.lower + i as f64 * self.width
    }

    /// Index of the bin holding `value`.
    ///
    /// A value equal to an inner edge belongs to the bin starting at that
    /// edge; values at or beyond the final edge belong to the last bin.
    pub fn index_of(&self, value: f64) -> usize {
        let last = self.bins - 1;
        let raw = ((value - self.lower) / self.width).floor();
        let mut index = if raw > 0.0 {
            (raw as usize).min(last)
        } else {
            0
        };

        // the division can land one off near an edge; settle against the edges themselves
        while index > 0 && value < self.edge(index) {
            index -= 1;
        }
        while index < last && value >= self.edge(index + 1) {
            index += 1;
        }
        index
    }

    /// Empty bins for this layout.
    pub fn empty_bins(&self) -> Vec<HistogramBin> {
        (0..self.bins)
            .map(|i| HistogramBin {
                lower: self.edge(i),
                upper: self.edge(i + 1),
                count: 0,
            })
            .collect()
    }
}

/// Assigns every value to its bin and returns the histogram.
pub fn build_histogram(
    values: &[f64],
    range_size: f64,
    max_bins: usize,
) -> Result<NumericHistogram> {
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(*v), hi.max(*v))
        });
    if min > max {
        return Err(ProfileError::Internal(
            "cannot build a histogram from an empty series".to_string(),
        ));
    }

    let layout = BinLayout::new(min, max, range_size, max_bins)?;
    let mut bins = layout.empty_bins();
    for value in values {
        bins[layout.index_of(*value)].count += 1;
    }

    Ok(NumericHistogram {
        range_size,
        min,
        max,
        bins,
    })
}

/// Checks that a bin width is usable.
pub fn validate_range_size(range_size: f64) -> Result<()> {
    if range_size.is_finite() && range_size > 0.0 {
        Ok(())
    } else {
        Err(ProfileError::configuration(format!(
            "range_size must be a positive finite number, got {range_size}"
        )))
    }
}

fn too_many_bins(min: f64, max: f64, width: f64, max_bins: usize) -> ProfileError {
    ProfileError::configuration(format!(
        "range_size {width} splits [{min}, {max}] into more than {max_bins} bins"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(histogram: &NumericHistogram) -> Vec<u64> {
        histogram.bins.iter().map(|bin| bin.count).collect()
    }

    #[test]
    fn test_coerce_mixes_representations() {
        let cells = vec![
            Cell::Number(1.0),
            Cell::text(" 2 "),
            Cell::Null,
            Cell::text("abc"),
            Cell::text(""),
            Cell::text("NaN"),
            Cell::text("inf"),
            Cell::Number(3.5),
        ];

        let series = coerce(&cells);
        assert_eq!(series.values, vec![1.0, 2.0, 3.5]);
        assert_eq!(series.non_finite, 2);
    }

    #[test]
    fn test_no_numeric_data() {
        assert_eq!(
            Distribution::compute(&[], 10.0, 100).unwrap(),
            Distribution::NoNumericData
        );
    }

    #[test]
    fn test_binary_frequency() {
        let distribution = Distribution::compute(&[0.0, 1.0, 1.0, 0.0, 0.0], 10.0, 100).unwrap();
        assert_eq!(distribution, Distribution::Binary { zeros: 3, ones: 2 });
    }

    #[test]
    fn test_binary_requires_both_values() {
        let only_zero = Distribution::compute(&[0.0, 0.0], 10.0, 100).unwrap();
        assert!(only_zero.as_histogram().is_some());

        let only_one = Distribution::compute(&[1.0], 10.0, 100).unwrap();
        assert!(only_one.as_histogram().is_some());

        let zero_two = Distribution::compute(&[0.0, 2.0], 10.0, 100).unwrap();
        assert!(zero_two.as_histogram().is_some());
    }

    #[test]
    fn test_aligned_bins() {
        let histogram = build_histogram(&[5.0, 25.0, 45.0], 10.0, 100).unwrap();

        let labels: Vec<String> = histogram.bins.iter().map(HistogramBin::label).collect();
        assert_eq!(labels, vec!["0–10", "10–20", "20–30", "30–40", "40–50"]);
        assert_eq!(counts(&histogram), vec![1, 0, 1, 0, 1]);
        assert_eq!(histogram.observed_bins().count(), 3);
        assert_eq!(histogram.min, 5.0);
        assert_eq!(histogram.max, 45.0);
    }

    #[test]
    fn test_inner_edge_goes_to_next_bin() {
        let histogram = build_histogram(&[0.0, 20.0, 40.0], 10.0, 100).unwrap();
        // the global maximum sits on the final edge and stays in the last bin
        assert_eq!(histogram.bins.len(), 4);
        assert_eq!(counts(&histogram), vec![1, 0, 1, 1]);
        assert_eq!(histogram.bins[2].lower, 20.0);
    }

    #[test]
    fn test_single_value_on_edge() {
        let histogram = build_histogram(&[10.0, 10.0], 10.0, 100).unwrap();
        assert_eq!(histogram.bins.len(), 1);
        assert_eq!(histogram.bins[0].lower, 10.0);
        assert_eq!(histogram.bins[0].upper, 20.0);
        assert_eq!(histogram.bins[0].count, 2);
    }

    #[test]
    fn test_negative_values() {
        let histogram = build_histogram(&[-15.0, -5.0, 3.0], 10.0, 100).unwrap();
        assert_eq!(histogram.bins.first().unwrap().lower, -20.0);
        assert_eq!(histogram.bins.last().unwrap().upper, 10.0);
        assert_eq!(counts(&histogram), vec![1, 1, 1]);
    }

    #[test]
    fn test_fractional_width() {
        let mut values: Vec<f64> = (0..10).map(|i| i as f64 / 10.0 + 0.05).collect();
        values.push(1.0);
        let histogram = build_histogram(&values, 0.1, 1000).unwrap();

        assert_eq!(histogram.bins.len(), 10);
        assert_eq!(histogram.bins[0].lower, 0.0);
        assert_eq!(histogram.bins[9].upper, 1.0);
        assert_eq!(histogram.total_count(), 11);
        for bin in &histogram.bins[..9] {
            assert_eq!(bin.count, 1, "bin {}", bin.label());
        }
        // 0.95 and the maximum 1.0 share the closed last bin
        assert_eq!(histogram.bins[9].count, 2);
        assert_eq!(histogram.bins[3].label(), "0.3–0.4");
    }

    #[test]
    fn test_index_agrees_with_edges() {
        let layout = BinLayout::new(0.0, 1.0, 0.1, 1000).unwrap();
        for i in 0..layout.bin_count() {
            let edge = layout.edge(i);
            assert_eq!(layout.index_of(edge), i);
        }
        assert_eq!(layout.index_of(1.0), layout.bin_count() - 1);
    }

    #[test]
    fn test_too_many_bins_is_rejected() {
        let err = build_histogram(&[0.0, 1_000_000.0], 1.0, 10_000).unwrap_err();
        assert!(matches!(err, ProfileError::Configuration(_)));
    }

    #[test]
    fn test_invalid_range_size() {
        assert!(validate_range_size(0.0).is_err());
        assert!(validate_range_size(-1.0).is_err());
        assert!(validate_range_size(f64::NAN).is_err());
        assert!(validate_range_size(f64::INFINITY).is_err());
        assert!(validate_range_size(0.25).is_ok());
    }

    #[test]
    fn test_format_bound() {
        assert_eq!(format_bound(0.0), "0");
        assert_eq!(format_bound(-0.0001), "0");
        assert_eq!(format_bound(10_000_000.0), "10000000");
        assert_eq!(format_bound(0.30000000000000004), "0.3");
        assert_eq!(format_bound(2.557), "2.56");
    }

    #[test]
    fn test_distribution_serializes_with_tag() {
        let json = serde_json::to_value(Distribution::Binary { zeros: 1, ones: 2 }).unwrap();
        assert_eq!(json["type"], "binary");
        assert_eq!(json["zeros"], 1);
    }
}
