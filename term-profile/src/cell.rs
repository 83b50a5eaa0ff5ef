//! Raw cell values and their conversion from Arrow arrays.
//!
//! A [`Cell`] remembers whether the loader produced a native number or a
//! piece of text. The classifier depends on that distinction: `1` is a true
//! numeric value while `"1"` is a numeric string.

use std::fmt;

use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Float64Type};
use arrow::util::display::{ArrayFormatter, FormatOptions};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A single entry of the profiled column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Cell {
    /// Absent value.
    Null,
    /// A value the data source already typed as a number.
    Number(f64),
    /// A textual value, kept exactly as loaded (untrimmed).
    Text(String),
}

impl Cell {
    /// Creates a text cell.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Renders the cell to its string form. `None` for null cells.
    pub fn render(&self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Number(v) => Some(v.to_string()),
            Self::Text(s) => Some(s.clone()),
        }
    }

    /// Best-effort conversion to a number, regardless of representation.
    ///
    /// Returns `None` for nulls and for text that does not parse.
    pub fn to_number(&self) -> Option<f64> {
        match self {
            Self::Null => None,
            Self::Number(v) => Some(*v),
            Self::Text(s) => parse_number(s),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Number(v) => write!(f, "{v}"),
            Self::Text(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Parses a trimmed string as a floating-point number.
pub fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok()
}

/// Converts one Arrow array into cells, appending to `out`.
///
/// Numeric arrays become [`Cell::Number`], string arrays become [`Cell::Text`]
/// and every other type is rendered through Arrow's display formatting. Float
/// NaN is treated as a missing value.
pub fn extend_from_array(array: &dyn Array, out: &mut Vec<Cell>) -> Result<()> {
    out.reserve(array.len());

    match array.data_type() {
        DataType::Null => out.extend((0..array.len()).map(|_| Cell::Null)),
        DataType::Utf8 => out.extend(array.as_string::<i32>().iter().map(text_cell)),
        DataType::LargeUtf8 => out.extend(array.as_string::<i64>().iter().map(text_cell)),
        DataType::Utf8View => out.extend(array.as_string_view().iter().map(text_cell)),
        dt if dt.is_numeric() => {
            let floats = arrow::compute::cast(array, &DataType::Float64)?;
            out.extend(
                floats
                    .as_primitive::<Float64Type>()
                    .iter()
                    .map(|value| match value {
                        Some(v) if !v.is_nan() => Cell::Number(v),
                        _ => Cell::Null,
                    }),
            );
        }
        _ => {
            let formatter = ArrayFormatter::try_new(array, &FormatOptions::default())?;
            for row in 0..array.len() {
                if array.is_null(row) {
                    out.push(Cell::Null);
                } else {
                    out.push(Cell::Text(formatter.value(row).to_string()));
                }
            }
        }
    }

    Ok(())
}

fn text_cell(value: Option<&str>) -> Cell {
    value.map_or(Cell::Null, |s| Cell::Text(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{BooleanArray, Float64Array, Int64Array, StringArray, StringViewArray};

    #[test]
    fn test_render() {
        assert_eq!(Cell::Null.render(), None);
        assert_eq!(Cell::Number(5.0).render().as_deref(), Some("5"));
        assert_eq!(Cell::Number(2.5).render().as_deref(), Some("2.5"));
        assert_eq!(Cell::text(" a ").render().as_deref(), Some(" a "));
    }

    #[test]
    fn test_to_number() {
        assert_eq!(Cell::Number(3.0).to_number(), Some(3.0));
        assert_eq!(Cell::text(" 42 ").to_number(), Some(42.0));
        assert_eq!(Cell::text("1e3").to_number(), Some(1000.0));
        assert_eq!(Cell::text("abc").to_number(), None);
        assert_eq!(Cell::text("").to_number(), None);
        assert_eq!(Cell::Null.to_number(), None);
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Cell::from(None::<i64>), Cell::Null);
        assert_eq!(Cell::from(Some(1i64)), Cell::Number(1.0));
        assert_eq!(Cell::from(Some("x")), Cell::text("x"));
    }

    #[test]
    fn test_numeric_arrays_become_numbers() {
        let ints = Int64Array::from(vec![Some(1), None, Some(3)]);
        let floats = Float64Array::from(vec![Some(2.5), Some(f64::NAN)]);

        let mut cells = Vec::new();
        extend_from_array(&ints, &mut cells).unwrap();
        extend_from_array(&floats, &mut cells).unwrap();

        assert_eq!(
            cells,
            vec![
                Cell::Number(1.0),
                Cell::Null,
                Cell::Number(3.0),
                Cell::Number(2.5),
                Cell::Null,
            ]
        );
    }

    #[test]
    fn test_string_arrays_stay_untrimmed() {
        let strings = StringArray::from(vec![Some(" a"), None, Some("")]);
        let views = StringViewArray::from(vec![Some("1")]);

        let mut cells = Vec::new();
        extend_from_array(&strings, &mut cells).unwrap();
        extend_from_array(&views, &mut cells).unwrap();

        assert_eq!(
            cells,
            vec![Cell::text(" a"), Cell::Null, Cell::text(""), Cell::text("1")]
        );
    }

    #[test]
    fn test_other_types_render_as_text() {
        let bools = BooleanArray::from(vec![Some(true), None]);
        let mut cells = Vec::new();
        extend_from_array(&bools, &mut cells).unwrap();
        assert_eq!(cells, vec![Cell::text("true"), Cell::Null]);
    }
}
