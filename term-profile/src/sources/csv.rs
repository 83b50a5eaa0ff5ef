//! CSV file source implementation.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use datafusion::arrow::datatypes::Schema;
use datafusion::prelude::*;
use regex::Regex;
use tracing::{debug, info, instrument};

use super::DataSource;
use crate::error::{ProfileError, Result};

/// Field values read as null by default: the empty field plus the usual
/// spreadsheet and dataframe spellings of a missing value.
pub const DEFAULT_NULL_REGEX: &str = r"^(|#N/A|#N/A N/A|#NA|-1\.#IND|-1\.#QNAN|-NaN|-nan|1\.#IND|1\.#QNAN|<NA>|N/A|NA|NULL|NaN|None|n/a|nan|null)$";

/// Options for configuring CSV file reading.
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Whether the CSV file has a header row
    pub has_header: bool,
    /// Field delimiter (default: ',')
    pub delimiter: u8,
    /// Quote character (default: '"')
    pub quote: u8,
    /// Escape character (default: None)
    pub escape: Option<u8>,
    /// Comment prefix (lines starting with this are ignored)
    pub comment: Option<u8>,
    /// Schema to use (if None, will be inferred)
    pub schema: Option<Arc<Schema>>,
    /// Maximum records to read for schema inference
    pub schema_infer_max_records: usize,
    /// Fields matching this regex load as null. `None` treats only empty
    /// fields as null.
    pub null_regex: Option<String>,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            has_header: true,
            delimiter: b',',
            quote: b'"',
            escape: None,
            comment: None,
            schema: None,
            // the whole file, so late text still makes the column text
            schema_infer_max_records: usize::MAX,
            null_regex: Some(DEFAULT_NULL_REGEX.to_string()),
        }
    }
}

/// A delimited file registered through DataFusion's CSV reader.
///
/// Column types are inferred per column, so a column whose values are all
/// numeric loads as numbers while any stray text makes the whole column text.
///
/// # Examples
///
/// ```rust,no_run
/// use term_profile::sources::{CsvOptions, CsvSource};
///
/// # fn example() -> term_profile::error::Result<()> {
/// let source = CsvSource::new("data/customers.csv")?;
///
/// let options = CsvOptions {
///     delimiter: b'\t',
///     ..Default::default()
/// };
/// let tsv = CsvSource::with_options("data/customers.tsv", options)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: String,
    options: CsvOptions,
}

impl CsvSource {
    /// Creates a new CSV source from a file path.
    pub fn new(path: impl Into<String>) -> Result<Self> {
        Self::with_options(path, CsvOptions::default())
    }

    /// Creates a new CSV source with custom options.
    pub fn with_options(path: impl Into<String>, options: CsvOptions) -> Result<Self> {
        let path = path.into();
        if path.trim().is_empty() {
            return Err(ProfileError::configuration("CSV path must not be empty"));
        }
        if let Some(null_regex) = &options.null_regex {
            Regex::new(null_regex).map_err(|e| {
                ProfileError::configuration(format!("invalid null regex '{null_regex}': {e}"))
            })?;
        }
        Ok(Self { path, options })
    }

    /// Path of the underlying file.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn options(&self) -> &CsvOptions {
        &self.options
    }

    /// Extension passed to DataFusion, taken from the file itself so that
    /// `.tsv`, `.txt` or extension-less files register too.
    fn file_extension(&self) -> String {
        Path::new(&self.path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{ext}"))
            .unwrap_or_default()
    }
}

#[async_trait]
impl DataSource for CsvSource {
    #[instrument(skip(self, ctx), fields(
        table.name = %table_name,
        source.type = "csv",
        csv.delimiter = %self.options.delimiter as char,
        csv.has_header = self.options.has_header
    ))]
    async fn register(&self, ctx: &SessionContext, table_name: &str) -> Result<()> {
        info!(
            table.name = %table_name,
            source.path = %self.path,
            "Registering CSV data source"
        );

        if !Path::new(&self.path).is_file() {
            return Err(ProfileError::data_source(
                "CSV",
                format!("file not found: {}", self.path),
            ));
        }

        let extension = self.file_extension();
        let mut csv_options = CsvReadOptions::new()
            .has_header(self.options.has_header)
            .delimiter(self.options.delimiter)
            .quote(self.options.quote)
            .file_extension(&extension)
            .schema_infer_max_records(self.options.schema_infer_max_records)
            .null_regex(self.options.null_regex.clone());

        if let Some(escape) = self.options.escape {
            csv_options = csv_options.escape(escape);
        }
        if let Some(comment) = self.options.comment {
            csv_options = csv_options.comment(comment);
        }
        if let Some(schema) = &self.options.schema {
            csv_options = csv_options.schema(schema);
        }

        ctx.register_csv(table_name, &self.path, csv_options)
            .await
            .map_err(|e| {
                ProfileError::data_source_with_source(
                    "CSV",
                    format!("failed to read {} as CSV", self.path),
                    Box::new(e),
                )
            })?;

        debug!(
            table.name = %table_name,
            source.type = "csv",
            "CSV data source registered successfully"
        );

        Ok(())
    }

    fn description(&self) -> String {
        format!("CSV file: {}", self.path)
    }
}
