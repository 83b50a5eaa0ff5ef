//! Data source connectors.
//!
//! A [`DataSource`] registers tabular data with a DataFusion
//! [`SessionContext`]; [`load_column`] then pulls one column out of a
//! registered table as [`Cell`]s for the profiler.

use std::fmt::Debug;

use async_trait::async_trait;
use datafusion::prelude::SessionContext;
use tracing::{debug, instrument};

use crate::cell::{extend_from_array, Cell};
use crate::error::{ProfileError, Result};

mod csv;

pub use csv::{CsvOptions, CsvSource, DEFAULT_NULL_REGEX};

/// A data source that can be registered with a DataFusion context.
///
/// # Examples
///
/// ```rust,no_run
/// use term_profile::sources::{CsvSource, DataSource};
/// use datafusion::prelude::SessionContext;
///
/// # async fn example() -> term_profile::error::Result<()> {
/// let source = CsvSource::new("data/customers.csv")?;
/// let ctx = SessionContext::new();
/// source.register(&ctx, "customers").await?;
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait DataSource: Debug + Send + Sync {
    /// Registers this data source under `table_name`.
    async fn register(&self, ctx: &SessionContext, table_name: &str) -> Result<()>;

    /// Returns a human-readable description of this data source.
    fn description(&self) -> String;
}

/// Loads `column_name` from a registered table as an ordered list of cells.
///
/// Fails with [`ProfileError::ColumnNotFound`] when the table has no such
/// column. Rows keep their file order.
#[instrument(skip(ctx))]
pub async fn load_column(
    ctx: &SessionContext,
    table_name: &str,
    column_name: &str,
) -> Result<Vec<Cell>> {
    let df = ctx.table(table_name).await?;
    if !df.schema().has_column_with_unqualified_name(column_name) {
        return Err(ProfileError::column_not_found(column_name));
    }

    let partitions = df.select_columns(&[column_name])?.collect_partitioned().await?;

    let mut cells = Vec::new();
    for batch in partitions.iter().flatten() {
        extend_from_array(batch.column(0).as_ref(), &mut cells)?;
    }

    debug!(
        table = table_name,
        column = column_name,
        rows = cells.len(),
        "Loaded column"
    );

    Ok(cells)
}
