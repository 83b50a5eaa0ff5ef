//! Example profiling every column of an in-memory table.
//!
//! The table mixes native numbers, numeric strings, blanks and text so the
//! output shows each kind of distribution report.

use std::sync::Arc;

use datafusion::arrow::array::{Float64Array, Int64Array, StringArray};
use datafusion::arrow::datatypes::{DataType, Field, Schema};
use datafusion::arrow::record_batch::RecordBatch;
use datafusion::datasource::MemTable;
use datafusion::prelude::*;
use term_profile::analyzers::ColumnProfiler;
use term_profile::error::Result;
use term_profile::formatters::{FormatterConfig, MarkdownFormatter, ProfileFormatter};

#[tokio::main]
async fn main() -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("age", DataType::Int64, true),
        Field::new("bmi", DataType::Float64, true),
        Field::new("smoker", DataType::Int64, true),
        Field::new("blood_pressure", DataType::Utf8, true),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from(vec![
                Some(34),
                Some(58),
                None,
                Some(41),
                Some(67),
                Some(29),
            ])),
            Arc::new(Float64Array::from(vec![
                Some(22.4),
                Some(31.9),
                Some(27.0),
                None,
                Some(24.6),
                Some(35.2),
            ])),
            Arc::new(Int64Array::from(vec![
                Some(0),
                Some(1),
                Some(0),
                Some(0),
                Some(1),
                None,
            ])),
            Arc::new(StringArray::from(vec![
                Some("120"),
                Some("high"),
                Some(" "),
                Some("135.5"),
                None,
                Some("normal"),
            ])),
        ],
    )?;

    let ctx = SessionContext::new();
    let table = MemTable::try_new(schema.clone(), vec![vec![batch]])?;
    ctx.register_table("patients", Arc::new(table))?;

    let profiler = ColumnProfiler::builder().range_size(5.0).build()?;
    let formatter = MarkdownFormatter::with_config(FormatterConfig::minimal());

    for field in schema.fields() {
        let profile = profiler
            .profile_column(&ctx, "patients", field.name())
            .await?;
        println!("{}", formatter.format(&profile)?);
    }

    Ok(())
}
