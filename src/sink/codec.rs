//! Parquet encoding of result records
//!
//! Schema: `(total_samples: int64, points_in_circle: int64, pi_estimate: float64)`

use super::record::ResultRecord;
use arrow::array::{Array, ArrayRef, Float64Array, Int64Array};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use bytes::Bytes;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::errors::ParquetError;
use parquet::file::properties::{WriterProperties, WriterVersion};
use std::sync::Arc;
use thiserror::Error;

pub const COL_TOTAL_SAMPLES: &str = "total_samples";
pub const COL_POINTS_IN_CIRCLE: &str = "points_in_circle";
pub const COL_PI_ESTIMATE: &str = "pi_estimate";

/// Failures while converting between records and Parquet bytes
#[derive(Error, Debug)]
pub enum RecordCodecError {
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    #[error("Unexpected schema: {0}")]
    Schema(String),
}

/// Arrow schema of the result table
pub fn result_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new(COL_TOTAL_SAMPLES, DataType::Int64, false),
        Field::new(COL_POINTS_IN_CIRCLE, DataType::Int64, false),
        Field::new(COL_PI_ESTIMATE, DataType::Float64, false),
    ]))
}

/// Encode records as a single Parquet file held in memory
pub fn encode_records(records: &[ResultRecord]) -> Result<Bytes, RecordCodecError> {
    let schema = result_schema();

    let totals: ArrayRef = Arc::new(Int64Array::from(
        records.iter().map(|r| r.total_samples).collect::<Vec<_>>(),
    ));
    let matched: ArrayRef = Arc::new(Int64Array::from(
        records.iter().map(|r| r.points_in_circle).collect::<Vec<_>>(),
    ));
    let estimates: ArrayRef = Arc::new(Float64Array::from(
        records.iter().map(|r| r.pi_estimate).collect::<Vec<_>>(),
    ));

    let batch = RecordBatch::try_new(schema.clone(), vec![totals, matched, estimates])?;

    let props = WriterProperties::builder()
        .set_writer_version(WriterVersion::PARQUET_2_0)
        .set_compression(Compression::SNAPPY)
        .build();

    let mut buffer = Vec::new();
    let mut writer = ArrowWriter::try_new(&mut buffer, schema, Some(props))?;
    writer.write(&batch)?;
    writer.close()?;

    Ok(Bytes::from(buffer))
}

/// Decode every row from a Parquet file produced by [`encode_records`]
pub fn decode_records(bytes: Bytes) -> Result<Vec<ResultRecord>, RecordCodecError> {
    let reader = ParquetRecordBatchReaderBuilder::try_new(bytes)?.build()?;

    let mut records = Vec::new();
    for batch in reader {
        let batch = batch?;
        let totals = int64_column(&batch, COL_TOTAL_SAMPLES)?;
        let matched = int64_column(&batch, COL_POINTS_IN_CIRCLE)?;
        let estimates = batch
            .column_by_name(COL_PI_ESTIMATE)
            .and_then(|c| c.as_any().downcast_ref::<Float64Array>())
            .ok_or_else(|| {
                RecordCodecError::Schema(format!("expected float64 column {}", COL_PI_ESTIMATE))
            })?;

        for row in 0..batch.num_rows() {
            if totals.is_null(row) || matched.is_null(row) || estimates.is_null(row) {
                return Err(RecordCodecError::Schema(format!("null value in row {}", row)));
            }
            records.push(ResultRecord {
                total_samples: totals.value(row),
                points_in_circle: matched.value(row),
                pi_estimate: estimates.value(row),
            });
        }
    }

    Ok(records)
}

fn int64_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a Int64Array, RecordCodecError> {
    batch
        .column_by_name(name)
        .and_then(|c| c.as_any().downcast_ref::<Int64Array>())
        .ok_or_else(|| RecordCodecError::Schema(format!("expected int64 column {}", name)))
}
