//! Result-table helpers shared by all rerankers.
//!
//! Search results travel as Arrow [`RecordBatch`]es keyed by the
//! [`ROW_ID_COLUMN`]. This module holds the score-agnostic merge used by
//! [`Reranker::merge_results`](super::Reranker::merge_results) and the
//! pieces it is built from.
//!
//! # Merge Pipeline
//!
//! ```ascii
//! vector_results ──┐
//!                  ├──► concat_promoted ──► dedup_by_row_id ──► merged
//! fts_results ─────┘    (union schema)      (first _rowid wins)
//! ```

use std::collections::HashSet;
use std::sync::Arc;

use arrow::array::{new_null_array, ArrayRef, BooleanArray};
use arrow::compute::{concat_batches, filter_record_batch};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::error::ArrowError;
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use arrow::row::{RowConverter, SortField};
use tracing::{debug, trace};

use super::config::ReturnScore;
use crate::error::Result;

/// Row identifier column. Must be present in every table that is merged.
pub const ROW_ID_COLUMN: &str = "_rowid";

/// Combined score column written by rerankers.
pub const RELEVANCE_SCORE_COLUMN: &str = "_relevance_score";

/// Per-source score column produced by vector search.
pub const VECTOR_SCORE_COLUMN: &str = "_distance";

/// Per-source score column produced by full-text search.
pub const FTS_SCORE_COLUMN: &str = "_score";

/// Merge vector and FTS results, dropping duplicate row ids.
///
/// Concatenates `vector_results` then `fts_results` (see
/// [`concat_promoted`]) and keeps the first row seen for every `_rowid`, so a
/// row present in both inputs is taken from `vector_results`. Row order is
/// otherwise preserved.
///
/// NOTE: scores are not looked at. No relevance column is produced and
/// [`ReturnScore::All`] is not honored; rerankers that need score-aware
/// merging must merge on their own.
pub fn merge_results(vector_results: &RecordBatch, fts_results: &RecordBatch) -> Result<RecordBatch> {
    let combined = concat_promoted(&[vector_results.clone(), fts_results.clone()])?;
    let merged = dedup_by_row_id(&combined)?;

    debug!(
        "Merged {} vector and {} FTS rows into {} rows ({} duplicates dropped)",
        vector_results.num_rows(),
        fts_results.num_rows(),
        merged.num_rows(),
        combined.num_rows() - merged.num_rows()
    );
    Ok(merged)
}

/// Concatenate batches whose schemas may differ.
///
/// The output schema is the union of all columns in first-seen order:
/// - a column missing from a batch is null-filled for that batch's rows
/// - a `Null`-typed column is promoted to the type seen elsewhere
/// - nullability widens
///
/// Any other type conflict fails with [`ArrowError::SchemaError`].
pub fn concat_promoted(batches: &[RecordBatch]) -> Result<RecordBatch> {
    let schema = promoted_schema(batches)?;
    let conformed = batches
        .iter()
        .map(|batch| conform_to_schema(batch, &schema))
        .collect::<Result<Vec<_>>>()?;

    Ok(concat_batches(&schema, &conformed)?)
}

/// Keep only the first row for each distinct [`ROW_ID_COLUMN`] value.
///
/// Null ids compare equal to each other. Fails with an Arrow schema error
/// when the batch has no `_rowid` column.
pub fn dedup_by_row_id(batch: &RecordBatch) -> Result<RecordBatch> {
    let row_ids = batch.column(batch.schema_ref().index_of(ROW_ID_COLUMN)?);

    let converter = RowConverter::new(vec![SortField::new(row_ids.data_type().clone())])?;
    let rows = converter.convert_columns(&[Arc::clone(row_ids)])?;

    let mut seen = HashSet::with_capacity(rows.num_rows());
    let keep: Vec<bool> = rows.iter().map(|row| seen.insert(row)).collect();
    let keep = BooleanArray::from(keep);

    if keep.true_count() == batch.num_rows() {
        return Ok(batch.clone());
    }
    Ok(filter_record_batch(batch, &keep)?)
}

/// Drop per-source score columns unless `return_score` asks for them.
///
/// With [`ReturnScore::Relevance`] the [`VECTOR_SCORE_COLUMN`] and
/// [`FTS_SCORE_COLUMN`] are removed when present; with [`ReturnScore::All`]
/// the batch is returned as is.
pub fn retain_requested_scores(batch: &RecordBatch, return_score: ReturnScore) -> Result<RecordBatch> {
    match return_score {
        ReturnScore::All => Ok(batch.clone()),
        ReturnScore::Relevance => {
            let keep: Vec<usize> = batch
                .schema_ref()
                .fields()
                .iter()
                .enumerate()
                .filter(|(_, field)| {
                    field.name() != VECTOR_SCORE_COLUMN && field.name() != FTS_SCORE_COLUMN
                })
                .map(|(idx, _)| idx)
                .collect();
            Ok(batch.project(&keep)?)
        }
    }
}

fn promoted_schema(batches: &[RecordBatch]) -> Result<SchemaRef> {
    let mut fields: Vec<Field> = Vec::new();

    for batch in batches {
        for field in batch.schema_ref().fields().iter() {
            match fields.iter_mut().find(|f| f.name() == field.name()) {
                Some(existing) => *existing = promote_field(existing, field)?,
                None => fields.push(Field::clone(field)),
            }
        }
    }

    // Columns absent from some batch are null-filled there.
    for field in fields.iter_mut() {
        let missing_somewhere = batches
            .iter()
            .any(|batch| batch.schema_ref().column_with_name(field.name()).is_none());
        if missing_somewhere && !field.is_nullable() {
            trace!("Column '{}' missing from an input, marking nullable", field.name());
            *field = field.clone().with_nullable(true);
        }
    }

    Ok(Arc::new(Schema::new(fields)))
}

fn promote_field(existing: &Field, incoming: &Field) -> Result<Field> {
    let nullable = existing.is_nullable() || incoming.is_nullable();
    match (existing.data_type(), incoming.data_type()) {
        (current, other) if current == other => Ok(existing.clone().with_nullable(nullable)),
        (DataType::Null, other) => {
            trace!("Promoting column '{}' from Null to {}", existing.name(), other);
            Ok(existing
                .clone()
                .with_data_type(other.clone())
                .with_nullable(true))
        }
        (_, DataType::Null) => Ok(existing.clone().with_nullable(true)),
        (current, other) => Err(ArrowError::SchemaError(format!(
            "Unable to merge column '{}': incompatible types {} and {}",
            existing.name(),
            current,
            other
        ))
        .into()),
    }
}

fn conform_to_schema(batch: &RecordBatch, schema: &SchemaRef) -> Result<RecordBatch> {
    let num_rows = batch.num_rows();
    let columns: Vec<ArrayRef> = schema
        .fields()
        .iter()
        .map(|field| match batch.column_by_name(field.name()) {
            Some(column) if column.data_type() == field.data_type() => Arc::clone(column),
            // Missing, or Null-typed and promoted.
            _ => new_null_array(field.data_type(), num_rows),
        })
        .collect();

    let options = RecordBatchOptions::new().with_row_count(Some(num_rows));
    Ok(RecordBatch::try_new_with_options(
        Arc::clone(schema),
        columns,
        &options,
    )?)
}
