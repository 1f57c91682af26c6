//! Reranker trait definition.
//!
//! This module defines the core `Reranker` trait that all reranking
//! strategies must satisfy.
//!
//! # Architecture
//!
//! ```ascii
//!     vector search          full-text search
//!          │                        │
//!          ▼                        ▼
//!    vector_results            fts_results        (RecordBatch, keyed by _rowid)
//!          │                        │
//!          └───────────┬────────────┘
//!                      ▼
//!     ┌─────────────────────────────────────┐
//!     │            Reranker Trait           │
//!     │  rerank_vector   (optional)         │
//!     │  rerank_fts      (optional)         │
//!     │  rerank_hybrid   (required)         │
//!     │  merge_results   (score-agnostic)   │
//!     └──────────────────┬──────────────────┘
//!                        ▼
//!                  ranked results
//! ```

use arrow::record_batch::RecordBatch;

use super::config::{RerankerConfig, ReturnScore};
use super::table;
use crate::error::{RerankError, Result};

/// Result sets handed to [`Reranker::rerank`].
#[derive(Debug, Clone)]
pub enum RerankInput {
    /// Results of a vector-only query.
    Vector(RecordBatch),
    /// Results of an FTS-only query.
    Fts(RecordBatch),
    /// Results of both searches of a hybrid query.
    Hybrid {
        /// Vector search results.
        vector: RecordBatch,
        /// Full-text search results.
        fts: RecordBatch,
    },
}

/// Trait for reranking strategies.
///
/// A reranker is built once, with its [`RerankerConfig`] fixed, and then
/// invoked per query. Calls do not mutate the reranker.
///
/// # Required Methods
///
/// - [`name`](Reranker::name) - Identifier used in error messages
/// - [`config`](Reranker::config) - Configuration the strategy was built with
/// - [`rerank_hybrid`](Reranker::rerank_hybrid) - Rerank vector and FTS results together
///
/// # Provided Methods
///
/// - [`rerank_vector`](Reranker::rerank_vector) / [`rerank_fts`](Reranker::rerank_fts) -
///   fail with [`RerankError::UnsupportedOperation`] unless overridden
/// - [`merge_results`](Reranker::merge_results) - Concatenate and dedupe by `_rowid`
/// - [`rerank`](Reranker::rerank) - Dispatch on a [`RerankInput`]
///
/// A strategy that leaves out `rerank_hybrid` does not compile:
///
/// ```compile_fail
/// use edgequake_rerank::{Reranker, RerankerConfig};
///
/// struct VectorOnly {
///     config: RerankerConfig,
/// }
///
/// impl Reranker for VectorOnly {
///     fn name(&self) -> &str {
///         "vector-only"
///     }
///
///     fn config(&self) -> &RerankerConfig {
///         &self.config
///     }
/// }
/// ```
pub trait Reranker: Send + Sync {
    /// Get the name of this reranker.
    fn name(&self) -> &str;

    /// Get the configuration this reranker was built with.
    fn config(&self) -> &RerankerConfig;

    /// Which scores this reranker was asked to return.
    fn return_score(&self) -> ReturnScore {
        self.config().return_score()
    }

    /// Rerank the results of a vector search.
    ///
    /// Not every strategy supports this; the default fails with
    /// [`RerankError::UnsupportedOperation`].
    fn rerank_vector(&self, query: &str, vector_results: &RecordBatch) -> Result<RecordBatch> {
        let _ = (query, vector_results);
        Err(RerankError::unsupported(self.name(), "rerank_vector"))
    }

    /// Rerank the results of a full-text search.
    ///
    /// Not every strategy supports this; the default fails with
    /// [`RerankError::UnsupportedOperation`].
    fn rerank_fts(&self, query: &str, fts_results: &RecordBatch) -> Result<RecordBatch> {
        let _ = (query, fts_results);
        Err(RerankError::unsupported(self.name(), "rerank_fts"))
    }

    /// Rerank the individual results of a vector and an FTS search.
    ///
    /// Implementations may use either table, both, or compute fresh scores
    /// from `query`.
    fn rerank_hybrid(
        &self,
        query: &str,
        vector_results: &RecordBatch,
        fts_results: &RecordBatch,
    ) -> Result<RecordBatch>;

    /// Merge vector and FTS results, keeping the first row per `_rowid`.
    ///
    /// NOTE: this does not take scores into account. It keeps whichever row
    /// was encountered first, vector results before FTS results, and ignores
    /// [`ReturnScore::All`]. Strategies that use scores must implement their
    /// own merge. See [`merge_results`](super::merge_results).
    fn merge_results(
        &self,
        vector_results: &RecordBatch,
        fts_results: &RecordBatch,
    ) -> Result<RecordBatch> {
        table::merge_results(vector_results, fts_results)
    }

    /// Drop per-source score columns according to [`Reranker::return_score`].
    ///
    /// Offered to implementations for finishing their output; nothing in
    /// the trait calls it.
    fn apply_return_score(&self, results: &RecordBatch) -> Result<RecordBatch> {
        table::retain_requested_scores(results, self.return_score())
    }

    /// Rerank whichever result sets a query produced.
    fn rerank(&self, query: &str, input: &RerankInput) -> Result<RecordBatch> {
        match input {
            RerankInput::Vector(vector_results) => self.rerank_vector(query, vector_results),
            RerankInput::Fts(fts_results) => self.rerank_fts(query, fts_results),
            RerankInput::Hybrid { vector, fts } => self.rerank_hybrid(query, vector, fts),
        }
    }
}
