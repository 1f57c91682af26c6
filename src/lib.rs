//! EdgeQuake Rerank - Reranker contract for hybrid search
//!
//! This crate defines how vector search results and full-text search (FTS)
//! results are combined into one ranked result set:
//! - The [`Reranker`] trait that every reranking strategy implements
//! - [`RerankerConfig`] with the `return_score` option (`relevance` | `all`)
//! - A score-agnostic [`merge_results`] that concatenates both result sets
//!   and drops duplicate `_rowid`s
//!
//! Result sets are Arrow [`RecordBatch`](arrow::record_batch::RecordBatch)es.
//! Concrete strategies (cross-encoders, reciprocal rank fusion, ...) live
//! with their callers and plug in through the trait.
//!
//! # Example
//!
//! ```ignore
//! use edgequake_rerank::{Reranker, RerankInput};
//!
//! let reranker: Arc<dyn Reranker> = Arc::new(MyReranker::new(RerankerConfig::default()));
//! let ranked = reranker.rerank("rust async", &RerankInput::Hybrid { vector, fts })?;
//! ```
//!
//! # See Also
//!
//! - [`crate::reranker`] for the trait and merge helpers
//! - [`crate::error`] for error kinds

pub mod error;
pub mod reranker;

pub use error::{RerankError, Result};
pub use reranker::{
    concat_promoted, dedup_by_row_id, merge_results, retain_requested_scores, RerankInput,
    Reranker, RerankerConfig, ReturnScore, FTS_SCORE_COLUMN, RELEVANCE_SCORE_COLUMN,
    RETURN_SCORE_ENV, ROW_ID_COLUMN, VECTOR_SCORE_COLUMN,
};
