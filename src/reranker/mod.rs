//! Reranking of vector and full-text search results.
//!
//! A reranker takes the result table of a vector search, of a full-text
//! search, or of both, and returns a single ranked table. Tables are Arrow
//! [`RecordBatch`](arrow::record_batch::RecordBatch)es keyed by the `_rowid`
//! column.
//!
//! # Module Structure
//!
//! ```ascii
//! reranker/
//! ├── mod.rs     ─► This file (re-exports)
//! ├── config.rs  ─► RerankerConfig, ReturnScore
//! ├── traits.rs  ─► Reranker trait, RerankInput
//! └── table.rs   ─► merge_results, column names
//! ```
//!
//! # Example
//!
//! ```ignore
//! use edgequake_rerank::reranker::{Reranker, RerankerConfig};
//!
//! struct MergeOnly {
//!     config: RerankerConfig,
//! }
//!
//! impl Reranker for MergeOnly {
//!     fn name(&self) -> &str { "merge-only" }
//!     fn config(&self) -> &RerankerConfig { &self.config }
//!     fn rerank_hybrid(&self, _query: &str, vector: &RecordBatch, fts: &RecordBatch) -> Result<RecordBatch> {
//!         self.merge_results(vector, fts)
//!     }
//! }
//! ```

mod config;
mod table;
mod traits;

pub use config::{RerankerConfig, ReturnScore, RETURN_SCORE_ENV};
pub use table::{
    concat_promoted, dedup_by_row_id, merge_results, retain_requested_scores,
    FTS_SCORE_COLUMN, RELEVANCE_SCORE_COLUMN, ROW_ID_COLUMN, VECTOR_SCORE_COLUMN,
};
pub use traits::{RerankInput, Reranker};
