//! Reranker error types.
//!
//! # Error Kinds
//!
//! | Error | Cause | Solution |
//! |-------|-------|----------|
//! | `InvalidConfiguration` | `return_score` outside `relevance`/`all` | Fix the configured value |
//! | `UnsupportedOperation` | Strategy has no vector-only or FTS-only rerank | Use `rerank_hybrid` or another strategy |
//! | `Arrow` | Malformed input table (no `_rowid`, conflicting column types) | Fix the producing search engine |
//! | `ConfigParse` | Reranker TOML could not be parsed | Fix the config file |
//!
//! Configuration and capability errors are permanent: retrying the same call
//! gives the same answer. See [`RerankError::is_usage_error`].

use arrow::error::ArrowError;
use thiserror::Error;

/// Result type for reranking operations.
pub type Result<T> = std::result::Result<T, RerankError>;

/// Errors that can occur while configuring or invoking a reranker.
#[derive(Debug, Error)]
pub enum RerankError {
    /// Invalid reranker configuration, rejected at construction time.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The strategy does not provide the requested rerank operation.
    #[error("{reranker} does not implement {operation}")]
    UnsupportedOperation {
        /// Identifier of the strategy, as reported by `Reranker::name`.
        reranker: String,
        /// Name of the missing operation.
        operation: &'static str,
    },

    /// Error raised by the tabular layer, passed through unchanged.
    #[error(transparent)]
    Arrow(#[from] ArrowError),

    /// Failed to parse reranker configuration text.
    #[error("Failed to parse reranker config: {0}")]
    ConfigParse(String),
}

impl RerankError {
    /// Build an [`RerankError::UnsupportedOperation`] for `reranker`.
    pub fn unsupported(reranker: impl Into<String>, operation: &'static str) -> Self {
        Self::UnsupportedOperation {
            reranker: reranker.into(),
            operation,
        }
    }

    /// Whether this error reports a capability or configuration mismatch.
    ///
    /// Usage errors are never transient; data errors (`Arrow`) come from the
    /// tables handed in and may differ on the next query.
    ///
    /// # Example
    ///
    /// ```
    /// use edgequake_rerank::RerankError;
    ///
    /// let error = RerankError::unsupported("rrf", "rerank_fts");
    /// assert!(error.is_usage_error());
    /// assert_eq!(error.to_string(), "rrf does not implement rerank_fts");
    /// ```
    pub fn is_usage_error(&self) -> bool {
        match self {
            Self::InvalidConfiguration(_)
            | Self::UnsupportedOperation { .. }
            | Self::ConfigParse(_) => true,
            Self::Arrow(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_operation_message_names_strategy() {
        let err = RerankError::unsupported("cross-encoder", "rerank_vector");
        assert_eq!(err.to_string(), "cross-encoder does not implement rerank_vector");
        match err {
            RerankError::UnsupportedOperation {
                reranker,
                operation,
            } => {
                assert_eq!(reranker, "cross-encoder");
                assert_eq!(operation, "rerank_vector");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_arrow_error_is_transparent() {
        let err = RerankError::from(ArrowError::SchemaError("boom".to_string()));
        assert_eq!(
            err.to_string(),
            ArrowError::SchemaError("boom".to_string()).to_string()
        );
        assert!(!err.is_usage_error());
    }

    #[test]
    fn test_config_errors_are_usage_errors() {
        assert!(RerankError::InvalidConfiguration("x".to_string()).is_usage_error());
        assert!(RerankError::ConfigParse("bad toml".to_string()).is_usage_error());
    }
}
