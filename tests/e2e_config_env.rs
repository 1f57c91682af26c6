//! End-to-end tests for environment-based reranker configuration.
//!
//! Tests must run serially due to shared environment state.

use edgequake_rerank::{RerankError, RerankerConfig, ReturnScore, RETURN_SCORE_ENV};
use serial_test::serial;

#[test]
#[serial]
fn test_from_env_unset_uses_default() {
    std::env::remove_var(RETURN_SCORE_ENV);

    let config = RerankerConfig::from_env().expect("default config");
    assert_eq!(config.return_score(), ReturnScore::Relevance);
}

#[test]
#[serial]
fn test_from_env_all() {
    std::env::set_var(RETURN_SCORE_ENV, "all");

    let config = RerankerConfig::from_env().expect("valid config");
    assert_eq!(config.return_score(), ReturnScore::All);

    std::env::remove_var(RETURN_SCORE_ENV);
}

#[test]
#[serial]
fn test_from_env_trims_whitespace() {
    std::env::set_var(RETURN_SCORE_ENV, " relevance\n");

    let config = RerankerConfig::from_env().expect("valid config");
    assert_eq!(config.return_score(), ReturnScore::Relevance);

    std::env::remove_var(RETURN_SCORE_ENV);
}

#[test]
#[serial]
fn test_from_env_invalid_value_fails() {
    for value in ["foo", ""] {
        std::env::set_var(RETURN_SCORE_ENV, value);

        let err = RerankerConfig::from_env().unwrap_err();
        assert!(
            matches!(err, RerankError::InvalidConfiguration(_)),
            "{value:?} gave {err:?}"
        );
    }

    std::env::remove_var(RETURN_SCORE_ENV);
}
