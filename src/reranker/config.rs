//! Reranker configuration types.
//!
//! # Architecture
//!
//! ```ascii
//! ┌─────────────────────────────────────────────────────────┐
//! │                    RerankerConfig                        │
//! ├─────────────────────────────────────────────────────────┤
//! │ return_score: ReturnScore ──► "relevance" | "all"       │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! The option is fixed for the lifetime of a reranker. Concrete strategies
//! decide how to honor it; the trait never enforces it.
//!
//! # Example Configuration
//!
//! ```toml
//! return_score = "all"
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{RerankError, Result};

/// Environment variable consulted by [`RerankerConfig::from_env`].
pub const RETURN_SCORE_ENV: &str = "EDGEQUAKE_RERANK_RETURN_SCORE";

/// Which scores a reranker keeps in its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ReturnScore {
    /// Only the combined relevance score.
    #[default]
    Relevance,
    /// Per-source vector and FTS scores alongside the relevance score.
    All,
}

impl ReturnScore {
    /// Parse an optional textual value.
    ///
    /// An absent value is rejected like any other value outside
    /// `{"relevance", "all"}`.
    pub fn parse(value: Option<&str>) -> Result<Self> {
        match value {
            Some("relevance") => Ok(Self::Relevance),
            Some("all") => Ok(Self::All),
            Some(other) => Err(RerankError::InvalidConfiguration(format!(
                "return_score must be either 'relevance' or 'all', got '{}'",
                other
            ))),
            None => Err(RerankError::InvalidConfiguration(
                "return_score must be either 'relevance' or 'all', got nothing".to_string(),
            )),
        }
    }

    /// Textual form, as accepted by [`ReturnScore::parse`].
    pub fn as_str(&self) -> &'static str {
        match self {
            ReturnScore::Relevance => "relevance",
            ReturnScore::All => "all",
        }
    }
}

impl fmt::Display for ReturnScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for ReturnScore {
    type Error = RerankError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(Some(value.as_str()))
    }
}

impl FromStr for ReturnScore {
    type Err = RerankError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(Some(s))
    }
}

/// Configuration shared by every reranker.
///
/// # Example
///
/// ```
/// use edgequake_rerank::{RerankerConfig, ReturnScore};
///
/// let config = RerankerConfig::try_new("all").unwrap();
/// assert_eq!(config.return_score(), ReturnScore::All);
///
/// assert!(RerankerConfig::try_new("foo").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RerankerConfig {
    /// Which scores to return.
    #[serde(default)]
    pub return_score: ReturnScore,
}

impl RerankerConfig {
    /// Create a config from an already-validated option.
    pub fn new(return_score: ReturnScore) -> Self {
        Self { return_score }
    }

    /// Create a config from text, failing fast on anything other than
    /// `"relevance"` or `"all"`.
    pub fn try_new(return_score: &str) -> Result<Self> {
        return_score.parse::<ReturnScore>().map(Self::new)
    }

    /// The configured return-score option.
    pub fn return_score(&self) -> ReturnScore {
        self.return_score
    }

    /// Set the return-score option.
    pub fn with_return_score(mut self, return_score: ReturnScore) -> Self {
        self.return_score = return_score;
        self
    }

    /// Parse a config from TOML. Missing keys take their defaults.
    ///
    /// Text that is not valid TOML, or has unknown keys, fails with
    /// [`RerankError::ConfigParse`]; a `return_score` outside
    /// `{"relevance", "all"}` fails with [`RerankError::InvalidConfiguration`].
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let raw: RawRerankerConfig =
            toml::from_str(toml_str).map_err(|e| RerankError::ConfigParse(e.to_string()))?;
        match raw.return_score {
            Some(value) => Self::try_new(&value),
            None => Ok(Self::default()),
        }
    }

    /// Serialize the config to TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| RerankError::ConfigParse(e.to_string()))
    }

    /// Load the config from the environment.
    ///
    /// Reads [`RETURN_SCORE_ENV`]; when it is unset the default
    /// (`relevance`) is used, when it is set it must be valid.
    pub fn from_env() -> Result<Self> {
        match std::env::var(RETURN_SCORE_ENV) {
            Ok(value) => Self::try_new(value.trim()),
            Err(std::env::VarError::NotPresent) => Ok(Self::default()),
            Err(std::env::VarError::NotUnicode(_)) => Err(RerankError::InvalidConfiguration(
                format!("{} is not valid unicode", RETURN_SCORE_ENV),
            )),
        }
    }
}

/// Unvalidated TOML shape; values are checked by [`RerankerConfig::from_toml`].
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRerankerConfig {
    return_score: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_relevance() {
        assert_eq!(RerankerConfig::default().return_score(), ReturnScore::Relevance);
    }

    #[test]
    fn test_valid_values_round_trip_as_text() {
        for value in ["relevance", "all"] {
            let config = RerankerConfig::try_new(value).unwrap();
            assert_eq!(config.return_score().as_str(), value);
            assert_eq!(config.return_score().to_string(), value);
        }
    }

    #[test]
    fn test_invalid_values_rejected() {
        for value in ["foo", "", "Relevance", "ALL", " all", "score"] {
            let err = RerankerConfig::try_new(value).unwrap_err();
            assert!(
                matches!(err, RerankError::InvalidConfiguration(_)),
                "{value:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_absent_value_rejected() {
        let err = ReturnScore::parse(None).unwrap_err();
        assert!(matches!(err, RerankError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_from_toml() {
        let config = RerankerConfig::from_toml("return_score = \"all\"").unwrap();
        assert_eq!(config.return_score(), ReturnScore::All);
    }

    #[test]
    fn test_from_toml_empty_uses_default() {
        let config = RerankerConfig::from_toml("").unwrap();
        assert_eq!(config, RerankerConfig::default());
    }

    #[test]
    fn test_from_toml_invalid_value() {
        for text in ["return_score = \"foo\"", "return_score = \"\""] {
            let err = RerankerConfig::from_toml(text).unwrap_err();
            assert!(
                matches!(err, RerankError::InvalidConfiguration(_)),
                "{text:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_from_toml_malformed_text() {
        let err = RerankerConfig::from_toml("this is not valid toml {{{").unwrap_err();
        assert!(matches!(err, RerankError::ConfigParse(_)));

        let err = RerankerConfig::from_toml("return_score = 1").unwrap_err();
        assert!(matches!(err, RerankError::ConfigParse(_)));
    }

    #[test]
    fn test_from_toml_unknown_key_rejected() {
        let err = RerankerConfig::from_toml("return_scores = \"all\"").unwrap_err();
        assert!(matches!(err, RerankError::ConfigParse(_)), "{err:?}");
    }

    #[test]
    fn test_deserialize_validates_return_score() {
        let err = toml::from_str::<RerankerConfig>("return_score = \"foo\"").unwrap_err();
        assert!(err.to_string().contains("return_score must be either"));

        let err = toml::from_str::<RerankerConfig>("return_scores = \"all\"").unwrap_err();
        assert!(err.to_string().contains("return_scores"));
    }

    #[test]
    fn test_to_toml() {
        let config = RerankerConfig::new(ReturnScore::All);
        let text = config.to_toml().unwrap();
        assert!(text.contains("return_score = \"all\""));
        assert_eq!(RerankerConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_with_return_score() {
        let config = RerankerConfig::default().with_return_score(ReturnScore::All);
        assert_eq!(config.return_score(), ReturnScore::All);
    }
}
