use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::extract::{NameExtractor, DEFAULT_IGNORE_TERMS};
use crate::similarity::{HybridScorer, ScoreWeights};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error(
        "Invalid score weights: word_weight={word_weight}, char_weight={char_weight} \
         (must be non-negative and sum to 1)"
    )]
    InvalidWeights { word_weight: f32, char_weight: f32 },
    #[error("{name} must be within [0, 1], got {value}")]
    OutOfRange { name: &'static str, value: f32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserMatchConfig {
    pub min_score: f32,
    pub top_k: usize,
}

impl Default for UserMatchConfig {
    fn default() -> Self {
        Self {
            min_score: 0.3,
            top_k: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub threshold: f32,
    /// Maximum number of hits; unlimited when absent.
    pub limit: Option<usize>,
    /// Also score the query against names extracted from each description.
    pub match_extracted_names: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            threshold: 0.2,
            limit: None,
            match_extracted_names: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Words never treated as part of a person's name (e.g. the receiving company).
    pub ignore_terms: Vec<String>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            ignore_terms: DEFAULT_IGNORE_TERMS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Tuning knobs for extraction, scoring and ranking.
///
/// ```toml
/// [weights]
/// word_weight = 0.7
/// char_weight = 0.3
///
/// [users]
/// min_score = 0.3
/// top_k = 5
///
/// [search]
/// threshold = 0.2
/// limit = 10
/// match_extracted_names = true
///
/// [extract]
/// ignore_terms = ["Deel", "Limited", "Ltd", "ERR"]
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub weights: ScoreWeights,
    pub users: UserMatchConfig,
    pub search: SearchConfig,
    pub extract: ExtractConfig,
}

impl MatchConfig {
    pub fn from_toml(toml_content: &str) -> Result<Self, ConfigError> {
        let config: MatchConfig = toml::from_str(toml_content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.weights.validate()?;
        unit_interval("users.min_score", self.users.min_score)?;
        unit_interval("search.threshold", self.search.threshold)?;
        Ok(())
    }

    pub fn scorer(&self) -> HybridScorer {
        HybridScorer::new(self.weights)
    }

    pub fn extractor(&self) -> NameExtractor {
        NameExtractor::new(&self.extract.ignore_terms)
    }
}

fn unit_interval(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = MatchConfig::default();
        assert_eq!(config.weights, ScoreWeights::default());
        assert_eq!(config.users.min_score, 0.3);
        assert_eq!(config.users.top_k, 5);
        assert_eq!(config.search.threshold, 0.2);
        assert_eq!(config.search.limit, None);
        assert!(config.search.match_extracted_names);
        assert_eq!(config.extract.ignore_terms, vec!["Deel", "Limited", "Ltd", "ERR"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(MatchConfig::from_toml("").unwrap(), MatchConfig::default());
    }

    #[test]
    fn partial_toml_overrides_only_given_keys() {
        let config = MatchConfig::from_toml(
            r#"
            [weights]
            word_weight = 0.6
            char_weight = 0.4

            [search]
            limit = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.weights.word_weight, 0.6);
        assert_eq!(config.search.limit, Some(3));
        assert_eq!(config.search.threshold, 0.2);
        assert_eq!(config.users.top_k, 5);
    }

    #[test]
    fn rejects_weights_not_summing_to_one() {
        let err = MatchConfig::from_toml("[weights]\nword_weight = 0.9\nchar_weight = 0.3\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidWeights { .. }));
    }

    #[test]
    fn rejects_threshold_out_of_range() {
        let err = MatchConfig::from_toml("[search]\nthreshold = 1.5\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::OutOfRange { name: "search.threshold", .. }
        ));
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = MatchConfig::from_toml("[users\nmin_score = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[users]\nmin_score = 0.8\ntop_k = 2\n\n[extract]\nignore_terms = []").unwrap();
        let config = MatchConfig::load(file.path()).unwrap();
        assert_eq!(config.users.min_score, 0.8);
        assert_eq!(config.users.top_k, 2);
        assert!(config.extract.ignore_terms.is_empty());
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = MatchConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
