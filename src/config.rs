//! Configuration for training and the interactive surface.
//!
//! Every field has a default, so a JSON config file only needs the keys it
//! overrides:
//!
//! ```json
//! { "dataset_path": "data/sms.csv", "solver": { "c": 2.0 } }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{HamspamError, Result};
use crate::ml::LogisticRegressionParams;

/// Default location of the training dataset, relative to the working directory.
pub const DEFAULT_DATASET_PATH: &str = "data/dataset/dataset.csv";

/// Configuration for [`Trainer`](crate::trainer::Trainer).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// CSV file with `text` and `category` columns.
    pub dataset_path: PathBuf,

    /// Fraction of rows held out for evaluation.
    pub test_size: f64,

    /// Seed for the train/test shuffle.
    pub seed: u64,

    /// Vectorizer settings.
    pub vectorizer: VectorizerConfig,

    /// Classifier settings.
    pub solver: LogisticRegressionParams,

    /// Minimum-input rules for interactive submissions.
    pub input: InputRules,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from(DEFAULT_DATASET_PATH),
            test_size: 0.2,
            seed: 42,
            vectorizer: VectorizerConfig::default(),
            solver: LogisticRegressionParams::default(),
            input: InputRules::default(),
        }
    }
}

impl ClassifierConfig {
    /// Load a configuration from a JSON file. Missing keys take their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the dataset path.
    pub fn with_dataset_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.dataset_path = path.into();
        self
    }

    /// Set the split seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the held-out fraction.
    pub fn with_test_size(mut self, test_size: f64) -> Self {
        self.test_size = test_size;
        self
    }

    /// Check that all values are in range.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.test_size) {
            return Err(HamspamError::invalid_config(format!(
                "test_size must be in [0, 1), got {}",
                self.test_size
            )));
        }
        if self.vectorizer.max_features == Some(0) {
            return Err(HamspamError::invalid_config("max_features must be at least 1"));
        }
        if self.vectorizer.min_df == 0 {
            return Err(HamspamError::invalid_config("min_df must be at least 1"));
        }
        if !(self.solver.c > 0.0) {
            return Err(HamspamError::invalid_config("solver.c must be positive"));
        }
        if !(self.solver.tolerance > 0.0) {
            return Err(HamspamError::invalid_config("solver.tolerance must be positive"));
        }
        if self.solver.max_iter == 0 {
            return Err(HamspamError::invalid_config("solver.max_iter must be at least 1"));
        }
        Ok(())
    }
}

/// TF-IDF vectorizer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorizerConfig {
    /// Vocabulary cap; `None` keeps every term.
    pub max_features: Option<usize>,
    /// Minimum document frequency for a term to enter the vocabulary.
    pub min_df: usize,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            max_features: Some(5000),
            min_df: 1,
        }
    }
}

/// Minimum-input rules applied before interactive inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputRules {
    /// Minimum number of whitespace-separated words.
    pub min_words: usize,
    /// Minimum number of characters after trimming.
    pub min_chars: usize,
}

impl Default for InputRules {
    fn default() -> Self {
        Self {
            min_words: 3,
            min_chars: 15,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ClassifierConfig::default();
        assert_eq!(config.dataset_path, PathBuf::from("data/dataset/dataset.csv"));
        assert_eq!(config.test_size, 0.2);
        assert_eq!(config.seed, 42);
        assert_eq!(config.vectorizer.max_features, Some(5000));
        assert_eq!(config.vectorizer.min_df, 1);
        assert_eq!(config.input.min_words, 3);
        assert_eq!(config.input.min_chars, 15);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "dataset_path": "other.csv", "solver": {{ "c": 2.5 }} }}"#
        )
        .unwrap();

        let config = ClassifierConfig::from_file(file.path()).unwrap();
        assert_eq!(config.dataset_path, PathBuf::from("other.csv"));
        assert_eq!(config.solver.c, 2.5);
        assert_eq!(config.solver.max_iter, 100);
        assert_eq!(config.seed, 42);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(ClassifierConfig::default().with_test_size(1.5).validate().is_err());

        let mut config = ClassifierConfig::default();
        config.vectorizer.min_df = 0;
        assert!(config.validate().is_err());

        let mut config = ClassifierConfig::default();
        config.solver.c = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            ClassifierConfig::from_file(file.path()),
            Err(HamspamError::Json(_))
        ));
    }
}
