//! Machine learning building blocks for spam classification.
//!
//! - [`TfIdfVectorizer`]: text to sparse TF-IDF features over a frozen vocabulary
//! - [`LogisticRegression`]: class-weighted linear classifier with probabilities
//! - [`train_test_split`]: seeded, reproducible partitioning
//! - [`Evaluation`]: accuracy, precision/recall and confusion matrix
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use hamspam::analysis::EnglishAnalyzer;
//! use hamspam::ml::{LogisticRegression, TfIdfVectorizer};
//! use hamspam::types::Label;
//!
//! # fn main() -> hamspam::error::Result<()> {
//! let texts = vec![
//!     "win a free prize now".to_string(),
//!     "lunch meeting moved to friday".to_string(),
//! ];
//! let labels = vec![Label::Spam, Label::Ham];
//!
//! let mut vectorizer = TfIdfVectorizer::new(Arc::new(EnglishAnalyzer::new()?));
//! let features = vectorizer.fit_transform(&texts)?;
//!
//! let mut model = LogisticRegression::default();
//! model.fit(&features, &labels, vectorizer.vocabulary_size())?;
//!
//! let probabilities = model.predict_proba(&vectorizer.transform("free prize")?);
//! assert!(probabilities[Label::Spam.index()] > 0.5);
//! # Ok(())
//! # }
//! ```

pub mod evaluation;
pub mod logistic;
pub mod sparse;
pub mod split;
pub mod tfidf;

pub use evaluation::{ClassMetrics, ConfusionMatrix, Evaluation};
pub use logistic::{ClassWeight, FitSummary, LogisticRegression, LogisticRegressionParams};
pub use sparse::SparseVector;
pub use split::train_test_split;
pub use tfidf::TfIdfVectorizer;
