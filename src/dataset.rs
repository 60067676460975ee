//! Loading the labeled training dataset.
//!
//! The dataset is a CSV file with a header row containing (at least) the
//! columns `text` and `category`. Other columns are ignored. Column names are
//! matched exactly.
//!
//! ```csv
//! text,category
//! "Congratulations, you won a free cruise",spam
//! "Your order has shipped",updates
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};

use crate::error::{HamspamError, Result};
use crate::types::{Label, LabeledMessage};

/// Name of the message column in the training data.
pub const TEXT_COLUMN: &str = "text";
/// Name of the category column in the training data.
pub const CATEGORY_COLUMN: &str = "category";

/// Maps source categories onto the binary label space.
///
/// The mapping is total: a category is Spam only when it equals the spam
/// category ignoring case, and every other value is Ham. This includes
/// values such as `promotions` or `social_media`, an empty category, and
/// categories added upstream later. Any new kind of unwanted mail therefore
/// lands in Ham until it is added here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryPolicy {
    spam_category: String,
}

impl CategoryPolicy {
    pub fn new<S: Into<String>>(spam_category: S) -> Self {
        Self {
            spam_category: spam_category.into().to_lowercase(),
        }
    }

    /// Label for a raw category value.
    pub fn label_for(&self, category: &str) -> Label {
        if category.to_lowercase() == self.spam_category {
            Label::Spam
        } else {
            Label::Ham
        }
    }
}

impl Default for CategoryPolicy {
    fn default() -> Self {
        Self::new("spam")
    }
}

/// Row counts collected while loading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSummary {
    /// Data rows read from the file.
    pub rows_read: usize,
    /// Rows dropped because the message text was missing.
    pub rows_dropped: usize,
    /// Rows labeled Spam.
    pub spam: usize,
    /// Rows labeled Ham.
    pub ham: usize,
}

/// Cleaned, labeled training data.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub messages: Vec<LabeledMessage>,
    pub summary: DatasetSummary,
}

/// Reads and cleans the training CSV.
#[derive(Debug, Clone, Default)]
pub struct DatasetLoader {
    policy: CategoryPolicy,
}

impl DatasetLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: CategoryPolicy) -> Self {
        Self { policy }
    }

    /// Load a dataset from `path`.
    ///
    /// Fails with [`HamspamError::DatasetNotFound`] if `path` is not a
    /// readable file.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<Dataset> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(HamspamError::dataset_not_found(path.display().to_string()));
        }
        let file = File::open(path)
            .map_err(|_| HamspamError::dataset_not_found(path.display().to_string()))?;

        log::info!("Loading dataset from {}", path.display());
        self.load_from_reader(file)
    }

    /// Load a dataset from any CSV source.
    pub fn load_from_reader<R: Read>(&self, reader: R) -> Result<Dataset> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let text_idx = headers.iter().position(|h| h == TEXT_COLUMN);
        let category_idx = headers.iter().position(|h| h == CATEGORY_COLUMN);
        let (Some(text_idx), Some(category_idx)) = (text_idx, category_idx) else {
            return Err(HamspamError::schema(format!(
                "Required columns '{TEXT_COLUMN}' or '{CATEGORY_COLUMN}' not found in CSV."
            )));
        };

        let mut summary = DatasetSummary::default();
        let mut messages = Vec::new();

        for record in reader.records() {
            let record = record?;
            summary.rows_read += 1;

            let text = match record.get(text_idx) {
                Some(text) if !text.is_empty() => text,
                _ => {
                    summary.rows_dropped += 1;
                    continue;
                }
            };
            let label = self.policy.label_for(record.get(category_idx).unwrap_or_default());

            match label {
                Label::Spam => summary.spam += 1,
                Label::Ham => summary.ham += 1,
            }
            messages.push(LabeledMessage::new(text, label));
        }

        log::info!(
            "Read {} rows ({} dropped): {} spam, {} ham",
            summary.rows_read,
            summary.rows_dropped,
            summary.spam,
            summary.ham
        );

        if messages.is_empty() {
            return Err(HamspamError::EmptyDataset);
        }
        if summary.spam == 0 || summary.ham == 0 {
            return Err(HamspamError::SingleClass {
                spam: summary.spam,
                ham: summary.ham,
            });
        }

        Ok(Dataset { messages, summary })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(csv: &str) -> Result<Dataset> {
        DatasetLoader::new().load_from_reader(csv.as_bytes())
    }

    #[test]
    fn test_category_policy() {
        let policy = CategoryPolicy::default();
        assert_eq!(policy.label_for("spam"), Label::Spam);
        assert_eq!(policy.label_for("SPAM"), Label::Spam);
        assert_eq!(policy.label_for("SpAm"), Label::Spam);

        for category in ["ham", "promotions", "social_media", "updates", "", "spam ", "spammy"] {
            assert_eq!(policy.label_for(category), Label::Ham, "{category:?}");
        }
    }

    #[test]
    fn test_load_maps_categories() {
        let dataset = load(
            "text,category\n\
             Win cash now,spam\n\
             Weekly newsletter,promotions\n\
             See you at lunch,ham\n",
        )
        .unwrap();

        assert_eq!(dataset.messages.len(), 3);
        assert_eq!(dataset.messages[0].label, Label::Spam);
        assert_eq!(dataset.messages[1].label, Label::Ham);
        assert_eq!(dataset.summary.spam, 1);
        assert_eq!(dataset.summary.ham, 2);
    }

    #[test]
    fn test_load_drops_missing_text() {
        let dataset = load(
            "id,text,category\n\
             1,Win cash now,Spam\n\
             2,,spam\n\
             3,Lunch today?,social_media\n\
             4\n",
        )
        .unwrap();

        assert_eq!(dataset.summary.rows_read, 4);
        assert_eq!(dataset.summary.rows_dropped, 2);
        assert_eq!(dataset.messages.len(), 2);
    }

    #[test]
    fn test_missing_category_value_is_ham() {
        let dataset = load("text,category\nfree money,spam\nhello there,\n").unwrap();
        assert_eq!(dataset.messages[1].label, Label::Ham);
    }

    #[test]
    fn test_schema_error() {
        let err = load("text,label\nhello,spam\n").unwrap_err();
        assert!(matches!(err, HamspamError::Schema(_)));

        // Column names are case-sensitive.
        let err = load("Text,Category\nhello,spam\n").unwrap_err();
        assert!(matches!(err, HamspamError::Schema(_)));
    }

    #[test]
    fn test_single_class_and_empty() {
        let err = load("text,category\nhello,ham\nbye,updates\n").unwrap_err();
        assert!(matches!(err, HamspamError::SingleClass { spam: 0, ham: 2 }));

        let err = load("text,category\n").unwrap_err();
        assert!(matches!(err, HamspamError::EmptyDataset));
    }

    #[test]
    fn test_dataset_not_found() {
        let err = DatasetLoader::new()
            .load("does/not/exist/dataset.csv")
            .unwrap_err();
        assert!(matches!(err, HamspamError::DatasetNotFound(_)));
        assert!(err.to_string().contains("does/not/exist/dataset.csv"));
    }
}
