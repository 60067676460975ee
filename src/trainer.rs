//! One-shot training of the spam classifier.
//!
//! [`Trainer::train`] runs the whole fitting pipeline:
//!
//! 1. load and clean the dataset ([`DatasetLoader`])
//! 2. split it 80/20 with a fixed seed
//! 3. fit the TF-IDF vectorizer on the training rows only
//! 4. fit a class-weighted logistic regression on the training features
//!
//! It returns [`TrainedModel`]. The model is immutable afterwards and is
//! passed by reference into every prediction.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;

use crate::analysis::EnglishAnalyzer;
use crate::config::ClassifierConfig;
use crate::dataset::{DatasetLoader, DatasetSummary};
use crate::error::Result;
use crate::ml::{Evaluation, FitSummary, LogisticRegression, TfIdfVectorizer, train_test_split};
use crate::predictor;
use crate::types::{Label, LabeledMessage, Prediction};

/// Facts about a completed training run.
#[derive(Debug, Clone, Serialize)]
pub struct TrainingReport {
    pub dataset: DatasetSummary,
    pub train_size: usize,
    pub test_size: usize,
    pub vocabulary_size: usize,
    pub fit: FitSummary,
    pub duration_ms: u64,
}

/// Fitted vectorizer and classifier, plus the held-out rows.
#[derive(Debug)]
pub struct TrainedModel {
    pub vectorizer: TfIdfVectorizer,
    pub classifier: LogisticRegression,
    holdout: Vec<LabeledMessage>,
    report: TrainingReport,
}

impl TrainedModel {
    /// Classify `text` with this model's artifacts.
    pub fn predict(&self, text: &str) -> Result<Prediction> {
        predictor::predict(text, &self.vectorizer, &self.classifier)
    }

    /// Rows set aside by the train/test split; never seen during fitting.
    pub fn holdout(&self) -> &[LabeledMessage] {
        &self.holdout
    }

    /// Score the model on its held-out rows.
    pub fn evaluate(&self) -> Result<Evaluation> {
        self.evaluate_on(&self.holdout)
    }

    /// Score the model on arbitrary labeled messages.
    pub fn evaluate_on(&self, messages: &[LabeledMessage]) -> Result<Evaluation> {
        let pairs = messages
            .iter()
            .map(|m| Ok((m.label, self.predict(&m.text)?.label)))
            .collect::<Result<Vec<(Label, Label)>>>()?;
        Ok(Evaluation::from_pairs(pairs))
    }

    pub fn report(&self) -> &TrainingReport {
        &self.report
    }
}

/// Builds a [`TrainedModel`] from a [`ClassifierConfig`].
#[derive(Debug, Clone, Default)]
pub struct Trainer {
    config: ClassifierConfig,
    loader: DatasetLoader,
}

impl Trainer {
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            config,
            loader: DatasetLoader::new(),
        }
    }

    /// Replace the dataset loader, e.g. to use a different spam category.
    pub fn with_loader(mut self, loader: DatasetLoader) -> Self {
        self.loader = loader;
        self
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Load, split and fit. Any failure is returned, never panicked.
    pub fn train(&self) -> Result<TrainedModel> {
        let start = Instant::now();
        self.config.validate()?;

        let dataset = self.loader.load(&self.config.dataset_path)?;
        self.fit_messages(dataset.messages, dataset.summary, start)
    }

    /// Split and fit on already-loaded messages.
    pub fn train_on(&self, messages: Vec<LabeledMessage>) -> Result<TrainedModel> {
        let start = Instant::now();
        self.config.validate()?;

        let summary = DatasetSummary {
            rows_read: messages.len(),
            rows_dropped: 0,
            spam: messages.iter().filter(|m| m.label == Label::Spam).count(),
            ham: messages.iter().filter(|m| m.label == Label::Ham).count(),
        };
        self.fit_messages(messages, summary, start)
    }

    fn fit_messages(
        &self,
        messages: Vec<LabeledMessage>,
        dataset: DatasetSummary,
        start: Instant,
    ) -> Result<TrainedModel> {
        let (train, holdout) =
            train_test_split(&messages, self.config.test_size, self.config.seed)?;
        log::debug!(
            "Split {} rows into {} train / {} test",
            messages.len(),
            train.len(),
            holdout.len()
        );

        let texts: Vec<String> = train.iter().map(|m| m.text.clone()).collect();
        let labels: Vec<Label> = train.iter().map(|m| m.label).collect();

        let analyzer = Arc::new(EnglishAnalyzer::new()?);
        let mut vectorizer =
            TfIdfVectorizer::new(analyzer).with_min_df(self.config.vectorizer.min_df);
        if let Some(max_features) = self.config.vectorizer.max_features {
            vectorizer = vectorizer.with_max_features(max_features);
        }
        let features = vectorizer.fit_transform(&texts)?;

        let mut classifier = LogisticRegression::new(self.config.solver.clone());
        let fit = classifier
            .fit(&features, &labels, vectorizer.vocabulary_size())?
            .clone();

        let report = TrainingReport {
            dataset,
            train_size: train.len(),
            test_size: holdout.len(),
            vocabulary_size: vectorizer.vocabulary_size(),
            fit,
            duration_ms: start.elapsed().as_millis() as u64,
        };

        log::info!(
            "Trained on {} messages: vocabulary {} terms, {} solver iterations in {} ms",
            report.train_size,
            report.vocabulary_size,
            report.fit.iterations,
            report.duration_ms
        );

        Ok(TrainedModel {
            vectorizer,
            classifier,
            holdout,
            report,
        })
    }
}

/// Train with `config`.
pub fn train(config: &ClassifierConfig) -> Result<TrainedModel> {
    Trainer::new(config.clone()).train()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::dataset::CategoryPolicy;
    use crate::error::HamspamError;

    fn corpus() -> Vec<LabeledMessage> {
        let spam = [
            "win a free iphone today click here",
            "free cash prize claim your reward",
            "congratulations you win a free vacation",
            "urgent claim your free prize money now",
            "exclusive offer win cash instantly",
            "free entry win a brand new car",
        ];
        let ham = [
            "meeting moved to 3pm tomorrow",
            "can we reschedule lunch to friday",
            "the quarterly report is attached for review",
            "see you at the team meeting tomorrow",
            "thanks for sending the invoice yesterday",
            "project sync notes from this morning",
            "dinner at mom's place on sunday",
            "reminder dentist appointment next week",
        ];
        spam.iter()
            .map(|t| LabeledMessage::new(*t, Label::Spam))
            .chain(ham.iter().map(|t| LabeledMessage::new(*t, Label::Ham)))
            .collect()
    }

    #[test]
    fn test_train_on_messages() {
        let model = Trainer::default().train_on(corpus()).unwrap();

        let report = model.report();
        assert_eq!(report.dataset.rows_read, 14);
        assert_eq!(report.train_size + report.test_size, 14);
        assert_eq!(report.test_size, 3);
        assert!(report.vocabulary_size > 0);
        assert_eq!(model.holdout().len(), 3);
        assert!(model.classifier.is_fitted());
    }

    #[test]
    fn test_training_is_deterministic() {
        let first = Trainer::default().train_on(corpus()).unwrap();
        let second = Trainer::default().train_on(corpus()).unwrap();

        assert_eq!(
            first.vectorizer.feature_names(),
            second.vectorizer.feature_names()
        );
        assert_eq!(first.classifier.weights(), second.classifier.weights());
        assert_eq!(first.classifier.intercept(), second.classifier.intercept());
        assert_eq!(first.holdout(), second.holdout());
    }

    #[test]
    fn test_max_features_caps_vocabulary() {
        let mut config = ClassifierConfig::default();
        config.vectorizer.max_features = Some(5);
        let model = Trainer::new(config).train_on(corpus()).unwrap();
        assert_eq!(model.vectorizer.vocabulary_size(), 5);
    }

    #[test]
    fn test_evaluate_holdout() {
        let model = Trainer::default().train_on(corpus()).unwrap();
        let eval = model.evaluate().unwrap();
        assert_eq!(eval.samples, 3);
        assert!((0.0..=1.0).contains(&eval.accuracy));
    }

    #[test]
    fn test_train_missing_dataset() {
        let config = ClassifierConfig::default().with_dataset_path("missing/dataset.csv");
        let err = train(&config).unwrap_err();
        assert!(matches!(err, HamspamError::DatasetNotFound(_)));
    }

    #[test]
    fn test_train_with_custom_spam_category() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "text,category").unwrap();
        for message in corpus() {
            let category = match message.label {
                Label::Spam => "Junk",
                Label::Ham => "personal",
            };
            writeln!(file, "{},{}", message.text, category).unwrap();
        }
        writeln!(file, "win a free cruise reply now,spam").unwrap();
        file.flush().unwrap();

        let config = ClassifierConfig::default().with_dataset_path(file.path());
        let model = Trainer::new(config)
            .with_loader(DatasetLoader::with_policy(CategoryPolicy::new("junk")))
            .train()
            .unwrap();

        let summary = model.report().dataset;
        assert_eq!(summary.rows_read, 15);
        assert_eq!(summary.spam, 6);
        assert_eq!(summary.ham, 9);
    }

    #[test]
    fn test_invalid_config_is_rejected_before_loading() {
        let config = ClassifierConfig::default().with_test_size(2.0);
        assert!(Trainer::new(config).train_on(corpus()).is_err());
    }
}
