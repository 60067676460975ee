//! Interactive classification state.
//!
//! A [`Session`] owns one trained model for its whole lifetime, checks each
//! submission against [`InputRules`] and records accepted classifications in
//! an append-only [`History`].

use serde::Serialize;

use crate::config::InputRules;
use crate::error::Result;
use crate::trainer::TrainedModel;
use crate::types::{Label, Prediction};

/// Number of history entries shown by default.
pub const DEFAULT_HISTORY_VIEW: usize = 5;
/// Characters of message text kept in a history preview.
pub const PREVIEW_CHARS: usize = 40;

/// Outcome of checking a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation<'a> {
    /// Trimmed text that may be classified.
    Accepted(&'a str),
    /// Nothing but whitespace.
    Empty,
    /// Too few words or characters.
    TooShort { words: usize, chars: usize },
}

impl Validation<'_> {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Validation::Accepted(_))
    }

    /// User-facing message for a rejected submission.
    pub fn message(&self, rules: &InputRules) -> Option<String> {
        match self {
            Validation::Accepted(_) => None,
            Validation::Empty => Some("Please enter some text to classify.".to_string()),
            Validation::TooShort { .. } => Some(format!(
                "Please enter a longer message (at least {} words and {} characters).",
                rules.min_words, rules.min_chars
            )),
        }
    }
}

/// Applies the minimum-input rules to raw submissions.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputValidator {
    rules: InputRules,
}

impl InputValidator {
    pub fn new(rules: InputRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &InputRules {
        &self.rules
    }

    /// Both limits are measured on the trimmed text.
    pub fn validate<'a>(&self, input: &'a str) -> Validation<'a> {
        let text = input.trim();
        if text.is_empty() {
            return Validation::Empty;
        }

        let words = text.split_whitespace().count();
        let chars = text.chars().count();
        if words < self.rules.min_words || chars < self.rules.min_chars {
            Validation::TooShort { words, chars }
        } else {
            Validation::Accepted(text)
        }
    }
}

/// One interactive classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub text: String,
    pub label: Label,
    pub confidence: f64,
}

impl HistoryEntry {
    /// First [`PREVIEW_CHARS`] characters of the text, with `...` when cut.
    pub fn preview(&self) -> String {
        if self.text.chars().count() > PREVIEW_CHARS {
            let head: String = self.text.chars().take(PREVIEW_CHARS).collect();
            format!("{head}...")
        } else {
            self.text.clone()
        }
    }

    pub fn confidence_display(&self) -> String {
        format!("{:.1}%", self.confidence)
    }
}

/// Append-only log of interactive classifications.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, text: &str, prediction: &Prediction) {
        self.entries.push(HistoryEntry {
            text: text.to_string(),
            label: prediction.label,
            confidence: prediction.confidence,
        });
    }

    /// Up to `n` entries, newest first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().rev().take(n)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }
}

/// What happened to one submission.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Classified(Prediction),
    Rejected(String),
}

/// Interactive session over one trained model.
#[derive(Debug)]
pub struct Session {
    model: TrainedModel,
    validator: InputValidator,
    history: History,
}

impl Session {
    pub fn new(model: TrainedModel, rules: InputRules) -> Self {
        Self {
            model,
            validator: InputValidator::new(rules),
            history: History::new(),
        }
    }

    /// Validate, classify and record one submission.
    ///
    /// Rejected input is neither classified nor recorded.
    pub fn submit(&mut self, input: &str) -> Result<Submission> {
        let text = match self.validator.validate(input) {
            Validation::Accepted(text) => text,
            rejected => {
                let message = rejected
                    .message(self.validator.rules())
                    .unwrap_or_default();
                log::debug!("Rejected submission: {rejected:?}");
                return Ok(Submission::Rejected(message));
            }
        };

        let prediction = self.model.predict(text)?;
        self.history.push(input, &prediction);
        Ok(Submission::Classified(prediction))
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn model(&self) -> &TrainedModel {
        &self.model
    }
}
