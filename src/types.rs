//! Common types shared by training, prediction and the CLI.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Binary message label.
///
/// The discriminants match the numeric labels used during training:
/// `Spam = 0`, `Ham = 1`. Ham is the positive class of the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Label {
    /// Unsolicited or malicious message.
    Spam = 0,
    /// Legitimate message.
    Ham = 1,
}

impl Label {
    /// Both labels, ordered by numeric value.
    pub const ALL: [Label; 2] = [Label::Spam, Label::Ham];

    /// Numeric label value.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Display name, as written into the `PREDICTION` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Label::Spam => "Spam",
            Label::Ham => "Ham",
        }
    }

    /// Sign used by the solver: Ham is `+1`, Spam is `-1`.
    pub fn sign(self) -> f64 {
        match self {
            Label::Spam => -1.0,
            Label::Ham => 1.0,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A labeled message after the category column has been mapped to a [`Label`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledMessage {
    /// Message body.
    pub text: String,
    /// Binary label.
    pub label: Label,
}

impl LabeledMessage {
    pub fn new<S: Into<String>>(text: S, label: Label) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }
}

/// Result of classifying one message.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Predicted label.
    pub label: Label,
    /// Probability of the predicted label, in percent (`0.0..=100.0`).
    pub confidence: f64,
}

impl Prediction {
    /// Confidence rendered with one decimal place and a percent sign, e.g. `"87.3%"`.
    pub fn confidence_display(&self) -> String {
        format!("{:.1}%", self.confidence)
    }
}
