//! Single-message inference.

use crate::error::Result;
use crate::ml::{LogisticRegression, TfIdfVectorizer};
use crate::types::Prediction;

/// Classify `text` and report the probability of the chosen label in percent.
///
/// The text is vectorized with the fitted vocabulary; unknown words are
/// ignored, so a message with no known words gets an all-zero vector and is
/// decided by the intercept alone. No input validation happens here.
pub fn predict(
    text: &str,
    vectorizer: &TfIdfVectorizer,
    classifier: &LogisticRegression,
) -> Result<Prediction> {
    let features = vectorizer.transform(text)?;
    let label = classifier.predict(&features);
    let probabilities = classifier.predict_proba(&features);

    Ok(Prediction {
        label,
        confidence: probabilities[label.index()] * 100.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trainer::Trainer;
    use crate::types::{Label, LabeledMessage};

    fn model() -> crate::trainer::TrainedModel {
        let rows = [
            ("win a free iphone now claim your prize", Label::Spam),
            ("free cash reward click to claim", Label::Spam),
            ("you win a free prize today", Label::Spam),
            ("claim free cash prize now", Label::Spam),
            ("meeting moved to 3pm tomorrow", Label::Ham),
            ("lunch tomorrow at the usual place", Label::Ham),
            ("please review the attached report", Label::Ham),
            ("team meeting notes from tuesday", Label::Ham),
            ("call me when you get home tonight", Label::Ham),
            ("the invoice is attached for review", Label::Ham),
        ];
        let messages = rows
            .iter()
            .map(|(text, label)| LabeledMessage::new(*text, *label))
            .collect();
        Trainer::default().train_on(messages).unwrap()
    }

    #[test]
    fn test_confidence_in_range() {
        let model = model();
        for text in ["free prize", "meeting tomorrow", "", "zzz qqq unknown words"] {
            let prediction = predict(text, &model.vectorizer, &model.classifier).unwrap();
            assert!(
                (0.0..=100.0).contains(&prediction.confidence),
                "{text:?}: {}",
                prediction.confidence
            );
            // The chosen label is always the more probable one.
            assert!(prediction.confidence >= 50.0);
        }
    }

    #[test]
    fn test_prediction_is_idempotent() {
        let model = model();
        let first = model.predict("claim your free prize").unwrap();
        let second = model.predict("claim your free prize").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_words_use_intercept() {
        let model = model();
        let a = model.predict("xylophone quartz").unwrap();
        let b = model.predict("").unwrap();
        assert_eq!(a, b);
    }
}
