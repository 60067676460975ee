//! Classification metrics over a labeled holdout set.

use serde::{Deserialize, Serialize};

use crate::types::Label;

/// 2x2 confusion matrix indexed as `counts[actual][predicted]` by [`Label::index`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub counts: [[usize; 2]; 2],
}

impl ConfusionMatrix {
    pub fn record(&mut self, actual: Label, predicted: Label) {
        self.counts[actual.index()][predicted.index()] += 1;
    }

    pub fn get(&self, actual: Label, predicted: Label) -> usize {
        self.counts[actual.index()][predicted.index()]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }
}

/// Precision and recall for one class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub label: Label,
    pub precision: f64,
    pub recall: f64,
    pub support: usize,
}

/// Summary of predictions against known labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub samples: usize,
    pub accuracy: f64,
    pub per_class: Vec<ClassMetrics>,
    pub confusion: ConfusionMatrix,
}

impl Evaluation {
    /// Build metrics from `(actual, predicted)` pairs.
    ///
    /// Ratios with a zero denominator are reported as `0.0`.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (Label, Label)>,
    {
        let mut confusion = ConfusionMatrix::default();
        for (actual, predicted) in pairs {
            confusion.record(actual, predicted);
        }

        let samples = confusion.total();
        let correct: usize = Label::ALL.iter().map(|&l| confusion.get(l, l)).sum();

        let per_class = Label::ALL
            .iter()
            .map(|&label| {
                let tp = confusion.get(label, label);
                let predicted: usize = Label::ALL.iter().map(|&a| confusion.get(a, label)).sum();
                let support: usize = Label::ALL.iter().map(|&p| confusion.get(label, p)).sum();
                ClassMetrics {
                    label,
                    precision: ratio(tp, predicted),
                    recall: ratio(tp, support),
                    support,
                }
            })
            .collect();

        Self {
            samples,
            accuracy: ratio(correct, samples),
            per_class,
            confusion,
        }
    }

    pub fn class(&self, label: Label) -> Option<&ClassMetrics> {
        self.per_class.iter().find(|m| m.label == label)
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
