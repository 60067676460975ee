//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{HamspamArgs, OutputFormat};
use crate::error::Result;
use crate::ml::Evaluation;
use crate::session::HistoryEntry;
use crate::types::{Label, Prediction};

/// Result structure for a single classification.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub text: String,
    pub prediction: Label,
    pub confidence: f64,
    pub confidence_display: String,
}

impl ClassificationResult {
    pub fn new(text: &str, prediction: &Prediction) -> Self {
        Self {
            text: text.to_string(),
            prediction: prediction.label,
            confidence: prediction.confidence,
            confidence_display: prediction.confidence_display(),
        }
    }
}

/// Result structure for a batch run.
#[derive(Debug, Serialize, Deserialize)]
pub struct BatchSummary {
    pub input: String,
    pub output: Option<String>,
    pub rows: usize,
    pub spam: usize,
    pub ham: usize,
    pub duration_ms: u64,
}

/// Result structure for holdout evaluation.
#[derive(Debug, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub train_size: usize,
    pub vocabulary_size: usize,
    pub evaluation: Evaluation,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &HamspamArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &HamspamArgs) -> Result<()> {
    if args.verbosity() > 1 {
        println!("{message}");
        println!();
    }

    // Convert to JSON value for easier manipulation
    let value = serde_json::to_value(result)?;

    match result {
        _ if std::any::type_name::<T>().contains("ClassificationResult") => {
            output_classification_human(&value)
        }
        _ if std::any::type_name::<T>().contains("EvaluationResult") => {
            output_evaluation_human(&value)
        }
        _ => output_generic_human(&value),
    }
}

/// Output a classification in human format.
fn output_classification_human(value: &serde_json::Value) -> Result<()> {
    let prediction = value
        .get("prediction")
        .and_then(|p| p.as_str())
        .unwrap_or("unknown");
    let confidence = value
        .get("confidence_display")
        .and_then(|c| c.as_str())
        .unwrap_or("-");
    println!("Prediction: {prediction}");
    println!("Confidence: {confidence}");
    Ok(())
}

/// Output evaluation metrics in human format.
fn output_evaluation_human(value: &serde_json::Value) -> Result<()> {
    let Some(eval) = value.get("evaluation") else {
        return output_generic_human(value);
    };

    println!("Holdout Evaluation:");
    println!("═══════════════════");
    if let Some(train) = value.get("train_size").and_then(|t| t.as_u64()) {
        println!("Training messages: {train}");
    }
    if let Some(vocab) = value.get("vocabulary_size").and_then(|v| v.as_u64()) {
        println!("Vocabulary size: {vocab}");
    }
    if let Some(samples) = eval.get("samples").and_then(|s| s.as_u64()) {
        println!("Held-out messages: {samples}");
    }
    if let Some(accuracy) = eval.get("accuracy").and_then(|a| a.as_f64()) {
        println!("Accuracy: {:.1}%", accuracy * 100.0);
    }

    if let Some(classes) = eval.get("per_class").and_then(|c| c.as_array()) {
        println!();
        println!("{:<6} {:>10} {:>8} {:>8}", "Class", "Precision", "Recall", "Support");
        println!("───────────────────────────────────");
        for class in classes {
            let label = class.get("label").and_then(|l| l.as_str()).unwrap_or("?");
            let precision = class.get("precision").and_then(|p| p.as_f64()).unwrap_or(0.0);
            let recall = class.get("recall").and_then(|r| r.as_f64()).unwrap_or(0.0);
            let support = class.get("support").and_then(|s| s.as_u64()).unwrap_or(0);
            println!("{label:<6} {precision:>10.3} {recall:>8.3} {support:>8}");
        }
    }

    if let Some(counts) = eval
        .get("confusion")
        .and_then(|c| c.get("counts"))
        .and_then(|c| c.as_array())
    {
        println!();
        println!("Confusion matrix (rows: actual, columns: predicted):");
        println!("{:<6} {:>6} {:>6}", "", Label::Spam, Label::Ham);
        for (label, row) in Label::ALL.iter().zip(counts) {
            let cells: Vec<u64> = row
                .as_array()
                .map(|r| r.iter().filter_map(|c| c.as_u64()).collect())
                .unwrap_or_default();
            let spam = cells.first().copied().unwrap_or(0);
            let ham = cells.get(1).copied().unwrap_or(0);
            println!("{label:<6} {spam:>6} {ham:>6}");
        }
    }
    Ok(())
}

/// Output generic result in human format.
fn output_generic_human(value: &serde_json::Value) -> Result<()> {
    if let Some(obj) = value.as_object() {
        for (key, val) in obj {
            match val {
                serde_json::Value::String(s) => println!("{key}: {s}"),
                serde_json::Value::Null => {}
                other => println!("{key}: {other}"),
            }
        }
    } else {
        println!("{value}");
    }
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &HamspamArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{json}");
    Ok(())
}

/// Render the recent-history panel shown in interactive mode.
pub fn format_history<'a, I>(entries: I) -> String
where
    I: IntoIterator<Item = &'a HistoryEntry>,
{
    let lines: Vec<String> = entries
        .into_iter()
        .map(|entry| {
            format!(
                "{:<5} {:>6}  {}",
                entry.label,
                entry.confidence_display(),
                entry.preview()
            )
        })
        .collect();

    if lines.is_empty() {
        "No messages classified yet.".to_string()
    } else {
        lines.join("\n")
    }
}
