//! Command implementations for the hamspam CLI.

use std::io::{self, BufRead, Write};
use std::time::Instant;

use crate::batch::BatchClassifier;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::Result;
use crate::session::{DEFAULT_HISTORY_VIEW, Session, Submission};
use crate::trainer::{TrainedModel, Trainer};
use crate::types::Label;

/// Execute a CLI command.
///
/// Every command trains a fresh model first. A training failure aborts the
/// command with that error.
pub fn execute_command(args: HamspamArgs) -> Result<()> {
    let config = args.classifier_config()?;
    let input_rules = config.input;

    log::info!("Training on {}", config.dataset_path.display());
    let model = Trainer::new(config).train()?;

    match &args.command {
        Command::Classify(classify_args) => classify(&model, classify_args, &args),
        Command::Batch(batch_args) => batch(&model, batch_args, &args),
        Command::Interactive => {
            let mut session = Session::new(model, input_rules);
            let stdin = io::stdin();
            let stdout = io::stdout();
            run_interactive(&mut session, stdin.lock(), stdout.lock())
        }
        Command::Evaluate => evaluate(&model, &args),
    }
}

/// Classify one message given on the command line.
fn classify(model: &TrainedModel, args: &ClassifyArgs, cli_args: &HamspamArgs) -> Result<()> {
    let text = args.message();
    let prediction = model.predict(&text)?;

    output_result(
        "Classification complete",
        &ClassificationResult::new(&text, &prediction),
        cli_args,
    )
}

/// Classify a CSV file and write the labeled table.
fn batch(model: &TrainedModel, args: &BatchArgs, cli_args: &HamspamArgs) -> Result<()> {
    let start = Instant::now();
    let result = BatchClassifier::new(model).classify_path(&args.input)?;

    match &args.output {
        Some(path) => result.write_csv_to_path(path)?,
        // The table itself is the output; no summary follows it.
        None => return result.write_csv(io::stdout().lock()),
    }

    let spam = result
        .predictions
        .iter()
        .filter(|p| p.label == Label::Spam)
        .count();

    output_result(
        "Batch classification complete",
        &BatchSummary {
            input: args.input.display().to_string(),
            output: args.output.as_ref().map(|p| p.display().to_string()),
            rows: result.len(),
            spam,
            ham: result.len() - spam,
            duration_ms: start.elapsed().as_millis() as u64,
        },
        cli_args,
    )
}

/// Report metrics on the held-out split.
fn evaluate(model: &TrainedModel, cli_args: &HamspamArgs) -> Result<()> {
    let evaluation = model.evaluate()?;
    let report = model.report();

    output_result(
        "Evaluation complete",
        &EvaluationResult {
            train_size: report.train_size,
            vocabulary_size: report.vocabulary_size,
            evaluation,
        },
        cli_args,
    )
}

/// Line-oriented interactive loop.
///
/// Each line is one submission. `:history` prints the most recent
/// classifications and `:quit` (or end of input) leaves the loop.
pub fn run_interactive<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    mut output: W,
) -> Result<()> {
    writeln!(
        output,
        "Type a message to classify. Commands: :history, :quit"
    )?;
    prompt(&mut output)?;

    for line in input.lines() {
        let line = line?;
        match line.trim() {
            ":quit" | ":q" => break,
            ":history" => {
                writeln!(
                    output,
                    "{}",
                    format_history(session.history().recent(DEFAULT_HISTORY_VIEW))
                )?;
            }
            _ => match session.submit(&line)? {
                Submission::Classified(prediction) => {
                    writeln!(
                        output,
                        "{} ({})",
                        prediction.label,
                        prediction.confidence_display()
                    )?;
                }
                Submission::Rejected(message) => writeln!(output, "{message}")?,
            },
        }
        prompt(&mut output)?;
    }

    writeln!(output)?;
    Ok(())
}

fn prompt<W: Write>(output: &mut W) -> Result<()> {
    write!(output, "> ")?;
    output.flush()?;
    Ok(())
}
