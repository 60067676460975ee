//! Command line argument parsing for the hamspam CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::ClassifierConfig;
use crate::error::Result;

/// hamspam - classify short messages as spam or ham
#[derive(Parser, Debug, Clone)]
#[command(name = "hamspam")]
#[command(about = "Train a spam classifier and label messages as Spam or Ham")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct HamspamArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "HAMSPAM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Training dataset, overriding the configured path
    #[arg(short, long, value_name = "DATASET_CSV", env = "HAMSPAM_DATASET")]
    pub dataset: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl HamspamArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }

    /// Build the classifier configuration from `--config` and `--dataset`.
    pub fn classifier_config(&self) -> Result<ClassifierConfig> {
        let mut config = match &self.config {
            Some(path) => ClassifierConfig::from_file(path)?,
            None => ClassifierConfig::default(),
        };
        if let Some(dataset) = &self.dataset {
            config.dataset_path = dataset.clone();
        }
        Ok(config)
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Classify a single message
    Classify(ClassifyArgs),

    /// Classify every row of a CSV file
    Batch(BatchArgs),

    /// Classify messages typed on standard input
    Interactive,

    /// Report accuracy on the held-out split
    Evaluate,
}

/// Arguments for classifying one message
#[derive(Parser, Debug, Clone)]
pub struct ClassifyArgs {
    /// Message text
    #[arg(value_name = "TEXT", required = true, num_args = 1..)]
    pub text: Vec<String>,
}

impl ClassifyArgs {
    /// The message, with separate words joined by single spaces.
    pub fn message(&self) -> String {
        self.text.join(" ")
    }
}

/// Arguments for batch classification
#[derive(Parser, Debug, Clone)]
pub struct BatchArgs {
    /// CSV file with a message, text or body column
    #[arg(value_name = "INPUT_CSV")]
    pub input: PathBuf,

    /// Write the labeled table here instead of standard output
    #[arg(short, long, value_name = "OUTPUT_CSV")]
    pub output: Option<PathBuf>,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}
