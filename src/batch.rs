//! Batch classification of CSV files.
//!
//! The input needs one message column, found by matching the headers
//! case-insensitively against [`MESSAGE_COLUMN_ALIASES`] in order. Every row
//! keeps its original cells and gains a `PREDICTION` and a `CONFIDENCE`
//! column.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use anyhow::Context;
use csv::{ReaderBuilder, StringRecord, Writer};

use crate::error::{HamspamError, Result};
use crate::trainer::TrainedModel;
use crate::types::Prediction;

/// Accepted message column names, in priority order.
pub const MESSAGE_COLUMN_ALIASES: [&str; 3] = ["message", "text", "body"];
/// Name of the appended label column.
pub const PREDICTION_COLUMN: &str = "PREDICTION";
/// Name of the appended confidence column.
pub const CONFIDENCE_COLUMN: &str = "CONFIDENCE";

/// Find the message column among `headers`.
///
/// Aliases are tried in order, so a file with both `Body` and `Text`
/// columns uses `Text`. Within one alias the leftmost header wins.
pub fn find_message_column<'a, I>(headers: I) -> Option<usize>
where
    I: IntoIterator<Item = &'a str>,
{
    let lowered: Vec<String> = headers.into_iter().map(|h| h.to_lowercase()).collect();
    MESSAGE_COLUMN_ALIASES
        .iter()
        .find_map(|alias| lowered.iter().position(|h| h == alias))
}

/// An input table with predictions appended.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchResult {
    /// Original headers followed by `PREDICTION` and `CONFIDENCE`.
    pub headers: Vec<String>,
    /// Original cells followed by the label and the formatted confidence.
    pub rows: Vec<Vec<String>>,
    /// Index of the column that was classified.
    pub message_column: usize,
    /// Predictions in row order.
    pub predictions: Vec<Prediction>,
}

impl BatchResult {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Write the table as CSV.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = Writer::from_writer(writer);
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Write the table as CSV to `path`, replacing any existing file.
    pub fn write_csv_to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("Cannot create output file {}", path.display()))?;
        self.write_csv(file)
    }
}

/// Classifies every row of a CSV table with one trained model.
pub struct BatchClassifier<'a> {
    model: &'a TrainedModel,
}

impl<'a> BatchClassifier<'a> {
    pub fn new(model: &'a TrainedModel) -> Self {
        Self { model }
    }

    /// Classify the CSV file at `path`.
    pub fn classify_path<P: AsRef<Path>>(&self, path: P) -> Result<BatchResult> {
        let file = File::open(path.as_ref())?;
        log::info!("Classifying batch file {}", path.as_ref().display());
        self.classify_reader(file)
    }

    /// Classify a CSV table read from `reader`.
    ///
    /// Fails with [`HamspamError::MissingMessageColumn`] before any
    /// prediction when no header matches an alias.
    pub fn classify_reader<R: Read>(&self, reader: R) -> Result<BatchResult> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let message_column = find_message_column(headers.iter())
            .ok_or_else(|| HamspamError::MissingMessageColumn(MESSAGE_COLUMN_ALIASES.join(", ")))?;

        let records = reader
            .records()
            .collect::<std::result::Result<Vec<StringRecord>, csv::Error>>()?;

        let mut rows = Vec::with_capacity(records.len());
        let mut predictions = Vec::with_capacity(records.len());
        for record in &records {
            // A short row reads as an empty message.
            let text = record.get(message_column).unwrap_or_default();
            let prediction = self.model.predict(text)?;

            // Rows are fitted to the header width so the derived cells line up.
            let mut row: Vec<String> = record
                .iter()
                .take(headers.len())
                .map(str::to_string)
                .collect();
            row.resize(headers.len(), String::new());
            row.push(prediction.label.to_string());
            row.push(prediction.confidence_display());
            rows.push(row);
            predictions.push(prediction);
        }

        let mut out_headers: Vec<String> = headers.iter().map(str::to_string).collect();
        out_headers.push(PREDICTION_COLUMN.to_string());
        out_headers.push(CONFIDENCE_COLUMN.to_string());

        log::debug!(
            "Classified {} rows using column '{}'",
            rows.len(),
            &headers[message_column]
        );

        Ok(BatchResult {
            headers: out_headers,
            rows,
            message_column,
            predictions,
        })
    }
}
