//! Error types for the hamspam library.
//!
//! All fallible operations return [`HamspamError`] through the crate-wide
//! [`Result`] alias. Errors fall into three groups:
//!
//! - Fatal at startup: [`HamspamError::DatasetNotFound`], [`HamspamError::Schema`],
//!   [`HamspamError::Training`] and the I/O and CSV wrappers raised while loading data.
//! - Recoverable per submission: [`HamspamError::MissingMessageColumn`] from batch mode.
//! - Configuration: [`HamspamError::Other`] built through [`HamspamError::invalid_config`].
//!
//! # Examples
//!
//! ```
//! use hamspam::error::{HamspamError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(HamspamError::schema("Required column 'category' not found"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for hamspam operations.
#[derive(Error, Debug)]
pub enum HamspamError {
    /// I/O errors (file operations, terminal input, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// CSV parsing or writing errors
    #[error("{0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The training dataset could not be found
    #[error("Dataset not found at {0}")]
    DatasetNotFound(String),

    /// Required columns are missing from a table
    #[error("Schema error: {0}")]
    Schema(String),

    /// No usable rows remain after cleaning
    #[error("Dataset contains no usable rows")]
    EmptyDataset,

    /// Only one of the two classes is present
    #[error("Dataset must contain both spam and ham examples (spam: {spam}, ham: {ham})")]
    SingleClass { spam: usize, ham: usize },

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Model fitting errors
    #[error("Training error: {0}")]
    Training(String),

    /// A batch file has no recognizable message column
    #[error("CSV must contain a message column (one of: {0})")]
    MissingMessageColumn(String),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Error with attached context
    #[error("{0:#}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with HamspamError.
pub type Result<T> = std::result::Result<T, HamspamError>;

impl HamspamError {
    /// Create a new dataset-not-found error.
    pub fn dataset_not_found<S: Into<String>>(path: S) -> Self {
        HamspamError::DatasetNotFound(path.into())
    }

    /// Create a new schema error.
    pub fn schema<S: Into<String>>(msg: S) -> Self {
        HamspamError::Schema(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        HamspamError::Analysis(msg.into())
    }

    /// Create a new training error.
    pub fn training<S: Into<String>>(msg: S) -> Self {
        HamspamError::Training(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        HamspamError::Other(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        HamspamError::Other(format!("Invalid configuration: {}", msg.into()))
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        HamspamError::Other(format!("Invalid argument: {}", msg.into()))
    }
}
