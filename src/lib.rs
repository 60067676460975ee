//! # hamspam
//!
//! A small spam/ham classifier for short text messages.
//!
//! ## Features
//!
//! - TF-IDF features with English stop-word removal
//! - Class-weighted logistic regression with calibrated confidence
//! - Batch labeling of CSV files
//! - Interactive sessions with input validation and history
//!
//! ```no_run
//! use hamspam::config::ClassifierConfig;
//! use hamspam::trainer::train;
//!
//! # fn main() -> hamspam::error::Result<()> {
//! let model = train(&ClassifierConfig::default())?;
//! let prediction = model.predict("WIN A FREE IPHONE NOW!!!")?;
//! println!("{} ({})", prediction.label, prediction.confidence_display());
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod batch;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod ml;
pub mod predictor;
pub mod session;
pub mod trainer;
pub mod types;

pub mod prelude {
    pub use crate::batch::{BatchClassifier, BatchResult};
    pub use crate::config::ClassifierConfig;
    pub use crate::error::{HamspamError, Result};
    pub use crate::session::{Session, Submission};
    pub use crate::trainer::{TrainedModel, Trainer, train};
    pub use crate::types::{Label, LabeledMessage, Prediction};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
