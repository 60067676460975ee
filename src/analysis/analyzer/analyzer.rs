//! Core analyzer trait definition.
//!
//! An analyzer is the complete text processing pipeline that turns a raw
//! message into the terms the vectorizer counts:
//!
//! ```text
//! Raw Text → Tokenizer → Filter 1 → ... → Filter N → Terms
//! ```
//!
//! # Available Implementations
//!
//! - [`PipelineAnalyzer`](super::pipeline::PipelineAnalyzer) - Custom tokenizer + filter chains
//! - [`EnglishAnalyzer`](super::english::EnglishAnalyzer) - Vectorizer defaults for English text
//!
//! # Examples
//!
//! ```
//! use hamspam::analysis::analyzer::{Analyzer, EnglishAnalyzer};
//!
//! let analyzer = EnglishAnalyzer::new().unwrap();
//! let tokens: Vec<_> = analyzer.analyze("Claim the FREE prize").unwrap().collect();
//!
//! assert_eq!(tokens[0].text, "claim");
//! assert_eq!(tokens[1].text, "free");
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for analyzers that convert text into processed tokens.
///
/// The trait requires `Send + Sync` so trained vectorizers holding an
/// analyzer can be shared by reference.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and logging).
    fn name(&self) -> &'static str;
}
