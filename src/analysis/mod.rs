//! Text analysis module for hamspam.
//!
//! Tokenization and normalization applied to every message before it is
//! turned into TF-IDF features.

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

// Re-export commonly used types
pub use analyzer::*;
pub use token::*;
pub use token_filter::*;
pub use tokenizer::*;
