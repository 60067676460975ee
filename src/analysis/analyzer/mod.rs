//! Analyzer implementations that combine tokenizers and filters.

#[allow(clippy::module_inception)]
mod analyzer;
mod english;
mod pipeline;

pub use analyzer::Analyzer;
pub use english::EnglishAnalyzer;
pub use pipeline::PipelineAnalyzer;
