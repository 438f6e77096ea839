//! WealthJournal AI - Gemini-backed portfolio analysis.
//!
//! Implements the core `PortfolioAnalyzerTrait` on top of the Gemini
//! `generateContent` REST API with a JSON response schema.
//!
//! # Architecture
//!
//! - `config`: Analyzer settings read from the environment
//! - `prompt_template`: System instruction and extraction prompt
//! - `schema`: Response schema constraining the model output
//! - `gemini_analyzer`: Request building, HTTP call and response parsing
//! - `error`: Provider errors and their mapping onto `AnalyzerError`
//!
//! # Example
//!
//! ```ignore
//! use wealthjournal_ai::{AnalyzerConfig, GeminiAnalyzer};
//!
//! let analyzer = GeminiAnalyzer::new(AnalyzerConfig::from_env())?;
//! let analysis = analyzer.analyze(request).await?;
//! ```

pub mod config;
pub mod error;
pub mod gemini_analyzer;
pub mod prompt_template;
pub mod schema;

// Re-export main types for convenience
pub use config::AnalyzerConfig;
pub use error::AiError;
pub use gemini_analyzer::GeminiAnalyzer;
