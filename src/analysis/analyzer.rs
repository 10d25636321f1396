//! Analyzers: complete text-to-token pipelines.
//!
//! ```text
//! Raw Text → Analyzer → Token Stream → Vectorizer
//!             ↓
//!         Tokenizer
//!             ↓
//!         Filter 1 … Filter N
//! ```
//!
//! - [`standard::StandardAnalyzer`] - Unicode words, lowercase, English stop words
//! - [`simple::SimpleAnalyzer`] - `\w+` regex words, lowercase
//! - [`pipeline::PipelineAnalyzer`] - Custom tokenizer + filter chains
//!
//! Implementing a custom analyzer:
//!
//! ```
//! use nbclassify::analysis::analyzer::Analyzer;
//! use nbclassify::analysis::token::{Token, TokenStream};
//! use nbclassify::error::Result;
//!
//! struct WhitespaceLower;
//!
//! impl Analyzer for WhitespaceLower {
//!     fn analyze(&self, text: &str) -> Result<TokenStream> {
//!         let tokens: Vec<Token> = text
//!             .split_whitespace()
//!             .enumerate()
//!             .map(|(i, w)| Token::new(w.to_lowercase(), i))
//!             .collect();
//!         Ok(Box::new(tokens.into_iter()))
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "whitespace_lower"
//!     }
//! }
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

pub mod pipeline;
pub mod simple;
pub mod standard;

/// Trait for analyzers that convert text into normalized tokens.
///
/// Implementations must be deterministic: identical input text yields an
/// identical token sequence. Calling [`analyze`](Self::analyze) again restarts
/// the sequence.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &'static str;
}
