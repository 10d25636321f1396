//! Text analysis for classification input.
//!
//! Raw document text flows through an [`Analyzer`](analyzer::Analyzer): a
//! tokenizer splits it into word tokens and a chain of token filters
//! normalizes them (lowercasing, stop-word removal). The resulting token
//! stream is what the vectorizer looks up in the trained dictionary.

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;
