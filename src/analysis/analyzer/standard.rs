//! Standard analyzer: the default tokenization policy for classification.
//!
//! # Pipeline
//!
//! 1. UnicodeWordTokenizer (UAX #29 word boundaries, tokens up to 255 chars)
//! 2. LowercaseFilter
//! 3. StopFilter (33 English stop words)
//! 4. RemoveEmptyFilter
//!
//! ```
//! use nbclassify::analysis::analyzer::Analyzer;
//! use nbclassify::analysis::analyzer::standard::StandardAnalyzer;
//!
//! let analyzer = StandardAnalyzer::new().unwrap();
//! let tokens: Vec<_> = analyzer.analyze("Buy the cheap pills, NOW!").unwrap().collect();
//!
//! assert_eq!(tokens.len(), 4);
//! assert_eq!(tokens[0].text, "buy");
//! assert_eq!(tokens[3].text, "now");
//! ```

use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::remove_empty::RemoveEmptyFilter;
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::tokenizer::unicode_word::{DEFAULT_MAX_TOKEN_LENGTH, UnicodeWordTokenizer};
use crate::error::{NbError, Result};

/// A standard analyzer that provides good defaults for English text.
pub struct StandardAnalyzer {
    inner: PipelineAnalyzer,
}

impl StandardAnalyzer {
    /// Create a new standard analyzer with default settings.
    pub fn new() -> Result<Self> {
        Self::with_options(DEFAULT_MAX_TOKEN_LENGTH, true)
    }

    /// Create a new standard analyzer without stop word filtering.
    pub fn without_stop_words() -> Result<Self> {
        Self::with_options(DEFAULT_MAX_TOKEN_LENGTH, false)
    }

    /// Create a standard analyzer with an explicit token length limit and
    /// optional stop word filtering.
    pub fn with_options(max_token_length: usize, stop_words: bool) -> Result<Self> {
        if max_token_length == 0 {
            return Err(NbError::analysis("max_token_length must be greater than zero"));
        }

        let tokenizer = UnicodeWordTokenizer::new().with_max_token_length(max_token_length);
        let mut analyzer = PipelineAnalyzer::new(Arc::new(tokenizer))
            .add_filter(Arc::new(LowercaseFilter::new()));
        if stop_words {
            analyzer = analyzer.add_filter(Arc::new(StopFilter::new()));
        }
        let analyzer = analyzer
            .add_filter(Arc::new(RemoveEmptyFilter::new()))
            .with_name(if stop_words { "standard" } else { "standard_no_stop" });

        Ok(StandardAnalyzer { inner: analyzer })
    }

    /// Get the inner pipeline analyzer.
    pub fn inner(&self) -> &PipelineAnalyzer {
        &self.inner
    }
}

impl Analyzer for StandardAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &'static str {
        "standard"
    }
}

impl std::fmt::Debug for StandardAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StandardAnalyzer")
            .field("inner", &self.inner)
            .finish()
    }
}
