//! Simple analyzer: `\w+` regex tokens, lowercased, no stop words.

use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::tokenizer::regex::RegexTokenizer;
use crate::error::Result;

/// An analyzer that splits on regex matches and lowercases.
#[derive(Debug)]
pub struct SimpleAnalyzer {
    inner: PipelineAnalyzer,
}

impl SimpleAnalyzer {
    /// Create a new simple analyzer using the `\w+` pattern.
    pub fn new() -> Result<Self> {
        Self::with_pattern(r"\w+")
    }

    /// Create a simple analyzer with a custom token pattern.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let tokenizer = Arc::new(RegexTokenizer::with_pattern(pattern)?);
        let inner = PipelineAnalyzer::new(tokenizer)
            .add_filter(Arc::new(LowercaseFilter::new()))
            .with_name("simple");

        Ok(SimpleAnalyzer { inner })
    }
}

impl Analyzer for SimpleAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &'static str {
        "simple"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_simple_analyzer() {
        let analyzer = SimpleAnalyzer::new().unwrap();

        let tokens: Vec<Token> = analyzer.analyze("Hello, the World").unwrap().collect();

        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].text, "hello");
        assert_eq!(tokens[1].text, "the");
        assert_eq!(tokens[2].text, "world");
        assert_eq!(analyzer.name(), "simple");
    }
}
