//! Classifier configuration.
//!
//! Every field has a default, so a configuration file only needs to name
//! what it changes:
//!
//! ```json
//! {
//!   "analyzer": "standard_no_stop",
//!   "tfidf": { "tf": "log", "idf": "smooth" },
//!   "parallel_load": false
//! }
//! ```

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::simple::SimpleAnalyzer;
use crate::analysis::analyzer::standard::StandardAnalyzer;
use crate::analysis::tokenizer::unicode_word::DEFAULT_MAX_TOKEN_LENGTH;
use crate::classification::vectorizer::TfIdfConfig;
use crate::error::{NbError, Result};

/// Which analyzer turns input text into tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalyzerKind {
    /// Unicode words, lowercased, English stop words removed.
    #[default]
    Standard,
    /// Unicode words, lowercased.
    StandardNoStop,
    /// `\w+` regex words, lowercased.
    Simple,
}

/// Configuration of a classifier run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Analyzer applied to the input text.
    pub analyzer: AnalyzerKind,

    /// Longest token the Unicode word tokenizer emits; longer words are
    /// skipped.
    pub max_token_length: usize,

    /// TF-IDF weighting.
    pub tfidf: TfIdfConfig,

    /// Load the four artifacts concurrently.
    pub parallel_load: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        ClassifierConfig {
            analyzer: AnalyzerKind::default(),
            max_token_length: DEFAULT_MAX_TOKEN_LENGTH,
            tfidf: TfIdfConfig::default(),
            parallel_load: true,
        }
    }
}

impl ClassifierConfig {
    /// Read a JSON configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            NbError::invalid_config(format!("cannot read {}: {e}", path.display()))
        })?;
        let config: ClassifierConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        if self.max_token_length == 0 {
            return Err(NbError::invalid_config(
                "max_token_length must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Build the configured analyzer.
    pub fn build_analyzer(&self) -> Result<Arc<dyn Analyzer>> {
        self.validate()?;
        let analyzer: Arc<dyn Analyzer> = match self.analyzer {
            AnalyzerKind::Standard => {
                Arc::new(StandardAnalyzer::with_options(self.max_token_length, true)?)
            }
            AnalyzerKind::StandardNoStop => {
                Arc::new(StandardAnalyzer::with_options(self.max_token_length, false)?)
            }
            AnalyzerKind::Simple => Arc::new(SimpleAnalyzer::new()?),
        };
        Ok(analyzer)
    }
}
