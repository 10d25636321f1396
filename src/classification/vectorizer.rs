//! TF-IDF vectorization of analyzed documents.
//!
//! The default weighting is the classic Lucene similarity:
//!
//! ```text
//! tf  = sqrt(count)
//! idf = 1 + ln(N / (df + 1))
//! ```
//!
//! where `N` is the number of training documents. Other weightings can be
//! selected through [`TfIdfConfig`].

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::analysis::token::Token;
use crate::classification::feature::FeatureVector;
use crate::model::{Dictionary, DocumentFrequency};

/// Term-frequency weighting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TfWeighting {
    /// Raw occurrence count.
    Raw,
    /// Square root of the count.
    #[default]
    Sqrt,
    /// `1 + ln(count)`.
    Log,
    /// Count divided by the number of in-vocabulary tokens.
    Frequency,
}

/// Inverse-document-frequency weighting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdfWeighting {
    /// `1 + ln(N / (df + 1))`.
    #[default]
    Classic,
    /// `ln(N / df)`.
    Plain,
    /// `ln(1 + N / df)`.
    Smooth,
}

/// TF-IDF weighting configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TfIdfConfig {
    pub tf: TfWeighting,
    pub idf: IdfWeighting,
}

impl TfWeighting {
    /// Weight of a term seen `count` times among `length` retained tokens.
    pub fn weight(self, count: u32, length: u32) -> f64 {
        let count = count as f64;
        match self {
            TfWeighting::Raw => count,
            TfWeighting::Sqrt => count.sqrt(),
            TfWeighting::Log => {
                if count > 0.0 {
                    1.0 + count.ln()
                } else {
                    0.0
                }
            }
            TfWeighting::Frequency => {
                if length > 0 {
                    count / length as f64
                } else {
                    0.0
                }
            }
        }
    }
}

impl IdfWeighting {
    /// Weight of a term present in `df` of `document_count` training documents.
    pub fn weight(self, df: u64, document_count: u64) -> f64 {
        let n = document_count as f64;
        match self {
            IdfWeighting::Classic => 1.0 + (n / (df as f64 + 1.0)).ln(),
            IdfWeighting::Plain => (n / df.max(1) as f64).ln(),
            IdfWeighting::Smooth => (1.0 + n / df.max(1) as f64).ln(),
        }
    }
}

/// Turns token streams into TF-IDF feature vectors over a trained vocabulary.
#[derive(Debug, Clone, Copy, Default)]
pub struct TfIdfVectorizer {
    config: TfIdfConfig,
}

impl TfIdfVectorizer {
    pub fn new(config: TfIdfConfig) -> Self {
        TfIdfVectorizer { config }
    }

    pub fn config(&self) -> &TfIdfConfig {
        &self.config
    }

    /// Combined weight of a term, clamped at zero.
    pub fn weight(&self, count: u32, length: u32, df: u64, document_count: u64) -> f64 {
        let weight = self.config.tf.weight(count, length) * self.config.idf.weight(df, document_count);
        weight.max(0.0)
    }

    /// Build the feature vector of a document.
    ///
    /// Tokens outside the dictionary are ignored, as are dictionary terms
    /// with no document-frequency entry. The result depends only on the
    /// multiset of tokens, not on their order.
    pub fn vectorize<'a, I>(
        &self,
        tokens: I,
        dictionary: &Dictionary,
        document_frequency: &DocumentFrequency,
    ) -> FeatureVector
    where
        I: IntoIterator<Item = &'a Token>,
    {
        let mut counts: AHashMap<u32, u32> = AHashMap::new();
        let mut length = 0u32;
        for token in tokens {
            if token.is_stopped() {
                continue;
            }
            if let Some(term_id) = dictionary.get(&token.text) {
                *counts.entry(term_id).or_insert(0) += 1;
                length += 1;
            }
        }

        let document_count = document_frequency.document_count();
        let mut vector = FeatureVector::new();
        for (term_id, count) in counts {
            let Some(df) = document_frequency.get(term_id) else {
                log::debug!("term-id {term_id} has no document frequency, skipping");
                continue;
            };
            vector.insert(term_id, self.weight(count, length, df, document_count));
        }

        log::debug!(
            "vectorized {length} in-vocabulary tokens into {} features",
            vector.len()
        );
        vector
    }
}
