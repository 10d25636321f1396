//! # nbclassify
//!
//! Classify text documents with a pre-trained Naive Bayes model.
//!
//! ## Features
//!
//! - Standard and complementary Naive Bayes scoring
//! - TF-IDF document weighting (classic Lucene similarity by default)
//! - Unicode-aware text analysis pipeline
//! - Checksummed binary model artifacts over pluggable storage backends
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use nbclassify::prelude::*;
//!
//! let dictionary = Dictionary::from_entries([("cheap", 0), ("meeting", 1)]).unwrap();
//! let df = DocumentFrequency::from_entries(10, [(0, 4), (1, 6)]).unwrap();
//! let labels = LabelIndex::from_names(["ham", "spam"]).unwrap();
//!
//! let mut weights = WeightModelBuilder::new(2, 2);
//! weights.add_weight(0, 0, 1.0).unwrap();
//! weights.add_weight(0, 1, 9.0).unwrap();
//! weights.add_weight(1, 0, 8.0).unwrap();
//! weights.add_weight(1, 1, 2.0).unwrap();
//!
//! let artifacts = ModelArtifacts::new(dictionary, df, labels, weights.build().unwrap()).unwrap();
//! let classifier =
//!     NaiveBayesClassifier::from_config(Arc::new(artifacts), &ClassifierConfig::default()).unwrap();
//!
//! assert_eq!(classifier.classify("Cheap, cheap!").unwrap().label, "spam");
//! ```

pub mod analysis;
pub mod classification;
pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod storage;
pub mod util;

pub mod prelude {
    pub use crate::analysis::analyzer::Analyzer;
    pub use crate::analysis::analyzer::standard::StandardAnalyzer;
    pub use crate::classification::{
        Classification, ClassifierPipeline, DocumentClassifier, NaiveBayesClassifier,
    };
    pub use crate::config::ClassifierConfig;
    pub use crate::error::{NbError, Result};
    pub use crate::model::{
        ArtifactPaths, ArtifactStore, Dictionary, DocumentFrequency, LabelIndex, ModelArtifacts,
        WeightModelBuilder,
    };
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
