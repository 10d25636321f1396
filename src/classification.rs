//! Document classification.
//!
//! ```text
//! Text → Analyzer → tokens → TfIdfVectorizer → FeatureVector
//!                                                   ↓
//!        Classification ← arg-max ← ScoreVector ← BayesScorer
//! ```
//!
//! [`NaiveBayesClassifier`](classifier::NaiveBayesClassifier) owns the loaded
//! model and runs the whole chain for one text at a time;
//! [`ClassifierPipeline`](pipeline::ClassifierPipeline) adds artifact
//! loading, input reading and state tracking on top of it.

pub mod classifier;
pub mod feature;
pub mod pipeline;
pub mod scorer;
pub mod vectorizer;

pub use classifier::{Classification, DocumentClassifier, NaiveBayesClassifier};
pub use feature::{FeatureVector, ScoreVector};
pub use pipeline::{ClassifierPipeline, PipelineState};
pub use scorer::BayesScorer;
pub use vectorizer::{IdfWeighting, TfIdfConfig, TfIdfVectorizer, TfWeighting};
