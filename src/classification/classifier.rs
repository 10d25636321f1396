//! Naive Bayes classifier over loaded model artifacts.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::Analyzer;
use crate::analysis::token::Token;
use crate::classification::feature::{FeatureVector, ScoreVector};
use crate::classification::scorer::BayesScorer;
use crate::classification::vectorizer::{TfIdfConfig, TfIdfVectorizer};
use crate::config::ClassifierConfig;
use crate::error::{NbError, Result};
use crate::model::ModelArtifacts;

/// The outcome of classifying one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Name of the winning label.
    pub label: String,
    /// Id of the winning label.
    pub label_id: u32,
    /// Score of the winning label.
    pub score: f64,
}

/// Trait for classifiers that assign a label to a text.
pub trait DocumentClassifier: Send + Sync {
    /// Classify `text`.
    fn classify(&self, text: &str) -> Result<Classification>;

    /// Names of the labels this classifier can predict, in id order.
    fn labels(&self) -> Vec<String>;
}

/// A classifier holding one loaded model.
///
/// The model is shared read-only, so one instance can serve any number of
/// documents, including from several threads at once.
#[derive(Clone)]
pub struct NaiveBayesClassifier {
    artifacts: Arc<ModelArtifacts>,
    analyzer: Arc<dyn Analyzer>,
    vectorizer: TfIdfVectorizer,
    scorer: Arc<BayesScorer>,
}

impl NaiveBayesClassifier {
    /// Assemble a classifier, materializing the model's log weights.
    pub fn new(
        artifacts: Arc<ModelArtifacts>,
        analyzer: Arc<dyn Analyzer>,
        tfidf: TfIdfConfig,
    ) -> Result<Self> {
        let scorer = BayesScorer::new(&artifacts.weights)?;
        if scorer.num_labels() != artifacts.label_index.len() {
            return Err(NbError::artifact_load(format!(
                "weight model has {} labels but the label index has {}",
                scorer.num_labels(),
                artifacts.label_index.len()
            )));
        }

        Ok(NaiveBayesClassifier {
            artifacts,
            analyzer,
            vectorizer: TfIdfVectorizer::new(tfidf),
            scorer: Arc::new(scorer),
        })
    }

    /// Assemble a classifier using the analyzer and weighting of `config`.
    pub fn from_config(artifacts: Arc<ModelArtifacts>, config: &ClassifierConfig) -> Result<Self> {
        let analyzer = config.build_analyzer()?;
        Self::new(artifacts, analyzer, config.tfidf)
    }

    pub fn artifacts(&self) -> &ModelArtifacts {
        &self.artifacts
    }

    pub fn analyzer(&self) -> &dyn Analyzer {
        self.analyzer.as_ref()
    }

    pub fn scorer(&self) -> &BayesScorer {
        &self.scorer
    }

    /// Analyze `text` into tokens.
    pub fn tokenize(&self, text: &str) -> Result<Vec<Token>> {
        let tokens: Vec<Token> = self
            .analyzer
            .analyze(text)
            .map_err(|e| match e {
                NbError::Tokenization(_) => e,
                other => NbError::tokenization(other.to_string()),
            })?
            .collect();

        log::debug!(
            "{} analyzer produced {} tokens",
            self.analyzer.name(),
            tokens.len()
        );
        Ok(tokens)
    }

    /// Build the TF-IDF feature vector of analyzed tokens.
    pub fn vectorize(&self, tokens: &[Token]) -> FeatureVector {
        self.vectorizer.vectorize(
            tokens,
            &self.artifacts.dictionary,
            &self.artifacts.document_frequency,
        )
    }

    /// Score a feature vector against every label.
    pub fn score(&self, vector: &FeatureVector) -> Result<ScoreVector> {
        let scores = self.scorer.classify(vector)?;
        log::debug!("scores: {:?}", scores.as_slice());
        Ok(scores)
    }

    /// Pick the winning label: the strictly greatest score, ties going to
    /// the lowest label-id.
    pub fn select(&self, scores: &ScoreVector) -> Result<Classification> {
        let (label_id, score) = scores
            .argmax()
            .ok_or_else(|| NbError::invalid_score("no label scores to choose from"))?;
        let label = self
            .artifacts
            .label_index
            .name(label_id)
            .ok_or(NbError::UnknownLabel(label_id))?;

        Ok(Classification {
            label: label.to_string(),
            label_id,
            score,
        })
    }
}

impl DocumentClassifier for NaiveBayesClassifier {
    fn classify(&self, text: &str) -> Result<Classification> {
        let tokens = self.tokenize(text)?;
        let vector = self.vectorize(&tokens);
        let scores = self.score(&vector)?;
        self.select(&scores)
    }

    fn labels(&self) -> Vec<String> {
        self.artifacts
            .label_index
            .iter()
            .map(|(_, name)| name.to_string())
            .collect()
    }
}

impl std::fmt::Debug for NaiveBayesClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NaiveBayesClassifier")
            .field("labels", &self.artifacts.label_index.len())
            .field("terms", &self.artifacts.dictionary.len())
            .field("analyzer", &self.analyzer.name())
            .field("tfidf", self.vectorizer.config())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Dictionary, DocumentFrequency, LabelIndex, WeightModelBuilder};

    fn classifier() -> NaiveBayesClassifier {
        let dictionary =
            Dictionary::from_entries([("buy", 0), ("cheap", 1), ("now", 2), ("meeting", 3)]).unwrap();
        let df = DocumentFrequency::from_entries(4, [(0, 2), (1, 2), (2, 2), (3, 2)]).unwrap();
        let labels = LabelIndex::from_names(["ham", "spam"]).unwrap();
        // rows are terms, columns are (ham, spam)
        let grid = [[0.0, 3.0], [0.0, 3.0], [1.0, 2.0], [4.0, 0.0]];
        let mut builder = WeightModelBuilder::new(2, 4);
        for (term_id, row) in grid.iter().enumerate() {
            for (label_id, weight) in row.iter().enumerate() {
                builder
                    .add_weight(term_id as u32, label_id as u32, *weight)
                    .unwrap();
            }
        }
        let artifacts = ModelArtifacts::new(dictionary, df, labels, builder.build().unwrap()).unwrap();

        NaiveBayesClassifier::from_config(Arc::new(artifacts), &ClassifierConfig::default()).unwrap()
    }

    #[test]
    fn test_classify_spam() {
        let classifier = classifier();
        let result = classifier.classify("Buy cheap now now").unwrap();
        assert_eq!(result.label, "spam");
        assert_eq!(result.label_id, 1);
        assert_eq!(classifier.labels(), vec!["ham", "spam"]);
    }

    #[test]
    fn test_classify_ham() {
        let result = classifier().classify("meeting at noon").unwrap();
        assert_eq!(result.label, "ham");
    }

    #[test]
    fn test_empty_document_ties_to_lowest_id() {
        let result = classifier().classify("").unwrap();
        assert_eq!(result.label_id, 0);
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_shared_across_threads() {
        let classifier = Arc::new(classifier());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let classifier = Arc::clone(&classifier);
                std::thread::spawn(move || classifier.classify("cheap cheap buy").unwrap())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap().label, "spam");
        }
    }
}
