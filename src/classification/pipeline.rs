//! End-to-end classification of one input file.
//!
//! ```text
//! Uninitialized → ArtifactsLoaded → TextTokenized → VectorBuilt → Scored → Reported → Done
//!       └──────────────┴────────────────┴───────────────┴───────────┴─────────┴──→ Failed(kind)
//! ```

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::classification::classifier::{Classification, NaiveBayesClassifier};
use crate::config::ClassifierConfig;
use crate::error::{ErrorKind, NbError, Result};
use crate::model::{ArtifactPaths, ModelArtifacts};

/// Progress of a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelineState {
    Uninitialized,
    ArtifactsLoaded,
    TextTokenized,
    VectorBuilt,
    Scored,
    Reported,
    Done,
    Failed(ErrorKind),
}

impl PipelineState {
    /// Whether the run has finished, successfully or not.
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Done | PipelineState::Failed(_))
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineState::Uninitialized => f.write_str("uninitialized"),
            PipelineState::ArtifactsLoaded => f.write_str("artifacts_loaded"),
            PipelineState::TextTokenized => f.write_str("text_tokenized"),
            PipelineState::VectorBuilt => f.write_str("vector_built"),
            PipelineState::Scored => f.write_str("scored"),
            PipelineState::Reported => f.write_str("reported"),
            PipelineState::Done => f.write_str("done"),
            PipelineState::Failed(kind) => write!(f, "failed({kind})"),
        }
    }
}

/// Loads a model, reads one document and classifies it.
#[derive(Debug)]
pub struct ClassifierPipeline {
    config: ClassifierConfig,
    state: PipelineState,
    classifier: Option<NaiveBayesClassifier>,
}

impl ClassifierPipeline {
    pub fn new(config: ClassifierConfig) -> Self {
        ClassifierPipeline {
            config,
            state: PipelineState::Uninitialized,
            classifier: None,
        }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Current state.
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// The classifier assembled by the last run that got past loading.
    pub fn classifier(&self) -> Option<&NaiveBayesClassifier> {
        self.classifier.as_ref()
    }

    /// Classify the document at `input` with the model at `paths`.
    ///
    /// On failure the pipeline ends in [`PipelineState::Failed`] carrying the
    /// kind of the returned error.
    pub fn run(&mut self, paths: &ArtifactPaths, input: &Path) -> Result<Classification> {
        self.state = PipelineState::Uninitialized;
        self.classifier = None;

        let result = self.run_stages(paths, input);
        if let Err(e) = &result {
            log::debug!("pipeline failed in state {}: {e}", self.state);
            self.state = PipelineState::Failed(e.kind());
        }
        result
    }

    fn run_stages(&mut self, paths: &ArtifactPaths, input: &Path) -> Result<Classification> {
        let artifacts = ModelArtifacts::load(paths, self.config.parallel_load)?;
        let classifier = NaiveBayesClassifier::from_config(Arc::new(artifacts), &self.config)?;
        self.advance(PipelineState::ArtifactsLoaded);
        let classifier = self.classifier.insert(classifier).clone();

        let text = read_input(input)?;
        let tokens = classifier.tokenize(&text)?;
        self.advance(PipelineState::TextTokenized);

        let vector = classifier.vectorize(&tokens);
        self.advance(PipelineState::VectorBuilt);

        let scores = classifier.score(&vector)?;
        self.advance(PipelineState::Scored);

        let classification = classifier.select(&scores)?;
        self.advance(PipelineState::Reported);

        log::info!(
            "classified {} as {:?} (label {}, score {})",
            input.display(),
            classification.label,
            classification.label_id,
            classification.score
        );
        self.advance(PipelineState::Done);
        Ok(classification)
    }

    fn advance(&mut self, next: PipelineState) {
        log::debug!("pipeline: {} -> {}", self.state, next);
        self.state = next;
    }
}

/// Read the whole input document as UTF-8.
fn read_input(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)
        .map_err(|e| NbError::tokenization(format!("cannot read {}: {e}", path.display())))?;
    String::from_utf8(bytes)
        .map_err(|e| NbError::tokenization(format!("{} is not valid UTF-8: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        ArtifactStore, Dictionary, DocumentFrequency, LabelIndex, WeightModelBuilder, store::names,
    };
    use crate::storage::{FileStorage, StorageConfig};
    use tempfile::TempDir;

    fn write_model(dir: &Path) -> ArtifactPaths {
        let dictionary = Dictionary::from_entries([("buy", 0), ("cheap", 1), ("meeting", 2)]).unwrap();
        let df = DocumentFrequency::from_entries(4, [(0, 2), (1, 2), (2, 2)]).unwrap();
        let labels = LabelIndex::from_names(["ham", "spam"]).unwrap();
        let mut builder = WeightModelBuilder::new(2, 3);
        // only trained cells are stored
        builder.add_weight(0, 1, 3.0).unwrap();
        builder.add_weight(1, 1, 3.0).unwrap();
        builder.add_weight(2, 0, 4.0).unwrap();
        let artifacts = ModelArtifacts::new(dictionary, df, labels, builder.build().unwrap()).unwrap();

        let storage = FileStorage::new(dir, StorageConfig::default()).unwrap();
        let store = ArtifactStore::new(Arc::new(storage));
        artifacts
            .write_to_store(
                &store,
                names::MODEL,
                names::LABEL_INDEX,
                names::DICTIONARY,
                names::DOCUMENT_FREQUENCY,
            )
            .unwrap();
        ArtifactPaths::in_directory(dir)
    }

    #[test]
    fn test_run_reaches_done() {
        let dir = TempDir::new().unwrap();
        let paths = write_model(dir.path());
        let input = dir.path().join("input.txt");
        std::fs::write(&input, "Buy CHEAP stuff").unwrap();

        let mut pipeline = ClassifierPipeline::new(ClassifierConfig::default());
        assert_eq!(pipeline.state(), PipelineState::Uninitialized);

        let result = pipeline.run(&paths, &input).unwrap();
        assert_eq!(result.label, "spam");
        assert_eq!(pipeline.state(), PipelineState::Done);
        assert!(pipeline.state().is_terminal());
        assert_eq!(pipeline.classifier().unwrap().artifacts().document_count(), 4);
    }

    #[test]
    fn test_missing_artifact_fails_with_artifact_load() {
        let dir = TempDir::new().unwrap();
        let paths = write_model(dir.path());
        std::fs::remove_file(&paths.dictionary).unwrap();
        let input = dir.path().join("input.txt");
        std::fs::write(&input, "buy").unwrap();

        let mut pipeline = ClassifierPipeline::new(ClassifierConfig::default());
        let err = pipeline.run(&paths, &input).unwrap_err();
        assert!(matches!(err, NbError::ArtifactLoad(_)));
        assert_eq!(
            pipeline.state(),
            PipelineState::Failed(ErrorKind::ArtifactLoad)
        );
        assert!(pipeline.classifier().is_none());
    }

    #[test]
    fn test_invalid_utf8_input_fails_with_tokenization() {
        let dir = TempDir::new().unwrap();
        let paths = write_model(dir.path());
        let input = dir.path().join("input.txt");
        std::fs::write(&input, [0xFFu8, 0xFE, 0x00]).unwrap();

        let config = ClassifierConfig {
            parallel_load: false,
            ..ClassifierConfig::default()
        };
        let mut pipeline = ClassifierPipeline::new(config);
        let err = pipeline.run(&paths, &input).unwrap_err();
        assert!(matches!(err, NbError::Tokenization(_)));
        assert_eq!(
            pipeline.state(),
            PipelineState::Failed(ErrorKind::Tokenization)
        );
    }

    #[test]
    fn test_missing_input_fails_with_tokenization() {
        let dir = TempDir::new().unwrap();
        let paths = write_model(dir.path());

        let mut pipeline = ClassifierPipeline::new(ClassifierConfig::default());
        let err = pipeline.run(&paths, &dir.path().join("absent.txt")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Tokenization);
    }

    #[test]
    fn test_state_display() {
        assert_eq!(PipelineState::VectorBuilt.to_string(), "vector_built");
        assert_eq!(
            PipelineState::Failed(ErrorKind::UnknownLabel).to_string(),
            "failed(unknown_label)"
        );
    }
}
