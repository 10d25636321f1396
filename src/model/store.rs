//! Reading and writing model artifacts.
//!
//! [`ArtifactStore`] reads one table per call from a [`Storage`] backend.
//! Whatever goes wrong while reading (missing file, bad magic, truncation,
//! checksum mismatch, invalid content) surfaces as
//! [`NbError::ArtifactLoad`] prefixed with the artifact name.
//!
//! [`ModelArtifacts`] bundles the four tables of one model and checks that
//! they agree with each other.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{NbError, Result};
use crate::model::{Dictionary, DocumentFrequency, LabelIndex, WeightModel};
use crate::storage::{FileStorage, Storage, StorageInput, StorageOutput, StructReader, StructWriter};

/// Reader and writer of artifact tables inside one storage backend.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    storage: Arc<dyn Storage>,
}

impl ArtifactStore {
    /// Create a store over `storage`.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        ArtifactStore { storage }
    }

    /// Open the directory containing `path` read-only.
    ///
    /// Returns the store and the file name of `path` inside it.
    pub fn for_location<P: AsRef<Path>>(path: P) -> Result<(Self, String)> {
        let path = path.as_ref();
        let (storage, name) = FileStorage::open_location(path)
            .map_err(|e| e.into_artifact_load(&path.display().to_string()))?;
        Ok((ArtifactStore::new(Arc::new(storage)), name))
    }

    /// The underlying storage backend.
    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    fn load_table<T, F>(&self, name: &str, read: F) -> Result<T>
    where
        F: FnOnce(&mut StructReader<Box<dyn StorageInput>>) -> Result<T>,
    {
        if !self.storage.file_exists(name) {
            return Err(NbError::artifact_load(format!("{name}: artifact not found")));
        }

        let result: Result<T> = (|| {
            let input = self.storage.open_input(name)?;
            let mut reader = StructReader::new(input)?;
            let table = read(&mut reader)?;
            reader.finish()?;
            Ok(table)
        })();

        result.map_err(|e| e.into_artifact_load(name))
    }

    fn write_table<F>(&self, name: &str, write: F) -> Result<()>
    where
        F: FnOnce(&mut StructWriter<Box<dyn StorageOutput>>) -> Result<()>,
    {
        let output = self.storage.create_output(name)?;
        let mut writer = StructWriter::new(output);
        write(&mut writer)?;
        let bytes = writer.position();
        writer.close()?;

        log::debug!("wrote artifact {name} ({bytes} bytes)");
        Ok(())
    }

    /// Load the term dictionary stored under `name`.
    pub fn load_dictionary(&self, name: &str) -> Result<Dictionary> {
        let dictionary = self.load_table(name, Dictionary::read_from_storage)?;
        log::debug!("loaded dictionary {name}: {} terms", dictionary.len());
        Ok(dictionary)
    }

    /// Load the document-frequency table stored under `name`.
    pub fn load_document_frequency(&self, name: &str) -> Result<DocumentFrequency> {
        let table = self.load_table(name, DocumentFrequency::read_from_storage)?;
        log::debug!(
            "loaded document frequencies {name}: {} terms over {} documents",
            table.len(),
            table.document_count()
        );
        Ok(table)
    }

    /// Load the label index stored under `name`.
    pub fn load_label_index(&self, name: &str) -> Result<LabelIndex> {
        let index = self.load_table(name, LabelIndex::read_from_storage)?;
        log::debug!("loaded label index {name}: {} labels", index.len());
        Ok(index)
    }

    /// Load the weight model stored under `name`.
    pub fn load_weight_model(&self, name: &str) -> Result<WeightModel> {
        let model = self.load_table(name, WeightModel::read_from_storage)?;
        log::debug!(
            "loaded weight model {name}: {} labels, {} features, {} cells, complementary={}",
            model.num_labels(),
            model.num_features(),
            model.cell_count(),
            model.is_complementary()
        );
        Ok(model)
    }

    /// Persist a term dictionary under `name`.
    pub fn write_dictionary(&self, name: &str, dictionary: &Dictionary) -> Result<()> {
        self.write_table(name, |writer| dictionary.write_to_storage(writer))
    }

    /// Persist a document-frequency table under `name`.
    pub fn write_document_frequency(&self, name: &str, table: &DocumentFrequency) -> Result<()> {
        self.write_table(name, |writer| table.write_to_storage(writer))
    }

    /// Persist a label index under `name`.
    pub fn write_label_index(&self, name: &str, index: &LabelIndex) -> Result<()> {
        self.write_table(name, |writer| index.write_to_storage(writer))
    }

    /// Persist a weight model under `name`.
    pub fn write_weight_model(&self, name: &str, model: &WeightModel) -> Result<()> {
        self.write_table(name, |writer| model.write_to_storage(writer))
    }
}

/// Locations of the four artifact tables of a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub label_index: PathBuf,
    pub dictionary: PathBuf,
    pub document_frequency: PathBuf,
}

impl ArtifactPaths {
    /// Conventional file names inside a single model directory.
    pub fn in_directory<P: AsRef<Path>>(directory: P) -> Self {
        let directory = directory.as_ref();
        ArtifactPaths {
            model: directory.join(names::MODEL),
            label_index: directory.join(names::LABEL_INDEX),
            dictionary: directory.join(names::DICTIONARY),
            document_frequency: directory.join(names::DOCUMENT_FREQUENCY),
        }
    }
}

/// Conventional artifact file names.
pub mod names {
    pub const MODEL: &str = "model.bin";
    pub const LABEL_INDEX: &str = "labelindex.bin";
    pub const DICTIONARY: &str = "dictionary.bin";
    pub const DOCUMENT_FREQUENCY: &str = "df-count.bin";
}

/// The loaded tables of one model, consistent with each other.
#[derive(Debug, Clone)]
pub struct ModelArtifacts {
    pub dictionary: Dictionary,
    pub document_frequency: DocumentFrequency,
    pub label_index: LabelIndex,
    pub weights: WeightModel,
}

impl ModelArtifacts {
    /// Assemble loaded tables.
    ///
    /// The weight model's label axis must match the label index exactly.
    pub fn new(
        dictionary: Dictionary,
        document_frequency: DocumentFrequency,
        label_index: LabelIndex,
        weights: WeightModel,
    ) -> Result<Self> {
        if weights.num_labels() != label_index.len() {
            return Err(NbError::artifact_load(format!(
                "weight model has {} labels but the label index has {}",
                weights.num_labels(),
                label_index.len()
            )));
        }
        if label_index.is_empty() {
            return Err(NbError::artifact_load("model has no labels"));
        }

        Ok(ModelArtifacts {
            dictionary,
            document_frequency,
            label_index,
            weights,
        })
    }

    /// Load all four tables from their file locations.
    ///
    /// With `parallel` set the loads run concurrently on the rayon pool. In
    /// either mode the first failure in the order model, label index,
    /// dictionary, document frequency is reported.
    pub fn load(paths: &ArtifactPaths, parallel: bool) -> Result<Self> {
        let load_model = || {
            let (store, name) = ArtifactStore::for_location(&paths.model)?;
            store.load_weight_model(&name)
        };
        let load_labels = || {
            let (store, name) = ArtifactStore::for_location(&paths.label_index)?;
            store.load_label_index(&name)
        };
        let load_dictionary = || {
            let (store, name) = ArtifactStore::for_location(&paths.dictionary)?;
            store.load_dictionary(&name)
        };
        let load_df = || {
            let (store, name) = ArtifactStore::for_location(&paths.document_frequency)?;
            store.load_document_frequency(&name)
        };

        if parallel {
            let ((model, labels), (dictionary, df)) = rayon::join(
                || rayon::join(load_model, load_labels),
                || rayon::join(load_dictionary, load_df),
            );
            Self::assemble(model?, labels?, dictionary?, df?)
        } else {
            let model = load_model()?;
            let labels = load_labels()?;
            let dictionary = load_dictionary()?;
            let df = load_df()?;
            Self::assemble(model, labels, dictionary, df)
        }
    }

    /// Load all four tables from one store by name.
    pub fn load_from_store(
        store: &ArtifactStore,
        model: &str,
        label_index: &str,
        dictionary: &str,
        document_frequency: &str,
    ) -> Result<Self> {
        Self::assemble(
            store.load_weight_model(model)?,
            store.load_label_index(label_index)?,
            store.load_dictionary(dictionary)?,
            store.load_document_frequency(document_frequency)?,
        )
    }

    /// Persist all four tables into one store by name.
    pub fn write_to_store(
        &self,
        store: &ArtifactStore,
        model: &str,
        label_index: &str,
        dictionary: &str,
        document_frequency: &str,
    ) -> Result<()> {
        store.write_weight_model(model, &self.weights)?;
        store.write_label_index(label_index, &self.label_index)?;
        store.write_dictionary(dictionary, &self.dictionary)?;
        store.write_document_frequency(document_frequency, &self.document_frequency)
    }

    fn assemble(
        weights: WeightModel,
        label_index: LabelIndex,
        dictionary: Dictionary,
        document_frequency: DocumentFrequency,
    ) -> Result<Self> {
        let artifacts = Self::new(dictionary, document_frequency, label_index, weights)?;
        log::info!("number of labels: {}", artifacts.num_labels());
        log::info!(
            "number of documents in training set: {}",
            artifacts.document_count()
        );
        Ok(artifacts)
    }

    /// Number of labels the model predicts.
    pub fn num_labels(&self) -> usize {
        self.label_index.len()
    }

    /// Number of training documents.
    pub fn document_count(&self) -> u64 {
        self.document_frequency.document_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WeightModelBuilder;
    use crate::storage::MemoryStorage;
    use std::io::Read;

    fn sample_artifacts() -> ModelArtifacts {
        let dictionary = Dictionary::from_entries([("buy", 0), ("cheap", 1), ("meeting", 2)]).unwrap();
        let df = DocumentFrequency::from_entries(4, [(0, 2), (1, 2), (2, 2)]).unwrap();
        let labels = LabelIndex::from_names(["ham", "spam"]).unwrap();
        let mut builder = WeightModelBuilder::new(2, 3).log_priors(vec![-0.7, -0.7]);
        builder.add_weight(0, 1, 2.0).unwrap();
        builder.add_weight(1, 1, 2.5).unwrap();
        builder.add_weight(2, 0, 3.0).unwrap();
        ModelArtifacts::new(dictionary, df, labels, builder.build().unwrap()).unwrap()
    }

    #[test]
    fn test_tables_round_trip() {
        let store = ArtifactStore::new(Arc::new(MemoryStorage::new()));
        let artifacts = sample_artifacts();
        artifacts
            .write_to_store(&store, "m", "l", "d", "f")
            .unwrap();

        let loaded = ModelArtifacts::load_from_store(&store, "m", "l", "d", "f").unwrap();
        assert_eq!(loaded.dictionary, artifacts.dictionary);
        assert_eq!(loaded.document_frequency, artifacts.document_frequency);
        assert_eq!(loaded.label_index, artifacts.label_index);
        assert_eq!(loaded.weights, artifacts.weights);
    }

    #[test]
    fn test_missing_table_is_artifact_load() {
        let store = ArtifactStore::new(Arc::new(MemoryStorage::new()));
        let err = store.load_dictionary("absent.bin").unwrap_err();
        assert!(matches!(err, NbError::ArtifactLoad(_)));
        assert_eq!(
            err.to_string(),
            "Artifact load error: absent.bin: artifact not found"
        );
    }

    #[test]
    fn test_wrong_table_kind_rejected() {
        let store = ArtifactStore::new(Arc::new(MemoryStorage::new()));
        store
            .write_label_index("labels", &LabelIndex::from_names(["a"]).unwrap())
            .unwrap();

        let err = store.load_dictionary("labels").unwrap_err();
        assert!(err.to_string().contains("not a dictionary table"));
    }

    #[test]
    fn test_truncated_table_rejected() {
        let memory = MemoryStorage::new();
        let store = ArtifactStore::new(Arc::new(memory.clone()));
        store
            .write_dictionary("d", &sample_artifacts().dictionary)
            .unwrap();

        let mut bytes = Vec::new();
        memory.open_input("d").unwrap().read_to_end(&mut bytes).unwrap();
        memory.put("d", &bytes[..bytes.len() - 6]).unwrap();

        assert!(matches!(
            store.load_dictionary("d").unwrap_err(),
            NbError::ArtifactLoad(_)
        ));
    }

    #[test]
    fn test_label_count_mismatch_rejected() {
        let artifacts = sample_artifacts();
        let err = ModelArtifacts::new(
            artifacts.dictionary,
            artifacts.document_frequency,
            LabelIndex::from_names(["only"]).unwrap(),
            artifacts.weights,
        )
        .unwrap_err();
        assert!(err.to_string().contains("label index has 1"));
    }
}
