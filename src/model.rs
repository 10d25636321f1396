//! Trained model artifacts.
//!
//! A classifier is described by four persisted tables:
//!
//! - [`Dictionary`](dictionary::Dictionary): term → term-id
//! - [`DocumentFrequency`](document_frequency::DocumentFrequency): term-id →
//!   number of training documents containing the term, plus the training
//!   document count
//! - [`LabelIndex`](label_index::LabelIndex): label-id → label name
//! - [`WeightModel`](weights::WeightModel): sparse (term-id, label-id) weights
//!   with the per-label and per-feature sums needed for smoothing
//!
//! The [`store`] module reads and writes them through a
//! [`Storage`](crate::storage::Storage) backend and bundles them into an
//! immutable [`ModelArtifacts`](store::ModelArtifacts).
//!
//! Each table is a [`StructWriter`](crate::storage::StructWriter) stream that
//! starts with a magic number and a format version and ends with a CRC32.

use crate::error::{NbError, Result};
use crate::storage::{StorageInput, StorageOutput, StructReader, StructWriter};

pub mod dictionary;
pub mod document_frequency;
pub mod label_index;
pub mod store;
pub mod weights;

pub use dictionary::Dictionary;
pub use document_frequency::DocumentFrequency;
pub use label_index::LabelIndex;
pub use store::{ArtifactPaths, ArtifactStore, ModelArtifacts};
pub use weights::{WeightModel, WeightModelBuilder};

/// Current on-disk format version shared by all tables.
pub const FORMAT_VERSION: u32 = 1;

/// Magic number of the dictionary table ("NBDI").
pub const DICTIONARY_MAGIC: u32 = 0x4E42_4449;
/// Magic number of the document-frequency table ("NBDF").
pub const DOCUMENT_FREQUENCY_MAGIC: u32 = 0x4E42_4446;
/// Magic number of the label-index table ("NBLI").
pub const LABEL_INDEX_MAGIC: u32 = 0x4E42_4C49;
/// Magic number of the weight-model table ("NBWM").
pub const WEIGHT_MODEL_MAGIC: u32 = 0x4E42_574D;

pub(crate) fn write_header<W: StorageOutput>(writer: &mut StructWriter<W>, magic: u32) -> Result<()> {
    writer.write_u32(magic)?;
    writer.write_u32(FORMAT_VERSION)
}

pub(crate) fn read_header<R: StorageInput>(
    reader: &mut StructReader<R>,
    magic: u32,
    table: &str,
) -> Result<()> {
    let found = reader.read_u32()?;
    if found != magic {
        return Err(NbError::artifact_load(format!(
            "not a {table} table (magic {found:#010x}, expected {magic:#010x})"
        )));
    }

    let version = reader.read_u32()?;
    if version != FORMAT_VERSION {
        return Err(NbError::artifact_load(format!(
            "unsupported {table} format version {version}"
        )));
    }
    Ok(())
}

/// Read a varint entry count, rejecting counts that cannot fit in the
/// remaining body given a minimum encoded entry size.
pub(crate) fn read_count<R: StorageInput>(
    reader: &mut StructReader<R>,
    min_entry_size: u64,
) -> Result<usize> {
    let count = reader.read_varint()?;
    if count.saturating_mul(min_entry_size) > reader.remaining() {
        return Err(NbError::artifact_load(format!(
            "entry count {count} exceeds table size"
        )));
    }
    usize::try_from(count).map_err(|_| NbError::artifact_load("entry count overflow"))
}
