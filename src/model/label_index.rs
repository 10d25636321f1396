//! Label index: label-id → label name.

use std::collections::BTreeMap;

use crate::error::{NbError, Result};
use crate::model::{LABEL_INDEX_MAGIC, read_count, read_header, write_header};
use crate::storage::{StorageInput, StorageOutput, StructReader, StructWriter};
use crate::util::varint::to_u32;

/// Names of the labels a model can predict, keyed by dense ids `0..n`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelIndex {
    labels: BTreeMap<u32, String>,
}

impl LabelIndex {
    /// Assign ids `0..n` to `names` in order.
    pub fn from_names<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_entries(
            names
                .into_iter()
                .enumerate()
                .map(|(id, name)| (id as u32, name)),
        )
    }

    /// Build an index from `(label_id, name)` pairs.
    ///
    /// Ids must be unique and together form the range `0..n`.
    pub fn from_entries<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u32, S)>,
        S: Into<String>,
    {
        let mut labels = BTreeMap::new();
        for (label_id, name) in entries {
            if labels.insert(label_id, name.into()).is_some() {
                return Err(NbError::artifact_load(format!(
                    "duplicate label-id {label_id} in label index"
                )));
            }
        }

        if let Some((&last, _)) = labels.last_key_value()
            && last as usize + 1 != labels.len()
        {
            return Err(NbError::artifact_load(format!(
                "label ids are not dense: {} labels but highest id is {last}",
                labels.len()
            )));
        }

        Ok(LabelIndex { labels })
    }

    /// Name of `label_id`.
    pub fn name(&self, label_id: u32) -> Option<&str> {
        self.labels.get(&label_id).map(String::as_str)
    }

    /// Id of the label called `name`.
    pub fn id_of(&self, name: &str) -> Option<u32> {
        self.labels
            .iter()
            .find(|(_, label)| label.as_str() == name)
            .map(|(id, _)| *id)
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Iterate over `(label_id, name)` in id order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.labels.iter().map(|(id, name)| (*id, name.as_str()))
    }

    /// Write the label-index table body.
    pub fn write_to_storage<W: StorageOutput>(&self, writer: &mut StructWriter<W>) -> Result<()> {
        write_header(writer, LABEL_INDEX_MAGIC)?;

        writer.write_varint(self.labels.len() as u64)?;
        for (label_id, name) in &self.labels {
            writer.write_varint(*label_id as u64)?;
            writer.write_string(name)?;
        }

        Ok(())
    }

    /// Read a label-index table body.
    pub fn read_from_storage<R: StorageInput>(reader: &mut StructReader<R>) -> Result<Self> {
        read_header(reader, LABEL_INDEX_MAGIC, "label-index")?;

        let count = read_count(reader, 2)?;
        let mut entries = Vec::with_capacity(count);
        for _ in 0..count {
            let label_id = to_u32(reader.read_varint()?)?;
            let name = reader.read_string()?;
            entries.push((label_id, name));
        }

        Self::from_entries(entries)
    }
}
