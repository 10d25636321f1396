//! Document-frequency table.
//!
//! On disk the table is keyed by signed 32-bit integers; the reserved key
//! [`DOCUMENT_COUNT_KEY`] holds the total number of training documents. In
//! memory that sentinel lives in its own field so it can never be confused
//! with a term.

use ahash::AHashMap;

use crate::error::{NbError, Result};
use crate::model::{DOCUMENT_FREQUENCY_MAGIC, read_count, read_header, write_header};
use crate::storage::{StorageInput, StorageOutput, StructReader, StructWriter};

/// Reserved on-disk key holding the training document count.
pub const DOCUMENT_COUNT_KEY: i32 = -1;

/// Per-term document frequencies and the training document count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFrequency {
    frequencies: AHashMap<u32, u64>,
    document_count: u64,
}

impl DocumentFrequency {
    /// Create an empty table for a training set of `document_count` documents.
    pub fn new(document_count: u64) -> Result<Self> {
        if document_count == 0 {
            return Err(NbError::artifact_load(
                "document count must be greater than zero",
            ));
        }

        Ok(DocumentFrequency {
            frequencies: AHashMap::new(),
            document_count,
        })
    }

    /// Build a table from `(term_id, document_frequency)` pairs.
    pub fn from_entries<I>(document_count: u64, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u32, u64)>,
    {
        let mut table = Self::new(document_count)?;
        for (term_id, frequency) in entries {
            table.insert(term_id, frequency)?;
        }
        Ok(table)
    }

    /// Record the document frequency of `term_id`.
    pub fn insert(&mut self, term_id: u32, frequency: u64) -> Result<()> {
        if term_id > i32::MAX as u32 {
            return Err(NbError::artifact_load(format!(
                "term-id {term_id} does not fit the document-frequency key space"
            )));
        }
        if self.frequencies.insert(term_id, frequency).is_some() {
            return Err(NbError::artifact_load(format!(
                "duplicate document-frequency entry for term-id {term_id}"
            )));
        }
        Ok(())
    }

    /// Number of training documents containing `term_id`.
    pub fn get(&self, term_id: u32) -> Option<u64> {
        self.frequencies.get(&term_id).copied()
    }

    /// Total number of training documents.
    pub fn document_count(&self) -> u64 {
        self.document_count
    }

    /// Number of term entries (the sentinel is not counted).
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    /// Check if there are no term entries.
    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Iterate over `(term_id, document_frequency)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u64)> + '_ {
        self.frequencies.iter().map(|(id, df)| (*id, *df))
    }

    /// Write the document-frequency table body. The sentinel comes first,
    /// followed by the term entries in term-id order.
    pub fn write_to_storage<W: StorageOutput>(&self, writer: &mut StructWriter<W>) -> Result<()> {
        write_header(writer, DOCUMENT_FREQUENCY_MAGIC)?;

        let mut entries: Vec<(u32, u64)> = self.iter().collect();
        entries.sort_unstable();

        writer.write_varint(entries.len() as u64 + 1)?;
        writer.write_i32(DOCUMENT_COUNT_KEY)?;
        writer.write_u64(self.document_count)?;

        for (term_id, frequency) in entries {
            writer.write_i32(term_id as i32)?;
            writer.write_u64(frequency)?;
        }

        Ok(())
    }

    /// Read a document-frequency table body.
    pub fn read_from_storage<R: StorageInput>(reader: &mut StructReader<R>) -> Result<Self> {
        read_header(reader, DOCUMENT_FREQUENCY_MAGIC, "document-frequency")?;

        let count = read_count(reader, 12)?;
        let mut document_count = None;
        let mut frequencies = AHashMap::with_capacity(count);

        for _ in 0..count {
            let key = reader.read_i32()?;
            let value = reader.read_u64()?;

            if key == DOCUMENT_COUNT_KEY {
                if document_count.replace(value).is_some() {
                    return Err(NbError::artifact_load("duplicate document-count sentinel"));
                }
            } else if key < 0 {
                return Err(NbError::artifact_load(format!(
                    "negative document-frequency key {key}"
                )));
            } else if frequencies.insert(key as u32, value).is_some() {
                return Err(NbError::artifact_load(format!(
                    "duplicate document-frequency entry for term-id {key}"
                )));
            }
        }

        let document_count = document_count.ok_or_else(|| {
            NbError::artifact_load("document-count sentinel (key -1) is missing")
        })?;
        let mut table = Self::new(document_count)?;
        table.frequencies = frequencies;
        Ok(table)
    }
}
