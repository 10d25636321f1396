//! Term dictionary: the trained vocabulary.

use ahash::AHashMap;

use crate::error::{NbError, Result};
use crate::model::{DICTIONARY_MAGIC, read_count, read_header, write_header};
use crate::storage::{StorageInput, StorageOutput, StructReader, StructWriter};
use crate::util::varint::to_u32;

/// Mapping from term text to its unique term-id.
///
/// Term-ids need not be dense, but no two terms share an id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    terms: AHashMap<String, u32>,
}

impl Dictionary {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dictionary from `(term, term_id)` pairs.
    ///
    /// Fails when a term or a term-id appears twice.
    pub fn from_entries<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        let mut dictionary = Dictionary::new();
        let mut seen_ids = ahash::AHashSet::new();

        for (term, term_id) in entries {
            let term = term.into();
            if !seen_ids.insert(term_id) {
                return Err(NbError::artifact_load(format!(
                    "duplicate term-id {term_id} in dictionary"
                )));
            }
            if dictionary.terms.contains_key(&term) {
                return Err(NbError::artifact_load(format!(
                    "duplicate term {term:?} in dictionary"
                )));
            }
            dictionary.terms.insert(term, term_id);
        }

        Ok(dictionary)
    }

    /// Look up the term-id of `term`.
    pub fn get(&self, term: &str) -> Option<u32> {
        self.terms.get(term).copied()
    }

    /// Check whether `term` is in the vocabulary.
    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains_key(term)
    }

    /// Number of terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Iterate over `(term, term_id)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.terms.iter().map(|(term, id)| (term.as_str(), *id))
    }

    /// Write the dictionary table body. Entries are ordered by term-id.
    pub fn write_to_storage<W: StorageOutput>(&self, writer: &mut StructWriter<W>) -> Result<()> {
        write_header(writer, DICTIONARY_MAGIC)?;

        let mut entries: Vec<(&str, u32)> = self.iter().collect();
        entries.sort_by_key(|(_, id)| *id);

        writer.write_varint(entries.len() as u64)?;
        for (term, term_id) in entries {
            writer.write_string(term)?;
            writer.write_varint(term_id as u64)?;
        }

        Ok(())
    }

    /// Read a dictionary table body.
    pub fn read_from_storage<R: StorageInput>(reader: &mut StructReader<R>) -> Result<Self> {
        read_header(reader, DICTIONARY_MAGIC, "dictionary")?;

        // string length byte + id byte
        let count = read_count(reader, 2)?;
        let mut entries = Vec::with_capacity(count);
        for _ in 0..count {
            let term = reader.read_string()?;
            let term_id = to_u32(reader.read_varint()?)?;
            entries.push((term, term_id));
        }

        Self::from_entries(entries)
    }
}
