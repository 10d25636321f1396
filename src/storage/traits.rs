//! Storage abstraction trait and common types.

use std::io::{Read, Write};

use crate::error::{NbError, Result};

/// A trait for storage backends that can store and retrieve artifact data.
///
/// This provides a pluggable interface for different storage implementations
/// like the file system or memory.
pub trait Storage: Send + Sync + std::fmt::Debug {
    /// Open a file for reading.
    fn open_input(&self, name: &str) -> Result<Box<dyn StorageInput>>;

    /// Create a file for writing, truncating any previous content.
    fn create_output(&self, name: &str) -> Result<Box<dyn StorageOutput>>;

    /// Check if a file exists.
    fn file_exists(&self, name: &str) -> bool;
}

/// A trait for reading data from storage.
pub trait StorageInput: Read + Send + std::fmt::Debug {
    /// Get the size of the input stream.
    fn size(&self) -> Result<u64>;
}

/// A trait for writing data to storage.
pub trait StorageOutput: Write + Send + std::fmt::Debug {
    /// Flush and sync the output to storage.
    fn flush_and_sync(&mut self) -> Result<()>;

    /// Get the current position in the output stream.
    fn position(&self) -> u64;

    /// Close the output stream, making its content visible to readers.
    fn close(&mut self) -> Result<()>;
}

impl StorageInput for Box<dyn StorageInput> {
    fn size(&self) -> Result<u64> {
        self.as_ref().size()
    }
}

impl StorageOutput for Box<dyn StorageOutput> {
    fn flush_and_sync(&mut self) -> Result<()> {
        self.as_mut().flush_and_sync()
    }

    fn position(&self) -> u64 {
        self.as_ref().position()
    }

    fn close(&mut self) -> Result<()> {
        self.as_mut().close()
    }
}

/// Configuration for storage backends.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Buffer size for I/O operations.
    pub buffer_size: usize,

    /// Whether to sync writes immediately.
    pub sync_writes: bool,

    /// Refuse to create files and directories.
    pub read_only: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            buffer_size: 65536, // 64KB
            sync_writes: false,
            read_only: false,
        }
    }
}

impl StorageConfig {
    /// Configuration used when opening artifact locations for reading.
    pub fn read_only() -> Self {
        StorageConfig {
            read_only: true,
            ..Default::default()
        }
    }
}

/// Error types specific to storage operations.
#[derive(Debug, Clone)]
pub enum StorageError {
    /// File not found.
    FileNotFound(String),

    /// Permission denied.
    PermissionDenied(String),

    /// I/O error.
    IoError(String),

    /// Write attempted on read-only storage.
    ReadOnly(String),

    /// A lock guarding in-memory state was poisoned.
    Poisoned,
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::FileNotFound(name) => write!(f, "File not found: {name}"),
            StorageError::PermissionDenied(name) => write!(f, "Permission denied: {name}"),
            StorageError::IoError(msg) => write!(f, "I/O error: {msg}"),
            StorageError::ReadOnly(name) => write!(f, "Storage is read-only: {name}"),
            StorageError::Poisoned => write!(f, "Storage lock poisoned"),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<StorageError> for NbError {
    fn from(err: StorageError) -> Self {
        NbError::storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_config_default() {
        let config = StorageConfig::default();

        assert_eq!(config.buffer_size, 65536);
        assert!(!config.sync_writes);
        assert!(!config.read_only);
        assert!(StorageConfig::read_only().read_only);
    }

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::FileNotFound("model.bin".to_string());
        assert_eq!(err.to_string(), "File not found: model.bin");

        let err = StorageError::ReadOnly("model.bin".to_string());
        assert_eq!(err.to_string(), "Storage is read-only: model.bin");

        let err: NbError = StorageError::Poisoned.into();
        assert_eq!(err.to_string(), "Storage error: Storage lock poisoned");
    }
}
