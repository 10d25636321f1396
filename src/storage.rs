//! Storage abstraction layer for artifact tables.
//!
//! Artifacts are addressed by name inside a [`Storage`] backend. The file
//! backend roots names at a directory; the memory backend keeps everything in
//! a map and is used by tests and by processes that embed their models.

pub mod file;
pub mod memory;
pub mod structured;
pub mod traits;

// Re-export commonly used types
pub use file::*;
pub use memory::*;
pub use structured::*;
pub use traits::*;
