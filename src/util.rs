//! Shared utility modules used across nbclassify components.

pub mod varint;
