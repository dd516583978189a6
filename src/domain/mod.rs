//! Domain layer - Metadata document model and tag engine

pub mod document;
pub mod sample;
pub mod tags;
pub mod vocabulary;
pub mod xml;

pub use document::{FileEntry, MetadataDocument};
pub use tags::TagEvent;
