//! Infrastructure layer - External I/O and persistence

pub mod config;
pub mod scanner;
pub mod store;

pub use config::Config;
pub use scanner::{SampleFolders, SampleScanner};
pub use store::{
    DocumentOrigin, FileSystemRepository, MetadataRepository, MetadataStore, PersistOutcome,
};
