//! livetagger - Tag audio samples for the Ableton Live browser
//!
//! Reads and writes the XMP sidecar documents Ableton Live keeps in each
//! folder's `Ableton Folder Info` directory, adding and removing per-file
//! keyword tags while preserving everything else in the document.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::LiveTaggerError;
