//! Metadata persistence

use crate::domain::MetadataDocument;
use crate::error::Result;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Byte-level storage used to load and save metadata documents
pub trait MetadataRepository {
    /// Check whether a file exists at `path`
    fn exists(&self, path: &Path) -> bool;

    /// Read the raw contents of a file
    fn read(&self, path: &Path) -> Result<Vec<u8>>;

    /// Write (create or overwrite) a file
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;

    /// Copy a file, overwriting the destination
    fn copy(&self, from: &Path, to: &Path) -> Result<()>;

    /// Create a directory and any missing parents
    fn create_dir_all(&self, path: &Path) -> Result<()>;
}

/// File system implementation of MetadataRepository
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSystemRepository;

impl MetadataRepository for FileSystemRepository {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        Ok(fs::read(path)?)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        Ok(fs::write(path, contents)?)
    }

    fn copy(&self, from: &Path, to: &Path) -> Result<()> {
        fs::copy(from, to)?;
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        Ok(fs::create_dir_all(path)?)
    }
}

/// Whether a loaded document came from disk or was created empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentOrigin {
    Existing,
    Created,
}

/// What `persist` did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistOutcome {
    /// The document had no unsaved changes; nothing was written
    Unchanged,
    /// The document was written, after backing up the previous file if there was one
    Written { backup: Option<PathBuf> },
}

/// Loads and saves metadata documents through a repository
#[derive(Debug, Clone, Default)]
pub struct MetadataStore<R = FileSystemRepository> {
    repository: R,
}

impl<R: MetadataRepository> MetadataStore<R> {
    pub fn new(repository: R) -> Self {
        MetadataStore { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn exists(&self, path: &Path) -> bool {
        self.repository.exists(path)
    }

    /// Load an existing document.
    pub fn load(&self, path: &Path) -> Result<MetadataDocument> {
        let data = self.repository.read(path)?;
        MetadataDocument::from_bytes(&data)
    }

    /// Load the document at `path`, or start an empty one if there is none.
    pub fn load_or_create(&self, path: &Path) -> Result<(MetadataDocument, DocumentOrigin)> {
        if self.repository.exists(path) {
            Ok((self.load(path)?, DocumentOrigin::Existing))
        } else {
            Ok((MetadataDocument::new(), DocumentOrigin::Created))
        }
    }

    /// Save a document if it has unsaved changes.
    ///
    /// An existing file is first copied to `<path>.bak`, replacing any older
    /// backup. Parent directories are only created when there was no file.
    pub fn persist(&self, document: &mut MetadataDocument, path: &Path) -> Result<PersistOutcome> {
        if !document.is_dirty() {
            return Ok(PersistOutcome::Unchanged);
        }

        let xml = document.to_xml()?;

        let backup = if self.repository.exists(path) {
            let backup_path = backup_path(path);
            self.repository.copy(path, &backup_path)?;
            Some(backup_path)
        } else {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                self.repository.create_dir_all(parent)?;
            }
            None
        };

        self.repository.write(path, xml.as_bytes())?;
        document.mark_saved();

        Ok(PersistOutcome::Written { backup })
    }
}

/// `<path>.bak`, keeping the original extension
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".bak");
    PathBuf::from(name)
}
