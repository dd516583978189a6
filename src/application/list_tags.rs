//! List tags use case

use crate::domain::sample::folder_metadata_path;
use crate::domain::FileEntry;
use crate::error::Result;
use crate::infrastructure::{
    FileSystemRepository, MetadataRepository, MetadataStore, SampleFolders,
};
use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Tags of the selected files in one folder
#[derive(Debug)]
pub struct FolderTags {
    pub folder: PathBuf,
    /// One entry per selected file, in scan order; untagged files have no tags
    pub files: anyhow::Result<Vec<FileEntry>>,
}

/// Service for reading the tags of sample files without modifying anything.
pub struct ListTagsService<R = FileSystemRepository> {
    store: MetadataStore<R>,
}

impl<R: MetadataRepository> ListTagsService<R> {
    /// Create a new list tags service.
    pub fn new(store: MetadataStore<R>) -> Self {
        Self { store }
    }

    /// Look up every selected file in its folder's metadata.
    pub fn execute(&self, folders: &SampleFolders) -> Vec<FolderTags> {
        folders
            .iter()
            .map(|(folder, files)| {
                let result = self
                    .read_folder(folder, files)
                    .with_context(|| format!("Failed to read tags in {}", folder.display()));
                if let Err(error) = &result {
                    warn!("{:#}", error);
                }
                FolderTags {
                    folder: folder.clone(),
                    files: result,
                }
            })
            .collect()
    }

    fn read_folder(&self, folder: &Path, files: &[String]) -> Result<Vec<FileEntry>> {
        let metadata_path = folder_metadata_path(folder);

        if !self.store.exists(&metadata_path) {
            debug!("No metadata at {}", metadata_path.display());
            return Ok(files.iter().map(|file| untagged(file)).collect());
        }

        let document = self.store.load(&metadata_path)?;
        Ok(files
            .iter()
            .map(|file| document.lookup(file).unwrap_or_else(|| untagged(file)))
            .collect())
    }
}

fn untagged(path: &str) -> FileEntry {
    FileEntry {
        path: path.to_string(),
        tags: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const TAGGED: &str = include_str!("../../tests/fixtures/tagged.xmp");

    fn select(folder: &Path, files: &[&str]) -> SampleFolders {
        let mut folders = SampleFolders::new();
        folders.insert(
            folder.to_path_buf(),
            files.iter().map(|f| f.to_string()).collect(),
        );
        folders
    }

    #[test]
    fn lists_tags_from_existing_metadata() {
        let temp = TempDir::new().unwrap();
        let path = folder_metadata_path(temp.path());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, TAGGED).unwrap();

        let service = ListTagsService::new(MetadataStore::new(FileSystemRepository));
        let listing = service.execute(&select(temp.path(), &["ch.wav", "new.wav"]));

        let files = listing[0].files.as_ref().unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(
            files[0].tags,
            vec!["Drums|Hihat", "Drums|Hihat|Closed Hihat", "Creator|x"]
        );
        assert_eq!(files[1].path, "new.wav");
        assert!(files[1].tags.is_empty());
    }

    #[test]
    fn folder_without_metadata_lists_untagged_files() {
        let temp = TempDir::new().unwrap();

        let service = ListTagsService::new(MetadataStore::new(FileSystemRepository));
        let listing = service.execute(&select(temp.path(), &["bd1.wav"]));

        let files = listing[0].files.as_ref().unwrap();
        assert!(files[0].tags.is_empty());
        assert!(!folder_metadata_path(temp.path()).exists());
    }

    #[test]
    fn malformed_metadata_is_reported_per_folder() {
        let temp = TempDir::new().unwrap();
        let path = folder_metadata_path(temp.path());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "<x:xmpmeta xmlns:x=\"adobe:ns:meta/\"/>").unwrap();

        let service = ListTagsService::new(MetadataStore::new(FileSystemRepository));
        let listing = service.execute(&select(temp.path(), &["bd1.wav"]));

        assert!(listing[0].files.is_err());
    }
}
