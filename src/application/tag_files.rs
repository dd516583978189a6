//! Tag files use case
//!
//! Applies one tag operation to every folder found by the scanner: load (or
//! create) the folder's metadata, run the tag engine, stamp the XMP
//! properties when something changed, and save when committing. A folder that
//! fails is recorded in the report and the remaining folders still run.

use crate::domain::sample::folder_metadata_path;
use crate::domain::{MetadataDocument, TagEvent};
use crate::error::{LiveTaggerError, Result};
use crate::infrastructure::{
    Config, DocumentOrigin, FileSystemRepository, MetadataRepository, MetadataStore,
    PersistOutcome, SampleFolders,
};
use anyhow::Context;
use chrono::Utc;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// The change to apply to the selected files
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagOperation {
    Add(Vec<String>),
    Remove(Vec<String>),
    RemoveAll,
}

impl TagOperation {
    /// Build an add operation, rejecting empty tags.
    pub fn add(tags: Vec<String>) -> Result<Self> {
        Ok(TagOperation::Add(validate_tags(tags)?))
    }

    /// Build a remove operation, rejecting empty tags.
    pub fn remove(tags: Vec<String>) -> Result<Self> {
        Ok(TagOperation::Remove(validate_tags(tags)?))
    }

    fn apply(&self, document: &mut MetadataDocument, files: &[String]) -> Vec<TagEvent> {
        match self {
            TagOperation::Add(tags) => document.add_tags_to_files(files, tags),
            TagOperation::Remove(tags) => document.remove_tags_from_files(files, tags),
            TagOperation::RemoveAll => document.remove_all_tags_from_files(files),
        }
    }
}

fn validate_tags(tags: Vec<String>) -> Result<Vec<String>> {
    if tags.is_empty() {
        return Err(LiveTaggerError::InvalidTag(
            "at least one tag is required".to_string(),
        ));
    }

    if let Some(bad) = tags.iter().find(|tag| tag.trim().is_empty()) {
        return Err(LiveTaggerError::InvalidTag(format!(
            "'{}'. Tags cannot be empty",
            bad
        )));
    }

    Ok(tags)
}

/// What happened to one folder's metadata
#[derive(Debug)]
pub enum FolderStatus {
    /// The operation changed nothing
    Unchanged,
    /// Changes were made but not saved (dry run)
    Pending { created: bool },
    /// Changes were saved
    Saved {
        created: bool,
        backup: Option<PathBuf>,
    },
    /// The folder could not be processed
    Failed(anyhow::Error),
}

#[derive(Debug)]
pub struct FolderReport {
    pub folder: PathBuf,
    pub metadata_path: PathBuf,
    pub events: Vec<TagEvent>,
    pub status: FolderStatus,
}

#[derive(Debug)]
pub struct TagReport {
    pub commit: bool,
    pub folders: Vec<FolderReport>,
}

impl TagReport {
    pub fn failed_count(&self) -> usize {
        self.count(|status| matches!(status, FolderStatus::Failed(_)))
    }

    pub fn pending_count(&self) -> usize {
        self.count(|status| matches!(status, FolderStatus::Pending { .. }))
    }

    pub fn saved_count(&self) -> usize {
        self.count(|status| matches!(status, FolderStatus::Saved { .. }))
    }

    fn count(&self, predicate: impl Fn(&FolderStatus) -> bool) -> usize {
        self.folders
            .iter()
            .filter(|folder| predicate(&folder.status))
            .count()
    }
}

/// Service for applying tag operations to folders of samples
pub struct TagFilesService<R = FileSystemRepository> {
    store: MetadataStore<R>,
    config: Config,
}

impl<R: MetadataRepository> TagFilesService<R> {
    pub fn new(store: MetadataStore<R>, config: Config) -> Self {
        TagFilesService { store, config }
    }

    /// Apply `operation` to every folder, saving changes only when `commit` is set.
    pub fn execute(
        &self,
        folders: &SampleFolders,
        operation: &TagOperation,
        commit: bool,
    ) -> TagReport {
        let mut reports = Vec::with_capacity(folders.len());

        for (folder, files) in folders {
            info!("Processing {}", folder.display());

            let metadata_path = folder_metadata_path(folder);
            let (events, status) = match self
                .process_folder(&metadata_path, files, operation, commit)
                .with_context(|| format!("Failed to process {}", folder.display()))
            {
                Ok(result) => result,
                Err(error) => {
                    warn!("{:#}", error);
                    (Vec::new(), FolderStatus::Failed(error))
                }
            };

            reports.push(FolderReport {
                folder: folder.clone(),
                metadata_path,
                events,
                status,
            });
        }

        TagReport {
            commit,
            folders: reports,
        }
    }

    fn process_folder(
        &self,
        metadata_path: &Path,
        files: &[String],
        operation: &TagOperation,
        commit: bool,
    ) -> Result<(Vec<TagEvent>, FolderStatus)> {
        let (mut document, origin) = self.store.load_or_create(metadata_path)?;
        let created = origin == DocumentOrigin::Created;

        let events = operation.apply(&mut document, files);

        if !document.is_dirty() {
            info!("No changes required for {}", metadata_path.display());
            return Ok((events, FolderStatus::Unchanged));
        }

        self.stamp(&mut document, origin)?;

        if !commit {
            return Ok((events, FolderStatus::Pending { created }));
        }

        let status = match self.store.persist(&mut document, metadata_path)? {
            PersistOutcome::Written { backup } => {
                if let Some(backup) = &backup {
                    info!("Backup written to {}", backup.display());
                }
                info!("Metadata updated at {}", metadata_path.display());
                FolderStatus::Saved { created, backup }
            }
            PersistOutcome::Unchanged => FolderStatus::Unchanged,
        };

        Ok((events, status))
    }

    fn stamp(&self, document: &mut MetadataDocument, origin: DocumentOrigin) -> Result<()> {
        document.set_creator_tool(self.config.creator_tool.as_str())?;

        if self.config.stamp_dates {
            let now = Utc::now();
            match origin {
                DocumentOrigin::Created => document.update_create_date(now)?,
                DocumentOrigin::Existing => document.update_metadata_date(now)?,
            }
        }

        Ok(())
    }
}
