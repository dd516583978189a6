//! Sample file discovery

use crate::domain::sample::{self, FOLDER_INFO_DIR};
use crate::error::{LiveTaggerError, Result};
use globset::{GlobBuilder, GlobMatcher};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{info, warn};
use walkdir::WalkDir;

/// Sample files grouped by the folder that contains them
pub type SampleFolders = BTreeMap<PathBuf, Vec<String>>;

/// Finds sample files under a root directory that match an include glob.
///
/// The glob is matched against paths relative to the root, and `*` does not
/// cross directory separators, so the default `*` only selects files directly
/// inside the root while `**/*.wav` searches every subfolder.
#[derive(Debug, Clone)]
pub struct SampleScanner {
    root: PathBuf,
    include: GlobMatcher,
    recursive: bool,
    extensions: Vec<String>,
}

impl SampleScanner {
    pub fn new(root: impl Into<PathBuf>, include: &str, extensions: Vec<String>) -> Result<Self> {
        let glob = GlobBuilder::new(include)
            .literal_separator(true)
            .build()
            .map_err(|e| LiveTaggerError::InvalidPattern(format!("{}: {}", include, e)))?;

        Ok(SampleScanner {
            root: root.into(),
            include: glob.compile_matcher(),
            recursive: include.contains('/') || include.contains("**"),
            extensions,
        })
    }

    /// Walk the root and collect matching sample files by folder.
    pub fn scan(&self) -> Result<SampleFolders> {
        if !self.root.is_dir() {
            return Err(LiveTaggerError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Not a directory: {}", self.root.display()),
            )));
        }

        let max_depth = if self.recursive { usize::MAX } else { 1 };
        let walker = WalkDir::new(&self.root)
            .max_depth(max_depth)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0
                    || !entry.file_type().is_dir()
                    || entry.file_name() != FOLDER_INFO_DIR
            });

        let mut folders = SampleFolders::new();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable path: {}", e);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let Ok(relative) = entry.path().strip_prefix(&self.root) else {
                continue;
            };

            if !self.include.is_match(relative) || sample::is_metadata(relative) {
                continue;
            }

            if !sample::is_supported_sample_format(relative, &self.extensions) {
                info!(
                    "Skipping {} as it doesn't look like an audio file",
                    relative.display()
                );
                continue;
            }

            let (Some(parent), Some(filename)) =
                (entry.path().parent(), entry.file_name().to_str())
            else {
                continue;
            };

            folders
                .entry(parent.to_path_buf())
                .or_default()
                .push(filename.to_string());
        }

        Ok(folders)
    }
}
