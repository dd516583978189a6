#![allow(dead_code)]

use assert_cmd::Command;
use livetagger::domain::sample::folder_metadata_path;
use livetagger::domain::MetadataDocument;
use std::fs;
use std::path::{Path, PathBuf};

pub const TAGGED: &str = include_str!("../fixtures/tagged.xmp");
pub const MALFORMED: &str = include_str!("../fixtures/malformed.xmp");

pub fn livetagger_cmd() -> Command {
    let mut cmd = Command::cargo_bin("livetagger").unwrap();
    cmd.env_remove("LIVETAGGER_CONFIG");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Create empty sample files under `root`, creating subfolders as needed.
pub fn create_samples(root: &Path, files: &[&str]) {
    for file in files {
        let path = root.join(file);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }
}

/// Write a folder metadata document for `folder`, returning its path.
pub fn write_metadata(folder: &Path, contents: &str) -> PathBuf {
    let path = folder_metadata_path(folder);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, contents).unwrap();
    path
}

pub fn read_metadata(folder: &Path) -> MetadataDocument {
    let data = fs::read(folder_metadata_path(folder)).unwrap();
    MetadataDocument::from_bytes(&data).unwrap()
}

pub fn tags_of(document: &MetadataDocument, file: &str) -> Option<Vec<String>> {
    document.lookup(file).map(|entry| entry.tags)
}
