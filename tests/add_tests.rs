//! Integration tests for add command

#![allow(deprecated)]

use livetagger::domain::sample::folder_metadata_path;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

mod common;
use common::{create_samples, livetagger_cmd, read_metadata, tags_of, write_metadata, TAGGED};

#[test]
fn test_add_dry_run_writes_nothing() {
    let temp = TempDir::new().unwrap();
    create_samples(temp.path(), &["bd1.wav", "bd2.wav"]);

    livetagger_cmd()
        .arg("add")
        .arg("Drums|Kick")
        .arg("--root")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Added tags to bd1.wav: Drums|Kick"))
        .stdout(predicate::str::contains("Added tags to bd2.wav: Drums|Kick"))
        .stdout(predicate::str::contains(
            "Re-run with --commit to apply the above changes.",
        ));

    assert!(!folder_metadata_path(temp.path()).exists());
}

#[test]
fn test_add_commit_creates_metadata() {
    let temp = TempDir::new().unwrap();
    create_samples(temp.path(), &["bd1.wav", "bd2.wav"]);

    livetagger_cmd()
        .arg("add")
        .arg("Drums|Kick")
        .arg("Creator|x")
        .arg("-r")
        .arg(temp.path())
        .arg("--commit")
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated 1 folder(s)."));

    let document = read_metadata(temp.path());
    assert_eq!(document.entry_count(), 2);
    assert_eq!(
        tags_of(&document, "bd1.wav").unwrap(),
        vec!["Drums|Kick", "Creator|x"]
    );
    assert_eq!(
        document.property("CreatorTool").as_deref(),
        Some("Updated by LiveTagger")
    );

    let written = fs::read_to_string(folder_metadata_path(temp.path())).unwrap();
    assert!(written.contains("<ablFR:filePath>bd2.wav</ablFR:filePath>"));
    assert!(written.contains("application/vnd.ableton.folder"));
}

#[test]
fn test_add_to_existing_metadata_keeps_backup() {
    let temp = TempDir::new().unwrap();
    create_samples(temp.path(), &["ch.wav"]);
    let path = write_metadata(temp.path(), TAGGED);

    livetagger_cmd()
        .arg("add")
        .arg("Drums|Hihat|Open Hihat")
        .arg("-r")
        .arg(temp.path())
        .arg("-c")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Added tags to ch.wav: Drums|Hihat|Open Hihat",
        ))
        .stdout(predicate::str::contains("Backed up to"));

    let backup = path.with_file_name("dc66a3fa-0fe1-5352-91cf-3ec237e9ee90.xmp.bak");
    assert_eq!(fs::read_to_string(backup).unwrap(), TAGGED);

    let document = read_metadata(temp.path());
    assert_eq!(
        tags_of(&document, "ch.wav").unwrap(),
        vec![
            "Drums|Hihat",
            "Drums|Hihat|Closed Hihat",
            "Creator|x",
            "Drums|Hihat|Open Hihat"
        ]
    );
    // Entries for files that were not selected are untouched
    assert_eq!(
        tags_of(&document, "bd1.wav").unwrap(),
        vec!["Drums|Kick", "Creator|x"]
    );
    assert!(document.property("MetadataDate").is_some());
}

#[test]
fn test_add_existing_tags_changes_nothing() {
    let temp = TempDir::new().unwrap();
    create_samples(temp.path(), &["bd1.wav"]);
    let path = write_metadata(temp.path(), TAGGED);

    livetagger_cmd()
        .arg("add")
        .arg("Drums|Kick")
        .arg("-r")
        .arg(temp.path())
        .arg("--commit")
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes required"))
        .stdout(predicate::str::contains("Added tags").not());

    assert_eq!(fs::read_to_string(&path).unwrap(), TAGGED);
}

#[test]
fn test_add_skips_non_audio_files() {
    let temp = TempDir::new().unwrap();
    create_samples(temp.path(), &["bd1.wav", "notes.txt", "bd1.wav.asd"]);

    livetagger_cmd()
        .arg("add")
        .arg("Drums|Kick")
        .arg("-r")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("bd1.wav: Drums|Kick"))
        .stdout(predicate::str::contains("notes.txt").not())
        .stdout(predicate::str::contains(".asd").not())
        .stderr(predicate::str::contains(
            "Skipping notes.txt as it doesn't look like an audio file",
        ));
}

#[test]
fn test_add_recursive_include() {
    let temp = TempDir::new().unwrap();
    create_samples(temp.path(), &["kicks/bd1.wav", "hats/ch.wav", "top.wav"]);

    livetagger_cmd()
        .arg("add")
        .arg("Drums")
        .arg("-r")
        .arg(temp.path())
        .arg("--include")
        .arg("**/*.wav")
        .arg("--commit")
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated 3 folder(s)."));

    for folder in ["kicks", "hats"] {
        assert!(folder_metadata_path(&temp.path().join(folder)).exists());
    }
    assert!(folder_metadata_path(temp.path()).exists());
}

#[test]
fn test_add_no_matching_files() {
    let temp = TempDir::new().unwrap();

    livetagger_cmd()
        .arg("add")
        .arg("Drums|Kick")
        .arg("-r")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No matching sample files found"));
}

#[test]
fn test_add_rejects_blank_tag() {
    let temp = TempDir::new().unwrap();
    create_samples(temp.path(), &["bd1.wav"]);

    livetagger_cmd()
        .arg("add")
        .arg("Drums|Kick")
        .arg("   ")
        .arg("-r")
        .arg(temp.path())
        .arg("--commit")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid tag"));

    assert!(!folder_metadata_path(temp.path()).exists());
}

#[test]
fn test_add_rejects_invalid_glob() {
    let temp = TempDir::new().unwrap();

    livetagger_cmd()
        .arg("add")
        .arg("Drums|Kick")
        .arg("-r")
        .arg(temp.path())
        .arg("-i")
        .arg("[")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid include pattern"));
}

#[test]
fn test_add_missing_root_fails() {
    let temp = TempDir::new().unwrap();

    livetagger_cmd()
        .arg("add")
        .arg("Drums|Kick")
        .arg("-r")
        .arg(temp.path().join("missing"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Not a directory"));
}
