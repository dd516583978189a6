//! Integration tests for remove and remove-all commands

#![allow(deprecated)]

use livetagger::domain::sample::folder_metadata_path;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

mod common;
use common::{
    create_samples, livetagger_cmd, read_metadata, tags_of, write_metadata, MALFORMED, TAGGED,
};

#[test]
fn test_remove_tags_commit() {
    let temp = TempDir::new().unwrap();
    create_samples(temp.path(), &["bd1.wav", "bd2.wav"]);
    write_metadata(temp.path(), TAGGED);

    livetagger_cmd()
        .arg("remove")
        .arg("Creator|x")
        .arg("-r")
        .arg(temp.path())
        .arg("--commit")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Removed tags from bd1.wav: Creator|x",
        ))
        .stdout(predicate::str::contains(
            "Removed tags from bd2.wav: Creator|x",
        ));

    let document = read_metadata(temp.path());
    assert_eq!(tags_of(&document, "bd1.wav").unwrap(), vec!["Drums|Kick"]);
    assert_eq!(tags_of(&document, "bd2.wav").unwrap(), vec!["Drums|Kick"]);
    assert_eq!(
        tags_of(&document, "ch.wav").unwrap(),
        vec!["Drums|Hihat", "Drums|Hihat|Closed Hihat", "Creator|x"]
    );
}

#[test]
fn test_remove_last_tags_drops_entry() {
    let temp = TempDir::new().unwrap();
    create_samples(temp.path(), &["bd1.wav"]);
    write_metadata(temp.path(), TAGGED);

    livetagger_cmd()
        .arg("remove")
        .arg("Drums|Kick")
        .arg("Creator|x")
        .arg("-r")
        .arg(temp.path())
        .arg("--commit")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Removed all tags from bd1.wav: Drums|Kick, Creator|x",
        ));

    let document = read_metadata(temp.path());
    assert!(document.lookup("bd1.wav").is_none());
    assert_eq!(document.entry_count(), 2);
}

#[test]
fn test_remove_dry_run_leaves_file_alone() {
    let temp = TempDir::new().unwrap();
    create_samples(temp.path(), &["bd1.wav"]);
    let path = write_metadata(temp.path(), TAGGED);

    livetagger_cmd()
        .arg("remove")
        .arg("Creator|x")
        .arg("-r")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Would update"))
        .stdout(predicate::str::contains(
            "Re-run with --commit to apply the above changes.",
        ));

    assert_eq!(fs::read_to_string(path).unwrap(), TAGGED);
}

#[test]
fn test_remove_all_selected_by_glob() {
    let temp = TempDir::new().unwrap();
    create_samples(temp.path(), &["bd1.wav", "ch.wav"]);
    write_metadata(temp.path(), TAGGED);

    livetagger_cmd()
        .arg("remove-all")
        .arg("-r")
        .arg(temp.path())
        .arg("-i")
        .arg("ch*")
        .arg("--commit")
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed all tags from ch.wav"))
        .stdout(predicate::str::contains("bd1.wav").not());

    let document = read_metadata(temp.path());
    assert!(document.lookup("ch.wav").is_none());
    assert!(document.lookup("bd1.wav").is_some());
}

#[test]
fn test_remove_all_without_metadata_creates_nothing() {
    let temp = TempDir::new().unwrap();
    create_samples(temp.path(), &["bd1.wav"]);

    livetagger_cmd()
        .arg("remove-all")
        .arg("-r")
        .arg(temp.path())
        .arg("--commit")
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes required"));

    assert!(!folder_metadata_path(temp.path()).exists());
}

#[test]
fn test_malformed_folder_does_not_stop_others() {
    let temp = TempDir::new().unwrap();
    create_samples(temp.path(), &["broken/bd1.wav", "healthy/bd1.wav"]);
    let broken = write_metadata(&temp.path().join("broken"), MALFORMED);
    write_metadata(&temp.path().join("healthy"), TAGGED);

    livetagger_cmd()
        .arg("remove-all")
        .arg("-r")
        .arg(temp.path())
        .arg("-i")
        .arg("**/*")
        .arg("--commit")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Error: Failed to process"))
        .stdout(predicate::str::contains("Removed all tags from bd1.wav"))
        .stderr(predicate::str::contains("1 folder(s) could not be processed"));

    assert_eq!(fs::read_to_string(broken).unwrap(), MALFORMED);
    let healthy = read_metadata(&temp.path().join("healthy"));
    assert!(healthy.lookup("bd1.wav").is_none());
}
