//! `launchutil install` end-to-end: source checks, overwrite warnings,
//! byte-identical copies.

#![allow(clippy::expect_used)]

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn launchutil(dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("launchutil"));
    cmd.env("NO_COLOR", "1")
        .env("HOME", dir.path())
        .current_dir(dir.path());
    cmd
}

fn agents_dir(dir: &TempDir) -> PathBuf {
    dir.path().join("Library").join("LaunchAgents")
}

fn write_source(dir: &TempDir) -> Vec<u8> {
    let content = b"<?xml version=\"1.0\"?><plist version=\"1.0\"><dict/></plist>\n".to_vec();
    fs::write(dir.path().join("com.example.daily.plist"), &content).expect("write source");
    content
}

#[test]
fn missing_source_is_fatal_with_a_distinct_code() {
    let dir = tempfile::tempdir().expect("tempdir");
    launchutil(&dir)
        .args(["install", "com.example.daily"])
        .assert()
        .code(66)
        .stderr(predicate::str::contains(
            "\"com.example.daily.plist\" does not exist.",
        ));
}

#[test]
fn dry_run_prints_the_copy_without_installing() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_source(&dir);
    fs::create_dir_all(agents_dir(&dir)).expect("create agents dir");

    launchutil(&dir)
        .args(["install", "com.example.daily"])
        .assert()
        .success()
        .stderr(predicate::str::contains("command: cp com.example.daily.plist"))
        .stderr(predicate::str::contains(
            "add -x or --execute flag to execute command.",
        ));

    assert!(!agents_dir(&dir).join("com.example.daily.plist").exists());
}

#[test]
fn apply_copies_the_descriptor_byte_identically() {
    let dir = tempfile::tempdir().expect("tempdir");
    let content = write_source(&dir);
    fs::create_dir_all(agents_dir(&dir)).expect("create agents dir");

    launchutil(&dir)
        .args(["install", "-x", "com.example.daily"])
        .assert()
        .success();

    let installed = agents_dir(&dir).join("com.example.daily.plist");
    assert_eq!(fs::read(&installed).expect("read installed"), content);
}

#[test]
fn apply_overwrite_is_preceded_by_a_warning() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_source(&dir);
    fs::create_dir_all(agents_dir(&dir)).expect("create agents dir");
    let installed = agents_dir(&dir).join("com.example.daily.plist");
    fs::write(&installed, b"stale").expect("write installed");

    launchutil(&dir)
        .args(["install", "-x", "com.example.daily"])
        .assert()
        .success()
        .stderr(predicate::str::contains("WARNING: overwriting"));

    assert_ne!(fs::read(&installed).expect("read installed"), b"stale");
}

#[test]
fn dry_run_overwrite_warns_without_touching_the_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_source(&dir);
    fs::create_dir_all(agents_dir(&dir)).expect("create agents dir");
    let installed = agents_dir(&dir).join("com.example.daily.plist");
    fs::write(&installed, b"stale").expect("write installed");

    launchutil(&dir)
        .args(["install", "com.example.daily"])
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "WARNING: this command will overwrite",
        ));

    assert_eq!(fs::read(&installed).expect("read installed"), b"stale");
}

#[test]
fn service_may_be_given_as_the_plist_file_name() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_source(&dir);
    fs::create_dir_all(agents_dir(&dir)).expect("create agents dir");

    launchutil(&dir)
        .args(["install", "-x", "com.example.daily.plist"])
        .assert()
        .success();

    assert!(agents_dir(&dir).join("com.example.daily.plist").exists());
}
