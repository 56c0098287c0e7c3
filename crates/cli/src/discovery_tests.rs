// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn finds_config_in_current_dir() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join(FILE_NAME);
    fs::write(&config_path, "version = 1\n").unwrap();

    let found = find_config(dir.path());
    assert_eq!(found, Some(config_path));
}

#[test]
fn finds_config_in_parent_dir() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join(FILE_NAME);
    fs::write(&config_path, "version = 1\n").unwrap();

    let subdir = dir.path().join("fonts");
    fs::create_dir(&subdir).unwrap();

    let found = find_config(&subdir);
    assert_eq!(found, Some(config_path));
}

#[test]
fn stops_at_git_root() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join(".git")).unwrap();
    let subdir = dir.path().join("fonts");
    fs::create_dir(&subdir).unwrap();

    assert_eq!(find_config(&subdir), None);
}

#[test]
fn finds_config_at_git_root() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join(".git")).unwrap();
    let config_path = dir.path().join(FILE_NAME);
    fs::write(&config_path, "version = 1\n").unwrap();
    let subdir = dir.path().join("fonts");
    fs::create_dir(&subdir).unwrap();

    assert_eq!(find_config(&subdir), Some(config_path));
}

#[test]
fn explicit_path_wins_over_discovery() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join(".git")).unwrap();
    fs::write(dir.path().join(FILE_NAME), "version = 1\n").unwrap();
    let other = dir.path().join("other.toml");
    fs::write(&other, "version = 1\n").unwrap();

    let resolved = resolve_config(Some(&other), dir.path()).unwrap();
    assert_eq!(resolved, Some(other));
}

#[test]
fn missing_explicit_path_is_config_error() {
    let dir = tempdir().unwrap();
    let err = resolve_config(Some(&dir.path().join("nope.toml")), dir.path()).unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
}

#[test]
fn no_config_resolves_to_none() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join(".git")).unwrap();
    assert_eq!(resolve_config(None, dir.path()).unwrap(), None);
}
