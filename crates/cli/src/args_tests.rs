// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;

#[test]
fn typed_accessors_return_values() {
    let args = Args::new(Iterargs::new().with("font", 0))
        .with("style", "Regular")
        .with("weight", 400i64)
        .with("font", std::path::PathBuf::from("Foo-Regular.ttf"));

    assert_eq!(args.text("style").unwrap(), "Regular");
    assert_eq!(args.int("weight").unwrap(), 400);
    assert_eq!(args.path("font").unwrap(), Path::new("Foo-Regular.ttf"));
    assert_eq!(args.iterargs().get("font"), Some(0));
}

#[test]
fn missing_input_is_an_error() {
    let args = Args::default();
    let err = args.get("licenses").unwrap_err();
    assert!(err.to_string().contains("licenses"));
}

#[test]
fn kind_mismatch_names_both_kinds() {
    let args = Args::default().with("style", "Regular");
    let err = args.list("style").unwrap_err();
    let msg = format!("{err:#}");
    assert!(msg.contains("text"), "{msg}");
    assert!(msg.contains("list"), "{msg}");
}
