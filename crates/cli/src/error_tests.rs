// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[test]
fn cyclic_dependency_display_names_every_node() {
    let err = Error::CyclicDependency {
        cycle: vec!["a".into(), "b".into(), "a".into()],
    };
    assert_eq!(err.to_string(), "cyclic dependency: a -> b -> a");
}

#[test]
fn unknown_dependency_display_names_unit_and_name() {
    let err = Error::UnknownDependency {
        unit: "com.example/check/1".into(),
        name: "ttFont".into(),
    };
    let msg = err.to_string();
    assert!(msg.contains("ttFont"));
    assert!(msg.contains("com.example/check/1"));
}

#[test]
fn config_error_display() {
    let err = Error::Config {
        message: "invalid version".into(),
        path: Some(PathBuf::from("fontcheck.toml")),
    };
    assert!(err.to_string().contains("invalid version"));
}

#[parameterized(
    duplicate = { Error::DuplicateIdentifier { id: "x".into() }, ExitCode::ConfigError },
    not_found = { Error::NotFound { id: "x".into() }, ExitCode::ConfigError },
    unknown = { Error::UnknownDependency { unit: "x".into(), name: "y".into() }, ExitCode::ConfigError },
    cycle = { Error::CyclicDependency { cycle: vec!["x".into()] }, ExitCode::ConfigError },
    config = { Error::Config { message: "x".into(), path: None }, ExitCode::ConfigError },
    argument = { Error::Argument("x".into()), ExitCode::ConfigError },
    internal = { Error::Internal("x".into()), ExitCode::InternalError },
)]
fn exit_code_mapping(err: Error, expected: ExitCode) {
    assert_eq!(ExitCode::from(&err), expected);
}
