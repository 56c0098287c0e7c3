// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test helpers for behavioral specifications.
//!
//! Provides a small DSL for building throwaway font projects and running
//! the fontcheck binary against them.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub use assert_cmd::prelude::*;
pub use predicates;
pub use predicates::prelude::{Predicate, PredicateBooleanExt};
use std::marker::PhantomData;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Trait for converting into a string predicate.
/// Allows passing `&str` (as contains) or any `Predicate<str>`.
pub trait IntoStrPredicate<P: Predicate<str>> {
    fn into_predicate(self) -> P;
}

impl IntoStrPredicate<predicates::str::ContainsPredicate> for &str {
    fn into_predicate(self) -> predicates::str::ContainsPredicate {
        predicates::str::contains(self)
    }
}

impl<P: Predicate<str>> IntoStrPredicate<P> for P {
    fn into_predicate(self) -> P {
        self
    }
}

/// Returns a Command running the fontcheck binary with a clean environment.
pub fn fontcheck_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fontcheck"));
    for var in ["FONTCHECK_CONFIG", "FONTCHECK_LOG", "NO_COLOR", "COLOR", "CI"] {
        cmd.env_remove(var);
    }
    cmd
}

/// An sfnt header declaring zero tables.
pub fn empty_sfnt() -> Vec<u8> {
    let mut data = vec![0x00, 0x01, 0x00, 0x00];
    data.extend_from_slice(&[0u8; 8]);
    data
}

/// A temporary font project rooted at its own git root.
pub struct Project {
    dir: TempDir,
}

#[allow(dead_code)]
impl Project {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join(".git")).unwrap();
        Self { dir }
    }

    /// Add a font file holding an empty table directory.
    pub fn font(self, name: &str) -> Self {
        std::fs::write(self.dir.path().join(name), empty_sfnt()).unwrap();
        self
    }

    /// Add an arbitrary file.
    pub fn file(self, name: &str, content: &str) -> Self {
        std::fs::write(self.dir.path().join(name), content).unwrap();
        self
    }

    /// Add fontcheck.toml.
    pub fn config(self, content: &str) -> Self {
        self.file("fontcheck.toml", content)
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// `fontcheck check` in the project directory.
    pub fn check(&self) -> CheckBuilder<Text> {
        CheckBuilder {
            dir: self.path().to_path_buf(),
            args: Vec::new(),
            envs: Vec::new(),
            _mode: PhantomData,
        }
    }

    /// `fontcheck list` in the project directory.
    pub fn list(&self) -> Command {
        let mut cmd = fontcheck_cmd();
        cmd.arg("list").current_dir(self.path());
        cmd
    }
}

/// Typestate markers for output mode
pub struct Text;
pub struct Json;

/// Check command builder for fluent test assertions
pub struct CheckBuilder<Mode = Text> {
    dir: std::path::PathBuf,
    args: Vec<String>,
    envs: Vec<(String, String)>,
    _mode: PhantomData<Mode>,
}

#[allow(dead_code)]
impl<Mode: 'static> CheckBuilder<Mode> {
    /// Add CLI arguments
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Set environment variable
    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.envs.push((key.to_string(), value.to_string()));
        self
    }

    fn command(self) -> Command {
        let is_json = std::any::TypeId::of::<Mode>() == std::any::TypeId::of::<Json>();
        let mut cmd = fontcheck_cmd();
        cmd.arg("check");
        if is_json {
            cmd.args(["-o", "json"]);
        }
        cmd.args(&self.args);
        cmd.current_dir(&self.dir);
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }
        cmd
    }
}

#[allow(dead_code)]
impl CheckBuilder<Text> {
    pub fn json(self) -> CheckBuilder<Json> {
        CheckBuilder {
            dir: self.dir,
            args: self.args,
            envs: self.envs,
            _mode: PhantomData,
        }
    }

    pub fn passes(self) -> RunAssert {
        run_exits(self.command(), 0)
    }

    pub fn fails(self) -> RunAssert {
        run_exits(self.command(), 1)
    }

    pub fn exits(self, code: i32) -> RunAssert {
        run_exits(self.command(), code)
    }
}

#[allow(dead_code)]
impl CheckBuilder<Json> {
    pub fn passes(self) -> ReportJson {
        ReportJson::new(&run_exits(self.command(), 0).output.stdout)
    }

    pub fn fails(self) -> ReportJson {
        ReportJson::new(&run_exits(self.command(), 1).output.stdout)
    }
}

fn run_exits(mut cmd: Command, code: i32) -> RunAssert {
    let output = cmd.output().expect("command should run");
    assert_eq!(
        output.status.code(),
        Some(code),
        "expected exit code {}, got {:?}\nstdout: {}\nstderr: {}",
        code,
        output.status.code(),
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    RunAssert { output }
}

/// Parsed JSON report
pub struct ReportJson {
    root: serde_json::Value,
}

#[allow(dead_code)]
impl ReportJson {
    fn new(stdout: &[u8]) -> Self {
        Self {
            root: serde_json::from_slice(stdout).expect("valid JSON"),
        }
    }

    pub fn value(&self) -> &serde_json::Value {
        &self.root
    }

    /// Every check in every section, in report order.
    pub fn checks(&self) -> Vec<&serde_json::Value> {
        self.root["sections"]
            .as_array()
            .expect("sections array")
            .iter()
            .flat_map(|s| s["checks"].as_array().expect("checks array"))
            .collect()
    }

    pub fn check(&self, id: &str) -> &serde_json::Value {
        self.checks()
            .into_iter()
            .find(|c| c["id"] == id)
            .unwrap_or_else(|| panic!("check {} not in report", id))
    }

    /// Severities per invocation of one check.
    pub fn severities(&self, id: &str) -> Vec<Vec<String>> {
        self.check(id)["invocations"]
            .as_array()
            .expect("invocations array")
            .iter()
            .map(|inv| {
                inv["outcomes"]
                    .as_array()
                    .expect("outcomes array")
                    .iter()
                    .map(|o| o["severity"].as_str().expect("severity").to_string())
                    .collect()
            })
            .collect()
    }
}

/// Result of a run for chaining assertions
pub struct RunAssert {
    output: std::process::Output,
}

#[allow(dead_code)]
impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    /// Assert stdout equals expected (with diff on failure)
    pub fn stdout_eq(self, expected: &str) -> Self {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        similar_asserts::assert_eq!(stdout, expected);
        self
    }

    pub fn stdout_has<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        assert!(
            predicate.into_predicate().eval(&stdout),
            "stdout predicate failed:\n{}",
            stdout
        );
        self
    }

    pub fn stdout_lacks<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        assert!(
            !predicate.into_predicate().eval(&stdout),
            "stdout should NOT match predicate:\n{}",
            stdout
        );
        self
    }

    pub fn stderr_has<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stderr = String::from_utf8_lossy(&self.output.stderr);
        assert!(
            predicate.into_predicate().eval(&stderr),
            "stderr predicate failed:\n{}",
            stderr
        );
        self
    }
}
