// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Resolved inputs handed to check and condition bodies.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, anyhow};

use crate::font::FontHandle;
use crate::value::{Iterargs, Value};

/// Named input values for one invocation.
///
/// Accessors return errors instead of panicking so a body can use `?` and
/// have a mismatch reported as an `ERROR` outcome.
#[derive(Debug, Clone, Default)]
pub struct Args {
    values: BTreeMap<String, Value>,
    iterargs: Iterargs,
}

impl Args {
    pub fn new(iterargs: Iterargs) -> Self {
        Self {
            values: BTreeMap::new(),
            iterargs,
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value.into());
        self
    }

    /// The iterarg bindings of this invocation.
    pub fn iterargs(&self) -> &Iterargs {
        &self.iterargs
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn get(&self, name: &str) -> anyhow::Result<&Value> {
        self.values
            .get(name)
            .ok_or_else(|| anyhow!("missing input `{name}`"))
    }

    pub fn text(&self, name: &str) -> anyhow::Result<&str> {
        let value = self.get(name)?;
        value
            .as_text()
            .with_context(|| mismatch(name, "text", value))
    }

    pub fn path(&self, name: &str) -> anyhow::Result<&Path> {
        let value = self.get(name)?;
        value
            .as_path()
            .with_context(|| mismatch(name, "path", value))
    }

    pub fn int(&self, name: &str) -> anyhow::Result<i64> {
        let value = self.get(name)?;
        value.as_int().with_context(|| mismatch(name, "int", value))
    }

    pub fn list(&self, name: &str) -> anyhow::Result<&[Value]> {
        let value = self.get(name)?;
        value
            .as_list()
            .with_context(|| mismatch(name, "list", value))
    }

    pub fn record(&self, name: &str) -> anyhow::Result<&BTreeMap<String, Value>> {
        let value = self.get(name)?;
        value
            .as_record()
            .with_context(|| mismatch(name, "record", value))
    }

    pub fn font(&self, name: &str) -> anyhow::Result<&FontHandle> {
        let value = self.get(name)?;
        value
            .as_font()
            .with_context(|| mismatch(name, "font", value))
    }
}

fn mismatch(name: &str, expected: &str, value: &Value) -> String {
    format!(
        "input `{name}` is {} but {expected} was expected",
        value.kind()
    )
}

#[cfg(test)]
#[path = "args_tests.rs"]
mod tests;
