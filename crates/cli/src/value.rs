// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Dynamic values flowing between subjects, conditions and checks.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use crate::font::FontHandle;

/// Named values supplied to a run (e.g. `fonts` -> list of paths).
pub type Values = BTreeMap<String, Value>;

/// A condition result or subject.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Text(String),
    Path(PathBuf),
    List(Vec<Value>),
    Record(BTreeMap<String, Value>),
    Font(Arc<FontHandle>),
}

impl Value {
    /// Build a list of paths, the usual shape of a subject collection.
    pub fn paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Value::List(paths.into_iter().map(|p| Value::Path(p.into())).collect())
    }

    /// Falsy values: `false`, `0`, empty text, empty list, empty record.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Text(s) => !s.is_empty(),
            Value::Path(p) => !p.as_os_str().is_empty(),
            Value::List(items) => !items.is_empty(),
            Value::Record(fields) => !fields.is_empty(),
            Value::Font(_) => true,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Text(_) => "text",
            Value::Path(_) => "path",
            Value::List(_) => "list",
            Value::Record(_) => "record",
            Value::Font(_) => "font",
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Paths, plus text that names a path.
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Value::Path(p) => Some(p),
            Value::Text(s) => Some(Path::new(s)),
            Value::Font(font) => Some(font.path()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Record(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn as_font(&self) -> Option<&FontHandle> {
        match self {
            Value::Font(font) => Some(font),
            _ => None,
        }
    }

    /// Short label for reports (file path for subjects).
    pub fn label(&self) -> String {
        match self {
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Text(s) => s.clone(),
            Value::Path(p) => p.display().to_string(),
            Value::List(items) => format!("[{} items]", items.len()),
            Value::Record(fields) => format!("{{{} fields}}", fields.len()),
            Value::Font(font) => font.path().display().to_string(),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<PathBuf> for Value {
    fn from(p: PathBuf) -> Self {
        Value::Path(p)
    }
}

impl From<FontHandle> for Value {
    fn from(font: FontHandle) -> Self {
        Value::Font(Arc::new(font))
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

/// Concrete bindings of iteration dimensions to subject indices.
///
/// `{font: 2}` means "the third element of the `fonts` collection". Ordered
/// by dimension name, so equal bindings compare and hash equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Iterargs(BTreeMap<String, usize>);

impl Iterargs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, dimension: impl Into<String>, index: usize) -> Self {
        self.0.insert(dimension.into(), index);
        self
    }

    pub fn get(&self, dimension: &str) -> Option<usize> {
        self.0.get(dimension).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Keep only the bindings for `dimensions`.
    pub fn restrict(&self, dimensions: &BTreeSet<String>) -> Iterargs {
        Iterargs(
            self.0
                .iter()
                .filter(|(k, _)| dimensions.contains(*k))
                .map(|(k, v)| (k.clone(), *v))
                .collect(),
        )
    }

    /// Merge `other` into a copy of `self`; `other` wins on conflicts.
    pub fn merged(&self, other: &Iterargs) -> Iterargs {
        let mut merged = self.0.clone();
        merged.extend(other.0.iter().map(|(k, v)| (k.clone(), *v)));
        Iterargs(merged)
    }
}

impl fmt::Display for Iterargs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("*");
        }
        let parts: Vec<String> = self.0.iter().map(|(k, v)| format!("{k}:{v}")).collect();
        f.write_str(&parts.join(","))
    }
}

#[cfg(test)]
#[path = "value_tests.rs"]
mod tests;
