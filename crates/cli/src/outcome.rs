// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Graded outcomes produced by checks.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome severity, ordered by ascending badness.
///
/// `Pass` and `Skip` are terminal-success states, `Warn` is non-fatal,
/// `Fail` is a rule violation and `Error` is an execution fault.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Debug,
    Info,
    Pass,
    Skip,
    Warn,
    Fail,
    Error,
}

impl Severity {
    /// All severities in ascending order.
    pub const ALL: [Severity; 7] = [
        Severity::Debug,
        Severity::Info,
        Severity::Pass,
        Severity::Skip,
        Severity::Warn,
        Severity::Fail,
        Severity::Error,
    ];

    /// Upper-case label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Pass => "PASS",
            Severity::Skip => "SKIP",
            Severity::Warn => "WARN",
            Severity::Fail => "FAIL",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Human-readable message with an optional machine-readable code.
///
/// Codes let tests and tooling tell apart outcomes that share a severity
/// (e.g. `"multiple"` vs `"none"` for a license check).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub text: String,
}

impl Message {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            code: None,
            text: text.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            text: text.into(),
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(f, "{} [code: {}]", self.text, code),
            None => f.write_str(&self.text),
        }
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Message::new(text)
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Message::new(text)
    }
}

/// A single graded result of one check invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub severity: Severity,
    pub message: Message,
}

impl Outcome {
    pub fn new(severity: Severity, message: impl Into<Message>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }

    pub fn debug(message: impl Into<Message>) -> Self {
        Self::new(Severity::Debug, message)
    }

    pub fn info(message: impl Into<Message>) -> Self {
        Self::new(Severity::Info, message)
    }

    pub fn pass(message: impl Into<Message>) -> Self {
        Self::new(Severity::Pass, message)
    }

    pub fn skip(message: impl Into<Message>) -> Self {
        Self::new(Severity::Skip, message)
    }

    pub fn warn(message: impl Into<Message>) -> Self {
        Self::new(Severity::Warn, message)
    }

    pub fn fail(message: impl Into<Message>) -> Self {
        Self::new(Severity::Fail, message)
    }

    pub fn error(message: impl Into<Message>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Attach a machine-readable code to the message.
    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.message.code = Some(code.into());
        self
    }
}

#[cfg(test)]
#[path = "outcome_tests.rs"]
mod tests;
