// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

/// Fontcheck error types.
///
/// Every variant is a configuration or setup fault: it is raised before any
/// check executes. Faults inside check and condition bodies never surface
/// here; they become `ERROR` outcomes in the report.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Two units registered under the same identifier without `force`.
    #[error("duplicate identifier: {id}")]
    DuplicateIdentifier { id: String },

    /// A lookup for an identifier that is not registered.
    #[error("not found: {id}")]
    NotFound { id: String },

    /// A check or condition references a name nothing provides.
    #[error("unknown dependency `{name}` required by `{unit}`")]
    UnknownDependency { unit: String, name: String },

    /// The dependency graph contains a cycle.
    #[error("cyclic dependency: {}", .cycle.join(" -> "))]
    CyclicDependency { cycle: Vec<String> },

    /// A value supplied to the run has the wrong shape.
    #[error("invalid value `{name}`: {message}")]
    InvalidValue { name: String, message: String },

    /// Configuration file not found or invalid
    #[error("config error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// Invalid command-line arguments
    #[error("argument error: {0}")]
    Argument(String),

    /// File I/O error
    #[error("io error: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Internal error (bug)
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type using fontcheck Error
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Worst severity stayed below the failure threshold
    Success = 0,
    /// Worst severity reached the failure threshold
    CheckFailed = 1,
    /// Configuration, rule-set or argument error
    ConfigError = 2,
    /// Internal error
    InternalError = 3,
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::DuplicateIdentifier { .. }
            | Error::NotFound { .. }
            | Error::UnknownDependency { .. }
            | Error::CyclicDependency { .. }
            | Error::InvalidValue { .. }
            | Error::Config { .. }
            | Error::Argument(_) => ExitCode::ConfigError,
            Error::Io { .. } | Error::Internal(_) => ExitCode::InternalError,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
