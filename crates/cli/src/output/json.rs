// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSON output formatter.
//!
//! The whole report is buffered and written once at the end of a run.

use std::io::Write;

use chrono::Utc;
use serde::Serialize;

use crate::aggregate::Report;
use crate::outcome::Severity;

/// Report with run metadata.
#[derive(Debug, Serialize)]
struct JsonOutput<'a> {
    timestamp: String,
    passed: bool,
    fail_on: Severity,
    #[serde(flatten)]
    report: &'a Report,
}

/// JSON output formatter.
pub struct JsonFormatter<W: Write> {
    writer: W,
}

impl<W: Write> JsonFormatter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write the report; `passed` is false when any outcome reaches `fail_on`.
    pub fn write(&mut self, report: &Report, fail_on: Severity) -> std::io::Result<()> {
        let output = JsonOutput {
            timestamp: timestamp(),
            passed: !report.fails_at(fail_on),
            fail_on,
            report,
        };
        let json = serde_json::to_string_pretty(&output).map_err(std::io::Error::other)?;
        writeln!(self.writer, "{}", json)
    }
}

/// Current time as RFC 3339 with second precision.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
