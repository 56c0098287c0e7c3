// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for run reports.

pub mod json;
pub mod text;

use crate::outcome::Severity;

/// Report output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Output formatting options.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatOptions {
    /// Also show PASS, INFO and DEBUG outcomes, and check rationales.
    pub verbose: bool,
}

impl FormatOptions {
    pub fn verbose() -> Self {
        Self { verbose: true }
    }

    /// Whether an outcome of this severity is printed.
    pub fn shows(&self, severity: Severity) -> bool {
        self.verbose || severity >= Severity::Skip
    }
}
