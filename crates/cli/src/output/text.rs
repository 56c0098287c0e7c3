// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text output formatter.
//!
//! ```text
//! SIL Fonts
//!   org.sil.scripts/check/003
//!     FAIL fonts/Foo-Regular.ttf: 2 license files found [code: multiple]
//!
//! 10 checks, 12 invocations: 9 PASS, 2 SKIP, 1 FAIL
//! ```

use termcolor::{ColorChoice, StandardStream, WriteColor};

use super::FormatOptions;
use crate::aggregate::{CheckReport, InvocationReport, Report, SectionReport, Summary};
use crate::color::scheme;
use crate::outcome::Outcome;

/// Text output formatter with color support.
pub struct TextFormatter<W: WriteColor> {
    writer: W,
    options: FormatOptions,
}

impl TextFormatter<StandardStream> {
    /// Formatter writing to stdout.
    pub fn stdout(color_choice: ColorChoice, options: FormatOptions) -> Self {
        Self::new(StandardStream::stdout(color_choice), options)
    }
}

impl<W: WriteColor> TextFormatter<W> {
    pub fn new(writer: W, options: FormatOptions) -> Self {
        Self { writer, options }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Write every visible section followed by the summary line.
    pub fn write_report(&mut self, report: &Report) -> std::io::Result<()> {
        let mut wrote_any = false;
        for section in &report.sections {
            wrote_any |= self.write_section(section)?;
        }
        if wrote_any {
            writeln!(self.writer)?;
        }
        self.write_summary(&report.summary)
    }

    /// Returns false when nothing in the section is visible.
    fn write_section(&mut self, section: &SectionReport) -> std::io::Result<bool> {
        let visible: Vec<&CheckReport> = section
            .checks
            .iter()
            .filter(|check| self.is_visible(check))
            .collect();
        if visible.is_empty() {
            return Ok(false);
        }

        self.writer.set_color(&scheme::heading())?;
        write!(self.writer, "{}", section.name)?;
        self.writer.reset()?;
        writeln!(self.writer)?;

        for check in visible {
            self.write_check(check)?;
        }
        Ok(true)
    }

    fn is_visible(&self, check: &CheckReport) -> bool {
        check
            .invocations
            .iter()
            .flat_map(|inv| inv.outcomes.iter())
            .any(|outcome| self.options.shows(outcome.severity))
    }

    fn write_check(&mut self, check: &CheckReport) -> std::io::Result<()> {
        write!(self.writer, "  ")?;
        self.writer.set_color(&scheme::heading())?;
        write!(self.writer, "{}", check.id)?;
        self.writer.reset()?;
        writeln!(self.writer)?;

        if self.options.verbose
            && let Some(rationale) = &check.rationale
        {
            self.writer.set_color(&scheme::rationale())?;
            for line in rationale.lines() {
                writeln!(self.writer, "    {}", line.trim())?;
            }
            self.writer.reset()?;
        }

        for invocation in &check.invocations {
            for outcome in &invocation.outcomes {
                if self.options.shows(outcome.severity) {
                    self.write_outcome(invocation, outcome)?;
                }
            }
        }
        Ok(())
    }

    fn write_outcome(
        &mut self,
        invocation: &InvocationReport,
        outcome: &Outcome,
    ) -> std::io::Result<()> {
        write!(self.writer, "    ")?;
        self.writer.set_color(&scheme::severity(outcome.severity))?;
        write!(self.writer, "{}", outcome.severity)?;
        self.writer.reset()?;
        write!(self.writer, " ")?;

        if let Some(subject) = subject_label(invocation) {
            self.writer.set_color(&scheme::subject())?;
            write!(self.writer, "{}", subject)?;
            self.writer.reset()?;
            write!(self.writer, ": ")?;
        }
        writeln!(self.writer, "{}", outcome.message)
    }

    /// Write the summary line.
    pub fn write_summary(&mut self, summary: &Summary) -> std::io::Result<()> {
        write!(
            self.writer,
            "{} check{}, {} invocation{}",
            summary.checks,
            plural(summary.checks),
            summary.invocations,
            plural(summary.invocations),
        )?;

        let mut first = true;
        for (severity, count) in summary.counts.nonzero() {
            write!(self.writer, "{}", if first { ": " } else { ", " })?;
            first = false;
            write!(self.writer, "{} ", count)?;
            self.writer.set_color(&scheme::severity(severity))?;
            write!(self.writer, "{}", severity)?;
            self.writer.reset()?;
        }
        writeln!(self.writer)
    }
}

/// Subject path, or the binding itself when the invocation has no subject.
fn subject_label(invocation: &InvocationReport) -> Option<String> {
    match &invocation.subject {
        Some(subject) => Some(subject.clone()),
        None if invocation.iterargs.is_empty() => None,
        None => Some(invocation.iterargs.to_string()),
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
