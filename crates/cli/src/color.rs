// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Color detection and terminal styling.
//!
//! Detection order:
//! 1. `--color` / `--no-color` flags
//! 2. NO_COLOR env var → no color
//! 3. COLOR env var → use color
//! 4. default: color only when stdout is a TTY outside CI

use std::io::IsTerminal;

use termcolor::ColorChoice;

/// Resolve the color choice from flags, then the environment.
pub fn choose(force: bool, disable: bool) -> ColorChoice {
    if disable {
        ColorChoice::Never
    } else if force {
        ColorChoice::Always
    } else {
        resolve_color()
    }
}

/// Resolve color choice from environment variables.
///
/// Priority: NO_COLOR > COLOR > auto-detect
///
/// Per [no-color.org](https://no-color.org/), `NO_COLOR` when set to any value
/// (including empty string) disables color.
pub fn resolve_color() -> ColorChoice {
    if std::env::var_os("NO_COLOR").is_some() {
        return ColorChoice::Never;
    }
    if std::env::var_os("COLOR").is_some() {
        return ColorChoice::Always;
    }
    if !std::io::stdout().is_terminal() || std::env::var_os("CI").is_some() {
        return ColorChoice::Never;
    }
    ColorChoice::Auto
}

/// Color scheme for report output.
pub mod scheme {
    use termcolor::{Color, ColorSpec};

    use crate::outcome::Severity;

    /// Bold check id and section headers.
    pub fn heading() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_bold(true);
        spec
    }

    /// Cyan subject path.
    pub fn subject() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Cyan));
        spec
    }

    /// Dimmed rationale text.
    pub fn rationale() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_dimmed(true);
        spec
    }

    /// Severity label colors.
    pub fn severity(severity: Severity) -> ColorSpec {
        let mut spec = ColorSpec::new();
        match severity {
            Severity::Debug | Severity::Info => {
                spec.set_fg(Some(Color::Blue));
            }
            Severity::Pass => {
                spec.set_fg(Some(Color::Green)).set_bold(true);
            }
            Severity::Skip | Severity::Warn => {
                spec.set_fg(Some(Color::Yellow)).set_bold(true);
            }
            Severity::Fail => {
                spec.set_fg(Some(Color::Red)).set_bold(true);
            }
            Severity::Error => {
                spec.set_fg(Some(Color::Magenta)).set_bold(true);
            }
        }
        spec
    }
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
