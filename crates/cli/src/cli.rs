// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::filter::Selection;
use crate::outcome::Severity;
use crate::output::{FormatOptions, OutputFormat};

/// A dependency-resolving check runner for font quality assurance
#[derive(Parser)]
#[command(name = "fontcheck")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use specific config file
    #[arg(short = 'C', long = "config", global = true, env = "FONTCHECK_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run a profile's checks over font files
    Check(CheckArgs),
    /// List the checks of a profile
    List(ListArgs),
}

#[derive(clap::Args)]
pub struct CheckArgs {
    /// Font files to check
    #[arg(value_name = "FONT", required = true)]
    pub fonts: Vec<PathBuf>,

    /// Profile to run (default: from config, else `sil`)
    #[arg(short, long)]
    pub profile: Option<String>,

    /// Run only checks whose id contains this text (repeatable)
    #[arg(short = 'c', long = "checkid", value_name = "ID")]
    pub checkid: Vec<String>,

    /// Skip checks whose id contains this text (repeatable)
    #[arg(short = 'x', long = "exclude-checkid", value_name = "ID")]
    pub exclude_checkid: Vec<String>,

    /// Worker threads (0 uses every core)
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Lowest severity that fails the run (default: fail)
    #[arg(long, value_enum, value_name = "SEVERITY")]
    pub fail_on: Option<Severity>,

    /// Force color output
    #[arg(long)]
    pub color: bool,

    /// Disable color output
    #[arg(long)]
    pub no_color: bool,

    /// Also print PASS, INFO and DEBUG outcomes
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl CheckArgs {
    /// Command-line selection merged over the config file's.
    ///
    /// Flags replace the config lists they correspond to rather than
    /// extending them.
    pub fn selection(&self, config: Selection) -> Selection {
        Selection {
            include: if self.checkid.is_empty() {
                config.include
            } else {
                self.checkid.clone()
            },
            exclude: if self.exclude_checkid.is_empty() {
                config.exclude
            } else {
                self.exclude_checkid.clone()
            },
        }
    }

    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            verbose: self.verbose,
        }
    }
}

#[derive(clap::Args)]
pub struct ListArgs {
    /// Profile to list (default: from config, else `sil`)
    #[arg(short, long)]
    pub profile: Option<String>,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
