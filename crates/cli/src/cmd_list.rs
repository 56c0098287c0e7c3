// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! List command implementation.

use std::sync::Arc;

use termcolor::{StandardStream, WriteColor};

use crate::cli::{Cli, ListArgs};
use crate::color::{resolve_color, scheme};
use crate::config;
use crate::error::ExitCode;
use crate::font::ReadFontsLoader;
use crate::fs::OsFileSystem;
use crate::profile::Profile;
use crate::profiles;

/// Run the list command.
pub fn run(cli: &Cli, args: &ListArgs) -> anyhow::Result<ExitCode> {
    let cwd = std::env::current_dir()?;
    let config = config::discover(cli.config.as_deref(), &cwd)?;
    let name = args.profile.as_deref().unwrap_or(&config.run.profile);
    let profile = profiles::by_name(name, Arc::new(ReadFontsLoader), Arc::new(OsFileSystem))?;

    let mut stdout = StandardStream::stdout(resolve_color());
    write_list(&mut stdout, &profile)?;
    Ok(ExitCode::Success)
}

/// Every check of `profile` grouped by section, with its rationale.
pub fn write_list<W: WriteColor>(w: &mut W, profile: &Profile) -> std::io::Result<()> {
    let mut first = true;
    for section in profile.registry.sections() {
        let checks = profile.registry.all_checks(Some(section.name.as_str()));
        if checks.is_empty() {
            continue;
        }
        if !first {
            writeln!(w)?;
        }
        first = false;

        w.set_color(&scheme::heading())?;
        write!(w, "{}", section.name)?;
        w.reset()?;
        writeln!(w)?;

        for check in checks {
            writeln!(w, "  {}", check.id)?;
            if let Some(rationale) = &check.rationale {
                w.set_color(&scheme::rationale())?;
                for line in rationale.lines().map(str::trim).filter(|l| !l.is_empty()) {
                    writeln!(w, "    {}", line)?;
                }
                w.reset()?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "cmd_list_tests.rs"]
mod tests;
