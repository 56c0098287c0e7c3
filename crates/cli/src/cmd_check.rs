// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Check command implementation.

use std::sync::Arc;

use fontcheck::cli::{CheckArgs, Cli};
use fontcheck::color;
use fontcheck::config;
use fontcheck::error::{Error, ExitCode};
use fontcheck::font::ReadFontsLoader;
use fontcheck::fs::OsFileSystem;
use fontcheck::output::OutputFormat;
use fontcheck::output::json::JsonFormatter;
use fontcheck::output::text::TextFormatter;
use fontcheck::profiles;
use fontcheck::runner::{Runner, RunnerConfig};

/// Run the check command.
pub fn run(cli: &Cli, args: &CheckArgs) -> anyhow::Result<ExitCode> {
    if let Some(dir) = args.fonts.iter().find(|p| p.is_dir()) {
        return Err(Error::Argument(format!(
            "{} is a directory; pass font files instead",
            dir.display()
        ))
        .into());
    }

    let cwd = std::env::current_dir()?;
    let config = config::discover(cli.config.as_deref(), &cwd)?;

    // Flags override config values
    let profile_name = args.profile.as_deref().unwrap_or(&config.run.profile);
    let fail_on = args.fail_on.unwrap_or(config.run.fail_on);
    let jobs = args.jobs.or(config.run.jobs).unwrap_or(1);

    let profile = profiles::by_name(
        profile_name,
        Arc::new(ReadFontsLoader),
        Arc::new(OsFileSystem),
    )?;
    let runner = Runner::new(RunnerConfig {
        jobs,
        selection: args.selection(config.selection()),
    })
    .with_filters(config.filter_chain()?);

    let values = profiles::font_values(args.fonts.iter().cloned());
    let report = runner.run(&profile, &values)?;

    match args.output {
        OutputFormat::Text => {
            let choice = color::choose(args.color, args.no_color);
            TextFormatter::stdout(choice, args.format_options()).write_report(&report)?;
        }
        OutputFormat::Json => {
            JsonFormatter::new(std::io::stdout().lock()).write(&report, fail_on)?;
        }
    }

    if report.fails_at(fail_on) {
        tracing::debug!("worst severity {:?} reached {}", report.worst, fail_on);
        Ok(ExitCode::CheckFailed)
    } else {
        Ok(ExitCode::Success)
    }
}
