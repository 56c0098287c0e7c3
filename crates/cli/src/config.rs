// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration parsing and validation.
//!
//! Handles fontcheck.toml parsing with version validation and unknown key
//! warnings.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::filter::{FilterChain, PatternFilter, Selection};
use crate::outcome::Severity;
use crate::profiles::DEFAULT_PROFILE;

/// Config file name looked for during discovery.
pub const FILE_NAME: &str = "fontcheck.toml";

/// Currently supported config version.
pub const SUPPORTED_VERSION: i64 = 1;

/// Known top-level keys in the config.
const KNOWN_KEYS: &[&str] = &["version", "run", "checks", "filters"];
const KNOWN_RUN_KEYS: &[&str] = &["jobs", "fail_on", "profile"];
const KNOWN_CHECKS_KEYS: &[&str] = &["include", "exclude"];
const KNOWN_FILTERS_KEYS: &[&str] = &["skip", "disable"];
const KNOWN_RULE_KEYS: &[&str] = &["pattern", "reason"];

/// Config with flexible parsing that captures unknown keys.
#[derive(Deserialize)]
struct FlexibleConfig {
    version: Option<i64>,

    #[serde(default)]
    run: Option<toml::Value>,

    #[serde(default)]
    checks: Option<toml::Value>,

    #[serde(default)]
    filters: Option<toml::Value>,

    #[serde(flatten)]
    unknown: BTreeMap<String, toml::Value>,
}

/// Full configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// Config file version (must be 1).
    pub version: i64,
    pub run: RunConfig,
    pub checks: ChecksConfig,
    pub filters: FiltersConfig,
}

/// `[run]` settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RunConfig {
    /// Worker threads; unset means sequential.
    #[serde(default)]
    pub jobs: Option<usize>,

    /// Lowest severity that makes the run fail.
    #[serde(default = "RunConfig::default_fail_on")]
    pub fail_on: Severity,

    #[serde(default = "RunConfig::default_profile")]
    pub profile: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            jobs: None,
            fail_on: Self::default_fail_on(),
            profile: Self::default_profile(),
        }
    }
}

impl RunConfig {
    fn default_fail_on() -> Severity {
        Severity::Fail
    }

    fn default_profile() -> String {
        DEFAULT_PROFILE.to_string()
    }
}

/// `[checks]` selection by check id substring.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ChecksConfig {
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// `[filters]` skip and disable rules.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FiltersConfig {
    #[serde(default)]
    pub skip: Vec<FilterRule>,
    #[serde(default)]
    pub disable: Vec<FilterRule>,
}

/// One glob over check ids with an optional reason.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FilterRule {
    pub pattern: String,
    #[serde(default)]
    pub reason: Option<String>,
}

impl Config {
    pub fn selection(&self) -> Selection {
        Selection {
            include: self.checks.include.clone(),
            exclude: self.checks.exclude.clone(),
        }
    }

    /// Caller filter predicates described by `[filters]`.
    pub fn filter_chain(&self) -> Result<FilterChain> {
        let mut chain = FilterChain::new();
        for rule in &self.filters.skip {
            chain.add_skip(PatternFilter::new(
                std::slice::from_ref(&rule.pattern),
                rule.reason.as_deref(),
            )?);
        }
        for rule in &self.filters.disable {
            chain.add_disable(PatternFilter::new(
                std::slice::from_ref(&rule.pattern),
                rule.reason.as_deref(),
            )?);
        }
        Ok(chain)
    }
}

/// Config for a run started in `cwd`: the explicit file, the discovered
/// one, or defaults when there is neither.
pub fn discover(explicit: Option<&Path>, cwd: &Path) -> Result<Config> {
    match crate::discovery::resolve_config(explicit, cwd)? {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            load(&path)
        }
        None => {
            tracing::debug!("no config found, using defaults");
            Ok(Config {
                version: SUPPORTED_VERSION,
                ..Config::default()
            })
        }
    }
}

/// Load config from a file path, warning on unknown keys.
pub fn load(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse(&content, path)
}

/// Parse config from string content, warning on unknown keys.
pub fn parse(content: &str, path: &Path) -> Result<Config> {
    let flexible: FlexibleConfig = toml::from_str(content).map_err(|e| config_error(e, path))?;

    let version = flexible
        .version
        .ok_or_else(|| config_error("missing required field: version", path))?;
    if version != SUPPORTED_VERSION {
        return Err(config_error(
            format!(
                "unsupported config version {} (supported: {})\n  Upgrade fontcheck to use this config.",
                version, SUPPORTED_VERSION
            ),
            path,
        ));
    }

    for key in flexible.unknown.keys() {
        if !KNOWN_KEYS.contains(&key.as_str()) {
            warn_unknown_key(path, key);
        }
    }

    let run: RunConfig = section(flexible.run, "run", KNOWN_RUN_KEYS, path)?;
    if run.jobs == Some(0) {
        return Err(config_error("run.jobs must be at least 1", path));
    }

    let checks = section(flexible.checks, "checks", KNOWN_CHECKS_KEYS, path)?;

    if let Some(toml::Value::Table(table)) = &flexible.filters {
        for kind in ["skip", "disable"] {
            let rules = table.get(kind).and_then(toml::Value::as_array);
            for (i, rule) in rules.into_iter().flatten().enumerate() {
                let Some(rule) = rule.as_table() else { continue };
                for key in rule.keys() {
                    if !KNOWN_RULE_KEYS.contains(&key.as_str()) {
                        warn_unknown_key(path, &format!("filters.{kind}[{i}].{key}"));
                    }
                }
            }
        }
    }
    let filters = section(flexible.filters, "filters", KNOWN_FILTERS_KEYS, path)?;

    Ok(Config {
        version,
        run,
        checks,
        filters,
    })
}

/// Deserialize one top-level table, warning about keys it does not know.
fn section<T>(value: Option<toml::Value>, name: &str, known: &[&str], path: &Path) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    let Some(value) = value else {
        return Ok(T::default());
    };
    let Some(table) = value.as_table() else {
        return Err(config_error(format!("`{name}` must be a table"), path));
    };
    for key in table.keys() {
        if !known.contains(&key.as_str()) {
            warn_unknown_key(path, &format!("{name}.{key}"));
        }
    }
    value
        .try_into()
        .map_err(|e| config_error(format!("{name}: {e}"), path))
}

fn config_error(message: impl ToString, path: &Path) -> Error {
    Error::Config {
        message: message.to_string(),
        path: Some(path.to_path_buf()),
    }
}

fn warn_unknown_key(path: &Path, key: &str) {
    eprintln!(
        "fontcheck: warning: {}: unrecognized field `{}` (ignored)",
        path.display(),
        key
    );
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
