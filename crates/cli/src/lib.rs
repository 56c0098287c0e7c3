// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! fontcheck: a dependency-resolving check runner for font quality assurance.
//!
//! A [`Profile`] holds checks and the conditions they depend on. The
//! [`Runner`] resolves the dependency plan, expands each check over the
//! subjects it iterates on, evaluates every invocation against a memoized
//! condition cache and aggregates the outcomes into a [`Report`].

pub mod aggregate;
pub mod args;
pub mod check;
pub mod cli;
pub mod cmd_list;
pub mod color;
pub mod config;
pub mod discovery;
pub mod error;
pub mod evaluator;
pub mod expander;
pub mod filter;
pub mod font;
pub mod fs;
pub mod outcome;
pub mod output;
pub mod profile;
pub mod profiles;
pub mod registry;
pub mod resolver;
pub mod runner;
mod unwind;
pub mod value;

pub use aggregate::Report;
pub use check::{Check, Condition, Priority};
pub use error::{Error, ExitCode, Result};
pub use outcome::{Message, Outcome, Severity};
pub use profile::Profile;
pub use registry::Registry;
pub use runner::{Runner, RunnerConfig};
pub use value::{Iterargs, Value, Values};

#[cfg(test)]
pub mod test_utils;
