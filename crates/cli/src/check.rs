// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Check and condition descriptors.
//!
//! Both are plain data plus a body closure, built once by a rule-set loader
//! and handed to a [`Registry`](crate::registry::Registry).

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::args::Args;
use crate::outcome::Outcome;
use crate::value::Value;

/// Body of a check: resolved inputs to an ordered list of outcomes.
pub type CheckFn = dyn Fn(&Args) -> anyhow::Result<Vec<Outcome>> + Send + Sync;

/// Body of a condition: resolved inputs to a value, or `None` when absent.
pub type ConditionFn = dyn Fn(&Args) -> anyhow::Result<Option<Value>> + Send + Sync;

/// Check priority weight.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    Important,
    #[default]
    Normal,
    Low,
    Trivial,
}

/// A named validation unit.
#[derive(Clone)]
pub struct Check {
    pub id: String,
    pub rationale: Option<String>,
    pub priority: Priority,
    /// Section name; `None` means the registry's default section.
    pub section: Option<String>,
    /// Names whose values are passed to the body.
    pub inputs: Vec<String>,
    /// Conditions that must be truthy for the check to run.
    pub conditions: Vec<String>,
    pub force: bool,
    body: Arc<CheckFn>,
}

impl Check {
    pub fn new<F>(id: impl Into<String>, body: F) -> Self
    where
        F: Fn(&Args) -> anyhow::Result<Vec<Outcome>> + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            rationale: None,
            priority: Priority::default(),
            section: None,
            inputs: Vec::new(),
            conditions: Vec::new(),
            force: false,
            body: Arc::new(body),
        }
    }

    pub fn rationale(mut self, rationale: impl Into<String>) -> Self {
        self.rationale = Some(rationale.into());
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    pub fn input(mut self, name: impl Into<String>) -> Self {
        self.inputs.push(name.into());
        self
    }

    pub fn condition(mut self, name: impl Into<String>) -> Self {
        self.conditions.push(name.into());
        self
    }

    /// Replace an already registered unit with the same id.
    pub fn force(mut self) -> Self {
        self.force = true;
        self
    }

    /// Every name this check depends on: gating conditions first.
    pub fn dependencies(&self) -> impl Iterator<Item = &str> {
        self.conditions
            .iter()
            .chain(self.inputs.iter())
            .map(String::as_str)
    }

    pub fn run(&self, args: &Args) -> anyhow::Result<Vec<Outcome>> {
        (self.body)(args)
    }
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Check")
            .field("id", &self.id)
            .field("section", &self.section)
            .field("inputs", &self.inputs)
            .field("conditions", &self.conditions)
            .field("force", &self.force)
            .finish_non_exhaustive()
    }
}

/// A named computation shared between checks.
///
/// Conditions are pure for the duration of a run: the evaluator calls each
/// one at most once per distinct binding of its iteration dimensions.
#[derive(Clone)]
pub struct Condition {
    pub name: String,
    pub rationale: Option<String>,
    pub inputs: Vec<String>,
    pub force: bool,
    body: Arc<ConditionFn>,
}

impl Condition {
    pub fn new<F>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&Args) -> anyhow::Result<Option<Value>> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            rationale: None,
            inputs: Vec::new(),
            force: false,
            body: Arc::new(body),
        }
    }

    pub fn rationale(mut self, rationale: impl Into<String>) -> Self {
        self.rationale = Some(rationale.into());
        self
    }

    pub fn input(mut self, name: impl Into<String>) -> Self {
        self.inputs.push(name.into());
        self
    }

    /// Replace an already registered condition with the same name.
    pub fn force(mut self) -> Self {
        self.force = true;
        self
    }

    pub fn evaluate(&self, args: &Args) -> anyhow::Result<Option<Value>> {
        (self.body)(args)
    }
}

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Condition")
            .field("name", &self.name)
            .field("inputs", &self.inputs)
            .field("force", &self.force)
            .finish_non_exhaustive()
    }
}

/// Anything a registry accepts.
#[derive(Debug, Clone)]
pub enum Unit {
    Check(Check),
    Condition(Condition),
}

impl Unit {
    pub fn id(&self) -> &str {
        match self {
            Unit::Check(check) => &check.id,
            Unit::Condition(condition) => &condition.name,
        }
    }

    pub fn is_forced(&self) -> bool {
        match self {
            Unit::Check(check) => check.force,
            Unit::Condition(condition) => condition.force,
        }
    }
}

impl From<Check> for Unit {
    fn from(check: Check) -> Self {
        Unit::Check(check)
    }
}

impl From<Condition> for Unit {
    fn from(condition: Condition) -> Self {
        Unit::Condition(condition)
    }
}

#[cfg(test)]
#[path = "check_tests.rs"]
mod tests;
