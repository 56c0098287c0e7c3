// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Check and condition registry.
//!
//! A registry is an ordinary value owned by one rule-set. Two rule-sets may
//! both define a unit called `licenses`; they never see each other.

use indexmap::IndexMap;

use crate::check::{Check, Condition, Unit};
use crate::error::{Error, Result};

/// Section used when a registry is created without one.
pub const DEFAULT_SECTION: &str = "Default";

/// A reporting-only grouping of checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    pub description: Option<String>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A registered unit, borrowed.
#[derive(Debug, Clone, Copy)]
pub enum UnitRef<'a> {
    Check(&'a Check),
    Condition(&'a Condition),
}

/// Ordered set of checks and conditions with unique identifiers.
#[derive(Debug, Clone)]
pub struct Registry {
    default_section: String,
    sections: IndexMap<String, Section>,
    checks: IndexMap<String, Check>,
    conditions: IndexMap<String, Condition>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(Section::new(DEFAULT_SECTION))
    }
}

impl Registry {
    pub fn new(default_section: Section) -> Self {
        let mut sections = IndexMap::new();
        let default_name = default_section.name.clone();
        sections.insert(default_name.clone(), default_section);
        Self {
            default_section: default_name,
            sections,
            checks: IndexMap::new(),
            conditions: IndexMap::new(),
        }
    }

    /// Declare a section. Re-declaring keeps the original position.
    pub fn add_section(&mut self, section: Section) {
        self.sections.entry(section.name.clone()).or_insert(section);
    }

    pub fn default_section(&self) -> &str {
        &self.default_section
    }

    /// Add a check or condition.
    ///
    /// An identifier already used by any unit is rejected unless the new unit
    /// is forced, in which case it replaces the old one in place.
    pub fn register(&mut self, unit: impl Into<Unit>) -> Result<()> {
        let unit = unit.into();
        let id = unit.id().to_string();
        let taken_by_check = self.checks.contains_key(&id);
        let taken_by_condition = self.conditions.contains_key(&id);

        if (taken_by_check || taken_by_condition) && !unit.is_forced() {
            return Err(Error::DuplicateIdentifier { id });
        }

        match unit {
            Unit::Check(mut check) => {
                if taken_by_condition {
                    return Err(Error::DuplicateIdentifier { id });
                }
                let section = check
                    .section
                    .get_or_insert_with(|| self.default_section.clone())
                    .clone();
                self.add_section(Section::new(section));
                if taken_by_check {
                    tracing::debug!("check {} overridden", id);
                }
                self.checks.insert(id, check);
            }
            Unit::Condition(condition) => {
                if taken_by_check {
                    return Err(Error::DuplicateIdentifier { id });
                }
                if taken_by_condition {
                    tracing::debug!("condition {} overridden", id);
                }
                self.conditions.insert(id, condition);
            }
        }
        Ok(())
    }

    pub fn lookup(&self, id: &str) -> Result<UnitRef<'_>> {
        if let Some(check) = self.checks.get(id) {
            return Ok(UnitRef::Check(check));
        }
        if let Some(condition) = self.conditions.get(id) {
            return Ok(UnitRef::Condition(condition));
        }
        Err(Error::NotFound { id: id.to_string() })
    }

    pub fn check(&self, id: &str) -> Option<&Check> {
        self.checks.get(id)
    }

    pub fn condition(&self, name: &str) -> Option<&Condition> {
        self.conditions.get(name)
    }

    /// Registration index of a condition, used as a stable tie-break.
    pub fn condition_index(&self, name: &str) -> Option<usize> {
        self.conditions.get_index_of(name)
    }

    /// Checks in section order, then registration order within a section.
    ///
    /// With `Some(section)` only that section's checks are returned.
    pub fn all_checks(&self, section: Option<&str>) -> Vec<&Check> {
        self.sections
            .keys()
            .filter(|name| section.is_none_or(|wanted| wanted == name.as_str()))
            .flat_map(|name| {
                self.checks
                    .values()
                    .filter(move |check| check.section.as_deref() == Some(name.as_str()))
            })
            .collect()
    }

    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.values()
    }

    /// Effective conditions in registration order.
    pub fn conditions(&self) -> impl Iterator<Item = &Condition> {
        self.conditions.values()
    }

    pub fn len(&self) -> usize {
        self.checks.len() + self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty() && self.conditions.is_empty()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
