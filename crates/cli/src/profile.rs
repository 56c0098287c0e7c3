// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rule-set bundle: registry plus iteration config and profile filters.

use indexmap::IndexMap;

use crate::check::Unit;
use crate::error::{Error, Result};
use crate::filter::{FilterChain, FilterPredicate};
use crate::registry::{Registry, Section};

/// A loaded rule-set.
///
/// Iterargs map a singular dimension name to the plural value it iterates
/// over (`font` -> `fonts`). Derived iterables collect one condition's
/// results across every binding of that condition's dimensions
/// (`ttFonts` -> every `ttFont`).
#[derive(Debug, Clone)]
pub struct Profile {
    pub name: String,
    pub registry: Registry,
    iterargs: IndexMap<String, String>,
    derived: IndexMap<String, String>,
    expected_values: Vec<String>,
    filters: FilterChain,
}

impl Profile {
    pub fn new(name: impl Into<String>, default_section: Section) -> Self {
        Self {
            name: name.into(),
            registry: Registry::new(default_section),
            iterargs: IndexMap::new(),
            derived: IndexMap::new(),
            expected_values: Vec::new(),
            filters: FilterChain::new(),
        }
    }

    /// Declare an iteration dimension over a plural value.
    pub fn iterarg(&mut self, singular: impl Into<String>, plural: impl Into<String>) -> Result<()> {
        let singular = singular.into();
        self.ensure_free(&singular)?;
        self.iterargs.insert(singular, plural.into());
        Ok(())
    }

    /// Declare a derived iterable collecting `source` condition results.
    pub fn derived(&mut self, name: impl Into<String>, source: impl Into<String>) -> Result<()> {
        let name = name.into();
        self.ensure_free(&name)?;
        self.derived.insert(name, source.into());
        Ok(())
    }

    /// Declare a value every run of this profile must supply.
    pub fn expect_value(&mut self, name: impl Into<String>) {
        self.expected_values.push(name.into());
    }

    pub fn register(&mut self, unit: impl Into<Unit>) -> Result<()> {
        let unit = unit.into();
        if self.iterargs.contains_key(unit.id()) || self.derived.contains_key(unit.id()) {
            return Err(Error::DuplicateIdentifier {
                id: unit.id().to_string(),
            });
        }
        self.registry.register(unit)
    }

    pub fn add_section(&mut self, section: Section) {
        self.registry.add_section(section);
    }

    pub fn add_skip_filter(&mut self, predicate: impl FilterPredicate + 'static) {
        self.filters.add_skip(predicate);
    }

    pub fn add_disable_filter(&mut self, predicate: impl FilterPredicate + 'static) {
        self.filters.add_disable(predicate);
    }

    pub fn filters(&self) -> &FilterChain {
        &self.filters
    }

    /// Plural value name for an iteration dimension.
    pub fn plural_of(&self, singular: &str) -> Option<&str> {
        self.iterargs.get(singular).map(String::as_str)
    }

    pub fn iterarg_index(&self, singular: &str) -> Option<usize> {
        self.iterargs.get_index_of(singular)
    }

    pub fn iterargs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iterargs.iter().map(|(s, p)| (s.as_str(), p.as_str()))
    }

    /// Source condition of a derived iterable.
    pub fn derived_source(&self, name: &str) -> Option<&str> {
        self.derived.get(name).map(String::as_str)
    }

    pub fn derived_index(&self, name: &str) -> Option<usize> {
        self.derived.get_index_of(name)
    }

    pub fn expected_values(&self) -> &[String] {
        &self.expected_values
    }

    fn ensure_free(&self, name: &str) -> Result<()> {
        let taken = self.iterargs.contains_key(name)
            || self.derived.contains_key(name)
            || self.registry.lookup(name).is_ok();
        if taken {
            return Err(Error::DuplicateIdentifier {
                id: name.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "profile_tests.rs"]
mod tests;
