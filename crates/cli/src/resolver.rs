// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Dependency resolution.
//!
//! Builds the graph reachable from the selected checks, rejects unknown
//! names and cycles, and computes a deterministic topological order plus the
//! iteration dimensions of every node.

use std::collections::{BTreeSet, HashMap};

use crate::error::{Error, Result};
use crate::filter::Selection;
use crate::profile::Profile;
use crate::value::Values;

/// What a dependency name refers to.
///
/// Lookup precedence follows this order: iterargs, derived iterables,
/// supplied values, then conditions. A supplied value therefore overrides a
/// condition of the same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeKind {
    Iterarg,
    Derived,
    Value,
    Condition,
}

/// A check that takes part in the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedCheck {
    pub id: String,
    pub section: String,
    /// Iteration dimensions the check expands over; empty means once.
    pub dims: BTreeSet<String>,
}

/// Output of dependency resolution for one run.
#[derive(Debug, Clone, Default)]
pub struct Plan {
    order: Vec<String>,
    kinds: HashMap<String, NodeKind>,
    dims: HashMap<String, BTreeSet<String>>,
    checks: Vec<PlannedCheck>,
}

impl Plan {
    /// Every node needed by the selected checks, dependencies first.
    pub fn order(&self) -> &[String] {
        &self.order
    }

    pub fn kind(&self, name: &str) -> Option<NodeKind> {
        self.kinds.get(name).copied()
    }

    /// Iteration dimensions of a node.
    pub fn dims(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.dims.get(name)
    }

    pub fn checks(&self) -> &[PlannedCheck] {
        &self.checks
    }

    /// Iterarg dimensions referenced anywhere in the plan.
    pub fn iterarg_dims(&self) -> impl Iterator<Item = &str> {
        self.order
            .iter()
            .filter(|name| self.kinds.get(name.as_str()) == Some(&NodeKind::Iterarg))
            .map(String::as_str)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

struct Resolver<'a> {
    profile: &'a Profile,
    values: &'a Values,
    marks: HashMap<String, Mark>,
    stack: Vec<String>,
    kinds: HashMap<String, NodeKind>,
    deps: HashMap<String, Vec<String>>,
    dims: HashMap<String, BTreeSet<String>>,
}

/// Resolve the dependency closure of every selected check in `profile`.
pub fn resolve(profile: &Profile, values: &Values, selection: &Selection) -> Result<Plan> {
    let mut resolver = Resolver {
        profile,
        values,
        marks: HashMap::new(),
        stack: Vec::new(),
        kinds: HashMap::new(),
        deps: HashMap::new(),
        dims: HashMap::new(),
    };

    let mut checks = Vec::new();
    for check in profile.registry.all_checks(None) {
        if !selection.matches(&check.id) {
            tracing::trace!("check {} not selected", check.id);
            continue;
        }
        let mut dims = BTreeSet::new();
        for dep in check.dependencies() {
            resolver.visit(dep, &check.id)?;
            if let Some(d) = resolver.dims.get(dep) {
                dims.extend(d.iter().cloned());
            }
        }
        checks.push(PlannedCheck {
            id: check.id.clone(),
            section: check
                .section
                .clone()
                .unwrap_or_else(|| profile.registry.default_section().to_string()),
            dims,
        });
    }

    let order = resolver.topological_order()?;
    tracing::debug!(
        "resolved {} nodes for {} checks",
        order.len(),
        checks.len()
    );

    Ok(Plan {
        order,
        kinds: resolver.kinds,
        dims: resolver.dims,
        checks,
    })
}

impl Resolver<'_> {
    fn classify(&self, name: &str) -> Option<NodeKind> {
        if self.profile.plural_of(name).is_some() {
            Some(NodeKind::Iterarg)
        } else if self.profile.derived_source(name).is_some() {
            Some(NodeKind::Derived)
        } else if self.values.contains_key(name) {
            Some(NodeKind::Value)
        } else if self.profile.registry.condition(name).is_some() {
            Some(NodeKind::Condition)
        } else {
            None
        }
    }

    fn deps_of(&self, name: &str, kind: NodeKind) -> Vec<String> {
        let mut deps: Vec<String> = match kind {
            NodeKind::Value => Vec::new(),
            NodeKind::Iterarg => self.profile.plural_of(name).map(String::from).into_iter().collect(),
            NodeKind::Derived => self
                .profile
                .derived_source(name)
                .map(String::from)
                .into_iter()
                .collect(),
            NodeKind::Condition => self
                .profile
                .registry
                .condition(name)
                .map(|c| c.inputs.clone())
                .unwrap_or_default(),
        };
        let mut seen = BTreeSet::new();
        deps.retain(|d| seen.insert(d.clone()));
        deps
    }

    fn visit(&mut self, name: &str, referrer: &str) -> Result<()> {
        match self.marks.get(name) {
            Some(Mark::Done) => return Ok(()),
            Some(Mark::Visiting) => {
                let start = self.stack.iter().position(|n| n == name).unwrap_or(0);
                let mut cycle = self.stack[start..].to_vec();
                cycle.push(name.to_string());
                return Err(Error::CyclicDependency { cycle });
            }
            None => {}
        }

        let kind = self
            .classify(name)
            .ok_or_else(|| Error::UnknownDependency {
                unit: referrer.to_string(),
                name: name.to_string(),
            })?;

        self.marks.insert(name.to_string(), Mark::Visiting);
        self.stack.push(name.to_string());

        let deps = self.deps_of(name, kind);
        for dep in &deps {
            self.visit(dep, name)?;
        }

        self.stack.pop();
        self.marks.insert(name.to_string(), Mark::Done);

        let dims = match kind {
            NodeKind::Value | NodeKind::Derived => BTreeSet::new(),
            NodeKind::Iterarg => BTreeSet::from([name.to_string()]),
            NodeKind::Condition => deps
                .iter()
                .filter_map(|d| self.dims.get(d))
                .flatten()
                .cloned()
                .collect(),
        };

        self.kinds.insert(name.to_string(), kind);
        self.dims.insert(name.to_string(), dims);
        self.deps.insert(name.to_string(), deps);
        Ok(())
    }

    /// Stable tie-break key among nodes whose dependencies are all placed.
    fn rank(&self, name: &str, kind: NodeKind) -> (NodeKind, usize) {
        let index = match kind {
            NodeKind::Iterarg => self.profile.iterarg_index(name),
            NodeKind::Derived => self.profile.derived_index(name),
            NodeKind::Value => self.values.keys().position(|k| k == name),
            NodeKind::Condition => self.profile.registry.condition_index(name),
        };
        (kind, index.unwrap_or(usize::MAX))
    }

    /// Kahn's algorithm, picking the lowest-ranked ready node each step.
    fn topological_order(&self) -> Result<Vec<String>> {
        let mut pending: HashMap<&str, usize> = HashMap::new();
        let mut dependents: HashMap<&str, Vec<&str>> = HashMap::new();
        for (name, deps) in &self.deps {
            pending.insert(name.as_str(), deps.len());
            for dep in deps {
                dependents.entry(dep.as_str()).or_default().push(name.as_str());
            }
        }

        let mut ready: BTreeSet<((NodeKind, usize), &str)> = pending
            .iter()
            .filter(|(_, count)| **count == 0)
            .map(|(name, _)| (self.rank(name, self.kinds[*name]), *name))
            .collect();

        let mut order = Vec::with_capacity(pending.len());
        while let Some(entry) = ready.pop_first() {
            let (_, name) = entry;
            order.push(name.to_string());
            for dependent in dependents.get(name).into_iter().flatten() {
                if let Some(count) = pending.get_mut(dependent) {
                    *count -= 1;
                    if *count == 0 {
                        ready.insert((self.rank(dependent, self.kinds[*dependent]), dependent));
                    }
                }
            }
        }

        if order.len() != pending.len() {
            return Err(Error::Internal(
                "dependency graph not fully ordered".to_string(),
            ));
        }
        Ok(order)
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
