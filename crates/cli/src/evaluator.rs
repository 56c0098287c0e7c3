// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-invocation evaluation with a per-run condition cache.
//!
//! Names are resolved on demand: iterargs index into their plural value,
//! derived iterables collect their source condition across every binding, and
//! conditions are computed at most once per distinct binding of their own
//! dimensions. Failures are captured as data so one bad input never stops the
//! rest of the run.

use std::any::Any;
use std::sync::{Arc, OnceLock};

use dashmap::DashMap;

use crate::args::Args;
use crate::check::Check;
use crate::expander::Dimensions;
use crate::filter::{FilterChain, Verdict};
use crate::outcome::Outcome;
use crate::profile::Profile;
use crate::resolver::{NodeKind, Plan};
use crate::unwind;
use crate::value::{Iterargs, Value, Values};

/// Reason attached to a skip when the predicate gave none.
pub const DEFAULT_SKIP_REASON: &str = "skipped by filter";

/// The memoized state of one name under one binding.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Resolved(Value),
    /// The condition produced no value.
    Absent,
    /// Computing the value failed; the message is reported on dependents.
    Errored(String),
}

/// Result of evaluating one check for one binding.
#[derive(Debug, Clone, PartialEq)]
pub enum Invocation {
    /// A disable predicate matched; nothing is reported.
    Disabled,
    /// A gating condition was falsy or absent, or an input was absent.
    Gated,
    Outcomes(Vec<Outcome>),
}

type CellKey = (String, Iterargs);

/// Evaluation state for one run. Shared by reference across worker threads.
pub struct Run<'a> {
    profile: &'a Profile,
    plan: &'a Plan,
    values: &'a Values,
    dims: &'a Dimensions,
    filters: FilterChain,
    cache: DashMap<CellKey, Arc<OnceLock<Cell>>>,
}

impl<'a> Run<'a> {
    /// `caller` predicates are consulted after the profile's own.
    pub fn new(
        profile: &'a Profile,
        plan: &'a Plan,
        values: &'a Values,
        dims: &'a Dimensions,
        caller: &FilterChain,
    ) -> Self {
        Self {
            profile,
            plan,
            values,
            dims,
            filters: profile.filters().then(caller),
            cache: DashMap::new(),
        }
    }

    /// The value bound to the first declared dimension of `iterargs`.
    pub fn subject(&self, iterargs: &Iterargs) -> Option<Value> {
        self.profile
            .iterargs()
            .find(|(singular, _)| iterargs.get(singular).is_some())
            .and_then(|(singular, _)| match self.resolve(singular, iterargs) {
                Cell::Resolved(value) => Some(value),
                Cell::Absent | Cell::Errored(_) => None,
            })
    }

    /// Evaluate `check` for one binding of its dimensions.
    pub fn invoke(&self, check: &Check, iterargs: &Iterargs) -> Invocation {
        let subject = self.subject(iterargs);

        if let Verdict::Deny(reason) =
            self.filters
                .disable_verdict(&check.id, subject.as_ref(), iterargs)
        {
            tracing::debug!(
                "{} [{}] disabled: {}",
                check.id,
                iterargs,
                reason.as_deref().unwrap_or("-")
            );
            return Invocation::Disabled;
        }
        if let Verdict::Deny(reason) = self
            .filters
            .skip_verdict(&check.id, subject.as_ref(), iterargs)
        {
            let reason = reason.unwrap_or_else(|| DEFAULT_SKIP_REASON.to_string());
            return Invocation::Outcomes(vec![Outcome::skip(reason)]);
        }

        let mut path = Vec::new();
        for name in &check.conditions {
            match self.resolve_in(name, iterargs, &mut path) {
                Cell::Resolved(value) if value.is_truthy() => {}
                Cell::Resolved(_) | Cell::Absent => {
                    tracing::trace!("{} [{}] gated by {}", check.id, iterargs, name);
                    return Invocation::Gated;
                }
                Cell::Errored(message) => {
                    return Invocation::Outcomes(vec![Outcome::error(message)]);
                }
            }
        }

        let mut args = Args::new(iterargs.clone());
        for name in &check.inputs {
            match self.resolve_in(name, iterargs, &mut path) {
                Cell::Resolved(value) => args.insert(name.clone(), value),
                Cell::Absent => {
                    tracing::trace!("{} [{}] input {} absent", check.id, iterargs, name);
                    return Invocation::Gated;
                }
                Cell::Errored(message) => {
                    return Invocation::Outcomes(vec![Outcome::error(message)]);
                }
            }
        }

        let outcomes = match unwind::catch(|| check.run(&args)) {
            Ok(Ok(outcomes)) => outcomes,
            Ok(Err(err)) => {
                tracing::debug!("{} [{}] failed: {:#}", check.id, iterargs, err);
                vec![Outcome::error(format!("{err:#}"))]
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                tracing::warn!("{} [{}] panicked: {}", check.id, iterargs, message);
                vec![Outcome::error(format!("check panicked: {message}"))]
            }
        };
        Invocation::Outcomes(outcomes)
    }

    /// Resolve `name` under `iterargs`.
    pub fn resolve(&self, name: &str, iterargs: &Iterargs) -> Cell {
        self.resolve_in(name, iterargs, &mut Vec::new())
    }

    fn resolve_in(&self, name: &str, iterargs: &Iterargs, path: &mut Vec<CellKey>) -> Cell {
        match self.plan.kind(name) {
            Some(NodeKind::Iterarg) => self.iterarg(name, iterargs),
            Some(NodeKind::Value) => match self.values.get(name) {
                Some(value) => Cell::Resolved(value.clone()),
                None => Cell::Errored(format!("value `{name}` was not supplied")),
            },
            Some(NodeKind::Derived) => {
                let key = (name.to_string(), Iterargs::new());
                self.memoized(key, path, |path| self.derived(name, path))
            }
            Some(NodeKind::Condition) => {
                let own = self
                    .plan
                    .dims(name)
                    .map(|dims| iterargs.restrict(dims))
                    .unwrap_or_default();
                let key = (name.to_string(), own.clone());
                self.memoized(key, path, |path| self.condition(name, &own, path))
            }
            None => Cell::Errored(format!("`{name}` is not part of this run")),
        }
    }

    fn iterarg(&self, name: &str, iterargs: &Iterargs) -> Cell {
        let Some(index) = iterargs.get(name) else {
            return Cell::Errored(format!("iterarg `{name}` is not bound"));
        };
        let item = self
            .profile
            .plural_of(name)
            .and_then(|plural| self.values.get(plural))
            .and_then(Value::as_list)
            .and_then(|items| items.get(index));
        match item {
            Some(value) => Cell::Resolved(value.clone()),
            None => Cell::Errored(format!("iterarg `{name}` index {index} out of range")),
        }
    }

    fn derived(&self, name: &str, path: &mut Vec<CellKey>) -> Cell {
        let Some(source) = self.profile.derived_source(name) else {
            return Cell::Errored(format!("derived `{name}` has no source"));
        };
        let Some(source_dims) = self.plan.dims(source) else {
            return Cell::Errored(format!("`{source}` is not part of this run"));
        };
        let mut items = Vec::new();
        for binding in self.dims.tuples(source_dims) {
            match self.resolve_in(source, &binding, path) {
                Cell::Resolved(value) => items.push(value),
                Cell::Absent => {}
                Cell::Errored(message) => return Cell::Errored(message),
            }
        }
        Cell::Resolved(Value::List(items))
    }

    fn condition(&self, name: &str, iterargs: &Iterargs, path: &mut Vec<CellKey>) -> Cell {
        let Some(condition) = self.profile.registry.condition(name) else {
            return Cell::Errored(format!("condition `{name}` is not registered"));
        };
        let mut args = Args::new(iterargs.clone());
        for input in &condition.inputs {
            match self.resolve_in(input, iterargs, path) {
                Cell::Resolved(value) => args.insert(input.clone(), value),
                other => return other,
            }
        }

        tracing::trace!("computing {} [{}]", name, iterargs);
        match unwind::catch(|| condition.evaluate(&args)) {
            Ok(Ok(Some(value))) => Cell::Resolved(value),
            Ok(Ok(None)) => Cell::Absent,
            Ok(Err(err)) => Cell::Errored(format!("condition `{name}` failed: {err:#}")),
            Err(payload) => Cell::Errored(format!(
                "condition `{name}` panicked: {}",
                panic_message(payload.as_ref())
            )),
        }
    }

    /// Compute a cell once per key, detecting re-entry on the current path.
    fn memoized(
        &self,
        key: CellKey,
        path: &mut Vec<CellKey>,
        compute: impl FnOnce(&mut Vec<CellKey>) -> Cell,
    ) -> Cell {
        if path.contains(&key) {
            let cycle: Vec<&str> = path
                .iter()
                .map(|(n, _)| n.as_str())
                .chain([key.0.as_str()])
                .collect();
            return Cell::Errored(format!("cyclic dependency: {}", cycle.join(" -> ")));
        }

        // Clone the slot out so the map shard is unlocked while computing.
        let slot = Arc::clone(self.cache.entry(key.clone()).or_default().value());
        path.push(key);
        let cell = slot.get_or_init(|| compute(path)).clone();
        path.pop();
        cell
    }

    /// Number of distinct cells computed so far.
    pub fn cached_cells(&self) -> usize {
        self.cache.iter().filter(|e| e.value().get().is_some()).count()
    }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
#[path = "evaluator_tests.rs"]
mod tests;
