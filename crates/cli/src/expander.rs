// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Iteration expansion.
//!
//! Turns a unit's dimension set into the concrete iterarg tuples it must be
//! evaluated for: the cartesian product of each dimension's index range.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Error, Result};
use crate::profile::Profile;
use crate::resolver::Plan;
use crate::value::{Iterargs, Values};

/// Collection length of every iteration dimension used by a plan.
#[derive(Debug, Clone, Default)]
pub struct Dimensions {
    lengths: BTreeMap<String, usize>,
}

impl Dimensions {
    /// Measure each iterarg in `plan` against its plural value.
    ///
    /// A plural that was not supplied, or is not a list, is a configuration
    /// fault.
    pub fn measure(profile: &Profile, plan: &Plan, values: &Values) -> Result<Self> {
        let mut lengths = BTreeMap::new();
        for dim in plan.iterarg_dims() {
            let plural = profile.plural_of(dim).unwrap_or(dim);
            let value = values.get(plural).ok_or_else(|| Error::InvalidValue {
                name: plural.to_string(),
                message: format!("required by iterarg `{dim}` but not supplied"),
            })?;
            let items = value.as_list().ok_or_else(|| Error::InvalidValue {
                name: plural.to_string(),
                message: format!("expected a list but got {}", value.kind()),
            })?;
            tracing::trace!("dimension {} has {} items", dim, items.len());
            lengths.insert(dim.to_string(), items.len());
        }
        Ok(Self { lengths })
    }

    /// Build directly from lengths.
    pub fn from_lengths<I, S>(lengths: I) -> Self
    where
        I: IntoIterator<Item = (S, usize)>,
        S: Into<String>,
    {
        Self {
            lengths: lengths.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn len_of(&self, dim: &str) -> Option<usize> {
        self.lengths.get(dim).copied()
    }

    /// Every binding of `dims`, lazily, in lexicographic order.
    ///
    /// No dimensions yields exactly one empty tuple. Any empty dimension
    /// yields nothing. Unknown dimensions count as empty.
    pub fn tuples(&self, dims: &BTreeSet<String>) -> Tuples {
        let axes: Vec<(String, usize)> = dims
            .iter()
            .map(|d| (d.clone(), self.len_of(d).unwrap_or(0)))
            .collect();
        let next = if axes.iter().any(|(_, len)| *len == 0) {
            None
        } else {
            Some(vec![0; axes.len()])
        };
        Tuples { axes, next }
    }

    /// Number of tuples [`tuples`](Self::tuples) would yield.
    pub fn count(&self, dims: &BTreeSet<String>) -> usize {
        dims.iter()
            .map(|d| self.len_of(d).unwrap_or(0))
            .product()
    }
}

/// Odometer over a set of index ranges. The last axis turns fastest.
#[derive(Debug, Clone)]
pub struct Tuples {
    axes: Vec<(String, usize)>,
    next: Option<Vec<usize>>,
}

impl Iterator for Tuples {
    type Item = Iterargs;

    fn next(&mut self) -> Option<Iterargs> {
        let current = self.next.take()?;
        let iterargs = self
            .axes
            .iter()
            .zip(&current)
            .fold(Iterargs::new(), |acc, ((dim, _), idx)| acc.with(dim.clone(), *idx));

        let mut advanced = current;
        for pos in (0..self.axes.len()).rev() {
            advanced[pos] += 1;
            if advanced[pos] < self.axes[pos].1 {
                self.next = Some(advanced);
                return Some(iterargs);
            }
            advanced[pos] = 0;
        }
        Some(iterargs)
    }
}

#[cfg(test)]
#[path = "expander_tests.rs"]
mod tests;
