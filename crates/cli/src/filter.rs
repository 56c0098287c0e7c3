// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Skip/disable predicate chains and check selection.
//!
//! Predicates are consulted before any input of a check is resolved. The
//! disable chain omits an invocation entirely; the skip chain replaces it
//! with a single `SKIP` outcome carrying the predicate's reason.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::error::{Error, Result};
use crate::value::{Iterargs, Value};

/// A predicate's answer for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Allow,
    Deny(Option<String>),
}

impl Verdict {
    pub fn deny(reason: impl Into<String>) -> Self {
        Verdict::Deny(Some(reason.into()))
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, Verdict::Allow)
    }
}

/// A skip or disable predicate.
///
/// `subject` is the value bound to the invocation's first iteration
/// dimension (typically the font path), if any.
pub trait FilterPredicate: Send + Sync {
    fn verdict(&self, check_id: &str, subject: Option<&Value>, iterargs: &Iterargs) -> Verdict;
}

impl<F> FilterPredicate for F
where
    F: Fn(&str, Option<&Value>, &Iterargs) -> Verdict + Send + Sync,
{
    fn verdict(&self, check_id: &str, subject: Option<&Value>, iterargs: &Iterargs) -> Verdict {
        self(check_id, subject, iterargs)
    }
}

/// Ordered skip and disable predicates. First denial wins.
#[derive(Clone, Default)]
pub struct FilterChain {
    skip: Vec<Arc<dyn FilterPredicate>>,
    disable: Vec<Arc<dyn FilterPredicate>>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_skip(&mut self, predicate: impl FilterPredicate + 'static) {
        self.skip.push(Arc::new(predicate));
    }

    pub fn add_disable(&mut self, predicate: impl FilterPredicate + 'static) {
        self.disable.push(Arc::new(predicate));
    }

    pub fn with_skip(mut self, predicate: impl FilterPredicate + 'static) -> Self {
        self.add_skip(predicate);
        self
    }

    pub fn with_disable(mut self, predicate: impl FilterPredicate + 'static) -> Self {
        self.add_disable(predicate);
        self
    }

    /// `self`'s predicates followed by `other`'s.
    pub fn then(&self, other: &FilterChain) -> FilterChain {
        FilterChain {
            skip: self.skip.iter().chain(&other.skip).cloned().collect(),
            disable: self.disable.iter().chain(&other.disable).cloned().collect(),
        }
    }

    pub fn skip_verdict(&self, check_id: &str, subject: Option<&Value>, iterargs: &Iterargs) -> Verdict {
        first_denial(&self.skip, check_id, subject, iterargs)
    }

    pub fn disable_verdict(
        &self,
        check_id: &str,
        subject: Option<&Value>,
        iterargs: &Iterargs,
    ) -> Verdict {
        first_denial(&self.disable, check_id, subject, iterargs)
    }

    pub fn is_empty(&self) -> bool {
        self.skip.is_empty() && self.disable.is_empty()
    }
}

impl fmt::Debug for FilterChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterChain")
            .field("skip", &self.skip.len())
            .field("disable", &self.disable.len())
            .finish()
    }
}

fn first_denial(
    chain: &[Arc<dyn FilterPredicate>],
    check_id: &str,
    subject: Option<&Value>,
    iterargs: &Iterargs,
) -> Verdict {
    chain
        .iter()
        .map(|p| p.verdict(check_id, subject, iterargs))
        .find(|v| !v.is_allowed())
        .unwrap_or(Verdict::Allow)
}

/// Denies an exact list of check ids.
#[derive(Debug, Clone)]
pub struct IdListFilter {
    ids: HashSet<String>,
    reason: Option<String>,
}

impl IdListFilter {
    pub fn new<I, S>(ids: I, reason: Option<&str>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
            reason: reason.map(String::from),
        }
    }
}

impl FilterPredicate for IdListFilter {
    fn verdict(&self, check_id: &str, _subject: Option<&Value>, _iterargs: &Iterargs) -> Verdict {
        if self.ids.contains(check_id) {
            Verdict::Deny(self.reason.clone())
        } else {
            Verdict::Allow
        }
    }
}

/// Denies check ids matching any of a set of glob patterns.
#[derive(Debug, Clone)]
pub struct PatternFilter {
    set: GlobSet,
    reason: Option<String>,
}

impl PatternFilter {
    pub fn new(patterns: &[String], reason: Option<&str>) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| Error::Config {
                message: format!("invalid check pattern `{pattern}`: {e}"),
                path: None,
            })?;
            builder.add(glob);
        }
        let set = builder.build().map_err(|e| Error::Config {
            message: format!("invalid check patterns: {e}"),
            path: None,
        })?;
        Ok(Self {
            set,
            reason: reason.map(String::from),
        })
    }
}

impl FilterPredicate for PatternFilter {
    fn verdict(&self, check_id: &str, _subject: Option<&Value>, _iterargs: &Iterargs) -> Verdict {
        if self.set.is_match(check_id) {
            Verdict::Deny(self.reason.clone())
        } else {
            Verdict::Allow
        }
    }
}

/// Which checks take part in a run, by id substring.
///
/// An empty include list selects everything; excludes always win.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl Selection {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn matches(&self, check_id: &str) -> bool {
        let included =
            self.include.is_empty() || self.include.iter().any(|p| check_id.contains(p.as_str()));
        included && !self.exclude.iter().any(|p| check_id.contains(p.as_str()))
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
