// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Outcome aggregation.
//!
//! Events arrive in whatever order workers finish. Each one is folded into
//! its check's bucket as it arrives, and running counts and worst
//! severities are kept per check, per section and for the whole run.
//! [`Aggregator::finish`] only puts outcomes in invocation order, so the
//! report is identical regardless of scheduling.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::Serialize;

use crate::check::Priority;
use crate::outcome::{Outcome, Severity};
use crate::profile::Profile;
use crate::resolver::Plan;
use crate::value::Iterargs;

/// One outcome emitted by one check invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct OutcomeEvent {
    pub check_id: String,
    pub iterargs: Iterargs,
    /// Label of the invocation's subject, usually a font path.
    pub subject: Option<String>,
    /// Position of the outcome within its invocation.
    pub seq: usize,
    pub outcome: Outcome,
}

/// Outcome count per severity. Every severity is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Counts(BTreeMap<Severity, usize>);

impl Default for Counts {
    fn default() -> Self {
        Self(Severity::ALL.iter().map(|s| (*s, 0)).collect())
    }
}

impl Counts {
    pub fn add(&mut self, severity: Severity) {
        *self.0.entry(severity).or_default() += 1;
    }

    pub fn get(&self, severity: Severity) -> usize {
        self.0.get(&severity).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    /// Non-zero counts in ascending severity order.
    pub fn nonzero(&self) -> impl Iterator<Item = (Severity, usize)> + '_ {
        self.0.iter().filter(|(_, n)| **n > 0).map(|(s, n)| (*s, *n))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvocationReport {
    pub iterargs: Iterargs,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub outcomes: Vec<Outcome>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckReport {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
    pub priority: Priority,
    pub invocations: Vec<InvocationReport>,
    /// Worst severity over every invocation; `None` when nothing was reported.
    pub worst: Option<Severity>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionReport {
    pub name: String,
    pub checks: Vec<CheckReport>,
    pub counts: Counts,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Summary {
    pub checks: usize,
    pub invocations: usize,
    pub counts: Counts,
}

/// Final, deterministically ordered result of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub profile: String,
    pub sections: Vec<SectionReport>,
    pub summary: Summary,
    pub worst: Option<Severity>,
}

impl Report {
    /// Whether any outcome is at least as bad as `threshold`.
    pub fn fails_at(&self, threshold: Severity) -> bool {
        self.worst.is_some_and(|worst| worst >= threshold)
    }

    pub fn checks(&self) -> impl Iterator<Item = &CheckReport> {
        self.sections.iter().flat_map(|s| s.checks.iter())
    }

    pub fn check(&self, id: &str) -> Option<&CheckReport> {
        self.checks().find(|c| c.id == id)
    }
}

#[derive(Debug, Clone, Default)]
struct Bucket {
    subject: Option<String>,
    /// Outcomes tagged with their position in the invocation.
    outcomes: Vec<(usize, Outcome)>,
}

#[derive(Debug, Clone)]
struct CheckState {
    section: String,
    rationale: Option<String>,
    priority: Priority,
    invocations: BTreeMap<Iterargs, Bucket>,
    tally: Tally,
}

#[derive(Debug, Clone, Default)]
struct Tally {
    counts: Counts,
    worst: Option<Severity>,
}

impl Tally {
    fn add(&mut self, severity: Severity) {
        self.counts.add(severity);
        self.worst = self.worst.max(Some(severity));
    }
}

/// Collects [`OutcomeEvent`]s during a run.
#[derive(Debug, Clone)]
pub struct Aggregator {
    profile: String,
    /// Sections holding planned checks, in registry order.
    sections: IndexMap<String, Tally>,
    /// Planned checks by id, in planned order.
    checks: IndexMap<String, CheckState>,
    total: Tally,
    invocations: usize,
    events: usize,
}

impl Aggregator {
    /// Prepare for the checks of `plan`, in their planned order.
    pub fn new(profile: &Profile, plan: &Plan) -> Self {
        let checks: IndexMap<String, CheckState> = plan
            .checks()
            .iter()
            .map(|planned| {
                let check = profile.registry.check(&planned.id);
                let state = CheckState {
                    section: planned.section.clone(),
                    rationale: check.and_then(|c| c.rationale.clone()),
                    priority: check.map(|c| c.priority).unwrap_or_default(),
                    invocations: BTreeMap::new(),
                    tally: Tally::default(),
                };
                (planned.id.clone(), state)
            })
            .collect();
        let sections = profile
            .registry
            .sections()
            .filter(|s| checks.values().any(|c| c.section == s.name))
            .map(|s| (s.name.clone(), Tally::default()))
            .collect();
        Self {
            profile: profile.name.clone(),
            sections,
            checks,
            total: Tally::default(),
            invocations: 0,
            events: 0,
        }
    }

    /// Fold one event into the running totals.
    pub fn push(&mut self, event: OutcomeEvent) {
        let Some(state) = self.checks.get_mut(&event.check_id) else {
            tracing::warn!("dropping outcome for unplanned check {}", event.check_id);
            return;
        };
        let severity = event.outcome.severity;

        let bucket = state.invocations.entry(event.iterargs).or_insert_with(|| {
            self.invocations += 1;
            Bucket::default()
        });
        if bucket.subject.is_none() {
            bucket.subject = event.subject;
        }
        bucket.outcomes.push((event.seq, event.outcome));

        state.tally.add(severity);
        if let Some(section) = self.sections.get_mut(&state.section) {
            section.add(severity);
        }
        self.total.add(severity);
        self.events += 1;
    }

    /// Outcomes folded so far.
    pub fn len(&self) -> usize {
        self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events == 0
    }

    /// Worst severity seen so far over the whole run.
    pub fn worst(&self) -> Option<Severity> {
        self.total.worst
    }

    /// Outcome counts seen so far over the whole run.
    pub fn counts(&self) -> &Counts {
        &self.total.counts
    }

    /// Worst severity seen so far for one check.
    pub fn check_worst(&self, id: &str) -> Option<Severity> {
        self.checks.get(id).and_then(|c| c.tally.worst)
    }

    /// Outcome counts seen so far for one check.
    pub fn check_counts(&self, id: &str) -> Option<&Counts> {
        self.checks.get(id).map(|c| &c.tally.counts)
    }

    /// Outcome counts seen so far for one section.
    pub fn section_counts(&self, name: &str) -> Option<&Counts> {
        self.sections.get(name).map(|t| &t.counts)
    }

    /// Build the report. Calling it again yields an equal report.
    pub fn finish(&self) -> Report {
        let sections = self
            .sections
            .iter()
            .map(|(name, tally)| SectionReport {
                name: name.clone(),
                checks: self
                    .checks
                    .iter()
                    .filter(|(_, state)| &state.section == name)
                    .map(|(id, state)| check_report(id, state))
                    .collect(),
                counts: tally.counts.clone(),
            })
            .collect();

        Report {
            profile: self.profile.clone(),
            sections,
            summary: Summary {
                checks: self.checks.len(),
                invocations: self.invocations,
                counts: self.total.counts.clone(),
            },
            worst: self.total.worst,
        }
    }
}

fn check_report(id: &str, state: &CheckState) -> CheckReport {
    let invocations = state
        .invocations
        .iter()
        .map(|(iterargs, bucket)| {
            let mut outcomes = bucket.outcomes.clone();
            outcomes.sort_by_key(|(seq, _)| *seq);
            InvocationReport {
                iterargs: iterargs.clone(),
                subject: bucket.subject.clone(),
                outcomes: outcomes.into_iter().map(|(_, outcome)| outcome).collect(),
            }
        })
        .collect();
    CheckReport {
        id: id.to_string(),
        rationale: state.rationale.clone(),
        priority: state.priority,
        invocations,
        worst: state.tally.worst,
    }
}

#[cfg(test)]
#[path = "aggregate_tests.rs"]
mod tests;
