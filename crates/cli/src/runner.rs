// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Run orchestration.
//!
//! Resolves the plan, expands every selected check over its dimensions and
//! evaluates the resulting invocations, either in order on the calling
//! thread or across a rayon pool. Workers stream outcome events over a
//! channel to a single aggregator, so the report does not depend on how the
//! work was scheduled.

use std::thread;

use rayon::prelude::*;

use crate::aggregate::{Aggregator, OutcomeEvent, Report};
use crate::check::Check;
use crate::error::{Error, Result};
use crate::evaluator::{Invocation, Run};
use crate::expander::Dimensions;
use crate::filter::{FilterChain, Selection};
use crate::profile::Profile;
use crate::resolver::{Plan, resolve};
use crate::value::{Iterargs, Values};

/// Configuration for a run.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Worker threads. `1` evaluates on the calling thread, `0` uses every
    /// available core.
    pub jobs: usize,
    /// Which checks take part.
    pub selection: Selection,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            jobs: 1,
            selection: Selection::all(),
        }
    }
}

/// Executes a profile against a set of values.
#[derive(Debug, Clone, Default)]
pub struct Runner {
    config: RunnerConfig,
    filters: FilterChain,
}

impl Runner {
    pub fn new(config: RunnerConfig) -> Self {
        Self {
            config,
            filters: FilterChain::new(),
        }
    }

    /// Caller predicates, consulted after the profile's own.
    pub fn with_filters(mut self, filters: FilterChain) -> Self {
        self.filters = filters;
        self
    }

    /// Validate `values` and resolve the dependency plan without running.
    pub fn plan(&self, profile: &Profile, values: &Values) -> Result<Plan> {
        for name in profile.expected_values() {
            if !values.contains_key(name) {
                return Err(Error::InvalidValue {
                    name: name.clone(),
                    message: format!("required by profile `{}` but not supplied", profile.name),
                });
            }
        }
        resolve(profile, values, &self.config.selection)
    }

    /// Run every selected check and return the aggregated report.
    ///
    /// Configuration faults (unknown names, cycles, bad values) abort before
    /// any check runs. Failures inside checks and conditions never abort;
    /// they are reported as `ERROR` outcomes.
    pub fn run(&self, profile: &Profile, values: &Values) -> Result<Report> {
        let plan = self.plan(profile, values)?;
        let dims = Dimensions::measure(profile, &plan, values)?;
        let run = Run::new(profile, &plan, values, &dims, &self.filters);
        let mut aggregator = Aggregator::new(profile, &plan);

        let jobs = match self.config.jobs {
            0 => thread::available_parallelism().map_or(1, usize::from),
            n => n,
        };
        tracing::info!(
            "running {} checks from profile {} with {} job(s)",
            plan.checks().len(),
            profile.name,
            jobs
        );

        let work = invocations(profile, &plan, &dims);
        if jobs <= 1 {
            for (check, iterargs) in work {
                for event in evaluate(&run, check, &iterargs) {
                    aggregator.push(event);
                }
            }
        } else {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build()
                .map_err(|e| Error::Internal(format!("failed to start worker pool: {e}")))?;
            let (tx, rx) = crossbeam_channel::unbounded::<OutcomeEvent>();
            let run = &run;

            thread::scope(|scope| {
                scope.spawn(move || {
                    pool.install(|| {
                        work.par_bridge().for_each_with(tx, |tx, (check, iterargs)| {
                            for event in evaluate(run, check, &iterargs) {
                                // Receiver outlives every sender.
                                let _ = tx.send(event);
                            }
                        });
                    });
                });
                for event in rx {
                    aggregator.push(event);
                }
            });
        }

        tracing::debug!(
            "{} outcomes (worst: {}), {} cached cells",
            aggregator.len(),
            aggregator.worst().map_or("none".to_string(), |s| s.to_string()),
            run.cached_cells()
        );
        Ok(aggregator.finish())
    }
}

/// Lazily expand every planned check into (check, binding) pairs.
fn invocations<'a>(
    profile: &'a Profile,
    plan: &'a Plan,
    dims: &'a Dimensions,
) -> impl Iterator<Item = (&'a Check, Iterargs)> + Send + 'a {
    plan.checks()
        .iter()
        .filter_map(move |planned| {
            profile
                .registry
                .check(&planned.id)
                .map(|check| (check, planned))
        })
        .flat_map(move |(check, planned)| dims.tuples(&planned.dims).map(move |t| (check, t)))
}

fn evaluate(run: &Run<'_>, check: &Check, iterargs: &Iterargs) -> Vec<OutcomeEvent> {
    let Invocation::Outcomes(outcomes) = run.invoke(check, iterargs) else {
        return Vec::new();
    };
    let subject = run.subject(iterargs).map(|v| v.label());
    outcomes
        .into_iter()
        .enumerate()
        .map(|(seq, outcome)| OutcomeEvent {
            check_id: check.id.clone(),
            iterargs: iterargs.clone(),
            subject: subject.clone(),
            seq,
            outcome,
        })
        .collect()
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
