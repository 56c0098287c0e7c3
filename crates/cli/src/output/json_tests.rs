// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use crate::aggregate::{Counts, Summary};

fn report(worst: Option<Severity>) -> Report {
    let mut counts = Counts::default();
    if let Some(worst) = worst {
        counts.add(worst);
    }
    Report {
        profile: "sil".to_string(),
        sections: Vec::new(),
        summary: Summary {
            checks: 1,
            invocations: 1,
            counts,
        },
        worst,
    }
}

fn render(report: &Report, fail_on: Severity) -> serde_json::Value {
    let mut buffer = Vec::new();
    JsonFormatter::new(&mut buffer).write(report, fail_on).unwrap();
    serde_json::from_slice(&buffer).unwrap()
}

#[test]
fn outputs_report_fields_at_top_level() {
    let json = render(&report(Some(Severity::Pass)), Severity::Fail);
    assert_eq!(json["profile"], "sil");
    assert_eq!(json["fail_on"], "fail");
    assert_eq!(json["summary"]["checks"], 1);
    assert_eq!(json["summary"]["counts"]["pass"], 1);
    assert_eq!(json["summary"]["counts"]["error"], 0);
    assert!(json["sections"].as_array().unwrap().is_empty());
}

#[test]
fn passed_follows_threshold() {
    assert_eq!(render(&report(Some(Severity::Warn)), Severity::Fail)["passed"], true);
    assert_eq!(render(&report(Some(Severity::Warn)), Severity::Warn)["passed"], false);
    assert_eq!(render(&report(None), Severity::Debug)["passed"], true);
}

#[test]
fn timestamp_is_rfc3339_utc() {
    let stamp = timestamp();
    // 2026-01-21T10:30:00Z
    assert!(stamp.contains('T'));
    assert!(stamp.ends_with('Z'));
    assert_eq!(stamp.len(), 20);
}
