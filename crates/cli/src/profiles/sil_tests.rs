// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::path::PathBuf;

use yare::parameterized;

use super::*;
use crate::aggregate::{CheckReport, Report};
use crate::font::{FontHandle, NameRecord};
use crate::outcome::Severity;
use crate::profiles::common::{APACHE_PLACEHOLDER, APACHE_URL, OFL_PLACEHOLDER, OFL_URL};
use crate::profiles::font_values;
use crate::runner::{Runner, RunnerConfig};
use crate::test_utils::{FakeFs, FakeLoader};

fn record(name_id: u16, value: &str) -> NameRecord {
    NameRecord {
        platform_id: 3,
        encoding_id: 1,
        language_id: 0x409,
        name_id,
        value: value.to_string(),
    }
}

fn font(path: &str, weight: u16, names: Vec<NameRecord>) -> FontHandle {
    let mut handle = FontHandle::new(path);
    handle.tables = vec!["OS/2".into(), "name".into(), "post".into()];
    handle.weight_class = Some(weight);
    handle.underline_thickness = Some(50);
    handle.names = names;
    handle
}

fn ofl_names() -> Vec<NameRecord> {
    vec![
        record(NAMEID_LICENSE_DESCRIPTION, OFL_PLACEHOLDER),
        record(NAMEID_LICENSE_INFO_URL, OFL_URL),
    ]
}

fn run(fonts: Vec<FontHandle>, extra: &[&str], project_files: &[&str]) -> Report {
    let paths: Vec<PathBuf> = fonts
        .iter()
        .map(|f| f.path().to_path_buf())
        .chain(extra.iter().map(PathBuf::from))
        .collect();
    let loader = FakeLoader::new(fonts);
    let fs = FakeFs::new(project_files.iter().copied());
    let profile = profile(Arc::new(loader), Arc::new(fs)).unwrap();
    Runner::new(RunnerConfig::default())
        .run(&profile, &font_values(paths))
        .unwrap()
}

fn severities(check: &CheckReport) -> Vec<Vec<Severity>> {
    check
        .invocations
        .iter()
        .map(|i| i.outcomes.iter().map(|o| o.severity).collect())
        .collect()
}

fn codes(check: &CheckReport) -> Vec<Option<String>> {
    check
        .invocations
        .iter()
        .flat_map(|i| &i.outcomes)
        .map(|o| o.message.code.clone())
        .collect()
}

#[test]
fn profile_registers_every_check_in_sections() {
    let p = profile(
        Arc::new(FakeLoader::default()),
        Arc::new(FakeFs::default()),
    )
    .unwrap();

    let ids: Vec<&str> = p
        .registry
        .all_checks(None)
        .iter()
        .map(|c| c.id.as_str())
        .collect();
    assert_eq!(ids.len(), 8);
    assert_eq!(ids[0], "org.sil.software/check/helloworld");
    assert_eq!(ids.last(), Some(&"org.sil.scripts/check/006"));
    assert!(ids.iter().all(|id| id.starts_with("org.sil.")));

    assert_eq!(p.registry.sections().count(), 1);
    assert_eq!(p.registry.default_section(), DEFAULT_SECTION);
    assert!(p.registry.condition("expected_os2_weight").unwrap().force);
}

#[test]
fn healthy_ofl_family_passes() {
    let report = run(
        vec![
            font("fam/Foo-Regular.ttf", 400, ofl_names()),
            font("fam/Foo-Bold.ttf", 700, ofl_names()),
        ],
        &[],
        &["fam/OFL.txt", "fam/OFL-FAQ.txt"],
    );

    for id in [
        "org.sil.software/check/helloworld",
        "org.sil.scripts/check/001",
        "org.sil.scripts/check/002",
        "org.sil.scripts/check/003",
        "org.sil.scripts/check/004",
        "org.sil.scripts/check/005",
        "org.sil.scripts/check/006",
    ] {
        let check = report.check(id).unwrap();
        assert!(!check.invocations.is_empty(), "{id} did not run");
        assert_eq!(check.worst, Some(Severity::Pass), "{id}: {check:?}");
    }
    assert_eq!(report.check("org.sil.scripts/check/001").unwrap().invocations.len(), 2);
    assert_eq!(report.check("org.sil.scripts/check/003").unwrap().invocations.len(), 1);
}

#[test]
fn has_r_looks_at_whole_path() {
    let report = run(
        vec![
            font("fam/Foo-Regular.ttf", 400, ofl_names()),
            font("fam/Foo-Bold.ttf", 700, ofl_names()),
        ],
        &[],
        &[],
    );
    let check = report.check("org.sil.software/check/has-R").unwrap();
    assert_eq!(
        severities(check),
        [[Severity::Pass], [Severity::Fail]]
    );
}

#[test]
fn has_r_accepts_r_in_directory() {
    let report = run(
        vec![font("Roboto/foo-bold.ttf", 700, ofl_names())],
        &[],
        &[],
    );
    let check = report.check("org.sil.software/check/has-R").unwrap();
    assert_eq!(severities(check), [[Severity::Pass]]);
}

#[test]
fn license_count_reports_none_and_multiple() {
    let fonts = || vec![font("fam/Foo-Regular.ttf", 400, ofl_names())];

    let none = run(fonts(), &[], &[]);
    let check = none.check("org.sil.scripts/check/003").unwrap();
    assert_eq!(codes(check), [Some("none".to_string())]);

    let multiple = run(fonts(), &[], &["fam/OFL.txt", "fam/LICENSE.txt"]);
    let check = multiple.check("org.sil.scripts/check/003").unwrap();
    assert_eq!(codes(check), [Some("multiple".to_string())]);
}

#[test]
fn license_description_is_gated_without_single_license() {
    let report = run(vec![font("fam/Foo-Regular.ttf", 400, ofl_names())], &[], &[]);
    let check = report.check("org.sil.scripts/check/004").unwrap();
    assert!(check.invocations.is_empty());
    assert_eq!(check.worst, None);
}

#[test]
fn license_description_must_match_placeholder() {
    let names = vec![
        record(NAMEID_LICENSE_DESCRIPTION, "All rights reserved"),
        record(NAMEID_LICENSE_INFO_URL, OFL_URL),
    ];
    let report = run(
        vec![font("fam/Foo-Regular.ttf", 400, names)],
        &[],
        &["fam/OFL.txt"],
    );
    let check = report.check("org.sil.scripts/check/004").unwrap();
    assert_eq!(codes(check), [Some("wrong".to_string())]);
    let text = &check.invocations[0].outcomes[0].message.text;
    assert!(text.contains("WINDOWS"));
    assert!(text.contains(OFL_PLACEHOLDER));
}

#[test]
fn license_description_missing_entry() {
    let names = vec![record(NAMEID_LICENSE_INFO_URL, OFL_URL)];
    let report = run(
        vec![font("fam/Foo-Regular.ttf", 400, names)],
        &[],
        &["fam/ofl.txt"],
    );
    let check = report.check("org.sil.scripts/check/004").unwrap();
    assert_eq!(codes(check), [Some("missing".to_string())]);
}

#[test]
fn license_url_inconsistency_is_reported() {
    let names = vec![
        record(NAMEID_LICENSE_DESCRIPTION, OFL_PLACEHOLDER),
        record(NAMEID_LICENSE_INFO_URL, APACHE_URL),
    ];
    let report = run(vec![font("fam/Foo-Regular.ttf", 400, names)], &[], &[]);
    let check = report.check("org.sil.scripts/check/005").unwrap();
    assert_eq!(
        codes(check),
        [
            Some("licensing-inconsistency".to_string()),
            Some("no-license-found".to_string())
        ]
    );
}

#[test]
fn license_url_with_extra_bad_entry() {
    let names = vec![
        record(NAMEID_LICENSE_DESCRIPTION, APACHE_PLACEHOLDER),
        record(NAMEID_LICENSE_INFO_URL, APACHE_URL),
        record(NAMEID_LICENSE_INFO_URL, "http://example.com"),
    ];
    let report = run(vec![font("fam/Foo-Regular.ttf", 400, names)], &[], &[]);
    let check = report.check("org.sil.scripts/check/005").unwrap();
    assert_eq!(
        codes(check),
        [
            Some("licensing-inconsistency".to_string()),
            Some("bad-entries".to_string())
        ]
    );
}

#[parameterized(
    matches = { "fam/Foo-Regular.ttf", 400, Some(Severity::Pass) },
    italic_is_regular = { "fam/Foo-Italic.ttf", 400, Some(Severity::Pass) },
    bold_italic = { "fam/Foo-BoldItalic.ttf", 700, Some(Severity::Pass) },
    wrong = { "fam/Foo-Bold.ttf", 400, Some(Severity::Fail) },
    extralight_250 = { "fam/Foo-ExtraLight.ttf", 250, Some(Severity::Warn) },
    thin_250 = { "fam/Foo-Thin.ttf", 250, Some(Severity::Pass) },
    no_style = { "fam/Foo.ttf", 400, None },
)]
fn weight_class_matches_style(path: &str, weight: u16, expected: Option<Severity>) {
    let report = run(vec![font(path, weight, ofl_names())], &[], &[]);
    let check = report.check("org.sil.scripts/check/006").unwrap();
    assert_eq!(check.worst, expected);
}

#[test]
fn unparseable_font_errors_only_its_own_checks() {
    let report = run(
        vec![font("fam/Foo-Regular.ttf", 400, ofl_names())],
        &["fam/Broken-Regular.ttf"],
        &["fam/OFL.txt"],
    );

    let check = report.check("org.sil.scripts/check/006").unwrap();
    assert_eq!(severities(check), [[Severity::Pass], [Severity::Error]]);
    let error = &check.invocations[1].outcomes[0].message.text;
    assert!(error.contains("not a font"), "{error}");

    // Filename-only checks still see both fonts.
    let canonical = report.check("org.sil.scripts/check/001").unwrap();
    assert_eq!(severities(canonical), [[Severity::Pass], [Severity::Pass]]);
}

#[test]
fn unwanted_google_checks_are_filtered() {
    let p = profile(
        Arc::new(FakeLoader::default()),
        Arc::new(FakeFs::default()),
    )
    .unwrap();
    let none = crate::value::Iterargs::new();
    for id in UNWANTED_CHECKS {
        assert!(!p.filters().disable_verdict(id, None, &none).is_allowed());
        assert_eq!(
            p.filters().skip_verdict(id, None, &none),
            crate::filter::Verdict::deny(UNWANTED_REASON)
        );
    }
    assert!(p
        .filters()
        .disable_verdict("org.sil.scripts/check/001", None, &none)
        .is_allowed());
}
