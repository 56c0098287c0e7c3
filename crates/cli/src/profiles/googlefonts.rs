// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Checks for fonts served by Google Fonts.
//!
//! License files are looked up next to each font rather than once per
//! family, so this profile's `licenses` condition takes `font`, not a
//! family directory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::common;
use crate::args::Args;
use crate::check::{Check, Condition, Priority};
use crate::error::Result;
use crate::font::{FontHandle, FontLoader, NAMEID_LICENSE_INFO_URL};
use crate::fs::FileSystem;
use crate::outcome::{Message, Outcome};
use crate::profile::Profile;
use crate::registry::Section;
use crate::value::Value;

pub const NAME: &str = "googlefonts";
pub const DEFAULT_SECTION: &str = "Default";

/// License files looked for next to each font, in order.
pub const LICENSE_FILES: [&str; 2] = ["OFL.txt", "LICENSE.txt"];

const POST_VERSION_ISSUE: &str = "https://github.com/google/fonts/issues/215";

/// Build the Google Fonts profile around the given collaborators.
pub fn profile(loader: Arc<dyn FontLoader>, fs: Arc<dyn FileSystem>) -> Result<Profile> {
    let mut p = Profile::new(NAME, Section::new(DEFAULT_SECTION));
    p.iterarg("font", "fonts")?;
    p.derived("ttFonts", "ttFont")?;
    p.expect_value("fonts");

    p.register(
        Condition::new("ttFont", move |args| {
            let font = loader.open(args.path("font")?)?;
            Ok(Some(Value::from(font)))
        })
        .input("font"),
    )?;

    p.register(
        Condition::new("licenses", move |args| {
            let dir = font_directory(args.path("font")?);
            let found: Vec<Value> = LICENSE_FILES
                .iter()
                .map(|name| dir.join(name))
                .filter(|path| fs.exists(path))
                .map(Value::Path)
                .collect();
            Ok(Some(Value::List(found)))
        })
        .rationale("License files next to the font.")
        .input("font"),
    )?;

    p.register(
        Condition::new("license", |args| match args.list("licenses")? {
            [only] => Ok(Some(only.clone())),
            _ => Ok(None),
        })
        .rationale("The license path, when there is exactly one.")
        .input("licenses"),
    )?;

    register_checks(&mut p)?;
    Ok(p)
}

fn register_checks(p: &mut Profile) -> Result<()> {
    p.register(
        Check::new("com.google.fonts/test/001", |args| {
            Ok(vec![common::canonical_filename(args.path("font")?)])
        })
        .rationale(
            "A font's filename must be composed as <familyname>-<stylename>.ttf, \
             e.g. Nunito-Regular.ttf or Oswald-BoldItalic.ttf.",
        )
        .priority(Priority::Critical)
        .input("font"),
    )?;

    p.register(
        Check::new("com.google.fonts/test/008", check_underline_thickness)
            .rationale("Fonts have consistent underline thickness?")
            .input("ttFonts"),
    )?;

    p.register(
        Check::new("com.google.fonts/test/015", check_post_version)
            .rationale("Font has post table version 2?")
            .input("ttFont"),
    )?;

    p.register(
        Check::new("com.google.fonts/test/028", check_license_count)
            .rationale("Check font has a license.")
            .input("licenses"),
    )?;

    p.register(
        Check::new("com.google.fonts/test/030", |args| {
            let font = args.font("ttFont")?;
            Ok(common::license_url(
                font,
                &format!(
                    "A License URL must be provided in the NameID {NAMEID_LICENSE_INFO_URL} \
                     (LICENSE INFO URL) entry."
                ),
            ))
        })
        .rationale("License URL matches License text on name table?")
        .priority(Priority::Critical)
        .condition("license")
        .input("ttFont"),
    )?;

    p.register(
        Check::new("com.google.fonts/test/031", |args| {
            Ok(vec![common::description_copyright(args.font("ttFont")?)])
        })
        .rationale("Description strings in the name table must not contain copyright info.")
        .priority(Priority::Critical)
        .input("ttFont"),
    )?;

    Ok(())
}

fn check_underline_thickness(args: &Args) -> anyhow::Result<Vec<Outcome>> {
    let fonts: Vec<&FontHandle> = args
        .list("ttFonts")?
        .iter()
        .filter_map(Value::as_font)
        .collect();
    let Some(first) = fonts.first() else {
        return Ok(vec![Outcome::info("No fonts could be decoded.")]);
    };

    let outliers: Vec<String> = fonts
        .iter()
        .filter(|f| f.underline_thickness != first.underline_thickness)
        .map(|f| f.path().display().to_string())
        .collect();
    if outliers.is_empty() {
        return Ok(vec![Outcome::pass("Fonts have consistent underline thickness.")]);
    }
    Ok(vec![Outcome::fail(Message::with_code(
        "inconsistent-underline-thickness",
        format!(
            "Thickness of the underline is not the same across this family ({} differs from {}). \
             Make sure that the underlineThickness value is the same in the 'post' table of all \
             of this family font files.",
            outliers.join(", "),
            first.path().display()
        ),
    ))])
}

fn check_post_version(args: &Args) -> anyhow::Result<Vec<Outcome>> {
    let font = args.font("ttFont")?;
    if !font.has_table("post") {
        return Ok(vec![Outcome::fail(Message::with_code(
            "missing-post",
            "Font lacks a post table.",
        ))]);
    }
    let Some((major, minor)) = font.post_version else {
        anyhow::bail!("post table of {} could not be decoded", font.path().display());
    };
    if (major, minor) == (2, 0) {
        return Ok(vec![Outcome::pass("Font has post table version 2.")]);
    }
    Ok(vec![Outcome::fail(Message::with_code(
        "bad-version",
        format!(
            "Post table should be version 2 instead of {major}.{minor}. \
             More info at {POST_VERSION_ISSUE}"
        ),
    ))])
}

fn check_license_count(args: &Args) -> anyhow::Result<Vec<Outcome>> {
    let outcome = match args.list("licenses")? {
        [] => Outcome::fail(Message::with_code(
            "none",
            "No license file was found. Please add an OFL.txt or a LICENSE.txt file. If you are \
             running fontcheck on a Google Fonts upstream repo, which is fine, just make sure \
             there is a temporary license file in the same folder.",
        )),
        [only] => Outcome::pass(format!("Found license at '{}'", only.label())),
        _ => Outcome::fail(Message::with_code(
            "multiple",
            "More than a single license file found. Please review.",
        )),
    };
    Ok(vec![outcome])
}

fn font_directory(font: &Path) -> PathBuf {
    match font.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
#[path = "googlefonts_tests.rs"]
mod tests;
