// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Checks for SIL font projects.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::anyhow;

use super::common::{self, LicenseKind, platform_name, style_of};
use crate::args::Args;
use crate::check::{Check, Condition, Priority};
use crate::error::Result;
use crate::filter::IdListFilter;
use crate::font::{FontLoader, NAMEID_LICENSE_DESCRIPTION, NAMEID_LICENSE_INFO_URL};
use crate::fs::FileSystem;
use crate::outcome::{Message, Outcome};
use crate::profile::Profile;
use crate::registry::Section;
use crate::value::Value;

pub const NAME: &str = "sil";
pub const DEFAULT_SECTION: &str = "SIL Fonts";

/// Weight class served for each weight name.
pub const WEIGHTS: [(&str, u16); 9] = [
    ("Thin", 250),
    ("ExtraLight", 275),
    ("Light", 300),
    ("Regular", 400),
    ("Medium", 500),
    ("SemiBold", 600),
    ("Bold", 700),
    ("ExtraBold", 800),
    ("Black", 900),
];

/// License files looked for next to the fonts, in order.
pub const LICENSE_FILES: [&str; 3] = ["OFL.txt", "ofl.txt", "LICENSE.txt"];

/// Foreign check ids this profile never wants to see.
pub const UNWANTED_CHECKS: [&str; 3] = [
    "com.google.fonts/check/metadata/reserved_font_name",
    "com.google.fonts/check/description/broken_links",
    "com.google.fonts/check/name/rfn",
];
pub const UNWANTED_REASON: &str = "We do not want or care about these checks";

const EXTRALIGHT_250_WARNING: &str = "A value of 250 for OS/2 usWeightClass is acceptable for \
     TTFs (but not for OTFs), because it won't auto-bold (and blur) in Windows GDI apps. \
     However, since OTFs will, and because we'd like to have OTFs and TTFs be as consistent as \
     possible, we'd prefer ExtraLight to be 275 in both cases.";

/// Build the SIL profile around the given collaborators.
pub fn profile(loader: Arc<dyn FontLoader>, fs: Arc<dyn FileSystem>) -> Result<Profile> {
    let mut p = Profile::new(
        NAME,
        Section::new(DEFAULT_SECTION).description("Checks for SIL font projects"),
    );
    p.iterarg("font", "fonts")?;
    p.expect_value("fonts");

    register_conditions(&mut p, loader, fs.clone())?;
    register_checks(&mut p, fs)?;

    p.add_skip_filter(IdListFilter::new(UNWANTED_CHECKS, Some(UNWANTED_REASON)));
    p.add_disable_filter(IdListFilter::new(UNWANTED_CHECKS, Some(UNWANTED_REASON)));
    Ok(p)
}

fn register_conditions(
    p: &mut Profile,
    loader: Arc<dyn FontLoader>,
    fs: Arc<dyn FileSystem>,
) -> Result<()> {
    p.register(
        Condition::new("ttFont", move |args| {
            let font = loader.open(args.path("font")?)?;
            Ok(Some(Value::from(font)))
        })
        .rationale("The decoded font file.")
        .input("font"),
    )?;

    p.register(
        Condition::new("style", |args| {
            Ok(style_of(args.path("font")?).map(Value::from))
        })
        .rationale("Font style from the canonical file name.")
        .input("font"),
    )?;

    p.register(
        Condition::new("expected_os2_weight", |args| {
            let style = args.text("style")?;
            let weight_name = match style {
                "Italic" => "Regular",
                s => s.strip_suffix("Italic").unwrap_or(s),
            };
            let Some((_, value)) = WEIGHTS.iter().find(|(name, _)| *name == weight_name) else {
                return Ok(None);
            };
            let record = BTreeMap::from([
                ("name".to_string(), Value::from(weight_name)),
                ("value".to_string(), Value::Int(i64::from(*value))),
            ]);
            Ok(Some(Value::Record(record)))
        })
        .rationale("Weight name and OS/2 usWeightClass inferred from the style.")
        .input("style")
        .force(),
    )?;

    p.register(
        Condition::new("familyname", |args| {
            let stem = common::file_stem(args.path("font")?);
            let family = stem.split('-').next().unwrap_or_default();
            Ok(Some(Value::from(family)))
        })
        .rationale("Family name from the file name.")
        .input("font"),
    )?;

    p.register(
        Condition::new("family_directory", |args| {
            let Some(first) = args.list("fonts")?.first() else {
                return Ok(None);
            };
            let path = first
                .as_path()
                .ok_or_else(|| anyhow!("font entry is {} but path was expected", first.kind()))?;
            let dir = match path.parent() {
                Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
                _ => PathBuf::from("."),
            };
            Ok(Some(Value::Path(dir)))
        })
        .rationale("Directory holding the font project.")
        .input("fonts"),
    )?;

    p.register(
        Condition::new("licenses", move |args| {
            let dir = args.path("family_directory")?;
            let found: Vec<Value> = LICENSE_FILES
                .iter()
                .map(|name| dir.join(name))
                .filter(|path| fs.exists(path))
                .map(Value::Path)
                .collect();
            Ok(Some(Value::List(found)))
        })
        .rationale("Every license file found in the font project.")
        .input("family_directory"),
    )?;

    p.register(
        Condition::new("license_path", |args| match args.list("licenses")? {
            [only] => Ok(Some(only.clone())),
            _ => Ok(None),
        })
        .rationale("The license file, when there is exactly one.")
        .input("licenses"),
    )?;

    p.register(
        Condition::new("license", |args| {
            let name = args
                .path("license_path")?
                .file_name()
                .map(|n| n.to_string_lossy().into_owned());
            Ok(name.map(Value::from))
        })
        .rationale("File name of the license.")
        .input("license_path"),
    )?;

    Ok(())
}

fn register_checks(p: &mut Profile, fs: Arc<dyn FileSystem>) -> Result<()> {
    p.register(
        Check::new("org.sil.software/check/helloworld", |_| {
            Ok(vec![Outcome::pass("Hello (alphabets of the) World")])
        })
        .rationale("Simple \"Hello (alphabets of the) World\" example."),
    )?;

    p.register(
        Check::new("org.sil.software/check/has-R", |args| {
            let font = args.path("font")?;
            if font.to_string_lossy().contains('R') {
                Ok(vec![Outcome::pass("\"R\" is in font filename.")])
            } else {
                Ok(vec![Outcome::fail("\"R\" is not in font filename.")])
            }
        })
        .rationale("Filename contains an \"R\".")
        .input("font"),
    )?;

    p.register(
        Check::new("org.sil.scripts/check/001", check_canonical_filename)
            .rationale(
                "A font's filename must be composed as <familyname>-<stylename>.ttf, \
                 e.g. Nunito-Regular.ttf or Oswald-BoldItalic.ttf.",
            )
            .priority(Priority::Critical)
            .input("font"),
    )?;

    p.register(
        Check::new("org.sil.scripts/check/002", move |args| {
            let faq = args.path("family_directory")?.join("OFL-FAQ.txt");
            if fs.exists(&faq) {
                Ok(vec![Outcome::pass(format!("Found {}", faq.display()))])
            } else {
                Ok(vec![Outcome::fail(format!("{} is missing", faq.display())).code("missing")])
            }
        })
        .rationale("The OFL FAQ is shipped next to the fonts.")
        .priority(Priority::Critical)
        .input("family_directory"),
    )?;

    p.register(
        Check::new("org.sil.scripts/check/003", check_license_count)
            .rationale("The font project has exactly one license file.")
            .input("licenses"),
    )?;

    p.register(
        Check::new("org.sil.scripts/check/004", check_license_description)
            .rationale("Copyright name records match the license file.")
            .priority(Priority::Critical)
            .condition("license")
            .input("ttFont")
            .input("license"),
    )?;

    p.register(
        Check::new("org.sil.scripts/check/005", check_license_url)
            .rationale("License URL matches the license text in the name table.")
            .priority(Priority::Critical)
            .condition("familyname")
            .input("ttFont"),
    )?;

    p.register(
        Check::new("org.sil.scripts/check/006", check_weight_class)
            .rationale("OS/2 usWeightClass matches the weight named by the style.")
            .input("ttFont")
            .input("expected_os2_weight"),
    )?;

    Ok(())
}

fn check_canonical_filename(args: &Args) -> anyhow::Result<Vec<Outcome>> {
    Ok(vec![common::canonical_filename(args.path("font")?)])
}

fn check_license_count(args: &Args) -> anyhow::Result<Vec<Outcome>> {
    let licenses = args.list("licenses")?;
    let outcome = match licenses {
        [] => Outcome::fail(Message::with_code(
            "none",
            "No license file was found. Please add an OFL.txt or a LICENSE.txt file. If you are \
             running fontcheck on an upstream repo, which is fine, just make sure there is a \
             temporary license file in the same folder.",
        )),
        [only] => Outcome::pass(format!("Found license at '{}'", only.label())),
        _ => Outcome::fail(Message::with_code(
            "multiple",
            "More than a single license file found. Please review.",
        )),
    };
    Ok(vec![outcome])
}

fn check_license_description(args: &Args) -> anyhow::Result<Vec<Outcome>> {
    let font = args.font("ttFont")?;
    let license = args.text("license")?;
    let kind = LicenseKind::from_file_name(license)
        .ok_or_else(|| anyhow!("no placeholder text is known for license file {license}"))?;
    let placeholder = kind.placeholder();

    let mut outcomes = Vec::new();
    let mut found = false;
    for record in font.names_with_id(NAMEID_LICENSE_DESCRIPTION) {
        found = true;
        if record.value != placeholder {
            outcomes.push(Outcome::fail(Message::with_code(
                "wrong",
                format!(
                    "License file {license} exists but NameID {NAMEID_LICENSE_DESCRIPTION} \
                     (LICENSE DESCRIPTION) value on platform {} ({}) is not specified for that. \
                     Value was: \"{}\" Must be changed to \"{placeholder}\"",
                    record.platform_id,
                    platform_name(record.platform_id),
                    record.value,
                ),
            )));
        }
    }

    if !found {
        outcomes.push(Outcome::fail(Message::with_code(
            "missing",
            format!(
                "Font lacks NameID {NAMEID_LICENSE_DESCRIPTION} (LICENSE DESCRIPTION). A proper \
                 licensing entry must be set."
            ),
        )));
    } else if outcomes.is_empty() {
        outcomes.push(Outcome::pass("Licensing entry on name table is correctly set."));
    }
    Ok(outcomes)
}

fn check_license_url(args: &Args) -> anyhow::Result<Vec<Outcome>> {
    let font = args.font("ttFont")?;
    Ok(common::license_url(
        font,
        &format!(
            "A known license URL must be provided in the NameID {NAMEID_LICENSE_INFO_URL} \
             (LICENSE INFO URL) entry. Currently accepted licenses are Apache or Open Font \
             License."
        ),
    ))
}

fn check_weight_class(args: &Args) -> anyhow::Result<Vec<Outcome>> {
    let font = args.font("ttFont")?;
    let expected = args.record("expected_os2_weight")?;
    let name = expected
        .get("name")
        .and_then(Value::as_text)
        .ok_or_else(|| anyhow!("expected weight has no name"))?;
    let value = expected
        .get("value")
        .and_then(Value::as_int)
        .ok_or_else(|| anyhow!("expected weight has no value"))?;

    let Some(actual) = font.weight_class else {
        return Ok(vec![Outcome::fail(Message::with_code(
            "missing-os2",
            "Font lacks an OS/2 table.",
        ))]);
    };

    let outcome = if i64::from(actual) == value {
        Outcome::pass(format!("OS/2 usWeightClass is {actual} as expected for {name}."))
    } else if name == "ExtraLight" && actual == 250 {
        Outcome::warn(Message::with_code("extralight-250", EXTRALIGHT_250_WARNING))
    } else {
        Outcome::fail(Message::with_code(
            "bad-value",
            format!("OS/2 usWeightClass expected value for '{name}' is {value} but this font has {actual}."),
        ))
    };
    Ok(vec![outcome])
}

#[cfg(test)]
#[path = "sil_tests.rs"]
mod tests;
