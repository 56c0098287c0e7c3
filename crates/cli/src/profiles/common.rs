// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Naming and licensing rules shared by the bundled profiles.

use std::path::Path;

use crate::font::{
    FontHandle, NAMEID_DESCRIPTION, NAMEID_LICENSE_DESCRIPTION, NAMEID_LICENSE_INFO_URL,
};
use crate::outcome::{Message, Outcome};

/// Style names accepted in canonical file names (spaces removed).
pub const STYLE_NAMES: [&str; 18] = [
    "Thin",
    "ExtraLight",
    "Light",
    "Regular",
    "Medium",
    "SemiBold",
    "Bold",
    "ExtraBold",
    "Black",
    "Thin Italic",
    "ExtraLight Italic",
    "Light Italic",
    "Italic",
    "Medium Italic",
    "SemiBold Italic",
    "Bold Italic",
    "ExtraBold Italic",
    "Black Italic",
];

pub const OFL_PLACEHOLDER: &str = "This Font Software is licensed under the SIL Open Font License, \
     Version 1.1. This license is available with a FAQ at: http://scripts.sil.org/OFL";
pub const APACHE_PLACEHOLDER: &str = "Licensed under the Apache License, Version 2.0";
pub const OFL_URL: &str = "http://scripts.sil.org/OFL";
pub const APACHE_URL: &str = "http://www.apache.org/licenses/LICENSE-2.0";

/// Known license kinds, keyed by their license file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LicenseKind {
    Ofl,
    Apache,
}

impl LicenseKind {
    pub const ALL: [LicenseKind; 2] = [LicenseKind::Ofl, LicenseKind::Apache];

    pub fn from_file_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "ofl.txt" => Some(LicenseKind::Ofl),
            "license.txt" => Some(LicenseKind::Apache),
            _ => None,
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            LicenseKind::Ofl => OFL_PLACEHOLDER,
            LicenseKind::Apache => APACHE_PLACEHOLDER,
        }
    }

    pub fn url(self) -> &'static str {
        match self {
            LicenseKind::Ofl => OFL_URL,
            LicenseKind::Apache => APACHE_URL,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LicenseKind::Ofl => "Open Font",
            LicenseKind::Apache => "Apache",
        }
    }
}

/// Outcome of the canonical `<family>-<style>` file name rule.
pub fn canonical_filename(font: &Path) -> Outcome {
    if style_of(font).is_some() {
        return Outcome::pass(format!("{} is named canonically.", font.display()));
    }
    Outcome::fail(format!(
        "Style name used in \"{}\" is not canonical. You should rebuild the font using any of \
         the following style names: \"{}\".",
        font.display(),
        STYLE_NAMES.join("\", \"")
    ))
}

/// Compare the license URL records against the license the description names.
///
/// `missing` is the text reported when no matching URL record exists.
pub fn license_url(font: &FontHandle, missing: &str) -> Vec<Outcome> {
    // The last license whose placeholder appears wins.
    let detected = LicenseKind::ALL
        .iter()
        .copied()
        .filter(|kind| {
            font.names_with_id(NAMEID_LICENSE_DESCRIPTION)
                .any(|r| r.value == kind.placeholder())
        })
        .last();

    let mut outcomes = Vec::new();
    let mut found_good_entry = false;
    if let Some(kind) = detected {
        let expected = kind.url();
        for record in font.names_with_id(NAMEID_LICENSE_INFO_URL) {
            if record.value == expected {
                found_good_entry = true;
            } else {
                outcomes.push(Outcome::fail(Message::with_code(
                    "licensing-inconsistency",
                    format!(
                        "Licensing inconsistency in name table entries! \
                         NameID={NAMEID_LICENSE_DESCRIPTION} (LICENSE DESCRIPTION) indicates {} \
                         licensing, but NameID={NAMEID_LICENSE_INFO_URL} (LICENSE URL) has '{}'. \
                         Expected: '{expected}'",
                        kind.label(),
                        record.value,
                    ),
                )));
            }
        }
    }

    if !found_good_entry {
        outcomes.push(Outcome::fail(Message::with_code("no-license-found", missing)));
    } else if !outcomes.is_empty() {
        outcomes.push(Outcome::fail(Message::with_code(
            "bad-entries",
            format!(
                "Even though a valid license URL was seen in NAME table, there were also bad \
                 entries. Please review NameIDs {NAMEID_LICENSE_DESCRIPTION} (LICENSE \
                 DESCRIPTION) and {NAMEID_LICENSE_INFO_URL} (LICENSE INFO URL)."
            ),
        )));
    } else {
        outcomes.push(Outcome::pass("Font has a valid license URL in NAME table."));
    }
    outcomes
}

/// Outcome of the "no copyright in description records" rule.
pub fn description_copyright(font: &FontHandle) -> Outcome {
    let failed = font
        .names_with_id(NAMEID_DESCRIPTION)
        .any(|r| r.value.contains("opyright"));
    if failed {
        return Outcome::fail(Message::with_code(
            "copyright-in-description",
            format!(
                "Namerecords with ID={NAMEID_DESCRIPTION} (NAMEID_DESCRIPTION) should be removed \
                 (perhaps these were added by a longstanding FontLab Studio 5.x bug that copied \
                 copyright notices to them.)"
            ),
        ));
    }
    Outcome::pass("Description strings in the name table do not contain any copyright string.")
}

/// Style part of a canonical `<family>-<style>` file name.
pub fn style_of(path: &Path) -> Option<String> {
    let stem = file_stem(path);
    let style = stem.split('-').nth(1)?;
    STYLE_NAMES
        .iter()
        .any(|name| name.replace(' ', "") == style)
        .then(|| style.to_string())
}

pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

pub fn platform_name(platform_id: u16) -> &'static str {
    match platform_id {
        0 => "UNICODE",
        1 => "MACINTOSH",
        2 => "ISO",
        3 => "WINDOWS",
        4 => "CUSTOM",
        _ => "UNKNOWN",
    }
}

#[cfg(test)]
#[path = "common_tests.rs"]
mod tests;
