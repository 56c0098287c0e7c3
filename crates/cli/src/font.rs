// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Font-parsing collaborator.
//!
//! The engine never decodes fonts itself. Conditions that need a decoded
//! font call a [`FontLoader`], and the run's condition cache makes sure each
//! file is opened at most once per run.

use std::path::{Path, PathBuf};

use read_fonts::{FontRef, TableProvider};

/// Name ID of the description record.
pub const NAMEID_DESCRIPTION: u16 = 10;
/// Name ID of the license description record.
pub const NAMEID_LICENSE_DESCRIPTION: u16 = 13;
/// Name ID of the license info URL record.
pub const NAMEID_LICENSE_INFO_URL: u16 = 14;

/// Error opening or decoding a font file.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse {}: {message}", .path.display())]
    Malformed { path: PathBuf, message: String },
}

/// One decoded `name` table record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameRecord {
    pub platform_id: u16,
    pub encoding_id: u16,
    pub language_id: u16,
    pub name_id: u16,
    pub value: String,
}

/// Decoded font metadata handed to checks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontHandle {
    path: PathBuf,
    /// Table tags in directory order.
    pub tables: Vec<String>,
    pub names: Vec<NameRecord>,
    /// `OS/2.usWeightClass`, if the table is present.
    pub weight_class: Option<u16>,
    /// `post.underlineThickness`, if the table is present.
    pub underline_thickness: Option<i16>,
    /// `post` table version as `(major, minor)`, e.g. `(2, 5)` for 2.5.
    pub post_version: Option<(u16, u16)>,
}

impl FontHandle {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn has_table(&self, tag: &str) -> bool {
        self.tables.iter().any(|t| t == tag)
    }

    /// Records with the given name ID, in table order.
    pub fn names_with_id(&self, name_id: u16) -> impl Iterator<Item = &NameRecord> {
        self.names.iter().filter(move |r| r.name_id == name_id)
    }
}

/// Opens font files for conditions.
pub trait FontLoader: Send + Sync {
    fn open(&self, path: &Path) -> Result<FontHandle, ParseError>;
}

/// Loader backed by `read-fonts`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReadFontsLoader;

impl FontLoader for ReadFontsLoader {
    fn open(&self, path: &Path) -> Result<FontHandle, ParseError> {
        let data = std::fs::read(path).map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        decode(path, &data)
    }
}

/// Decode the metadata the bundled checks need from raw font bytes.
pub fn decode(path: &Path, data: &[u8]) -> Result<FontHandle, ParseError> {
    let font = FontRef::new(data).map_err(|e| ParseError::Malformed {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let tables = font
        .table_directory
        .table_records()
        .iter()
        .map(|record| record.tag().to_string())
        .collect();

    let names = match font.name() {
        Ok(name) => {
            let strings = name.string_data();
            name.name_record()
                .iter()
                .filter_map(|record| {
                    // Records with undecodable encodings are dropped, not fatal.
                    let value = record.string(strings).ok()?;
                    Some(NameRecord {
                        platform_id: record.platform_id(),
                        encoding_id: record.encoding_id(),
                        language_id: record.language_id(),
                        name_id: record.name_id().to_u16(),
                        value: value.chars().collect(),
                    })
                })
                .collect()
        }
        Err(_) => Vec::new(),
    };

    let post = font.post().ok();
    Ok(FontHandle {
        path: path.to_path_buf(),
        tables,
        names,
        weight_class: font.os2().ok().map(|os2| os2.us_weight_class()),
        underline_thickness: post.as_ref().map(|post| post.underline_thickness().to_i16()),
        post_version: post.as_ref().map(|post| post.version().to_major_minor()),
    })
}

#[cfg(test)]
#[path = "font_tests.rs"]
mod tests;
