// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared unit test utilities.
//!
//! In-memory stand-ins for the font loader and the filesystem.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::font::{FontHandle, FontLoader, ParseError};
use crate::fs::FileSystem;

/// Serves pre-built handles; anything else fails to parse.
#[derive(Debug, Default)]
pub struct FakeLoader(pub HashMap<PathBuf, FontHandle>);

impl FakeLoader {
    pub fn new(fonts: impl IntoIterator<Item = FontHandle>) -> Self {
        Self(
            fonts
                .into_iter()
                .map(|f| (f.path().to_path_buf(), f))
                .collect(),
        )
    }
}

impl FontLoader for FakeLoader {
    fn open(&self, path: &Path) -> Result<FontHandle, ParseError> {
        self.0
            .get(path)
            .cloned()
            .ok_or_else(|| ParseError::Malformed {
                path: path.to_path_buf(),
                message: "not a font".to_string(),
            })
    }
}

/// A filesystem holding exactly the listed paths.
#[derive(Debug, Default)]
pub struct FakeFs(pub HashSet<PathBuf>);

impl FakeFs {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self(paths.into_iter().map(Into::into).collect())
    }
}

impl FileSystem for FakeFs {
    fn exists(&self, path: &Path) -> bool {
        self.0.contains(path)
    }
}
