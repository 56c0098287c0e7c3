// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Bundled profiles.
//!
//! Each profile builds its own registry, so two profiles may define units
//! with the same name without seeing each other.

use std::path::PathBuf;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::font::FontLoader;
use crate::fs::FileSystem;
use crate::profile::Profile;
use crate::value::{Value, Values};

mod common;
pub mod googlefonts;
pub mod sil;

/// Profile used when none is configured.
pub const DEFAULT_PROFILE: &str = sil::NAME;

/// Names accepted by [`by_name`].
pub const NAMES: &[&str] = &[sil::NAME, googlefonts::NAME];

/// Build the named profile around the given collaborators.
pub fn by_name(
    name: &str,
    loader: Arc<dyn FontLoader>,
    fs: Arc<dyn FileSystem>,
) -> Result<Profile> {
    match name {
        sil::NAME => sil::profile(loader, fs),
        googlefonts::NAME => googlefonts::profile(loader, fs),
        _ => Err(Error::NotFound {
            id: format!("profile `{name}` (available: {})", NAMES.join(", ")),
        }),
    }
}

/// The values map for a run over `fonts`.
pub fn font_values<I, P>(fonts: I) -> Values
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    Values::from([("fonts".to_string(), Value::paths(fonts))])
}

#[cfg(test)]
#[path = "profiles_tests.rs"]
mod tests;
