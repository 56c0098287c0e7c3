// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Filesystem collaborator for conditions that look up paths.

use std::path::Path;

/// Synchronous existence queries.
///
/// A missing path is a normal answer, not a fault.
pub trait FileSystem: Send + Sync {
    fn exists(&self, path: &Path) -> bool;
}

/// The real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
