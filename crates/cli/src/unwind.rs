// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Panic isolation for check and condition bodies.
//!
//! A panic raised inside [`catch`] becomes an `ERROR` outcome, so the
//! panic hook only logs it at debug level instead of printing to stderr.
//! Panics anywhere else still reach the previously installed hook.

use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;

thread_local! {
    static CATCHING: Cell<bool> = const { Cell::new(false) };
}

static HOOK: Once = Once::new();

fn install_hook() {
    HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if CATCHING.with(Cell::get) {
                tracing::debug!("caught panic: {info}");
            } else {
                previous(info);
            }
        }));
    });
}

/// Run `f`, returning its panic payload instead of unwinding further.
pub fn catch<T>(f: impl FnOnce() -> T) -> std::thread::Result<T> {
    install_hook();
    let outer = CATCHING.with(|c| c.replace(true));
    let result = panic::catch_unwind(AssertUnwindSafe(f));
    CATCHING.with(|c| c.set(outer));
    result
}

/// Whether the current thread is inside [`catch`].
pub fn is_catching() -> bool {
    CATCHING.with(Cell::get)
}

#[cfg(test)]
#[path = "unwind_tests.rs"]
mod tests;
