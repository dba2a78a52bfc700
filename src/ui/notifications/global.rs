// SPDX-License-Identifier: MPL-2.0
//! Thread-local default coordinator.
//!
//! Convenience for code that has no coordinator handle at hand. Applications
//! should prefer owning a [`Coordinator`] in their state and passing it down;
//! this wrapper only forwards to an ordinary instance living on the UI thread.
//!
//! Calls made from inside a toast action callback (while the default
//! coordinator is already borrowed) are ignored and return `None`.

use super::manager::{Admission, Coordinator};
use super::toast::Toast;
use crate::config::CoordinatorConfig;
use std::cell::RefCell;

thread_local! {
    static DEFAULT: RefCell<Option<Coordinator>> = const { RefCell::new(None) };
}

/// Runs `f` with the default coordinator, creating it with default settings on first use.
pub fn with<R>(f: impl FnOnce(&mut Coordinator) -> R) -> Option<R> {
    DEFAULT.with(|cell| {
        let Ok(mut slot) = cell.try_borrow_mut() else {
            tracing::warn!("default toast coordinator is busy, ignoring re-entrant call");
            return None;
        };
        let coordinator =
            slot.get_or_insert_with(|| Coordinator::new(CoordinatorConfig::default()));
        Some(f(coordinator))
    })
}

/// Replaces the default coordinator, returning the previous one.
pub fn install(coordinator: Coordinator) -> Option<Coordinator> {
    DEFAULT.with(|cell| {
        cell.try_borrow_mut()
            .ok()
            .and_then(|mut slot| slot.replace(coordinator))
    })
}

/// Drops the default coordinator, discarding its toasts and timers.
pub fn reset() {
    DEFAULT.with(|cell| {
        if let Ok(mut slot) = cell.try_borrow_mut() {
            slot.take();
        }
    });
}

pub fn show(toast: Toast) -> Option<Admission> {
    with(|coordinator| coordinator.show(toast))
}

pub fn show_info(title: impl Into<String>, message: impl Into<String>) -> Option<Admission> {
    with(|coordinator| coordinator.show_info(title, message))
}

pub fn show_success(title: impl Into<String>, message: impl Into<String>) -> Option<Admission> {
    with(|coordinator| coordinator.show_success(title, message))
}

pub fn show_warning(title: impl Into<String>, message: impl Into<String>) -> Option<Admission> {
    with(|coordinator| coordinator.show_warning(title, message))
}

pub fn show_error(title: impl Into<String>, message: impl Into<String>) -> Option<Admission> {
    with(|coordinator| coordinator.show_error(title, message))
}

pub fn hide_all() {
    with(Coordinator::hide_all);
}

pub fn clear() {
    with(Coordinator::clear);
}

/// Processes due timers of the default coordinator.
pub fn tick() {
    with(Coordinator::tick);
}
