// SPDX-License-Identifier: MPL-2.0
//! `fluent_toast` coordinates toast notifications for Iced applications.
//!
//! It decides whether each toast is shown, queued or rejected, enforces
//! per-anchor capacity, and keeps every stack of variable-height toasts
//! animated into place as members join and leave. Rendering is left to the
//! application; the coordinator exposes slots, frames and events.

#![doc(html_root_url = "https://docs.rs/fluent_toast/0.1.0")]

pub mod config;
pub mod domain;
pub mod error;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_utils;
