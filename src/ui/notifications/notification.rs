// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.
//!
//! This module defines the content and behavior settings carried by a toast:
//! identity, semantic kind, actions, progress and auto-dismiss options.

use crate::config::defaults::DEFAULT_TOAST_DURATION_MS;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

/// Unique identifier for a toast, stable for its whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(u64);

impl ToastId {
    /// Creates a new unique toast ID.
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw identifier.
    #[must_use]
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl Default for ToastId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "toast#{}", self.0)
    }
}

/// Semantic type of a toast, selecting its default icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToastKind {
    /// Informational message.
    #[default]
    Info,
    /// Operation completed successfully.
    Success,
    /// Warning that doesn't block operation.
    Warning,
    /// Error requiring attention.
    Error,
    /// Caller-provided icon.
    Custom,
}

impl ToastKind {
    /// Returns the icon name used when the content carries no explicit icon.
    ///
    /// `Custom` toasts have no default icon.
    #[must_use]
    pub fn default_icon(self) -> Option<&'static str> {
        match self {
            ToastKind::Info => Some("info"),
            ToastKind::Success => Some("checkmark"),
            ToastKind::Warning => Some("warning"),
            ToastKind::Error => Some("error"),
            ToastKind::Custom => None,
        }
    }
}

/// A button shown on a toast.
///
/// The callback runs synchronously on the thread that owns the coordinator.
#[derive(Clone)]
pub struct ToastAction {
    label: String,
    callback: Rc<dyn Fn()>,
    primary: bool,
    dismiss_on_click: bool,
}

impl ToastAction {
    /// Creates a secondary action that dismisses the toast when clicked.
    pub fn new(label: impl Into<String>, callback: impl Fn() + 'static) -> Self {
        Self {
            label: label.into(),
            callback: Rc::new(callback),
            primary: false,
            dismiss_on_click: true,
        }
    }

    /// Marks this action as the primary one.
    #[must_use]
    pub fn primary(mut self) -> Self {
        self.primary = true;
        self
    }

    /// Keeps the toast open after the action runs.
    #[must_use]
    pub fn keep_open(mut self) -> Self {
        self.dismiss_on_click = false;
        self
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn is_primary(&self) -> bool {
        self.primary
    }

    #[must_use]
    pub fn dismisses_on_click(&self) -> bool {
        self.dismiss_on_click
    }

    /// Invokes the callback.
    pub fn invoke(&self) {
        (self.callback)();
    }
}

impl fmt::Debug for ToastAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastAction")
            .field("label", &self.label)
            .field("primary", &self.primary)
            .field("dismiss_on_click", &self.dismiss_on_click)
            .finish_non_exhaustive()
    }
}

/// Progress value shown under the message, always within `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    value: i32,
    min: i32,
    max: i32,
}

impl Progress {
    /// Creates a progress value over `[min, max]`; reversed bounds are swapped.
    #[must_use]
    pub fn new(value: i32, min: i32, max: i32) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            value: value.clamp(min, max),
            min,
            max,
        }
    }

    #[must_use]
    pub fn value(self) -> i32 {
        self.value
    }

    #[must_use]
    pub fn min(self) -> i32 {
        self.min
    }

    #[must_use]
    pub fn max(self) -> i32 {
        self.max
    }

    /// Sets the value, clamping it into range. Returns the stored value.
    pub fn set_value(&mut self, value: i32) -> i32 {
        self.value = value.clamp(self.min, self.max);
        self.value
    }

    /// Replaces the range and re-clamps the current value.
    pub fn set_range(&mut self, min: i32, max: i32) {
        *self = Self::new(self.value, min, max);
    }

    /// Returns completion in `0.0..=1.0`; an empty range counts as complete.
    #[must_use]
    pub fn fraction(self) -> f32 {
        if self.max == self.min {
            return 1.0;
        }
        let done = i64::from(self.value) - i64::from(self.min);
        let span = i64::from(self.max) - i64::from(self.min);
        (done as f64 / span as f64) as f32
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::new(0, 0, 100)
    }
}

/// Behavior settings of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastOptions {
    /// Auto-dismiss countdown; zero disables auto-dismiss.
    pub duration: Duration,
    /// Ignore `duration`; only an explicit hide removes the toast.
    pub persistent: bool,
    /// Whether the user may close the toast.
    pub closable: bool,
    /// Pause the countdown while the pointer is over the toast.
    pub pause_on_hover: bool,
    /// Render the progress bar.
    pub show_progress: bool,
}

impl ToastOptions {
    /// Returns whether this toast counts down to an automatic hide.
    #[must_use]
    pub fn auto_dismisses(&self) -> bool {
        !self.persistent && !self.duration.is_zero()
    }
}

impl Default for ToastOptions {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(DEFAULT_TOAST_DURATION_MS),
            persistent: false,
            closable: true,
            pause_on_hover: true,
            show_progress: false,
        }
    }
}

/// What a toast displays.
#[derive(Debug, Clone, Default)]
pub struct ToastContent {
    pub kind: ToastKind,
    pub title: String,
    pub message: String,
    /// Icon reference; falls back to [`ToastKind::default_icon`].
    pub icon: Option<String>,
    pub actions: Vec<ToastAction>,
}

impl ToastContent {
    pub fn new(kind: ToastKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
            icon: None,
            actions: Vec::new(),
        }
    }

    /// Returns the icon to render, if any.
    #[must_use]
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref().or_else(|| self.kind.default_icon())
    }

    /// Returns whether two toasts would display the same text.
    #[must_use]
    pub fn same_text(&self, other: &ToastContent) -> bool {
        self.title == other.title && self.message == other.message
    }
}
