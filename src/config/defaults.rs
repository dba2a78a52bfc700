// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Capacity**: Visible and queued toast bounds
//! - **Layout**: Stack spacing, screen margin and toast width
//! - **Timing**: Auto-dismiss, animation and queue debounce durations
//! - **Events**: Observer buffer sizes

// ==========================================================================
// Capacity Defaults
// ==========================================================================

/// Default maximum number of visible toasts per anchor.
pub const DEFAULT_MAX_VISIBLE: usize = 5;

/// Minimum allowed visible toasts per anchor.
pub const MIN_MAX_VISIBLE: usize = 1;

/// Default maximum number of queued toasts (shared by all anchors).
pub const DEFAULT_MAX_QUEUED: usize = 20;

/// Upper bound for the queue size.
pub const MAX_MAX_QUEUED: usize = 1000;

// ==========================================================================
// Layout Defaults
// ==========================================================================

/// Default vertical gap between stacked toasts (in pixels).
pub const DEFAULT_STACK_SPACING: f32 = 8.0;

/// Default inset from the screen or surface edges (in pixels).
pub const DEFAULT_SCREEN_MARGIN: f32 = 16.0;

/// Minimum toast width used by content measurement (in pixels).
pub const TOAST_MIN_WIDTH: f32 = 300.0;

/// Maximum toast width used by content measurement (in pixels).
pub const TOAST_MAX_WIDTH: f32 = 400.0;

/// Screen rectangle assumed until real geometry is reported.
pub const FALLBACK_SCREEN_WIDTH: f32 = 1920.0;

/// Screen rectangle assumed until real geometry is reported.
pub const FALLBACK_SCREEN_HEIGHT: f32 = 1080.0;

// ==========================================================================
// Timing Defaults
// ==========================================================================

/// Default auto-dismiss duration for a toast (in milliseconds).
pub const DEFAULT_TOAST_DURATION_MS: u64 = 5000;

/// Default duration of entrance, exit and reflow animations (in milliseconds).
pub const DEFAULT_ANIMATION_DURATION_MS: u64 = 300;

/// Upper bound for animation duration (in milliseconds).
pub const MAX_ANIMATION_DURATION_MS: u64 = 5000;

/// Debounce applied before draining the queue (in milliseconds).
pub const DEFAULT_QUEUE_DEBOUNCE_MS: u64 = 100;

/// Upper bound for the queue debounce (in milliseconds).
pub const MAX_QUEUE_DEBOUNCE_MS: u64 = 10_000;

/// Interval of the event-loop tick while timers are pending (in milliseconds).
pub const TICK_INTERVAL_MS: u64 = 16;

// ==========================================================================
// Event Defaults
// ==========================================================================

/// Number of events retained for [`drain_events`](crate::ui::notifications::Coordinator::drain_events).
pub const EVENT_BUFFER_CAPACITY: usize = 256;

/// Channel capacity for each event subscriber.
pub const SUBSCRIBER_CHANNEL_CAPACITY: usize = 128;
