// SPDX-License-Identifier: MPL-2.0
//! UI newtypes.
//!
//! This module provides type-safe wrappers for toast coordinator settings,
//! ensuring they are always within valid ranges. Out-of-range input is
//! clamped to the nearest valid value instead of being rejected.

use std::time::Duration;

// =============================================================================
// Capacity Bounds
// =============================================================================

/// Visible and queued capacity bounds.
pub mod capacity_bounds {
    /// Minimum number of visible toasts per anchor.
    pub const MIN_VISIBLE: usize = 1;
    /// Default number of visible toasts per anchor.
    pub const DEFAULT_VISIBLE: usize = 5;
    /// Maximum queue length.
    pub const MAX_QUEUED: usize = 1000;
    /// Default queue length.
    pub const DEFAULT_QUEUED: usize = 20;
}

// =============================================================================
// MaxVisible
// =============================================================================

/// Maximum number of toasts stacked at a single anchor (at least 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaxVisible(usize);

impl MaxVisible {
    /// Creates a new visible bound, clamping zero up to one.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.max(capacity_bounds::MIN_VISIBLE))
    }

    /// Returns the raw bound.
    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }

    /// Returns whether an anchor holding `occupied` toasts can take another.
    #[must_use]
    pub fn has_room(self, occupied: usize) -> bool {
        occupied < self.0
    }
}

impl Default for MaxVisible {
    fn default() -> Self {
        Self(capacity_bounds::DEFAULT_VISIBLE)
    }
}

// =============================================================================
// MaxQueued
// =============================================================================

/// Maximum length of the shared waiting queue (zero disables queueing).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaxQueued(usize);

impl MaxQueued {
    /// Creates a new queue bound, clamping to the valid range.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.min(capacity_bounds::MAX_QUEUED))
    }

    /// Returns the raw bound.
    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }

    /// Returns true when no toast may ever be queued.
    #[must_use]
    pub fn is_disabled(self) -> bool {
        self.0 == 0
    }
}

impl Default for MaxQueued {
    fn default() -> Self {
        Self(capacity_bounds::DEFAULT_QUEUED)
    }
}

// =============================================================================
// Pixels
// =============================================================================

/// A non-negative, finite length in logical pixels.
///
/// Used for stack spacing and screen margin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pixels(f32);

impl Pixels {
    /// Zero pixels.
    pub const ZERO: Self = Self(0.0);

    /// Creates a new length; negative and NaN values become zero.
    #[must_use]
    pub fn new(value: f32) -> Self {
        if value.is_finite() && value > 0.0 {
            Self(value)
        } else {
            Self::ZERO
        }
    }

    /// Returns the raw pixel value.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }
}

// =============================================================================
// AnimationDuration
// =============================================================================

/// Animation duration bounds (0 to 5000 milliseconds).
pub mod animation_bounds {
    /// Maximum animation duration in milliseconds.
    pub const MAX_MS: u64 = 5000;
    /// Default animation duration in milliseconds.
    pub const DEFAULT_MS: u64 = 300;
}

/// Duration shared by entrance, exit and reflow animations.
///
/// Zero means transitions complete on the next tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationDuration(u64);

impl AnimationDuration {
    /// Creates a new animation duration, clamping to valid range.
    #[must_use]
    pub fn new(millis: u64) -> Self {
        Self(millis.min(animation_bounds::MAX_MS))
    }

    /// Returns the value in milliseconds.
    #[must_use]
    pub fn millis(self) -> u64 {
        self.0
    }

    /// Returns the value as a Duration.
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for AnimationDuration {
    fn default() -> Self {
        Self(animation_bounds::DEFAULT_MS)
    }
}
