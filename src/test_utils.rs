// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons and coordinator setup.
//!
//! This module re-exports the `approx` crate's assertion macros for float comparison,
//! which properly handle floating-point precision issues that `assert_eq!` cannot.

// Re-export approx macros for convenient use in tests
pub use approx::{assert_abs_diff_eq, assert_relative_eq};

use crate::config::CoordinatorConfig;
use crate::ui::notifications::{Coordinator, ManualClock};
use iced::Rectangle;

/// Default epsilon for f32 comparisons.
pub const F32_EPSILON: f32 = 1e-4;

/// Screen used by coordinator tests: 1000x800 at the origin.
pub fn test_screen() -> Rectangle {
    Rectangle {
        x: 0.0,
        y: 0.0,
        width: 1000.0,
        height: 800.0,
    }
}

/// Builds a coordinator on a manual clock and the test screen.
pub fn coordinator_with(config: CoordinatorConfig) -> (Coordinator, ManualClock) {
    let clock = ManualClock::new();
    let coordinator = Coordinator::builder(config)
        .clock(clock.clone())
        .screen(test_screen())
        .build();
    (coordinator, clock)
}
