// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core value types with ZERO external dependencies.
//!
//! This module contains pure domain types and value objects. It has no
//! dependencies on external crates (except `std`) to ensure testability.
//!
//! # Modules
//!
//! - [`ui`]: Coordinator bounds ([`MaxVisible`](ui::MaxVisible),
//!   [`MaxQueued`](ui::MaxQueued), [`Pixels`](ui::Pixels),
//!   [`AnimationDuration`](ui::AnimationDuration))

pub mod ui;
