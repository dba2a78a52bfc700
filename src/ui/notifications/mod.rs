// SPDX-License-Identifier: MPL-2.0
//! Toast notification admission, queueing and stacking.
//!
//! Toasts are short-lived, non-blocking notifications stacked at one of
//! seven screen anchors. A [`Coordinator`] admits them while their anchor has
//! room, queues them in one shared FIFO otherwise, rejects duplicates, and
//! animates every stack into place whenever its membership changes.
//!
//! # Components
//!
//! - [`notification`] - Toast data model (content, actions, progress, options)
//! - [`toast`] - `Toast` entity and its lifecycle and countdown
//! - [`manager`] - `Coordinator` admission control, queue and reflow
//! - [`position`] - Anchor layouts and stack placement
//! - [`animation`] - Easing, tweens and the `Animator` service
//! - [`timer`] - Clock abstraction and the single-threaded timer queue
//! - [`measure`] - Toast size measurement
//! - [`events`] - Observer events
//! - [`global`] - Thread-local default coordinator
//!
//! # Usage
//!
//! ```ignore
//! use fluent_toast::config::CoordinatorConfig;
//! use fluent_toast::ui::notifications::{Anchor, Coordinator, Toast};
//!
//! let mut toasts = Coordinator::new(CoordinatorConfig::default());
//! toasts.show(Toast::success("Saved", "All changes saved"));
//! toasts.show_at(Toast::error("Upload failed", "Retrying").persistent(), Anchor::BottomRight);
//!
//! // In your update function
//! toasts.handle_message(&message);
//!
//! // In your subscription function
//! let ticks = toasts.subscription().map(Message::Toasts);
//! ```

pub mod animation;
pub mod events;
pub mod global;
pub mod manager;
pub mod measure;
pub mod notification;
pub mod position;
pub mod timer;
pub mod toast;

pub use animation::{Animator, Easing, Entrance, Frame, Tween, TweenAnimator};
pub use events::{DropReason, ToastEvent};
pub use manager::{Admission, Coordinator, CoordinatorBuilder, Message as ToastMessage};
pub use measure::{ContentMeasure, Measure};
pub use notification::{Progress, ToastAction, ToastContent, ToastId, ToastKind, ToastOptions};
pub use position::{Anchor, StackLayout};
pub use timer::{Clock, ManualClock, SystemClock};
pub use toast::{DismissReason, Toast, ToastState};
