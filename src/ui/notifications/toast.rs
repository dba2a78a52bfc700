// SPDX-License-Identifier: MPL-2.0
//! The toast entity and its lifecycle.
//!
//! A toast moves through `Created → Queued → Showing → Visible → Hiding →
//! Dismissed` (`Queued` is skipped when admitted immediately). Entering and
//! leaving are animated; `Showing → Visible` and `Hiding → Dismissed` happen
//! only when the corresponding animation completes, so every toast reports
//! each transition exactly once.
//!
//! Toasts never touch the coordinator's collections. Lifecycle methods
//! return what happened and the coordinator reacts.

use super::animation::{AnimationToken, Entrance, Frame, Tween};
use super::manager::{Runtime, Wake};
use super::notification::{Progress, ToastAction, ToastContent, ToastId, ToastKind, ToastOptions};
use super::position::Anchor;
use super::timer::TimerId;
use iced::{Rectangle, Size};
use std::time::{Duration, Instant};

/// Lifecycle state of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToastState {
    /// Built by the caller, not yet handed to a coordinator.
    Created,
    /// Waiting in the coordinator's queue for a free slot.
    Queued,
    /// Entrance animation running.
    Showing,
    /// Fully shown.
    Visible,
    /// Exit animation running.
    Hiding,
    /// Gone; the coordinator destroys it.
    Dismissed,
}

impl ToastState {
    /// Returns whether the toast is on screen and not leaving.
    #[must_use]
    pub fn is_live(self) -> bool {
        matches!(self, ToastState::Showing | ToastState::Visible)
    }
}

/// Why a toast started hiding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DismissReason {
    /// Closed by the user (close button, action click, keyboard).
    User,
    /// Auto-dismiss countdown elapsed.
    Timeout,
    /// Hidden through the coordinator API (`hide`, `hide_all`, `clear`).
    Programmatic,
    /// Removed to restore the visible bound after it was lowered.
    Evicted,
    /// Replaced by a newer toast at the same anchor.
    Replaced,
}

impl DismissReason {
    /// Returns whether the user asked for the toast to go away.
    #[must_use]
    pub fn is_user_initiated(self) -> bool {
        matches!(self, DismissReason::User)
    }
}

/// Completed lifecycle transition reported to the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// `Showing → Visible`.
    Shown,
    /// `Hiding → Dismissed`.
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Countdown {
    Idle,
    Running { timer: TimerId, deadline: Instant },
    Paused { remaining: Duration },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingAnimation {
    token: AnimationToken,
    timer: TimerId,
}

/// A notification entity with content, countdown and lifecycle.
#[derive(Debug)]
pub struct Toast {
    id: ToastId,
    content: ToastContent,
    options: ToastOptions,
    progress: Progress,
    state: ToastState,
    anchor: Anchor,
    size: Size,
    slot: Rectangle,
    countdown: Countdown,
    hovered: bool,
    animation: Option<PendingAnimation>,
    hide_reason: Option<DismissReason>,
}

impl Toast {
    /// Creates a toast with default options.
    pub fn new(kind: ToastKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::from_content(ToastContent::new(kind, title, message))
    }

    /// Creates a toast from prepared content.
    #[must_use]
    pub fn from_content(content: ToastContent) -> Self {
        Self {
            id: ToastId::new(),
            content,
            options: ToastOptions::default(),
            progress: Progress::default(),
            state: ToastState::Created,
            anchor: Anchor::default(),
            size: Size::ZERO,
            slot: Rectangle::default(),
            countdown: Countdown::Idle,
            hovered: false,
            animation: None,
            hide_reason: None,
        }
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ToastKind::Info, title, message)
    }

    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ToastKind::Success, title, message)
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ToastKind::Warning, title, message)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ToastKind::Error, title, message)
    }

    /// Creates a toast with a caller-provided icon.
    pub fn custom(
        icon: impl Into<String>,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let mut content = ToastContent::new(ToastKind::Custom, title, message);
        content.icon = Some(icon.into());
        Self::from_content(content)
    }

    // ------------------------------------------------------------------
    // Builder
    // ------------------------------------------------------------------

    #[must_use]
    pub fn with_options(mut self, options: ToastOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the auto-dismiss duration; zero disables auto-dismiss.
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.options.duration = duration;
        self
    }

    /// Makes the toast ignore its duration.
    #[must_use]
    pub fn persistent(mut self) -> Self {
        self.options.persistent = true;
        self
    }

    #[must_use]
    pub fn closable(mut self, closable: bool) -> Self {
        self.options.closable = closable;
        self
    }

    #[must_use]
    pub fn pause_on_hover(mut self, pause: bool) -> Self {
        self.options.pause_on_hover = pause;
        self
    }

    /// Shows a progress bar starting at `progress`.
    #[must_use]
    pub fn with_progress(mut self, progress: Progress) -> Self {
        self.options.show_progress = true;
        self.progress = progress;
        self
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.content.icon = Some(icon.into());
        self
    }

    #[must_use]
    pub fn with_action(mut self, action: ToastAction) -> Self {
        self.content.actions.push(action);
        self
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    #[must_use]
    pub fn id(&self) -> ToastId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> ToastKind {
        self.content.kind
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.content.title
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.content.message
    }

    #[must_use]
    pub fn content(&self) -> &ToastContent {
        &self.content
    }

    #[must_use]
    pub fn options(&self) -> &ToastOptions {
        &self.options
    }

    #[must_use]
    pub fn actions(&self) -> &[ToastAction] {
        &self.content.actions
    }

    #[must_use]
    pub fn progress(&self) -> Progress {
        self.progress
    }

    #[must_use]
    pub fn state(&self) -> ToastState {
        self.state
    }

    /// Anchor this toast is (or will be) stacked at.
    #[must_use]
    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    /// Measured size of the toast.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Target rectangle of the toast's stack slot.
    #[must_use]
    pub fn slot(&self) -> Rectangle {
        self.slot
    }

    #[must_use]
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Returns whether the countdown is currently frozen.
    #[must_use]
    pub fn is_timer_paused(&self) -> bool {
        matches!(self.countdown, Countdown::Paused { .. })
    }

    /// Returns whether a countdown is running or paused.
    #[must_use]
    pub fn has_countdown(&self) -> bool {
        !matches!(self.countdown, Countdown::Idle)
    }

    /// Time left before auto-dismiss, if a countdown is active.
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        match self.countdown {
            Countdown::Idle => None,
            Countdown::Running { deadline, .. } => Some(deadline.saturating_duration_since(now)),
            Countdown::Paused { remaining } => Some(remaining),
        }
    }

    /// Why the toast is hiding or was dismissed.
    #[must_use]
    pub fn hide_reason(&self) -> Option<DismissReason> {
        self.hide_reason
    }

    // ------------------------------------------------------------------
    // Coordinator-driven lifecycle
    // ------------------------------------------------------------------

    pub(crate) fn set_anchor(&mut self, anchor: Anchor) {
        self.anchor = anchor;
    }

    pub(crate) fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    pub(crate) fn mark_queued(&mut self) {
        if self.state == ToastState::Created {
            self.state = ToastState::Queued;
        }
    }

    /// Sets the slot without animating; used before the toast is shown.
    pub(crate) fn place(&mut self, slot: Rectangle) {
        self.slot = slot;
    }

    /// Starts the entrance animation and the countdown.
    ///
    /// Returns `false` if the toast was already shown.
    pub(crate) fn show(&mut self, rt: &mut Runtime) -> bool {
        if !matches!(self.state, ToastState::Created | ToastState::Queued) {
            return false;
        }
        self.state = ToastState::Showing;
        self.start_countdown(self.options.duration, rt);

        let from = match rt.motion.entrance {
            Entrance::Slide => {
                let (dx, dy) = self.anchor.entrance_offset(self.size);
                Frame::transparent(Rectangle {
                    x: self.slot.x + dx,
                    y: self.slot.y + dy,
                    ..self.slot
                })
            }
            Entrance::Fade => Frame::transparent(self.slot),
        };
        self.animate(from, Frame::opaque(self.slot), rt);
        true
    }

    /// Starts hiding the toast.
    ///
    /// Returns `false` if it was not live (already hiding, dismissed or never shown).
    pub(crate) fn hide(&mut self, reason: DismissReason, rt: &mut Runtime) -> bool {
        if !self.state.is_live() {
            return false;
        }
        self.state = ToastState::Hiding;
        self.hide_reason = Some(reason);
        self.stop_countdown(rt);

        let from = self.current_frame(rt);
        self.animate(from, Frame::transparent(from.rect), rt);
        true
    }

    /// Moves the toast to a new slot, keeping whatever transition is in flight.
    pub(crate) fn move_to(&mut self, slot: Rectangle, rt: &mut Runtime) {
        if slot == self.slot {
            return;
        }
        self.slot = slot;
        let from = self.current_frame(rt);
        let opacity = if self.state == ToastState::Hiding { 0.0 } else { 1.0 };
        self.animate(from, Frame { rect: slot, opacity }, rt);
    }

    /// Handles completion of an animation started by this toast.
    pub(crate) fn on_animation_finished(&mut self, token: AnimationToken) -> Option<Transition> {
        if self.animation.map(|pending| pending.token) != Some(token) {
            return None;
        }
        self.animation = None;
        match self.state {
            ToastState::Showing => {
                self.state = ToastState::Visible;
                Some(Transition::Shown)
            }
            ToastState::Hiding => {
                self.state = ToastState::Dismissed;
                Some(Transition::Hidden)
            }
            _ => None,
        }
    }

    /// Handles the countdown timer firing. Returns whether the toast started hiding.
    pub(crate) fn on_countdown_elapsed(&mut self, timer: TimerId, rt: &mut Runtime) -> bool {
        match self.countdown {
            Countdown::Running { timer: current, .. } if current == timer => {
                self.countdown = Countdown::Idle;
                self.hide(DismissReason::Timeout, rt)
            }
            _ => false,
        }
    }

    /// Freezes a running countdown. No-op otherwise.
    pub(crate) fn pause_timer(&mut self, rt: &mut Runtime) -> bool {
        let Countdown::Running { timer, deadline } = self.countdown else {
            return false;
        };
        rt.timers.cancel(timer);
        self.countdown = Countdown::Paused {
            remaining: deadline.saturating_duration_since(rt.now),
        };
        true
    }

    /// Restarts a paused countdown for exactly the remaining time. No-op otherwise.
    pub(crate) fn resume_timer(&mut self, rt: &mut Runtime) -> bool {
        let Countdown::Paused { remaining } = self.countdown else {
            return false;
        };
        self.countdown = Countdown::Idle;
        self.start_countdown(remaining, rt);
        true
    }

    /// Restarts the countdown from the full duration.
    pub(crate) fn reset_timer(&mut self, rt: &mut Runtime) -> bool {
        if !self.state.is_live() || !self.options.auto_dismisses() {
            return false;
        }
        self.restart_countdown(self.options.duration, rt);
        true
    }

    /// Pointer entered the toast. Returns whether the countdown was paused.
    pub(crate) fn hover_enter(&mut self, rt: &mut Runtime) -> bool {
        self.hovered = true;
        self.options.pause_on_hover && self.pause_timer(rt)
    }

    /// Pointer left the toast. Returns whether the countdown resumed.
    pub(crate) fn hover_leave(&mut self, rt: &mut Runtime) -> bool {
        self.hovered = false;
        self.options.pause_on_hover && !self.options.persistent && self.resume_timer(rt)
    }

    /// Changes the duration of a live toast, restarting its countdown.
    pub(crate) fn set_duration(&mut self, duration: Duration, rt: &mut Runtime) {
        self.options.duration = duration;
        if self.state.is_live() {
            self.restart_countdown(duration, rt);
        }
    }

    /// Toggles persistence of a live toast, stopping or restarting its countdown.
    pub(crate) fn set_persistent(&mut self, persistent: bool, rt: &mut Runtime) {
        if self.options.persistent == persistent {
            return;
        }
        self.options.persistent = persistent;
        if self.state.is_live() {
            self.restart_countdown(self.options.duration, rt);
        }
    }

    /// Sets the progress value when the progress bar is shown.
    ///
    /// Returns the clamped value, or `None` if progress is hidden.
    pub(crate) fn set_progress(&mut self, value: i32) -> Option<i32> {
        self.options
            .show_progress
            .then(|| self.progress.set_value(value))
    }

    pub(crate) fn set_progress_range(&mut self, min: i32, max: i32) {
        self.progress.set_range(min, max);
    }

    /// Cancels every timer and animation owned by this toast.
    pub(crate) fn teardown(&mut self, rt: &mut Runtime) {
        self.stop_countdown(rt);
        if let Some(pending) = self.animation.take() {
            rt.timers.cancel(pending.timer);
            rt.animator.cancel(pending.token);
        }
        rt.animator.release(self.id);
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Replaces any countdown with a fresh one of `duration`, if this toast auto-dismisses.
    fn start_countdown(&mut self, duration: Duration, rt: &mut Runtime) {
        self.stop_countdown(rt);
        if !self.options.auto_dismisses() || duration.is_zero() {
            return;
        }
        let Some(deadline) = rt.now.checked_add(duration) else {
            tracing::debug!(id = %self.id, ?duration, "countdown out of clock range, not scheduled");
            return;
        };
        let timer = rt.timers.schedule(deadline, Wake::Countdown(self.id));
        self.countdown = Countdown::Running { timer, deadline };
    }

    /// Like [`start_countdown`](Self::start_countdown), but stays paused under a hovering pointer.
    fn restart_countdown(&mut self, duration: Duration, rt: &mut Runtime) {
        if !(self.hovered && self.options.pause_on_hover) {
            self.start_countdown(duration, rt);
            return;
        }
        self.stop_countdown(rt);
        if self.options.auto_dismisses() && !duration.is_zero() {
            self.countdown = Countdown::Paused {
                remaining: duration,
            };
        }
    }

    fn stop_countdown(&mut self, rt: &mut Runtime) {
        if let Countdown::Running { timer, .. } = self.countdown {
            rt.timers.cancel(timer);
        }
        self.countdown = Countdown::Idle;
    }

    fn current_frame(&self, rt: &Runtime) -> Frame {
        rt.animator
            .frame(self.id, rt.now)
            .unwrap_or_else(|| match self.state {
                ToastState::Created | ToastState::Queued | ToastState::Dismissed => {
                    Frame::transparent(self.slot)
                }
                _ => Frame::opaque(self.slot),
            })
    }

    fn animate(&mut self, from: Frame, to: Frame, rt: &mut Runtime) {
        if let Some(pending) = self.animation.take() {
            rt.timers.cancel(pending.timer);
            rt.animator.cancel(pending.token);
        }
        let completion = rt.animator.animate(
            Tween {
                target: self.id,
                from,
                to,
                duration: rt.motion.duration,
                easing: rt.motion.easing,
            },
            rt.now,
        );
        let timer = rt
            .timers
            .schedule(completion.at, Wake::Animation(self.id, completion.token));
        self.animation = Some(PendingAnimation {
            token: completion.token,
            timer,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::notifications::manager::Motion;
    use crate::ui::notifications::timer::{Clock, ManualClock};

    fn runtime(clock: &ManualClock) -> Runtime {
        Runtime::new(Box::new(clock.clone()), Motion::default())
    }

    fn shown(toast: Toast, rt: &mut Runtime) -> Toast {
        let mut toast = toast;
        toast.set_anchor(Anchor::TopRight);
        toast.set_size(Size::new(300.0, 60.0));
        toast.place(Rectangle::new(iced::Point::ORIGIN, Size::new(300.0, 60.0)));
        assert!(toast.show(rt));
        toast
    }

    /// Advances the clock and delivers due timers to a single toast.
    fn run_until(toast: &mut Toast, rt: &mut Runtime, clock: &ManualClock, millis: u64) {
        clock.advance_ms(millis);
        let now = clock.now();
        while let Some((timer, at, wake)) = rt.timers.pop_due(now) {
            rt.now = at;
            match wake {
                Wake::Countdown(_) => {
                    toast.on_countdown_elapsed(timer, rt);
                }
                Wake::Animation(_, token) => {
                    toast.on_animation_finished(token);
                }
                Wake::DrainQueue => {}
            }
        }
        rt.now = now;
    }

    #[test]
    fn new_toast_is_created_with_defaults() {
        let toast = Toast::info("Hello", "World");
        assert_eq!(toast.state(), ToastState::Created);
        assert_eq!(toast.kind(), ToastKind::Info);
        assert!(toast.options().closable);
        assert!(!toast.has_countdown());
    }

    #[test]
    fn custom_toast_carries_icon() {
        let toast = Toast::custom("rocket", "Launched", "");
        assert_eq!(toast.kind(), ToastKind::Custom);
        assert_eq!(toast.content().icon(), Some("rocket"));
    }

    #[test]
    fn show_starts_countdown_and_reaches_visible_after_animation() {
        let clock = ManualClock::new();
        let mut rt = runtime(&clock);
        let mut toast = shown(Toast::info("a", "b"), &mut rt);

        assert_eq!(toast.state(), ToastState::Showing);
        assert!(toast.has_countdown());

        run_until(&mut toast, &mut rt, &clock, 300);
        assert_eq!(toast.state(), ToastState::Visible);
    }

    #[test]
    fn show_twice_is_a_noop() {
        let clock = ManualClock::new();
        let mut rt = runtime(&clock);
        let mut toast = shown(Toast::info("a", "b"), &mut rt);
        run_until(&mut toast, &mut rt, &clock, 300);

        assert!(!toast.show(&mut rt));
        assert_eq!(toast.state(), ToastState::Visible);
    }

    #[test]
    fn countdown_hides_with_timeout_reason() {
        let clock = ManualClock::new();
        let mut rt = runtime(&clock);
        let mut toast = shown(
            Toast::info("a", "b").with_duration(Duration::from_millis(1000)),
            &mut rt,
        );

        run_until(&mut toast, &mut rt, &clock, 1000);
        assert_eq!(toast.state(), ToastState::Hiding);
        assert_eq!(toast.hide_reason(), Some(DismissReason::Timeout));

        run_until(&mut toast, &mut rt, &clock, 300);
        assert_eq!(toast.state(), ToastState::Dismissed);
    }

    #[test]
    fn persistent_toast_has_no_countdown() {
        let clock = ManualClock::new();
        let mut rt = runtime(&clock);
        let mut toast = shown(Toast::error("a", "b").persistent(), &mut rt);

        run_until(&mut toast, &mut rt, &clock, 60_000);
        assert_eq!(toast.state(), ToastState::Visible);
        assert!(!toast.has_countdown());
    }

    #[test]
    fn zero_duration_disables_auto_dismiss() {
        let clock = ManualClock::new();
        let mut rt = runtime(&clock);
        let toast = shown(Toast::info("a", "b").with_duration(Duration::ZERO), &mut rt);
        assert!(!toast.has_countdown());
    }

    #[test]
    fn pause_and_resume_preserve_remaining_time() {
        let clock = ManualClock::new();
        let mut rt = runtime(&clock);
        let mut toast = shown(
            Toast::info("a", "b").with_duration(Duration::from_millis(1000)),
            &mut rt,
        );

        run_until(&mut toast, &mut rt, &clock, 400);
        assert!(toast.pause_timer(&mut rt));
        assert_eq!(toast.remaining(rt.now), Some(Duration::from_millis(600)));

        run_until(&mut toast, &mut rt, &clock, 5000);
        assert_eq!(toast.state(), ToastState::Visible);

        assert!(toast.resume_timer(&mut rt));
        run_until(&mut toast, &mut rt, &clock, 599);
        assert_eq!(toast.state(), ToastState::Visible);
        run_until(&mut toast, &mut rt, &clock, 1);
        assert_eq!(toast.state(), ToastState::Hiding);
    }

    #[test]
    fn pause_and_resume_without_countdown_are_noops() {
        let clock = ManualClock::new();
        let mut rt = runtime(&clock);
        let mut toast = shown(Toast::info("a", "b").persistent(), &mut rt);

        assert!(!toast.pause_timer(&mut rt));
        assert!(!toast.resume_timer(&mut rt));
        assert!(!toast.is_timer_paused());
    }

    #[test]
    fn hover_pauses_only_when_enabled() {
        let clock = ManualClock::new();
        let mut rt = runtime(&clock);
        let mut pausing = shown(Toast::info("a", "b"), &mut rt);
        let mut ignoring = shown(Toast::info("c", "d").pause_on_hover(false), &mut rt);

        assert!(pausing.hover_enter(&mut rt));
        assert!(pausing.is_hovered());
        assert!(pausing.is_timer_paused());
        assert!(!ignoring.hover_enter(&mut rt));
        assert!(!ignoring.is_timer_paused());

        assert!(pausing.hover_leave(&mut rt));
        assert!(!pausing.is_timer_paused());
    }

    #[test]
    fn timer_changes_under_pointer_stay_paused() {
        let clock = ManualClock::new();
        let mut rt = runtime(&clock);
        let mut toast = shown(
            Toast::info("a", "b").with_duration(Duration::from_millis(1000)),
            &mut rt,
        );
        assert!(toast.hover_enter(&mut rt));

        toast.set_duration(Duration::from_millis(2000), &mut rt);
        assert!(toast.is_timer_paused());
        assert_eq!(toast.remaining(rt.now), Some(Duration::from_millis(2000)));

        run_until(&mut toast, &mut rt, &clock, 400);
        assert!(toast.reset_timer(&mut rt));
        assert!(toast.is_timer_paused());

        run_until(&mut toast, &mut rt, &clock, 10_000);
        assert_eq!(toast.state(), ToastState::Visible);

        assert!(toast.hover_leave(&mut rt));
        run_until(&mut toast, &mut rt, &clock, 1999);
        assert_eq!(toast.state(), ToastState::Visible);
        run_until(&mut toast, &mut rt, &clock, 1);
        assert_eq!(toast.state(), ToastState::Hiding);
    }

    #[test]
    fn unbounded_duration_never_times_out() {
        let clock = ManualClock::new();
        let mut rt = runtime(&clock);
        let mut toast = shown(Toast::info("a", "b").with_duration(Duration::MAX), &mut rt);
        assert!(!toast.has_countdown());

        toast.set_duration(Duration::MAX, &mut rt);
        assert!(toast.reset_timer(&mut rt));
        assert!(!toast.has_countdown());

        run_until(&mut toast, &mut rt, &clock, 60_000);
        assert_eq!(toast.state(), ToastState::Visible);
    }

    #[test]
    fn hide_cancels_countdown_and_is_idempotent() {
        let clock = ManualClock::new();
        let mut rt = runtime(&clock);
        let mut toast = shown(Toast::info("a", "b"), &mut rt);

        assert!(toast.hide(DismissReason::User, &mut rt));
        assert!(!toast.has_countdown());
        assert!(!toast.hide(DismissReason::Programmatic, &mut rt));
        assert_eq!(toast.hide_reason(), Some(DismissReason::User));

        run_until(&mut toast, &mut rt, &clock, 300);
        assert_eq!(toast.state(), ToastState::Dismissed);
        assert!(!toast.hide(DismissReason::User, &mut rt));
    }

    #[test]
    fn hide_during_entrance_skips_visible() {
        let clock = ManualClock::new();
        let mut rt = runtime(&clock);
        let mut toast = shown(Toast::info("a", "b"), &mut rt);

        run_until(&mut toast, &mut rt, &clock, 100);
        assert!(toast.hide(DismissReason::Programmatic, &mut rt));

        run_until(&mut toast, &mut rt, &clock, 300);
        assert_eq!(toast.state(), ToastState::Dismissed);
    }

    #[test]
    fn move_during_entrance_still_completes_entrance() {
        let clock = ManualClock::new();
        let mut rt = runtime(&clock);
        let mut toast = shown(Toast::info("a", "b"), &mut rt);

        run_until(&mut toast, &mut rt, &clock, 150);
        let target = Rectangle::new(iced::Point::new(0.0, 100.0), toast.size());
        toast.move_to(target, &mut rt);

        run_until(&mut toast, &mut rt, &clock, 150);
        assert_eq!(toast.state(), ToastState::Showing);
        run_until(&mut toast, &mut rt, &clock, 150);
        assert_eq!(toast.state(), ToastState::Visible);
        assert_eq!(toast.slot(), target);
    }

    #[test]
    fn set_progress_requires_progress_bar() {
        let mut plain = Toast::info("a", "b");
        assert_eq!(plain.set_progress(50), None);

        let mut upload = Toast::info("Upload", "").with_progress(Progress::new(0, 0, 10));
        assert_eq!(upload.set_progress(50), Some(10));
        upload.set_progress_range(0, 100);
        assert_eq!(upload.progress().max(), 100);
    }

    #[test]
    fn set_persistent_stops_and_restarts_countdown() {
        let clock = ManualClock::new();
        let mut rt = runtime(&clock);
        let mut toast = shown(Toast::info("a", "b"), &mut rt);

        toast.set_persistent(true, &mut rt);
        assert!(!toast.has_countdown());

        toast.set_persistent(false, &mut rt);
        assert!(toast.has_countdown());
    }

    #[test]
    fn reset_timer_restores_full_duration() {
        let clock = ManualClock::new();
        let mut rt = runtime(&clock);
        let mut toast = shown(
            Toast::info("a", "b").with_duration(Duration::from_millis(1000)),
            &mut rt,
        );

        run_until(&mut toast, &mut rt, &clock, 700);
        assert!(toast.reset_timer(&mut rt));
        assert_eq!(toast.remaining(rt.now), Some(Duration::from_millis(1000)));
    }

    #[test]
    fn teardown_leaves_no_timers() {
        let clock = ManualClock::new();
        let mut rt = runtime(&clock);
        let mut toast = shown(Toast::info("a", "b"), &mut rt);
        assert!(!rt.timers.is_empty());

        toast.teardown(&mut rt);

        assert!(rt.timers.is_empty());
    }
}
