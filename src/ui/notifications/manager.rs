// SPDX-License-Identifier: MPL-2.0
//! Toast admission, queueing and stacking.
//!
//! The `Coordinator` owns one stack of toasts per [`Anchor`] and a single
//! bounded FIFO queue shared by every anchor. New toasts are admitted when
//! their anchor has room, queued otherwise, and rejected when they duplicate
//! a toast already on screen. Whenever a stack changes, every member is
//! re-slotted and animated to its new position.
//!
//! The coordinator is single-threaded and never blocks. Countdowns, the queue
//! debounce and animation completions are all entries in one timer queue,
//! processed by [`Coordinator::tick`] (or lazily at the start of any
//! operation) in deadline order.

use super::animation::{AnimationToken, Animator, Easing, Entrance, Frame, TweenAnimator};
use super::events::{DropReason, EventHub, ToastEvent};
use super::measure::{ContentMeasure, Measure};
use super::notification::{ToastId, ToastKind};
use super::position::{self, Anchor, StackLayout};
use super::timer::{Clock, SystemClock, TimerId, Timers};
use super::toast::{DismissReason, Toast, ToastState, Transition};
use crate::config::defaults::{FALLBACK_SCREEN_HEIGHT, FALLBACK_SCREEN_WIDTH, TICK_INTERVAL_MS};
use crate::config::CoordinatorConfig;
use crate::domain::ui::{AnimationDuration, MaxQueued, MaxVisible, Pixels};
use crossbeam_channel::Receiver;
use iced::{Rectangle, Size};
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fmt;
use std::time::{Duration, Instant};

/// Messages driving the coordinator from an iced application.
#[derive(Debug, Clone)]
pub enum Message {
    /// Process due timers.
    Tick,
    /// The user closed a toast.
    Dismiss(ToastId),
    HoverEnter(ToastId),
    HoverLeave(ToastId),
    /// The user clicked the action at `index`.
    Action(ToastId, usize),
    /// Keyboard activation (Enter) on a focused toast.
    Activate(ToastId),
}

/// Outcome of [`Coordinator::show`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Admitted and animating in.
    Shown(ToastId),
    /// Waiting for room at its anchor.
    Queued(ToastId),
    /// Discarded immediately.
    Rejected { id: ToastId, reason: DropReason },
}

impl Admission {
    /// Id of the toast this admission decided on.
    #[must_use]
    pub fn id(self) -> ToastId {
        match self {
            Admission::Shown(id) | Admission::Queued(id) | Admission::Rejected { id, .. } => id,
        }
    }

    #[must_use]
    pub fn is_shown(self) -> bool {
        matches!(self, Admission::Shown(_))
    }

    #[must_use]
    pub fn is_queued(self) -> bool {
        matches!(self, Admission::Queued(_))
    }

    #[must_use]
    pub fn is_rejected(self) -> bool {
        matches!(self, Admission::Rejected { .. })
    }
}

/// Payload of a coordinator timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Wake {
    Countdown(ToastId),
    Animation(ToastId, AnimationToken),
    DrainQueue,
}

/// Shared animation settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Motion {
    pub duration: Duration,
    pub easing: Easing,
    pub entrance: Entrance,
}

impl Default for Motion {
    fn default() -> Self {
        Self {
            duration: AnimationDuration::default().as_duration(),
            easing: Easing::default(),
            entrance: Entrance::default(),
        }
    }
}

impl Motion {
    fn from_config(config: &CoordinatorConfig) -> Self {
        Self {
            duration: config.animation_duration().as_duration(),
            easing: config.easing,
            entrance: config.entrance,
        }
    }
}

/// Time, timers and animation shared by the coordinator and its toasts.
pub(crate) struct Runtime {
    pub clock: Box<dyn Clock>,
    /// Logical now: the deadline of the timer being handled, or the last tick.
    pub now: Instant,
    pub timers: Timers<Wake>,
    pub animator: Box<dyn Animator>,
    pub motion: Motion,
}

impl Runtime {
    pub(crate) fn new(clock: Box<dyn Clock>, motion: Motion) -> Self {
        let now = clock.now();
        Self {
            clock,
            now,
            timers: Timers::new(),
            animator: Box::new(TweenAnimator::new()),
            motion,
        }
    }
}

/// Runtime limits and layout settings, validated.
#[derive(Debug, Clone, Copy)]
struct Limits {
    default_anchor: Anchor,
    max_visible: MaxVisible,
    max_queued: MaxQueued,
    spacing: Pixels,
    margin: Pixels,
    allow_duplicates: bool,
    stack_toasts: bool,
    layout: StackLayout,
    queue_debounce: Duration,
}

impl From<&CoordinatorConfig> for Limits {
    fn from(config: &CoordinatorConfig) -> Self {
        Self {
            default_anchor: config.default_anchor,
            max_visible: config.max_visible(),
            max_queued: config.max_queued(),
            spacing: config.stack_spacing(),
            margin: config.screen_margin(),
            allow_duplicates: config.allow_duplicates,
            stack_toasts: config.stack_toasts,
            layout: config.stack_layout,
            queue_debounce: config.queue_debounce(),
        }
    }
}

/// Builder for [`Coordinator`] with replaceable collaborators.
pub struct CoordinatorBuilder {
    config: CoordinatorConfig,
    clock: Option<Box<dyn Clock>>,
    animator: Option<Box<dyn Animator>>,
    measure: Option<Box<dyn Measure>>,
    screen: Option<Rectangle>,
}

impl CoordinatorBuilder {
    /// Uses `clock` instead of the system clock.
    #[must_use]
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    /// Uses `animator` instead of [`TweenAnimator`].
    #[must_use]
    pub fn animator(mut self, animator: impl Animator + 'static) -> Self {
        self.animator = Some(Box::new(animator));
        self
    }

    /// Uses `measure` instead of [`ContentMeasure`].
    #[must_use]
    pub fn measure(mut self, measure: impl Measure + 'static) -> Self {
        self.measure = Some(Box::new(measure));
        self
    }

    /// Sets the initial screen geometry.
    #[must_use]
    pub fn screen(mut self, screen: Rectangle) -> Self {
        self.screen = Some(screen);
        self
    }

    /// Creates the coordinator.
    #[must_use]
    pub fn build(self) -> Coordinator {
        let clock = self.clock.unwrap_or_else(|| Box::new(SystemClock));
        let mut rt = Runtime::new(clock, Motion::from_config(&self.config));
        if let Some(animator) = self.animator {
            rt.animator = animator;
        }
        let screen = self.screen.unwrap_or(Rectangle {
            x: 0.0,
            y: 0.0,
            width: FALLBACK_SCREEN_WIDTH,
            height: FALLBACK_SCREEN_HEIGHT,
        });

        Coordinator {
            limits: Limits::from(&self.config),
            rt,
            measure: self
                .measure
                .unwrap_or_else(|| Box::new(ContentMeasure::default())),
            screen,
            surface: self.config.surface.map(Rectangle::from),
            toasts: HashMap::new(),
            stacks: BTreeMap::new(),
            queue: VecDeque::new(),
            queue_paused: false,
            drain_timer: None,
            events: EventHub::default(),
        }
    }
}

/// Owns every toast and decides where and when each one is shown.
pub struct Coordinator {
    limits: Limits,
    rt: Runtime,
    measure: Box<dyn Measure>,
    screen: Rectangle,
    surface: Option<Rectangle>,
    /// Every toast on screen, including ones detached from their stack while hiding.
    toasts: HashMap<ToastId, Toast>,
    /// Stacking order per anchor (arrival order).
    stacks: BTreeMap<Anchor, Vec<ToastId>>,
    queue: VecDeque<Toast>,
    queue_paused: bool,
    drain_timer: Option<TimerId>,
    events: EventHub,
}

impl fmt::Debug for Coordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Coordinator")
            .field("limits", &self.limits)
            .field("screen", &self.screen)
            .field("surface", &self.surface)
            .field("stacks", &self.stacks)
            .field("queued", &self.queue.len())
            .field("queue_paused", &self.queue_paused)
            .finish_non_exhaustive()
    }
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new(CoordinatorConfig::default())
    }
}

impl Drop for Coordinator {
    fn drop(&mut self) {
        self.rt.timers.clear();
        if !self.toasts.is_empty() || !self.queue.is_empty() {
            tracing::trace!(
                on_screen = self.toasts.len(),
                queued = self.queue.len(),
                "discarding toasts"
            );
        }
    }
}

impl Coordinator {
    /// Creates a coordinator with the system clock and default collaborators.
    #[must_use]
    pub fn new(config: CoordinatorConfig) -> Self {
        Self::builder(config).build()
    }

    /// Starts building a coordinator with custom collaborators.
    #[must_use]
    pub fn builder(config: CoordinatorConfig) -> CoordinatorBuilder {
        CoordinatorBuilder {
            config,
            clock: None,
            animator: None,
            measure: None,
            screen: None,
        }
    }

    // ------------------------------------------------------------------
    // Admission
    // ------------------------------------------------------------------

    /// Shows `toast` at the default anchor.
    pub fn show(&mut self, toast: Toast) -> Admission {
        let anchor = self.limits.default_anchor;
        self.show_at(toast, anchor)
    }

    /// Shows `toast` at `anchor`, queueing it if the anchor is full.
    pub fn show_at(&mut self, mut toast: Toast, anchor: Anchor) -> Admission {
        self.advance();
        let id = toast.id();
        toast.set_anchor(anchor);

        if self.is_duplicate(&toast) {
            tracing::debug!(%id, title = toast.title(), "rejecting duplicate toast");
            self.events.emit(ToastEvent::Dropped {
                id,
                reason: DropReason::Duplicate,
            });
            return Admission::Rejected {
                id,
                reason: DropReason::Duplicate,
            };
        }

        if !self.limits.stack_toasts {
            self.replace_at(anchor);
        }

        if self.has_room(anchor) {
            self.admit(toast);
            return Admission::Shown(id);
        }

        if self.limits.max_queued.is_disabled() {
            tracing::warn!(%id, ?anchor, "no room and queueing disabled, dropping toast");
            self.events.emit(ToastEvent::Dropped {
                id,
                reason: DropReason::QueueDisabled,
            });
            return Admission::Rejected {
                id,
                reason: DropReason::QueueDisabled,
            };
        }

        while self.queue.len() >= self.limits.max_queued.value() {
            self.drop_oldest_queued();
        }
        toast.mark_queued();
        self.queue.push_back(toast);
        tracing::debug!(%id, ?anchor, queued = self.queue.len(), "toast queued");
        self.schedule_drain();
        Admission::Queued(id)
    }

    /// Shows an info toast at the default anchor.
    pub fn show_info(&mut self, title: impl Into<String>, message: impl Into<String>) -> Admission {
        self.show(Toast::info(title, message))
    }

    /// Shows a success toast at the default anchor.
    pub fn show_success(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Admission {
        self.show(Toast::success(title, message))
    }

    /// Shows a warning toast at the default anchor.
    pub fn show_warning(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Admission {
        self.show(Toast::warning(title, message))
    }

    /// Shows an error toast at the default anchor.
    pub fn show_error(&mut self, title: impl Into<String>, message: impl Into<String>) -> Admission {
        self.show(Toast::error(title, message))
    }

    /// Shows a toast of `kind` at `anchor`.
    pub fn show_kind_at(
        &mut self,
        kind: ToastKind,
        title: impl Into<String>,
        message: impl Into<String>,
        anchor: Anchor,
    ) -> Admission {
        self.show_at(Toast::new(kind, title, message), anchor)
    }

    /// Shows a toast with a caller-provided icon at the default anchor.
    pub fn show_custom(
        &mut self,
        icon: impl Into<String>,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Admission {
        self.show(Toast::custom(icon, title, message))
    }

    /// Shows an info toast at `anchor`.
    pub fn show_info_at(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
        anchor: Anchor,
    ) -> Admission {
        self.show_kind_at(ToastKind::Info, title, message, anchor)
    }

    /// Shows a success toast at `anchor`.
    pub fn show_success_at(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
        anchor: Anchor,
    ) -> Admission {
        self.show_kind_at(ToastKind::Success, title, message, anchor)
    }

    /// Shows a warning toast at `anchor`.
    pub fn show_warning_at(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
        anchor: Anchor,
    ) -> Admission {
        self.show_kind_at(ToastKind::Warning, title, message, anchor)
    }

    /// Shows an error toast at `anchor`.
    pub fn show_error_at(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
        anchor: Anchor,
    ) -> Admission {
        self.show_kind_at(ToastKind::Error, title, message, anchor)
    }

    // ------------------------------------------------------------------
    // Hiding
    // ------------------------------------------------------------------

    /// Hides a toast programmatically, or removes it from the queue.
    ///
    /// The toast leaves its stack at once; its exit animation still runs.
    /// Returns `false` if the toast is unknown or already hiding.
    pub fn hide(&mut self, id: ToastId) -> bool {
        self.advance();
        if let Some(index) = self.queue.iter().position(|toast| toast.id() == id) {
            self.queue.remove(index);
            tracing::debug!(%id, "queued toast cancelled");
            self.events.emit(ToastEvent::Dropped {
                id,
                reason: DropReason::Cancelled,
            });
            return true;
        }

        let Some(anchor) = self
            .toasts
            .get(&id)
            .filter(|toast| toast.state().is_live())
            .map(Toast::anchor)
        else {
            return false;
        };
        self.evict(id, DismissReason::Programmatic);
        self.reflow(anchor);
        self.schedule_drain();
        true
    }

    /// Dismisses a toast on behalf of the user.
    ///
    /// The toast keeps its slot until its exit animation completes.
    pub fn dismiss(&mut self, id: ToastId) -> bool {
        self.advance();
        self.begin_hide(id, DismissReason::User)
    }

    /// Hides every toast at every anchor. The queue is left alone.
    pub fn hide_all(&mut self) {
        for anchor in Anchor::ALL {
            self.hide_all_at(anchor);
        }
    }

    /// Hides every toast stacked at `anchor`.
    pub fn hide_all_at(&mut self, anchor: Anchor) {
        self.advance();
        let ids = self.stacks.get(&anchor).cloned().unwrap_or_default();
        if ids.is_empty() {
            return;
        }
        for id in ids {
            self.evict(id, DismissReason::Programmatic);
        }
        tracing::debug!(?anchor, "hid all toasts at anchor");
        self.schedule_drain();
    }

    /// Hides every toast and empties the queue.
    pub fn clear(&mut self) {
        self.hide_all();
        self.clear_queue();
    }

    /// Hides every toast at `anchor`.
    pub fn clear_at(&mut self, anchor: Anchor) {
        self.hide_all_at(anchor);
    }

    /// Discards every queued toast.
    pub fn clear_queue(&mut self) {
        self.advance();
        for toast in std::mem::take(&mut self.queue) {
            self.events.emit(ToastEvent::Dropped {
                id: toast.id(),
                reason: DropReason::Cancelled,
            });
        }
        if let Some(timer) = self.drain_timer.take() {
            self.rt.timers.cancel(timer);
        }
    }

    // ------------------------------------------------------------------
    // Queue control
    // ------------------------------------------------------------------

    /// Stops admitting queued toasts until [`resume_queue`](Self::resume_queue).
    pub fn pause_queue(&mut self) {
        self.advance();
        self.queue_paused = true;
        if let Some(timer) = self.drain_timer.take() {
            self.rt.timers.cancel(timer);
        }
    }

    /// Resumes admitting queued toasts after the debounce.
    pub fn resume_queue(&mut self) {
        self.advance();
        self.queue_paused = false;
        self.schedule_drain();
    }

    /// Returns whether the queue drain is paused.
    #[must_use]
    pub fn is_queue_paused(&self) -> bool {
        self.queue_paused
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Number of toasts occupying a slot at any anchor.
    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.stacks.values().map(Vec::len).sum()
    }

    /// Number of toasts occupying a slot at `anchor`.
    #[must_use]
    pub fn visible_count_at(&self, anchor: Anchor) -> usize {
        self.stacks.get(&anchor).map_or(0, Vec::len)
    }

    /// Number of toasts waiting in the shared queue.
    #[must_use]
    pub fn queued_count(&self) -> usize {
        self.queue.len()
    }

    /// Toasts occupying a slot, grouped by anchor in stacking order.
    #[must_use]
    pub fn visible_toasts(&self) -> Vec<&Toast> {
        self.stacks
            .values()
            .flatten()
            .filter_map(|id| self.toasts.get(id))
            .collect()
    }

    /// Toasts stacked at `anchor`, oldest first.
    pub fn visible_toasts_at(&self, anchor: Anchor) -> impl Iterator<Item = &Toast> {
        self.stacks
            .get(&anchor)
            .into_iter()
            .flatten()
            .filter_map(|id| self.toasts.get(id))
    }

    /// Every toast a renderer should draw, including detached ones still fading out.
    pub fn on_screen(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.values()
    }

    /// Queued toasts in admission order.
    pub fn queued_toasts(&self) -> impl Iterator<Item = &Toast> {
        self.queue.iter()
    }

    /// Looks up an on-screen or queued toast.
    #[must_use]
    pub fn toast(&self, id: ToastId) -> Option<&Toast> {
        self.toasts
            .get(&id)
            .or_else(|| self.queue.iter().find(|toast| toast.id() == id))
    }

    /// Current rendered frame of an on-screen toast.
    #[must_use]
    pub fn frame(&self, id: ToastId) -> Option<Frame> {
        let toast = self.toasts.get(&id)?;
        let now = self.rt.clock.now();
        Some(
            self.rt
                .animator
                .frame(id, now)
                .unwrap_or_else(|| Frame::opaque(toast.slot())),
        )
    }

    /// Slot of an item of `size` at `stack_index`, assuming uniform heights.
    #[must_use]
    pub fn toast_rect(&self, anchor: Anchor, size: Size, stack_index: usize) -> Rectangle {
        let point = position::position(
            anchor,
            size,
            stack_index,
            self.available_area(),
            self.limits.spacing.value(),
        );
        Rectangle::new(point, size)
    }

    /// The surface (or screen) shrunk by the screen margin.
    #[must_use]
    pub fn available_area(&self) -> Rectangle {
        position::available_area(
            self.surface.unwrap_or(self.screen),
            self.limits.margin.value(),
        )
    }

    /// Screen geometry last reported by the caller.
    #[must_use]
    pub fn screen_rect(&self) -> Rectangle {
        self.screen
    }

    /// Returns whether no timer or animation is pending.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.rt.timers.is_empty()
    }

    /// Deadline of the next pending timer.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.rt.timers.next_deadline()
    }

    // ------------------------------------------------------------------
    // Interaction
    // ------------------------------------------------------------------

    /// Pointer entered a toast; pauses its countdown if it pauses on hover.
    pub fn hover_enter(&mut self, id: ToastId) {
        self.advance();
        if let Some(toast) = self.toasts.get_mut(&id) {
            if toast.hover_enter(&mut self.rt) {
                self.events.emit(ToastEvent::TimerPaused(id));
            }
        }
    }

    /// Pointer left a toast; resumes a countdown paused by hovering.
    pub fn hover_leave(&mut self, id: ToastId) {
        self.advance();
        if let Some(toast) = self.toasts.get_mut(&id) {
            if toast.hover_leave(&mut self.rt) {
                self.events.emit(ToastEvent::TimerResumed(id));
            }
        }
    }

    /// Invokes the action at `index`, then dismisses the toast if the action asks for it.
    pub fn trigger_action(&mut self, id: ToastId, index: usize) -> bool {
        self.advance();
        let Some(action) = self
            .toasts
            .get(&id)
            .filter(|toast| toast.state().is_live())
            .and_then(|toast| toast.actions().get(index))
            .cloned()
        else {
            return false;
        };

        tracing::debug!(%id, label = action.label(), "toast action triggered");
        action.invoke();
        self.events.emit(ToastEvent::ActionTriggered { id, index });
        if action.dismisses_on_click() {
            self.begin_hide(id, DismissReason::User);
        }
        true
    }

    /// Keyboard activation: the primary action, else the first one, else close.
    pub fn activate(&mut self, id: ToastId) -> bool {
        let Some((primary, has_actions, closable)) = self.toasts.get(&id).map(|toast| {
            (
                toast.actions().iter().position(|action| action.is_primary()),
                !toast.actions().is_empty(),
                toast.options().closable,
            )
        }) else {
            return false;
        };
        match primary {
            Some(index) => self.trigger_action(id, index),
            None if has_actions => self.trigger_action(id, 0),
            None if closable => self.dismiss(id),
            None => false,
        }
    }

    /// Updates a toast's progress bar. Returns the stored (clamped) value.
    pub fn set_progress(&mut self, id: ToastId, value: i32) -> Option<i32> {
        let value = self.toast_mut(id)?.set_progress(value)?;
        self.events.emit(ToastEvent::ProgressChanged { id, value });
        Some(value)
    }

    /// Changes a toast's progress range, clamping its value into it.
    pub fn set_progress_range(&mut self, id: ToastId, min: i32, max: i32) {
        if let Some(toast) = self.toast_mut(id) {
            toast.set_progress_range(min, max);
        }
    }

    /// Freezes a toast's countdown. Returns whether it was running.
    pub fn pause_timer(&mut self, id: ToastId) -> bool {
        self.advance();
        let paused = self
            .toasts
            .get_mut(&id)
            .is_some_and(|toast| toast.pause_timer(&mut self.rt));
        if paused {
            self.events.emit(ToastEvent::TimerPaused(id));
        }
        paused
    }

    /// Restarts a paused countdown for its remaining time.
    pub fn resume_timer(&mut self, id: ToastId) -> bool {
        self.advance();
        let resumed = self
            .toasts
            .get_mut(&id)
            .is_some_and(|toast| toast.resume_timer(&mut self.rt));
        if resumed {
            self.events.emit(ToastEvent::TimerResumed(id));
        }
        resumed
    }

    /// Restarts a toast's countdown from its full duration.
    pub fn reset_timer(&mut self, id: ToastId) -> bool {
        self.advance();
        self.toasts
            .get_mut(&id)
            .is_some_and(|toast| toast.reset_timer(&mut self.rt))
    }

    /// Changes a toast's duration and restarts its countdown.
    pub fn set_duration(&mut self, id: ToastId, duration: Duration) {
        self.advance();
        if let Some(toast) = self.toasts.get_mut(&id) {
            toast.set_duration(duration, &mut self.rt);
        }
    }

    /// Makes a toast persistent, or gives it back its countdown.
    pub fn set_persistent(&mut self, id: ToastId, persistent: bool) {
        self.advance();
        if let Some(toast) = self.toasts.get_mut(&id) {
            toast.set_persistent(persistent, &mut self.rt);
        }
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

    /// Changes the per-anchor bound, hiding the newest toasts of any anchor above it.
    pub fn set_max_visible(&mut self, max_visible: usize) {
        self.advance();
        let before = self.configuration();
        self.limits.max_visible = MaxVisible::new(max_visible);
        self.enforce_max_visible();
        self.notify_config_change(&before);
    }

    /// Changes the queue bound, dropping the oldest queued toasts above it.
    pub fn set_max_queued(&mut self, max_queued: usize) {
        self.advance();
        let before = self.configuration();
        self.limits.max_queued = MaxQueued::new(max_queued);
        self.enforce_max_queued();
        self.notify_config_change(&before);
    }

    /// Changes the gap between stacked toasts and reflows every anchor.
    pub fn set_stack_spacing(&mut self, spacing: f32) {
        self.advance();
        let before = self.configuration();
        self.limits.spacing = Pixels::new(spacing);
        self.reflow_all();
        self.notify_config_change(&before);
    }

    /// Changes the inset from the screen edges and reflows every anchor.
    pub fn set_screen_margin(&mut self, margin: f32) {
        self.advance();
        let before = self.configuration();
        self.limits.margin = Pixels::new(margin);
        self.reflow_all();
        self.notify_config_change(&before);
    }

    /// Switches between stacking and replace mode.
    ///
    /// Turning stacking off keeps only the newest toast at each anchor.
    pub fn set_stack_toasts(&mut self, stack: bool) {
        self.advance();
        let before = self.configuration();
        self.limits.stack_toasts = stack;
        self.enforce_replace_mode();
        self.notify_config_change(&before);
    }

    /// Allows or rejects toasts matching a visible toast's title and message.
    pub fn set_allow_duplicates(&mut self, allow: bool) {
        let before = self.configuration();
        self.limits.allow_duplicates = allow;
        self.notify_config_change(&before);
    }

    /// Changes the anchor used by [`show`](Self::show).
    pub fn set_default_anchor(&mut self, anchor: Anchor) {
        let before = self.configuration();
        self.limits.default_anchor = anchor;
        self.notify_config_change(&before);
    }

    /// Anchor used by [`show`](Self::show).
    #[must_use]
    pub fn default_anchor(&self) -> Anchor {
        self.limits.default_anchor
    }

    /// Current settings as a config record.
    #[must_use]
    pub fn configuration(&self) -> CoordinatorConfig {
        CoordinatorConfig {
            default_anchor: self.limits.default_anchor,
            max_visible: self.limits.max_visible.value(),
            max_queued: self.limits.max_queued.value(),
            stack_spacing: self.limits.spacing.value(),
            screen_margin: self.limits.margin.value(),
            allow_duplicates: self.limits.allow_duplicates,
            stack_toasts: self.limits.stack_toasts,
            animation_duration_ms: u64::try_from(self.rt.motion.duration.as_millis())
                .unwrap_or(u64::MAX),
            easing: self.rt.motion.easing,
            entrance: self.rt.motion.entrance,
            stack_layout: self.limits.layout,
            queue_debounce_ms: u64::try_from(self.limits.queue_debounce.as_millis())
                .unwrap_or(u64::MAX),
            surface: self.surface.map(Into::into),
        }
    }

    /// Applies every setting of `config`, with the side effects of the individual setters.
    ///
    /// Emits at most one [`ToastEvent::ConfigChanged`].
    pub fn set_configuration(&mut self, config: &CoordinatorConfig) {
        self.advance();
        let before = self.configuration();
        self.rt.motion = Motion::from_config(config);
        self.limits.default_anchor = config.default_anchor;
        self.limits.allow_duplicates = config.allow_duplicates;
        self.limits.layout = config.stack_layout;
        self.limits.queue_debounce = config.queue_debounce();
        self.limits.spacing = config.stack_spacing();
        self.limits.margin = config.screen_margin();
        self.limits.max_queued = config.max_queued();
        self.limits.max_visible = config.max_visible();
        self.limits.stack_toasts = config.stack_toasts;
        self.surface = config.surface.map(Rectangle::from);
        self.reflow_all();

        self.enforce_max_queued();
        self.enforce_max_visible();
        self.enforce_replace_mode();
        self.notify_config_change(&before);
    }

    /// Reports new screen geometry and reflows every anchor.
    pub fn set_screen_geometry(&mut self, screen: Rectangle) {
        self.advance();
        self.screen = screen;
        self.reflow_all();
    }

    /// Lays toasts out inside `surface` instead of the screen; `None` restores the screen.
    pub fn set_surface(&mut self, surface: Option<Rectangle>) {
        self.advance();
        let before = self.configuration();
        self.surface = surface;
        self.reflow_all();
        self.notify_config_change(&before);
    }

    // ------------------------------------------------------------------
    // Event loop
    // ------------------------------------------------------------------

    /// Processes every timer due at the clock's current time.
    pub fn tick(&mut self) {
        self.advance();
    }

    /// Handles a coordinator message.
    pub fn handle_message(&mut self, message: &Message) {
        match message {
            Message::Tick => self.tick(),
            Message::Dismiss(id) => {
                self.dismiss(*id);
            }
            Message::HoverEnter(id) => self.hover_enter(*id),
            Message::HoverLeave(id) => self.hover_leave(*id),
            Message::Action(id, index) => {
                self.trigger_action(*id, *index);
            }
            Message::Activate(id) => {
                self.activate(*id);
            }
        }
    }

    /// Ticks at display rate while timers are pending.
    pub fn subscription(&self) -> iced::Subscription<Message> {
        if self.rt.timers.is_empty() {
            iced::Subscription::none()
        } else {
            iced::time::every(Duration::from_millis(TICK_INTERVAL_MS)).map(|_| Message::Tick)
        }
    }

    /// Removes and returns buffered events, oldest first.
    pub fn drain_events(&mut self) -> Vec<ToastEvent> {
        self.events.drain()
    }

    /// Buffered events not yet drained.
    pub fn pending_events(&self) -> impl Iterator<Item = &ToastEvent> {
        self.events.pending()
    }

    /// Returns a channel receiving every event emitted from now on.
    pub fn subscribe(&mut self) -> Receiver<ToastEvent> {
        self.events.subscribe()
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn advance(&mut self) {
        let now = self.rt.clock.now();
        while let Some((timer, at, wake)) = self.rt.timers.pop_due(now) {
            self.rt.now = at.max(self.rt.now);
            match wake {
                Wake::Countdown(id) => {
                    let hiding = self
                        .toasts
                        .get_mut(&id)
                        .is_some_and(|toast| toast.on_countdown_elapsed(timer, &mut self.rt));
                    if hiding {
                        tracing::debug!(%id, "toast timed out");
                        self.events.emit(ToastEvent::Dismissed {
                            id,
                            reason: DismissReason::Timeout,
                        });
                    }
                }
                Wake::Animation(id, token) => {
                    let transition = self
                        .toasts
                        .get_mut(&id)
                        .and_then(|toast| toast.on_animation_finished(token));
                    match transition {
                        Some(Transition::Shown) => self.events.emit(ToastEvent::Shown(id)),
                        Some(Transition::Hidden) => self.finish(id),
                        None => {}
                    }
                }
                Wake::DrainQueue => {
                    if self.drain_timer == Some(timer) {
                        self.drain_timer = None;
                        self.process_queue();
                    }
                }
            }
        }
        self.rt.now = now.max(self.rt.now);
    }

    fn toast_mut(&mut self, id: ToastId) -> Option<&mut Toast> {
        self.toasts.get_mut(&id)
    }

    fn has_room(&self, anchor: Anchor) -> bool {
        self.limits.max_visible.has_room(self.visible_count_at(anchor))
    }

    fn is_duplicate(&self, candidate: &Toast) -> bool {
        !self.limits.allow_duplicates
            && self.visible_toasts().into_iter().any(|toast| {
                toast.state().is_live() && toast.content().same_text(candidate.content())
            })
    }

    /// Measures, slots and shows a toast at its anchor, which must have room.
    fn admit(&mut self, mut toast: Toast) {
        let id = toast.id();
        let anchor = toast.anchor();
        toast.set_size(self.measure.measure(toast.content(), toast.options()));
        self.toasts.insert(id, toast);
        self.stacks.entry(anchor).or_default().push(id);
        self.reflow(anchor);
        if let Some(toast) = self.toasts.get_mut(&id) {
            toast.show(&mut self.rt);
        }
        tracing::debug!(%id, ?anchor, stacked = self.visible_count_at(anchor), "toast admitted");
    }

    fn replace_at(&mut self, anchor: Anchor) {
        let ids = self.stacks.get(&anchor).cloned().unwrap_or_default();
        for id in ids {
            self.evict(id, DismissReason::Replaced);
        }
    }

    /// Starts hiding a toast that keeps its slot until it is dismissed.
    fn begin_hide(&mut self, id: ToastId, reason: DismissReason) -> bool {
        let hiding = self
            .toasts
            .get_mut(&id)
            .is_some_and(|toast| toast.hide(reason, &mut self.rt));
        if hiding {
            tracing::debug!(%id, ?reason, "toast hiding");
            self.events.emit(ToastEvent::Dismissed { id, reason });
        }
        hiding
    }

    /// Detaches a toast from its stack and hides it if it is still live.
    ///
    /// Callers reflow the anchor afterwards.
    fn evict(&mut self, id: ToastId, reason: DismissReason) {
        self.begin_hide(id, reason);
        if let Some(anchor) = self.toasts.get(&id).map(Toast::anchor) {
            self.detach(id, anchor);
        }
    }

    fn detach(&mut self, id: ToastId, anchor: Anchor) -> bool {
        let Some(ids) = self.stacks.get_mut(&anchor) else {
            return false;
        };
        let before = ids.len();
        ids.retain(|other| *other != id);
        let removed = ids.len() != before;
        if ids.is_empty() {
            self.stacks.remove(&anchor);
        }
        removed
    }

    /// Destroys a toast whose exit animation completed.
    fn finish(&mut self, id: ToastId) {
        let Some(mut toast) = self.toasts.remove(&id) else {
            return;
        };
        toast.teardown(&mut self.rt);
        self.events.emit(ToastEvent::Hidden(id));

        let anchor = toast.anchor();
        if self.detach(id, anchor) {
            self.reflow(anchor);
        }
        tracing::debug!(%id, ?anchor, "toast destroyed");

        self.schedule_drain();
        if self.toasts.is_empty() {
            self.events.emit(ToastEvent::AllHidden);
        }
    }

    /// Hides the newest toasts of every anchor above the visible bound.
    fn enforce_max_visible(&mut self) {
        let limit = self.limits.max_visible.value();
        for anchor in Anchor::ALL {
            let excess: Vec<ToastId> = self
                .stacks
                .get(&anchor)
                .map(|ids| ids.iter().skip(limit).copied().collect())
                .unwrap_or_default();
            if excess.is_empty() {
                continue;
            }
            tracing::debug!(?anchor, evicted = excess.len(), "restoring visible bound");
            for id in excess {
                self.evict(id, DismissReason::Evicted);
            }
            self.reflow(anchor);
        }
        self.schedule_drain();
    }

    fn enforce_max_queued(&mut self) {
        while self.queue.len() > self.limits.max_queued.value() {
            self.drop_oldest_queued();
        }
    }

    /// In replace mode, keeps only the newest toast at each anchor.
    fn enforce_replace_mode(&mut self) {
        if self.limits.stack_toasts {
            return;
        }
        for anchor in Anchor::ALL {
            let older: Vec<ToastId> = self
                .stacks
                .get(&anchor)
                .and_then(|ids| ids.split_last())
                .map(|(_, rest)| rest.to_vec())
                .unwrap_or_default();
            if older.is_empty() {
                continue;
            }
            for id in older {
                self.evict(id, DismissReason::Replaced);
            }
            self.reflow(anchor);
        }
        self.schedule_drain();
    }

    fn notify_config_change(&mut self, before: &CoordinatorConfig) {
        if self.configuration() != *before {
            tracing::debug!("coordinator configuration changed");
            self.events.emit(ToastEvent::ConfigChanged);
        }
    }

    fn drop_oldest_queued(&mut self) {
        if let Some(oldest) = self.queue.pop_front() {
            tracing::warn!(id = %oldest.id(), "queue full, dropping oldest toast");
            self.events.emit(ToastEvent::Dropped {
                id: oldest.id(),
                reason: DropReason::QueueOverflow,
            });
        }
    }

    /// (Re)starts the debounced queue drain.
    fn schedule_drain(&mut self) {
        if self.queue_paused || self.queue.is_empty() {
            return;
        }
        if let Some(timer) = self.drain_timer.take() {
            self.rt.timers.cancel(timer);
        }
        let at = self.rt.now + self.limits.queue_debounce;
        self.drain_timer = Some(self.rt.timers.schedule(at, Wake::DrainQueue));
    }

    /// Admits queued toasts, in order, whose anchor has room.
    fn process_queue(&mut self) {
        if self.queue_paused {
            return;
        }
        let mut admitted = 0;
        let mut blocked = VecDeque::new();

        while let Some(toast) = self.queue.pop_front() {
            let anchor = toast.anchor();
            if self.is_duplicate(&toast) {
                tracing::debug!(id = %toast.id(), "dropping queued duplicate");
                self.events.emit(ToastEvent::Dropped {
                    id: toast.id(),
                    reason: DropReason::Duplicate,
                });
                continue;
            }
            if !self.limits.stack_toasts {
                self.replace_at(anchor);
            }
            if self.has_room(anchor) {
                self.admit(toast);
                admitted += 1;
            } else {
                blocked.push_back(toast);
            }
        }
        self.queue = blocked;

        tracing::debug!(admitted, remaining = self.queue.len(), "queue processed");
        self.events.emit(ToastEvent::QueueProcessed { admitted });
    }

    fn reflow(&mut self, anchor: Anchor) {
        let area = self.available_area();
        let Some(ids) = self.stacks.get(&anchor) else {
            return;
        };
        let members: Vec<(ToastId, Size)> = ids
            .iter()
            .filter_map(|id| self.toasts.get(id).map(|toast| (*id, toast.size())))
            .collect();
        let sizes: Vec<Size> = members.iter().map(|(_, size)| *size).collect();
        let slots = position::layout_stack(
            anchor,
            &sizes,
            area,
            self.limits.spacing.value(),
            self.limits.layout,
        );

        for ((id, _), slot) in members.into_iter().zip(slots) {
            if let Some(toast) = self.toasts.get_mut(&id) {
                if matches!(toast.state(), ToastState::Created | ToastState::Queued) {
                    toast.place(slot);
                } else {
                    toast.move_to(slot, &mut self.rt);
                }
            }
        }
        tracing::trace!(?anchor, members = sizes.len(), "stack reflowed");
    }

    fn reflow_all(&mut self) {
        let anchors: Vec<Anchor> = self.stacks.keys().copied().collect();
        for anchor in anchors {
            self.reflow(anchor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_abs_diff_eq, coordinator_with, test_screen, F32_EPSILON};
    use crate::ui::notifications::{ManualClock, ToastAction, ToastContent, ToastOptions};
    use std::cell::Cell;
    use std::rc::Rc;

    fn config() -> CoordinatorConfig {
        CoordinatorConfig::default()
    }

    fn fixed_size(_: &ToastContent, _: &ToastOptions) -> Size {
        Size::new(300.0, 60.0)
    }

    fn fixed(config: CoordinatorConfig) -> (Coordinator, ManualClock) {
        let clock = ManualClock::new();
        let coordinator = Coordinator::builder(config)
            .clock(clock.clone())
            .screen(test_screen())
            .measure(fixed_size)
            .build();
        (coordinator, clock)
    }

    /// Lets the entrance animation finish.
    fn settle(coordinator: &mut Coordinator, clock: &ManualClock) {
        clock.advance_ms(400);
        coordinator.tick();
    }

    #[test]
    fn new_coordinator_is_empty() {
        let (coordinator, _) = coordinator_with(config());
        assert_eq!(coordinator.visible_count(), 0);
        assert_eq!(coordinator.queued_count(), 0);
        assert!(coordinator.is_idle());
        assert!(!coordinator.is_queue_paused());
    }

    #[test]
    fn show_admits_when_room() {
        let (mut coordinator, clock) = coordinator_with(config());
        let admission = coordinator.show_info("Saved", "All changes saved");

        assert!(admission.is_shown());
        assert_eq!(coordinator.visible_count_at(Anchor::TopRight), 1);
        let toast = coordinator.toast(admission.id()).expect("toast is tracked");
        assert_eq!(toast.state(), ToastState::Showing);

        settle(&mut coordinator, &clock);
        let events = coordinator.drain_events();
        assert!(events.contains(&ToastEvent::Shown(admission.id())));
    }

    #[test]
    fn full_anchor_queues_and_other_anchor_admits() {
        let (mut coordinator, _) = coordinator_with(CoordinatorConfig {
            max_visible: 1,
            ..config()
        });
        assert!(coordinator.show_info("a", "1").is_shown());
        assert!(coordinator.show_info("b", "2").is_queued());
        assert!(coordinator
            .show_info_at("c", "3", Anchor::BottomLeft)
            .is_shown());

        assert_eq!(coordinator.visible_count(), 2);
        assert_eq!(coordinator.queued_count(), 1);
    }

    #[test]
    fn duplicate_is_rejected_without_queueing() {
        let (mut coordinator, _) = coordinator_with(CoordinatorConfig {
            max_visible: 1,
            ..config()
        });
        coordinator.show_info("Same", "Text");
        let second = coordinator.show_info_at("Same", "Text", Anchor::BottomLeft);

        assert_eq!(
            second,
            Admission::Rejected {
                id: second.id(),
                reason: DropReason::Duplicate
            }
        );
        assert_eq!(coordinator.visible_count(), 1);
        assert_eq!(coordinator.queued_count(), 0);
    }

    #[test]
    fn duplicates_allowed_when_configured() {
        let (mut coordinator, _) = coordinator_with(CoordinatorConfig {
            allow_duplicates: true,
            ..config()
        });
        coordinator.show_info("Same", "Text");
        assert!(coordinator.show_info("Same", "Text").is_shown());
        assert_eq!(coordinator.visible_count(), 2);
    }

    #[test]
    fn zero_queue_drops_when_full() {
        let (mut coordinator, _) = coordinator_with(CoordinatorConfig {
            max_visible: 1,
            max_queued: 0,
            ..config()
        });
        coordinator.show_info("a", "1");
        let dropped = coordinator.show_info("b", "2");

        assert!(dropped.is_rejected());
        assert_eq!(coordinator.queued_count(), 0);
        assert!(coordinator.drain_events().contains(&ToastEvent::Dropped {
            id: dropped.id(),
            reason: DropReason::QueueDisabled
        }));
    }

    #[test]
    fn hide_reclaims_slot_immediately_and_drains_after_debounce() {
        let (mut coordinator, clock) = coordinator_with(CoordinatorConfig {
            max_visible: 1,
            ..config()
        });
        let first = coordinator.show_info("a", "1").id();
        let second = coordinator.show_info("b", "2").id();

        assert!(coordinator.hide(first));
        assert_eq!(coordinator.visible_count(), 0);
        assert_eq!(coordinator.queued_count(), 1);

        clock.advance_ms(100);
        coordinator.tick();
        assert_eq!(coordinator.queued_count(), 0);
        assert_eq!(
            coordinator.toast(second).map(Toast::state),
            Some(ToastState::Showing)
        );
    }

    #[test]
    fn hidden_toast_is_destroyed_after_exit_animation() {
        let (mut coordinator, clock) = coordinator_with(config());
        let id = coordinator.show_info("a", "1").id();
        settle(&mut coordinator, &clock);

        coordinator.hide(id);
        assert_eq!(coordinator.toast(id).map(Toast::state), Some(ToastState::Hiding));

        settle(&mut coordinator, &clock);
        assert!(coordinator.toast(id).is_none());
        let events = coordinator.drain_events();
        assert!(events.contains(&ToastEvent::Hidden(id)));
        assert_eq!(events.last(), Some(&ToastEvent::AllHidden));
    }

    #[test]
    fn hide_queued_toast_cancels_it() {
        let (mut coordinator, _) = coordinator_with(CoordinatorConfig {
            max_visible: 1,
            ..config()
        });
        coordinator.show_info("a", "1");
        let queued = coordinator.show_info("b", "2").id();

        assert!(coordinator.hide(queued));
        assert_eq!(coordinator.queued_count(), 0);
        assert!(!coordinator.hide(queued));
    }

    #[test]
    fn user_dismiss_keeps_slot_until_hidden() {
        let (mut coordinator, clock) = coordinator_with(config());
        let id = coordinator.show_info("a", "1").id();
        settle(&mut coordinator, &clock);

        assert!(coordinator.dismiss(id));
        assert_eq!(coordinator.visible_count(), 1);

        settle(&mut coordinator, &clock);
        assert_eq!(coordinator.visible_count(), 0);
        assert!(coordinator.drain_events().contains(&ToastEvent::Dismissed {
            id,
            reason: DismissReason::User
        }));
    }

    #[test]
    fn timeout_dismisses_with_timeout_reason() {
        let (mut coordinator, clock) = coordinator_with(config());
        let id = coordinator
            .show(Toast::info("a", "1").with_duration(Duration::from_millis(1000)))
            .id();

        clock.advance_ms(1000);
        coordinator.tick();

        assert_eq!(coordinator.toast(id).map(Toast::state), Some(ToastState::Hiding));
        assert!(coordinator.drain_events().contains(&ToastEvent::Dismissed {
            id,
            reason: DismissReason::Timeout
        }));
    }

    #[test]
    fn stacked_slots_follow_arrival_order() {
        let (mut coordinator, _) = fixed(config());
        let first = coordinator.show_info("a", "1").id();
        let second = coordinator.show_info("b", "2").id();
        let area = coordinator.available_area();

        let first_slot = coordinator.toast(first).map(Toast::slot).expect("first");
        let second_slot = coordinator.toast(second).map(Toast::slot).expect("second");

        assert_abs_diff_eq!(first_slot.y, area.y, epsilon = F32_EPSILON);
        assert_abs_diff_eq!(second_slot.y, area.y + 68.0, epsilon = F32_EPSILON);
        assert_abs_diff_eq!(first_slot.x, area.x + area.width - 300.0, epsilon = F32_EPSILON);
    }

    #[test]
    fn toast_rect_matches_admitted_slot() {
        let (mut coordinator, _) = fixed(config());
        coordinator.show_info_at("a", "1", Anchor::BottomCenter);
        let id = coordinator.show_info_at("b", "2", Anchor::BottomCenter).id();

        let expected = coordinator.toast_rect(Anchor::BottomCenter, Size::new(300.0, 60.0), 1);
        assert_eq!(coordinator.toast(id).map(Toast::slot), Some(expected));
    }

    #[test]
    fn set_max_visible_evicts_newest() {
        let (mut coordinator, _) = coordinator_with(config());
        let ids: Vec<ToastId> = (0..4)
            .map(|i| coordinator.show_info(format!("t{i}"), "").id())
            .collect();

        coordinator.set_max_visible(2);

        assert_eq!(coordinator.visible_count_at(Anchor::TopRight), 2);
        let stacked: Vec<ToastId> = coordinator
            .visible_toasts_at(Anchor::TopRight)
            .map(Toast::id)
            .collect();
        assert_eq!(stacked, ids[..2].to_vec());
        assert!(coordinator.drain_events().contains(&ToastEvent::Dismissed {
            id: ids[3],
            reason: DismissReason::Evicted
        }));
    }

    #[test]
    fn set_max_queued_drops_oldest() {
        let (mut coordinator, _) = coordinator_with(CoordinatorConfig {
            max_visible: 1,
            ..config()
        });
        coordinator.show_info("v", "");
        let queued: Vec<ToastId> = (0..3)
            .map(|i| coordinator.show_info(format!("q{i}"), "").id())
            .collect();

        coordinator.set_max_queued(1);

        let remaining: Vec<ToastId> = coordinator.queued_toasts().map(Toast::id).collect();
        assert_eq!(remaining, vec![queued[2]]);
    }

    #[test]
    fn disabling_stacking_keeps_newest_per_anchor() {
        let (mut coordinator, _) = coordinator_with(config());
        coordinator.show_info("a", "");
        let newest = coordinator.show_info("b", "").id();
        coordinator.show_info_at("c", "", Anchor::Center);

        coordinator.set_stack_toasts(false);

        assert_eq!(coordinator.visible_count_at(Anchor::TopRight), 1);
        assert_eq!(
            coordinator
                .visible_toasts_at(Anchor::TopRight)
                .next()
                .map(Toast::id),
            Some(newest)
        );
        assert_eq!(coordinator.visible_count_at(Anchor::Center), 1);
    }

    #[test]
    fn pause_queue_blocks_drain_until_resumed() {
        let (mut coordinator, clock) = coordinator_with(CoordinatorConfig {
            max_visible: 1,
            ..config()
        });
        let first = coordinator.show_info("a", "1").id();
        coordinator.show_info("b", "2");
        coordinator.pause_queue();

        coordinator.hide(first);
        clock.advance_ms(500);
        coordinator.tick();
        assert_eq!(coordinator.queued_count(), 1);

        coordinator.resume_queue();
        clock.advance_ms(100);
        coordinator.tick();
        assert_eq!(coordinator.queued_count(), 0);
        assert_eq!(coordinator.visible_count(), 1);
    }

    #[test]
    fn burst_of_shows_is_drained_in_one_pass() {
        let (mut coordinator, clock) = coordinator_with(CoordinatorConfig {
            max_visible: 2,
            ..config()
        });
        let a = coordinator.show_info("a", "").id();
        let b = coordinator.show_info("b", "").id();
        coordinator.show_info("c", "");
        coordinator.show_info("d", "");
        coordinator.hide(a);
        coordinator.hide(b);
        coordinator.drain_events();

        clock.advance_ms(100);
        coordinator.tick();

        let passes: Vec<ToastEvent> = coordinator
            .drain_events()
            .into_iter()
            .filter(|event| matches!(event, ToastEvent::QueueProcessed { .. }))
            .collect();
        assert_eq!(passes, vec![ToastEvent::QueueProcessed { admitted: 2 }]);
    }

    #[test]
    fn action_invokes_callback_and_dismisses() {
        let (mut coordinator, _) = coordinator_with(config());
        let clicks = Rc::new(Cell::new(0));
        let counter = Rc::clone(&clicks);
        let id = coordinator
            .show(Toast::info("Deleted", "1 file").with_action(ToastAction::new("Undo", move || {
                counter.set(counter.get() + 1);
            })))
            .id();

        assert!(coordinator.trigger_action(id, 0));
        assert_eq!(clicks.get(), 1);
        assert_eq!(coordinator.toast(id).map(Toast::state), Some(ToastState::Hiding));
        assert!(!coordinator.trigger_action(id, 0));
        assert!(!coordinator.trigger_action(id, 5));
    }

    #[test]
    fn keep_open_action_leaves_toast_visible() {
        let (mut coordinator, _) = coordinator_with(config());
        let id = coordinator
            .show(Toast::info("Upload", "").with_action(ToastAction::new("Details", || {}).keep_open()))
            .id();

        coordinator.trigger_action(id, 0);
        assert_eq!(coordinator.toast(id).map(Toast::state), Some(ToastState::Showing));
    }

    #[test]
    fn activate_prefers_primary_action() {
        let (mut coordinator, _) = coordinator_with(config());
        let hits = Rc::new(Cell::new((0, 0)));
        let (first, primary) = (Rc::clone(&hits), Rc::clone(&hits));
        let id = coordinator
            .show(
                Toast::info("Update", "Restart now?")
                    .with_action(ToastAction::new("Later", move || {
                        first.set((first.get().0 + 1, first.get().1));
                    }))
                    .with_action(
                        ToastAction::new("Restart", move || {
                            primary.set((primary.get().0, primary.get().1 + 1));
                        })
                        .primary(),
                    ),
            )
            .id();

        assert!(coordinator.activate(id));
        assert_eq!(hits.get(), (0, 1));
    }

    #[test]
    fn activate_without_actions_dismisses_closable_toast() {
        let (mut coordinator, _) = coordinator_with(config());
        let closable = coordinator.show_info("a", "").id();
        let fixed_toast = coordinator.show(Toast::info("b", "").closable(false)).id();

        assert!(coordinator.activate(closable));
        assert!(!coordinator.activate(fixed_toast));
    }

    #[test]
    fn progress_updates_emit_events() {
        let (mut coordinator, _) = coordinator_with(config());
        let id = coordinator
            .show(Toast::info("Upload", "").with_progress(Default::default()))
            .id();

        assert_eq!(coordinator.set_progress(id, 150), Some(100));
        assert!(coordinator
            .drain_events()
            .contains(&ToastEvent::ProgressChanged { id, value: 100 }));
    }

    #[test]
    fn geometry_change_reflows_slots() {
        let (mut coordinator, _) = fixed(config());
        let id = coordinator.show_info("a", "").id();
        let before = coordinator.toast(id).map(Toast::slot).expect("slot");

        coordinator.set_screen_geometry(Rectangle {
            x: 0.0,
            y: 0.0,
            width: 2000.0,
            height: 800.0,
        });

        let after = coordinator.toast(id).map(Toast::slot).expect("slot");
        assert_abs_diff_eq!(after.x - before.x, 1000.0, epsilon = F32_EPSILON);
    }

    #[test]
    fn surface_overrides_screen() {
        let (mut coordinator, _) = coordinator_with(config());
        coordinator.set_surface(Some(Rectangle {
            x: 100.0,
            y: 100.0,
            width: 500.0,
            height: 400.0,
        }));
        let area = coordinator.available_area();
        assert_eq!(area.x, 116.0);
        assert_eq!(area.width, 468.0);

        coordinator.set_surface(None);
        assert_eq!(coordinator.available_area().width, 968.0);
    }

    #[test]
    fn configuration_round_trips_through_coordinator() {
        let (mut coordinator, _) = coordinator_with(config());
        let wanted = CoordinatorConfig {
            default_anchor: Anchor::BottomLeft,
            max_visible: 3,
            max_queued: 7,
            stack_spacing: 12.0,
            stack_layout: StackLayout::Uniform,
            ..config()
        };

        coordinator.set_configuration(&wanted);

        assert_eq!(coordinator.configuration(), wanted);
        assert_eq!(coordinator.default_anchor(), Anchor::BottomLeft);
    }

    #[test]
    fn subscription_is_idle_without_timers() {
        let (mut coordinator, _) = coordinator_with(config());
        assert!(coordinator.is_idle());

        coordinator.show_info("a", "");
        assert!(!coordinator.is_idle());
        assert!(coordinator.next_deadline().is_some());
    }

    #[test]
    fn handle_message_dismiss() {
        let (mut coordinator, clock) = coordinator_with(config());
        let id = coordinator.show_info("a", "").id();

        coordinator.handle_message(&Message::Dismiss(id));
        settle(&mut coordinator, &clock);

        assert_eq!(coordinator.visible_count(), 0);
    }

    #[test]
    fn subscribers_receive_events() {
        let (mut coordinator, _) = coordinator_with(config());
        let rx = coordinator.subscribe();

        let id = coordinator.show_info("a", "").id();
        coordinator.hide(id);

        assert_eq!(
            rx.try_recv(),
            Ok(ToastEvent::Dismissed {
                id,
                reason: DismissReason::Programmatic
            })
        );
    }

    #[test]
    fn hide_all_keeps_queue_and_clear_empties_it() {
        let (mut coordinator, clock) = coordinator_with(CoordinatorConfig {
            max_visible: 1,
            ..config()
        });
        coordinator.show_info("a", "");
        let b = coordinator.show_info("b", "").id();
        coordinator.show_info("c", "");
        settle(&mut coordinator, &clock);

        coordinator.hide_all();
        assert_eq!(coordinator.visible_count(), 0);
        assert_eq!(coordinator.queued_count(), 2);

        clock.advance_ms(100);
        coordinator.tick();
        assert_eq!(coordinator.visible_count(), 1);
        assert_eq!(coordinator.queued_count(), 1);
        assert!(coordinator.toast(b).is_some_and(|toast| toast.state().is_live()));

        coordinator.clear();
        assert_eq!(coordinator.visible_count(), 0);
        assert_eq!(coordinator.queued_count(), 0);
        coordinator.drain_events();

        clock.advance_ms(2000);
        coordinator.tick();
        assert!(!coordinator
            .drain_events()
            .iter()
            .any(|event| matches!(event, ToastEvent::QueueProcessed { .. })));
        assert!(coordinator.is_idle());
    }

    #[test]
    fn unbounded_durations_are_accepted() {
        let (mut coordinator, clock) = coordinator_with(config());
        let id = coordinator
            .show(Toast::info("a", "").with_duration(Duration::MAX))
            .id();
        coordinator.set_duration(id, Duration::MAX);
        assert!(coordinator.reset_timer(id));

        clock.advance_ms(60_000);
        coordinator.tick();
        assert_eq!(coordinator.toast(id).map(Toast::state), Some(ToastState::Visible));
    }

    #[test]
    fn oversized_queue_debounce_is_clamped() {
        let (mut coordinator, clock) = coordinator_with(CoordinatorConfig {
            max_visible: 1,
            queue_debounce_ms: u64::MAX,
            ..config()
        });
        let a = coordinator.show_info("a", "").id();
        assert!(coordinator.show_info("b", "").is_queued());
        coordinator.hide(a);

        clock.advance_ms(10_400);
        coordinator.tick();
        assert_eq!(coordinator.visible_count(), 1);
        assert_eq!(coordinator.queued_count(), 0);
    }

    #[test]
    fn setters_report_effective_changes_once() {
        let (mut coordinator, _) = coordinator_with(config());
        let changes = |coordinator: &mut Coordinator| {
            coordinator
                .drain_events()
                .into_iter()
                .filter(|event| *event == ToastEvent::ConfigChanged)
                .count()
        };

        coordinator.set_max_visible(3);
        assert_eq!(changes(&mut coordinator), 1);

        coordinator.set_max_visible(3);
        coordinator.set_default_anchor(coordinator.default_anchor());
        assert_eq!(changes(&mut coordinator), 0);

        coordinator.set_configuration(&CoordinatorConfig {
            max_visible: 2,
            stack_toasts: false,
            allow_duplicates: true,
            ..config()
        });
        assert_eq!(changes(&mut coordinator), 1);
        assert!(!coordinator.configuration().stack_toasts);
    }

    #[test]
    fn show_custom_carries_icon() {
        let (mut coordinator, _) = coordinator_with(config());
        let id = coordinator.show_custom("rocket", "Launched", "").id();

        let toast = coordinator.toast(id).expect("toast is tracked");
        assert_eq!(toast.kind(), ToastKind::Custom);
        assert_eq!(toast.content().icon(), Some("rocket"));
    }
}
