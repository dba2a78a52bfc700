// SPDX-License-Identifier: MPL-2.0
//! Geometry animation for toasts.
//!
//! The coordinator never moves a toast directly. It asks an [`Animator`] to
//! tween the toast's [`Frame`] and receives a [`Completion`] telling it when
//! the tween ends; it schedules its continuation on that instant. Renderers
//! read interpolated frames back from the animator.

use super::notification::ToastId;
use iced::Rectangle;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Easing curve applied to animation progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    /// Decelerating curve, the default for toast motion.
    #[default]
    OutCubic,
    InOutCubic,
    /// Overshoots slightly before settling.
    OutBack,
}

impl Easing {
    /// Maps linear progress `t` in `0.0..=1.0` to eased progress.
    ///
    /// `OutBack` may exceed 1.0 briefly; every curve maps 0 to 0 and 1 to 1.
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::InQuad => t * t,
            Easing::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::InCubic => t * t * t,
            Easing::OutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::OutBack => {
                const C1: f32 = 1.701_58;
                const C3: f32 = C1 + 1.0;
                1.0 + C3 * (t - 1.0).powi(3) + C1 * (t - 1.0).powi(2)
            }
        }
    }
}

/// How a toast appears on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Entrance {
    /// Slide in from the anchor's edge while fading in.
    #[default]
    Slide,
    /// Fade in place.
    Fade,
}

/// Visual state of a toast: where it is and how opaque.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub rect: Rectangle,
    pub opacity: f32,
}

impl Frame {
    /// A fully opaque frame at `rect`.
    #[must_use]
    pub fn opaque(rect: Rectangle) -> Self {
        Self { rect, opacity: 1.0 }
    }

    /// A fully transparent frame at `rect`.
    #[must_use]
    pub fn transparent(rect: Rectangle) -> Self {
        Self { rect, opacity: 0.0 }
    }

    /// Interpolates between two frames; `t` is already eased.
    #[must_use]
    pub fn lerp(from: Frame, to: Frame, t: f32) -> Frame {
        let mix = |a: f32, b: f32| a + (b - a) * t;
        Frame {
            rect: Rectangle {
                x: mix(from.rect.x, to.rect.x),
                y: mix(from.rect.y, to.rect.y),
                width: mix(from.rect.width, to.rect.width),
                height: mix(from.rect.height, to.rect.height),
            },
            opacity: mix(from.opacity, to.opacity).clamp(0.0, 1.0),
        }
    }
}

/// A request to move a toast from one frame to another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub target: ToastId,
    pub from: Frame,
    pub to: Frame,
    pub duration: Duration,
    pub easing: Easing,
}

impl Tween {
    /// Returns the frame after `elapsed` time.
    #[must_use]
    pub fn sample(&self, elapsed: Duration) -> Frame {
        if self.duration.is_zero() || elapsed >= self.duration {
            return self.to;
        }
        let t = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        Frame::lerp(self.from, self.to, self.easing.apply(t))
    }
}

/// Handle identifying one started tween.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationToken(u64);

/// Completion promise returned by [`Animator::animate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    pub token: AnimationToken,
    /// Instant at which the tween reaches its final frame.
    pub at: Instant,
}

/// Geometry animation service.
pub trait Animator {
    /// Starts `tween` at `now`, superseding any tween running on the same target.
    fn animate(&mut self, tween: Tween, now: Instant) -> Completion;

    /// Stops tracking completion of `token`.
    fn cancel(&mut self, token: AnimationToken);

    /// Returns the current frame of `target`, if the animator knows it.
    fn frame(&self, target: ToastId, now: Instant) -> Option<Frame>;

    /// Forgets `target` once it is destroyed.
    fn release(&mut self, target: ToastId);
}

#[derive(Debug, Clone)]
struct Track {
    token: Option<AnimationToken>,
    tween: Tween,
    started: Instant,
}

/// In-process animator that interpolates tweens on demand.
#[derive(Debug, Default)]
pub struct TweenAnimator {
    tracks: HashMap<ToastId, Track>,
    next_token: u64,
}

impl TweenAnimator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether a tracked tween on `target` has not finished at `now`.
    #[must_use]
    pub fn is_animating(&self, target: ToastId, now: Instant) -> bool {
        self.tracks.get(&target).is_some_and(|track| {
            track.token.is_some() && now < track.started + track.tween.duration
        })
    }

    /// Number of targets with a known frame.
    #[must_use]
    pub fn tracked(&self) -> usize {
        self.tracks.len()
    }
}

impl Animator for TweenAnimator {
    fn animate(&mut self, tween: Tween, now: Instant) -> Completion {
        let token = AnimationToken(self.next_token);
        self.next_token += 1;
        self.tracks.insert(
            tween.target,
            Track {
                token: Some(token),
                tween,
                started: now,
            },
        );
        Completion {
            token,
            at: now + tween.duration,
        }
    }

    fn cancel(&mut self, token: AnimationToken) {
        if let Some(track) = self
            .tracks
            .values_mut()
            .find(|track| track.token == Some(token))
        {
            track.token = None;
        }
    }

    fn frame(&self, target: ToastId, now: Instant) -> Option<Frame> {
        self.tracks.get(&target).map(|track| {
            track
                .tween
                .sample(now.saturating_duration_since(track.started))
        })
    }

    fn release(&mut self, target: ToastId) {
        self.tracks.remove(&target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    fn rect(x: f32, y: f32) -> Rectangle {
        Rectangle {
            x,
            y,
            width: 300.0,
            height: 60.0,
        }
    }

    fn tween(duration_ms: u64, easing: Easing) -> Tween {
        Tween {
            target: ToastId::new(),
            from: Frame::transparent(rect(0.0, 0.0)),
            to: Frame::opaque(rect(100.0, 200.0)),
            duration: Duration::from_millis(duration_ms),
            easing,
        }
    }

    #[test]
    fn every_easing_maps_endpoints() {
        let all = [
            Easing::Linear,
            Easing::InQuad,
            Easing::OutQuad,
            Easing::InOutQuad,
            Easing::InCubic,
            Easing::OutCubic,
            Easing::InOutCubic,
            Easing::OutBack,
        ];
        for easing in all {
            assert_abs_diff_eq!(easing.apply(0.0), 0.0, epsilon = 1e-5);
            assert_abs_diff_eq!(easing.apply(1.0), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn out_cubic_decelerates() {
        assert!(Easing::OutCubic.apply(0.5) > 0.5);
        assert!(Easing::InCubic.apply(0.5) < 0.5);
    }

    #[test]
    fn out_back_overshoots() {
        let peak = (1..100)
            .map(|i| Easing::OutBack.apply(i as f32 / 100.0))
            .fold(0.0_f32, f32::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn linear_tween_samples_midpoint() {
        let tween = tween(200, Easing::Linear);
        let frame = tween.sample(Duration::from_millis(100));
        assert_abs_diff_eq!(frame.rect.x, 50.0, epsilon = 1e-3);
        assert_abs_diff_eq!(frame.rect.y, 100.0, epsilon = 1e-3);
        assert_abs_diff_eq!(frame.opacity, 0.5, epsilon = 1e-3);
    }

    #[test]
    fn zero_duration_tween_jumps_to_end() {
        let tween = tween(0, Easing::OutCubic);
        assert_eq!(tween.sample(Duration::ZERO), tween.to);
    }

    #[test]
    fn completion_instant_is_start_plus_duration() {
        let mut animator = TweenAnimator::new();
        let now = Instant::now();
        let completion = animator.animate(tween(300, Easing::OutCubic), now);
        assert_eq!(completion.at, now + Duration::from_millis(300));
    }

    #[test]
    fn new_tween_supersedes_old_one_on_same_target() {
        let mut animator = TweenAnimator::new();
        let now = Instant::now();
        let first = tween(300, Easing::Linear);
        let target = first.target;
        animator.animate(first, now);

        let second = Tween {
            to: Frame::opaque(rect(500.0, 500.0)),
            ..first
        };
        animator.animate(second, now);

        let frame = animator
            .frame(target, now + Duration::from_millis(300))
            .expect("target is tracked");
        assert_eq!(frame.rect.x, 500.0);
        assert_eq!(animator.tracked(), 1);
    }

    #[test]
    fn cancel_stops_reporting_animation() {
        let mut animator = TweenAnimator::new();
        let now = Instant::now();
        let tween = tween(300, Easing::Linear);
        let completion = animator.animate(tween, now);
        assert!(animator.is_animating(tween.target, now));

        animator.cancel(completion.token);

        assert!(!animator.is_animating(tween.target, now));
        assert!(animator.frame(tween.target, now).is_some());
    }

    #[test]
    fn release_forgets_target() {
        let mut animator = TweenAnimator::new();
        let now = Instant::now();
        let tween = tween(300, Easing::Linear);
        animator.animate(tween, now);

        animator.release(tween.target);

        assert!(animator.frame(tween.target, now).is_none());
    }
}
