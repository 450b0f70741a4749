// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The swipe controller: pointer event plumbing around the drag engine.
//!
//! ## Usage
//!
//! 1) Create a [`SwipeController`] for the dismissible content node and
//!    register a [`SwipeListener`].
//! 2) Report container sizes with [`SwipeController::on_resize`].
//! 3) Feed every pointer event through [`SwipeController::handle_event`]. A
//!    [`EventOutcome::PassThrough`] result means the content (and any inner
//!    scrollable) should receive the event as usual.
//! 4) Each frame, call [`SwipeController::on_frame`] and request another frame
//!    while it returns `true`.
//!
//! ```
//! use kurbo::{Point, Size, Vec2};
//! use understory_swipe::{
//!     Axis, DirectionMask, EventOutcome, PointerEvent, ScrollCapability, ScrollDirection,
//!     ScrollTree, SwipeController,
//! };
//!
//! // Content with no scrollable descendants.
//! struct Plain;
//! impl ScrollTree for Plain {
//!     type Id = u32;
//!     fn child_count(&self, _: u32) -> usize { 0 }
//!     fn child(&self, _: u32, _: usize) -> Option<u32> { None }
//!     fn scroll_capability(&self, _: u32) -> Option<ScrollCapability> { None }
//!     fn can_scroll(&self, _: u32, _: Axis, _: ScrollDirection) -> bool { false }
//! }
//!
//! let mut swipe = SwipeController::new(0, DirectionMask::LEFT);
//! swipe.on_resize(Size::new(1_000.0, 800.0));
//!
//! swipe.handle_event(&Plain, PointerEvent::down(Point::new(10.0, 300.0), 0));
//! let outcome = swipe.handle_event(&Plain, PointerEvent::moved(Point::new(30.0, 300.0), 16));
//! assert_eq!(outcome, EventOutcome::Captured);
//!
//! swipe.handle_event(&Plain, PointerEvent::moved(Point::new(530.0, 300.0), 32));
//! assert_eq!(swipe.offset(), Vec2::new(500.0, 0.0));
//!
//! swipe.handle_event(&Plain, PointerEvent::up(Point::new(530.0, 300.0), 500));
//! let mut now = 500;
//! while swipe.on_frame(now) {
//!     now += 16;
//! }
//! assert_eq!(swipe.offset(), Vec2::new(1_000.0, 0.0));
//! ```

use alloc::boxed::Box;

use kurbo::{Point, Size, Vec2};
use peniko::Color;

use crate::config::{FinishThreshold, SwipeConfig, sanitize_mask};
use crate::direction::{DirectionMask, SwipeDirection};
use crate::engine::{DragEngine, GestureState};
use crate::listener::{Listener, SwipeListener};
use crate::resolver::ScrollTree;

/// Phase of a pointer event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerPhase {
    /// The pointer went down.
    Down,
    /// The pointer moved.
    Move,
    /// The pointer was released.
    Up,
    /// The pointer stream was cancelled by the platform.
    Cancel,
}

/// A single pointer event in absolute (window) coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// What happened.
    pub phase: PointerPhase,
    /// Pointer position.
    pub position: Point,
    /// Event timestamp in milliseconds.
    pub time: u64,
}

impl PointerEvent {
    /// A [`PointerPhase::Down`] event.
    pub fn down(position: Point, time: u64) -> Self {
        Self {
            phase: PointerPhase::Down,
            position,
            time,
        }
    }

    /// A [`PointerPhase::Move`] event.
    pub fn moved(position: Point, time: u64) -> Self {
        Self {
            phase: PointerPhase::Move,
            position,
            time,
        }
    }

    /// A [`PointerPhase::Up`] event.
    pub fn up(position: Point, time: u64) -> Self {
        Self {
            phase: PointerPhase::Up,
            position,
            time,
        }
    }

    /// A [`PointerPhase::Cancel`] event.
    pub fn cancel(position: Point, time: u64) -> Self {
        Self {
            phase: PointerPhase::Cancel,
            position,
            time,
        }
    }
}

/// Where a pointer event should go after the controller has seen it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventOutcome {
    /// Deliver the event to the content as usual.
    PassThrough,
    /// The swipe owns the pointer; do not deliver the event to the content.
    Captured,
}

/// Swipe-to-dismiss controller for one content node.
///
/// Generic over the host's node identifier `K`; the content tree itself is
/// borrowed per event via [`ScrollTree`].
#[derive(Debug)]
pub struct SwipeController<K> {
    engine: DragEngine<K>,
    listener: Listener,
    enabled: bool,
}

impl<K> SwipeController<K>
where
    K: Copy + PartialEq + core::fmt::Debug,
{
    /// Creates an enabled controller for `content` with the given direction mask.
    ///
    /// An empty mask falls back to [`DirectionMask::LEFT`].
    pub fn new(content: K, mask: DirectionMask) -> Self {
        Self::with_config(
            content,
            SwipeConfig {
                mask,
                ..SwipeConfig::default()
            },
        )
    }

    /// Creates an enabled controller for `content` from a full configuration.
    pub fn with_config(content: K, mut config: SwipeConfig) -> Self {
        config.mask = mask_or_default(config.mask);
        config.touch_slop = sanitize_slop(config.touch_slop);
        Self {
            engine: DragEngine::new(content, config),
            listener: Listener::default(),
            enabled: true,
        }
    }

    /// The dismissible content node.
    pub fn content(&self) -> K {
        self.engine.root()
    }

    /// Registers the host listener, replacing any previous one.
    pub fn set_listener<L: SwipeListener + 'static>(&mut self, listener: L) {
        self.listener.set(Some(Box::new(listener)));
    }

    /// Removes the host listener.
    pub fn clear_listener(&mut self) {
        self.listener.set(None);
    }

    /// Returns `true` if a listener is registered.
    pub fn has_listener(&self) -> bool {
        self.listener.is_set()
    }

    /// Enables or disables swiping.
    ///
    /// Disabling cancels any drag or settle in progress and snaps the content
    /// back to rest; dismissal is not reported.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.engine.cancel(&mut self.listener);
        }
    }

    /// Returns `true` if swiping is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Replaces the direction mask. An empty mask falls back to the default.
    pub fn set_direction_mask(&mut self, mask: DirectionMask) {
        self.engine.config.mask = mask_or_default(mask);
    }

    /// Adds `direction` to the mask.
    pub fn enable_direction(&mut self, direction: SwipeDirection) {
        self.set_direction_mask(self.engine.config.mask | direction.into());
    }

    /// Removes `direction` from the mask. Removing the last direction restores the default.
    pub fn disable_direction(&mut self, direction: SwipeDirection) {
        self.set_direction_mask(self.engine.config.mask - direction.into());
    }

    /// The current direction mask.
    pub fn direction_mask(&self) -> DirectionMask {
        self.engine.config.mask
    }

    /// Returns `true` if `direction` is in the mask.
    pub fn is_direction_allowed(&self, direction: SwipeDirection) -> bool {
        self.engine.config.mask.allows(direction)
    }

    /// Returns `true` if `direction` is the only direction in the mask.
    pub fn is_only_direction_allowed(&self, direction: SwipeDirection) -> bool {
        self.engine.config.mask.allows_only(direction)
    }

    /// Sets the finish threshold, clamping into `(0, 1]`.
    pub fn set_finish_threshold(&mut self, fraction: f64) {
        let threshold = FinishThreshold::new(fraction).unwrap_or_else(|err| {
            let fallback = FinishThreshold::saturating(fraction);
            log::warn!("{err}; using {}", fallback.get());
            fallback
        });
        self.engine.config.finish_threshold = threshold;
    }

    /// The current finish threshold.
    pub fn finish_threshold(&self) -> FinishThreshold {
        self.engine.config.finish_threshold
    }

    /// Sets the distance the pointer must travel before a swipe is captured.
    pub fn set_touch_slop(&mut self, slop: f64) {
        self.engine.config.touch_slop = sanitize_slop(slop);
    }

    /// The configured backdrop color at zero progress.
    pub fn set_backdrop_color(&mut self, color: Color) {
        self.engine.config.backdrop_color = color;
    }

    /// The backdrop color for the current progress: the configured color
    /// with its alpha scaled by [`SwipeController::backdrop_opacity`].
    pub fn backdrop_color(&self) -> Color {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "opacity is in [0, 1]"
        )]
        let opacity = self.backdrop_opacity() as f32;
        self.engine.config.backdrop_color.multiply_alpha(opacity)
    }

    /// `1 - progress`.
    pub fn backdrop_opacity(&self) -> f64 {
        1.0 - self.progress()
    }

    /// The active configuration.
    pub fn config(&self) -> &SwipeConfig {
        &self.engine.config
    }

    /// Reports a new container size; drag ranges follow it.
    ///
    /// The gesture state and current offset are left untouched.
    pub fn on_resize(&mut self, size: Size) {
        self.engine.resize(size);
    }

    /// Feeds one pointer event through the swipe state machine.
    ///
    /// Every event is accepted in every state; events that make no sense in
    /// the current state are ignored.
    pub fn handle_event<T>(&mut self, tree: &T, event: PointerEvent) -> EventOutcome
    where
        T: ScrollTree<Id = K> + ?Sized,
    {
        if !self.enabled {
            self.engine.cancel(&mut self.listener);
            return EventOutcome::PassThrough;
        }

        let PointerEvent {
            phase,
            position,
            time,
        } = event;
        let captured = match phase {
            PointerPhase::Down => self.engine.begin(tree, &mut self.listener, position, time),
            PointerPhase::Move => match self.engine.state() {
                GestureState::Idle => {
                    self.engine
                        .try_capture(tree, &mut self.listener, position, time)
                }
                GestureState::Dragging => {
                    self.engine.drag(tree, &mut self.listener, position, time);
                    true
                }
                GestureState::Settling => false,
            },
            PointerPhase::Up | PointerPhase::Cancel => {
                let dragging = self.engine.state() == GestureState::Dragging;
                let fling = phase == PointerPhase::Up;
                self.engine.release(&mut self.listener, time, fling);
                dragging
            }
        };

        if captured {
            EventOutcome::Captured
        } else {
            EventOutcome::PassThrough
        }
    }

    /// Advances a settle animation to `now` (milliseconds).
    ///
    /// Returns `true` while another frame is needed.
    pub fn on_frame(&mut self, now: u64) -> bool {
        self.engine.continue_settling(&mut self.listener, now)
    }

    /// Cancels any gesture in progress, snapping active content back to rest.
    pub fn cancel(&mut self) {
        self.engine.cancel(&mut self.listener);
    }

    /// Current gesture state.
    pub fn state(&self) -> GestureState {
        self.engine.state()
    }

    /// Direction committed for the current gesture, if any.
    pub fn direction(&self) -> Option<SwipeDirection> {
        self.engine.direction()
    }

    /// Current content offset from its rest position.
    pub fn offset(&self) -> Vec2 {
        self.engine.offset()
    }

    /// Current drag range (the container size).
    pub fn drag_range(&self) -> Size {
        self.engine.range()
    }

    /// Current dismissal progress in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        self.engine.fraction()
    }

    /// The scroll target resolved for the current or last gesture.
    pub fn scroll_target(&self) -> K {
        self.engine.target()
    }
}

fn mask_or_default(mask: DirectionMask) -> DirectionMask {
    sanitize_mask(mask).unwrap_or_else(|err| {
        log::warn!("{err}; using {:?}", DirectionMask::default());
        DirectionMask::default()
    })
}

fn sanitize_slop(slop: f64) -> f64 {
    if slop >= 0.0 {
        slop
    } else {
        log::warn!("touch slop {slop} is invalid; using 0");
        0.0
    }
}
