// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drag engine: gesture state, content offset, clamping, and settling.
//!
//! The engine owns every piece of per-gesture state. It is driven from a
//! single call path (the controller) and mutates nothing it does not own.
//!
//! State transitions:
//!
//! - `Idle -> Dragging`: a pending gesture whose committed direction is
//!   allowed, whose scroll target cannot consume the motion, which has moved
//!   past the touch slop, and which the host does not veto.
//! - `Dragging -> Settling`: release; settles to the full dismiss offset if
//!   the committed axis travelled at least `range * threshold`, else to rest.
//! - `Settling -> Idle`: the settle reached its target; a fraction of exactly
//!   one fires dismissal.
//! - `Settling -> Dragging`: a new down while settling snaps the content to
//!   rest and captures immediately.

use kurbo::{Point, Size, Vec2};

use crate::config::SwipeConfig;
use crate::direction::{Axis, SwipeDirection, arbitrate};
use crate::listener::Listener;
use crate::pointer::PointerTracker;
use crate::resolver::{
    ScrollCapability, ScrollTree, page_under_touch, resolve_scroll_target, resolve_within_page,
};
use crate::settle::{Settle, clamp_fling, settle_duration};

/// Lifecycle state of the swipe gesture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GestureState {
    /// No content drag in progress; a pending gesture may still be evaluated.
    #[default]
    Idle,
    /// The content follows the pointer.
    Dragging,
    /// The content animates toward rest or the dismiss offset.
    Settling,
}

#[derive(Clone, Debug)]
pub(crate) struct DragEngine<K> {
    pub(crate) config: SwipeConfig,
    state: GestureState,
    direction: Option<SwipeDirection>,
    arbitrated: bool,
    /// Axis of the most recent committed direction; outlives the gesture.
    progress_axis: Option<Axis>,
    offset: Vec2,
    range: Size,
    root: K,
    target: K,
    pager: Option<K>,
    page_target: Option<K>,
    down: Option<Point>,
    touch: Point,
    tracker: PointerTracker,
    settle: Option<Settle>,
}

impl<K> DragEngine<K>
where
    K: Copy + PartialEq + core::fmt::Debug,
{
    pub(crate) fn new(root: K, config: SwipeConfig) -> Self {
        Self {
            config,
            state: GestureState::Idle,
            direction: None,
            arbitrated: false,
            progress_axis: None,
            offset: Vec2::ZERO,
            range: Size::ZERO,
            root,
            target: root,
            pager: None,
            page_target: None,
            down: None,
            touch: Point::ZERO,
            tracker: PointerTracker::default(),
            settle: None,
        }
    }

    pub(crate) fn state(&self) -> GestureState {
        self.state
    }

    pub(crate) fn direction(&self) -> Option<SwipeDirection> {
        self.direction
    }

    pub(crate) fn offset(&self) -> Vec2 {
        self.offset
    }

    pub(crate) fn range(&self) -> Size {
        self.range
    }

    pub(crate) fn root(&self) -> K {
        self.root
    }

    pub(crate) fn target(&self) -> K {
        self.target
    }

    /// `|offset| / range` along the most recently committed axis.
    ///
    /// Survives the end of a gesture, so dismissed content reports one.
    pub(crate) fn fraction(&self) -> f64 {
        let Some(axis) = self.progress_axis else {
            return 0.0;
        };
        let extent = axis.extent(self.range);
        if extent <= 0.0 {
            return 0.0;
        }
        (axis.of(self.offset).abs() / extent).min(1.0)
    }

    /// Container resized. Never changes the gesture state.
    pub(crate) fn resize(&mut self, size: Size) {
        self.range = size;
        if let (Some(settle), Some(dir)) = (self.settle.as_mut(), self.direction) {
            if settle.to != Vec2::ZERO {
                settle.to = dir.dismiss_offset(size);
            }
        }
    }

    /// Pointer down. Returns `true` when the pointer is captured immediately.
    pub(crate) fn begin<T>(
        &mut self,
        tree: &T,
        listener: &mut Listener,
        pos: Point,
        time: u64,
    ) -> bool
    where
        T: ScrollTree<Id = K> + ?Sized,
    {
        self.touch = pos;
        match self.state {
            GestureState::Idle => {
                self.start_gesture(tree, pos);
                false
            }
            GestureState::Settling => {
                log::debug!("swipe settle interrupted at {:?}, snapping to rest", self.offset);
                self.settle = None;
                self.move_to(listener, Vec2::ZERO);
                self.start_gesture(tree, pos);
                self.state = GestureState::Dragging;
                self.tracker.start(pos, time);
                true
            }
            GestureState::Dragging => {
                // A down without a matching up; keep dragging from here.
                self.down = Some(pos);
                self.tracker.start(pos, time);
                true
            }
        }
    }

    /// Pointer move while idle. Returns `true` when the swipe captures the pointer.
    pub(crate) fn try_capture<T>(
        &mut self,
        tree: &T,
        listener: &mut Listener,
        pos: Point,
        time: u64,
    ) -> bool
    where
        T: ScrollTree<Id = K> + ?Sized,
    {
        let Some(down) = self.down else {
            return false;
        };
        self.touch = pos;
        self.arbitrate_once(pos);
        let Some(dir) = self.direction else {
            return false;
        };

        self.resolve_target(tree);
        if !self.config.mask.allows(dir) {
            return false;
        }
        let slop = self.config.touch_slop;
        if (pos - down).hypot2() <= slop * slop {
            return false;
        }
        if self.target_can_scroll(tree, dir) {
            log::trace!("swipe {dir:?} deferred to scroll target {:?}", self.target);
            return false;
        }
        if listener.intercept(dir, pos) {
            // The next move arbitrates again from the down point.
            log::debug!("swipe {dir:?} vetoed by host before capture");
            self.direction = None;
            self.arbitrated = false;
            return false;
        }

        log::debug!("swipe captured: direction={dir:?} target={:?}", self.target);
        self.state = GestureState::Dragging;
        self.tracker.start(pos, time);
        true
    }

    /// Pointer move while dragging.
    pub(crate) fn drag<T>(&mut self, tree: &T, listener: &mut Listener, pos: Point, time: u64)
    where
        T: ScrollTree<Id = K> + ?Sized,
    {
        if self.state != GestureState::Dragging {
            return;
        }
        self.touch = pos;
        self.arbitrate_once(pos);
        let Some(delta) = self.tracker.update(pos, time) else {
            return;
        };
        let proposed = self.offset + delta;
        let x = self.clamp_axis(tree, listener, Axis::Horizontal, proposed.x);
        let y = self.clamp_axis(tree, listener, Axis::Vertical, proposed.y);
        self.move_to(listener, Vec2::new(x, y));
    }

    /// Pointer up or cancel.
    ///
    /// `fling` selects whether the release velocity shapes the settle.
    pub(crate) fn release(&mut self, listener: &mut Listener, time: u64, fling: bool) {
        match self.state {
            GestureState::Idle => self.end_gesture(),
            GestureState::Settling => {}
            GestureState::Dragging => {
                let target = match self.direction {
                    Some(dir) => {
                        let extent = dir.axis().extent(self.range);
                        let travelled = dir.axis().of(self.offset).abs();
                        if travelled >= extent * self.config.finish_threshold.get() {
                            dir.dismiss_offset(self.range)
                        } else {
                            Vec2::ZERO
                        }
                    }
                    None => Vec2::ZERO,
                };

                let axis = self.direction.map_or_else(
                    || dominant_axis(target - self.offset),
                    SwipeDirection::axis,
                );
                let velocity = if fling {
                    clamp_fling(axis.of(self.tracker.velocity(time)), &self.config)
                } else {
                    0.0
                };
                let distance = axis.of(target - self.offset);
                let duration =
                    settle_duration(distance, velocity, axis.extent(self.range), &self.config);
                self.tracker.end();

                log::debug!(
                    "swipe released: offset={:?} target={target:?} duration={duration}ms",
                    self.offset
                );
                self.settle = Some(Settle {
                    from: self.offset,
                    to: target,
                    start: time,
                    duration,
                });
                self.state = GestureState::Settling;
                if self.offset == target || duration == 0 {
                    self.continue_settling(listener, time);
                }
            }
        }
    }

    /// Advance the settle animation to `now`. Returns `true` while more frames are needed.
    pub(crate) fn continue_settling(&mut self, listener: &mut Listener, now: u64) -> bool {
        if self.state != GestureState::Settling {
            return false;
        }
        let Some(settle) = self.settle else {
            self.finish_settle(listener);
            return false;
        };
        let (pos, done) = settle.sample(now);
        log::trace!("swipe settle frame at {now}: {pos:?}");
        self.move_to(listener, pos);
        if done {
            self.finish_settle(listener);
            false
        } else {
            true
        }
    }

    /// Abort any gesture. An active drag or settle snaps the content to rest.
    pub(crate) fn cancel(&mut self, listener: &mut Listener) {
        let active = self.state != GestureState::Idle;
        self.state = GestureState::Idle;
        self.settle = None;
        self.end_gesture();
        if active {
            log::debug!("swipe cancelled at {:?}", self.offset);
            self.move_to(listener, Vec2::ZERO);
        }
    }

    fn start_gesture<T>(&mut self, tree: &T, pos: Point)
    where
        T: ScrollTree<Id = K> + ?Sized,
    {
        self.down = Some(pos);
        self.direction = None;
        self.arbitrated = false;
        self.resolve_target(tree);
    }

    fn end_gesture(&mut self) {
        self.down = None;
        self.direction = None;
        self.arbitrated = false;
        self.page_target = None;
        self.tracker.end();
    }

    fn arbitrate_once(&mut self, pos: Point) {
        if self.arbitrated || self.direction.is_some() {
            return;
        }
        let Some(down) = self.down else {
            return;
        };
        if let Some(dir) = arbitrate(down, pos) {
            log::trace!("swipe direction committed: {dir:?}");
            self.direction = Some(dir);
            self.arbitrated = true;
            self.progress_axis = Some(dir.axis());
        }
    }

    fn resolve_target<T>(&mut self, tree: &T)
    where
        T: ScrollTree<Id = K> + ?Sized,
    {
        self.target = resolve_scroll_target(tree, self.root);
        self.pager = (tree.scroll_capability(self.target) == Some(ScrollCapability::Paged))
            .then_some(self.target);
        self.page_target = None;
    }

    fn refresh_page_target<T>(&mut self, tree: &T)
    where
        T: ScrollTree<Id = K> + ?Sized,
    {
        if let Some(pager) = self.pager {
            self.page_target = page_under_touch(tree, pager, self.touch.x)
                .map(|page| resolve_within_page(tree, page));
        }
    }

    fn target_can_scroll<T>(&mut self, tree: &T, dir: SwipeDirection) -> bool
    where
        T: ScrollTree<Id = K> + ?Sized,
    {
        let axis = dir.axis();
        let node = match axis {
            Axis::Vertical => {
                self.refresh_page_target(tree);
                self.page_target.unwrap_or(self.target)
            }
            Axis::Horizontal => self.target,
        };
        tree.can_scroll(node, axis, dir.conflicting_scroll())
    }

    /// Clamp a proposed offset component along `axis`.
    ///
    /// Anything but an allowed, committed direction on this axis pins the
    /// component at rest, as does motion back past rest or a scroll target
    /// that can still consume the motion. A host veto clears the direction.
    fn clamp_axis<T>(&mut self, tree: &T, listener: &mut Listener, axis: Axis, proposed: f64) -> f64
    where
        T: ScrollTree<Id = K> + ?Sized,
    {
        let Some(dir) = self.direction else {
            return 0.0;
        };
        if dir.axis() != axis || !self.config.mask.allows(dir) {
            return 0.0;
        }
        let away = proposed * dir.sign();
        if away < 0.0 || self.target_can_scroll(tree, dir) {
            log::trace!("swipe {dir:?} blocked at {proposed}");
            return 0.0;
        }
        if listener.intercept(dir, self.touch) {
            log::debug!("swipe {dir:?} vetoed by host, snapping to rest");
            self.direction = None;
            return 0.0;
        }
        dir.sign() * away.min(axis.extent(self.range))
    }

    fn move_to(&mut self, listener: &mut Listener, offset: Vec2) {
        if offset == self.offset {
            return;
        }
        self.offset = offset;
        listener.progress(self.fraction());
    }

    fn finish_settle(&mut self, listener: &mut Listener) {
        self.state = GestureState::Idle;
        self.settle = None;
        let dismissed = self.direction.is_some() && self.fraction() >= 1.0;
        self.end_gesture();
        if dismissed {
            log::debug!("swipe dismissed");
            listener.dismissed();
        } else {
            log::debug!("swipe settled at {:?}", self.offset);
        }
    }
}

fn dominant_axis(v: Vec2) -> Axis {
    if v.y.abs() > v.x.abs() {
        Axis::Vertical
    } else {
        Axis::Horizontal
    }
}
