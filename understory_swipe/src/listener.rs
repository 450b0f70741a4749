// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host callbacks.

use alloc::boxed::Box;
use core::fmt;

use kurbo::Point;

use crate::direction::SwipeDirection;

/// Callbacks from a [`SwipeController`](crate::SwipeController) to its host.
///
/// All methods have no-op defaults, so hosts implement only what they need.
pub trait SwipeListener {
    /// Asked before a swipe in `direction` moves the content.
    ///
    /// Returning `true` vetoes the swipe: the committed direction is cleared
    /// and the content snaps back to rest. `touch` is the latest pointer
    /// position.
    fn on_intercept(&mut self, direction: SwipeDirection, touch: Point) -> bool {
        let _ = (direction, touch);
        false
    }

    /// The dismissal progress changed; `fraction` is in `[0, 1]`.
    ///
    /// A backdrop typically fades with `opacity = 1 - fraction`.
    fn on_progress_changed(&mut self, fraction: f64) {
        let _ = fraction;
    }

    /// The content finished settling fully off-screen.
    fn on_dismissed(&mut self) {}
}

/// The single optional listener registration.
#[derive(Default)]
pub(crate) struct Listener(Option<Box<dyn SwipeListener>>);

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Listener").field(&self.0.is_some()).finish()
    }
}

impl Listener {
    pub(crate) fn set(&mut self, listener: Option<Box<dyn SwipeListener>>) {
        self.0 = listener;
    }

    pub(crate) fn is_set(&self) -> bool {
        self.0.is_some()
    }

    pub(crate) fn intercept(&mut self, direction: SwipeDirection, touch: Point) -> bool {
        self.0
            .as_mut()
            .is_some_and(|l| l.on_intercept(direction, touch))
    }

    pub(crate) fn progress(&mut self, fraction: f64) {
        if let Some(l) = self.0.as_mut() {
            l.on_progress_changed(fraction);
        }
    }

    pub(crate) fn dismissed(&mut self) {
        if let Some(l) = self.0.as_mut() {
            l.on_dismissed();
        }
    }
}
