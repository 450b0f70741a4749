// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_swipe --heading-base-level=0

//! Understory Swipe: a headless swipe-to-dismiss gesture controller.
//!
//! This crate lets a screen be dismissed by dragging its content off-screen
//! in one or more cardinal directions, with a fading backdrop driven by the
//! drag progress and a settle animation on release. It focuses on the parts
//! that are easy to get wrong:
//!
//! - **Direction arbitration**: the first perceptible movement commits the
//!   gesture to exactly one of left, up, right or down ([`arbitrate`]).
//! - **Nested scroll conflicts**: an inner list, scroll pane or pager keeps
//!   scrolling normally until it reaches its own edge ([`ScrollTree`],
//!   [`resolve_scroll_target`]).
//! - **Clamping**: only directions in the [`DirectionMask`] ever move the
//!   content, and never past the container size.
//! - **Lifecycle**: `Idle → Dragging → Settling → Idle`, including a new
//!   touch interrupting a settle ([`GestureState`]).
//!
//! It does **not** deliver pointer events, hit test, draw the backdrop, or
//! schedule frames. Hosts feed [`PointerEvent`]s into a [`SwipeController`],
//! apply [`SwipeController::offset`] as a translation of the content, paint
//! the backdrop with [`SwipeController::backdrop_color`], and keep requesting
//! frames while [`SwipeController::on_frame`] returns `true`.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use understory_swipe::{
//!     Axis, DirectionMask, PointerEvent, ScrollCapability, ScrollDirection, ScrollTree,
//!     SwipeController, SwipeDirection, SwipeListener,
//! };
//!
//! // A screen whose only child (node 1) is a list scrolled to its top.
//! struct Screen;
//! impl ScrollTree for Screen {
//!     type Id = u32;
//!     fn child_count(&self, node: u32) -> usize { usize::from(node == 0) }
//!     fn child(&self, node: u32, index: usize) -> Option<u32> {
//!         (node == 0 && index == 0).then_some(1)
//!     }
//!     fn scroll_capability(&self, node: u32) -> Option<ScrollCapability> {
//!         (node == 1).then_some(ScrollCapability::Scrollable)
//!     }
//!     fn can_scroll(&self, _node: u32, axis: Axis, dir: ScrollDirection) -> bool {
//!         // At the top: only scrolling further down the list is possible.
//!         axis == Axis::Vertical && dir == ScrollDirection::Forward
//!     }
//! }
//!
//! struct Host;
//! impl SwipeListener for Host {
//!     fn on_dismissed(&mut self) {
//!         // Close the screen.
//!     }
//! }
//!
//! let mut swipe = SwipeController::new(0, DirectionMask::UP | DirectionMask::DOWN);
//! swipe.set_listener(Host);
//! swipe.on_resize(Size::new(400.0, 800.0));
//!
//! // Dragging the finger down pulls the content away from the top edge,
//! // because the list cannot scroll back any further.
//! swipe.handle_event(&Screen, PointerEvent::down(Point::new(200.0, 100.0), 0));
//! swipe.handle_event(&Screen, PointerEvent::moved(Point::new(200.0, 120.0), 16));
//! swipe.handle_event(&Screen, PointerEvent::moved(Point::new(200.0, 320.0), 32));
//! assert_eq!(swipe.direction(), Some(SwipeDirection::Up));
//! assert_eq!(swipe.offset().y, 200.0);
//! assert_eq!(swipe.progress(), 0.25);
//! ```
//!
//! ## Direction naming
//!
//! A [`SwipeDirection`] names the edge the content is pulled away from:
//! `Left` moves the content toward `+x`, `Up` toward `+y`, `Right` toward
//! `-x` and `Down` toward `-y`.
//!
//! ## Integration with Understory
//!
//! - Hit test with `understory_box_tree` and route with
//!   `understory_responder`, then feed the pointer stream of the dismissible
//!   subtree into the controller.
//! - Implement [`ScrollTree`] over your box tree: children from the tree,
//!   [`ScrollTree::world_bounds`] from its world bounds.
//!
//! ## Features
//!
//! - `std` (default): build Kurbo, Peniko and `log` against the standard library.
//! - `libm`: use `libm` for Kurbo/Peniko float math in `no_std` builds.
//!
//! Diagnostics are emitted through the [`log`] facade.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod controller;
mod direction;
mod engine;
mod listener;
mod pointer;
mod resolver;
mod settle;

pub use config::{ConfigError, FinishThreshold, SwipeConfig, sanitize_mask};
pub use controller::{EventOutcome, PointerEvent, PointerPhase, SwipeController};
pub use direction::{Axis, DirectionMask, ScrollDirection, SwipeDirection, arbitrate};
pub use engine::GestureState;
pub use listener::SwipeListener;
pub use pointer::PointerTracker;
pub use resolver::{ScrollCapability, ScrollTree, page_under_touch, resolve_scroll_target};
pub use settle::{Settle, clamp_fling, settle_duration};
