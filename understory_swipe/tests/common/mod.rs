// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for swipe integration tests: an in-memory content tree and
//! a recording listener.

#![allow(
    missing_docs,
    dead_code,
    reason = "Integration-test helper module; not every test binary uses every helper."
)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use kurbo::{Point, Rect};
use understory_swipe::{
    Axis, PointerEvent, ScrollCapability, ScrollDirection, ScrollTree, SwipeController,
    SwipeDirection, SwipeListener,
};

#[derive(Default)]
pub struct Node {
    pub children: Vec<usize>,
    pub capability: Option<ScrollCapability>,
    pub bounds: Option<Rect>,
    /// `(axis, direction)` pairs this node can still scroll in.
    pub scrollable: Vec<(Axis, ScrollDirection)>,
}

#[derive(Default)]
pub struct ContentTree {
    pub nodes: Vec<Node>,
    pub current_page: Option<usize>,
}

impl ContentTree {
    /// A tree holding a single plain root (node 0).
    pub fn plain() -> Self {
        let mut tree = Self::default();
        tree.add(None, None);
        tree
    }

    pub fn add(&mut self, parent: Option<usize>, capability: Option<ScrollCapability>) -> usize {
        let id = self.nodes.len();
        self.nodes.push(Node {
            capability,
            ..Node::default()
        });
        if let Some(p) = parent {
            self.nodes[p].children.push(id);
        }
        id
    }

    pub fn set_scrollable(
        &mut self,
        node: usize,
        axis: Axis,
        direction: ScrollDirection,
        can: bool,
    ) {
        let entries = &mut self.nodes[node].scrollable;
        entries.retain(|&e| e != (axis, direction));
        if can {
            entries.push((axis, direction));
        }
    }
}

impl ScrollTree for ContentTree {
    type Id = usize;

    fn child_count(&self, node: usize) -> usize {
        self.nodes[node].children.len()
    }

    fn child(&self, node: usize, index: usize) -> Option<usize> {
        self.nodes[node].children.get(index).copied()
    }

    fn scroll_capability(&self, node: usize) -> Option<ScrollCapability> {
        self.nodes[node].capability
    }

    fn can_scroll(&self, node: usize, axis: Axis, direction: ScrollDirection) -> bool {
        self.nodes[node].scrollable.contains(&(axis, direction))
    }

    fn world_bounds(&self, node: usize) -> Option<Rect> {
        self.nodes[node].bounds
    }

    fn current_page(&self, _pager: usize) -> Option<usize> {
        self.current_page
    }
}

#[derive(Debug, Default)]
pub struct Record {
    pub progress: Vec<f64>,
    pub intercepts: Vec<SwipeDirection>,
    pub dismissed: usize,
}

/// A listener that records every callback and vetoes while `veto` is set.
#[derive(Clone, Default)]
pub struct Recorder {
    pub record: Rc<RefCell<Record>>,
    pub veto: Rc<Cell<bool>>,
}

impl SwipeListener for Recorder {
    fn on_intercept(&mut self, direction: SwipeDirection, _touch: Point) -> bool {
        self.record.borrow_mut().intercepts.push(direction);
        self.veto.get()
    }

    fn on_progress_changed(&mut self, fraction: f64) {
        self.record.borrow_mut().progress.push(fraction);
    }

    fn on_dismissed(&mut self) {
        self.record.borrow_mut().dismissed += 1;
    }
}

/// Attach a fresh recorder to `swipe` and return a handle to it.
pub fn record(swipe: &mut SwipeController<usize>) -> Recorder {
    let recorder = Recorder::default();
    swipe.set_listener(recorder.clone());
    recorder
}

pub fn down(x: f64, y: f64, time: u64) -> PointerEvent {
    PointerEvent::down(Point::new(x, y), time)
}

pub fn moved(x: f64, y: f64, time: u64) -> PointerEvent {
    PointerEvent::moved(Point::new(x, y), time)
}

pub fn up(x: f64, y: f64, time: u64) -> PointerEvent {
    PointerEvent::up(Point::new(x, y), time)
}

/// Run frames every 16 ms from `start` until the settle completes; returns the end time.
pub fn run_frames(swipe: &mut SwipeController<usize>, start: u64) -> u64 {
    let mut now = start;
    while swipe.on_frame(now) {
        now += 16;
        assert!(now < start + 10_000, "settle did not finish");
    }
    now
}
