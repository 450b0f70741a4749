// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer tracking: movement deltas and release velocity.
//!
//! ## Usage
//!
//! 1) Start tracking with [`PointerTracker::start`] at the capture position.
//! 2) On each move, call [`PointerTracker::update`] to get the delta since the last update.
//! 3) On release, call [`PointerTracker::velocity`] for a px/s estimate.
//! 4) Reset with [`PointerTracker::end`].
//!
//! ```
//! use kurbo::Point;
//! use understory_swipe::PointerTracker;
//!
//! let mut tracker = PointerTracker::default();
//! tracker.start(Point::new(0.0, 0.0), 1_000);
//! tracker.update(Point::new(10.0, 0.0), 1_010);
//! let delta = tracker.update(Point::new(30.0, 0.0), 1_020).unwrap();
//! assert_eq!(delta.x, 20.0);
//!
//! // 30 px over 20 ms.
//! let v = tracker.velocity(1_020);
//! assert_eq!(v.x, 1_500.0);
//! ```

use kurbo::{Point, Vec2};

/// Number of samples kept for velocity estimation.
const HISTORY_SIZE: usize = 20;

/// Only samples this recent (relative to the newest) contribute to velocity.
const HORIZON_MS: u64 = 100;

/// A pointer that has not moved for this long is treated as stopped.
const ASSUME_STOPPED_MS: u64 = 40;

#[derive(Clone, Copy, Debug)]
struct Sample {
    time: u64,
    pos: Point,
}

/// Tracks one pointer across a drag: positions, deltas, and recent history.
#[derive(Clone, Debug, Default)]
pub struct PointerTracker {
    /// Position where tracking started.
    pub start_pos: Option<Point>,
    /// Last recorded position.
    pub last_pos: Option<Point>,
    samples: [Option<Sample>; HISTORY_SIZE],
    index: usize,
}

impl PointerTracker {
    /// Start tracking from `pos` at `time` (milliseconds), discarding any history.
    pub fn start(&mut self, pos: Point, time: u64) {
        self.start_pos = Some(pos);
        self.last_pos = Some(pos);
        self.samples = [None; HISTORY_SIZE];
        self.index = 0;
        self.record(pos, time);
    }

    /// Record a new position, returning the delta since the previous one.
    ///
    /// Returns `None` when tracking has not been started.
    pub fn update(&mut self, pos: Point, time: u64) -> Option<Vec2> {
        self.start_pos?;
        let delta = self.last_pos.map(|last| pos - last);
        self.last_pos = Some(pos);
        self.record(pos, time);
        delta
    }

    /// Stop tracking and clear history.
    pub fn end(&mut self) {
        *self = Self::default();
    }

    /// Estimated velocity in px/s as of `now` (milliseconds).
    ///
    /// Uses the displacement between the newest sample and the oldest one
    /// within a 100 ms horizon. A pointer that has been idle for 40 ms or
    /// more, or too little history, yields zero.
    pub fn velocity(&self, now: u64) -> Vec2 {
        let Some(newest) = self.samples[self.index] else {
            return Vec2::ZERO;
        };
        if now.saturating_sub(newest.time) >= ASSUME_STOPPED_MS {
            return Vec2::ZERO;
        }

        let mut oldest = newest;
        for back in 1..HISTORY_SIZE {
            let i = (self.index + HISTORY_SIZE - back) % HISTORY_SIZE;
            let Some(sample) = self.samples[i] else {
                break;
            };
            if newest.time.saturating_sub(sample.time) > HORIZON_MS {
                break;
            }
            oldest = sample;
        }

        let dt = newest.time.saturating_sub(oldest.time);
        if dt == 0 {
            return Vec2::ZERO;
        }
        (newest.pos - oldest.pos) * (1000.0 / dt as f64)
    }

    fn record(&mut self, pos: Point, time: u64) {
        if self.samples[self.index].is_some() {
            self.index = (self.index + 1) % HISTORY_SIZE;
        }
        self.samples[self.index] = Some(Sample { time, pos });
    }
}
