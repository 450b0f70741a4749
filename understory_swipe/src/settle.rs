// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Linear settle animation between two content offsets.

use kurbo::Vec2;

use crate::config::SwipeConfig;

/// A linear interpolation of the content offset over time.
///
/// The settle does not schedule frames; the caller samples it once per frame
/// with the current time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Settle {
    /// Offset at the start of the animation.
    pub from: Vec2,
    /// Offset the animation ends at.
    pub to: Vec2,
    /// Start time in milliseconds.
    pub start: u64,
    /// Duration in milliseconds; zero completes on the first sample.
    pub duration: u64,
}

impl Settle {
    /// Offset at `now`, and whether the target has been reached.
    ///
    /// The final sample is exactly [`Settle::to`].
    #[must_use]
    pub fn sample(&self, now: u64) -> (Vec2, bool) {
        let elapsed = now.saturating_sub(self.start);
        if elapsed >= self.duration {
            return (self.to, true);
        }
        let t = elapsed as f64 / self.duration as f64;
        (self.from.lerp(self.to, t), false)
    }
}

/// Duration for settling over `distance` along an axis of length `range`.
///
/// With a release `velocity` (px/s, already clamped by the caller) the settle
/// takes `4000 * |distance| / |velocity|` ms. Without one, it scales from the
/// base duration by the fraction of the range covered. Both are capped at
/// [`SwipeConfig::max_settle_duration`].
#[must_use]
pub fn settle_duration(distance: f64, velocity: f64, range: f64, config: &SwipeConfig) -> u64 {
    let distance = distance.abs();
    if distance == 0.0 {
        return 0;
    }
    let millis = if velocity != 0.0 {
        4_000.0 * distance / velocity.abs()
    } else {
        let covered = if range > 0.0 {
            (distance / range).min(1.0)
        } else {
            1.0
        };
        (covered + 1.0) * config.base_settle_duration as f64
    };
    let max = config.max_settle_duration;
    if millis >= max as f64 {
        max
    } else {
        whole_millis(millis)
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "callers bound the value by a u64 duration"
)]
fn whole_millis(millis: f64) -> u64 {
    millis as u64
}

/// Clamp a release velocity to the configured fling range.
///
/// Speeds below the minimum become zero; speeds above the maximum keep
/// their sign at the maximum magnitude.
#[must_use]
pub fn clamp_fling(velocity: f64, config: &SwipeConfig) -> f64 {
    let speed = velocity.abs();
    if speed < config.min_fling_velocity || velocity.is_nan() {
        0.0
    } else if speed > config.max_fling_velocity {
        if velocity > 0.0 {
            config.max_fling_velocity
        } else {
            -config.max_fling_velocity
        }
    } else {
        velocity
    }
}
