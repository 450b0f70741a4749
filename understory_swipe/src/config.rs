// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration for swipe controllers.
//!
//! Invalid values never abort a gesture. The checked constructors
//! ([`FinishThreshold::new`], [`sanitize_mask`]) report a [`ConfigError`];
//! the controller's setters fall back to the nearest valid value and log a
//! warning instead.

use core::fmt;

use peniko::Color;

use crate::direction::DirectionMask;

/// Fraction of the drag range past which a release dismisses the content.
///
/// Always in `(0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct FinishThreshold(f64);

impl FinishThreshold {
    /// The default threshold, `0.3`.
    pub const DEFAULT: Self = Self(0.3);

    /// Smallest accepted threshold; non-positive inputs saturate to this.
    pub const MIN: Self = Self(f64::EPSILON);

    /// Creates a threshold, rejecting values outside `(0, 1]`.
    pub fn new(value: f64) -> Result<Self, ConfigError> {
        if value > 0.0 && value <= 1.0 {
            Ok(Self(value))
        } else {
            Err(ConfigError::ThresholdOutOfRange(value))
        }
    }

    /// Creates a threshold, clamping into `(0, 1]`.
    ///
    /// `NaN` falls back to [`FinishThreshold::DEFAULT`].
    #[must_use]
    pub fn saturating(value: f64) -> Self {
        if value.is_nan() {
            Self::DEFAULT
        } else if value <= 0.0 {
            Self::MIN
        } else {
            Self(value.min(1.0))
        }
    }

    /// The threshold as a fraction.
    #[must_use]
    pub fn get(self) -> f64 {
        self.0
    }
}

impl Default for FinishThreshold {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A rejected configuration value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    /// A finish threshold outside `(0, 1]`.
    ThresholdOutOfRange(f64),
    /// A direction mask with no directions.
    EmptyDirectionMask,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ThresholdOutOfRange(v) => {
                write!(f, "finish threshold {v} is outside (0, 1]")
            }
            Self::EmptyDirectionMask => f.write_str("direction mask is empty"),
        }
    }
}

impl core::error::Error for ConfigError {}

/// Checks that `mask` names at least one direction.
pub fn sanitize_mask(mask: DirectionMask) -> Result<DirectionMask, ConfigError> {
    if mask.is_empty() {
        Err(ConfigError::EmptyDirectionMask)
    } else {
        Ok(mask)
    }
}

/// Tunables for a [`SwipeController`](crate::SwipeController).
///
/// All distances are in the same units as pointer coordinates (usually
/// device pixels) and all durations in milliseconds.
#[derive(Clone, Copy, Debug)]
pub struct SwipeConfig {
    /// Directions the content may be swiped in.
    pub mask: DirectionMask,
    /// Release fraction past which the content is dismissed.
    pub finish_threshold: FinishThreshold,
    /// Distance the pointer must travel from the down point before a swipe is captured.
    pub touch_slop: f64,
    /// Release speeds below this are treated as zero (px/s).
    pub min_fling_velocity: f64,
    /// Release speeds are capped at this magnitude (px/s).
    pub max_fling_velocity: f64,
    /// Base duration for a settle with no release velocity.
    pub base_settle_duration: u64,
    /// Upper bound on any settle animation.
    pub max_settle_duration: u64,
    /// Backdrop color at zero progress.
    pub backdrop_color: Color,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            mask: DirectionMask::default(),
            finish_threshold: FinishThreshold::DEFAULT,
            touch_slop: 8.0,
            min_fling_velocity: 50.0,
            max_fling_velocity: 8_000.0,
            base_settle_duration: 256,
            max_settle_duration: 600,
            backdrop_color: Color::from_rgba8(0, 0, 0, 0x8f),
        }
    }
}
