// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Swipe directions, direction masks, and first-movement arbitration.
//!
//! A [`SwipeDirection`] names the screen edge the content is pulled away from:
//! a [`SwipeDirection::Left`] swipe drags the content toward `+x`, exposing
//! whatever lies behind it from the left edge. [`SwipeDirection::Up`] drags it
//! toward `+y`, and so on.
//!
//! Arbitration happens once per gesture, on the first perceptible movement,
//! and is not filtered by the [`DirectionMask`]. The mask is
//! applied later, when the drag engine clamps the content offset, so a diagonal
//! gesture commits to an axis immediately but only a masked axis ever moves.
//!
//! ```
//! use kurbo::Point;
//! use understory_swipe::{arbitrate, DirectionMask, SwipeDirection};
//!
//! // Finger travels mostly to the right: the content is pulled from the left edge.
//! let dir = arbitrate(Point::new(10.0, 10.0), Point::new(30.0, 15.0));
//! assert_eq!(dir, Some(SwipeDirection::Left));
//!
//! // Commitment ignores the mask.
//! let mask = DirectionMask::UP;
//! assert!(!mask.allows(SwipeDirection::Left));
//! ```

use kurbo::{Point, Size, Vec2};

bitflags::bitflags! {
    /// Set of directions a swipe may move the content in.
    ///
    /// The bit values match the conventional `LEFT | UP | RIGHT | DOWN`
    /// integer flags, so masks round-trip through [`DirectionMask::bits`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct DirectionMask: u8 {
        /// Content may be pulled away from the left edge (toward `+x`).
        const LEFT  = 0b0000_0001;
        /// Content may be pulled away from the top edge (toward `+y`).
        const UP    = 0b0000_0010;
        /// Content may be pulled away from the right edge (toward `-x`).
        const RIGHT = 0b0000_0100;
        /// Content may be pulled away from the bottom edge (toward `-y`).
        const DOWN  = 0b0000_1000;
    }
}

impl Default for DirectionMask {
    fn default() -> Self {
        Self::LEFT
    }
}

impl DirectionMask {
    /// Returns `true` if `direction` is part of this mask.
    #[must_use]
    pub fn allows(self, direction: SwipeDirection) -> bool {
        self.contains(direction.into())
    }

    /// Returns `true` if `direction` is the only member of this mask.
    #[must_use]
    pub fn allows_only(self, direction: SwipeDirection) -> bool {
        self == direction.into()
    }
}

/// One of the four cardinal swipe directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    /// Content moves toward `+x`.
    Left,
    /// Content moves toward `+y`.
    Up,
    /// Content moves toward `-x`.
    Right,
    /// Content moves toward `-y`.
    Down,
}

impl From<SwipeDirection> for DirectionMask {
    fn from(direction: SwipeDirection) -> Self {
        match direction {
            SwipeDirection::Left => Self::LEFT,
            SwipeDirection::Up => Self::UP,
            SwipeDirection::Right => Self::RIGHT,
            SwipeDirection::Down => Self::DOWN,
        }
    }
}

impl SwipeDirection {
    /// The axis this direction moves the content along.
    #[must_use]
    pub fn axis(self) -> Axis {
        match self {
            Self::Left | Self::Right => Axis::Horizontal,
            Self::Up | Self::Down => Axis::Vertical,
        }
    }

    /// `1.0` when the content moves toward positive coordinates, `-1.0` otherwise.
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            Self::Left | Self::Up => 1.0,
            Self::Right | Self::Down => -1.0,
        }
    }

    /// The inner-scroll motion that competes with this swipe.
    ///
    /// While the resolved scroll target can still scroll this way, the swipe
    /// must not move the content.
    #[must_use]
    pub fn conflicting_scroll(self) -> ScrollDirection {
        match self {
            Self::Left | Self::Up => ScrollDirection::Backward,
            Self::Right | Self::Down => ScrollDirection::Forward,
        }
    }

    /// Offset at which the content is fully off-screen for this direction.
    #[must_use]
    pub fn dismiss_offset(self, range: Size) -> Vec2 {
        match self.axis() {
            Axis::Horizontal => Vec2::new(self.sign() * range.width, 0.0),
            Axis::Vertical => Vec2::new(0.0, self.sign() * range.height),
        }
    }
}

/// A layout axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The x axis.
    Horizontal,
    /// The y axis.
    Vertical,
}

impl Axis {
    /// Component of `v` along this axis.
    #[must_use]
    pub fn of(self, v: Vec2) -> f64 {
        match self {
            Self::Horizontal => v.x,
            Self::Vertical => v.y,
        }
    }

    /// Extent of `size` along this axis.
    #[must_use]
    pub fn extent(self, size: Size) -> f64 {
        match self {
            Self::Horizontal => size.width,
            Self::Vertical => size.height,
        }
    }
}

/// Direction of an inner scroll, relative to the scrolled content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScrollDirection {
    /// Toward the start of the content (top or left).
    Backward,
    /// Toward the end of the content (bottom or right).
    Forward,
}

/// Commit a gesture to a direction from its down-point and a later move-point.
///
/// Uses the slope of the displacement: `|dy / dx| >= 1` is vertical (`Up`
/// when the pointer moved down the screen, `Down` otherwise), anything flatter
/// is horizontal (`Left` when the pointer moved right, `Right` otherwise).
/// A purely vertical move (`dx == 0`) is treated as an infinite slope.
///
/// Returns `None` when the two points coincide; that movement is not
/// perceptible yet.
#[must_use]
pub fn arbitrate(down: Point, current: Point) -> Option<SwipeDirection> {
    let d = current - down;
    if d.x == 0.0 && d.y == 0.0 {
        return None;
    }
    let vertical = d.x == 0.0 || (d.y / d.x).abs() >= 1.0;
    Some(if vertical {
        if d.y > 0.0 {
            SwipeDirection::Up
        } else {
            SwipeDirection::Down
        }
    } else if d.x > 0.0 {
        SwipeDirection::Left
    } else {
        SwipeDirection::Right
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_mask_is_left_only() {
        let mask = DirectionMask::default();
        assert!(mask.allows_only(SwipeDirection::Left));
        assert!(!mask.allows(SwipeDirection::Up));
    }

    #[test]
    fn mask_bits_match_flag_values() {
        let mask = DirectionMask::UP | DirectionMask::LEFT;
        assert_eq!(mask.bits(), 0b0011);
        assert!(mask.allows(SwipeDirection::Up));
        assert!(mask.allows(SwipeDirection::Left));
        assert!(!mask.allows_only(SwipeDirection::Up));
    }

    #[test]
    fn horizontal_moves_commit_horizontally() {
        let down = Point::new(100.0, 100.0);
        assert_eq!(
            arbitrate(down, Point::new(120.0, 105.0)),
            Some(SwipeDirection::Left)
        );
        assert_eq!(
            arbitrate(down, Point::new(80.0, 95.0)),
            Some(SwipeDirection::Right)
        );
    }

    #[test]
    fn steep_moves_commit_vertically() {
        let down = Point::new(100.0, 100.0);
        assert_eq!(
            arbitrate(down, Point::new(105.0, 130.0)),
            Some(SwipeDirection::Up)
        );
        assert_eq!(
            arbitrate(down, Point::new(95.0, 70.0)),
            Some(SwipeDirection::Down)
        );
    }

    #[test]
    fn exact_diagonal_is_vertical() {
        let down = Point::new(0.0, 0.0);
        assert_eq!(
            arbitrate(down, Point::new(10.0, 10.0)),
            Some(SwipeDirection::Up)
        );
        assert_eq!(
            arbitrate(down, Point::new(-10.0, -10.0)),
            Some(SwipeDirection::Down)
        );
    }

    #[test]
    fn zero_dx_does_not_divide_by_zero() {
        let down = Point::new(50.0, 50.0);
        assert_eq!(
            arbitrate(down, Point::new(50.0, 51.0)),
            Some(SwipeDirection::Up)
        );
        assert_eq!(
            arbitrate(down, Point::new(50.0, 49.0)),
            Some(SwipeDirection::Down)
        );
    }

    #[test]
    fn no_movement_does_not_commit() {
        let p = Point::new(3.0, 4.0);
        assert_eq!(arbitrate(p, p), None);
    }

    #[test]
    fn dismiss_offsets_point_away_from_edge() {
        let range = Size::new(400.0, 800.0);
        assert_eq!(
            SwipeDirection::Left.dismiss_offset(range),
            Vec2::new(400.0, 0.0)
        );
        assert_eq!(
            SwipeDirection::Right.dismiss_offset(range),
            Vec2::new(-400.0, 0.0)
        );
        assert_eq!(
            SwipeDirection::Up.dismiss_offset(range),
            Vec2::new(0.0, 800.0)
        );
        assert_eq!(
            SwipeDirection::Down.dismiss_offset(range),
            Vec2::new(0.0, -800.0)
        );
    }
}
