// facet/geometry/src/rect.rs
//
// Copyright © 2024 The Facet Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! 2D axis-aligned rectangles.

use crate::vector::{Vector2F, Vector2I, vec2f, vec2i};

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct RectF {
    min: Vector2F,
    max: Vector2F,
}

impl RectF {
    #[inline]
    pub fn new(origin: Vector2F, size: Vector2F) -> RectF {
        RectF { min: origin, max: origin + size }
    }

    #[inline]
    pub fn from_points(origin: Vector2F, lower_right: Vector2F) -> RectF {
        RectF { min: origin, max: lower_right }
    }

    /// A rectangle that contains nothing; the identity for `union_point` and `union_rect`.
    #[inline]
    pub fn nothing() -> RectF {
        RectF {
            min: Vector2F::splat(f64::INFINITY),
            max: Vector2F::splat(f64::NEG_INFINITY),
        }
    }

    /// The smallest rectangle containing all of the given points.
    pub fn from_point_iter<I>(points: I) -> RectF where I: IntoIterator<Item = Vector2F> {
        points.into_iter().fold(RectF::nothing(), |rect, point| rect.union_point(point))
    }

    #[inline]
    pub fn origin(self) -> Vector2F {
        self.min
    }

    #[inline]
    pub fn size(self) -> Vector2F {
        self.max - self.min
    }

    #[inline]
    pub fn upper_right(self) -> Vector2F {
        vec2f(self.max.x(), self.min.y())
    }

    #[inline]
    pub fn lower_left(self) -> Vector2F {
        vec2f(self.min.x(), self.max.y())
    }

    #[inline]
    pub fn lower_right(self) -> Vector2F {
        self.max
    }

    #[inline]
    pub fn center(self) -> Vector2F {
        self.min.lerp(self.max, 0.5)
    }

    #[inline]
    pub fn contains_point(self, point: Vector2F) -> bool {
        self.min.x() <= point.x() && point.x() <= self.max.x() &&
            self.min.y() <= point.y() && point.y() <= self.max.y()
    }

    #[inline]
    pub fn contains_rect(self, other: RectF) -> bool {
        self.min.x() <= other.min.x() && other.max.x() <= self.max.x() &&
            self.min.y() <= other.min.y() && other.max.y() <= self.max.y()
    }

    /// True if the rectangle has no interior (including inverted rectangles).
    #[inline]
    pub fn is_empty(self) -> bool {
        !(self.min.x() < self.max.x() && self.min.y() < self.max.y())
    }

    #[inline]
    pub fn union_point(self, point: Vector2F) -> RectF {
        RectF::from_points(self.min.min(point), self.max.max(point))
    }

    #[inline]
    pub fn union_rect(self, other: RectF) -> RectF {
        RectF::from_points(self.min.min(other.min), self.max.max(other.max))
    }

    #[inline]
    pub fn intersects(self, other: RectF) -> bool {
        self.min.x() < other.max.x() && other.min.x() < self.max.x() &&
            self.min.y() < other.max.y() && other.min.y() < self.max.y()
    }

    #[inline]
    pub fn intersection(self, other: RectF) -> Option<RectF> {
        if !self.intersects(other) {
            None
        } else {
            Some(RectF::from_points(self.min.max(other.min), self.max.min(other.max)))
        }
    }

    #[inline]
    pub fn min_x(self) -> f64 {
        self.min.x()
    }

    #[inline]
    pub fn min_y(self) -> f64 {
        self.min.y()
    }

    #[inline]
    pub fn max_x(self) -> f64 {
        self.max.x()
    }

    #[inline]
    pub fn max_y(self) -> f64 {
        self.max.y()
    }

    #[inline]
    pub fn width(self) -> f64 {
        self.max.x() - self.min.x()
    }

    #[inline]
    pub fn height(self) -> f64 {
        self.max.y() - self.min.y()
    }

    #[inline]
    pub fn area(self) -> f64 {
        if self.is_empty() { 0.0 } else { self.width() * self.height() }
    }

    #[inline]
    pub fn round_out(self) -> RectF {
        RectF::from_points(self.min.floor(), self.max.ceil())
    }

    #[inline]
    pub fn dilate(self, amount: Vector2F) -> RectF {
        RectF::from_points(self.min - amount, self.max + amount)
    }

    #[inline]
    pub fn to_i32(self) -> RectI {
        RectI::from_points(self.min.to_i32(), self.max.to_i32())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Hash)]
pub struct RectI {
    min: Vector2I,
    max: Vector2I,
}

impl RectI {
    #[inline]
    pub fn new(origin: Vector2I, size: Vector2I) -> RectI {
        RectI { min: origin, max: origin + size }
    }

    #[inline]
    pub fn from_points(origin: Vector2I, lower_right: Vector2I) -> RectI {
        RectI { min: origin, max: lower_right }
    }

    #[inline]
    pub fn origin(self) -> Vector2I {
        self.min
    }

    #[inline]
    pub fn size(self) -> Vector2I {
        self.max - self.min
    }

    #[inline]
    pub fn lower_right(self) -> Vector2I {
        self.max
    }

    #[inline]
    pub fn min_x(self) -> i32 {
        self.min.x()
    }

    #[inline]
    pub fn min_y(self) -> i32 {
        self.min.y()
    }

    #[inline]
    pub fn max_x(self) -> i32 {
        self.max.x()
    }

    #[inline]
    pub fn max_y(self) -> i32 {
        self.max.y()
    }

    #[inline]
    pub fn width(self) -> i32 {
        self.max.x() - self.min.x()
    }

    #[inline]
    pub fn height(self) -> i32 {
        self.max.y() - self.min.y()
    }

    #[inline]
    pub fn area(self) -> i64 {
        if self.is_empty() { 0 } else { self.width() as i64 * self.height() as i64 }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        !(self.min.x() < self.max.x() && self.min.y() < self.max.y())
    }

    #[inline]
    pub fn contains_point(self, point: Vector2I) -> bool {
        // self.origin <= point && point <= self.lower_right - 1
        self.min.x() <= point.x() && point.x() < self.max.x() &&
            self.min.y() <= point.y() && point.y() < self.max.y()
    }

    #[inline]
    pub fn intersection(self, other: RectI) -> Option<RectI> {
        let rect = RectI::from_points(self.min.max(other.min), self.max.min(other.max));
        if rect.is_empty() { None } else { Some(rect) }
    }

    /// Splits the rectangle in half along its longer axis.
    ///
    /// The split coordinate is rounded down, so both halves are non-empty as long as the longer
    /// side is at least two units.
    pub fn split_longer_axis(self) -> (RectI, RectI, SplitAxis) {
        if self.width() >= self.height() {
            let mid = self.min.x() + self.width() / 2;
            (RectI::from_points(self.min, vec2i(mid, self.max.y())),
             RectI::from_points(vec2i(mid, self.min.y()), self.max),
             SplitAxis::X(mid))
        } else {
            let mid = self.min.y() + self.height() / 2;
            (RectI::from_points(self.min, vec2i(self.max.x(), mid)),
             RectI::from_points(vec2i(self.min.x(), mid), self.max),
             SplitAxis::Y(mid))
        }
    }

    #[inline]
    pub fn to_f64(self) -> RectF {
        RectF::from_points(self.min.to_f64(), self.max.to_f64())
    }
}

/// The axis and coordinate that `RectI::split_longer_axis` cut along.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplitAxis {
    X(i32),
    Y(i32),
}

#[cfg(test)]
mod test {
    use super::{RectF, RectI, SplitAxis};
    use crate::vector::{vec2f, vec2i};

    #[test]
    fn test_union_from_nothing() {
        let rect = RectF::from_point_iter(vec![vec2f(1.0, 2.0), vec2f(-1.0, 5.0)]);
        assert_eq!(rect, RectF::from_points(vec2f(-1.0, 2.0), vec2f(1.0, 5.0)));
        assert!(RectF::nothing().is_empty());
    }

    #[test]
    fn test_split_longer_axis() {
        let rect = RectI::from_points(vec2i(0, 0), vec2i(5, 2));
        let (a, b, axis) = rect.split_longer_axis();
        assert_eq!(axis, SplitAxis::X(2));
        assert_eq!(a.area() + b.area(), rect.area());

        let rect = RectI::from_points(vec2i(0, 0), vec2i(1, 3));
        let (a, b, axis) = rect.split_longer_axis();
        assert_eq!(axis, SplitAxis::Y(1));
        assert_eq!((a.height(), b.height()), (1, 2));
    }
}
