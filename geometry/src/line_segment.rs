// facet/geometry/src/line_segment.rs
//
// Copyright © 2024 The Facet Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Line segment types.

use crate::rect::RectF;
use crate::vector::Vector2F;

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct LineSegment2F {
    from: Vector2F,
    to: Vector2F,
}

impl LineSegment2F {
    #[inline]
    pub fn new(from: Vector2F, to: Vector2F) -> LineSegment2F {
        LineSegment2F { from, to }
    }

    #[inline]
    pub fn from(self) -> Vector2F {
        self.from
    }

    #[inline]
    pub fn to(self) -> Vector2F {
        self.to
    }

    #[inline]
    pub fn vector(self) -> Vector2F {
        self.to - self.from
    }

    #[inline]
    pub fn sample(self, t: f64) -> Vector2F {
        self.from.lerp(self.to, t)
    }

    #[inline]
    pub fn reversed(self) -> LineSegment2F {
        LineSegment2F::new(self.to, self.from)
    }

    #[inline]
    pub fn square_length(self) -> f64 {
        self.vector().square_length()
    }

    #[inline]
    pub fn bounds(self) -> RectF {
        RectF::from_points(self.from.min(self.to), self.from.max(self.to))
    }

    /// Twice the signed area of the trapezoid this segment contributes to a shoelace sum.
    #[inline]
    pub fn shoelace(self) -> f64 {
        self.from.det(self.to)
    }

    /// Parameter of the projection of `point` onto the infinite line through this segment.
    #[inline]
    pub fn projection_t(self, point: Vector2F) -> f64 {
        (point - self.from).dot(self.vector()) / self.square_length()
    }
}

#[cfg(test)]
mod test {
    use super::LineSegment2F;
    use crate::vector::vec2f;

    #[test]
    fn test_sample_and_projection() {
        let segment = LineSegment2F::new(vec2f(0.0, 0.0), vec2f(4.0, 2.0));
        assert_eq!(segment.sample(0.5), vec2f(2.0, 1.0));
        assert_eq!(segment.projection_t(vec2f(2.0, 1.0)), 0.5);
        assert_eq!(segment.reversed().from(), vec2f(4.0, 2.0));
    }
}
