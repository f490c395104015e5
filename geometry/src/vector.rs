// facet/geometry/src/vector.rs
//
// Copyright © 2024 The Facet Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! 2D vectors with floating point and integer coordinates.

use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// 2D vectors with 64-bit floating point coordinates.
///
/// Double precision is used throughout because the integer frame carries about 20 bits, and
/// areas computed from it need the remaining bits to stay exact enough for coverage.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector2F {
    x: f64,
    y: f64,
}

impl Vector2F {
    #[inline]
    pub fn new(x: f64, y: f64) -> Vector2F {
        Vector2F { x, y }
    }

    #[inline]
    pub fn splat(value: f64) -> Vector2F {
        Vector2F { x: value, y: value }
    }

    #[inline]
    pub fn zero() -> Vector2F {
        Vector2F::default()
    }

    #[inline]
    pub fn x(self) -> f64 {
        self.x
    }

    #[inline]
    pub fn y(self) -> f64 {
        self.y
    }

    #[inline]
    pub fn set_x(&mut self, x: f64) {
        self.x = x;
    }

    #[inline]
    pub fn set_y(&mut self, y: f64) {
        self.y = y;
    }

    #[inline]
    pub fn min(self, other: Vector2F) -> Vector2F {
        vec2f(self.x.min(other.x), self.y.min(other.y))
    }

    #[inline]
    pub fn max(self, other: Vector2F) -> Vector2F {
        vec2f(self.x.max(other.x), self.y.max(other.y))
    }

    #[inline]
    pub fn clamp(self, min_val: Vector2F, max_val: Vector2F) -> Vector2F {
        self.max(min_val).min(max_val)
    }

    #[inline]
    pub fn det(self, other: Vector2F) -> f64 {
        self.x * other.y - self.y * other.x
    }

    #[inline]
    pub fn dot(self, other: Vector2F) -> f64 {
        self.x * other.x + self.y * other.y
    }

    #[inline]
    pub fn scale(self, factor: f64) -> Vector2F {
        vec2f(self.x * factor, self.y * factor)
    }

    #[inline]
    pub fn scale_xy(self, factors: Vector2F) -> Vector2F {
        vec2f(self.x * factors.x, self.y * factors.y)
    }

    #[inline]
    pub fn floor(self) -> Vector2F {
        vec2f(self.x.floor(), self.y.floor())
    }

    #[inline]
    pub fn ceil(self) -> Vector2F {
        vec2f(self.x.ceil(), self.y.ceil())
    }

    #[inline]
    pub fn round(self) -> Vector2F {
        vec2f(self.x.round(), self.y.round())
    }

    /// Treats this point as a vector and calculates its squared length.
    #[inline]
    pub fn square_length(self) -> f64 {
        self.dot(self)
    }

    /// Treats this point as a vector and calculates its length.
    #[inline]
    pub fn length(self) -> f64 {
        f64::sqrt(self.square_length())
    }

    /// Treats this point as a vector and normalizes it.
    #[inline]
    pub fn normalize(self) -> Vector2F {
        self.scale(1.0 / self.length())
    }

    /// The vector rotated a quarter turn counterclockwise.
    #[inline]
    pub fn perpendicular(self) -> Vector2F {
        vec2f(-self.y, self.x)
    }

    /// Swaps y and x.
    #[inline]
    pub fn yx(self) -> Vector2F {
        vec2f(self.y, self.x)
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self == Vector2F::default()
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    #[inline]
    pub fn lerp(self, other: Vector2F, t: f64) -> Vector2F {
        self + (other - self).scale(t)
    }

    /// The angle of this vector, measured counterclockwise from +x, in `(-π, π]`.
    #[inline]
    pub fn angle(self) -> f64 {
        self.y.atan2(self.x)
    }

    #[inline]
    pub fn from_angle(angle: f64) -> Vector2F {
        vec2f(angle.cos(), angle.sin())
    }

    /// Rounds each coordinate to the nearest integer.
    ///
    /// The caller must ensure that the coordinates fit in an `i32`.
    #[inline]
    pub fn to_i32(self) -> Vector2I {
        vec2i(self.x.round() as i32, self.y.round() as i32)
    }
}

#[inline]
pub fn vec2f(x: f64, y: f64) -> Vector2F {
    Vector2F::new(x, y)
}

impl Add<Vector2F> for Vector2F {
    type Output = Vector2F;
    #[inline]
    fn add(self, other: Vector2F) -> Vector2F {
        vec2f(self.x + other.x, self.y + other.y)
    }
}

impl AddAssign<Vector2F> for Vector2F {
    #[inline]
    fn add_assign(&mut self, other: Vector2F) {
        *self = *self + other
    }
}

impl Sub<Vector2F> for Vector2F {
    type Output = Vector2F;
    #[inline]
    fn sub(self, other: Vector2F) -> Vector2F {
        vec2f(self.x - other.x, self.y - other.y)
    }
}

impl SubAssign<Vector2F> for Vector2F {
    #[inline]
    fn sub_assign(&mut self, other: Vector2F) {
        *self = *self - other
    }
}

impl Mul<Vector2F> for Vector2F {
    type Output = Vector2F;
    #[inline]
    fn mul(self, other: Vector2F) -> Vector2F {
        self.scale_xy(other)
    }
}

impl Mul<f64> for Vector2F {
    type Output = Vector2F;
    #[inline]
    fn mul(self, factor: f64) -> Vector2F {
        self.scale(factor)
    }
}

impl Neg for Vector2F {
    type Output = Vector2F;
    #[inline]
    fn neg(self) -> Vector2F {
        vec2f(-self.x, -self.y)
    }
}

/// 2D points with 32-bit signed integer coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Vector2I {
    x: i32,
    y: i32,
}

impl Vector2I {
    #[inline]
    pub fn new(x: i32, y: i32) -> Vector2I {
        Vector2I { x, y }
    }

    #[inline]
    pub fn splat(value: i32) -> Vector2I {
        Vector2I { x: value, y: value }
    }

    #[inline]
    pub fn x(self) -> i32 {
        self.x
    }

    #[inline]
    pub fn y(self) -> i32 {
        self.y
    }

    #[inline]
    pub fn min(self, other: Vector2I) -> Vector2I {
        vec2i(self.x.min(other.x), self.y.min(other.y))
    }

    #[inline]
    pub fn max(self, other: Vector2I) -> Vector2I {
        vec2i(self.x.max(other.x), self.y.max(other.y))
    }

    #[inline]
    pub fn scale(self, factor: i32) -> Vector2I {
        vec2i(self.x * factor, self.y * factor)
    }

    #[inline]
    pub fn to_f64(self) -> Vector2F {
        vec2f(self.x as f64, self.y as f64)
    }
}

#[inline]
pub fn vec2i(x: i32, y: i32) -> Vector2I {
    Vector2I::new(x, y)
}

impl Add<Vector2I> for Vector2I {
    type Output = Vector2I;
    #[inline]
    fn add(self, other: Vector2I) -> Vector2I {
        vec2i(self.x + other.x, self.y + other.y)
    }
}

impl Sub<Vector2I> for Vector2I {
    type Output = Vector2I;
    #[inline]
    fn sub(self, other: Vector2I) -> Vector2I {
        vec2i(self.x - other.x, self.y - other.y)
    }
}

impl Neg for Vector2I {
    type Output = Vector2I;
    #[inline]
    fn neg(self) -> Vector2I {
        vec2i(-self.x, -self.y)
    }
}

#[cfg(test)]
mod test {
    use super::{vec2f, vec2i};

    #[test]
    fn test_det_is_counterclockwise_positive() {
        assert_eq!(vec2f(1.0, 0.0).det(vec2f(0.0, 1.0)), 1.0);
        assert_eq!(vec2f(0.0, 1.0).det(vec2f(1.0, 0.0)), -1.0);
    }

    #[test]
    fn test_perpendicular() {
        assert_eq!(vec2f(2.0, 1.0).perpendicular(), vec2f(-1.0, 2.0));
    }

    #[test]
    fn test_integer_rounding() {
        assert_eq!(vec2f(1.4, -2.6).to_i32(), vec2i(1, -3));
        assert_eq!(vec2i(3, -4).to_f64(), vec2f(3.0, -4.0));
    }
}
