// facet/geometry/src/transform2d.rs
//
// Copyright © 2024 The Facet Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! 2D affine transforms restricted to axis-aligned scale and translation.
//!
//! These are the only transforms the integer frame needs, and keeping them diagonal means
//! the inverse is exact whenever the scale is a power of two.

use crate::rect::RectF;
use crate::vector::{Vector2F, vec2f};
use std::ops::Mul;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform2F {
    pub scale: Vector2F,
    pub translation: Vector2F,
}

impl Default for Transform2F {
    #[inline]
    fn default() -> Transform2F {
        Transform2F { scale: Vector2F::splat(1.0), translation: Vector2F::zero() }
    }
}

impl Transform2F {
    #[inline]
    pub fn from_scale_translation(scale: Vector2F, translation: Vector2F) -> Transform2F {
        Transform2F { scale, translation }
    }

    #[inline]
    pub fn from_uniform_scale(scale: f64) -> Transform2F {
        Transform2F::from_scale_translation(Vector2F::splat(scale), Vector2F::zero())
    }

    #[inline]
    pub fn from_translation(translation: Vector2F) -> Transform2F {
        Transform2F::from_scale_translation(Vector2F::splat(1.0), translation)
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        *self == Transform2F::default()
    }

    #[inline]
    pub fn transform_point(&self, point: Vector2F) -> Vector2F {
        point.scale_xy(self.scale) + self.translation
    }

    #[inline]
    pub fn transform_rect(&self, rect: RectF) -> RectF {
        let (a, b) = (self.transform_point(rect.origin()), self.transform_point(rect.lower_right()));
        RectF::from_points(a.min(b), a.max(b))
    }

    /// The determinant; areas scale by this factor.
    #[inline]
    pub fn det(&self) -> f64 {
        self.scale.x() * self.scale.y()
    }

    #[inline]
    pub fn inverse(&self) -> Transform2F {
        let scale = vec2f(1.0 / self.scale.x(), 1.0 / self.scale.y());
        Transform2F { scale, translation: -self.translation.scale_xy(scale) }
    }
}

impl Mul<Transform2F> for Transform2F {
    type Output = Transform2F;
    /// `(self * other)(p) == self(other(p))`.
    #[inline]
    fn mul(self, other: Transform2F) -> Transform2F {
        Transform2F {
            scale: self.scale.scale_xy(other.scale),
            translation: self.transform_point(other.translation),
        }
    }
}

impl Mul<Vector2F> for Transform2F {
    type Output = Vector2F;
    #[inline]
    fn mul(self, point: Vector2F) -> Vector2F {
        self.transform_point(point)
    }
}
