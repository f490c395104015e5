// facet/arrangement/src/rational.rs
//
// Copyright © 2024 The Facet Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Exact rational points.

use facet_geometry::vector::{vec2f, Vector2F, Vector2I};
use malachite::num::conversion::traits::RoundingFrom;
use malachite::rounding_modes::RoundingMode;
use malachite::{Integer, Rational};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// Rounds a rational to the nearest `f64`.
#[inline]
pub fn rational_to_f64(value: &Rational) -> f64 {
    f64::rounding_from(value, RoundingMode::Nearest).0
}

#[inline]
pub fn rational(numerator: i128, denominator: i128) -> Rational {
    Rational::from_integers(Integer::from(numerator), Integer::from(denominator))
}

#[inline]
pub fn integer_rational(value: i128) -> Rational {
    Rational::from(Integer::from(value))
}

/// A point with exact rational coordinates, plus a cached floating-point approximation used to
/// short-circuit comparisons.
#[derive(Clone, Debug)]
pub struct RationalPoint {
    pub x: Rational,
    pub y: Rational,
    approx: Vector2F,
}

impl RationalPoint {
    pub fn new(x: Rational, y: Rational) -> RationalPoint {
        let approx = vec2f(rational_to_f64(&x), rational_to_f64(&y));
        RationalPoint { x, y, approx }
    }

    #[inline]
    pub fn from_integer(point: Vector2I) -> RationalPoint {
        RationalPoint {
            x: integer_rational(point.x() as i128),
            y: integer_rational(point.y() as i128),
            approx: point.to_f64(),
        }
    }

    /// The nearest floating-point point.
    #[inline]
    pub fn to_f64(&self) -> Vector2F {
        self.approx
    }

    /// Orders points by x, then y. Conclusive floating-point comparisons are used when the
    /// approximations differ by more than their rounding error; otherwise the exact values are
    /// compared.
    pub fn quick_cmp(&self, other: &RationalPoint) -> Ordering {
        match quick_cmp_f64(self.approx.x(), other.approx.x()) {
            Some(Ordering::Equal) | None => {}
            Some(ordering) => return ordering,
        }
        match self.x.cmp(&other.x) {
            Ordering::Equal => {}
            ordering => return ordering,
        }
        match quick_cmp_f64(self.approx.y(), other.approx.y()) {
            Some(Ordering::Equal) | None => self.y.cmp(&other.y),
            Some(ordering) => ordering,
        }
    }
}

/// Compares two correctly rounded approximations. Rounding to nearest is monotonic, so distinct
/// approximations order their exact values; equal ones are inconclusive.
#[inline]
fn quick_cmp_f64(a: f64, b: f64) -> Option<Ordering> {
    if a < b {
        Some(Ordering::Less)
    } else if a > b {
        Some(Ordering::Greater)
    } else {
        None
    }
}

impl PartialEq for RationalPoint {
    #[inline]
    fn eq(&self, other: &RationalPoint) -> bool {
        self.approx == other.approx && self.x == other.x && self.y == other.y
    }
}

impl Eq for RationalPoint {}

impl PartialOrd for RationalPoint {
    #[inline]
    fn partial_cmp(&self, other: &RationalPoint) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RationalPoint {
    #[inline]
    fn cmp(&self, other: &RationalPoint) -> Ordering {
        self.quick_cmp(other)
    }
}

impl Hash for RationalPoint {
    fn hash<H>(&self, state: &mut H) where H: Hasher {
        self.x.hash(state);
        self.y.hash(state);
    }
}
