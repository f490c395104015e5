// facet/arrangement/src/integer.rs
//
// Copyright © 2024 The Facet Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Conversion of floating-point edges onto an integer grid.

use crate::rational::RationalPoint;
use facet_content::edge::LinearEdge;
use facet_content::program::PathId;
use facet_geometry::rect::RectF;
use facet_geometry::transform2d::Transform2F;
use facet_geometry::vector::{vec2i, Vector2F, Vector2I};
use malachite::Rational;
use std::error::Error;
use std::fmt::{self, Display, Formatter};

/// The largest supported grid precision. Keeps every intersection numerator and denominator
/// comfortably inside `i128`.
pub const MAX_PRECISION_BITS: u32 = 30;

const COORDINATE_LIMIT: f64 = (1u64 << MAX_PRECISION_BITS) as f64;

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum ScaleError {
    /// The bounds are empty or not finite.
    EmptyBounds,
    PrecisionOutOfRange(u32),
    /// A point lies too far outside the bounds to be represented on the grid.
    CoordinateOutOfRange(Vector2F),
}

impl Display for ScaleError {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        match *self {
            ScaleError::EmptyBounds => write!(formatter, "bounds are empty"),
            ScaleError::PrecisionOutOfRange(bits) => {
                write!(formatter, "{} bits of precision is out of range", bits)
            }
            ScaleError::CoordinateOutOfRange(point) => {
                write!(formatter, "{:?} is too far outside the bounds", point)
            }
        }
    }
}

impl Error for ScaleError {}

/// Maps a bounding box onto a symmetric integer grid of `2^precision_bits` units along its
/// longer side, by power-of-two scaling so that the mapping is exact in both directions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntegerScaler {
    to_integer: Transform2F,
    from_integer: Transform2F,
}

impl IntegerScaler {
    pub fn new(bounds: RectF, precision_bits: u32) -> Result<IntegerScaler, ScaleError> {
        let finite = bounds.origin().is_finite() && bounds.lower_right().is_finite();
        if !finite || bounds.is_empty() {
            return Err(ScaleError::EmptyBounds);
        }
        if precision_bits == 0 || precision_bits > MAX_PRECISION_BITS {
            return Err(ScaleError::PrecisionOutOfRange(precision_bits));
        }

        let size = bounds.width().max(bounds.height());
        let exponent = precision_bits as i32 - size.log2().ceil() as i32;
        let scale = 2.0f64.powi(exponent);
        let center = bounds.center();
        Ok(IntegerScaler {
            to_integer: Transform2F::from_scale_translation(Vector2F::splat(scale),
                                                            -center.scale(scale)),
            from_integer: Transform2F::from_scale_translation(Vector2F::splat(1.0 / scale),
                                                              center),
        })
    }

    #[inline]
    pub fn to_integer(&self) -> Transform2F {
        self.to_integer
    }

    #[inline]
    pub fn from_integer(&self) -> Transform2F {
        self.from_integer
    }

    pub fn to_integer_point(&self, point: Vector2F) -> Result<Vector2I, ScaleError> {
        let scaled = self.to_integer.transform_point(point).round();
        if !scaled.is_finite() ||
                scaled.x().abs() > COORDINATE_LIMIT ||
                scaled.y().abs() > COORDINATE_LIMIT {
            return Err(ScaleError::CoordinateOutOfRange(point));
        }
        Ok(vec2i(scaled.x() as i32, scaled.y() as i32))
    }

    /// Rounds every edge onto the grid, dropping edges that collapse to a point.
    pub fn integer_edges(&self, paths: &[(PathId, Vec<LinearEdge>)])
                         -> Result<Vec<IntegerEdge>, ScaleError> {
        let mut integer_edges = vec![];
        for &(path, ref edges) in paths {
            for edge in edges {
                let start = self.to_integer_point(edge.start)?;
                let end = self.to_integer_point(edge.end)?;
                if start != end {
                    integer_edges.push(IntegerEdge::new(path, start, end));
                }
            }
        }
        Ok(integer_edges)
    }
}

/// A point strictly inside an integer edge where another edge crosses or touches it.
#[derive(Clone, Debug)]
pub struct EdgeIntersection {
    /// The parameter along the edge, in (0, 1).
    pub t: Rational,
    pub point: RationalPoint,
}

#[derive(Clone, Debug)]
pub struct IntegerEdge {
    pub path: PathId,
    pub start: Vector2I,
    pub end: Vector2I,
    pub min: Vector2I,
    pub max: Vector2I,
    pub intersections: Vec<EdgeIntersection>,
}

impl IntegerEdge {
    pub fn new(path: PathId, start: Vector2I, end: Vector2I) -> IntegerEdge {
        IntegerEdge {
            path,
            start,
            end,
            min: start.min(end),
            max: start.max(end),
            intersections: vec![],
        }
    }

    #[inline]
    pub fn delta(&self) -> Vector2I {
        self.end - self.start
    }

    #[inline]
    pub fn is_axis_aligned(&self) -> bool {
        self.start.x() == self.end.x() || self.start.y() == self.end.y()
    }
}
