// facet/content/src/simplifier.rs
//
// Copyright © 2024 The Facet Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Collapses the redundant points that clipping leaves along axis-aligned clip lines.

use facet_geometry::vector::Vector2F;

/// Accumulates the points of one output polygon, dropping duplicates and merging runs of points
/// that lie on a common horizontal or vertical line.
///
/// Dropping such points never changes the enclosed area, since three points on a common
/// axis-aligned line contribute nothing to the shoelace sum.
#[derive(Clone, Debug, Default)]
pub struct ClipSimplifier {
    points: Vec<Vector2F>,
}

impl ClipSimplifier {
    #[inline]
    pub fn new() -> ClipSimplifier {
        ClipSimplifier { points: vec![] }
    }

    pub fn add(&mut self, point: Vector2F) {
        let len = self.points.len();
        if len > 0 && self.points[len - 1] == point {
            return;
        }

        if len >= 2 && axis_collinear(self.points[len - 2], self.points[len - 1], point) {
            self.points[len - 1] = point;
            if self.points[len - 2] == point {
                self.points.pop();
            }
            return;
        }

        self.points.push(point);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the accumulated polygon, or an empty vector if fewer than three points survive.
    /// The simplifier is left empty and ready for the next polygon.
    pub fn finalize(&mut self) -> Vec<Vector2F> {
        let mut points = std::mem::replace(&mut self.points, vec![]);
        loop {
            let len = points.len();
            if len < 3 {
                return vec![];
            }
            if points[len - 1] == points[0] ||
                    axis_collinear(points[len - 2], points[len - 1], points[0]) {
                points.pop();
                continue;
            }
            if axis_collinear(points[len - 1], points[0], points[1]) {
                points.remove(0);
                continue;
            }
            return points;
        }
    }

    /// Finishes the current polygon and pushes it onto `polygons` if it is non-degenerate.
    pub fn finalize_into(&mut self, polygons: &mut Vec<Vec<Vector2F>>) {
        let polygon = self.finalize();
        if !polygon.is_empty() {
            polygons.push(polygon);
        }
    }
}

#[inline]
fn axis_collinear(a: Vector2F, b: Vector2F, c: Vector2F) -> bool {
    (a.x() == b.x() && b.x() == c.x()) || (a.y() == b.y() && b.y() == c.y())
}
