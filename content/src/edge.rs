// facet/content/src/edge.rs
//
// Copyright © 2024 The Facet Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Edges produced and consumed by the clipping primitives.

use facet_geometry::line_segment::LineSegment2F;
use facet_geometry::rect::RectF;
use facet_geometry::vector::Vector2F;

bitflags! {
    /// Bookkeeping flags carried by clipped edges.
    pub struct EdgeFlags: u8 {
        /// The edge starts or ends at a fake corner, a synthetic point on the clip line that
        /// projected edges are routed through so that projections of neighboring edges cancel.
        const FAKE_CORNER = 0x01;
        /// The edge is the projection of an edge from the other side of a clip.
        const PROJECTED = 0x02;
    }
}

/// A directed line segment. Edges are immutable once created.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearEdge {
    pub start: Vector2F,
    pub end: Vector2F,
    pub flags: EdgeFlags,
}

impl LinearEdge {
    #[inline]
    pub fn new(start: Vector2F, end: Vector2F) -> LinearEdge {
        LinearEdge { start, end, flags: EdgeFlags::empty() }
    }

    #[inline]
    pub fn with_flags(start: Vector2F, end: Vector2F, flags: EdgeFlags) -> LinearEdge {
        LinearEdge { start, end, flags }
    }

    #[inline]
    pub fn is_fake_corner(&self) -> bool {
        self.flags.contains(EdgeFlags::FAKE_CORNER)
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub fn reversed(&self) -> LinearEdge {
        LinearEdge { start: self.end, end: self.start, flags: self.flags }
    }

    #[inline]
    pub fn segment(&self) -> LineSegment2F {
        LineSegment2F::new(self.start, self.end)
    }

    #[inline]
    pub fn bounds(&self) -> RectF {
        self.segment().bounds()
    }

    /// Twice this edge's contribution to the signed area of the region it bounds.
    #[inline]
    pub fn shoelace(&self) -> f64 {
        self.start.det(self.end)
    }

    /// Six times the area-weighted centroid contribution of this edge.
    #[inline]
    pub fn centroid_partial(&self) -> Vector2F {
        (self.start + self.end).scale(self.shoelace())
    }
}

/// Converts closed polygon loops into their edges, skipping zero-length edges.
pub fn polygons_to_edges(polygons: &[Vec<Vector2F>]) -> Vec<LinearEdge> {
    let mut edges = vec![];
    for polygon in polygons {
        for (index, &start) in polygon.iter().enumerate() {
            let end = polygon[(index + 1) % polygon.len()];
            if start != end {
                edges.push(LinearEdge::new(start, end));
            }
        }
    }
    edges
}

/// Signed area of an edge soup (counterclockwise positive).
pub fn edges_area(edges: &[LinearEdge]) -> f64 {
    0.5 * edges.iter().map(LinearEdge::shoelace).sum::<f64>()
}

/// Area-weighted centroid of an edge soup whose signed area is `area`.
pub fn edges_centroid(edges: &[LinearEdge], area: f64) -> Vector2F {
    let sum = edges.iter().fold(Vector2F::zero(), |sum, edge| sum + edge.centroid_partial());
    sum.scale(1.0 / (6.0 * area))
}

/// Signed area of a set of closed polygon loops (counterclockwise positive).
pub fn polygons_area(polygons: &[Vec<Vector2F>]) -> f64 {
    let mut sum = 0.0;
    for polygon in polygons {
        for (index, &start) in polygon.iter().enumerate() {
            sum += start.det(polygon[(index + 1) % polygon.len()]);
        }
    }
    0.5 * sum
}

pub fn polygons_centroid(polygons: &[Vec<Vector2F>], area: f64) -> Vector2F {
    let mut sum = Vector2F::zero();
    for polygon in polygons {
        for (index, &start) in polygon.iter().enumerate() {
            let end = polygon[(index + 1) % polygon.len()];
            sum += (start + end).scale(start.det(end));
        }
    }
    sum.scale(1.0 / (6.0 * area))
}

/// An arc of a clip circle, from `start_angle` to `end_angle` in the given direction.
///
/// Arcs are tessellated into `LinearEdge`s against a shared `CriticalAngles` list; see the
/// `circular` module.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircularEdge {
    pub start_angle: f64,
    pub end_angle: f64,
    pub counter_clockwise: bool,
}

impl CircularEdge {
    #[inline]
    pub fn new(start_angle: f64, end_angle: f64, counter_clockwise: bool) -> CircularEdge {
        CircularEdge { start_angle, end_angle, counter_clockwise }
    }

    #[inline]
    pub fn reversed(&self) -> CircularEdge {
        CircularEdge::new(self.end_angle, self.start_angle, !self.counter_clockwise)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start_angle == self.end_angle
    }
}
