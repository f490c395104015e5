// facet/content/src/face.rs
//
// Copyright © 2024 The Facet Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Faces that can be clipped, measured, and transformed.

use crate::clip;
use crate::edge::{self, LinearEdge};
use arrayvec::ArrayVec;
use facet_geometry::rect::RectF;
use facet_geometry::transform2d::Transform2F;
use facet_geometry::vector::Vector2F;
use std::cmp::Ordering;
use std::fmt::Debug;

/// A region of the plane that the accumulator can subdivide.
///
/// Implementations must keep clipping area-preserving: the two halves of a binary clip sum to
/// the area of the original face.
pub trait ClippableFace: Clone + Debug + Send + Sync {
    /// The signed area (counterclockwise positive).
    fn area(&self) -> f64;

    /// The area-weighted centroid, given the face's `area`.
    fn centroid(&self, area: f64) -> Vector2F;

    fn bounds(&self) -> RectF;

    /// Splits at `x`, returning the parts with smaller and larger x. `fake_corner_y` gives the
    /// fake corner used by implementations that route projected edges.
    fn binary_x_clip(&self, x: f64, fake_corner_y: f64) -> (Self, Self);

    fn binary_y_clip(&self, y: f64, fake_corner_x: f64) -> (Self, Self);

    fn bounds_clip(&self, bounds: RectF) -> Self;

    fn transformed(&self, transform: &Transform2F) -> Self;

    fn to_edged(&self) -> EdgedFace;

    fn is_empty(&self) -> bool;
}

/// A face stored as closed polygon loops. Holes are loops with opposite orientation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PolygonalFace {
    pub polygons: Vec<Vec<Vector2F>>,
}

impl PolygonalFace {
    #[inline]
    pub fn new(polygons: Vec<Vec<Vector2F>>) -> PolygonalFace {
        PolygonalFace { polygons }
    }

    /// Concatenates the loops of two faces. The result covers the sum of both regions.
    pub fn union(mut self, other: PolygonalFace) -> PolygonalFace {
        self.polygons.extend(other.polygons);
        self
    }
}

impl ClippableFace for PolygonalFace {
    #[inline]
    fn area(&self) -> f64 {
        edge::polygons_area(&self.polygons)
    }

    #[inline]
    fn centroid(&self, area: f64) -> Vector2F {
        edge::polygons_centroid(&self.polygons, area)
    }

    fn bounds(&self) -> RectF {
        RectF::from_point_iter(self.polygons.iter().flatten().cloned())
    }

    fn binary_x_clip(&self, x: f64, _: f64) -> (PolygonalFace, PolygonalFace) {
        let (min, max) = clip::binary_x_clip_polygon(&self.polygons, x);
        (PolygonalFace::new(min), PolygonalFace::new(max))
    }

    fn binary_y_clip(&self, y: f64, _: f64) -> (PolygonalFace, PolygonalFace) {
        let (min, max) = clip::binary_y_clip_polygon(&self.polygons, y);
        (PolygonalFace::new(min), PolygonalFace::new(max))
    }

    fn bounds_clip(&self, bounds: RectF) -> PolygonalFace {
        PolygonalFace::new(clip::bounds_clip_polygon(&self.polygons, bounds))
    }

    fn transformed(&self, transform: &Transform2F) -> PolygonalFace {
        PolygonalFace::new(self.polygons.iter().map(|polygon| {
            polygon.iter().map(|&point| transform.transform_point(point)).collect()
        }).collect())
    }

    fn to_edged(&self) -> EdgedFace {
        EdgedFace::new(edge::polygons_to_edges(&self.polygons))
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }
}

/// A face stored as an unordered soup of directed edges.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EdgedFace {
    pub edges: Vec<LinearEdge>,
}

impl EdgedFace {
    #[inline]
    pub fn new(edges: Vec<LinearEdge>) -> EdgedFace {
        EdgedFace { edges }
    }

    /// Removes pairs of edges that are exact reverses of each other. Such pairs appear where two
    /// combined faces shared a boundary, and contribute nothing to area or coverage.
    pub fn remove_canceling_edges(&mut self) {
        let mut keyed: Vec<(EdgeKey, usize)> = self.edges
                                                   .iter()
                                                   .enumerate()
                                                   .map(|(index, edge)| (EdgeKey::new(edge), index))
                                                   .collect();
        keyed.sort_by(|a, b| a.0.compare(&b.0).then(a.1.cmp(&b.1)));

        let mut removed = vec![false; self.edges.len()];
        let mut start = 0;
        while start < keyed.len() {
            let mut end = start;
            while end < keyed.len() && keyed[end].0.same_segment(&keyed[start].0) {
                end += 1;
            }

            // Pair up forward and reverse instances of this segment.
            let group = &keyed[start..end];
            let forward: Vec<usize> =
                group.iter().filter(|entry| !entry.0.reversed).map(|entry| entry.1).collect();
            let reverse: Vec<usize> =
                group.iter().filter(|entry| entry.0.reversed).map(|entry| entry.1).collect();
            for (&a, &b) in forward.iter().zip(reverse.iter()) {
                removed[a] = true;
                removed[b] = true;
            }
            start = end;
        }

        let mut index = 0;
        self.edges.retain(|_| {
            let keep = !removed[index];
            index += 1;
            keep
        });
    }
}

/// An edge's endpoints in a canonical order, for matching it against its reverse.
#[derive(Clone, Copy, Debug)]
struct EdgeKey {
    min: (u64, u64),
    max: (u64, u64),
    reversed: bool,
}

impl EdgeKey {
    fn new(edge: &LinearEdge) -> EdgeKey {
        let start = (edge.start.x().to_bits(), edge.start.y().to_bits());
        let end = (edge.end.x().to_bits(), edge.end.y().to_bits());
        if start <= end {
            EdgeKey { min: start, max: end, reversed: false }
        } else {
            EdgeKey { min: end, max: start, reversed: true }
        }
    }

    #[inline]
    fn same_segment(&self, other: &EdgeKey) -> bool {
        self.min == other.min && self.max == other.max
    }

    fn compare(&self, other: &EdgeKey) -> Ordering {
        self.min
            .cmp(&other.min)
            .then(self.max.cmp(&other.max))
            .then(self.reversed.cmp(&other.reversed))
    }
}

impl ClippableFace for EdgedFace {
    #[inline]
    fn area(&self) -> f64 {
        edge::edges_area(&self.edges)
    }

    #[inline]
    fn centroid(&self, area: f64) -> Vector2F {
        edge::edges_centroid(&self.edges, area)
    }

    fn bounds(&self) -> RectF {
        RectF::from_point_iter(self.edges.iter().flat_map(|edge| {
            ArrayVec::from([edge.start, edge.end])
        }))
    }

    fn binary_x_clip(&self, x: f64, fake_corner_y: f64) -> (EdgedFace, EdgedFace) {
        let (min, max) = clip::binary_x_clip_edges(&self.edges, x, Some(fake_corner_y));
        (EdgedFace::new(min), EdgedFace::new(max))
    }

    fn binary_y_clip(&self, y: f64, fake_corner_x: f64) -> (EdgedFace, EdgedFace) {
        let (min, max) = clip::binary_y_clip_edges(&self.edges, y, Some(fake_corner_x));
        (EdgedFace::new(min), EdgedFace::new(max))
    }

    fn bounds_clip(&self, bounds: RectF) -> EdgedFace {
        EdgedFace::new(clip::bounds_clip_edges(&self.edges, bounds))
    }

    fn transformed(&self, transform: &Transform2F) -> EdgedFace {
        EdgedFace::new(self.edges.iter().map(|edge| {
            LinearEdge::with_flags(transform.transform_point(edge.start),
                                   transform.transform_point(edge.end),
                                   edge.flags)
        }).collect())
    }

    #[inline]
    fn to_edged(&self) -> EdgedFace {
        self.clone()
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Either face representation, chosen at run time.
#[derive(Clone, Debug, PartialEq)]
pub enum ClippableFaceKind {
    Polygonal(PolygonalFace),
    Edged(EdgedFace),
}

macro_rules! dispatch {
    ($self:expr, $face:ident => $body:expr) => {
        match *$self {
            ClippableFaceKind::Polygonal(ref $face) => $body,
            ClippableFaceKind::Edged(ref $face) => $body,
        }
    };
}

macro_rules! dispatch_pair {
    ($self:expr, $face:ident => $body:expr) => {
        match *$self {
            ClippableFaceKind::Polygonal(ref $face) => {
                let (min, max) = $body;
                (ClippableFaceKind::Polygonal(min), ClippableFaceKind::Polygonal(max))
            }
            ClippableFaceKind::Edged(ref $face) => {
                let (min, max) = $body;
                (ClippableFaceKind::Edged(min), ClippableFaceKind::Edged(max))
            }
        }
    };
}

impl ClippableFace for ClippableFaceKind {
    fn area(&self) -> f64 {
        dispatch!(self, face => face.area())
    }

    fn centroid(&self, area: f64) -> Vector2F {
        dispatch!(self, face => face.centroid(area))
    }

    fn bounds(&self) -> RectF {
        dispatch!(self, face => face.bounds())
    }

    fn binary_x_clip(&self, x: f64, fake_corner_y: f64) -> (ClippableFaceKind, ClippableFaceKind) {
        dispatch_pair!(self, face => face.binary_x_clip(x, fake_corner_y))
    }

    fn binary_y_clip(&self, y: f64, fake_corner_x: f64) -> (ClippableFaceKind, ClippableFaceKind) {
        dispatch_pair!(self, face => face.binary_y_clip(y, fake_corner_x))
    }

    fn bounds_clip(&self, bounds: RectF) -> ClippableFaceKind {
        match *self {
            ClippableFaceKind::Polygonal(ref face) => {
                ClippableFaceKind::Polygonal(face.bounds_clip(bounds))
            }
            ClippableFaceKind::Edged(ref face) => ClippableFaceKind::Edged(face.bounds_clip(bounds)),
        }
    }

    fn transformed(&self, transform: &Transform2F) -> ClippableFaceKind {
        match *self {
            ClippableFaceKind::Polygonal(ref face) => {
                ClippableFaceKind::Polygonal(face.transformed(transform))
            }
            ClippableFaceKind::Edged(ref face) => {
                ClippableFaceKind::Edged(face.transformed(transform))
            }
        }
    }

    fn to_edged(&self) -> EdgedFace {
        dispatch!(self, face => face.to_edged())
    }

    fn is_empty(&self) -> bool {
        dispatch!(self, face => face.is_empty())
    }
}
