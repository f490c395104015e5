// facet/arrangement/src/mesh.rs
//
// Copyright © 2024 The Facet Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The half-edge mesh of the arrangement.

use crate::rational::{integer_rational, RationalPoint};
use crate::split::SplitSegment;
use crate::winding::WindingMap;
use facet_geometry::vector::Vector2I;
use fxhash::FxHashMap;
use malachite::Rational;
use std::cmp::Ordering;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct HalfEdgeId(pub u32);

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct BoundaryId(pub u32);

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct FaceId(pub u32);

impl HalfEdgeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl BoundaryId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl FaceId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One direction of a segment. Its face lies to its left.
#[derive(Clone, Debug)]
pub struct RationalHalfEdge {
    pub p0: RationalPoint,
    pub p1: RationalPoint,
    pub reversed: HalfEdgeId,
    /// The next half-edge counterclockwise around the face on the left.
    pub next: HalfEdgeId,
    pub previous: HalfEdgeId,
    /// The winding of the left face minus the winding of the right face.
    pub winding_map: WindingMap,
    pub boundary: Option<BoundaryId>,
    pub face: Option<FaceId>,
    direction: Vector2I,
    /// 0 to 3: the quadrant of `direction`, each half-open so that angle 0 is in quadrant 0.
    discriminator: u8,
    /// Increasing with angle within the quadrant.
    slope: Rational,
}

impl RationalHalfEdge {
    fn new(p0: RationalPoint,
           p1: RationalPoint,
           direction: Vector2I,
           winding_map: WindingMap,
           reversed: HalfEdgeId)
           -> RationalHalfEdge {
        let (discriminator, slope) = angle_key(direction);
        RationalHalfEdge {
            p0,
            p1,
            reversed,
            next: reversed,
            previous: reversed,
            winding_map,
            boundary: None,
            face: None,
            direction,
            discriminator,
            slope,
        }
    }

    #[inline]
    pub fn direction(&self) -> Vector2I {
        self.direction
    }

    /// Compares half-edges leaving the same vertex by counterclockwise angle from +x.
    #[inline]
    fn angle_cmp(&self, other: &RationalHalfEdge) -> Ordering {
        self.discriminator.cmp(&other.discriminator).then_with(|| self.slope.cmp(&other.slope))
    }
}

/// Classifies a direction into a quadrant and a slope that increases monotonically with angle
/// inside it.
fn angle_key(direction: Vector2I) -> (u8, Rational) {
    let (dx, dy) = (direction.x() as i128, direction.y() as i128);
    let ratio = |numerator: i128, denominator: i128| {
        integer_rational(numerator) / integer_rational(denominator)
    };
    if dx > 0 && dy >= 0 {
        (0, ratio(dy, dx))
    } else if dx <= 0 && dy > 0 {
        (1, ratio(-dx, dy))
    } else if dx < 0 && dy <= 0 {
        (2, ratio(dy, dx))
    } else {
        (3, ratio(-dx, dy))
    }
}

/// The outgoing half-edges of one vertex, as a range of `HalfEdgeMesh::sorted`.
#[derive(Clone, Debug)]
struct VertexStar {
    start: usize,
    end: usize,
}

#[derive(Clone, Debug, Default)]
pub struct HalfEdgeMesh {
    pub half_edges: Vec<RationalHalfEdge>,
    /// Every half-edge, grouped by start vertex and sorted by angle within each vertex.
    sorted: Vec<HalfEdgeId>,
    stars: FxHashMap<RationalPoint, VertexStar>,
}

impl HalfEdgeMesh {
    /// Builds the mesh from split segments. Coincident segments are merged, and segments whose
    /// merged winding is zero are dropped since they separate identically wound regions.
    pub fn assemble(segments: Vec<SplitSegment>) -> HalfEdgeMesh {
        let mut segments: Vec<SplitSegment> =
            segments.into_iter().map(SplitSegment::canonicalized).collect();
        segments.sort_by(|a, b| a.p0.cmp(&b.p0).then_with(|| a.p1.cmp(&b.p1)));

        let mut merged: Vec<SplitSegment> = vec![];
        for segment in segments {
            match merged.last_mut() {
                Some(last) if last.p0 == segment.p0 && last.p1 == segment.p1 => {
                    last.winding_map += &segment.winding_map;
                }
                _ => merged.push(segment),
            }
        }
        let dropped = merged.len();
        merged.retain(|segment| !segment.winding_map.is_zero());
        debug!("merged segments: {} kept, {} zero-winding dropped",
               merged.len(),
               dropped - merged.len());

        let mut half_edges = Vec::with_capacity(merged.len() * 2);
        for (index, segment) in merged.into_iter().enumerate() {
            let (forward, reverse) = (HalfEdgeId(2 * index as u32), HalfEdgeId(2 * index as u32 + 1));
            let negated = -&segment.winding_map;
            half_edges.push(RationalHalfEdge::new(segment.p0.clone(),
                                                  segment.p1.clone(),
                                                  segment.direction,
                                                  segment.winding_map,
                                                  reverse));
            half_edges.push(RationalHalfEdge::new(segment.p1,
                                                  segment.p0,
                                                  -segment.direction,
                                                  negated,
                                                  forward));
        }

        let mut sorted: Vec<HalfEdgeId> = (0..half_edges.len() as u32).map(HalfEdgeId).collect();
        sorted.sort_by(|&a, &b| {
            let (edge_a, edge_b) = (&half_edges[a.index()], &half_edges[b.index()]);
            edge_a.p0
                  .quick_cmp(&edge_b.p0)
                  .then_with(|| edge_a.angle_cmp(edge_b))
                  .then(a.cmp(&b))
        });

        let mut mesh = HalfEdgeMesh { half_edges, sorted, stars: FxHashMap::default() };
        mesh.link();
        mesh
    }

    /// Connects `next` pointers: arriving at a vertex along a half-edge, the face continues
    /// along the outgoing half-edge immediately clockwise of the arrival's reverse.
    fn link(&mut self) {
        let mut start = 0;
        while start < self.sorted.len() {
            let point = self.half_edges[self.sorted[start].index()].p0.clone();
            let mut end = start + 1;
            while end < self.sorted.len() && self.half_edges[self.sorted[end].index()].p0 == point {
                end += 1;
            }

            for position in start..end {
                let a = self.sorted[position];
                let b = self.sorted[if position + 1 == end { start } else { position + 1 }];
                let arriving = self.half_edges[b.index()].reversed;
                self.half_edges[arriving.index()].next = a;
                self.half_edges[a.index()].previous = arriving;
            }

            self.stars.insert(point, VertexStar { start, end });
            start = end;
        }
    }

    #[inline]
    pub fn half_edge(&self, id: HalfEdgeId) -> &RationalHalfEdge {
        &self.half_edges[id.index()]
    }

    /// The half-edges leaving `point`, in counterclockwise order starting from angle 0.
    pub fn outgoing(&self, point: &RationalPoint) -> &[HalfEdgeId] {
        match self.stars.get(point) {
            Some(star) => &self.sorted[star.start..star.end],
            None => &[],
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.stars.len()
    }
}

#[cfg(test)]
mod test {
    use super::{angle_key, HalfEdgeMesh};
    use crate::rational::RationalPoint;
    use crate::split::SplitSegment;
    use crate::winding::WindingMap;
    use facet_content::program::PathId;
    use facet_geometry::vector::{vec2i, Vector2I};

    fn segment(from: Vector2I, to: Vector2I, path: u32) -> SplitSegment {
        SplitSegment {
            p0: RationalPoint::from_integer(from),
            p1: RationalPoint::from_integer(to),
            winding_map: WindingMap::single(PathId(path), 1),
            direction: to - from,
        }
    }

    fn square(path: u32) -> Vec<SplitSegment> {
        let corners = [vec2i(0, 0), vec2i(2, 0), vec2i(2, 2), vec2i(0, 2)];
        (0..4).map(|index| segment(corners[index], corners[(index + 1) % 4], path)).collect()
    }

    #[test]
    fn test_angle_order() {
        let directions = [vec2i(1, 0), vec2i(3, 1), vec2i(0, 1), vec2i(-2, 1), vec2i(-1, 0),
                          vec2i(-1, -5), vec2i(0, -1), vec2i(4, -1)];
        let keys: Vec<_> = directions.iter().map(|&direction| angle_key(direction)).collect();
        for pair in keys.windows(2) {
            assert!(pair[0] < pair[1], "{:?} should precede {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_square_links() {
        let mesh = HalfEdgeMesh::assemble(square(0));
        assert_eq!(mesh.half_edges.len(), 8);
        assert_eq!(mesh.vertex_count(), 4);
        for (index, half_edge) in mesh.half_edges.iter().enumerate() {
            let reversed = &mesh.half_edges[half_edge.reversed.index()];
            assert_eq!(reversed.reversed.index(), index);
            assert_eq!(reversed.winding_map, -&half_edge.winding_map);
            assert_eq!(mesh.half_edge(half_edge.next).p0, half_edge.p1);
            assert_eq!(mesh.half_edge(half_edge.previous).next.index(), index);
        }

        // Following `next` from the bottom edge walks the square counterclockwise.
        let bottom = mesh.half_edges
                         .iter()
                         .position(|edge| edge.direction() == vec2i(2, 0))
                         .unwrap();
        let mut current = mesh.half_edges[bottom].next;
        let mut steps = 1;
        while current.index() != bottom {
            current = mesh.half_edge(current).next;
            steps += 1;
        }
        assert_eq!(steps, 4);
    }

    #[test]
    fn test_canceling_segments_dropped() {
        let mut segments = square(0);
        segments.extend(square(0).into_iter().map(|segment| {
            SplitSegment { winding_map: -&segment.winding_map, ..segment }
        }));
        assert!(HalfEdgeMesh::assemble(segments).half_edges.is_empty());

        let mut doubled = square(0);
        doubled.extend(square(1));
        let mesh = HalfEdgeMesh::assemble(doubled);
        assert_eq!(mesh.half_edges.len(), 8);
        assert_eq!(mesh.half_edges[0].winding_map.iter().count(), 2);
    }
}
