// facet/arrangement/src/split.rs
//
// Copyright © 2024 The Facet Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Splitting of intersected edges into segments that meet only at endpoints.

use crate::integer::IntegerEdge;
use crate::rational::RationalPoint;
use crate::winding::WindingMap;
use facet_geometry::vector::Vector2I;

/// A piece of an input edge between consecutive split points.
#[derive(Clone, Debug)]
pub struct SplitSegment {
    pub p0: RationalPoint,
    pub p1: RationalPoint,
    pub winding_map: WindingMap,
    /// The direction of the unsplit edge. Exact and small, so it is used for angular ordering.
    pub direction: Vector2I,
}

impl SplitSegment {
    /// Flips the segment so that `p0 < p1`, negating its winding.
    pub fn canonicalized(self) -> SplitSegment {
        if self.p0 <= self.p1 {
            return self;
        }
        SplitSegment {
            p0: self.p1,
            p1: self.p0,
            winding_map: -&self.winding_map,
            direction: -self.direction,
        }
    }
}

/// Splits every edge at its recorded intersections, in order of increasing parameter.
pub fn split_edges(edges: &mut [IntegerEdge]) -> Vec<SplitSegment> {
    let mut segments = vec![];
    for edge in edges {
        edge.intersections.sort_by(|a, b| a.t.cmp(&b.t));
        edge.intersections.dedup_by(|a, b| a.t == b.t);

        let winding_map = WindingMap::single(edge.path, 1);
        let direction = edge.delta();
        let mut start = RationalPoint::from_integer(edge.start);
        for intersection in &edge.intersections {
            segments.push(SplitSegment {
                p0: start,
                p1: intersection.point.clone(),
                winding_map: winding_map.clone(),
                direction,
            });
            start = intersection.point.clone();
        }
        segments.push(SplitSegment {
            p0: start,
            p1: RationalPoint::from_integer(edge.end),
            winding_map,
            direction,
        });
    }
    segments
}

#[cfg(test)]
mod test {
    use super::split_edges;
    use crate::concurrent::executor::SequentialExecutor;
    use crate::integer::IntegerEdge;
    use crate::intersect::intersect_edges;
    use crate::rational::RationalPoint;
    use facet_content::program::PathId;
    use facet_geometry::vector::vec2i;

    #[test]
    fn test_split_at_sorted_intersections() {
        let mut edges = vec![
            IntegerEdge::new(PathId(0), vec2i(0, 0), vec2i(8, 0)),
            IntegerEdge::new(PathId(1), vec2i(6, -1), vec2i(6, 1)),
            IntegerEdge::new(PathId(1), vec2i(2, -1), vec2i(2, 1)),
            IntegerEdge::new(PathId(1), vec2i(2, 1), vec2i(2, -1)),
        ];
        intersect_edges(&mut edges, &SequentialExecutor);
        let segments = split_edges(&mut edges);
        let horizontal: Vec<_> = segments.iter().filter(|segment| segment.direction.y() == 0)
                                                .collect();
        assert_eq!(horizontal.len(), 3);
        assert_eq!(horizontal[0].p1, RationalPoint::from_integer(vec2i(2, 0)));
        assert_eq!(horizontal[1].p1, RationalPoint::from_integer(vec2i(6, 0)));
        assert_eq!(segments.len(), 3 + 2 + 2 + 2);
    }
}
