// facet/arrangement/src/intersect.rs
//
// Copyright © 2024 The Facet Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Exact pairwise intersection of integer edges.

use crate::concurrent::executor::Executor;
use crate::integer::{EdgeIntersection, IntegerEdge};
use crate::rational::{rational, RationalPoint};
use facet_geometry::vector::Vector2I;

#[inline]
fn wide(vector: Vector2I) -> (i128, i128) {
    (vector.x() as i128, vector.y() as i128)
}

#[inline]
fn cross(a: (i128, i128), b: (i128, i128)) -> i128 {
    a.0 * b.1 - a.1 * b.0
}

#[inline]
fn dot(a: (i128, i128), b: (i128, i128)) -> i128 {
    a.0 * b.0 + a.1 * b.1
}

#[inline]
fn sub(a: (i128, i128), b: (i128, i128)) -> (i128, i128) {
    (a.0 - b.0, a.1 - b.1)
}

/// Whether two edges' bounding boxes overlap closely enough for them to meet strictly inside
/// either edge. Touching boxes only matter if one of the edges is axis-aligned, since otherwise
/// the shared box side meets each edge only at an endpoint.
fn bounds_overlap(a: &IntegerEdge, b: &IntegerEdge) -> bool {
    if a.is_axis_aligned() || b.is_axis_aligned() {
        a.min.x() <= b.max.x() && b.min.x() <= a.max.x() &&
            a.min.y() <= b.max.y() && b.min.y() <= a.max.y()
    } else {
        a.min.x() < b.max.x() && b.min.x() < a.max.x() &&
            a.min.y() < b.max.y() && b.min.y() < a.max.y()
    }
}

/// Finds where `a` and `b` meet, recording each meeting point strictly inside an edge against
/// that edge's index.
fn intersect_pair(a: &IntegerEdge,
                  a_index: usize,
                  b: &IntegerEdge,
                  b_index: usize,
                  found: &mut Vec<(usize, EdgeIntersection)>) {
    let (p0, dp) = (wide(a.start), wide(a.delta()));
    let (q0, dq) = (wide(b.start), wide(b.delta()));
    let offset = sub(q0, p0);
    let mut denominator = cross(dp, dq);

    if denominator == 0 {
        if cross(offset, dp) != 0 {
            return;
        }
        // Collinear: each edge is split at the other's endpoints that fall inside it.
        let a_length = dot(dp, dp);
        for &endpoint in &[b.start, b.end] {
            let numerator = dot(sub(wide(endpoint), p0), dp);
            if numerator > 0 && numerator < a_length {
                found.push((a_index, EdgeIntersection {
                    t: rational(numerator, a_length),
                    point: RationalPoint::from_integer(endpoint),
                }));
            }
        }
        let b_length = dot(dq, dq);
        for &endpoint in &[a.start, a.end] {
            let numerator = dot(sub(wide(endpoint), q0), dq);
            if numerator > 0 && numerator < b_length {
                found.push((b_index, EdgeIntersection {
                    t: rational(numerator, b_length),
                    point: RationalPoint::from_integer(endpoint),
                }));
            }
        }
        return;
    }

    let mut t_numerator = cross(offset, dq);
    let mut s_numerator = cross(offset, dp);
    if denominator < 0 {
        denominator = -denominator;
        t_numerator = -t_numerator;
        s_numerator = -s_numerator;
    }
    if t_numerator < 0 || t_numerator > denominator ||
            s_numerator < 0 || s_numerator > denominator {
        return;
    }

    let t_inside = t_numerator > 0 && t_numerator < denominator;
    let s_inside = s_numerator > 0 && s_numerator < denominator;
    if !t_inside && !s_inside {
        return;
    }

    let point = RationalPoint::new(rational(p0.0 * denominator + dp.0 * t_numerator, denominator),
                                   rational(p0.1 * denominator + dp.1 * t_numerator, denominator));
    if t_inside {
        found.push((a_index, EdgeIntersection {
            t: rational(t_numerator, denominator),
            point: point.clone(),
        }));
    }
    if s_inside {
        found.push((b_index, EdgeIntersection { t: rational(s_numerator, denominator), point }));
    }
}

/// Records every intersection between the edges on the edges themselves. Candidate pairs are
/// found by a sweep over edges sorted by minimum x; the per-edge scans run on `executor`.
pub fn intersect_edges<E>(edges: &mut [IntegerEdge], executor: &E) where E: Executor {
    let mut order: Vec<usize> = (0..edges.len()).collect();
    order.sort_by_key(|&index| (edges[index].min.x(), index));

    let found = {
        let (edges, order) = (&*edges, &order);
        executor.flatten_into_vector(order.len(), |position| {
            let (a_index, mut found) = (order[position], vec![]);
            let a = &edges[a_index];
            for &b_index in &order[(position + 1)..] {
                let b = &edges[b_index];
                if b.min.x() > a.max.x() {
                    break;
                }
                if bounds_overlap(a, b) {
                    intersect_pair(a, a_index, b, b_index, &mut found);
                }
            }
            found
        })
    };

    let count = found.len();
    for (index, intersection) in found {
        edges[index].intersections.push(intersection);
    }
    debug!("found {} edge intersections among {} edges", count, edges.len());
}
