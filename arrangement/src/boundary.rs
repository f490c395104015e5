// facet/arrangement/src/boundary.rs
//
// Copyright © 2024 The Facet Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Boundary cycles of the half-edge mesh.

use crate::mesh::{BoundaryId, HalfEdgeId, HalfEdgeMesh};
use crate::rational::{integer_rational, RationalPoint};
use facet_geometry::rect::RectF;
use facet_geometry::vector::Vector2F;
use malachite::num::basic::traits::Zero;
use malachite::Rational;

/// Boundaries whose floating-point area is within rounding error of this are checked exactly.
const AREA_EPSILON: f64 = 1e-8;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BoundaryKind {
    /// Counterclockwise: the outer boundary of a bounded face.
    Outer,
    /// Clockwise: a hole in some face, or the boundary of the unbounded face.
    Inner,
    /// Encloses no area; has no role in the face structure.
    Degenerate,
}

#[derive(Clone, Debug)]
pub struct RationalBoundary {
    pub half_edges: Vec<HalfEdgeId>,
    pub signed_area: f64,
    pub bounds: RectF,
    /// The vertex with the smallest x, then the smallest y.
    pub minimal_point: RationalPoint,
    pub kind: BoundaryKind,
}

/// Follows `next` pointers from every unvisited half-edge, recording each cycle.
pub fn trace_boundaries(mesh: &mut HalfEdgeMesh) -> Vec<RationalBoundary> {
    let mut boundaries = vec![];
    for start in 0..mesh.half_edges.len() {
        if mesh.half_edges[start].boundary.is_some() {
            continue;
        }

        let id = BoundaryId(boundaries.len() as u32);
        let mut half_edges = vec![];
        let mut current = HalfEdgeId(start as u32);
        loop {
            half_edges.push(current);
            let half_edge = &mut mesh.half_edges[current.index()];
            debug_assert!(half_edge.boundary.is_none(), "boundary from {} does not close", start);
            half_edge.boundary = Some(id);
            current = half_edge.next;
            if current.index() == start {
                break;
            }
        }
        boundaries.push(RationalBoundary::new(mesh, half_edges));
    }
    boundaries
}

impl RationalBoundary {
    fn new(mesh: &HalfEdgeMesh, half_edges: Vec<HalfEdgeId>) -> RationalBoundary {
        let (mut twice_area, mut largest_term) = (0.0, 0.0f64);
        let mut bounds = RectF::nothing();
        let mut minimal_point = mesh.half_edge(half_edges[0]).p0.clone();
        for &id in &half_edges {
            let half_edge = mesh.half_edge(id);
            let (p0, p1) = (half_edge.p0.to_f64(), half_edge.p1.to_f64());
            let term = p0.det(p1);
            twice_area += term;
            let magnitude = p0.x().abs() * p1.y().abs() + p0.y().abs() * p1.x().abs();
            largest_term = largest_term.max(magnitude);
            bounds = bounds.union_point(p0);
            if half_edge.p0 < minimal_point {
                minimal_point = half_edge.p0.clone();
            }
        }
        let signed_area = 0.5 * twice_area;

        let tolerance = AREA_EPSILON +
            4.0 * f64::EPSILON * largest_term * half_edges.len() as f64;
        let kind = if signed_area.abs() > tolerance {
            if signed_area > 0.0 { BoundaryKind::Outer } else { BoundaryKind::Inner }
        } else {
            let exact = exact_twice_area(mesh, &half_edges);
            if exact > Rational::ZERO {
                BoundaryKind::Outer
            } else if exact < Rational::ZERO {
                BoundaryKind::Inner
            } else {
                BoundaryKind::Degenerate
            }
        };

        // Rounding can move approximate coordinates by up to half an ulp.
        let magnitude = bounds.origin().x().abs()
                              .max(bounds.origin().y().abs())
                              .max(bounds.lower_right().x().abs())
                              .max(bounds.lower_right().y().abs());
        let slack = (magnitude + 1.0) * 1e-12;
        let bounds = bounds.dilate(Vector2F::splat(slack));
        RationalBoundary { half_edges, signed_area, bounds, minimal_point, kind }
    }
}

fn exact_twice_area(mesh: &HalfEdgeMesh, half_edges: &[HalfEdgeId]) -> Rational {
    let mut sum = integer_rational(0);
    for &id in half_edges {
        let half_edge = mesh.half_edge(id);
        let (p0, p1) = (&half_edge.p0, &half_edge.p1);
        sum += &p0.x * &p1.y - &p0.y * &p1.x;
    }
    sum
}
