// facet/arrangement/src/face.rs
//
// Copyright © 2024 The Facet Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Faces of the arrangement, and the assignment of holes to the faces containing them.

use crate::boundary::{BoundaryKind, RationalBoundary};
use crate::mesh::{BoundaryId, FaceId, HalfEdgeId, HalfEdgeMesh};
use crate::rational::RationalPoint;
use crate::winding::WindingMap;
use malachite::Rational;
use std::collections::BTreeMap;

/// A connected region of the plane with constant winding numbers.
#[derive(Clone, Debug, Default)]
pub struct RationalFace {
    /// The counterclockwise outer boundary, or `None` for the unbounded face.
    pub boundary: Option<BoundaryId>,
    /// Clockwise boundaries of the regions cut out of this face, in boundary order.
    pub holes: Vec<BoundaryId>,
    pub winding_map: WindingMap,
    /// For each adjacent face, this face's winding minus that face's winding.
    pub winding_map_map: BTreeMap<FaceId, WindingMap>,
}

impl RationalFace {
    #[inline]
    pub fn is_unbounded(&self) -> bool {
        self.boundary.is_none()
    }

    /// The outer boundary followed by the holes.
    pub fn boundaries(&self) -> impl Iterator<Item = BoundaryId> + '_ {
        self.boundary.into_iter().chain(self.holes.iter().cloned())
    }
}

#[derive(Clone, Copy, Debug)]
enum HoleParent {
    Face(FaceId),
    /// The face that contains another hole.
    Hole(BoundaryId),
    Unbounded,
}

#[derive(Clone, Debug)]
enum RayHit {
    Segment(HalfEdgeId),
    Vertex(RationalPoint),
}

/// Creates the faces: the unbounded face first, then one face per outer boundary in boundary
/// order, with every inner boundary attached as a hole. Returns the faces and the face of each
/// boundary (`None` for degenerate ones).
pub fn build_faces(mesh: &mut HalfEdgeMesh, boundaries: &[RationalBoundary])
                   -> (Vec<RationalFace>, Vec<Option<FaceId>>) {
    let mut faces = vec![RationalFace::default()];
    let mut boundary_faces = vec![None; boundaries.len()];
    for (index, boundary) in boundaries.iter().enumerate() {
        if boundary.kind == BoundaryKind::Outer {
            boundary_faces[index] = Some(FaceId(faces.len() as u32));
            faces.push(RationalFace {
                boundary: Some(BoundaryId(index as u32)),
                ..RationalFace::default()
            });
        }
    }

    let parents: Vec<(BoundaryId, HoleParent)> = boundaries
        .iter()
        .enumerate()
        .filter(|(_, boundary)| boundary.kind == BoundaryKind::Inner)
        .map(|(index, _)| {
            let hole = BoundaryId(index as u32);
            (hole, find_hole_parent(mesh, boundaries, &boundary_faces, hole))
        })
        .collect();

    let parent_of = |hole: BoundaryId| {
        parents.iter().find(|&&(other, _)| other == hole).map(|&(_, parent)| parent)
    };
    for &(hole, parent) in &parents {
        let mut parent = parent;
        let mut steps = 0;
        let face = loop {
            match parent {
                HoleParent::Face(face) => break face,
                HoleParent::Unbounded => break FaceId(0),
                HoleParent::Hole(other) => {
                    if let Some(face) = boundary_faces[other.index()] {
                        break face;
                    }
                    steps += 1;
                    if steps > parents.len() {
                        warn!("hole chain from boundary {:?} does not terminate", hole);
                        break FaceId(0);
                    }
                    parent = parent_of(other).unwrap_or(HoleParent::Unbounded);
                }
            }
        };
        boundary_faces[hole.index()] = Some(face);
        faces[face.index()].holes.push(hole);
    }

    for (boundary, face) in boundaries.iter().zip(boundary_faces.iter()) {
        for &id in &boundary.half_edges {
            mesh.half_edges[id.index()].face = *face;
        }
    }

    let unenclosed = faces[0].holes.len();
    if unenclosed > 1 {
        debug!("{} boundaries are not enclosed by any face", unenclosed);
    }
    (faces, boundary_faces)
}

/// Casts a ray in -x from the hole's minimal vertex and returns what lies immediately to its
/// left: the face of the nearest boundary hit, or the unbounded face if nothing is hit.
fn find_hole_parent(mesh: &HalfEdgeMesh,
                    boundaries: &[RationalBoundary],
                    boundary_faces: &[Option<FaceId>],
                    hole: BoundaryId)
                    -> HoleParent {
    let origin = &boundaries[hole.index()].minimal_point;
    let approx = origin.to_f64();

    let mut best: Option<(Rational, RayHit)> = None;
    let mut consider = |x: Rational, hit: RayHit| {
        if x >= origin.x {
            return;
        }
        let closer = match best {
            Some((ref best_x, _)) => x > *best_x,
            None => true,
        };
        if closer {
            best = Some((x, hit));
        }
    };

    for (index, boundary) in boundaries.iter().enumerate() {
        if index == hole.index() || boundary.kind == BoundaryKind::Degenerate {
            continue;
        }
        if boundary.bounds.min_x() > approx.x() ||
                boundary.bounds.min_y() > approx.y() ||
                boundary.bounds.max_y() < approx.y() {
            continue;
        }

        for &id in &boundary.half_edges {
            let half_edge = mesh.half_edge(id);
            let (a, b) = (&half_edge.p0, &half_edge.p1);
            if a.y == b.y {
                if a.y == origin.y {
                    let nearer = if a.x > b.x { a } else { b };
                    consider(nearer.x.clone(), RayHit::Vertex(nearer.clone()));
                }
                continue;
            }

            let (low, high) = if a.y < b.y { (a, b) } else { (b, a) };
            if origin.y < low.y || origin.y > high.y {
                continue;
            }
            if origin.y == a.y {
                consider(a.x.clone(), RayHit::Vertex(a.clone()));
            } else if origin.y == b.y {
                consider(b.x.clone(), RayHit::Vertex(b.clone()));
            } else {
                let x = &a.x + (&origin.y - &a.y) * (&b.x - &a.x) / (&b.y - &a.y);
                consider(x, RayHit::Segment(id));
            }
        }
    }

    let half_edge = match best {
        None => return HoleParent::Unbounded,
        Some((_, RayHit::Segment(id))) => {
            // The downward direction has the ray origin on its left.
            let half_edge = mesh.half_edge(id);
            if half_edge.p1.y < half_edge.p0.y { id } else { half_edge.reversed }
        }
        Some((_, RayHit::Vertex(point))) => {
            // The first outgoing edge counterclockwise from +x; its reverse has the sector
            // containing +x on its left.
            match mesh.outgoing(&point).first() {
                Some(&first) => mesh.half_edge(first).reversed,
                None => return HoleParent::Unbounded,
            }
        }
    };

    let boundary = match mesh.half_edge(half_edge).boundary {
        Some(boundary) => boundary,
        None => return HoleParent::Unbounded,
    };
    match boundaries[boundary.index()].kind {
        BoundaryKind::Outer => match boundary_faces[boundary.index()] {
            Some(face) => HoleParent::Face(face),
            None => HoleParent::Unbounded,
        },
        BoundaryKind::Inner => HoleParent::Hole(boundary),
        BoundaryKind::Degenerate => {
            warn!("hole ray from boundary {:?} hit a degenerate boundary", hole);
            HoleParent::Unbounded
        }
    }
}
