// facet/arrangement/src/lib.rs
//
// Copyright © 2024 The Facet Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Exact planar arrangements.
//!
//! Integer edges from any number of paths are intersected exactly, split into non-crossing
//! segments, and assembled into a half-edge mesh. Faces of the mesh are regions with constant
//! winding number for every path; each carries a `WindingMap` of those numbers.

#[macro_use]
extern crate log;

use crate::boundary::RationalBoundary;
use crate::concurrent::executor::Executor;
use crate::face::RationalFace;
use crate::integer::IntegerEdge;
use crate::mesh::{BoundaryId, FaceId, HalfEdgeMesh, RationalHalfEdge};
use facet_content::edge::LinearEdge;
use facet_geometry::transform2d::Transform2F;
use facet_geometry::vector::Vector2F;

pub mod boundary;
pub mod concurrent;
pub mod face;
pub mod integer;
pub mod intersect;
pub mod mesh;
pub mod propagate;
pub mod rational;
pub mod split;
pub mod winding;

#[derive(Clone, Debug)]
pub struct Arrangement {
    pub mesh: HalfEdgeMesh,
    pub boundaries: Vec<RationalBoundary>,
    /// The unbounded face is always first.
    pub faces: Vec<RationalFace>,
}

impl Arrangement {
    pub fn build<E>(mut edges: Vec<IntegerEdge>, executor: &E) -> Arrangement where E: Executor {
        intersect::intersect_edges(&mut edges, executor);
        let segments = split::split_edges(&mut edges);
        let mut mesh = HalfEdgeMesh::assemble(segments);
        let boundaries = boundary::trace_boundaries(&mut mesh);
        let (mut faces, _) = face::build_faces(&mut mesh, &boundaries);
        propagate::compute_winding_map_maps(&mesh, &mut faces);
        propagate::propagate_windings(&mut faces);

        debug!("arrangement: {} edges, {} vertices, {} half-edges, {} boundaries, {} faces",
               edges.len(),
               mesh.vertex_count(),
               mesh.half_edges.len(),
               boundaries.len(),
               faces.len());
        Arrangement { mesh, boundaries, faces }
    }

    #[inline]
    pub fn half_edges(&self) -> &[RationalHalfEdge] {
        &self.mesh.half_edges
    }

    #[inline]
    pub fn unbounded_face(&self) -> FaceId {
        FaceId(0)
    }

    #[inline]
    pub fn face(&self, face: FaceId) -> &RationalFace {
        &self.faces[face.index()]
    }

    pub fn bounded_faces(&self) -> impl Iterator<Item = (FaceId, &RationalFace)> + '_ {
        self.faces.iter().enumerate().skip(1).map(|(index, face)| (FaceId(index as u32), face))
    }

    /// The signed area of a bounded face in integer units, holes subtracted.
    pub fn face_area(&self, face: FaceId) -> f64 {
        self.face(face).boundaries().map(|id| self.boundaries[id.index()].signed_area).sum()
    }

    pub fn boundary_polygon(&self, boundary: BoundaryId, transform: &Transform2F)
                            -> Vec<Vector2F> {
        self.boundaries[boundary.index()]
            .half_edges
            .iter()
            .map(|&id| transform.transform_point(self.mesh.half_edge(id).p0.to_f64()))
            .collect()
    }

    /// The loops of a face, outer boundary first, mapped through `transform`. The unbounded
    /// face has only hole loops.
    pub fn face_polygon(&self, face: FaceId, transform: &Transform2F) -> Vec<Vec<Vector2F>> {
        self.face(face).boundaries().map(|id| self.boundary_polygon(id, transform)).collect()
    }

    pub fn face_edges(&self, face: FaceId, transform: &Transform2F) -> Vec<LinearEdge> {
        self.face(face).boundaries().flat_map(|id| {
            self.boundaries[id.index()].half_edges.iter().map(move |&half_edge| {
                let half_edge = self.mesh.half_edge(half_edge);
                LinearEdge::new(transform.transform_point(half_edge.p0.to_f64()),
                                transform.transform_point(half_edge.p1.to_f64()))
            })
        }).collect()
    }
}

#[cfg(test)]
mod test {
    use super::Arrangement;
    use crate::concurrent::executor::SequentialExecutor;
    use crate::concurrent::rayon::RayonExecutor;
    use crate::integer::IntegerEdge;
    use crate::mesh::FaceId;
    use crate::rational::RationalPoint;
    use facet_content::program::PathId;
    use facet_geometry::transform2d::Transform2F;
    use facet_geometry::util::approx_eq;
    use facet_geometry::vector::{vec2i, Vector2I};
    use quickcheck::{Arbitrary, Gen};

    fn path_edges(path: u32, points: &[(i32, i32)]) -> Vec<IntegerEdge> {
        (0..points.len()).filter_map(|index| {
            let (from, to) = (points[index], points[(index + 1) % points.len()]);
            if from == to {
                return None;
            }
            Some(IntegerEdge::new(PathId(path), vec2i(from.0, from.1), vec2i(to.0, to.1)))
        }).collect()
    }

    fn square(path: u32, min: (i32, i32), max: (i32, i32)) -> Vec<IntegerEdge> {
        path_edges(path, &[min, (max.0, min.1), max, (min.0, max.1)])
    }

    fn clockwise_square(path: u32, min: (i32, i32), max: (i32, i32)) -> Vec<IntegerEdge> {
        path_edges(path, &[min, (min.0, max.1), max, (max.0, min.1)])
    }

    fn check_invariants(arrangement: &Arrangement) {
        let half_edges = arrangement.half_edges();
        for (index, half_edge) in half_edges.iter().enumerate() {
            let reversed = &half_edges[half_edge.reversed.index()];
            assert_eq!(reversed.reversed.index(), index);
            assert_eq!(reversed.winding_map, -&half_edge.winding_map);
            let next = &half_edges[half_edge.next.index()];
            assert_eq!(next.p0, half_edge.p1);
            assert_eq!(next.face, half_edge.face);

            if let (Some(left), Some(right)) = (half_edge.face, reversed.face) {
                let left = &arrangement.face(left).winding_map;
                let right = &arrangement.face(right).winding_map;
                assert_eq!(&(left - right), &half_edge.winding_map);
            }
        }
        assert!(arrangement.face(arrangement.unbounded_face()).winding_map.is_zero());
    }

    fn sorted_windings(arrangement: &Arrangement, path: u32) -> Vec<i32> {
        let mut windings: Vec<i32> = arrangement.bounded_faces()
                                                .map(|(_, face)| face.winding_map.get(PathId(path)))
                                                .collect();
        windings.sort();
        windings
    }

    #[test]
    fn test_overlapping_squares() {
        let mut edges = square(0, (0, 0), (4, 4));
        edges.extend(square(0, (2, 0), (6, 4)));
        let arrangement = Arrangement::build(edges, &SequentialExecutor);
        check_invariants(&arrangement);
        assert_eq!(sorted_windings(&arrangement, 0), vec![1, 1, 2]);
        for (face, _) in arrangement.bounded_faces() {
            assert_eq!(arrangement.face_area(face), 8.0);
        }
    }

    #[test]
    fn test_hole() {
        let mut edges = square(0, (0, 0), (8, 8));
        edges.extend(clockwise_square(0, (2, 2), (6, 6)));
        let arrangement = Arrangement::build(edges, &SequentialExecutor);
        check_invariants(&arrangement);
        assert_eq!(sorted_windings(&arrangement, 0), vec![0, 1]);

        let ring: Vec<FaceId> = arrangement.bounded_faces()
                                           .filter(|(_, face)| !face.holes.is_empty())
                                           .map(|(id, _)| id)
                                           .collect();
        assert_eq!(ring.len(), 1);
        assert_eq!(arrangement.face(ring[0]).winding_map.get(PathId(0)), 1);
        assert_eq!(arrangement.face_area(ring[0]), 48.0);
        assert_eq!(arrangement.face_polygon(ring[0], &Transform2F::default()).len(), 2);
    }

    #[test]
    fn test_nested_islands() {
        let mut edges = square(0, (0, 0), (12, 12));
        edges.extend(clockwise_square(0, (2, 2), (10, 10)));
        edges.extend(square(0, (4, 4), (8, 8)));
        let arrangement = Arrangement::build(edges, &SequentialExecutor);
        check_invariants(&arrangement);
        assert_eq!(sorted_windings(&arrangement, 0), vec![0, 1, 1]);
        assert_eq!(arrangement.face(arrangement.unbounded_face()).holes.len(), 1);
    }

    #[test]
    fn test_neighboring_islands_share_parent() {
        let mut edges = square(0, (0, 0), (20, 10));
        edges.extend(square(1, (2, 2), (6, 6)));
        edges.extend(square(1, (10, 2), (14, 6)));
        let arrangement = Arrangement::build(edges, &SequentialExecutor);
        check_invariants(&arrangement);
        let big = arrangement.bounded_faces()
                             .find(|(_, face)| face.winding_map.get(PathId(1)) == 0)
                             .unwrap();
        assert_eq!(big.1.holes.len(), 2);
        assert_eq!(arrangement.face_area(big.0), 200.0 - 32.0);
    }

    #[test]
    fn test_disjoint_paths_are_separate_holes_of_unbounded_face() {
        let mut edges = square(0, (0, 0), (2, 2));
        edges.extend(square(1, (5, 0), (7, 2)));
        let arrangement = Arrangement::build(edges, &SequentialExecutor);
        check_invariants(&arrangement);
        assert_eq!(arrangement.face(arrangement.unbounded_face()).holes.len(), 2);
    }

    fn single_holed_face(arrangement: &Arrangement, hole_point: (i32, i32)) -> FaceId {
        let holed: Vec<FaceId> = arrangement.bounded_faces()
                                            .filter(|(_, face)| !face.holes.is_empty())
                                            .map(|(id, _)| id)
                                            .collect();
        assert_eq!(holed.len(), 1);
        let face = arrangement.face(holed[0]);
        assert_eq!(face.holes.len(), 1);
        assert_eq!(arrangement.boundaries[face.holes[0].index()].minimal_point,
                   RationalPoint::from_integer(vec2i(hole_point.0, hole_point.1)));
        holed[0]
    }

    #[test]
    fn test_hole_ray_through_parent_vertex() {
        let mut edges = path_edges(0, &[(0, 5), (5, 0), (10, 5), (5, 10)]);
        edges.extend(path_edges(0, &[(3, 5), (5, 7), (7, 5), (5, 3)]));
        let arrangement = Arrangement::build(edges, &SequentialExecutor);
        check_invariants(&arrangement);
        assert_eq!(sorted_windings(&arrangement, 0), vec![0, 1]);

        let ring = single_holed_face(&arrangement, (3, 5));
        assert_eq!(arrangement.face(ring).winding_map.get(PathId(0)), 1);
        assert_eq!(arrangement.face_area(ring), 50.0 - 8.0);
        assert_eq!(arrangement.face(arrangement.unbounded_face()).holes.len(), 1);
    }

    #[test]
    fn test_hole_ray_along_horizontal_parent_edge() {
        let mut edges = path_edges(0, &[
            (0, 0), (10, 0), (10, 10), (0, 10), (0, 6), (2, 6), (2, 4), (0, 4),
        ]);
        edges.extend(clockwise_square(0, (4, 4), (6, 6)));
        let arrangement = Arrangement::build(edges, &SequentialExecutor);
        check_invariants(&arrangement);
        assert_eq!(sorted_windings(&arrangement, 0), vec![0, 1]);

        let notched = single_holed_face(&arrangement, (4, 4));
        assert_eq!(arrangement.face(notched).winding_map.get(PathId(0)), 1);
        assert_eq!(arrangement.face_area(notched), 100.0 - 4.0 - 4.0);
    }

    fn star() -> Vec<IntegerEdge> {
        let points: Vec<(i32, i32)> = (0..7).map(|index| {
            let angle = index as f64 * 3.0 * std::f64::consts::PI * 2.0 / 7.0;
            ((angle.cos() * 1000.0) as i32, (angle.sin() * 1000.0) as i32)
        }).collect();
        let mut edges = path_edges(0, &points);
        edges.extend(square(1, (-300, -1200), (300, 1200)));
        edges
    }

    #[test]
    fn test_executors_agree() {
        let sequential = Arrangement::build(star(), &SequentialExecutor);
        let parallel = Arrangement::build(star(), &RayonExecutor);
        check_invariants(&sequential);
        assert_eq!(sequential.half_edges().len(), parallel.half_edges().len());
        for (a, b) in sequential.half_edges().iter().zip(parallel.half_edges().iter()) {
            assert_eq!(a.p0, b.p0);
            assert_eq!(a.p1, b.p1);
            assert_eq!(a.next, b.next);
            assert_eq!(a.face, b.face);
        }
        assert_eq!(sequential.faces.len(), parallel.faces.len());
        for (a, b) in sequential.faces.iter().zip(parallel.faces.iter()) {
            assert_eq!(a.winding_map, b.winding_map);
        }
    }

    #[derive(Clone, Debug)]
    struct TestPaths(Vec<Vec<Vector2I>>);

    impl Arbitrary for TestPaths {
        fn arbitrary<G: Gen>(g: &mut G) -> TestPaths {
            let count = 1 + usize::arbitrary(g) % 3;
            TestPaths((0..count).map(|_| {
                let length = 3 + usize::arbitrary(g) % 5;
                (0..length).map(|_| {
                    vec2i((u8::arbitrary(g) % 16) as i32, (u8::arbitrary(g) % 16) as i32)
                }).collect()
            }).collect())
        }
    }

    #[test]
    fn test_face_areas_reproduce_path_areas() {
        fn prop(paths: TestPaths) -> bool {
            let mut edges = vec![];
            let mut path_areas = vec![];
            for (index, points) in paths.0.iter().enumerate() {
                let points: Vec<(i32, i32)> = points.iter().map(|p| (p.x(), p.y())).collect();
                edges.extend(path_edges(index as u32, &points));
                let twice_area: i64 = (0..points.len()).map(|i| {
                    let (a, b) = (points[i], points[(i + 1) % points.len()]);
                    a.0 as i64 * b.1 as i64 - a.1 as i64 * b.0 as i64
                }).sum();
                path_areas.push(0.5 * twice_area as f64);
            }

            let arrangement = Arrangement::build(edges, &SequentialExecutor);
            check_invariants(&arrangement);
            path_areas.iter().enumerate().all(|(path, &expected)| {
                let area: f64 = arrangement.bounded_faces().map(|(id, face)| {
                    arrangement.face_area(id) * face.winding_map.get(PathId(path as u32)) as f64
                }).sum();
                approx_eq(area, expected, 1e-6)
            })
        }
        quickcheck::quickcheck(prop as fn(TestPaths) -> bool);
    }
}
