// facet/content/src/circular.rs
//
// Copyright © 2024 The Facet Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Clipping against a circle.
//!
//! The portion of the input outside the circle is radially projected onto it, producing arcs.
//! Arcs are tessellated into line segments using a shared list of critical angles, so an arc
//! produces bit-identical vertices no matter which input edge generated it and the outputs stay
//! closed.

use crate::edge::{CircularEdge, LinearEdge};
use crate::simplifier::ClipSimplifier;
use arrayvec::ArrayVec;
use facet_geometry::vector::Vector2F;
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::f64::consts::PI;

/// The sorted, deduplicated angles at which arc tessellation must place a vertex.
#[derive(Clone, Debug, Default)]
pub struct CriticalAngles {
    angles: Vec<f64>,
}

impl CriticalAngles {
    pub fn new(mut angles: Vec<f64>) -> CriticalAngles {
        angles.retain(|angle| angle.is_finite());
        angles.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        angles.dedup();
        CriticalAngles { angles }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.angles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.angles.is_empty()
    }

    #[inline]
    fn index_of(&self, angle: f64) -> Option<usize> {
        self.angles
            .binary_search_by(|probe| probe.partial_cmp(&angle).unwrap_or(Ordering::Equal))
            .ok()
    }

    /// The start angle and angular length of the piece between critical angle `index` and the
    /// next one counterclockwise.
    fn piece(&self, index: usize) -> (f64, f64) {
        let start = self.angles[index];
        let end = match self.angles.get(index + 1) {
            Some(&end) => end,
            None => self.angles[0] + 2.0 * PI,
        };
        (start, end - start)
    }
}

/// Tessellates arcs of one circle against a fixed set of critical angles.
#[derive(Clone, Copy, Debug)]
pub struct ArcTessellator<'a> {
    center: Vector2F,
    radius: f64,
    max_angle_split: f64,
    critical_angles: &'a CriticalAngles,
}

impl<'a> ArcTessellator<'a> {
    pub fn new(center: Vector2F,
               radius: f64,
               max_angle_split: f64,
               critical_angles: &'a CriticalAngles)
               -> ArcTessellator<'a> {
        ArcTessellator { center, radius, max_angle_split, critical_angles }
    }

    #[inline]
    pub fn point_at_angle(&self, angle: f64) -> Vector2F {
        self.center + Vector2F::from_angle(angle).scale(self.radius)
    }

    fn push_piece_interior(&self, index: usize, points: &mut Vec<Vector2F>) {
        let (start, length) = self.critical_angles.piece(index);
        let count = (length / self.max_angle_split).ceil().max(1.0) as usize;
        for step in 1..count {
            points.push(self.point_at_angle(start + length * step as f64 / count as f64));
        }
    }

    /// Returns the vertices of the tessellated arc, including both endpoints. Both endpoint
    /// angles must be critical angles.
    pub fn tessellate(&self, arc: &CircularEdge) -> Vec<Vector2F> {
        if arc.is_empty() {
            return vec![];
        }
        if !arc.counter_clockwise {
            let mut points = self.tessellate(&arc.reversed());
            points.reverse();
            return points;
        }

        let (start, end) = match (self.critical_angles.index_of(arc.start_angle),
                                  self.critical_angles.index_of(arc.end_angle)) {
            (Some(start), Some(end)) => (start, end),
            _ => {
                warn!("arc endpoints {:?} are not critical angles", arc);
                return vec![self.point_at_angle(arc.start_angle),
                            self.point_at_angle(arc.end_angle)];
            }
        };

        let mut points = vec![self.point_at_angle(self.critical_angles.angles[start])];
        let mut index = start;
        loop {
            self.push_piece_interior(index, &mut points);
            index = (index + 1) % self.critical_angles.len();
            points.push(self.point_at_angle(self.critical_angles.angles[index]));
            if index == end {
                return points;
            }
        }
    }
}

/// Tessellates a list of arcs into edges. The arc endpoints are added to `extra_angles` to form
/// the critical angle list.
pub fn tessellate_arcs(arcs: &[CircularEdge],
                       center: Vector2F,
                       radius: f64,
                       max_angle_split: f64,
                       extra_angles: &[f64])
                       -> Vec<LinearEdge> {
    let mut angles = extra_angles.to_vec();
    for arc in arcs {
        angles.push(arc.start_angle);
        angles.push(arc.end_angle);
    }
    let critical_angles = CriticalAngles::new(angles);
    let tessellator = ArcTessellator::new(center, radius, max_angle_split, &critical_angles);
    let mut edges = vec![];
    for arc in arcs {
        push_chain(&tessellator.tessellate(arc), &mut edges);
    }
    edges
}

fn push_chain(points: &[Vector2F], edges: &mut Vec<LinearEdge>) {
    for pair in points.windows(2) {
        if pair[0] != pair[1] {
            edges.push(LinearEdge::new(pair[0], pair[1]));
        }
    }
}

/// A piece of an input edge lying entirely inside or entirely outside the circle.
#[derive(Clone, Copy, Debug)]
struct CirclePiece {
    start: Vector2F,
    end: Vector2F,
    start_on_circle: bool,
    end_on_circle: bool,
    inside: bool,
}

#[derive(Clone, Copy, Debug)]
struct Circle {
    center: Vector2F,
    radius: f64,
    max_angle_split: f64,
}

impl Circle {
    #[inline]
    fn angle(&self, point: Vector2F) -> f64 {
        (point - self.center).angle()
    }

    /// Parameters in (0, 1) where the segment crosses the circle. Tangent segments never cross.
    fn crossings(&self, from: Vector2F, to: Vector2F) -> ArrayVec<[f64; 2]> {
        let mut crossings = ArrayVec::new();
        let delta = to - from;
        let offset = from - self.center;
        let a = delta.square_length();
        let b = 2.0 * offset.dot(delta);
        let c = offset.square_length() - self.radius * self.radius;
        let discriminant = b * b - 4.0 * a * c;
        if a == 0.0 || discriminant <= 0.0 {
            return crossings;
        }
        let root = discriminant.sqrt();
        for &t in &[(-b - root) / (2.0 * a), (-b + root) / (2.0 * a)] {
            if t > 0.0 && t < 1.0 {
                crossings.push(t);
            }
        }
        crossings
    }

    fn pieces(&self, from: Vector2F, to: Vector2F) -> SmallVec<[CirclePiece; 3]> {
        let mut points: SmallVec<[(Vector2F, bool); 4]> = SmallVec::new();
        points.push((from, false));
        for t in self.crossings(from, to) {
            points.push((from.lerp(to, t), true));
        }
        points.push((to, false));

        let mut pieces = SmallVec::new();
        for pair in points.windows(2) {
            let ((start, start_on_circle), (end, end_on_circle)) = (pair[0], pair[1]);
            let middle = start.lerp(end, 0.5);
            let inside = (middle - self.center).square_length() < self.radius * self.radius;
            pieces.push(CirclePiece { start, end, start_on_circle, end_on_circle, inside });
        }
        pieces
    }

    fn collect_critical_angles(&self, piece: &CirclePiece, angles: &mut Vec<f64>) {
        if !piece.inside {
            angles.push(self.angle(piece.start));
            angles.push(self.angle(piece.end));
            return;
        }

        if piece.start_on_circle {
            angles.push(self.angle(piece.start));
        }
        if piece.end_on_circle {
            angles.push(self.angle(piece.end));
        }

        // Inside geometry close enough to the circle could otherwise poke through the chords of
        // the tessellation.
        let inner_radius = self.radius * (0.5 * self.max_angle_split).cos();
        let inner_radius_squared = inner_radius * inner_radius;
        let delta = piece.end - piece.start;
        let t = if delta.is_zero() {
            0.0
        } else {
            ((self.center - piece.start).dot(delta) / delta.square_length()).max(0.0).min(1.0)
        };
        for &point in &[piece.start, piece.end, piece.start.lerp(piece.end, t)] {
            if (point - self.center).square_length() > inner_radius_squared {
                angles.push(self.angle(point));
            }
        }
    }

    #[inline]
    fn snap(&self, tessellator: &ArcTessellator, point: Vector2F, on_circle: bool) -> Vector2F {
        if on_circle {
            tessellator.point_at_angle(self.angle(point))
        } else {
            point
        }
    }

    /// The arc that `piece` projects onto, oriented along the piece.
    fn projected_arc(&self, piece: &CirclePiece) -> CircularEdge {
        let (start, end) = (piece.start - self.center, piece.end - self.center);
        CircularEdge::new(start.angle(), end.angle(), start.det(end) > 0.0)
    }
}

fn critical_angles_for(circle: &Circle, pieces: &[CirclePiece]) -> CriticalAngles {
    let mut angles = vec![];
    for piece in pieces {
        circle.collect_critical_angles(piece, &mut angles);
    }
    CriticalAngles::new(angles)
}

/// Splits an edge soup by a circle, returning the parts inside and outside it.
///
/// Arcs are split so that no tessellated segment spans more than `max_angle_split` radians.
pub fn binary_circular_clip_edges(edges: &[LinearEdge],
                                  center: Vector2F,
                                  radius: f64,
                                  max_angle_split: f64)
                                  -> (Vec<LinearEdge>, Vec<LinearEdge>) {
    let circle = Circle { center, radius, max_angle_split };
    let pieces: Vec<(CirclePiece, LinearEdge)> = edges.iter().flat_map(|edge| {
        circle.pieces(edge.start, edge.end).into_iter().map(move |piece| (piece, *edge))
    }).collect();
    let critical_angles = {
        let pieces: Vec<CirclePiece> = pieces.iter().map(|&(piece, _)| piece).collect();
        critical_angles_for(&circle, &pieces)
    };
    let tessellator = ArcTessellator::new(center, radius, max_angle_split, &critical_angles);

    let (mut inside, mut outside) = (vec![], vec![]);
    for (piece, edge) in pieces {
        let start = circle.snap(&tessellator, piece.start, piece.start_on_circle);
        let end = circle.snap(&tessellator, piece.end, piece.end_on_circle);
        if start == end {
            continue;
        }
        let edge = LinearEdge::with_flags(start, end, edge.flags);
        if piece.inside {
            inside.push(edge);
            continue;
        }

        outside.push(edge);
        let arc = tessellator.tessellate(&circle.projected_arc(&piece));
        push_chain(&arc, &mut inside);
        let reversed: Vec<Vector2F> = arc.into_iter().rev().collect();
        push_chain(&reversed, &mut outside);
    }

    (inside, outside)
}

/// Splits polygons by a circle, returning the polygons inside and outside it.
///
/// The outside result contains one loop per outside piece of the input, each closed by its
/// projected arc; the loops together cover exactly the outside region.
pub fn binary_circular_clip_polygon(polygons: &[Vec<Vector2F>],
                                    center: Vector2F,
                                    radius: f64,
                                    max_angle_split: f64)
                                    -> (Vec<Vec<Vector2F>>, Vec<Vec<Vector2F>>) {
    let circle = Circle { center, radius, max_angle_split };
    let polygon_pieces: Vec<Vec<CirclePiece>> = polygons.iter().map(|polygon| {
        (0..polygon.len()).flat_map(|index| {
            circle.pieces(polygon[index], polygon[(index + 1) % polygon.len()])
        }).collect()
    }).collect();
    let critical_angles = {
        let all: Vec<CirclePiece> = polygon_pieces.iter().flatten().cloned().collect();
        critical_angles_for(&circle, &all)
    };
    let tessellator = ArcTessellator::new(center, radius, max_angle_split, &critical_angles);

    let (mut inside, mut outside) = (vec![], vec![]);
    let (mut inside_simplifier, mut outside_simplifier) =
        (ClipSimplifier::new(), ClipSimplifier::new());
    for pieces in polygon_pieces {
        for piece in pieces {
            let start = circle.snap(&tessellator, piece.start, piece.start_on_circle);
            if piece.inside {
                inside_simplifier.add(start);
                continue;
            }

            let end = circle.snap(&tessellator, piece.end, piece.end_on_circle);
            let arc = tessellator.tessellate(&circle.projected_arc(&piece));
            arc.iter().for_each(|&point| inside_simplifier.add(point));
            if arc.is_empty() {
                inside_simplifier.add(tessellator.point_at_angle(circle.angle(piece.start)));
            }

            outside_simplifier.add(start);
            outside_simplifier.add(end);
            arc.iter().rev().for_each(|&point| outside_simplifier.add(point));
            outside_simplifier.finalize_into(&mut outside);
        }
        inside_simplifier.finalize_into(&mut inside);
    }

    (inside, outside)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::edge::{edges_area, polygons_area, polygons_to_edges};
    use facet_geometry::util::approx_eq;
    use facet_geometry::vector::vec2f;

    fn rect(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Vec<Vec<Vector2F>> {
        vec![vec![vec2f(min_x, min_y), vec2f(max_x, min_y), vec2f(max_x, max_y),
                  vec2f(min_x, max_y)]]
    }

    /// Every vertex of a closed edge soup has as many incoming edges as outgoing ones.
    fn is_balanced(edges: &[LinearEdge]) -> bool {
        let mut degrees: Vec<(u64, u64, i32)> = vec![];
        let mut bump = |point: Vector2F, delta: i32| {
            let key = (point.x().to_bits(), point.y().to_bits());
            match degrees.iter_mut().find(|entry| (entry.0, entry.1) == key) {
                Some(entry) => entry.2 += delta,
                None => degrees.push((key.0, key.1, delta)),
            }
        };
        for edge in edges {
            bump(edge.start, 1);
            bump(edge.end, -1);
        }
        degrees.iter().all(|entry| entry.2 == 0)
    }

    #[test]
    fn test_circle_inside_square() {
        let square = rect(-2.0, -2.0, 2.0, 2.0);
        let (inside, outside) = binary_circular_clip_polygon(&square, Vector2F::zero(), 1.0, 0.1);
        let (inside_area, outside_area) = (polygons_area(&inside), polygons_area(&outside));
        assert!(approx_eq(inside_area + outside_area, 16.0, 1e-9));
        assert!(approx_eq(inside_area, PI, 0.01));
        assert!(inside_area < PI);
    }

    #[test]
    fn test_crossing_square_edges_balanced() {
        let edges = polygons_to_edges(&rect(0.0, 0.0, 3.0, 2.0));
        let (inside, outside) = binary_circular_clip_edges(&edges, vec2f(0.5, 0.5), 1.5, 0.2);
        assert!(is_balanced(&inside));
        assert!(is_balanced(&outside));
        assert!(approx_eq(edges_area(&inside) + edges_area(&outside), 6.0, 1e-9));
    }

    #[test]
    fn test_spikes_share_arc_vertices() {
        let star = vec![vec![
            vec2f(0.0, -0.5), vec2f(3.0, 0.0), vec2f(0.0, 0.5), vec2f(0.2, 3.0),
            vec2f(-0.5, 0.0), vec2f(0.2, -3.0),
        ]];
        let edges = polygons_to_edges(&star);
        let (inside, outside) = binary_circular_clip_edges(&edges, Vector2F::zero(), 1.0, 0.05);
        assert!(is_balanced(&inside));
        assert!(is_balanced(&outside));
        let total = polygons_area(&star);
        assert!(approx_eq(edges_area(&inside) + edges_area(&outside), total, 1e-9));
    }

    #[test]
    fn test_tangent_edge_has_no_interior() {
        let circle = Circle { center: Vector2F::zero(), radius: 1.0, max_angle_split: 0.1 };
        assert!(circle.crossings(vec2f(-2.0, 1.0), vec2f(2.0, 1.0)).is_empty());

        let edges = polygons_to_edges(&rect(-2.0, 1.0, 2.0, 3.0));
        let (inside, outside) = binary_circular_clip_edges(&edges, Vector2F::zero(), 1.0, 0.1);
        assert!(approx_eq(edges_area(&inside), 0.0, 1e-12));
        assert!(approx_eq(edges_area(&outside), 8.0, 1e-9));
        assert!(inside.iter().all(|edge| approx_eq(edge.start.length(), 1.0, 1e-12)));
    }

    #[test]
    fn test_tessellation_respects_max_split() {
        let arcs = [CircularEdge::new(-1.0, 2.0, true), CircularEdge::new(2.0, -1.0, false)];
        let edges = tessellate_arcs(&arcs, Vector2F::zero(), 2.0, 0.25, &[0.5]);
        let max_chord = 2.0 * 2.0 * (0.125f64).sin();
        assert!(edges.iter().all(|edge| edge.segment().square_length().sqrt() <= max_chord + 1e-12));
        assert!(is_balanced(&edges));
    }
}
