// facet/content/src/clip.rs
//
// Copyright © 2024 The Facet Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Clipping of polygons and edge soups against lines, stripes, and rectangles.
//!
//! Every primitive here is area-preserving in the sense that the outputs partition the input:
//! the signed areas of all outputs sum to the signed area of the input (up to floating-point
//! rounding). Portions of the input that lie on the far side of a clip line are not discarded
//! outright but projected onto the line, which keeps each output closed.

use crate::edge::{EdgeFlags, LinearEdge};
use crate::simplifier::ClipSimplifier;
use arrayvec::ArrayVec;
use facet_geometry::rect::RectF;
use facet_geometry::vector::{vec2f, Vector2F};
use smallvec::SmallVec;

/// The family of parallel clip lines `dot(normal, p) == value`.
#[derive(Clone, Copy, Debug, PartialEq)]
struct ClipLine {
    normal: Vector2F,
}

impl ClipLine {
    #[inline]
    fn new(normal: Vector2F) -> ClipLine {
        ClipLine { normal }
    }

    #[inline]
    fn distance(&self, point: Vector2F) -> f64 {
        self.normal.dot(point)
    }

    /// Forces a point that is on the line in exact arithmetic exactly onto axis-aligned lines.
    #[inline]
    fn snap(&self, point: Vector2F, value: f64) -> Vector2F {
        if self.normal.y() == 0.0 {
            vec2f(value / self.normal.x(), point.y())
        } else if self.normal.x() == 0.0 {
            vec2f(point.x(), value / self.normal.y())
        } else {
            point
        }
    }

    /// Orthogonally projects `point`, whose distance is `distance`, onto the line at `value`.
    #[inline]
    fn project(&self, point: Vector2F, distance: f64, value: f64) -> Vector2F {
        let offset = self.normal.scale((distance - value) / self.normal.square_length());
        self.snap(point - offset, value)
    }
}

/// A point along a split edge, with its signed distance along the clip normal.
#[derive(Clone, Copy, Debug)]
struct SplitPoint {
    point: Vector2F,
    distance: f64,
}

/// Splits the edge from `from` to `to` at every value of `values` it strictly crosses, returning
/// the start point followed by the crossings in edge order. The end point is not included.
fn split_edge(line: &ClipLine, values: &[f64], from: SplitPoint, to: SplitPoint)
              -> SmallVec<[SplitPoint; 4]> {
    let mut points = SmallVec::new();
    points.push(from);

    let (lower, upper) = (from.distance.min(to.distance), from.distance.max(to.distance));
    let start = values.iter().position(|&value| value > lower).unwrap_or(values.len());
    let end = values.iter().position(|&value| value >= upper).unwrap_or(values.len());
    if start >= end {
        return points;
    }

    let delta = to.distance - from.distance;
    let mut push_crossing = |value: f64| {
        let t = (value - from.distance) / delta;
        let point = line.snap(from.point.lerp(to.point, t), value);
        points.push(SplitPoint { point, distance: value });
    };
    if delta > 0.0 {
        values[start..end].iter().for_each(|&value| push_crossing(value));
    } else {
        values[start..end].iter().rev().for_each(|&value| push_crossing(value));
    }
    points
}

/// The band of a stripe clip bounded by `lower` and `upper` (either may be absent).
#[derive(Clone, Copy, Debug)]
struct Band {
    lower: Option<f64>,
    upper: Option<f64>,
}

impl Band {
    fn bands(values: &[f64]) -> Vec<Band> {
        (0..=values.len()).map(|index| {
            Band {
                lower: if index == 0 { None } else { Some(values[index - 1]) },
                upper: values.get(index).cloned(),
            }
        }).collect()
    }

    /// Clamps a split point into this band, projecting it onto the nearest band boundary.
    #[inline]
    fn clamp(&self, line: &ClipLine, split: SplitPoint) -> Vector2F {
        match (self.lower, self.upper) {
            (Some(lower), _) if split.distance < lower => {
                line.project(split.point, split.distance, lower)
            }
            (_, Some(upper)) if split.distance > upper => {
                line.project(split.point, split.distance, upper)
            }
            _ => split.point,
        }
    }

    #[inline]
    fn contains(&self, distance: f64) -> bool {
        self.lower.map_or(true, |lower| distance >= lower) &&
            self.upper.map_or(true, |upper| distance <= upper)
    }
}

fn sorted_values(values: &[f64]) -> Vec<f64> {
    let mut values = values.to_vec();
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    values.dedup();
    values
}

fn stripe_clip_polygons(polygons: &[Vec<Vector2F>], line: ClipLine, values: &[f64])
                        -> Vec<Vec<Vec<Vector2F>>> {
    let values = sorted_values(values);
    let bands = Band::bands(&values);
    let mut outputs = vec![vec![]; bands.len()];
    let mut simplifiers = vec![ClipSimplifier::new(); bands.len()];

    for polygon in polygons {
        for (index, &from) in polygon.iter().enumerate() {
            let to = polygon[(index + 1) % polygon.len()];
            let from = SplitPoint { point: from, distance: line.distance(from) };
            let to = SplitPoint { point: to, distance: line.distance(to) };
            for split in split_edge(&line, &values, from, to) {
                for (band, simplifier) in bands.iter().zip(simplifiers.iter_mut()) {
                    simplifier.add(band.clamp(&line, split));
                }
            }
        }
        for (simplifier, output) in simplifiers.iter_mut().zip(outputs.iter_mut()) {
            simplifier.finalize_into(output);
        }
    }

    outputs
}

fn stripe_clip_edges(edges: &[LinearEdge],
                     line: ClipLine,
                     values: &[f64],
                     fake_corner: Option<Vector2F>)
                     -> Vec<Vec<LinearEdge>> {
    let values = sorted_values(values);
    let bands = Band::bands(&values);
    let mut outputs = vec![vec![]; bands.len()];

    for edge in edges {
        let from = SplitPoint { point: edge.start, distance: line.distance(edge.start) };
        let to = SplitPoint { point: edge.end, distance: line.distance(edge.end) };
        let mut splits = split_edge(&line, &values, from, to);
        splits.push(to);

        for pair in splits.windows(2) {
            let (start, end) = (pair[0], pair[1]);
            let middle = 0.5 * (start.distance + end.distance);
            for (band, output) in bands.iter().zip(outputs.iter_mut()) {
                if band.contains(middle) {
                    if start.point != end.point {
                        output.push(LinearEdge::with_flags(start.point, end.point, edge.flags));
                    }
                    continue;
                }

                let (start_point, end_point) = (band.clamp(&line, start), band.clamp(&line, end));
                push_projected_edge(output, start_point, end_point, fake_corner);
            }
        }
    }

    outputs
}

fn push_projected_edge(output: &mut Vec<LinearEdge>,
                       start: Vector2F,
                       end: Vector2F,
                       fake_corner: Option<Vector2F>) {
    match fake_corner {
        Some(corner) => {
            let flags = EdgeFlags::PROJECTED | EdgeFlags::FAKE_CORNER;
            if start != corner {
                output.push(LinearEdge::with_flags(start, corner, flags));
            }
            if corner != end {
                output.push(LinearEdge::with_flags(corner, end, flags));
            }
        }
        None if start != end => {
            output.push(LinearEdge::with_flags(start, end, EdgeFlags::PROJECTED))
        }
        None => {}
    }
}

fn take_pair<T>(outputs: Vec<Vec<T>>) -> (Vec<T>, Vec<T>) {
    let mut outputs = outputs.into_iter();
    let min = outputs.next().unwrap_or_default();
    (min, outputs.next().unwrap_or_default())
}

/// Splits polygons along the line `dot(normal, p) == value`, returning the parts with
/// `dot(normal, p) <= value` and `dot(normal, p) >= value` respectively.
pub fn binary_line_clip_polygon(polygons: &[Vec<Vector2F>], normal: Vector2F, value: f64)
                                -> (Vec<Vec<Vector2F>>, Vec<Vec<Vector2F>>) {
    take_pair(stripe_clip_polygons(polygons, ClipLine::new(normal), &[value]))
}

/// Splits polygons at `x == value` into the parts with smaller and larger x.
#[inline]
pub fn binary_x_clip_polygon(polygons: &[Vec<Vector2F>], x: f64)
                             -> (Vec<Vec<Vector2F>>, Vec<Vec<Vector2F>>) {
    binary_line_clip_polygon(polygons, vec2f(1.0, 0.0), x)
}

#[inline]
pub fn binary_y_clip_polygon(polygons: &[Vec<Vector2F>], y: f64)
                             -> (Vec<Vec<Vector2F>>, Vec<Vec<Vector2F>>) {
    binary_line_clip_polygon(polygons, vec2f(0.0, 1.0), y)
}

/// Splits polygons into the `values.len() + 1` stripes separated by the parallel lines
/// `dot(normal, p) == value`, in ascending order of value. Done in one pass over the input.
pub fn binary_stripe_clip_polygon(polygons: &[Vec<Vector2F>], normal: Vector2F, values: &[f64])
                                  -> Vec<Vec<Vec<Vector2F>>> {
    stripe_clip_polygons(polygons, ClipLine::new(normal), values)
}

/// Splits an edge soup along the line `dot(normal, p) == value`.
///
/// If `fake_corner_perpendicular` is given, projected edges are routed through the point on the
/// clip line at that coordinate along the line's direction (`normal.perpendicular()`), so that
/// projections stay within a bounded part of the line.
pub fn binary_line_clip_edges(edges: &[LinearEdge],
                              normal: Vector2F,
                              value: f64,
                              fake_corner_perpendicular: Option<f64>)
                              -> (Vec<LinearEdge>, Vec<LinearEdge>) {
    let line = ClipLine::new(normal);
    let fake_corner = fake_corner_perpendicular.map(|perpendicular| {
        let direction = normal.perpendicular();
        let on_line = normal.scale(value / normal.square_length()) +
            direction.scale(perpendicular / direction.square_length());
        line.snap(on_line, value)
    });
    take_pair(stripe_clip_edges(edges, line, &[value], fake_corner))
}

/// Splits an edge soup at `x == value`, with projected edges routed through the fake corner
/// `(x, fake_corner_y)` if one is given.
#[inline]
pub fn binary_x_clip_edges(edges: &[LinearEdge], x: f64, fake_corner_y: Option<f64>)
                           -> (Vec<LinearEdge>, Vec<LinearEdge>) {
    let fake_corner = fake_corner_y.map(|y| vec2f(x, y));
    take_pair(stripe_clip_edges(edges, ClipLine::new(vec2f(1.0, 0.0)), &[x], fake_corner))
}

#[inline]
pub fn binary_y_clip_edges(edges: &[LinearEdge], y: f64, fake_corner_x: Option<f64>)
                           -> (Vec<LinearEdge>, Vec<LinearEdge>) {
    let fake_corner = fake_corner_x.map(|x| vec2f(x, y));
    take_pair(stripe_clip_edges(edges, ClipLine::new(vec2f(0.0, 1.0)), &[y], fake_corner))
}

pub fn binary_stripe_clip_edges(edges: &[LinearEdge], normal: Vector2F, values: &[f64])
                                -> Vec<Vec<LinearEdge>> {
    stripe_clip_edges(edges, ClipLine::new(normal), values, None)
}

/// The sorted parameters in (0, 1) at which the segment crosses the lines bounding `rect`.
fn rect_crossings(from: Vector2F, to: Vector2F, rect: RectF) -> ArrayVec<[f64; 4]> {
    let mut crossings: ArrayVec<[f64; 4]> = ArrayVec::new();
    let delta = to - from;
    for &(start, length, value) in &[
        (from.x(), delta.x(), rect.min_x()),
        (from.x(), delta.x(), rect.max_x()),
        (from.y(), delta.y(), rect.min_y()),
        (from.y(), delta.y(), rect.max_y()),
    ] {
        if length != 0.0 {
            let t = (value - start) / length;
            if t > 0.0 && t < 1.0 {
                crossings.push(t);
            }
        }
    }
    crossings.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    crossings
}

#[inline]
fn clamp_to_rect(point: Vector2F, rect: RectF) -> Vector2F {
    point.clamp(rect.origin(), rect.lower_right())
}

/// Clips polygons to a rectangle. Portions outside the rectangle are projected onto its
/// boundary, so every output vertex lies inside or on the rectangle.
pub fn bounds_clip_polygon(polygons: &[Vec<Vector2F>], rect: RectF) -> Vec<Vec<Vector2F>> {
    let mut output = vec![];
    let mut simplifier = ClipSimplifier::new();
    for polygon in polygons {
        for (index, &from) in polygon.iter().enumerate() {
            let to = polygon[(index + 1) % polygon.len()];
            simplifier.add(clamp_to_rect(from, rect));
            for t in rect_crossings(from, to, rect) {
                simplifier.add(clamp_to_rect(from.lerp(to, t), rect));
            }
        }
        simplifier.finalize_into(&mut output);
    }
    output
}

/// Clips an edge soup to a rectangle. Edges lying outside are projected onto the boundary and
/// flagged `PROJECTED`; projections that collapse to a point are dropped.
pub fn bounds_clip_edges(edges: &[LinearEdge], rect: RectF) -> Vec<LinearEdge> {
    let mut output = vec![];
    for edge in edges {
        let mut points: SmallVec<[Vector2F; 6]> = SmallVec::new();
        points.push(edge.start);
        for t in rect_crossings(edge.start, edge.end, rect) {
            points.push(edge.start.lerp(edge.end, t));
        }
        points.push(edge.end);

        for pair in points.windows(2) {
            let (start, end) = (clamp_to_rect(pair[0], rect), clamp_to_rect(pair[1], rect));
            if start == end {
                continue;
            }
            let middle = pair[0].lerp(pair[1], 0.5);
            let flags = if rect.contains_point(middle) {
                edge.flags
            } else {
                edge.flags | EdgeFlags::PROJECTED
            };
            output.push(LinearEdge::with_flags(start, end, flags));
        }
    }
    output
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::edge::{edges_area, polygons_area, polygons_to_edges};
    use facet_geometry::util::approx_eq;
    use quickcheck::{Arbitrary, Gen};

    #[derive(Clone, Debug)]
    struct TestPolygon(Vec<Vector2F>);

    impl Arbitrary for TestPolygon {
        fn arbitrary<G: Gen>(g: &mut G) -> TestPolygon {
            let count = 3 + usize::arbitrary(g) % 8;
            TestPolygon((0..count).map(|_| {
                let x = (u16::arbitrary(g) % 1000) as f64 / 100.0;
                let y = (u16::arbitrary(g) % 1000) as f64 / 100.0;
                vec2f(x, y)
            }).collect())
        }
    }

    fn square() -> Vec<Vec<Vector2F>> {
        vec![vec![vec2f(0.0, 0.0), vec2f(4.0, 0.0), vec2f(4.0, 4.0), vec2f(0.0, 4.0)]]
    }

    #[test]
    fn test_binary_x_clip_square() {
        let (min, max) = binary_x_clip_polygon(&square(), 1.0);
        assert_eq!(polygons_area(&min), 4.0);
        assert_eq!(polygons_area(&max), 12.0);
        assert!(min.iter().flatten().all(|point| point.x() <= 1.0));
        assert!(max.iter().flatten().all(|point| point.x() >= 1.0));
    }

    #[test]
    fn test_stripe_clip_square() {
        let stripes = binary_stripe_clip_polygon(&square(), vec2f(0.0, 1.0), &[3.0, 1.0, 2.0]);
        assert_eq!(stripes.len(), 4);
        let areas: Vec<f64> = stripes.iter().map(|stripe| polygons_area(stripe)).collect();
        assert_eq!(areas, vec![4.0, 4.0, 4.0, 4.0]);
    }

    #[test]
    fn test_bounds_clip_enclosing() {
        let rect = RectF::from_points(vec2f(1.0, 1.0), vec2f(2.0, 3.0));
        assert_eq!(polygons_area(&bounds_clip_polygon(&square(), rect)), 2.0);
        let edges = bounds_clip_edges(&polygons_to_edges(&square()), rect);
        assert!(approx_eq(edges_area(&edges), 2.0, 1e-12));
    }

    #[test]
    fn test_fake_corner_edges_stay_on_line() {
        let edges = polygons_to_edges(&square());
        let (min, max) = binary_x_clip_edges(&edges, 1.0, Some(10.0));
        assert!(approx_eq(edges_area(&min), 4.0, 1e-12));
        assert!(approx_eq(edges_area(&max), 12.0, 1e-12));
        for edge in min.iter().chain(max.iter()).filter(|edge| edge.is_fake_corner()) {
            assert_eq!(edge.start.x(), 1.0);
            assert_eq!(edge.end.x(), 1.0);
        }
    }

    #[test]
    fn test_line_clip_polygon_partitions_area() {
        fn prop(polygon: TestPolygon, x: u8, y: u8, value: u8) -> bool {
            let normal = vec2f(x as f64 - 127.5, y as f64 - 127.5);
            let value = value as f64 / 25.0 * normal.length();
            let polygons = vec![polygon.0];
            let (min, max) = binary_line_clip_polygon(&polygons, normal, value);
            let total = polygons_area(&polygons);
            approx_eq(polygons_area(&min) + polygons_area(&max), total, 1e-7)
        }
        quickcheck::quickcheck(prop as fn(TestPolygon, u8, u8, u8) -> bool);
    }

    #[test]
    fn test_x_clip_edges_partitions_area() {
        fn prop(polygon: TestPolygon, x: u8) -> bool {
            let x = x as f64 / 25.0;
            let edges = polygons_to_edges(&[polygon.0]);
            let (min, max) = binary_x_clip_edges(&edges, x, Some(5.0));
            approx_eq(edges_area(&min) + edges_area(&max), edges_area(&edges), 1e-7) &&
                min.iter().all(|edge| edge.start.x() <= x && edge.end.x() <= x) &&
                max.iter().all(|edge| edge.start.x() >= x && edge.end.x() >= x)
        }
        quickcheck::quickcheck(prop as fn(TestPolygon, u8) -> bool);
    }

    #[test]
    fn test_stripe_clip_edges_partitions_area() {
        fn prop(polygon: TestPolygon, a: u8, b: u8) -> bool {
            let values = [a as f64 / 25.0, b as f64 / 25.0];
            let edges = polygons_to_edges(&[polygon.0]);
            let stripes = binary_stripe_clip_edges(&edges, vec2f(0.6, 0.8), &values);
            let sum: f64 = stripes.iter().map(|stripe| edges_area(stripe)).sum();
            approx_eq(sum, edges_area(&edges), 1e-7)
        }
        quickcheck::quickcheck(prop as fn(TestPolygon, u8, u8) -> bool);
    }
}
