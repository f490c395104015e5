// facet/renderer/tests/rasterize.rs
//
// Copyright © 2024 The Facet Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use facet_color::space::ColorSpace;
use facet_color::ColorF;
use facet_content::fill::FillRule;
use facet_content::gradient::Gradient;
use facet_content::program::{PathId, RenderProgram};
use facet_geometry::rect::RectI;
use facet_geometry::util::approx_eq;
use facet_geometry::vector::{vec2f, vec2i, Vector2F};
use facet_renderer::error::RasterizeError;
use facet_renderer::options::{AccumulateMode, FaceRepresentation, RasterizeOptions};
use facet_renderer::path::RenderPath;
use facet_renderer::raster::AccumulationRaster;
use facet_renderer::rasterize::Rasterizer;

fn rect(min: (f64, f64), max: (f64, f64)) -> Vec<Vector2F> {
    vec![vec2f(min.0, min.1), vec2f(max.0, min.1), vec2f(max.0, max.1), vec2f(min.0, max.1)]
}

fn clockwise_rect(min: (f64, f64), max: (f64, f64)) -> Vec<Vector2F> {
    let mut polygon = rect(min, max);
    polygon.reverse();
    polygon
}

fn white(path: u32) -> RenderProgram {
    RenderProgram::fill(PathId(path), ColorF::white())
}

fn bounds(size: i32) -> RectI {
    RectI::from_points(vec2i(0, 0), vec2i(size, size))
}

fn rasterize(options: RasterizeOptions,
             paths: &[RenderPath],
             program: &RenderProgram,
             bounds: RectI)
             -> AccumulationRaster {
    let mut raster = AccumulationRaster::new(bounds);
    Rasterizer::new(options).rasterize(paths, program, bounds, &mut raster).unwrap();
    raster
}

fn all_options() -> Vec<RasterizeOptions> {
    let mut all = vec![];
    for &accumulate_mode in &[AccumulateMode::PerFace, AccumulateMode::Binned] {
        for &face_representation in &[FaceRepresentation::Polygonal, FaceRepresentation::Edged] {
            for &combine_faces in &[false, true] {
                all.push(RasterizeOptions {
                    accumulate_mode,
                    face_representation,
                    combine_faces,
                    ..RasterizeOptions::default()
                });
            }
        }
    }
    all
}

#[test]
fn test_overlapping_squares_under_both_fill_rules() {
    let subpaths = vec![rect((0.0, 0.0), (1.0, 1.0)), rect((0.5, 0.0), (1.5, 1.0))];
    for &(fill_rule, expected) in &[(FillRule::Winding, 1.5), (FillRule::EvenOdd, 1.0)] {
        let paths = vec![RenderPath::new(fill_rule, subpaths.clone())];
        for options in all_options() {
            let raster = rasterize(options, &paths, &white(0), bounds(2));
            assert!(approx_eq(raster.total_alpha(), expected, 1e-5));
        }
    }
}

#[test]
fn test_even_odd_overlap_is_empty() {
    let subpaths = vec![rect((0.0, 0.0), (4.0, 4.0)), rect((2.0, 0.0), (6.0, 4.0))];
    let paths = vec![RenderPath::new(FillRule::EvenOdd, subpaths)];
    let raster = rasterize(RasterizeOptions::default(), &paths, &white(0), bounds(8));
    assert_eq!(raster.pixel(vec2i(1, 1)), Some(ColorF::white()));
    assert_eq!(raster.pixel(vec2i(3, 1)), Some(ColorF::transparent_black()));
    assert_eq!(raster.pixel(vec2i(5, 1)), Some(ColorF::white()));
}

#[test]
fn test_hole() {
    let subpaths = vec![rect((0.0, 0.0), (4.0, 4.0)), clockwise_rect((1.0, 1.0), (3.0, 3.0))];
    for &fill_rule in &[FillRule::Winding, FillRule::EvenOdd] {
        let paths = vec![RenderPath::new(fill_rule, subpaths.clone())];
        let raster = rasterize(RasterizeOptions::default(), &paths, &white(0), bounds(4));
        assert!(approx_eq(raster.total_alpha(), 12.0, 1e-5));
        assert_eq!(raster.pixel(vec2i(0, 0)), Some(ColorF::white()));
        assert_eq!(raster.pixel(vec2i(2, 2)), Some(ColorF::transparent_black()));
    }
}

fn hexagon(center: Vector2F, radius: f64) -> Vec<Vector2F> {
    (0..6).map(|index| {
        let angle = index as f64 * std::f64::consts::PI / 3.0 + 0.1;
        let point = center + vec2f(angle.cos(), angle.sin()) * radius;
        (point * 1024.0).round() * (1.0 / 1024.0)
    }).collect()
}

fn shoelace(polygon: &[Vector2F]) -> f64 {
    0.5 * (0..polygon.len()).map(|index| {
        polygon[index].det(polygon[(index + 1) % polygon.len()])
    }).sum::<f64>()
}

#[test]
fn test_coverage_conserves_area() {
    let polygon = hexagon(vec2f(9.3, 10.1), 7.7);
    let expected = shoelace(&polygon);
    let paths = vec![RenderPath::new(FillRule::Winding, vec![polygon])];
    for options in all_options() {
        let raster = rasterize(options, &paths, &white(0), bounds(20));
        assert!(approx_eq(raster.total_alpha(), expected, 1e-5));
    }
}

#[test]
fn test_paths_outside_bounds_are_clipped() {
    let paths = vec![RenderPath::new(FillRule::Winding, vec![rect((-10.0, -10.0), (2.5, 30.0))])];
    let raster = rasterize(RasterizeOptions::default(), &paths, &white(0), bounds(4));
    assert!(approx_eq(raster.total_alpha(), 10.0, 1e-5));
}

fn layered_scene() -> (Vec<RenderPath>, RenderProgram) {
    let paths = vec![
        RenderPath::new(FillRule::Winding, vec![hexagon(vec2f(20.0, 18.0), 15.0)]),
        RenderPath::new(FillRule::EvenOdd, vec![
            rect((5.5, 3.25), (37.0, 24.0)),
            hexagon(vec2f(14.0, 20.0), 6.0),
        ]),
    ];
    let mut gradient = Gradient::linear_from_points(vec2f(0.0, 0.0), vec2f(40.0, 0.0));
    gradient.add(ColorF::new(0.0, 0.0, 1.0, 1.0), 0.0);
    gradient.add(ColorF::new(0.0, 1.0, 0.0, 1.0), 1.0);
    let program = RenderProgram::Stack(vec![
        RenderProgram::PathBoolean {
            path: PathId(0),
            inside: Box::new(RenderProgram::Gradient(gradient)),
            outside: Box::new(RenderProgram::transparent()),
        },
        RenderProgram::fill(PathId(1), ColorF::new(0.5, 0.0, 0.0, 0.5)),
    ]);
    (paths, program)
}

#[test]
fn test_options_agree() {
    let (paths, program) = layered_scene();
    let reference = rasterize(RasterizeOptions::default(), &paths, &program, bounds(40));
    for options in all_options() {
        let sequential = RasterizeOptions { parallel: false, ..options.clone() };
        for raster in vec![rasterize(options, &paths, &program, bounds(40)),
                           rasterize(sequential, &paths, &program, bounds(40))] {
            for y in 0..40 {
                for x in 0..40 {
                    let expected = reference.pixel(vec2i(x, y)).unwrap();
                    assert!(raster.pixel(vec2i(x, y)).unwrap().approx_eq(expected, 1e-5));
                }
            }
        }
    }
}

#[test]
fn test_deterministic_output() {
    let (paths, program) = layered_scene();
    let first = rasterize(RasterizeOptions::default(), &paths, &program, bounds(40));
    let second = rasterize(RasterizeOptions::default(), &paths, &program, bounds(40));
    assert_eq!(first.finalize(ColorSpace::Srgb), second.finalize(ColorSpace::Srgb));
    assert_eq!(first.finalize(ColorSpace::DisplayP3).len(), 1600);
}

#[test]
fn test_finalize_uses_output_color_space() {
    let paths = vec![RenderPath::new(FillRule::Winding, vec![rect((0.0, 0.0), (2.0, 2.0))])];
    let gray = RenderProgram::fill(PathId(0), ColorF::new(0.2, 0.2, 0.2, 1.0));
    let mut encoded = vec![];
    for &output_color_space in &[ColorSpace::Srgb, ColorSpace::LinearSrgb] {
        let options = RasterizeOptions { output_color_space, ..RasterizeOptions::default() };
        let rasterizer = Rasterizer::new(options);
        let mut raster = AccumulationRaster::new(bounds(2));
        rasterizer.rasterize(&paths, &gray, bounds(2), &mut raster).unwrap();
        let pixels = rasterizer.finalize(&raster);
        assert_eq!(pixels, raster.finalize(output_color_space));
        assert_eq!(pixels.len(), 4);
        assert_eq!(pixels[0].a, 255);
        encoded.push(pixels[0]);
    }
    assert!(encoded[0].r > encoded[1].r);
    assert_eq!(encoded[1].r, 51);
}

#[test]
fn test_oops_limit_marks_bins() {
    let (paths, program) = layered_scene();
    let options = RasterizeOptions {
        accumulate_mode: AccumulateMode::Binned,
        combine_faces: false,
        oops_limit: 1,
        ..RasterizeOptions::default()
    };
    let raster = rasterize(options, &paths, &program, bounds(40));
    assert_eq!(raster.pixel(vec2i(20, 18)), Some(ColorF::oops()));
}

#[test]
fn test_rejects_malformed_input() {
    let rasterizer = Rasterizer::new(RasterizeOptions::default());
    let mut raster = AccumulationRaster::new(bounds(4));

    let nan = vec![RenderPath::new(FillRule::Winding,
                                   vec![vec![vec2f(0.0, 0.0), vec2f(std::f64::NAN, 1.0)]])];
    assert_eq!(rasterizer.rasterize(&nan, &white(0), bounds(4), &mut raster),
               Err(RasterizeError::NonFiniteCoordinate { path: 0, subpath: 0, point: 1 }));

    let paths = vec![RenderPath::new(FillRule::Winding, vec![rect((0.0, 0.0), (1.0, 1.0))])];
    assert_eq!(rasterizer.rasterize(&paths, &white(1), bounds(4), &mut raster),
               Err(RasterizeError::UnknownPath(PathId(1))));
    assert_eq!(rasterizer.rasterize(&paths, &white(0), RectI::default(), &mut raster),
               Err(RasterizeError::EmptyBounds));

    let options = RasterizeOptions { integer_precision_bits: 64, ..RasterizeOptions::default() };
    assert_eq!(Rasterizer::new(options).rasterize(&paths, &white(0), bounds(4), &mut raster),
               Err(RasterizeError::BoundsTooLarge));
    assert_eq!(raster.total_alpha(), 0.0);
}
