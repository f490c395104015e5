// facet/renderer/src/accumulate.rs
//
// Copyright © 2024 The Facet Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Adaptive coverage accumulation.
//!
//! A face is bisected along the longer axis of its pixel-aligned bounds. Halves the face does not
//! touch are skipped, halves it covers completely are filled with a single operation, and single
//! pixels that are only partly covered receive the program's color weighted by the covered area.
//! Clipping work is therefore proportional to the length of the face's boundary rather than to
//! its area in pixels.

use crate::binder::RenderableFace;
use crate::raster::OutputRaster;
use facet_color::ColorF;
use facet_content::face::ClippableFace;
use facet_content::instructions::{CompiledProgram, EvaluationContext};
use facet_geometry::rect::{RectF, RectI, SplitAxis};
use facet_geometry::vector::{vec2i, Vector2F, Vector2I};

/// Areas at or below this many square pixels contribute nothing.
const ZERO_AREA_EPSILON: f64 = 1e-12;
/// Relative slack for treating a region as fully covered.
const FULL_AREA_EPSILON: f64 = 1e-9;

/// A deferred write to an `OutputRaster`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RasterOp {
    PartialPixel { color: ColorF, pixel: Vector2I },
    FullPixel { color: ColorF, pixel: Vector2I },
    FullRegion { color: ColorF, region: RectI },
}

impl RasterOp {
    pub fn apply<R>(&self, raster: &mut R) where R: OutputRaster + ?Sized {
        match *self {
            RasterOp::PartialPixel { color, pixel } => raster.add_partial_pixel(color, pixel),
            RasterOp::FullPixel { color, pixel } => raster.add_full_pixel(color, pixel),
            RasterOp::FullRegion { color, region } => raster.add_full_region(color, region),
        }
    }
}

pub struct AdaptiveAccumulator<'a> {
    program: &'a CompiledProgram,
    constant_color: Option<ColorF>,
    needs_centroid: bool,
    oops_limit: u32,
    ops: Vec<RasterOp>,
}

impl<'a> AdaptiveAccumulator<'a> {
    pub fn new(face: &'a RenderableFace, oops_limit: u32) -> AdaptiveAccumulator<'a> {
        AdaptiveAccumulator {
            program: &face.compiled,
            constant_color: face.program.is_constant_color(),
            needs_centroid: face.program.needs_centroid(),
            oops_limit,
            ops: vec![],
        }
    }

    /// Accumulates the part of `face` that lies within `region`.
    pub fn accumulate<F>(&mut self, face: &F, region: RectI) where F: ClippableFace {
        let face_bounds = face.bounds();
        if face_bounds.is_empty() {
            return;
        }
        let region = match region.intersection(face_bounds.round_out().to_i32()) {
            None => return,
            Some(region) => region,
        };

        if region.to_f64().contains_rect(face_bounds) {
            self.accumulate_region(face, region, face.area());
        } else {
            let clipped = face.bounds_clip(region.to_f64());
            let area = clipped.area();
            self.accumulate_region(&clipped, region, area);
        }
    }

    #[inline]
    pub fn ops(&self) -> &[RasterOp] {
        &self.ops
    }

    #[inline]
    pub fn into_ops(self) -> Vec<RasterOp> {
        self.ops
    }

    fn accumulate_region<F>(&mut self, face: &F, region: RectI, area: f64)
                            where F: ClippableFace {
        if area <= ZERO_AREA_EPSILON {
            return;
        }
        let region_area = region.area() as f64;
        if area >= region_area * (1.0 - FULL_AREA_EPSILON) {
            self.fill_region(region);
            return;
        }
        if region.width() == 1 && region.height() == 1 {
            self.partial_pixel(face, region, area);
            return;
        }

        let (min_region, max_region, axis) = region.split_longer_axis();
        let (min_face, max_face) = match axis {
            SplitAxis::X(x) => face.binary_x_clip(x as f64, region.min_y() as f64),
            SplitAxis::Y(y) => face.binary_y_clip(y as f64, region.min_x() as f64),
        };
        let (min_area, max_area) = (min_face.area(), max_face.area());
        self.accumulate_region(&min_face, min_region, min_area);
        self.accumulate_region(&max_face, max_region, max_area);
    }

    fn fill_region(&mut self, region: RectI) {
        if let Some(color) = self.constant_color {
            if region.width() == 1 && region.height() == 1 {
                self.ops.push(RasterOp::FullPixel { color, pixel: region.origin() });
            } else {
                self.ops.push(RasterOp::FullRegion { color, region });
            }
            return;
        }

        for y in region.min_y()..region.max_y() {
            for x in region.min_x()..region.max_x() {
                let pixel = vec2i(x, y);
                let bounds = pixel_bounds(pixel);
                let color = self.evaluate(1.0, bounds.center(), bounds);
                self.ops.push(RasterOp::FullPixel { color, pixel });
            }
        }
    }

    fn partial_pixel<F>(&mut self, face: &F, region: RectI, area: f64) where F: ClippableFace {
        let pixel = region.origin();
        let bounds = pixel_bounds(pixel);
        let centroid = if self.needs_centroid { face.centroid(area) } else { bounds.center() };
        let color = self.evaluate(area, centroid, bounds);
        self.ops.push(RasterOp::PartialPixel { color: color.scale(area as f32), pixel });
    }

    fn evaluate(&self, area: f64, centroid: Vector2F, bounds: RectF) -> ColorF {
        if let Some(color) = self.constant_color {
            return color;
        }
        let context = EvaluationContext { area, centroid, pixel_center: bounds.center(), bounds };
        self.program.evaluate(&context, self.oops_limit)
    }
}

#[inline]
fn pixel_bounds(pixel: Vector2I) -> RectF {
    RectI::new(pixel, vec2i(1, 1)).to_f64()
}

#[cfg(test)]
mod test {
    use super::{AdaptiveAccumulator, RasterOp};
    use crate::binder::RenderableFace;
    use crate::raster::{AccumulationRaster, OutputRaster};
    use facet_color::ColorF;
    use facet_content::face::{ClippableFace, ClippableFaceKind, PolygonalFace};
    use facet_content::gradient::Gradient;
    use facet_content::program::RenderProgram;
    use facet_geometry::line_segment::LineSegment2F;
    use facet_geometry::rect::RectI;
    use facet_geometry::util::approx_eq;
    use facet_geometry::vector::{vec2f, vec2i, Vector2F};

    fn white_face(polygon: Vec<Vector2F>) -> RenderableFace {
        let face = ClippableFaceKind::Polygonal(PolygonalFace::new(vec![polygon]));
        RenderableFace::new(face, RenderProgram::Constant(ColorF::white())).unwrap()
    }

    fn raster_bounds() -> RectI {
        RectI::from_points(vec2i(0, 0), vec2i(8, 8))
    }

    fn accumulate(face: &RenderableFace, edged: bool) -> AccumulationRaster {
        let mut accumulator = AdaptiveAccumulator::new(face, 10_000);
        if edged {
            accumulator.accumulate(&face.face.to_edged(), raster_bounds());
        } else {
            accumulator.accumulate(&face.face, raster_bounds());
        }
        let mut raster = AccumulationRaster::new(raster_bounds());
        for op in accumulator.ops() {
            op.apply(&mut raster);
        }
        raster
    }

    #[test]
    fn test_aligned_square_is_one_region() {
        let face = white_face(vec![vec2f(2.0, 2.0), vec2f(6.0, 2.0), vec2f(6.0, 6.0), vec2f(2.0, 6.0)]);
        let mut accumulator = AdaptiveAccumulator::new(&face, 10_000);
        accumulator.accumulate(&face.face, raster_bounds());
        assert_eq!(accumulator.into_ops(), vec![RasterOp::FullRegion {
            color: ColorF::white(),
            region: RectI::from_points(vec2i(2, 2), vec2i(6, 6)),
        }]);
    }

    #[test]
    fn test_half_pixel_triangle() {
        let face = white_face(vec![vec2f(1.0, 1.0), vec2f(2.0, 1.0), vec2f(2.0, 2.0)]);
        let raster = accumulate(&face, false);
        let pixel = raster.pixel(vec2i(1, 1)).unwrap();
        assert!(pixel.approx_eq(ColorF::new(0.5, 0.5, 0.5, 0.5), 1e-6));
        assert_eq!(raster.total_alpha(), 0.5);
    }

    #[test]
    fn test_face_clipped_to_region() {
        let face = white_face(vec![vec2f(-4.0, -4.0), vec2f(4.0, -4.0), vec2f(4.0, 4.0), vec2f(-4.0, 4.0)]);
        let raster = accumulate(&face, true);
        assert!(approx_eq(raster.total_alpha(), 16.0, 1e-9));
        assert_eq!(raster.pixel(vec2i(5, 5)), Some(ColorF::transparent_black()));
    }

    #[test]
    fn test_gradient_evaluated_per_pixel() {
        let mut gradient = Gradient::linear(LineSegment2F::new(vec2f(0.0, 0.0), vec2f(8.0, 0.0)));
        gradient.add(ColorF::black(), 0.0);
        gradient.add(ColorF::white(), 1.0);
        let polygon = vec![vec2f(0.0, 0.0), vec2f(8.0, 0.0), vec2f(8.0, 1.0), vec2f(0.0, 1.0)];
        let face = ClippableFaceKind::Polygonal(PolygonalFace::new(vec![polygon]));
        let face = RenderableFace::new(face, RenderProgram::Gradient(gradient)).unwrap();
        let mut accumulator = AdaptiveAccumulator::new(&face, 10_000);
        accumulator.accumulate(&face.face, raster_bounds());
        let ops = accumulator.into_ops();
        assert_eq!(ops.len(), 8);
        match ops[0] {
            RasterOp::FullPixel { color, pixel } => {
                assert_eq!(pixel, vec2i(0, 0));
                assert!(approx_eq(color.r as f64, 1.0 / 16.0, 1e-6));
            }
            _ => panic!("expected a full pixel"),
        }
    }

    #[test]
    fn test_coverage_conserves_area() {
        fn prop(points: Vec<(u8, u8)>, edged: bool) -> bool {
            if points.len() < 3 {
                return true;
            }
            let mut polygon: Vec<Vector2F> = points[..3].iter().map(|&(x, y)| {
                vec2f(x as f64 / 255.0 * 8.0, y as f64 / 255.0 * 8.0)
            }).collect();
            let area = PolygonalFace::new(vec![polygon.clone()]).area();
            if area < 0.0 {
                polygon.reverse();
            }
            let face = white_face(polygon);
            let raster = accumulate(&face, edged);
            approx_eq(raster.total_alpha(), area.abs(), 1e-5)
        }
        quickcheck::quickcheck(prop as fn(Vec<(u8, u8)>, bool) -> bool);
    }

    #[test]
    fn test_raster_op_targets() {
        let mut raster = AccumulationRaster::new(raster_bounds());
        RasterOp::PartialPixel { color: ColorF::white().scale(0.25), pixel: vec2i(0, 0) }
            .apply(&mut raster as &mut dyn OutputRaster);
        assert_eq!(raster.total_alpha(), 0.25);
    }
}
