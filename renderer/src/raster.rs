// facet/renderer/src/raster.rs
//
// Copyright © 2024 The Facet Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Destinations for accumulated coverage.

use crate::tile_map::DenseTileMap;
use facet_color::space::ColorSpace;
use facet_color::{ColorF, ColorU};
use facet_geometry::rect::RectI;
use facet_geometry::vector::Vector2I;

/// Receives premultiplied linear colors from the accumulator.
pub trait OutputRaster {
    /// Adds `color`, already weighted by coverage, to a pixel.
    fn add_partial_pixel(&mut self, color: ColorF, pixel: Vector2I);
    /// Overwrites a fully covered pixel.
    fn add_full_pixel(&mut self, color: ColorF, pixel: Vector2I);
    /// Overwrites a fully covered rectangle of pixels.
    fn add_full_region(&mut self, color: ColorF, region: RectI);
}

/// A raster of premultiplied linear sRGB accumulators in double precision.
#[derive(Clone, Debug)]
pub struct AccumulationRaster {
    accumulators: DenseTileMap<[f64; 4]>,
}

impl AccumulationRaster {
    pub fn new(bounds: RectI) -> AccumulationRaster {
        AccumulationRaster { accumulators: DenseTileMap::from_value([0.0; 4], bounds) }
    }

    #[inline]
    pub fn bounds(&self) -> RectI {
        self.accumulators.rect
    }

    /// The accumulated premultiplied color, or `None` outside the bounds.
    pub fn pixel(&self, pixel: Vector2I) -> Option<ColorF> {
        self.accumulators.get(pixel).map(|&[r, g, b, a]| {
            ColorF::new(r as f32, g as f32, b as f32, a as f32)
        })
    }

    /// The sum of alpha over all pixels, which is the covered area for opaque programs.
    pub fn total_alpha(&self) -> f64 {
        self.accumulators.data.iter().map(|accumulator| accumulator[3]).sum()
    }

    /// Unpremultiplies, encodes into `color_space`, and quantizes every pixel in row-major order.
    /// Alpha is clamped to 1.
    pub fn finalize(&self, color_space: ColorSpace) -> Vec<ColorU> {
        self.accumulators.data.iter().map(|&[r, g, b, a]| {
            if a <= 0.0 {
                return ColorU::transparent_black();
            }
            let straight = ColorF::new((r / a) as f32, (g / a) as f32, (b / a) as f32, 1.0);
            let mut encoded = color_space.encode_linear_srgb(straight);
            encoded.a = a.min(1.0) as f32;
            encoded.to_u8()
        }).collect()
    }
}

#[inline]
fn to_accumulator(color: ColorF) -> [f64; 4] {
    [color.r as f64, color.g as f64, color.b as f64, color.a as f64]
}

impl OutputRaster for AccumulationRaster {
    fn add_partial_pixel(&mut self, color: ColorF, pixel: Vector2I) {
        if let Some(accumulator) = self.accumulators.get_mut(pixel) {
            for (channel, value) in accumulator.iter_mut().zip(to_accumulator(color).iter()) {
                *channel += value;
            }
        }
    }

    fn add_full_pixel(&mut self, color: ColorF, pixel: Vector2I) {
        if let Some(accumulator) = self.accumulators.get_mut(pixel) {
            *accumulator = to_accumulator(color);
        }
    }

    fn add_full_region(&mut self, color: ColorF, region: RectI) {
        let value = to_accumulator(color);
        self.accumulators.for_each_in_rect(region, |accumulator| *accumulator = value);
    }
}

#[cfg(test)]
mod test {
    use super::{AccumulationRaster, OutputRaster};
    use facet_color::space::ColorSpace;
    use facet_color::{ColorF, ColorU};
    use facet_geometry::rect::RectI;
    use facet_geometry::vector::vec2i;

    #[test]
    fn test_partial_pixels_add_and_full_pixels_overwrite() {
        let mut raster = AccumulationRaster::new(RectI::from_points(vec2i(0, 0), vec2i(2, 2)));
        let red = ColorF::new(1.0, 0.0, 0.0, 1.0);
        raster.add_partial_pixel(red.scale(0.25), vec2i(0, 0));
        raster.add_partial_pixel(red.scale(0.25), vec2i(0, 0));
        raster.add_full_pixel(red, vec2i(1, 0));
        raster.add_full_region(ColorF::white(), RectI::from_points(vec2i(1, 0), vec2i(2, 2)));
        raster.add_partial_pixel(red, vec2i(5, 5));

        assert_eq!(raster.pixel(vec2i(0, 0)), Some(ColorF::new(0.5, 0.0, 0.0, 0.5)));
        assert_eq!(raster.pixel(vec2i(1, 0)), Some(ColorF::white()));
        assert_eq!(raster.pixel(vec2i(5, 5)), None);
        assert_eq!(raster.total_alpha(), 2.5);
    }

    #[test]
    fn test_finalize_unpremultiplies_and_clamps() {
        let mut raster = AccumulationRaster::new(RectI::from_points(vec2i(0, 0), vec2i(3, 1)));
        raster.add_partial_pixel(ColorF::new(0.5, 0.0, 0.0, 0.5), vec2i(0, 0));
        raster.add_partial_pixel(ColorF::new(0.8, 0.8, 0.8, 0.8), vec2i(1, 0));
        raster.add_partial_pixel(ColorF::new(0.8, 0.8, 0.8, 0.8), vec2i(1, 0));
        let pixels = raster.finalize(ColorSpace::LinearSrgb);
        assert_eq!(pixels, vec![
            ColorU::new(255, 0, 0, 128),
            ColorU::new(255, 255, 255, 255),
            ColorU::transparent_black(),
        ]);
    }
}
