// facet/color/src/lib.rs
//
// Copyright © 2024 The Facet Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Colors in 8-bit and floating point form.
//!
//! Floating point colors inside the rasterizer are premultiplied and linear unless stated
//! otherwise; `space` converts between the encodings.

use std::fmt::{self, Debug, Formatter};
use std::ops::{Add, AddAssign, Mul};

pub mod matrix;
pub mod space;

pub use crate::space::{ColorConversion, ColorSpace};

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ColorU {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl ColorU {
    #[inline]
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> ColorU {
        ColorU { r, g, b, a }
    }

    #[inline]
    pub fn from_u32(rgba: u32) -> ColorU {
        ColorU {
            r: (rgba >> 24) as u8,
            g: ((rgba >> 16) & 0xff) as u8,
            b: ((rgba >> 8) & 0xff) as u8,
            a: (rgba & 0xff) as u8,
        }
    }

    #[inline]
    pub fn transparent_black() -> ColorU {
        ColorU::default()
    }

    #[inline]
    pub fn black() -> ColorU {
        ColorU { r: 0, g: 0, b: 0, a: 255 }
    }

    /// Converts to a straight-alpha floating point color, without any transfer function.
    #[inline]
    pub fn to_f32(self) -> ColorF {
        let scale = 1.0 / 255.0;
        ColorF::new(self.r as f32 * scale,
                    self.g as f32 * scale,
                    self.b as f32 * scale,
                    self.a as f32 * scale)
    }

    #[inline]
    pub fn is_opaque(self) -> bool {
        self.a == 255
    }

    #[inline]
    pub fn is_fully_transparent(self) -> bool {
        self.a == 0
    }
}

impl Debug for ColorU {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        if self.a == 255 {
            write!(formatter, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(formatter,
                   "rgba({}, {}, {}, {})",
                   self.r,
                   self.g,
                   self.b,
                   self.a as f32 / 255.0)
        }
    }
}

#[derive(Clone, Copy, PartialEq, Default)]
pub struct ColorF {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ColorF {
    #[inline]
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> ColorF {
        ColorF { r, g, b, a }
    }

    #[inline]
    pub fn transparent_black() -> ColorF {
        ColorF::default()
    }

    #[inline]
    pub fn white() -> ColorF {
        ColorF::new(1.0, 1.0, 1.0, 1.0)
    }

    #[inline]
    pub fn black() -> ColorF {
        ColorF::new(0.0, 0.0, 0.0, 1.0)
    }

    /// The color substituted for a result whose evaluation hit an iteration cap.
    #[inline]
    pub fn oops() -> ColorF {
        ColorF::new(1.0, 0.0, 1.0, 1.0)
    }

    #[inline]
    pub fn to_u8(self) -> ColorU {
        fn channel(value: f32) -> u8 {
            (value.max(0.0).min(1.0) * 255.0).round() as u8
        }
        ColorU { r: channel(self.r), g: channel(self.g), b: channel(self.b), a: channel(self.a) }
    }

    #[inline]
    pub fn lerp(self, other: ColorF, t: f32) -> ColorF {
        self + (other + self.scale(-1.0)).scale(t)
    }

    #[inline]
    pub fn scale(self, factor: f32) -> ColorF {
        ColorF::new(self.r * factor, self.g * factor, self.b * factor, self.a * factor)
    }

    #[inline]
    pub fn premultiply(self) -> ColorF {
        ColorF::new(self.r * self.a, self.g * self.a, self.b * self.a, self.a)
    }

    /// The inverse of `premultiply`. Fully transparent colors become transparent black.
    #[inline]
    pub fn unpremultiply(self) -> ColorF {
        if self.a == 0.0 {
            ColorF::transparent_black()
        } else {
            let inv = 1.0 / self.a;
            ColorF::new(self.r * inv, self.g * inv, self.b * inv, self.a)
        }
    }

    /// Porter-Duff source-over, with `self` as the (premultiplied) source.
    #[inline]
    pub fn over(self, dest: ColorF) -> ColorF {
        self + dest.scale(1.0 - self.a)
    }

    #[inline]
    pub fn with_rgb(self, r: f32, g: f32, b: f32) -> ColorF {
        ColorF::new(r, g, b, self.a)
    }

    #[inline]
    pub fn is_fully_transparent(self) -> bool {
        self.a == 0.0 && self.r == 0.0 && self.g == 0.0 && self.b == 0.0
    }

    #[inline]
    pub fn is_opaque(self) -> bool {
        self.a >= 1.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub fn approx_eq(self, other: ColorF, epsilon: f32) -> bool {
        self.to_array().iter().zip(other.to_array().iter()).all(|(a, b)| (a - b).abs() <= epsilon)
    }
}

impl Debug for ColorF {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        write!(formatter, "rgbaf({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl Add<ColorF> for ColorF {
    type Output = ColorF;
    #[inline]
    fn add(self, other: ColorF) -> ColorF {
        ColorF::new(self.r + other.r, self.g + other.g, self.b + other.b, self.a + other.a)
    }
}

impl AddAssign<ColorF> for ColorF {
    #[inline]
    fn add_assign(&mut self, other: ColorF) {
        *self = *self + other
    }
}

impl Mul<f32> for ColorF {
    type Output = ColorF;
    #[inline]
    fn mul(self, factor: f32) -> ColorF {
        self.scale(factor)
    }
}
