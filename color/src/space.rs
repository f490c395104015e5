// facet/color/src/space.rs
//
// Copyright © 2024 The Facet Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Color spaces and the conversions between them.
//!
//! All conversions act on straight (unpremultiplied) colors; alpha passes through.

use crate::ColorF;
use crate::matrix::{self, ColorMatrix};
use serde::{Deserialize, Serialize};

/// The encoding of the final output raster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorSpace {
    /// sRGB primaries with the sRGB transfer function.
    Srgb,
    /// sRGB primaries, no transfer function.
    LinearSrgb,
    /// Display P3 primaries with the sRGB transfer function.
    DisplayP3,
}

impl Default for ColorSpace {
    #[inline]
    fn default() -> ColorSpace {
        ColorSpace::Srgb
    }
}

impl ColorSpace {
    /// Encodes a straight-alpha linear sRGB color into this space.
    pub fn encode_linear_srgb(self, color: ColorF) -> ColorF {
        match self {
            ColorSpace::Srgb => ColorConversion::LinearToSrgb.apply(color),
            ColorSpace::LinearSrgb => color,
            ColorSpace::DisplayP3 => {
                let p3 = matrix::LINEAR_SRGB_TO_LINEAR_DISPLAY_P3.apply(color);
                ColorConversion::LinearToSrgb.apply(p3)
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorConversion {
    SrgbToLinear,
    LinearToSrgb,
    LinearSrgbToOklab,
    OklabToLinearSrgb,
    LinearSrgbToLinearDisplayP3,
    LinearDisplayP3ToLinearSrgb,
}

impl ColorConversion {
    pub fn apply(self, color: ColorF) -> ColorF {
        match self {
            ColorConversion::SrgbToLinear => {
                color.with_rgb(srgb_to_linear(color.r),
                               srgb_to_linear(color.g),
                               srgb_to_linear(color.b))
            }
            ColorConversion::LinearToSrgb => {
                color.with_rgb(linear_to_srgb(color.r),
                               linear_to_srgb(color.g),
                               linear_to_srgb(color.b))
            }
            ColorConversion::LinearSrgbToOklab => {
                let lms = matrix::LINEAR_SRGB_TO_OKLAB_LMS.apply(color);
                let lms = lms.with_rgb(lms.r.cbrt(), lms.g.cbrt(), lms.b.cbrt());
                matrix::OKLAB_LMS_TO_LAB.apply(lms)
            }
            ColorConversion::OklabToLinearSrgb => {
                let lms = matrix::OKLAB_LAB_TO_LMS.apply(color);
                let lms = lms.with_rgb(lms.r * lms.r * lms.r,
                                       lms.g * lms.g * lms.g,
                                       lms.b * lms.b * lms.b);
                matrix::OKLAB_LMS_TO_LINEAR_SRGB.apply(lms)
            }
            ColorConversion::LinearSrgbToLinearDisplayP3 => {
                matrix::LINEAR_SRGB_TO_LINEAR_DISPLAY_P3.apply(color)
            }
            ColorConversion::LinearDisplayP3ToLinearSrgb => {
                matrix::LINEAR_DISPLAY_P3_TO_LINEAR_SRGB.apply(color)
            }
        }
    }

    /// The conversion that undoes this one.
    pub fn inverse(self) -> ColorConversion {
        match self {
            ColorConversion::SrgbToLinear => ColorConversion::LinearToSrgb,
            ColorConversion::LinearToSrgb => ColorConversion::SrgbToLinear,
            ColorConversion::LinearSrgbToOklab => ColorConversion::OklabToLinearSrgb,
            ColorConversion::OklabToLinearSrgb => ColorConversion::LinearSrgbToOklab,
            ColorConversion::LinearSrgbToLinearDisplayP3 => {
                ColorConversion::LinearDisplayP3ToLinearSrgb
            }
            ColorConversion::LinearDisplayP3ToLinearSrgb => {
                ColorConversion::LinearSrgbToLinearDisplayP3
            }
        }
    }

    /// The gamut matrix for the purely linear conversions.
    pub fn matrix(self) -> Option<ColorMatrix> {
        match self {
            ColorConversion::LinearSrgbToLinearDisplayP3 => {
                Some(matrix::LINEAR_SRGB_TO_LINEAR_DISPLAY_P3)
            }
            ColorConversion::LinearDisplayP3ToLinearSrgb => {
                Some(matrix::LINEAR_DISPLAY_P3_TO_LINEAR_SRGB)
            }
            _ => None,
        }
    }
}

#[inline]
pub fn srgb_to_linear(value: f32) -> f32 {
    if value <= 0.04045 {
        value / 12.92
    } else {
        ((value + 0.055) / 1.055).powf(2.4)
    }
}

#[inline]
pub fn linear_to_srgb(value: f32) -> f32 {
    if value <= 0.003_130_8 {
        value * 12.92
    } else {
        1.055 * value.powf(1.0 / 2.4) - 0.055
    }
}

#[cfg(test)]
mod test {
    use super::{ColorConversion, ColorSpace, linear_to_srgb, srgb_to_linear};
    use crate::ColorF;

    #[test]
    fn test_transfer_function_round_trip() {
        for &value in &[0.0, 0.002, 0.04, 0.2, 0.5, 0.9, 1.0] {
            assert!((linear_to_srgb(srgb_to_linear(value)) - value).abs() < 1e-5);
        }
    }

    #[test]
    fn test_oklab_white_has_unit_lightness() {
        let lab = ColorConversion::LinearSrgbToOklab.apply(ColorF::white());
        assert!((lab.r - 1.0).abs() < 1e-3);
        assert!(lab.g.abs() < 1e-3 && lab.b.abs() < 1e-3);
        let back = ColorConversion::OklabToLinearSrgb.apply(lab);
        assert!(back.approx_eq(ColorF::white(), 1e-3));
    }

    #[test]
    fn test_linear_output_is_identity() {
        let color = ColorF::new(0.25, 0.5, 0.75, 1.0);
        assert_eq!(ColorSpace::LinearSrgb.encode_linear_srgb(color), color);
    }
}
