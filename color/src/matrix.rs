// facet/color/src/matrix.rs
//
// Copyright © 2024 The Facet Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! 3×3 matrices acting on the RGB channels of a color.

use crate::ColorF;
use std::ops::Mul;

/// A row-major 3×3 matrix applied to the RGB channels, leaving alpha untouched.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ColorMatrix(pub [[f32; 3]; 3]);

impl ColorMatrix {
    #[inline]
    pub fn from_rows(rows: [[f32; 3]; 3]) -> ColorMatrix {
        ColorMatrix(rows)
    }

    #[inline]
    pub fn identity() -> ColorMatrix {
        ColorMatrix([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]])
    }

    #[inline]
    pub fn apply(&self, color: ColorF) -> ColorF {
        let m = &self.0;
        color.with_rgb(m[0][0] * color.r + m[0][1] * color.g + m[0][2] * color.b,
                       m[1][0] * color.r + m[1][1] * color.g + m[1][2] * color.b,
                       m[2][0] * color.r + m[2][1] * color.g + m[2][2] * color.b)
    }
}

impl Mul<ColorMatrix> for ColorMatrix {
    type Output = ColorMatrix;

    fn mul(self, other: ColorMatrix) -> ColorMatrix {
        let mut rows = [[0.0; 3]; 3];
        for (row_index, row) in rows.iter_mut().enumerate() {
            for (column_index, value) in row.iter_mut().enumerate() {
                *value = (0..3).map(|k| self.0[row_index][k] * other.0[k][column_index]).sum();
            }
        }
        ColorMatrix(rows)
    }
}

pub static LINEAR_SRGB_TO_LINEAR_DISPLAY_P3: ColorMatrix = ColorMatrix([
    [0.822_462_1, 0.177_538, 0.0],
    [0.033_194_1, 0.966_805_8, 0.0],
    [0.017_082_7, 0.072_397_4, 0.910_519_9],
]);

pub static LINEAR_DISPLAY_P3_TO_LINEAR_SRGB: ColorMatrix = ColorMatrix([
    [1.224_940_1, -0.224_940_4, 0.0],
    [-0.042_056_9, 1.042_057_1, 0.0],
    [-0.019_637_6, -0.078_636_1, 1.098_273_5],
]);

// Björn Ottosson's Oklab, split into the linear-to-LMS and LMS-to-Lab halves.
pub static LINEAR_SRGB_TO_OKLAB_LMS: ColorMatrix = ColorMatrix([
    [0.412_221_47, 0.536_332_54, 0.051_445_995],
    [0.211_903_5, 0.680_699_5, 0.107_396_96],
    [0.088_302_46, 0.281_718_84, 0.629_978_7],
]);

pub static OKLAB_LMS_TO_LAB: ColorMatrix = ColorMatrix([
    [0.210_454_26, 0.793_617_8, -0.004_072_047],
    [1.977_998_5, -2.428_592_2, 0.450_593_7],
    [0.025_904_037, 0.782_771_77, -0.808_675_77],
]);

pub static OKLAB_LAB_TO_LMS: ColorMatrix = ColorMatrix([
    [1.0, 0.396_337_78, 0.215_803_76],
    [1.0, -0.105_561_346, -0.063_854_17],
    [1.0, -0.089_484_18, -1.291_485_5],
]);

pub static OKLAB_LMS_TO_LINEAR_SRGB: ColorMatrix = ColorMatrix([
    [4.076_741_7, -3.307_711_6, 0.230_969_94],
    [-1.268_438, 2.609_757_4, -0.341_319_38],
    [-0.004_196_086_3, -0.703_418_6, 1.707_614_7],
]);
