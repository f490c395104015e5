// facet/renderer/src/options.rs
//
// Copyright © 2024 The Facet Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Options that control how rasterization is to be performed.

use facet_color::space::ColorSpace;
use serde::{Deserialize, Serialize};

/// How faces are scheduled onto the raster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccumulateMode {
    /// Each face is accumulated over its own bounds.
    PerFace,
    /// Faces are sorted into 16×16 pixel bins, and each bin walks its face list.
    Binned,
}

/// The geometric representation faces are clipped in during accumulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaceRepresentation {
    Polygonal,
    Edged,
}

/// Options that influence rasterization.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterizeOptions {
    pub accumulate_mode: AccumulateMode,
    pub face_representation: FaceRepresentation,
    /// Merges faces whose bound programs are identical before accumulation.
    pub combine_faces: bool,
    /// Runs the parallel stages on the rayon thread pool.
    pub parallel: bool,
    /// Caps every loop whose length depends on the input. Overruns yield the oops color.
    pub oops_limit: u32,
    pub output_color_space: ColorSpace,
    /// Bits of integer precision along the longer side of the raster bounds.
    pub integer_precision_bits: u32,
}

impl Default for RasterizeOptions {
    fn default() -> RasterizeOptions {
        RasterizeOptions {
            accumulate_mode: AccumulateMode::PerFace,
            face_representation: FaceRepresentation::Polygonal,
            combine_faces: true,
            parallel: true,
            oops_limit: 10_000,
            output_color_space: ColorSpace::Srgb,
            integer_precision_bits: 20,
        }
    }
}

impl RasterizeOptions {
    /// Reads options from JSON. Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<RasterizeOptions, serde_json::Error> {
        serde_json::from_str(json)
    }
}
