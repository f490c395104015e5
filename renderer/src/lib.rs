// facet/renderer/src/lib.rs
//
// Copyright © 2024 The Facet Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! An analytically antialiased vector rasterizer.
//!
//! Paths are clipped to the raster, snapped onto an integer grid, and combined into one exact
//! planar arrangement. Each face of the arrangement gets the render program resolved for its
//! winding numbers, and its exact coverage is accumulated into an `OutputRaster`.

#[macro_use]
extern crate log;

pub mod accumulate;
pub mod binder;
pub mod bins;
pub mod error;
pub mod options;
pub mod path;
pub mod raster;
pub mod rasterize;
pub mod scan;
pub mod tile_map;
