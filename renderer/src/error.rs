// facet/renderer/src/error.rs
//
// Copyright © 2024 The Facet Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Errors reported for malformed rasterizer input.

use facet_arrangement::integer::ScaleError;
use facet_content::instructions::ProgramError;
use facet_content::program::PathId;
use std::error::Error;
use std::fmt::{self, Display, Formatter};

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum RasterizeError {
    /// A path vertex was NaN or infinite.
    NonFiniteCoordinate { path: usize, subpath: usize, point: usize },
    /// The raster bounds have no area.
    EmptyBounds,
    /// The bounds or precision do not fit the integer frame.
    BoundsTooLarge,
    /// The program refers to a path that was not supplied.
    UnknownPath(PathId),
    Program(ProgramError),
}

impl Display for RasterizeError {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        match *self {
            RasterizeError::NonFiniteCoordinate { path, subpath, point } => {
                write!(formatter,
                       "point {} of subpath {} of path {} is not finite",
                       point,
                       subpath,
                       path)
            }
            RasterizeError::EmptyBounds => write!(formatter, "raster bounds are empty"),
            RasterizeError::BoundsTooLarge => {
                write!(formatter, "raster bounds do not fit the integer frame")
            }
            RasterizeError::UnknownPath(path) => write!(formatter, "unknown path {}", path),
            RasterizeError::Program(ref error) => write!(formatter, "{}", error),
        }
    }
}

impl Error for RasterizeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            RasterizeError::Program(ref error) => Some(error),
            _ => None,
        }
    }
}

impl From<ProgramError> for RasterizeError {
    #[inline]
    fn from(error: ProgramError) -> RasterizeError {
        RasterizeError::Program(error)
    }
}

impl From<ScaleError> for RasterizeError {
    fn from(error: ScaleError) -> RasterizeError {
        match error {
            ScaleError::EmptyBounds => RasterizeError::EmptyBounds,
            ScaleError::PrecisionOutOfRange(_) | ScaleError::CoordinateOutOfRange(_) => {
                RasterizeError::BoundsTooLarge
            }
        }
    }
}
