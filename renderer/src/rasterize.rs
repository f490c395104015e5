// facet/renderer/src/rasterize.rs
//
// Copyright © 2024 The Facet Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The rasterization pipeline.

use crate::accumulate::{AdaptiveAccumulator, RasterOp};
use crate::binder::{self, RenderableFace};
use crate::bins::FaceBins;
use crate::error::RasterizeError;
use crate::options::{AccumulateMode, RasterizeOptions};
use crate::path::RenderPath;
use crate::raster::{AccumulationRaster, OutputRaster};
use facet_arrangement::concurrent::executor::{Executor, SequentialExecutor};
use facet_arrangement::concurrent::rayon::RayonExecutor;
use facet_arrangement::integer::IntegerScaler;
use facet_arrangement::Arrangement;
use facet_color::{ColorF, ColorU};
use facet_content::clip;
use facet_content::edge::{self, LinearEdge};
use facet_content::program::{PathId, RenderProgram};
use facet_geometry::rect::{RectF, RectI};
use instant::Instant;
use std::time::Duration;

/// Counts and stage timings of one `rasterize` call.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RasterizeStats {
    pub edge_count: usize,
    pub half_edge_count: usize,
    pub face_count: usize,
    pub renderable_face_count: usize,
    pub op_count: usize,
    pub clip_time: Duration,
    pub arrangement_time: Duration,
    pub bind_time: Duration,
    pub accumulate_time: Duration,
}

#[derive(Clone, Debug, Default)]
pub struct Rasterizer {
    options: RasterizeOptions,
}

impl Rasterizer {
    #[inline]
    pub fn new(options: RasterizeOptions) -> Rasterizer {
        Rasterizer { options }
    }

    #[inline]
    pub fn options(&self) -> &RasterizeOptions {
        &self.options
    }

    /// Encodes `raster` into the configured output color space, in row-major order.
    #[inline]
    pub fn finalize(&self, raster: &AccumulationRaster) -> Vec<ColorU> {
        raster.finalize(self.options.output_color_space)
    }

    /// Rasterizes `program` over the pixels of `bounds`, with the winding numbers of `paths`
    /// deciding every path boolean, and writes the coverage into `raster`.
    pub fn rasterize<R>(&self,
                        paths: &[RenderPath],
                        program: &RenderProgram,
                        bounds: RectI,
                        raster: &mut R)
                        -> Result<RasterizeStats, RasterizeError>
                        where R: OutputRaster + ?Sized {
        if self.options.parallel {
            self.rasterize_with(paths, program, bounds, raster, &RayonExecutor)
        } else {
            self.rasterize_with(paths, program, bounds, raster, &SequentialExecutor)
        }
    }

    fn rasterize_with<R, E>(&self,
                            paths: &[RenderPath],
                            program: &RenderProgram,
                            bounds: RectI,
                            raster: &mut R,
                            executor: &E)
                            -> Result<RasterizeStats, RasterizeError>
                            where R: OutputRaster + ?Sized, E: Executor {
        validate(paths, program, bounds)?;
        let mut stats = RasterizeStats::default();

        let start_time = Instant::now();
        let clip_bounds = bounds.to_f64();
        let mut path_edges: Vec<(PathId, Vec<LinearEdge>)> =
            executor.build_vector(paths.len(), |index| {
                (PathId(index as u32), clip::bounds_clip_edges(&paths[index].edges(), clip_bounds))
            });
        path_edges.push((PathId(paths.len() as u32), frame_edges(clip_bounds)));
        let scaler = IntegerScaler::new(clip_bounds, self.options.integer_precision_bits)?;
        let integer_edges = scaler.integer_edges(&path_edges)?;
        stats.edge_count = integer_edges.len();
        stats.clip_time = Instant::now() - start_time;
        debug!("clipped {} paths to {} integer edges in {:?}",
               paths.len(),
               stats.edge_count,
               stats.clip_time);

        let start_time = Instant::now();
        let arrangement = Arrangement::build(integer_edges, executor);
        stats.half_edge_count = arrangement.half_edges().len();
        stats.face_count = arrangement.faces.len();
        stats.arrangement_time = Instant::now() - start_time;
        debug!("built arrangement in {:?}", stats.arrangement_time);

        let start_time = Instant::now();
        let faces = binder::bind_faces(&arrangement,
                                       paths,
                                       program,
                                       &scaler.from_integer(),
                                       &self.options,
                                       executor)?;
        stats.renderable_face_count = faces.len();
        stats.bind_time = Instant::now() - start_time;

        let start_time = Instant::now();
        let ops = match self.options.accumulate_mode {
            AccumulateMode::PerFace => self.accumulate_per_face(&faces, bounds, executor),
            AccumulateMode::Binned => self.accumulate_binned(&faces, bounds, executor),
        };
        for op in &ops {
            op.apply(raster);
        }
        stats.op_count = ops.len();
        stats.accumulate_time = Instant::now() - start_time;
        debug!("accumulated {} faces into {} raster ops in {:?}",
               stats.renderable_face_count,
               stats.op_count,
               stats.accumulate_time);

        Ok(stats)
    }

    fn accumulate_per_face<E>(&self, faces: &[RenderableFace], bounds: RectI, executor: &E)
                              -> Vec<RasterOp>
                              where E: Executor {
        let oops_limit = self.options.oops_limit;
        executor.flatten_into_vector(faces.len(), |index| {
            let face = &faces[index];
            let mut accumulator = AdaptiveAccumulator::new(face, oops_limit);
            accumulator.accumulate(&face.face, bounds);
            accumulator.into_ops()
        })
    }

    fn accumulate_binned<E>(&self, faces: &[RenderableFace], bounds: RectI, executor: &E)
                            -> Vec<RasterOp>
                            where E: Executor {
        let oops_limit = self.options.oops_limit;
        let bins = FaceBins::build(faces, bounds, executor);
        executor.flatten_into_vector(bins.bin_count(), |bin| {
            let region = bins.bin_bounds(bin);
            let face_indices = match bins.faces_in_bin(bin, oops_limit) {
                None => return vec![RasterOp::FullRegion { color: ColorF::oops(), region }],
                Some(face_indices) => face_indices,
            };
            let mut ops = vec![];
            for face_index in face_indices {
                let face = &faces[face_index as usize];
                let mut accumulator = AdaptiveAccumulator::new(face, oops_limit);
                accumulator.accumulate(&face.face, region);
                ops.extend(accumulator.into_ops());
            }
            ops
        })
    }
}

fn validate(paths: &[RenderPath], program: &RenderProgram, bounds: RectI)
            -> Result<(), RasterizeError> {
    if bounds.is_empty() {
        return Err(RasterizeError::EmptyBounds);
    }
    for (index, path) in paths.iter().enumerate() {
        path.validate(index)?;
    }
    match program.referenced_paths().into_iter().find(|path| path.index() >= paths.len()) {
        Some(path) => Err(RasterizeError::UnknownPath(path)),
        None => Ok(()),
    }
}

/// A counterclockwise loop around the raster, so that every face inside it is bounded.
fn frame_edges(bounds: RectF) -> Vec<LinearEdge> {
    edge::polygons_to_edges(&[vec![
        bounds.origin(),
        bounds.upper_right(),
        bounds.lower_right(),
        bounds.lower_left(),
    ]])
}
