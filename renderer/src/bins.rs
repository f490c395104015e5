// facet/renderer/src/bins.rs
//
// Copyright © 2024 The Facet Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Per-bin face lists for binned accumulation.
//!
//! The raster is divided into 16×16 pixel bins. Lists are built in three stages: every face counts
//! the bins its bounds touch, the counts are scanned into offsets, and every face scatters its
//! bins into its slice of a shared entry buffer. A final patch pass links the entries of each bin
//! into a singly-linked list in face order.

use crate::binder::RenderableFace;
use crate::scan::{self, WORKGROUP_SIZE};
use crate::tile_map::DenseTileMap;
use facet_arrangement::concurrent::executor::Executor;
use facet_geometry::rect::RectI;
use facet_geometry::util;
use facet_geometry::vector::{vec2i, Vector2I};

pub const BIN_SIZE: i32 = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BinEntry {
    pub face: u32,
    pub next: Option<u32>,
}

#[derive(Clone, Debug)]
pub struct FaceBins {
    heads: DenseTileMap<Option<u32>>,
    entries: Vec<BinEntry>,
    bounds: RectI,
}

impl FaceBins {
    pub fn build<E>(faces: &[RenderableFace], bounds: RectI, executor: &E) -> FaceBins
                    where E: Executor {
        let bin_rect = RectI::from_points(vec2i(0, 0),
                                          vec2i(util::alignup_i32(bounds.width(), BIN_SIZE),
                                                util::alignup_i32(bounds.height(), BIN_SIZE)));
        let ranges: Vec<Option<RectI>> = executor.build_vector(faces.len(), |index| {
            bin_range(&faces[index], bounds)
        });

        // Count.
        let counts: Vec<u32> =
            ranges.iter().map(|range| range.map_or(0, |range| range.area() as u32)).collect();
        let scan = scan::exclusive_scan(&counts, WORKGROUP_SIZE, executor);

        // Scatter.
        let face_bins: Vec<Vec<u32>> = executor.build_vector(faces.len(), |index| {
            let range = match ranges[index] {
                None => return vec![],
                Some(range) => range,
            };
            let mut bins = Vec::with_capacity(counts[index] as usize);
            for y in range.min_y()..range.max_y() {
                for x in range.min_x()..range.max_x() {
                    bins.push(bin_rect_index(bin_rect, vec2i(x, y)) as u32);
                }
            }
            bins
        });
        let mut slots = vec![0; scan.total as usize];
        for (index, bins) in face_bins.iter().enumerate() {
            let offset = scan.offsets[index] as usize;
            slots[offset..(offset + bins.len())].copy_from_slice(bins);
        }
        let mut entries = vec![BinEntry { face: 0, next: None }; slots.len()];
        for (index, bins) in face_bins.iter().enumerate() {
            let offset = scan.offsets[index] as usize;
            for entry in &mut entries[offset..(offset + bins.len())] {
                entry.face = index as u32;
            }
        }

        // Patch. Linking back to front leaves each list in face order.
        let mut heads = DenseTileMap::from_value(None, bin_rect);
        for (index, &bin) in slots.iter().enumerate().rev() {
            let head = &mut heads.data[bin as usize];
            entries[index].next = *head;
            *head = Some(index as u32);
        }

        debug!("binned {} faces into {} entries over {}×{} bins",
               faces.len(),
               entries.len(),
               bin_rect.width(),
               bin_rect.height());
        FaceBins { heads, entries, bounds }
    }

    #[inline]
    pub fn bin_count(&self) -> usize {
        self.heads.data.len()
    }

    #[inline]
    pub fn entries(&self) -> &[BinEntry] {
        &self.entries
    }

    /// The pixels covered by a bin, clipped to the raster.
    pub fn bin_bounds(&self, bin: usize) -> RectI {
        let origin = self.bounds.origin() + self.heads.index_to_coords(bin).scale(BIN_SIZE);
        let rect = RectI::new(origin, Vector2I::splat(BIN_SIZE));
        rect.intersection(self.bounds).unwrap_or(rect)
    }

    /// The faces touching `bin`, in face order. `None` if the walk takes more than `oops_limit`
    /// steps.
    pub fn faces_in_bin(&self, bin: usize, oops_limit: u32) -> Option<Vec<u32>> {
        let mut faces = vec![];
        let mut next = self.heads.data[bin];
        while let Some(index) = next {
            if faces.len() as u32 >= oops_limit {
                warn!("face list of bin {} exceeded {} entries", bin, oops_limit);
                return None;
            }
            let entry = self.entries[index as usize];
            faces.push(entry.face);
            next = entry.next;
        }
        Some(faces)
    }
}

fn bin_range(face: &RenderableFace, bounds: RectI) -> Option<RectI> {
    if face.bounds.is_empty() {
        return None;
    }
    let pixels = face.bounds.round_out().to_i32().intersection(bounds)?;
    let min = pixels.origin() - bounds.origin();
    let max = pixels.lower_right() - bounds.origin() - Vector2I::splat(1);
    Some(RectI::from_points(vec2i(min.x() / BIN_SIZE, min.y() / BIN_SIZE),
                            vec2i(max.x() / BIN_SIZE + 1, max.y() / BIN_SIZE + 1)))
}

#[inline]
fn bin_rect_index(bin_rect: RectI, coords: Vector2I) -> usize {
    (coords.y() * bin_rect.width() + coords.x()) as usize
}
