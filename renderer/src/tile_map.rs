// facet/renderer/src/tile_map.rs
//
// Copyright © 2024 The Facet Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use facet_geometry::rect::RectI;
use facet_geometry::vector::{vec2i, Vector2I};

/// Row-major storage with one entry per integer cell of `rect`.
#[derive(Clone, Debug)]
pub struct DenseTileMap<T> where T: Clone + Copy {
    pub data: Vec<T>,
    pub rect: RectI,
}

impl<T> DenseTileMap<T> where T: Clone + Copy {
    #[inline]
    pub fn from_value(value: T, rect: RectI) -> DenseTileMap<T> {
        DenseTileMap { data: vec![value; rect.area() as usize], rect }
    }

    #[inline]
    pub fn get(&self, coords: Vector2I) -> Option<&T> {
        self.coords_to_index(coords).and_then(|index| self.data.get(index))
    }

    #[inline]
    pub fn get_mut(&mut self, coords: Vector2I) -> Option<&mut T> {
        match self.coords_to_index(coords) {
            None => None,
            Some(index) => self.data.get_mut(index),
        }
    }

    #[inline]
    pub fn coords_to_index(&self, coords: Vector2I) -> Option<usize> {
        if self.rect.contains_point(coords) {
            Some(self.coords_to_index_unchecked(coords))
        } else {
            None
        }
    }

    #[inline]
    pub fn coords_to_index_unchecked(&self, coords: Vector2I) -> usize {
        (coords.y() - self.rect.min_y()) as usize * self.rect.width() as usize
            + (coords.x() - self.rect.min_x()) as usize
    }

    #[inline]
    pub fn index_to_coords(&self, index: usize) -> Vector2I {
        let (width, index) = (self.rect.width(), index as i32);
        self.rect.origin() + vec2i(index % width, index / width)
    }

    /// Applies `f` to every cell of `region` that lies within the map.
    pub fn for_each_in_rect<F>(&mut self, region: RectI, mut f: F) where F: FnMut(&mut T) {
        let region = match self.rect.intersection(region) {
            None => return,
            Some(region) => region,
        };
        for y in region.min_y()..region.max_y() {
            let start = self.coords_to_index_unchecked(vec2i(region.min_x(), y));
            let end = start + region.width() as usize;
            self.data[start..end].iter_mut().for_each(&mut f);
        }
    }
}
