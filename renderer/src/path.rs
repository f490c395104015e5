// facet/renderer/src/path.rs
//
// Copyright © 2024 The Facet Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Input paths.

use crate::error::RasterizeError;
use facet_content::edge::{self, LinearEdge};
use facet_content::fill::FillRule;
use facet_geometry::vector::Vector2F;

/// A set of closed polygonal subpaths filled with one fill rule. The closing edge of each subpath
/// is implicit.
#[derive(Clone, Debug, Default)]
pub struct RenderPath {
    pub fill_rule: FillRule,
    pub subpaths: Vec<Vec<Vector2F>>,
}

impl RenderPath {
    #[inline]
    pub fn new(fill_rule: FillRule, subpaths: Vec<Vec<Vector2F>>) -> RenderPath {
        RenderPath { fill_rule, subpaths }
    }

    /// Checks that every vertex is finite. `index` is this path's position in the input.
    pub fn validate(&self, index: usize) -> Result<(), RasterizeError> {
        for (subpath_index, subpath) in self.subpaths.iter().enumerate() {
            if let Some(point_index) = subpath.iter().position(|point| !point.is_finite()) {
                return Err(RasterizeError::NonFiniteCoordinate {
                    path: index,
                    subpath: subpath_index,
                    point: point_index,
                });
            }
        }
        Ok(())
    }

    #[inline]
    pub fn edges(&self) -> Vec<LinearEdge> {
        edge::polygons_to_edges(&self.subpaths)
    }
}

#[cfg(test)]
mod test {
    use super::RenderPath;
    use crate::error::RasterizeError;
    use facet_content::fill::FillRule;
    use facet_geometry::vector::vec2f;

    #[test]
    fn test_validate_reports_location() {
        let path = RenderPath::new(FillRule::Winding, vec![
            vec![vec2f(0.0, 0.0), vec2f(1.0, 0.0), vec2f(1.0, 1.0)],
            vec![vec2f(0.0, 0.0), vec2f(std::f64::NAN, 0.0), vec2f(1.0, 1.0)],
        ]);
        assert_eq!(path.validate(3),
                   Err(RasterizeError::NonFiniteCoordinate { path: 3, subpath: 1, point: 1 }));
        assert_eq!(path.edges().len(), 6);
    }
}
