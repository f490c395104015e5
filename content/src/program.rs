// facet/content/src/program.rs
//
// Copyright © 2024 The Facet Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Render programs: trees that compute a color for a region given which paths contain it.

use crate::gradient::{Gradient, GradientAccuracy};
use facet_color::{ColorConversion, ColorF};
use facet_geometry::line_segment::LineSegment2F;
use facet_geometry::vector::Vector2F;
use std::fmt::{self, Display, Formatter};

/// The index of a path in the list handed to the rasterizer.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct PathId(pub u32);

impl PathId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl Display for PathId {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        write!(formatter, "path {}", self.0)
    }
}

/// A color program. Colors are premultiplied and linear unless converted by the program itself.
#[derive(Clone, PartialEq, Debug)]
pub enum RenderProgram {
    Constant(ColorF),
    /// Evaluates `inside` where the region is inside `path` under its fill rule, and `outside`
    /// elsewhere. Removed entirely by `simplify`.
    PathBoolean {
        path: PathId,
        inside: Box<RenderProgram>,
        outside: Box<RenderProgram>,
    },
    /// Source-over composition; later children are drawn on top.
    Stack(Vec<RenderProgram>),
    Alpha(Box<RenderProgram>, f32),
    Premultiply(Box<RenderProgram>),
    Unpremultiply(Box<RenderProgram>),
    ColorSpaceConversion(Box<RenderProgram>, ColorConversion),
    Gradient(Gradient),
    LinearBlend(LinearBlend),
}

/// Interpolates between two programs along a line, clamped at both ends.
#[derive(Clone, PartialEq, Debug)]
pub struct LinearBlend {
    pub line: LineSegment2F,
    pub accuracy: GradientAccuracy,
    pub zero: Box<RenderProgram>,
    pub one: Box<RenderProgram>,
}

impl LinearBlend {
    #[inline]
    pub fn ratio(&self, point: Vector2F) -> f64 {
        clamped_line_ratio(self.line, point)
    }
}

/// The projection parameter of `point` onto `line`, clamped to [0, 1].
pub fn clamped_line_ratio(line: LineSegment2F, point: Vector2F) -> f64 {
    let delta = line.vector();
    let length = delta.square_length();
    if length == 0.0 {
        return 0.0;
    }
    ((point - line.from()).dot(delta) / length).max(0.0).min(1.0)
}

impl RenderProgram {
    #[inline]
    pub fn transparent() -> RenderProgram {
        RenderProgram::Constant(ColorF::transparent_black())
    }

    /// A program that is `color` inside `path` and transparent outside it.
    #[inline]
    pub fn fill(path: PathId, color: ColorF) -> RenderProgram {
        RenderProgram::PathBoolean {
            path,
            inside: Box::new(RenderProgram::Constant(color)),
            outside: Box::new(RenderProgram::transparent()),
        }
    }

    /// Resolves every `PathBoolean` using `is_inside` and folds constant subtrees.
    pub fn simplify(&self, is_inside: &dyn Fn(PathId) -> bool) -> RenderProgram {
        match *self {
            RenderProgram::Constant(color) => RenderProgram::Constant(color),
            RenderProgram::PathBoolean { path, ref inside, ref outside } => {
                if is_inside(path) {
                    inside.simplify(is_inside)
                } else {
                    outside.simplify(is_inside)
                }
            }
            RenderProgram::Stack(ref children) => {
                simplify_stack(children.iter().map(|child| child.simplify(is_inside)).collect())
            }
            RenderProgram::Alpha(ref child, alpha) => {
                if alpha == 0.0 {
                    return RenderProgram::transparent();
                }
                let child = child.simplify(is_inside);
                if alpha == 1.0 {
                    return child;
                }
                match child {
                    RenderProgram::Constant(color) => RenderProgram::Constant(color.scale(alpha)),
                    child => RenderProgram::Alpha(Box::new(child), alpha),
                }
            }
            RenderProgram::Premultiply(ref child) => {
                match child.simplify(is_inside) {
                    RenderProgram::Constant(color) => RenderProgram::Constant(color.premultiply()),
                    child => RenderProgram::Premultiply(Box::new(child)),
                }
            }
            RenderProgram::Unpremultiply(ref child) => {
                match child.simplify(is_inside) {
                    RenderProgram::Constant(color) => {
                        RenderProgram::Constant(color.unpremultiply())
                    }
                    child => RenderProgram::Unpremultiply(Box::new(child)),
                }
            }
            RenderProgram::ColorSpaceConversion(ref child, conversion) => {
                match child.simplify(is_inside) {
                    RenderProgram::Constant(color) => {
                        RenderProgram::Constant(conversion.apply(color))
                    }
                    child => RenderProgram::ColorSpaceConversion(Box::new(child), conversion),
                }
            }
            RenderProgram::Gradient(ref gradient) => {
                match gradient.constant_color() {
                    Some(color) if !gradient.is_radial() => RenderProgram::Constant(color),
                    _ => RenderProgram::Gradient(gradient.clone()),
                }
            }
            RenderProgram::LinearBlend(ref blend) => {
                let zero = blend.zero.simplify(is_inside);
                let one = blend.one.simplify(is_inside);
                if zero == one {
                    return zero;
                }
                RenderProgram::LinearBlend(LinearBlend {
                    line: blend.line,
                    accuracy: blend.accuracy,
                    zero: Box::new(zero),
                    one: Box::new(one),
                })
            }
        }
    }

    #[inline]
    pub fn is_constant_color(&self) -> Option<ColorF> {
        match *self {
            RenderProgram::Constant(color) => Some(color),
            _ => None,
        }
    }

    #[inline]
    pub fn is_fully_transparent(&self) -> bool {
        match *self {
            RenderProgram::Constant(color) => color.is_fully_transparent(),
            _ => false,
        }
    }

    /// True if evaluating this program needs the centroid of the covered area.
    pub fn needs_centroid(&self) -> bool {
        match *self {
            RenderProgram::Constant(_) => false,
            RenderProgram::PathBoolean { ref inside, ref outside, .. } => {
                inside.needs_centroid() || outside.needs_centroid()
            }
            RenderProgram::Stack(ref children) => children.iter().any(|child| child.needs_centroid()),
            RenderProgram::Alpha(ref child, _) |
            RenderProgram::Premultiply(ref child) |
            RenderProgram::Unpremultiply(ref child) |
            RenderProgram::ColorSpaceConversion(ref child, _) => child.needs_centroid(),
            RenderProgram::Gradient(ref gradient) => {
                gradient.accuracy == GradientAccuracy::Centroid
            }
            RenderProgram::LinearBlend(ref blend) => {
                blend.accuracy == GradientAccuracy::Centroid ||
                    blend.zero.needs_centroid() ||
                    blend.one.needs_centroid()
            }
        }
    }

    /// The sorted list of paths this program distinguishes.
    pub fn referenced_paths(&self) -> Vec<PathId> {
        let mut paths = vec![];
        self.push_referenced_paths(&mut paths);
        paths.sort();
        paths.dedup();
        paths
    }

    fn push_referenced_paths(&self, paths: &mut Vec<PathId>) {
        match *self {
            RenderProgram::Constant(_) | RenderProgram::Gradient(_) => {}
            RenderProgram::PathBoolean { path, ref inside, ref outside } => {
                paths.push(path);
                inside.push_referenced_paths(paths);
                outside.push_referenced_paths(paths);
            }
            RenderProgram::Stack(ref children) => {
                children.iter().for_each(|child| child.push_referenced_paths(paths))
            }
            RenderProgram::Alpha(ref child, _) |
            RenderProgram::Premultiply(ref child) |
            RenderProgram::Unpremultiply(ref child) |
            RenderProgram::ColorSpaceConversion(ref child, _) => {
                child.push_referenced_paths(paths)
            }
            RenderProgram::LinearBlend(ref blend) => {
                blend.zero.push_referenced_paths(paths);
                blend.one.push_referenced_paths(paths);
            }
        }
    }
}

fn simplify_stack(children: Vec<RenderProgram>) -> RenderProgram {
    let mut children: Vec<RenderProgram> =
        children.into_iter().filter(|child| !child.is_fully_transparent()).collect();

    // Nothing below an opaque constant is visible.
    if let Some(index) = children.iter().rposition(|child| {
        child.is_constant_color().map_or(false, |color| color.is_opaque())
    }) {
        children.drain(0..index);
    }

    if children.iter().all(|child| child.is_constant_color().is_some()) {
        let color = children.iter().fold(ColorF::transparent_black(), |dest, child| {
            child.is_constant_color().unwrap_or_default().over(dest)
        });
        return RenderProgram::Constant(color);
    }

    if children.len() == 1 {
        return children.remove(0);
    }
    RenderProgram::Stack(children)
}

#[cfg(test)]
mod test {
    use super::{PathId, RenderProgram};
    use crate::gradient::Gradient;
    use facet_color::ColorF;
    use facet_geometry::vector::vec2f;

    fn red() -> ColorF {
        ColorF::new(1.0, 0.0, 0.0, 1.0)
    }

    #[test]
    fn test_path_boolean_resolution() {
        let program = RenderProgram::fill(PathId(3), red());
        assert_eq!(program.simplify(&|_| true).is_constant_color(), Some(red()));
        assert!(program.simplify(&|_| false).is_fully_transparent());
        assert_eq!(program.referenced_paths(), vec![PathId(3)]);
    }

    #[test]
    fn test_stack_folding() {
        let half_blue = ColorF::new(0.0, 0.0, 0.5, 0.5);
        let program = RenderProgram::Stack(vec![
            RenderProgram::fill(PathId(0), red()),
            RenderProgram::fill(PathId(1), half_blue),
        ]);
        let both = program.simplify(&|_| true).is_constant_color().unwrap();
        assert_eq!(both, ColorF::new(0.5, 0.0, 0.5, 1.0));
        let bottom = program.simplify(&|path| path == PathId(0)).is_constant_color();
        assert_eq!(bottom, Some(red()));
        assert_eq!(program.referenced_paths(), vec![PathId(0), PathId(1)]);
    }

    #[test]
    fn test_opaque_layer_hides_below() {
        let mut gradient = Gradient::linear_from_points(vec2f(0.0, 0.0), vec2f(1.0, 0.0));
        gradient.add(ColorF::black(), 0.0);
        gradient.add(ColorF::white(), 1.0);
        let program = RenderProgram::Stack(vec![
            RenderProgram::Gradient(gradient.clone()),
            RenderProgram::Constant(red()),
        ]);
        assert_eq!(program.simplify(&|_| true), RenderProgram::Constant(red()));

        let program = RenderProgram::Stack(vec![
            RenderProgram::Constant(red()),
            RenderProgram::Alpha(Box::new(RenderProgram::Gradient(gradient.clone())), 0.5),
        ]);
        let simplified = program.simplify(&|_| true);
        assert!(simplified.is_constant_color().is_none());
        assert!(simplified.needs_centroid());
    }
}
