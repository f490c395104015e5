// facet/content/src/gradient.rs
//
// Copyright © 2024 The Facet Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use facet_color::ColorF;
use facet_geometry::line_segment::LineSegment2F;
use facet_geometry::vector::Vector2F;

#[derive(Clone, PartialEq, Debug)]
pub struct Gradient {
    /// The line this gradient runs along.
    ///
    /// If this is a radial gradient, this is the line that connects the centers of the two
    /// circles. It may have zero length in the case of simple radial gradients.
    pub line: LineSegment2F,
    /// For radial gradients, the radii of the start and end circles respectively. If this is a
    /// linear gradient, this is `None`.
    pub radii: Option<(f64, f64)>,
    pub extend: GradientExtend,
    pub accuracy: GradientAccuracy,
    stops: Vec<ColorStop>,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ColorStop {
    pub offset: f32,
    pub color: ColorF,
}

/// What happens to ratios outside the [0, 1] range of the color stops.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GradientExtend {
    Pad,
    Repeat,
    Reflect,
}

/// Where a gradient is sampled for a partially covered pixel.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GradientAccuracy {
    /// At the centroid of the covered area. Exact for linear gradients.
    Centroid,
    /// At the pixel center, regardless of coverage.
    PixelCenter,
}

impl Default for GradientExtend {
    #[inline]
    fn default() -> GradientExtend {
        GradientExtend::Pad
    }
}

impl Gradient {
    #[inline]
    pub fn linear(line: LineSegment2F) -> Gradient {
        Gradient {
            line,
            radii: None,
            extend: GradientExtend::Pad,
            accuracy: GradientAccuracy::Centroid,
            stops: vec![],
        }
    }

    #[inline]
    pub fn linear_from_points(from: Vector2F, to: Vector2F) -> Gradient {
        Gradient::linear(LineSegment2F::new(from, to))
    }

    #[inline]
    pub fn radial(line: LineSegment2F, radii: (f64, f64)) -> Gradient {
        Gradient { radii: Some(radii), ..Gradient::linear(line) }
    }

    #[inline]
    pub fn with_extend(mut self, extend: GradientExtend) -> Gradient {
        self.extend = extend;
        self
    }

    #[inline]
    pub fn with_accuracy(mut self, accuracy: GradientAccuracy) -> Gradient {
        self.accuracy = accuracy;
        self
    }

    /// Inserts a stop, keeping stops sorted by offset. Stops with equal offsets keep insertion
    /// order, which allows hard transitions.
    pub fn add_color_stop(&mut self, stop: ColorStop) {
        let index = self.stops
                        .iter()
                        .position(|other| other.offset > stop.offset)
                        .unwrap_or(self.stops.len());
        self.stops.insert(index, stop);
    }

    #[inline]
    pub fn add(&mut self, color: ColorF, offset: f32) {
        self.add_color_stop(ColorStop { offset, color })
    }

    #[inline]
    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    #[inline]
    pub fn is_radial(&self) -> bool {
        self.radii.is_some()
    }

    /// Returns the single color of this gradient if all of its stops agree.
    pub fn constant_color(&self) -> Option<ColorF> {
        match self.stops.first() {
            None => Some(ColorF::transparent_black()),
            Some(first) if self.stops.iter().all(|stop| stop.color == first.color) => {
                Some(first.color)
            }
            Some(_) => None,
        }
    }

    /// The unextended gradient ratio at `point`, or `None` where a radial gradient is undefined.
    pub fn ratio(&self, point: Vector2F) -> Option<f64> {
        let (from, delta) = (self.line.from(), self.line.vector());
        let (start_radius, end_radius) = match self.radii {
            None => {
                let length = delta.square_length();
                if length == 0.0 {
                    return Some(0.0);
                }
                return Some((point - from).dot(delta) / length);
            }
            Some(radii) => radii,
        };

        // Solve |point - center(t)| = radius(t) for the largest t with a non-negative radius.
        let offset = point - from;
        let radius_delta = end_radius - start_radius;
        let a = delta.square_length() - radius_delta * radius_delta;
        let b = offset.dot(delta) + start_radius * radius_delta;
        let c = offset.square_length() - start_radius * start_radius;
        let radius_at = |t: f64| start_radius + t * radius_delta;
        if a == 0.0 {
            if b == 0.0 {
                return None;
            }
            let t = c / (2.0 * b);
            return if radius_at(t) >= 0.0 { Some(t) } else { None };
        }

        let discriminant = b * b - a * c;
        if discriminant < 0.0 {
            return None;
        }
        let root = discriminant.sqrt();
        let (t0, t1) = ((b + root) / a, (b - root) / a);
        let (larger, smaller) = if t0 >= t1 { (t0, t1) } else { (t1, t0) };
        if radius_at(larger) >= 0.0 {
            Some(larger)
        } else if radius_at(smaller) >= 0.0 {
            Some(smaller)
        } else {
            None
        }
    }

    pub fn extend_ratio(&self, t: f64) -> f64 {
        match self.extend {
            GradientExtend::Pad => t.max(0.0).min(1.0),
            GradientExtend::Repeat => t - t.floor(),
            GradientExtend::Reflect => {
                let t = t.rem_euclid(2.0);
                if t > 1.0 { 2.0 - t } else { t }
            }
        }
    }

    /// Returns the color at the given (extended) ratio. The stop search is capped at
    /// `oops_limit` steps; `None` is returned if the cap is hit.
    pub fn sample(&self, t: f64, oops_limit: u32) -> Option<ColorF> {
        let (first, last) = match (self.stops.first(), self.stops.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Some(ColorF::transparent_black()),
        };
        let t = t as f32;
        if t <= first.offset {
            return Some(first.color);
        }
        if t >= last.offset {
            return Some(last.color);
        }

        let mut steps = 0;
        let mut upper = 1;
        while self.stops[upper].offset < t {
            steps += 1;
            if steps > oops_limit {
                return None;
            }
            upper += 1;
        }
        let (lower, upper) = (&self.stops[upper - 1], &self.stops[upper]);
        let denominator = upper.offset - lower.offset;
        if denominator == 0.0 {
            return Some(upper.color);
        }
        Some(lower.color.lerp(upper.color, (t - lower.offset) / denominator))
    }

    /// The color at `point`, or transparent black where a radial gradient is undefined.
    pub fn sample_point(&self, point: Vector2F, oops_limit: u32) -> Option<ColorF> {
        match self.ratio(point) {
            None => Some(ColorF::transparent_black()),
            Some(t) => self.sample(self.extend_ratio(t), oops_limit),
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Gradient, GradientExtend};
    use facet_color::ColorF;
    use facet_geometry::line_segment::LineSegment2F;
    use facet_geometry::util::approx_eq;
    use facet_geometry::vector::vec2f;

    fn black_to_white() -> Gradient {
        let mut gradient = Gradient::linear_from_points(vec2f(0.0, 0.0), vec2f(10.0, 0.0));
        gradient.add(ColorF::white(), 1.0);
        gradient.add(ColorF::black(), 0.0);
        gradient
    }

    #[test]
    fn test_stops_sorted() {
        let gradient = black_to_white();
        assert_eq!(gradient.stops()[0].color, ColorF::black());
        assert_eq!(gradient.stops()[1].color, ColorF::white());
        assert!(gradient.constant_color().is_none());
    }

    #[test]
    fn test_linear_sample() {
        let gradient = black_to_white();
        let color = gradient.sample_point(vec2f(2.5, 7.0), 100).unwrap();
        assert!(approx_eq(color.r as f64, 0.25, 1e-6));
        assert_eq!(gradient.sample_point(vec2f(-5.0, 0.0), 100), Some(ColorF::black()));
    }

    #[test]
    fn test_extend_modes() {
        let gradient = black_to_white().with_extend(GradientExtend::Repeat);
        assert!(approx_eq(gradient.extend_ratio(1.25), 0.25, 1e-12));
        let gradient = gradient.with_extend(GradientExtend::Reflect);
        assert!(approx_eq(gradient.extend_ratio(1.25), 0.75, 1e-12));
        assert!(approx_eq(gradient.extend_ratio(-0.25), 0.25, 1e-12));
    }

    #[test]
    fn test_radial_ratio() {
        let line = LineSegment2F::new(vec2f(0.0, 0.0), vec2f(0.0, 0.0));
        let gradient = Gradient::radial(line, (1.0, 3.0));
        assert!(approx_eq(gradient.ratio(vec2f(2.0, 0.0)).unwrap(), 0.5, 1e-12));
        assert!(approx_eq(gradient.ratio(vec2f(0.0, -3.0)).unwrap(), 1.0, 1e-12));
    }

    #[test]
    fn test_oops_limit() {
        let mut gradient = black_to_white();
        for index in 1..10 {
            gradient.add(ColorF::white(), index as f32 / 10.0);
        }
        assert!(gradient.sample(0.95, 100).is_some());
        assert!(gradient.sample(0.95, 3).is_none());
    }
}
