use kurbo::{PathEl, Point, Shape};

use crate::outline::Outline;

/// Frozen correspondence between two outlines. Built once per path animation,
/// sampled every frame.
///
/// Outlines with different segment structure cannot be interpolated command by
/// command, so both are resampled to the same number of points at equal arc
/// length. The target is then rotated (and, if that fits better, traversed
/// backwards) so that corresponding points are as close as possible.
#[derive(Debug, Clone, PartialEq)]
pub struct MorphPlan {
    from: Vec<Point>,
    to: Vec<Point>,
}

impl MorphPlan {
    pub fn new(from: &Outline, to: &Outline, samples: usize) -> Self {
        let from = resample(from, samples);
        let to = align(&from, resample(to, samples));

        Self { from, to }
    }

    /// `t` must be in `[0.0, 1.0]`.
    pub fn at(&self, t: f64) -> Vec<Point> {
        self.from
            .iter()
            .zip(&self.to)
            .map(|(a, b)| a.lerp(*b, t))
            .collect()
    }
}

/// `samples` points spaced evenly along the closed outline, starting at its
/// first point. A zero-length outline yields its single point repeated.
pub fn resample(outline: &Outline, samples: usize) -> Vec<Point> {
    if samples == 0 {
        return Vec::new();
    }

    let polyline = flatten(outline);
    let Some(&first) = polyline.first() else {
        return vec![Point::ORIGIN; samples];
    };

    let lengths: Vec<f64> = polyline.windows(2).map(|w| w[0].distance(w[1])).collect();
    let total: f64 = lengths.iter().sum();

    if total <= f64::EPSILON {
        return vec![first; samples];
    }

    let mut out = Vec::with_capacity(samples);
    let mut edge = 0;
    let mut walked = 0.0;

    for i in 0..samples {
        let target = total * i as f64 / samples as f64;

        while edge + 1 < lengths.len() && walked + lengths[edge] < target {
            walked += lengths[edge];
            edge += 1;
        }

        let len = lengths[edge];
        let t = if len > 0.0 {
            ((target - walked) / len).clamp(0.0, 1.0)
        } else {
            0.0
        };

        out.push(polyline[edge].lerp(polyline[edge + 1], t));
    }

    out
}

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Polyline through the outline, closed back to its start.
fn flatten(outline: &Outline) -> Vec<Point> {
    let path = outline.to_bez_path();
    let bbox = path.bounding_box();
    let tolerance = (bbox.width().max(bbox.height()) * 1e-3).max(1e-9);

    let mut points: Vec<Point> = Vec::new();
    let mut start = None;

    kurbo::flatten(path.iter(), tolerance, |el| match el {
        PathEl::MoveTo(p) => {
            start.get_or_insert(p);
            points.push(p);
        }
        PathEl::LineTo(p) => points.push(p),
        PathEl::ClosePath => {}
        // Flattening only ever emits the three variants above.
        PathEl::QuadTo(_, p) | PathEl::CurveTo(_, _, p) => points.push(p),
    });

    if let (Some(start), Some(&last)) = (start, points.last()) {
        if last != start {
            points.push(start);
        }
    }

    if points.len() == 1 {
        points.push(points[0]);
    }

    points
}

fn align(from: &[Point], to: Vec<Point>) -> Vec<Point> {
    let n = to.len();
    if n == 0 || from.len() != n {
        return to;
    }

    let backwards: Vec<Point> = to.iter().rev().copied().collect();
    let mut best = (f64::INFINITY, 0, false);

    for (reversed, candidate) in [(false, &to), (true, &backwards)] {
        for shift in 0..n {
            let cost: f64 = from
                .iter()
                .enumerate()
                .map(|(i, p)| p.distance_squared(candidate[(i + shift) % n]))
                .sum();

            if cost < best.0 {
                best = (cost, shift, reversed);
            }
        }
    }

    let (_, shift, reversed) = best;
    let source = if reversed { &backwards } else { &to };

    (0..n).map(|i| source[(i + shift) % n]).collect()
}
