use kurbo::{BezPath, Point, Shape};

/// One path command. Points are absolute, already scaled by the outline's dimension.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    Move(Point),
    Cubic { ctrl1: Point, ctrl2: Point, to: Point },
    Line(Point),
    Close,
}

impl Segment {
    /// End point of the segment, `None` for `Close`.
    pub fn end(&self) -> Option<Point> {
        match *self {
            Segment::Move(p) | Segment::Line(p) => Some(p),
            Segment::Cubic { to, .. } => Some(to),
            Segment::Close => None,
        }
    }

    /// Every point the segment carries, in declaration order.
    pub fn points(&self) -> Vec<Point> {
        match *self {
            Segment::Move(p) | Segment::Line(p) => vec![p],
            Segment::Cubic { ctrl1, ctrl2, to } => vec![ctrl1, ctrl2, to],
            Segment::Close => Vec::new(),
        }
    }
}

/// A closed button silhouette. Built once per style change and never mutated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outline {
    segments: Vec<Segment>,
}

impl Outline {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// All carried points, flattened in segment order.
    pub fn points(&self) -> Vec<Point> {
        self.segments.iter().flat_map(Segment::points).collect()
    }

    /// Same geometry traced in the opposite direction.
    ///
    /// Each subpath starts at its last on-curve point and walks back to its move
    /// point; cubic control points swap. Closed subpaths stay closed.
    pub fn reversed(&self) -> Self {
        let mut out = Vec::with_capacity(self.segments.len());

        for subpath in self.subpaths() {
            let Some(Segment::Move(start)) = subpath.first().copied() else {
                continue;
            };
            let closed = subpath.last() == Some(&Segment::Close);
            let body: Vec<Segment> = subpath[1..]
                .iter()
                .copied()
                .filter(|s| *s != Segment::Close)
                .collect();

            let tail = body.last().and_then(Segment::end).unwrap_or(start);
            out.push(Segment::Move(tail));

            for (i, seg) in body.iter().enumerate().rev() {
                let prev = if i == 0 {
                    start
                } else {
                    body[i - 1].end().unwrap_or(start)
                };

                match *seg {
                    Segment::Cubic { ctrl1, ctrl2, .. } => out.push(Segment::Cubic {
                        ctrl1: ctrl2,
                        ctrl2: ctrl1,
                        to: prev,
                    }),
                    Segment::Line(_) => out.push(Segment::Line(prev)),
                    Segment::Move(_) | Segment::Close => {}
                }
            }

            if closed {
                out.push(Segment::Close);
            }
        }

        Self { segments: out }
    }

    pub fn to_bez_path(&self) -> BezPath {
        let mut path = BezPath::new();

        for seg in &self.segments {
            match *seg {
                Segment::Move(p) => path.move_to(p),
                Segment::Line(p) => path.line_to(p),
                Segment::Cubic { ctrl1, ctrl2, to } => path.curve_to(ctrl1, ctrl2, to),
                Segment::Close => path.close_path(),
            }
        }

        path
    }

    /// Signed enclosed area. The sign flips when the winding is reversed.
    pub fn signed_area(&self) -> f64 {
        self.to_bez_path().area()
    }

    fn subpaths(&self) -> Vec<&[Segment]> {
        let mut starts: Vec<usize> = self
            .segments
            .iter()
            .enumerate()
            .filter(|(_, s)| matches!(s, Segment::Move(_)))
            .map(|(i, _)| i)
            .collect();
        starts.push(self.segments.len());

        starts
            .windows(2)
            .map(|w| &self.segments[w[0]..w[1]])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Outline {
        Outline::new(vec![
            Segment::Move(Point::new(0.0, 0.0)),
            Segment::Line(Point::new(1.0, 0.0)),
            Segment::Line(Point::new(1.0, 1.0)),
            Segment::Line(Point::new(0.0, 1.0)),
            Segment::Close,
        ])
    }

    #[test]
    fn reversed_walks_backwards_from_last_point() {
        let rev = square().reversed();

        assert_eq!(
            rev.segments(),
            &[
                Segment::Move(Point::new(0.0, 1.0)),
                Segment::Line(Point::new(1.0, 1.0)),
                Segment::Line(Point::new(1.0, 0.0)),
                Segment::Line(Point::new(0.0, 0.0)),
                Segment::Close,
            ]
        );
    }

    #[test]
    fn reversed_swaps_cubic_controls() {
        let outline = Outline::new(vec![
            Segment::Move(Point::new(0.0, 0.0)),
            Segment::Cubic {
                ctrl1: Point::new(1.0, 0.0),
                ctrl2: Point::new(2.0, 1.0),
                to: Point::new(2.0, 2.0),
            },
        ]);

        let rev = outline.reversed();

        assert_eq!(
            rev.segments(),
            &[
                Segment::Move(Point::new(2.0, 2.0)),
                Segment::Cubic {
                    ctrl1: Point::new(2.0, 1.0),
                    ctrl2: Point::new(1.0, 0.0),
                    to: Point::new(0.0, 0.0),
                },
            ]
        );
    }

    #[test]
    fn reversal_flips_area_sign() {
        let a = square().signed_area();
        let b = square().reversed().signed_area();

        assert!((a.abs() - 1.0).abs() < 1e-9, "area was {a}");
        assert!((a + b).abs() < 1e-9, "{a} vs {b}");
    }

    #[test]
    fn double_reversal_is_identity() {
        assert_eq!(square().reversed().reversed(), square());
    }

    #[test]
    fn empty_outline_reverses_to_empty() {
        assert!(Outline::default().reversed().is_empty());
    }
}
