use kurbo::Point;

use crate::outline::{Outline, Segment};

/// Canonical button silhouettes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    Circle,
    Heart,
    Star,
}

/// Decorative tags. Several resolve to the same canonical [`Style`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleAlias {
    FullMoon,
    YellowHeart,
    PurpleHeart,
    GreenHeart,
    BlueHeart,
    PinkHeart,
    GlowingStar,
}

impl StyleAlias {
    pub const ALL: [Self; 7] = [
        Self::FullMoon,
        Self::YellowHeart,
        Self::PurpleHeart,
        Self::GreenHeart,
        Self::BlueHeart,
        Self::PinkHeart,
        Self::GlowingStar,
    ];

    const TABLE: [(Self, Style); 7] = [
        (Self::FullMoon, Style::Circle),
        (Self::YellowHeart, Style::Heart),
        (Self::PurpleHeart, Style::Heart),
        (Self::GreenHeart, Style::Heart),
        (Self::BlueHeart, Style::Heart),
        (Self::PinkHeart, Style::Heart),
        (Self::GlowingStar, Style::Star),
    ];

    pub fn resolve(self) -> Style {
        Self::TABLE[self as usize].1
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Self::FullMoon => "🌕",
            Self::YellowHeart => "💛",
            Self::PurpleHeart => "💜",
            Self::GreenHeart => "💚",
            Self::BlueHeart => "💙",
            Self::PinkHeart => "💗",
            Self::GlowingStar => "🌟",
        }
    }
}

impl From<StyleAlias> for Style {
    fn from(alias: StyleAlias) -> Self {
        alias.resolve()
    }
}

impl Style {
    pub const ALL: [Self; 3] = [Self::Circle, Self::Heart, Self::Star];

    /// Whether the generated outline is traced against its construction order.
    pub fn is_reversed(self) -> bool {
        matches!(self, Self::Circle | Self::Star)
    }
}

/// Cubic approximation constant for a quarter circle.
const KAPPA: f64 = 0.552_284_749_831;

const CIRCLE_INSET: f64 = 0.1;

/// Heart: start point, then `(ctrl1, ctrl2, to)` per curve, as fractions of `d`.
const HEART_START: (f64, f64) = (0.9572, 0.2701);
const HEART_CURVES: [[(f64, f64); 3]; 7] = [
    [(0.9006, 0.1151), (0.6378, 0.0323), (0.5, 0.2387)],
    [(0.3621, 0.0323), (0.0993, 0.1151), (0.0427, 0.2701)],
    [(-0.0139, 0.4253), (0.0326, 0.5157), (0.1947, 0.6767)],
    [(0.3563, 0.8373), (0.4992, 0.884), (0.4999, 0.8843)],
    [(0.5, 0.8843), (0.5, 0.8843), (0.5, 0.8843)],
    [(0.5007, 0.884), (0.6436, 0.8373), (0.8052, 0.6767)],
    [(0.9672, 0.5157), (1.0139, 0.4253), (0.9572, 0.2701)],
];

/// Star: five tips and five inner corners, alternating, as fractions of `d`.
const STAR_POINTS: [(f64, f64); 10] = [
    (0.5014, 0.0428),
    (0.6485, 0.3411),
    (0.9776, 0.3888),
    (0.7394, 0.6209),
    (0.7957, 0.9486),
    (0.5014, 0.7938),
    (0.2070, 0.9486),
    (0.2634, 0.6209),
    (0.0252, 0.3888),
    (0.3543, 0.3411),
];

/// Outline for `style` inside a `d`×`d` square anchored at the origin.
///
/// Non-positive (or NaN) `d` collapses to a zero-area outline.
pub fn generate_outline(style: Style, d: f64) -> Outline {
    let d = d.max(0.0);
    let naive = construct(style, d);

    if style.is_reversed() {
        naive.reversed()
    } else {
        naive
    }
}

fn construct(style: Style, d: f64) -> Outline {
    match style {
        Style::Circle => circle(d),
        Style::Heart => heart(d),
        Style::Star => star(d),
    }
}

fn at(d: f64, (x, y): (f64, f64)) -> Point {
    Point::new(d * x, d * y)
}

/// Oval inset by 10% on every side: four quadrants, clockwise in y-down space,
/// starting at the rightmost point.
fn circle(d: f64) -> Outline {
    let c = 0.5;
    let r = c - CIRCLE_INSET;
    let k = r * KAPPA;

    let right = (c + r, c);
    let bottom = (c, c + r);
    let left = (c - r, c);
    let top = (c, c - r);

    let quadrants = [
        [(c + r, c + k), (c + k, c + r), bottom],
        [(c - k, c + r), (c - r, c + k), left],
        [(c - r, c - k), (c - k, c - r), top],
        [(c + k, c - r), (c + r, c - k), right],
    ];

    let mut segments = vec![Segment::Move(at(d, right))];
    segments.extend(quadrants.iter().map(|[c1, c2, to]| Segment::Cubic {
        ctrl1: at(d, *c1),
        ctrl2: at(d, *c2),
        to: at(d, *to),
    }));
    segments.push(Segment::Close);

    Outline::new(segments)
}

fn heart(d: f64) -> Outline {
    let mut segments = vec![Segment::Move(at(d, HEART_START))];
    segments.extend(HEART_CURVES.iter().map(|[c1, c2, to]| Segment::Cubic {
        ctrl1: at(d, *c1),
        ctrl2: at(d, *c2),
        to: at(d, *to),
    }));
    segments.push(Segment::Close);

    Outline::new(segments)
}

fn star(d: f64) -> Outline {
    let mut segments = vec![Segment::Move(at(d, STAR_POINTS[0]))];
    segments.extend(STAR_POINTS[1..].iter().map(|p| Segment::Line(at(d, *p))));
    segments.push(Segment::Close);

    Outline::new(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alias_table_resolves_every_tag() {
        let expected = [
            Style::Circle,
            Style::Heart,
            Style::Heart,
            Style::Heart,
            Style::Heart,
            Style::Heart,
            Style::Star,
        ];

        for (alias, style) in StyleAlias::ALL.iter().zip(expected) {
            assert_eq!(alias.resolve(), style, "{alias:?}");
            assert_eq!(Style::from(*alias), style);
        }
    }

    #[test]
    fn generation_is_deterministic() {
        for style in Style::ALL {
            assert_eq!(generate_outline(style, 87.5), generate_outline(style, 87.5));
        }
    }

    #[test]
    fn doubling_dimension_doubles_every_point() {
        for style in Style::ALL {
            let small = generate_outline(style, 40.0).points();
            let large = generate_outline(style, 80.0).points();

            assert_eq!(small.len(), large.len());

            for (a, b) in small.iter().zip(&large) {
                assert_eq!(a.x * 2.0, b.x, "{style:?}");
                assert_eq!(a.y * 2.0, b.y, "{style:?}");
            }
        }
    }

    #[test]
    fn circle_and_star_are_reversed_heart_is_not() {
        for style in Style::ALL {
            let naive = construct(style, 100.0);
            let generated = generate_outline(style, 100.0);

            if style.is_reversed() {
                assert_eq!(generated, naive.reversed(), "{style:?}");
                assert!(
                    naive.signed_area() * generated.signed_area() < 0.0,
                    "{style:?} winding did not flip"
                );
            } else {
                assert_eq!(generated, naive, "{style:?}");
            }
        }
        assert!(!Style::Heart.is_reversed());
    }

    fn cubic(c1: (f64, f64), c2: (f64, f64), to: (f64, f64)) -> Segment {
        Segment::Cubic {
            ctrl1: Point::new(c1.0, c1.1),
            ctrl2: Point::new(c2.0, c2.1),
            to: Point::new(to.0, to.1),
        }
    }

    fn line(x: f64, y: f64) -> Segment {
        Segment::Line(Point::new(x, y))
    }

    #[test]
    fn unit_heart_matches_literal_curves() {
        let expected = vec![
            Segment::Move(Point::new(0.9572, 0.2701)),
            cubic((0.9006, 0.1151), (0.6378, 0.0323), (0.5, 0.2387)),
            cubic((0.3621, 0.0323), (0.0993, 0.1151), (0.0427, 0.2701)),
            cubic((-0.0139, 0.4253), (0.0326, 0.5157), (0.1947, 0.6767)),
            cubic((0.3563, 0.8373), (0.4992, 0.884), (0.4999, 0.8843)),
            cubic((0.5, 0.8843), (0.5, 0.8843), (0.5, 0.8843)),
            cubic((0.5007, 0.884), (0.6436, 0.8373), (0.8052, 0.6767)),
            cubic((0.9672, 0.5157), (1.0139, 0.4253), (0.9572, 0.2701)),
            Segment::Close,
        ];

        assert_eq!(generate_outline(Style::Heart, 1.0).segments(), expected.as_slice());
    }

    #[test]
    fn unit_star_walks_corners_backwards_from_last_inner_corner() {
        let expected = vec![
            Segment::Move(Point::new(0.3543, 0.3411)),
            line(0.0252, 0.3888),
            line(0.2634, 0.6209),
            line(0.2070, 0.9486),
            line(0.5014, 0.7938),
            line(0.7957, 0.9486),
            line(0.7394, 0.6209),
            line(0.9776, 0.3888),
            line(0.6485, 0.3411),
            line(0.5014, 0.0428),
            Segment::Close,
        ];

        assert_eq!(generate_outline(Style::Star, 1.0).segments(), expected.as_slice());
    }

    #[test]
    fn circle_stays_inside_inset() {
        let d = 200.0;
        let outline = generate_outline(Style::Circle, d);

        for seg in outline.segments() {
            if let Some(p) = seg.end() {
                let dist = ((p.x - 100.0).powi(2) + (p.y - 100.0).powi(2)).sqrt();
                assert!((dist - 80.0).abs() < 1e-9, "on-curve point {p:?} at {dist}");
            }
        }

        let expected = std::f64::consts::PI * 80.0 * 80.0;
        let area = outline.signed_area().abs();
        assert!((area - expected).abs() / expected < 1e-3, "area {area}");
    }

    #[test]
    fn non_positive_dimension_is_degenerate() {
        for style in Style::ALL {
            for d in [0.0, -25.0, f64::NAN] {
                let outline = generate_outline(style, d);
                assert!(!outline.is_empty());
                assert!(outline.signed_area().abs() < 1e-12);
                assert!(outline.points().iter().all(|p| p.x == 0.0 && p.y == 0.0));
            }
        }
    }
}
