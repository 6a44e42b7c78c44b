use kurbo::{Point, Size};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::symbols::Marker;
use ratatui::widgets::Widget;
use ratatui::widgets::canvas::{Canvas, Context, Line, Points};

use crate::config::{BlurStyle, Composition};
use crate::oklch;
use crate::timeline::Presentation;

/// Draws a sampled button into a terminal area with braille dots.
///
/// `bounds` is the control size the presentation's coordinates refer to; it is
/// stretched over the whole area. Terminals have no alpha, so opacity fades
/// colors toward black and a vibrancy backdrop becomes a flat background.
#[derive(Debug, Clone, Copy)]
pub struct ButtonCanvas<'a> {
    presentation: &'a Presentation,
    bounds: Size,
}

impl<'a> ButtonCanvas<'a> {
    pub fn new(presentation: &'a Presentation, bounds: Size) -> Self {
        Self {
            presentation,
            bounds,
        }
    }
}

impl Widget for ButtonCanvas<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() || self.bounds.is_zero_area() {
            return;
        }

        let p = self.presentation;
        let Size { width, height } = self.bounds;
        // Two braille dots per cell horizontally, four vertically.
        let step_x = width / (area.width as f64 * 2.0);
        let step_y = height / (area.height as f64 * 4.0);
        let flip = |pt: Point| (pt.x, height - pt.y);

        let painter = |ctx: &mut Context<'_>| {
            if let Some(fill) = p.fill {
                let mut y = step_y / 2.0;
                while y < height {
                    let row: Vec<(f64, f64)> = interior_row(&p.points, y, width, step_x)
                        .into_iter()
                        .map(|x| flip(Point::new(x, y)))
                        .collect();

                    if !row.is_empty() {
                        ctx.draw(&Points {
                            coords: &row,
                            color: tint(p, fill, y / height),
                        });
                    }
                    y += step_y;
                }
                ctx.layer();
            }

            if p.line_width > 0.0 {
                for (a, b) in edges(&p.points) {
                    let (x1, y1) = flip(a);
                    let (x2, y2) = flip(b);
                    let color = tint(p, p.stroke, (a.y + b.y) / 2.0 / height);
                    ctx.draw(&Line::new(x1, y1, x2, y2, color));
                }
            }
        };

        let canvas = Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, width])
            .y_bounds([0.0, height]);

        match &p.composition {
            Composition::Vibrancy { style } => canvas
                .background_color(backdrop(*style))
                .paint(painter)
                .render(area, buf),
            _ => canvas.paint(painter).render(area, buf),
        }
    }
}

/// Flat stand-in for a blurred backdrop.
pub fn backdrop(style: BlurStyle) -> Color {
    match style {
        BlurStyle::ExtraLight => Color::Rgb(236, 236, 240),
        BlurStyle::Light => Color::Rgb(196, 198, 204),
        BlurStyle::Dark => Color::Rgb(38, 40, 46),
    }
}

/// Color of a stroked or filled dot `t` of the way down the control. A masked
/// gradient replaces the paint color; opacity fades whatever is drawn.
fn tint(p: &Presentation, paint: Color, t: f64) -> Color {
    let base = match &p.composition {
        Composition::GradientMasked { colors } => gradient_at(colors, t).unwrap_or(paint),
        _ => paint,
    };

    oklch::fade(base, p.opacity)
}

/// Vertical gradient with evenly spaced stops, `t` in `[0, 1]` from the top.
fn gradient_at(colors: &[Color], t: f64) -> Option<Color> {
    let (first, rest) = colors.split_first()?;
    if rest.is_empty() {
        return Some(*first);
    }

    let pos = t.clamp(0.0, 1.0) * rest.len() as f64;
    let idx = (pos.floor() as usize).min(colors.len() - 2);
    let frac = (pos - idx as f64).clamp(0.0, 1.0);

    oklch::mix(Some(colors[idx]), Some(colors[idx + 1]), frac as f32)
}

fn edges(points: &[Point]) -> impl Iterator<Item = (Point, Point)> + '_ {
    let n = points.len();
    (0..n).map(move |i| (points[i], points[(i + 1) % n]))
}

/// X positions on row `y`, spaced `step` apart, that fall inside the closed
/// polygon by the even-odd rule.
fn interior_row(polygon: &[Point], y: f64, width: f64, step: f64) -> Vec<f64> {
    let mut crossings: Vec<f64> = edges(polygon)
        .filter(|(a, b)| (a.y > y) != (b.y > y))
        .map(|(a, b)| a.x + (y - a.y) / (b.y - a.y) * (b.x - a.x))
        .collect();
    crossings.sort_by(f64::total_cmp);

    let mut xs = Vec::new();
    for pair in crossings.chunks_exact(2) {
        let mut x = (pair[0] / step).ceil() * step;
        while x <= pair[1] && x <= width {
            xs.push(x);
            x += step;
        }
    }

    xs
}
