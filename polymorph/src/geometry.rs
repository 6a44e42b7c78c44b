use kurbo::{Rect, Size};

/// Largest square centered in `bounds`, shrunk by `margins` on every side.
///
/// The result is expressed in the control's local coordinates. A side that
/// would go negative is clamped to zero around the square's center.
pub fn centered_square(bounds: Size, margins: f64) -> Rect {
    let (x, y, side) = if bounds.width >= bounds.height {
        ((bounds.width - bounds.height) / 2.0, 0.0, bounds.height)
    } else {
        (0.0, (bounds.height - bounds.width) / 2.0, bounds.width)
    };

    let inner = side - margins * 2.0;

    if inner > 0.0 {
        Rect::from_origin_size((x + margins, y + margins), (inner, inner))
    } else {
        let cx = x + side / 2.0;
        let cy = y + side / 2.0;
        Rect::new(cx, cy, cx, cy)
    }
}

/// Outline dimension for a frame: its shorter side.
pub fn dimension(frame: Rect) -> f64 {
    frame.width().min(frame.height())
}
