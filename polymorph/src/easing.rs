/// Timing curve applied to an animation's linear progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimingFunction {
    #[default]
    Linear,
    /// Platform default for property animations, `cubic-bezier(0.25, 0.1, 0.25, 1.0)`.
    Standard,
}

impl TimingFunction {
    /// `t` is clamped to `[0.0, 1.0]`.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => linear(t),
            Self::Standard => cubic_bezier(0.25, 0.1, 0.25, 1.0)(t),
        }
    }
}

pub fn linear(t: f32) -> f32 {
    t
}

/// CSS `cubic-bezier(x1, y1, x2, y2)` semantics.
pub fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32) -> impl Fn(f32) -> f32 {
    move |t| {
        let bezier_t = solve_bezier_t(t, x1, x2);
        sample_bezier(bezier_t, y1, y2)
    }
}

fn solve_bezier_t(x: f32, x1: f32, x2: f32) -> f32 {
    let mut t = x;

    for _ in 0..8 {
        let residual = sample_bezier(t, x1, x2) - x;

        if residual.abs() < 1e-6 {
            return t;
        }

        let slope = bezier_derivative(t, x1, x2);

        if slope.abs() < 1e-6 {
            break;
        }

        t -= residual / slope;
    }

    t
}

/// Evaluate cubic bezier with endpoints (0,0) and (1,1).
fn sample_bezier(t: f32, p1: f32, p2: f32) -> f32 {
    let t2 = t * t;
    let t3 = t2 * t;
    let mt = 1.0 - t;
    let mt2 = mt * mt;

    3.0 * mt2 * t * p1 + 3.0 * mt * t2 * p2 + t3
}

fn bezier_derivative(t: f32, p1: f32, p2: f32) -> f32 {
    let mt = 1.0 - t;

    3.0 * mt * mt * p1 + 6.0 * mt * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
}
