use thiserror::Error;

/// Rejected configuration writes. The button state is left untouched.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ButtonError {
    #[error("margins must be finite and non-negative, got {0}")]
    InvalidMargins(f64),

    #[error("{name} must be within [0, 1], got {value}")]
    InvalidOpacity { name: &'static str, value: f32 },

    #[error("line width must be finite and non-negative, got {0}")]
    InvalidLineWidth(f64),

    #[error("bounds must be finite and non-negative, got {width}x{height}")]
    InvalidBounds { width: f64, height: f64 },

    #[error("gradient needs at least one color")]
    EmptyGradient,
}
