use std::time::Duration;

use ratatui::style::Color;

use crate::animation::GateMode;
use crate::error::ButtonError;

/// Backdrop material a vibrancy surface is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlurStyle {
    ExtraLight,
    Light,
    Dark,
}

/// How the outline is composited, derived from the gradient and vibrancy settings.
#[derive(Debug, Clone, PartialEq)]
pub enum Composition {
    /// Outline stroked and filled directly.
    Plain,
    /// Gradient layer masked by the outline.
    GradientMasked { colors: Vec<Color> },
    /// Outline hosted inside a vibrancy surface over a blurred backdrop.
    Vibrancy { style: BlurStyle },
}

impl Composition {
    /// Vibrancy wins over a gradient when both are configured.
    pub fn resolve(gradient: Option<&[Color]>, vibrancy: Option<BlurStyle>) -> Self {
        match (vibrancy, gradient) {
            (Some(style), _) => Self::Vibrancy { style },
            (None, Some(colors)) => Self::GradientMasked {
                colors: colors.to_vec(),
            },
            (None, None) => Self::Plain,
        }
    }
}

/// Appearance and behavior of a [`crate::button::PolymorphButton`].
///
/// `None` fill colors are fully transparent.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonConfig {
    pub margins: f64,
    pub line_width: f64,
    pub stroke_color: Color,
    pub fill_color: Option<Color>,
    pub gradient_colors: Option<Vec<Color>>,
    pub vibrancy: Option<BlurStyle>,
    pub default_opacity: f32,
    pub highlighted_opacity: f32,
    pub highlighted_fill_color: Option<Color>,
    pub highlight_duration: Duration,
    pub gate_mode: GateMode,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            margins: 0.0,
            line_width: 1.0,
            stroke_color: Color::Black,
            fill_color: None,
            gradient_colors: None,
            vibrancy: None,
            default_opacity: 0.7,
            highlighted_opacity: 1.0,
            highlighted_fill_color: None,
            highlight_duration: Duration::from_millis(300),
            gate_mode: GateMode::Counting,
        }
    }
}

impl ButtonConfig {
    pub fn validate(&self) -> Result<(), ButtonError> {
        validate_margins(self.margins)?;
        validate_line_width(self.line_width)?;
        validate_opacity("default opacity", self.default_opacity)?;
        validate_opacity("highlighted opacity", self.highlighted_opacity)?;

        if let Some(colors) = &self.gradient_colors {
            validate_gradient(colors)?;
        }

        Ok(())
    }

    pub fn composition(&self) -> Composition {
        Composition::resolve(self.gradient_colors.as_deref(), self.vibrancy)
    }
}

pub(crate) fn validate_margins(margins: f64) -> Result<(), ButtonError> {
    if margins.is_finite() && margins >= 0.0 {
        Ok(())
    } else {
        Err(ButtonError::InvalidMargins(margins))
    }
}

pub(crate) fn validate_line_width(width: f64) -> Result<(), ButtonError> {
    if width.is_finite() && width >= 0.0 {
        Ok(())
    } else {
        Err(ButtonError::InvalidLineWidth(width))
    }
}

pub(crate) fn validate_opacity(name: &'static str, value: f32) -> Result<(), ButtonError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ButtonError::InvalidOpacity { name, value })
    }
}

pub(crate) fn validate_gradient(colors: &[Color]) -> Result<(), ButtonError> {
    if colors.is_empty() {
        Err(ButtonError::EmptyGradient)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ButtonConfig::default();

        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.composition(), Composition::Plain);
        assert_eq!(config.default_opacity, 0.7);
        assert_eq!(config.highlight_duration, Duration::from_millis(300));
    }

    #[test]
    fn rejects_bad_values() {
        let cases = [
            ButtonConfig {
                margins: -1.0,
                ..ButtonConfig::default()
            },
            ButtonConfig {
                line_width: f64::INFINITY,
                ..ButtonConfig::default()
            },
            ButtonConfig {
                highlighted_opacity: 1.5,
                ..ButtonConfig::default()
            },
            ButtonConfig {
                default_opacity: f32::NAN,
                ..ButtonConfig::default()
            },
            ButtonConfig {
                gradient_colors: Some(Vec::new()),
                ..ButtonConfig::default()
            },
        ];

        for config in cases {
            assert!(config.validate().is_err(), "{config:?}");
        }
    }

    #[test]
    fn vibrancy_takes_precedence_over_gradient() {
        let gradient = [Color::Red, Color::Blue];

        assert_eq!(
            Composition::resolve(Some(&gradient), Some(BlurStyle::Dark)),
            Composition::Vibrancy {
                style: BlurStyle::Dark
            }
        );
        assert_eq!(
            Composition::resolve(Some(&gradient), None),
            Composition::GradientMasked {
                colors: gradient.to_vec()
            }
        );
    }
}
