use std::time::Duration;

use kurbo::{Rect, Size};
use ratatui::style::Color;

use crate::animation::{
    Animation, AnimationDriver, AnimationGate, AnimationId, PropertyValue,
};
use crate::config::{self, BlurStyle, ButtonConfig};
use crate::easing::TimingFunction;
use crate::error::ButtonError;
use crate::geometry;
use crate::outline::Outline;
use crate::shape::{self, Style, StyleAlias};

/// Outcome of a style change, handed back to the caller for inspection.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionRequest {
    pub from: Outline,
    pub to: Outline,
    /// Zero when the new outline was applied without animation.
    pub duration: Duration,
}

/// Control events delivered to action listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    /// Fired as soon as an accepted touch lands, carrying the style at that moment.
    TouchUpInside { style: Style },
}

type ActionListener = Box<dyn FnMut(&ButtonEvent)>;

/// Touch-reactive button whose outline morphs between [`Style`]s.
///
/// Every visual change is pushed to the injected [`AnimationDriver`]: model values
/// first, then an [`Animation`] from the previous value when a duration is given.
/// Touch-down is ignored while any tracked animation is still in flight.
pub struct PolymorphButton<D: AnimationDriver> {
    driver: D,
    config: ButtonConfig,
    bounds: Size,
    frame: Rect,
    style: Style,
    outline: Outline,
    opacity: f32,
    fill: Option<Color>,
    highlighted: bool,
    suspended: bool,
    gate: AnimationGate,
    next_id: u64,
    listeners: Vec<ActionListener>,
}

impl<D: AnimationDriver> PolymorphButton<D> {
    /// Starts out as a circle with the configured appearance applied.
    pub fn new(driver: D, bounds: Size, config: ButtonConfig) -> Result<Self, ButtonError> {
        validate_bounds(bounds)?;
        config.validate()?;

        let frame = geometry::centered_square(bounds, config.margins);
        let outline = shape::generate_outline(Style::Circle, geometry::dimension(frame));

        let mut button = Self {
            driver,
            gate: AnimationGate::new(config.gate_mode),
            bounds,
            frame,
            style: Style::Circle,
            outline,
            opacity: config.default_opacity,
            fill: config.fill_color,
            highlighted: false,
            suspended: false,
            next_id: 0,
            listeners: Vec::new(),
            config,
        };

        button.driver.set_value(PropertyValue::Frame(frame));
        button
            .driver
            .set_value(PropertyValue::StrokeColor(button.config.stroke_color));
        button.driver.set_value(PropertyValue::FillColor(button.fill));
        button
            .driver
            .set_value(PropertyValue::LineWidth(button.config.line_width));
        button.driver.set_value(PropertyValue::Opacity(button.opacity));
        button
            .driver
            .set_value(PropertyValue::Composition(button.config.composition()));
        button
            .driver
            .set_value(PropertyValue::Path(button.outline.clone()));

        log::debug!("button created: bounds {bounds:?}, frame {frame:?}");

        Ok(button)
    }

    pub fn current_style(&self) -> Style {
        self.style
    }

    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    /// Centered square the outline is generated in.
    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn bounds(&self) -> Size {
        self.bounds
    }

    pub fn config(&self) -> &ButtonConfig {
        &self.config
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn fill_color(&self) -> Option<Color> {
        self.fill
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    pub fn is_animating(&self) -> bool {
        self.gate.is_open()
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn add_action(&mut self, listener: impl FnMut(&ButtonEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn change_style(&mut self, style: Style) -> TransitionRequest {
        self.set_style(style, Duration::ZERO)
    }

    pub fn change_alias(&mut self, alias: StyleAlias) -> TransitionRequest {
        self.set_style(alias.resolve(), Duration::ZERO)
    }

    pub fn set_alias(&mut self, alias: StyleAlias, duration: Duration) -> TransitionRequest {
        self.set_style(alias.resolve(), duration)
    }

    /// Morph to `style`. Always regenerates and re-applies the outline, even
    /// when `style` is already current.
    pub fn set_style(&mut self, style: Style, duration: Duration) -> TransitionRequest {
        let duration = self.effective(duration);
        let to = shape::generate_outline(style, geometry::dimension(self.frame));
        let from = std::mem::replace(&mut self.outline, to.clone());

        self.driver.set_value(PropertyValue::Path(to.clone()));

        if !duration.is_zero() {
            self.start_animation(
                PropertyValue::Path(from.clone()),
                PropertyValue::Path(to.clone()),
                duration,
                TimingFunction::Standard,
            );
        }

        log::debug!("style {:?} -> {style:?} over {duration:?}", self.style);
        self.style = style;

        TransitionRequest { from, to, duration }
    }

    /// Re-centers the outline square and re-applies the current style instantly.
    pub fn set_margins(&mut self, margins: f64) -> Result<TransitionRequest, ButtonError> {
        config::validate_margins(margins)?;

        self.config.margins = margins;
        log::debug!("margins set to {margins}");

        Ok(self.relayout())
    }

    /// Host-driven resize. Same re-layout as a margin change.
    pub fn set_bounds(&mut self, bounds: Size) -> Result<TransitionRequest, ButtonError> {
        validate_bounds(bounds)?;

        self.bounds = bounds;
        log::debug!("bounds set to {bounds:?}");

        Ok(self.relayout())
    }

    pub fn set_line_width(&mut self, width: f64) -> Result<(), ButtonError> {
        config::validate_line_width(width)?;

        self.config.line_width = width;
        self.driver.set_value(PropertyValue::LineWidth(width));
        Ok(())
    }

    pub fn set_stroke_color(&mut self, color: Color) {
        self.config.stroke_color = color;
        self.driver.set_value(PropertyValue::StrokeColor(color));
    }

    /// Applied right away, even mid-highlight.
    pub fn set_fill_color(&mut self, color: Option<Color>) {
        self.config.fill_color = color;
        self.fill = color;
        self.driver.set_value(PropertyValue::FillColor(color));
    }

    /// Applied right away, even mid-highlight.
    pub fn set_default_opacity(&mut self, opacity: f32) -> Result<(), ButtonError> {
        config::validate_opacity("default opacity", opacity)?;

        self.config.default_opacity = opacity;
        self.opacity = opacity;
        self.driver.set_value(PropertyValue::Opacity(opacity));
        Ok(())
    }

    /// Takes effect on the next highlight.
    pub fn set_highlighted_opacity(&mut self, opacity: f32) -> Result<(), ButtonError> {
        config::validate_opacity("highlighted opacity", opacity)?;

        self.config.highlighted_opacity = opacity;
        Ok(())
    }

    /// Takes effect on the next highlight.
    pub fn set_highlighted_fill_color(&mut self, color: Option<Color>) {
        self.config.highlighted_fill_color = color;
    }

    /// `Some` masks a gradient with the outline; `None` goes back to a plain outline.
    pub fn set_gradient_colors(&mut self, colors: Option<Vec<Color>>) -> Result<(), ButtonError> {
        if let Some(colors) = &colors {
            config::validate_gradient(colors)?;
        }

        self.config.gradient_colors = colors;
        self.push_composition();
        Ok(())
    }

    pub fn set_vibrancy(&mut self, style: Option<BlurStyle>) {
        self.config.vibrancy = style;
        self.push_composition();
    }

    /// Animates opacity and fill toward the highlighted or default values.
    pub fn set_highlighted(&mut self, highlighted: bool) {
        let (opacity, fill) = if highlighted {
            (
                self.config.highlighted_opacity,
                self.config.highlighted_fill_color,
            )
        } else {
            (self.config.default_opacity, self.config.fill_color)
        };
        let duration = self.effective(self.config.highlight_duration);

        self.change_opacity(opacity, duration);
        self.change_fill(fill, duration);
        self.highlighted = highlighted;
    }

    /// Returns whether the touch was accepted. Accepted touches highlight the
    /// button and notify every action listener.
    pub fn touch_down(&mut self) -> bool {
        if self.gate.is_open() {
            log::trace!("touch ignored, {} animations in flight", self.gate.in_flight());
            return false;
        }

        self.set_highlighted(true);

        let event = ButtonEvent::TouchUpInside { style: self.style };
        for listener in &mut self.listeners {
            listener(&event);
        }

        true
    }

    pub fn touch_up(&mut self) {
        self.set_highlighted(false);
    }

    /// Reported by the driver when an animation stops, finished or not.
    pub fn on_animation_complete(&mut self, id: AnimationId) {
        self.gate.on_animation_complete(id);
    }

    /// Host went to the background: drop every animation and reopen input.
    /// Until [`Self::resume`], changes apply without animating.
    pub fn suspend(&mut self) {
        self.driver.cancel_all();
        self.gate.clear();
        self.suspended = true;

        log::debug!("suspended");
    }

    pub fn resume(&mut self) {
        self.suspended = false;

        log::debug!("resumed");
    }

    fn effective(&self, duration: Duration) -> Duration {
        if self.suspended {
            Duration::ZERO
        } else {
            duration
        }
    }

    fn relayout(&mut self) -> TransitionRequest {
        self.frame = geometry::centered_square(self.bounds, self.config.margins);
        self.driver.set_value(PropertyValue::Frame(self.frame));

        self.set_style(self.style, Duration::ZERO)
    }

    fn push_composition(&mut self) {
        let composition = self.config.composition();

        log::debug!("composition now {composition:?}");
        self.driver.set_value(PropertyValue::Composition(composition));
    }

    fn change_opacity(&mut self, opacity: f32, duration: Duration) {
        let from = std::mem::replace(&mut self.opacity, opacity);
        self.driver.set_value(PropertyValue::Opacity(opacity));

        if !duration.is_zero() {
            self.start_animation(
                PropertyValue::Opacity(from),
                PropertyValue::Opacity(opacity),
                duration,
                TimingFunction::Linear,
            );
        }
    }

    fn change_fill(&mut self, fill: Option<Color>, duration: Duration) {
        let from = std::mem::replace(&mut self.fill, fill);
        self.driver.set_value(PropertyValue::FillColor(fill));

        if !duration.is_zero() {
            self.start_animation(
                PropertyValue::FillColor(from),
                PropertyValue::FillColor(fill),
                duration,
                TimingFunction::Linear,
            );
        }
    }

    fn start_animation(
        &mut self,
        from: PropertyValue,
        to: PropertyValue,
        duration: Duration,
        timing: TimingFunction,
    ) -> AnimationId {
        self.next_id += 1;
        let id = AnimationId(self.next_id);
        let property = to.property();

        self.gate.begin_tracked_animation(id, property, duration);
        self.driver.animate(Animation {
            id,
            from,
            to,
            duration,
            timing,
        });

        id
    }
}

fn validate_bounds(bounds: Size) -> Result<(), ButtonError> {
    let ok = |v: f64| v.is_finite() && v >= 0.0;

    if ok(bounds.width) && ok(bounds.height) {
        Ok(())
    } else {
        Err(ButtonError::InvalidBounds {
            width: bounds.width,
            height: bounds.height,
        })
    }
}
