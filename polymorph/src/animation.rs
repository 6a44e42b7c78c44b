use std::collections::HashSet;
use std::time::Duration;

use kurbo::Rect;
use ratatui::style::Color;

use crate::config::Composition;
use crate::easing::TimingFunction;
use crate::outline::Outline;

/// Identifies one started animation so its completion can be matched up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationId(pub u64);

/// Layer properties a driver is told about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    Path,
    Opacity,
    FillColor,
    StrokeColor,
    LineWidth,
    Frame,
    Composition,
}

impl Property {
    /// Only these are ever interpolated; the rest are applied as-is.
    pub fn is_animatable(self) -> bool {
        matches!(self, Self::Path | Self::Opacity | Self::FillColor)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Path(Outline),
    Opacity(f32),
    FillColor(Option<Color>),
    StrokeColor(Color),
    LineWidth(f64),
    /// Centered square the outline is drawn in, in control coordinates.
    Frame(Rect),
    Composition(Composition),
}

impl PropertyValue {
    pub fn property(&self) -> Property {
        match self {
            Self::Path(_) => Property::Path,
            Self::Opacity(_) => Property::Opacity,
            Self::FillColor(_) => Property::FillColor,
            Self::StrokeColor(_) => Property::StrokeColor,
            Self::LineWidth(_) => Property::LineWidth,
            Self::Frame(_) => Property::Frame,
            Self::Composition(_) => Property::Composition,
        }
    }
}

/// An interpolation from `from` to `to`. The model value has already been set
/// to `to` by the time a driver receives this.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    pub id: AnimationId,
    pub from: PropertyValue,
    pub to: PropertyValue,
    pub duration: Duration,
    pub timing: TimingFunction,
}

impl Animation {
    pub fn property(&self) -> Property {
        self.to.property()
    }
}

/// Host rendering backend.
///
/// A driver that starts an animation must eventually report it back through
/// [`crate::button::PolymorphButton::on_animation_complete`], including when a
/// newer animation on the same property replaces it. Animations dropped by
/// [`AnimationDriver::cancel_all`] need not be reported.
pub trait AnimationDriver {
    /// Set the model value of a property with no interpolation.
    fn set_value(&mut self, value: PropertyValue);

    fn animate(&mut self, animation: Animation);

    fn cancel_all(&mut self);
}

/// How completions close the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GateMode {
    /// Open while any tracked animation is still in flight.
    #[default]
    Counting,
    /// Single flag: the first completion closes it, even if others still run.
    Legacy,
}

/// Latch that blocks touch input while tracked animations are in flight.
#[derive(Debug, Clone, Default)]
pub struct AnimationGate {
    mode: GateMode,
    in_flight: HashSet<AnimationId>,
    latched: bool,
}

impl AnimationGate {
    pub fn new(mode: GateMode) -> Self {
        Self {
            mode,
            in_flight: HashSet::new(),
            latched: false,
        }
    }

    pub fn is_open(&self) -> bool {
        match self.mode {
            GateMode::Counting => !self.in_flight.is_empty(),
            GateMode::Legacy => self.latched,
        }
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Zero-duration animations are applied immediately and never open the gate.
    pub fn begin_tracked_animation(&mut self, id: AnimationId, property: Property, duration: Duration) {
        if duration.is_zero() {
            return;
        }

        self.in_flight.insert(id);
        self.latched = true;

        log::trace!(
            "gate: tracking {id:?} ({property:?}, {duration:?}), {} in flight",
            self.in_flight.len()
        );
    }

    pub fn on_animation_complete(&mut self, id: AnimationId) {
        if !self.in_flight.remove(&id) {
            log::trace!("gate: completion of untracked {id:?}");
        }

        if self.mode == GateMode::Legacy {
            self.latched = false;
        }

        log::trace!("gate: {id:?} done, open = {}", self.is_open());
    }

    pub fn clear(&mut self) {
        self.in_flight.clear();
        self.latched = false;
    }
}
