use std::time::Duration;

use kurbo::{Point, Rect, Vec2};
use ratatui::style::Color;

use crate::animation::{Animation, AnimationDriver, AnimationId, Property, PropertyValue};
use crate::config::Composition;
use crate::interpolate::{self, MorphPlan};
use crate::oklch;
use crate::outline::Outline;

/// What the button looks like at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct Presentation {
    /// Outline resampled to the timeline's sample count, in control coordinates.
    pub points: Vec<Point>,
    pub opacity: f32,
    pub fill: Option<Color>,
    pub stroke: Color,
    pub line_width: f64,
    pub frame: Rect,
    pub composition: Composition,
}

#[derive(Debug, Clone)]
struct Model {
    path: Outline,
    opacity: f32,
    fill: Option<Color>,
    stroke: Color,
    line_width: f64,
    frame: Rect,
    composition: Composition,
}

#[derive(Debug, Clone)]
struct Running {
    animation: Animation,
    started: Duration,
    plan: Option<MorphPlan>,
}

impl Running {
    fn progress(&self, now: Duration) -> f32 {
        let elapsed = now.saturating_sub(self.started).as_secs_f32();
        let raw = (elapsed / self.animation.duration.as_secs_f32()).min(1.0);

        self.animation.timing.apply(raw)
    }

    fn is_done(&self, now: Duration) -> bool {
        now.saturating_sub(self.started) >= self.animation.duration
    }
}

/// Clock-driven [`AnimationDriver`]. The host advances it with [`Timeline::tick`]
/// and forwards the returned ids to the button.
///
/// At most one animation runs per property; a newer one replaces the older,
/// which is reported as stopped on the next tick. Properties that cannot be
/// interpolated jump to their target and finish on the next tick.
#[derive(Debug, Clone)]
pub struct Timeline {
    samples: usize,
    now: Duration,
    model: Model,
    running: Vec<Running>,
    stopped: Vec<AnimationId>,
}

impl Timeline {
    pub fn new(samples: usize) -> Self {
        Self {
            samples,
            now: Duration::ZERO,
            model: Model {
                path: Outline::default(),
                opacity: 1.0,
                fill: None,
                stroke: Color::Reset,
                line_width: 1.0,
                frame: Rect::ZERO,
                composition: Composition::Plain,
            },
            running: Vec::new(),
            stopped: Vec::new(),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.running.is_empty() && self.stopped.is_empty()
    }

    /// Advance the clock to `now` (time since the timeline's epoch) and return
    /// every animation that stopped, replaced ones first.
    pub fn tick(&mut self, now: Duration) -> Vec<AnimationId> {
        self.now = self.now.max(now);

        let mut done = std::mem::take(&mut self.stopped);
        let clock = self.now;

        self.running.retain(|run| {
            if run.is_done(clock) {
                done.push(run.animation.id);
                false
            } else {
                true
            }
        });

        done
    }

    pub fn sample(&self) -> Presentation {
        let origin = self.model.frame.origin().to_vec2();

        let points = match self.running_on(Property::Path) {
            Some(Running {
                plan: Some(plan), ..
            }) => {
                let t = self.progress_on(Property::Path);
                plan.at(t as f64)
            }
            _ => interpolate::resample(&self.model.path, self.samples),
        };

        let opacity = match self.running_on(Property::Opacity).map(|r| &r.animation) {
            Some(Animation {
                from: PropertyValue::Opacity(from),
                to: PropertyValue::Opacity(to),
                ..
            }) => interpolate::lerp(*from, *to, self.progress_on(Property::Opacity)),
            _ => self.model.opacity,
        };

        let fill = match self.running_on(Property::FillColor).map(|r| &r.animation) {
            Some(Animation {
                from: PropertyValue::FillColor(from),
                to: PropertyValue::FillColor(to),
                ..
            }) => oklch::mix(*from, *to, self.progress_on(Property::FillColor)),
            _ => self.model.fill,
        };

        Presentation {
            points: translate(points, origin),
            opacity,
            fill,
            stroke: self.model.stroke,
            line_width: self.model.line_width,
            frame: self.model.frame,
            composition: self.model.composition.clone(),
        }
    }

    fn running_on(&self, property: Property) -> Option<&Running> {
        self.running
            .iter()
            .find(|r| r.animation.property() == property)
    }

    fn progress_on(&self, property: Property) -> f32 {
        self.running_on(property)
            .map(|r| r.progress(self.now))
            .unwrap_or(1.0)
    }
}

impl AnimationDriver for Timeline {
    fn set_value(&mut self, value: PropertyValue) {
        match value {
            PropertyValue::Path(path) => self.model.path = path,
            PropertyValue::Opacity(opacity) => self.model.opacity = opacity,
            PropertyValue::FillColor(fill) => self.model.fill = fill,
            PropertyValue::StrokeColor(stroke) => self.model.stroke = stroke,
            PropertyValue::LineWidth(width) => self.model.line_width = width,
            PropertyValue::Frame(frame) => self.model.frame = frame,
            PropertyValue::Composition(composition) => self.model.composition = composition,
        }
    }

    fn animate(&mut self, animation: Animation) {
        let property = animation.property();

        if !property.is_animatable() {
            log::debug!("{property:?} is not animatable, applying {:?} directly", animation.id);
            self.stopped.push(animation.id);
            self.set_value(animation.to);
            return;
        }

        if let Some(pos) = self
            .running
            .iter()
            .position(|r| r.animation.property() == property)
        {
            let replaced = self.running.remove(pos);
            log::trace!("{:?} replaced by {:?}", replaced.animation.id, animation.id);
            self.stopped.push(replaced.animation.id);
        }

        let plan = match (&animation.from, &animation.to) {
            (PropertyValue::Path(from), PropertyValue::Path(to)) => {
                Some(MorphPlan::new(from, to, self.samples))
            }
            _ => None,
        };

        self.running.push(Running {
            animation,
            started: self.now,
            plan,
        });
    }

    fn cancel_all(&mut self) {
        log::trace!("cancelling {} animations", self.running.len());

        self.running.clear();
        self.stopped.clear();
    }
}

fn translate(points: Vec<Point>, by: Vec2) -> Vec<Point> {
    points.into_iter().map(|p| p + by).collect()
}
