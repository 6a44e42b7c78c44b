//! Shape-morphing button model.
//!
//! [`PolymorphButton`] owns the outline, style, highlight and input-gate state
//! and pushes every visual change to an injected [`AnimationDriver`]. Outlines
//! come from [`generate_outline`]; [`Timeline`] is a ready-made driver that
//! samples in-flight animations against an explicit clock, and [`ButtonCanvas`]
//! draws such a sample with ratatui.

pub mod animation;
pub mod button;
pub mod canvas;
pub mod config;
pub mod easing;
pub mod error;
pub mod geometry;
pub mod interpolate;
pub mod oklch;
pub mod outline;
pub mod shape;
pub mod timeline;

pub use kurbo;

pub use animation::{
    Animation, AnimationDriver, AnimationGate, AnimationId, GateMode, Property, PropertyValue,
};
pub use button::{ButtonEvent, PolymorphButton, TransitionRequest};
pub use canvas::ButtonCanvas;
pub use config::{BlurStyle, ButtonConfig, Composition};
pub use error::ButtonError;
pub use outline::{Outline, Segment};
pub use shape::{Style, StyleAlias, generate_outline};
pub use timeline::{Presentation, Timeline};
