//! Element-facing event payloads and the handler context.
//!
//! Handlers cannot touch the scene directly while they run: everything they
//! want to happen afterwards (redraws, animations, cancellations) is queued
//! as an [`Effect`] on the [`EventCtx`] and applied by the canvas once the
//! handler returns.

use crate::animation::{self, Animation, Timing};
use crate::easing::Easing;
use crate::id::Name;
use crate::model::NodeProps;
use bitflags::bitflags;
use kurbo::Point;
use petgraph::graph::NodeIndex;

bitflags! {
    /// Keyboard modifiers and held pointer buttons at the time of an event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ModifierState: u32 {
        const SHIFT = 1 << 0;
        const CONTROL = 1 << 1;
        const ALT = 1 << 2;
        const META = 1 << 3;
        /// Primary (usually left) button held.
        const PRIMARY = 1 << 8;
        const MIDDLE = 1 << 9;
        const SECONDARY = 1 << 10;
    }
}

/// A pointer button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Primary,
    Middle,
    Secondary,
    Other(u32),
}

impl From<u32> for MouseButton {
    /// Map a host button number (1 = primary, 2 = middle, 3 = secondary).
    fn from(id: u32) -> Self {
        match id {
            1 => Self::Primary,
            2 => Self::Middle,
            3 => Self::Secondary,
            other => Self::Other(other),
        }
    }
}

/// A keyboard event, forwarded to the focused element unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// Logical key name as reported by the host (e.g. `"a"`, `"Escape"`).
    pub key: String,
    /// Host-specific key code.
    pub code: u32,
    pub modifiers: ModifierState,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>, code: u32, modifiers: ModifierState) -> Self {
        Self {
            key: key.into(),
            code,
            modifiers,
        }
    }
}

/// Work requested during event handling, applied by the canvas afterwards.
#[derive(Debug, Clone)]
pub enum Effect {
    /// Repaint on the next opportunity.
    Redraw,
    /// Ask the host to give the surface keyboard focus.
    SurfaceFocus,
    /// Commit (or supersede) a named animation.
    Animate {
        node: NodeIndex,
        name: Name,
        animation: Animation,
        tick_interval_ms: u32,
        duration_ms: u32,
    },
    /// Abort one named animation without applying a final value.
    Abort { node: NodeIndex, name: Name },
    /// Abort every animation running on a node.
    AbortAll { node: NodeIndex },
}

/// Context handed to element handlers.
#[derive(Debug)]
pub struct EventCtx<'a> {
    node: NodeIndex,
    props: NodeProps,
    timing: Timing,
    effects: &'a mut Vec<Effect>,
}

impl<'a> EventCtx<'a> {
    pub fn new(
        node: NodeIndex,
        props: NodeProps,
        timing: Timing,
        effects: &'a mut Vec<Effect>,
    ) -> Self {
        Self {
            node,
            props,
            timing,
            effects,
        }
    }

    /// The node receiving the event.
    pub fn node(&self) -> NodeIndex {
        self.node
    }

    /// The node's properties when the event was dispatched.
    pub fn props(&self) -> NodeProps {
        self.props
    }

    /// The canvas's timing for built-in animations.
    pub fn timing(&self) -> Timing {
        self.timing
    }

    pub fn request_redraw(&mut self) {
        self.effects.push(Effect::Redraw);
    }

    /// Commit an arbitrary animation on this node.
    pub fn animate(
        &mut self,
        name: impl Into<Name>,
        animation: Animation,
        tick_interval_ms: u32,
        duration_ms: u32,
    ) {
        self.effects.push(Effect::Animate {
            node: self.node,
            name: name.into(),
            animation,
            tick_interval_ms,
            duration_ms,
        });
    }

    /// Tween this node's position to `to`.
    pub fn move_to(&mut self, to: Point, duration_ms: u32, easing: Easing) {
        let animation = Animation::move_to(self.props.position(), to, easing);
        self.animate(animation::MOVE_TO, animation, self.timing.tick_interval_ms, duration_ms);
    }

    /// Move this node along a cubic Bezier from its position through
    /// `c1`, `c2` to `to`.
    pub fn curve_to(&mut self, c1: Point, c2: Point, to: Point, duration_ms: u32, easing: Easing) {
        let animation = Animation::curve_to(self.props.position(), c1, c2, to, easing);
        self.animate(animation::MOVE_TO, animation, self.timing.tick_interval_ms, duration_ms);
    }

    pub fn rotate_to(&mut self, rotation: f64, duration_ms: u32, easing: Easing) {
        let animation = Animation::rotate_to(self.props.rotation, rotation, easing);
        self.animate(animation::ROTATE_TO, animation, self.timing.tick_interval_ms, duration_ms);
    }

    pub fn scale_to(&mut self, scale: f64, duration_ms: u32, easing: Easing) {
        let animation = Animation::scale_to(self.props.scale, scale, easing);
        self.animate(animation::SCALE_TO, animation, self.timing.tick_interval_ms, duration_ms);
    }

    pub fn abort_animation(&mut self, name: impl Into<Name>) {
        self.effects.push(Effect::Abort {
            node: self.node,
            name: name.into(),
        });
    }

    pub fn cancel_animations(&mut self) {
        self.effects.push(Effect::AbortAll { node: self.node });
    }
}
