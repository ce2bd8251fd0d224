//! Input abstraction layer.
//!
//! Normalizes the host's raw pointer, keyboard and focus notifications
//! into a single `InputEvent` enum consumed by the router. Coordinates are
//! device (surface) units.

use canopy_core::{KeyEvent, ModifierState, MouseButton};
use kurbo::Point;

/// A normalized event from the host window system.
#[derive(Debug, Clone)]
pub enum InputEvent {
    /// Pointer moved inside the surface.
    PointerMove { x: f64, y: f64, modifiers: ModifierState },

    /// A button went down.
    ButtonPress {
        x: f64,
        y: f64,
        button: MouseButton,
        /// Held modifiers and buttons, as reported by the host.
        modifiers: ModifierState,
    },

    /// A button went up.
    ButtonRelease {
        x: f64,
        y: f64,
        button: MouseButton,
        modifiers: ModifierState,
    },

    KeyPress(KeyEvent),
    KeyRelease(KeyEvent),

    /// The surface gained keyboard focus.
    FocusIn,
    /// The surface lost keyboard focus.
    FocusOut,

    /// The pointer left the surface.
    PointerLeave,
}

impl InputEvent {
    pub fn pointer_move(x: f64, y: f64) -> Self {
        Self::PointerMove {
            x,
            y,
            modifiers: ModifierState::empty(),
        }
    }

    /// Primary-button drag motion.
    pub fn pointer_drag(x: f64, y: f64) -> Self {
        Self::PointerMove {
            x,
            y,
            modifiers: ModifierState::PRIMARY,
        }
    }

    pub fn press(x: f64, y: f64) -> Self {
        Self::ButtonPress {
            x,
            y,
            button: MouseButton::Primary,
            modifiers: ModifierState::empty(),
        }
    }

    pub fn release(x: f64, y: f64) -> Self {
        Self::ButtonRelease {
            x,
            y,
            button: MouseButton::Primary,
            modifiers: ModifierState::PRIMARY,
        }
    }

    /// Extract position if this is a pointer event.
    pub fn position(&self) -> Option<Point> {
        match self {
            Self::PointerMove { x, y, .. }
            | Self::ButtonPress { x, y, .. }
            | Self::ButtonRelease { x, y, .. } => Some(Point::new(*x, *y)),
            _ => None,
        }
    }

    pub fn modifiers(&self) -> ModifierState {
        match self {
            Self::PointerMove { modifiers, .. }
            | Self::ButtonPress { modifiers, .. }
            | Self::ButtonRelease { modifiers, .. } => *modifiers,
            Self::KeyPress(key) | Self::KeyRelease(key) => key.modifiers,
            Self::FocusIn | Self::FocusOut | Self::PointerLeave => ModifierState::empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn position_only_for_pointer_events() {
        assert_eq!(InputEvent::press(1.0, 2.0).position(), Some(Point::new(1.0, 2.0)));
        assert_eq!(InputEvent::pointer_move(3.0, 4.0).position(), Some(Point::new(3.0, 4.0)));
        assert_eq!(InputEvent::PointerLeave.position(), None);
        assert_eq!(InputEvent::FocusIn.position(), None);
    }

    #[test]
    fn modifiers_come_from_the_event() {
        assert!(InputEvent::pointer_drag(0.0, 0.0).modifiers().contains(ModifierState::PRIMARY));
        let key = KeyEvent::new("a", 38, ModifierState::SHIFT);
        assert_eq!(InputEvent::KeyPress(key).modifiers(), ModifierState::SHIFT);
    }
}
