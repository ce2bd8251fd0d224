//! Node capabilities: outline, appearance and input handlers.
//!
//! Concrete node kinds implement [`Element`]. Only the outline and the
//! paint routine are required; every input hook defaults to doing nothing.
//! All coordinates handed to an element are in its own local space.

use crate::draw::DrawContext;
use crate::event::{EventCtx, KeyEvent, ModifierState, MouseButton};
use crate::id::Name;
use kurbo::{BezPath, Point};
use peniko::Fill;
use std::fmt;

pub trait Element: fmt::Debug {
    /// Append the hit-testable outline, in local coordinates, to `path`.
    fn layout_outline(&self, path: &mut BezPath);

    /// Paint the element. The context already carries the node's
    /// effective transform.
    fn render(&self, cx: &mut dyn DrawContext);

    /// Fill rule used when testing points against the outline.
    fn fill_rule(&self) -> Fill {
        Fill::NonZero
    }

    /// Whether this element may hold children.
    fn is_container(&self) -> bool {
        false
    }

    fn on_mouse_in(&mut self, _cx: &mut EventCtx<'_>) {}

    fn on_mouse_out(&mut self, _cx: &mut EventCtx<'_>) {}

    fn on_mouse_motion(&mut self, _cx: &mut EventCtx<'_>, _pos: Point, _mods: ModifierState) {}

    fn on_button_press(
        &mut self,
        _cx: &mut EventCtx<'_>,
        _pos: Point,
        _button: MouseButton,
        _mods: ModifierState,
    ) {
    }

    fn on_button_release(
        &mut self,
        _cx: &mut EventCtx<'_>,
        _pos: Point,
        _button: MouseButton,
        _mods: ModifierState,
    ) {
    }

    /// A press and release on this element without a drag in between.
    fn on_clicked(&mut self, _cx: &mut EventCtx<'_>, _pos: Point, _mods: ModifierState) {}

    fn on_focus_in(&mut self, _cx: &mut EventCtx<'_>) {}

    fn on_focus_out(&mut self, _cx: &mut EventCtx<'_>) {}

    fn on_key_press(&mut self, _cx: &mut EventCtx<'_>, _key: &KeyEvent) {}

    fn on_key_release(&mut self, _cx: &mut EventCtx<'_>, _key: &KeyEvent) {}

    /// Receives values for `AnimTarget::Custom` tracks.
    fn set_custom_property(&mut self, _name: Name, _value: f64) {}
}
