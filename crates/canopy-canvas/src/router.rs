//! Pointer and keyboard routing.
//!
//! `InputRouter` turns the raw host event stream into element callbacks:
//! hover tracking, grabs, click versus drag disambiguation and keyboard
//! focus. It never touches animations or the redraw flag itself; anything
//! beyond the scene graph is pushed as an [`Effect`] for the canvas.
//!
//! Invariants:
//! - at most one node is hovered, grabbed or focused at a time;
//! - while a grab is active, hit tests never move the hover;
//! - assigning hover or focus its current value fires nothing.

use crate::input::InputEvent;
use canopy_core::config::DEFAULT_DRAG_THRESHOLD;
use canopy_core::{
    Effect, KeyEvent, ModifierState, MouseButton, NodeIndex, SceneGraph, to_local, to_parent_local,
};
use canopy_render::hit_test;
use kurbo::{Point, Vec2};

#[derive(Debug, Clone)]
pub struct InputRouter {
    hovered: Option<NodeIndex>,
    grabbed: Option<NodeIndex>,
    focused: Option<NodeIndex>,
    last_focused: Option<NodeIndex>,
    dragging: bool,
    /// Device position of the press that started the grab.
    drag_start: Point,
    /// Press position minus node position, in parent space.
    drag_offset: Vec2,
    /// Last pointer position inside the surface.
    pointer: Option<Point>,
    drag_threshold: f64,
}

impl Default for InputRouter {
    fn default() -> Self {
        Self::new(DEFAULT_DRAG_THRESHOLD)
    }
}

impl InputRouter {
    pub fn new(drag_threshold: f64) -> Self {
        Self {
            hovered: None,
            grabbed: None,
            focused: None,
            last_focused: None,
            dragging: false,
            drag_start: Point::ZERO,
            drag_offset: Vec2::ZERO,
            pointer: None,
            drag_threshold,
        }
    }

    pub fn hovered(&self) -> Option<NodeIndex> {
        self.hovered
    }

    pub fn grabbed(&self) -> Option<NodeIndex> {
        self.grabbed
    }

    pub fn focused(&self) -> Option<NodeIndex> {
        self.focused
    }

    /// Node to refocus when the surface regains keyboard focus.
    pub fn last_focused(&self) -> Option<NodeIndex> {
        self.last_focused
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    pub fn drag_threshold(&self) -> f64 {
        self.drag_threshold
    }

    /// Feed one host event through the state machine.
    pub fn route(&mut self, scene: &mut SceneGraph, event: &InputEvent) -> Vec<Effect> {
        let mut effects = Vec::new();
        match event {
            InputEvent::PointerMove { x, y, modifiers } => {
                self.pointer_motion(scene, Point::new(*x, *y), *modifiers, &mut effects);
            }
            InputEvent::ButtonPress {
                x,
                y,
                button,
                modifiers,
            } => {
                self.button_press(scene, Point::new(*x, *y), *button, *modifiers, &mut effects);
            }
            InputEvent::ButtonRelease {
                x,
                y,
                button,
                modifiers,
            } => {
                self.button_release(scene, Point::new(*x, *y), *button, *modifiers, &mut effects);
            }
            InputEvent::KeyPress(key) => self.key_press(scene, key, &mut effects),
            InputEvent::KeyRelease(key) => self.key_release(scene, key, &mut effects),
            InputEvent::FocusIn => self.focus_in(scene, &mut effects),
            InputEvent::FocusOut => self.focus_out(scene, &mut effects),
            InputEvent::PointerLeave => self.pointer_leave(scene, &mut effects),
        }
        effects
    }

    // ─── Pointer ──────────────────────────────────────────────────────────

    pub fn pointer_motion(
        &mut self,
        scene: &mut SceneGraph,
        point: Point,
        mods: ModifierState,
        effects: &mut Vec<Effect>,
    ) {
        self.pointer = Some(point);

        let Some(grabbed) = self.grabbed else {
            let hit = hit_test(scene, point);
            self.set_hover(scene, hit, false, effects);
            if let Some(hovered) = self.hovered {
                forward_motion(scene, hovered, point, mods, effects);
            }
            return;
        };

        let draggable = scene.flags(grabbed).is_some_and(|f| f.draggable);
        if draggable && mods.contains(ModifierState::PRIMARY) {
            if !self.dragging {
                let moved = point - self.drag_start;
                if moved.x.abs() > self.drag_threshold || moved.y.abs() > self.drag_threshold {
                    log::debug!("drag start on {grabbed:?}");
                    self.dragging = true;
                }
            }
            if self.dragging {
                self.drag_to(scene, grabbed, point, effects);
                return;
            }
        }

        forward_motion(scene, grabbed, point, mods, effects);
    }

    fn drag_to(
        &mut self,
        scene: &mut SceneGraph,
        node: NodeIndex,
        point: Point,
        effects: &mut Vec<Effect>,
    ) {
        debug_assert!(scene.parent(node).is_some(), "dragged node {node:?} has no parent");
        if scene.parent(node).is_none() {
            return;
        }
        let Some(parent_point) = to_parent_local(scene, node, point) else {
            return;
        };
        if let Some(props) = scene.props_mut(node) {
            props.set_position(parent_point - self.drag_offset);
            effects.push(Effect::Redraw);
        }
    }

    pub fn button_press(
        &mut self,
        scene: &mut SceneGraph,
        point: Point,
        button: MouseButton,
        mods: ModifierState,
        effects: &mut Vec<Effect>,
    ) {
        self.pointer = Some(point);
        effects.push(Effect::SurfaceFocus);

        let hit = hit_test(scene, point);
        self.set_grab(scene, hit, effects);
        let Some(node) = hit else {
            return;
        };

        effects.push(Effect::AbortAll { node });
        self.drag_start = point;
        let position = scene.props(node).map(|p| p.position()).unwrap_or(Point::ZERO);
        self.drag_offset = to_parent_local(scene, node, point).map_or(Vec2::ZERO, |p| p - position);

        if let Some(local) = to_local(scene, node, point) {
            log::trace!("press {button:?} on {node:?} at {local:?}");
            scene.dispatch(node, effects, |el, cx| el.on_button_press(cx, local, button, mods));
        }
    }

    pub fn button_release(
        &mut self,
        scene: &mut SceneGraph,
        point: Point,
        button: MouseButton,
        mods: ModifierState,
        effects: &mut Vec<Effect>,
    ) {
        self.pointer = Some(point);

        if let Some(grabbed) = self.grabbed
            && !self.dragging
            && hit_test(scene, point) == Some(grabbed)
        {
            if let Some(local) = to_local(scene, grabbed, point) {
                log::trace!("click {button:?} on {grabbed:?} at {local:?}");
                scene.dispatch(grabbed, effects, |el, cx| {
                    el.on_button_release(cx, local, button, mods);
                    el.on_clicked(cx, local, mods);
                });
            }
            if scene.flags(grabbed).is_some_and(|f| f.can_focus) {
                self.set_focus(scene, Some(grabbed), effects);
            }
        }

        if self.dragging {
            log::debug!("drag end");
        }
        self.dragging = false;
        self.set_grab(scene, None, effects);
    }

    /// Pointer left the surface: drop hover even while a grab is held.
    pub fn pointer_leave(&mut self, scene: &mut SceneGraph, effects: &mut Vec<Effect>) {
        self.pointer = None;
        self.set_hover(scene, None, true, effects);
    }

    /// Re-run the hover hit test at the last pointer position, for when
    /// the scene moved under a stationary pointer.
    pub fn refresh_hover(&mut self, scene: &mut SceneGraph, effects: &mut Vec<Effect>) {
        if self.grabbed.is_some() {
            return;
        }
        let Some(point) = self.pointer else {
            return;
        };
        let hit = hit_test(scene, point);
        self.set_hover(scene, hit, false, effects);
    }

    // ─── Keyboard & focus ─────────────────────────────────────────────────

    pub fn key_press(&mut self, scene: &mut SceneGraph, key: &KeyEvent, effects: &mut Vec<Effect>) {
        if let Some(focused) = self.focused {
            scene.dispatch(focused, effects, |el, cx| el.on_key_press(cx, key));
        }
    }

    pub fn key_release(
        &mut self,
        scene: &mut SceneGraph,
        key: &KeyEvent,
        effects: &mut Vec<Effect>,
    ) {
        if let Some(focused) = self.focused {
            scene.dispatch(focused, effects, |el, cx| el.on_key_release(cx, key));
        }
    }

    /// The surface regained keyboard focus.
    pub fn focus_in(&mut self, scene: &mut SceneGraph, effects: &mut Vec<Effect>) {
        if let Some(last) = self.last_focused {
            self.set_focus(scene, Some(last), effects);
        }
    }

    /// The surface lost keyboard focus.
    pub fn focus_out(&mut self, scene: &mut SceneGraph, effects: &mut Vec<Effect>) {
        if self.focused.is_some() {
            self.last_focused = self.focused;
        }
        self.set_focus(scene, None, effects);
    }

    /// Drop all state that refers to `removed` or its descendants. Call
    /// before the subtree is detached or destroyed.
    pub fn forget(
        &mut self,
        scene: &mut SceneGraph,
        removed: NodeIndex,
        effects: &mut Vec<Effect>,
    ) {
        let subtree = scene.descendants(removed);
        let gone = |slot: Option<NodeIndex>| slot.is_some_and(|n| subtree.contains(&n));

        if gone(self.focused) {
            self.set_focus(scene, None, effects);
        }
        if gone(self.last_focused) {
            self.last_focused = None;
        }
        if gone(self.grabbed) {
            self.grabbed = None;
            self.dragging = false;
        }
        if gone(self.hovered) {
            self.hovered = None;
        }
    }

    // ─── State setters ────────────────────────────────────────────────────

    fn set_hover(
        &mut self,
        scene: &mut SceneGraph,
        node: Option<NodeIndex>,
        force: bool,
        effects: &mut Vec<Effect>,
    ) {
        if node == self.hovered {
            return;
        }
        if self.grabbed.is_some() && !force {
            return;
        }
        let old = std::mem::replace(&mut self.hovered, node);
        log::debug!("hover {old:?} -> {node:?}");
        if let Some(old) = old {
            scene.dispatch(old, effects, |el, cx| el.on_mouse_out(cx));
        }
        if let Some(new) = node {
            scene.dispatch(new, effects, |el, cx| el.on_mouse_in(cx));
        }
    }

    fn set_grab(
        &mut self,
        scene: &mut SceneGraph,
        node: Option<NodeIndex>,
        effects: &mut Vec<Effect>,
    ) {
        if node != self.grabbed {
            log::debug!("grab {:?} -> {node:?}", self.grabbed);
        }
        self.grabbed = node;
        self.set_hover(scene, node, true, effects);
    }

    fn set_focus(
        &mut self,
        scene: &mut SceneGraph,
        node: Option<NodeIndex>,
        effects: &mut Vec<Effect>,
    ) {
        if node == self.focused {
            return;
        }
        let old = std::mem::replace(&mut self.focused, node);
        log::debug!("focus {old:?} -> {node:?}");
        if let Some(old) = old {
            scene.set_focus(old, false, effects);
        }
        if let Some(new) = node {
            scene.set_focus(new, true, effects);
        }
    }
}

fn forward_motion(
    scene: &mut SceneGraph,
    node: NodeIndex,
    point: Point,
    mods: ModifierState,
    effects: &mut Vec<Effect>,
) {
    if let Some(local) = to_local(scene, node, point) {
        log::trace!("motion on {node:?} at {local:?}");
        scene.dispatch(node, effects, |el, cx| el.on_mouse_motion(cx, local, mods));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canopy_core::shapes::RectShape;
    use canopy_core::{DrawContext, Element, EventCtx, NodeProps};
    use kurbo::{BezPath, Rect, Shape};
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    /// 20×20 square that records every callback it receives.
    #[derive(Debug)]
    struct Probe {
        name: &'static str,
        log: Log,
    }

    impl Probe {
        fn push(&self, what: String) {
            self.log.borrow_mut().push(format!("{}:{what}", self.name));
        }
    }

    impl Element for Probe {
        fn layout_outline(&self, path: &mut BezPath) {
            path.extend(Rect::new(0.0, 0.0, 20.0, 20.0).path_elements(0.1));
        }
        fn render(&self, _cx: &mut dyn DrawContext) {}
        fn on_mouse_in(&mut self, _cx: &mut EventCtx<'_>) {
            self.push("in".into());
        }
        fn on_mouse_out(&mut self, _cx: &mut EventCtx<'_>) {
            self.push("out".into());
        }
        fn on_mouse_motion(&mut self, _cx: &mut EventCtx<'_>, pos: Point, _mods: ModifierState) {
            self.push(format!("motion({},{})", pos.x, pos.y));
        }
        fn on_button_press(
            &mut self,
            _cx: &mut EventCtx<'_>,
            pos: Point,
            _b: MouseButton,
            _m: ModifierState,
        ) {
            self.push(format!("press({},{})", pos.x, pos.y));
        }
        fn on_button_release(
            &mut self,
            _cx: &mut EventCtx<'_>,
            _pos: Point,
            _b: MouseButton,
            _m: ModifierState,
        ) {
            self.push("release".into());
        }
        fn on_clicked(&mut self, _cx: &mut EventCtx<'_>, _pos: Point, _mods: ModifierState) {
            self.push("click".into());
        }
        fn on_focus_in(&mut self, _cx: &mut EventCtx<'_>) {
            self.push("focus_in".into());
        }
        fn on_focus_out(&mut self, _cx: &mut EventCtx<'_>) {
            self.push("focus_out".into());
        }
        fn on_key_press(&mut self, _cx: &mut EventCtx<'_>, key: &KeyEvent) {
            self.push(format!("key({})", key.key));
        }
    }

    fn probe(sg: &mut SceneGraph, log: &Log, name: &'static str, x: f64, y: f64) -> NodeIndex {
        let n = sg.create(Probe {
            name,
            log: log.clone(),
        });
        *sg.props_mut(n).unwrap() = NodeProps::at(x, y);
        sg.add_child(sg.root, n).unwrap();
        n
    }

    fn take(log: &Log) -> Vec<String> {
        std::mem::take(&mut *log.borrow_mut())
    }

    #[test]
    fn motion_moves_hover_between_nodes() {
        let log = Log::default();
        let mut sg = SceneGraph::new();
        let a = probe(&mut sg, &log, "a", 0.0, 0.0);
        let b = probe(&mut sg, &log, "b", 50.0, 0.0);
        let mut router = InputRouter::default();

        router.route(&mut sg, &InputEvent::pointer_move(5.0, 5.0));
        assert_eq!(router.hovered(), Some(a));
        router.route(&mut sg, &InputEvent::pointer_move(6.0, 5.0));
        router.route(&mut sg, &InputEvent::pointer_move(55.0, 5.0));
        assert_eq!(router.hovered(), Some(b));
        router.route(&mut sg, &InputEvent::pointer_move(500.0, 5.0));
        assert_eq!(router.hovered(), None);

        assert_eq!(
            take(&log),
            vec![
                "a:in",
                "a:motion(5,5)",
                "a:motion(6,5)",
                "a:out",
                "b:in",
                "b:motion(5,5)",
                "b:out",
            ]
        );
    }

    #[test]
    fn press_grabs_and_release_clicks_once() {
        let log = Log::default();
        let mut sg = SceneGraph::new();
        let a = probe(&mut sg, &log, "a", 10.0, 10.0);
        let mut router = InputRouter::default();

        let effects = router.route(&mut sg, &InputEvent::press(15.0, 15.0));
        assert_eq!(router.grabbed(), Some(a));
        assert_eq!(router.hovered(), Some(a));
        assert!(matches!(effects[0], Effect::SurfaceFocus));
        assert!(effects.iter().any(|e| matches!(e, Effect::AbortAll { node } if *node == a)));

        router.route(&mut sg, &InputEvent::release(15.0, 15.0));
        assert_eq!(router.grabbed(), None);
        assert_eq!(router.hovered(), None);
        assert_eq!(router.focused(), Some(a));
        assert!(sg.node(a).unwrap().has_focus());
        assert_eq!(
            take(&log),
            vec!["a:in", "a:press(5,5)", "a:release", "a:click", "a:focus_in", "a:out"]
        );
    }

    #[test]
    fn press_on_background_still_requests_surface_focus() {
        let mut sg = SceneGraph::new();
        let mut router = InputRouter::default();
        let effects = router.route(&mut sg, &InputEvent::press(1.0, 1.0));
        assert_eq!(router.grabbed(), None);
        assert_eq!(effects.len(), 1);
        assert!(matches!(effects[0], Effect::SurfaceFocus));
    }

    #[test]
    fn release_elsewhere_is_not_a_click() {
        let log = Log::default();
        let mut sg = SceneGraph::new();
        probe(&mut sg, &log, "a", 0.0, 0.0);
        let mut router = InputRouter::default();

        router.route(&mut sg, &InputEvent::press(5.0, 5.0));
        router.route(&mut sg, &InputEvent::release(300.0, 300.0));
        assert_eq!(router.focused(), None);
        assert!(!take(&log).iter().any(|e| e == "a:click"));
    }

    #[test]
    fn grab_blocks_hover_changes_until_release() {
        let log = Log::default();
        let mut sg = SceneGraph::new();
        let a = probe(&mut sg, &log, "a", 0.0, 0.0);
        probe(&mut sg, &log, "b", 50.0, 0.0);
        let mut router = InputRouter::default();

        router.route(&mut sg, &InputEvent::press(5.0, 5.0));
        take(&log);
        // Not draggable: motion goes to the grabbed node, in its own space.
        router.route(&mut sg, &InputEvent::pointer_drag(55.0, 5.0));
        assert_eq!(router.hovered(), Some(a));
        assert_eq!(take(&log), vec!["a:motion(55,5)"]);
    }

    #[test]
    fn small_moves_stay_below_the_drag_threshold() {
        let log = Log::default();
        let mut sg = SceneGraph::new();
        let a = probe(&mut sg, &log, "a", 0.0, 0.0);
        sg.flags_mut(a).unwrap().draggable = true;
        let mut router = InputRouter::default();

        router.route(&mut sg, &InputEvent::press(5.0, 5.0));
        router.route(&mut sg, &InputEvent::pointer_drag(10.0, 10.0));
        assert!(!router.is_dragging());
        assert_eq!(sg.props(a).unwrap().position(), Point::ZERO);

        router.route(&mut sg, &InputEvent::pointer_drag(10.5, 5.0));
        assert!(router.is_dragging());
        assert_eq!(sg.props(a).unwrap().position(), Point::new(5.5, 0.0));
    }

    #[test]
    fn drag_requires_the_primary_button() {
        let log = Log::default();
        let mut sg = SceneGraph::new();
        let a = probe(&mut sg, &log, "a", 0.0, 0.0);
        sg.flags_mut(a).unwrap().draggable = true;
        let mut router = InputRouter::default();

        router.route(&mut sg, &InputEvent::press(5.0, 5.0));
        router.route(&mut sg, &InputEvent::pointer_move(50.0, 50.0));
        assert!(!router.is_dragging());
        assert_eq!(sg.props(a).unwrap().position(), Point::ZERO);
    }

    #[test]
    fn threshold_comes_from_the_router() {
        let mut sg = SceneGraph::new();
        let n = sg.create(RectShape::new(20.0, 20.0));
        sg.add_child(sg.root, n).unwrap();
        sg.flags_mut(n).unwrap().draggable = true;
        let mut router = InputRouter::new(20.0);

        router.route(&mut sg, &InputEvent::press(5.0, 5.0));
        router.route(&mut sg, &InputEvent::pointer_drag(20.0, 5.0));
        assert!(!router.is_dragging());
        router.route(&mut sg, &InputEvent::pointer_drag(26.0, 5.0));
        assert!(router.is_dragging());
    }

    #[test]
    fn focus_out_and_in_restore_the_last_focused_node() {
        let log = Log::default();
        let mut sg = SceneGraph::new();
        let a = probe(&mut sg, &log, "a", 0.0, 0.0);
        let mut router = InputRouter::default();

        router.route(&mut sg, &InputEvent::press(5.0, 5.0));
        router.route(&mut sg, &InputEvent::release(5.0, 5.0));
        take(&log);

        router.route(&mut sg, &InputEvent::FocusOut);
        assert_eq!(router.focused(), None);
        assert_eq!(router.last_focused(), Some(a));
        router.route(&mut sg, &InputEvent::FocusOut);
        assert_eq!(router.last_focused(), Some(a));

        router.route(&mut sg, &InputEvent::FocusIn);
        assert_eq!(router.focused(), Some(a));
        router.route(&mut sg, &InputEvent::FocusIn);
        assert_eq!(take(&log), vec!["a:focus_out", "a:focus_in"]);
    }

    #[test]
    fn keys_reach_only_the_focused_node() {
        let log = Log::default();
        let mut sg = SceneGraph::new();
        let a = probe(&mut sg, &log, "a", 0.0, 0.0);
        probe(&mut sg, &log, "b", 50.0, 0.0);
        let mut router = InputRouter::default();
        let key = KeyEvent::new("x", 53, ModifierState::empty());

        router.route(&mut sg, &InputEvent::KeyPress(key.clone()));
        assert!(take(&log).is_empty());

        router.route(&mut sg, &InputEvent::press(5.0, 5.0));
        router.route(&mut sg, &InputEvent::release(5.0, 5.0));
        assert_eq!(router.focused(), Some(a));
        take(&log);

        router.route(&mut sg, &InputEvent::pointer_move(55.0, 5.0));
        take(&log);
        router.route(&mut sg, &InputEvent::KeyPress(key));
        assert_eq!(take(&log), vec!["a:key(x)"]);
    }

    #[test]
    fn nodes_that_refuse_focus_are_not_focused_by_clicks() {
        let log = Log::default();
        let mut sg = SceneGraph::new();
        let a = probe(&mut sg, &log, "a", 0.0, 0.0);
        sg.flags_mut(a).unwrap().can_focus = false;
        let mut router = InputRouter::default();

        router.route(&mut sg, &InputEvent::press(5.0, 5.0));
        router.route(&mut sg, &InputEvent::release(5.0, 5.0));
        assert_eq!(router.focused(), None);
        assert!(take(&log).contains(&"a:click".to_string()));
    }

    #[test]
    fn leave_clears_hover_even_while_grabbed() {
        let log = Log::default();
        let mut sg = SceneGraph::new();
        let a = probe(&mut sg, &log, "a", 0.0, 0.0);
        let mut router = InputRouter::default();

        router.route(&mut sg, &InputEvent::press(5.0, 5.0));
        assert_eq!(router.hovered(), Some(a));
        router.route(&mut sg, &InputEvent::PointerLeave);
        assert_eq!(router.hovered(), None);
        assert_eq!(router.grabbed(), Some(a));
        assert_eq!(router.pointer(), None);
        assert_eq!(take(&log), vec!["a:in", "a:press(5,5)", "a:out"]);
    }

    #[test]
    fn refresh_hover_follows_a_moved_node() {
        let log = Log::default();
        let mut sg = SceneGraph::new();
        let a = probe(&mut sg, &log, "a", 0.0, 0.0);
        let mut router = InputRouter::default();
        let mut effects = Vec::new();

        router.route(&mut sg, &InputEvent::pointer_move(5.0, 5.0));
        sg.props_mut(a).unwrap().x = 100.0;
        router.refresh_hover(&mut sg, &mut effects);
        assert_eq!(router.hovered(), None);

        sg.props_mut(a).unwrap().x = 0.0;
        router.refresh_hover(&mut sg, &mut effects);
        assert_eq!(router.hovered(), Some(a));
        assert_eq!(take(&log), vec!["a:in", "a:motion(5,5)", "a:out", "a:in"]);
    }

    #[test]
    fn forget_clears_state_pointing_into_a_subtree() {
        let log = Log::default();
        let mut sg = SceneGraph::new();
        let a = probe(&mut sg, &log, "a", 0.0, 0.0);
        let mut router = InputRouter::default();
        let mut effects = Vec::new();

        router.route(&mut sg, &InputEvent::press(5.0, 5.0));
        router.route(&mut sg, &InputEvent::release(5.0, 5.0));
        router.route(&mut sg, &InputEvent::pointer_move(5.0, 5.0));
        router.route(&mut sg, &InputEvent::press(5.0, 5.0));
        assert_eq!(router.focused(), Some(a));
        assert_eq!(router.grabbed(), Some(a));
        take(&log);

        router.forget(&mut sg, a, &mut effects);
        assert_eq!(router.focused(), None);
        assert_eq!(router.last_focused(), None);
        assert_eq!(router.grabbed(), None);
        assert_eq!(router.hovered(), None);
        assert_eq!(take(&log), vec!["a:focus_out"]);
    }
}
