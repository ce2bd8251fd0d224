//! Canvas orchestrator.
//!
//! `Canvas` owns the scene graph, the animation engine and the input
//! router, and is the only thing a host talks to. Host events go in
//! through [`Canvas::handle`], elapsed time through [`Canvas::tick`], and
//! frames come out of [`Canvas::paint`]. Work queued by element handlers is
//! applied here once the handler has returned.

use crate::input::InputEvent;
use crate::router::InputRouter;
use canopy_core::animation::{MOVE_TO, ROTATE_TO, SCALE_TO};
use canopy_core::{
    Animation, AnimationEngine, CanvasConfig, ConfigError, DrawContext, Easing, Effect, Element,
    Name, NodeIndex, NodeProps, SceneError, SceneGraph,
};
use canopy_render::{hit_test, paint_scene};
use kurbo::Point;
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct Canvas {
    scene: SceneGraph,
    animations: AnimationEngine,
    router: InputRouter,
    config: CanvasConfig,
    redraw_requested: bool,
    focus_requested: bool,
    last_tick: Option<Instant>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    pub fn new() -> Self {
        Self::build(CanvasConfig::default())
    }

    /// Create a canvas with a custom configuration.
    ///
    /// # Errors
    /// Returns [`ConfigError::OutOfRange`] if the configuration is invalid.
    pub fn with_config(config: CanvasConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: CanvasConfig) -> Self {
        let mut scene = SceneGraph::new();
        scene.set_timing(config.timing());
        Self {
            scene,
            animations: AnimationEngine::new(),
            router: InputRouter::new(config.drag_threshold),
            config,
            redraw_requested: false,
            focus_requested: false,
            last_tick: None,
        }
    }

    // ─── Accessors ────────────────────────────────────────────────────────

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn root(&self) -> NodeIndex {
        self.scene.root
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    /// Direct scene access. Call [`Canvas::request_redraw`] after visible
    /// changes.
    pub fn scene_mut(&mut self) -> &mut SceneGraph {
        &mut self.scene
    }

    pub fn animations(&self) -> &AnimationEngine {
        &self.animations
    }

    pub fn router(&self) -> &InputRouter {
        &self.router
    }

    pub fn hovered(&self) -> Option<NodeIndex> {
        self.router.hovered()
    }

    pub fn grabbed(&self) -> Option<NodeIndex> {
        self.router.grabbed()
    }

    pub fn focused(&self) -> Option<NodeIndex> {
        self.router.focused()
    }

    /// Topmost node at device position `point`.
    pub fn node_at(&self, point: Point) -> Option<NodeIndex> {
        hit_test(&self.scene, point)
    }

    // ─── Tree ─────────────────────────────────────────────────────────────

    /// Create a detached node. It shows up once added with
    /// [`Canvas::add_element`] or [`Canvas::add_child`].
    pub fn create(&mut self, element: impl Element + 'static) -> NodeIndex {
        self.scene.create(element)
    }

    /// Append `node` to the root.
    pub fn add_element(&mut self, node: NodeIndex) -> Result<(), SceneError> {
        let root = self.scene.root;
        self.add_child(root, node)
    }

    pub fn add_child(&mut self, parent: NodeIndex, node: NodeIndex) -> Result<(), SceneError> {
        self.scene.add_child(parent, node)?;
        self.request_redraw();
        Ok(())
    }

    /// Detach `node` from its parent. Interaction state and animations that
    /// refer to the subtree are dropped; the nodes stay in the arena and can
    /// be added again.
    pub fn remove_element(&mut self, node: NodeIndex) -> Result<(), SceneError> {
        if !self.scene.contains(node) {
            return Err(SceneError::UnknownNode(node));
        }
        if node == self.scene.root {
            return Err(SceneError::RootImmutable);
        }
        if self.scene.parent(node).is_none() {
            return Err(SceneError::NotAChild(node));
        }

        let mut effects = Vec::new();
        self.router.forget(&mut self.scene, node, &mut effects);
        self.apply_effects(effects, false);
        for n in self.scene.descendants(node) {
            self.animations.abort_all(n);
        }
        self.scene.detach(node)?;
        log::debug!("removed {node:?} from the canvas");
        self.request_redraw();
        Ok(())
    }

    /// Remove `node` and drop its whole subtree from the arena.
    pub fn destroy_element(&mut self, node: NodeIndex) -> Result<Vec<NodeIndex>, SceneError> {
        if self.scene.parent(node).is_some() {
            self.remove_element(node)?;
        }
        let removed = self.scene.destroy(node)?;
        for &n in &removed {
            self.animations.abort_all(n);
        }
        Ok(removed)
    }

    // ─── Redraw & focus requests ──────────────────────────────────────────

    /// Mark the surface dirty. Hover is re-evaluated at the last pointer
    /// position, since the scene may have moved under it.
    pub fn request_redraw(&mut self) {
        self.redraw_requested = true;
        self.refresh_hover();
    }

    /// Return and clear the pending redraw flag.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    /// Return and clear a pending "give the surface keyboard focus" request.
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }

    fn refresh_hover(&mut self) {
        let mut effects = Vec::new();
        self.router.refresh_hover(&mut self.scene, &mut effects);
        self.apply_effects(effects, false);
    }

    // ─── Input ────────────────────────────────────────────────────────────

    pub fn handle(&mut self, event: &InputEvent) {
        let effects = self.router.route(&mut self.scene, event);
        self.apply_effects(effects, true);
    }

    /// Apply work queued by handlers. Hover is refreshed at most once per
    /// batch; effects produced by that refresh do not trigger another.
    fn apply_effects(&mut self, effects: Vec<Effect>, allow_refresh: bool) {
        let mut redraw = false;
        for effect in effects {
            match effect {
                Effect::Redraw => redraw = true,
                Effect::SurfaceFocus => self.focus_requested = true,
                Effect::Animate {
                    node,
                    name,
                    animation,
                    tick_interval_ms,
                    duration_ms,
                } => self
                    .animations
                    .commit(node, name, animation, tick_interval_ms, duration_ms),
                Effect::Abort { node, name } => {
                    self.animations.abort(node, name);
                }
                Effect::AbortAll { node } => {
                    self.animations.abort_all(node);
                }
            }
        }

        if redraw {
            self.redraw_requested = true;
            if allow_refresh {
                self.refresh_hover();
            }
        }
    }

    // ─── Time ─────────────────────────────────────────────────────────────

    /// Advance animations by `elapsed`. Returns true (and requests a
    /// redraw) if anything moved.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        let changed = self.animations.tick(elapsed, &mut self.scene);
        if changed {
            self.request_redraw();
        }
        changed
    }

    /// Like [`Canvas::tick`], measuring the elapsed time from the previous
    /// call. The first call after an idle period only starts the clock.
    pub fn tick_at(&mut self, now: Instant) -> bool {
        if self.animations.is_idle() {
            self.last_tick = None;
            return false;
        }
        let elapsed = self
            .last_tick
            .map_or(Duration::ZERO, |last| now.saturating_duration_since(last));
        self.last_tick = Some(now);
        self.tick(elapsed)
    }

    /// How soon the host should call [`Canvas::tick`] again, or `None` when
    /// nothing is animating.
    pub fn next_tick_interval(&self) -> Option<Duration> {
        self.animations.next_tick_interval()
    }

    // ─── Painting ─────────────────────────────────────────────────────────

    /// Paint one frame: background, then the tree from the root.
    pub fn paint(&self, cx: &mut dyn DrawContext) {
        paint_scene(&self.scene, cx, self.config.background_color());
    }

    // ─── Animation helpers ────────────────────────────────────────────────

    /// Commit `animation` on `node` under `name`, superseding any
    /// animation of the same name.
    pub fn animate(
        &mut self,
        node: NodeIndex,
        name: impl Into<Name>,
        animation: Animation,
        duration_ms: u32,
    ) -> Result<(), SceneError> {
        if !self.scene.contains(node) {
            return Err(SceneError::UnknownNode(node));
        }
        self.animations
            .commit(node, name, animation, self.config.tick_interval_ms, duration_ms);
        Ok(())
    }

    /// Tween `node`'s position to `to`.
    pub fn move_to(
        &mut self,
        node: NodeIndex,
        to: Point,
        duration_ms: u32,
        easing: Easing,
    ) -> Result<(), SceneError> {
        let from = self.props_of(node)?.position();
        self.animate(node, MOVE_TO, Animation::move_to(from, to, easing), duration_ms)
    }

    /// Move `node` along the cubic Bezier from its position through `c1`
    /// and `c2` to `to`. Supersedes a running `move_to`.
    pub fn curve_to(
        &mut self,
        node: NodeIndex,
        c1: Point,
        c2: Point,
        to: Point,
        duration_ms: u32,
        easing: Easing,
    ) -> Result<(), SceneError> {
        let from = self.props_of(node)?.position();
        let animation = Animation::curve_to(from, c1, c2, to, easing);
        self.animate(node, MOVE_TO, animation, duration_ms)
    }

    pub fn rotate_to(
        &mut self,
        node: NodeIndex,
        rotation: f64,
        duration_ms: u32,
        easing: Easing,
    ) -> Result<(), SceneError> {
        let from = self.props_of(node)?.rotation;
        self.animate(node, ROTATE_TO, Animation::rotate_to(from, rotation, easing), duration_ms)
    }

    pub fn scale_to(
        &mut self,
        node: NodeIndex,
        scale: f64,
        duration_ms: u32,
        easing: Easing,
    ) -> Result<(), SceneError> {
        let from = self.props_of(node)?.scale;
        self.animate(node, SCALE_TO, Animation::scale_to(from, scale, easing), duration_ms)
    }

    // Same as above with the configured default length and easing.

    pub fn move_to_default(&mut self, node: NodeIndex, to: Point) -> Result<(), SceneError> {
        let timing = self.config.timing();
        self.move_to(node, to, timing.duration_ms, timing.easing)
    }

    pub fn curve_to_default(
        &mut self,
        node: NodeIndex,
        c1: Point,
        c2: Point,
        to: Point,
    ) -> Result<(), SceneError> {
        let timing = self.config.timing();
        self.curve_to(node, c1, c2, to, timing.duration_ms, timing.easing)
    }

    pub fn rotate_to_default(&mut self, node: NodeIndex, rotation: f64) -> Result<(), SceneError> {
        let timing = self.config.timing();
        self.rotate_to(node, rotation, timing.duration_ms, timing.easing)
    }

    pub fn scale_to_default(&mut self, node: NodeIndex, scale: f64) -> Result<(), SceneError> {
        let timing = self.config.timing();
        self.scale_to(node, scale, timing.duration_ms, timing.easing)
    }

    /// Stop one named animation where it is. Returns true if it was running.
    pub fn abort_animation(&mut self, node: NodeIndex, name: impl Into<Name>) -> bool {
        self.animations.abort(node, name)
    }

    /// Stop every animation on `node`. Returns how many were running.
    pub fn cancel_animations(&mut self, node: NodeIndex) -> usize {
        self.animations.abort_all(node)
    }

    fn props_of(&self, node: NodeIndex) -> Result<NodeProps, SceneError> {
        self.scene.props(node).ok_or(SceneError::UnknownNode(node))
    }
}
