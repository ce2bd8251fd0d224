//! Named, time-keyed property tweens.
//!
//! An [`Animation`] is a timeline of [`Track`]s. Each track owns a
//! sub-range `[begin, end]` of the timeline's normalized progress and drives
//! one property (or, for Bezier motion, the x/y pair) through its own
//! easing curve. The [`AnimationEngine`] keeps a per-node registry of
//! running timelines keyed by name:
//!
//! - committing a name that is already running on the node supersedes it;
//! - every tick advances each timeline by the real elapsed time, applies the
//!   current values and retires timelines that reached the end (which
//!   therefore land exactly on their final values);
//! - aborting removes a timeline without applying anything further.

use crate::easing::Easing;
use crate::id::Name;
use crate::model::{SceneGraph, SceneNode};
use kurbo::{CubicBez, ParamCurve, Point};
use petgraph::graph::NodeIndex;
use smallvec::{SmallVec, smallvec};
use std::collections::HashMap;
use std::time::Duration;

/// Default tick interval requested by the built-in animations.
pub const DEFAULT_TICK_MS: u32 = 16;
/// Default length of the built-in animations.
pub const DEFAULT_DURATION_MS: u32 = 250;

/// Name shared by straight and curved motion, so either supersedes the other.
pub const MOVE_TO: &str = "move_to";
pub const ROTATE_TO: &str = "rotate_to";
pub const SCALE_TO: &str = "scale_to";

/// Timing used by the built-in animations when the caller does not give
/// its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    pub tick_interval_ms: u32,
    pub duration_ms: u32,
    pub easing: Easing,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_MS,
            duration_ms: DEFAULT_DURATION_MS,
            easing: Easing::Linear,
        }
    }
}

// ─── Timeline description ────────────────────────────────────────────────

/// A numeric node property an animation can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimTarget {
    X,
    Y,
    Rotation,
    Scale,
    Depth,
    /// Delivered to `Element::set_custom_property`.
    Custom(Name),
}

impl AnimTarget {
    fn apply(self, node: &mut SceneNode, value: f64) {
        match self {
            Self::X => node.props.x = value,
            Self::Y => node.props.y = value,
            Self::Rotation => node.props.rotation = value,
            Self::Scale => node.props.scale = value,
            Self::Depth => node.props.depth = value,
            Self::Custom(name) => node.element.set_custom_property(name, value),
        }
    }
}

/// What a track computes from its eased progress.
#[derive(Debug, Clone, PartialEq)]
pub enum Tween {
    /// Linear blend from `from` to `to`.
    Scalar {
        target: AnimTarget,
        from: f64,
        to: f64,
    },
    /// Cubic Bezier motion of the node position from `p0` to `p3`.
    Bezier {
        p0: Point,
        p1: Point,
        p2: Point,
        p3: Point,
    },
}

impl Tween {
    fn apply(&self, node: &mut SceneNode, t: f64) {
        match self {
            Self::Scalar { target, from, to } => target.apply(node, lerp(*from, *to, t)),
            Self::Bezier { p0, p1, p2, p3 } => {
                node.props.set_position(bezier_point(*p0, *p1, *p2, *p3, t));
            }
        }
    }
}

/// `from` at 0, `to` at 1, exactly.
#[inline]
fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from * (1.0 - t) + to * t
}

/// Evaluate the cubic Bezier `p0..p3` at `t`. Exact at both ends.
pub fn bezier_point(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> Point {
    CubicBez::new(p0, p1, p2, p3).eval(t)
}

/// One sub-animation inside a timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub begin: f64,
    pub end: f64,
    pub easing: Easing,
    pub tween: Tween,
}

impl Track {
    /// Local progress for timeline progress `progress`, or `None` before
    /// the track has started.
    fn local_progress(&self, progress: f64) -> Option<f64> {
        if progress < self.begin {
            return None;
        }
        let span = self.end - self.begin;
        if span <= 0.0 {
            return Some(1.0);
        }
        Some(((progress - self.begin) / span).clamp(0.0, 1.0))
    }
}

/// A timeline of tracks evaluated together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Animation {
    tracks: SmallVec<[Track; 2]>,
}

impl Animation {
    pub fn new() -> Self {
        Self::default()
    }

    /// A timeline with one track spanning the whole range.
    pub fn single(tween: Tween, easing: Easing) -> Self {
        Self {
            tracks: smallvec![Track {
                begin: 0.0,
                end: 1.0,
                easing,
                tween,
            }],
        }
    }

    /// Add a track over the `[begin, end]` part of the timeline.
    /// Both bounds are clamped to `[0, 1]`.
    #[must_use]
    pub fn insert(mut self, begin: f64, end: f64, tween: Tween, easing: Easing) -> Self {
        let begin = begin.clamp(0.0, 1.0);
        let end = end.clamp(begin, 1.0);
        self.tracks.push(Track {
            begin,
            end,
            easing,
            tween,
        });
        self
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Apply every started track at timeline progress `progress`.
    pub fn apply(&self, node: &mut SceneNode, progress: f64) {
        for track in &self.tracks {
            if let Some(local) = track.local_progress(progress) {
                track.tween.apply(node, track.easing.apply(local));
            }
        }
    }

    /// Parallel x and y tweens from `from` to `to`.
    pub fn move_to(from: Point, to: Point, easing: Easing) -> Self {
        Self::new()
            .insert(
                0.0,
                1.0,
                Tween::Scalar {
                    target: AnimTarget::X,
                    from: from.x,
                    to: to.x,
                },
                easing,
            )
            .insert(
                0.0,
                1.0,
                Tween::Scalar {
                    target: AnimTarget::Y,
                    from: from.y,
                    to: to.y,
                },
                easing,
            )
    }

    /// Position along the cubic Bezier `from, c1, c2, to`.
    pub fn curve_to(from: Point, c1: Point, c2: Point, to: Point, easing: Easing) -> Self {
        Self::single(
            Tween::Bezier {
                p0: from,
                p1: c1,
                p2: c2,
                p3: to,
            },
            easing,
        )
    }

    pub fn rotate_to(from: f64, to: f64, easing: Easing) -> Self {
        Self::single(
            Tween::Scalar {
                target: AnimTarget::Rotation,
                from,
                to,
            },
            easing,
        )
    }

    pub fn scale_to(from: f64, to: f64, easing: Easing) -> Self {
        Self::single(
            Tween::Scalar {
                target: AnimTarget::Scale,
                from,
                to,
            },
            easing,
        )
    }
}

// ─── Engine ──────────────────────────────────────────────────────────────

/// A committed timeline.
#[derive(Debug, Clone)]
struct Running {
    name: Name,
    animation: Animation,
    tick_interval: Duration,
    duration: Duration,
    elapsed: Duration,
}

impl Running {
    fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }
}

/// Drives every running animation of a scene.
#[derive(Debug, Default)]
pub struct AnimationEngine {
    /// Per-node timelines in commit order.
    running: HashMap<NodeIndex, Vec<Running>>,
}

impl AnimationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `animation` on `node` under `name`, superseding any
    /// animation already running under that name.
    pub fn commit(
        &mut self,
        node: NodeIndex,
        name: impl Into<Name>,
        animation: Animation,
        tick_interval_ms: u32,
        duration_ms: u32,
    ) {
        let name = name.into();
        let list = self.running.entry(node).or_default();
        let superseded = list.len();
        list.retain(|r| r.name != name);
        if list.len() != superseded {
            log::debug!("animation {name} on {node:?} superseded");
        }
        list.push(Running {
            name,
            animation,
            tick_interval: Duration::from_millis(u64::from(tick_interval_ms.max(1))),
            duration: Duration::from_millis(u64::from(duration_ms)),
            elapsed: Duration::ZERO,
        });
        log::debug!("animation {name} committed on {node:?} for {duration_ms} ms");
    }

    /// Remove a running animation without applying a final value.
    /// Returns true if something was running under that name.
    pub fn abort(&mut self, node: NodeIndex, name: impl Into<Name>) -> bool {
        let name = name.into();
        let Some(list) = self.running.get_mut(&node) else {
            return false;
        };
        let before = list.len();
        list.retain(|r| r.name != name);
        let aborted = list.len() != before;
        if list.is_empty() {
            self.running.remove(&node);
        }
        if aborted {
            log::debug!("animation {name} on {node:?} aborted");
        }
        aborted
    }

    /// Abort every animation on `node`. Returns how many were running.
    pub fn abort_all(&mut self, node: NodeIndex) -> usize {
        let count = self.running.remove(&node).map_or(0, |list| list.len());
        if count > 0 {
            log::debug!("aborted {count} animation(s) on {node:?}");
        }
        count
    }

    pub fn is_running(&self, node: NodeIndex, name: impl Into<Name>) -> bool {
        let name = name.into();
        self.running
            .get(&node)
            .is_some_and(|list| list.iter().any(|r| r.name == name))
    }

    /// Names running on `node`, in commit order.
    pub fn running_names(&self, node: NodeIndex) -> Vec<Name> {
        self.running
            .get(&node)
            .map(|list| list.iter().map(|r| r.name).collect())
            .unwrap_or_default()
    }

    pub fn is_idle(&self) -> bool {
        self.running.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.running.values().map(Vec::len).sum()
    }

    /// The shortest tick interval any running animation asked for.
    pub fn next_tick_interval(&self) -> Option<Duration> {
        self.running
            .values()
            .flatten()
            .map(|r| r.tick_interval)
            .min()
    }

    /// Advance every animation by `elapsed` wall-clock time and apply the
    /// new values to the scene. Returns true if any property changed.
    pub fn tick(&mut self, elapsed: Duration, scene: &mut SceneGraph) -> bool {
        let mut changed = false;

        self.running.retain(|&idx, list| {
            let Some(node) = scene.node_mut(idx) else {
                log::debug!("dropping {} animation(s) of removed node {idx:?}", list.len());
                return false;
            };

            list.retain_mut(|running| {
                running.elapsed = running.elapsed.saturating_add(elapsed);
                let progress = running.progress();
                running.animation.apply(node, progress);
                changed = true;

                let done = progress >= 1.0;
                if done {
                    log::debug!("animation {} on {idx:?} finished", running.name);
                }
                !done
            });
            !list.is_empty()
        });

        changed
    }
}
