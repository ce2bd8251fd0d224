//! Abstract drawing surface supplied by the host.
//!
//! The core never rasterizes anything itself: paint traversal drives a
//! `DrawContext`, and each element renders its appearance through it in
//! its own local coordinate space.

use kurbo::{Affine, BezPath, Stroke};
use peniko::{Color, Fill};

/// A 2D drawing context with a save/restore state stack.
pub trait DrawContext {
    /// Push the current state (transform included).
    fn save(&mut self);

    /// Pop back to the last saved state.
    fn restore(&mut self);

    /// Concatenate `affine` onto the current transform.
    fn transform(&mut self, affine: Affine);

    /// Fill the whole surface, ignoring the current transform.
    fn fill_background(&mut self, color: Color);

    /// Fill `path` (current-transform coordinates).
    fn fill(&mut self, path: &BezPath, color: Color, rule: Fill);

    /// Stroke `path` (current-transform coordinates).
    fn stroke(&mut self, path: &BezPath, color: Color, style: &Stroke);
}
