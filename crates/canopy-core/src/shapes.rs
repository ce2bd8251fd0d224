//! Built-in element kinds: a transparent container and simple filled shapes.
//!
//! Shapes put their local origin at the top-left of their bounds; rotation
//! and scale therefore pivot around that corner.

use crate::draw::DrawContext;
use crate::element::Element;
use kurbo::{BezPath, Ellipse, Rect, Shape, Stroke};
use peniko::{Color, Fill};

/// Flattening tolerance for curved outlines.
const TOLERANCE: f64 = 0.1;

/// An optional outline stroke.
#[derive(Debug, Clone)]
pub struct Outline {
    pub color: Color,
    pub width: f64,
}

/// Invisible container with no outline of its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct Group;

impl Element for Group {
    fn layout_outline(&self, _path: &mut BezPath) {}

    fn render(&self, _cx: &mut dyn DrawContext) {}

    fn is_container(&self) -> bool {
        true
    }
}

// ─── Rect ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct RectShape {
    pub width: f64,
    pub height: f64,
    pub fill: Color,
    pub stroke: Option<Outline>,
}

impl RectShape {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            fill: Color::from_rgb8(255, 255, 255),
            stroke: None,
        }
    }

    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = fill;
        self
    }

    pub fn with_stroke(mut self, color: Color, width: f64) -> Self {
        self.stroke = Some(Outline { color, width });
        self
    }
}

impl Element for RectShape {
    fn layout_outline(&self, path: &mut BezPath) {
        path.extend(Rect::new(0.0, 0.0, self.width, self.height).path_elements(TOLERANCE));
    }

    fn render(&self, cx: &mut dyn DrawContext) {
        let mut path = BezPath::new();
        self.layout_outline(&mut path);
        paint(cx, &path, self.fill, Fill::NonZero, self.stroke.as_ref());
    }
}

// ─── Ellipse ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct EllipseShape {
    pub rx: f64,
    pub ry: f64,
    pub fill: Color,
    pub stroke: Option<Outline>,
}

impl EllipseShape {
    pub fn new(rx: f64, ry: f64) -> Self {
        Self {
            rx,
            ry,
            fill: Color::from_rgb8(255, 255, 255),
            stroke: None,
        }
    }

    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = fill;
        self
    }
}

impl Element for EllipseShape {
    fn layout_outline(&self, path: &mut BezPath) {
        let ellipse = Ellipse::new((self.rx, self.ry), (self.rx, self.ry), 0.0);
        path.extend(ellipse.path_elements(TOLERANCE));
    }

    fn render(&self, cx: &mut dyn DrawContext) {
        let mut path = BezPath::new();
        self.layout_outline(&mut path);
        paint(cx, &path, self.fill, Fill::NonZero, self.stroke.as_ref());
    }
}

// ─── Path ────────────────────────────────────────────────────────────────

/// Freeform outline, filled with the given rule.
#[derive(Debug, Clone)]
pub struct PathShape {
    pub path: BezPath,
    pub rule: Fill,
    pub fill: Color,
    pub stroke: Option<Outline>,
}

impl PathShape {
    pub fn new(path: BezPath) -> Self {
        Self {
            path,
            rule: Fill::NonZero,
            fill: Color::from_rgb8(255, 255, 255),
            stroke: None,
        }
    }

    pub fn with_rule(mut self, rule: Fill) -> Self {
        self.rule = rule;
        self
    }
}

impl Element for PathShape {
    fn layout_outline(&self, path: &mut BezPath) {
        path.extend(self.path.elements().iter().copied());
    }

    fn render(&self, cx: &mut dyn DrawContext) {
        paint(cx, &self.path, self.fill, self.rule, self.stroke.as_ref());
    }

    fn fill_rule(&self) -> Fill {
        self.rule
    }
}

fn paint(
    cx: &mut dyn DrawContext,
    path: &BezPath,
    fill: Color,
    rule: Fill,
    stroke: Option<&Outline>,
) {
    cx.fill(path, fill, rule);
    if let Some(outline) = stroke {
        cx.stroke(path, outline.color, &Stroke::new(outline.width));
    }
}
