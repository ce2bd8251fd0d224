//! Recording draw context.
//!
//! `DisplayList` implements `DrawContext` by storing every call, with the
//! transform that was current at the time. Headless hosts can replay it
//! onto a real backend; tests use it to check what was painted and where.

use canopy_core::DrawContext;
use kurbo::{Affine, BezPath, Stroke};
use peniko::{Color, Fill};

/// One recorded draw operation.
#[derive(Debug, Clone)]
pub enum DrawCmd {
    Background(Color),
    Fill {
        transform: Affine,
        path: BezPath,
        color: Color,
        rule: Fill,
    },
    Stroke {
        transform: Affine,
        path: BezPath,
        color: Color,
        width: f64,
    },
}

#[derive(Debug, Clone)]
pub struct DisplayList {
    commands: Vec<DrawCmd>,
    current: Affine,
    stack: Vec<Affine>,
}

impl Default for DisplayList {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayList {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            current: Affine::IDENTITY,
            stack: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCmd] {
        &self.commands
    }

    /// Transform in effect for the next draw call.
    pub fn current_transform(&self) -> Affine {
        self.current
    }

    /// Number of unmatched `save` calls.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Transforms of every fill, in paint order.
    pub fn fill_transforms(&self) -> Vec<Affine> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCmd::Fill { transform, .. } => Some(*transform),
                _ => None,
            })
            .collect()
    }

    /// Forget everything recorded so far (for reuse across frames).
    pub fn clear(&mut self) {
        self.commands.clear();
        self.current = Affine::IDENTITY;
        self.stack.clear();
    }
}

impl DrawContext for DisplayList {
    fn save(&mut self) {
        self.stack.push(self.current);
    }

    fn restore(&mut self) {
        // Unbalanced restores are ignored.
        if let Some(previous) = self.stack.pop() {
            self.current = previous;
        }
    }

    fn transform(&mut self, affine: Affine) {
        self.current *= affine;
    }

    fn fill_background(&mut self, color: Color) {
        self.commands.push(DrawCmd::Background(color));
    }

    fn fill(&mut self, path: &BezPath, color: Color, rule: Fill) {
        self.commands.push(DrawCmd::Fill {
            transform: self.current,
            path: path.clone(),
            color,
            rule,
        });
    }

    fn stroke(&mut self, path: &BezPath, color: Color, style: &Stroke) {
        self.commands.push(DrawCmd::Stroke {
            transform: self.current,
            path: path.clone(),
            color,
            width: style.width,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn save_restore_brackets_transforms() {
        let mut list = DisplayList::new();
        list.save();
        list.transform(Affine::translate((10.0, 0.0)));
        list.save();
        list.transform(Affine::scale(2.0));
        assert_eq!(list.current_transform(), Affine::translate((10.0, 0.0)) * Affine::scale(2.0));
        list.restore();
        assert_eq!(list.current_transform(), Affine::translate((10.0, 0.0)));
        list.restore();
        list.restore();
        assert_eq!(list.current_transform(), Affine::IDENTITY);
        assert_eq!(list.depth(), 0);
    }

    #[test]
    fn draw_calls_record_the_current_transform() {
        let mut list = DisplayList::new();
        list.transform(Affine::translate((3.0, 4.0)));
        list.fill(&BezPath::new(), Color::from_rgb8(1, 2, 3), Fill::NonZero);
        list.stroke(&BezPath::new(), Color::from_rgb8(1, 2, 3), &Stroke::new(2.5));

        assert_eq!(list.fill_transforms(), vec![Affine::translate((3.0, 4.0))]);
        match &list.commands()[1] {
            DrawCmd::Stroke { transform, width, .. } => {
                assert_eq!(*transform, Affine::translate((3.0, 4.0)));
                assert_eq!(*width, 2.5);
            }
            other => panic!("expected Stroke, got {other:?}"),
        }
    }
}
