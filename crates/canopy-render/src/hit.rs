//! Hit testing: device point → node lookup.
//!
//! Reverse-walks the tree (front-to-back) from the root's children. A
//! node's children are tested before the node itself, so anything painted
//! above its parent wins. Each candidate maps the point into its own local
//! space and asks its outline whether the point is filled.

use canopy_core::element::Element;
use canopy_core::transform::{invert, local_transform};
use canopy_core::{NodeIndex, SceneGraph};
use kurbo::{Affine, BezPath, Point, Shape};
use peniko::Fill;

/// Find the topmost node at device position `point`.
/// Returns `None` if nothing is hit (background).
pub fn hit_test(scene: &SceneGraph, point: Point) -> Option<NodeIndex> {
    let mut first = None;
    walk(scene, point, &mut |idx| {
        first = Some(idx);
        false
    });
    first
}

/// Every node containing `point`, topmost first.
pub fn hit_test_all(scene: &SceneGraph, point: Point) -> Vec<NodeIndex> {
    let mut hits = Vec::new();
    walk(scene, point, &mut |idx| {
        hits.push(idx);
        true
    });
    hits
}

/// Whether `local` (element space) falls inside the element's filled outline.
pub fn outline_contains(element: &dyn Element, local: Point) -> bool {
    let mut path = BezPath::new();
    element.layout_outline(&mut path);
    if path.elements().is_empty() {
        return false;
    }
    let winding = path.winding(local);
    match element.fill_rule() {
        Fill::NonZero => winding != 0,
        Fill::EvenOdd => winding % 2 != 0,
    }
}

/// Visit hits in topmost-first order until `visit` returns false.
fn walk(scene: &SceneGraph, point: Point, visit: &mut dyn FnMut(NodeIndex) -> bool) {
    let Some(root) = scene.node(scene.root) else {
        return;
    };
    let root_transform = local_transform(&root.props);
    for &child in scene.children(scene.root).iter().rev() {
        if !walk_node(scene, child, root_transform, point, visit) {
            return;
        }
    }
}

/// Returns false once the visitor asked to stop.
fn walk_node(
    scene: &SceneGraph,
    idx: NodeIndex,
    parent_transform: Affine,
    point: Point,
    visit: &mut dyn FnMut(NodeIndex) -> bool,
) -> bool {
    let Some(node) = scene.node(idx) else {
        return true;
    };
    let transform = parent_transform * local_transform(&node.props);

    // Check children in reverse (topmost first)
    for &child in scene.children(idx).iter().rev() {
        if !walk_node(scene, child, transform, point, visit) {
            return false;
        }
    }

    if node.flags.input_transparent {
        return true;
    }

    // Collapsed transforms can't be hit.
    let Some(inverse) = invert(transform) else {
        log::trace!("hit test skips {idx:?}: transform not invertible");
        return true;
    };

    if outline_contains(node.element.as_ref(), inverse * point) {
        return visit(idx);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use canopy_core::NodeProps;
    use canopy_core::shapes::{Group, PathShape, RectShape};
    use pretty_assertions::assert_eq;

    fn add_rect(
        sg: &mut SceneGraph,
        parent: NodeIndex,
        props: NodeProps,
        w: f64,
        h: f64,
    ) -> NodeIndex {
        let n = sg.create(RectShape::new(w, h));
        *sg.props_mut(n).unwrap() = props;
        sg.add_child(parent, n).unwrap();
        n
    }

    #[test]
    fn hit_test_basic() {
        let mut sg = SceneGraph::new();
        let root = sg.root;
        let a = add_rect(&mut sg, root, NodeProps::at(10.0, 10.0), 100.0, 100.0);
        let b = add_rect(&mut sg, root, NodeProps::at(200.0, 200.0), 50.0, 50.0);

        assert_eq!(hit_test(&sg, Point::new(15.0, 15.0)), Some(a));
        assert_eq!(hit_test(&sg, Point::new(225.0, 225.0)), Some(b));
        assert_eq!(hit_test(&sg, Point::new(799.0, 599.0)), None);
    }

    #[test]
    fn later_sibling_wins_regardless_of_depth() {
        let mut sg = SceneGraph::new();
        let root = sg.root;
        let low = NodeProps { depth: 0.0, ..NodeProps::default() };
        let high = NodeProps { depth: 5.0, ..NodeProps::default() };
        let a = add_rect(&mut sg, root, low, 20.0, 20.0);
        let b = add_rect(&mut sg, root, high, 20.0, 20.0);
        assert_eq!(hit_test(&sg, Point::new(10.0, 10.0)), Some(b));

        sg.props_mut(a).unwrap().depth = 99.0;
        assert_eq!(hit_test(&sg, Point::new(10.0, 10.0)), Some(b));

        sg.flags_mut(b).unwrap().input_transparent = true;
        assert_eq!(hit_test(&sg, Point::new(10.0, 10.0)), Some(a));
    }

    /// A hittable container, like a panel holding buttons.
    #[derive(Debug)]
    struct Panel;

    impl Element for Panel {
        fn layout_outline(&self, path: &mut BezPath) {
            path.extend(kurbo::Rect::new(0.0, 0.0, 100.0, 100.0).path_elements(0.1));
        }
        fn render(&self, _cx: &mut dyn canopy_core::DrawContext) {}
        fn is_container(&self) -> bool {
            true
        }
    }

    #[test]
    fn descendant_beats_its_ancestor() {
        let mut sg = SceneGraph::new();
        let panel = sg.create(Panel);
        sg.add_child(sg.root, panel).unwrap();
        let button = add_rect(&mut sg, panel, NodeProps::at(40.0, 40.0), 20.0, 20.0);

        assert_eq!(hit_test(&sg, Point::new(50.0, 50.0)), Some(button));
        assert_eq!(hit_test(&sg, Point::new(5.0, 5.0)), Some(panel));
        assert_eq!(hit_test_all(&sg, Point::new(50.0, 50.0)), vec![button, panel]);
    }

    #[test]
    fn transparent_group_still_exposes_children() {
        let mut sg = SceneGraph::new();
        let group = sg.create(Group);
        sg.add_child(sg.root, group).unwrap();
        sg.flags_mut(group).unwrap().input_transparent = true;
        let leaf = add_rect(&mut sg, group, NodeProps::default(), 10.0, 10.0);
        assert_eq!(hit_test(&sg, Point::new(5.0, 5.0)), Some(leaf));
    }

    #[test]
    fn rotated_and_scaled_nodes_hit_in_local_space() {
        let mut sg = SceneGraph::new();
        let root = sg.root;
        // 10×10 rect scaled ×4 and rotated 90°: covers x ∈ [60, 100], y ∈ [0, 40].
        let n = add_rect(
            &mut sg,
            root,
            NodeProps {
                x: 100.0,
                y: 0.0,
                rotation: std::f64::consts::FRAC_PI_2,
                scale: 4.0,
                depth: 0.0,
            },
            10.0,
            10.0,
        );
        assert_eq!(hit_test(&sg, Point::new(80.0, 20.0)), Some(n));
        assert_eq!(hit_test(&sg, Point::new(105.0, 20.0)), None);
        assert_eq!(hit_test(&sg, Point::new(80.0, -5.0)), None);
    }

    #[test]
    fn collapsed_nodes_are_never_hit() {
        let mut sg = SceneGraph::new();
        let root = sg.root;
        let under = add_rect(&mut sg, root, NodeProps::default(), 50.0, 50.0);
        let collapsed = add_rect(&mut sg, root, NodeProps::default(), 50.0, 50.0);
        sg.props_mut(collapsed).unwrap().scale = 0.0;
        assert_eq!(hit_test(&sg, Point::new(10.0, 10.0)), Some(under));
        assert_eq!(hit_test_all(&sg, Point::new(25.0, 25.0)), vec![under]);
    }

    #[test]
    fn detached_nodes_are_ignored() {
        let mut sg = SceneGraph::new();
        let loose = sg.create(RectShape::new(10.0, 10.0));
        assert_eq!(hit_test(&sg, Point::new(5.0, 5.0)), None);
        sg.add_child(sg.root, loose).unwrap();
        assert_eq!(hit_test(&sg, Point::new(5.0, 5.0)), Some(loose));
        sg.detach(loose).unwrap();
        assert_eq!(hit_test(&sg, Point::new(5.0, 5.0)), None);
    }

    #[test]
    fn even_odd_outline_has_a_hole() {
        let mut ring = BezPath::new();
        ring.extend(kurbo::Rect::new(0.0, 0.0, 30.0, 30.0).path_elements(0.1));
        ring.extend(kurbo::Rect::new(10.0, 10.0, 20.0, 20.0).path_elements(0.1));
        let shape = PathShape::new(ring).with_rule(Fill::EvenOdd);

        assert!(outline_contains(&shape, Point::new(5.0, 5.0)));
        assert!(!outline_contains(&shape, Point::new(15.0, 15.0)));
    }
}
