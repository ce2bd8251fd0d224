//! Scene graph → draw calls.
//!
//! Fills the background, then walks the tree from the root in child order.
//! Each node is rendered inside its own save/restore pair with its
//! effective transform applied; children are painted after their parent,
//! so later siblings and descendants end up on top.

use canopy_core::transform::local_transform;
use canopy_core::{DrawContext, NodeIndex, SceneGraph};
use kurbo::Affine;
use peniko::Color;

/// Paint the entire scene. Call once per frame.
pub fn paint_scene(scene: &SceneGraph, cx: &mut dyn DrawContext, background: Color) {
    cx.fill_background(background);
    paint_node(scene, scene.root, Affine::IDENTITY, cx);
}

fn paint_node(
    scene: &SceneGraph,
    idx: NodeIndex,
    parent_transform: Affine,
    cx: &mut dyn DrawContext,
) {
    let Some(node) = scene.node(idx) else {
        return;
    };
    let transform = parent_transform * local_transform(&node.props);

    log::trace!("PAINT {idx:?} at ({}, {})", node.props.x, node.props.y);
    cx.save();
    cx.transform(transform);
    node.element.render(cx);
    cx.restore();

    for &child in scene.children(idx) {
        paint_node(scene, child, transform, cx);
    }
}
