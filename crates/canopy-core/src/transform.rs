//! Node transforms: local → parent → … → device.
//!
//! A node's local transform translates by `(x, y)`, then rotates, then
//! scales uniformly. Its effective transform is its parent's effective
//! transform composed with the local one, so `effective * p` maps a
//! node-local point to device space. Nothing is cached; every call walks
//! the current ancestor chain.

use crate::model::{NodeProps, SceneGraph};
use kurbo::{Affine, Point};
use petgraph::graph::NodeIndex;

/// Determinants below this are treated as collapsed.
const DEGENERATE_EPSILON: f64 = 1e-12;

/// The node's own transform, relative to its parent.
pub fn local_transform(props: &NodeProps) -> Affine {
    Affine::translate((props.x, props.y))
        * Affine::rotate(props.rotation)
        * Affine::scale(props.scale)
}

/// Node-local → device transform. `None` if the node does not exist.
pub fn effective_transform(scene: &SceneGraph, idx: NodeIndex) -> Option<Affine> {
    let mut affine = local_transform(&scene.node(idx)?.props);
    let mut current = idx;
    while let Some(parent) = scene.parent(current) {
        let node = scene.node(parent)?;
        affine = local_transform(&node.props) * affine;
        current = parent;
    }
    Some(affine)
}

/// Device → node-local transform. `None` if the node does not exist or
/// its transform has collapsed (zero scale somewhere up the chain).
pub fn inverse_effective_transform(scene: &SceneGraph, idx: NodeIndex) -> Option<Affine> {
    invert(effective_transform(scene, idx)?)
}

/// Invert `affine`, refusing degenerate or non-finite matrices.
pub fn invert(affine: Affine) -> Option<Affine> {
    let det = affine.determinant();
    if !det.is_finite() || det.abs() < DEGENERATE_EPSILON {
        return None;
    }
    let inverse = affine.inverse();
    inverse.as_coeffs().iter().all(|c| c.is_finite()).then_some(inverse)
}

/// Map a device point into the node's local space.
pub fn to_local(scene: &SceneGraph, idx: NodeIndex, point: Point) -> Option<Point> {
    Some(inverse_effective_transform(scene, idx)? * point)
}

/// Map a device point into the space the node's `(x, y)` is expressed in,
/// i.e. its parent's local space (device space for a parentless node).
pub fn to_parent_local(scene: &SceneGraph, idx: NodeIndex, point: Point) -> Option<Point> {
    if !scene.contains(idx) {
        return None;
    }
    match scene.parent(idx) {
        Some(parent) => to_local(scene, parent, point),
        None => Some(point),
    }
}
