//! Scene-graph data model.
//!
//! Nodes live in a `StableDiGraph` arena and are addressed by `NodeIndex`.
//! Edges go from parent → child; the per-parent child order (which is the
//! paint order) is kept in a separate list so it survives edge churn.
//! Nodes are created detached and only become part of the canvas once they
//! are attached below the root.

use crate::animation::Timing;
use crate::element::Element;
use crate::error::SceneError;
use crate::event::{Effect, EventCtx};
use crate::shapes::Group;
use kurbo::Point;
use petgraph::Direction;
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableDiGraph;
use std::cmp::Ordering;
use std::collections::HashMap;

// ─── Node state ──────────────────────────────────────────────────────────

/// Geometric properties of a node, all relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeProps {
    pub x: f64,
    pub y: f64,
    /// Radians, clockwise in a y-down device space.
    pub rotation: f64,
    /// Uniform scale factor.
    pub scale: f64,
    /// Ordering key used by `SceneGraph::sort_children_by_depth`.
    pub depth: f64,
}

impl Default for NodeProps {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            scale: 1.0,
            depth: 0.0,
        }
    }
}

impl NodeProps {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn set_position(&mut self, p: Point) {
        self.x = p.x;
        self.y = p.y;
    }
}

/// Interaction flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeFlags {
    /// Never matched by hit tests; the search continues beneath.
    pub input_transparent: bool,
    /// Stored for hosts and elements; routing does not interpret it.
    pub sensitive: bool,
    /// Can be repositioned by dragging with the primary button.
    pub draggable: bool,
    /// Takes keyboard focus when clicked.
    pub can_focus: bool,
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self {
            input_transparent: false,
            sensitive: false,
            draggable: false,
            can_focus: true,
        }
    }
}

/// A single node in the scene graph.
#[derive(Debug)]
pub struct SceneNode {
    pub props: NodeProps,
    pub flags: NodeFlags,
    pub element: Box<dyn Element>,
    /// Set only by the input router.
    has_focus: bool,
    /// Cached "belongs to the canvas" state, refreshed on attach/detach.
    attached: bool,
}

impl SceneNode {
    pub fn new(element: Box<dyn Element>) -> Self {
        Self {
            props: NodeProps::default(),
            flags: NodeFlags::default(),
            element,
            has_focus: false,
            attached: false,
        }
    }

    pub fn has_focus(&self) -> bool {
        self.has_focus
    }

    /// Whether the node is reachable from the canvas root.
    pub fn is_attached(&self) -> bool {
        self.attached
    }
}

// ─── Scene Graph ─────────────────────────────────────────────────────────

/// The node arena plus the tree rooted at `root`.
#[derive(Debug)]
pub struct SceneGraph {
    /// The underlying directed graph.
    pub graph: StableDiGraph<SceneNode, ()>,

    /// The invisible root container. Always attached.
    pub root: NodeIndex,

    /// Child order per parent. Children are painted in this order and
    /// hit-tested in reverse.
    child_order: HashMap<NodeIndex, Vec<NodeIndex>>,

    /// Handed to every handler context.
    timing: Timing,
}

impl SceneGraph {
    /// Create a new scene graph holding only the root group.
    #[must_use]
    pub fn new() -> Self {
        let mut graph = StableDiGraph::new();
        let mut root_node = SceneNode::new(Box::new(Group));
        root_node.attached = true;
        let root = graph.add_node(root_node);

        Self {
            graph,
            root,
            child_order: HashMap::new(),
            timing: Timing::default(),
        }
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    /// Timing used by animations that handlers start without their own.
    pub fn set_timing(&mut self, timing: Timing) {
        self.timing = timing;
    }

    /// Insert a detached node with default properties.
    pub fn create(&mut self, element: impl Element + 'static) -> NodeIndex {
        self.create_boxed(Box::new(element))
    }

    pub fn create_boxed(&mut self, element: Box<dyn Element>) -> NodeIndex {
        self.graph.add_node(SceneNode::new(element))
    }

    pub fn contains(&self, idx: NodeIndex) -> bool {
        self.graph.contains_node(idx)
    }

    pub fn node(&self, idx: NodeIndex) -> Option<&SceneNode> {
        self.graph.node_weight(idx)
    }

    pub fn node_mut(&mut self, idx: NodeIndex) -> Option<&mut SceneNode> {
        self.graph.node_weight_mut(idx)
    }

    pub fn props(&self, idx: NodeIndex) -> Option<NodeProps> {
        self.node(idx).map(|n| n.props)
    }

    pub fn props_mut(&mut self, idx: NodeIndex) -> Option<&mut NodeProps> {
        self.node_mut(idx).map(|n| &mut n.props)
    }

    pub fn flags(&self, idx: NodeIndex) -> Option<NodeFlags> {
        self.node(idx).map(|n| n.flags)
    }

    pub fn flags_mut(&mut self, idx: NodeIndex) -> Option<&mut NodeFlags> {
        self.node_mut(idx).map(|n| &mut n.flags)
    }

    pub fn is_attached(&self, idx: NodeIndex) -> bool {
        self.node(idx).is_some_and(SceneNode::is_attached)
    }

    /// Get the parent index of a node.
    pub fn parent(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.graph
            .neighbors_directed(idx, Direction::Incoming)
            .next()
    }

    /// Children of a node in paint order.
    pub fn children(&self, idx: NodeIndex) -> &[NodeIndex] {
        self.child_order
            .get(&idx)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// `idx` and everything below it, parents before children.
    pub fn descendants(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut out = Vec::new();
        if !self.contains(idx) {
            return out;
        }
        let mut stack = vec![idx];
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).iter().rev());
        }
        out
    }

    /// Append `child` to `parent`'s children.
    pub fn add_child(&mut self, parent: NodeIndex, child: NodeIndex) -> Result<(), SceneError> {
        let parent_node = self.node(parent).ok_or(SceneError::UnknownNode(parent))?;
        if !parent_node.element.is_container() {
            return Err(SceneError::NotAContainer(parent));
        }
        if !self.contains(child) {
            return Err(SceneError::UnknownNode(child));
        }
        if child == self.root {
            return Err(SceneError::RootImmutable);
        }
        if self.parent(child).is_some() {
            return Err(SceneError::AlreadyAttached(child));
        }
        if child == parent || self.is_ancestor_of(child, parent) {
            return Err(SceneError::WouldCycle { parent, child });
        }

        self.graph.add_edge(parent, child, ());
        self.child_order.entry(parent).or_default().push(child);
        let attached = self.is_attached(parent);
        self.set_attached(child, attached);
        log::debug!("attached {child:?} under {parent:?} (on canvas: {attached})");
        Ok(())
    }

    /// Unlink `child` from its parent. The subtree stays in the arena.
    pub fn detach(&mut self, child: NodeIndex) -> Result<(), SceneError> {
        if !self.contains(child) {
            return Err(SceneError::UnknownNode(child));
        }
        if child == self.root {
            return Err(SceneError::RootImmutable);
        }
        let parent = self.parent(child).ok_or(SceneError::NotAChild(child))?;

        if let Some(edge) = self.graph.find_edge(parent, child) {
            self.graph.remove_edge(edge);
        }
        if let Some(order) = self.child_order.get_mut(&parent) {
            order.retain(|&c| c != child);
        }
        self.set_attached(child, false);
        log::debug!("detached {child:?} from {parent:?}");
        Ok(())
    }

    /// Detach `idx` (if attached) and drop its whole subtree from the arena.
    pub fn destroy(&mut self, idx: NodeIndex) -> Result<Vec<NodeIndex>, SceneError> {
        if !self.contains(idx) {
            return Err(SceneError::UnknownNode(idx));
        }
        if idx == self.root {
            return Err(SceneError::RootImmutable);
        }
        if self.parent(idx).is_some() {
            self.detach(idx)?;
        }
        let removed = self.descendants(idx);
        for &n in &removed {
            self.child_order.remove(&n);
            self.graph.remove_node(n);
        }
        log::debug!("destroyed {} node(s) rooted at {idx:?}", removed.len());
        Ok(removed)
    }

    /// Check if `ancestor` is a parent/grandparent/etc. of `descendant`.
    pub fn is_ancestor_of(&self, ancestor: NodeIndex, descendant: NodeIndex) -> bool {
        let mut current = descendant;
        while let Some(parent) = self.parent(current) {
            if parent == ancestor {
                return true;
            }
            current = parent;
        }
        false
    }

    fn set_attached(&mut self, idx: NodeIndex, attached: bool) {
        for n in self.descendants(idx) {
            if let Some(node) = self.graph.node_weight_mut(n) {
                node.attached = attached;
            }
        }
    }

    // ─── Ordering ─────────────────────────────────────────────────────────

    /// Compare two nodes by their `depth` key.
    pub fn compare_depth(&self, a: NodeIndex, b: NodeIndex) -> Option<Ordering> {
        let a = self.props(a)?;
        let b = self.props(b)?;
        Some(a.depth.total_cmp(&b.depth))
    }

    /// Stable-sort `parent`'s children by ascending depth, so deeper values
    /// paint later (on top). Returns true if the order changed.
    pub fn sort_children_by_depth(&mut self, parent: NodeIndex) -> bool {
        let Some(order) = self.child_order.get(&parent) else {
            return false;
        };
        let mut sorted = order.clone();
        sorted.sort_by(|&a, &b| {
            let da = self.graph.node_weight(a).map_or(0.0, |n| n.props.depth);
            let db = self.graph.node_weight(b).map_or(0.0, |n| n.props.depth);
            da.total_cmp(&db)
        });
        if sorted == *order {
            return false;
        }
        self.child_order.insert(parent, sorted);
        true
    }

    /// Move a child one step backward in z-order (swap with previous sibling).
    /// Returns true if the z-order changed.
    pub fn send_backward(&mut self, child: NodeIndex) -> bool {
        self.reorder(child, |pos, _| pos.checked_sub(1))
    }

    /// Move a child one step forward in z-order (swap with next sibling).
    /// Returns true if the z-order changed.
    pub fn bring_forward(&mut self, child: NodeIndex) -> bool {
        self.reorder(child, |pos, len| (pos + 1 < len).then_some(pos + 1))
    }

    /// Move a child to the back of z-order (first child).
    pub fn send_to_back(&mut self, child: NodeIndex) -> bool {
        self.reorder(child, |pos, _| (pos > 0).then_some(0))
    }

    /// Move a child to the front of z-order (last child).
    pub fn bring_to_front(&mut self, child: NodeIndex) -> bool {
        self.reorder(child, |pos, len| (pos + 1 < len).then_some(len - 1))
    }

    /// Move `child` within its sibling list to the slot picked by `target`
    /// (given current position and sibling count).
    fn reorder(
        &mut self,
        child: NodeIndex,
        target: impl Fn(usize, usize) -> Option<usize>,
    ) -> bool {
        let Some(parent) = self.parent(child) else {
            return false;
        };
        let Some(order) = self.child_order.get_mut(&parent) else {
            return false;
        };
        let Some(pos) = order.iter().position(|&c| c == child) else {
            return false;
        };
        let Some(to) = target(pos, order.len()) else {
            return false;
        };
        let moved = order.remove(pos);
        order.insert(to, moved);
        true
    }

    // ─── Dispatch ─────────────────────────────────────────────────────────

    /// Run `f` against a node's element with a fresh handler context.
    /// Effects the handler queues are appended to `effects`.
    /// Does nothing if the node no longer exists.
    pub fn dispatch<F>(&mut self, idx: NodeIndex, effects: &mut Vec<Effect>, f: F)
    where
        F: FnOnce(&mut dyn Element, &mut EventCtx<'_>),
    {
        let timing = self.timing;
        let Some(node) = self.graph.node_weight_mut(idx) else {
            return;
        };
        let mut cx = EventCtx::new(idx, node.props, timing, effects);
        f(node.element.as_mut(), &mut cx);
    }

    /// Set a node's focus flag and notify its element. Used by the input
    /// router, which guarantees one focused node at a time.
    pub fn set_focus(&mut self, idx: NodeIndex, focused: bool, effects: &mut Vec<Effect>) {
        let Some(node) = self.graph.node_weight_mut(idx) else {
            return;
        };
        node.has_focus = focused;
        self.dispatch(idx, effects, |el, cx| {
            if focused {
                el.on_focus_in(cx);
            } else {
                el.on_focus_out(cx);
            }
        });
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}
