use petgraph::graph::NodeIndex;
use thiserror::Error;

/// Structural errors from scene-tree mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SceneError {
    #[error("node {0:?} is not in the scene")]
    UnknownNode(NodeIndex),

    #[error("node {0:?} cannot hold children")]
    NotAContainer(NodeIndex),

    #[error("node {0:?} already has a parent")]
    AlreadyAttached(NodeIndex),

    #[error("the root node cannot be moved or removed")]
    RootImmutable,

    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    WouldCycle { parent: NodeIndex, child: NodeIndex },

    #[error("node {0:?} has no parent")]
    NotAChild(NodeIndex),
}

/// Errors from loading a [`CanvasConfig`](crate::config::CanvasConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid canvas config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid canvas config: {field} must be {expected}")]
    OutOfRange {
        field: &'static str,
        expected: &'static str,
    },
}
