pub mod animation;
pub mod config;
pub mod draw;
pub mod easing;
pub mod element;
pub mod error;
pub mod event;
pub mod id;
pub mod model;
pub mod shapes;
pub mod transform;

pub use animation::{AnimTarget, Animation, AnimationEngine, Timing, Track, Tween};
pub use config::CanvasConfig;
pub use draw::DrawContext;
pub use easing::Easing;
pub use element::Element;
pub use error::{ConfigError, SceneError};
pub use event::{Effect, EventCtx, KeyEvent, ModifierState, MouseButton};
pub use id::Name;
pub use model::*;
pub use transform::{effective_transform, inverse_effective_transform, to_local, to_parent_local};

// Re-export petgraph types so downstream crates don't need a direct dependency
pub use petgraph::graph::NodeIndex;
