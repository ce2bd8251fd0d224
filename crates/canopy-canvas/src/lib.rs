pub mod canvas;
pub mod input;
pub mod router;

pub use canvas::Canvas;
pub use input::InputEvent;
pub use router::InputRouter;
