pub mod display_list;
pub mod hit;
pub mod paint;

pub use display_list::{DisplayList, DrawCmd};
pub use hit::{hit_test, hit_test_all, outline_contains};
pub use paint::paint_scene;
