pub mod media_item;
pub mod pane;
pub mod selection;

pub use media_item::*;
pub use pane::*;
pub use selection::*;
