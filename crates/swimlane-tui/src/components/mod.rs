pub mod column;
pub mod popup;

pub use column::*;
pub use popup::*;
