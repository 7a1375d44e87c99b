mod color;
mod pixmap;

pub use color::*;
pub use pixmap::*;
