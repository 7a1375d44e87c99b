mod canvas;
mod path;
mod pattern;
mod raster;

pub use canvas::*;
pub use path::*;
pub use pattern::*;
pub use raster::*;

pub use lyon::path::{Path, PathEvent};
