use crate::pattern::Paint;
use corelib::math::Vec2;
use lyon::path::Path;

/// Drawing surface able to fill and stroke vector paths
pub trait Canvas {
    /// Size of the drawable area in pixels
    fn size(&self) -> Vec2;

    /// Fills the inside of the path using the non-zero rule
    fn fill_path(&mut self, path: &Path, paint: &Paint) -> Result<(), String>;

    /// Strokes the outline of the path centered on it
    fn stroke_path(&mut self, path: &Path, width: f32, paint: &Paint) -> Result<(), String>;
}
