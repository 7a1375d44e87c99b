use corelib::math::{Mat3, Vec2};

/// Maps the cached wave texture to the current ratios.
///
/// The texture is baked with the default amplitude, water level and wave length,
/// so any other ratio is expressed as a scale around the default water level
/// followed by a translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShaderTransform {
    pub scale: Vec2,
    pub pivot: Vec2,
    pub translation: Vec2,
}

impl ShaderTransform {
    /// Texture space to canvas space
    pub fn to_mat3(&self) -> Mat3 {
        Mat3::from_translation(self.translation)
            * Mat3::from_translation(self.pivot)
            * Mat3::from_diagonal(self.scale.extend(1.0))
            * Mat3::from_translation(-self.pivot)
    }
}
