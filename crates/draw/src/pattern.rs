use corelib::gfx::{Color, Pixmap};
use corelib::math::Mat3;

/// How texture coordinates outside the pixmap are resolved
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum TextureWrap {
    /// The edge texel is stretched
    #[default]
    Clamp,
    Repeat,
}

impl TextureWrap {
    pub(crate) fn spread_mode(self) -> tiny_skia::SpreadMode {
        match self {
            TextureWrap::Clamp => tiny_skia::SpreadMode::Pad,
            TextureWrap::Repeat => tiny_skia::SpreadMode::Repeat,
        }
    }
}

/// Texture used as paint source, sampled without filtering. The local matrix
/// maps texture space to canvas space.
#[derive(Clone, Copy, Debug)]
pub struct Pattern2D<'a> {
    pixmap: &'a Pixmap,
    matrix: Mat3,
    wrap_x: TextureWrap,
    wrap_y: TextureWrap,
}

impl<'a> Pattern2D<'a> {
    pub fn new(pixmap: &'a Pixmap) -> Self {
        Self {
            pixmap,
            matrix: Mat3::IDENTITY,
            wrap_x: TextureWrap::Repeat,
            wrap_y: TextureWrap::Repeat,
        }
    }

    pub fn wrap(&mut self, x: TextureWrap, y: TextureWrap) -> &mut Self {
        self.wrap_x = x;
        self.wrap_y = y;
        self
    }

    pub fn matrix(&mut self, matrix: Mat3) -> &mut Self {
        self.matrix = matrix;
        self
    }

    #[inline]
    pub fn local_matrix(&self) -> Mat3 {
        self.matrix
    }

    #[inline]
    pub fn pixmap(&self) -> &'a Pixmap {
        self.pixmap
    }

    #[inline]
    pub fn wrap_modes(&self) -> (TextureWrap, TextureWrap) {
        (self.wrap_x, self.wrap_y)
    }

    /// Whether the local matrix can be inverted, a degenerated matrix paints nothing
    pub fn is_drawable(&self) -> bool {
        let det = self.matrix.determinant();
        det.is_finite() && det.abs() > f32::EPSILON
    }

    /// Local matrix without rotation or skew
    pub(crate) fn is_axis_aligned(&self) -> bool {
        self.matrix.x_axis.y == 0.0 && self.matrix.y_axis.x == 0.0
    }

    pub(crate) fn transform(&self) -> tiny_skia::Transform {
        let m = self.matrix;
        tiny_skia::Transform::from_row(
            m.x_axis.x, m.x_axis.y, m.y_axis.x, m.y_axis.y, m.z_axis.x, m.z_axis.y,
        )
    }
}

#[derive(Clone, Copy, Debug)]
pub enum Paint<'a> {
    Solid(Color),
    Pattern(Pattern2D<'a>),
}

impl Paint<'_> {
    #[inline]
    pub fn is_pattern(&self) -> bool {
        matches!(self, Paint::Pattern(_))
    }
}

impl From<Color> for Paint<'_> {
    fn from(color: Color) -> Self {
        Paint::Solid(color)
    }
}

impl<'a> From<Pattern2D<'a>> for Paint<'a> {
    fn from(pattern: Pattern2D<'a>) -> Self {
        Paint::Pattern(pattern)
    }
}
