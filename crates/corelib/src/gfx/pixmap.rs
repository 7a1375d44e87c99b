use super::Color;
use crate::math::{Rect, UVec2, Vec2};
use std::path::Path;

/// RGBA8 image used both as render target and as texture source.
/// Pixels are kept premultiplied by the inner `tiny_skia::Pixmap`.
#[derive(Clone)]
pub struct Pixmap {
    raw: tiny_skia::Pixmap,
}

impl std::fmt::Debug for Pixmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pixmap")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

impl PartialEq for Pixmap {
    fn eq(&self, other: &Self) -> bool {
        self.size() == other.size() && self.as_bytes() == other.as_bytes()
    }
}

impl Eq for Pixmap {}

impl Pixmap {
    /// Creates a transparent pixmap, both dimensions must be greater than zero
    pub fn new(width: u32, height: u32) -> Result<Self, String> {
        if width == 0 || height == 0 {
            return Err(format!(
                "Invalid pixmap size {width}x{height}: dimensions must be greater than zero"
            ));
        }

        let raw = tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| format!("Cannot allocate a pixmap of {width}x{height}"))?;
        Ok(Self { raw })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.raw.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.raw.height()
    }

    #[inline]
    pub fn size(&self) -> UVec2 {
        UVec2::new(self.width(), self.height())
    }

    #[inline]
    pub fn size_f32(&self) -> Vec2 {
        self.size().as_vec2()
    }

    /// Returns the straight alpha color at the given pixel or `None` if it's out of bounds
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let c = self.raw.pixel(x, y)?.demultiply();
        Some(Color::rgba_u8(c.red(), c.green(), c.blue(), c.alpha()))
    }

    /// Sets every pixel to the color passed
    pub fn fill(&mut self, color: Color) {
        self.raw.fill(color.into());
    }

    /// Composes the color over the area, partially covered pixels are anti-aliased
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let (min, max) = (rect.min(), rect.max());
        let Some(rect) = tiny_skia::Rect::from_ltrb(min.x, min.y, max.x, max.y) else {
            return;
        };

        let mut paint = tiny_skia::Paint::default();
        paint.set_color(color.into());
        paint.anti_alias = true;
        self.raw
            .fill_rect(rect, &paint, tiny_skia::Transform::identity(), None);
    }

    /// Copies a region into a new pixmap
    pub fn crop(&self, x: u32, y: u32, width: u32, height: u32) -> Result<Pixmap, String> {
        let inside = x.checked_add(width).is_some_and(|right| right <= self.width())
            && y.checked_add(height).is_some_and(|bottom| bottom <= self.height());

        inside
            .then(|| tiny_skia::IntRect::from_xywh(x as i32, y as i32, width, height))
            .flatten()
            .and_then(|rect| self.raw.clone_rect(rect))
            .map(|raw| Self { raw })
            .ok_or_else(|| {
                format!(
                    "Cannot crop {width}x{height} at {x},{y} from a {}x{} pixmap",
                    self.width(),
                    self.height()
                )
            })
    }

    /// Raw premultiplied RGBA8 bytes, row major
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.raw.data()
    }

    #[inline]
    pub fn raw(&self) -> &tiny_skia::Pixmap {
        &self.raw
    }

    #[inline]
    pub fn raw_mut(&mut self) -> &mut tiny_skia::Pixmap {
        &mut self.raw
    }

    /// Encodes the pixmap as a PNG file
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), String> {
        let path = path.as_ref();

        // png stores straight alpha
        let pixels: Vec<[u8; 4]> = self
            .raw
            .pixels()
            .iter()
            .map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();

        image::save_buffer_with_format(
            path,
            bytemuck::cast_slice(&pixels),
            self.width(),
            self.height(),
            image::ExtendedColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .map_err(|e| format!("Cannot save pixmap to '{}': {e}", path.display()))?;

        log::debug!(
            "Pixmap {}x{} saved to '{}'",
            self.width(),
            self.height(),
            path.display()
        );
        Ok(())
    }
}
