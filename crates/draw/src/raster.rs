use crate::canvas::Canvas;
use crate::path::to_skia_path;
use crate::pattern::{Paint, Pattern2D, TextureWrap};
use corelib::gfx::{Color, Pixmap};
use corelib::math::Vec2;
use lyon::path::Path;
use tiny_skia::{FillRule, FilterQuality, Mask, SpreadMode, Stroke, Transform};

/// Software canvas drawing anti-aliased paths on a `Pixmap`
#[derive(Debug, Clone)]
pub struct PixmapCanvas {
    pixmap: Pixmap,
}

#[derive(Debug, Clone, Copy)]
enum Axis {
    X,
    Y,
}

impl PixmapCanvas {
    pub fn new(width: u32, height: u32) -> Result<Self, String> {
        Ok(Self {
            pixmap: Pixmap::new(width, height)?,
        })
    }

    pub fn clear(&mut self, color: Color) {
        self.pixmap.fill(color);
    }

    #[inline]
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn save_png<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), String> {
        self.pixmap.save_png(path)
    }

    fn paint_region(&mut self, path: &tiny_skia::Path, paint: &Paint) -> Result<(), String> {
        match paint {
            Paint::Solid(color) => {
                let mut paint = tiny_skia::Paint::default();
                paint.set_color((*color).into());
                paint.anti_alias = true;
                self.pixmap.raw_mut().fill_path(
                    path,
                    &paint,
                    FillRule::Winding,
                    Transform::identity(),
                    None,
                );
                Ok(())
            }
            Paint::Pattern(pattern) => self.fill_pattern(path, pattern),
        }
    }

    fn fill_pattern(&mut self, path: &tiny_skia::Path, pattern: &Pattern2D) -> Result<(), String> {
        if !pattern.is_drawable() {
            log::trace!("Skipping pattern with a non invertible matrix");
            return Ok(());
        }

        let (wrap_x, wrap_y) = pattern.wrap_modes();
        if wrap_x == wrap_y {
            let paint = pattern_paint(
                pattern.pixmap().raw(),
                wrap_x.spread_mode(),
                pattern.transform(),
                true,
            );
            self.pixmap.raw_mut().fill_path(
                path,
                &paint,
                FillRule::Winding,
                Transform::identity(),
                None,
            );
            return Ok(());
        }

        let axis = if wrap_y == TextureWrap::Clamp {
            Axis::Y
        } else {
            Axis::X
        };
        self.fill_clamped_bands(path, pattern, axis)
    }

    /// The rasterizer has one spread mode for both axes. The clamped axis is split
    /// in three bands: the texture repeated along the other axis, and its first and
    /// last texel lines repeated over the rest of the canvas. The path is applied as
    /// an anti-aliased mask so band edges don't leave seams.
    fn fill_clamped_bands(
        &mut self,
        path: &tiny_skia::Path,
        pattern: &Pattern2D,
        axis: Axis,
    ) -> Result<(), String> {
        if !pattern.is_axis_aligned() {
            return Err(
                "Patterns mixing clamp and repeat need a matrix without rotation or skew"
                    .to_string(),
            );
        }

        let size = self.pixmap.size();
        let mut mask = Mask::new(size.x, size.y)
            .ok_or_else(|| format!("Cannot create a mask of {}x{}", size.x, size.y))?;
        mask.fill_path(path, FillRule::Winding, true, Transform::identity());

        let texture = pattern.pixmap();
        let (width, height) = (texture.width(), texture.height());
        let m = pattern.local_matrix();
        let (scale, offset, len, extent, first, last) = match axis {
            Axis::X => (
                m.x_axis.x,
                m.z_axis.x,
                width,
                size.x as f32,
                texture.crop(0, 0, 1, height)?,
                texture.crop(width - 1, 0, 1, height)?,
            ),
            Axis::Y => (
                m.y_axis.y,
                m.z_axis.y,
                height,
                size.y as f32,
                texture.crop(0, 0, width, 1)?,
                texture.crop(0, height - 1, width, 1)?,
            ),
        };

        // half a texel inside the texture, so the repeat never wraps its own edges
        let start = offset;
        let end = offset + scale * len as f32;
        let margin = scale.abs() * 0.5;
        let mut lo = start.min(end) + margin;
        let mut hi = start.max(end) - margin;
        if lo > hi {
            let mid = (lo + hi) * 0.5;
            lo = mid;
            hi = mid;
        }

        let (before, after) = if scale > 0.0 {
            (&first, &last)
        } else {
            (&last, &first)
        };

        let transform = pattern.transform();
        let bands = [(0.0, lo, before), (lo, hi, texture), (hi, extent, after)];
        for (from, to, pixmap) in bands {
            let (from, to) = (from.max(0.0), to.min(extent));
            if from >= to {
                continue;
            }

            let rect = match axis {
                Axis::X => tiny_skia::Rect::from_ltrb(from, 0.0, to, size.y as f32),
                Axis::Y => tiny_skia::Rect::from_ltrb(0.0, from, size.x as f32, to),
            };
            let Some(rect) = rect else {
                continue;
            };

            // aliased bands share their edges exactly, the mask does the smoothing
            let paint = pattern_paint(pixmap.raw(), SpreadMode::Repeat, transform, false);
            self.pixmap
                .raw_mut()
                .fill_rect(rect, &paint, Transform::identity(), Some(&mask));
        }

        Ok(())
    }
}

fn pattern_paint(
    pixmap: &tiny_skia::Pixmap,
    spread_mode: SpreadMode,
    transform: Transform,
    anti_alias: bool,
) -> tiny_skia::Paint<'_> {
    tiny_skia::Paint {
        shader: tiny_skia::Pattern::new(
            pixmap.as_ref(),
            spread_mode,
            FilterQuality::Nearest,
            1.0,
            transform,
        ),
        anti_alias,
        ..Default::default()
    }
}

impl Canvas for PixmapCanvas {
    fn size(&self) -> Vec2 {
        self.pixmap.size_f32()
    }

    fn fill_path(&mut self, path: &Path, paint: &Paint) -> Result<(), String> {
        let Some(path) = to_skia_path(path) else {
            log::trace!("Skipping fill of an empty path");
            return Ok(());
        };

        self.paint_region(&path, paint)
    }

    fn stroke_path(&mut self, path: &Path, width: f32, paint: &Paint) -> Result<(), String> {
        if !(width > 0.0 && width.is_finite()) {
            log::trace!("Skipping stroke with width {width}");
            return Ok(());
        }

        let Some(path) = to_skia_path(path) else {
            log::trace!("Skipping stroke of an empty path");
            return Ok(());
        };

        // filled as one region, overlapping joins get covered once
        let stroke = Stroke {
            width,
            ..Default::default()
        };
        let Some(outline) = path.stroke(&stroke, 1.0) else {
            log::trace!("Stroke of width {width} has no outline");
            return Ok(());
        };

        self.paint_region(&outline, paint)
    }
}
