use corelib::gfx::Color;
use corelib::math::{Rect, UVec2, Vec2, vec2};
use draw::{Canvas, Paint, Path2D};
use strum_macros::{Display, EnumIter};

/// Filled portion of a container, `percent` is always inside [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sector {
    color: Color,
    percent: f32,
}

impl Default for Sector {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            percent: 0.0,
        }
    }
}

impl Sector {
    pub fn new(color: Color, percent: f32) -> Result<Self, String> {
        validate_percent(percent)?;
        Ok(Self { color, percent })
    }

    /// Builds a sector from text values like `#AARRGGBB` and `0.35`
    pub fn parse(color: &str, percent: &str) -> Result<Self, String> {
        let color = color.parse::<Color>()?;
        let percent = percent
            .trim()
            .parse::<f32>()
            .map_err(|e| format!("Invalid percent '{percent}': {e}"))?;
        Self::new(color, percent)
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    #[inline]
    pub fn percent(&self) -> f32 {
        self.percent
    }

    /// Out of range values are rejected and the previous percent is kept
    pub fn set_percent(&mut self, percent: f32) -> Result<(), String> {
        validate_percent(percent)?;
        self.percent = percent;
        Ok(())
    }
}

fn validate_percent(percent: f32) -> Result<(), String> {
    if (0.0..=1.0).contains(&percent) {
        Ok(())
    } else {
        Err(format!("Invalid percent {percent}: it must be in the [0, 1] range"))
    }
}

/// Where the content of an icon starts and ends, in pixels of the original image
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IconMetrics {
    /// When set, offsets are scaled by `view height / original_height`
    pub original_height: Option<f32>,
    pub top_offset: f32,
    pub bottom_offset: f32,
}

impl IconMetrics {
    /// Top and bottom offsets for a view of the given height
    pub fn offsets(&self, height: f32) -> (f32, f32) {
        let scale = match self.original_height {
            Some(original) if original > 0.0 => height / original,
            _ => 1.0,
        };

        (self.top_offset * scale, self.bottom_offset * scale)
    }
}

/// Container icons with known content offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
pub enum ContainerIcon {
    Glass,
    Drop,
    Bottle,
}

impl ContainerIcon {
    pub const fn metrics(self) -> IconMetrics {
        let (top_offset, bottom_offset) = match self {
            ContainerIcon::Glass => (90.0, 66.0),
            ContainerIcon::Drop => (42.0, 52.0),
            ContainerIcon::Bottle => (57.0, 13.0),
        };

        IconMetrics {
            original_height: Some(528.0),
            top_offset,
            bottom_offset,
        }
    }
}

/// Overlay that hides the empty part of a container icon with a plain rect
#[derive(Debug)]
pub struct FillCurtain {
    sector: Sector,
    metrics: Option<IconMetrics>,
    size: UVec2,
    dirty: bool,
}

impl Default for FillCurtain {
    fn default() -> Self {
        Self::new()
    }
}

impl FillCurtain {
    pub fn new() -> Self {
        Self {
            sector: Sector::default(),
            metrics: None,
            size: UVec2::ZERO,
            dirty: true,
        }
    }

    pub fn with_icon(mut self, icon: ContainerIcon) -> Self {
        self.metrics = Some(icon.metrics());
        self
    }

    pub fn with_metrics(mut self, metrics: IconMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    #[inline]
    pub fn sector(&self) -> &Sector {
        &self.sector
    }

    #[inline]
    pub fn metrics(&self) -> Option<&IconMetrics> {
        self.metrics.as_ref()
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn set_sector(&mut self, sector: Sector) {
        if self.sector != sector {
            self.sector = sector;
            self.dirty = true;
        }
    }

    pub fn set_fraction(&mut self, fraction: f32) -> Result<(), String> {
        let mut sector = self.sector;
        sector.set_percent(fraction)?;
        self.set_sector(sector);
        Ok(())
    }

    pub fn set_color(&mut self, color: Color) {
        let mut sector = self.sector;
        sector.set_color(color);
        self.set_sector(sector);
    }

    /// Icon used to read the offsets, `None` means no offsets at all
    pub fn set_metrics(&mut self, metrics: Option<IconMetrics>) {
        if self.metrics != metrics {
            self.metrics = metrics;
            self.dirty = true;
        }
    }

    pub fn on_resize(&mut self, width: u32, height: u32) {
        let size = UVec2::new(width, height);
        if self.size != size {
            self.size = size;
            self.dirty = true;
        }
    }

    /// Area covered by the curtain, from the top of the view to the water surface
    pub fn curtain_rect(&self) -> Option<Rect> {
        if self.size.x == 0 || self.size.y == 0 {
            return None;
        }

        let size = self.size.as_vec2();
        let (top, bottom) = self
            .metrics
            .map_or((0.0, 0.0), |metrics| metrics.offsets(size.y));

        let content = size.y - (top + bottom);
        let empty = content - content * self.sector.percent;
        Some(Rect::from_min_max(Vec2::ZERO, vec2(size.x, top + empty)))
    }

    pub fn draw<C: Canvas>(&mut self, canvas: &mut C) -> Result<(), String> {
        self.dirty = false;

        let Some(rect) = self.curtain_rect() else {
            log::trace!("FillCurtain without size, skipping draw");
            return Ok(());
        };

        if rect.is_empty() {
            return Ok(());
        }

        let mut path = Path2D::new();
        path.rect(rect);
        canvas.fill_path(&path.build(), &Paint::Solid(self.sector.color))
    }
}
