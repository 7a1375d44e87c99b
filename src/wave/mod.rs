mod shape;
mod texture;
mod transform;

pub use shape::*;
pub use texture::*;
pub use transform::*;

use corelib::gfx::Color;
use corelib::math::{UVec2, vec2};
use draw::{Canvas, Paint, Pattern2D, TextureWrap};

/*
 +------------------------+
 |<--wave length->        |______
 |   /\          |   /\   |  |
 |  /  \         |  /  \  | amplitude
 | /    \        | /    \ |  |
 |/      \       |/      \|__|____
 |        \      /        |  |
 |         \    /         |  |
 |          \  /          |  |
 |           \/           | water level
 |                        |  |
 |                        |  |
 +------------------------+__|____
*/

pub const DEFAULT_AMPLITUDE_RATIO: f32 = 0.05;
pub const DEFAULT_WATER_LEVEL_RATIO: f32 = 0.5;
pub const DEFAULT_WAVE_LENGTH_RATIO: f32 = 1.0;
pub const DEFAULT_WAVE_SHIFT_RATIO: f32 = 0.0;
pub const DEFAULT_BEHIND_WAVE_COLOR: Color = Color::argb_hex(0x280000FF);
pub const DEFAULT_FRONT_WAVE_COLOR: Color = Color::argb_hex(0x3C0000FF);
pub const DEFAULT_WAVE_SHAPE: ShapeType = ShapeType::Circle;

// waves repeat horizontally and are clamped vertically
const WAVE_WRAP: (TextureWrap, TextureWrap) = (TextureWrap::Repeat, TextureWrap::Clamp);

/// Parameters of a wave view, every ratio is relative to the view size
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WaveConfig {
    /// Vertical size of the wave. Should stay under `1 - water_level_ratio`
    pub amplitude_ratio: f32,
    /// Width of one wave period
    pub wave_length_ratio: f32,
    /// Height of the water surface
    pub water_level_ratio: f32,
    /// Horizontal offset of the waves, 0 to 1
    pub wave_shift_ratio: f32,
    pub behind_color: Color,
    pub front_color: Color,
    /// Nothing but the border is drawn until this is enabled
    pub show_wave: bool,
    pub shape: ShapeType,
    pub border_width: f32,
    pub border_color: Color,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            amplitude_ratio: DEFAULT_AMPLITUDE_RATIO,
            wave_length_ratio: DEFAULT_WAVE_LENGTH_RATIO,
            water_level_ratio: DEFAULT_WATER_LEVEL_RATIO,
            wave_shift_ratio: DEFAULT_WAVE_SHIFT_RATIO,
            behind_color: DEFAULT_BEHIND_WAVE_COLOR,
            front_color: DEFAULT_FRONT_WAVE_COLOR,
            show_wave: false,
            shape: DEFAULT_WAVE_SHAPE,
            border_width: 0.0,
            border_color: Color::BLACK,
        }
    }
}

/// Water level widget. It keeps a texture with the default waves and draws it
/// through a transform that applies the current ratios, clipped by the shape.
#[derive(Debug)]
pub struct WaveView {
    config: WaveConfig,
    size: UVec2,
    texture: Option<WaveTexture>,
    dirty: bool,
}

impl Default for WaveView {
    fn default() -> Self {
        Self::new()
    }
}

impl WaveView {
    pub fn new() -> Self {
        Self::from_config(WaveConfig::default())
    }

    pub fn from_config(config: WaveConfig) -> Self {
        Self {
            config,
            size: UVec2::ZERO,
            texture: None,
            dirty: true,
        }
    }

    pub fn builder() -> WaveViewBuilder {
        WaveViewBuilder::default()
    }

    #[inline]
    pub fn config(&self) -> &WaveConfig {
        &self.config
    }

    #[inline]
    pub fn size(&self) -> UVec2 {
        self.size
    }

    /// Cached waves, `None` until the view gets a valid size
    #[inline]
    pub fn texture(&self) -> Option<&WaveTexture> {
        self.texture.as_ref()
    }

    /// Whether something changed since the last draw
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Forces a redraw
    #[inline]
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    #[inline]
    pub fn amplitude_ratio(&self) -> f32 {
        self.config.amplitude_ratio
    }

    pub fn set_amplitude_ratio(&mut self, ratio: f32) {
        update(&mut self.dirty, &mut self.config.amplitude_ratio, ratio);
    }

    #[inline]
    pub fn wave_length_ratio(&self) -> f32 {
        self.config.wave_length_ratio
    }

    pub fn set_wave_length_ratio(&mut self, ratio: f32) {
        update(&mut self.dirty, &mut self.config.wave_length_ratio, ratio);
    }

    #[inline]
    pub fn water_level_ratio(&self) -> f32 {
        self.config.water_level_ratio
    }

    pub fn set_water_level_ratio(&mut self, ratio: f32) {
        update(&mut self.dirty, &mut self.config.water_level_ratio, ratio);
    }

    #[inline]
    pub fn wave_shift_ratio(&self) -> f32 {
        self.config.wave_shift_ratio
    }

    pub fn set_wave_shift_ratio(&mut self, ratio: f32) {
        update(&mut self.dirty, &mut self.config.wave_shift_ratio, ratio);
    }

    #[inline]
    pub fn show_wave(&self) -> bool {
        self.config.show_wave
    }

    pub fn set_show_wave(&mut self, show: bool) {
        update(&mut self.dirty, &mut self.config.show_wave, show);
    }

    #[inline]
    pub fn shape(&self) -> ShapeType {
        self.config.shape
    }

    pub fn set_shape(&mut self, shape: ShapeType) {
        update(&mut self.dirty, &mut self.config.shape, shape);
    }

    #[inline]
    pub fn border(&self) -> (f32, Color) {
        (self.config.border_width, self.config.border_color)
    }

    /// Border stroked around circles and squares, a width of 0 disables it
    pub fn set_border(&mut self, width: f32, color: Color) {
        let width_changed = update(&mut self.dirty, &mut self.config.border_width, width);
        let color_changed = update(&mut self.dirty, &mut self.config.border_color, color);
        if width_changed || color_changed {
            log::trace!("Wave border set to {width}px {color}");
        }
    }

    #[inline]
    pub fn wave_colors(&self) -> (Color, Color) {
        (self.config.behind_color, self.config.front_color)
    }

    /// Colors are baked into the texture, so a sized view regenerates it
    pub fn set_wave_color(&mut self, behind: Color, front: Color) -> Result<(), String> {
        let behind_changed = update(&mut self.dirty, &mut self.config.behind_color, behind);
        let front_changed = update(&mut self.dirty, &mut self.config.front_color, front);
        if !(behind_changed || front_changed) {
            return Ok(());
        }

        if is_zero_size(self.size) {
            self.texture = None;
            return Ok(());
        }

        self.regenerate_texture()
    }

    /// Notifies a new size in pixels. The texture is regenerated only when the size
    /// changes, a zero size keeps the previous texture and disables drawing.
    pub fn on_resize(&mut self, width: u32, height: u32) -> Result<(), String> {
        let size = UVec2::new(width, height);
        if self.size == size {
            return Ok(());
        }

        self.size = size;
        self.dirty = true;

        if is_zero_size(size) {
            log::debug!("WaveView resized to {width}x{height}, nothing will be drawn");
            return Ok(());
        }

        let reusable = self
            .texture
            .as_ref()
            .is_some_and(|texture| texture.pixmap().size() == size);
        if reusable {
            return Ok(());
        }

        self.regenerate_texture()
    }

    /// Transform applied to the texture for the current ratios and size
    pub fn shader_transform(&self) -> Option<ShaderTransform> {
        if is_zero_size(self.size) {
            return None;
        }

        let size = self.size.as_vec2();
        Some(ShaderTransform {
            scale: vec2(
                self.config.wave_length_ratio / DEFAULT_WAVE_LENGTH_RATIO,
                self.config.amplitude_ratio / DEFAULT_AMPLITUDE_RATIO,
            ),
            pivot: vec2(0.0, size.y * DEFAULT_WATER_LEVEL_RATIO),
            translation: vec2(
                self.config.wave_shift_ratio * size.x,
                (DEFAULT_WATER_LEVEL_RATIO - self.config.water_level_ratio) * size.y,
            ),
        })
    }

    /// Draws the current frame. The border goes first so the wave is drawn on top
    pub fn draw<C: Canvas>(&mut self, canvas: &mut C) -> Result<(), String> {
        self.dirty = false;

        if is_zero_size(self.size) {
            log::trace!("WaveView without size, skipping draw");
            return Ok(());
        }

        let silhouette =
            build_silhouette(self.config.shape, self.size.as_vec2(), self.config.border_width);

        if let Some(border) = &silhouette.border {
            canvas.stroke_path(
                border,
                self.config.border_width,
                &Paint::Solid(self.config.border_color),
            )?;
        }

        if !self.config.show_wave {
            return Ok(());
        }

        let (Some(texture), Some(transform)) = (&self.texture, self.shader_transform()) else {
            log::trace!("WaveView without texture, skipping wave");
            return Ok(());
        };

        let mut pattern = Pattern2D::new(texture.pixmap());
        pattern
            .wrap(WAVE_WRAP.0, WAVE_WRAP.1)
            .matrix(transform.to_mat3());
        if !pattern.is_drawable() {
            log::trace!("Wave transform {transform:?} cannot be inverted, skipping wave");
            return Ok(());
        }

        let paint = Paint::from(pattern);
        canvas.fill_path(&silhouette.outline, &paint)?;
        for marker in &silhouette.markers {
            canvas.fill_path(marker, &paint)?;
        }

        log::trace!(
            "WaveView drawn: shape={} level={} shift={}",
            self.config.shape,
            self.config.water_level_ratio,
            self.config.wave_shift_ratio
        );
        Ok(())
    }

    fn regenerate_texture(&mut self) -> Result<(), String> {
        let texture = WaveTexture::generate(
            self.size.x,
            self.size.y,
            self.config.behind_color,
            self.config.front_color,
        )?;
        self.texture = Some(texture);
        Ok(())
    }
}

/// Stores the value and flags a redraw, only if it differs from the current one
fn update<T: PartialEq>(dirty: &mut bool, field: &mut T, value: T) -> bool {
    if *field == value {
        return false;
    }

    *field = value;
    *dirty = true;
    true
}

#[inline]
fn is_zero_size(size: UVec2) -> bool {
    size.x == 0 || size.y == 0
}

#[derive(Debug, Default)]
pub struct WaveViewBuilder {
    config: WaveConfig,
    size: Option<UVec2>,
}

impl WaveViewBuilder {
    pub fn with_config(mut self, config: WaveConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_amplitude_ratio(mut self, ratio: f32) -> Self {
        self.config.amplitude_ratio = ratio;
        self
    }

    pub fn with_wave_length_ratio(mut self, ratio: f32) -> Self {
        self.config.wave_length_ratio = ratio;
        self
    }

    pub fn with_water_level_ratio(mut self, ratio: f32) -> Self {
        self.config.water_level_ratio = ratio;
        self
    }

    pub fn with_wave_shift_ratio(mut self, ratio: f32) -> Self {
        self.config.wave_shift_ratio = ratio;
        self
    }

    pub fn with_wave_color(mut self, behind: Color, front: Color) -> Self {
        self.config.behind_color = behind;
        self.config.front_color = front;
        self
    }

    pub fn with_show_wave(mut self, show: bool) -> Self {
        self.config.show_wave = show;
        self
    }

    pub fn with_shape(mut self, shape: ShapeType) -> Self {
        self.config.shape = shape;
        self
    }

    pub fn with_border(mut self, width: f32, color: Color) -> Self {
        self.config.border_width = width;
        self.config.border_color = color;
        self
    }

    /// Initial size, the texture is generated on build
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = Some(UVec2::new(width, height));
        self
    }

    pub fn build(self) -> Result<WaveView, String> {
        let mut view = WaveView::from_config(self.config);
        if let Some(size) = self.size {
            view.on_resize(size.x, size.y)?;
        }
        Ok(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corelib::math::Vec2;
    use draw::{Path, PixmapCanvas};

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Call {
        Fill { pattern: bool },
        Stroke { width: f32, pattern: bool },
    }

    #[derive(Default)]
    struct RecordingCanvas {
        calls: Vec<Call>,
    }

    impl Canvas for RecordingCanvas {
        fn size(&self) -> Vec2 {
            vec2(100.0, 100.0)
        }

        fn fill_path(&mut self, _path: &Path, paint: &Paint) -> Result<(), String> {
            self.calls.push(Call::Fill {
                pattern: paint.is_pattern(),
            });
            Ok(())
        }

        fn stroke_path(&mut self, _path: &Path, width: f32, paint: &Paint) -> Result<(), String> {
            self.calls.push(Call::Stroke {
                width,
                pattern: paint.is_pattern(),
            });
            Ok(())
        }
    }

    fn sized_view(width: u32, height: u32) -> WaveView {
        WaveView::builder()
            .with_size(width, height)
            .with_show_wave(true)
            .build()
            .unwrap()
    }

    fn alpha_at(canvas: &PixmapCanvas, x: u32, y: u32) -> u8 {
        canvas.pixmap().pixel(x, y).unwrap().to_rgba_u8()[3]
    }

    #[test]
    fn test_defaults() {
        let view = WaveView::new();
        assert_eq!(view.amplitude_ratio(), 0.05);
        assert_eq!(view.water_level_ratio(), 0.5);
        assert_eq!(view.wave_length_ratio(), 1.0);
        assert_eq!(view.wave_shift_ratio(), 0.0);
        assert_eq!(view.shape(), ShapeType::Circle);
        assert!(!view.show_wave());
        assert_eq!(view.wave_colors().0.to_rgba_u8(), [0, 0, 255, 0x28]);
        assert_eq!(view.wave_colors().1.to_rgba_u8(), [0, 0, 255, 0x3C]);
        assert!(view.texture().is_none());
        assert!(view.is_dirty());
    }

    #[test]
    fn test_setters_only_redraw_on_change() {
        let mut view = sized_view(100, 100);
        let mut canvas = RecordingCanvas::default();

        type Setter = fn(&mut WaveView, bool);
        let setters: [(&str, Setter); 7] = [
            ("amplitude", |v: &mut WaveView, b: bool| {
                v.set_amplitude_ratio(if b { 0.1 } else { 0.05 })
            }),
            ("length", |v: &mut WaveView, b: bool| {
                v.set_wave_length_ratio(if b { 2.0 } else { 1.0 })
            }),
            ("level", |v: &mut WaveView, b: bool| {
                v.set_water_level_ratio(if b { 0.7 } else { 0.5 })
            }),
            ("shift", |v: &mut WaveView, b: bool| {
                v.set_wave_shift_ratio(if b { 0.3 } else { 0.0 })
            }),
            ("show", |v: &mut WaveView, b: bool| v.set_show_wave(!b)),
            ("shape", |v: &mut WaveView, b: bool| {
                v.set_shape(if b { ShapeType::Glass } else { ShapeType::Circle })
            }),
            ("border", |v: &mut WaveView, b: bool| {
                v.set_border(if b { 2.0 } else { 0.0 }, Color::BLACK)
            }),
        ];

        for (name, set) in setters {
            view.draw(&mut canvas).unwrap();
            assert!(!view.is_dirty());

            set(&mut view, false);
            assert!(!view.is_dirty(), "{name}: same value should not redraw");

            set(&mut view, true);
            assert!(view.is_dirty(), "{name}: new value should redraw");

            set(&mut view, false);
            view.draw(&mut canvas).unwrap();
        }
    }

    #[test]
    fn test_wave_color_regenerates_texture() {
        let mut view = sized_view(50, 50);
        let before = view.texture().unwrap().clone();
        view.draw(&mut RecordingCanvas::default()).unwrap();

        view.set_wave_color(DEFAULT_BEHIND_WAVE_COLOR, DEFAULT_FRONT_WAVE_COLOR)
            .unwrap();
        assert!(!view.is_dirty());
        assert_eq!(view.texture(), Some(&before));

        view.set_wave_color(Color::RED, Color::GREEN).unwrap();
        assert!(view.is_dirty());
        assert_ne!(view.texture(), Some(&before));
        let bottom = view.texture().unwrap().pixmap().pixel(0, 49).unwrap();
        assert_eq!(bottom, Color::GREEN);
    }

    #[test]
    fn test_transform_scenario() {
        let view = WaveView::builder()
            .with_amplitude_ratio(0.05)
            .with_water_level_ratio(0.5)
            .with_wave_length_ratio(1.0)
            .with_wave_shift_ratio(0.25)
            .with_size(200, 100)
            .build()
            .unwrap();

        let transform = view.shader_transform().unwrap();
        assert_eq!(transform.scale, vec2(1.0, 1.0));
        assert_eq!(transform.translation, vec2(50.0, 0.0));
        assert_eq!(transform.pivot, vec2(0.0, 50.0));
    }

    #[test]
    fn test_transform_follows_ratios() {
        let mut view = sized_view(200, 100);
        view.set_amplitude_ratio(0.1);
        view.set_wave_length_ratio(0.5);
        view.set_water_level_ratio(0.8);

        let transform = view.shader_transform().unwrap();
        assert_eq!(transform.scale, vec2(0.5, 2.0));
        assert!((transform.translation.y - -30.0).abs() < 1e-4);
        assert!(WaveView::new().shader_transform().is_none());
    }

    #[test]
    fn test_resize_with_same_size_keeps_texture() {
        let mut view = sized_view(120, 80);
        let first = view.texture().unwrap().clone();

        view.on_resize(120, 80).unwrap();
        assert_eq!(view.texture().unwrap().pixmap().as_bytes(), first.pixmap().as_bytes());

        view.on_resize(60, 80).unwrap();
        assert_eq!(view.texture().unwrap().pixmap().width(), 60);

        view.on_resize(120, 80).unwrap();
        assert_eq!(view.texture().unwrap().pixmap().as_bytes(), first.pixmap().as_bytes());
    }

    #[test]
    fn test_zero_size_keeps_texture_and_skips_draw() {
        let mut view = sized_view(40, 40);
        view.set_border(2.0, Color::BLACK);

        view.on_resize(0, 40).unwrap();
        assert!(view.texture().is_some());
        assert!(view.shader_transform().is_none());

        let mut canvas = RecordingCanvas::default();
        view.draw(&mut canvas).unwrap();
        assert!(canvas.calls.is_empty());
        assert!(!view.is_dirty());
    }

    #[test]
    fn test_hidden_wave_only_draws_border() {
        let mut view = WaveView::builder()
            .with_size(100, 100)
            .with_border(4.0, Color::BLACK)
            .build()
            .unwrap();

        let mut canvas = RecordingCanvas::default();
        view.draw(&mut canvas).unwrap();
        assert_eq!(
            canvas.calls,
            vec![Call::Stroke {
                width: 4.0,
                pattern: false
            }]
        );

        let mut canvas = PixmapCanvas::new(100, 100).unwrap();
        view.draw(&mut canvas).unwrap();
        assert_eq!(alpha_at(&canvas, 50, 50), 0);
        assert_eq!(alpha_at(&canvas, 50, 90), 0);
        assert_eq!(canvas.pixmap().pixel(97, 50), Some(Color::BLACK));
    }

    #[test]
    fn test_border_is_drawn_before_the_wave() {
        let mut view = sized_view(100, 100);
        view.set_shape(ShapeType::Square);
        view.set_border(2.0, Color::BLACK);

        let mut canvas = RecordingCanvas::default();
        view.draw(&mut canvas).unwrap();
        assert_eq!(
            canvas.calls,
            vec![
                Call::Stroke {
                    width: 2.0,
                    pattern: false
                },
                Call::Fill { pattern: true }
            ]
        );
    }

    #[test]
    fn test_bottle_fills_markers_and_ignores_border() {
        let mut view = sized_view(100, 100);
        view.set_shape(ShapeType::Bottle);
        view.set_border(2.0, Color::BLACK);

        let mut canvas = RecordingCanvas::default();
        view.draw(&mut canvas).unwrap();
        assert_eq!(canvas.calls, vec![Call::Fill { pattern: true }; 3]);
    }

    #[test]
    fn test_zero_amplitude_draws_no_wave() {
        let mut view = sized_view(100, 100);
        view.set_amplitude_ratio(0.0);

        let mut canvas = RecordingCanvas::default();
        view.draw(&mut canvas).unwrap();
        assert!(canvas.calls.is_empty());
    }

    #[test]
    fn test_water_level_moves_the_surface() {
        let mut view = sized_view(100, 100);

        let mut canvas = PixmapCanvas::new(100, 100).unwrap();
        view.draw(&mut canvas).unwrap();
        assert_eq!(alpha_at(&canvas, 50, 10), 0);
        assert_eq!(alpha_at(&canvas, 50, 30), 0);
        assert!(alpha_at(&canvas, 50, 90) > 0);
        // outside of the circle
        assert_eq!(alpha_at(&canvas, 2, 98), 0);

        view.set_water_level_ratio(0.9);
        let mut canvas = PixmapCanvas::new(100, 100).unwrap();
        view.draw(&mut canvas).unwrap();
        assert_eq!(alpha_at(&canvas, 50, 2), 0);
        assert!(alpha_at(&canvas, 50, 30) > 0);
    }

    #[test]
    fn test_high_water_is_clamped_and_smooth() {
        let mut view = sized_view(100, 100);
        view.set_wave_color(Color::RED, Color::RED).unwrap();
        view.set_water_level_ratio(0.9);

        let mut canvas = PixmapCanvas::new(100, 100).unwrap();
        view.draw(&mut canvas).unwrap();

        // the texture ends at y=60, the rest repeats its last row
        assert_eq!(canvas.pixmap().pixel(70, 70), Some(Color::RED));
        assert_eq!(canvas.pixmap().pixel(50, 95), Some(Color::RED));

        // the circle crosses this pixel
        let edge = alpha_at(&canvas, 85, 85);
        assert!(edge > 0 && edge < 255, "alpha {edge}");
    }

    #[test]
    fn test_shift_moves_the_waves() {
        let mut view = sized_view(100, 100);
        view.set_shape(ShapeType::Square);

        let mut first = PixmapCanvas::new(100, 100).unwrap();
        view.draw(&mut first).unwrap();

        view.set_wave_shift_ratio(0.25);
        let mut second = PixmapCanvas::new(100, 100).unwrap();
        view.draw(&mut second).unwrap();
        assert_ne!(first.pixmap(), second.pixmap());

        // a full period looks the same
        view.set_wave_shift_ratio(1.0);
        let mut third = PixmapCanvas::new(100, 100).unwrap();
        view.draw(&mut third).unwrap();
        assert_eq!(first.pixmap(), third.pixmap());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "amplitude_ratio": 0.02,
            "water_level_ratio": 0.3,
            "show_wave": true,
            "shape": "Drop",
            "border_width": 1.0
        }"#;

        let config: WaveConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.amplitude_ratio, 0.02);
        assert_eq!(config.shape, ShapeType::Drop);
        assert_eq!(config.wave_length_ratio, DEFAULT_WAVE_LENGTH_RATIO);
        assert_eq!(config.front_color, DEFAULT_FRONT_WAVE_COLOR);

        let back: WaveConfig =
            serde_json::from_str(&serde_json::to_string(&config).unwrap()).unwrap();
        assert_eq!(back, config);
    }
}
