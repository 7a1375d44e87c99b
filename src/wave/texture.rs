use super::{DEFAULT_AMPLITUDE_RATIO, DEFAULT_WATER_LEVEL_RATIO, DEFAULT_WAVE_LENGTH_RATIO};
use corelib::gfx::{Color, Pixmap};
use corelib::math::{Rect, vec2};
use std::f64::consts::PI;

/// Tileable bitmap holding the back and front waves drawn with the default ratios
#[derive(Debug, Clone, PartialEq)]
pub struct WaveTexture {
    pixmap: Pixmap,
    back_wave: Vec<f32>,
    front_shift: usize,
}

impl WaveTexture {
    /// Draws both waves for the given size. The result repeats seamlessly on the
    /// x axis and can be clamped on the y axis.
    pub fn generate(width: u32, height: u32, behind: Color, front: Color) -> Result<Self, String> {
        let mut pixmap = Pixmap::new(width, height)?;

        let (w, h) = (width as f64, height as f64);
        let amplitude = h * DEFAULT_AMPLITUDE_RATIO as f64;
        let water_level = h * DEFAULT_WATER_LEVEL_RATIO as f64;
        let wave_length = w * DEFAULT_WAVE_LENGTH_RATIO as f64;
        let angular_frequency = 2.0 * PI / wave_length;

        // y = A·sin(ωx) + h, one extra value to close the period
        let back_wave: Vec<f32> = (0..=width as usize)
            .map(|x| (water_level + amplitude * (x as f64 * angular_frequency).sin()) as f32)
            .collect();

        for (x, top) in back_wave.iter().take(width as usize).enumerate() {
            fill_column(&mut pixmap, x as u32, *top, behind);
        }

        let front_shift = (wave_length / 4.0) as usize;
        let columns = width as usize;
        for x in 0..columns {
            let top = back_wave[(x + front_shift) % columns];
            fill_column(&mut pixmap, x as u32, top, front);
        }

        log::debug!("Wave texture generated with size {width}x{height}");
        Ok(Self {
            pixmap,
            back_wave,
            front_shift,
        })
    }

    #[inline]
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Surface height of the back wave for each column, `width + 1` values
    #[inline]
    pub fn back_wave(&self) -> &[f32] {
        &self.back_wave
    }

    /// Surface height of the front wave, which is the back wave moved a quarter of its length
    pub fn front_wave_at(&self, x: usize) -> Option<f32> {
        let columns = self.pixmap.width() as usize;
        (x < columns).then(|| self.back_wave[(x + self.front_shift) % columns])
    }
}

/// Fills the column from `top` to the bottom edge, the first pixel gets partial coverage
fn fill_column(pixmap: &mut Pixmap, x: u32, top: f32, color: Color) {
    let bottom = pixmap.height() as f32;
    let top = top.max(0.0);
    if top >= bottom {
        return;
    }

    pixmap.fill_rect(
        Rect::from_min_max(vec2(x as f32, top), vec2((x + 1) as f32, bottom)),
        color,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wave::{DEFAULT_BEHIND_WAVE_COLOR, DEFAULT_FRONT_WAVE_COLOR};

    fn texture(width: u32, height: u32) -> WaveTexture {
        WaveTexture::generate(
            width,
            height,
            DEFAULT_BEHIND_WAVE_COLOR,
            DEFAULT_FRONT_WAVE_COLOR,
        )
        .unwrap()
    }

    #[test]
    fn test_texture_has_the_requested_size() {
        for (w, h) in [(1, 1), (100, 100), (400, 100), (33, 250)] {
            let texture = texture(w, h);
            assert_eq!(texture.pixmap().width(), w);
            assert_eq!(texture.pixmap().height(), h);
            assert_eq!(texture.back_wave().len(), w as usize + 1);
        }
    }

    #[test]
    fn test_back_wave_follows_the_sine() {
        let (w, h) = (200, 120);
        let texture = texture(w, h);

        let amplitude = h as f32 * DEFAULT_AMPLITUDE_RATIO;
        let level = h as f32 * DEFAULT_WATER_LEVEL_RATIO;
        let omega = std::f32::consts::TAU / w as f32;
        for (x, y) in texture.back_wave().iter().enumerate() {
            let expected = level + amplitude * (omega * x as f32).sin();
            assert!((y - expected).abs() < 1e-3, "x={x}: {y} != {expected}");
        }

        // a full period closes on the water level
        assert!((texture.back_wave()[w as usize] - level).abs() < 1e-3);
    }

    #[test]
    fn test_front_wave_is_shifted_a_quarter() {
        let w = 200;
        let texture = texture(w, 100);
        let shift = w as usize / 4;
        for x in 0..w as usize {
            let expected = texture.back_wave()[(x + shift) % w as usize];
            assert_eq!(texture.front_wave_at(x), Some(expected));
        }

        // quarter of a period ahead means the front starts on the crest
        let crest = 50.0 + 5.0;
        assert!((texture.front_wave_at(0).unwrap() - crest).abs() < 1e-3);
        assert_eq!(texture.front_wave_at(w as usize), None);
    }

    #[test]
    fn test_columns_are_filled_to_the_bottom() {
        let texture = texture(100, 100);
        let pixmap = texture.pixmap();
        for x in 0..100 {
            // above the highest crest
            assert_eq!(pixmap.pixel(x, 40), Some(Color::TRANSPARENT));
            // under the lowest trough both waves are blended
            let [r, g, b, a] = pixmap.pixel(x, 99).unwrap().to_rgba_u8();
            let (front, behind) = (DEFAULT_FRONT_WAVE_COLOR.a, DEFAULT_BEHIND_WAVE_COLOR.a);
            let expected = ((front + behind * (1.0 - front)) * 255.0).round() as u8;
            assert!(a.abs_diff(expected) <= 1, "column {x}: alpha {a} != {expected}");
            assert_eq!((r, g), (0, 0));
            assert!(b >= 250, "column {x}: blue {b}");
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        assert_eq!(texture(150, 80), texture(150, 80));
    }

    #[test]
    fn test_zero_size_fails() {
        assert!(WaveTexture::generate(0, 10, Color::RED, Color::BLUE).is_err());
        assert!(WaveTexture::generate(10, 0, Color::RED, Color::BLUE).is_err());
    }
}
