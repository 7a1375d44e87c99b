pub use glam::*;

#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Creates a rect from its corners, a max corner smaller than min collapses to an empty rect
    #[inline]
    pub fn from_min_max(min: Vec2, max: Vec2) -> Self {
        Self {
            origin: min,
            size: (max - min).max(Vec2::ZERO),
        }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.origin + self.size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_min_max() {
        let rect = Rect::from_min_max(Vec2::new(2.0, 3.0), Vec2::new(6.0, 4.0));
        assert_eq!(rect.size, Vec2::new(4.0, 1.0));
        assert_eq!(rect.max(), Vec2::new(6.0, 4.0));
        assert!(!rect.is_empty());
    }

    #[test]
    fn test_from_min_max_collapses_inverted_corners() {
        let inverted = Rect::from_min_max(Vec2::new(5.0, 5.0), Vec2::new(1.0, 8.0));
        assert!(inverted.is_empty());
        assert_eq!(inverted.size, Vec2::new(0.0, 3.0));
        assert_eq!(inverted.max(), Vec2::new(5.0, 8.0));
    }
}
