use arrayvec::ArrayVec;
use corelib::math::{Rect, Vec2, vec2};
use draw::{Path, Path2D};
use strum_macros::{Display, EnumCount, EnumIter};

/// Container outline used to clip the wave fill
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShapeType {
    #[default]
    Circle,
    Square,
    Bottle,
    Drop,
    Glass,
}

impl ShapeType {
    /// Only circles and squares render the configured border
    #[inline]
    pub fn draws_border(self) -> bool {
        matches!(self, ShapeType::Circle | ShapeType::Square)
    }
}

/// Paths needed to render one frame of a shape
pub struct Silhouette {
    /// Closed region filled with the wave texture
    pub outline: Path,
    /// Stroked before the fill, if the shape supports borders and one is set
    pub border: Option<Path>,
    /// Decorative dots filled with the same paint as the outline
    pub markers: ArrayVec<Path, 2>,
}

/// Builds the silhouette for the given size. Every coordinate is a fraction of
/// the size, so the paths grow proportionally on each axis.
pub fn build_silhouette(shape: ShapeType, size: Vec2, border_width: f32) -> Silhouette {
    let border_width = border_width.max(0.0);
    let border = (border_width > 0.0 && shape.draws_border())
        .then(|| border_path(shape, size, border_width));

    let mut markers = ArrayVec::new();
    let outline = match shape {
        ShapeType::Circle => circle(size, border_width),
        ShapeType::Square => square(size, border_width),
        ShapeType::Bottle => {
            markers = bottle_markers(size);
            bottle(size)
        }
        ShapeType::Drop => water_drop(size),
        ShapeType::Glass => glass(size),
    };

    Silhouette {
        outline,
        border,
        markers,
    }
}

fn border_path(shape: ShapeType, size: Vec2, bw: f32) -> Path {
    let mut path = Path2D::new();
    match shape {
        ShapeType::Square => {
            let half = bw * 0.5;
            path.rect(Rect::from_min_max(
                Vec2::splat(half),
                size - Vec2::splat(half + 0.5),
            ));
        }
        _ => {
            path.circle(size * 0.5, (size.x - bw) * 0.5 - 1.0);
        }
    }
    path.build()
}

fn circle(size: Vec2, bw: f32) -> Path {
    let mut path = Path2D::new();
    path.circle(size * 0.5, size.x * 0.5 - bw);
    path.build()
}

fn square(size: Vec2, bw: f32) -> Path {
    let mut path = Path2D::new();
    path.rect(Rect::from_min_max(Vec2::splat(bw), size - Vec2::splat(bw)));
    path.build()
}

// Reference design: 750px tall with a half width of 375px. Each divisor turns
// one of its offsets into a ratio of the current half width or height.

fn bottle(size: Vec2) -> Path {
    let hw = size.x * 0.5;
    let h = size.y;

    let plus45 = hw / 0.9146341;
    let minus40 = hw / 1.117403;
    let minus158 = hw / 1.785714;
    let minus136 = hw / 1.569038;
    let plus160 = hw / 0.7009346;
    let minus60 = hw / 1.190476;
    let plus60 = hw / 0.862069;
    let minus110 = hw / 1.415094;
    let plus110 = hw / 0.7731959;
    let plus138 = hw / 0.7309942;

    let h20 = h / 37.5;
    let h200 = h / 3.75;
    let h265 = h / 2.830186;
    let h320 = h / 2.34375;
    let h700 = h / 1.071429;
    let h762 = h / 0.984252;

    let mut path = Path2D::new();
    path.move_to(vec2(plus45, h20))
        .line_to(vec2(minus40, h20))
        .quadratic_bezier_to(vec2(minus158, h265), vec2(minus136, h320))
        .line_to(vec2(minus136, h700))
        .quadratic_bezier_to(vec2(minus110, h762), vec2(minus60, h700))
        .quadratic_bezier_to(vec2(hw, h762), vec2(plus60, h700))
        .quadratic_bezier_to(vec2(plus110, h762), vec2(plus138, h700))
        .line_to(vec2(plus138, h320))
        .quadratic_bezier_to(vec2(plus160, h200), vec2(plus45, h20))
        .close();
    path.build()
}

fn bottle_markers(size: Vec2) -> ArrayVec<Path, 2> {
    let hw = size.x * 0.5;
    let h = size.y;
    let y = h / 2.884615;
    let radius = h / 150.0;

    [hw / 1.5625, hw / 0.7352941]
        .into_iter()
        .map(|x| {
            let mut path = Path2D::new();
            path.circle(vec2(x, y), radius);
            path.build()
        })
        .collect()
}

fn water_drop(size: Vec2) -> Path {
    let hw = size.x * 0.5;
    let h = size.y;

    let minus200 = hw / 2.5;
    let minus5 = hw / 1.013514;
    let plus5 = hw / 0.9868421;
    let minus230 = hw / 2.586207;
    let minus150 = hw / 1.666667;
    let plus150 = hw / 0.7009346;
    let plus225 = hw / 0.625;

    let h20 = h / 37.5;
    let h40 = h / 18.75;
    let h400 = h / 1.875;
    let h475 = h / 1.578947;
    let h748 = h / 1.002674;
    let h700 = h / 1.071429;
    let h740 = h / 1.013514;

    let mut path = Path2D::new();
    path.move_to(vec2(hw, h20))
        .line_to(vec2(minus5, h40))
        .line_to(vec2(minus200, h400))
        .line_to(vec2(minus230, h475))
        .quadratic_bezier_to(vec2(minus150, h748), vec2(hw, h700))
        .quadratic_bezier_to(vec2(plus150, h740), vec2(plus225, h475))
        .line_to(vec2(plus225, h400))
        .line_to(vec2(plus5, h40))
        .close();
    path.build()
}

fn glass(size: Vec2) -> Path {
    let hw = size.x * 0.5;
    let h = size.y;

    let minus240 = hw / 2.777778;
    let plus240 = hw / 0.6097561;
    let minus193 = hw / 2.06044;
    let plus193 = hw / 0.6602113;

    let h80 = h / 9.375;
    let h700 = h / 1.111111;

    let mut path = Path2D::new();
    path.move_to(vec2(hw, h80))
        .line_to(vec2(minus240, h80))
        .line_to(vec2(minus193, h700))
        .line_to(vec2(plus193, h700))
        .line_to(vec2(plus240, h80))
        .line_to(vec2(hw, h80))
        .close();
    path.build()
}
