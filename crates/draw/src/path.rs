use corelib::math::{Rect, Vec2};
use lyon::math::{point, Box2D};
use lyon::path::builder::PathBuilder as _;
use lyon::path::path::Builder;
use lyon::path::{Path, PathEvent, Winding};

/// Retained path builder working on pixel coordinates
pub struct Path2D {
    builder: Builder,
    initialized: bool,
}

impl Default for Path2D {
    fn default() -> Self {
        Self::new()
    }
}

impl Path2D {
    pub fn new() -> Self {
        Self {
            builder: Path::builder(),
            initialized: false,
        }
    }

    // Start the path on the point given
    pub fn move_to(&mut self, pos: Vec2) -> &mut Self {
        if self.initialized {
            self.builder.end(false);
        }
        self.builder.begin(point(pos.x, pos.y));
        self.initialized = true;
        self
    }

    // Draw a line from the previous point to the new point
    pub fn line_to(&mut self, pos: Vec2) -> &mut Self {
        debug_assert!(self.initialized, "You should use move_to first");
        self.builder.line_to(point(pos.x, pos.y));
        self
    }

    pub fn quadratic_bezier_to(&mut self, ctrl: Vec2, to: Vec2) -> &mut Self {
        debug_assert!(self.initialized, "You should use move_to first");
        self.builder
            .quadratic_bezier_to(point(ctrl.x, ctrl.y), point(to.x, to.y));
        self
    }

    // Closes the line drawing a line to the last move_to point
    pub fn close(&mut self) -> &mut Self {
        debug_assert!(self.initialized, "You should use move_to first");
        self.initialized = false;
        self.builder.end(true);
        self
    }

    /// Adds a closed circle as its own sub-path
    pub fn circle(&mut self, center: Vec2, radius: f32) -> &mut Self {
        self.end_open_subpath();
        self.builder
            .add_circle(point(center.x, center.y), radius.max(0.0), Winding::Positive);
        self
    }

    /// Adds a closed rectangle as its own sub-path
    pub fn rect(&mut self, rect: Rect) -> &mut Self {
        self.end_open_subpath();
        let min = rect.min();
        let max = rect.max();
        self.builder.add_rectangle(
            &Box2D::new(point(min.x, min.y), point(max.x, max.y)),
            Winding::Positive,
        );
        self
    }

    pub fn build(mut self) -> Path {
        self.end_open_subpath();
        self.builder.build()
    }

    fn end_open_subpath(&mut self) {
        if self.initialized {
            self.builder.end(false);
            self.initialized = false;
        }
    }
}

/// Returns true when the path has at least one sub-path and every one of them is closed
pub fn is_closed_path(path: &Path) -> bool {
    let mut subpaths = 0;
    for evt in path.iter() {
        if let PathEvent::End { close, .. } = evt {
            if !close {
                return false;
            }
            subpaths += 1;
        }
    }

    subpaths > 0
}

/// Converts the path to the rasterizer format, `None` if it has no area to draw
pub(crate) fn to_skia_path(path: &Path) -> Option<tiny_skia::Path> {
    let mut pb = tiny_skia::PathBuilder::new();
    for evt in path.iter() {
        match evt {
            PathEvent::Begin { at } => pb.move_to(at.x, at.y),
            PathEvent::Line { to, .. } => pb.line_to(to.x, to.y),
            PathEvent::Quadratic { ctrl, to, .. } => pb.quad_to(ctrl.x, ctrl.y, to.x, to.y),
            PathEvent::Cubic {
                ctrl1, ctrl2, to, ..
            } => pb.cubic_to(ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y),
            PathEvent::End { close: true, .. } => pb.close(),
            PathEvent::End { close: false, .. } => {}
        }
    }

    pb.finish()
}

/// Every point of the path, including control points, in the order they were added
pub fn path_points(path: &Path) -> Vec<Vec2> {
    let to_vec2 = |p: lyon::math::Point| Vec2::new(p.x, p.y);
    let mut points = vec![];
    for evt in path.iter() {
        match evt {
            PathEvent::Begin { at } => points.push(to_vec2(at)),
            PathEvent::Line { to, .. } => points.push(to_vec2(to)),
            PathEvent::Quadratic { ctrl, to, .. } => {
                points.extend([to_vec2(ctrl), to_vec2(to)]);
            }
            PathEvent::Cubic {
                ctrl1, ctrl2, to, ..
            } => {
                points.extend([to_vec2(ctrl1), to_vec2(ctrl2), to_vec2(to)]);
            }
            PathEvent::End { .. } => {}
        }
    }

    points
}
