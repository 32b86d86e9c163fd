use nalgebra::Point2;

/// Pixel-space rectangle covering a screen-space triangle.
///
/// `min` is inclusive and `max` exclusive, both already clamped to the target.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_x: usize,
    pub min_y: usize,
    pub max_x: usize,
    pub max_y: usize,
}

impl BoundingBox {
    /// Builds the box around `points` clamped to `[0, width] x [0, height]`.
    ///
    /// A pixel column `px` is included while `px < max`, so a triangle reaching
    /// 74.3 covers column 74. Returns `None` when nothing is left after clamping.
    pub fn around(points: &[Point2<f32>; 3], width: usize, height: usize) -> Option<Self> {
        let clamp_x = |v: f32| v.clamp(0.0, width as f32);
        let clamp_y = |v: f32| v.clamp(0.0, height as f32);

        let min_x = clamp_x(points[0].x.min(points[1].x).min(points[2].x));
        let min_y = clamp_y(points[0].y.min(points[1].y).min(points[2].y));
        let max_x = clamp_x(points[0].x.max(points[1].x).max(points[2].x));
        let max_y = clamp_y(points[0].y.max(points[1].y).max(points[2].y));

        let bounds = Self {
            min_x: min_x.floor() as usize,
            min_y: min_y.floor() as usize,
            max_x: max_x.ceil() as usize,
            max_y: max_y.ceil() as usize,
        };

        (!bounds.is_empty()).then_some(bounds)
    }

    pub fn width(&self) -> usize {
        self.max_x.saturating_sub(self.min_x)
    }

    pub fn height(&self) -> usize {
        self.max_y.saturating_sub(self.min_y)
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn area(&self) -> usize {
        self.width() * self.height()
    }
}
