use crate::core::color::pack_rgb;
use nalgebra::Vector3;
use rayon::prelude::*;

/// Color and depth targets for one frame.
///
/// Colors are packed `0xAARRGGBB`; depth holds the non-linear NDC z of the
/// closest fragment written so far and starts at `+inf` after a clear.
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    pub color_buffer: Vec<u32>,
    pub depth_buffer: Vec<f32>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            color_buffer: vec![pack_rgb(Vector3::zeros()); size],
            depth_buffer: vec![f32::INFINITY; size],
        }
    }

    /// Fills the color buffer with `color` and resets every depth to `+inf`.
    pub fn clear(&mut self, color: Vector3<f32>) {
        let packed = pack_rgb(color);
        self.color_buffer.par_iter_mut().for_each(|c| *c = packed);
        self.clear_depth();
    }

    /// Resets every depth to `+inf` without touching colors.
    pub fn clear_depth(&mut self) {
        self.depth_buffer
            .par_iter_mut()
            .for_each(|d| *d = f32::INFINITY);
    }

    #[inline(always)]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Option<u32> {
        self.in_bounds(x, y)
            .then(|| self.color_buffer[self.index(x, y)])
    }

    pub fn get_depth(&self, x: usize, y: usize) -> Option<f32> {
        self.in_bounds(x, y)
            .then(|| self.depth_buffer[self.index(x, y)])
    }

    /// Mutable color and depth rows `start_y..end_y`, one `(y, colors, depths)`
    /// item per row, for parallel processing.
    ///
    /// Rows are disjoint, so each pixel has exactly one writer.
    pub fn rows_mut(
        &mut self,
        start_y: usize,
        end_y: usize,
    ) -> impl IndexedParallelIterator<Item = (usize, (&mut [u32], &mut [f32]))> {
        let width = self.width;
        let end_y = end_y.min(self.height);
        let start_y = start_y.min(end_y);
        let range = start_y * width..end_y * width;

        self.color_buffer[range.clone()]
            .par_chunks_mut(width.max(1))
            .zip(self.depth_buffer[range].par_chunks_mut(width.max(1)))
            .enumerate()
            .map(move |(row, pair)| (start_y + row, pair))
    }
}
