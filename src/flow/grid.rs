//! Grayscale downsampling onto the fixed analysis grid.
//!
//! The estimator never works on full camera frames. Every frame is
//! reduced to a tiny N×N grid of normalized luma values; all further
//! processing cost scales with the grid, not the capture resolution.

use crate::capture::RawFrame;

/// Rec.601 luma weights.
const LUMA_R: f64 = 0.299;
const LUMA_G: f64 = 0.587;
const LUMA_B: f64 = 0.114;

/// A fixed-size square grid of grayscale intensities in [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct GrayGrid {
    size: usize,
    cells: Vec<f64>,
}

impl GrayGrid {
    /// Creates a grid from raw cell values.
    ///
    /// Used by tests and the flow estimator; `cells` must hold
    /// `size * size` values.
    pub fn from_cells(size: usize, cells: Vec<f64>) -> Self {
        debug_assert_eq!(cells.len(), size * size);
        Self { size, cells }
    }

    /// Downsamples a raw frame onto an N×N grid.
    ///
    /// Each cell box-averages its corresponding pixel block, then the
    /// averaged color is reduced to luma. Deterministic for a given
    /// frame; carries no state.
    pub fn from_frame(frame: &RawFrame, size: usize) -> Self {
        let size = size.max(1);
        let fw = frame.width().max(1) as usize;
        let fh = frame.height().max(1) as usize;
        let mut cells = Vec::with_capacity(size * size);

        for gy in 0..size {
            // Pixel block covered by this grid row.
            let y0 = gy * fh / size;
            let y1 = (((gy + 1) * fh) / size).max(y0 + 1);
            for gx in 0..size {
                let x0 = gx * fw / size;
                let x1 = (((gx + 1) * fw) / size).max(x0 + 1);

                let mut r_sum = 0.0;
                let mut g_sum = 0.0;
                let mut b_sum = 0.0;
                for y in y0..y1 {
                    for x in x0..x1 {
                        let (r, g, b) = frame.rgb_at(x as u32, y as u32);
                        r_sum += r as f64;
                        g_sum += g as f64;
                        b_sum += b as f64;
                    }
                }
                let n = ((y1 - y0) * (x1 - x0)) as f64;
                let luma = (LUMA_R * r_sum + LUMA_G * g_sum + LUMA_B * b_sum) / (n * 255.0);
                cells.push(luma.clamp(0.0, 1.0));
            }
        }

        Self { size, cells }
    }

    /// Grid side length.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Intensity at the given cell.
    #[inline]
    pub fn at(&self, x: usize, y: usize) -> f64 {
        self.cells[y * self.size + x]
    }

    /// Flat cell slice, row-major.
    #[inline]
    pub fn cells(&self) -> &[f64] {
        &self.cells
    }
}
