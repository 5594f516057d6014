//! Optical flow estimation over downsampled camera frames.
//!
//! This module turns full camera frames into a single aggregate
//! displacement per tick. Three stages run on every frame:
//! grayscale downsampling onto a fixed tiny grid, Sobel edge
//! weighting, and an edge-weighted block-matching search against the
//! previous grid. Frames are discarded after the grid is extracted;
//! nothing image-like is retained beyond the previous grayscale grid.

mod block_match;
mod edges;
mod grid;

pub use block_match::{estimate, FlowParams, FlowSample};
pub use edges::{EdgeMap, DEFAULT_EDGE_THRESHOLD};
pub use grid::GrayGrid;

use crate::capture::RawFrame;

/// Per-frame optical flow estimator.
///
/// Holds the previous grayscale grid for differencing. The first
/// frame, and the first frame after any grid-size change, produce a
/// zero sample rather than an unstable estimate.
pub struct FlowEstimator {
    grid_size: usize,
    params: FlowParams,
    previous: Option<GrayGrid>,
}

impl FlowEstimator {
    /// Creates an estimator for the given grid size.
    pub fn new(grid_size: usize) -> Self {
        Self::with_params(grid_size, FlowParams::default())
    }

    /// Creates an estimator with custom search parameters.
    pub fn with_params(grid_size: usize, params: FlowParams) -> Self {
        Self {
            grid_size: grid_size.max(3),
            params,
            previous: None,
        }
    }

    /// Processes a frame and returns the flow sample for this tick.
    pub fn process(&mut self, frame: &RawFrame) -> FlowSample {
        let grid = GrayGrid::from_frame(frame, self.grid_size);

        let sample = match self.previous.as_ref() {
            Some(prev) if prev.size() == grid.size() => {
                let edges = EdgeMap::compute_with_threshold(&grid, self.params.edge_threshold);
                estimate(prev, &grid, &edges, &self.params)
            }
            // First frame, or a geometry change invalidated the
            // previous grid; re-prime and report no motion.
            _ => FlowSample::ZERO,
        };

        self.previous = Some(grid);
        sample
    }

    /// Changes the grid size; takes effect on the next frame.
    pub fn set_grid_size(&mut self, grid_size: usize) {
        let grid_size = grid_size.max(3);
        if grid_size != self.grid_size {
            self.grid_size = grid_size;
            self.previous = None;
        }
    }

    /// Drops the previous grid; the next frame re-primes.
    pub fn reset(&mut self) {
        self.previous = None;
    }

    /// Returns true once a previous grid is held.
    pub fn is_primed(&self) -> bool {
        self.previous.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Frame with a textured pattern drifted by `offset` pixels in x.
    fn textured_frame(w: u32, h: u32, offset: f64, seq: u64) -> RawFrame {
        let mut pixels = Vec::with_capacity((w * h * 3) as usize);
        for y in 0..h {
            for x in 0..w {
                let fx = x as f64 - offset;
                let v = ((fx * 0.35).sin() * (y as f64 * 0.35).sin() + 1.0) * 127.5;
                let v = v as u8;
                pixels.extend_from_slice(&[v, v, v]);
            }
        }
        RawFrame::new(pixels, w, h, seq)
    }

    #[test]
    fn test_first_frame_zero_sample() {
        let mut estimator = FlowEstimator::new(16);
        let frame = textured_frame(64, 64, 0.0, 1);

        assert_eq!(estimator.process(&frame), FlowSample::ZERO);
        assert!(estimator.is_primed());
    }

    #[test]
    fn test_identical_frames_zero_sample() {
        let mut estimator = FlowEstimator::new(16);
        let frame = textured_frame(64, 64, 0.0, 1);

        estimator.process(&frame);
        assert_eq!(estimator.process(&frame), FlowSample::ZERO);
    }

    #[test]
    fn test_drifting_pattern_detected() {
        let mut estimator = FlowEstimator::new(16);

        // 8 source pixels = 2 grid cells on a 64px → 16-cell grid.
        estimator.process(&textured_frame(64, 64, 0.0, 1));
        let sample = estimator.process(&textured_frame(64, 64, 8.0, 2));

        assert!(sample.dx > 0.0, "dx = {}", sample.dx);
    }

    #[test]
    fn test_resize_reprimes_without_error() {
        let mut estimator = FlowEstimator::new(16);
        estimator.process(&textured_frame(64, 64, 0.0, 1));

        estimator.set_grid_size(8);
        assert!(!estimator.is_primed());

        let sample = estimator.process(&textured_frame(64, 64, 8.0, 2));
        assert_eq!(sample, FlowSample::ZERO);
        assert!(estimator.is_primed());
    }

    #[test]
    fn test_reset_requires_new_prime() {
        let mut estimator = FlowEstimator::new(16);
        estimator.process(&textured_frame(64, 64, 0.0, 1));
        assert!(estimator.is_primed());

        estimator.reset();
        assert!(!estimator.is_primed());
    }
}
