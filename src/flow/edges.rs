//! Gradient-magnitude edge weighting.
//!
//! Flat regions (a face filling a low-res camera, a blank wall) carry
//! no usable motion signal and would drag the flow estimate toward
//! zero or noise. The edge map biases estimation toward textured
//! cells by weighting each cell with its Sobel gradient magnitude and
//! discarding cells below a hard threshold.

use super::grid::GrayGrid;

/// Default minimum gradient magnitude for a cell to participate.
pub const DEFAULT_EDGE_THRESHOLD: f64 = 0.05;

/// Per-cell non-negative gradient weights, same dimensions as the grid.
///
/// Border cells are always zero: the 3×3 kernel is only evaluated on
/// interior cells, skipping a 1-cell border.
#[derive(Debug, Clone)]
pub struct EdgeMap {
    size: usize,
    weights: Vec<f64>,
}

impl EdgeMap {
    /// Computes the edge map of a grid with the default threshold.
    pub fn compute(grid: &GrayGrid) -> Self {
        Self::compute_with_threshold(grid, DEFAULT_EDGE_THRESHOLD)
    }

    /// Computes the edge map, zeroing cells whose gradient magnitude
    /// falls below `threshold`.
    pub fn compute_with_threshold(grid: &GrayGrid, threshold: f64) -> Self {
        let size = grid.size();
        let mut weights = vec![0.0; size * size];

        if size >= 3 {
            for y in 1..size - 1 {
                for x in 1..size - 1 {
                    // Sobel 3x3.
                    let gx = -grid.at(x - 1, y - 1) + grid.at(x + 1, y - 1)
                        - 2.0 * grid.at(x - 1, y)
                        + 2.0 * grid.at(x + 1, y)
                        - grid.at(x - 1, y + 1)
                        + grid.at(x + 1, y + 1);
                    let gy = -grid.at(x - 1, y - 1) - 2.0 * grid.at(x, y - 1)
                        - grid.at(x + 1, y - 1)
                        + grid.at(x - 1, y + 1)
                        + 2.0 * grid.at(x, y + 1)
                        + grid.at(x + 1, y + 1);

                    let magnitude = (gx * gx + gy * gy).sqrt();
                    if magnitude >= threshold {
                        weights[y * size + x] = magnitude;
                    }
                }
            }
        }

        Self { size, weights }
    }

    /// Grid side length.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Weight at the given cell (zero for excluded cells).
    #[inline]
    pub fn at(&self, x: usize, y: usize) -> f64 {
        self.weights[y * self.size + x]
    }

    /// Sum of all weights; zero means the frame has no usable texture.
    pub fn total_weight(&self) -> f64 {
        self.weights.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_grid(size: usize, value: f64) -> GrayGrid {
        GrayGrid::from_cells(size, vec![value; size * size])
    }

    fn step_grid(size: usize) -> GrayGrid {
        // Left half dark, right half bright: one vertical edge.
        let cells = (0..size * size)
            .map(|i| if i % size < size / 2 { 0.0 } else { 1.0 })
            .collect();
        GrayGrid::from_cells(size, cells)
    }

    #[test]
    fn test_flat_grid_all_zero() {
        let map = EdgeMap::compute(&flat_grid(8, 0.5));
        assert_eq!(map.total_weight(), 0.0);
    }

    #[test]
    fn test_step_edge_detected() {
        let map = EdgeMap::compute(&step_grid(8));
        assert!(map.total_weight() > 0.0);

        // The boundary column carries weight; far-from-edge interior
        // cells carry none.
        assert!(map.at(4, 4) > 0.0 || map.at(3, 4) > 0.0);
        assert_eq!(map.at(1, 4), 0.0);
        assert_eq!(map.at(6, 4), 0.0);
    }

    #[test]
    fn test_border_always_zero() {
        let map = EdgeMap::compute(&step_grid(8));
        for i in 0..8 {
            assert_eq!(map.at(i, 0), 0.0);
            assert_eq!(map.at(i, 7), 0.0);
            assert_eq!(map.at(0, i), 0.0);
            assert_eq!(map.at(7, i), 0.0);
        }
    }

    #[test]
    fn test_threshold_excludes_faint_texture() {
        // A very shallow ramp: gradients exist but stay tiny.
        let size = 8;
        let cells = (0..size * size)
            .map(|i| (i % size) as f64 * 0.001)
            .collect();
        let grid = GrayGrid::from_cells(size, cells);

        let strict = EdgeMap::compute_with_threshold(&grid, 0.05);
        let lax = EdgeMap::compute_with_threshold(&grid, 0.0);

        assert_eq!(strict.total_weight(), 0.0);
        assert!(lax.total_weight() > 0.0);
    }

    #[test]
    fn test_tiny_grid_defined() {
        let map = EdgeMap::compute(&flat_grid(2, 0.3));
        assert_eq!(map.total_weight(), 0.0);
    }
}
