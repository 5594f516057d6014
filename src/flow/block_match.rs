//! Coarse block-matching search between consecutive grids.
//!
//! This is a simplified block match minimizing absolute intensity
//! difference, not full correlation: at grid scale a single-cell
//! comparison is enough signal, and the cost stays
//! O(N²·r²/k²) for stride k and radius r.

use super::edges::EdgeMap;
use super::grid::GrayGrid;

/// Tuning parameters for the block-matching search.
#[derive(Debug, Clone)]
pub struct FlowParams {
    /// Process every k-th interior row/column (k >= 2 bounds cost).
    pub stride: usize,
    /// Search radius in cells around each sampled cell.
    pub radius: isize,
    /// Minimum gradient magnitude for a cell to participate.
    pub edge_threshold: f64,
    /// Minimum total edge weight for a frame to produce an estimate;
    /// below this the sample is zero (insufficient texture).
    pub min_total_weight: f64,
}

impl Default for FlowParams {
    fn default() -> Self {
        Self {
            stride: 2,
            radius: 3,
            edge_threshold: 0.05,
            min_total_weight: 0.5,
        }
    }
}

/// Weighted-average displacement between two frames, in units
/// normalized by the grid dimensions (not yet scaled by sensitivity).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FlowSample {
    /// Horizontal displacement, normalized by grid width.
    pub dx: f64,
    /// Vertical displacement, normalized by grid height.
    pub dy: f64,
}

impl FlowSample {
    /// The zero sample ("no detected motion").
    pub const ZERO: Self = Self { dx: 0.0, dy: 0.0 };
}

/// Match-quality tie tolerance; within it the smaller displacement wins.
const DIFF_EPSILON: f64 = 1e-9;

/// Estimates the displacement `prev` → `cur`.
///
/// Edge-weighted cells on the configured stride are matched against a
/// bounded neighborhood in the current grid; the result is the
/// weighted mean displacement. Returns [`FlowSample::ZERO`] when the
/// participating weight is below `min_total_weight`.
pub fn estimate(
    prev: &GrayGrid,
    cur: &GrayGrid,
    edges: &EdgeMap,
    params: &FlowParams,
) -> FlowSample {
    let size = cur.size();
    if size < 3 || prev.size() != size {
        return FlowSample::ZERO;
    }

    let stride = params.stride.max(1);
    let radius = params.radius.max(0);

    let mut sum_dx = 0.0;
    let mut sum_dy = 0.0;
    let mut sum_w = 0.0;

    for y in (1..size - 1).step_by(stride) {
        for x in (1..size - 1).step_by(stride) {
            let weight = edges.at(x, y);
            if weight <= 0.0 {
                continue;
            }

            let reference = prev.at(x, y);

            // Start from zero displacement; ambiguous matches resolve
            // toward no motion rather than an arbitrary direction.
            let mut best_dx = 0isize;
            let mut best_dy = 0isize;
            let mut best_diff = (cur.at(x, y) - reference).abs();
            let mut best_d2 = 0isize;

            for dy in -radius..=radius {
                let cy = y as isize + dy;
                if cy < 1 || cy >= (size - 1) as isize {
                    continue;
                }
                for dx in -radius..=radius {
                    let cx = x as isize + dx;
                    if cx < 1 || cx >= (size - 1) as isize {
                        continue;
                    }
                    let diff = (cur.at(cx as usize, cy as usize) - reference).abs();
                    let d2 = dx * dx + dy * dy;
                    let better = diff + DIFF_EPSILON < best_diff
                        || (diff < best_diff + DIFF_EPSILON && d2 < best_d2);
                    if better {
                        best_diff = diff;
                        best_dx = dx;
                        best_dy = dy;
                        best_d2 = d2;
                    }
                }
            }

            sum_dx += weight * best_dx as f64;
            sum_dy += weight * best_dy as f64;
            sum_w += weight;
        }
    }

    if sum_w < params.min_total_weight {
        tracing::trace!(total_weight = sum_w, "insufficient texture, zero flow");
        return FlowSample::ZERO;
    }

    FlowSample {
        dx: sum_dx / sum_w / size as f64,
        dy: sum_dy / sum_w / size as f64,
    }
}
