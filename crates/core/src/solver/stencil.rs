//! Stencil kernels
//!
//! Implements the per-sweep phases on raw row-major slices:
//!
//! ```text
//! T'[i,j] = (T[i-1,j] + T[i+1,j] + T[i,j-1] + T[i,j+1]) / 4
//! ```
//!
//! followed by fire enforcement. Boundary cells are never written by the
//! diffusion phase; the caller pins them with `TemperatureField::apply_wall`
//! afterwards.
//!
//! Every destination index is written by exactly one task, so both phases run
//! on disjoint mutable chunks without any locking.

use rayon::prelude::*;

use crate::grid::{is_boundary, FireMask};

/// Mean of the four neighbours of an interior cell
///
/// Summation order is fixed (up, down, left, right) so every backend produces
/// bit-identical values.
#[inline(always)]
fn neighbor_mean(src: &[f32], idx: usize, size: usize) -> f32 {
    let up = src[idx - size];
    let down = src[idx + size];
    let left = src[idx - 1];
    let right = src[idx + 1];
    (up + down + left + right) / 4.0
}

/// Diffuse a single cell from `src` into `dst`
///
/// Boundary cells (and out-of-range indices) are left untouched.
pub fn update_cell(src: &[f32], dst: &mut [f32], idx: usize, size: usize) {
    if idx >= size * size || is_boundary(idx, size) {
        return;
    }
    dst[idx] = neighbor_mean(src, idx, size);
}

/// Force a single cell to `fire_temp` if it is part of the fire mask
pub fn apply_fire_cell(grid: &mut [f32], mask: &FireMask, idx: usize, fire_temp: f32) {
    if idx < grid.len() && mask.is_fire(idx) {
        grid[idx] = fire_temp;
    }
}

/// Diffusion phase over the whole grid, parallel over interior rows
///
/// Runs on the current rayon pool; returns once every row is written.
///
/// # Arguments
///
/// * `src` - Previous iteration (read-only)
/// * `dst` - Write target; boundary cells keep their old contents
/// * `size` - Grid edge length
pub fn diffuse(src: &[f32], dst: &mut [f32], size: usize) {
    debug_assert_eq!(src.len(), size * size);
    debug_assert_eq!(dst.len(), size * size);

    if size < 3 {
        return;
    }

    dst[size..(size - 1) * size]
        .par_chunks_mut(size)
        .enumerate()
        .for_each(|(r, row)| {
            // Interior block starts at grid row 1
            let i = r + 1;
            for j in 1..size - 1 {
                row[j] = neighbor_mean(src, i * size + j, size);
            }
        });
}

/// Fire phase over the whole grid, parallel over cells
pub fn apply_fire(dst: &mut [f32], mask: &FireMask, fire_temp: f32) {
    debug_assert_eq!(dst.len(), mask.as_slice().len());

    dst.par_iter_mut()
        .zip(mask.as_slice().par_iter())
        .for_each(|(cell, &fire)| {
            if fire {
                *cell = fire_temp;
            }
        });
}
