//! Fire region mask
//!
//! Two overlapping regions are marked as fire:
//! - an anisotropic ellipse `0.5a² + 0.8b² − 0.5ab < r1²` centred at `(size/2, size/2)`
//! - a circle `a² + b² < r2²` centred at `(size/3, size/3)`
//!
//! where `a`/`b` are the row/column offsets from the region centre,
//! `r1 = fire_size` and `r2 = fire_size × SECONDARY_FIRE_SCALE`.
//!
//! Both sides are compared in `f64` without truncation. When `r1²` is not an
//! integer (fractional `fire_size`), edge cells can differ from an ellipse
//! value that is rounded down to an integer before the comparison.

use crate::SimError;

/// Radius of the circular region relative to `fire_size`
pub const SECONDARY_FIRE_SCALE: f32 = 0.5;

/// Row-major boolean mask of cells pinned to the fire temperature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FireMask {
    cells: Vec<bool>,
    size: usize,
}

impl FireMask {
    /// Build the mask for a `size × size` grid
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] if `size²` overflows and
    /// [`SimError::Allocation`] if the buffer cannot be reserved.
    pub fn generate(size: usize, fire_size: f32) -> Result<Self, SimError> {
        let len = size
            .checked_mul(size)
            .ok_or_else(|| SimError::invalid("size", format!("{size} squared overflows")))?;

        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|source| SimError::Allocation {
                buffer: "fire mask",
                cells: len,
                source,
            })?;
        cells.resize(len, false);

        let mut mask = Self { cells, size };
        mask.regenerate(fire_size);
        Ok(mask)
    }

    /// Recompute the mask in place, fully overwriting the previous contents
    pub fn regenerate(&mut self, fire_size: f32) {
        self.cells.fill(false);

        let size = self.size;
        let primary_r2 = f64::from(fire_size) * f64::from(fire_size);
        let secondary_radius = f64::from(fire_size * SECONDARY_FIRE_SCALE);
        let secondary_r2 = secondary_radius * secondary_radius;

        let primary_center = (size / 2) as i64;
        let secondary_center = (size / 3) as i64;

        for row in 0..size {
            for col in 0..size {
                let (i, j) = (row as i64, col as i64);
                let in_primary = in_ellipse(i - primary_center, j - primary_center, primary_r2);
                let in_secondary =
                    in_circle(i - secondary_center, j - secondary_center, secondary_r2);
                if in_primary || in_secondary {
                    self.cells[row * size + col] = true;
                }
            }
        }
    }

    /// Whether the cell at linear index `idx` is fire
    #[inline]
    pub fn is_fire(&self, idx: usize) -> bool {
        self.cells[idx]
    }

    /// Number of fire cells
    pub fn fire_cells(&self) -> usize {
        self.cells.iter().filter(|&&fire| fire).count()
    }

    /// Grid edge length in cells
    pub fn size(&self) -> usize {
        self.size
    }

    /// Raw mask in row-major order
    pub fn as_slice(&self) -> &[bool] {
        &self.cells
    }
}

/// Primary region test: `0.5a² + 0.8b² − 0.5ab < r²`
#[inline]
pub fn in_ellipse(a: i64, b: i64, r2: f64) -> bool {
    let (a, b) = (a as f64, b as f64);
    0.5 * a * a + 0.8 * b * b - 0.5 * a * b < r2
}

/// Secondary region test: `a² + b² < r²`
#[inline]
pub fn in_circle(a: i64, b: i64, r2: f64) -> bool {
    ((a * a + b * b) as f64) < r2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_fire_size_is_empty() {
        let mask = FireMask::generate(16, 0.0).unwrap();
        assert_eq!(mask.fire_cells(), 0);
    }

    #[test]
    fn test_centres_are_fire() {
        let size = 30;
        let mask = FireMask::generate(size, 2.0).unwrap();
        assert!(mask.is_fire((size / 2) * size + size / 2));
        assert!(mask.is_fire((size / 3) * size + size / 3));
        // Far corner is outside both regions
        assert!(!mask.is_fire(size * size - 1));
    }

    #[test]
    fn test_ellipse_is_anisotropic() {
        // Along the row axis b = 0: 0.5a² < 9 → |a| ≤ 4
        assert!(in_ellipse(4, 0, 9.0));
        assert!(!in_ellipse(5, 0, 9.0));
        // Along the column axis a = 0: 0.8b² < 9 → |b| ≤ 3
        assert!(in_ellipse(0, 3, 9.0));
        assert!(!in_ellipse(0, 4, 9.0));
    }

    #[test]
    fn test_fractional_radius_compares_exactly() {
        // r1 = 2.5: 6.8 is outside even though it truncates to 6 < 6.25
        assert!(!in_ellipse(3, -1, 6.25));
        assert!(in_ellipse(2, 3, 6.25));

        let size = 40;
        let mask = FireMask::generate(size, 2.5).unwrap();
        let centre = size / 2;
        assert!(!mask.is_fire((centre + 3) * size + centre - 1));
        assert!(mask.is_fire((centre + 2) * size + centre + 3));
    }

    #[test]
    fn test_circle_boundary_is_exclusive() {
        assert!(in_circle(3, 0, 16.0));
        assert!(!in_circle(4, 0, 16.0));
        assert!(!in_circle(0, 0, 0.0));
    }

    #[test]
    fn test_regenerate_overwrites() {
        let mut mask = FireMask::generate(20, 6.0).unwrap();
        assert!(mask.fire_cells() > 0);
        mask.regenerate(0.0);
        assert_eq!(mask.fire_cells(), 0);
        mask.regenerate(6.0);
        assert_eq!(mask, FireMask::generate(20, 6.0).unwrap());
    }

    #[test]
    fn test_large_fire_covers_small_grid() {
        let mask = FireMask::generate(5, 100.0).unwrap();
        assert_eq!(mask.fire_cells(), 25);
    }
}
