//! Square temperature field
//!
//! Stores the grid as a flat `Vec<f32>` in row-major order (`row * size + col`).

use crate::SimError;

/// Temperature buffer for a `size × size` grid
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureField {
    data: Vec<f32>,
    size: usize,
}

impl TemperatureField {
    /// Allocate a field with every cell set to `value`
    ///
    /// The allocation is fallible so that an oversized grid surfaces as an
    /// error instead of aborting the process.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] if `size²` overflows and
    /// [`SimError::Allocation`] if the buffer cannot be reserved.
    pub fn try_new(size: usize, value: f32) -> Result<Self, SimError> {
        let cells = size
            .checked_mul(size)
            .ok_or_else(|| SimError::invalid("size", format!("{size} squared overflows")))?;

        let mut data = Vec::new();
        data.try_reserve_exact(cells)
            .map_err(|source| SimError::Allocation {
                buffer: "temperature",
                cells,
                source,
            })?;
        data.resize(cells, value);

        Ok(Self { data, size })
    }

    /// Fill every cell with the wall temperature
    pub fn initialize(&mut self, wall_temp: f32) {
        self.data.fill(wall_temp);
    }

    /// Force the outermost ring (first/last row, first/last column) to `wall_temp`
    pub fn apply_wall(&mut self, wall_temp: f32) {
        let size = self.size;
        if size == 0 {
            return;
        }
        let len = self.data.len();
        self.data[..size].fill(wall_temp);
        self.data[len - size..].fill(wall_temp);
        for row in 1..size - 1 {
            self.data[row * size] = wall_temp;
            self.data[row * size + size - 1] = wall_temp;
        }
    }

    /// Grid edge length in cells
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the field has no cells
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether a linear index lies on the outer ring
    pub fn is_boundary(&self, idx: usize) -> bool {
        is_boundary(idx, self.size)
    }

    /// Get value at grid position
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    pub fn get(&self, row: usize, col: usize) -> f32 {
        assert!(
            row < self.size && col < self.size,
            "Coordinates out of bounds"
        );
        self.data[row * self.size + col]
    }

    /// Set value at grid position
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        assert!(
            row < self.size && col < self.size,
            "Coordinates out of bounds"
        );
        self.data[row * self.size + col] = value;
    }

    /// Get reference to field data
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Get mutable reference to field data
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }
}

/// Whether `idx` lies on the outer ring of a `size × size` grid
#[inline]
pub fn is_boundary(idx: usize, size: usize) -> bool {
    let row = idx / size;
    let col = idx % size;
    row == 0 || row == size - 1 || col == 0 || col == size - 1
}
