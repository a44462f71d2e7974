//! Run configuration
//!
//! All parameters of a run live in [`SimulationConfig`], which is handed to
//! [`StencilSolver::new`](crate::StencilSolver::new). Validation happens before
//! any buffer is allocated.

use serde::{Deserialize, Serialize};

use crate::SimError;

/// Temperature enforced on the outer ring of the grid
pub const WALL_TEMP: f32 = 0.0;

/// Temperature enforced inside the fire regions
pub const FIRE_TEMP: f32 = 90.0;

/// Radius parameter of the primary (elliptical) fire region, in cells
pub const FIRE_SIZE: f32 = 100.0;

/// Parameters of a single simulation run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Grid edge length in cells (grid is `size × size`)
    pub size: usize,
    /// Number of stencil sweeps to perform
    pub iterations: usize,
    /// Worker threads for the data-parallel phases
    pub threads: usize,
    /// Boundary temperature
    pub wall_temp: f32,
    /// Fire region temperature
    pub fire_temp: f32,
    /// Fire region radius parameter; `0.0` disables fire
    pub fire_size: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            size: 800,
            iterations: 100,
            threads: 1,
            wall_temp: WALL_TEMP,
            fire_temp: FIRE_TEMP,
            fire_size: FIRE_SIZE,
        }
    }
}

impl SimulationConfig {
    /// Create a configuration with default temperatures and fire size
    pub fn new(size: usize, iterations: usize, threads: usize) -> Self {
        Self {
            size,
            iterations,
            threads,
            ..Self::default()
        }
    }

    /// Override the wall temperature
    pub fn with_wall_temp(mut self, wall_temp: f32) -> Self {
        self.wall_temp = wall_temp;
        self
    }

    /// Override the fire temperature
    pub fn with_fire_temp(mut self, fire_temp: f32) -> Self {
        self.fire_temp = fire_temp;
        self
    }

    /// Override the fire size (`0.0` disables fire)
    pub fn with_fire_size(mut self, fire_size: f32) -> Self {
        self.fire_size = fire_size;
        self
    }

    /// Total number of cells (`size²`)
    ///
    /// Only meaningful after [`validate`](Self::validate) succeeded.
    pub fn cell_count(&self) -> usize {
        self.size * self.size
    }

    /// Check every parameter before allocation
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] when `size`, `iterations` or
    /// `threads` is zero, when `size²` does not fit in `usize`, when a
    /// temperature is not finite, or when `fire_size` is negative or not finite.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.size == 0 {
            return Err(SimError::non_positive("size", self.size));
        }
        if self.iterations == 0 {
            return Err(SimError::non_positive("iterations", self.iterations));
        }
        if self.threads == 0 {
            return Err(SimError::non_positive("threads", self.threads));
        }
        if self.size.checked_mul(self.size).is_none() {
            return Err(SimError::invalid(
                "size",
                format!("{} squared overflows the addressable cell count", self.size),
            ));
        }
        if !self.wall_temp.is_finite() {
            return Err(SimError::non_finite("wall_temp", self.wall_temp));
        }
        if !self.fire_temp.is_finite() {
            return Err(SimError::non_finite("fire_temp", self.fire_temp));
        }
        if !self.fire_size.is_finite() {
            return Err(SimError::non_finite("fire_size", self.fire_size));
        }
        if self.fire_size < 0.0 {
            return Err(SimError::invalid(
                "fire_size",
                format!("must not be negative, got {}", self.fire_size),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.wall_temp, WALL_TEMP);
        assert_eq!(config.fire_temp, FIRE_TEMP);
        assert_eq!(config.fire_size, FIRE_SIZE);
    }

    #[test]
    fn test_zero_parameters_rejected() {
        for (config, name) in [
            (SimulationConfig::new(0, 10, 1), "size"),
            (SimulationConfig::new(10, 0, 1), "iterations"),
            (SimulationConfig::new(10, 10, 0), "threads"),
        ] {
            match config.validate() {
                Err(SimError::InvalidConfig { parameter, .. }) => assert_eq!(parameter, name),
                other => panic!("expected InvalidConfig for {name}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_overflowing_size_rejected() {
        let config = SimulationConfig::new(usize::MAX, 1, 1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_temperatures_rejected() {
        let base = SimulationConfig::new(8, 1, 1);
        assert!(base.with_wall_temp(f32::NAN).validate().is_err());
        assert!(base.with_fire_temp(f32::INFINITY).validate().is_err());
        assert!(base.with_fire_size(-1.0).validate().is_err());
        assert!(base.with_fire_size(0.0).validate().is_ok());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: SimulationConfig =
            serde_json::from_str(r#"{"size": 32, "iterations": 5}"#).unwrap();
        assert_eq!(config.size, 32);
        assert_eq!(config.iterations, 5);
        assert_eq!(config.threads, 1);
        assert_eq!(config.fire_temp, FIRE_TEMP);
    }
}
