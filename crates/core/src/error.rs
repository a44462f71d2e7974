//! Error types for the heat simulation core
//!
//! Every error here is terminal: it is raised before the iteration loop starts
//! (configuration, allocation, worker pool) and the loop itself cannot fail.

use std::collections::TryReserveError;

use thiserror::Error;

/// Errors raised while setting up a simulation run
#[derive(Debug, Error)]
pub enum SimError {
    /// A configuration value is out of range.
    #[error("invalid configuration: {parameter} {reason}")]
    InvalidConfig {
        /// Name of the offending parameter (e.g. `"size"`, `"threads"`)
        parameter: &'static str,
        /// Description of the violated constraint
        reason: String,
    },

    /// A grid or mask buffer could not be allocated.
    #[error("failed to allocate {cells} cells for the {buffer} buffer")]
    Allocation {
        /// Which buffer failed (e.g. `"temperature"`, `"fire mask"`)
        buffer: &'static str,
        /// Requested number of cells
        cells: usize,
        /// Underlying allocator error
        #[source]
        source: TryReserveError,
    },

    /// The worker thread pool could not be started.
    #[error("failed to build a worker pool with {threads} threads")]
    ThreadPool {
        /// Requested worker count
        threads: usize,
        /// Underlying rayon error
        #[source]
        source: rayon::ThreadPoolBuildError,
    },
}

impl SimError {
    /// Create error for a parameter that must be strictly positive.
    ///
    /// # Arguments
    /// * `parameter` - The name of the parameter (e.g., `"size"`, `"iterations"`)
    /// * `value` - The rejected value
    pub fn non_positive(parameter: &'static str, value: usize) -> Self {
        Self::InvalidConfig {
            parameter,
            reason: format!("must be positive, got {value}"),
        }
    }

    /// Create error for a floating-point parameter that is not finite.
    pub fn non_finite(parameter: &'static str, value: f32) -> Self {
        Self::InvalidConfig {
            parameter,
            reason: format!("must be finite, got {value}"),
        }
    }

    /// Create error with a custom constraint message.
    pub fn invalid(parameter: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            parameter,
            reason: reason.into(),
        }
    }

    /// Whether this error was caused by the caller's configuration.
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::InvalidConfig { .. })
    }
}
