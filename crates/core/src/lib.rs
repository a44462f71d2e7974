//! Heat Simulation Core Library
//!
//! Simulates 2D heat diffusion on a square grid with fixed fire hotspots and
//! cold walls, using Jacobi-style relaxation over two ping-pong buffers.
//!
//! ## Components
//!
//! - [`grid`]: temperature buffers, fire mask and wall enforcement
//! - [`solver`]: the parallel stencil loop on a fixed-size rayon pool
//! - [`render`]: display-only downsampling and colour mapping
//! - [`telemetry`]: per-iteration timing and run summaries

pub mod config;
pub mod error;
pub mod grid;
pub mod render;
pub mod solver;
pub mod telemetry;

// Re-export core types
pub use config::{SimulationConfig, FIRE_SIZE, FIRE_TEMP, WALL_TEMP};
pub use error::SimError;
pub use grid::{FireMask, TemperatureField};
pub use render::{
    ColorRamp, DownsampleRenderer, PixelBuffer, RenderObserver, Renderer, DEFAULT_RESOLUTION,
};
pub use solver::{IterationObserver, IterationReport, SolverState, StencilSolver};
pub use telemetry::{IterationTimer, ProfilerScope, RunSummary};
