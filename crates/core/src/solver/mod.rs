//! Stencil solver
//!
//! Runs the fixed-budget relaxation loop over two ping-pong temperature
//! buffers. Each sweep has three strictly ordered phases:
//!
//! 1. diffusion: every interior cell of `dst` becomes the mean of its four
//!    neighbours in `src` (parallel)
//! 2. fire: every fire-mask cell of `dst` is forced to `fire_temp` (parallel)
//! 3. wall: the outer ring of `dst` is forced to `wall_temp` (sequential)
//!
//! Sweep `t` writes buffer `t % 2` and reads the other one, so after `t`
//! sweeps the latest result lives in buffer `t % 2`.
//!
//! # Example
//!
//! ```rust
//! use heat_sim_core::{SimulationConfig, StencilSolver};
//!
//! let config = SimulationConfig::new(64, 10, 2).with_fire_size(8.0);
//! let mut solver = StencilSolver::new(config).unwrap();
//! let field = solver.run();
//! assert_eq!(field.get(0, 0), config.wall_temp);
//! ```

mod observer;
mod stencil;

// Re-exports
pub use observer::{IterationObserver, IterationReport};
pub use stencil::{apply_fire, apply_fire_cell, diffuse, update_cell};

use std::time::Instant;

use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, info};

use crate::grid::{FireMask, TemperatureField};
use crate::telemetry::ProfilerScope;
use crate::{SimError, SimulationConfig};

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolverState {
    /// Sweeps remain in the iteration budget
    Running,
    /// Exactly `iterations` sweeps have completed
    Done,
}

/// Double-buffered heat diffusion solver with a dedicated worker pool
pub struct StencilSolver {
    config: SimulationConfig,
    pool: ThreadPool,
    // Ping-pong buffers: sweep t writes buffers[t % 2]
    buffers: [TemperatureField; 2],
    mask: FireMask,
    completed: usize,
}

impl StencilSolver {
    /// Validate the configuration, allocate buffers and start the worker pool
    ///
    /// Both buffers are initialized to `wall_temp` and the fire mask is
    /// generated once here.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] for invalid parameters (checked
    /// before anything is allocated), [`SimError::Allocation`] if a buffer
    /// cannot be reserved and [`SimError::ThreadPool`] if the worker pool
    /// fails to start.
    pub fn new(config: SimulationConfig) -> Result<Self, SimError> {
        config.validate()?;

        let size = config.size;
        let mut front = TemperatureField::try_new(size, 0.0)?;
        let mut back = TemperatureField::try_new(size, 0.0)?;
        front.initialize(config.wall_temp);
        back.initialize(config.wall_temp);

        let mask = FireMask::generate(size, config.fire_size)?;

        let pool = ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .thread_name(|i| format!("heat-sim-worker-{i}"))
            .build()
            .map_err(|source| SimError::ThreadPool {
                threads: config.threads,
                source,
            })?;

        info!(
            "Stencil solver initialized: {}x{} grid, {} iterations, {} threads, {} fire cells",
            size,
            size,
            config.iterations,
            config.threads,
            mask.fire_cells()
        );

        Ok(Self {
            config,
            pool,
            buffers: [front, back],
            mask,
            completed: 0,
        })
    }

    /// Configuration this solver was built with
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Fire mask shared by every sweep
    pub fn fire_mask(&self) -> &FireMask {
        &self.mask
    }

    /// Number of sweeps completed so far
    pub fn completed_iterations(&self) -> usize {
        self.completed
    }

    /// Current lifecycle state
    pub fn state(&self) -> SolverState {
        if self.completed >= self.config.iterations {
            SolverState::Done
        } else {
            SolverState::Running
        }
    }

    /// Buffer written by the last completed sweep
    ///
    /// Before the first sweep this is the initialized (all wall temperature)
    /// buffer.
    pub fn current(&self) -> &TemperatureField {
        &self.buffers[self.completed % 2]
    }

    /// Consume the solver and return the latest buffer
    pub fn into_field(self) -> TemperatureField {
        let current = self.completed % 2;
        let [front, back] = self.buffers;
        if current == 0 {
            front
        } else {
            back
        }
    }

    /// Perform one sweep if the budget is not exhausted
    ///
    /// # Returns
    ///
    /// State after the call; once [`SolverState::Done`] further calls are no-ops.
    pub fn step(&mut self) -> SolverState {
        self.step_with(&mut ())
    }

    /// Perform one sweep and hand the finished buffer to `observer`
    pub fn step_with<O: IterationObserver + ?Sized>(&mut self, observer: &mut O) -> SolverState {
        if self.state() == SolverState::Done {
            return SolverState::Done;
        }

        let iteration = self.completed + 1;
        let start = Instant::now();
        self.sweep(iteration);
        let elapsed = start.elapsed();
        self.completed = iteration;

        debug!(
            iteration,
            elapsed_us = elapsed.as_micros() as u64,
            "sweep complete"
        );

        observer.on_iteration(&IterationReport {
            iteration,
            elapsed,
            field: self.current(),
        });

        self.state()
    }

    /// Run every remaining sweep and return the final buffer
    pub fn run(&mut self) -> &TemperatureField {
        self.run_with(&mut ())
    }

    /// Run every remaining sweep, notifying `observer` after each one
    pub fn run_with<O: IterationObserver + ?Sized>(
        &mut self,
        observer: &mut O,
    ) -> &TemperatureField {
        while self.step_with(observer) == SolverState::Running {}
        self.current()
    }

    /// One full sweep writing `buffers[iteration % 2]`
    fn sweep(&mut self, iteration: usize) {
        let size = self.config.size;
        let fire_temp = self.config.fire_temp;
        let wall_temp = self.config.wall_temp;
        let mask = &self.mask;

        let [a, b] = &mut self.buffers;
        let (src, dst) = if iteration % 2 == 1 {
            (&*a, b)
        } else {
            (&*b, a)
        };

        // Each parallel phase returns only after all of its chunks finished
        self.pool.install(|| {
            {
                let _scope = ProfilerScope::new("diffuse");
                diffuse(src.as_slice(), dst.as_mut_slice(), size);
            }
            let _scope = ProfilerScope::new("fire");
            apply_fire(dst.as_mut_slice(), mask, fire_temp);
        });

        // Wall overrides fire on the outer ring
        dst.apply_wall(wall_temp);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_config(size: usize, iterations: usize) -> SimulationConfig {
        SimulationConfig::new(size, iterations, 2)
            .with_wall_temp(25.0)
            .with_fire_size(0.0)
    }

    #[test]
    fn test_uniform_field_is_fixed_point() {
        let mut solver = StencilSolver::new(uniform_config(5, 1)).unwrap();
        let field = solver.run();
        assert!(field.as_slice().iter().all(|&v| v == 25.0));
        assert_eq!(solver.completed_iterations(), 1);
        assert_eq!(solver.state(), SolverState::Done);
    }

    #[test]
    fn test_no_sweep_yields_initialized_grid() {
        let solver = StencilSolver::new(SimulationConfig::new(10, 3, 1)).unwrap();
        assert_eq!(solver.state(), SolverState::Running);
        assert_eq!(solver.completed_iterations(), 0);
        assert_eq!(solver.current().len(), 100);
        assert!(solver
            .current()
            .as_slice()
            .iter()
            .all(|&v| v == solver.config().wall_temp));
    }

    #[test]
    fn test_step_alternates_buffers() {
        let config = SimulationConfig::new(16, 4, 1).with_fire_size(3.0);
        let mut solver = StencilSolver::new(config).unwrap();

        let initial = solver.current().as_slice().as_ptr();
        let mut previous = initial;
        for t in 1..=4 {
            solver.step();
            let latest = solver.current().as_slice().as_ptr();
            assert_ne!(latest, previous, "sweep {t} wrote its source buffer");
            // Even sweeps land back in the first buffer
            assert_eq!(latest == initial, t % 2 == 0);
            previous = latest;
        }
        assert_eq!(solver.state(), SolverState::Done);
    }

    #[test]
    fn test_step_after_done_is_noop() {
        let config = SimulationConfig::new(12, 2, 1).with_fire_size(2.0);
        let mut solver = StencilSolver::new(config).unwrap();
        solver.run();
        let snapshot = solver.current().clone();

        assert_eq!(solver.step(), SolverState::Done);
        assert_eq!(solver.completed_iterations(), 2);
        assert_eq!(solver.current(), &snapshot);
    }

    #[test]
    fn test_into_field_returns_latest_buffer() {
        let config = SimulationConfig::new(20, 3, 2).with_fire_size(4.0);
        let mut solver = StencilSolver::new(config).unwrap();
        let expected = solver.run().clone();
        assert_eq!(solver.into_field(), expected);
    }

    #[test]
    fn test_observer_sees_every_sweep() {
        struct Counter(Vec<usize>);
        impl IterationObserver for Counter {
            fn on_iteration(&mut self, report: &IterationReport<'_>) {
                self.0.push(report.iteration);
            }
        }

        let mut counter = Counter(Vec::new());
        let mut timer = crate::IterationTimer::new();
        let mut solver = StencilSolver::new(SimulationConfig::new(8, 5, 1)).unwrap();
        solver.run_with(&mut (&mut counter, &mut timer));
        assert_eq!(counter.0, vec![1, 2, 3, 4, 5]);
        assert_eq!(timer.durations().len(), 5);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = StencilSolver::new(SimulationConfig::new(10, 10, 0)).err();
        assert!(matches!(err, Some(SimError::InvalidConfig { parameter: "threads", .. })));
    }
}
