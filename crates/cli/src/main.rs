//! Heat Simulation CLI
//!
//! Runs the stencil solver for a fixed number of iterations and reports timing.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release -p heat-sim-cli -- 800 100 4
//! cargo run --release -p heat-sim-cli -- 200 500 8 --fire-size 25 --display
//! ```

mod terminal;

use anyhow::{Context, Result};
use clap::Parser;
use heat_sim_core::{
    DownsampleRenderer, IterationObserver, IterationReport, IterationTimer, PixelBuffer,
    RenderObserver, Renderer, RunSummary, SimulationConfig, StencilSolver, FIRE_SIZE, FIRE_TEMP,
    WALL_TEMP,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Heat distribution simulation with fire hotspots and cold walls
#[derive(Parser, Debug)]
#[command(name = "heat-sim")]
#[command(about = "2D heat distribution simulation", long_about = None)]
struct Args {
    /// Grid edge length in cells
    size: usize,

    /// Number of iterations to run
    iterations: usize,

    /// Number of worker threads
    threads: usize,

    /// Wall (boundary) temperature
    #[arg(long, default_value_t = WALL_TEMP, allow_negative_numbers = true)]
    wall_temp: f32,

    /// Fire temperature
    #[arg(long, default_value_t = FIRE_TEMP, allow_negative_numbers = true)]
    fire_temp: f32,

    /// Fire region size in cells (0 disables fire)
    #[arg(long, default_value_t = FIRE_SIZE)]
    fire_size: f32,

    /// Render the final grid to the terminal
    #[arg(short, long, conflicts_with = "json")]
    display: bool,

    /// Render every N iterations to the terminal
    #[arg(long, value_name = "N", conflicts_with = "json")]
    display_every: Option<usize>,

    /// Terminal display resolution in pixels
    #[arg(short, long, default_value_t = 40)]
    resolution: usize,

    /// Suppress per-iteration timing lines
    #[arg(short, long)]
    quiet: bool,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,
}

impl Args {
    fn config(&self) -> SimulationConfig {
        SimulationConfig::new(self.size, self.iterations, self.threads)
            .with_wall_temp(self.wall_temp)
            .with_fire_temp(self.fire_temp)
            .with_fire_size(self.fire_size)
    }
}

type FrameSink = fn(usize, &PixelBuffer);

/// Collects timings, prints progress and forwards frames to the display
struct Reporter {
    timer: IterationTimer,
    print_iterations: bool,
    frames: Option<RenderObserver<DownsampleRenderer, FrameSink>>,
}

impl IterationObserver for Reporter {
    fn on_iteration(&mut self, report: &IterationReport<'_>) {
        self.timer.on_iteration(report);
        if self.print_iterations {
            println!(
                "Iteration {}, elapsed time: {:.6}",
                report.iteration,
                report.elapsed.as_secs_f64()
            );
        }
        if let Some(frames) = &mut self.frames {
            frames.on_iteration(report);
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    config: &'a SimulationConfig,
    summary: RunSummary,
}

/// Pretty-printed JSON document with the configuration and run summary
fn summary_json(config: &SimulationConfig, summary: RunSummary) -> Result<String> {
    serde_json::to_string_pretty(&JsonReport { config, summary })
        .context("failed to encode the run summary")
}

fn init_tracing(quiet: bool) {
    let default = if quiet {
        "heat_sim_core=warn"
    } else {
        "heat_sim_core=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.quiet || args.json);

    let config = args.config();
    let mut solver = StencilSolver::new(config).context("failed to set up the simulation")?;

    let mut reporter = Reporter {
        timer: IterationTimer::new(),
        print_iterations: !args.quiet && !args.json,
        frames: args.display_every.map(|every| {
            RenderObserver::new(
                DownsampleRenderer::new(args.resolution, config.fire_temp),
                every,
                terminal::print_frame as FrameSink,
            )
        }),
    };

    solver.run_with(&mut reporter);
    tracing::info!("Simulation finished after {} iterations", solver.completed_iterations());

    if args.display {
        let mut renderer = DownsampleRenderer::new(args.resolution, config.fire_temp);
        terminal::print_frame(solver.completed_iterations(), renderer.render(solver.current()));
    }

    let summary = reporter.timer.summary();
    if args.json {
        println!("{}", summary_json(&config, summary)?);
    } else {
        println!("{summary}");
    }

    Ok(())
}
