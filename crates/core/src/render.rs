//! Temperature field rendering
//!
//! Converts a finished temperature buffer into a small RGB image for display:
//! - nearest-sample downsampling from `size²` cells to `resolution²` pixels
//! - temperature quantised to steps of 5 and mapped onto a red/cyan ramp
//!   (warmer = more red, less green/blue)
//!
//! Rendering only reads the field; nothing here feeds back into the solver.

use rayon::prelude::*;

use crate::grid::TemperatureField;
use crate::solver::{IterationObserver, IterationReport};

/// Default display edge length in pixels
pub const DEFAULT_RESOLUTION: usize = 800;

/// Temperature step used when quantising colours
const COLOR_STEP: i32 = 5;

/// Maps a temperature onto the display colour ramp
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorRamp {
    fire_temp: f32,
}

impl ColorRamp {
    /// Ramp where `fire_temp` maps to full red
    ///
    /// A non-positive `fire_temp` yields a flat ramp (every cell cyan).
    pub fn new(fire_temp: f32) -> Self {
        Self { fire_temp }
    }

    /// RGB colour for a temperature
    #[inline]
    pub fn color(&self, temp: f32) -> [u8; 3] {
        if self.fire_temp <= 0.0 {
            return [0, 255, 255];
        }
        let quantized = (temp as i32) / COLOR_STEP * COLOR_STEP;
        let level = (quantized as f32 * 255.0 / self.fire_temp).clamp(0.0, 255.0) as u8;
        [level, 255 - level, 255 - level]
    }
}

/// Square RGB image, row-major, 3 bytes per pixel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    resolution: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Black image of `resolution × resolution` pixels
    pub fn new(resolution: usize) -> Self {
        Self {
            resolution,
            data: vec![0; resolution * resolution * 3],
        }
    }

    /// Image edge length in pixels
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Colour of the pixel at `(row, col)`
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    pub fn pixel(&self, row: usize, col: usize) -> [u8; 3] {
        assert!(
            row < self.resolution && col < self.resolution,
            "Coordinates out of bounds"
        );
        let idx = (row * self.resolution + col) * 3;
        [self.data[idx], self.data[idx + 1], self.data[idx + 2]]
    }

    /// Raw RGB bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

/// Consumes a finished buffer and produces pixels
pub trait Renderer {
    /// Render `field`, returning the internal pixel buffer
    fn render(&mut self, field: &TemperatureField) -> &PixelBuffer;
}

/// Nearest-sample downsampling renderer
#[derive(Debug, Clone)]
pub struct DownsampleRenderer {
    ramp: ColorRamp,
    pixels: PixelBuffer,
}

impl DownsampleRenderer {
    /// Renderer producing `resolution²` pixels with the ramp topped at `fire_temp`
    pub fn new(resolution: usize, fire_temp: f32) -> Self {
        Self {
            ramp: ColorRamp::new(fire_temp),
            pixels: PixelBuffer::new(resolution),
        }
    }

    /// Colour ramp in use
    pub fn ramp(&self) -> ColorRamp {
        self.ramp
    }
}

impl Renderer for DownsampleRenderer {
    fn render(&mut self, field: &TemperatureField) -> &PixelBuffer {
        let size = field.size();
        let resolution = self.pixels.resolution;
        if size == 0 || resolution == 0 {
            return &self.pixels;
        }

        let factor = size as f32 / resolution as f32;
        let ramp = self.ramp;
        let src = field.as_slice();

        self.pixels
            .data
            .par_chunks_mut(3)
            .enumerate()
            .for_each(|(idx, pixel)| {
                let x = idx / resolution;
                let y = idx % resolution;
                let x_raw = ((x as f32 * factor) as usize).min(size - 1);
                let y_raw = ((y as f32 * factor) as usize).min(size - 1);
                pixel.copy_from_slice(&ramp.color(src[x_raw * size + y_raw]));
            });

        &self.pixels
    }
}

/// Observer that renders every `every`-th sweep and hands the pixels to a sink
pub struct RenderObserver<R, F> {
    renderer: R,
    every: usize,
    sink: F,
}

impl<R, F> RenderObserver<R, F>
where
    R: Renderer,
    F: FnMut(usize, &PixelBuffer),
{
    /// Render on sweeps divisible by `every` (`0` is treated as `1`)
    pub fn new(renderer: R, every: usize, sink: F) -> Self {
        Self {
            renderer,
            every: every.max(1),
            sink,
        }
    }

    /// Give back the wrapped renderer
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}

impl<R, F> IterationObserver for RenderObserver<R, F>
where
    R: Renderer,
    F: FnMut(usize, &PixelBuffer),
{
    fn on_iteration(&mut self, report: &IterationReport<'_>) {
        if report.iteration % self.every != 0 {
            return;
        }
        let pixels = self.renderer.render(report.field);
        (self.sink)(report.iteration, pixels);
    }
}
