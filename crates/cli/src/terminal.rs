//! ANSI truecolor output for rendered frames
//!
//! Two pixel rows share one text line: the upper pixel is drawn as the
//! foreground of `▀`, the lower one as its background.

use heat_sim_core::PixelBuffer;

const UPPER_HALF_BLOCK: char = '▀';
const RESET: &str = "\x1b[0m";

/// Draw `pixels` as lines of coloured half blocks
pub fn draw(pixels: &PixelBuffer) -> String {
    let resolution = pixels.resolution();
    let mut out = String::with_capacity(resolution * resolution * 20);

    for row in (0..resolution).step_by(2) {
        for col in 0..resolution {
            let [r, g, b] = pixels.pixel(row, col);
            out.push_str(&format!("\x1b[38;2;{r};{g};{b}m"));
            if row + 1 < resolution {
                let [r, g, b] = pixels.pixel(row + 1, col);
                out.push_str(&format!("\x1b[48;2;{r};{g};{b}m"));
            }
            out.push(UPPER_HALF_BLOCK);
            out.push_str(RESET);
        }
        out.push('\n');
    }

    out
}

/// Print a frame with a header line
pub fn print_frame(iteration: usize, pixels: &PixelBuffer) {
    println!("Frame after iteration {iteration}:");
    print!("{}", draw(pixels));
}

#[cfg(test)]
mod tests {
    use super::*;
    use heat_sim_core::{DownsampleRenderer, Renderer, TemperatureField};

    #[test]
    fn test_draw_pairs_rows() {
        let field = TemperatureField::try_new(4, 0.0).unwrap();
        let mut renderer = DownsampleRenderer::new(4, 90.0);
        let text = draw(renderer.render(&field));

        assert_eq!(text.lines().count(), 2);
        assert_eq!(text.matches(UPPER_HALF_BLOCK).count(), 16);
        assert!(text.contains("\x1b[38;2;0;255;255m\x1b[48;2;0;255;255m"));
    }

    #[test]
    fn test_draw_single_pixel_exact() {
        let field = TemperatureField::try_new(1, 90.0).unwrap();
        let mut renderer = DownsampleRenderer::new(1, 90.0);
        assert_eq!(
            draw(renderer.render(&field)),
            "\x1b[38;2;255;0;0m\u{2580}\x1b[0m\n"
        );
    }

    #[test]
    fn test_draw_odd_resolution_has_no_background_on_last_row() {
        let field = TemperatureField::try_new(3, 90.0).unwrap();
        let mut renderer = DownsampleRenderer::new(3, 90.0);
        let text = draw(renderer.render(&field));

        let last = text.lines().last().unwrap();
        assert!(last.contains("\x1b[38;2;255;0;0m"));
        assert!(!last.contains("\x1b[48;2"));
    }
}
