//! PNG line plots with fixed clinical axes.

use crate::defaults;
use crate::error::{CtgError, Result};
use crate::plot::{Visualizer, image_name, reset_dir};
use crate::signal::Recording;
use image::{Rgb, RgbImage};
use std::path::PathBuf;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const GRID: Rgb<u8> = Rgb([220, 220, 220]);
const TRACE: Rgb<u8> = Rgb([31, 119, 180]);

/// Renders x vs y on axes x `0..=2500`, y `50..=200` with a light grid.
#[derive(Debug, Clone)]
pub struct PngPlotter {
    output_dir: PathBuf,
    width: u32,
    height: u32,
}

impl PngPlotter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            width: defaults::PLOT_WIDTH,
            height: defaults::PLOT_HEIGHT,
        }
    }

    /// Overrides the canvas size. Both sides are clamped to at least 2 pixels.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width.max(2);
        self.height = height.max(2);
        self
    }

    pub fn output_dir(&self) -> &std::path::Path {
        &self.output_dir
    }

    /// Maps data coordinates to a pixel, or `None` outside the axes.
    fn to_pixel(&self, x: f64, y: f64) -> Option<(i64, i64)> {
        let x_range = 0.0..=defaults::PLOT_X_MAX;
        let y_range = defaults::PLOT_Y_MIN..=defaults::PLOT_Y_MAX;
        if !x_range.contains(&x) || !y_range.contains(&y) {
            return None;
        }
        let w = f64::from(self.width - 1);
        let h = f64::from(self.height - 1);
        let px = x / defaults::PLOT_X_MAX * w;
        let py = h - (y - defaults::PLOT_Y_MIN) / (defaults::PLOT_Y_MAX - defaults::PLOT_Y_MIN) * h;
        Some((px.round() as i64, py.round() as i64))
    }

    fn draw_grid(&self, img: &mut RgbImage) {
        let mut x = 0.0;
        while x <= defaults::PLOT_X_MAX {
            if let Some((px, _)) = self.to_pixel(x, defaults::PLOT_Y_MIN) {
                for py in 0..self.height {
                    img.put_pixel(px as u32, py, GRID);
                }
            }
            x += defaults::PLOT_X_TICK;
        }

        let mut y = defaults::PLOT_Y_MIN;
        while y <= defaults::PLOT_Y_MAX {
            if let Some((_, py)) = self.to_pixel(0.0, y) {
                for px in 0..self.width {
                    img.put_pixel(px, py as u32, GRID);
                }
            }
            y += defaults::PLOT_Y_TICK;
        }
    }

    /// Bresenham line between two in-bounds pixels.
    fn draw_line(img: &mut RgbImage, from: (i64, i64), to: (i64, i64)) {
        let (mut x0, mut y0) = from;
        let (x1, y1) = to;
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            img.put_pixel(x0 as u32, y0 as u32, TRACE);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// Draws the recording onto a fresh canvas.
    pub fn draw(&self, recording: &Recording) -> RgbImage {
        let mut img = RgbImage::from_pixel(self.width, self.height, BACKGROUND);
        self.draw_grid(&mut img);

        let mut previous: Option<(i64, i64)> = None;
        for sample in recording.samples() {
            let current = self.to_pixel(sample.x, sample.value);
            match (previous, current) {
                (Some(a), Some(b)) => Self::draw_line(&mut img, a, b),
                (None, Some(b)) => Self::draw_line(&mut img, b, b),
                _ => {}
            }
            previous = current;
        }
        img
    }
}

impl Visualizer for PngPlotter {
    fn prepare(&self) -> Result<()> {
        reset_dir(&self.output_dir)
    }

    fn render(&self, name: &str, recording: &Recording) -> Result<PathBuf> {
        let path = self.output_dir.join(image_name(name));
        self.draw(recording).save(&path).map_err(|e| CtgError::Plot {
            message: format!("{}: {}", path.display(), e),
        })?;
        tracing::info!(file = name, image = %path.display(), "graph saved");
        Ok(path)
    }
}
