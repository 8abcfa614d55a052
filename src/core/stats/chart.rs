//! Bar chart rendering for the size histogram.

use super::histogram::SizeHistogram;
use crate::error::ReportError;
use image::{ImageFormat, Rgb, RgbImage};
use std::path::Path;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const AXIS: Rgb<u8> = Rgb([40, 40, 40]);
const BAR: Rgb<u8> = Rgb([31, 119, 180]);
const MARGIN: u32 = 40;

/// Draw the histogram as a bar chart
pub fn render_histogram(hist: &SizeHistogram, width: u32, height: u32) -> RgbImage {
    let width = width.max(MARGIN * 2 + 1);
    let height = height.max(MARGIN * 2 + 1);
    let mut img = RgbImage::from_pixel(width, height, BACKGROUND);

    let plot_width = width - MARGIN * 2;
    let plot_height = height - MARGIN * 2;
    let baseline = height - MARGIN;

    // Axes
    for x in MARGIN..=(width - MARGIN) {
        img.put_pixel(x, baseline, AXIS);
    }
    for y in MARGIN..=baseline {
        img.put_pixel(MARGIN, y, AXIS);
    }

    let peak = hist.peak();
    if peak == 0 || hist.counts.is_empty() {
        return img;
    }

    let slot = plot_width as f64 / hist.counts.len() as f64;
    // Bars fill half their slot
    let bar_width = ((slot * 0.5).round() as u32).max(1);

    for (i, &count) in hist.counts.iter().enumerate() {
        if count == 0 {
            continue;
        }
        let bar_height = ((count as f64 / peak as f64) * plot_height as f64).round() as u32;
        let x0 = MARGIN + 1 + (slot * i as f64 + (slot - bar_width as f64) / 2.0) as u32;
        let x1 = (x0 + bar_width).min(width - MARGIN);
        let y0 = baseline.saturating_sub(bar_height).max(MARGIN);

        for x in x0..x1 {
            for y in y0..baseline {
                img.put_pixel(x, y, BAR);
            }
        }
    }

    img
}

/// Render the histogram and save it as PNG
pub fn save_histogram_png(
    hist: &SizeHistogram,
    path: &Path,
    width: u32,
    height: u32,
) -> Result<(), ReportError> {
    render_histogram(hist, width, height)
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| ReportError::SaveFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}
