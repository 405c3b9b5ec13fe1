// Per-image schedule analysis pipeline
use image::{Rgb, RgbImage};

use crate::domain::color::{outage_mask, ColorBound};
use crate::domain::grid::{sample_row, BlockSamples, GridSpec};
use crate::domain::interval::{extract_row, OutageInterval};

const LINE_COLOR: Rgb<u8> = Rgb([0, 200, 0]);
const DOT_COLOR: Rgb<u8> = Rgb([220, 40, 40]);
const DOT_RADIUS: i64 = 3;

/// Everything the rest of the run needs from one chart image: the extracted
/// intervals and an annotated copy showing where the row was read.
pub struct RowAnalysis {
    pub intervals: Vec<OutageInterval>,
    pub annotated: RgbImage,
}

/// Classifies the outage fill color, samples the target row at cell centers
/// and reduces the samples to merged intervals. Pure pixel work over one
/// calibration; construct once and reuse across images.
#[derive(Debug, Clone)]
pub struct ChartAnalyzer {
    low: ColorBound,
    high: ColorBound,
    grid: GridSpec,
}

impl ChartAnalyzer {
    pub fn new(low: ColorBound, high: ColorBound, grid: GridSpec) -> Self {
        Self { low, high, grid }
    }

    pub fn analyze(&self, image: &RgbImage) -> RowAnalysis {
        let mask = outage_mask(image, &self.low, &self.high);
        let blocks = sample_row(&mask, image.dimensions(), &self.grid, self.grid.target_row);
        let intervals = extract_row(&blocks);
        let annotated = annotate(image, &blocks);
        RowAnalysis {
            intervals,
            annotated,
        }
    }
}

/// Draw the sampling line and per-cell dots on a copy of the image so the
/// notification shows exactly where the row was read. The source image is
/// never touched.
fn annotate(image: &RgbImage, blocks: &[BlockSamples]) -> RgbImage {
    let mut canvas = image.clone();
    for block in blocks {
        if let Some(&(_, y)) = block.points.first() {
            draw_row_line(&mut canvas, y);
        }
        for &(x, y) in &block.points {
            draw_dot(&mut canvas, x, y);
        }
    }
    canvas
}

fn draw_row_line(canvas: &mut RgbImage, y: u32) {
    for offset in 0..2u32 {
        let row = y.saturating_add(offset);
        if row >= canvas.height() {
            continue;
        }
        for x in 0..canvas.width() {
            canvas.put_pixel(x, row, LINE_COLOR);
        }
    }
}

fn draw_dot(canvas: &mut RgbImage, center_x: u32, center_y: u32) {
    let (width, height) = canvas.dimensions();
    for dy in -DOT_RADIUS..=DOT_RADIUS {
        for dx in -DOT_RADIUS..=DOT_RADIUS {
            if dx * dx + dy * dy > DOT_RADIUS * DOT_RADIUS {
                continue;
            }
            let x = center_x as i64 + dx;
            let y = center_y as i64 + dy;
            if x >= 0 && y >= 0 && (x as u32) < width && (y as u32) < height {
                canvas.put_pixel(x as u32, y as u32, DOT_COLOR);
            }
        }
    }
}
