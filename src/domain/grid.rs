// Grid geometry - maps logical (row, column) cells to pixel sample points
use serde::Deserialize;

use crate::domain::color::ColorMask;
use crate::error::WatchError;

/// One 12-hour block of the chart: its vertical span as fractions of image
/// height, and the hour its first column starts at.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct BlockSpec {
    pub y_start: f64,
    pub y_end: f64,
    pub hour_offset: f64,
}

/// Where the logical grid sits inside the image. The chart carries no
/// explicit grid, so all boundaries are fixed fractions of the image
/// dimensions, calibrated per deployment and validated at startup. Blocks
/// are listed in chronological order.
#[derive(Debug, Clone, Deserialize)]
pub struct GridSpec {
    pub row_count: usize,
    pub target_row: usize,
    pub columns_per_block: usize,
    pub x_start: f64,
    pub x_end: f64,
    pub blocks: Vec<BlockSpec>,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            row_count: 12,
            target_row: 6,
            columns_per_block: 24,
            x_start: 0.096,
            x_end: 0.992,
            blocks: vec![
                BlockSpec {
                    y_start: 0.19,
                    y_end: 0.51,
                    hour_offset: 0.0,
                },
                BlockSpec {
                    y_start: 0.58,
                    y_end: 0.90,
                    hour_offset: 12.0,
                },
            ],
        }
    }
}

fn in_unit_range(fraction: f64) -> bool {
    fraction > 0.0 && fraction < 1.0
}

impl GridSpec {
    /// Reject geometry that cannot address any image: fractions must stay in
    /// (0, 1), spans must have positive extent and the target row must exist.
    pub fn validate(&self) -> Result<(), WatchError> {
        if self.row_count == 0 || self.columns_per_block == 0 {
            return Err(WatchError::Geometry(
                "row_count and columns_per_block must be positive".into(),
            ));
        }
        if self.target_row >= self.row_count {
            return Err(WatchError::Geometry(format!(
                "target_row {} outside of {} rows",
                self.target_row, self.row_count
            )));
        }
        if !in_unit_range(self.x_start) || !in_unit_range(self.x_end) || self.x_end <= self.x_start
        {
            return Err(WatchError::Geometry(format!(
                "x span {}..{} is not a valid fraction range",
                self.x_start, self.x_end
            )));
        }
        if self.blocks.is_empty() {
            return Err(WatchError::Geometry("no blocks configured".into()));
        }
        for block in &self.blocks {
            if !in_unit_range(block.y_start)
                || !in_unit_range(block.y_end)
                || block.y_end <= block.y_start
            {
                return Err(WatchError::Geometry(format!(
                    "block y span {}..{} is not a valid fraction range",
                    block.y_start, block.y_end
                )));
            }
        }
        Ok(())
    }

    /// Pixel sample points for `row` within one block: the vertical center of
    /// the row's band, paired with each column's horizontal center. Centers
    /// are sampled instead of edges since gridlines and anti-aliased
    /// boundary pixels are the least reliable places to read.
    pub fn sample_points(
        &self,
        block: &BlockSpec,
        width: u32,
        height: u32,
        row: usize,
    ) -> Vec<(u32, u32)> {
        let block_top = height as f64 * block.y_start;
        let block_height = height as f64 * (block.y_end - block.y_start);
        let row_height = block_height / self.row_count as f64;
        let y = (block_top + row as f64 * row_height + row_height / 2.0) as u32;

        let x_left = width as f64 * self.x_start;
        let span = width as f64 * (self.x_end - self.x_start);
        let column_width = span / self.columns_per_block as f64;
        (0..self.columns_per_block)
            .map(|column| {
                (
                    (x_left + column as f64 * column_width + column_width / 2.0) as u32,
                    y,
                )
            })
            .collect()
    }
}

/// One block's worth of samples for the target row, with the pixel
/// coordinates they were read at for debug annotation.
#[derive(Debug, Clone)]
pub struct BlockSamples {
    pub hour_offset: f64,
    pub slots: Vec<bool>,
    pub points: Vec<(u32, u32)>,
}

/// Sample the target row across every configured block, in block order.
/// `dims` is the analyzed image's (width, height); coordinates that fall
/// outside the mask read as non-outage.
pub fn sample_row(
    mask: &ColorMask,
    dims: (u32, u32),
    grid: &GridSpec,
    row: usize,
) -> Vec<BlockSamples> {
    let (width, height) = dims;
    grid.blocks
        .iter()
        .map(|block| {
            let points = grid.sample_points(block, width, height, row);
            let slots = points.iter().map(|&(x, y)| mask.get(x, y)).collect();
            BlockSamples {
                hour_offset: block.hour_offset,
                slots,
                points,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::color::{outage_mask, ColorBound};
    use image::{Rgb, RgbImage};

    fn small_spec() -> GridSpec {
        GridSpec {
            row_count: 4,
            target_row: 1,
            columns_per_block: 4,
            x_start: 0.1,
            x_end: 0.9,
            blocks: vec![BlockSpec {
                y_start: 0.2,
                y_end: 0.6,
                hour_offset: 0.0,
            }],
        }
    }

    #[test]
    fn test_default_spec_is_valid() {
        assert!(GridSpec::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_fractions() {
        let mut spec = GridSpec::default();
        spec.x_end = 1.2;
        assert!(spec.validate().is_err());

        let mut spec = GridSpec::default();
        spec.blocks[0].y_end = spec.blocks[0].y_start;
        assert!(spec.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_missing_target_row() {
        let mut spec = GridSpec::default();
        spec.target_row = spec.row_count;
        assert!(spec.validate().is_err());
    }

    #[test]
    fn test_sample_points_hit_cell_centers() {
        let spec = small_spec();
        let points = spec.sample_points(&spec.blocks[0], 100, 100, 1);
        // x span 10..90 in 4 columns of 20px, y band 20..60 in 4 rows of 10px
        assert_eq!(points, vec![(20, 35), (40, 35), (60, 35), (80, 35)]);
    }

    #[test]
    fn test_sample_row_reads_mask_values() {
        let spec = small_spec();
        let low = ColorBound {
            hue: 180.0,
            saturation: 0.31,
            value: 0.20,
        };
        let high = ColorBound {
            hue: 260.0,
            saturation: 1.0,
            value: 0.90,
        };

        let mut image = RgbImage::from_pixel(100, 100, Rgb([255, 255, 255]));
        image.put_pixel(40, 35, Rgb([40, 90, 200]));
        let mask = outage_mask(&image, &low, &high);

        let blocks = sample_row(&mask, (100, 100), &spec, 1);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].slots, vec![false, true, false, false]);
        assert_eq!(blocks[0].points.len(), 4);
    }

    #[test]
    fn test_sample_row_tolerates_out_of_bounds_points() {
        let spec = small_spec();
        let low = ColorBound {
            hue: 180.0,
            saturation: 0.31,
            value: 0.20,
        };
        let high = ColorBound {
            hue: 260.0,
            saturation: 1.0,
            value: 0.90,
        };

        // Mask far smaller than the claimed image dimensions; every sample
        // lands outside the mask and must read as non-outage.
        let image = RgbImage::from_pixel(8, 8, Rgb([40, 90, 200]));
        let mask = outage_mask(&image, &low, &high);

        let blocks = sample_row(&mask, (100, 100), &spec, 1);
        assert!(blocks[0].slots.iter().all(|&s| !s));
    }
}
