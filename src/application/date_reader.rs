// Header date recognition
use std::sync::{Arc, LazyLock};

use chrono::NaiveDate;
use image::{GrayImage, RgbImage};
use regex::Regex;

use crate::application::text_recognizer::TextRecognizer;
use crate::error::WatchError;

static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{2})\.(\d{2})\.(\d{4})").unwrap());

/// Fraction of the image height the header band occupies.
const HEADER_HEIGHT: f64 = 0.15;
/// Fraction of the image width the header band occupies.
const HEADER_WIDTH: f64 = 0.50;

/// Reads the schedule date out of the chart's header region. The heavy
/// lifting (text extraction) is delegated to the recognizer seam; this type
/// owns the cropping, binarization and parsing around it.
pub struct DateReader {
    recognizer: Arc<dyn TextRecognizer>,
    language: String,
}

impl DateReader {
    pub fn new(recognizer: Arc<dyn TextRecognizer>, language: String) -> Self {
        Self {
            recognizer,
            language,
        }
    }

    /// The date printed in the chart header, or `DateNotFound` when the
    /// recognized text carries no valid `DD.MM.YYYY`. A missing date skips
    /// one image, never the run.
    pub async fn read_date(&self, image: &RgbImage) -> Result<NaiveDate, WatchError> {
        let header = binarize_header(image);
        let text = self
            .recognizer
            .recognize_text(&header, &self.language)
            .await?;
        tracing::debug!(text = %text.trim(), "header text recognized");
        parse_date(&text).ok_or(WatchError::DateNotFound)
    }
}

/// Crop the top-left header band, reduce it to grayscale and binarize with
/// an Otsu threshold picked from the intensity histogram. Header brightness
/// varies between source revisions, so a fixed threshold would drift.
fn binarize_header(image: &RgbImage) -> GrayImage {
    let (width, height) = image.dimensions();
    let crop_width = ((width as f64 * HEADER_WIDTH) as u32).clamp(1, width);
    let crop_height = ((height as f64 * HEADER_HEIGHT) as u32).clamp(1, height);

    let header = image::imageops::crop_imm(image, 0, 0, crop_width, crop_height).to_image();
    let mut gray = image::imageops::grayscale(&header);

    let threshold = otsu_threshold(gray.as_raw());
    tracing::debug!(threshold, "binarizing header");
    for pixel in gray.pixels_mut() {
        pixel.0[0] = if pixel.0[0] > threshold { 255 } else { 0 };
    }
    gray
}

/// Otsu's method: the threshold that maximizes between-class variance of the
/// intensity histogram.
fn otsu_threshold(pixels: &[u8]) -> u8 {
    let mut histogram = [0u32; 256];
    for &value in pixels {
        histogram[value as usize] += 1;
    }

    let total = pixels.len() as f64;
    let mut sum_total = 0.0;
    for (value, &count) in histogram.iter().enumerate() {
        sum_total += value as f64 * count as f64;
    }

    let mut sum_background = 0.0;
    let mut weight_background = 0.0;
    let mut best_variance = f64::MIN;
    let mut threshold = 0u8;

    for (value, &count) in histogram.iter().enumerate() {
        weight_background += count as f64;
        if weight_background == 0.0 {
            continue;
        }
        let weight_foreground = total - weight_background;
        if weight_foreground == 0.0 {
            break;
        }

        sum_background += value as f64 * count as f64;
        let mean_background = sum_background / weight_background;
        let mean_foreground = (sum_total - sum_background) / weight_foreground;
        let variance =
            weight_background * weight_foreground * (mean_background - mean_foreground).powi(2);

        if variance > best_variance {
            best_variance = variance;
            threshold = value as u8;
        }
    }

    threshold
}

/// First `DD.MM.YYYY` substring that forms a real calendar date.
fn parse_date(text: &str) -> Option<NaiveDate> {
    let captures = DATE_PATTERN.captures(text)?;
    let day = captures[1].parse().ok()?;
    let month = captures[2].parse().ok()?;
    let year = captures[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
