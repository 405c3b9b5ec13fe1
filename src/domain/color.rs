// Color classification - HSV thresholding of the outage fill color
use image::RgbImage;
use serde::Deserialize;

/// One end of an HSV threshold range: hue in degrees [0, 360), saturation
/// and value in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ColorBound {
    pub hue: f32,
    pub saturation: f32,
    pub value: f32,
}

/// Boolean grid with the same shape as the image it derives from. `true`
/// at (x, y) means the pixel sits inside the calibrated outage-color range.
#[derive(Debug, Clone)]
pub struct ColorMask {
    width: u32,
    height: u32,
    data: Vec<bool>,
}

impl ColorMask {
    /// Out-of-bounds coordinates read as non-outage rather than panicking;
    /// sampling geometry may land past the edge of a narrow crop.
    pub fn get(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.data[(y * self.width + x) as usize]
    }
}

/// Convert an sRGB byte triple to HSV: hue in degrees [0, 360), saturation
/// and value in [0, 1]. Achromatic pixels get hue 0 and saturation 0.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (f32, f32, f32) {
    let r = r as f32 / 255.0;
    let g = g as f32 / 255.0;
    let b = b as f32 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let hue = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * (((g - b) / delta).rem_euclid(6.0))
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };

    let saturation = if max == 0.0 { 0.0 } else { delta / max };

    (hue, saturation, max)
}

/// Classify every pixel of `image` against the `[low, high]` HSV range.
///
/// Thresholding happens in HSV rather than raw RGB: the fill color keeps a
/// stable hue through compression artifacts and anti-aliased cell borders,
/// while its RGB components drift. The hue range is tight, saturation and
/// value deliberately loose, so background, gridlines and text all fall
/// outside it.
pub fn outage_mask(image: &RgbImage, low: &ColorBound, high: &ColorBound) -> ColorMask {
    let (width, height) = image.dimensions();
    let mut data = Vec::with_capacity((width as usize) * (height as usize));
    for pixel in image.pixels() {
        let [r, g, b] = pixel.0;
        let (h, s, v) = rgb_to_hsv(r, g, b);
        data.push(
            h >= low.hue
                && h <= high.hue
                && s >= low.saturation
                && s <= high.saturation
                && v >= low.value
                && v <= high.value,
        );
    }
    ColorMask {
        width,
        height,
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn bounds() -> (ColorBound, ColorBound) {
        (
            ColorBound {
                hue: 180.0,
                saturation: 0.31,
                value: 0.20,
            },
            ColorBound {
                hue: 260.0,
                saturation: 1.0,
                value: 0.90,
            },
        )
    }

    #[test]
    fn test_hsv_primaries() {
        let (h, s, v) = rgb_to_hsv(255, 0, 0);
        assert_eq!((h, s, v), (0.0, 1.0, 1.0));

        let (h, s, v) = rgb_to_hsv(0, 255, 0);
        assert_eq!((h, s, v), (120.0, 1.0, 1.0));

        let (h, s, v) = rgb_to_hsv(0, 0, 255);
        assert_eq!((h, s, v), (240.0, 1.0, 1.0));
    }

    #[test]
    fn test_hsv_achromatic() {
        let (h, s, v) = rgb_to_hsv(255, 255, 255);
        assert_eq!((h, s), (0.0, 0.0));
        assert_eq!(v, 1.0);

        let (_, s, v) = rgb_to_hsv(0, 0, 0);
        assert_eq!((s, v), (0.0, 0.0));
    }

    #[test]
    fn test_mask_classifies_fill_color_only() {
        let (low, high) = bounds();
        let mut image = RgbImage::from_pixel(3, 1, Rgb([255, 255, 255]));
        image.put_pixel(1, 0, Rgb([40, 90, 200])); // the chart's saturated blue

        let mask = outage_mask(&image, &low, &high);
        assert!(!mask.get(0, 0));
        assert!(mask.get(1, 0));
        assert!(!mask.get(2, 0));
    }

    #[test]
    fn test_mask_out_of_bounds_is_false() {
        let (low, high) = bounds();
        let image = RgbImage::from_pixel(2, 2, Rgb([40, 90, 200]));
        let mask = outage_mask(&image, &low, &high);
        assert!(mask.get(1, 1));
        assert!(!mask.get(2, 0));
        assert!(!mask.get(0, 2));
    }
}
