use image::{DynamicImage, GrayImage, Luma};

use crate::domain::LandMask;

/// Fixed global intensity threshold: pixels strictly darker than
/// `threshold` are marked as land.
pub fn threshold_mask(image: &DynamicImage, threshold: u8) -> LandMask {
    let gray = image.to_luma8();
    let mut mask = GrayImage::new(gray.width(), gray.height());

    for (x, y, pixel) in gray.enumerate_pixels() {
        if pixel[0] < threshold {
            mask.put_pixel(x, y, Luma([255u8]));
        }
    }

    LandMask::new(mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_image(width: u32, height: u32) -> DynamicImage {
        let gray = GrayImage::from_fn(width, height, |x, _| Luma([(x * 16) as u8]));
        DynamicImage::ImageLuma8(gray)
    }

    #[test]
    fn test_dark_pixels_become_land() {
        // Columns 0..8 have intensity < 128, columns 8..16 do not.
        let mask = threshold_mask(&gradient_image(16, 4), 128);

        assert_eq!(mask.foreground_count(), 8 * 4);
        assert!(mask.is_land(0, 0));
        assert!(mask.is_land(7, 3));
        assert!(!mask.is_land(8, 0));
        assert!(!mask.is_land(15, 3));
    }

    #[test]
    fn test_mask_matches_image_dimensions() {
        let mask = threshold_mask(&gradient_image(16, 9), 128);
        assert_eq!(mask.width(), 16);
        assert_eq!(mask.height(), 9);
    }

    #[test]
    fn test_threshold_zero_marks_nothing() {
        let mask = threshold_mask(&gradient_image(16, 4), 0);
        assert_eq!(mask.foreground_count(), 0);
    }
}
