use imageproc::distance_transform::Norm;
use imageproc::morphology::{close, open};

use crate::config::limits::MORPH_KERNEL_RADIUS;
use crate::domain::LandMask;

/// Clean speckle noise and small holes out of a mask.
///
/// One morphological opening (removes isolated foreground specks) followed
/// by one closing (fills small holes), both with the same fixed 5x5 square
/// kernel. Nothing here adapts to image size or content.
pub fn clean_mask(mask: &LandMask) -> LandMask {
    let opened = open(mask.image(), Norm::LInf, MORPH_KERNEL_RADIUS);
    let closed = close(&opened, Norm::LInf, MORPH_KERNEL_RADIUS);
    LandMask::new(closed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opening_removes_speckle() {
        // A solid block plus one isolated pixel far away.
        let mask = LandMask::from_fn(40, 40, |x, y| {
            ((5..25).contains(&x) && (5..25).contains(&y)) || (x == 35 && y == 35)
        });

        let cleaned = clean_mask(&mask);

        assert!(!cleaned.is_land(35, 35));
        // The block's interior survives.
        assert!(cleaned.is_land(15, 15));
    }

    #[test]
    fn test_closing_fills_small_hole() {
        // A solid block with a single-pixel hole at its center.
        let mask = LandMask::from_fn(40, 40, |x, y| {
            (5..25).contains(&x) && (5..25).contains(&y) && !(x == 15 && y == 15)
        });

        let cleaned = clean_mask(&mask);

        assert!(cleaned.is_land(15, 15));
    }

    #[test]
    fn test_clean_preserves_dimensions() {
        let mask = LandMask::from_fn(31, 17, |_, _| true);
        let cleaned = clean_mask(&mask);

        assert_eq!(cleaned.width(), 31);
        assert_eq!(cleaned.height(), 17);
    }

    #[test]
    fn test_empty_mask_stays_empty() {
        let mask = LandMask::from_fn(20, 20, |_, _| false);
        assert_eq!(clean_mask(&mask).foreground_count(), 0);
    }
}
