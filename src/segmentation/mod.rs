pub mod cleanup;
#[cfg(feature = "ml")]
pub mod model;
pub mod threshold;

pub use cleanup::clean_mask;
pub use threshold::threshold_mask;

use std::path::Path;

use clap::ValueEnum;
use image::DynamicImage;
use serde::Deserialize;

use crate::config::limits;
use crate::domain::LandMask;
use crate::error::PlanError;

/// Selects how the land mask is obtained from an input photo.
///
/// Neither strategy performs any land/building classification: "land" is
/// simply whatever pixels are dark (threshold) or segmented (model).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmenterKind {
    /// Grayscale the image and mark pixels darker than a fixed global
    /// intensity threshold.
    #[default]
    Threshold,
    /// Run a pretrained automatic-mask model on the RGB image and union
    /// its per-region masks. Requires a build with the `ml` feature and a
    /// model file.
    Model,
}

impl SegmenterKind {
    /// Produce a binary land mask with the same dimensions as the image.
    pub fn generate(
        self,
        image: &DynamicImage,
        threshold: u8,
        model_path: Option<&Path>,
    ) -> Result<LandMask, PlanError> {
        match self {
            Self::Threshold => Ok(threshold_mask(image, threshold)),
            #[cfg(feature = "ml")]
            Self::Model => {
                let path = model_path.ok_or(PlanError::ModelPathMissing)?;
                model::generate(image, path)
            }
            #[cfg(not(feature = "ml"))]
            Self::Model => {
                let _ = model_path;
                Err(PlanError::ModelUnavailable)
            }
        }
    }
}

/// Gate a mask before subdivision: fewer land pixels than the pipeline
/// minimum is a degenerate input, not a plan.
pub fn check_usable_land(mask: &LandMask) -> Result<(), PlanError> {
    let found = mask.foreground_count();
    if found < limits::MIN_MASK_PIXELS {
        return Err(PlanError::InsufficientLand {
            found,
            min: limits::MIN_MASK_PIXELS,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    #[test]
    fn test_threshold_kind_generates_mask() {
        let mut gray = GrayImage::new(4, 4);
        gray.put_pixel(1, 1, Luma([200u8]));
        let image = DynamicImage::ImageLuma8(gray);

        let mask = SegmenterKind::Threshold
            .generate(&image, 128, None)
            .unwrap();

        // Every pixel except the bright one is dark, hence land.
        assert_eq!(mask.foreground_count(), 15);
    }

    #[cfg(not(feature = "ml"))]
    #[test]
    fn test_model_kind_requires_ml_feature() {
        let image = DynamicImage::ImageLuma8(GrayImage::new(4, 4));
        assert!(matches!(
            SegmenterKind::Model.generate(&image, 128, None),
            Err(PlanError::ModelUnavailable)
        ));
    }

    #[test]
    fn test_default_is_threshold() {
        assert_eq!(SegmenterKind::default(), SegmenterKind::Threshold);
    }

    #[test]
    fn test_sparse_mask_fails_usable_land_check() {
        // Five land pixels: subdivision must be skipped for this mask.
        let mask = LandMask::from_fn(20, 20, |x, y| y == 3 && x < 5);

        assert!(matches!(
            check_usable_land(&mask),
            Err(PlanError::InsufficientLand { found: 5, min: 10 })
        ));
    }

    #[test]
    fn test_dense_mask_passes_usable_land_check() {
        let mask = LandMask::from_fn(20, 20, |x, y| x < 4 && y < 4);
        assert!(check_usable_land(&mask).is_ok());
    }
}
