use std::path::PathBuf;

use thiserror::Error;

/// Domain failures surfaced by the planning pipeline.
///
/// Degenerate-input variants (`InsufficientLand`, `InvalidOutline`) are
/// non-fatal: the binary reports them as warnings and skips subdivision,
/// leaving any earlier output (raw image, exported mask) in place.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("too little usable land detected ({found} land pixels, need at least {min})")]
    InsufficientLand { found: usize, min: usize },

    #[error("parcel outline is not a valid closed polygon")]
    InvalidOutline,

    #[error("invalid side {spec:?}: {reason}")]
    InvalidSide { spec: String, reason: String },

    #[error("at least 3 sides are required to close a parcel outline, got {0}")]
    TooFewSides(usize),

    #[error("lot count must be at least 1")]
    ZeroLots,

    #[error("model segmentation requires a build with the `ml` feature enabled")]
    ModelUnavailable,

    #[error("model segmentation requires --model pointing at a model file")]
    ModelPathMissing,

    #[error("segmentation model failure ({path:?}): {reason}")]
    Model { path: PathBuf, reason: String },
}
