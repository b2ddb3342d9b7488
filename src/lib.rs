//! parcelplan - Generate conceptual subdivision layouts from property photos or survey bearings

pub mod config;
pub mod domain;
pub mod error;
pub mod geometry;
pub mod render;
pub mod segmentation;
pub mod subdivision;
