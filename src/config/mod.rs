use serde::Deserialize;
use std::path::PathBuf;

use crate::segmentation::SegmenterKind;
use crate::subdivision::SubdivisionStrategy;

/// Fixed pipeline limits.
///
/// The mask cleanup filter is deliberately non-adaptive: one opening and one
/// closing with the same square kernel, regardless of image size or content.
pub mod limits {
    /// Minimum number of land pixels a mask must contain before a
    /// subdivision is attempted.
    pub const MIN_MASK_PIXELS: usize = 10;

    /// Radius of the square morphological kernel (radius 2 = 5x5 kernel).
    pub const MORPH_KERNEL_RADIUS: u8 = 2;

    /// Default global intensity threshold: pixels darker than this count
    /// as land.
    pub const DEFAULT_THRESHOLD: u8 = 128;
}

fn default_lots() -> u32 {
    8
}
fn default_strategy() -> SubdivisionStrategy {
    SubdivisionStrategy::Grid
}
fn default_segmenter() -> SegmenterKind {
    SegmenterKind::Threshold
}
fn default_threshold() -> u8 {
    limits::DEFAULT_THRESHOLD
}
fn default_canvas() -> u32 {
    800
}
fn default_clean() -> bool {
    false
}
fn default_verbose() -> bool {
    false
}

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub image: Option<PathBuf>,
    #[serde(default)]
    pub sides: Option<String>,
    #[serde(default = "default_lots")]
    pub lots: u32,
    #[serde(default = "default_strategy")]
    pub strategy: SubdivisionStrategy,
    #[serde(default = "default_segmenter")]
    pub segmenter: SegmenterKind,
    #[serde(default = "default_threshold")]
    pub threshold: u8,
    #[serde(default = "default_clean")]
    pub clean: bool,
    #[serde(default)]
    pub model: Option<PathBuf>,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub mask_output: Option<PathBuf>,
    #[serde(default = "default_canvas")]
    pub canvas: u32,
    #[serde(default = "default_verbose")]
    pub verbose: bool,
}

impl FileConfig {
    pub fn load() -> Option<Self> {
        let config_paths = get_config_paths();

        for path in config_paths {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => return Some(config),
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config file {:?}: {}", path, e);
                    }
                }
            }
        }
        None
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("parcelplan.toml"));
    paths.push(PathBuf::from(".parcelplan.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("parcelplan").join("config.toml"));
        paths.push(config_dir.join("parcelplan.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".parcelplan.toml"));
        paths.push(home.join(".config").join("parcelplan").join("config.toml"));
    }

    paths
}
