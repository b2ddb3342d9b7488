use image::{GrayImage, Luma};

/// Binary occupancy grid marking land pixels.
///
/// Same dimensions as the source image; 255 = land, 0 = background. Produced
/// once per run and never persisted.
#[derive(Debug, Clone)]
pub struct LandMask {
    pixels: GrayImage,
}

impl LandMask {
    pub fn new(pixels: GrayImage) -> Self {
        Self { pixels }
    }

    /// Build a mask from a per-pixel predicate. Mostly useful for tests and
    /// synthetic inputs.
    pub fn from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> bool) -> Self {
        let mut pixels = GrayImage::new(width, height);
        for y in 0..height {
            for x in 0..width {
                if f(x, y) {
                    pixels.put_pixel(x, y, Luma([255u8]));
                }
            }
        }
        Self { pixels }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn image(&self) -> &GrayImage {
        &self.pixels
    }

    pub fn into_image(self) -> GrayImage {
        self.pixels
    }

    /// Whether the pixel at (x, y) is marked as land.
    pub fn is_land(&self, x: u32, y: u32) -> bool {
        self.pixels.get_pixel(x, y)[0] > 0
    }

    /// Number of land pixels in the mask.
    pub fn foreground_count(&self) -> usize {
        self.pixels.pixels().filter(|p| p[0] > 0).count()
    }

    /// Coordinates of all land pixels as (x, y) pairs.
    pub fn foreground_coords(&self) -> Vec<(f64, f64)> {
        self.pixels
            .enumerate_pixels()
            .filter(|(_, _, p)| p[0] > 0)
            .map(|(x, y, _)| (f64::from(x), f64::from(y)))
            .collect()
    }
}
