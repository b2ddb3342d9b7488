use std::path::Path;

use anyhow::{Context, Result};
use geo::{BoundingRect, LineString};
use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::draw_line_segment_mut;

use crate::domain::{LandMask, Lot, ParcelOutline};
use crate::geometry::{Bounds, Scaler};

const OUTLINE_COLOR: Rgb<u8> = Rgb([40, 90, 220]);
const LOT_COLOR: Rgb<u8> = Rgb([220, 40, 40]);

/// Margin kept around the parcel on survey diagrams, in pixels.
const SURVEY_MARGIN_PX: f64 = 40.0;

/// Render the image-pipeline diagram: the photo with everything outside
/// the land mask dimmed, the parcel hull in blue, and lot boundaries in
/// red. Mask pixel coordinates map 1:1 onto the photo.
pub fn render_image_plan(
    photo: &DynamicImage,
    mask: &LandMask,
    outline: &ParcelOutline,
    lots: &[Lot],
    path: &Path,
) -> Result<()> {
    let mut canvas = photo.to_rgb8();

    for (x, y, pixel) in canvas.enumerate_pixels_mut() {
        if !mask.is_land(x, y) {
            *pixel = Rgb([pixel[0] / 3, pixel[1] / 3, pixel[2] / 3]);
        }
    }

    let identity = |x: f64, y: f64| (x as f32, y as f32);
    for lot in lots {
        draw_lot(&mut canvas, lot, &identity);
    }
    draw_ring(&mut canvas, outline.polygon().exterior(), &identity, OUTLINE_COLOR);

    canvas
        .save(path)
        .with_context(|| format!("Failed to write diagram: {}", path.display()))
}

/// Render the survey-pipeline diagram on a white canvas, scaling the
/// parcel to fit with a fixed margin.
pub fn render_survey_plan(
    outline: &ParcelOutline,
    lots: &[Lot],
    canvas_px: u32,
    path: &Path,
) -> Result<()> {
    let rect = outline
        .polygon()
        .bounding_rect()
        .context("Parcel outline has no extent")?;
    let scaler = Scaler::from_bounds(&Bounds::from_rect(&rect), canvas_px, SURVEY_MARGIN_PX);

    let mut canvas = RgbImage::from_pixel(canvas_px, canvas_px, Rgb([255, 255, 255]));

    let map = |x: f64, y: f64| scaler.to_canvas(x, y);
    for lot in lots {
        draw_lot(&mut canvas, lot, &map);
    }
    draw_ring(&mut canvas, outline.polygon().exterior(), &map, OUTLINE_COLOR);

    canvas
        .save(path)
        .with_context(|| format!("Failed to write diagram: {}", path.display()))
}

/// Write the binary land mask as a grayscale PNG.
pub fn save_mask(mask: &LandMask, path: &Path) -> Result<()> {
    mask.image()
        .save(path)
        .with_context(|| format!("Failed to write mask: {}", path.display()))
}

fn draw_lot(canvas: &mut RgbImage, lot: &Lot, map: &impl Fn(f64, f64) -> (f32, f32)) {
    for polygon in &lot.geometry().0 {
        draw_ring(canvas, polygon.exterior(), map, LOT_COLOR);
    }
}

fn draw_ring(
    canvas: &mut RgbImage,
    ring: &LineString<f64>,
    map: &impl Fn(f64, f64) -> (f32, f32),
    color: Rgb<u8>,
) {
    for segment in ring.0.windows(2) {
        draw_line_segment_mut(
            canvas,
            map(segment[0].x, segment[0].y),
            map(segment[1].x, segment[1].y),
            color,
        );
    }
}
