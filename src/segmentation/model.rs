//! ONNX-backed automatic mask generation.
//!
//! The model is treated as an opaque collaborator: it receives a resized
//! RGB image and returns a stack of per-region confidence maps with no
//! guaranteed region count or determinism. All regions above the
//! confidence cutoff are unioned into a single binary land mask and
//! resampled back to the photo's dimensions.

use std::path::Path;
use std::sync::{Mutex, OnceLock};

use image::imageops::FilterType;
use image::{DynamicImage, GrayImage, Luma};
use ndarray::{Array4, CowArray};
use ort::{Environment, GraphOptimizationLevel, Session, SessionBuilder, Value};

use crate::domain::LandMask;
use crate::error::PlanError;

/// Input resolution expected by the mask model.
const MODEL_INPUT: u32 = 1024;

/// Confidence above which a model output pixel belongs to its region.
const MASK_CONFIDENCE: f32 = 0.5;

/// Process-wide model session: loaded once on first use and reused across
/// runs, never torn down. The mutex guards the session in case concurrent
/// callers are ever introduced; today there is exactly one caller per run.
static SESSION: OnceLock<Mutex<Session>> = OnceLock::new();

fn model_error(path: &Path, reason: impl ToString) -> PlanError {
    PlanError::Model {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

/// Fetch the shared model session, loading it on first use.
fn session(model_path: &Path) -> Result<&'static Mutex<Session>, PlanError> {
    if let Some(existing) = SESSION.get() {
        return Ok(existing);
    }

    let environment = Environment::builder()
        .with_name("parcelplan")
        .build()
        .map_err(|e| model_error(model_path, e))?
        .into_arc();

    let session = SessionBuilder::new(&environment)
        .map_err(|e| model_error(model_path, e))?
        .with_optimization_level(GraphOptimizationLevel::Level3)
        .map_err(|e| model_error(model_path, e))?
        .with_model_from_file(model_path)
        .map_err(|e| model_error(model_path, e))?;

    Ok(SESSION.get_or_init(|| Mutex::new(session)))
}

/// Run the mask model on the photo and union all returned region masks.
pub fn generate(image: &DynamicImage, model_path: &Path) -> Result<LandMask, PlanError> {
    let session = session(model_path)?;
    let session = session
        .lock()
        .map_err(|_| model_error(model_path, "model session mutex poisoned"))?;

    let input = preprocess(image).into_dyn();
    let input = CowArray::from(input);
    let input_value = Value::from_array(session.allocator(), &input)
        .map_err(|e| model_error(model_path, e))?;

    let outputs = session
        .run(vec![input_value])
        .map_err(|e| model_error(model_path, e))?;
    let output = outputs
        .into_iter()
        .next()
        .ok_or_else(|| model_error(model_path, "model returned no outputs"))?;

    let scores = output
        .try_extract::<f32>()
        .map_err(|e| model_error(model_path, e))?;
    let view = scores.view();
    let shape = view.shape().to_vec();
    if shape.len() != 4 || shape[1] != 1 {
        return Err(model_error(
            model_path,
            format!("unexpected model output shape {shape:?}, want [regions, 1, h, w]"),
        ));
    }

    // Union every region mask into one binary image at model resolution.
    let out_h = shape[2].min(MODEL_INPUT as usize);
    let out_w = shape[3].min(MODEL_INPUT as usize);
    let mut union = GrayImage::new(out_w as u32, out_h as u32);
    for region in 0..shape[0] {
        for y in 0..out_h {
            for x in 0..out_w {
                if view[[region, 0, y, x]] > MASK_CONFIDENCE {
                    union.put_pixel(x as u32, y as u32, Luma([255u8]));
                }
            }
        }
    }

    // Resample back to the photo's dimensions.
    let resized = image::imageops::resize(&union, image.width(), image.height(), FilterType::Nearest);
    Ok(LandMask::new(resized))
}

/// Resize to the model's input resolution and normalize to [0, 1] in
/// channels-first layout.
fn preprocess(image: &DynamicImage) -> Array4<f32> {
    let resized = image
        .resize_exact(MODEL_INPUT, MODEL_INPUT, FilterType::Lanczos3)
        .to_rgb8();

    let size = MODEL_INPUT as usize;
    let mut array = Array4::<f32>::zeros((1, 3, size, size));
    for (x, y, pixel) in resized.enumerate_pixels() {
        for channel in 0..3 {
            array[[0, channel, y as usize, x as usize]] = f32::from(pixel[channel]) / 255.0;
        }
    }
    array
}
