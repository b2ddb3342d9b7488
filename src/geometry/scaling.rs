use geo::Rect;

/// Axis-aligned bounds in parcel coordinates (meters).
#[derive(Debug, Clone)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn from_rect(rect: &Rect<f64>) -> Self {
        Self {
            min_x: rect.min().x,
            max_x: rect.max().x,
            min_y: rect.min().y,
            max_y: rect.max().y,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Maps parcel coordinates (meters) to diagram canvas pixels.
///
/// The parcel is centered on a square canvas with a uniform scale, and the
/// y axis is flipped so that north (increasing y) points up on the image.
#[derive(Debug, Clone)]
pub struct Scaler {
    /// Scale factor: pixels per meter
    scale: f64,
    /// Offset to center the parcel
    offset_x: f64,
    offset_y: f64,
    /// Canvas edge length in pixels
    canvas_px: f64,
}

impl Scaler {
    /// Create a scaler fitting the bounds onto a square canvas with the
    /// given margin on every edge.
    pub fn from_bounds(bounds: &Bounds, canvas_px: u32, margin_px: f64) -> Self {
        let canvas_px = f64::from(canvas_px);
        let usable = canvas_px - 2.0 * margin_px;
        let max_dim = bounds.width().max(bounds.height());

        let scale = if max_dim > 0.0 { usable / max_dim } else { 1.0 };

        let scaled_width = bounds.width() * scale;
        let scaled_height = bounds.height() * scale;

        let offset_x = (canvas_px - scaled_width) / 2.0 - bounds.min_x * scale;
        let offset_y = (canvas_px - scaled_height) / 2.0 - bounds.min_y * scale;

        Self {
            scale,
            offset_x,
            offset_y,
            canvas_px,
        }
    }

    /// Map a point from meters to canvas pixels.
    pub fn to_canvas(&self, x: f64, y: f64) -> (f32, f32) {
        let px = x * self.scale + self.offset_x;
        let py = self.canvas_px - (y * self.scale + self.offset_y);
        (px as f32, py as f32)
    }

    /// Get the scale factor (pixels per meter)
    pub fn scale_factor(&self) -> f64 {
        self.scale
    }
}
