use geo::{Area, EuclideanLength, Polygon, Validation};

/// A closed parcel boundary with its survey bookkeeping.
///
/// The exterior ring is always closed (first vertex repeated at the end) and
/// has at least 3 distinct vertices before closure. The closure error is the
/// distance the surveyed walk missed its starting point by, recorded before
/// the ring was forced shut; it is reported, never corrected, so a sloppy
/// survey silently distorts the shape.
#[derive(Debug, Clone)]
pub struct ParcelOutline {
    polygon: Polygon<f64>,
    closure_error: f64,
}

impl ParcelOutline {
    pub fn new(polygon: Polygon<f64>, closure_error: f64) -> Self {
        Self {
            polygon,
            closure_error,
        }
    }

    pub fn polygon(&self) -> &Polygon<f64> {
        &self.polygon
    }

    pub fn closure_error(&self) -> f64 {
        self.closure_error
    }

    /// Whether the outline is a valid simple polygon. Reported as a boolean;
    /// degenerate outlines are never corrected.
    pub fn is_valid(&self) -> bool {
        self.polygon.is_valid()
    }

    pub fn area(&self) -> f64 {
        self.polygon.unsigned_area()
    }

    /// Total length of the exterior ring, including the forced closing
    /// segment.
    pub fn perimeter(&self) -> f64 {
        self.polygon.exterior().euclidean_length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{LineString, polygon};

    #[test]
    fn test_square_metrics() {
        let square = polygon![
            (x: 0.0, y: 0.0),
            (x: 50.0, y: 0.0),
            (x: 50.0, y: 50.0),
            (x: 0.0, y: 50.0),
        ];
        let outline = ParcelOutline::new(square, 0.0);

        assert!(outline.is_valid());
        assert!((outline.area() - 2500.0).abs() < 1e-9);
        assert!((outline.perimeter() - 200.0).abs() < 1e-9);
        assert_eq!(outline.closure_error(), 0.0);
    }

    #[test]
    fn test_degenerate_outline_reports_invalid() {
        // Collinear ring: zero area, not a valid polygon, but no panic.
        let flat = Polygon::new(
            LineString::from(vec![(0.0, 0.0), (10.0, 0.0), (20.0, 0.0), (0.0, 0.0)]),
            Vec::new(),
        );
        let outline = ParcelOutline::new(flat, 0.0);

        assert!(!outline.is_valid());
        assert!(outline.area() < 1e-9);
    }
}
