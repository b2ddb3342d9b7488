use geo::{Area, Centroid, MultiPolygon, Point, Polygon};

/// One output cell of a subdivision.
///
/// Usually a single rectangle or clipped polygon, but a vertical strip can
/// cut a concave parcel into disconnected pieces; those pieces are still
/// treated as one lot. Lots carry no adjacency, ownership, or persistent
/// identity and are recomputed wholesale on every run.
#[derive(Debug, Clone)]
pub struct Lot {
    geometry: MultiPolygon<f64>,
}

impl Lot {
    pub fn from_polygon(polygon: Polygon<f64>) -> Self {
        Self {
            geometry: MultiPolygon::new(vec![polygon]),
        }
    }

    pub fn from_parts(geometry: MultiPolygon<f64>) -> Self {
        Self { geometry }
    }

    pub fn geometry(&self) -> &MultiPolygon<f64> {
        &self.geometry
    }

    pub fn area(&self) -> f64 {
        self.geometry.unsigned_area()
    }

    pub fn centroid(&self) -> Option<Point<f64>> {
        self.geometry.centroid()
    }

    pub fn is_empty(&self) -> bool {
        self.geometry.0.is_empty() || self.area() < 1e-9
    }
}
