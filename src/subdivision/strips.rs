use geo::{BooleanOps, BoundingRect, Coord, Polygon, Rect};

use crate::domain::Lot;
use crate::error::PlanError;

/// Slice the polygon into `n` equal-width vertical strips.
///
/// Each band spans the full height of the bounding box and is intersected
/// with the outline; empty intersections are discarded. A band that cuts a
/// concave parcel into disconnected pieces still yields a single lot
/// holding all the pieces. Strips never overlap, so the emitted lot areas
/// sum to the polygon's area.
pub fn subdivide_strips(polygon: &Polygon<f64>, n: usize) -> Result<Vec<Lot>, PlanError> {
    let bounds = polygon.bounding_rect().ok_or(PlanError::InvalidOutline)?;
    let band_width = bounds.width() / n as f64;
    let min = bounds.min();
    let max = bounds.max();

    let mut lots = Vec::new();
    for i in 0..n {
        let band = Rect::new(
            Coord {
                x: min.x + i as f64 * band_width,
                y: min.y,
            },
            Coord {
                x: min.x + (i + 1) as f64 * band_width,
                y: max.y,
            },
        )
        .to_polygon();

        let lot = Lot::from_parts(polygon.intersection(&band));
        if !lot.is_empty() {
            lots.push(lot);
        }
    }

    Ok(lots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Area, polygon};

    fn square(side: f64) -> Polygon<f64> {
        polygon![
            (x: 0.0, y: 0.0),
            (x: side, y: 0.0),
            (x: side, y: side),
            (x: 0.0, y: side),
        ]
    }

    #[test]
    fn test_square_splits_into_equal_strips() {
        let lots = subdivide_strips(&square(40.0), 4).unwrap();

        assert_eq!(lots.len(), 4);
        for lot in &lots {
            assert!((lot.area() - 400.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_strip_areas_sum_to_polygon_area() {
        let triangle = polygon![
            (x: 0.0, y: 0.0),
            (x: 30.0, y: 0.0),
            (x: 15.0, y: 20.0),
        ];
        let expected = triangle.unsigned_area();

        for n in [1, 2, 3, 5, 8] {
            let lots = subdivide_strips(&triangle, n).unwrap();
            let total: f64 = lots.iter().map(Lot::area).sum();
            assert!(
                (total - expected).abs() < 1e-6,
                "area mismatch for n={n}: {total} vs {expected}"
            );
        }
    }

    #[test]
    fn test_concave_parcel_keeps_multipart_strips() {
        // A C-shape open to the right: the bands crossing the notch
        // intersect in two disconnected pieces, flattened into one lot.
        let c_shape = polygon![
            (x: 0.0, y: 0.0),
            (x: 30.0, y: 0.0),
            (x: 30.0, y: 10.0),
            (x: 10.0, y: 10.0),
            (x: 10.0, y: 20.0),
            (x: 30.0, y: 20.0),
            (x: 30.0, y: 30.0),
            (x: 0.0, y: 30.0),
        ];
        let lots = subdivide_strips(&c_shape, 3).unwrap();

        assert_eq!(lots.len(), 3);

        let total: f64 = lots.iter().map(Lot::area).sum();
        assert!((total - 700.0).abs() < 1e-6);

        // The rightmost band covers only the two arms.
        let multipart = lots
            .iter()
            .filter(|lot| lot.geometry().0.len() > 1)
            .count();
        assert!(multipart >= 1);
    }

    #[test]
    fn test_single_strip_reconstructs_polygon() {
        let triangle = polygon![
            (x: 0.0, y: 0.0),
            (x: 30.0, y: 0.0),
            (x: 15.0, y: 20.0),
        ];
        let lots = subdivide_strips(&triangle, 1).unwrap();

        assert_eq!(lots.len(), 1);
        assert!((lots[0].area() - triangle.unsigned_area()).abs() < 1e-6);
    }
}
