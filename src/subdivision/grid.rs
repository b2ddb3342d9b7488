use geo::{BoundingRect, Coord, Polygon, Rect};

use crate::domain::Lot;
use crate::error::PlanError;

/// Split the polygon's bounding box into up to `n` uniform rectangular
/// cells.
///
/// `cols = floor(sqrt(n))`, `rows = ceil(n / cols)`; cells are emitted in
/// column-major order and generation stops once `n` cells exist. NOTE:
/// `rows * cols` may exceed `n`, in which case the trailing cells of the
/// last column are dropped rather than the grid being rebalanced, leaving
/// that corner of the bounding box uncovered.
///
/// Cells are NOT intersected with the polygon outline, so cells can fall
/// partly or wholly outside an irregular parcel.
pub fn subdivide_grid(polygon: &Polygon<f64>, n: usize) -> Result<Vec<Lot>, PlanError> {
    let bounds = polygon.bounding_rect().ok_or(PlanError::InvalidOutline)?;

    let cols = ((n as f64).sqrt().floor() as usize).max(1);
    let rows = n.div_ceil(cols);
    let cell_width = bounds.width() / cols as f64;
    let cell_height = bounds.height() / rows as f64;
    let min = bounds.min();

    let mut lots = Vec::with_capacity(n);
    for i in 0..cols {
        for j in 0..rows {
            if lots.len() >= n {
                break;
            }
            let cell = Rect::new(
                Coord {
                    x: min.x + i as f64 * cell_width,
                    y: min.y + j as f64 * cell_height,
                },
                Coord {
                    x: min.x + (i + 1) as f64 * cell_width,
                    y: min.y + (j + 1) as f64 * cell_height,
                },
            );
            lots.push(Lot::from_polygon(cell.to_polygon()));
        }
    }

    Ok(lots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::polygon;

    fn square(side: f64) -> Polygon<f64> {
        polygon![
            (x: 0.0, y: 0.0),
            (x: side, y: 0.0),
            (x: side, y: side),
            (x: 0.0, y: side),
        ]
    }

    #[test]
    fn test_emits_exactly_n_cells() {
        for n in 1..=20 {
            let lots = subdivide_grid(&square(40.0), n).unwrap();
            assert_eq!(lots.len(), n, "lot count for n={n}");
        }
    }

    #[test]
    fn test_cells_are_nondegenerate() {
        let lots = subdivide_grid(&square(40.0), 8).unwrap();
        for lot in &lots {
            assert!(lot.area() > 0.0);
        }
    }

    #[test]
    fn test_full_grid_tiles_bounding_box() {
        // n = 8 -> cols = 2, rows = 4 -> rows * cols = n: no dropped cells,
        // and the cells tile the bounding box exactly.
        let lots = subdivide_grid(&square(40.0), 8).unwrap();

        let total: f64 = lots.iter().map(Lot::area).sum();
        assert!((total - 1600.0).abs() < 1e-9);
        for lot in &lots {
            assert!((lot.area() - 200.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_excess_cells_are_dropped() {
        // n = 5 -> cols = 2, rows = 3 -> 6 cells available, 5 emitted. The
        // emitted cells cover 5/6 of the bounding box.
        let lots = subdivide_grid(&square(60.0), 5).unwrap();

        assert_eq!(lots.len(), 5);
        let total: f64 = lots.iter().map(Lot::area).sum();
        assert!((total - 3600.0 * 5.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_lot_is_the_bounding_box() {
        let lots = subdivide_grid(&square(40.0), 1).unwrap();

        assert_eq!(lots.len(), 1);
        assert!((lots[0].area() - 1600.0).abs() < 1e-9);
    }

    #[test]
    fn test_cells_ignore_concavity() {
        // Grid cells are never clipped, so the cell areas still tile the
        // bounding box of an L-shaped parcel.
        let ell = polygon![
            (x: 0.0, y: 0.0),
            (x: 20.0, y: 0.0),
            (x: 20.0, y: 10.0),
            (x: 10.0, y: 10.0),
            (x: 10.0, y: 20.0),
            (x: 0.0, y: 20.0),
        ];
        let lots = subdivide_grid(&ell, 4).unwrap();

        let total: f64 = lots.iter().map(Lot::area).sum();
        assert!((total - 400.0).abs() < 1e-9);
    }
}
