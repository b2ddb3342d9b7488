pub mod grid;
pub mod strips;

pub use grid::subdivide_grid;
pub use strips::subdivide_strips;

use clap::ValueEnum;
use geo::Polygon;
use serde::Deserialize;

use crate::domain::Lot;
use crate::error::PlanError;

/// Selects how the parcel is sliced into lots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubdivisionStrategy {
    /// Uniform rectangles over the bounding box, not clipped to the
    /// outline.
    #[default]
    Grid,
    /// Equal-width vertical bands, each intersected with the outline.
    Strips,
}

impl SubdivisionStrategy {
    /// Subdivide the polygon into up to `lots` lots.
    pub fn subdivide(self, polygon: &Polygon<f64>, lots: usize) -> Result<Vec<Lot>, PlanError> {
        if lots == 0 {
            return Err(PlanError::ZeroLots);
        }
        match self {
            Self::Grid => grid::subdivide_grid(polygon, lots),
            Self::Strips => strips::subdivide_strips(polygon, lots),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::polygon;

    fn square() -> Polygon<f64> {
        polygon![
            (x: 0.0, y: 0.0),
            (x: 40.0, y: 0.0),
            (x: 40.0, y: 40.0),
            (x: 0.0, y: 40.0),
        ]
    }

    #[test]
    fn test_zero_lots_is_an_error() {
        assert!(matches!(
            SubdivisionStrategy::Grid.subdivide(&square(), 0),
            Err(PlanError::ZeroLots)
        ));
        assert!(matches!(
            SubdivisionStrategy::Strips.subdivide(&square(), 0),
            Err(PlanError::ZeroLots)
        ));
    }

    #[test]
    fn test_strategy_dispatch() {
        let grid = SubdivisionStrategy::Grid.subdivide(&square(), 4).unwrap();
        let strips = SubdivisionStrategy::Strips.subdivide(&square(), 4).unwrap();

        assert_eq!(grid.len(), 4);
        assert_eq!(strips.len(), 4);
    }

    #[test]
    fn test_default_is_grid() {
        assert_eq!(SubdivisionStrategy::default(), SubdivisionStrategy::Grid);
    }
}
