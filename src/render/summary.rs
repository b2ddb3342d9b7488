use std::fmt;

use crate::domain::{Lot, ParcelOutline};

/// Textual summary of one subdivision run.
#[derive(Debug)]
pub struct PlanSummary {
    pub closure_error: f64,
    pub valid: bool,
    pub total_area: f64,
    pub perimeter: f64,
    pub lot_count: usize,
    pub average_lot_area: f64,
}

impl PlanSummary {
    pub fn new(outline: &ParcelOutline, lots: &[Lot]) -> Self {
        let lot_count = lots.len();
        let lot_area: f64 = lots.iter().map(Lot::area).sum();
        let average_lot_area = if lot_count > 0 {
            lot_area / lot_count as f64
        } else {
            0.0
        };

        Self {
            closure_error: outline.closure_error(),
            valid: outline.is_valid(),
            total_area: outline.area(),
            perimeter: outline.perimeter(),
            lot_count,
            average_lot_area,
        }
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Closure error: {:.2} m", self.closure_error)?;
        writeln!(f, "Polygon valid: {}", if self.valid { "yes" } else { "no" })?;
        writeln!(f, "Total area: {:.2} m²", self.total_area)?;
        writeln!(f, "Perimeter: {:.2} m", self.perimeter)?;
        writeln!(f, "Lots: {}", self.lot_count)?;
        write!(f, "Average lot area: {:.2} m²", self.average_lot_area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{build_outline, parse_sides};
    use crate::subdivision::SubdivisionStrategy;

    #[test]
    fn test_square_summary_values() {
        let sides = parse_sides("50@0, 50@90, 50@180, 50@270").unwrap();
        let outline = build_outline(&sides).unwrap();
        let lots = SubdivisionStrategy::Grid
            .subdivide(outline.polygon(), 4)
            .unwrap();

        let summary = PlanSummary::new(&outline, &lots);

        assert!(summary.valid);
        assert!(summary.closure_error < 1e-6);
        assert!((summary.total_area - 2500.0).abs() < 1e-6);
        assert!((summary.perimeter - 200.0).abs() < 1e-6);
        assert_eq!(summary.lot_count, 4);
        assert!((summary.average_lot_area - 625.0).abs() < 1e-6);
    }

    #[test]
    fn test_summary_display_lines() {
        let sides = parse_sides("50@0, 50@90, 50@180, 50@270").unwrap();
        let outline = build_outline(&sides).unwrap();
        let summary = PlanSummary::new(&outline, &[]);

        let text = summary.to_string();
        assert!(text.contains("Closure error: 0.00 m"));
        assert!(text.contains("Polygon valid: yes"));
        assert!(text.contains("Total area: 2500.00 m²"));
        assert!(text.contains("Perimeter: 200.00 m"));
        assert!(text.contains("Lots: 0"));
        assert!(text.contains("Average lot area: 0.00 m²"));
    }
}
