use geo::{ConvexHull, Coord, LineString, MultiPoint, Point};

use crate::domain::{LandMask, ParcelOutline};
use crate::error::PlanError;
use crate::geometry::repair::repair_ring;

/// One surveyed side: a length in meters and a bearing in degrees.
///
/// Bearing convention: 0° = East, increasing counterclockwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Side {
    pub length: f64,
    pub bearing: f64,
}

/// Parse a comma-separated list of `length@bearing` pairs, e.g.
/// `"50@0, 50@90, 50@180, 50@270"`.
///
/// Lengths must be positive; bearings must lie in [0, 360).
pub fn parse_sides(spec: &str) -> Result<Vec<Side>, PlanError> {
    let mut sides = Vec::new();

    for raw in spec.split(',') {
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }

        let (length_str, bearing_str) = raw.split_once('@').ok_or_else(|| {
            PlanError::InvalidSide {
                spec: raw.to_string(),
                reason: "expected length@bearing".to_string(),
            }
        })?;

        let length: f64 =
            length_str
                .trim()
                .parse()
                .map_err(|_| PlanError::InvalidSide {
                    spec: raw.to_string(),
                    reason: "length is not a number".to_string(),
                })?;
        let bearing: f64 =
            bearing_str
                .trim()
                .parse()
                .map_err(|_| PlanError::InvalidSide {
                    spec: raw.to_string(),
                    reason: "bearing is not a number".to_string(),
                })?;

        if !length.is_finite() || length <= 0.0 {
            return Err(PlanError::InvalidSide {
                spec: raw.to_string(),
                reason: "length must be positive".to_string(),
            });
        }
        if !bearing.is_finite() || !(0.0..360.0).contains(&bearing) {
            return Err(PlanError::InvalidSide {
                spec: raw.to_string(),
                reason: "bearing must be in [0, 360)".to_string(),
            });
        }

        sides.push(Side { length, bearing });
    }

    Ok(sides)
}

/// Walk the surveyed sides into a closed parcel outline.
///
/// Starting at (0, 0), each side advances the current point by
/// `(length * cos(bearing), length * sin(bearing))`. The closure error is
/// the distance from the final accumulated point back to the start,
/// measured before the ring is force-closed by appending the start point.
/// The closed ring is then passed through self-intersection repair; the
/// result's validity is reported by the caller, not enforced here.
///
/// Degenerate inputs (collinear sides, zero net displacement) build an
/// outline that simply reports itself invalid.
pub fn build_outline(sides: &[Side]) -> Result<ParcelOutline, PlanError> {
    if sides.len() < 3 {
        return Err(PlanError::TooFewSides(sides.len()));
    }

    let start = Coord { x: 0.0, y: 0.0 };
    let mut vertices = vec![start];
    let mut current = start;

    for side in sides {
        let radians = side.bearing.to_radians();
        current = Coord {
            x: current.x + side.length * radians.cos(),
            y: current.y + side.length * radians.sin(),
        };
        vertices.push(current);
    }

    let closure_error = {
        let dx = current.x - start.x;
        let dy = current.y - start.y;
        (dx * dx + dy * dy).sqrt()
    };

    // Force the ring shut regardless of the closure error.
    vertices.push(start);

    let polygon = repair_ring(&LineString::new(vertices));
    Ok(ParcelOutline::new(polygon, closure_error))
}

/// Derive a bounding polygon (convex hull) from the land pixels of a mask.
///
/// Returns `None` when fewer than 3 land pixels exist. Mask-derived
/// outlines carry a closure error of zero.
pub fn outline_from_mask(mask: &LandMask) -> Option<ParcelOutline> {
    let coords = mask.foreground_coords();
    if coords.len() < 3 {
        return None;
    }

    let points: MultiPoint<f64> = coords.into_iter().map(|(x, y)| Point::new(x, y)).collect();
    let hull = points.convex_hull();
    if hull.exterior().0.len() < 4 {
        // All pixels collinear: the hull degenerates to a line.
        return None;
    }

    Some(ParcelOutline::new(hull, 0.0))
}
