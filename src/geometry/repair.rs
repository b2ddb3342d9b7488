use geo::{Area, BooleanOps, Coord, Line, LineString, MultiPolygon, Polygon};

/// Parametric tolerance for treating an intersection as a shared endpoint
/// rather than a proper crossing.
const PARAM_EPS: f64 = 1e-9;

/// Coordinate tolerance for matching a crossing point on the second walk
/// past it.
const COORD_EPS: f64 = 1e-9;

/// Resolve simple self-intersections in a closed ring.
///
/// Zero-width-buffer semantics: the ring is split at every proper crossing
/// into simple sub-rings, the sub-rings are unioned, and the largest part of
/// the union is returned. Rings without crossings pass through unchanged,
/// so a valid input ring stays byte-for-byte the same polygon.
pub fn repair_ring(ring: &LineString<f64>) -> Polygon<f64> {
    let crossings = find_crossings(ring);
    if crossings.is_empty() {
        return Polygon::new(ring.clone(), Vec::new());
    }

    let mut merged = MultiPolygon::new(Vec::new());
    for sub in split_at_crossings(ring, &crossings) {
        // Need at least a closed triangle.
        if sub.len() < 4 {
            continue;
        }
        let part = Polygon::new(LineString::new(sub), Vec::new());
        if part.unsigned_area() < COORD_EPS {
            continue;
        }
        merged = merged.union(&MultiPolygon::new(vec![part]));
    }

    merged
        .0
        .into_iter()
        .max_by(|a, b| a.unsigned_area().total_cmp(&b.unsigned_area()))
        .unwrap_or_else(|| Polygon::new(ring.clone(), Vec::new()))
}

/// A proper crossing between two non-adjacent ring segments.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Crossing {
    /// Index of the earlier segment.
    seg_a: usize,
    /// Position along segment `seg_a` in (0, 1).
    t_a: f64,
    /// Index of the later segment.
    seg_b: usize,
    /// Position along segment `seg_b` in (0, 1).
    t_b: f64,
    point: Coord<f64>,
}

/// Find every proper crossing between non-adjacent segments of the ring.
/// Intersections at shared endpoints are not crossings.
pub(crate) fn find_crossings(ring: &LineString<f64>) -> Vec<Crossing> {
    let segments: Vec<Line<f64>> = ring.lines().collect();
    let n = segments.len();
    let mut crossings = Vec::new();

    for i in 0..n {
        for j in (i + 1)..n {
            // Skip adjacent segments, including the wrap-around pair.
            if j == i + 1 || (i == 0 && j == n - 1) {
                continue;
            }
            if let Some((t_a, t_b, point)) = proper_intersection(&segments[i], &segments[j]) {
                crossings.push(Crossing {
                    seg_a: i,
                    t_a,
                    seg_b: j,
                    t_b,
                    point,
                });
            }
        }
    }

    crossings
}

/// Interior intersection of two segments, if any. Returns the parametric
/// positions along each segment together with the intersection point.
fn proper_intersection(a: &Line<f64>, b: &Line<f64>) -> Option<(f64, f64, Coord<f64>)> {
    let r = a.delta();
    let s = b.delta();
    let denom = r.x * s.y - r.y * s.x;
    if denom.abs() < 1e-12 {
        // Parallel or collinear: overlaps are left for validity reporting.
        return None;
    }

    let qp = Coord {
        x: b.start.x - a.start.x,
        y: b.start.y - a.start.y,
    };
    let t = (qp.x * s.y - qp.y * s.x) / denom;
    let u = (qp.x * r.y - qp.y * r.x) / denom;

    if t > PARAM_EPS && t < 1.0 - PARAM_EPS && u > PARAM_EPS && u < 1.0 - PARAM_EPS {
        let point = Coord {
            x: a.start.x + t * r.x,
            y: a.start.y + t * r.y,
        };
        Some((t, u, point))
    } else {
        None
    }
}

/// Split the ring into simple sub-rings at the crossing points.
///
/// The ring walk is replayed with each crossing point inserted into both
/// segments it lies on; whenever the walk revisits a point already on the
/// pending path, the loop between the two visits is closed off as one
/// sub-ring.
fn split_at_crossings(ring: &LineString<f64>, crossings: &[Crossing]) -> Vec<Vec<Coord<f64>>> {
    // Per-segment insertion lists, ordered along each segment.
    let segment_count = ring.0.len().saturating_sub(1);
    let mut inserts: Vec<Vec<(f64, Coord<f64>)>> = vec![Vec::new(); segment_count];
    for crossing in crossings {
        inserts[crossing.seg_a].push((crossing.t_a, crossing.point));
        inserts[crossing.seg_b].push((crossing.t_b, crossing.point));
    }
    for list in &mut inserts {
        list.sort_by(|a, b| a.0.total_cmp(&b.0));
    }

    let mut walk: Vec<Coord<f64>> = Vec::with_capacity(ring.0.len() + 2 * crossings.len());
    for (i, vertex) in ring.0[..segment_count].iter().enumerate() {
        walk.push(*vertex);
        for &(_, point) in &inserts[i] {
            walk.push(point);
        }
    }
    walk.push(ring.0[segment_count]);

    let mut stack: Vec<Coord<f64>> = Vec::new();
    let mut sub_rings = Vec::new();

    for point in walk {
        if let Some(pos) = stack
            .iter()
            .position(|q| (q.x - point.x).abs() < COORD_EPS && (q.y - point.y).abs() < COORD_EPS)
        {
            if stack.len() - pos >= 3 {
                let mut sub = stack[pos..].to_vec();
                sub.push(stack[pos]);
                sub_rings.push(sub);
            }
            stack.truncate(pos + 1);
        } else {
            stack.push(point);
        }
    }

    sub_rings
}
