//! Rein-mathematische Geometrie-Hilfen: Vereinfachung, Hülle, Ring-Normalisierung,
//! Treffer-Tests und Polygon-Vereinigung.
//!
//! Pixel-Funktionen arbeiten auf `glam::Vec2` im Container-Raum,
//! Ring-Funktionen auf `GeoPoint` (planar, x = Länge, y = Breite).

use geo::algorithm::line_intersection::{line_intersection, LineIntersection};
use geo::{Area, BooleanOps, ConvexHull, Intersects};
use glam::Vec2;

use super::polygon::ring_to_geo;
use super::GeoPoint;

/// Austauschbare Vereinfachungs-Routine: (Pixel-Punkte, Toleranz in Pixeln) → reduzierte Punkte.
pub type Simplifier = fn(&[Vec2], f32) -> Vec<Vec2>;

/// Ringe unterhalb dieser Fläche (Pixel²) gelten als entartet, unabhängig vom Zoom.
pub const MIN_RING_AREA_PX: f32 = 1.0;

// ── Vereinfachung ──────────────────────────────────────────────────

/// Standard-Vereinfachung: Radial-Distanz-Vorfilter + Douglas-Peucker.
///
/// Erster und letzter Punkt bleiben immer erhalten.
pub fn simplify_path(points: &[Vec2], tolerance: f32) -> Vec<Vec2> {
    if points.len() <= 2 || tolerance <= 0.0 {
        return points.to_vec();
    }
    let sq_tolerance = tolerance * tolerance;
    let reduced = reduce_radial(points, sq_tolerance);
    douglas_peucker(&reduced, sq_tolerance)
}

/// Verwirft Punkte, die näher als die Toleranz am zuletzt behaltenen Punkt liegen.
fn reduce_radial(points: &[Vec2], sq_tolerance: f32) -> Vec<Vec2> {
    let mut result = Vec::with_capacity(points.len());
    let mut previous = points[0];
    result.push(previous);

    for &point in &points[1..] {
        if point.distance_squared(previous) > sq_tolerance {
            result.push(point);
            previous = point;
        }
    }

    let last = points[points.len() - 1];
    if previous != last {
        result.push(last);
    }
    result
}

/// Iterativer Douglas-Peucker (Stack statt Rekursion).
fn douglas_peucker(points: &[Vec2], sq_tolerance: f32) -> Vec<Vec2> {
    let len = points.len();
    if len <= 2 {
        return points.to_vec();
    }

    let mut keep = vec![false; len];
    keep[0] = true;
    keep[len - 1] = true;

    let mut stack = vec![(0usize, len - 1)];
    while let Some((first, last)) = stack.pop() {
        let mut max_sq_dist = 0.0f32;
        let mut index = first;

        for i in (first + 1)..last {
            let sq_dist = segment_distance_squared(points[i], points[first], points[last]);
            if sq_dist > max_sq_dist {
                index = i;
                max_sq_dist = sq_dist;
            }
        }

        if max_sq_dist > sq_tolerance {
            keep[index] = true;
            stack.push((first, index));
            stack.push((index, last));
        }
    }

    points
        .iter()
        .zip(keep)
        .filter_map(|(point, kept)| kept.then_some(*point))
        .collect()
}

// ── Segment-Geometrie ──────────────────────────────────────────────

/// Nächster Punkt auf dem Segment `a`–`b`.
pub fn closest_point_on_segment(point: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return a;
    }
    let t = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

/// Quadrierter Abstand eines Punkts zum Segment `a`–`b`.
pub fn segment_distance_squared(point: Vec2, a: Vec2, b: Vec2) -> f32 {
    point.distance_squared(closest_point_on_segment(point, a, b))
}

/// Prüft ob ein Punkt auf einem Liniensegment liegt.
fn point_on_segment(point: Vec2, a: Vec2, b: Vec2) -> bool {
    let ab = b - a;
    let ap = point - a;
    if ab.perp_dot(ap).abs() > 1e-4 {
        return false;
    }
    let dot = ap.dot(ab);
    dot >= 0.0 && dot <= ab.length_squared()
}

/// Prüft ob ein Punkt innerhalb eines Polygons liegt (Ray-Casting, Rand zählt als innen).
pub fn point_in_polygon(point: Vec2, polygon: &[Vec2]) -> bool {
    let Some(&last) = polygon.last() else {
        return false;
    };
    if polygon.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut previous = last;

    for &current in polygon {
        if point_on_segment(point, previous, current) {
            return true;
        }

        // Kante kreuzt die Horizontale durch `point`: y-Differenz ist dann nie 0
        if (current.y > point.y) != (previous.y > point.y) {
            let crossing_x = current.x
                + (previous.x - current.x) * (point.y - current.y) / (previous.y - current.y);
            if point.x < crossing_x {
                inside = !inside;
            }
        }

        previous = current;
    }

    inside
}

/// Treffer auf einer Ring-Kante.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeHit {
    /// Index des Kanten-Startpunkts; die Kante endet bei `(edge + 1) % len`
    pub edge: usize,
    /// Nächster Punkt auf der Kante
    pub position: Vec2,
    /// Abstand zum Abfragepunkt
    pub distance: f32,
}

/// Findet die dem Punkt nächstgelegene Kante eines geschlossenen Rings.
pub fn nearest_edge(point: Vec2, ring: &[Vec2]) -> Option<EdgeHit> {
    if ring.len() < 2 {
        return None;
    }

    (0..ring.len())
        .map(|edge| {
            let a = ring[edge];
            let b = ring[(edge + 1) % ring.len()];
            let position = closest_point_on_segment(point, a, b);
            EdgeHit {
                edge,
                position,
                distance: position.distance(point),
            }
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

// ── Ringe ──────────────────────────────────────────────────────────

/// Entfernt aufeinanderfolgende Duplikate und einen Schlusspunkt gleich dem Startpunkt.
pub fn normalize_ring(points: &[GeoPoint]) -> Vec<GeoPoint> {
    let mut ring: Vec<GeoPoint> = Vec::with_capacity(points.len());
    for &point in points {
        if ring.last() != Some(&point) {
            ring.push(point);
        }
    }
    while ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    ring
}

/// Anzahl unterschiedlicher Eckpunkte.
pub fn distinct_vertex_count(points: &[GeoPoint]) -> usize {
    points
        .iter()
        .collect::<indexmap::IndexSet<&GeoPoint>>()
        .len()
}

/// Ring hat ≥ 3 unterschiedliche Eckpunkte und eine Fläche > 0.
fn has_area(ring: &[GeoPoint]) -> bool {
    distinct_vertex_count(ring) >= 3 && ring_to_geo(ring).unsigned_area() > 0.0
}

/// Fläche eines Pixel-Rings (Shoelace, ohne Vorzeichen).
pub fn pixel_area(ring: &[Vec2]) -> f32 {
    if ring.len() < 3 {
        return 0.0;
    }
    let twice: f32 = ring
        .iter()
        .zip(ring.iter().cycle().skip(1))
        .map(|(a, b)| a.perp_dot(*b))
        .sum();
    (twice * 0.5).abs()
}

/// Prüft ob sich ein offener Ring nirgends selbst schneidet.
///
/// Benachbarte Kanten dürfen sich nur im gemeinsamen Eckpunkt berühren.
pub fn is_simple_ring(ring: &[GeoPoint]) -> bool {
    let len = ring.len();
    if len < 3 {
        return false;
    }
    let edges: Vec<geo::Line<f64>> = (0..len)
        .map(|i| geo::Line::new(ring[i].to_coord(), ring[(i + 1) % len].to_coord()))
        .collect();

    for i in 0..len {
        for j in (i + 1)..len {
            let adjacent = j == i + 1 || (i == 0 && j == len - 1);
            match line_intersection(edges[i], edges[j]) {
                None => {}
                Some(LineIntersection::SinglePoint { .. }) if adjacent => {}
                Some(_) => return false,
            }
        }
    }
    true
}

/// Löst Selbstüberschneidungen eines Rings auf.
///
/// Einfache Ringe bleiben unverändert (nur normalisiert). Schneidet sich der
/// Ring, zerlegt die Boolean-Vereinigung ihn in einfache Außenringe, z.B. die
/// beiden Schlaufen einer Acht. Entartete Ringe liefern eine leere Liste.
pub fn resolve_ring(points: &[GeoPoint]) -> Vec<Vec<GeoPoint>> {
    let ring = normalize_ring(points);
    if distinct_vertex_count(&ring) < 3 {
        return Vec::new();
    }
    if is_simple_ring(&ring) {
        return if has_area(&ring) { vec![ring] } else { Vec::new() };
    }

    let resolved = geo::MultiPolygon::new(vec![ring_to_geo(&ring)])
        .union(&geo::MultiPolygon::new(Vec::new()));
    exterior_rings(&resolved)
}

/// Konvexe Hülle als offener Ring.
pub fn convex_hull(points: &[GeoPoint]) -> Vec<GeoPoint> {
    let multi_point: geo::MultiPoint<f64> = points
        .iter()
        .map(|p| geo::Point::from(p.to_coord()))
        .collect();
    let hull = multi_point.convex_hull();
    exterior_ring(&hull)
}

/// Verwendbare Außenringe eines `geo::MultiPolygon`.
fn exterior_rings(multi: &geo::MultiPolygon<f64>) -> Vec<Vec<GeoPoint>> {
    multi
        .0
        .iter()
        .map(exterior_ring)
        .filter(|ring| has_area(ring))
        .collect()
}

/// Offener Außenring eines `geo::Polygon`.
fn exterior_ring(polygon: &geo::Polygon<f64>) -> Vec<GeoPoint> {
    let ring: Vec<GeoPoint> = polygon
        .exterior()
        .coords()
        .map(|c| GeoPoint::from_coord(*c))
        .collect();
    normalize_ring(&ring)
}

/// Prüft ob sich zwei Ringe überlappen (Kantenschnitt oder Enthaltensein).
pub fn rings_overlap(a: &[GeoPoint], b: &[GeoPoint]) -> bool {
    ring_to_geo(a).intersects(&ring_to_geo(b))
}

/// Vereinigt Ringe und liefert die Außenringe des Ergebnisses.
///
/// Löcher werden verworfen: der Außenring umschließt damit alle Eingabeflächen.
pub fn union_rings(rings: &[Vec<GeoPoint>]) -> Vec<Vec<GeoPoint>> {
    let Some((first, rest)) = rings.split_first() else {
        return Vec::new();
    };

    let mut merged = geo::MultiPolygon::new(vec![ring_to_geo(first)]);
    for ring in rest {
        merged = merged.union(&geo::MultiPolygon::new(vec![ring_to_geo(ring)]));
    }

    exterior_rings(&merged)
}
