//! Finalisiertes Freihand-Polygon mit Ring, Stil und Edit-Zustand.

use geo::{Area, BoundingRect};
use serde::{Deserialize, Serialize};

use super::GeoPoint;

/// Stabile Identität eines Polygons innerhalb eines Stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PolygonId(pub u64);

/// Darstellungs-Attribute, beim Erstellen aus den Engine-Optionen übernommen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolygonStyle {
    /// Linienstärke der Kontur in Pixeln
    pub stroke_width: f32,
    /// Konturfarbe (RGBA)
    pub color: [f32; 4],
    /// Fläche füllen
    pub fill: bool,
    /// Deckkraft der Füllung
    pub fill_opacity: f32,
    /// Glättung der Kontur beim Rendern (0 = gerade Kanten)
    pub smooth_factor: f32,
}

/// Geschlossener Polygon-Ring auf der Karte.
///
/// `boundary` ist ein offener Ring: der letzte Eckpunkt verbindet implizit
/// zum ersten. [`Polygon::closed_ring`] liefert die explizit geschlossene Form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    /// Identität im Store
    pub id: PolygonId,
    /// Eckpunkte in Ring-Reihenfolge (ohne Wiederholung des ersten Punkts)
    pub boundary: Vec<GeoPoint>,
    /// Stil-Attribute
    pub style: PolygonStyle,
    /// Sind Edit-Handles an den Eckpunkten angehängt?
    #[serde(skip)]
    pub handles_attached: bool,
}

impl Polygon {
    /// Erstellt ein neues Polygon ohne Edit-Handles.
    pub fn new(id: PolygonId, boundary: Vec<GeoPoint>, style: PolygonStyle) -> Self {
        Self {
            id,
            boundary,
            style,
            handles_attached: false,
        }
    }

    /// Anzahl der Eckpunkte.
    pub fn vertex_count(&self) -> usize {
        self.boundary.len()
    }

    /// Ring mit wiederholtem Startpunkt am Ende.
    pub fn closed_ring(&self) -> Vec<GeoPoint> {
        let mut ring = self.boundary.clone();
        if let Some(&first) = self.boundary.first() {
            ring.push(first);
        }
        ring
    }

    /// Konvertiert in ein `geo::Polygon` (ohne Löcher).
    pub fn to_geo(&self) -> geo::Polygon<f64> {
        ring_to_geo(&self.boundary)
    }

    /// Umschließendes Rechteck in Geo-Koordinaten.
    pub fn bounds(&self) -> Option<geo::Rect<f64>> {
        self.to_geo().bounding_rect()
    }

    /// Flächeninhalt in Grad² (planar).
    pub fn area(&self) -> f64 {
        self.to_geo().unsigned_area()
    }
}

/// Baut ein `geo::Polygon` aus einem offenen Ring.
pub fn ring_to_geo(boundary: &[GeoPoint]) -> geo::Polygon<f64> {
    let coords: Vec<geo::Coord<f64>> = boundary.iter().map(|p| p.to_coord()).collect();
    // geo schließt den Ring selbst
    geo::Polygon::new(geo::LineString::new(coords), Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn style() -> PolygonStyle {
        PolygonStyle {
            stroke_width: 2.0,
            color: [0.0, 0.0, 1.0, 1.0],
            fill: true,
            fill_opacity: 0.2,
            smooth_factor: 0.3,
        }
    }

    fn unit_square() -> Polygon {
        Polygon::new(
            PolygonId(1),
            vec![
                GeoPoint::new(0.0, 0.0),
                GeoPoint::new(0.0, 1.0),
                GeoPoint::new(1.0, 1.0),
                GeoPoint::new(1.0, 0.0),
            ],
            style(),
        )
    }

    #[test]
    fn closed_ring_repeats_first_vertex() {
        let polygon = unit_square();
        let ring = polygon.closed_ring();
        assert_eq!(ring.len(), 5);
        assert_eq!(ring.first(), ring.last());
    }

    #[test]
    fn area_and_bounds() {
        let polygon = unit_square();
        assert_relative_eq!(polygon.area(), 1.0);
        let bounds = polygon.bounds().expect("Bounds erwartet");
        assert_relative_eq!(bounds.max().x, 1.0);
        assert_relative_eq!(bounds.max().y, 1.0);
    }
}
