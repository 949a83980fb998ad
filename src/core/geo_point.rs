//! Geografische Koordinate (Breite/Länge) mit Wert-Gleichheit.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Breiten-/Längengrad-Paar.
///
/// Gleichheit und Hash arbeiten auf den Bit-Mustern (mit `-0.0 == 0.0`),
/// damit Punkte in einem `IndexSet` dedupliziert werden können.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Breitengrad
    pub lat: f64,
    /// Längengrad
    pub lng: f64,
}

impl GeoPoint {
    /// Erstellt einen neuen Punkt.
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    fn key(&self) -> (u64, u64) {
        // 0.0 + -0.0 == 0.0, damit beide Nullen denselben Hash haben
        ((self.lat + 0.0).to_bits(), (self.lng + 0.0).to_bits())
    }

    /// Konvertiert in eine planare `geo`-Koordinate (x = Länge, y = Breite).
    pub fn to_coord(self) -> geo::Coord<f64> {
        geo::Coord {
            x: self.lng,
            y: self.lat,
        }
    }

    /// Gegenstück zu [`GeoPoint::to_coord`].
    pub fn from_coord(coord: geo::Coord<f64>) -> Self {
        Self {
            lat: coord.y,
            lng: coord.x,
        }
    }
}

impl PartialEq for GeoPoint {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for GeoPoint {}

impl Hash for GeoPoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexSet;

    #[test]
    fn negative_zero_equals_zero() {
        assert_eq!(GeoPoint::new(0.0, -0.0), GeoPoint::new(-0.0, 0.0));
    }

    #[test]
    fn index_set_keeps_first_insertion_order() {
        let mut set = IndexSet::new();
        set.insert(GeoPoint::new(1.0, 1.0));
        set.insert(GeoPoint::new(2.0, 2.0));
        set.insert(GeoPoint::new(1.0, 1.0));
        set.insert(GeoPoint::new(3.0, 3.0));

        let order: Vec<f64> = set.iter().map(|p| p.lat).collect();
        assert_eq!(order, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn coord_conversion_swaps_axes() {
        let point = GeoPoint::new(51.5, -0.12);
        let coord = point.to_coord();
        assert_eq!(coord.x, -0.12);
        assert_eq!(coord.y, 51.5);
        assert_eq!(GeoPoint::from_coord(coord), point);
    }
}
