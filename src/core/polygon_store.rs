//! Polygon-Store einer Karte: Identitäts-basierte, geordnete Polygon-Menge.

use indexmap::IndexMap;

use super::{GeoPoint, Polygon, PolygonId, PolygonStyle};

/// Alle aktiven Polygone einer Karte in Einfüge-Reihenfolge.
#[derive(Debug, Clone, Default)]
pub struct PolygonStore {
    polygons: IndexMap<PolygonId, Polygon>,
    next_id: u64,
}

impl PolygonStore {
    /// Erstellt einen leeren Store.
    pub fn new() -> Self {
        Self {
            polygons: IndexMap::new(),
            next_id: 1,
        }
    }

    /// Anzahl gespeicherter Polygone.
    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    /// Gibt `true` zurück, wenn keine Polygone gespeichert sind.
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Polygon per ID.
    pub fn get(&self, id: PolygonId) -> Option<&Polygon> {
        self.polygons.get(&id)
    }

    /// Mutables Polygon per ID.
    pub fn get_mut(&mut self, id: PolygonId) -> Option<&mut Polygon> {
        self.polygons.get_mut(&id)
    }

    /// Prüft ob ein Polygon mit dieser ID existiert.
    pub fn contains(&self, id: PolygonId) -> bool {
        self.polygons.contains_key(&id)
    }

    /// Legt ein neues Polygon mit frischer ID an und gibt die ID zurück.
    pub fn insert(&mut self, boundary: Vec<GeoPoint>, style: PolygonStyle) -> PolygonId {
        let id = PolygonId(self.next_id.max(1));
        self.next_id = id.0 + 1;
        self.polygons.insert(id, Polygon::new(id, boundary, style));
        id
    }

    /// Entfernt ein Polygon. Fehlende IDs sind ein No-op (`None`).
    pub fn remove(&mut self, id: PolygonId) -> Option<Polygon> {
        // shift_remove hält die Einfüge-Reihenfolge der übrigen Polygone
        self.polygons.shift_remove(&id)
    }

    /// Leert den Store und gibt die entfernten Polygone zurück.
    pub fn clear(&mut self) -> Vec<Polygon> {
        self.polygons.drain(..).map(|(_, polygon)| polygon).collect()
    }

    /// IDs in Einfüge-Reihenfolge.
    pub fn ids(&self) -> Vec<PolygonId> {
        self.polygons.keys().copied().collect()
    }

    /// Iterator über alle Polygone.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Polygon> {
        self.polygons.values()
    }

    /// Iterator über alle Polygone (mutabel).
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Polygon> {
        self.polygons.values_mut()
    }

    /// Owned Snapshot aller Polygone (für Benachrichtigungen).
    pub fn snapshot(&self) -> Vec<Polygon> {
        self.polygons.values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style() -> PolygonStyle {
        PolygonStyle {
            stroke_width: 2.0,
            color: [1.0, 0.0, 0.0, 1.0],
            fill: false,
            fill_opacity: 0.0,
            smooth_factor: 0.0,
        }
    }

    fn triangle(offset: f64) -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(offset, 0.0),
            GeoPoint::new(offset + 1.0, 0.0),
            GeoPoint::new(offset, 1.0),
        ]
    }

    #[test]
    fn insert_assigns_unique_ids() {
        let mut store = PolygonStore::new();
        let a = store.insert(triangle(0.0), style());
        let b = store.insert(triangle(0.0), style());
        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn remove_is_idempotent() {
        let mut store = PolygonStore::new();
        let id = store.insert(triangle(0.0), style());
        assert!(store.remove(id).is_some());
        assert!(store.remove(id).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn ids_are_not_reused_after_clear() {
        let mut store = PolygonStore::new();
        let first = store.insert(triangle(0.0), style());
        assert_eq!(store.clear().len(), 1);
        assert!(store.clear().is_empty());
        let second = store.insert(triangle(5.0), style());
        assert!(second > first);
    }

    #[test]
    fn snapshot_preserves_insertion_order() {
        let mut store = PolygonStore::new();
        let a = store.insert(triangle(0.0), style());
        let b = store.insert(triangle(2.0), style());
        let c = store.insert(triangle(4.0), style());
        store.remove(b);
        let ids: Vec<PolygonId> = store.snapshot().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![a, c]);
    }
}
