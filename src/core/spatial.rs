//! Spatial-Index (KD-Tree) über Vertex-Handles für den Edit-Modus.
//!
//! Wird beim Pointer-Down aus den projizierten Pixel-Positionen aller Handles
//! gebaut, damit die Elbow-Distanz-Abfrage nicht linear über alle Eckpunkte läuft.

use glam::Vec2;
use kiddo::{KdTree, SquaredEuclidean};

use super::PolygonId;

/// Verweis auf einen Eckpunkt eines Polygons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandleRef {
    /// Polygon, zu dem der Handle gehört
    pub polygon: PolygonId,
    /// Index des Eckpunkts im Ring
    pub vertex: usize,
}

/// Ergebnis einer Distanzabfrage gegen den Handle-Index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleMatch {
    /// Gefundener Handle
    pub handle: HandleRef,
    /// Euklidische Distanz zum Suchpunkt in Pixeln
    pub distance: f32,
}

/// Read-only Spatial-Index über Handle-Positionen im Container-Raum.
#[derive(Debug, Clone)]
pub struct HandleIndex {
    tree: KdTree<f64, 2>,
    handles: Vec<HandleRef>,
}

impl HandleIndex {
    /// Erstellt einen leeren Index.
    pub fn empty() -> Self {
        Self {
            tree: (&Vec::<[f64; 2]>::new()).into(),
            handles: Vec::new(),
        }
    }

    /// Baut einen Index aus Handle/Pixel-Paaren.
    pub fn from_handles(entries: &[(HandleRef, Vec2)]) -> Self {
        let positions: Vec<[f64; 2]> = entries
            .iter()
            .map(|(_, pos)| [pos.x as f64, pos.y as f64])
            .collect();
        let tree: KdTree<f64, 2> = (&positions).into();

        Self {
            tree,
            handles: entries.iter().map(|(handle, _)| *handle).collect(),
        }
    }

    /// Anzahl indexierter Handles.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Gibt `true` zurück, wenn keine Handles im Index liegen.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Findet den nächsten Handle zur Pixel-Position.
    pub fn nearest(&self, query: Vec2) -> Option<HandleMatch> {
        if self.is_empty() {
            return None;
        }

        let result = self
            .tree
            .nearest_one::<SquaredEuclidean>(&[query.x as f64, query.y as f64]);
        let handle = *self.handles.get(result.item as usize)?;

        Some(HandleMatch {
            handle,
            distance: (result.distance as f32).sqrt(),
        })
    }

    /// Findet den nächsten Handle, sofern er innerhalb von `radius` Pixeln liegt.
    pub fn nearest_within(&self, query: Vec2, radius: f32) -> Option<HandleMatch> {
        if radius.is_sign_negative() {
            return None;
        }
        self.nearest(query).filter(|hit| hit.distance <= radius)
    }
}
