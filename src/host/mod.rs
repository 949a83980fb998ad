//! Schnittstelle zur Karten-Host-Bibliothek.
//!
//! Der Host liefert Projektion, Listener-Registrierung und eine Overlay-Fläche.
//! Die Engine ruft nur diese Methoden auf; Events liefert der Host über
//! `FreeDraw::handle_event` zurück.

pub mod headless;

use glam::Vec2;

use crate::core::{GeoPoint, ModeSet, Polygon, PolygonId};
use crate::render::StrokeStyle;

pub use headless::HeadlessMap;

/// Low-Level-Listener auf dem Karten-Container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Listener {
    /// Maus-/Pointer-Down auf dem Container
    PointerDown,
    /// Touch-Start auf dem Container
    TouchStart,
    /// Pointer-Bewegung während einer Geste
    PointerMove,
    /// Pointer-Up während einer Geste
    PointerUp,
    /// Touch-Bewegung während einer Geste
    TouchMove,
    /// Touch-Ende während einer Geste
    TouchEnd,
    /// Host-seitiger Abbruch (`pointercancel`)
    PointerCancel,
    /// Pointer verlässt den Dokument-Body
    BodyLeave,
}

impl Listener {
    /// Listener, die nur während einer laufenden Geste registriert sind.
    pub const GESTURE: [Listener; 6] = [
        Listener::PointerMove,
        Listener::PointerUp,
        Listener::TouchMove,
        Listener::TouchEnd,
        Listener::PointerCancel,
        Listener::BodyLeave,
    ];

    /// Dauerhaft registrierte Listener (vom Attach bis zum Detach).
    pub const PERSISTENT: [Listener; 2] = [Listener::PointerDown, Listener::TouchStart];

    const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Menge aktuell registrierter Listener (Bitmaske).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerSet(u8);

impl ListenerSet {
    /// Prüft ob der Listener registriert ist.
    pub fn contains(self, listener: Listener) -> bool {
        self.0 & listener.bit() != 0
    }

    /// Markiert den Listener als registriert. Gibt `false` zurück wenn er es schon war.
    pub fn insert(&mut self, listener: Listener) -> bool {
        let added = !self.contains(listener);
        self.0 |= listener.bit();
        added
    }

    /// Markiert den Listener als entfernt. Gibt `false` zurück wenn er nicht registriert war.
    pub fn remove(&mut self, listener: Listener) -> bool {
        let removed = self.contains(listener);
        self.0 &= !listener.bit();
        removed
    }

    /// Gibt `true` zurück, wenn kein Listener registriert ist.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Fähigkeiten, die die Karten-Bibliothek bereitstellt.
pub trait MapHost {
    /// Rechnet Client-Koordinaten (Fenster) in Container-Pixel um.
    fn client_to_container(&self, client: Vec2) -> Vec2;

    /// Projiziert einen Container-Pixel auf eine Geo-Koordinate.
    fn container_to_geo(&self, pixel: Vec2) -> GeoPoint;

    /// Projiziert eine Geo-Koordinate auf Container-Pixel.
    fn geo_to_container(&self, point: GeoPoint) -> Vec2;

    /// Registriert einen Listener auf dem Container.
    fn listen(&mut self, listener: Listener);

    /// Entfernt einen Listener vom Container.
    fn unlisten(&mut self, listener: Listener);

    /// Zeichnet ein Stück des laufenden Strichs auf das Overlay.
    fn draw_stroke(&mut self, _path: &[Vec2], _style: &StrokeStyle) {}

    /// Leert das Stroke-Overlay.
    fn clear_stroke(&mut self) {}

    /// Zeigt ein Polygon an oder aktualisiert es.
    fn render_polygon(&mut self, _polygon: &Polygon) {}

    /// Entfernt ein Polygon aus der Darstellung.
    fn remove_polygon(&mut self, _id: PolygonId) {}

    /// Zeigt Edit-Handles an den Eckpunkten eines Polygons.
    fn show_handles(&mut self, _id: PolygonId, _vertices: &[GeoPoint]) {}

    /// Entfernt die Edit-Handles eines Polygons.
    fn hide_handles(&mut self, _id: PolygonId) {}

    /// Meldet den aktiven Modus (z.B. für CSS-Klassen am Container).
    fn mode_changed(&mut self, _mode: ModeSet) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listener_set_tracks_registration() {
        let mut set = ListenerSet::default();
        assert!(set.insert(Listener::PointerMove));
        assert!(!set.insert(Listener::PointerMove));
        assert!(set.contains(Listener::PointerMove));
        assert!(!set.contains(Listener::PointerUp));
        assert!(set.remove(Listener::PointerMove));
        assert!(!set.remove(Listener::PointerMove));
        assert!(set.is_empty());
    }

    #[test]
    fn gesture_and_persistent_listeners_are_disjoint() {
        for listener in Listener::GESTURE {
            assert!(!Listener::PERSISTENT.contains(&listener));
        }
    }
}
