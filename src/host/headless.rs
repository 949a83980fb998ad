//! In-Memory-Host ohne Fenster: lineare Projektion und aufgezeichnete Overlay-Aufrufe.
//!
//! Dient Tests, Benchmarks und der Demo als Ersatz für eine echte Karten-Bibliothek.

use std::collections::HashMap;

use glam::Vec2;
use indexmap::IndexMap;

use super::{Listener, ListenerSet, MapHost};
use crate::core::{GeoPoint, ModeSet, Polygon, PolygonId};
use crate::render::StrokeStyle;

/// Headless-Karte mit linearer Projektion (Pixel-Y wächst nach Süden).
#[derive(Debug, Clone)]
pub struct HeadlessMap {
    /// Geo-Koordinate am Container-Pixel (0, 0)
    pub origin: GeoPoint,
    /// Grad pro Pixel
    pub degrees_per_pixel: f64,
    /// Position des Containers im Fenster (Client-Koordinaten)
    pub container_offset: Vec2,
    /// Aktuell registrierte Listener
    pub listeners: ListenerSet,
    /// Anzahl aller `listen`-Aufrufe
    pub listen_calls: usize,
    /// Anzahl aller `unlisten`-Aufrufe
    pub unlisten_calls: usize,
    /// Gezeichnete Stroke-Stücke seit dem letzten Leeren
    pub stroke_segments: Vec<Vec<Vec2>>,
    /// Anzahl der Overlay-Leerungen
    pub stroke_clears: usize,
    /// Aktuell dargestellte Polygone
    pub rendered: IndexMap<PolygonId, Polygon>,
    /// Anzahl sichtbarer Handles pro Polygon
    pub handles: HashMap<PolygonId, usize>,
    /// Zuletzt gemeldeter Modus
    pub mode: ModeSet,
    /// CSS-artige Klassen des Containers (`mode-create`, …)
    pub container_classes: Vec<&'static str>,
}

impl HeadlessMap {
    /// Erstellt eine Karte mit Ursprung (0°, 0°) und 0.001° pro Pixel.
    pub fn new() -> Self {
        Self::with_projection(GeoPoint::new(0.0, 0.0), 0.001)
    }

    /// Erstellt eine Karte mit eigener Projektion.
    pub fn with_projection(origin: GeoPoint, degrees_per_pixel: f64) -> Self {
        Self {
            origin,
            degrees_per_pixel,
            container_offset: Vec2::ZERO,
            listeners: ListenerSet::default(),
            listen_calls: 0,
            unlisten_calls: 0,
            stroke_segments: Vec::new(),
            stroke_clears: 0,
            rendered: IndexMap::new(),
            handles: HashMap::new(),
            mode: ModeSet::NONE,
            container_classes: Vec::new(),
        }
    }

    /// Setzt die Container-Position im Fenster.
    pub fn with_container_offset(mut self, offset: Vec2) -> Self {
        self.container_offset = offset;
        self
    }

    /// Client-Position zu einem Container-Pixel (Umkehrung von `client_to_container`).
    pub fn container_to_client(&self, pixel: Vec2) -> Vec2 {
        pixel + self.container_offset
    }
}

impl Default for HeadlessMap {
    fn default() -> Self {
        Self::new()
    }
}

impl MapHost for HeadlessMap {
    fn client_to_container(&self, client: Vec2) -> Vec2 {
        client - self.container_offset
    }

    fn container_to_geo(&self, pixel: Vec2) -> GeoPoint {
        GeoPoint::new(
            self.origin.lat - pixel.y as f64 * self.degrees_per_pixel,
            self.origin.lng + pixel.x as f64 * self.degrees_per_pixel,
        )
    }

    fn geo_to_container(&self, point: GeoPoint) -> Vec2 {
        Vec2::new(
            ((point.lng - self.origin.lng) / self.degrees_per_pixel) as f32,
            ((self.origin.lat - point.lat) / self.degrees_per_pixel) as f32,
        )
    }

    fn listen(&mut self, listener: Listener) {
        self.listen_calls += 1;
        self.listeners.insert(listener);
    }

    fn unlisten(&mut self, listener: Listener) {
        self.unlisten_calls += 1;
        self.listeners.remove(listener);
    }

    fn draw_stroke(&mut self, path: &[Vec2], _style: &StrokeStyle) {
        self.stroke_segments.push(path.to_vec());
    }

    fn clear_stroke(&mut self) {
        self.stroke_clears += 1;
        self.stroke_segments.clear();
    }

    fn render_polygon(&mut self, polygon: &Polygon) {
        self.rendered.insert(polygon.id, polygon.clone());
    }

    fn remove_polygon(&mut self, id: PolygonId) {
        self.rendered.shift_remove(&id);
    }

    fn show_handles(&mut self, id: PolygonId, vertices: &[GeoPoint]) {
        self.handles.insert(id, vertices.len());
    }

    fn hide_handles(&mut self, id: PolygonId) {
        self.handles.remove(&id);
    }

    fn mode_changed(&mut self, mode: ModeSet) {
        self.mode = mode;
        self.container_classes = mode.class_names();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn projection_roundtrips_pixels() {
        let map = HeadlessMap::with_projection(GeoPoint::new(51.0, 7.0), 0.0005);
        let pixel = Vec2::new(120.0, 80.0);
        let geo = map.container_to_geo(pixel);
        let back = map.geo_to_container(geo);

        assert_relative_eq!(back.x, pixel.x, epsilon = 1e-3);
        assert_relative_eq!(back.y, pixel.y, epsilon = 1e-3);
        assert!(geo.lat < 51.0, "Pixel-Y nach unten heißt nach Süden");
    }

    #[test]
    fn client_conversion_uses_container_offset() {
        let map = HeadlessMap::new().with_container_offset(Vec2::new(10.0, 20.0));
        let client = map.container_to_client(Vec2::new(5.0, 5.0));
        assert_eq!(client, Vec2::new(15.0, 25.0));
        assert_eq!(map.client_to_container(client), Vec2::new(5.0, 5.0));
    }

    #[test]
    fn mode_changes_update_container_classes() {
        let mut map = HeadlessMap::new();
        map.mode_changed(ModeSet::CREATE | ModeSet::EDIT);
        assert_eq!(map.container_classes, vec!["mode-create", "mode-edit"]);

        map.mode_changed(ModeSet::NONE);
        assert!(map.container_classes.is_empty());
    }
}
