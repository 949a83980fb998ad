//! Edit-Affordances: Vertex-Handles (EDIT), Kanten-Einfügen (APPEND) und Klick-Löschen (DELETE).

use geo::Area;
use glam::Vec2;

use super::builder::{self, MergePlan};
use super::state::EngineState;
use super::ChangeReason;
use crate::core::geometry;
use crate::core::polygon::ring_to_geo;
use crate::core::{GeoPoint, HandleIndex, HandleRef, ModeSet, PolygonId};
use crate::host::MapHost;

/// Laufender Drag eines Eckpunkts.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexDrag {
    handle: HandleRef,
    original: Vec<GeoPoint>,
}

impl VertexDrag {
    /// Polygon des gezogenen Eckpunkts.
    pub fn polygon(&self) -> PolygonId {
        self.handle.polygon
    }

    /// Index des gezogenen Eckpunkts.
    pub fn vertex(&self) -> usize {
        self.handle.vertex
    }
}

/// Gedrückter Klick auf ein Polygon (DELETE). Gelöscht wird erst beim Loslassen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeleteClick {
    polygon: PolygonId,
    origin: Vec2,
}

impl DeleteClick {
    /// Polygon unter dem Klick.
    pub fn polygon(&self) -> PolygonId {
        self.polygon
    }
}

// ── Handles ──────────────────────────────────────────────────────

/// Hängt Handles an alle Polygone (EDIT betreten).
pub(crate) fn attach_handles<H: MapHost>(state: &mut EngineState<H>) {
    for id in state.store.ids() {
        attach_handles_for(state, id);
    }
}

/// Hängt Handles an ein Polygon bzw. aktualisiert deren Positionen.
pub(crate) fn attach_handles_for<H: MapHost>(state: &mut EngineState<H>, id: PolygonId) {
    if let Some(polygon) = state.store.get_mut(id) {
        polygon.handles_attached = true;
        state.host.show_handles(id, &polygon.boundary);
    }
}

/// Entfernt alle Handles (EDIT verlassen).
pub(crate) fn detach_handles<H: MapHost>(state: &mut EngineState<H>) {
    for polygon in state.store.iter_mut() {
        if polygon.handles_attached {
            polygon.handles_attached = false;
            state.host.hide_handles(polygon.id);
        }
    }
}

/// Spatial-Index über die Pixel-Positionen aller sichtbaren Handles.
fn handle_index<H: MapHost>(state: &EngineState<H>) -> HandleIndex {
    let entries: Vec<(HandleRef, Vec2)> = state
        .store
        .iter()
        .filter(|polygon| polygon.handles_attached)
        .flat_map(|polygon| {
            polygon
                .boundary
                .iter()
                .enumerate()
                .map(move |(vertex, point)| {
                    (
                        HandleRef {
                            polygon: polygon.id,
                            vertex,
                        },
                        *point,
                    )
                })
        })
        .map(|(handle, point)| (handle, state.host.geo_to_container(point)))
        .collect();
    if entries.is_empty() {
        return HandleIndex::empty();
    }
    HandleIndex::from_handles(&entries)
}

// ── Vertex-Drag (EDIT) ───────────────────────────────────────────

/// Startet einen Vertex-Drag, wenn ein Handle innerhalb der Elbow-Distanz liegt.
pub(crate) fn begin_vertex_drag<H: MapHost>(state: &mut EngineState<H>, pixel: Vec2) -> bool {
    if !state.mode().contains(ModeSet::EDIT) || state.drag.is_some() {
        return false;
    }

    let Some(hit) = handle_index(state).nearest_within(pixel, state.options.elbow_distance) else {
        return false;
    };
    let Some(polygon) = state.store.get(hit.handle.polygon) else {
        return false;
    };

    state.drag = Some(VertexDrag {
        handle: hit.handle,
        original: polygon.boundary.clone(),
    });
    state.listen_gesture();
    log::debug!(
        "Vertex-Drag gestartet: Polygon {:?}, Eckpunkt {}",
        hit.handle.polygon,
        hit.handle.vertex
    );
    true
}

/// Verschiebt den gegriffenen Eckpunkt.
pub(crate) fn drag_vertex<H: MapHost>(state: &mut EngineState<H>, pixel: Vec2) {
    let Some(handle) = state.drag.as_ref().map(|drag| drag.handle) else {
        return;
    };
    let point = state.host.container_to_geo(pixel);
    let Some(polygon) = state.store.get_mut(handle.polygon) else {
        return;
    };
    let Some(vertex) = polygon.boundary.get_mut(handle.vertex) else {
        return;
    };
    *vertex = point;

    state.host.render_polygon(polygon);
    if polygon.handles_attached {
        state.host.show_handles(polygon.id, &polygon.boundary);
    }
}

/// Beendet den Vertex-Drag: normalisiert, merged ggf. und meldet die Änderung.
///
/// Kreuzt der gezogene Ring sich selbst, zerfällt er in seine Schlaufen.
/// Würde das Aufteilen oder ein Merge das Maximum überschreiten, behält das
/// Polygon die größte Schlaufe.
pub(crate) fn finish_vertex_drag<H: MapHost>(state: &mut EngineState<H>) {
    state.unlisten_gesture();
    let Some(drag) = state.drag.take() else {
        return;
    };
    let id = drag.polygon();
    let Some(boundary) = state.store.get(id).map(|polygon| polygon.boundary.clone()) else {
        return;
    };

    let rings: Vec<Vec<GeoPoint>> = geometry::resolve_ring(&boundary)
        .into_iter()
        .filter(|ring| builder::is_usable_on(&state.host, ring))
        .collect();
    if rings.is_empty() {
        log::info!("Polygon {:?} nach Edit entartet, wird entfernt", id);
        builder::remove_for(state, id);
        state.notify(ChangeReason::Remove);
        return;
    }

    let mut plan = if state.options.merge_polygons {
        builder::plan_merge(&state.store, &rings, Some(id))
    } else {
        MergePlan::standalone(rings.clone())
    };

    if plan.absorbed.is_empty() && plan.rings.len() == 1 {
        if let Some(ring) = plan.rings.pop() {
            replace_boundary(state, id, ring);
        }
        record_edit(state);
        return;
    }

    plan.absorbed.push(id);
    let within_cap = state
        .options
        .maximum_polygons
        .map_or(true, |maximum| plan.resulting_len(state.store.len()) <= maximum);
    if within_cap {
        log::debug!(
            "Edit ergibt {} Ring(e), {} Polygon(e) aufgegangen",
            plan.rings.len(),
            plan.absorbed.len() - 1
        );
        let options = state.options.clone();
        builder::apply_plan(state, plan, &options);
        record_edit(state);
        return;
    }

    let largest = rings.into_iter().max_by(|a, b| {
        ring_to_geo(a)
            .unsigned_area()
            .total_cmp(&ring_to_geo(b).unsigned_area())
    });
    if let Some(ring) = largest {
        replace_boundary(state, id, ring);
    }
    record_edit(state);
}

/// Bricht einen Vertex-Drag ab und stellt den ursprünglichen Ring wieder her.
pub(crate) fn abort_vertex_drag<H: MapHost>(state: &mut EngineState<H>) -> bool {
    let Some(drag) = state.drag.take() else {
        return false;
    };
    state.unlisten_gesture();
    if state.store.contains(drag.polygon()) {
        replace_boundary(state, drag.polygon(), drag.original);
    }
    log::debug!("Vertex-Drag abgebrochen");
    true
}

fn replace_boundary<H: MapHost>(state: &mut EngineState<H>, id: PolygonId, ring: Vec<GeoPoint>) {
    let Some(polygon) = state.store.get_mut(id) else {
        return;
    };
    polygon.boundary = ring;
    state.host.render_polygon(polygon);
    if polygon.handles_attached {
        state.host.show_handles(id, &polygon.boundary);
    }
}

// ── Klick-Aktionen (DELETE / APPEND) ─────────────────────────────

/// Oberstes Polygon unter dem Pixel.
fn polygon_at<H: MapHost>(state: &EngineState<H>, pixel: Vec2) -> Option<PolygonId> {
    state
        .store
        .iter()
        .rev()
        .find(|polygon| {
            let ring: Vec<Vec2> = polygon
                .boundary
                .iter()
                .map(|p| state.host.geo_to_container(*p))
                .collect();
            geometry::point_in_polygon(pixel, &ring)
        })
        .map(|polygon| polygon.id)
}

/// Merkt einen Pointer-Down auf einem Polygon für das Löschen vor (DELETE-Modus).
pub(crate) fn arm_delete<H: MapHost>(state: &mut EngineState<H>, pixel: Vec2) -> bool {
    if !state.mode().contains(ModeSet::DELETE) || state.delete_click.is_some() {
        return false;
    }
    let Some(id) = polygon_at(state, pixel) else {
        return false;
    };

    state.delete_click = Some(DeleteClick {
        polygon: id,
        origin: pixel,
    });
    state.listen_gesture();
    log::debug!("Lösch-Klick auf Polygon {:?} vorgemerkt", id);
    true
}

/// Pointer-Move: eine Bewegung über die Elbow-Distanz hinaus ist kein Klick mehr.
pub(crate) fn track_delete<H: MapHost>(state: &mut EngineState<H>, pixel: Vec2) {
    let Some(click) = state.delete_click else {
        return;
    };
    if click.origin.distance(pixel) <= state.options.elbow_distance {
        return;
    }
    state.delete_click = None;
    if !state.capture.is_capturing() {
        state.unlisten_gesture();
    }
    log::debug!("Lösch-Klick verworfen: Pointer bewegt");
}

/// Pointer-Up: entfernt das vorgemerkte Polygon.
pub(crate) fn finish_delete<H: MapHost>(state: &mut EngineState<H>) -> bool {
    let Some(click) = state.delete_click.take() else {
        return false;
    };
    state.unlisten_gesture();
    if !builder::remove_for(state, click.polygon) {
        return false;
    }
    log::info!("Polygon {:?} per Klick gelöscht", click.polygon);
    state.notify(ChangeReason::Remove);
    true
}

/// Verwirft einen vorgemerkten Lösch-Klick ohne Änderung am Store.
pub(crate) fn abort_delete<H: MapHost>(state: &mut EngineState<H>) -> bool {
    if state.delete_click.take().is_none() {
        return false;
    }
    if !state.capture.is_capturing() && state.drag.is_none() {
        state.unlisten_gesture();
    }
    true
}

/// Fügt einen Eckpunkt auf der nächsten Kante innerhalb der Elbow-Distanz ein (APPEND-Modus).
pub(crate) fn append_at<H: MapHost>(state: &mut EngineState<H>, pixel: Vec2) -> bool {
    if !state.mode().contains(ModeSet::APPEND) {
        return false;
    }

    let best = state
        .store
        .iter()
        .filter_map(|polygon| {
            let ring: Vec<Vec2> = polygon
                .boundary
                .iter()
                .map(|p| state.host.geo_to_container(*p))
                .collect();
            geometry::nearest_edge(pixel, &ring).map(|hit| (polygon.id, hit))
        })
        .filter(|(_, hit)| hit.distance <= state.options.elbow_distance)
        .min_by(|(_, a), (_, b)| a.distance.total_cmp(&b.distance));

    let Some((id, hit)) = best else {
        return false;
    };
    let point = state.host.container_to_geo(hit.position);
    let Some(polygon) = state.store.get_mut(id) else {
        return false;
    };
    if polygon.boundary.contains(&point) {
        return false;
    }

    polygon.boundary.insert(hit.edge + 1, point);
    state.host.render_polygon(polygon);
    if polygon.handles_attached {
        state.host.show_handles(id, &polygon.boundary);
    }
    log::debug!("Eckpunkt in Polygon {:?} nach Kante {} eingefügt", id, hit.edge);
    record_edit(state);
    true
}

// ── Edit-Benachrichtigung ────────────────────────────────────────

/// Meldet eine Bearbeitung sofort oder hält sie bis zum Verlassen von EDIT zurück.
pub(crate) fn record_edit<H: MapHost>(state: &mut EngineState<H>) {
    if state.options.notify_after_edit_exit && state.mode().contains(ModeSet::EDIT) {
        state.pending_edit = true;
        return;
    }
    state.notify(ChangeReason::Edit);
}

/// Löst eine zurückgehaltene Edit-Benachrichtigung aus.
pub(crate) fn flush_pending_edit<H: MapHost>(state: &mut EngineState<H>) {
    if std::mem::take(&mut state.pending_edit) {
        state.notify(ChangeReason::Edit);
    }
}
