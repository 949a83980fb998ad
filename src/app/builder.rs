//! Polygon-Builder: Vereinfachung, Schließen, Merge und Cap-Prüfung.
//!
//! Reihenfolge beim Erstellen: Merge planen, dann Cap prüfen, dann anwenden.
//! Ein abgewiesenes Polygon lässt den Store unverändert.

use geo::{BoundingRect, Intersects};
use glam::Vec2;

use super::edit;
use super::state::EngineState;
use crate::core::geometry::{self, Simplifier};
use crate::core::polygon::ring_to_geo;
use crate::core::{GeoPoint, ModeSet, PolygonId, PolygonStore};
use crate::error::FreeDrawError;
use crate::host::MapHost;
use crate::shared::EngineOptions;

/// Reduziert eine Punktfolge auf verwendbare, einfache, offene Ringe.
///
/// Vereinfacht im Container-Raum (Toleranz `simplify_factor` in Pixeln),
/// erzwingt bei `concave_polygon == false` die konvexe Hülle. Ein Strich, der
/// sich selbst kreuzt, zerfällt in seine Schlaufen; jede Schlaufe ist ein
/// eigener Kandidat.
pub fn build<H: MapHost>(
    host: &H,
    points: &[GeoPoint],
    options: &EngineOptions,
    simplifier: Simplifier,
) -> Result<Vec<Vec<GeoPoint>>, FreeDrawError> {
    if points.len() < 3 {
        return Err(FreeDrawError::InsufficientPoints);
    }

    let pixels: Vec<Vec2> = points.iter().map(|p| host.geo_to_container(*p)).collect();
    let simplified: Vec<GeoPoint> = simplifier(&pixels, options.simplify_factor)
        .into_iter()
        .map(|pixel| host.container_to_geo(pixel))
        .collect();

    let rings = if options.concave_polygon {
        geometry::resolve_ring(&simplified)
    } else {
        geometry::resolve_ring(&geometry::convex_hull(&simplified))
    };

    let usable: Vec<Vec<GeoPoint>> = rings
        .into_iter()
        .filter(|ring| is_usable_on(host, ring))
        .collect();

    if usable.is_empty() {
        return Err(FreeDrawError::InsufficientPoints);
    }
    if usable.len() > 1 {
        log::debug!("Selbstüberschneidender Strich in {} Ringe zerlegt", usable.len());
    }
    Ok(usable)
}

/// Ring ist in der aktuellen Ansicht nicht entartet (Fläche in Pixel²).
pub(crate) fn is_usable_on<H: MapHost>(host: &H, ring: &[GeoPoint]) -> bool {
    if geometry::distinct_vertex_count(ring) < 3 {
        return false;
    }
    let pixels: Vec<Vec2> = ring.iter().map(|p| host.geo_to_container(*p)).collect();
    geometry::pixel_area(&pixels) >= geometry::MIN_RING_AREA_PX
}

/// Geplanter Merge: welche Polygone aufgehen und welche Ringe entstehen.
#[derive(Debug, Clone, PartialEq)]
pub struct MergePlan {
    /// Bestehende Polygone, die im Ergebnis aufgehen
    pub absorbed: Vec<PolygonId>,
    /// Resultierende Ringe
    pub rings: Vec<Vec<GeoPoint>>,
}

impl MergePlan {
    /// Plan ohne Merge: die Kandidaten werden unverändert übernommen.
    pub fn standalone(rings: Vec<Vec<GeoPoint>>) -> Self {
        Self {
            absorbed: Vec::new(),
            rings,
        }
    }

    /// Store-Größe nach Anwendung des Plans.
    pub fn resulting_len(&self, current_len: usize) -> usize {
        current_len - self.absorbed.len() + self.rings.len()
    }
}

/// Plant die Vereinigung der Kandidaten mit allen überlappenden Polygonen.
///
/// Bounding-Box-Vorfilter, danach exakter Schnitt-Test gegen jeden Kandidaten.
/// `exclude` nimmt ein Polygon aus (der bearbeitete Ring beim Edit-Merge).
pub fn plan_merge(
    store: &PolygonStore,
    candidates: &[Vec<GeoPoint>],
    exclude: Option<PolygonId>,
) -> MergePlan {
    let candidate_bounds: Vec<_> = candidates
        .iter()
        .filter_map(|ring| ring_to_geo(ring).bounding_rect())
        .collect();
    if candidate_bounds.is_empty() {
        return MergePlan::standalone(candidates.to_vec());
    }

    let overlapping: Vec<(PolygonId, Vec<GeoPoint>)> = store
        .iter()
        .filter(|polygon| Some(polygon.id) != exclude)
        .filter(|polygon| {
            polygon.bounds().is_some_and(|bounds| {
                candidate_bounds
                    .iter()
                    .any(|candidate| bounds.intersects(candidate))
            })
        })
        .filter(|polygon| {
            candidates
                .iter()
                .any(|ring| geometry::rings_overlap(&polygon.boundary, ring))
        })
        .map(|polygon| (polygon.id, polygon.boundary.clone()))
        .collect();

    if overlapping.is_empty() {
        return MergePlan::standalone(candidates.to_vec());
    }

    let mut rings: Vec<Vec<GeoPoint>> = Vec::with_capacity(overlapping.len() + candidates.len());
    rings.extend(candidates.iter().cloned());
    rings.extend(overlapping.iter().map(|(_, boundary)| boundary.clone()));

    let merged = geometry::union_rings(&rings);
    if merged.is_empty() {
        // Vereinigung lieferte nichts Verwendbares: Kandidaten unverändert übernehmen
        return MergePlan::standalone(candidates.to_vec());
    }

    MergePlan {
        absorbed: overlapping.into_iter().map(|(id, _)| id).collect(),
        rings: merged,
    }
}

/// Baut Polygone und legt sie im Store der Karte ab.
///
/// Alle resultierenden Ringe zählen gegen das Maximum. Gibt die ID des
/// ersten resultierenden Polygons zurück.
pub fn create_for<H: MapHost>(
    state: &mut EngineState<H>,
    points: &[GeoPoint],
    options: &EngineOptions,
) -> Result<PolygonId, FreeDrawError> {
    let rings = build(&state.host, points, options, state.simplifier)?;

    let plan = if options.merge_polygons {
        plan_merge(&state.store, &rings, None)
    } else {
        MergePlan::standalone(rings)
    };

    if let Some(maximum) = options.maximum_polygons {
        if plan.resulting_len(state.store.len()) > maximum {
            log::info!("Polygon abgewiesen: Maximum von {} erreicht", maximum);
            return Err(FreeDrawError::CapacityReached { maximum });
        }
    }

    if !plan.absorbed.is_empty() {
        log::debug!("Merge mit {} bestehenden Polygon(en)", plan.absorbed.len());
    }
    apply_plan(state, plan, options).ok_or(FreeDrawError::InsufficientPoints)
}

/// Wendet einen Merge-Plan an und gibt die erste neue ID zurück.
pub(crate) fn apply_plan<H: MapHost>(
    state: &mut EngineState<H>,
    plan: MergePlan,
    options: &EngineOptions,
) -> Option<PolygonId> {
    for id in plan.absorbed {
        detach_and_remove(state, id);
    }

    let style = options.polygon_style();
    let edit_active = state.mode().contains(ModeSet::EDIT);
    let mut first = None;

    for ring in plan.rings {
        let id = state.store.insert(ring, style);
        if let Some(polygon) = state.store.get(id) {
            state.host.render_polygon(polygon);
        }
        if edit_active {
            edit::attach_handles_for(state, id);
        }
        first.get_or_insert(id);
    }
    first
}

/// Entfernt ein Polygon samt Handles und Darstellung. Fehlende IDs: No-op.
fn detach_and_remove<H: MapHost>(state: &mut EngineState<H>, id: PolygonId) -> bool {
    let Some(polygon) = state.store.remove(id) else {
        return false;
    };
    if polygon.handles_attached {
        state.host.hide_handles(id);
    }
    state.host.remove_polygon(id);
    true
}

/// Entfernt ein Polygon aus dem Store der Karte (idempotent).
pub fn remove_for<H: MapHost>(state: &mut EngineState<H>, id: PolygonId) -> bool {
    if state.drag.as_ref().is_some_and(|drag| drag.polygon() == id) {
        edit::abort_vertex_drag(state);
    }
    detach_and_remove(state, id)
}

/// Leert den Store der Karte (idempotent). Gibt die Anzahl entfernter Polygone zurück.
pub fn clear_for<H: MapHost>(state: &mut EngineState<H>) -> usize {
    edit::abort_vertex_drag(state);
    let removed = state.store.clear();
    for polygon in &removed {
        if polygon.handles_attached {
            state.host.hide_handles(polygon.id);
        }
        state.host.remove_polygon(polygon.id);
    }
    removed.len()
}
