//! Dispatch eingehender Pointer-/Touch-Events auf Capture und Edit-Affordances.

use super::state::EngineState;
use super::{capture, edit, PointerEvent, PointerKind};
use crate::host::MapHost;

/// Verarbeitet ein Host-Event.
///
/// Events für nicht registrierte Listener werden ignoriert (z.B. ein Move
/// nach dem Up, der noch in der Host-Queue stand). Gibt `true` zurück, wenn
/// das Event etwas bewirkt hat.
pub(crate) fn handle_event<H: MapHost>(state: &mut EngineState<H>, event: &PointerEvent) -> bool {
    if !state.is_listening(event.listener()) {
        log::trace!("Event {:?} ohne registrierten Listener ignoriert", event.kind);
        return false;
    }

    match event.kind {
        PointerKind::Down | PointerKind::TouchStart => pointer_down(state, event),
        PointerKind::Move | PointerKind::TouchMove => {
            let pixel = state.host.client_to_container(event.client);
            edit::track_delete(state, pixel);
            if state.drag.is_some() {
                edit::drag_vertex(state, pixel);
            } else {
                capture::record(state, pixel);
            }
            true
        }
        PointerKind::Up | PointerKind::TouchEnd => {
            if state.drag.is_some() {
                edit::finish_vertex_drag(state);
            } else if state.delete_click.is_some() {
                // Klick ohne Drag: der angefangene Strich ist kein Polygon
                capture::abort(state);
                edit::finish_delete(state);
            } else {
                capture::finish(state);
            }
            true
        }
        PointerKind::Cancel | PointerKind::BodyLeave => {
            edit::abort_delete(state) | edit::abort_vertex_drag(state) | capture::abort(state)
        }
    }
}

/// Pointer-Down: Handle (EDIT) > Treffer (DELETE) > Kante (APPEND) > Freihand (CREATE).
///
/// Ein Treffer im DELETE-Modus löscht erst beim Up ohne Drag. Bis dahin läuft
/// bei aktivem CREATE parallel eine Aufnahme, damit ein Strich auch innerhalb
/// eines Polygons beginnen kann.
fn pointer_down<H: MapHost>(state: &mut EngineState<H>, event: &PointerEvent) -> bool {
    if event.is_degenerate() {
        log::debug!("Pointer-Down bei (0, 0) ignoriert");
        return false;
    }
    if state.capture.is_capturing() || state.drag.is_some() || state.delete_click.is_some() {
        return false;
    }

    let pixel = state.host.client_to_container(event.client);
    if edit::begin_vertex_drag(state, pixel) {
        return true;
    }
    if edit::arm_delete(state, pixel) {
        capture::start(state, pixel);
        return true;
    }
    edit::append_at(state, pixel) || capture::start(state, pixel)
}
