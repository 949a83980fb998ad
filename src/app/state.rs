//! Per-Karten-Zustand der Engine: Modus, Store, Gesten, Listener und Benachrichtigung.
//!
//! Existiert nur zwischen `attach` und `detach`. Mit dem Detach wird der
//! gesamte Zustand (inkl. Store) freigegeben und der Host zurückgegeben.

use super::capture::StrokeCapture;
use super::edit::{self, DeleteClick, VertexDrag};
use super::{ChangeCallback, ChangeEvent, ChangeLog, ChangeReason};
use crate::core::geometry::{simplify_path, Simplifier};
use crate::core::{ModeSet, PolygonStore};
use crate::host::{Listener, ListenerSet, MapHost};
use crate::shared::EngineOptions;

/// Zustand einer an eine Karte angehängten Engine.
pub struct EngineState<H: MapHost> {
    /// Karten-Host (Projektion, Listener, Overlay)
    pub host: H,
    /// Optionen der Engine-Instanz
    pub options: EngineOptions,
    /// Aktiver Modus
    pub(crate) mode: ModeSet,
    /// Alle Polygone dieser Karte
    pub store: PolygonStore,
    /// Freihand-Capture (Idle/Capturing)
    pub capture: StrokeCapture,
    /// Laufender Vertex-Drag im EDIT-Modus
    pub drag: Option<VertexDrag>,
    /// Gedrückter Lösch-Klick im DELETE-Modus
    pub delete_click: Option<DeleteClick>,
    /// Zurückgehaltene Edit-Benachrichtigung (`notify_after_edit_exit`)
    pub pending_edit: bool,
    /// Vereinfachungs-Routine für neue Polygone
    pub simplifier: Simplifier,
    /// Log der ausgelösten Benachrichtigungen
    pub change_log: ChangeLog,
    listeners: ListenerSet,
    notifier: Option<ChangeCallback>,
}

impl<H: MapHost> EngineState<H> {
    /// Erstellt den Zustand für eine frisch angehängte Karte.
    pub fn new(host: H, options: EngineOptions) -> Self {
        Self {
            host,
            mode: options.mode,
            options,
            store: PolygonStore::new(),
            capture: StrokeCapture::new(),
            drag: None,
            delete_click: None,
            pending_edit: false,
            simplifier: simplify_path,
            change_log: ChangeLog::new(),
            listeners: ListenerSet::default(),
            notifier: None,
        }
    }

    /// Aktiver Modus.
    pub fn mode(&self) -> ModeSet {
        self.mode
    }

    /// Setzt den Modus und wendet die Seiteneffekte an.
    ///
    /// EDIT betreten hängt Handles an alle Polygone; EDIT verlassen bricht einen
    /// laufenden Vertex-Drag ab, entfernt die Handles und löst eine
    /// zurückgehaltene Edit-Benachrichtigung aus.
    pub fn set_mode(&mut self, mode: ModeSet) {
        let previous = self.mode;
        self.mode = mode;
        if previous == mode {
            return;
        }

        let had_edit = previous.contains(ModeSet::EDIT);
        let has_edit = mode.contains(ModeSet::EDIT);
        if !had_edit && has_edit {
            edit::attach_handles(self);
        } else if had_edit && !has_edit {
            edit::abort_vertex_drag(self);
            edit::detach_handles(self);
            edit::flush_pending_edit(self);
        }

        if previous.contains(ModeSet::DELETE) && !mode.contains(ModeSet::DELETE) {
            edit::abort_delete(self);
        }

        self.host.mode_changed(mode);
        log::info!("Modus: {:?} -> {:?}", previous, mode);
    }

    // ── Listener ────────────────────────────────────────────────

    /// Prüft ob ein Listener aktuell registriert ist.
    pub fn is_listening(&self, listener: Listener) -> bool {
        self.listeners.contains(listener)
    }

    /// Registriert einen Listener beim Host (doppelte Registrierung ist ein No-op).
    pub fn listen(&mut self, listener: Listener) {
        if self.listeners.insert(listener) {
            self.host.listen(listener);
        }
    }

    /// Entfernt einen Listener beim Host (fehlende Registrierung ist ein No-op).
    pub fn unlisten(&mut self, listener: Listener) {
        if self.listeners.remove(listener) {
            self.host.unlisten(listener);
        }
    }

    /// Registriert die Gesten-Listener (Move/Up/Cancel/…).
    pub fn listen_gesture(&mut self) {
        for listener in Listener::GESTURE {
            self.listen(listener);
        }
    }

    /// Entfernt die Gesten-Listener. Läuft bei jedem Verlassen einer Geste.
    pub fn unlisten_gesture(&mut self) {
        for listener in Listener::GESTURE {
            self.unlisten(listener);
        }
    }

    /// Entfernt alle Listener (Detach).
    pub fn unlisten_all(&mut self) {
        self.unlisten_gesture();
        for listener in Listener::PERSISTENT {
            self.unlisten(listener);
        }
    }

    // ── Benachrichtigung ────────────────────────────────────────

    /// Setzt den Änderungs-Callback und gibt den vorherigen zurück.
    pub fn set_notifier(&mut self, callback: Option<ChangeCallback>) -> Option<ChangeCallback> {
        std::mem::replace(&mut self.notifier, callback)
    }

    /// Löst eine Benachrichtigung mit Snapshot aller Polygone aus.
    ///
    /// Der Snapshot wird vor dem Aufruf erstellt; der Callback sieht nie
    /// einen halb mutierten Store.
    pub fn notify(&mut self, reason: ChangeReason) {
        let event = ChangeEvent {
            reason,
            polygons: self.store.snapshot(),
        };
        self.change_log.record(reason, event.polygons.len());
        log::debug!(
            "Benachrichtigung '{}' mit {} Polygon(en)",
            reason.as_str(),
            event.polygons.len()
        );

        if let Some(mut callback) = self.notifier.take() {
            callback(&event);
            self.notifier = Some(callback);
        }
    }
}
