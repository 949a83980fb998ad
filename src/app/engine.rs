//! Öffentliche Engine-Fassade: an genau eine Karte gebunden.

use super::state::EngineState;
use super::{builder, capture, edit, pointer};
use super::{ChangeCallback, ChangeEvent, ChangeLog, ChangeReason, PointerEvent};
use crate::core::geometry::Simplifier;
use crate::core::{GeoPoint, ModeSet, Polygon, PolygonId};
use crate::error::FreeDrawError;
use crate::host::{Listener, MapHost};
use crate::shared::{CreateOptions, EngineOptions};

/// Freihand-Zeichen-Engine für eine Karte.
///
/// Vor `attach` existiert kein Per-Karten-Zustand: Abfragen liefern leere
/// Ergebnisse, mutierende Operationen sind No-ops, `create` liefert
/// `NotAttached`.
pub struct FreeDraw<H: MapHost> {
    options: EngineOptions,
    state: Option<EngineState<H>>,
    /// Callback, solange keine Karte angehängt ist
    parked_notifier: Option<ChangeCallback>,
    simplifier: Option<Simplifier>,
}

impl<H: MapHost> FreeDraw<H> {
    /// Erstellt eine nicht angehängte Engine.
    pub fn new(options: EngineOptions) -> Self {
        Self {
            options,
            state: None,
            parked_notifier: None,
            simplifier: None,
        }
    }

    /// Optionen der Instanz.
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Gibt `true` zurück, wenn eine Karte angehängt ist.
    pub fn is_attached(&self) -> bool {
        self.state.is_some()
    }

    // ── Lebenszyklus ────────────────────────────────────────────

    /// Hängt die Engine an eine Karte.
    pub fn attach(&mut self, host: H) -> Result<(), FreeDrawError> {
        if self.state.is_some() {
            return Err(FreeDrawError::AlreadyAttached);
        }
        self.options.validate()?;

        let mut state = EngineState::new(host, self.options.clone());
        if let Some(simplifier) = self.simplifier {
            state.simplifier = simplifier;
        }
        state.set_notifier(self.parked_notifier.take());
        for listener in Listener::PERSISTENT {
            state.listen(listener);
        }
        let mode = state.mode();
        state.host.mode_changed(mode);
        if mode.contains(ModeSet::EDIT) {
            edit::attach_handles(&mut state);
        }

        log::info!("Engine angehängt, Modus {:?}", mode);
        self.state = Some(state);
        Ok(())
    }

    /// Löst die Engine von der Karte und gibt den Host zurück.
    ///
    /// Bricht laufende Gesten ab, entfernt alle Listener und Overlays und
    /// verwirft den gesamten Per-Karten-Zustand.
    pub fn detach(&mut self) -> Option<H> {
        let mut state = self.state.take()?;

        capture::abort(&mut state);
        edit::abort_vertex_drag(&mut state);
        edit::abort_delete(&mut state);
        state.unlisten_all();
        for polygon in state.store.iter() {
            if polygon.handles_attached {
                state.host.hide_handles(polygon.id);
            }
            state.host.remove_polygon(polygon.id);
        }
        state.host.mode_changed(ModeSet::NONE);

        self.parked_notifier = state.set_notifier(None);
        log::info!("Engine gelöst, {} Polygon(e) verworfen", state.store.len());
        Some(state.host)
    }

    // ── Polygone ────────────────────────────────────────────────

    /// Erstellt ein Polygon programmatisch (ohne Pointer-Capture).
    pub fn create(
        &mut self,
        points: &[GeoPoint],
        overrides: CreateOptions,
    ) -> Result<Polygon, FreeDrawError> {
        let state = self.state.as_mut().ok_or(FreeDrawError::NotAttached)?;
        let options = state.options.with_overrides(&overrides);

        let id = builder::create_for(state, points, &options)?;
        let polygon = state
            .store
            .get(id)
            .cloned()
            .ok_or(FreeDrawError::InsufficientPoints)?;

        log::info!("Polygon {:?} programmatisch erstellt", id);
        state.notify(ChangeReason::Create);
        Ok(polygon)
    }

    /// Entfernt ein Polygon. Fehlende IDs sind ein No-op (`false`).
    pub fn remove(&mut self, id: PolygonId) -> bool {
        let Some(state) = self.state.as_mut() else {
            return false;
        };
        if !builder::remove_for(state, id) {
            return false;
        }
        state.notify(ChangeReason::Remove);
        true
    }

    /// Entfernt alle Polygone. Ein leerer Store ist ein No-op.
    pub fn clear(&mut self) -> usize {
        let Some(state) = self.state.as_mut() else {
            return 0;
        };
        let removed = builder::clear_for(state);
        if removed > 0 {
            log::info!("{} Polygon(e) entfernt", removed);
            state.notify(ChangeReason::Clear);
        }
        removed
    }

    /// Anzahl Polygone auf der angehängten Karte.
    pub fn size(&self) -> usize {
        self.state.as_ref().map_or(0, |state| state.store.len())
    }

    /// Snapshot aller Polygone in Einfügereihenfolge.
    pub fn all(&self) -> Vec<Polygon> {
        self.state
            .as_ref()
            .map(|state| state.store.snapshot())
            .unwrap_or_default()
    }

    /// Einzelnes Polygon.
    pub fn get(&self, id: PolygonId) -> Option<&Polygon> {
        self.state.as_ref()?.store.get(id)
    }

    // ── Modus ───────────────────────────────────────────────────

    /// Aktiver Modus (vor `attach`: der konfigurierte Startmodus).
    pub fn mode(&self) -> ModeSet {
        self.state
            .as_ref()
            .map_or(self.options.mode, |state| state.mode())
    }

    /// Setzt den Modus.
    pub fn set_mode(&mut self, mode: ModeSet) -> ModeSet {
        match self.state.as_mut() {
            Some(state) => {
                state.set_mode(mode);
                state.mode()
            }
            None => {
                self.options.mode = mode;
                mode
            }
        }
    }

    /// Setzt den Modus aus rohen Bits. Unbekannte Bits: Warnung, Modus bleibt.
    pub fn set_mode_bits(&mut self, bits: u32) -> ModeSet {
        match ModeSet::try_from_bits(bits) {
            Ok(mode) => self.set_mode(mode),
            Err(e) => {
                log::warn!("Modus nicht gesetzt: {}", e);
                self.mode()
            }
        }
    }

    // ── Gesten ──────────────────────────────────────────────────

    /// Bricht eine laufende Geste ab. Idempotent.
    pub fn cancel(&mut self) -> bool {
        let Some(state) = self.state.as_mut() else {
            return false;
        };
        edit::abort_delete(state) | edit::abort_vertex_drag(state) | capture::abort(state)
    }

    /// Gibt `true` zurück während eine Freihand-Geste läuft.
    pub fn is_capturing(&self) -> bool {
        self.state
            .as_ref()
            .is_some_and(|state| state.capture.is_capturing())
    }

    /// Einstiegspunkt für Events des Hosts.
    pub fn handle_event(&mut self, event: &PointerEvent) -> bool {
        match self.state.as_mut() {
            Some(state) => pointer::handle_event(state, event),
            None => false,
        }
    }

    // ── Benachrichtigung & Host ─────────────────────────────────

    /// Registriert den Änderungs-Callback (ersetzt einen vorherigen).
    pub fn on_change<F>(&mut self, callback: F)
    where
        F: FnMut(&ChangeEvent) + 'static,
    {
        let callback: ChangeCallback = Box::new(callback);
        match self.state.as_mut() {
            Some(state) => {
                state.set_notifier(Some(callback));
            }
            None => self.parked_notifier = Some(callback),
        }
    }

    /// Log der ausgelösten Benachrichtigungen (nur angehängt).
    pub fn change_log(&self) -> Option<&ChangeLog> {
        self.state.as_ref().map(|state| &state.change_log)
    }

    /// Angehängter Host.
    pub fn host(&self) -> Option<&H> {
        self.state.as_ref().map(|state| &state.host)
    }

    /// Angehängter Host (mutabel).
    pub fn host_mut(&mut self) -> Option<&mut H> {
        self.state.as_mut().map(|state| &mut state.host)
    }

    /// Ersetzt die Vereinfachungs-Routine (gilt auch für spätere Attaches).
    pub fn set_simplifier(&mut self, simplifier: Simplifier) {
        self.simplifier = Some(simplifier);
        if let Some(state) = self.state.as_mut() {
            state.simplifier = simplifier;
        }
    }
}
