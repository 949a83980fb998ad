//! Freihand-Capture: explizite State-Machine für eine Zeichen-Geste.
//!
//! Phasen: `Idle → Capturing → (Completing | Cancelled) → Idle`.
//! `Completing` und `Cancelled` sind Durchgangsphasen: sie werden innerhalb
//! eines Handler-Aufrufs betreten und wieder verlassen.

use glam::Vec2;
use indexmap::IndexSet;

use super::builder;
use super::state::EngineState;
use super::ChangeReason;
use crate::core::{GeoPoint, ModeSet};
use crate::host::MapHost;
use crate::render::{PathRenderer, StrokeStyle};

/// Phase der Capture-State-Machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CapturePhase {
    /// Keine Geste aktiv
    #[default]
    Idle,
    /// Punkte werden gesammelt
    Capturing,
    /// Geste beendet, Polygon wird gebaut
    Completing,
    /// Geste abgebrochen, Punkte werden verworfen
    Cancelled,
}

/// Eingabe in die Capture-State-Machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureInput {
    /// Pointer-Down mit gesetztem CREATE-Bit
    Start,
    /// Pointer-Move
    Move,
    /// Pointer-Up / Touch-Ende
    Finish,
    /// `cancel()`, `pointercancel` oder Body-Leave
    Abort,
    /// Abschluss von Completing/Cancelled
    Settle,
}

impl CapturePhase {
    /// Übergangstabelle. `None` = Eingabe in dieser Phase ignorieren.
    pub fn next(self, input: CaptureInput) -> Option<CapturePhase> {
        use CaptureInput as I;
        use CapturePhase as P;

        match (self, input) {
            (P::Idle, I::Start) => Some(P::Capturing),
            (P::Capturing, I::Move) => Some(P::Capturing),
            (P::Capturing, I::Finish) => Some(P::Completing),
            (P::Capturing, I::Abort) => Some(P::Cancelled),
            (P::Completing, I::Settle) | (P::Cancelled, I::Settle) => Some(P::Idle),
            _ => None,
        }
    }
}

/// Flüchtiger Zustand einer Geste: deduplizierte Punkte plus Renderer-Zustand.
#[derive(Debug, Clone)]
pub struct Stroke {
    points: IndexSet<GeoPoint>,
    renderer: PathRenderer,
}

impl Stroke {
    fn new(style: StrokeStyle, origin: Vec2) -> Self {
        let mut renderer = PathRenderer::new(style);
        renderer.push(origin);
        Self {
            points: IndexSet::new(),
            renderer,
        }
    }

    /// Gesammelte Punkte (Reihenfolge der ersten Einfügung).
    pub fn points(&self) -> impl Iterator<Item = &GeoPoint> {
        self.points.iter()
    }

    /// Anzahl gesammelter (eindeutiger) Punkte.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Gibt `true` zurück, wenn noch kein Punkt gesammelt wurde.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Capture-State-Machine mit optionalem Stroke.
#[derive(Debug, Clone, Default)]
pub struct StrokeCapture {
    phase: CapturePhase,
    stroke: Option<Stroke>,
}

impl StrokeCapture {
    /// Erstellt eine Capture im Idle-Zustand.
    pub fn new() -> Self {
        Self::default()
    }

    /// Aktuelle Phase.
    pub fn phase(&self) -> CapturePhase {
        self.phase
    }

    /// Gibt `true` zurück während Punkte gesammelt werden.
    pub fn is_capturing(&self) -> bool {
        self.phase == CapturePhase::Capturing
    }

    /// Laufender Stroke (nur während Capturing).
    pub fn stroke(&self) -> Option<&Stroke> {
        self.stroke.as_ref()
    }

    fn transition(&mut self, input: CaptureInput) -> bool {
        match self.phase.next(input) {
            Some(next) => {
                self.phase = next;
                true
            }
            None => false,
        }
    }

    /// Startet eine neue Geste. `false` wenn bereits eine läuft.
    ///
    /// `origin` ist nur Startpunkt des Live-Strichs; Geo-Punkte kommen erst mit Moves.
    pub fn begin(&mut self, style: StrokeStyle, origin: Vec2) -> bool {
        if !self.transition(CaptureInput::Start) {
            return false;
        }
        self.stroke = Some(Stroke::new(style, origin));
        true
    }

    /// Nimmt einen Punkt auf und liefert das zu zeichnende Teilstück.
    pub fn record(&mut self, point: GeoPoint, pixel: Vec2) -> Option<Vec<Vec2>> {
        if !self.transition(CaptureInput::Move) {
            return None;
        }
        let stroke = self.stroke.as_mut()?;
        stroke.points.insert(point);
        stroke.renderer.push(pixel)
    }

    /// Capturing → Completing: übergibt die gesammelten Punkte.
    pub fn complete(&mut self) -> Option<Vec<GeoPoint>> {
        if !self.transition(CaptureInput::Finish) {
            return None;
        }
        let points = self
            .stroke
            .take()
            .map(|stroke| stroke.points.into_iter().collect())
            .unwrap_or_default();
        Some(points)
    }

    /// Capturing → Cancelled: verwirft die Punkte. `false` wenn nichts lief.
    pub fn cancel(&mut self) -> bool {
        if !self.transition(CaptureInput::Abort) {
            return false;
        }
        self.stroke = None;
        true
    }

    /// Completing/Cancelled → Idle.
    pub fn settle(&mut self) {
        self.transition(CaptureInput::Settle);
    }
}

// ── Handler auf dem Engine-Zustand ───────────────────────────────

/// Pointer-Down: startet die Aufnahme, sofern CREATE aktiv ist.
pub(crate) fn start<H: MapHost>(state: &mut EngineState<H>, pixel: Vec2) -> bool {
    if !state.mode().contains(ModeSet::CREATE) {
        log::debug!("Pointer-Down ignoriert: CREATE nicht aktiv");
        return false;
    }

    let style = StrokeStyle::from_options(&state.options);
    if !state.capture.begin(style, pixel) {
        return false;
    }

    state.listen_gesture();
    log::debug!("Freihand-Aufnahme gestartet bei {:?}", pixel);
    true
}

/// Pointer-Move: Punkt aufnehmen und Teilstück zeichnen.
pub(crate) fn record<H: MapHost>(state: &mut EngineState<H>, pixel: Vec2) {
    let point = state.host.container_to_geo(pixel);
    if let Some(segment) = state.capture.record(point, pixel) {
        let style = StrokeStyle::from_options(&state.options);
        state.host.draw_stroke(&segment, &style);
    }
}

/// Pointer-Up: Listener abbauen, Overlay leeren, Polygon bauen.
pub(crate) fn finish<H: MapHost>(state: &mut EngineState<H>) {
    // Teardown zuerst: kein Move kann nach dem Up mehr verarbeitet werden
    state.unlisten_gesture();
    state.host.clear_stroke();

    let Some(points) = state.capture.complete() else {
        return;
    };

    if !points.is_empty() {
        let options = state.options.clone();
        match builder::create_for(state, &points, &options) {
            Ok(id) => {
                log::info!("Polygon {:?} aus {} Punkt(en) erstellt", id, points.len());
                state.notify(ChangeReason::Create);
                if state.options.leave_mode_after_create {
                    let mut mode = state.mode();
                    mode.remove(ModeSet::CREATE);
                    state.set_mode(mode);
                }
            }
            Err(e) if e.is_silent() => log::debug!("Geste verworfen: {}", e),
            Err(e) => log::warn!("Geste verworfen: {}", e),
        }
    }

    state.capture.settle();
}

/// Abbruch: gleicher Teardown wie beim Up, aber ohne Polygon.
pub(crate) fn abort<H: MapHost>(state: &mut EngineState<H>) -> bool {
    if !state.capture.cancel() {
        return false;
    }
    state.unlisten_gesture();
    state.host.clear_stroke();
    state.capture.settle();
    log::debug!("Freihand-Aufnahme abgebrochen");
    true
}
