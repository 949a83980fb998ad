//! Eingangs-Events vom Host und Änderungs-Benachrichtigungen an die Anwendung.

use glam::Vec2;

use crate::core::Polygon;
use crate::host::Listener;

/// Art eines Pointer-/Touch-Events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    /// Maus-/Pointer-Down
    Down,
    /// Pointer-Bewegung
    Move,
    /// Pointer-Up
    Up,
    /// Host-seitiger Abbruch (`pointercancel`)
    Cancel,
    /// Touch-Start (wird als Pointer-Down behandelt)
    TouchStart,
    /// Touch-Bewegung
    TouchMove,
    /// Touch-Ende
    TouchEnd,
    /// Pointer verlässt den Dokument-Body
    BodyLeave,
}

/// Ein vom Host geliefertes Event mit Client-Koordinaten.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Event-Art
    pub kind: PointerKind,
    /// Position in Client-Koordinaten (Fenster)
    pub client: Vec2,
}

impl PointerEvent {
    /// Erstellt ein Event.
    pub fn new(kind: PointerKind, client: Vec2) -> Self {
        Self { kind, client }
    }

    /// Pointer-Down an `(x, y)`.
    pub fn down(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Down, Vec2::new(x, y))
    }

    /// Pointer-Move an `(x, y)`.
    pub fn moved(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Move, Vec2::new(x, y))
    }

    /// Pointer-Up an `(x, y)`.
    pub fn up(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Up, Vec2::new(x, y))
    }

    /// Listener, über den dieses Event zugestellt wird.
    pub fn listener(&self) -> Listener {
        match self.kind {
            PointerKind::Down => Listener::PointerDown,
            PointerKind::Move => Listener::PointerMove,
            PointerKind::Up => Listener::PointerUp,
            PointerKind::Cancel => Listener::PointerCancel,
            PointerKind::TouchStart => Listener::TouchStart,
            PointerKind::TouchMove => Listener::TouchMove,
            PointerKind::TouchEnd => Listener::TouchEnd,
            PointerKind::BodyLeave => Listener::BodyLeave,
        }
    }

    /// Touch-emulierte Maus-Events kommen teils mit (0, 0) an und werden ignoriert.
    pub fn is_degenerate(&self) -> bool {
        self.client == Vec2::ZERO
    }
}

/// Grund einer Änderungs-Benachrichtigung.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeReason {
    /// Polygon erstellt (Geste oder programmatisch)
    Create,
    /// Polygon entfernt
    Remove,
    /// Alle Polygone entfernt
    Clear,
    /// Polygon bearbeitet (Vertex verschoben oder eingefügt)
    Edit,
}

impl ChangeReason {
    /// Kennung als String (`"create"`, `"remove"`, `"clear"`, `"edit"`).
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeReason::Create => "create",
            ChangeReason::Remove => "remove",
            ChangeReason::Clear => "clear",
            ChangeReason::Edit => "edit",
        }
    }
}

/// Benachrichtigung mit owned Snapshot aller Polygone.
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    /// Auslöser
    pub reason: ChangeReason,
    /// Alle Polygone nach der Änderung
    pub polygons: Vec<Polygon>,
}

/// Callback für Änderungs-Benachrichtigungen.
pub type ChangeCallback = Box<dyn FnMut(&ChangeEvent)>;
