//! Fehlertypen der Freihand-Engine.
//!
//! Fast alle "Fehler" sind erwartete Ergebnisse von Gesten (zu kurzer Strich,
//! Cap erreicht) und werden von der Capture-State-Machine still verworfen.
//! Nur `attach`, `create` und strikte Modus-Eingaben reichen sie an den Aufrufer.

use thiserror::Error;

/// Fehler der Freihand-Engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FreeDrawError {
    /// Nach Vereinfachung blieben weniger als 3 unterschiedliche Eckpunkte übrig.
    #[error("zu wenige Punkte fuer ein Polygon (mindestens 3 unterschiedliche Eckpunkte)")]
    InsufficientPoints,
    /// Modus-Wert enthält Bits außerhalb von `ModeSet::ALL`.
    #[error("ungueltiger Modus-Wert: {0:#06b}")]
    InvalidMode(u32),
    /// Polygon-Cap erreicht, das neueste Polygon wird abgewiesen.
    #[error("maximale Polygon-Anzahl erreicht ({maximum})")]
    CapacityReached {
        /// Konfiguriertes Maximum
        maximum: usize,
    },
    /// Operation benötigt eine angehängte Karte.
    #[error("Engine ist an keine Karte angehaengt")]
    NotAttached,
    /// `attach` wurde auf einer bereits angehängten Engine aufgerufen.
    #[error("Engine ist bereits an eine Karte angehaengt")]
    AlreadyAttached,
    /// Konfiguration ist nicht verwendbar.
    #[error("ungueltige Optionen: {0}")]
    InvalidOptions(String),
}

impl FreeDrawError {
    /// Gibt `true` zurück für Fehler, die normale Gesten-Ergebnisse sind
    /// und nicht an den Benutzer gemeldet werden.
    pub fn is_silent(&self) -> bool {
        matches!(
            self,
            FreeDrawError::InsufficientPoints | FreeDrawError::CapacityReached { .. }
        )
    }
}
