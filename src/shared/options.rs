//! Zentrale Konfiguration der Freihand-Engine.
//!
//! `EngineOptions` enthält alle pro Engine-Instanz festen Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

use crate::core::{ModeSet, PolygonStyle};
use crate::error::FreeDrawError;

// ── Stroke & Polygon ────────────────────────────────────────────────

/// Glättungsfaktor für Stroke und Polygon-Kontur (0 = gerade Segmente).
pub const SMOOTH_FACTOR: f32 = 0.3;
/// Pixel-Toleranz zum Greifen von Eckpunkten und Einfügen auf Kanten.
pub const ELBOW_DISTANCE: f32 = 10.0;
/// Vereinfachungs-Toleranz in Pixeln.
pub const SIMPLIFY_FACTOR: f32 = 1.1;
/// Linienstärke in Pixeln.
pub const STROKE_WIDTH: f32 = 2.0;
/// Konturfarbe (RGBA: Blau).
pub const POLYGON_COLOR: [f32; 4] = [0.2, 0.53, 1.0, 1.0];
/// Deckkraft der Polygon-Füllung.
pub const FILL_OPACITY: f32 = 0.2;

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle Optionen einer Engine-Instanz. Jedes Feld hat einen dokumentierten Default,
/// fehlende Felder in TOML-Dateien werden damit aufgefüllt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// Initialer Modus
    pub mode: ModeSet,
    /// Glättung beim Rendern von Stroke und Kontur
    pub smooth_factor: f32,
    /// Pixel-Toleranz für Vertex-Drag und Kanten-Einfügen
    pub elbow_distance: f32,
    /// Vereinfachungs-Toleranz in Pixeln
    pub simplify_factor: f32,
    /// Überlappende Polygone zu einem vereinigen
    pub merge_polygons: bool,
    /// Konkave Polygone erlauben (false = konvexe Hülle erzwingen)
    pub concave_polygon: bool,
    /// Maximale Polygon-Anzahl (`None` = unbegrenzt)
    pub maximum_polygons: Option<usize>,
    /// Edit-Benachrichtigungen bis zum Verlassen des EDIT-Modus zurückhalten
    pub notify_after_edit_exit: bool,
    /// CREATE nach jedem erstellten Polygon automatisch deaktivieren
    pub leave_mode_after_create: bool,
    /// Linienstärke in Pixeln
    pub stroke_width: f32,
    /// Konturfarbe (RGBA)
    pub color: [f32; 4],
    /// Polygon-Fläche füllen
    pub fill: bool,
    /// Deckkraft der Füllung
    pub fill_opacity: f32,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            mode: ModeSet::ALL,
            smooth_factor: SMOOTH_FACTOR,
            elbow_distance: ELBOW_DISTANCE,
            simplify_factor: SIMPLIFY_FACTOR,
            merge_polygons: true,
            concave_polygon: true,
            maximum_polygons: None,
            notify_after_edit_exit: false,
            leave_mode_after_create: false,
            stroke_width: STROKE_WIDTH,
            color: POLYGON_COLOR,
            fill: true,
            fill_opacity: FILL_OPACITY,
        }
    }
}

impl EngineOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Prüft die Werte auf Verwendbarkeit (wird bei `attach` aufgerufen).
    pub fn validate(&self) -> Result<(), FreeDrawError> {
        let non_negative = [
            ("smooth_factor", self.smooth_factor),
            ("elbow_distance", self.elbow_distance),
            ("simplify_factor", self.simplify_factor),
            ("stroke_width", self.stroke_width),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(FreeDrawError::InvalidOptions(format!(
                    "{name} muss endlich und >= 0 sein (ist {value})"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.fill_opacity) {
            return Err(FreeDrawError::InvalidOptions(format!(
                "fill_opacity muss in [0, 1] liegen (ist {})",
                self.fill_opacity
            )));
        }
        Ok(())
    }

    /// Stil für neu erstellte Polygone.
    pub fn polygon_style(&self) -> PolygonStyle {
        PolygonStyle {
            stroke_width: self.stroke_width,
            color: self.color,
            fill: self.fill,
            fill_opacity: self.fill_opacity,
            smooth_factor: self.smooth_factor,
        }
    }

    /// Wendet Overrides für einen programmatischen `create`-Aufruf an.
    pub fn with_overrides(&self, overrides: &CreateOptions) -> Self {
        let mut options = self.clone();
        if let Some(concave) = overrides.concave_polygon {
            options.concave_polygon = concave;
        }
        if let Some(merge) = overrides.merge_polygons {
            options.merge_polygons = merge;
        }
        if let Some(factor) = overrides.simplify_factor {
            options.simplify_factor = factor;
        }
        options
    }
}

/// Overrides für programmatisches Erstellen (`None` = Engine-Option übernehmen).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CreateOptions {
    /// Konkave Polygone erlauben
    pub concave_polygon: Option<bool>,
    /// Mit überlappenden Polygonen vereinigen
    pub merge_polygons: Option<bool>,
    /// Vereinfachungs-Toleranz in Pixeln
    pub simplify_factor: Option<f32>,
}
