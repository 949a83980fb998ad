//! Inkrementeller Path-Renderer für den laufenden Freihand-Strich.

use glam::Vec2;

use crate::shared::spline_geometry::smoothed_segment;
use crate::shared::EngineOptions;

/// Stützpunkte pro geglättetem Teilstück.
const SAMPLES_PER_SEGMENT: usize = 4;

/// Stil des Live-Strichs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    /// Linienstärke in Pixeln
    pub width: f32,
    /// Linienfarbe (RGBA)
    pub color: [f32; 4],
    /// Glättung (0 = gerade Teilstücke)
    pub smooth_factor: f32,
}

impl StrokeStyle {
    /// Übernimmt den Stil aus den Engine-Optionen.
    pub fn from_options(options: &EngineOptions) -> Self {
        Self {
            width: options.stroke_width,
            color: options.color,
            smooth_factor: options.smooth_factor,
        }
    }
}

/// Merkt sich nur die letzten beiden Pixel-Punkte; jeder neue Punkt
/// erzeugt genau ein Teilstück vom vorigen zum neuen Punkt (O(1) pro Move).
#[derive(Debug, Clone)]
pub struct PathRenderer {
    style: StrokeStyle,
    before_last: Option<Vec2>,
    last: Option<Vec2>,
}

impl PathRenderer {
    /// Erstellt einen Renderer ohne Vorgänger-Punkt.
    pub fn new(style: StrokeStyle) -> Self {
        Self {
            style,
            before_last: None,
            last: None,
        }
    }

    /// Nimmt den nächsten Punkt auf und liefert das zu zeichnende Teilstück.
    ///
    /// Der erste Punkt einer Geste und Wiederholungen desselben Pixels erzeugen nichts.
    pub fn push(&mut self, point: Vec2) -> Option<Vec<Vec2>> {
        let Some(previous) = self.last else {
            self.last = Some(point);
            return None;
        };
        if previous == point {
            return None;
        }

        let anchor = self.before_last.unwrap_or(previous);
        let segment = smoothed_segment(
            anchor,
            previous,
            point,
            None,
            self.style.smooth_factor,
            SAMPLES_PER_SEGMENT,
        );

        self.before_last = Some(previous);
        self.last = Some(point);
        Some(segment)
    }
}
