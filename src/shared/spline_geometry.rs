//! Reine Geometrie-Funktionen für die Stroke-Glättung (Catmull-Rom).
//!
//! Layer-neutral: wird vom Path-Renderer genutzt, ohne Abhängigkeit auf `app`.

use glam::Vec2;

/// Berechnet einen Punkt auf einem Catmull-Rom-Segment (t ∈ [0, 1]).
///
/// p0, p1, p2, p3: vier aufeinanderfolgende Kontrollpunkte.
/// Die Kurve verläuft von p1 nach p2.
pub fn catmull_rom_point(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * ((2.0 * p1)
        + (-p0 + p2) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * t3)
}

/// Geglättetes Teilstück von `p1` nach `p2` als Polyline (inkl. beider Endpunkte).
///
/// `smooth_factor` mischt zwischen gerader Sehne (0.0) und voller
/// Catmull-Rom-Kurve (1.0). `p3` ist noch unbekannt, solange der Strich läuft;
/// dann wird `p2` gespiegelt fortgesetzt.
pub fn smoothed_segment(
    p0: Vec2,
    p1: Vec2,
    p2: Vec2,
    p3: Option<Vec2>,
    smooth_factor: f32,
    samples: usize,
) -> Vec<Vec2> {
    let samples = samples.max(1);
    let smooth = smooth_factor.clamp(0.0, 1.0);
    if smooth <= f32::EPSILON {
        return vec![p1, p2];
    }

    let p3 = p3.unwrap_or_else(|| 2.0 * p2 - p1);
    (0..=samples)
        .map(|i| {
            let t = i as f32 / samples as f32;
            let straight = p1.lerp(p2, t);
            straight.lerp(catmull_rom_point(p0, p1, p2, p3, t), smooth)
        })
        .collect()
}
