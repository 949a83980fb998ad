//! Map-FreeDraw Demo.
//!
//! Simuliert eine kreisförmige Freihand-Geste auf einer Headless-Karte und
//! gibt die entstandenen Polygone als JSON aus. Optionales erstes Argument:
//! Pfad zu einer TOML-Optionsdatei.

use std::f32::consts::TAU;
use std::path::PathBuf;

use glam::Vec2;
use map_freedraw::{EngineOptions, FreeDraw, HeadlessMap, PointerEvent, PointerKind};

/// Anzahl Stützpunkte der simulierten Geste
const GESTURE_STEPS: usize = 48;

fn main() -> anyhow::Result<()> {
    // Logger initialisieren
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Map-FreeDraw Demo v{} startet...", env!("CARGO_PKG_VERSION"));

    let options = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => EngineOptions::load_from_file(&path),
        None => EngineOptions::default(),
    };

    let mut engine = FreeDraw::new(options);
    engine.on_change(|event| {
        log::info!(
            "Änderung '{}': {} Polygon(e)",
            event.reason.as_str(),
            event.polygons.len()
        );
    });
    engine.attach(HeadlessMap::new().with_container_offset(Vec2::new(20.0, 40.0)))?;

    let offset = engine
        .host()
        .map(|host| host.container_offset)
        .unwrap_or(Vec2::ZERO);
    for event in circle_gesture(Vec2::new(200.0, 150.0), 80.0, offset) {
        engine.handle_event(&event);
    }

    let polygons = engine.all();
    println!("{}", serde_json::to_string_pretty(&polygons)?);

    if engine.detach().is_some() {
        log::info!("Demo beendet");
    }
    Ok(())
}

/// Down, Kreis aus Moves, Up (Client-Koordinaten).
fn circle_gesture(center: Vec2, radius: f32, offset: Vec2) -> Vec<PointerEvent> {
    let point = |step: usize| {
        let angle = step as f32 / GESTURE_STEPS as f32 * TAU;
        center + offset + Vec2::new(angle.cos(), angle.sin()) * radius
    };

    let mut events = Vec::with_capacity(GESTURE_STEPS + 3);
    events.push(PointerEvent::new(PointerKind::Down, point(0)));
    events.extend((1..=GESTURE_STEPS).map(|step| PointerEvent::new(PointerKind::Move, point(step))));
    events.push(PointerEvent::new(PointerKind::Up, point(GESTURE_STEPS)));
    events
}
