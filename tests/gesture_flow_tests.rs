//! Integrationstests für den Gesten-Ablauf über `HeadlessMap`:
//! - Freihand-Capture (Down → Moves → Up) und Polygon-Bau
//! - Mode-Gating, Abbruch, Body-Leave, degenerierte Events
//! - Touch-Eingabe und Listener-Teardown

use glam::Vec2;
use map_freedraw::{
    ChangeReason, EngineOptions, FreeDraw, HeadlessMap, Listener, MapHost, ModeSet,
    PointerEvent, PointerKind,
};
use std::cell::RefCell;
use std::rc::Rc;

fn engine_with(options: EngineOptions) -> FreeDraw<HeadlessMap> {
    let mut engine = FreeDraw::new(options);
    engine
        .attach(HeadlessMap::new())
        .expect("Attach sollte gelingen");
    engine
}

fn create_engine() -> FreeDraw<HeadlessMap> {
    engine_with(EngineOptions {
        mode: ModeSet::CREATE,
        ..EngineOptions::default()
    })
}

/// Grober Kreis mit `count` Punkten in Container-Pixeln.
fn rough_circle(center: Vec2, radius: f32, count: usize) -> Vec<Vec2> {
    (0..count)
        .map(|i| {
            let angle = i as f32 / count as f32 * std::f32::consts::TAU;
            // leichte Unregelmäßigkeit wie bei einer Handbewegung
            let wobble = if i % 2 == 0 { 1.0 } else { 0.93 };
            center + Vec2::new(angle.cos(), angle.sin()) * radius * wobble
        })
        .collect()
}

/// Down am ersten Punkt, Move über alle Punkte, Up am letzten.
fn drag(engine: &mut FreeDraw<HeadlessMap>, points: &[Vec2]) {
    let (first, last) = match (points.first(), points.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return,
    };
    engine.handle_event(&PointerEvent::new(PointerKind::Down, first));
    for point in points {
        engine.handle_event(&PointerEvent::new(PointerKind::Move, *point));
    }
    engine.handle_event(&PointerEvent::new(PointerKind::Up, last));
}

fn recorded_reasons(engine: &mut FreeDraw<HeadlessMap>) -> Rc<RefCell<Vec<ChangeReason>>> {
    let reasons = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&reasons);
    engine.on_change(move |event| sink.borrow_mut().push(event.reason));
    reasons
}

// ─── Erstellen per Geste ─────────────────────────────────────────────────────

#[test]
fn test_rough_circle_creates_one_polygon() {
    let mut engine = engine_with(EngineOptions::default());
    engine.set_mode(ModeSet::CREATE);
    let reasons = recorded_reasons(&mut engine);

    drag(&mut engine, &rough_circle(Vec2::new(200.0, 150.0), 80.0, 10));

    assert_eq!(engine.size(), 1);
    let polygons = engine.all();
    assert!(polygons[0].vertex_count() >= 3);
    assert_eq!(*reasons.borrow(), vec![ChangeReason::Create]);
    assert!(!engine.is_capturing());
}

#[test]
fn test_polygon_ring_is_closed() {
    let mut engine = create_engine();
    drag(&mut engine, &rough_circle(Vec2::new(300.0, 300.0), 120.0, 40));

    let polygon = engine.all().into_iter().next().expect("Polygon erwartet");
    assert_ne!(polygon.boundary.first(), polygon.boundary.last());
    let ring = polygon.closed_ring();
    assert_eq!(ring.first(), ring.last());
    assert_eq!(ring.len(), polygon.vertex_count() + 1);
}

#[test]
fn test_two_distinct_points_create_no_polygon() {
    let mut engine = create_engine();
    let reasons = recorded_reasons(&mut engine);

    let a = Vec2::new(100.0, 100.0);
    let b = Vec2::new(150.0, 150.0);
    drag(&mut engine, &[a, a, b, b, a]);

    assert_eq!(engine.size(), 0);
    assert!(reasons.borrow().is_empty());
}

#[test]
fn test_collinear_gesture_creates_no_polygon() {
    let mut engine = create_engine();
    let line: Vec<Vec2> = (1..=20).map(|i| Vec2::new(i as f32 * 10.0, 50.0)).collect();
    drag(&mut engine, &line);
    assert_eq!(engine.size(), 0);
}

#[test]
fn test_container_offset_is_respected() {
    let offset = Vec2::new(20.0, 40.0);
    let mut engine = FreeDraw::new(EngineOptions {
        mode: ModeSet::CREATE,
        merge_polygons: false,
        ..EngineOptions::default()
    });
    engine
        .attach(HeadlessMap::new().with_container_offset(offset))
        .expect("Attach sollte gelingen");

    let circle: Vec<Vec2> = rough_circle(Vec2::new(200.0, 150.0), 60.0, 24)
        .into_iter()
        .map(|p| p + offset)
        .collect();
    drag(&mut engine, &circle);

    let host = engine.host().expect("Host erwartet");
    let polygon = engine.all().into_iter().next().expect("Polygon erwartet");
    let min_x = polygon
        .boundary
        .iter()
        .map(|p| host.geo_to_container(*p).x)
        .fold(f32::INFINITY, f32::min);
    // Container-Raum: Kreis beginnt bei x ≈ 140, nicht bei 160
    assert!((min_x - 140.0).abs() < 6.0, "min_x = {min_x}");
}

/// Acht in Container-Pixeln: Kanten (100,200)→(250,125) und (250,175)→(100,100)
/// kreuzen sich bei (200,150). Schlaufen: 5000 und 1250 Pixel².
fn figure_eight() -> Vec<Vec2> {
    vec![
        Vec2::new(100.0, 100.0),
        Vec2::new(100.0, 200.0),
        Vec2::new(250.0, 125.0),
        Vec2::new(250.0, 175.0),
    ]
}

#[test]
fn test_self_intersecting_gesture_keeps_both_lobes() {
    for merge_polygons in [true, false] {
        let mut engine = engine_with(EngineOptions {
            mode: ModeSet::CREATE,
            merge_polygons,
            ..EngineOptions::default()
        });
        let reasons = recorded_reasons(&mut engine);

        drag(&mut engine, &figure_eight());

        assert!(engine.size() >= 1, "merge = {merge_polygons}");
        // 6250 Pixel² bei 0.001° pro Pixel
        let total: f64 = engine.all().iter().map(|polygon| polygon.area()).sum();
        assert!(
            (total - 6250.0 * 1e-6).abs() < 1e-5,
            "merge = {merge_polygons}, Fläche {total}"
        );
        assert_eq!(*reasons.borrow(), vec![ChangeReason::Create]);
    }
}

#[test]
fn test_symmetric_bowtie_gesture_is_not_rejected() {
    let mut engine = create_engine();
    let bowtie = [
        Vec2::new(100.0, 100.0),
        Vec2::new(200.0, 200.0),
        Vec2::new(200.0, 100.0),
        Vec2::new(100.0, 200.0),
    ];
    drag(&mut engine, &bowtie);

    assert!(engine.size() >= 1);
    let total: f64 = engine.all().iter().map(|polygon| polygon.area()).sum();
    assert!((total - 5000.0 * 1e-6).abs() < 1e-5, "Fläche {total}");
}

#[test]
fn test_sub_pixel_gesture_is_degenerate() {
    // ohne Vereinfachung bleiben alle vier Eckpunkte erhalten
    let mut engine = engine_with(EngineOptions {
        mode: ModeSet::CREATE,
        simplify_factor: 0.0,
        ..EngineOptions::default()
    });
    let speck = [
        Vec2::new(100.0, 100.0),
        Vec2::new(100.5, 100.0),
        Vec2::new(100.5, 100.5),
        Vec2::new(100.0, 100.5),
    ];
    drag(&mut engine, &speck);
    assert_eq!(engine.size(), 0);
}

// ─── Mode-Gating ─────────────────────────────────────────────────────────────

#[test]
fn test_no_capture_without_create_bit() {
    for mode in [ModeSet::NONE, ModeSet::EDIT, ModeSet::DELETE, ModeSet::APPEND] {
        let mut engine = engine_with(EngineOptions {
            mode,
            ..EngineOptions::default()
        });
        engine.handle_event(&PointerEvent::down(100.0, 100.0));
        assert!(!engine.is_capturing(), "Modus {mode:?}");

        drag(&mut engine, &rough_circle(Vec2::new(200.0, 150.0), 80.0, 10));
        assert_eq!(engine.size(), 0, "Modus {mode:?}");
    }
}

#[test]
fn test_mode_change_applies_on_next_pointer_down() {
    let mut engine = engine_with(EngineOptions {
        mode: ModeSet::NONE,
        ..EngineOptions::default()
    });
    drag(&mut engine, &rough_circle(Vec2::new(200.0, 150.0), 80.0, 10));
    assert_eq!(engine.size(), 0);

    engine.set_mode(ModeSet::CREATE);
    drag(&mut engine, &rough_circle(Vec2::new(200.0, 150.0), 80.0, 10));
    assert_eq!(engine.size(), 1);
}

#[test]
fn test_leave_mode_after_create_clears_create_bit() {
    let mut engine = engine_with(EngineOptions {
        mode: ModeSet::CREATE | ModeSet::DELETE,
        leave_mode_after_create: true,
        ..EngineOptions::default()
    });

    drag(&mut engine, &rough_circle(Vec2::new(200.0, 150.0), 80.0, 12));

    assert_eq!(engine.size(), 1);
    assert_eq!(engine.mode(), ModeSet::DELETE);
    assert_eq!(engine.host().map(|h| h.mode), Some(ModeSet::DELETE));

    // zweite Geste außerhalb des Polygons: kein CREATE mehr
    drag(&mut engine, &rough_circle(Vec2::new(600.0, 150.0), 80.0, 12));
    assert_eq!(engine.size(), 1);
}

// ─── Abbruch ─────────────────────────────────────────────────────────────────

#[test]
fn test_cancel_is_idempotent() {
    let mut engine = create_engine();
    assert!(!engine.cancel());

    let circle = rough_circle(Vec2::new(200.0, 150.0), 80.0, 10);
    engine.handle_event(&PointerEvent::new(PointerKind::Down, circle[0]));
    for point in &circle {
        engine.handle_event(&PointerEvent::new(PointerKind::Move, *point));
    }
    assert!(engine.is_capturing());

    assert!(engine.cancel());
    assert!(!engine.cancel());
    assert!(!engine.is_capturing());

    // Up nach dem Abbruch trifft auf keinen Listener mehr
    assert!(!engine.handle_event(&PointerEvent::new(PointerKind::Up, circle[0])));
    assert_eq!(engine.size(), 0);
}

#[test]
fn test_pointer_cancel_and_body_leave_create_no_polygon() {
    for abort in [PointerKind::Cancel, PointerKind::BodyLeave] {
        let mut engine = create_engine();
        let reasons = recorded_reasons(&mut engine);
        let circle = rough_circle(Vec2::new(200.0, 150.0), 80.0, 10);

        engine.handle_event(&PointerEvent::new(PointerKind::Down, circle[0]));
        for point in &circle {
            engine.handle_event(&PointerEvent::new(PointerKind::Move, *point));
        }
        assert!(engine.handle_event(&PointerEvent::new(abort, circle[9])));

        assert_eq!(engine.size(), 0, "{abort:?}");
        assert!(reasons.borrow().is_empty(), "{abort:?}");
        let host = engine.host().expect("Host erwartet");
        assert!(!host.listeners.contains(Listener::PointerMove));
        assert!(host.listeners.contains(Listener::PointerDown));
        assert!(host.stroke_segments.is_empty());
    }
}

#[test]
fn test_pointer_down_at_origin_is_ignored() {
    let mut engine = create_engine();
    assert!(!engine.handle_event(&PointerEvent::down(0.0, 0.0)));
    assert!(!engine.is_capturing());
    let host = engine.host().expect("Host erwartet");
    assert!(!host.listeners.contains(Listener::PointerMove));
}

// ─── Listener & Overlay ──────────────────────────────────────────────────────

#[test]
fn test_gesture_listeners_only_while_capturing() {
    let mut engine = create_engine();
    let circle = rough_circle(Vec2::new(200.0, 150.0), 80.0, 10);

    engine.handle_event(&PointerEvent::new(PointerKind::Down, circle[0]));
    {
        let host = engine.host().expect("Host erwartet");
        for listener in Listener::GESTURE {
            assert!(host.listeners.contains(listener), "{listener:?}");
        }
    }

    for point in &circle {
        engine.handle_event(&PointerEvent::new(PointerKind::Move, *point));
    }
    assert!(!engine
        .host()
        .expect("Host erwartet")
        .stroke_segments
        .is_empty());

    engine.handle_event(&PointerEvent::new(PointerKind::Up, circle[9]));
    let host = engine.host().expect("Host erwartet");
    for listener in Listener::GESTURE {
        assert!(!host.listeners.contains(listener), "{listener:?}");
    }
    assert!(host.stroke_segments.is_empty());
    assert_eq!(host.stroke_clears, 1);

    // verspätetes Move nach dem Up wird ignoriert
    assert!(!engine.handle_event(&PointerEvent::new(PointerKind::Move, circle[3])));
}

#[test]
fn test_touch_gesture_creates_polygon() {
    let mut engine = create_engine();
    let circle = rough_circle(Vec2::new(200.0, 150.0), 80.0, 16);

    engine.handle_event(&PointerEvent::new(PointerKind::TouchStart, circle[0]));
    for point in &circle {
        engine.handle_event(&PointerEvent::new(PointerKind::TouchMove, *point));
    }
    engine.handle_event(&PointerEvent::new(PointerKind::TouchEnd, circle[15]));

    assert_eq!(engine.size(), 1);
}

#[test]
fn test_polygons_take_style_from_options() {
    let mut engine = engine_with(EngineOptions {
        mode: ModeSet::CREATE,
        stroke_width: 5.0,
        fill: false,
        ..EngineOptions::default()
    });
    drag(&mut engine, &rough_circle(Vec2::new(200.0, 150.0), 80.0, 10));

    let polygon = engine.all().into_iter().next().expect("Polygon erwartet");
    assert_eq!(polygon.style.stroke_width, 5.0);
    assert!(!polygon.style.fill);
    let host = engine.host().expect("Host erwartet");
    assert!(host.rendered.contains_key(&polygon.id));
}
