use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use glam::Vec2;
use map_freedraw::{
    CreateOptions, EngineOptions, FreeDraw, GeoPoint, HeadlessMap, MapHost, ModeSet, PointerEvent,
};
use std::hint::black_box;

fn circle_points(center: Vec2, radius: f32, count: usize) -> Vec<Vec2> {
    (0..count)
        .map(|i| {
            let angle = i as f32 / count as f32 * std::f32::consts::TAU;
            center + Vec2::new(angle.cos(), angle.sin()) * radius
        })
        .collect()
}

fn create_only_engine() -> FreeDraw<HeadlessMap> {
    let mut engine = FreeDraw::new(EngineOptions {
        mode: ModeSet::CREATE,
        ..EngineOptions::default()
    });
    engine
        .attach(HeadlessMap::new())
        .expect("attach fehlgeschlagen");
    engine
}

fn bench_pointer_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("pointer_moves");

    for &count in &[100usize, 1_000usize, 10_000usize] {
        let points = circle_points(Vec2::new(500.0, 500.0), 300.0, count);

        group.bench_with_input(BenchmarkId::new("capture", count), &points, |b, points| {
            b.iter_batched(
                || {
                    let mut engine = create_only_engine();
                    engine.handle_event(&PointerEvent::down(points[0].x, points[0].y));
                    engine
                },
                |mut engine| {
                    for point in points {
                        engine.handle_event(black_box(&PointerEvent::moved(point.x, point.y)));
                    }
                    black_box(engine.is_capturing())
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

/// Engine mit einem Raster aus `count` kleinen Quadraten.
fn populated_engine(count: usize) -> FreeDraw<HeadlessMap> {
    let mut engine = create_only_engine();
    let map = HeadlessMap::new();
    let columns = (count as f32).sqrt().ceil() as usize;

    for index in 0..count {
        let x = (index % columns) as f32 * 40.0 + 10.0;
        let y = (index / columns) as f32 * 40.0 + 10.0;
        let square: Vec<GeoPoint> = [(x, y), (x + 20.0, y), (x + 20.0, y + 20.0), (x, y + 20.0)]
            .iter()
            .map(|&(px, py)| map.container_to_geo(Vec2::new(px, py)))
            .collect();
        engine
            .create(&square, CreateOptions::default())
            .expect("Quadrat sollte erstellt werden");
    }
    engine
}

fn bench_gesture_finish(c: &mut Criterion) {
    let mut group = c.benchmark_group("gesture_finish");
    let points = circle_points(Vec2::new(120.0, 120.0), 90.0, 500);

    for &store_size in &[10usize, 100usize] {
        group.bench_with_input(
            BenchmarkId::new("simplify_merge", store_size),
            &store_size,
            |b, &store_size| {
                b.iter_batched(
                    || {
                        let mut engine = populated_engine(store_size);
                        engine.handle_event(&PointerEvent::down(points[0].x, points[0].y));
                        for point in &points {
                            engine.handle_event(&PointerEvent::moved(point.x, point.y));
                        }
                        engine
                    },
                    |mut engine| {
                        engine.handle_event(&PointerEvent::up(points[0].x, points[0].y));
                        black_box(engine.size())
                    },
                    BatchSize::SmallInput,
                )
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_pointer_moves, bench_gesture_finish);
criterion_main!(benches);
