use criterion::{black_box, criterion_group, criterion_main, Criterion};
use docscan_capture::{fold, CaptureParams, Frame, ScanSession, StabilityHistory};
use docscan_core::{Point, Quad, Size};

fn page(offset: f64) -> Quad {
    Quad::new(
        Point::new(90.0 + offset, 1800.0),
        Point::new(990.0, 1800.0 - offset),
        Point::new(90.0, 150.0 + offset),
        Point::new(990.0 - offset, 150.0),
    )
}

fn full_history() -> StabilityHistory {
    StabilityHistory::from_newest_first((0..10).map(|i| page(i as f64)))
}

fn bench_fold_and_jitter(c: &mut Criterion) {
    let history = full_history();
    c.bench_function("fold_full_history", |b| {
        b.iter(|| fold(black_box(page(3.5)), black_box(&history)))
    });
    c.bench_function("jitter_full_history", |b| {
        b.iter(|| black_box(&history).jitter())
    });
}

fn bench_session_step(c: &mut Criterion) {
    let detector = Size::new(1080.0, 1920.0);
    let screen = Size::new(390.0, 844.0);
    // An unreachable jitter threshold keeps the session active on every frame.
    let params = CaptureParams {
        desired_jitter: 1e-9,
        ..CaptureParams::default()
    };
    let mut session = ScanSession::new(params).expect("params");
    let mut i = 0u32;
    c.bench_function("session_process_frame", |b| {
        b.iter(|| {
            i = i.wrapping_add(1);
            let frame = Frame::new(Some(page((i % 7) as f64)), detector, screen);
            black_box(session.process_frame(frame))
        })
    });
}

criterion_group!(benches, bench_fold_and_jitter, bench_session_step);
criterion_main!(benches);
