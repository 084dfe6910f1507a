use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_blockfall::core::{EngineConfig, GameSession, Grid};

fn bench_tick(c: &mut Criterion) {
    let mut session = GameSession::new(EngineConfig::default(), 12345);
    session.start();

    c.bench_function("session_tick_16ms", |b| {
        b.iter(|| {
            session.tick(black_box(16.0));
        })
    });
}

fn bench_sweep(c: &mut Criterion) {
    c.bench_function("sweep_4_rows", |b| {
        b.iter(|| {
            let mut grid = Grid::new(12, 20);
            // Fill bottom 4 rows.
            for y in 16..20 {
                for x in 0..12 {
                    grid.set(x, y, 5);
                }
            }
            grid.sweep();
        })
    });
}

fn bench_move(c: &mut Criterion) {
    let mut session = GameSession::new(EngineConfig::default(), 12345);
    session.start();

    c.bench_function("move_piece", |b| {
        b.iter(|| {
            session.move_piece(black_box(1));
            session.move_piece(black_box(-1));
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut session = GameSession::new(EngineConfig::default(), 12345);
    session.start();

    c.bench_function("rotate", |b| {
        b.iter(|| {
            session.rotate();
        })
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let mut session = GameSession::new(EngineConfig::default(), 12345);
    session.start();
    let mut snapshot = session.snapshot();

    c.bench_function("snapshot_into", |b| {
        b.iter(|| {
            session.snapshot_into(black_box(&mut snapshot));
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_sweep,
    bench_move,
    bench_rotate,
    bench_snapshot
);
criterion_main!(benches);
