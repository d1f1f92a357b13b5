//! Criterion benchmarks for snapshot capture, hashing and columnar output.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use weir_arena::OwnedSnapshot;
use weir_bench::stress_profile;
use weir_core::StateView;
use weir_engine::Simulation;
use weir_record::{snapshot_hash, ColumnarWriter};

fn stepped_snapshot() -> OwnedSnapshot {
    let mut sim = Simulation::new(stress_profile(10_001)).unwrap();
    for _ in 0..50 {
        sim.step().unwrap();
    }
    sim.owned_snapshot()
}

fn bench_capture(c: &mut Criterion) {
    let mut sim = Simulation::new(stress_profile(10_001)).unwrap();
    sim.step().unwrap();
    c.bench_function("owned_snapshot_10k", |b| {
        b.iter(|| black_box(sim.owned_snapshot()));
    });
}

fn bench_hash(c: &mut Criterion) {
    let snap = stepped_snapshot();
    c.bench_function("snapshot_hash_10k", |b| {
        b.iter(|| black_box(snapshot_hash(black_box(&snap as &dyn StateView))));
    });
}

fn bench_columnar(c: &mut Criterion) {
    let snap = stepped_snapshot();
    c.bench_function("columnar_frame_10k", |b| {
        b.iter(|| {
            let mut writer = ColumnarWriter::new(Vec::with_capacity(1 << 20)).unwrap();
            writer.write_frame(&snap).unwrap();
            black_box(writer.into_inner().unwrap());
        });
    });
}

criterion_group!(benches, bench_capture, bench_hash, bench_columnar);
criterion_main!(benches);
