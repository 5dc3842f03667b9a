//! Circuit construction and depth benchmarks.
//!
//! Run with: cargo bench -p qcut-ir

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use qcut_ir::{Circuit, QubitId};

/// One cost and one mixer layer on a ring of `n` qubits.
fn ring_layer(n: u32) -> Circuit {
    let mut circuit = Circuit::with_size("ring", n, n);
    for q in 0..n {
        circuit.h(QubitId(q)).unwrap();
    }
    for u in 0..n {
        let (a, b) = (QubitId(u), QubitId((u + 1) % n));
        circuit.cx(a, b).unwrap().rz(0.3, b).unwrap().cx(a, b).unwrap();
    }
    for q in 0..n {
        circuit.rx(0.7, QubitId(q)).unwrap();
    }
    circuit.measure_all().unwrap();
    circuit
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for n in [4u32, 8, 16] {
        group.bench_with_input(BenchmarkId::new("ring_layer", n), &n, |b, &n| {
            b.iter(|| ring_layer(black_box(n)));
        });
    }
    group.finish();
}

fn bench_compose(c: &mut Criterion) {
    let fragment = ring_layer(8);
    c.bench_function("compose_8q", |b| {
        b.iter(|| {
            let mut circuit = Circuit::with_size("host", 8, 8);
            circuit.compose(black_box(&fragment)).unwrap();
            circuit
        });
    });
}

fn bench_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("depth");
    for n in [4u32, 8, 16] {
        let circuit = ring_layer(n);
        group.bench_with_input(BenchmarkId::new("ring_layer", n), &circuit, |b, c| {
            b.iter(|| black_box(c.depth()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_compose, bench_depth);
criterion_main!(benches);
