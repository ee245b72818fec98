//! Benchmarks for loop enumeration and full extraction.
//!
//! Drawings are grids of labelled rectangles sharing edges, which is the
//! worst realistic case for the enumerator: every interior edge joins two
//! candidate loops.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_takeoff_core::{SearchConfig, Tolerance};
use u_takeoff_d2::{enumerate_loops, Extractor, PlanarGraph, Primitives};

/// A `cols` x 1 strip of 100 x 60 cells with a label in each.
fn strip(cols: usize) -> Primitives {
    let mut primitives = Primitives::new();
    for i in 0..cols {
        let x = i as f64 * 100.0;
        primitives = primitives
            .with_outline(&[(x, 0.0), (x + 100.0, 0.0), (x + 100.0, 60.0), (x, 60.0)], "SAWN")
            .with_label((x + 50.0, 30.0), &format!("P{}", i));
    }
    primitives
}

fn bench_enumerate_loops(c: &mut Criterion) {
    let mut group = c.benchmark_group("enumerate_loops");
    group.sample_size(10);

    for &n in &[2, 4, 6] {
        let primitives = strip(n);
        let graph = PlanarGraph::build(&primitives.segments, Tolerance::default());
        let config = SearchConfig::default();

        group.bench_with_input(BenchmarkId::new("strip", n), &graph, |b, g| {
            b.iter(|| black_box(enumerate_loops(black_box(g), &config)))
        });
    }
    group.finish();
}

fn bench_extract(c: &mut Criterion) {
    let primitives = strip(4);
    let extractor = Extractor::default_config();
    c.bench_function("extract_strip_4", |b| {
        b.iter(|| black_box(extractor.extract(black_box(&primitives))))
    });
}

fn bench_graph_build(c: &mut Criterion) {
    let primitives = strip(20);
    c.bench_function("graph_build_strip_20", |b| {
        b.iter(|| PlanarGraph::build(black_box(&primitives.segments), Tolerance::default()))
    });
}

criterion_group!(benches, bench_enumerate_loops, bench_extract, bench_graph_build);
criterion_main!(benches);
