use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use routeweb::graphlib::{Graph, NodeId};
use routeweb::{LayoutOptions, layout};
use std::hint::black_box;
use std::time::Duration;

/// Ring of `n` systems with a chord every `stride` nodes; dense enough to
/// exercise the all-pairs repulsion terms without being pathological.
fn ring_with_chords(n: usize, stride: usize) -> Graph {
    let mut g = Graph::new();
    let ids: Vec<NodeId> = (0..n).map(|_| g.add_node()).collect();
    for i in 0..n {
        g.ensure_edge(ids[i], ids[(i + 1) % n]);
    }
    for i in (0..n).step_by(stride) {
        g.ensure_edge(ids[i], ids[(i + n / 2) % n]);
    }
    g
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(10);

    for &n in &[50usize, 150, 300] {
        let g = ring_with_chords(n, 7);
        let options = LayoutOptions {
            iterations: 50,
            ..Default::default()
        };
        group.bench_with_input(BenchmarkId::from_parameter(n), &g, |b, g| {
            b.iter(|| layout(black_box(g), &options).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_layout);
criterion_main!(benches);
