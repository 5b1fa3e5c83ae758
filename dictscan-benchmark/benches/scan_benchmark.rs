// Scan Performance Benchmarks
//
// Compares build cost and scan throughput of the sparse and compact
// transition tables over generated dictionaries.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dictscan_ac::{Automaton, Transitions};
use dictscan_benchmark::{
    build_compact, build_sparse, generate_dictionary, generate_text, CORPUS_SEED,
};
use std::hint::black_box;
use std::time::Duration;

const TEXT_LEN: usize = 64 * 1024;

fn count_events<T: Transitions<u8>>(ac: &Automaton<u8, u32, T>, text: &[u8]) -> usize {
    let mut engine = ac.engine(text);
    let mut events = 0;
    while engine.advance() {
        events += 1;
    }
    events
}

/// Benchmark trie, fail-link and output construction
fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    group.measurement_time(Duration::from_secs(10));

    for pattern_count in [100, 1000, 10000].iter() {
        let dictionary = generate_dictionary(*pattern_count, CORPUS_SEED);

        group.bench_with_input(
            BenchmarkId::new("sparse", pattern_count),
            &dictionary,
            |b, dictionary| {
                b.iter(|| black_box(build_sparse(black_box(dictionary)).unwrap()));
            },
        );

        group.bench_with_input(
            BenchmarkId::new("compact", pattern_count),
            &dictionary,
            |b, dictionary| {
                b.iter(|| black_box(build_compact(black_box(dictionary)).unwrap()));
            },
        );
    }

    group.finish();
}

/// Benchmark a full scan of a fixed text with both table representations
fn bench_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan");
    group.throughput(Throughput::Bytes(TEXT_LEN as u64));

    for pattern_count in [10, 100, 1000, 10000].iter() {
        let dictionary = generate_dictionary(*pattern_count, CORPUS_SEED);
        let text = generate_text(TEXT_LEN, &dictionary, 0.01, CORPUS_SEED + 1);
        let sparse = build_sparse(&dictionary).unwrap();
        let compact = sparse.clone().into_compact().unwrap();

        group.bench_with_input(BenchmarkId::new("sparse", pattern_count), &text, |b, text| {
            b.iter(|| black_box(count_events(&sparse, black_box(text))));
        });

        group.bench_with_input(BenchmarkId::new("compact", pattern_count), &text, |b, text| {
            b.iter(|| black_box(count_events(&compact, black_box(text))));
        });
    }

    group.finish();
}

/// Benchmark scans that never match, the fail-link-heavy worst case
fn bench_scan_no_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan_no_match");
    group.throughput(Throughput::Bytes(TEXT_LEN as u64));

    let dictionary: Vec<Vec<u8>> = (0..100)
        .map(|i| format!("{}z", "a".repeat(i % 20 + 1)).into_bytes())
        .collect();
    let text = vec![b'a'; TEXT_LEN];
    let compact = build_compact(&dictionary).unwrap();

    group.bench_function("compact_repeated_prefix", |b| {
        b.iter(|| black_box(count_events(&compact, black_box(&text))));
    });

    group.finish();
}

criterion_group!(benches, bench_build, bench_scan, bench_scan_no_match);
criterion_main!(benches);
