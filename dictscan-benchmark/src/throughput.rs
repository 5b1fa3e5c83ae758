use std::time::Instant;

use dictscan_ac::{Automaton, Transitions};
use dictscan_benchmark::{
    build_sparse, format_duration, generate_dictionary, generate_text, CORPUS_SEED,
};

const PATTERN_COUNTS: &[usize] = &[10, 100, 1000, 10000];
const TEXT_LEN: usize = 4 * 1024 * 1024;
const ROUNDS: u32 = 5;

/// Events found and time spent over `ROUNDS` full scans.
fn scan_rounds<T: Transitions<u8>>(ac: &Automaton<u8, u32, T>, text: &[u8]) -> (usize, f64) {
    let mut events = 0;
    let start = Instant::now();
    for _ in 0..ROUNDS {
        let mut engine = ac.engine(text);
        while engine.advance() {
            events += 1;
        }
    }
    (events / ROUNDS as usize, start.elapsed().as_secs_f64())
}

pub fn run_throughput_report() {
    println!("\n=== Throughput Benchmark Results ===\n");

    for &count in PATTERN_COUNTS {
        let dictionary = generate_dictionary(count, CORPUS_SEED);
        let text = generate_text(TEXT_LEN, &dictionary, 0.01, CORPUS_SEED + 1);

        let build_start = Instant::now();
        let sparse = match build_sparse(&dictionary) {
            Ok(ac) => ac,
            Err(e) => {
                println!("  {} patterns: build failed: {}", count, e);
                continue;
            }
        };
        let build_time = build_start.elapsed();
        let compact = match sparse.clone().into_compact() {
            Ok(ac) => ac,
            Err(e) => {
                println!("  {} patterns: compaction failed: {}", count, e);
                continue;
            }
        };

        let megabytes = (TEXT_LEN as f64 * ROUNDS as f64) / (1024.0 * 1024.0);
        let (events, sparse_secs) = scan_rounds(&sparse, &text);
        let (_, compact_secs) = scan_rounds(&compact, &text);

        println!(
            "  {} patterns ({} states, built in {}): {} match events",
            count,
            sparse.state_count(),
            format_duration(build_time),
            events
        );
        println!("    sparse:  {:.1} MB/s", megabytes / sparse_secs);
        println!("    compact: {:.1} MB/s", megabytes / compact_secs);
    }
}

pub fn run() {
    run_throughput_report();
}
