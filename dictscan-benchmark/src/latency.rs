use std::time::{Duration, Instant};

use dictscan_ac::{MatchEngine, Transitions};
use dictscan_benchmark::{
    build_compact, calculate_percentiles, format_duration, generate_dictionary, generate_text,
    CORPUS_SEED,
};

const LATENCY_SAMPLE_COUNT: usize = 10000;
const WARMUP_COUNT: usize = 1000;
const DICTIONARY_SIZE: usize = 1000;
const LINE_LEN: usize = 128;

fn drain<'t, T: Transitions<u8>>(
    engine: &mut MatchEngine<'_, 't, u8, u32, T>,
    line: &'t [u8],
) -> usize {
    engine.bind(line);
    let mut events = 0;
    while engine.advance() {
        events += 1;
    }
    events
}

/// Time to bind an engine to one short line and drain every match event.
pub fn run_latency_benchmarks() {
    println!("\n=== Latency Benchmark Results ===\n");

    let dictionary = generate_dictionary(DICTIONARY_SIZE, CORPUS_SEED);
    let ac = match build_compact(&dictionary) {
        Ok(ac) => ac,
        Err(e) => {
            println!("  Build failed: {}", e);
            return;
        }
    };
    let line = generate_text(LINE_LEN, &dictionary, 0.05, CORPUS_SEED + 2);

    let mut engine = MatchEngine::new(&ac, &line);

    println!("  Warming up ({} iterations)...", WARMUP_COUNT);
    for _ in 0..WARMUP_COUNT {
        std::hint::black_box(drain(&mut engine, &line));
    }

    println!(
        "  Measuring latency distribution ({} samples of {} bytes)...\n",
        LATENCY_SAMPLE_COUNT, LINE_LEN
    );

    let mut latencies = Vec::with_capacity(LATENCY_SAMPLE_COUNT);
    for _ in 0..LATENCY_SAMPLE_COUNT {
        let start = Instant::now();
        std::hint::black_box(drain(&mut engine, &line));
        latencies.push(start.elapsed());
    }

    let (p50, p90, p99) = calculate_percentiles(&mut latencies);

    println!("  Latency Distribution:");
    println!("    P50: {}", format_duration(p50));
    println!("    P90: {}", format_duration(p90));
    println!("    P99: {}", format_duration(p99));
    if let Some(max) = latencies.iter().max() {
        println!("    Max: {}", format_duration(*max));
    }

    let sum: Duration = latencies.iter().sum();
    let avg = sum / latencies.len() as u32;
    println!("    Avg: {}", format_duration(avg));
}

pub fn run() {
    run_latency_benchmarks();
}
