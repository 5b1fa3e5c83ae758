use dictscan_benchmark::{build_sparse, format_bytes, generate_dictionary, CORPUS_SEED};

const PATTERN_COUNTS: &[usize] = &[100, 1000, 10000, 100000];

fn get_memory_usage() -> Option<u64> {
    std::fs::read_to_string("/proc/self/status")
        .ok()?
        .lines()
        .find(|line| line.starts_with("VmRSS:"))?
        .split_whitespace()
        .nth(1)?
        .parse::<u64>()
        .ok()
        .map(|kb| kb * 1024)
}

pub fn run_memory_benchmark() {
    println!("\n=== Memory Usage Benchmark ===\n");

    let idle_memory = get_memory_usage().unwrap_or(0);
    println!("  Idle memory (baseline): {}", format_bytes(idle_memory));

    for &count in PATTERN_COUNTS {
        let dictionary = generate_dictionary(count, CORPUS_SEED);
        let before = get_memory_usage().unwrap_or(0);

        let sparse = match build_sparse(&dictionary) {
            Ok(ac) => ac,
            Err(e) => {
                println!("  {} patterns: build failed: {}", count, e);
                continue;
            }
        };
        let sparse_rss = get_memory_usage().unwrap_or(0).saturating_sub(before);
        let stats = sparse.stats();

        let compact = match sparse.into_compact() {
            Ok(ac) => ac,
            Err(e) => {
                println!("  {} patterns: compaction failed: {}", count, e);
                continue;
            }
        };
        let compact_rss = get_memory_usage().unwrap_or(0).saturating_sub(before);

        println!(
            "\n  {} patterns: {} states, {} transitions, {} output entries",
            count, stats.states, stats.transitions, stats.output_entries
        );
        println!("    Flat table estimate: {}", format_bytes(stats.memory_usage as u64));
        println!("    RSS after sparse build: {}", format_bytes(sparse_rss));
        println!("    RSS after compaction: {}", format_bytes(compact_rss));
        drop(compact);
    }
}

pub fn run() {
    run_memory_benchmark();
}
