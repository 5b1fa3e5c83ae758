// Quick release mode throughput check
//
// Run with: cargo test --release -p dictscan-ac scan_perf -- --ignored

#[cfg(test)]
mod perf_tests {
    use crate::{AcBuilder, Pattern};
    use std::time::Instant;

    #[test]
    #[ignore] // Run with: cargo test --release scan_perf -- --ignored
    fn scan_perf() {
        let patterns: Vec<_> = (0..1000)
            .map(|i| Pattern::from_bytes(format!("pattern_{}", i), i))
            .collect();

        let sparse = AcBuilder::new().add_patterns(patterns.clone()).build().unwrap();
        let compact = AcBuilder::new().add_patterns(patterns).build_compact().unwrap();

        let text: Vec<u8> = (0..1_000_000u32)
            .map(|i| b"abcdefghijklmnopqrstuvwxyz_0123456789"[(i * 7 % 37) as usize])
            .collect();

        // Warmup
        let _ = sparse.find_iter(&text).count();
        let _ = compact.find_iter(&text).count();

        let start = Instant::now();
        let sparse_hits = sparse.find_iter(&text).count();
        let sparse_time = start.elapsed();

        let start = Instant::now();
        let compact_hits = compact.find_iter(&text).count();
        let compact_time = start.elapsed();

        println!("\n=== Release Mode Scan Performance ===");
        println!("Text: {} bytes, patterns: 1000", text.len());
        println!("Sparse:  {:?} ({} hits)", sparse_time, sparse_hits);
        println!("Compact: {:?} ({} hits)", compact_time, compact_hits);
        println!(
            "Compact throughput: {:.2} MB/sec",
            (text.len() as f64 / compact_time.as_secs_f64()) / 1_000_000.0
        );

        assert_eq!(sparse_hits, compact_hits);
    }
}
