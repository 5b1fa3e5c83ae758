use dictscan_ac::{AcBuilder, AcResult, CompactAutomaton, Pattern, SparseAutomaton};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

/// Symbols used for generated dictionaries and texts
pub const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// Fixed seed so every run scans the same corpus
pub const CORPUS_SEED: u64 = 0x5eed_d1c7;

/// Random lowercase words of 3 to 12 letters.
pub fn generate_dictionary(count: usize, seed: u64) -> Vec<Vec<u8>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let len = rng.gen_range(3..=12);
            (0..len)
                .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())])
                .collect()
        })
        .collect()
}

/// Random text with dictionary words planted at roughly `density` of positions.
pub fn generate_text(len: usize, dictionary: &[Vec<u8>], density: f64, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut text = Vec::with_capacity(len + 16);

    while text.len() < len {
        if !dictionary.is_empty() && rng.gen_bool(density) {
            let word = &dictionary[rng.gen_range(0..dictionary.len())];
            text.extend_from_slice(word);
        } else {
            text.push(ALPHABET[rng.gen_range(0..ALPHABET.len())]);
        }
    }

    text.truncate(len);
    text
}

pub fn build_sparse(dictionary: &[Vec<u8>]) -> AcResult<SparseAutomaton<u8, u32>> {
    AcBuilder::new()
        .add_patterns(
            dictionary
                .iter()
                .enumerate()
                .map(|(i, word)| Pattern::new(word.clone(), i as u32)),
        )
        .build()
}

pub fn build_compact(dictionary: &[Vec<u8>]) -> AcResult<CompactAutomaton<u8, u32>> {
    build_sparse(dictionary)?.into_compact()
}

pub fn calculate_percentiles(values: &mut [Duration]) -> (Duration, Duration, Duration) {
    values.sort();
    let len = values.len();

    let p50 = values[len / 2];
    let p90 = values[(len * 90) / 100];
    let p99 = values[(len * 99) / 100];

    (p50, p90, p99)
}

pub fn format_duration(d: Duration) -> String {
    let nanos = d.as_nanos();
    if nanos < 1000 {
        format!("{} ns", nanos)
    } else if nanos < 1_000_000 {
        format!("{:.2} µs", nanos as f64 / 1000.0)
    } else if nanos < 1_000_000_000 {
        format!("{:.2} ms", nanos as f64 / 1_000_000.0)
    } else {
        format!("{:.2} s", nanos as f64 / 1_000_000_000.0)
    }
}

pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.2} KB", bytes as f64 / 1024.0)
    } else if bytes < 1024 * 1024 * 1024 {
        format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.2} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
    }
}
