//! Corpus generation and reporting helpers shared by the benchmark binary
//! and the criterion benches.

mod utils;

pub use utils::{
    build_compact, build_sparse, calculate_percentiles, format_bytes, format_duration,
    generate_dictionary, generate_text, ALPHABET, CORPUS_SEED,
};
