mod latency;
mod memory;
mod throughput;

use std::env;
use std::time::Instant;

fn print_header() {
    println!("╔════════════════════════════════════════════════════════════════╗");
    println!("║           dictscan Performance Benchmark Suite                 ║");
    println!("║                                                                ║");
    println!("║  Testing: scan throughput, per-line latency, table footprint   ║");
    println!("╚════════════════════════════════════════════════════════════════╝");
    println!();
}

fn print_usage() {
    println!("Usage: dictscan-benchmark [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --all           Run all benchmarks (default)");
    println!("  --throughput    Run throughput benchmarks");
    println!("  --latency       Run latency benchmarks");
    println!("  --memory        Run memory benchmarks");
    println!("  --help          Show this help message");
    println!();
}

fn main() {
    print_header();

    let args: Vec<String> = env::args().collect();
    let benchmark_type = args.get(1).map(|s| s.as_str()).unwrap_or("--all");

    let start = Instant::now();

    match benchmark_type {
        "--all" | "" => {
            throughput::run();
            println!();
            latency::run();
            println!();
            memory::run();
        }
        "--throughput" => throughput::run(),
        "--latency" => latency::run(),
        "--memory" => memory::run(),
        "--help" | "-h" | "help" => {
            print_usage();
            return;
        }
        _ => {
            println!("Unknown option: {}", benchmark_type);
            print_usage();
            return;
        }
    }

    let elapsed = start.elapsed();
    println!("╔════════════════════════════════════════════════════════════════╗");
    println!("║  Benchmark completed in {:?}", elapsed);
    println!("╚════════════════════════════════════════════════════════════════╝");
}
