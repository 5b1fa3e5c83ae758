//! dictscan CLI
//!
//! Command-line front end for the dictscan Aho-Corasick automaton: scan text
//! against a pattern file, dump a compiled automaton, or replay the classic
//! demo scenarios.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dictscan_ac::{
    AcBuilder, AcConfig, Automaton, Pattern, SparseAutomaton, Symbol, Transitions,
};
use serde::Serialize;
use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "dictscan")]
#[command(about = "dictscan - single-pass multi-pattern dictionary scanner", long_about = None)]
#[command(version)]
struct Cli {
    /// Log filter, overridden by RUST_LOG
    #[arg(short, long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan text and print every match event
    Scan {
        /// Pattern file, one pattern per line
        #[arg(short, long)]
        patterns: PathBuf,

        /// Text file to scan (stdin if omitted)
        #[arg(short, long)]
        text: Option<PathBuf>,

        /// Use the compact transition table
        #[arg(long)]
        compact: bool,

        /// Treat patterns and text as Unicode scalar values instead of bytes
        #[arg(long)]
        chars: bool,

        /// JSON build configuration
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the transitions, fail links and outputs of a compiled automaton
    Dump {
        /// Pattern file, one pattern per line
        #[arg(short, long)]
        patterns: PathBuf,

        /// Use the compact transition table
        #[arg(long)]
        compact: bool,

        /// Emit a JSON snapshot instead of text
        #[arg(long)]
        json: bool,

        /// Treat patterns as Unicode scalar values instead of bytes
        #[arg(long)]
        chars: bool,

        /// JSON build configuration
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Replay the classic dictionary and failure-chain demos
    Demo,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(&cli.log_level)?;

    match cli.command {
        Commands::Scan {
            patterns,
            text,
            compact,
            chars,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            let source = read_patterns(&patterns)?;
            let text = read_text(text.as_deref())?;
            if chars {
                let text = String::from_utf8(text).context("Text is not valid UTF-8")?;
                let text: Vec<char> = text.chars().collect();
                scan(char_patterns(&source), &text, config, compact)?;
            } else {
                scan(byte_patterns(&source), &text, config, compact)?;
            }
        }
        Commands::Dump {
            patterns,
            compact,
            json,
            chars,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            let source = read_patterns(&patterns)?;
            if chars {
                dump(char_patterns(&source), config, compact, json)?;
            } else {
                dump(byte_patterns(&source), config, compact, json)?;
            }
        }
        Commands::Demo => run_demo()?,
    }

    Ok(())
}

fn setup_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .with_context(|| format!("Invalid log filter: {level}"))?;

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))?;

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<AcConfig> {
    let Some(path) = path else {
        return Ok(AcConfig::default());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid config {}", path.display()))?;
    debug!(?config, "Loaded build configuration");
    Ok(config)
}

fn read_patterns(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("Failed to read patterns {}", path.display()))
}

fn read_text(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) => {
            fs::read(path).with_context(|| format!("Failed to read text {}", path.display()))
        }
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read text from stdin")?;
            Ok(buf)
        }
    }
}

/// One pattern per non-blank line, identified by its 1-based line number.
fn parse_patterns<S>(source: &str, symbols: impl Fn(&str) -> Vec<S>) -> Vec<Pattern<S, usize>> {
    source
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.is_empty())
        .map(|(i, line)| Pattern::new(symbols(line), i + 1))
        .collect()
}

fn byte_patterns(source: &str) -> Vec<Pattern<u8, usize>> {
    parse_patterns(source, |line| line.as_bytes().to_vec())
}

fn char_patterns(source: &str) -> Vec<Pattern<char, usize>> {
    parse_patterns(source, |line| line.chars().collect())
}

fn build_automaton<S: Symbol>(
    patterns: Vec<Pattern<S, usize>>,
    config: AcConfig,
) -> Result<SparseAutomaton<S, usize>> {
    let ac = AcBuilder::with_config(config)
        .add_patterns(patterns)
        .build()
        .context("Failed to build automaton")?;
    info!(stats = ?ac.stats(), "Automaton built");
    Ok(ac)
}

fn scan<S: Symbol>(
    patterns: Vec<Pattern<S, usize>>,
    text: &[S],
    config: AcConfig,
    compact: bool,
) -> Result<()> {
    let ac = build_automaton(patterns, config)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let events = if compact {
        let ac = ac.into_compact().context("Failed to compact automaton")?;
        write_matches(&ac, text, &mut out)?
    } else {
        write_matches(&ac, text, &mut out)?
    };
    out.flush()?;

    info!(events, symbols = text.len(), "Scan complete");
    Ok(())
}

/// Print `end_offset: id id ...` per match event, returning the event count.
fn write_matches<S, T>(
    ac: &Automaton<S, usize, T>,
    text: &[S],
    out: &mut impl Write,
) -> Result<usize>
where
    S: Symbol,
    T: Transitions<S>,
{
    let mut events = 0;
    let mut engine = ac.engine(text);
    while engine.advance() {
        write!(out, "{}:", engine.match_end_offset())?;
        for id in engine.matches()?.iter() {
            write!(out, " {id}")?;
        }
        writeln!(out)?;
        events += 1;
    }
    Ok(events)
}

fn dump<S: Symbol + Serialize>(
    patterns: Vec<Pattern<S, usize>>,
    config: AcConfig,
    compact: bool,
    json: bool,
) -> Result<()> {
    let ac = build_automaton(patterns, config)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    if compact {
        write_dump(&ac.into_compact()?, json, &mut out)?;
    } else {
        write_dump(&ac, json, &mut out)?;
    }
    out.flush()?;
    Ok(())
}

fn write_dump<S, T>(ac: &Automaton<S, usize, T>, json: bool, out: &mut impl Write) -> Result<()>
where
    S: Symbol + Serialize,
    T: Transitions<S>,
{
    if json {
        serde_json::to_writer_pretty(&mut *out, &ac.snapshot())?;
        writeln!(out)?;
    } else {
        write!(out, "{}", ac.dump())?;
    }
    Ok(())
}

fn run_demo() -> Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let dictionary = AcBuilder::new()
        .add(*b"he", 0)
        .add(*b"hers", 1)
        .add(*b"his", 2)
        .add(*b"she", 3)
        .build()?;
    print_all_matches(&dictionary, "hello world, he and she and his dog", &mut out)?;

    let chain = AcBuilder::new().add(*b"ABCDABD", 0).build_compact()?;
    print_all_matches(&chain, "ABC ABCDAB ABCDABCDABDE", &mut out)?;

    out.flush()?;
    Ok(())
}

/// Print the text, then for each event the rest of the text indented to
/// the match end followed by the matched ids.
fn print_all_matches<T: Transitions<u8>>(
    ac: &Automaton<u8, u32, T>,
    text: &str,
    out: &mut impl Write,
) -> Result<()> {
    writeln!(out, "{text}")?;
    let mut engine = ac.engine(text.as_bytes());
    while engine.advance() {
        let end = engine.match_end_offset();
        write!(out, "{:end$}{}:", "", &text[end..])?;
        for id in engine.matches()?.iter() {
            write!(out, "{id} ")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_patterns_skips_blank_lines() {
        let patterns = byte_patterns("he\n\nhers\r\nshe\n");
        let ids: Vec<_> = patterns.iter().map(|p| *p.id()).collect();
        assert_eq!(ids, vec![1, 3, 4]);
        assert_eq!(patterns[1].symbols(), b"hers");
    }

    #[test]
    fn test_char_patterns() {
        let patterns = char_patterns("日本\n本語");
        assert_eq!(patterns[0].len(), 2);
        assert_eq!(*patterns[1].id(), 2);
    }

    #[test]
    fn test_write_matches() {
        let ac = AcBuilder::new()
            .add_patterns(byte_patterns("he\nhers\nhis\nshe"))
            .build()
            .unwrap();
        let mut out = Vec::new();
        let events = write_matches(&ac, b"ushers", &mut out).unwrap();
        assert_eq!(events, 2);
        assert_eq!(String::from_utf8(out).unwrap(), "4: 4 1\n6: 2\n");
    }

    #[test]
    fn test_demo_output_layout() {
        let ac = AcBuilder::new().add(*b"ABCDABD", 0).build().unwrap();
        let mut out = Vec::new();
        print_all_matches(&ac, "ABC ABCDAB ABCDABCDABDE", &mut out).unwrap();
        let expected = "ABC ABCDAB ABCDABCDABDE\n                      E:0 \n";
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn test_dump_accepts_config() {
        let cli = Cli::try_parse_from([
            "dictscan",
            "dump",
            "--patterns",
            "words.txt",
            "--config",
            "build.json",
        ])
        .unwrap();
        match cli.command {
            Commands::Dump { config, .. } => {
                assert_eq!(config, Some(PathBuf::from("build.json")));
            }
            _ => panic!("expected dump"),
        }
    }

    #[test]
    fn test_build_automaton_honours_config() {
        let config = AcConfig {
            max_patterns: 1,
            ..AcConfig::default()
        };
        assert!(build_automaton(byte_patterns("he\nshe"), config).is_err());

        let ac = build_automaton(byte_patterns("he\nshe"), AcConfig::default()).unwrap();
        assert_eq!(ac.pattern_count(), 2);
    }

    #[test]
    fn test_write_dump_json() {
        let ac = AcBuilder::new()
            .add_patterns(byte_patterns("ab"))
            .build()
            .unwrap();
        let mut out = Vec::new();
        write_dump(&ac, true, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["states"].as_array().unwrap().len(), 3);
    }
}
