//! Normalise Chinese text for speech synthesis and print the pieces.
//!
//! Usage:
//!   cargo run --example normalize
//!   cargo run --example normalize -- --text "会议在8:30开始，电话13912345678。"
//!   cargo run --example normalize -- --config normalizer.json --clauses
//!
//! Set `RUST_LOG=zhnorm=debug` to see segmentation, `=trace` for every stage.

use std::path::Path;

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use zhnorm::{NormalizerConfig, TextNormalizer};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    // ── Parse simple CLI arguments ───────────────────────────────────────────
    let mut args = std::env::args().skip(1).peekable();

    let mut text    = "今天是2021年5月19日，气温-3℃~5℃，湿度51%。请拨打400-123-4567咨询！".to_string();
    let mut config  = None::<String>;
    let mut clauses = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--text"    => { if let Some(v) = args.next() { text   = v; } }
            "--config"  => { if let Some(v) = args.next() { config = Some(v); } }
            "--clauses" => { clauses = true; }
            "--help"    => {
                println!("Usage: normalize [--text TEXT] [--config FILE.json] [--clauses]");
                return Ok(());
            }
            _ => {}
        }
    }

    // ── Build normaliser ─────────────────────────────────────────────────────
    let cfg = match &config {
        Some(path) => NormalizerConfig::from_json_file(Path::new(path))
            .with_context(|| format!("Cannot load normaliser config: {}", path))?,
        None => NormalizerConfig::default(),
    };
    let tn = TextNormalizer::from_config(cfg);

    println!("Input  : {:?}", text);
    println!();

    // ── Normalise ────────────────────────────────────────────────────────────
    let out = if clauses { tn.normalize_clauses(&text) } else { tn.process(&text) };
    for (i, piece) in out.iter().enumerate() {
        println!("{:>3}  {}", i, piece);
    }
    Ok(())
}
