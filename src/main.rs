use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

use concord::{CounterIndex, LineIndex, LineReader, PositionIndex, ReaderConfig, TextIndex};

#[derive(Parser, Debug)]
#[command(name = "concord")]
#[command(about = "Word-index builder: counts, line sets, or in-line positions over plain text")]
#[command(version)]
struct Args {
    /// Input text file; reads standard input when omitted
    input: Option<PathBuf>,

    /// Which index to build
    #[arg(long, value_enum, default_value = "counts")]
    index: IndexKind,

    /// Delimiter pattern (regex) separating words
    #[arg(long, default_value = r"[ .,:;!?-]+")]
    delimiters: String,

    /// Optional path for a JSON run summary
    #[arg(long)]
    stats_out: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
enum IndexKind {
    /// Token -> occurrence count
    Counts,
    /// Token -> line numbers
    Lines,
    /// Token -> line numbers -> in-line positions
    Positions,
}

#[derive(Debug, Serialize)]
struct RunStats {
    source: String,
    index: IndexKind,
    delimiters: String,
    lines_read: u64,
    bytes_read: u64,
    read_ms: u64,
    distinct_terms: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr as JSON so stdout carries only index rows.
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .json()
        .init();

    let args = Args::parse();
    info!(?args, "parsed CLI arguments");

    if let Some(ref path) = args.input {
        if !path.exists() {
            anyhow::bail!("input file does not exist: {}", path.display());
        }
        if !path.is_file() {
            anyhow::bail!("input path is not a file: {}", path.display());
        }
    }

    let reader = LineReader::new(ReaderConfig::default());
    let (lines, read_stats) = match args.input {
        Some(ref path) => reader.read_file(path).await?,
        None => reader.read_stdin().await?,
    };

    let mut index: Box<dyn TextIndex> = match args.index {
        IndexKind::Counts => Box::new(CounterIndex::new()),
        IndexKind::Lines => Box::new(LineIndex::new()),
        IndexKind::Positions => Box::new(PositionIndex::new()),
    };

    for line in &lines {
        index.add_line(line);
    }
    index.resolve(&args.delimiters)?;
    index.present_stdout().context("failed writing index to stdout")?;

    info!(
        terms = index.term_count(),
        lines = index.line_count(),
        "index presented"
    );

    if let Some(ref stats_path) = args.stats_out {
        let stats = RunStats {
            source: read_stats.source,
            index: args.index,
            delimiters: args.delimiters,
            lines_read: read_stats.lines_read,
            bytes_read: read_stats.bytes_read,
            read_ms: read_stats.duration_ms,
            distinct_terms: index.term_count(),
        };
        let json = serde_json::to_string_pretty(&stats)?;
        tokio::fs::write(stats_path, json)
            .await
            .with_context(|| format!("failed to write stats file {}", stats_path.display()))?;
        info!("wrote run stats to {}", stats_path.display());
    }

    Ok(())
}
