//! lexpack command line: compress/decompress plumbing around the engine.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lx_core::EngineConfig;
use lx_engine::Compressor;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lexpack", version, about = "Phrase-aware two-tier text compressor")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compress a text file against a canonical word list.
    Compress {
        /// Canonical word list, one word per line.
        #[arg(long)]
        dict: PathBuf,
        /// Raw text input.
        #[arg(long)]
        input: PathBuf,
        /// Compressed payload output.
        #[arg(long)]
        output: PathBuf,
        /// Where to write the generated dictionary. Defaults to the output
        /// path with a `.dict` extension.
        #[arg(long)]
        dict_out: Option<PathBuf>,
        /// Optional JSON statistics report.
        #[arg(long)]
        stats: Option<PathBuf>,
        /// Optional engine configuration (JSON).
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Restore text from a compressed payload and its dictionary.
    Decompress {
        /// Dictionary produced by the compression run.
        #[arg(long)]
        dict: PathBuf,
        /// Compressed payload input.
        #[arg(long)]
        input: PathBuf,
        /// Restored text output.
        #[arg(long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match Cli::parse().command {
        Command::Compress {
            dict,
            input,
            output,
            dict_out,
            stats,
            config,
        } => compress(dict, input, output, dict_out, stats, config),
        Command::Decompress {
            dict,
            input,
            output,
        } => decompress(dict, input, output),
    }
}

fn compress(
    dict: PathBuf,
    input: PathBuf,
    output: PathBuf,
    dict_out: Option<PathBuf>,
    stats: Option<PathBuf>,
    config: Option<PathBuf>,
) -> Result<()> {
    let engine_config = match config {
        Some(path) => {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => EngineConfig::default(),
    };

    let canonical = lx_store::load_word_list(&dict)
        .with_context(|| format!("loading word list {}", dict.display()))?;
    let text =
        fs::read_to_string(&input).with_context(|| format!("reading input {}", input.display()))?;

    let doc = Compressor::new(engine_config).compress(&text, &canonical)?;

    fs::write(&output, &doc.payload)
        .with_context(|| format!("writing payload {}", output.display()))?;
    let dict_out = dict_out.unwrap_or_else(|| output.with_extension("dict"));
    lx_store::save_dictionary(&dict_out, &doc.dictionary)
        .with_context(|| format!("writing dictionary {}", dict_out.display()))?;
    if let Some(stats_path) = stats {
        lx_store::write_stats_report(&stats_path, &doc.stats)
            .with_context(|| format!("writing stats {}", stats_path.display()))?;
    }

    println!(
        "compressed {} -> {} bytes ({:.1}% reduction, {} phrases)",
        doc.stats.original_len,
        doc.stats.compressed_len,
        doc.stats.reduction_pct,
        doc.stats.fixed_phrases + doc.stats.wildcard_phrases,
    );
    Ok(())
}

fn decompress(dict: PathBuf, input: PathBuf, output: PathBuf) -> Result<()> {
    let dictionary = lx_store::load_dictionary(&dict)
        .with_context(|| format!("loading dictionary {}", dict.display()))?;
    let payload =
        fs::read(&input).with_context(|| format!("reading payload {}", input.display()))?;

    let text = Compressor::default().decompress(&payload, &dictionary)?;

    fs::write(&output, &text)
        .with_context(|| format!("writing output {}", output.display()))?;
    println!("decompressed {} -> {} bytes", payload.len(), text.len());
    Ok(())
}
