//! Chunk command - preview how text is split for the knowledge base

use crate::cli::output::{colors, truncate_chars};
use crate::cli::OutputFormat;
use crate::core::indexer::Chunker;
use crate::core::config::Config;
use crate::core::types::Chunk;
use clap::Args;
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Arguments for the chunk command
#[derive(Args, Debug)]
pub struct ChunkArgs {
    /// File to split, or `-` for stdin
    pub input: PathBuf,

    /// Characters per chunk (defaults to knowledge.chunk_size)
    #[arg(long, short = 's')]
    pub size: Option<usize>,

    /// Overlap in characters (defaults to knowledge.overlap)
    #[arg(long, short = 'o')]
    pub overlap: Option<usize>,
}

/// Chunking response
#[derive(Debug, Serialize)]
pub struct ChunkResponse {
    pub chunk_size: usize,
    pub overlap: usize,
    pub total_chars: usize,
    pub total_chunks: usize,
    pub chunks: Vec<Chunk>,
}

fn read_input(input: &Path) -> std::io::Result<String> {
    if input.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        std::fs::read_to_string(input)
    }
}

/// Execute the chunk command
pub async fn execute(
    args: ChunkArgs,
    config: &Config,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let chunk_size = args.size.unwrap_or(config.knowledge.chunk_size);
    let overlap = args.overlap.unwrap_or(config.knowledge.overlap);
    let chunker = Chunker::new(chunk_size, overlap)?;

    let text = read_input(&args.input)
        .map_err(|e| format!("Failed to read {}: {e}", args.input.display()))?;
    let chunks = chunker.chunk_text(&text);

    let response = ChunkResponse {
        chunk_size,
        overlap,
        total_chars: text.chars().count(),
        total_chunks: chunks.len(),
        chunks,
    };

    match format {
        OutputFormat::Human => {
            println!(
                "{} chars -> {} chunk(s) (size {}, overlap {}, stride {})\n",
                colors::number(&response.total_chars.to_string()),
                colors::number(&response.total_chunks.to_string()),
                chunk_size,
                overlap,
                chunker.stride()
            );
            for chunk in &response.chunks {
                let len = chunk.text.chars().count();
                println!(
                    "[{}] {}",
                    colors::rank(&chunk.chunk_index.to_string()),
                    colors::dim(&format!(
                        "chars {}..{} ({} chars)",
                        chunk.char_start,
                        chunk.char_start + len,
                        len
                    ))
                );
                let preview = chunk.text.replace('\n', " ");
                println!("    {}", truncate_chars(preview.trim(), 100));
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
