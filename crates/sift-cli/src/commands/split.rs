//! The `split` command.

use colored::Colorize;
use sift_config::Config;
use sift_split::SplitEngine;
use std::path::Path;

/// Split an already-extracted text file and print the chunks, without
/// touching the conversion or extraction stages.
pub fn run(mut config: Config, file: &Path, method: Option<String>) -> anyhow::Result<()> {
    if let Some(method) = method {
        config.splitter.method = method;
    }

    let engine = SplitEngine::from_settings(&config.splitter)?;
    let text = std::fs::read_to_string(file)?;
    let chunks = engine.split(&text)?;

    if chunks.is_empty() {
        println!("{} input produced no chunks", "empty:".yellow());
        return Ok(());
    }

    for chunk in &chunks {
        println!(
            "{}",
            format!("--- chunk {} ({}) ---", chunk.index, engine.method_name()).cyan()
        );
        println!("{}", chunk.content);
    }
    println!();
    println!("{} {} chunk(s)", "done:".green(), chunks.len());
    Ok(())
}
