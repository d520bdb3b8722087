//! The `process` command.

use anyhow::bail;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use sift_config::Config;
use sift_pipeline::Pipeline;
use std::path::Path;
use tracing::warn;

pub fn run(
    mut config: Config,
    path: &Path,
    recursive: bool,
    method: Option<String>,
) -> anyhow::Result<()> {
    if let Some(method) = method {
        config.splitter.method = method;
    }
    let pipeline = Pipeline::from_config(&config)?;

    if path.is_file() {
        let outcome = pipeline.process_file(path)?;
        print_outcome(&outcome);
        return Ok(());
    }

    if !path.is_dir() {
        bail!("no such file or directory: {}", path.display());
    }

    if recursive {
        let outcomes = pipeline.process_dir(path, true)?;
        for outcome in &outcomes {
            print_outcome(outcome);
        }
        println!("{} {} document(s) processed", "done:".green(), outcomes.len());
        return Ok(());
    }

    // Top-level directory run with a progress bar.
    let mut files: Vec<_> = std::fs::read_dir(path)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.is_file()
                && !p
                    .file_name()
                    .and_then(|n| n.to_str())
                    .map(|n| n.starts_with('.'))
                    .unwrap_or(false)
        })
        .collect();
    files.sort();

    let bar = ProgressBar::new(files.len() as u64);
    bar.set_style(
        ProgressStyle::with_template("{bar:30.cyan/blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut processed = 0usize;
    for file in &files {
        bar.set_message(
            file.file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
        );
        match pipeline.process_file(file) {
            Ok(outcome) => {
                processed += 1;
                bar.println(format!(
                    "{} {} -> {} chunk(s)",
                    "ok:".green(),
                    file.display(),
                    outcome.chunks.len()
                ));
            }
            Err(e) => {
                warn!("Failed to process {:?}: {}", file, e);
                bar.println(format!("{} {}: {}", "failed:".red(), file.display(), e));
            }
        }
        bar.inc(1);
    }
    bar.finish_and_clear();

    println!(
        "{} {}/{} document(s) processed",
        "done:".green(),
        processed,
        files.len()
    );
    Ok(())
}

fn print_outcome(outcome: &sift_pipeline::ProcessOutcome) {
    println!(
        "{} {} -> {} chunk(s)",
        "ok:".green(),
        outcome.source.display(),
        outcome.chunks.len()
    );
    if let Some(first) = outcome.saved_files.first() {
        if let Some(folder) = first.parent() {
            println!("   saved under {}", folder.display());
        }
    }
}
