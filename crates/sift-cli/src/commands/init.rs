//! The `init` command.

use anyhow::Context;
use colored::Colorize;
use sift_config::{AppPaths, Config};

pub fn run() -> anyhow::Result<()> {
    let paths = AppPaths::new().context("could not determine application directories")?;
    paths.ensure_dirs()?;

    if paths.config_file.exists() {
        println!(
            "{} config already exists at {}",
            "unchanged:".yellow(),
            paths.config_file.display()
        );
        return Ok(());
    }

    Config::create_default_file(&paths.config_file)?;
    println!(
        "{} wrote default config to {}",
        "created:".green(),
        paths.config_file.display()
    );
    println!(
        "{} chunk output defaults to {}",
        "note:".cyan(),
        paths.output_dir.display()
    );
    Ok(())
}
