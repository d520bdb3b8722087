//! The `config` command.

use anyhow::Context;
use sift_config::{AppPaths, Config};

pub fn show(config: &Config) -> anyhow::Result<()> {
    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

pub fn path() -> anyhow::Result<()> {
    let paths = AppPaths::new().context("could not determine application directories")?;
    println!("{}", paths.config_file.display());
    Ok(())
}
