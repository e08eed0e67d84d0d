//! CLI configuration

use std::path::PathBuf;

use anyhow::Context;
use serato_core::SeratoDir;

#[derive(Debug, Clone)]
pub struct Config {
    /// `_Serato_` folder holding the library and history
    pub serato_dir: SeratoDir,
    /// Print JSON instead of text
    pub json: bool,
}

impl Config {
    pub fn new(serato_dir: Option<PathBuf>, json: bool) -> anyhow::Result<Self> {
        let root = match serato_dir {
            Some(dir) => dir,
            None => default_serato_dir()?,
        };
        Ok(Self {
            serato_dir: SeratoDir::new(root),
            json,
        })
    }
}

/// `~/Music/_Serato_`, where Serato DJ keeps its files on both macOS and Windows
pub fn default_serato_dir() -> anyhow::Result<PathBuf> {
    let home = dirs::home_dir().context("Cannot determine home directory, pass --serato-dir")?;
    Ok(home.join("Music").join("_Serato_"))
}
