use crate::tweets::config::PathsConfig;
use crate::tweets::index::INDEX_FILE_NAME;
use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct HarvestPaths {
    pub home: PathBuf,
    pub data_dir: PathBuf,
    pub index_file: PathBuf,
    pub logs_dir: PathBuf,
}

/// Command-line overrides; they win over env and config file values.
#[derive(Debug, Clone, Default)]
pub struct PathOverrides {
    pub data_dir: Option<PathBuf>,
    pub index_file: Option<PathBuf>,
}

fn env_path(var: &str) -> Option<PathBuf> {
    match env::var(var) {
        Ok(v) if !v.trim().is_empty() => Some(PathBuf::from(v.trim())),
        _ => None,
    }
}

fn resolve_home() -> Result<PathBuf> {
    if let Some(home) = env_path("TWEET_HARVEST_HOME") {
        return Ok(home);
    }
    let Some(home) = dirs::home_dir() else {
        anyhow::bail!("HOME directory could not be resolved; set TWEET_HARVEST_HOME");
    };
    Ok(home.join(".tweet-harvest"))
}

/// The index sits one level above the snapshot directory.
pub fn default_index_file(data_dir: &Path) -> PathBuf {
    data_dir.join("..").join(INDEX_FILE_NAME)
}

pub fn resolve_paths(cfg: &PathsConfig, overrides: &PathOverrides) -> Result<HarvestPaths> {
    let home = resolve_home()?;

    let data_dir = match overrides
        .data_dir
        .clone()
        .or_else(|| env_path("TWEET_DATA_DIR"))
        .or_else(|| cfg.data_dir.as_ref().map(PathBuf::from))
    {
        Some(dir) => dir,
        None => env::current_dir().context("failed to resolve current directory")?,
    };
    let index_file = overrides
        .index_file
        .clone()
        .or_else(|| env_path("TWEET_INDEX_FILE"))
        .or_else(|| cfg.index_file.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| default_index_file(&data_dir));
    let logs_dir = env_path("TWEET_HARVEST_LOGS_DIR")
        .or_else(|| cfg.logs_dir.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| home.join("logs"));

    Ok(HarvestPaths {
        home,
        data_dir,
        index_file,
        logs_dir,
    })
}
