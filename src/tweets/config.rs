use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_ENDPOINT: &str = "https://cdn.syndication.twimg.com/tweet?id={id}&lang=en";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PathsConfig {
    pub data_dir: Option<String>,
    pub index_file: Option<String>,
    pub logs_dir: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchSettings {
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: 20,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HarvestConfig {
    pub paths: PathsConfig,
    pub fetch: FetchSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PartialHarvestConfig {
    paths: Option<PathsConfig>,
    fetch: Option<FetchSettings>,
}

fn env_or_u64(var: &str, fallback: u64) -> u64 {
    match env::var(var) {
        Ok(v) => v.trim().parse::<u64>().ok().unwrap_or(fallback),
        Err(_) => fallback,
    }
}

fn env_or_string(var: &str, fallback: &str) -> String {
    match env::var(var) {
        Ok(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => fallback.to_string(),
    }
}

fn validate(cfg: &HarvestConfig) -> Result<()> {
    if !cfg.fetch.endpoint.contains("{id}") {
        return Err(anyhow!(
            "invalid fetch endpoint: template must contain an `{{id}}` placeholder"
        ));
    }
    if cfg.fetch.timeout_secs == 0 {
        return Err(anyhow!("invalid fetch timeout: must be >= 1 second"));
    }
    Ok(())
}

fn resolve_config_path() -> Option<PathBuf> {
    if let Ok(custom) = env::var("TWEET_HARVEST_CONFIG_PATH") {
        let trimmed = custom.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }

    let home = dirs::home_dir()?;
    Some(home.join(".tweet-harvest").join("config.toml"))
}

fn merge_file_config(base: &mut HarvestConfig) -> Result<()> {
    let Some(path) = resolve_config_path() else {
        return Ok(());
    };
    if !path.exists() {
        return Ok(());
    }

    let raw = fs::read_to_string(&path)?;
    let parsed: PartialHarvestConfig = toml::from_str(&raw)
        .map_err(|err| anyhow!("failed to parse config {}: {err}", path.display()))?;
    if let Some(paths) = parsed.paths {
        base.paths = paths;
    }
    if let Some(fetch) = parsed.fetch {
        base.fetch = fetch;
    }
    Ok(())
}

pub fn load_config() -> Result<HarvestConfig> {
    let mut cfg = HarvestConfig::default();
    merge_file_config(&mut cfg)?;

    cfg.fetch.endpoint = env_or_string("TWEET_FETCH_ENDPOINT", &cfg.fetch.endpoint);
    cfg.fetch.timeout_secs = env_or_u64("TWEET_FETCH_TIMEOUT_SECS", cfg.fetch.timeout_secs);

    validate(&cfg)?;
    Ok(cfg)
}
