use crate::tweets::config::FetchSettings;
use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDate;
use reqwest::blocking::Client as HttpClient;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, REFERER};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const REFERRER: &str = "https://platform.twitter.com/";

/// Headers sent with every syndication request, mirroring the embed widget.
pub const FETCH_HEADERS: &[(&str, &str)] = &[
    ("accept", "*/*"),
    ("accept-language", "en-GB,en;q=0.9"),
    ("cache-control", "no-cache"),
    ("pragma", "no-cache"),
    ("sec-ch-ua", r#"" Not A;Brand";v="99", "Chromium";v="102""#),
    ("sec-ch-ua-mobile", "?0"),
    ("sec-ch-ua-platform", r#""Linux""#),
    ("sec-fetch-dest", "empty"),
    ("sec-fetch-mode", "cors"),
    ("sec-fetch-site", "cross-site"),
];

/// Immutable request setup for one fetch.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub endpoint: String,
    pub referrer: &'static str,
    pub headers: &'static [(&'static str, &'static str)],
    pub timeout: Duration,
}

impl FetchConfig {
    pub fn from_settings(settings: &FetchSettings) -> Self {
        Self {
            endpoint: settings.endpoint.clone(),
            referrer: REFERRER,
            headers: FETCH_HEADERS,
            timeout: Duration::from_secs(settings.timeout_secs),
        }
    }

    pub fn resource_url(&self, id: &str) -> String {
        self.endpoint.replace("{id}", id)
    }

    fn header_map(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        for &(name, value) in self.headers {
            headers.insert(
                HeaderName::from_static(name),
                HeaderValue::from_str(value)
                    .with_context(|| format!("invalid value for header {name}"))?,
            );
        }
        headers.insert(REFERER, HeaderValue::from_static(self.referrer));
        Ok(headers)
    }
}

pub fn validate_post_id(id: Option<&str>) -> Result<&str> {
    let Some(id) = id else {
        bail!("Missing tweet id argument");
    };
    if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
        bail!("Tweet ID has to be numeric");
    }
    Ok(id)
}

#[derive(Debug, Clone)]
pub struct FetchedSnapshot {
    pub post_id: String,
    pub body: Vec<u8>,
}

pub fn fetch_snapshot(cfg: &FetchConfig, id: &str) -> Result<FetchedSnapshot> {
    let http = HttpClient::builder()
        .timeout(cfg.timeout)
        .default_headers(cfg.header_map()?)
        .build()?;
    let url = cfg.resource_url(id);
    let response = http
        .get(&url)
        .send()
        .with_context(|| format!("request to {url} failed"))?;

    let status = response.status();
    if !status.is_success() {
        bail!(
            "HTTP error status ({}): {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("unknown")
        );
    }

    let body = response.bytes()?.to_vec();
    let value: Value =
        serde_json::from_slice(&body).context("syndication response is not valid JSON")?;
    let post_id = value
        .get("id_str")
        .and_then(Value::as_str)
        .ok_or_else(|| anyhow!("syndication response has no id_str"))?
        .to_string();
    ensure_requested_post(id, &post_id)?;

    Ok(FetchedSnapshot { post_id, body })
}

/// The response id names the file on disk, so it must be the post that was asked for.
fn ensure_requested_post(requested: &str, returned: &str) -> Result<()> {
    if requested != returned {
        bail!("syndication response is for post {returned:?}, expected {requested}");
    }
    Ok(())
}

pub fn snapshot_file_name(post_id: &str, captured: NaiveDate) -> String {
    format!("{post_id}.{}.json", captured.format("%Y%m%d"))
}

/// Writes the response body untouched as `<dir>/<id>.<YYYYMMDD>.json`.
pub fn write_snapshot(
    dir: &Path,
    snapshot: &FetchedSnapshot,
    captured: NaiveDate,
) -> Result<PathBuf> {
    let post_id = validate_post_id(Some(snapshot.post_id.as_str()))
        .with_context(|| format!("refusing to write snapshot for post {:?}", snapshot.post_id))?;
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    let path = dir.join(snapshot_file_name(post_id, captured));
    fs::write(&path, &snapshot.body)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}
