use anyhow::Result;
use std::env;

use crate::commands::CommandReport;
use crate::tweets::paths::HarvestPaths;

include!(concat!(env!("OUT_DIR"), "/tweet_env_allowlist.rs"));

pub fn run(paths: &HarvestPaths) -> Result<CommandReport> {
    let mut report = CommandReport::new("status");

    report.detail(format!("home={}", paths.home.display()));
    report.detail(format!("data_dir={}", paths.data_dir.display()));
    report.detail(format!("index_file={}", paths.index_file.display()));
    report.detail(format!("logs_dir={}", paths.logs_dir.display()));

    for key in GENERATED_TWEET_ENV_ALLOWLIST {
        if env::var_os(key).is_some() {
            report.detail(format!("env.{key}=set"));
        }
    }

    if !paths.data_dir.is_dir() {
        report.issue("missing snapshot dir (TWEET_DATA_DIR or --data-dir)");
    }
    if !paths.index_file.exists() {
        report.detail("index not built yet; run `tweet-harvest harvest`");
    }

    Ok(report)
}
