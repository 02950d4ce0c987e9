use anyhow::Result;

use crate::commands::{CommandReport, record_audit};
use crate::syndication::client::{self, FetchConfig};
use crate::tweets::config::HarvestConfig;
use crate::tweets::paths::HarvestPaths;

pub const USAGE: &str = "Usage example: $ tweet-harvest fetch 463440424141459456";

#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    pub post_id: Option<String>,
}

pub fn run(
    cfg: &HarvestConfig,
    paths: &HarvestPaths,
    opts: &FetchOptions,
) -> Result<CommandReport> {
    let mut report = CommandReport::new("fetch");

    let id = match client::validate_post_id(opts.post_id.as_deref()) {
        Ok(id) => id,
        Err(err) => {
            report.issue(err.to_string());
            report.issue(USAGE);
            return Ok(report);
        }
    };

    let fetch_cfg = FetchConfig::from_settings(&cfg.fetch);
    report.detail(format!("url={}", fetch_cfg.resource_url(id)));

    let written = client::fetch_snapshot(&fetch_cfg, id).and_then(|snapshot| {
        let today = chrono::Utc::now().date_naive();
        client::write_snapshot(&paths.data_dir, &snapshot, today)
    });

    match written {
        Ok(path) => {
            report.detail(format!("snapshot={}", path.display()));
            record_audit(&mut report, paths, "ok", &format!("wrote {}", path.display()));
        }
        Err(err) => {
            report.issue(format!("{err:#}"));
            report.issue(USAGE);
            record_audit(&mut report, paths, "error", &format!("{err:#}"));
        }
    }

    Ok(report)
}
