use anyhow::Result;

use crate::commands::{CommandReport, record_audit};
use crate::tweets::paths::HarvestPaths;
use crate::tweets::pipeline;
use crate::tweets::warn;

pub fn run(paths: &HarvestPaths) -> Result<CommandReport> {
    let mut report = CommandReport::new("harvest");
    report.detail(format!("data_dir={}", paths.data_dir.display()));
    report.detail(format!("index_file={}", paths.index_file.display()));

    let outcome = match pipeline::harvest(&paths.data_dir, &paths.index_file) {
        Ok(outcome) => outcome,
        Err(err) => {
            record_audit(&mut report, paths, "error", &err.to_string());
            return Err(err.into());
        }
    };

    for (name, reason) in &outcome.skipped {
        warn::emit("skip", "scan", name, reason.as_str());
    }

    report.detail(format!("snapshots.scanned={}", outcome.scanned));
    report.detail(format!("snapshots.superseded={}", outcome.superseded));
    report.detail(format!("snapshots.skipped={}", outcome.skipped.len()));
    report.detail(format!("index.posts={}", outcome.indexed));

    record_audit(
        &mut report,
        paths,
        "ok",
        &format!(
            "indexed {} posts into {}",
            outcome.indexed,
            outcome.index_file.display()
        ),
    );
    Ok(report)
}
