pub mod fetch;
pub mod harvest;
pub mod render;
pub mod status;

use anyhow::Result;
use serde::Serialize;

use crate::tweets::audit;
use crate::tweets::config::{HarvestConfig, load_config};
use crate::tweets::paths::{HarvestPaths, PathOverrides, resolve_paths};

#[derive(Debug, Clone, Serialize)]
pub struct CommandReport {
    pub command: String,
    pub ok: bool,
    pub details: Vec<String>,
    pub issues: Vec<String>,
}

impl CommandReport {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ok: true,
            details: Vec::new(),
            issues: Vec::new(),
        }
    }

    pub fn detail(&mut self, text: impl Into<String>) {
        self.details.push(text.into());
    }

    pub fn issue(&mut self, text: impl Into<String>) {
        self.ok = false;
        self.issues.push(text.into());
    }
}

pub fn resolve_runtime(overrides: &PathOverrides) -> Result<(HarvestConfig, HarvestPaths)> {
    let cfg = load_config()?;
    let paths = resolve_paths(&cfg.paths, overrides)?;
    Ok((cfg, paths))
}

/// Audit logging never decides a command's outcome; a failed append is
/// only noted in the report.
pub fn record_audit(report: &mut CommandReport, paths: &HarvestPaths, status: &str, message: &str) {
    if let Err(err) = audit::append_event(paths, &report.command, status, message) {
        report.detail(format!("audit log unavailable: {err:#}"));
    }
}

#[cfg(test)]
mod tests {
    use super::CommandReport;

    #[test]
    fn issues_flip_ok() {
        let mut report = CommandReport::new("harvest");
        report.detail("scanned=2");
        assert!(report.ok);
        report.issue("bad");
        assert!(!report.ok);
        assert_eq!(report.issues, vec!["bad".to_string()]);
    }
}
