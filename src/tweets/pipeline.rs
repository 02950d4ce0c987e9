use crate::error::{FilenameRejection, HarvestError};
use crate::tweets::dedupe::most_recent_snapshots;
use crate::tweets::extract::extract_all;
use crate::tweets::filename::scan_snapshot_dir;
use crate::tweets::index::{build_index, write_index};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct HarvestOutcome {
    pub index_file: PathBuf,
    pub scanned: usize,
    pub superseded: usize,
    pub indexed: usize,
    pub skipped: Vec<(String, FilenameRejection)>,
}

/// One harvest run: scan, keep the newest capture per post, extract every
/// survivor, then write the index. Nothing is written unless every snapshot
/// parsed.
pub fn harvest(data_dir: &Path, index_file: &Path) -> Result<HarvestOutcome, HarvestError> {
    let scan = scan_snapshot_dir(data_dir)?;
    let scanned = scan.snapshots.len();

    let recent = most_recent_snapshots(scan.snapshots);
    let records = extract_all(data_dir, &recent)?;
    let index = build_index(records);
    write_index(index_file, &index)?;

    Ok(HarvestOutcome {
        index_file: index_file.to_path_buf(),
        scanned,
        superseded: scanned - recent.len(),
        indexed: index.len(),
        skipped: scan.skipped,
    })
}
