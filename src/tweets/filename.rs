use crate::error::{FilenameRejection, HarvestError};
use crate::tweets::model::SnapshotDescriptor;
use chrono::NaiveDate;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    pub snapshots: Vec<SnapshotDescriptor>,
    pub skipped: Vec<(String, FilenameRejection)>,
}

fn split_extension(name: &str) -> Option<(&str, &str)> {
    let dot = name.rfind('.')?;
    // a leading dot marks a hidden file, not an extension
    if dot == 0 {
        return None;
    }
    Some((&name[..dot], &name[dot + 1..]))
}

fn all_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// Accepts `<digits>.<YYYYMMDD>.json` (extension case-insensitive) naming a
/// real calendar date.
pub fn classify_snapshot_name(name: &str) -> Result<SnapshotDescriptor, FilenameRejection> {
    let Some((base, ext)) = split_extension(name) else {
        return Err(FilenameRejection::NotJson);
    };
    if !ext.eq_ignore_ascii_case("json") {
        return Err(FilenameRejection::NotJson);
    }

    let Some((id, date)) = base.split_once('.') else {
        return Err(FilenameRejection::MalformedName);
    };
    if !all_digits(id) || date.len() != 8 || !all_digits(date) {
        return Err(FilenameRejection::MalformedName);
    }

    let year = date[0..4]
        .parse::<i32>()
        .map_err(|_| FilenameRejection::MalformedName)?;
    let month = date[4..6]
        .parse::<u32>()
        .map_err(|_| FilenameRejection::MalformedName)?;
    let day = date[6..8]
        .parse::<u32>()
        .map_err(|_| FilenameRejection::MalformedName)?;
    let captured_at =
        NaiveDate::from_ymd_opt(year, month, day).ok_or(FilenameRejection::InvalidCalendarDate)?;

    Ok(SnapshotDescriptor {
        post_id: id.to_string(),
        captured_at,
        file_name: name.to_string(),
    })
}

/// Only regular files qualify; directories and other entry kinds are skipped
/// whatever their name.
pub fn parse_snapshot_entry(
    name: &str,
    is_file: bool,
) -> Result<SnapshotDescriptor, FilenameRejection> {
    if !is_file {
        return Err(FilenameRejection::NotRegularFile);
    }
    classify_snapshot_name(name)
}

/// Lists `dir` once and sorts its entries into snapshots and skipped names.
pub fn scan_snapshot_dir(dir: &Path) -> Result<ScanOutcome, HarvestError> {
    let io_err = |source| HarvestError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut outcome = ScanOutcome::default();

    for entry in fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let name = entry.file_name().to_string_lossy().to_string();
        let is_file = entry.file_type().map_err(io_err)?.is_file();
        match parse_snapshot_entry(&name, is_file) {
            Ok(descriptor) => outcome.snapshots.push(descriptor),
            Err(reason) => outcome.skipped.push((name, reason)),
        }
    }

    Ok(outcome)
}
