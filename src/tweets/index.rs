use crate::error::HarvestError;
use crate::tweets::model::{Index, NormalizedRecord};
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

pub const INDEX_FILE_NAME: &str = "tweet-info.data.json";

pub fn build_index(records: impl IntoIterator<Item = NormalizedRecord>) -> Index {
    let mut index = Index::new();
    for record in records {
        index.insert(record.id.clone(), record);
    }
    index
}

/// Writes the whole index in one go: a sibling temp file is filled and then
/// renamed over `path`.
pub fn write_index(path: &Path, index: &Index) -> Result<(), HarvestError> {
    let persist_err = |source| HarvestError::Persist {
        path: path.to_path_buf(),
        source,
    };
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    fs::create_dir_all(parent).map_err(persist_err)?;

    let data = serde_json::to_vec(index).map_err(|err| persist_err(err.into()))?;
    let mut tmp = NamedTempFile::new_in(parent).map_err(persist_err)?;
    tmp.write_all(&data).map_err(persist_err)?;
    tmp.persist(path).map_err(|err| persist_err(err.error))?;
    Ok(())
}

pub fn load_index(path: &Path) -> Result<Index> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let index = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(index)
}
