use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("failed to parse snapshot {file}: {source}")]
    Parse {
        file: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("failed to persist index {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Why a directory entry was not accepted as a snapshot file. Never fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FilenameRejection {
    #[error("not a regular file")]
    NotRegularFile,
    #[error("extension is not .json")]
    NotJson,
    #[error("name does not match <id>.<YYYYMMDD>.json")]
    MalformedName,
    #[error("date is not a valid calendar date")]
    InvalidCalendarDate,
}

impl FilenameRejection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotRegularFile => "not_regular_file",
            Self::NotJson => "not_json",
            Self::MalformedName => "malformed_name",
            Self::InvalidCalendarDate => "invalid_calendar_date",
        }
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid timestamp `{0}`")]
    InvalidTimestamp(String),
}
