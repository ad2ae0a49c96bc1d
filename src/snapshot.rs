use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{AppQuirks, AppState, ApplicationRecord, ComponentKind, SpecialKind};

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported snapshot version {found} (expected {expected})", expected = SNAPSHOT_VERSION)]
    Version { found: u32 },
    #[error("failed to write snapshot {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Application records as produced by one backend refresh.
#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    pub generated_at: Option<DateTime<Utc>>,
    pub records: Vec<ApplicationRecord>,
}

#[derive(Serialize, Deserialize)]
struct SnapshotFile {
    version: u32,
    #[serde(default)]
    generated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    records: Vec<SnapshotRecordData>,
}

#[derive(Serialize, Deserialize)]
struct SnapshotRecordData {
    id: String,
    #[serde(default)]
    origin: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    state: AppState,
    #[serde(default)]
    kind: ComponentKind,
    #[serde(default)]
    special_kind: Option<SpecialKind>,
    #[serde(default)]
    quirks: AppQuirks,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    homepage: Option<String>,
    #[serde(default)]
    progress: Option<u32>,
    #[serde(default)]
    installed_size: Option<u64>,
}

impl From<SnapshotRecordData> for ApplicationRecord {
    fn from(entry: SnapshotRecordData) -> Self {
        let mut record = ApplicationRecord::new(entry.id, entry.state, entry.kind);
        record.set_name(entry.name.filter(|name| !name.is_empty()));
        record.origin = entry.origin;
        record.special_kind = entry.special_kind;
        record.quirks = entry.quirks;
        record.description = entry.description;
        record.summary = entry.summary;
        record.version = entry.version;
        record.homepage = entry.homepage;
        record.progress = entry.progress;
        record.installed_size = entry.installed_size;
        record
    }
}

impl From<&ApplicationRecord> for SnapshotRecordData {
    fn from(record: &ApplicationRecord) -> Self {
        Self {
            id: record.id.clone(),
            origin: record.origin.clone(),
            name: record.name().map(str::to_string),
            state: record.state,
            kind: record.kind,
            special_kind: record.special_kind,
            quirks: record.quirks,
            description: record.description.clone(),
            summary: record.summary.clone(),
            version: record.version.clone(),
            homepage: record.homepage.clone(),
            progress: record.progress,
            installed_size: record.installed_size,
        }
    }
}

pub fn parse_snapshot(content: &str) -> Result<Snapshot, SnapshotError> {
    let file: SnapshotFile = serde_json::from_str(content)?;
    if file.version != SNAPSHOT_VERSION {
        return Err(SnapshotError::Version {
            found: file.version,
        });
    }

    let mut records = Vec::with_capacity(file.records.len());
    for entry in file.records {
        if entry.id.trim().is_empty() {
            tracing::debug!("skipping snapshot record without id");
            continue;
        }
        records.push(ApplicationRecord::from(entry));
    }

    Ok(Snapshot {
        generated_at: file.generated_at,
        records,
    })
}

pub fn load_snapshot(path: &Path) -> Result<Snapshot, SnapshotError> {
    let content = fs::read_to_string(path).map_err(|source| SnapshotError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_snapshot(&content)
}

pub fn save_snapshot(snapshot: &Snapshot, path: &Path) -> Result<(), SnapshotError> {
    let file = SnapshotFile {
        version: SNAPSHOT_VERSION,
        generated_at: snapshot.generated_at,
        records: snapshot.records.iter().map(SnapshotRecordData::from).collect(),
    };

    let data = serde_json::to_string_pretty(&file)?;

    fs::write(path, data).map_err(|source| SnapshotError::Write {
        path: path.to_path_buf(),
        source,
    })
}
