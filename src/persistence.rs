// File: src/persistence.rs
use crate::config::EngineConfig;
use crate::core::index::AnnotationIndex;
use crate::error::{Result, TajweedError};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use std::time::SystemTime;
use tempfile::NamedTempFile;

/// Size and modification time of one dataset file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct FileStamp {
    len: u64,
    modified: Option<SystemTime>,
}

impl FileStamp {
    fn of(path: &Path) -> Result<Self> {
        let meta = fs::metadata(path)?;
        Ok(Self { len: meta.len(), modified: meta.modified().ok() })
    }
}

/// Identifies the dataset files a snapshot was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFingerprint {
    text: FileStamp,
    annotations: FileStamp,
}

impl SourceFingerprint {
    pub fn of(config: &EngineConfig) -> Result<Self> {
        Ok(Self {
            text: FileStamp::of(&config.text_path)?,
            annotations: FileStamp::of(&config.annotations_path)?,
        })
    }
}

#[derive(Serialize, Deserialize)]
struct Snapshot {
    fingerprint: SourceFingerprint,
    index: AnnotationIndex,
}

/// Writes the index to `path` atomically: a temp file in the same
/// directory is filled, then renamed over the target.
pub fn save_snapshot(index: &AnnotationIndex, fingerprint: &SourceFingerprint, path: &Path) -> Result<()> {
    let parent_dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(&temp_file);
        // Borrowed mirror of `Snapshot`, to avoid cloning the index.
        bincode::serialize_into(&mut writer, &(fingerprint, index))?;
        writer.flush()?;
    }

    temp_file.persist(path).map_err(|e| e.error)?;
    log::debug!("index snapshot written to {}", path.display());
    Ok(())
}

/// Loads a snapshot, refusing it if the datasets changed since it was written.
pub fn load_snapshot(path: &Path, expected: &SourceFingerprint) -> Result<AnnotationIndex> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let snapshot: Snapshot = bincode::deserialize_from(reader)?;
    if snapshot.fingerprint != *expected {
        return Err(TajweedError::StaleSnapshot(path.display().to_string()));
    }
    Ok(snapshot.index)
}
