//! File-backed slot: one `<key>.json` file per key.
//!
//! # Invariants
//! - Writes land in a sibling temp file first and are renamed into place,
//!   so a reader never observes a half-written blob.
//! - Keys must be plain file stems (no separators, no `..`).

use super::{SlotError, SlotResult, TodoSlot};
use log::debug;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub struct FileSlot {
    dir: PathBuf,
}

impl FileSlot {
    /// Uses `dir` as the slot directory. The directory is created lazily on
    /// first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the file path backing `key`.
    pub fn path_for(&self, key: &str) -> SlotResult<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl TodoSlot for FileSlot {
    fn read(&self, key: &str) -> SlotResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(SlotError::Io { path, source }),
        }
    }

    fn write(&self, key: &str, value: &str) -> SlotResult<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).map_err(|source| SlotError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let tmp_path = self.dir.join(format!("{key}.json.tmp"));
        fs::write(&tmp_path, value).map_err(|source| SlotError::Io {
            path: tmp_path.clone(),
            source,
        })?;
        fs::rename(&tmp_path, &path).map_err(|source| SlotError::Io {
            path: path.clone(),
            source,
        })?;

        debug!(
            "event=slot_write module=slot status=ok backend=file bytes={}",
            value.len()
        );
        Ok(())
    }
}

fn validate_key(key: &str) -> SlotResult<()> {
    let trimmed = key.trim();
    if trimmed.is_empty()
        || trimmed != key
        || key.contains(['/', '\\'])
        || key.contains("..")
    {
        return Err(SlotError::InvalidKey(key.to_string()));
    }
    Ok(())
}
