use super::backend::{BackendStatus, StorageBackend};
use crate::error::{IdeaError, Result};
use crate::model::Idea;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Stores the collection as one pretty-printed JSON array, e.g. `data/ideas.json`.
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn ensure_dir(&self) -> Result<PathBuf> {
        let dir = self.dir();
        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(IdeaError::Io)?;
        }
        Ok(dir)
    }
}

impl StorageBackend for JsonFileBackend {
    fn ensure_initialized(&self) -> Result<()> {
        self.ensure_dir()?;
        if !self.path.exists() {
            fs::write(&self.path, "[]").map_err(IdeaError::Io)?;
        }
        Ok(())
    }

    fn load(&self) -> Result<Vec<Idea>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path).map_err(IdeaError::Io)?;
        let ideas: Vec<Idea> = serde_json::from_str(&content).map_err(IdeaError::Serialization)?;
        Ok(ideas)
    }

    fn save(&self, ideas: &[Idea]) -> Result<()> {
        let dir = self.ensure_dir()?;
        let content = serde_json::to_string_pretty(ideas).map_err(IdeaError::Serialization)?;

        // Atomic write: readers never observe a half-written array
        let tmp_file = dir.join(format!(".ideas-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(IdeaError::Io)?;
        if let Err(err) = fs::rename(&tmp_file, &self.path) {
            let _ = fs::remove_file(&tmp_file);
            return Err(IdeaError::Io(err));
        }
        Ok(())
    }

    fn status(&self) -> BackendStatus {
        let location = self.path.display().to_string();
        match fs::metadata(&self.path) {
            Ok(meta) => {
                let mut status = BackendStatus::accessible(location);
                status.size = Some(meta.len());
                status.last_modified = meta.modified().ok().map(DateTime::<Utc>::from);
                status
            }
            Err(err) => BackendStatus::inaccessible(location, err.to_string()),
        }
    }
}
