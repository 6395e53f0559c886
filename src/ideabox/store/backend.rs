use crate::error::Result;
use crate::model::Idea;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Abstract interface for raw collection I/O.
/// This trait handles the "how" of storage (file vs memory),
/// while `IdeaStore` handles the "what" (ids, ordering, locking).
///
/// Backends must be `Send + Sync`: one store is shared by every request
/// handler of the HTTP layer.
pub trait StorageBackend: Send + Sync {
    /// Create the backing document (an empty collection) if it does not exist yet.
    fn ensure_initialized(&self) -> Result<()>;

    /// Read the whole collection. A missing document is an empty collection.
    fn load(&self) -> Result<Vec<Idea>>;

    /// Replace the whole collection.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn save(&self, ideas: &[Idea]) -> Result<()>;

    /// Report on the backing document, for health checks.
    fn status(&self) -> BackendStatus;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendStatus {
    pub location: String,
    pub accessible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BackendStatus {
    pub fn accessible(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            accessible: true,
            size: None,
            last_modified: None,
            error: None,
        }
    }

    pub fn inaccessible(location: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            accessible: false,
            size: None,
            last_modified: None,
            error: Some(error.into()),
        }
    }
}
