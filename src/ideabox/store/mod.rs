//! # Storage Layer
//!
//! [`IdeaStore`] owns the persisted idea collection. Raw I/O sits behind the
//! [`StorageBackend`] trait so the same store logic runs over a JSON file in
//! production and over memory in tests.
//!
//! ## Implementations
//!
//! - [`fs_backend::JsonFileBackend`]: the whole collection as one JSON array
//!   (`data/ideas.json` by default), created as `[]` on first run.
//! - [`mem_backend::MemBackend`]: no persistence, with switches to simulate
//!   read and write failures.
//!
//! ## Write Model
//!
//! There is no incremental update: every mutation reads the collection,
//! changes it and rewrites the entire document, so a write costs O(n) in the
//! number of stored ideas. All operations of one store go through a single
//! mutex, which linearizes concurrent requests and rules out lost updates
//! between overlapping writers of the same store.
//!
//! ## Failure Policy
//!
//! - `get_all` fails open: a read or parse failure is logged and yields an
//!   empty collection.
//! - Mutations propagate read failures instead, so a corrupt document is never
//!   overwritten with a fresh collection.
//! - A failed write leaves the previous document in place and surfaces as
//!   [`IdeaError::Persistence`].

use crate::error::{IdeaError, Result};
use crate::model::{self, Idea, IdeaDraft};
use chrono::{DateTime, Utc};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, warn};

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;

pub use backend::{BackendStatus, StorageBackend};

#[derive(Debug, Default)]
struct WriterState {
    // Most recent createdAt handed out; new records never go below it.
    last_created: Option<DateTime<Utc>>,
}

pub struct IdeaStore<B: StorageBackend> {
    backend: B,
    state: Mutex<WriterState>,
}

impl<B: StorageBackend> IdeaStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            state: Mutex::new(WriterState::default()),
        }
    }

    /// Create the backing document if needed. Called once at startup.
    pub fn initialize(&self) -> Result<()> {
        let _guard = self.lock();
        self.backend.ensure_initialized()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn status(&self) -> BackendStatus {
        self.backend.status()
    }

    /// The full collection, newest first, read fresh from the backend.
    pub fn get_all(&self) -> Vec<Idea> {
        let _guard = self.lock();
        match self.backend.load() {
            Ok(ideas) => ideas,
            Err(err) => {
                warn!(error = %err, "failed to read ideas, serving empty collection");
                Vec::new()
            }
        }
    }

    pub fn insert(&self, draft: IdeaDraft) -> Result<Idea> {
        let mut state = self.lock();
        let mut ideas = self.load_for_write()?;

        let created_at = match state.last_created {
            Some(last) => model::now().max(last),
            None => model::now(),
        };
        let idea = Idea::from_draft(draft, created_at);
        ideas.insert(0, idea.clone());

        self.persist(&ideas)?;
        state.last_created = Some(created_at);
        debug!(id = %idea.id, total = ideas.len(), "idea inserted");
        Ok(idea)
    }

    pub fn update_by_id(&self, id: &str, draft: IdeaDraft) -> Result<Idea> {
        let _guard = self.lock();
        let mut ideas = self.load_for_write()?;

        let idea = ideas
            .iter_mut()
            .find(|idea| idea.id == id)
            .ok_or_else(|| IdeaError::NotFound(id.to_string()))?;
        idea.apply(draft);
        let updated = idea.clone();

        self.persist(&ideas)?;
        debug!(id = %updated.id, "idea updated");
        Ok(updated)
    }

    pub fn delete_by_id(&self, id: &str) -> Result<()> {
        let _guard = self.lock();
        let mut ideas = self.load_for_write()?;

        let position = ideas
            .iter()
            .position(|idea| idea.id == id)
            .ok_or_else(|| IdeaError::NotFound(id.to_string()))?;
        ideas.remove(position);

        self.persist(&ideas)?;
        debug!(id, total = ideas.len(), "idea deleted");
        Ok(())
    }

    // The guarded state stays consistent even if a holder panicked.
    fn lock(&self) -> MutexGuard<'_, WriterState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn load_for_write(&self) -> Result<Vec<Idea>> {
        self.backend.load().map_err(|err| {
            error!(error = %err, "failed to read ideas before write");
            IdeaError::Persistence(err.to_string())
        })
    }

    fn persist(&self, ideas: &[Idea]) -> Result<()> {
        self.backend.save(ideas).map_err(|err| {
            error!(error = %err, "failed to write ideas");
            IdeaError::Persistence(err.to_string())
        })
    }
}
