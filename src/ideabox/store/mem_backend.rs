use super::backend::{BackendStatus, StorageBackend};
use crate::error::{IdeaError, Result};
use crate::model::Idea;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// In-memory storage backend for testing.
/// Does NOT persist data.
///
/// Uses a `Mutex` rather than `RefCell` since the store is shared across
/// request handlers and must be `Sync`.
#[derive(Default)]
pub struct MemBackend {
    ideas: Mutex<Vec<Idea>>,
    simulate_write_error: AtomicBool,
    simulate_read_error: AtomicBool,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ideas(ideas: Vec<Idea>) -> Self {
        Self {
            ideas: Mutex::new(ideas),
            ..Self::default()
        }
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.store(simulate, Ordering::SeqCst);
    }

    /// Enable read error simulation (a corrupt or unreadable document).
    pub fn set_simulate_read_error(&self, simulate: bool) {
        self.simulate_read_error.store(simulate, Ordering::SeqCst);
    }

    fn ideas(&self) -> std::sync::MutexGuard<'_, Vec<Idea>> {
        self.ideas
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl StorageBackend for MemBackend {
    fn ensure_initialized(&self) -> Result<()> {
        Ok(())
    }

    fn load(&self) -> Result<Vec<Idea>> {
        if self.simulate_read_error.load(Ordering::SeqCst) {
            return Err(IdeaError::Persistence("Simulated read error".to_string()));
        }
        Ok(self.ideas().clone())
    }

    fn save(&self, ideas: &[Idea]) -> Result<()> {
        if self.simulate_write_error.load(Ordering::SeqCst) {
            return Err(IdeaError::Persistence("Simulated write error".to_string()));
        }
        *self.ideas() = ideas.to_vec();
        Ok(())
    }

    fn status(&self) -> BackendStatus {
        BackendStatus::accessible("memory")
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{now, Category, IdeaDraft};

    pub fn idea(title: &str, category: Category, tags: &[&str]) -> Idea {
        let draft = IdeaDraft::new(title, format!("About {}", title), category)
            .with_tags(tags.iter().copied());
        Idea::from_draft(draft, now())
    }

    /// A small mixed collection, newest first.
    pub fn sample_ideas() -> Vec<Idea> {
        vec![
            idea("Rust CLI", Category::Tech, &["rust", "cli"]),
            idea("Garden plan", Category::Personal, &["outdoors"]),
            idea("Quarterly review", Category::Work, &["planning"]),
            idea("Short story", Category::Creative, &["writing", "planning"]),
            idea("Coffee cart", Category::Business, &[]),
        ]
    }
}
