//! # Client
//!
//! The client half of ideabox: a [`gateway`] that speaks the HTTP API, a
//! [`local`] key/value store for offline copies, and the [`reconciler`] that
//! holds the working collection and decides between the two.
//!
//! Operations return an [`Outcome`] carrying structured [`CmdMessage`]s rather
//! than printing anything, so a terminal, a GUI toast or a test can all
//! observe the same success and failure signals.

use crate::model::Idea;

pub mod gateway;
pub mod local;
pub mod reconciler;

pub use gateway::{ApiClient, IdeaGateway, Payload, RequestOptions};
pub use local::{FileLocalStorage, LocalStorage, MemoryLocalStorage};
pub use reconciler::{Mode, Reconciler, LOCAL_STORAGE_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    pub affected: Option<Idea>,
    pub messages: Vec<CmdMessage>,
}

impl Outcome {
    pub fn with_affected(mut self, idea: Idea) -> Self {
        self.affected = Some(idea);
        self
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }
}
