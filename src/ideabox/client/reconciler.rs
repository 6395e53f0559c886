//! View-State Reconciler.
//!
//! Holds the working copy of the collection and runs in one of two modes:
//!
//! - **Online**: every mutation goes through the gateway first; the working
//!   copy only changes once the server has accepted it.
//! - **Offline**: mutations apply to the working copy directly and the whole
//!   list is re-serialized to local storage after each one. Ids missing from
//!   the working copy are rejected as not found.
//!
//! The mode is decided by [`Reconciler::load`]: a successful list call means
//! online, any failure means offline with the last local copy. Nothing probes
//! the backend afterwards; calling `load` again is the only way back online,
//! and it replaces the working copy with the server's list without merging
//! offline changes.

use super::gateway::IdeaGateway;
use super::local::LocalStorage;
use super::{CmdMessage, Outcome};
use crate::error::{IdeaError, Result};
use crate::filter::{self, IdeaFilter};
use crate::model::{self, Category, Idea, IdeaDraft};
use std::collections::BTreeMap;
use tracing::{info, warn};

pub const LOCAL_STORAGE_KEY: &str = "idea-tracker-ideas";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Online,
    Offline,
}

pub struct Reconciler<G: IdeaGateway, L: LocalStorage> {
    gateway: G,
    local: L,
    ideas: Vec<Idea>,
    mode: Mode,
}

impl<G: IdeaGateway, L: LocalStorage> Reconciler<G, L> {
    pub fn new(gateway: G, local: L) -> Self {
        Self {
            gateway,
            local,
            ideas: Vec::new(),
            mode: Mode::Online,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_online(&self) -> bool {
        self.mode == Mode::Online
    }

    pub fn ideas(&self) -> &[Idea] {
        &self.ideas
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn local(&self) -> &L {
        &self.local
    }

    /// Populate the working copy, deciding the mode on the way.
    pub async fn load(&mut self) -> Outcome {
        match self.gateway.get_all_ideas().await {
            Ok(ideas) => {
                info!(count = ideas.len(), "ideas loaded from API");
                self.ideas = ideas;
                self.mode = Mode::Online;
                Outcome::default()
            }
            Err(err) => {
                warn!(error = %err, "failed to load ideas, switching to offline mode");
                self.mode = Mode::Offline;
                self.ideas = self.read_local();
                Outcome::default().with_message(CmdMessage::warning(
                    "Offline mode: using local storage. Some features may be limited.",
                ))
            }
        }
    }

    pub async fn create(&mut self, draft: IdeaDraft) -> Result<Outcome> {
        let draft = draft.validate()?;
        match self.mode {
            Mode::Online => {
                let idea = self.gateway.create_idea(&draft).await?;
                self.ideas.insert(0, idea.clone());
                Ok(Outcome::default()
                    .with_affected(idea)
                    .with_message(CmdMessage::success("Idea created!")))
            }
            Mode::Offline => {
                let idea = Idea::from_draft(draft, model::now());
                let mut next = Vec::with_capacity(self.ideas.len() + 1);
                next.push(idea.clone());
                next.extend(self.ideas.iter().cloned());
                self.commit_local(next)?;
                Ok(Outcome::default()
                    .with_affected(idea)
                    .with_message(CmdMessage::success("Idea created (offline). Saved locally.")))
            }
        }
    }

    pub async fn update(&mut self, id: &str, draft: IdeaDraft) -> Result<Outcome> {
        let draft = draft.validate()?;
        match self.mode {
            Mode::Online => {
                let idea = self.gateway.update_idea(id, &draft).await?;
                match self.ideas.iter().position(|existing| existing.id == idea.id) {
                    Some(position) => self.ideas[position] = idea.clone(),
                    // created elsewhere since the last load
                    None => self.ideas.insert(0, idea.clone()),
                }
                Ok(Outcome::default()
                    .with_affected(idea)
                    .with_message(CmdMessage::success("Idea updated!")))
            }
            Mode::Offline => {
                let position = self.position(id)?;
                let mut next = self.ideas.clone();
                next[position].apply(draft);
                let idea = next[position].clone();
                self.commit_local(next)?;
                Ok(Outcome::default()
                    .with_affected(idea)
                    .with_message(CmdMessage::success("Idea updated (offline). Saved locally.")))
            }
        }
    }

    pub async fn delete(&mut self, id: &str) -> Result<Outcome> {
        match self.mode {
            Mode::Online => {
                self.gateway.delete_idea(id).await?;
                let position = self.ideas.iter().position(|idea| idea.id == id);
                let mut outcome = Outcome::default();
                if let Some(position) = position {
                    outcome = outcome.with_affected(self.ideas.remove(position));
                }
                Ok(outcome.with_message(CmdMessage::success("Idea deleted.")))
            }
            Mode::Offline => {
                let position = self.position(id)?;
                let mut next = self.ideas.clone();
                let idea = next.remove(position);
                self.commit_local(next)?;
                Ok(Outcome::default()
                    .with_affected(idea)
                    .with_message(CmdMessage::success("Idea deleted (offline). Removed locally.")))
            }
        }
    }

    /// The working copy narrowed by `filter`, in collection order.
    pub fn visible(&self, filter: &IdeaFilter) -> Vec<&Idea> {
        filter.apply(&self.ideas)
    }

    pub fn available_tags(&self) -> Vec<String> {
        filter::available_tags(&self.ideas)
    }

    pub fn category_counts(&self) -> BTreeMap<Category, usize> {
        filter::category_counts(&self.ideas)
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.ideas
            .iter()
            .position(|idea| idea.id == id)
            .ok_or_else(|| IdeaError::NotFound(id.to_string()))
    }

    fn read_local(&self) -> Vec<Idea> {
        let raw = match self.local.get_item(LOCAL_STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(error = %err, "failed to read local ideas");
                return Vec::new();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|err| {
            warn!(error = %err, "discarding unreadable local ideas");
            Vec::new()
        })
    }

    // Persist first so a failed write leaves the working copy untouched.
    fn commit_local(&mut self, next: Vec<Idea>) -> Result<()> {
        let serialized = serde_json::to_string(&next)?;
        self.local.set_item(LOCAL_STORAGE_KEY, &serialized)?;
        self.ideas = next;
        Ok(())
    }
}
