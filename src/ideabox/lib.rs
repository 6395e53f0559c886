//! # Ideabox Architecture
//!
//! Ideabox is a small idea tracker: an HTTP service that keeps every idea in
//! one JSON file, and a client that talks to it or, when it can't, keeps
//! working against a local copy.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (main.rs, args.rs)                                     │
//! │  - `serve` runs the HTTP service                            │
//! │  - everything else drives the reconciler and prints         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Reconciler (client/reconciler.rs) + views (filter.rs)      │
//! │  - working copy, online/offline mode, local mirroring       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Gateway (client/gateway.rs)                                │
//! │  - typed HTTP calls, transport errors carry the status      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │  HTTP / JSON
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Resource layer (server/)                                   │
//! │  - validation, status codes, generic 500s                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage (store/)                                           │
//! │  - IdeaStore over a StorageBackend (JSON file or memory)    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No Ambient State
//!
//! The store is constructed with its file path and the client with its base
//! URL; both are passed explicitly to whoever needs them. Tests build as many
//! independent instances as they like.
//!
//! ## Module Overview
//!
//! - [`model`]: `Idea`, `IdeaDraft`, `Category` and the timestamp wire format
//! - [`store`]: storage abstraction and implementations
//! - [`server`]: axum router and handlers
//! - [`client`]: gateway, local storage and reconciler
//! - [`filter`]: search/category/tag filtering, tag and category summaries
//! - [`config`]: layered configuration
//! - [`logging`]: tracing subscriber setup
//! - [`error`]: error types

pub mod client;
pub mod config;
pub mod error;
pub mod filter;
pub mod logging;
pub mod model;
pub mod server;
pub mod store;
