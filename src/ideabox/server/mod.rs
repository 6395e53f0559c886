//! # HTTP Resource Layer
//!
//! Maps the JSON API onto an [`IdeaStore`]:
//!
//! | Method | Path | Success |
//! |--------|------|---------|
//! | GET | `/api/ideas` | 200, every idea |
//! | POST | `/api/ideas` | 201, the created idea |
//! | PUT | `/api/ideas/:id` | 200, the updated idea |
//! | DELETE | `/api/ideas/:id` | 204, empty |
//! | GET | `/api/health` | 200, `{status, timestamp}` |
//! | GET | `/api/health/details` | 200 or 503, data file and uptime checks |
//!
//! Validation happens here, before the store is touched. Errors are always a
//! JSON object with a single `error` field; see [`error::ApiError`].
//!
//! The store is synchronous, so every call runs on tokio's blocking pool.

use crate::error::{IdeaError, Result};
use crate::store::{IdeaStore, StorageBackend};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use std::any::Any;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

pub mod error;
pub mod handlers;
pub mod health;

use error::{ApiError, INTERNAL_MESSAGE};

pub struct AppState<B: StorageBackend> {
    pub store: Arc<IdeaStore<B>>,
    pub started_at: Instant,
}

impl<B: StorageBackend> Clone for AppState<B> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            started_at: self.started_at,
        }
    }
}

impl<B: StorageBackend + 'static> AppState<B> {
    pub fn new(store: IdeaStore<B>) -> Self {
        Self::shared(Arc::new(store))
    }

    pub fn shared(store: Arc<IdeaStore<B>>) -> Self {
        Self {
            store,
            started_at: Instant::now(),
        }
    }

    /// Run a store operation on the blocking pool.
    pub async fn with_store<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&IdeaStore<B>) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || op(&store))
            .await
            .map_err(|err| IdeaError::Persistence(format!("store task failed: {}", err)))?
    }
}

pub fn build_router<B: StorageBackend + 'static>(state: AppState<B>) -> Router {
    let router = Router::new()
        .route(
            "/api/ideas",
            get(handlers::list_ideas::<B>)
                .post(handlers::create_idea::<B>)
                .fallback(handlers::not_found),
        )
        .route(
            "/api/ideas/:id",
            axum::routing::put(handlers::update_idea::<B>)
                .delete(handlers::delete_idea::<B>)
                .fallback(handlers::not_found),
        )
        .route(
            "/api/health",
            get(handlers::health).fallback(handlers::not_found),
        )
        .route(
            "/api/health/details",
            get(handlers::health_details::<B>).fallback(handlers::not_found),
        )
        .fallback(handlers::not_found)
        .with_state(state);
    with_middleware(router)
}

fn with_middleware(router: Router) -> Router {
    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    error!(panic = %detail, "request handler panicked");
    ApiError::internal(INTERNAL_MESSAGE).into_response()
}

/// Bind, initialize the store and serve until Ctrl-C.
pub async fn serve<B: StorageBackend + 'static>(store: IdeaStore<B>, host: &str, port: u16) -> Result<()> {
    store.initialize()?;
    let listener = TcpListener::bind((host, port)).await?;
    let addr = listener.local_addr()?;
    info!(%addr, "ideabox backend running");
    info!("health check: http://localhost:{}/api/health", addr.port());
    info!("ideas API: http://localhost:{}/api/ideas", addr.port());

    axum::serve(listener, build_router(AppState::new(store)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("ideabox backend stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
