//! JSON REST API for Roster.
//!
//! Exposes an axum [`Router`] backed by any [`roster_core::PersonStore`].
//! The `server` binary wires it to a concrete store and a TCP listener.
//!
//! | Method   | Path | Handler |
//! |----------|------|---------|
//! | `GET`    | `/` | liveness placeholder |
//! | `GET`    | `/persons[?includeDeleted=<bool>]` | [`persons::list`] |
//! | `GET`    | `/person/{id}` | [`persons::get_one`] |
//! | `POST`   | `/person` | [`persons::create`] |
//! | `PUT`    | `/person/{id}` | [`persons::update`] |
//! | `DELETE` | `/soft-delete-person/{id}` | [`persons::soft_delete`] |
//! | `DELETE` | `/hard-delete-person/{id}` | [`persons::hard_delete`] |

pub mod config;
pub mod error;
pub mod persons;
pub mod reply;

pub use config::ServerConfig;
pub use error::ApiError;

use std::{future::Future, sync::Arc, time::Duration};

use axum::{
  Router,
  routing::{delete, get, post},
};
use roster_core::PersonStore;
use tower_http::trace::TraceLayer;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: PersonStore> {
  pub store:         Arc<S>,
  /// Upper bound on every individual store call.
  pub store_timeout: Duration,
}

impl<S: PersonStore> AppState<S> {
  pub fn new(store: S, store_timeout: Duration) -> Self {
    Self { store: Arc::new(store), store_timeout }
  }

  /// Await one store call under [`AppState::store_timeout`].
  pub(crate) async fn bounded<T, F>(&self, call: F) -> Result<T, ApiError>
  where
    F: Future<Output = Result<T, S::Error>>,
  {
    match tokio::time::timeout(self.store_timeout, call).await {
      Ok(result) => result.map_err(ApiError::store),
      Err(_) => Err(ApiError::Timeout(self.store_timeout)),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the API router for `state`.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: PersonStore + Clone + Send + Sync + 'static,
{
  Router::new()
    .route("/", get(root))
    .route("/persons", get(persons::list::<S>))
    .route("/person", post(persons::create::<S>))
    .route("/person/{id}", get(persons::get_one::<S>).put(persons::update::<S>))
    .route("/soft-delete-person/{id}", delete(persons::soft_delete::<S>))
    .route("/hard-delete-person/{id}", delete(persons::hard_delete::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

/// `GET /`
async fn root() -> &'static str { "Default path accessed." }
