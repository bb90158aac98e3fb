//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Only failures that are not part of the body-message contract land here:
//! malformed input the handlers cannot interpret and store failures.

use std::time::Duration;

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("store call timed out after {0:?}")]
  Timeout(Duration),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = match &self {
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
      ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
      tracing::error!(error = %self, "request failed");
    } else {
      tracing::warn!(error = %self, "request rejected");
    }
    (status, Json(json!({ "error": self.to_string() }))).into_response()
  }
}
