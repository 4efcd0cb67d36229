//! Error types and axum `IntoResponse` implementation.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("render error: {0}")]
  Render(String),
  #[error("{0}")]
  Core(#[from] switchboard_core::Error),
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    tracing::error!(error = %self, "page request failed");
    match self {
      Error::Core(switchboard_core::Error::PostNotFound(_)) => {
        (StatusCode::NOT_FOUND, "Not Found").into_response()
      }
      other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()).into_response(),
    }
  }
}
