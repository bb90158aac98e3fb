//! Error types for `roster-core`.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  #[error("invalid person id {0:?}: expected 24 hex characters")]
  InvalidId(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
