//! Error type for `roster-store-mongo`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("mongodb error: {0}")]
  Mongo(#[from] mongodb::error::Error),

  /// The server answered an insert with an `_id` that is not an object id.
  #[error("unexpected inserted id: {0}")]
  UnexpectedInsertedId(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
