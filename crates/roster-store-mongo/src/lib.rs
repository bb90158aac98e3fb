//! MongoDB backend for the Roster person store.
//!
//! One collection holds one document per person:
//! `{_id: ObjectId, firstName, lastName, birthdate, isSoftDeleted}`.
//! The driver owns connection pooling; [`MongoStore`] is a thin, cloneable
//! handle over a typed collection.

mod encode;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::MongoStore;
