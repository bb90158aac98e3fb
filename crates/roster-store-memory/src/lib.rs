//! In-memory backend for the Roster person store.
//!
//! Records live in a `Vec` behind a [`tokio::sync::RwLock`], so listing
//! preserves insertion order the way a document collection scan does.
//! Nothing is durable; all state is lost when the process exits.

mod object_id;
mod store;

pub use store::MemoryStore;
