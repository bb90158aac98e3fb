//! The `PersonStore` trait and the typed list filter.
//!
//! The trait is implemented by storage backends (`roster-store-mongo`,
//! `roster-store-memory`). The API layer depends on this abstraction, not on
//! any concrete backend.

use std::future::Future;

use crate::{
  id::PersonId,
  person::{NewPerson, Person, PersonFields},
};

// ─── Filter ──────────────────────────────────────────────────────────────────

/// Visibility predicate for [`PersonStore::list`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PersonFilter {
  /// Only records whose soft-delete flag is `false`.
  #[default]
  ExcludeDeleted,
  /// Every record, soft-deleted or not.
  All,
}

impl PersonFilter {
  pub fn from_include_deleted(include_deleted: bool) -> Self {
    if include_deleted { Self::All } else { Self::ExcludeDeleted }
  }

  pub fn matches(self, person: &Person) -> bool {
    match self {
      Self::ExcludeDeleted => !person.is_soft_deleted,
      Self::All => true,
    }
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a person store backend.
///
/// Each method maps to exactly one store round trip. "Nothing matched" is a
/// normal outcome (`None` / `false`), never an error.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait PersonStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// All persons matching `filter`, in storage order.
  fn list(
    &self,
    filter: PersonFilter,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  /// Retrieve a person by id. Returns `None` if not found.
  fn get(
    &self,
    id: PersonId,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  /// Persist a new person; the store assigns the id.
  fn insert(
    &self,
    person: NewPerson,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  /// Overwrite the name and birthdate fields of a person.
  ///
  /// Returns `true` only if a record was modified. Writing values identical
  /// to the stored ones counts as no modification.
  fn update_fields(
    &self,
    id: PersonId,
    fields: PersonFields,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Atomically set the soft-delete flag on a person.
  ///
  /// Returns the record as it was before the update, or `None` if no record
  /// has this id.
  fn soft_delete(
    &self,
    id: PersonId,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  /// Permanently remove a person. Returns `true` if a record was deleted.
  fn hard_delete(
    &self,
    id: PersonId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
