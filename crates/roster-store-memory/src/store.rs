//! [`MemoryStore`] — the in-process implementation of [`PersonStore`].

use std::{convert::Infallible, sync::Arc};

use roster_core::{
  NewPerson, Person, PersonFields, PersonId,
  store::{PersonFilter, PersonStore},
};
use tokio::sync::RwLock;

use crate::object_id::IdGenerator;

// ─── Store ───────────────────────────────────────────────────────────────────

/// A person store held entirely in memory.
///
/// Cloning is cheap — clones share the same records.
#[derive(Clone)]
pub struct MemoryStore {
  inner: Arc<Inner>,
}

struct Inner {
  records: RwLock<Vec<Person>>,
  ids:     IdGenerator,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self {
      inner: Arc::new(Inner {
        records: RwLock::new(Vec::new()),
        ids:     IdGenerator::new(),
      }),
    }
  }

  /// Number of stored records, soft-deleted ones included.
  pub async fn len(&self) -> usize { self.inner.records.read().await.len() }

  pub async fn is_empty(&self) -> bool { self.len().await == 0 }
}

impl Default for MemoryStore {
  fn default() -> Self { Self::new() }
}

// ─── PersonStore impl ────────────────────────────────────────────────────────

impl PersonStore for MemoryStore {
  type Error = Infallible;

  async fn list(&self, filter: PersonFilter) -> Result<Vec<Person>, Infallible> {
    let records = self.inner.records.read().await;
    Ok(records.iter().filter(|p| filter.matches(p)).cloned().collect())
  }

  async fn get(&self, id: PersonId) -> Result<Option<Person>, Infallible> {
    let records = self.inner.records.read().await;
    Ok(records.iter().find(|p| p.id == id).cloned())
  }

  async fn insert(&self, person: NewPerson) -> Result<Person, Infallible> {
    let person = Person::from_new(self.inner.ids.next_id(), person);
    self.inner.records.write().await.push(person.clone());
    tracing::debug!(id = %person.id, "inserted person");
    Ok(person)
  }

  async fn update_fields(
    &self,
    id:     PersonId,
    fields: PersonFields,
  ) -> Result<bool, Infallible> {
    let mut records = self.inner.records.write().await;
    Ok(match records.iter_mut().find(|p| p.id == id) {
      Some(person) => person.apply(fields),
      None => false,
    })
  }

  async fn soft_delete(&self, id: PersonId) -> Result<Option<Person>, Infallible> {
    let mut records = self.inner.records.write().await;
    Ok(records.iter_mut().find(|p| p.id == id).map(|person| {
      let before = person.clone();
      person.is_soft_deleted = true;
      before
    }))
  }

  async fn hard_delete(&self, id: PersonId) -> Result<bool, Infallible> {
    let mut records = self.inner.records.write().await;
    let before = records.len();
    records.retain(|p| p.id != id);
    Ok(records.len() != before)
  }
}
