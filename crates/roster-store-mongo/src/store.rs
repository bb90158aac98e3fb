//! [`MongoStore`] — the MongoDB implementation of [`PersonStore`].

use futures::TryStreamExt as _;
use mongodb::{
  Client, Collection, Database,
  bson::doc,
  options::ClientOptions,
};
use roster_core::{
  NewPerson, Person, PersonFields, PersonId,
  store::{PersonFilter, PersonStore},
};

use crate::{
  Error, Result,
  encode::{
    PersonDocument, decode_id, filter_document, id_filter, set_fields,
    soft_delete_update,
  },
};

const APP_NAME: &str = "roster";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A person store backed by one MongoDB collection.
///
/// Cloning is cheap — the driver's client and collection handles are
/// reference-counted and share one connection pool.
#[derive(Clone)]
pub struct MongoStore {
  database:   Database,
  collection: Collection<PersonDocument>,
}

impl MongoStore {
  /// Build a client for `uri` and bind to `database`.`collection`.
  ///
  /// The driver connects lazily; call [`MongoStore::ping`] to verify the
  /// deployment is reachable.
  pub async fn connect(uri: &str, database: &str, collection: &str) -> Result<Self> {
    let mut options = ClientOptions::parse(uri).await?;
    options.app_name = Some(APP_NAME.to_owned());
    let client = Client::with_options(options)?;
    Ok(Self::from_client(&client, database, collection))
  }

  /// Bind to a collection through an existing client.
  pub fn from_client(client: &Client, database: &str, collection: &str) -> Self {
    let database = client.database(database);
    let collection = database.collection(collection);
    Self { database, collection }
  }

  /// Round-trip a `ping` command to the bound database.
  pub async fn ping(&self) -> Result<()> {
    self.database.run_command(doc! { "ping": 1 }).await?;
    Ok(())
  }

  pub fn collection_name(&self) -> &str { self.collection.name() }
}

// ─── PersonStore impl ────────────────────────────────────────────────────────

impl PersonStore for MongoStore {
  type Error = Error;

  async fn list(&self, filter: PersonFilter) -> Result<Vec<Person>> {
    let documents: Vec<PersonDocument> = self
      .collection
      .find(filter_document(filter))
      .await?
      .try_collect()
      .await?;
    Ok(documents.into_iter().map(PersonDocument::into_person).collect())
  }

  async fn get(&self, id: PersonId) -> Result<Option<Person>> {
    let document = self.collection.find_one(id_filter(id)).await?;
    Ok(document.map(PersonDocument::into_person))
  }

  async fn insert(&self, person: NewPerson) -> Result<Person> {
    let result = self
      .collection
      .clone_with_type::<NewPerson>()
      .insert_one(&person)
      .await?;

    let oid = result
      .inserted_id
      .as_object_id()
      .ok_or_else(|| Error::UnexpectedInsertedId(result.inserted_id.to_string()))?;
    tracing::debug!(id = %oid, "inserted person document");

    Ok(Person::from_new(decode_id(oid), person))
  }

  async fn update_fields(&self, id: PersonId, fields: PersonFields) -> Result<bool> {
    let result = self
      .collection
      .update_one(id_filter(id), set_fields(&fields))
      .await?;
    tracing::debug!(
      %id,
      matched = result.matched_count,
      modified = result.modified_count,
      "updated person document"
    );
    Ok(result.modified_count > 0)
  }

  async fn soft_delete(&self, id: PersonId) -> Result<Option<Person>> {
    let before = self
      .collection
      .find_one_and_update(id_filter(id), soft_delete_update())
      .await?;
    Ok(before.map(PersonDocument::into_person))
  }

  async fn hard_delete(&self, id: PersonId) -> Result<bool> {
    let result = self.collection.delete_one(id_filter(id)).await?;
    Ok(result.deleted_count > 0)
  }
}
