//! Mapping between Roster domain types and BSON documents.
//!
//! Ids are stored as native `ObjectId`s; the domain [`PersonId`] carries the
//! same 12 bytes. Field keys are camelCase, matching the JSON API.

use mongodb::bson::{Document, doc, oid::ObjectId};
use roster_core::{Person, PersonFields, PersonId, store::PersonFilter};
use serde::{Deserialize, Serialize};

// ─── Ids ──────────────────────────────────────────────────────────────────────

pub fn encode_id(id: PersonId) -> ObjectId { ObjectId::from_bytes(id.bytes()) }

pub fn decode_id(oid: ObjectId) -> PersonId { PersonId::from_bytes(oid.bytes()) }

// ─── Stored document ─────────────────────────────────────────────────────────

/// A person document exactly as it lives in the collection.
///
/// Missing string keys read as empty; older documents written without the
/// flag read as not deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonDocument {
  #[serde(rename = "_id")]
  pub id:              ObjectId,
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub first_name:      String,
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub last_name:       String,
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub birthdate:       String,
  #[serde(default)]
  pub is_soft_deleted: bool,
}

impl PersonDocument {
  pub fn into_person(self) -> Person {
    Person {
      id:              decode_id(self.id),
      first_name:      self.first_name,
      last_name:       self.last_name,
      birthdate:       self.birthdate,
      is_soft_deleted: self.is_soft_deleted,
    }
  }
}

// ─── Predicates and updates ──────────────────────────────────────────────────

pub fn filter_document(filter: PersonFilter) -> Document {
  match filter {
    PersonFilter::ExcludeDeleted => doc! { "isSoftDeleted": false },
    PersonFilter::All => doc! {},
  }
}

pub fn id_filter(id: PersonId) -> Document { doc! { "_id": encode_id(id) } }

pub fn set_fields(fields: &PersonFields) -> Document {
  doc! {
    "$set": {
      "firstName": fields.first_name.as_str(),
      "lastName":  fields.last_name.as_str(),
      "birthdate": fields.birthdate.as_str(),
    }
  }
}

pub fn soft_delete_update() -> Document {
  doc! { "$set": { "isSoftDeleted": true } }
}

#[cfg(test)]
mod tests {
  use mongodb::bson;

  use super::*;

  #[test]
  fn id_round_trips_through_object_id() {
    let id: PersonId = "65a1f0c2e4b0a1b2c3d4e5f6".parse().unwrap();
    let oid = encode_id(id);
    assert_eq!(oid.to_hex(), "65a1f0c2e4b0a1b2c3d4e5f6");
    assert_eq!(decode_id(oid), id);
  }

  #[test]
  fn exclude_deleted_filters_on_flag() {
    assert_eq!(
      filter_document(PersonFilter::ExcludeDeleted),
      doc! { "isSoftDeleted": false }
    );
    assert!(filter_document(PersonFilter::All).is_empty());
  }

  #[test]
  fn set_fields_touches_only_three_keys() {
    let update = set_fields(&PersonFields {
      first_name: "Ada".into(),
      last_name:  "".into(),
      birthdate:  "1815-12-10".into(),
    });
    let set = update.get_document("$set").unwrap();
    assert_eq!(set.len(), 3);
    assert_eq!(set.get_str("firstName").unwrap(), "Ada");
    assert_eq!(set.get_str("lastName").unwrap(), "");
    assert!(!set.contains_key("isSoftDeleted"));
    assert!(!set.contains_key("_id"));
  }

  #[test]
  fn soft_delete_sets_only_the_flag() {
    assert_eq!(
      soft_delete_update(),
      doc! { "$set": { "isSoftDeleted": true } }
    );
  }

  #[test]
  fn document_decodes_into_person() {
    let oid = ObjectId::new();
    let raw = doc! {
      "_id": oid,
      "firstName": "Ada",
      "lastName": "Lovelace",
      "birthdate": "1815-12-10",
      "isSoftDeleted": true,
    };
    let document: PersonDocument = bson::from_document(raw).unwrap();
    let person = document.into_person();
    assert_eq!(person.id.to_hex(), oid.to_hex());
    assert_eq!(person.first_name, "Ada");
    assert!(person.is_soft_deleted);
  }

  #[test]
  fn missing_keys_decode_as_defaults() {
    let raw = doc! { "_id": ObjectId::new(), "firstName": "Ada" };
    let person = bson::from_document::<PersonDocument>(raw)
      .unwrap()
      .into_person();
    assert_eq!(person.last_name, "");
    assert!(!person.is_soft_deleted);
  }

  #[test]
  fn new_person_serializes_without_id() {
    let new = roster_core::NewPerson::new("Ada", "Lovelace", "1815-12-10");
    let document = bson::to_document(&new).unwrap();
    assert!(!document.contains_key("_id"));
    assert!(!document.get_bool("isSoftDeleted").unwrap());
    assert_eq!(document.get_str("birthdate").unwrap(), "1815-12-10");
  }
}
