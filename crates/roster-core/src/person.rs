//! Person records and the request shapes that create or modify them.

use serde::{Deserialize, Serialize};

use crate::id::PersonId;

/// A stored person.
///
/// The identifier is serialised under `_id`, the key used by the document
/// store, so clients see the same shape the collection holds. Empty name and
/// birthdate fields are left out of the output and read back as empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
  #[serde(rename = "_id")]
  pub id:              PersonId,
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub first_name:      String,
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub last_name:       String,
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub birthdate:       String,
  pub is_soft_deleted: bool,
}

impl Person {
  /// Materialise a stored person from a creation request and the id the
  /// store assigned to it.
  pub fn from_new(id: PersonId, new: NewPerson) -> Self {
    Self {
      id,
      first_name: new.first_name,
      last_name: new.last_name,
      birthdate: new.birthdate,
      is_soft_deleted: new.is_soft_deleted,
    }
  }

  /// Overwrite the name and birthdate fields; the id and the soft-delete flag
  /// are untouched. Returns `true` if any value actually changed.
  pub fn apply(&mut self, fields: PersonFields) -> bool {
    let changed = self.first_name != fields.first_name
      || self.last_name != fields.last_name
      || self.birthdate != fields.birthdate;
    self.first_name = fields.first_name;
    self.last_name = fields.last_name;
    self.birthdate = fields.birthdate;
    changed
  }
}

/// Body of `POST /person`.
///
/// Missing keys decode as empty strings so that validation, not the decoder,
/// reports them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewPerson {
  pub first_name:      String,
  pub last_name:       String,
  pub birthdate:       String,
  pub is_soft_deleted: bool,
}

impl NewPerson {
  pub fn new(
    first_name: impl Into<String>,
    last_name: impl Into<String>,
    birthdate: impl Into<String>,
  ) -> Self {
    Self {
      first_name:      first_name.into(),
      last_name:       last_name.into(),
      birthdate:       birthdate.into(),
      is_soft_deleted: false,
    }
  }

  /// Clear any client-supplied soft-delete flag. New records are always
  /// visible.
  pub fn reset_flags(mut self) -> Self {
    self.is_soft_deleted = false;
    self
  }
}

/// Body of `PUT /person/{id}`: the fields an update overwrites.
///
/// No validation is applied; absent keys overwrite with empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonFields {
  pub first_name: String,
  pub last_name:  String,
  pub birthdate:  String,
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn ada() -> Person {
    Person::from_new(
      PersonId::from_bytes([1; 12]),
      NewPerson::new("Ada", "Lovelace", "1815-12-10"),
    )
  }

  #[test]
  fn person_serializes_with_wire_keys() {
    let value = serde_json::to_value(ada()).unwrap();
    assert_eq!(
      value,
      json!({
        "_id": "010101010101010101010101",
        "firstName": "Ada",
        "lastName": "Lovelace",
        "birthdate": "1815-12-10",
        "isSoftDeleted": false,
      })
    );
  }

  #[test]
  fn empty_fields_are_omitted() {
    let mut person = ada();
    person.apply(PersonFields::default());
    let value = serde_json::to_value(&person).unwrap();
    assert_eq!(
      value,
      json!({ "_id": "010101010101010101010101", "isSoftDeleted": false })
    );

    let back: Person = serde_json::from_value(value).unwrap();
    assert_eq!(back, person);
  }

  #[test]
  fn new_person_tolerates_missing_keys() {
    let new: NewPerson =
      serde_json::from_value(json!({ "lastName": "Lovelace" })).unwrap();
    assert_eq!(new.first_name, "");
    assert_eq!(new.last_name, "Lovelace");
    assert!(!new.is_soft_deleted);
  }

  #[test]
  fn reset_flags_forces_visibility() {
    let new: NewPerson = serde_json::from_value(json!({
      "firstName": "Ada",
      "isSoftDeleted": true,
    }))
    .unwrap();
    assert!(!new.reset_flags().is_soft_deleted);
  }

  #[test]
  fn fields_ignore_id_and_flag_keys() {
    let fields: PersonFields = serde_json::from_value(json!({
      "_id": "not-even-an-id",
      "firstName": "Augusta",
      "isSoftDeleted": true,
    }))
    .unwrap();
    assert_eq!(fields.first_name, "Augusta");
    assert_eq!(fields.last_name, "");
  }

  #[test]
  fn apply_overwrites_fields_and_keeps_flag() {
    let mut person = ada();
    person.is_soft_deleted = true;

    let changed = person.apply(PersonFields {
      first_name: "Augusta".into(),
      last_name:  "Lovelace".into(),
      birthdate:  "1815-12-10".into(),
    });

    assert!(changed);
    assert_eq!(person.first_name, "Augusta");
    assert_eq!(person.last_name, "Lovelace");
    assert!(person.is_soft_deleted);
    assert_eq!(person.id, PersonId::from_bytes([1; 12]));
  }

  #[test]
  fn apply_with_identical_values_reports_no_change() {
    let mut person = ada();
    let changed = person.apply(PersonFields {
      first_name: "Ada".into(),
      last_name:  "Lovelace".into(),
      birthdate:  "1815-12-10".into(),
    });
    assert!(!changed);
  }
}
