//! Successful handler outcomes and their JSON encodings.
//!
//! Validation failures and "not found" are deliberately *not* errors: they
//! are answered with status 200 and a JSON string (or list of strings) body,
//! which existing clients depend on. Only a completed create changes the
//! status code (201).

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use roster_core::Person;

pub const INVALID_ID: &str = "ID given is not valid.";
pub const EMPTY_BODY: &str = "Request body is empty.";
/// Returned by `GET /person/{id}`.
pub const NOT_FOUND_BY_THIS_ID: &str = "No person found by this ID.";
/// Returned by the update and delete routes.
pub const NOT_FOUND_BY_GIVEN_ID: &str = "No person found by given id.";

#[derive(Debug)]
pub enum Reply {
  /// A single informational string.
  Notice(&'static str),
  /// One message per failed validation rule.
  Violations(Vec<String>),
  Person(Person),
  Persons(StatusCode, Vec<Person>),
}

impl IntoResponse for Reply {
  fn into_response(self) -> Response {
    match self {
      Reply::Notice(text) => Json(text).into_response(),
      Reply::Violations(messages) => Json(messages).into_response(),
      Reply::Person(person) => Json(person).into_response(),
      Reply::Persons(status, persons) => (status, Json(persons)).into_response(),
    }
  }
}
