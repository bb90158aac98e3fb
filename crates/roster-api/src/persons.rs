//! Handlers for the person endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/persons` | Optional `?includeDeleted=<bool>` |
//! | `GET`    | `/person/{id}` | Single person or a not-found notice |
//! | `POST`   | `/person` | Body: [`NewPerson`]; 201 + visible persons |
//! | `PUT`    | `/person/{id}` | Body: [`PersonFields`]; visible persons |
//! | `DELETE` | `/soft-delete-person/{id}` | Flags the person; visible persons |
//! | `DELETE` | `/hard-delete-person/{id}` | Removes the person; visible persons |
//!
//! Every mutation answers with the full list of non-deleted persons.

use axum::{
  Json,
  body::Bytes,
  extract::{Path, RawQuery, State, rejection::PathRejection},
  http::StatusCode,
};
use roster_core::{
  NewPerson, Person, PersonFields, PersonId,
  store::{PersonFilter, PersonStore},
  validate::{translate, validate},
};
use serde::de::DeserializeOwned;

use crate::{
  AppState,
  error::ApiError,
  reply::{
    EMPTY_BODY, INVALID_ID, NOT_FOUND_BY_GIVEN_ID, NOT_FOUND_BY_THIS_ID, Reply,
  },
};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /persons[?includeDeleted=<bool>]`
///
/// Only the first `includeDeleted` value counts; absent or empty means
/// `false`.
pub async fn list<S>(
  State(state): State<AppState<S>>,
  RawQuery(query): RawQuery,
) -> Result<Json<Vec<Person>>, ApiError>
where
  S: PersonStore,
{
  let raw = first_query_value(query.as_deref(), "includeDeleted")?;
  let include_deleted = match raw.as_deref() {
    None | Some("") => false,
    Some(raw) => parse_bool(raw).ok_or_else(|| {
      ApiError::BadRequest(format!("includeDeleted: invalid boolean {raw:?}"))
    })?,
  };
  let filter = PersonFilter::from_include_deleted(include_deleted);

  tracing::debug!(?filter, "listing persons");
  let persons = state.bounded(state.store.list(filter)).await?;
  Ok(Json(persons))
}

fn first_query_value(query: Option<&str>, key: &str) -> Result<Option<String>, ApiError> {
  let Some(query) = query else { return Ok(None) };
  let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query)
    .map_err(|e| ApiError::BadRequest(format!("invalid query string: {e}")))?;
  Ok(pairs.into_iter().find(|(k, _)| k == key).map(|(_, v)| v))
}

/// Strict boolean parsing: `1 t T TRUE true True` / `0 f F FALSE false False`.
pub fn parse_bool(raw: &str) -> Option<bool> {
  match raw {
    "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
    "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
    _ => None,
  }
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /person/{id}`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  id: Result<Path<String>, PathRejection>,
) -> Result<Reply, ApiError>
where
  S: PersonStore,
{
  let Some(id) = parse_id(id) else {
    return Ok(Reply::Notice(INVALID_ID));
  };

  tracing::debug!(%id, "fetching person");
  Ok(match state.bounded(state.store.get(id)).await? {
    Some(person) => Reply::Person(person),
    None => Reply::Notice(NOT_FOUND_BY_THIS_ID),
  })
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /person` — returns 201 + all visible persons.
///
/// Missing required fields are answered with one message per field and
/// nothing is stored.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  body: Bytes,
) -> Result<Reply, ApiError>
where
  S: PersonStore,
{
  if body.is_empty() {
    tracing::warn!("create request with empty body");
    return Ok(Reply::Notice(EMPTY_BODY));
  }

  let person = decode::<NewPerson>(&body)?.reset_flags();
  if let Err(violations) = validate(&person) {
    tracing::debug!(count = violations.len(), "create request failed validation");
    return Ok(Reply::Violations(translate(&violations)));
  }

  let stored = state.bounded(state.store.insert(person)).await?;
  tracing::info!(id = %stored.id, "created person");

  let persons = visible_persons(&state).await?;
  Ok(Reply::Persons(StatusCode::CREATED, persons))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /person/{id}` — overwrites `firstName`, `lastName` and `birthdate`.
///
/// The body is not validated: an empty body clears all three fields.
pub async fn update<S>(
  State(state): State<AppState<S>>,
  id: Result<Path<String>, PathRejection>,
  body: Bytes,
) -> Result<Reply, ApiError>
where
  S: PersonStore,
{
  let Some(id) = parse_id(id) else {
    return Ok(Reply::Notice(INVALID_ID));
  };

  let fields = if body.is_empty() {
    PersonFields::default()
  } else {
    decode::<PersonFields>(&body)?
  };

  let modified = state.bounded(state.store.update_fields(id, fields)).await?;
  if !modified {
    return Ok(Reply::Notice(NOT_FOUND_BY_GIVEN_ID));
  }
  tracing::info!(%id, "updated person");

  let persons = visible_persons(&state).await?;
  Ok(Reply::Persons(StatusCode::OK, persons))
}

// ─── Soft delete ──────────────────────────────────────────────────────────────

/// `DELETE /soft-delete-person/{id}`
pub async fn soft_delete<S>(
  State(state): State<AppState<S>>,
  id: Result<Path<String>, PathRejection>,
) -> Result<Reply, ApiError>
where
  S: PersonStore,
{
  let Some(id) = parse_id(id) else {
    return Ok(Reply::Notice(INVALID_ID));
  };

  if state.bounded(state.store.soft_delete(id)).await?.is_none() {
    return Ok(Reply::Notice(NOT_FOUND_BY_GIVEN_ID));
  }
  tracing::info!(%id, "soft-deleted person");

  let persons = visible_persons(&state).await?;
  Ok(Reply::Persons(StatusCode::OK, persons))
}

// ─── Hard delete ──────────────────────────────────────────────────────────────

/// `DELETE /hard-delete-person/{id}`
pub async fn hard_delete<S>(
  State(state): State<AppState<S>>,
  id: Result<Path<String>, PathRejection>,
) -> Result<Reply, ApiError>
where
  S: PersonStore,
{
  let Some(id) = parse_id(id) else {
    return Ok(Reply::Notice(INVALID_ID));
  };

  if !state.bounded(state.store.hard_delete(id)).await? {
    return Ok(Reply::Notice(NOT_FOUND_BY_GIVEN_ID));
  }
  tracing::info!(%id, "hard-deleted person");

  let persons = visible_persons(&state).await?;
  Ok(Reply::Persons(StatusCode::OK, persons))
}

// ─── Helpers ──────────────────────────────────────────────────────────────────

/// Any id that cannot be read from the path, including segments that do not
/// percent-decode to UTF-8, is answered like a malformed id.
fn parse_id(path: Result<Path<String>, PathRejection>) -> Option<PersonId> {
  let Path(raw) = path.ok()?;
  raw.parse().ok()
}

async fn visible_persons<S: PersonStore>(
  state: &AppState<S>,
) -> Result<Vec<Person>, ApiError> {
  state
    .bounded(state.store.list(PersonFilter::ExcludeDeleted))
    .await
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
  serde_json::from_slice(body)
    .map_err(|e| ApiError::BadRequest(format!("invalid JSON body: {e}")))
}
