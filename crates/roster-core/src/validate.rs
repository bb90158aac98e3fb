//! Required-field validation for [`NewPerson`].
//!
//! Violations are reported in field declaration order and rendered with the
//! field's type-level name (`FirstName`, not `firstName`).

use thiserror::Error;

use crate::person::NewPerson;

/// A single failed validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Violation {
  #[error("{0} is required")]
  Required(&'static str),
}

/// Check every required field of `person`, collecting all violations.
pub fn validate(person: &NewPerson) -> Result<(), Vec<Violation>> {
  let required = [
    ("FirstName", &person.first_name),
    ("LastName", &person.last_name),
    ("Birthdate", &person.birthdate),
  ];

  let violations: Vec<Violation> = required
    .into_iter()
    .filter(|(_, value)| value.is_empty())
    .map(|(field, _)| Violation::Required(field))
    .collect();

  if violations.is_empty() { Ok(()) } else { Err(violations) }
}

/// Render violations as the client-facing message list.
pub fn translate(violations: &[Violation]) -> Vec<String> {
  violations.iter().map(ToString::to_string).collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn complete_person_passes() {
    let person = NewPerson::new("Ada", "Lovelace", "1815-12-10");
    assert_eq!(validate(&person), Ok(()));
  }

  #[test]
  fn empty_person_reports_every_field_in_order() {
    let violations = validate(&NewPerson::default()).unwrap_err();
    assert_eq!(
      translate(&violations),
      vec![
        "FirstName is required",
        "LastName is required",
        "Birthdate is required",
      ]
    );
  }

  #[test]
  fn one_violation_per_missing_field() {
    let person = NewPerson::new("Ada", "", "1815-12-10");
    assert_eq!(
      validate(&person),
      Err(vec![Violation::Required("LastName")])
    );
  }
}
