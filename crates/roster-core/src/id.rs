//! [`PersonId`] — the store-assigned identifier of a person.
//!
//! The identifier is a 12-byte object id, the native key format of the
//! document store. On the wire it is always 24 lowercase hex characters.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::Error;

/// Length of a [`PersonId`] in bytes.
pub const ID_LEN: usize = 12;

/// An opaque, immutable person identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PersonId([u8; ID_LEN]);

impl PersonId {
  pub const fn from_bytes(bytes: [u8; ID_LEN]) -> Self { Self(bytes) }

  pub const fn bytes(&self) -> [u8; ID_LEN] { self.0 }

  /// Lowercase hex rendering, e.g. `"65a1f0c2e4b0a1b2c3d4e5f6"`.
  pub fn to_hex(&self) -> String { hex::encode(self.0) }
}

impl FromStr for PersonId {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    if s.len() != ID_LEN * 2 {
      return Err(Error::InvalidId(s.to_owned()));
    }
    let mut bytes = [0u8; ID_LEN];
    hex::decode_to_slice(s, &mut bytes)
      .map_err(|_| Error::InvalidId(s.to_owned()))?;
    Ok(Self(bytes))
  }
}

impl fmt::Display for PersonId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.to_hex())
  }
}

impl Serialize for PersonId {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&self.to_hex())
  }
}

impl<'de> Deserialize<'de> for PersonId {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let s = String::deserialize(deserializer)?;
    s.parse().map_err(de::Error::custom)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_24_hex_characters() {
    let id: PersonId = "65a1f0c2e4b0a1b2c3d4e5f6".parse().unwrap();
    assert_eq!(id.bytes()[0], 0x65);
    assert_eq!(id.to_string(), "65a1f0c2e4b0a1b2c3d4e5f6");
  }

  #[test]
  fn uppercase_hex_is_accepted_and_rendered_lowercase() {
    let id: PersonId = "65A1F0C2E4B0A1B2C3D4E5F6".parse().unwrap();
    assert_eq!(id.to_hex(), "65a1f0c2e4b0a1b2c3d4e5f6");
  }

  #[test]
  fn rejects_wrong_length_and_non_hex() {
    for bad in ["", "abc", "65a1f0c2e4b0a1b2c3d4e5f", "65a1f0c2e4b0a1b2c3d4e5f6a", "zza1f0c2e4b0a1b2c3d4e5f6"] {
      assert_eq!(
        bad.parse::<PersonId>(),
        Err(Error::InvalidId(bad.to_owned())),
        "{bad:?} should be rejected"
      );
    }
  }

  #[test]
  fn serializes_as_hex_string() {
    let id = PersonId::from_bytes([0xab; ID_LEN]);
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, "\"abababababababababababab\"");
    let back: PersonId = serde_json::from_str(&json).unwrap();
    assert_eq!(back, id);
  }
}
