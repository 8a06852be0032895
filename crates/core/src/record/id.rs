//! Record identifiers.
//!
//! Ids are assigned by the record store and treated as opaque. The only
//! constraint enforced here is that an id can be placed in a URL path
//! segment as-is: ASCII letters, digits, `_` and `-`.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordIdError {
    #[error("record id cannot be empty")]
    Empty,
    #[error("record id contains invalid character '{0}'")]
    InvalidChar(char),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordId(String);

impl RecordId {
    /// Parse an id, trimming surrounding whitespace.
    pub fn parse(raw: &str) -> Result<Self, RecordIdError> {
        let id = raw.trim();
        if id.is_empty() {
            return Err(RecordIdError::Empty);
        }
        if let Some(bad) = id
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
        {
            return Err(RecordIdError::InvalidChar(bad));
        }
        Ok(RecordId(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for RecordId {
    type Error = RecordIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        RecordId::parse(&value)
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_store_id() {
        let id = RecordId::parse("recAbc123XYZ").unwrap();
        assert_eq!(id.as_str(), "recAbc123XYZ");
        assert_eq!(id.to_string(), "recAbc123XYZ");
    }

    #[test]
    fn parse_trims_whitespace() {
        assert_eq!(RecordId::parse("  rec123 ").unwrap().as_str(), "rec123");
    }

    #[test]
    fn empty_id_is_rejected() {
        assert_eq!(RecordId::parse(""), Err(RecordIdError::Empty));
        assert_eq!(RecordId::parse("   "), Err(RecordIdError::Empty));
    }

    #[test]
    fn path_characters_are_rejected() {
        assert_eq!(RecordId::parse("rec/../x"), Err(RecordIdError::InvalidChar('/')));
        assert_eq!(RecordId::parse("rec?x=1"), Err(RecordIdError::InvalidChar('?')));
    }

    #[test]
    fn serde_round_trip_validates() {
        let id: RecordId = serde_json::from_str("\"rec123\"").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"rec123\"");
        assert!(serde_json::from_str::<RecordId>("\"a b\"").is_err());
    }
}
