//! Lifecycle marker of a todo item.
//!
//! # Design
//! The three values map one-to-one onto a fixed string table. The same
//! strings are used in JSON bodies and in the `status` column, so there is a
//! single conversion in each direction. Both `as_str` and `FromStr` match
//! exhaustively: adding a variant fails to compile until the table is
//! extended.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Status of a todo item. New items start as `Doing`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[default]
    Doing,
    Done,
    /// Soft-deleted. Rows in this state are hidden from every read.
    Deleted,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Doing, Status::Done, Status::Deleted];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Doing => "Doing",
            Status::Done => "Done",
            Status::Deleted => "Deleted",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the canonical status names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid status string: {0}")]
pub struct ParseStatusError(pub String);

impl FromStr for Status {
    type Err = ParseStatusError;

    /// Case-sensitive, no trimming.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Doing" => Ok(Status::Doing),
            "Done" => Ok(Status::Done),
            "Deleted" => Ok(Status::Deleted),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_doing() {
        assert_eq!(Status::default(), Status::Doing);
    }

    #[test]
    fn string_form_roundtrips_for_every_variant() {
        for status in Status::ALL {
            assert_eq!(status.as_str().parse::<Status>().unwrap(), status);
            assert_eq!(status.to_string(), status.as_str());
        }
    }

    #[test]
    fn parse_is_case_sensitive() {
        let err = "doing".parse::<Status>().unwrap_err();
        assert_eq!(err, ParseStatusError("doing".to_string()));
        assert_eq!(err.to_string(), "invalid status string: doing");
    }

    #[test]
    fn parse_does_not_trim() {
        assert!(" Done".parse::<Status>().is_err());
    }

    #[test]
    fn serializes_as_canonical_string() {
        let json = serde_json::to_value(Status::Deleted).unwrap();
        assert_eq!(json, "Deleted");
    }

    #[test]
    fn json_roundtrips_for_every_variant() {
        for status in Status::ALL {
            let text = serde_json::to_string(&status).unwrap();
            let back: Status = serde_json::from_str(&text).unwrap();
            assert_eq!(back, status);
        }
    }

    #[test]
    fn unknown_json_status_is_rejected() {
        let result: Result<Status, _> = serde_json::from_str(r#""Archived""#);
        assert!(result.is_err());
    }
}
