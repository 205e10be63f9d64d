//! Identity payload carried by a QR badge.
//!
//! Two encodings are understood:
//! - structured: `{"v":1,"id":"S1","name":"Alice"}`
//! - legacy text: `ID: S1, Name: Alice`
//!
//! New badges are always issued in the structured form.

use crate::errors::{AppError, AppResult};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

const PAYLOAD_VERSION: u8 = 1;

// The id stops at the first ", Name:"; everything after it is the name.
static LEGACY_PAYLOAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^\s*ID:\s*(?P<id>.*?)\s*,\s*Name:\s*(?P<name>.*?)\s*$")
        .expect("legacy payload pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    pub student_id: String,
    pub name: String,
}

#[derive(Serialize, Deserialize)]
struct WirePayload {
    v: u8,
    id: String,
    name: String,
}

impl Payload {
    pub fn new(student_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            student_id: student_id.into(),
            name: name.into(),
        }
    }

    /// Decode scanned text into a payload.
    pub fn decode(text: &str) -> AppResult<Self> {
        let trimmed = text.trim();

        let payload = if trimmed.starts_with('{') {
            let wire: WirePayload = serde_json::from_str(trimmed)
                .map_err(|e| AppError::MalformedPayload(format!("{trimmed}: {e}")))?;

            if wire.v != PAYLOAD_VERSION {
                return Err(AppError::MalformedPayload(format!(
                    "unsupported payload version {}",
                    wire.v
                )));
            }

            Payload::new(wire.id.trim(), wire.name.trim())
        } else {
            let caps = LEGACY_PAYLOAD
                .captures(trimmed)
                .ok_or_else(|| AppError::MalformedPayload(trimmed.to_string()))?;

            Payload::new(&caps["id"], &caps["name"])
        };

        if payload.student_id.is_empty() || payload.name.is_empty() {
            return Err(AppError::MalformedPayload(format!(
                "empty student id or name in '{trimmed}'"
            )));
        }

        Ok(payload)
    }

    /// Structured encoding used for newly issued badges.
    pub fn encode(&self) -> AppResult<String> {
        let wire = WirePayload {
            v: PAYLOAD_VERSION,
            id: self.student_id.clone(),
            name: self.name.clone(),
        };
        serde_json::to_string(&wire).map_err(|e| AppError::Other(e.to_string()))
    }

    pub fn encode_legacy(&self) -> String {
        format!("ID: {}, Name: {}", self.student_id, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_legacy_text() {
        let p = Payload::decode("ID: S1, Name: Alice").unwrap();
        assert_eq!(p, Payload::new("S1", "Alice"));
    }

    #[test]
    fn legacy_name_may_contain_comma() {
        let p = Payload::decode("ID: 2024-017, Name: Doe, John").unwrap();
        assert_eq!(p.student_id, "2024-017");
        assert_eq!(p.name, "Doe, John");
    }

    #[test]
    fn legacy_tolerates_surrounding_whitespace() {
        let p = Payload::decode("  ID:S9 ,  Name:  Bob \n").unwrap();
        assert_eq!(p, Payload::new("S9", "Bob"));
    }

    #[test]
    fn structured_survives_delimiters_in_fields() {
        let original = Payload::new("A, Name: B", "Name: C, ID: D");
        let text = original.encode().unwrap();
        assert_eq!(Payload::decode(&text).unwrap(), original);
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            Payload::decode("garbage"),
            Err(AppError::MalformedPayload(_))
        ));
    }

    #[test]
    fn rejects_empty_fields() {
        assert!(Payload::decode("ID: , Name: Alice").is_err());
        assert!(Payload::decode(r#"{"v":1,"id":"S1","name":"  "}"#).is_err());
    }

    #[test]
    fn rejects_unknown_version() {
        assert!(Payload::decode(r#"{"v":2,"id":"S1","name":"Alice"}"#).is_err());
    }

    #[test]
    fn legacy_encoding_matches_badge_text() {
        assert_eq!(
            Payload::new("S1", "Alice").encode_legacy(),
            "ID: S1, Name: Alice"
        );
    }
}
