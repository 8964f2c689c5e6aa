//! Outcomes of lookups that can legitimately come back empty.

use serde::{Deserialize, Serialize};

use crate::document::Document;

/// Result of resolving an identifier that may not exist.
///
/// A miss is a normal outcome, not a failure: callers must check for
/// `NotFound` before using the value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Lookup<T> {
    /// The record was resolved.
    Found(T),
    /// No record matched.
    NotFound { reason: String },
}

impl<T> Lookup<T> {
    /// Creates a miss with the given explanation.
    pub fn not_found(reason: impl Into<String>) -> Self {
        Self::NotFound {
            reason: reason.into(),
        }
    }

    /// Returns the found value, if any.
    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(v) => Some(v),
            Self::NotFound { .. } => None,
        }
    }

    /// Returns `true` for a miss.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Maps the found value.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
        match self {
            Self::Found(v) => Lookup::Found(f(v)),
            Self::NotFound { reason } => Lookup::NotFound { reason },
        }
    }
}

/// A document together with its full text.
///
/// When the document has no text locator, `text` is `None` and `note`
/// says why; that is a successful (partial) result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullText {
    pub document: Document,
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_map_and_found() {
        let hit: Lookup<u32> = Lookup::Found(21);
        assert_eq!(hit.map(|n| n * 2).found(), Some(42));

        let miss: Lookup<u32> = Lookup::not_found("no such record");
        assert!(miss.is_not_found());
        assert!(miss.map(|n| n + 1).found().is_none());
    }

    #[test]
    fn partial_full_text_serializes_null_text() {
        let ft = FullText {
            document: Document::default(),
            text: None,
            note: Some("no raw text URL available".into()),
        };
        let v = serde_json::to_value(&ft).expect("ser");
        assert!(v["text"].is_null());
        assert_eq!(v["note"], "no raw text URL available");
    }
}
