//! Federal Register document records.
//!
//! Every field is optional because the caller controls the field
//! selection (`fields[]=`) and the API omits anything not requested.
//! Fields without a typed slot are kept in `extra` so nothing the API
//! returns is dropped on the way to the tool layer.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::agency::AgencyRef;

/// A published Federal Register document (rule, notice, presidential document...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Canonical identifier, e.g. `2025-01234`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Document type as displayed by the API (`Rule`, `Notice`, `Presidential Document`...).
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
    #[serde(default, rename = "abstract", skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signing_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_on: Option<String>,
    /// Sequential executive order number; only set on executive orders.
    #[serde(
        default,
        deserialize_with = "de_opt_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub executive_order_number: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub president: Option<President>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agencies: Option<Vec<AgencyRef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_url: Option<String>,
    /// Plain-text body locator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_text_url: Option<String>,
    /// HTML body locator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_html_url: Option<String>,
    /// Any other field the API returned.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Document {
    /// Returns the best available full-text locator: raw text first, HTML body second.
    pub fn text_locator(&self) -> Option<&str> {
        let present = |url: &&str| !url.trim().is_empty();
        self.raw_text_url
            .as_deref()
            .filter(present)
            .or_else(|| self.body_html_url.as_deref().filter(present))
    }
}

/// President attached to presidential documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct President {
    /// Display name, e.g. `Joseph R. Biden Jr.`.
    pub name: String,
    /// Slug used in `conditions[president]`, e.g. `joe-biden`.
    pub identifier: String,
}

/// Accepts `14067`, `"14067"`, or `null`.
fn de_opt_number<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}
