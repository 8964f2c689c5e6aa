//! Public inspection documents (filed, not yet published).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::agency::AgencyRef;

/// A document on public inspection at the Office of the Federal Register.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PublicInspectionDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agencies: Option<Vec<AgencyRef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filed_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
