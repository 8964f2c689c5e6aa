//! Default field selections per operation.
//!
//! Each list is a named constant so callers can see exactly what an
//! operation requests; `FieldDefaults` lets configuration override them.

use serde::{Deserialize, Serialize};

/// Fields requested by document searches when the caller selects none.
pub const DOCUMENT_SEARCH_FIELDS: &[&str] = &[
    "document_number",
    "title",
    "type",
    "abstract",
    "publication_date",
    "agencies",
    "html_url",
    "pdf_url",
];

/// Fields requested by single-document fetches.
pub const DOCUMENT_DETAIL_FIELDS: &[&str] = &[
    "document_number",
    "title",
    "type",
    "abstract",
    "publication_date",
    "effective_on",
    "signing_date",
    "agencies",
    "citation",
    "docket_ids",
    "regulation_id_numbers",
    "html_url",
    "pdf_url",
    "raw_text_url",
    "body_html_url",
];

/// Fields requested by executive order searches and lookups.
pub const EXECUTIVE_ORDER_FIELDS: &[&str] = &[
    "document_number",
    "executive_order_number",
    "title",
    "signing_date",
    "publication_date",
    "president",
    "citation",
    "html_url",
    "pdf_url",
    "raw_text_url",
    "body_html_url",
];

/// Fields requested by public inspection searches.
pub const PUBLIC_INSPECTION_FIELDS: &[&str] = &[
    "document_number",
    "title",
    "type",
    "agencies",
    "filed_at",
    "publication_date",
    "pdf_url",
    "html_url",
];

fn owned(fields: &[&str]) -> Vec<String> {
    fields.iter().map(|f| (*f).to_string()).collect()
}

/// Overridable default field selections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefaults {
    #[serde(default = "default_document_search")]
    pub document_search: Vec<String>,
    #[serde(default = "default_document_detail")]
    pub document_detail: Vec<String>,
    #[serde(default = "default_executive_order")]
    pub executive_order: Vec<String>,
    #[serde(default = "default_public_inspection")]
    pub public_inspection: Vec<String>,
}

impl Default for FieldDefaults {
    fn default() -> Self {
        Self {
            document_search: default_document_search(),
            document_detail: default_document_detail(),
            executive_order: default_executive_order(),
            public_inspection: default_public_inspection(),
        }
    }
}

fn default_document_search() -> Vec<String> {
    owned(DOCUMENT_SEARCH_FIELDS)
}
fn default_document_detail() -> Vec<String> {
    owned(DOCUMENT_DETAIL_FIELDS)
}
fn default_executive_order() -> Vec<String> {
    owned(EXECUTIVE_ORDER_FIELDS)
}
fn default_public_inspection() -> Vec<String> {
    owned(PUBLIC_INSPECTION_FIELDS)
}

/// Picks the caller's selection when non-empty, the default otherwise.
pub fn select_fields(requested: Option<&[String]>, default: &[String]) -> Vec<String> {
    match requested {
        Some(fields) if !fields.is_empty() => fields.to_vec(),
        _ => default.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn executive_order_defaults_include_number_and_text() {
        let d = FieldDefaults::default();
        assert!(d.executive_order.iter().any(|f| f == "executive_order_number"));
        assert!(d.executive_order.iter().any(|f| f == "raw_text_url"));
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let d: FieldDefaults =
            serde_json::from_str(r#"{"document_search":["title"]}"#).expect("de");
        assert_eq!(d.document_search, vec!["title".to_string()]);
        assert_eq!(d.document_detail, default_document_detail());
    }

    #[test]
    fn select_prefers_request() {
        let requested = vec!["title".to_string()];
        let chosen = select_fields(Some(requested.as_slice()), &default_document_search());
        assert_eq!(chosen, requested);
    }

    #[test]
    fn select_falls_back_on_empty_request() {
        let chosen = select_fields(Some(&[][..]), &default_document_search());
        assert_eq!(chosen.len(), DOCUMENT_SEARCH_FIELDS.len());
        assert_eq!(select_fields(None, &[]), Vec::<String>::new());
    }
}
