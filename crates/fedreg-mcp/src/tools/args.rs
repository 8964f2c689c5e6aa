//! Argument shapes of the tools, deserialized from `tools/call` arguments.
//!
//! Filters are flattened so tool arguments stay a flat object.

use serde::Deserialize;

use fedreg_client::{DocumentFilter, ExecutiveOrderFilter, PublicInspectionFilter};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct SearchDocumentsArgs {
    #[serde(flatten)]
    pub filter: DocumentFilter,
    pub fields: Option<Vec<String>>,
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    pub order: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct SearchAllDocumentsArgs {
    #[serde(flatten)]
    pub filter: DocumentFilter,
    pub fields: Option<Vec<String>>,
    pub max_results: Option<usize>,
    pub order: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DocumentArgs {
    pub document_number: String,
    #[serde(default)]
    pub fields: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DocumentsArgs {
    pub document_numbers: Vec<String>,
    #[serde(default)]
    pub fields: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RecentDocumentsArgs {
    pub days: Option<u32>,
    pub document_types: Vec<String>,
    pub agencies: Vec<String>,
    pub fields: Option<Vec<String>>,
    pub per_page: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FacetArgs {
    pub facet: String,
    #[serde(flatten)]
    pub filter: DocumentFilter,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct SearchExecutiveOrdersArgs {
    #[serde(flatten)]
    pub filter: ExecutiveOrderFilter,
    pub fields: Option<Vec<String>>,
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    pub order: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExecutiveOrderArgs {
    pub executive_order_number: u64,
    #[serde(default)]
    pub fields: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RecentExecutiveOrdersArgs {
    pub days: Option<u32>,
    pub fields: Option<Vec<String>>,
    pub per_page: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AgencyArgs {
    /// Slug or numeric id.
    pub agency: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct SearchPublicInspectionArgs {
    #[serde(flatten)]
    pub filter: PublicInspectionFilter,
    pub fields: Option<Vec<String>>,
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PublicInspectionDocumentArgs {
    pub document_number: String,
}
