//! Abstract API trait (port) for the Federal Register.

use std::collections::BTreeMap;

use async_trait::async_trait;

use fedreg_types::{
    Agency, Document, FacetCount, Lookup, PublicInspectionDocument, SearchResponse,
};

use crate::error::ApiError;
use crate::query::SearchQuery;

/// Operations the tool layer needs from the Federal Register.
///
/// The reqwest adapter lives in [`crate::client`]; tests substitute
/// in-memory implementations. Single-record fetches report a 404 as
/// [`Lookup::NotFound`]; every other non-success status is an error.
#[async_trait]
pub trait FederalRegisterApi: Send + Sync {
    /// `GET /documents.json?...`
    async fn search_documents(
        &self,
        query: &SearchQuery,
    ) -> Result<SearchResponse<Document>, ApiError>;

    /// `GET /documents/{number}.json`
    async fn get_document(
        &self,
        document_number: &str,
        fields: &[String],
    ) -> Result<Lookup<Document>, ApiError>;

    /// `GET /documents/{n1},{n2},....json`
    async fn get_documents(
        &self,
        document_numbers: &[String],
        fields: &[String],
    ) -> Result<SearchResponse<Document>, ApiError>;

    /// `GET /documents/facets/{facet}?...`
    async fn document_facets(
        &self,
        facet: &str,
        query: &SearchQuery,
    ) -> Result<BTreeMap<String, FacetCount>, ApiError>;

    /// `GET /agencies`
    async fn list_agencies(&self) -> Result<Vec<Agency>, ApiError>;

    /// `GET /agencies/{slug}`
    async fn get_agency(&self, slug: &str) -> Result<Lookup<Agency>, ApiError>;

    /// `GET /public-inspection-documents/current.json`
    async fn current_public_inspection(
        &self,
    ) -> Result<SearchResponse<PublicInspectionDocument>, ApiError>;

    /// `GET /public-inspection-documents.json?...`
    async fn search_public_inspection(
        &self,
        query: &SearchQuery,
    ) -> Result<SearchResponse<PublicInspectionDocument>, ApiError>;

    /// `GET /public-inspection-documents/{number}.json`
    async fn get_public_inspection_document(
        &self,
        document_number: &str,
    ) -> Result<Lookup<PublicInspectionDocument>, ApiError>;

    /// Fetches a plain-text or HTML body from a URL found in a record.
    async fn fetch_text(&self, url: &str) -> Result<String, ApiError>;
}
