//! reqwest adapter for [`FederalRegisterApi`].

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use fedreg_types::{
    Agency, Document, FacetCount, Lookup, PublicInspectionDocument, SearchResponse,
};

use crate::api::FederalRegisterApi;
use crate::error::ApiError;
use crate::query::{with_query, SearchQuery};

/// Public base endpoint of the Federal Register API.
pub const DEFAULT_BASE_URL: &str = "https://www.federalregister.gov/api/v1";

/// Connection settings for [`FederalRegisterClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root, without trailing slash.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: concat!("fedreg/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// HTTPS client for the Federal Register API.
///
/// Holds no state besides the connection pool, so one instance can be
/// shared by every concurrent tool call.
#[derive(Debug, Clone)]
pub struct FederalRegisterClient {
    http: reqwest::Client,
    base_url: String,
}

impl FederalRegisterClient {
    /// Creates a client.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Request` if the TLS backend cannot be initialised.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| ApiError::Request {
                url: base_url.clone(),
                message: e.to_string(),
            })?;
        Ok(Self { http, base_url })
    }

    /// Returns the API root this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of a document search.
    pub fn search_url(&self, query: &SearchQuery) -> String {
        with_query(
            &format!("{}/documents.json", self.base_url),
            &query.to_query_string(),
        )
    }

    /// URL of a single document.
    pub fn document_url(&self, document_number: &str, fields: &[String]) -> String {
        with_query(
            &format!(
                "{}/documents/{}.json",
                self.base_url,
                urlencoding::encode(document_number.trim())
            ),
            &fields_query(fields),
        )
    }

    /// URL of a batch document fetch.
    pub fn documents_url(&self, document_numbers: &[String], fields: &[String]) -> String {
        let joined = document_numbers
            .iter()
            .map(|n| urlencoding::encode(n.trim()).into_owned())
            .collect::<Vec<_>>()
            .join(",");
        with_query(
            &format!("{}/documents/{joined}.json", self.base_url),
            &fields_query(fields),
        )
    }

    /// URL of a facet count request.
    pub fn facets_url(&self, facet: &str, query: &SearchQuery) -> String {
        with_query(
            &format!(
                "{}/documents/facets/{}",
                self.base_url,
                urlencoding::encode(facet)
            ),
            &query.to_query_string(),
        )
    }

    /// URL of one agency.
    pub fn agency_url(&self, slug: &str) -> String {
        format!(
            "{}/agencies/{}",
            self.base_url,
            urlencoding::encode(slug.trim())
        )
    }

    /// URL of a public inspection search.
    pub fn public_inspection_search_url(&self, query: &SearchQuery) -> String {
        with_query(
            &format!("{}/public-inspection-documents.json", self.base_url),
            &query.to_query_string(),
        )
    }

    /// URL of one public inspection document.
    pub fn public_inspection_document_url(&self, document_number: &str) -> String {
        format!(
            "{}/public-inspection-documents/{}.json",
            self.base_url,
            urlencoding::encode(document_number.trim())
        )
    }

    /// Issues a GET and fails on any non-success status.
    async fn send(&self, url: &str, accept: &str) -> Result<reqwest::Response, ApiError> {
        debug!(%url, "GET");
        let response = self
            .http
            .get(url)
            .header(ACCEPT, accept)
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(url, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "upstream returned non-success status");
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response)
    }

    /// Fetches and decodes a JSON body.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let body = self
            .send(url, "application/json")
            .await?
            .text()
            .await
            .map_err(|e| ApiError::from_reqwest(url, e))?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }

    /// Like `get_json`, but a 404 becomes `Lookup::NotFound`.
    async fn get_json_lookup<T: DeserializeOwned>(
        &self,
        url: &str,
        what: &str,
    ) -> Result<Lookup<T>, ApiError> {
        match self.get_json(url).await {
            Ok(value) => Ok(Lookup::Found(value)),
            Err(ApiError::Status { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => {
                Ok(Lookup::not_found(format!("{what} not found")))
            }
            Err(e) => Err(e),
        }
    }
}

fn fields_query(fields: &[String]) -> String {
    SearchQuery::new()
        .with_fields(fields.iter().cloned())
        .to_query_string()
}

#[async_trait]
impl FederalRegisterApi for FederalRegisterClient {
    async fn search_documents(
        &self,
        query: &SearchQuery,
    ) -> Result<SearchResponse<Document>, ApiError> {
        self.get_json(&self.search_url(query)).await
    }

    async fn get_document(
        &self,
        document_number: &str,
        fields: &[String],
    ) -> Result<Lookup<Document>, ApiError> {
        let url = self.document_url(document_number, fields);
        self.get_json_lookup(&url, &format!("document {document_number}"))
            .await
    }

    async fn get_documents(
        &self,
        document_numbers: &[String],
        fields: &[String],
    ) -> Result<SearchResponse<Document>, ApiError> {
        // A single number in the batch path answers with the bare record,
        // not an envelope.
        match document_numbers {
            [] => Ok(SearchResponse::default()),
            [only] => Ok(match self.get_document(only, fields).await? {
                Lookup::Found(doc) => SearchResponse::collected(vec![doc], 1),
                Lookup::NotFound { .. } => {
                    SearchResponse::default().with_not_found([only.trim()])
                }
            }),
            many => self.get_json(&self.documents_url(many, fields)).await,
        }
    }

    async fn document_facets(
        &self,
        facet: &str,
        query: &SearchQuery,
    ) -> Result<BTreeMap<String, FacetCount>, ApiError> {
        self.get_json(&self.facets_url(facet, query)).await
    }

    async fn list_agencies(&self) -> Result<Vec<Agency>, ApiError> {
        self.get_json(&format!("{}/agencies", self.base_url)).await
    }

    async fn get_agency(&self, slug: &str) -> Result<Lookup<Agency>, ApiError> {
        self.get_json_lookup(&self.agency_url(slug), &format!("agency {slug}"))
            .await
    }

    async fn current_public_inspection(
        &self,
    ) -> Result<SearchResponse<PublicInspectionDocument>, ApiError> {
        self.get_json(&format!(
            "{}/public-inspection-documents/current.json",
            self.base_url
        ))
        .await
    }

    async fn search_public_inspection(
        &self,
        query: &SearchQuery,
    ) -> Result<SearchResponse<PublicInspectionDocument>, ApiError> {
        self.get_json(&self.public_inspection_search_url(query))
            .await
    }

    async fn get_public_inspection_document(
        &self,
        document_number: &str,
    ) -> Result<Lookup<PublicInspectionDocument>, ApiError> {
        self.get_json_lookup(
            &self.public_inspection_document_url(document_number),
            &format!("public inspection document {document_number}"),
        )
        .await
    }

    async fn fetch_text(&self, url: &str) -> Result<String, ApiError> {
        self.send(url, "text/plain, text/html;q=0.9, */*;q=0.1")
            .await?
            .text()
            .await
            .map_err(|e| ApiError::from_reqwest(url, e))
    }
}
