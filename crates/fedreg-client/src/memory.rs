//! Fixture-backed [`FederalRegisterApi`] for offline use and tests.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use fedreg_types::{
    Agency, Document, FacetCount, Lookup, PublicInspectionDocument, SearchResponse,
};

use crate::api::FederalRegisterApi;
use crate::error::ApiError;
use crate::query::{ConditionValue, SearchQuery};

const DEFAULT_PAGE_SIZE: u32 = 20;

/// Serves documents, agencies and texts from memory.
///
/// Searches honour `conditions[term]` (case-insensitive substring of the
/// title, abstract, document number or executive order number),
/// `conditions[presidential_document_type]=executive_order` and paging.
/// Every other condition is accepted and ignored. Each search query is
/// recorded and can be inspected with [`InMemoryApi::recorded_queries`].
#[derive(Debug, Default)]
pub struct InMemoryApi {
    documents: Vec<Document>,
    agencies: Vec<Agency>,
    public_inspection: Vec<PublicInspectionDocument>,
    texts: BTreeMap<String, String>,
    facets: BTreeMap<String, BTreeMap<String, FacetCount>>,
    failure: Option<u16>,
    queries: Mutex<Vec<SearchQuery>>,
}

impl InMemoryApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, document: Document) -> Self {
        self.documents.push(document);
        self
    }

    pub fn with_agency(mut self, agency: Agency) -> Self {
        self.agencies.push(agency);
        self
    }

    pub fn with_public_inspection(mut self, document: PublicInspectionDocument) -> Self {
        self.public_inspection.push(document);
        self
    }

    /// Registers the body served for a text URL.
    pub fn with_text(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.texts.insert(url.into(), body.into());
        self
    }

    /// Registers the buckets served for a facet.
    pub fn with_facet(mut self, facet: &str, buckets: BTreeMap<String, FacetCount>) -> Self {
        self.facets.insert(facet.to_string(), buckets);
        self
    }

    /// Makes every call fail with the given upstream status.
    pub fn failing_with(mut self, status: u16) -> Self {
        self.failure = Some(status);
        self
    }

    /// Search queries received so far, oldest first.
    pub fn recorded_queries(&self) -> Vec<SearchQuery> {
        self.queries
            .lock()
            .map(|q| q.clone())
            .unwrap_or_default()
    }

    fn check(&self, url: &str) -> Result<(), ApiError> {
        match self.failure {
            Some(status) => Err(ApiError::Status {
                status,
                url: format!("memory://{url}"),
            }),
            None => Ok(()),
        }
    }

    fn record(&self, query: &SearchQuery) {
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(query.clone());
        }
    }

    fn find_document(&self, number: &str) -> Option<&Document> {
        self.documents
            .iter()
            .find(|d| d.document_number.as_deref() == Some(number.trim()))
    }
}

fn scalar<'a>(query: &'a SearchQuery, key: &str) -> Option<&'a str> {
    match query.conditions.get(key) {
        Some(ConditionValue::Scalar(v)) => Some(v.as_str()),
        _ => None,
    }
}

fn matches_term(doc: &Document, term: &str) -> bool {
    let needle = term.to_lowercase();
    let eo = doc.executive_order_number.map(|n| n.to_string());
    let hit = [
        doc.title.as_deref(),
        doc.summary.as_deref(),
        doc.document_number.as_deref(),
        eo.as_deref(),
    ]
    .into_iter()
    .flatten()
    .any(|text| text.to_lowercase().contains(&needle));
    hit
}

fn page_of<T: Clone>(items: &[T], query: &SearchQuery) -> SearchResponse<T> {
    let per_page = query.per_page.filter(|n| *n > 0).unwrap_or(DEFAULT_PAGE_SIZE) as usize;
    let page = query.page.filter(|n| *n > 0).unwrap_or(1) as usize;
    let total_pages = items.len().div_ceil(per_page);
    let results = items
        .iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .cloned()
        .collect();
    SearchResponse {
        count: items.len() as u64,
        total_pages: u32::try_from(total_pages).unwrap_or(u32::MAX),
        results,
        ..SearchResponse::default()
    }
}

#[async_trait]
impl FederalRegisterApi for InMemoryApi {
    async fn search_documents(
        &self,
        query: &SearchQuery,
    ) -> Result<SearchResponse<Document>, ApiError> {
        self.record(query);
        self.check("documents.json")?;

        let term = scalar(query, "term");
        let only_eos = scalar(query, "presidential_document_type") == Some("executive_order");
        let hits: Vec<Document> = self
            .documents
            .iter()
            .filter(|d| term.map_or(true, |t| matches_term(d, t)))
            .filter(|d| !only_eos || d.executive_order_number.is_some())
            .cloned()
            .collect();
        Ok(page_of(&hits, query))
    }

    async fn get_document(
        &self,
        document_number: &str,
        _fields: &[String],
    ) -> Result<Lookup<Document>, ApiError> {
        self.check("documents")?;
        Ok(self.find_document(document_number).cloned().map_or_else(
            || Lookup::not_found(format!("document {document_number} not found")),
            Lookup::Found,
        ))
    }

    async fn get_documents(
        &self,
        document_numbers: &[String],
        _fields: &[String],
    ) -> Result<SearchResponse<Document>, ApiError> {
        self.check("documents")?;
        let mut found = Vec::new();
        let mut missing = Vec::new();
        for number in document_numbers {
            match self.find_document(number) {
                Some(doc) => found.push(doc.clone()),
                None => missing.push(number.trim().to_string()),
            }
        }
        let count = found.len() as u64;
        Ok(SearchResponse::collected(found, count).with_not_found(missing))
    }

    async fn document_facets(
        &self,
        facet: &str,
        query: &SearchQuery,
    ) -> Result<BTreeMap<String, FacetCount>, ApiError> {
        self.record(query);
        self.check("documents/facets")?;
        Ok(self.facets.get(facet).cloned().unwrap_or_default())
    }

    async fn list_agencies(&self) -> Result<Vec<Agency>, ApiError> {
        self.check("agencies")?;
        Ok(self.agencies.clone())
    }

    async fn get_agency(&self, slug: &str) -> Result<Lookup<Agency>, ApiError> {
        self.check("agencies")?;
        let key = slug.trim();
        Ok(self
            .agencies
            .iter()
            .find(|a| a.slug == key || a.id.to_string() == key)
            .cloned()
            .map_or_else(
                || Lookup::not_found(format!("agency {slug} not found")),
                Lookup::Found,
            ))
    }

    async fn current_public_inspection(
        &self,
    ) -> Result<SearchResponse<PublicInspectionDocument>, ApiError> {
        self.check("public-inspection-documents/current.json")?;
        let count = self.public_inspection.len() as u64;
        Ok(SearchResponse::collected(self.public_inspection.clone(), count))
    }

    async fn search_public_inspection(
        &self,
        query: &SearchQuery,
    ) -> Result<SearchResponse<PublicInspectionDocument>, ApiError> {
        self.record(query);
        self.check("public-inspection-documents.json")?;
        Ok(page_of(&self.public_inspection, query))
    }

    async fn get_public_inspection_document(
        &self,
        document_number: &str,
    ) -> Result<Lookup<PublicInspectionDocument>, ApiError> {
        self.check("public-inspection-documents")?;
        Ok(self
            .public_inspection
            .iter()
            .find(|d| d.document_number.as_deref() == Some(document_number.trim()))
            .cloned()
            .map_or_else(
                || {
                    Lookup::not_found(format!(
                        "public inspection document {document_number} not found"
                    ))
                },
                Lookup::Found,
            ))
    }

    async fn fetch_text(&self, url: &str) -> Result<String, ApiError> {
        self.check(url)?;
        self.texts.get(url).cloned().ok_or_else(|| ApiError::Status {
            status: 404,
            url: url.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(number: &str, title: &str) -> Document {
        Document {
            document_number: Some(number.into()),
            title: Some(title.into()),
            ..Document::default()
        }
    }

    #[tokio::test]
    async fn term_filters_and_pages() {
        let api = (0..5).fold(InMemoryApi::new(), |api, i| {
            api.with_document(doc(&format!("2025-0000{i}"), "Water quality"))
        })
        .with_document(doc("2025-00099", "Air permits"));

        let q = SearchQuery::new().with_term("WATER").with_per_page(2).with_page(3);
        let page = api.search_documents(&q).await.unwrap();
        assert_eq!(page.count, 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.results.len(), 1);
        assert_eq!(api.recorded_queries(), vec![q]);
    }

    #[tokio::test]
    async fn term_matches_executive_order_number() {
        let api = InMemoryApi::new().with_document(Document {
            executive_order_number: Some(14100),
            ..doc("2023-11111", "Advancing equity")
        });
        let page = api
            .search_documents(&SearchQuery::new().with_term("14100"))
            .await
            .unwrap();
        assert_eq!(page.results.len(), 1);
    }

    #[tokio::test]
    async fn batch_reports_unknown_numbers() {
        let api = InMemoryApi::new().with_document(doc("2025-00001", "Water quality"));
        let numbers = vec!["2025-00001".to_string(), "2025-99999".to_string()];
        let batch = api.get_documents(&numbers, &[]).await.unwrap();
        assert_eq!(batch.results.len(), 1);
        assert_eq!(batch.errors.not_found, vec!["2025-99999".to_string()]);
    }

    #[tokio::test]
    async fn failure_applies_to_every_call() {
        let api = InMemoryApi::new().failing_with(502);
        let err = api.list_agencies().await.unwrap_err();
        assert_eq!(err.status(), Some(502));
    }

    #[tokio::test]
    async fn agency_by_slug_or_id() {
        let api = InMemoryApi::new().with_agency(Agency {
            id: 145,
            name: "Environmental Protection Agency".into(),
            slug: "environmental-protection-agency".into(),
            ..Agency::default()
        });
        assert!(!api.get_agency("145").await.unwrap().is_not_found());
        assert!(!api
            .get_agency("environmental-protection-agency")
            .await
            .unwrap()
            .is_not_found());
        assert!(api.get_agency("nasa").await.unwrap().is_not_found());
    }
}
