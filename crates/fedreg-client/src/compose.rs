//! Convenience operations built from several API calls.

use chrono::{Days, NaiveDate};
use tracing::debug;

use fedreg_types::{Document, FullText, Lookup};

use crate::api::FederalRegisterApi;
use crate::error::ApiError;
use crate::filters::executive_order_conditions;
use crate::query::{ConditionValue, SearchQuery};

/// Fields the full-text composition needs regardless of the caller's
/// selection.
const TEXT_LOCATOR_FIELDS: &[&str] = &["raw_text_url", "body_html_url"];

fn with_required(fields: &[String], required: &[&str]) -> Vec<String> {
    let mut out = fields.to_vec();
    if out.is_empty() {
        return out;
    }
    for field in required {
        if !out.iter().any(|f| f == field) {
            out.push((*field).to_string());
        }
    }
    out
}

/// Finds an executive order by its sequential number.
///
/// Searches executive orders with the number as free text and keeps the
/// record whose `executive_order_number` matches exactly. Only the first
/// page of `page_size` results is examined, so an order ranked beyond it
/// is reported as not found.
pub async fn find_executive_order<A>(
    api: &A,
    number: u64,
    fields: &[String],
    page_size: u32,
) -> Result<Lookup<Document>, ApiError>
where
    A: FederalRegisterApi + ?Sized,
{
    let query = SearchQuery::new()
        .with_conditions(executive_order_conditions())
        .with_term(number.to_string())
        .with_fields(with_required(fields, &["executive_order_number"]))
        .with_per_page(page_size.max(1));

    let response = api.search_documents(&query).await?;
    debug!(
        number,
        candidates = response.results.len(),
        "executive order lookup"
    );

    Ok(response
        .results
        .into_iter()
        .find(|doc| doc.executive_order_number == Some(number))
        .map_or_else(
            || Lookup::not_found(format!("executive order {number} not found")),
            Lookup::Found,
        ))
}

/// Fetches the body behind a document's text locator.
///
/// A document without `raw_text_url` or `body_html_url` yields a
/// `FullText` with no text and a note; that is not an error.
pub async fn fetch_full_text<A>(api: &A, document: Document) -> Result<FullText, ApiError>
where
    A: FederalRegisterApi + ?Sized,
{
    let Some(url) = document.text_locator().map(str::to_string) else {
        let label = document
            .document_number
            .clone()
            .unwrap_or_else(|| "document".to_string());
        return Ok(FullText {
            document,
            text: None,
            note: Some(format!("{label} has no raw text or HTML body available")),
        });
    };

    let text = api.fetch_text(&url).await?;
    Ok(FullText {
        document,
        text: Some(text),
        note: None,
    })
}

/// Resolves a document by number, then fetches its full text.
pub async fn document_full_text<A>(
    api: &A,
    document_number: &str,
    fields: &[String],
) -> Result<Lookup<FullText>, ApiError>
where
    A: FederalRegisterApi + ?Sized,
{
    let fields = with_required(fields, TEXT_LOCATOR_FIELDS);
    match api.get_document(document_number, &fields).await? {
        Lookup::Found(doc) => Ok(Lookup::Found(fetch_full_text(api, doc).await?)),
        Lookup::NotFound { reason } => Ok(Lookup::NotFound { reason }),
    }
}

/// Resolves an executive order by number, then fetches its full text.
pub async fn executive_order_full_text<A>(
    api: &A,
    number: u64,
    fields: &[String],
    page_size: u32,
) -> Result<Lookup<FullText>, ApiError>
where
    A: FederalRegisterApi + ?Sized,
{
    let fields = with_required(fields, TEXT_LOCATOR_FIELDS);
    match find_executive_order(api, number, &fields, page_size).await? {
        Lookup::Found(doc) => Ok(Lookup::Found(fetch_full_text(api, doc).await?)),
        Lookup::NotFound { reason } => Ok(Lookup::NotFound { reason }),
    }
}

/// `today - days` as `YYYY-MM-DD`.
pub fn floor_date(today: NaiveDate, days: u32) -> String {
    today
        .checked_sub_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MIN)
        .format("%Y-%m-%d")
        .to_string()
}

/// Documents published in the last `days` days, newest first.
pub fn recent_documents_query(
    today: NaiveDate,
    days: u32,
    document_types: &[String],
    agencies: &[String],
) -> SearchQuery {
    let mut query = SearchQuery::new().with_condition(
        "publication_date",
        ConditionValue::nested([("gte", Some(floor_date(today, days)))]),
    );
    if !document_types.is_empty() {
        query = query.with_condition("type", ConditionValue::list(document_types.iter().cloned()));
    }
    if !agencies.is_empty() {
        query = query.with_condition("agencies", ConditionValue::list(agencies.iter().cloned()));
    }
    query.with_order("newest")
}

/// Executive orders signed in the last `days` days, newest first.
pub fn recent_executive_orders_query(today: NaiveDate, days: u32) -> SearchQuery {
    SearchQuery::new()
        .with_conditions(executive_order_conditions())
        .with_condition(
            "signing_date",
            ConditionValue::nested([("gte", Some(floor_date(today, days)))]),
        )
        .with_order("newest")
}
