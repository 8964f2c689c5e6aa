//! Document search, fetch, full text and facet tools.

use tracing::debug;

use fedreg_client::compose::{document_full_text, recent_documents_query};
use fedreg_client::filters::{DOCUMENT_FACETS, DOCUMENT_TYPES};
use fedreg_client::{paginate_with_limits, SearchQuery};
use fedreg_types::fields::select_fields;
use fedreg_types::{SearchResponse, ToolArgument};

use super::args::{
    DocumentArgs, DocumentsArgs, FacetArgs, RecentDocumentsArgs, SearchAllDocumentsArgs,
    SearchDocumentsArgs,
};
use super::{non_blank, ToolContext, ToolOutput, ToolSpec};
use crate::error::ToolError;

pub(crate) const SEARCH_DOCUMENTS: &str = "search_documents";
pub(crate) const SEARCH_ALL_DOCUMENTS: &str = "search_all_documents";
pub(crate) const GET_DOCUMENT: &str = "get_document";
pub(crate) const GET_DOCUMENTS: &str = "get_documents";
pub(crate) const GET_DOCUMENT_TEXT: &str = "get_document_text";
pub(crate) const GET_RECENT_DOCUMENTS: &str = "get_recent_documents";
pub(crate) const GET_DOCUMENT_FACETS: &str = "get_document_facets";

const ORDERS: &[&str] = &["relevance", "newest", "oldest", "executive_order_number"];
const DEFAULT_MAX_RESULTS: usize = 100;
const DEFAULT_RECENT_DAYS: u32 = 7;

fn filter_arguments() -> Vec<ToolArgument> {
    vec![
        ToolArgument::string("term", "Full-text search term"),
        ToolArgument::string_list("document_types", "Document types").one_of(DOCUMENT_TYPES),
        ToolArgument::string_list(
            "agencies",
            "Agency slugs, e.g. environmental-protection-agency",
        ),
        ToolArgument::string("publication_date_gte", "Published on or after (YYYY-MM-DD)"),
        ToolArgument::string("publication_date_lte", "Published on or before (YYYY-MM-DD)"),
        ToolArgument::string("effective_date_gte", "Effective on or after (YYYY-MM-DD)"),
        ToolArgument::string("effective_date_lte", "Effective on or before (YYYY-MM-DD)"),
        ToolArgument::string("president", "President slug, e.g. joe-biden"),
        ToolArgument::string("docket_id", "Agency docket number"),
        ToolArgument::string("regulation_id_number", "Regulation Identifier Number (RIN)"),
        ToolArgument::boolean("significant", "Only significant documents under EO 12866"),
    ]
}

fn fields_argument() -> ToolArgument {
    ToolArgument::string_list("fields", "Fields to return; defaults to a summary set")
}

pub(crate) fn specs() -> Vec<ToolSpec> {
    let mut search = filter_arguments();
    search.extend([
        fields_argument(),
        ToolArgument::integer("per_page", "Results per page (max 1000)").with_default(20),
        ToolArgument::integer("page", "Page number").with_default(1),
        ToolArgument::string("order", "Sort order").one_of(ORDERS),
    ]);

    let mut search_all = filter_arguments();
    search_all.extend([
        fields_argument(),
        ToolArgument::integer("max_results", "Maximum records to collect (max 2000)")
            .with_default(DEFAULT_MAX_RESULTS),
        ToolArgument::string("order", "Sort order").one_of(ORDERS),
    ]);

    let mut facets = vec![ToolArgument::string("facet", "Facet to count by")
        .one_of(DOCUMENT_FACETS)
        .required()];
    facets.extend(filter_arguments());

    vec![
        ToolSpec {
            name: SEARCH_DOCUMENTS,
            description: "Search Federal Register documents (rules, proposed rules, notices, presidential documents). Returns one page.",
            arguments: search,
        },
        ToolSpec {
            name: SEARCH_ALL_DOCUMENTS,
            description: "Search Federal Register documents and collect results across pages, up to max_results.",
            arguments: search_all,
        },
        ToolSpec {
            name: GET_DOCUMENT,
            description: "Fetch one document by its document number (e.g. 2025-01234).",
            arguments: vec![
                ToolArgument::string("document_number", "Document number").required(),
                fields_argument(),
            ],
        },
        ToolSpec {
            name: GET_DOCUMENTS,
            description: "Fetch several documents by document number in one request.",
            arguments: vec![
                ToolArgument::string_list("document_numbers", "Document numbers").required(),
                fields_argument(),
            ],
        },
        ToolSpec {
            name: GET_DOCUMENT_TEXT,
            description: "Fetch a document and its full text.",
            arguments: vec![
                ToolArgument::string("document_number", "Document number").required(),
                fields_argument(),
            ],
        },
        ToolSpec {
            name: GET_RECENT_DOCUMENTS,
            description: "Documents published in the last N days, newest first.",
            arguments: vec![
                ToolArgument::integer("days", "How many days back").with_default(DEFAULT_RECENT_DAYS),
                ToolArgument::string_list("document_types", "Document types").one_of(DOCUMENT_TYPES),
                ToolArgument::string_list("agencies", "Agency slugs"),
                fields_argument(),
                ToolArgument::integer("per_page", "Results per page (max 1000)").with_default(20),
            ],
        },
        ToolSpec {
            name: GET_DOCUMENT_FACETS,
            description: "Count documents matching a filter, grouped by a facet (agency, type, topic, period...).",
            arguments: facets,
        },
    ]
}

pub(crate) async fn search(
    ctx: &ToolContext<'_>,
    args: SearchDocumentsArgs,
) -> Result<ToolOutput, ToolError> {
    let mut query = SearchQuery::new()
        .with_conditions(args.filter.to_conditions())
        .with_fields(select_fields(
            args.fields.as_deref(),
            &ctx.settings.fields.document_search,
        ))
        .with_per_page(ctx.per_page(args.per_page))
        .with_page(args.page.unwrap_or(1).max(1));
    if let Some(order) = args.order {
        query = query.with_order(order);
    }

    let response = ctx.api.search_documents(&query).await?;
    ToolOutput::json(&response)
}

pub(crate) async fn search_all(
    ctx: &ToolContext<'_>,
    args: SearchAllDocumentsArgs,
) -> Result<ToolOutput, ToolError> {
    let mut query = SearchQuery::new()
        .with_conditions(args.filter.to_conditions())
        .with_fields(select_fields(
            args.fields.as_deref(),
            &ctx.settings.fields.document_search,
        ));
    if let Some(order) = args.order {
        query = query.with_order(order);
    }

    let limits = ctx.settings.limits;
    let max_results = args
        .max_results
        .unwrap_or(DEFAULT_MAX_RESULTS)
        .min(limits.max_total_results);
    // Pages no larger than what will be kept.
    let page_size = u32::try_from(max_results)
        .unwrap_or(u32::MAX)
        .clamp(1, limits.max_per_page.max(1));
    query = query.with_per_page(page_size);

    let api = ctx.api;
    let results = paginate_with_limits(
        |q: SearchQuery| async move { api.search_documents(&q).await },
        query,
        max_results,
        limits,
    )
    .await?;
    debug!(collected = results.len(), "search_all_documents done");

    let count = results.len() as u64;
    ToolOutput::json(&SearchResponse::collected(results, count))
}

pub(crate) async fn get(ctx: &ToolContext<'_>, args: DocumentArgs) -> Result<ToolOutput, ToolError> {
    let number = non_blank(GET_DOCUMENT, "document_number", &args.document_number)?;
    let fields = select_fields(args.fields.as_deref(), &ctx.settings.fields.document_detail);
    ToolOutput::lookup(ctx.api.get_document(number, &fields).await?)
}

pub(crate) async fn get_many(
    ctx: &ToolContext<'_>,
    args: DocumentsArgs,
) -> Result<ToolOutput, ToolError> {
    let numbers: Vec<String> = args
        .document_numbers
        .iter()
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .collect();
    let fields = select_fields(args.fields.as_deref(), &ctx.settings.fields.document_detail);
    let response = ctx.api.get_documents(&numbers, &fields).await?;
    ToolOutput::json(&response)
}

pub(crate) async fn text(ctx: &ToolContext<'_>, args: DocumentArgs) -> Result<ToolOutput, ToolError> {
    let number = non_blank(GET_DOCUMENT_TEXT, "document_number", &args.document_number)?;
    let fields = select_fields(args.fields.as_deref(), &ctx.settings.fields.document_detail);
    ToolOutput::lookup(document_full_text(ctx.api, number, &fields).await?)
}

pub(crate) async fn recent(
    ctx: &ToolContext<'_>,
    args: RecentDocumentsArgs,
) -> Result<ToolOutput, ToolError> {
    let query = recent_documents_query(
        ctx.today,
        args.days.unwrap_or(DEFAULT_RECENT_DAYS),
        &args.document_types,
        &args.agencies,
    )
    .with_fields(select_fields(
        args.fields.as_deref(),
        &ctx.settings.fields.document_search,
    ))
    .with_per_page(ctx.per_page(args.per_page));

    let response = ctx.api.search_documents(&query).await?;
    ToolOutput::json(&response)
}

pub(crate) async fn facets(ctx: &ToolContext<'_>, args: FacetArgs) -> Result<ToolOutput, ToolError> {
    let query = SearchQuery::new().with_conditions(args.filter.to_conditions());
    let buckets = ctx.api.document_facets(&args.facet, &query).await?;
    ToolOutput::json(&buckets)
}
