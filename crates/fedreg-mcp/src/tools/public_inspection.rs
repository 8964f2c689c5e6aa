//! Public inspection tools.

use fedreg_client::filters::DOCUMENT_TYPES;
use fedreg_client::SearchQuery;
use fedreg_types::fields::select_fields;
use fedreg_types::ToolArgument;

use super::args::{PublicInspectionDocumentArgs, SearchPublicInspectionArgs};
use super::{non_blank, ToolContext, ToolOutput, ToolSpec};
use crate::error::ToolError;

pub(crate) const GET_PUBLIC_INSPECTION_CURRENT: &str = "get_public_inspection_current";
pub(crate) const SEARCH_PUBLIC_INSPECTION: &str = "search_public_inspection";
pub(crate) const GET_PUBLIC_INSPECTION_DOCUMENT: &str = "get_public_inspection_document";

pub(crate) fn specs() -> Vec<ToolSpec> {
    vec![
        ToolSpec {
            name: GET_PUBLIC_INSPECTION_CURRENT,
            description: "Documents currently on public inspection, ahead of publication.",
            arguments: Vec::new(),
        },
        ToolSpec {
            name: SEARCH_PUBLIC_INSPECTION,
            description: "Search public inspection documents by availability date, agencies and types.",
            arguments: vec![
                ToolArgument::string("available_on", "Date on public inspection (YYYY-MM-DD)"),
                ToolArgument::string_list("agencies", "Agency slugs"),
                ToolArgument::string_list("document_types", "Document types").one_of(DOCUMENT_TYPES),
                ToolArgument::boolean("special_filing", "Only special (true) or regular (false) filings"),
                ToolArgument::string_list("fields", "Fields to return"),
                ToolArgument::integer("per_page", "Results per page (max 1000)").with_default(20),
                ToolArgument::integer("page", "Page number").with_default(1),
            ],
        },
        ToolSpec {
            name: GET_PUBLIC_INSPECTION_DOCUMENT,
            description: "Fetch one public inspection document by document number.",
            arguments: vec![ToolArgument::string("document_number", "Document number").required()],
        },
    ]
}

pub(crate) async fn current(ctx: &ToolContext<'_>) -> Result<ToolOutput, ToolError> {
    ToolOutput::json(&ctx.api.current_public_inspection().await?)
}

pub(crate) async fn search(
    ctx: &ToolContext<'_>,
    args: SearchPublicInspectionArgs,
) -> Result<ToolOutput, ToolError> {
    let query = SearchQuery::new()
        .with_conditions(args.filter.to_conditions())
        .with_fields(select_fields(
            args.fields.as_deref(),
            &ctx.settings.fields.public_inspection,
        ))
        .with_per_page(ctx.per_page(args.per_page))
        .with_page(args.page.unwrap_or(1).max(1));
    ToolOutput::json(&ctx.api.search_public_inspection(&query).await?)
}

pub(crate) async fn get(
    ctx: &ToolContext<'_>,
    args: PublicInspectionDocumentArgs,
) -> Result<ToolOutput, ToolError> {
    let number = non_blank(
        GET_PUBLIC_INSPECTION_DOCUMENT,
        "document_number",
        &args.document_number,
    )?;
    ToolOutput::lookup(ctx.api.get_public_inspection_document(number).await?)
}
