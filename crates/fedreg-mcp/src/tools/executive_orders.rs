//! Executive order tools.

use fedreg_client::compose::{
    executive_order_full_text, find_executive_order, recent_executive_orders_query,
};
use fedreg_client::SearchQuery;
use fedreg_types::fields::select_fields;
use fedreg_types::ToolArgument;

use super::args::{ExecutiveOrderArgs, RecentExecutiveOrdersArgs, SearchExecutiveOrdersArgs};
use super::{ToolContext, ToolOutput, ToolSpec};
use crate::error::ToolError;

pub(crate) const SEARCH_EXECUTIVE_ORDERS: &str = "search_executive_orders";
pub(crate) const GET_EXECUTIVE_ORDER: &str = "get_executive_order";
pub(crate) const GET_EXECUTIVE_ORDER_TEXT: &str = "get_executive_order_text";
pub(crate) const GET_RECENT_EXECUTIVE_ORDERS: &str = "get_recent_executive_orders";

const DEFAULT_RECENT_DAYS: u32 = 30;

fn number_argument() -> ToolArgument {
    ToolArgument::integer("executive_order_number", "Executive order number, e.g. 14067")
        .required()
}

pub(crate) fn specs() -> Vec<ToolSpec> {
    let fields = || ToolArgument::string_list("fields", "Fields to return");
    vec![
        ToolSpec {
            name: SEARCH_EXECUTIVE_ORDERS,
            description: "Search executive orders by president, signing year or date range, and term.",
            arguments: vec![
                ToolArgument::string("term", "Full-text search term"),
                ToolArgument::string("president", "President slug, e.g. donald-trump"),
                ToolArgument::integer("year", "Signing year"),
                ToolArgument::string("signing_date_gte", "Signed on or after (YYYY-MM-DD)"),
                ToolArgument::string("signing_date_lte", "Signed on or before (YYYY-MM-DD)"),
                fields(),
                ToolArgument::integer("per_page", "Results per page (max 1000)").with_default(20),
                ToolArgument::integer("page", "Page number").with_default(1),
                ToolArgument::string("order", "Sort order")
                    .one_of(&["newest", "oldest", "relevance", "executive_order_number"]),
            ],
        },
        ToolSpec {
            name: GET_EXECUTIVE_ORDER,
            description: "Find an executive order by its number.",
            arguments: vec![number_argument(), fields()],
        },
        ToolSpec {
            name: GET_EXECUTIVE_ORDER_TEXT,
            description: "Find an executive order by its number and fetch its full text.",
            arguments: vec![number_argument(), fields()],
        },
        ToolSpec {
            name: GET_RECENT_EXECUTIVE_ORDERS,
            description: "Executive orders signed in the last N days, newest first.",
            arguments: vec![
                ToolArgument::integer("days", "How many days back").with_default(DEFAULT_RECENT_DAYS),
                fields(),
                ToolArgument::integer("per_page", "Results per page (max 1000)").with_default(20),
            ],
        },
    ]
}

pub(crate) async fn search(
    ctx: &ToolContext<'_>,
    args: SearchExecutiveOrdersArgs,
) -> Result<ToolOutput, ToolError> {
    let mut query = SearchQuery::new()
        .with_conditions(args.filter.to_conditions())
        .with_fields(select_fields(
            args.fields.as_deref(),
            &ctx.settings.fields.executive_order,
        ))
        .with_per_page(ctx.per_page(args.per_page))
        .with_page(args.page.unwrap_or(1).max(1));
    if let Some(order) = args.order {
        query = query.with_order(order);
    }

    let response = ctx.api.search_documents(&query).await?;
    ToolOutput::json(&response)
}

pub(crate) async fn get(
    ctx: &ToolContext<'_>,
    args: ExecutiveOrderArgs,
) -> Result<ToolOutput, ToolError> {
    let fields = select_fields(args.fields.as_deref(), &ctx.settings.fields.executive_order);
    let found = find_executive_order(
        ctx.api,
        args.executive_order_number,
        &fields,
        ctx.settings.lookup_page_size,
    )
    .await?;
    ToolOutput::lookup(found)
}

pub(crate) async fn text(
    ctx: &ToolContext<'_>,
    args: ExecutiveOrderArgs,
) -> Result<ToolOutput, ToolError> {
    let fields = select_fields(args.fields.as_deref(), &ctx.settings.fields.executive_order);
    let found = executive_order_full_text(
        ctx.api,
        args.executive_order_number,
        &fields,
        ctx.settings.lookup_page_size,
    )
    .await?;
    ToolOutput::lookup(found)
}

pub(crate) async fn recent(
    ctx: &ToolContext<'_>,
    args: RecentExecutiveOrdersArgs,
) -> Result<ToolOutput, ToolError> {
    let query = recent_executive_orders_query(ctx.today, args.days.unwrap_or(DEFAULT_RECENT_DAYS))
        .with_fields(select_fields(
            args.fields.as_deref(),
            &ctx.settings.fields.executive_order,
        ))
        .with_per_page(ctx.per_page(args.per_page));

    let response = ctx.api.search_documents(&query).await?;
    ToolOutput::json(&response)
}
