//! Agency directory tools.

use serde::Serialize;

use fedreg_types::{Agency, ToolArgument};

use super::args::AgencyArgs;
use super::{non_blank, ToolContext, ToolOutput, ToolSpec};
use crate::error::ToolError;

pub(crate) const LIST_AGENCIES: &str = "list_agencies";
pub(crate) const GET_AGENCY: &str = "get_agency";

/// Directory entry without the long description.
#[derive(Debug, Serialize)]
struct AgencySummary<'a> {
    id: u64,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    short_name: Option<&'a str>,
    slug: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent_id: Option<u64>,
}

impl<'a> From<&'a Agency> for AgencySummary<'a> {
    fn from(a: &'a Agency) -> Self {
        Self {
            id: a.id,
            name: &a.name,
            short_name: a.short_name.as_deref(),
            slug: &a.slug,
            parent_id: a.parent_id,
        }
    }
}

pub(crate) fn specs() -> Vec<ToolSpec> {
    vec![
        ToolSpec {
            name: LIST_AGENCIES,
            description: "List every agency publishing in the Federal Register with its slug.",
            arguments: Vec::new(),
        },
        ToolSpec {
            name: GET_AGENCY,
            description: "Fetch one agency by slug or numeric id.",
            arguments: vec![ToolArgument::string(
                "agency",
                "Agency slug (e.g. environmental-protection-agency) or id",
            )
            .required()],
        },
    ]
}

pub(crate) async fn list(ctx: &ToolContext<'_>) -> Result<ToolOutput, ToolError> {
    let agencies = ctx.api.list_agencies().await?;
    let summaries: Vec<AgencySummary<'_>> = agencies.iter().map(AgencySummary::from).collect();
    ToolOutput::json(&summaries)
}

pub(crate) async fn get(ctx: &ToolContext<'_>, args: AgencyArgs) -> Result<ToolOutput, ToolError> {
    let agency = non_blank(GET_AGENCY, "agency", &args.agency)?;
    ToolOutput::lookup(ctx.api.get_agency(agency).await?)
}
