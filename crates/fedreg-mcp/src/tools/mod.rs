//! The Federal Register tool catalog.
//!
//! Each sub-module contributes the specs of one family of tools and the
//! async functions that run them against a [`ToolContext`].

mod agencies;
mod args;
mod documents;
mod executive_orders;
mod public_inspection;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use fedreg_client::FederalRegisterApi;
use fedreg_types::{Lookup, ToolArgument};

use crate::error::ToolError;
use crate::handler::ToolSettings;

/// Name, description and arguments of one tool.
#[derive(Debug, Clone)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub arguments: Vec<ToolArgument>,
}

/// Every tool this server exposes, in announcement order.
pub fn catalog() -> Vec<ToolSpec> {
    let mut specs = documents::specs();
    specs.extend(executive_orders::specs());
    specs.extend(agencies::specs());
    specs.extend(public_inspection::specs());
    specs
}

pub(crate) fn find(name: &str) -> Option<ToolSpec> {
    catalog().into_iter().find(|spec| spec.name == name)
}

/// What a running tool can reach.
pub(crate) struct ToolContext<'a> {
    pub api: &'a dyn FederalRegisterApi,
    pub settings: &'a ToolSettings,
    pub today: NaiveDate,
}

impl ToolContext<'_> {
    /// Requested page size, defaulted and clamped to the API ceiling.
    pub(crate) fn per_page(&self, requested: Option<u32>) -> u32 {
        requested
            .unwrap_or(self.settings.default_per_page)
            .clamp(1, self.settings.limits.max_per_page)
    }
}

/// Payload of a successful tool call.
#[derive(Debug)]
pub(crate) enum ToolOutput {
    Json(Value),
    Text(String),
}

impl ToolOutput {
    pub(crate) fn json<T: Serialize>(value: &T) -> Result<Self, ToolError> {
        serde_json::to_value(value)
            .map(Self::Json)
            .map_err(|e| ToolError::Output(e.to_string()))
    }

    /// A found record as JSON; a miss as its explanation.
    pub(crate) fn lookup<T: Serialize>(lookup: Lookup<T>) -> Result<Self, ToolError> {
        match lookup {
            Lookup::Found(value) => Self::json(&value),
            Lookup::NotFound { reason } => Ok(Self::Text(reason)),
        }
    }

    pub(crate) fn render(self) -> Result<String, ToolError> {
        match self {
            Self::Json(v) => {
                serde_json::to_string_pretty(&v).map_err(|e| ToolError::Output(e.to_string()))
            }
            Self::Text(t) => Ok(t),
        }
    }
}

/// Deserializes tool arguments; a missing argument object counts as empty.
pub(crate) fn parse<T: DeserializeOwned>(tool: &str, arguments: Value) -> Result<T, ToolError> {
    let arguments = match arguments {
        Value::Null => Value::Object(Map::new()),
        other => other,
    };
    serde_json::from_value(arguments).map_err(|e| ToolError::invalid(tool, e.to_string()))
}

/// Rejects a blank identifier argument.
pub(crate) fn non_blank<'s>(tool: &str, name: &str, value: &'s str) -> Result<&'s str, ToolError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ToolError::invalid(tool, format!("'{name}' must not be empty")));
    }
    Ok(trimmed)
}

/// Runs the named tool.
pub(crate) async fn call(
    ctx: &ToolContext<'_>,
    name: &str,
    arguments: Value,
) -> Result<ToolOutput, ToolError> {
    match name {
        documents::SEARCH_DOCUMENTS => documents::search(ctx, parse(name, arguments)?).await,
        documents::SEARCH_ALL_DOCUMENTS => {
            documents::search_all(ctx, parse(name, arguments)?).await
        }
        documents::GET_DOCUMENT => documents::get(ctx, parse(name, arguments)?).await,
        documents::GET_DOCUMENTS => documents::get_many(ctx, parse(name, arguments)?).await,
        documents::GET_DOCUMENT_TEXT => documents::text(ctx, parse(name, arguments)?).await,
        documents::GET_RECENT_DOCUMENTS => documents::recent(ctx, parse(name, arguments)?).await,
        documents::GET_DOCUMENT_FACETS => documents::facets(ctx, parse(name, arguments)?).await,
        executive_orders::SEARCH_EXECUTIVE_ORDERS => {
            executive_orders::search(ctx, parse(name, arguments)?).await
        }
        executive_orders::GET_EXECUTIVE_ORDER => {
            executive_orders::get(ctx, parse(name, arguments)?).await
        }
        executive_orders::GET_EXECUTIVE_ORDER_TEXT => {
            executive_orders::text(ctx, parse(name, arguments)?).await
        }
        executive_orders::GET_RECENT_EXECUTIVE_ORDERS => {
            executive_orders::recent(ctx, parse(name, arguments)?).await
        }
        agencies::LIST_AGENCIES => agencies::list(ctx).await,
        agencies::GET_AGENCY => agencies::get(ctx, parse(name, arguments)?).await,
        public_inspection::GET_PUBLIC_INSPECTION_CURRENT => public_inspection::current(ctx).await,
        public_inspection::SEARCH_PUBLIC_INSPECTION => {
            public_inspection::search(ctx, parse(name, arguments)?).await
        }
        public_inspection::GET_PUBLIC_INSPECTION_DOCUMENT => {
            public_inspection::get(ctx, parse(name, arguments)?).await
        }
        other => Err(ToolError::UnknownTool(other.to_string())),
    }
}
