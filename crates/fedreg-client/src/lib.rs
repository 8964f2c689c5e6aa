//! # fedreg-client
//!
//! Access layer for the Federal Register API
//! (`https://www.federalregister.gov/api/v1`).
//!
//! - [`query`] encodes filter descriptions into the API's bracketed
//!   query-string convention.
//! - [`paginate`] walks result pages up to a cap.
//! - [`api::FederalRegisterApi`] is the port the tool layer talks to;
//!   [`client::FederalRegisterClient`] is its reqwest adapter.
//! - [`memory::InMemoryApi`] serves fixtures without network access.
//! - [`compose`] builds the convenience operations (executive order by
//!   number, full text, recent items) on top of the port.

pub mod api;
pub mod client;
pub mod compose;
pub mod error;
pub mod filters;
pub mod memory;
pub mod paginate;
pub mod query;

pub use api::FederalRegisterApi;
pub use client::{ClientConfig, FederalRegisterClient, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use filters::{DocumentFilter, ExecutiveOrderFilter, PublicInspectionFilter};
pub use memory::InMemoryApi;
pub use paginate::{paginate, paginate_with_limits, PageLimits};
pub use query::{ConditionValue, Conditions, SearchQuery};
