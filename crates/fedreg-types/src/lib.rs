//! # fedreg-types
//!
//! Domain types for the Federal Register MCP server.
//! This crate contains pure data types with no I/O and no external
//! dependencies beyond serde.

pub mod agency;
pub mod document;
pub mod error;
pub mod fields;
pub mod outcome;
pub mod public_inspection;
pub mod search;
pub mod tool;

// Re-exports for convenience.
pub use agency::{Agency, AgencyRef};
pub use document::{Document, President};
pub use error::{DiagnosticError, ErrorKind, FedRegError};
pub use fields::FieldDefaults;
pub use outcome::{FullText, Lookup};
pub use public_inspection::PublicInspectionDocument;
pub use search::{FacetCount, SearchErrors, SearchResponse};
pub use tool::ToolArgument;
