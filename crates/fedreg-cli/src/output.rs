//! Output formatting for CLI responses.

use std::fmt::Display;

use fedreg_protocol::mcp::tools::McpToolDefinition;
use fedreg_types::{DiagnosticError, FedRegError};

/// Prints an error message.
pub fn print_error(message: &str) {
    eprintln!("[ERROR] {message}");
}

/// Reports a failure as a domain error, with its cause and fix when known.
///
/// The returned error carries the [`FedRegError`] so `main` exits with
/// the same `[kind] message (context)` line.
pub fn fail<E>(err: E) -> anyhow::Error
where
    E: DiagnosticError + Display + Into<FedRegError>,
{
    let (hint, fix) = (err.hint(), err.fix());
    let domain: FedRegError = err.into();
    tracing::error!(
        kind = domain.kind.as_str(),
        context = domain.context.as_deref().unwrap_or_default(),
        "{}",
        domain.message
    );
    print_error(&domain.to_string());
    if let Some(hint) = hint {
        eprintln!("\n  Cause: {hint}");
    }
    if let Some(fix) = fix {
        eprintln!("  Fix:   {fix}\n");
    }
    anyhow::Error::new(domain)
}

/// One line per tool: padded name, then the first sentence of its description.
pub fn tool_table(tools: &[McpToolDefinition]) -> String {
    let width = tools.iter().map(|t| t.name.len()).max().unwrap_or(0);
    tools
        .iter()
        .map(|t| {
            let summary = t
                .description
                .as_deref()
                .and_then(|d| d.split(". ").next())
                .unwrap_or("")
                .trim_end_matches('.');
            format!("{:<width$}  {summary}", t.name)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
