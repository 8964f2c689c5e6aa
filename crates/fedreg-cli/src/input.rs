//! Tool argument resolution for `fedreg call`.
//!
//! Arguments come from the inline `--input` JSON, or from `--input-file`
//! (a path, or `-` for stdin), which wins when both are given.

use std::io::Read;
use std::path::Path;

use serde_json::Value;

/// Returns the tool arguments as a JSON object.
///
/// # Errors
///
/// Fails when the file cannot be read, the text is not JSON, or the JSON
/// is not an object.
pub fn resolve_arguments(input: &str, input_file: Option<&str>) -> anyhow::Result<Value> {
    let raw = match input_file {
        Some("-") => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| anyhow::anyhow!("failed to read stdin: {e}"))?;
            buffer
        }
        Some(path) => read_file(Path::new(path))?,
        None => input.to_string(),
    };
    parse_object(raw.trim())
}

fn read_file(path: &Path) -> anyhow::Result<String> {
    if !path.is_file() {
        anyhow::bail!("input file not found: {}", path.display());
    }
    std::fs::read_to_string(path).map_err(|e| anyhow::anyhow!("failed to read input file: {e}"))
}

fn parse_object(text: &str) -> anyhow::Result<Value> {
    // An empty file or stdin means "no arguments".
    if text.is_empty() {
        return Ok(Value::Object(serde_json::Map::new()));
    }
    let value: Value =
        serde_json::from_str(text).map_err(|e| anyhow::anyhow!("invalid JSON input: {e}"))?;
    if !value.is_object() {
        anyhow::bail!("tool arguments must be a JSON object, got {}", kind(&value));
    }
    Ok(value)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn inline_object() {
        let v = resolve_arguments(r#"{"document_number":"2025-01234"}"#, None).unwrap();
        assert_eq!(v, json!({"document_number": "2025-01234"}));
    }

    #[test]
    fn file_wins_over_inline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("args.json");
        std::fs::write(&path, "  {\"number\": 14067}\n").unwrap();

        let v = resolve_arguments("{}", Some(path.to_str().unwrap())).unwrap();
        assert_eq!(v, json!({"number": 14067}));
    }

    #[test]
    fn empty_file_means_no_arguments() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.json");
        std::fs::write(&path, "\n").unwrap();

        let v = resolve_arguments("{}", Some(path.to_str().unwrap())).unwrap();
        assert_eq!(v, json!({}));
    }

    #[test]
    fn missing_file() {
        let err = resolve_arguments("{}", Some("/nonexistent/args.json")).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn malformed_json() {
        let err = resolve_arguments("{oops", None).unwrap_err();
        assert!(err.to_string().contains("invalid JSON"));
    }

    #[test]
    fn non_object_is_rejected() {
        let err = resolve_arguments("[1, 2]", None).unwrap_err();
        assert!(err.to_string().contains("got an array"));
    }
}
