//! Structural validator: read-only advisory checks over the final text.
//!
//! This is the only place the document is parsed as YAML, and the parse is
//! never re-emitted. Passing requires exactly one document in the stream and
//! a top-level mapping carrying an `openapi` or `swagger` version key.
//! Everything else (info title, path count, leftover generator directives)
//! is reported as a note, not a failure.

use serde::Deserialize;
use serde_yaml::Value;

use crate::transforms::annotations::DIRECTIVE_KEY;

/// Outcome of the structural validation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    /// Number of YAML documents found in the stream.
    pub document_count: usize,
    /// Failures. Empty means the check passed.
    pub errors: Vec<String>,
    /// Advisory findings.
    pub notes: Vec<String>,
}

impl ValidationReport {
    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate `text` as a single-document OpenAPI specification.
pub fn validate(text: &str) -> ValidationReport {
    let mut report = ValidationReport {
        document_count: 0,
        errors: Vec::new(),
        notes: Vec::new(),
    };

    let mut documents: Vec<Value> = Vec::new();
    for deserializer in serde_yaml::Deserializer::from_str(text) {
        match Value::deserialize(deserializer) {
            Ok(value) => documents.push(value),
            Err(e) => {
                // Surface the parser's diagnostic verbatim.
                report.errors.push(format!("YAML syntax error: {}", e));
                return report;
            }
        }
    }

    report.document_count = documents.len();
    if documents.len() != 1 {
        report.errors.push(format!(
            "Expected a single YAML document, found {}",
            documents.len()
        ));
        return report;
    }

    let doc = &documents[0];
    if doc.as_mapping().is_none() {
        report
            .errors
            .push("Top level of the document is not a mapping".to_string());
        return report;
    }

    if let Some(version) = doc.get("openapi") {
        report
            .notes
            .push(format!("OpenAPI version: {}", scalar_to_string(version)));
    } else if let Some(version) = doc.get("swagger") {
        report
            .notes
            .push(format!("Swagger version: {}", scalar_to_string(version)));
    } else {
        report
            .errors
            .push("Missing 'openapi' or 'swagger' version key".to_string());
    }

    match doc.get("info") {
        Some(info) => {
            if let Some(title) = info.get("title") {
                report
                    .notes
                    .push(format!("Title: {}", scalar_to_string(title)));
            }
        }
        None => report.notes.push("No info section".to_string()),
    }

    match doc.get("paths").and_then(Value::as_mapping) {
        Some(paths) => report.notes.push(format!("{} path(s)", paths.len())),
        None => report.notes.push("No paths section".to_string()),
    }

    if text.contains(DIRECTIVE_KEY) {
        report.notes.push(format!(
            "Document still contains {} references",
            DIRECTIVE_KEY
        ));
    }

    report
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .unwrap_or_default()
            .trim_end()
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_document_passes() {
        let text = "openapi: 3.0.0\ninfo:\n  title: Controls API\npaths:\n  /a: {}\n  /b: {}\n";
        let report = validate(text);
        assert!(report.passed());
        assert_eq!(report.document_count, 1);
        assert!(report.notes.contains(&"OpenAPI version: 3.0.0".to_string()));
        assert!(report.notes.contains(&"Title: Controls API".to_string()));
        assert!(report.notes.contains(&"2 path(s)".to_string()));
    }

    #[test]
    fn test_swagger_key_is_accepted() {
        let report = validate("swagger: '2.0'\npaths: {}\n");
        assert!(report.passed());
        assert!(report.notes.contains(&"Swagger version: 2.0".to_string()));
    }

    #[test]
    fn test_multiple_documents_fail() {
        let report = validate("---\na: 1\n---\nb: 2\n");
        assert!(!report.passed());
        assert_eq!(report.document_count, 2);
        assert!(report.errors[0].contains("found 2"));
    }

    #[test]
    fn test_non_mapping_fails() {
        let report = validate("- just\n- a\n- list\n");
        assert!(!report.passed());
        assert!(report.errors[0].contains("not a mapping"));
    }

    #[test]
    fn test_missing_version_key_fails() {
        let report = validate("info:\n  title: t\npaths: {}\n");
        assert!(!report.passed());
        assert!(report.errors[0].contains("openapi"));
    }

    #[test]
    fn test_syntax_error_carries_parser_message() {
        let report = validate("openapi: 3.0.0\n  bad indent: [unclosed\n");
        assert!(!report.passed());
        assert!(report.errors[0].starts_with("YAML syntax error: "));
    }

    #[test]
    fn test_leftover_directive_is_noted() {
        let text = "openapi: 3.0.0\ninfo:\n  title: t\npaths: {}\nx-faker: leftover\n";
        let report = validate(text);
        assert!(report.passed());
        assert!(report
            .notes
            .iter()
            .any(|n| n.contains("x-faker references")));
    }
}
