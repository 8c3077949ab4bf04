//! Pipeline orchestrator: fixed-order composition of the transform stages.
//!
//! Stage order matters. Separators go first so later passes see a single
//! document; annotation substitution runs before literal removal so the
//! canonical enums are themselves swept for invalid entries; formatting runs
//! last to clean up whatever the earlier passes left behind.
//!
//! The cycle is rerun until the text stops changing. A deletion in a late
//! stage can expose a pattern an earlier stage handles (removing an invalid
//! list entry can leave a directive key adjacent to its value list), and a
//! single pass over such input would produce output the next run still
//! changes. The loop terminates: no stage introduces directive keys, so
//! substitutions are bounded, and once they stop every stage only deletes
//! lines or whitespace.

use crate::transforms::{annotations, formatting, literals, separators, StageOutcome};

/// Result of running the full pipeline over a document.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineResult {
    /// The normalized document text.
    pub text: String,
    /// Every change record, in application order.
    pub changes: Vec<String>,
}

/// The stages, in the order they are applied.
const STAGES: &[fn(&str) -> StageOutcome] = &[
    separators::normalize_separators,
    annotations::substitute_annotations,
    literals::remove_invalid_literals,
    formatting::normalize_formatting,
];

/// Run the stage cycle over `text` until the output stabilizes, threading
/// each stage's output into the next.
pub fn run(text: &str) -> PipelineResult {
    let mut current = text.to_string();
    let mut changes = Vec::new();

    loop {
        let before = current.clone();
        for stage in STAGES {
            let outcome = stage(&current);
            current = outcome.text;
            changes.extend(outcome.changes);
        }
        if current == before {
            break;
        }
    }

    PipelineResult {
        text: current,
        changes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_document_is_untouched() {
        let input = "---\nopenapi: 3.0.0\ninfo:\n  title: t\npaths: {}\n";
        let result = run(input);
        assert_eq!(result.text, input);
        assert!(result.changes.is_empty());
    }

    #[test]
    fn test_stages_compose() {
        let input = "\
---
openapi: 3.0.0
info:
  title: Controls API
---
paths: {}
components:
  schemas:
    Control:
      properties:
        acronym:
          x-faker:
            random.arrayElement:
              - - AC-1
                - S-1
                - SI-4(11)
";
        let result = run(input);
        assert!(!result.text.contains("---\npaths"));
        assert!(!result.text.contains("x-faker"));
        assert!(!result.text.contains("- S-1\n"));
        assert!(result.text.contains("          enum:"));
        assert!(result.text.ends_with("- PM-11\n"));
        assert!(!result.changes.is_empty());
    }

    #[test]
    fn test_pipeline_is_idempotent() {
        let input = "---\na: 1\n---\n  x-faker:\n    random.arrayElement:\n      - x\n- S-1\nb: 2  \n";
        let once = run(input);
        let twice = run(&once.text);
        assert_eq!(once.text, twice.text);
        assert!(twice.changes.is_empty());
    }

    #[test]
    fn test_idempotent_when_replacement_grows_past_marker() {
        // A recognized block above a prologue marker expands to a couple of
        // hundred lines. The marker must survive at the document head rather
        // than drift into the body and get dropped on the next run.
        let input = "\
x-faker:
  random.arrayElement:
    - - AC-1
      - SI-4(11)
---
a: 1
";
        let once = run(input);
        let twice = run(&once.text);
        assert_eq!(once.text, twice.text);
        assert!(twice.changes.is_empty());
        assert!(once.text.starts_with("---\n"));
        assert_eq!(once.text.matches("---").count(), 1);
        assert!(once.text.contains("- PM-11"));
        assert!(once.text.contains("a: 1"));
    }

    #[test]
    fn test_idempotent_when_literal_removal_exposes_directive() {
        // The invalid entry sits between the directive key and its value
        // list. Removing it makes the two adjacent, so the block only
        // becomes recognizable after the literal pass has run once.
        let input = "a:\n  x-faker:\n  - S-1\n    random.arrayElement:\n      - x\nb: 1\n";
        let once = run(input);
        let twice = run(&once.text);
        assert_eq!(once.text, twice.text);
        assert!(twice.changes.is_empty());
        assert_eq!(once.text, "a:\nb: 1\n");
    }
}
