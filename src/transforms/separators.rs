//! Separator normalizer: collapse a multi-document YAML stream into a single
//! document.
//!
//! A `---` marker line survives only when it is the first marker seen and
//! occurs within the first five lines of the document. Every other marker
//! line is deleted outright, not blanked, so the indentation of following
//! lines is unaffected. Position gates retention as well as order: a first
//! marker at or after line 6 is still dropped.
//!
//! A retained marker is emitted at line 1. Later passes can grow the lines
//! that sat above it (annotation replacement inserts a full enumeration
//! block), and a marker left in place would drift out of the prologue and be
//! dropped on the next run. At the document head its position is stable no
//! matter what the rest of the pipeline does below it.

use crate::transforms::StageOutcome;

/// Number of leading lines in which a document-start marker may survive.
const PROLOGUE_WINDOW: usize = 5;

/// The YAML document-start token.
const DOCUMENT_START: &str = "---";

pub fn normalize_separators(text: &str) -> StageOutcome {
    let mut kept: Vec<&str> = Vec::new();
    let mut changes = Vec::new();
    let mut markers_seen = 0usize;
    let mut dropped = 0usize;
    let mut retained: Option<(usize, &str)> = None;

    for (i, line) in text.split('\n').enumerate() {
        if line.trim() == DOCUMENT_START {
            markers_seen += 1;
            if markers_seen == 1 && i < PROLOGUE_WINDOW {
                retained = Some((i, line));
            } else {
                changes.push(format!("Removed document separator at line {}", i + 1));
                dropped += 1;
            }
        } else {
            kept.push(line);
        }
    }

    if let Some((index, line)) = retained {
        kept.insert(0, line);
        if index > 0 {
            changes.push(format!(
                "Moved document separator from line {} to line 1",
                index + 1
            ));
        }
    }

    if dropped > 1 {
        changes.push(format!("Removed {} extra document separator(s)", dropped));
    }

    StageOutcome {
        text: kept.join("\n"),
        changes,
    }
}
