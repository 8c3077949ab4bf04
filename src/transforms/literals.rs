//! Invalid-literal remover: delete list entries matching known-bad control
//! identifiers.
//!
//! The match is whole-line, never substring: an entry is removed only when
//! its value, after the list dash, equals an invalid literal exactly. `S-1`
//! never takes `S-10` with it.

use tracing::debug;

use crate::catalog::INVALID_CONTROL_LITERALS;
use crate::transforms::StageOutcome;

pub fn remove_invalid_literals(text: &str) -> StageOutcome {
    let mut counts = vec![0usize; INVALID_CONTROL_LITERALS.len()];
    let mut kept: Vec<&str> = Vec::new();

    for line in text.split('\n') {
        match invalid_entry_index(line) {
            Some(idx) => counts[idx] += 1,
            None => kept.push(line),
        }
    }

    let mut changes = Vec::new();
    for (idx, literal) in INVALID_CONTROL_LITERALS.iter().enumerate() {
        if counts[idx] > 0 {
            debug!(literal, count = counts[idx], "removed invalid list entry");
            changes.push(format!(
                "Removed invalid entry '- {}' ({} occurrence(s))",
                literal, counts[idx]
            ));
        }
    }

    StageOutcome {
        text: kept.join("\n"),
        changes,
    }
}

/// A list-item line whose value is exactly one of the invalid literals:
/// optional indent, a dash, whitespace, the literal, end of line.
fn invalid_entry_index(line: &str) -> Option<usize> {
    let rest = line.trim_start().strip_prefix('-')?;
    if !rest.starts_with(' ') && !rest.starts_with('\t') {
        return None;
    }
    let value = rest.trim();
    INVALID_CONTROL_LITERALS.iter().position(|lit| value == *lit)
}
