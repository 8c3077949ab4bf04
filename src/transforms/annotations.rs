//! Annotation substitution engine.
//!
//! Locates `x-faker` generator-directive blocks and replaces the recognized
//! ones with canonical enumeration blocks re-indented to match the anchor.
//! A directive block looks like this in the wild:
//!
//! ```text
//! acronym:
//!   type: string
//!   x-faker:
//!     random.arrayElement:
//!       - - AC-1
//!         - AC-2
//!         - SI-4(11)
//! ```
//!
//! The engine recognizes a category by the first and last literals of the
//! directive's value list, since the list itself is unbounded free text. A
//! block whose bounding literals match no known table is left for the orphan
//! pass. The replacement contains no directive markers, so the stage is
//! idempotent: a second run finds nothing to do.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::{debug, warn};

use crate::catalog::{EnumTable, CCI_IDENTIFIERS, CONTROL_ACRONYMS};
use crate::transforms::StageOutcome;

/// The generator-directive key this engine removes.
pub const DIRECTIVE_KEY: &str = "x-faker";

/// A recognized annotation site: an anchor pattern and the table that
/// replaces the directive block found there.
struct AnnotationSite {
    /// Short description used in change records.
    description: &'static str,
    /// Anchor pattern. The optional `keep` group is the anchor line retained
    /// ahead of the replacement; the `indent` group is the indentation of the
    /// directive key, propagated to every line of the replacement.
    pattern: &'static Lazy<Regex>,
    table: &'static EnumTable,
}

// Control acronym list anchored under an `acronym:` parent key. The value
// list is recognized by its AC-1 / SI-4(11) bounding pair.
static CONTROL_ANCHORED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^(?P<keep> *acronym:[^\n]*)\n(?P<indent> *)x-faker: *\n *random\.arrayElement: *\n *-(?: +-)? +AC-1 *\n(?s:.*?)- +SI-4\(11\)",
    )
    .expect("control anchor pattern compiles")
});

// CCI list anchored under a six-digit `example:` line, bounded by the
// '000001' / '003450' pair.
static CCI_ANCHORED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?m)^(?P<keep> *example: *['"]?[0-9]{6}['"]?) *\n(?P<indent> *)x-faker: *\n *random\.arrayElement: *\n *-(?: +-)? +'000001' *\n(?s:.*?)- +'003450'"#,
    )
    .expect("cci anchor pattern compiles")
});

// Freestanding control acronym list with the known bounding pair but no
// `acronym:` parent. Still gets the canonical replacement.
static CONTROL_FREESTANDING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^(?P<indent> *)x-faker: *\n *random\.arrayElement: *\n *-(?: +-)? +AC-1 *\n(?s:.*?)- +SI-4\(11\)",
    )
    .expect("freestanding control pattern compiles")
});

fn sites() -> [AnnotationSite; 3] {
    [
        AnnotationSite {
            description: "control acronym list under an acronym key",
            pattern: &CONTROL_ANCHORED,
            table: &CONTROL_ACRONYMS,
        },
        AnnotationSite {
            description: "CCI list under a six-digit example",
            pattern: &CCI_ANCHORED,
            table: &CCI_IDENTIFIERS,
        },
        AnnotationSite {
            description: "freestanding control acronym list",
            pattern: &CONTROL_FREESTANDING,
            table: &CONTROL_ACRONYMS,
        },
    ]
}

/// Replace every recognized directive block, then delete orphaned blocks the
/// targeted passes missed.
pub fn substitute_annotations(text: &str) -> StageOutcome {
    let mut changes = Vec::new();
    let mut current = text.to_string();

    for site in sites() {
        current = substitute_site(&current, &site, &mut changes);
    }
    current = remove_orphan_blocks(&current, &mut changes);

    StageOutcome {
        text: current,
        changes,
    }
}

fn substitute_site(text: &str, site: &AnnotationSite, changes: &mut Vec<String>) -> String {
    let mut hits = 0usize;
    let replaced = site.pattern.replace_all(text, |caps: &Captures| {
        hits += 1;
        let indent = caps.name("indent").map(|m| m.as_str()).unwrap_or("");
        let rendered = site.table.render(indent);
        match caps.name("keep") {
            Some(keep) => format!("{}\n{}", keep.as_str(), rendered),
            None => rendered,
        }
    });

    if hits == 0 {
        return text.to_string();
    }

    debug!(site = site.description, hits, "substituted annotation block");
    changes.push(format!(
        "Replaced {} {} block(s) with the canonical {} enum ({})",
        hits, DIRECTIVE_KEY, site.table.name, site.description
    ));
    replaced.into_owned()
}

static ORPHAN_HEAD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^( *)x-faker: *$").expect("orphan head pattern compiles"));

static VALUE_LIST_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ *random\.arrayElement: *$").expect("value list pattern compiles"));

// A line that introduces a mapping key. Used as the consumption boundary for
// orphan blocks; values containing a colon can fool it, which is why removed
// spans are logged in full.
static KEY_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^( *)[\w.-]+: *").expect("key line pattern compiles"));

/// Delete freestanding directive blocks with unrecognized contents.
///
/// Consumption runs from the directive key through the last line before a
/// key at the same or shallower indentation, or to end of file. There is no
/// reliable delimiter for the end of an unbounded scalar list, so this is a
/// best-effort pass: every removed span is recorded and logged for review.
fn remove_orphan_blocks(text: &str, changes: &mut Vec<String>) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut kept: Vec<&str> = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        let head = match ORPHAN_HEAD.captures(lines[i]) {
            Some(caps) => caps,
            None => {
                kept.push(lines[i]);
                i += 1;
                continue;
            }
        };
        if i + 1 >= lines.len() || !VALUE_LIST_KEY.is_match(lines[i + 1]) {
            kept.push(lines[i]);
            i += 1;
            continue;
        }

        let head_indent = head[1].len();
        let start = i;
        let mut end = i + 2;
        while end < lines.len() {
            if let Some(key) = KEY_LINE.captures(lines[end]) {
                if key[1].len() <= head_indent {
                    break;
                }
            }
            end += 1;
        }

        warn!(
            start_line = start + 1,
            end_line = end,
            "removed orphaned {} block:\n{}",
            DIRECTIVE_KEY,
            lines[start..end].join("\n")
        );
        changes.push(format!(
            "Removed orphaned {} block at lines {}-{} ({} line(s))",
            DIRECTIVE_KEY,
            start + 1,
            end,
            end - start
        ));
        i = end;
    }

    kept.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANCHORED_CONTROL_INPUT: &str = "\
components:
  schemas:
    Control:
      type: object
      properties:
        acronym:
          x-faker:
            random.arrayElement:
              - - AC-1
                - AC-2
                - SI-4(11)
        name:
          type: string
";

    #[test]
    fn test_anchored_control_substitution() {
        let outcome = substitute_annotations(ANCHORED_CONTROL_INPUT);

        assert!(!outcome.text.contains(DIRECTIVE_KEY));
        assert!(outcome.text.contains("          enum:"));
        assert!(outcome.text.contains("            # Access Control (AC)"));
        assert!(outcome.text.contains("            - AC-1"));
        assert!(outcome.text.contains("            - PM-11"));
        // the anchor and its siblings survive
        assert!(outcome.text.contains("        acronym:"));
        assert!(outcome.text.contains("        name:"));
        assert_eq!(outcome.changes.len(), 1);
    }

    #[test]
    fn test_anchored_substitution_keeps_indentation() {
        let outcome = substitute_annotations(ANCHORED_CONTROL_INPUT);
        let expected = format!(
            "        acronym:\n{}\n        name:",
            CONTROL_ACRONYMS.render("          ")
        );
        assert!(outcome.text.contains(&expected));
    }

    #[test]
    fn test_anchored_substitution_is_idempotent() {
        let once = substitute_annotations(ANCHORED_CONTROL_INPUT);
        let twice = substitute_annotations(&once.text);
        assert_eq!(once.text, twice.text);
        assert!(twice.changes.is_empty());
    }

    #[test]
    fn test_all_canonical_values_present_in_order() {
        let outcome = substitute_annotations(ANCHORED_CONTROL_INPUT);
        let mut last_pos = 0;
        for value in CONTROL_ACRONYMS.values() {
            let needle = format!("- {}\n", value);
            let pos = outcome.text[last_pos..]
                .find(&needle)
                .unwrap_or_else(|| panic!("{} missing or out of order", value));
            last_pos += pos + needle.len();
        }
    }

    #[test]
    fn test_cci_substitution() {
        let input = "\
        cci:
          type: string
          example: '000001'
          x-faker:
            random.arrayElement:
              - - '000001'
                - '000002'
                - '003450'
";
        let outcome = substitute_annotations(input);
        assert!(!outcome.text.contains(DIRECTIVE_KEY));
        assert!(outcome.text.contains(r"          pattern: '^\d{6}$'"));
        assert!(outcome.text.contains("          enum:"));
        assert!(outcome.text.contains("            - '000001'"));
        assert!(outcome.text.contains("            - '003450'"));
        assert!(outcome.text.contains("          example: '000001'"));
    }

    #[test]
    fn test_freestanding_control_block_is_replaced() {
        let input = "        x-faker:
          random.arrayElement:
            - - AC-1
              - SI-4(11)
        description: a control
";
        let outcome = substitute_annotations(input);
        assert!(!outcome.text.contains(DIRECTIVE_KEY));
        assert!(outcome.text.contains("        enum:"));
        assert!(outcome.text.contains("          - AC-1"));
        assert!(outcome.text.contains("        description: a control"));
    }

    #[test]
    fn test_unknown_bounds_fall_through_to_orphan_removal() {
        // Bounding literals match no table, so no replacement is attempted;
        // the orphan pass deletes the block instead.
        let input = "\
        status:
          type: string
          x-faker:
            random.arrayElement:
              - - Ongoing
                - Completed
        name:
          type: string
";
        let outcome = substitute_annotations(input);
        assert!(!outcome.text.contains(DIRECTIVE_KEY));
        assert!(!outcome.text.contains("enum:"));
        assert!(!outcome.text.contains("Ongoing"));
        assert!(outcome.text.contains("        name:"));
        assert!(outcome
            .changes
            .iter()
            .any(|c| c.contains("orphaned") && c.contains("4 line(s)")));
    }

    #[test]
    fn test_orphan_consumption_stops_at_shallower_key() {
        let input = "a:\n  x-faker:\n    random.arrayElement:\n      - one\n      - two\nb: kept\n";
        let outcome = substitute_annotations(input);
        assert_eq!(outcome.text, "a:\nb: kept\n");
    }

    #[test]
    fn test_orphan_consumption_runs_to_end_of_file() {
        let input = "a:\n  x-faker:\n    random.arrayElement:\n      - one\n      - two";
        let outcome = substitute_annotations(input);
        assert_eq!(outcome.text, "a:");
    }

    #[test]
    fn test_directive_without_value_list_is_untouched() {
        // An x-faker key not followed by the value-list keyword is not a
        // directive block this engine knows; leave it for a human.
        let input = "a:\n  x-faker:\n    lorem.words: 3\nb: 1\n";
        let outcome = substitute_annotations(input);
        assert_eq!(outcome.text, input);
        assert!(outcome.changes.is_empty());
    }

    #[test]
    fn test_no_directive_is_a_noop() {
        let input = "openapi: 3.0.0\ninfo:\n  title: t\n";
        let outcome = substitute_annotations(input);
        assert_eq!(outcome.text, input);
        assert!(outcome.changes.is_empty());
    }
}
