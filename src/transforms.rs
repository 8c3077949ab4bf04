//! Text-level transform stages for the normalization pipeline.
//!
//! Each stage is a pure function from document text to new text plus a list
//! of human-readable change records. Stages share no state; the pipeline
//! threads the document through them in a fixed order. Working on the raw
//! text rather than a parsed tree means everything a stage does not need to
//! touch survives byte-for-byte (comments, key order, quoting).

pub mod annotations;
pub mod formatting;
pub mod literals;
pub mod separators;

/// Output of a single pipeline stage.
#[derive(Debug, Clone, PartialEq)]
pub struct StageOutcome {
    /// The transformed document text.
    pub text: String,
    /// Human-readable descriptions of what changed, in application order.
    pub changes: Vec<String>,
}
