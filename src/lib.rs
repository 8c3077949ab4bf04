//! # oasfix
//!
//! Structural normalization pipeline for OpenAPI specification documents
//! authored as YAML text.
//!
//! ```text
//! load → separators → annotations → literals → formatting → write
//!                                                             └→ validate (advisory)
//! ```
//!
//! The pipeline repairs a document that "looks like YAML" but would choke
//! downstream tooling: multi-document streams are collapsed to one, `x-faker`
//! generator annotations are replaced with the canonical enumerations they
//! stand in for, known-invalid control identifiers are dropped, and stray
//! whitespace is cleaned up.
//!
//! Every stage is a pure text-to-text transform. Nothing is parsed, mutated,
//! and re-serialized, so formatting and comments outside the touched spans
//! survive byte-for-byte, and re-running the pipeline on its own output is a
//! no-op. The one place YAML is actually parsed is the advisory structural
//! validator, which reads the written result and reports without mutating.

pub mod catalog;
pub mod document;
pub mod error;
pub mod pipeline;
pub mod runner;
pub mod transforms;
pub mod validate;

pub use error::FixError;
pub use pipeline::PipelineResult;
pub use runner::{ExternalCheck, RunOptions, RunReport};
pub use validate::ValidationReport;
