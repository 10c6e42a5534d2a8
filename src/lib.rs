// Pedantic lint configuration for the crate.
// Most of these are reasonable but too strict for this codebase:
// - cast_possible_truncation: hunk and line counts stay far below u32 limits
// - missing_errors_doc: error handling is self-evident from Result types
// - too_many_lines: the diff parser state machine is clearer unsplit
// - module_name_repetitions: FileDiff/FilterPipeline read better qualified
// - single_match_else: match is clearer than if-let for pattern matching
#![allow(
    clippy::cast_possible_truncation,
    clippy::missing_errors_doc,
    clippy::too_many_lines,
    clippy::module_name_repetitions,
    clippy::single_match_else
)]

pub mod cli;
pub mod config;
pub mod dataset;
pub mod diff;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod sources;
