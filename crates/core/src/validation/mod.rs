//! Validation engine.
//!
//! Annotation parsing, pure rule evaluation, and the record walker that ties
//! them together and aggregates failures.

pub mod evaluator;
pub mod rules;
pub mod walker;
