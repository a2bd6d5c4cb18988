//! # mk-core
//!
//! Shared types for modelkit.
//!
//! This crate provides the pieces every other modelkit crate agrees on:
//! - `ErrorReport` and its per-field `FieldError` entries
//! - `IssueKind`, the classification of a validation failure
//! - Validation policies (`ExtraFields`, `Coercion`, `ValidateOptions`)
//!
//! Schema definition, validation and serialization live in `mk-schema`.

pub mod options;
pub mod report;

pub use options::{Coercion, ExtraFields, ValidateOptions};
pub use report::{ErrorReport, FieldError, IssueKind, ROOT_PATH};
