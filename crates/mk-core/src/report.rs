//! Aggregated validation failures.
//!
//! A single `validate` call never stops at the first bad field. Every failure
//! becomes a [`FieldError`], and the whole batch is returned as one
//! [`ErrorReport`] so the caller sees every problem with one input at once.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Path used for failures that concern the input as a whole rather than a field.
pub const ROOT_PATH: &str = "__root__";

/// Classification of a single validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// A required field was absent from the input.
    Missing,
    /// The value could not be coerced to the declared type.
    TypeMismatch,
    /// A field constraint rejected the coerced value.
    Constraint,
    /// The input carried a key the schema does not declare.
    ExtraForbidden,
}

impl IssueKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::TypeMismatch => "type_mismatch",
            Self::Constraint => "constraint",
            Self::ExtraForbidden => "extra_forbidden",
        }
    }
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One failing field.
///
/// `path` is dotted: `account_id`, `address.city`, `addresses.1.postal_code`.
/// Errors about the input as a whole carry [`ROOT_PATH`] and set `root`; the
/// flag, not the path text, decides how they re-root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub path: String,
    pub kind: IssueKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub root: bool,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_false(flag: &bool) -> bool {
    !*flag
}

impl FieldError {
    pub fn new(path: impl Into<String>, kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            message: message.into(),
            root: false,
        }
    }

    /// A failure that concerns the whole input, e.g. a non-object document.
    pub fn at_root(kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            root: true,
            ..Self::new(ROOT_PATH, kind, message)
        }
    }

    pub fn missing(path: impl Into<String>) -> Self {
        Self::new(path, IssueKind::Missing, "field required")
    }

    pub fn type_mismatch(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(path, IssueKind::TypeMismatch, message)
    }

    pub fn constraint(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(path, IssueKind::Constraint, message)
    }

    pub fn extra_forbidden(path: impl Into<String>) -> Self {
        Self::new(path, IssueKind::ExtraForbidden, "extra fields not permitted")
    }

    /// Re-root this error below `prefix`.
    ///
    /// A root-level error takes the prefix as its whole path.
    #[must_use]
    pub fn nested_under(mut self, prefix: &str) -> Self {
        self.path = if self.root {
            prefix.to_string()
        } else {
            format!("{prefix}.{}", self.path)
        };
        self.root = false;
        self
    }
}

/// Every failure from one validation call, in the order encountered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{}", render_report(.schema, .errors))]
pub struct ErrorReport {
    /// Name of the schema the input was validated against.
    pub schema: String,
    pub errors: Vec<FieldError>,
}

impl ErrorReport {
    pub fn new(schema: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            errors: Vec::new(),
        }
    }

    pub fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    /// Fold nested failures into this report, prefixing every path.
    pub fn absorb_nested(&mut self, prefix: &str, nested: impl IntoIterator<Item = FieldError>) {
        self.errors
            .extend(nested.into_iter().map(|e| e.nested_under(prefix)));
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Paths of all failing fields, in report order.
    #[must_use]
    pub fn paths(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.path.as_str()).collect()
    }

    /// Entries whose path is exactly `path`.
    pub fn errors_at<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a FieldError> + 'a {
        self.errors.iter().filter(move |e| e.path == path)
    }

    /// `Ok(value)` when nothing was recorded, otherwise `Err(self)`.
    ///
    /// # Errors
    ///
    /// Returns the report itself when it holds at least one entry.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

fn render_report(schema: &str, errors: &[FieldError]) -> String {
    let plural = if errors.len() == 1 { "" } else { "s" };
    let mut out = format!("{} validation error{plural} for {schema}", errors.len());
    for error in errors {
        let _ = write!(out, "\n  {}: {} [{}]", error.path, error.message, error.kind);
    }
    out
}
