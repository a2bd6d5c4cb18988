//! Validation policies.
//!
//! These are plain data so that `mk-config` can load them from TOML or the
//! environment and hand them straight to the validator.

use serde::{Deserialize, Serialize};

/// What to do with input keys a schema does not declare.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtraFields {
    /// Undeclared keys are dropped silently.
    #[default]
    Ignore,
    /// Every undeclared key is reported as an `extra_forbidden` error.
    Forbid,
}

/// How far primitive coercion goes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Coercion {
    /// Numeric strings become numbers, `"yes"`/`1` become booleans, and
    /// integral floats become integers.
    #[default]
    Lax,
    /// The JSON type must already match the declared type.
    Strict,
}

/// Per-call validation options.
///
/// `extra_fields: None` defers to the schema's own policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateOptions {
    #[serde(default)]
    pub coercion: Coercion,
    #[serde(default)]
    pub extra_fields: Option<ExtraFields>,
}

impl ValidateOptions {
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            coercion: Coercion::Strict,
            extra_fields: None,
        }
    }

    #[must_use]
    pub const fn with_extra_fields(mut self, policy: ExtraFields) -> Self {
        self.extra_fields = Some(policy);
        self
    }

    /// Policy in force for a schema whose own setting is `schema_policy`.
    #[must_use]
    pub fn extra_fields_for(&self, schema_policy: ExtraFields) -> ExtraFields {
        self.extra_fields.unwrap_or(schema_policy)
    }
}
