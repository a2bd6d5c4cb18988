//! Validation policy settings.

use mk_core::{Coercion, ExtraFields, ValidateOptions};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ValidationConfig {
    /// `"ignore"` (default) or `"forbid"` undeclared input keys.
    ///
    /// Overrides every schema's own policy when set to `"forbid"`.
    #[serde(default)]
    pub extra_fields: ExtraFields,

    /// `"lax"` (default) or `"strict"` primitive coercion.
    #[serde(default)]
    pub coercion: Coercion,
}

impl ValidationConfig {
    /// Options to hand to the validator.
    ///
    /// `Ignore` defers to each schema's policy so schemas that forbid extra
    /// keys keep doing so.
    #[must_use]
    pub fn options(&self) -> ValidateOptions {
        let opts = ValidateOptions {
            coercion: self.coercion,
            extra_fields: None,
        };
        match self.extra_fields {
            ExtraFields::Forbid => opts.with_extra_fields(ExtraFields::Forbid),
            ExtraFields::Ignore => opts,
        }
    }
}
