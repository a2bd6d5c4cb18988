//! Schema values and the builder that produces them.
//!
//! A schema is immutable once built. Extension is explicit composition: a
//! child names its parent, inherits the parent's fields in order, overrides
//! same-named fields in place, and appends the rest.

use std::collections::HashSet;
use std::sync::Arc;

use mk_core::ExtraFields;

use crate::error::SchemaError;
use crate::field::FieldSpec;

/// Declared shape of a data model.
#[derive(Debug)]
pub struct Schema {
    name: String,
    fields: Vec<FieldSpec>,
    parent: Option<String>,
    extra_fields: ExtraFields,
}

impl Schema {
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            name: name.into(),
            parent: None,
            fields: Vec::new(),
            extra_fields: None,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Merged fields: parent fields first, then fields added by this schema.
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name() == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(FieldSpec::name)
    }

    /// Name of the schema this one extends, if any.
    #[must_use]
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    #[must_use]
    pub const fn extra_fields(&self) -> ExtraFields {
        self.extra_fields
    }
}

/// Incremental construction of a [`Schema`].
pub struct SchemaBuilder {
    name: String,
    parent: Option<Arc<Schema>>,
    fields: Vec<FieldSpec>,
    extra_fields: Option<ExtraFields>,
}

impl SchemaBuilder {
    #[must_use]
    pub fn extends(mut self, parent: &Arc<Schema>) -> Self {
        self.parent = Some(Arc::clone(parent));
        self
    }

    #[must_use]
    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    #[must_use]
    pub fn fields(mut self, specs: impl IntoIterator<Item = FieldSpec>) -> Self {
        self.fields.extend(specs);
        self
    }

    /// Reject undeclared input keys. Inherited by children unless they set
    /// their own policy.
    #[must_use]
    pub fn forbid_extra(self) -> Self {
        self.extra_fields(ExtraFields::Forbid)
    }

    #[must_use]
    pub fn extra_fields(mut self, policy: ExtraFields) -> Self {
        self.extra_fields = Some(policy);
        self
    }

    /// Check the declaration and merge it with the parent.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::DuplicateField` if this builder declares a name
    /// twice, or `SchemaError::InvalidDefault` if a default does not conform
    /// to its field's type or is rejected by the field's own constraints.
    /// Overriding a parent field is not an error.
    pub fn build(self) -> Result<Schema, SchemaError> {
        let mut seen = HashSet::with_capacity(self.fields.len());
        for spec in &self.fields {
            if !seen.insert(spec.name()) {
                return Err(SchemaError::DuplicateField {
                    schema: self.name,
                    field: spec.name().to_string(),
                });
            }
            if let Some(default) = spec.default_value() {
                if !spec.field_type().accepts(default) {
                    return Err(SchemaError::InvalidDefault {
                        schema: self.name.clone(),
                        field: spec.name().to_string(),
                        reason: format!("expected a value of type {}", spec.field_type()),
                    });
                }
                if let Err(reason) = spec.check(default) {
                    return Err(SchemaError::InvalidDefault {
                        schema: self.name.clone(),
                        field: spec.name().to_string(),
                        reason,
                    });
                }
            }
        }

        let mut merged = self
            .parent
            .as_ref()
            .map(|p| p.fields().to_vec())
            .unwrap_or_default();
        for spec in self.fields {
            match merged.iter_mut().find(|f| f.name() == spec.name()) {
                Some(slot) => *slot = spec,
                None => merged.push(spec),
            }
        }

        let extra_fields = self
            .extra_fields
            .or_else(|| self.parent.as_ref().map(|p| p.extra_fields()))
            .unwrap_or_default();

        Ok(Schema {
            name: self.name,
            fields: merged,
            parent: self.parent.map(|p| p.name().to_string()),
            extra_fields,
        })
    }
}
