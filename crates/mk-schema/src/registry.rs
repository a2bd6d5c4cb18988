//! Named schema registry.
//!
//! The `SchemaRegistry` maps model names to immutable [`Schema`] handles.
//! Definition needs `&mut self`; once populated, the registry is read through
//! shared references, so lookups and validation need no locking.

use std::collections::HashMap;
use std::sync::Arc;

use mk_core::ValidateOptions;
use serde_json::{Map, Value};

use crate::codec::from_text_with;
use crate::error::{RegistryError, SchemaError};
use crate::field::FieldSpec;
use crate::schema::Schema;
use crate::validate::validate_with;
use crate::value::Instance;

/// Central store of defined schemas, keyed by name.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, Arc<Schema>>,
}

impl SchemaRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Define `name` from `fields`, optionally extending the registered
    /// schema `parent`, and register it.
    ///
    /// Redefining an existing name replaces the prior definition. Schemas
    /// built from the old definition keep their own handle to it.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if `parent` is not registered, or any
    /// error from [`SchemaBuilder::build`](crate::SchemaBuilder::build).
    pub fn define(
        &mut self,
        name: &str,
        fields: Vec<FieldSpec>,
        parent: Option<&str>,
    ) -> Result<Arc<Schema>, SchemaError> {
        let mut builder = Schema::builder(name).fields(fields);
        if let Some(parent_name) = parent {
            let parent = self
                .get(parent_name)
                .ok_or_else(|| SchemaError::NotFound(parent_name.to_string()))?;
            builder = builder.extends(parent);
        }
        Ok(self.register(builder.build()?))
    }

    /// Register an already-built schema under its own name.
    pub fn register(&mut self, schema: Schema) -> Arc<Schema> {
        self.insert(Arc::new(schema))
    }

    /// Register a shared schema handle under its own name.
    pub fn insert(&mut self, schema: Arc<Schema>) -> Arc<Schema> {
        let name = schema.name().to_string();
        if self
            .schemas
            .insert(name.clone(), Arc::clone(&schema))
            .is_some()
        {
            tracing::warn!(schema = %name, "schema redefined; replacing prior definition");
        } else {
            tracing::debug!(
                schema = %name,
                fields = schema.fields().len(),
                "schema defined"
            );
        }
        schema
    }

    /// Get a schema by name. Returns `None` if not found.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<Schema>> {
        self.schemas.get(name)
    }

    /// Validate a mapping against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::Schema` if the schema name is unknown, or
    /// `RegistryError::Invalid` if validation produces errors.
    pub fn validate(&self, name: &str, raw: &Map<String, Value>) -> Result<Instance, RegistryError> {
        self.validate_with(name, raw, &ValidateOptions::default())
    }

    /// [`validate`](Self::validate) with explicit options.
    ///
    /// # Errors
    ///
    /// See [`validate`](Self::validate).
    pub fn validate_with(
        &self,
        name: &str,
        raw: &Map<String, Value>,
        opts: &ValidateOptions,
    ) -> Result<Instance, RegistryError> {
        let schema = self.lookup(name)?;
        Ok(validate_with(schema, raw, opts)?)
    }

    /// Decode JSON text against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::Schema` if the schema name is unknown, or
    /// `RegistryError::Decode` if parsing or validation fails.
    pub fn from_text(
        &self,
        name: &str,
        text: &str,
        opts: &ValidateOptions,
    ) -> Result<Instance, RegistryError> {
        let schema = self.lookup(name)?;
        Ok(from_text_with(schema, text, opts)?)
    }

    /// List all registered schema names.
    #[must_use]
    pub fn list(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemas.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered schemas.
    #[must_use]
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }

    fn lookup(&self, name: &str) -> Result<&Arc<Schema>, SchemaError> {
        self.get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn registry() -> SchemaRegistry {
        let mut reg = SchemaRegistry::new();
        catalog::register_all(&mut reg).unwrap();
        reg
    }

    #[test]
    fn registry_has_expected_count() {
        assert_eq!(registry().schema_count(), 3);
    }

    #[test]
    fn registry_list_is_sorted() {
        let reg = registry();
        let names = reg.list();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn get_nonexistent_schema() {
        assert!(registry().get("nonexistent").is_none());
    }

    #[test]
    fn define_with_parent_merges_fields() {
        let mut reg = registry();
        let schema = reg
            .define(
                "Admin",
                vec![FieldSpec::string("role").with_default("admin")],
                Some(catalog::USER),
            )
            .unwrap();
        let names: Vec<_> = schema.field_names().collect();
        assert_eq!(names, vec!["name", "email", "account_id", "role"]);
        assert!(reg.get("Admin").is_some());
    }

    #[test]
    fn define_with_unknown_parent_fails() {
        let mut reg = SchemaRegistry::new();
        let err = reg
            .define("Orphan", vec![FieldSpec::string("x")], Some("Missing"))
            .unwrap_err();
        assert_eq!(err, SchemaError::NotFound("Missing".into()));
        assert_eq!(reg.schema_count(), 0);
    }

    #[test]
    fn define_duplicate_field_fails_without_registering() {
        let mut reg = SchemaRegistry::new();
        let err = reg
            .define(
                "Dup",
                vec![FieldSpec::string("a"), FieldSpec::integer("a")],
                None,
            )
            .unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateField { .. }));
        assert!(reg.get("Dup").is_none());
    }

    #[test]
    fn redefinition_replaces_prior_schema() {
        let mut reg = SchemaRegistry::new();
        let old = reg.define("Thing", vec![FieldSpec::string("a")], None).unwrap();
        reg.define("Thing", vec![FieldSpec::integer("b")], None).unwrap();

        assert_eq!(reg.schema_count(), 1);
        let current = reg.get("Thing").unwrap();
        assert!(current.field("b").is_some());
        assert!(current.field("a").is_none());
        // Handles to the old definition stay valid.
        assert!(old.field("a").is_some());
    }

    #[test]
    fn validate_valid_user() {
        let reg = registry();
        let raw = json!({"name": "Ali", "email": "ali@gmail.com", "account_id": 5678});
        let user = reg.validate(catalog::USER, raw.as_object().unwrap()).unwrap();
        assert_eq!(user.get_str("name"), Some("Ali"));
    }

    #[test]
    fn validate_nonexistent_schema_returns_not_found() {
        let reg = registry();
        let result = reg.validate("bogus", &Map::new());
        assert!(matches!(
            result,
            Err(RegistryError::Schema(SchemaError::NotFound(_)))
        ));
    }

    #[test]
    fn validate_reports_invalid_input() {
        let reg = registry();
        let result = reg.validate(catalog::USER, &Map::new());
        let Err(RegistryError::Invalid(report)) = result else {
            panic!("expected Invalid");
        };
        assert_eq!(report.paths(), vec!["name", "email", "account_id"]);
    }

    #[test]
    fn from_text_uses_named_schema() {
        let reg = registry();
        let err = reg
            .from_text(catalog::ADDRESS, "{not json", &ValidateOptions::default())
            .unwrap_err();
        assert!(matches!(err, RegistryError::Decode(_)));
    }
}
