//! Field declarations.

use std::fmt;
use std::sync::Arc;

use crate::schema::Schema;
use crate::value::FieldValue;

/// A field constraint: `Ok(())` accepts the coerced value, `Err(message)` rejects it.
pub type Constraint = Arc<dyn Fn(&FieldValue) -> Result<(), String> + Send + Sync>;

/// Declared type of a field.
#[derive(Debug, Clone)]
pub enum FieldType {
    String,
    Integer,
    Float,
    Boolean,
    /// A string that must be shaped like `local@domain.tld`.
    Email,
    List(Box<FieldType>),
    /// Reference to another schema. Values are nested instances.
    Model(Arc<Schema>),
}

impl FieldType {
    #[must_use]
    pub fn list(inner: Self) -> Self {
        Self::List(Box::new(inner))
    }

    #[must_use]
    pub fn model(schema: &Arc<Schema>) -> Self {
        Self::Model(Arc::clone(schema))
    }

    /// Whether an already-built value conforms to this type.
    ///
    /// Used to check declared defaults; input coercion lives in the validator.
    #[must_use]
    pub fn accepts(&self, value: &FieldValue) -> bool {
        match (self, value) {
            (Self::String, FieldValue::Str(_))
            | (Self::Integer, FieldValue::Int(_))
            | (Self::Boolean, FieldValue::Bool(_)) => true,
            (Self::Float, FieldValue::Float(f)) => f.is_finite(),
            (Self::Email, FieldValue::Str(s)) => crate::validate::is_email_shaped(s),
            (Self::List(inner), FieldValue::List(items)) => items.iter().all(|v| inner.accepts(v)),
            (Self::Model(schema), FieldValue::Model(instance)) => {
                instance.schema_name() == schema.name()
            }
            _ => false,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("string"),
            Self::Integer => f.write_str("integer"),
            Self::Float => f.write_str("float"),
            Self::Boolean => f.write_str("boolean"),
            Self::Email => f.write_str("email"),
            Self::List(inner) => write!(f, "list[{inner}]"),
            Self::Model(schema) => f.write_str(schema.name()),
        }
    }
}

/// One field's declaration within a schema.
///
/// A field without a default is required.
#[derive(Clone)]
pub struct FieldSpec {
    name: String,
    ty: FieldType,
    default: Option<FieldValue>,
    constraints: Vec<Constraint>,
    description: Option<String>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            ty,
            default: None,
            constraints: Vec::new(),
            description: None,
        }
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::String)
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Integer)
    }

    pub fn float(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Float)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Boolean)
    }

    pub fn email(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Email)
    }

    pub fn list(name: impl Into<String>, inner: FieldType) -> Self {
        Self::new(name, FieldType::list(inner))
    }

    pub fn model(name: impl Into<String>, schema: &Arc<Schema>) -> Self {
        Self::new(name, FieldType::model(schema))
    }

    /// Make the field optional, filling `value` when the input omits it.
    #[must_use]
    pub fn with_default(mut self, value: impl Into<FieldValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Attach a constraint. Constraints run in attachment order after
    /// coercion; the first rejection is the field's error.
    #[must_use]
    pub fn constraint<F>(mut self, check: F) -> Self
    where
        F: Fn(&FieldValue) -> Result<(), String> + Send + Sync + 'static,
    {
        self.constraints.push(Arc::new(check));
        self
    }

    #[must_use]
    pub fn describe(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn field_type(&self) -> &FieldType {
        &self.ty
    }

    #[must_use]
    pub const fn default_value(&self) -> Option<&FieldValue> {
        self.default.as_ref()
    }

    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.default.is_none()
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn has_constraints(&self) -> bool {
        !self.constraints.is_empty()
    }

    pub(crate) fn check(&self, value: &FieldValue) -> Result<(), String> {
        self.constraints.iter().try_for_each(|check| check(value))
    }
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("name", &self.name)
            .field("ty", &format_args!("{}", self.ty))
            .field("default", &self.default)
            .field("constraints", &self.constraints.len())
            .field("description", &self.description)
            .finish()
    }
}
