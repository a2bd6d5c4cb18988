//! Conversion between instances, plain JSON mappings, and JSON text.
//!
//! Keys always come out in schema field order. Decoding parses first and only
//! then hands the value to the validator, so malformed text never reaches it.

use std::sync::Arc;

use mk_core::ValidateOptions;
use serde_json::{Map, Value};

use crate::error::DecodeError;
use crate::schema::Schema;
use crate::validate::validate_value;
use crate::value::{FieldValue, Instance};

/// Compact JSON text for `instance`.
#[must_use]
pub fn to_text(instance: &Instance) -> String {
    to_value(instance).to_string()
}

/// Indented JSON text for `instance`.
#[must_use]
pub fn to_text_pretty(instance: &Instance) -> String {
    format!("{:#}", to_value(instance))
}

/// Plain mapping for `instance`, with nested instances converted recursively.
#[must_use]
pub fn to_mapping(instance: &Instance) -> Map<String, Value> {
    instance
        .iter()
        .map(|(name, value)| (name.to_string(), field_to_value(value)))
        .collect()
}

#[must_use]
pub fn to_value(instance: &Instance) -> Value {
    Value::Object(to_mapping(instance))
}

fn field_to_value(value: &FieldValue) -> Value {
    match value {
        FieldValue::Str(s) => Value::String(s.clone()),
        FieldValue::Int(n) => Value::from(*n),
        FieldValue::Float(f) => Value::from(*f),
        FieldValue::Bool(b) => Value::Bool(*b),
        FieldValue::List(items) => Value::Array(items.iter().map(field_to_value).collect()),
        FieldValue::Model(instance) => to_value(instance),
    }
}

/// Parse JSON text and validate it against `schema` with default options.
///
/// # Errors
///
/// Returns `DecodeError::Parse` if the text is not well-formed JSON, or
/// `DecodeError::Invalid` with the full report if validation fails.
pub fn from_text(schema: &Arc<Schema>, text: &str) -> Result<Instance, DecodeError> {
    from_text_with(schema, text, &ValidateOptions::default())
}

/// Parse JSON text and validate it against `schema`.
///
/// # Errors
///
/// See [`from_text`].
pub fn from_text_with(
    schema: &Arc<Schema>,
    text: &str,
    opts: &ValidateOptions,
) -> Result<Instance, DecodeError> {
    let value: Value = serde_json::from_str(text)?;
    Ok(validate_value(schema, &value, opts)?)
}

impl Instance {
    /// Compact JSON text. See [`to_text`].
    #[must_use]
    pub fn to_text(&self) -> String {
        to_text(self)
    }

    /// See [`to_mapping`].
    #[must_use]
    pub fn to_mapping(&self) -> Map<String, Value> {
        to_mapping(self)
    }
}

impl From<&Instance> for Value {
    fn from(instance: &Instance) -> Self {
        to_value(instance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FieldSpec, FieldType};
    use crate::validate::validate;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn point() -> Arc<Schema> {
        Arc::new(
            Schema::builder("Point")
                .field(FieldSpec::integer("y"))
                .field(FieldSpec::integer("x"))
                .field(FieldSpec::float("weight").with_default(1.5))
                .field(
                    FieldSpec::list("tags", FieldType::String)
                        .with_default(FieldValue::List(Vec::new())),
                )
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn text_follows_field_order_not_input_order() {
        let schema = point();
        let instance = from_text(&schema, r#"{"x": 1, "y": 2, "tags": ["a"]}"#).unwrap();
        assert_eq!(
            to_text(&instance),
            r#"{"y":2,"x":1,"weight":1.5,"tags":["a"]}"#
        );
    }

    #[test]
    fn serde_serialize_matches_to_text() {
        let schema = point();
        let instance = from_text(&schema, r#"{"x": 1, "y": 2}"#).unwrap();
        assert_eq!(serde_json::to_string(&instance).unwrap(), to_text(&instance));
    }

    #[test]
    fn pretty_text_parses_back() {
        let schema = point();
        let instance = from_text(&schema, r#"{"x": 1, "y": 2}"#).unwrap();
        let pretty = to_text_pretty(&instance);
        assert!(pretty.contains('\n'));
        assert_eq!(from_text(&schema, &pretty).unwrap(), instance);
    }

    #[test]
    fn malformed_text_is_parse_error() {
        let schema = point();
        let err = from_text(&schema, r#"{"x": 1, "y": "#).unwrap_err();
        assert!(matches!(err, DecodeError::Parse(_)));
        assert!(err.report().is_none());
    }

    #[test]
    fn well_formed_invalid_text_is_report() {
        let schema = point();
        let err = from_text(&schema, r#"{"x": "one"}"#).unwrap_err();
        let report = err.report().expect("validation should have run");
        assert_eq!(report.paths(), vec!["y", "x"]);
    }

    #[test]
    fn mapping_is_plain_json() {
        let schema = point();
        let raw = json!({"x": 3, "y": 4});
        let instance = validate(&schema, raw.as_object().unwrap()).unwrap();
        assert_eq!(
            Value::from(&instance),
            json!({"y": 4, "x": 3, "weight": 1.5, "tags": []})
        );
    }
}
