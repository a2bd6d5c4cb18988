//! Input validation.
//!
//! Every field is processed in the schema's merged order and failures are
//! collected rather than raised, so one call reports every problem with the
//! input. An [`Instance`] is only produced when nothing failed.

use std::sync::{Arc, LazyLock};

use mk_core::{Coercion, ErrorReport, ExtraFields, FieldError, IssueKind, ValidateOptions};
use regex::Regex;
use serde_json::{Map, Value};

use crate::field::FieldType;
use crate::schema::Schema;
use crate::value::{FieldValue, Instance};

static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$")
        .expect("email pattern compiles")
});

pub(crate) fn is_email_shaped(s: &str) -> bool {
    EMAIL_SHAPE.is_match(s)
}

/// Validate a key/value mapping against `schema` with default options.
///
/// # Errors
///
/// Returns an [`ErrorReport`] holding one entry per failing field.
pub fn validate(schema: &Arc<Schema>, raw: &Map<String, Value>) -> Result<Instance, ErrorReport> {
    validate_with(schema, raw, &ValidateOptions::default())
}

/// Validate a key/value mapping against `schema`.
///
/// Keys the schema does not declare are ignored unless the effective
/// extra-field policy is `Forbid`.
///
/// # Errors
///
/// Returns an [`ErrorReport`] holding one entry per failing field, plus one
/// per forbidden extra key.
pub fn validate_with(
    schema: &Arc<Schema>,
    raw: &Map<String, Value>,
    opts: &ValidateOptions,
) -> Result<Instance, ErrorReport> {
    let mut report = ErrorReport::new(schema.name());
    let mut values = Vec::with_capacity(schema.fields().len());

    for field in schema.fields() {
        let name = field.name();
        let Some(input) = raw.get(name) else {
            match field.default_value() {
                Some(default) => values.push((name.to_string(), default.clone())),
                None => report.push(FieldError::missing(name)),
            }
            continue;
        };

        match coerce(field.field_type(), input, opts) {
            Ok(value) => match field.check(&value) {
                Ok(()) => values.push((name.to_string(), value)),
                Err(message) => report.push(FieldError::constraint(name, message)),
            },
            Err(errors) => report.absorb_nested(name, errors),
        }
    }

    if opts.extra_fields_for(schema.extra_fields()) == ExtraFields::Forbid {
        for key in raw.keys().filter(|k| schema.field(k).is_none()) {
            report.push(FieldError::extra_forbidden(key.as_str()));
        }
    }

    tracing::debug!(
        schema = schema.name(),
        errors = report.len(),
        "validated input"
    );

    report
        .into_result(())
        .map(|()| Instance::new(Arc::clone(schema), values))
}

/// Validate an arbitrary JSON value. Anything but an object fails at the root.
///
/// # Errors
///
/// Returns an [`ErrorReport`]; a non-object input yields a single
/// `type_mismatch` entry at [`mk_core::ROOT_PATH`].
pub fn validate_value(
    schema: &Arc<Schema>,
    raw: &Value,
    opts: &ValidateOptions,
) -> Result<Instance, ErrorReport> {
    if let Value::Object(map) = raw {
        validate_with(schema, map, opts)
    } else {
        let mut report = ErrorReport::new(schema.name());
        report.push(FieldError::at_root(
            IssueKind::TypeMismatch,
            format!("input should be an object for {}", schema.name()),
        ));
        Err(report)
    }
}

/// Keyword-style entry point: validate `(name, value)` pairs.
///
/// ```
/// use std::sync::Arc;
/// use mk_schema::{FieldSpec, Schema, validate_pairs};
///
/// let schema = Arc::new(
///     Schema::builder("Point")
///         .field(FieldSpec::integer("x"))
///         .field(FieldSpec::integer("y"))
///         .build()
///         .unwrap(),
/// );
/// let point = validate_pairs(&schema, [("x", 1), ("y", 2)]).unwrap();
/// assert_eq!(point.get_int("y"), Some(2));
/// ```
///
/// # Errors
///
/// Same as [`validate`].
pub fn validate_pairs<I, K, V>(schema: &Arc<Schema>, pairs: I) -> Result<Instance, ErrorReport>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    let raw: Map<String, Value> = pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect();
    validate(schema, &raw)
}

/// Coerce one input value. Error paths are relative to the value itself.
fn coerce(ty: &FieldType, input: &Value, opts: &ValidateOptions) -> Result<FieldValue, Vec<FieldError>> {
    let lax = opts.coercion == Coercion::Lax;
    let scalar = |result: Result<FieldValue, String>| {
        result.map_err(|message| vec![FieldError::at_root(IssueKind::TypeMismatch, message)])
    };

    match ty {
        FieldType::String => scalar(match input {
            Value::String(s) => Ok(FieldValue::Str(s.clone())),
            _ => Err("input should be a valid string".to_string()),
        }),
        FieldType::Email => scalar(match input {
            Value::String(s) if is_email_shaped(s) => Ok(FieldValue::Str(s.clone())),
            Value::String(_) => Err("value is not a valid email address".to_string()),
            _ => Err("input should be a valid string".to_string()),
        }),
        FieldType::Integer => scalar(coerce_int(input, lax).map(FieldValue::Int)),
        FieldType::Float => scalar(coerce_float(input, lax).map(FieldValue::Float)),
        FieldType::Boolean => scalar(coerce_bool(input, lax).map(FieldValue::Bool)),
        FieldType::List(inner) => {
            let Value::Array(items) = input else {
                return scalar(Err("input should be a valid list".to_string()));
            };
            let mut out = Vec::with_capacity(items.len());
            for (idx, item) in items.iter().enumerate() {
                match coerce(inner, item, opts) {
                    Ok(value) => out.push(value),
                    Err(errors) => {
                        let at = idx.to_string();
                        return Err(errors.into_iter().map(|e| e.nested_under(&at)).collect());
                    }
                }
            }
            Ok(FieldValue::List(out))
        }
        FieldType::Model(schema) => validate_value(schema, input, opts)
            .map(FieldValue::Model)
            .map_err(|report| report.errors),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn coerce_int(input: &Value, lax: bool) -> Result<i64, String> {
    const EXPECTED: &str = "input should be a valid integer";
    match input {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            match n.as_f64() {
                Some(f) if lax && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                    Ok(f as i64)
                }
                Some(f) if f.fract() != 0.0 => {
                    Err(format!("{EXPECTED}, got a number with a fractional part"))
                }
                _ => Err(EXPECTED.to_string()),
            }
        }
        Value::String(s) if lax => s
            .trim()
            .parse::<i64>()
            .map_err(|_| format!("{EXPECTED}, unable to parse string as an integer")),
        _ => Err(EXPECTED.to_string()),
    }
}

fn coerce_float(input: &Value, lax: bool) -> Result<f64, String> {
    const EXPECTED: &str = "input should be a valid number";
    match input {
        Value::Number(n) => n.as_f64().ok_or_else(|| EXPECTED.to_string()),
        Value::String(s) if lax => match s.trim().parse::<f64>() {
            Ok(f) if f.is_finite() => Ok(f),
            _ => Err(format!("{EXPECTED}, unable to parse string as a number")),
        },
        _ => Err(EXPECTED.to_string()),
    }
}

fn coerce_bool(input: &Value, lax: bool) -> Result<bool, String> {
    const EXPECTED: &str = "input should be a valid boolean";
    match input {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) if lax => match n.as_i64() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(EXPECTED.to_string()),
        },
        Value::String(s) if lax => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(true),
            "false" | "no" | "off" | "0" => Ok(false),
            _ => Err(format!("{EXPECTED}, unable to interpret input")),
        },
        _ => Err(EXPECTED.to_string()),
    }
}
