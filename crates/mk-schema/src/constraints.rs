//! Reusable field constraints.
//!
//! Each constructor returns a closure suitable for [`FieldSpec::constraint`].
//! A constraint applied to a value of the wrong shape rejects it.
//!
//! [`FieldSpec::constraint`]: crate::FieldSpec::constraint

use crate::value::FieldValue;

/// Integer greater than zero.
pub fn positive() -> impl Fn(&FieldValue) -> Result<(), String> + Send + Sync + 'static {
    |value| match value.as_int() {
        Some(n) if n > 0 => Ok(()),
        Some(n) => Err(format!("must be positive, got {n}")),
        None => Err("must be an integer".to_string()),
    }
}

/// Integer at least `min`.
pub fn min_int(min: i64) -> impl Fn(&FieldValue) -> Result<(), String> + Send + Sync + 'static {
    move |value| match value.as_int() {
        Some(n) if n >= min => Ok(()),
        Some(n) => Err(format!("must be at least {min}, got {n}")),
        None => Err("must be an integer".to_string()),
    }
}

/// Integer at most `max`.
pub fn max_int(max: i64) -> impl Fn(&FieldValue) -> Result<(), String> + Send + Sync + 'static {
    move |value| match value.as_int() {
        Some(n) if n <= max => Ok(()),
        Some(n) => Err(format!("must be at most {max}, got {n}")),
        None => Err("must be an integer".to_string()),
    }
}

/// String (in characters) or list (in items) at least `min` long.
pub fn min_len(min: usize) -> impl Fn(&FieldValue) -> Result<(), String> + Send + Sync + 'static {
    move |value| {
        let len = match value {
            FieldValue::Str(s) => s.chars().count(),
            FieldValue::List(items) => items.len(),
            _ => return Err("must be a string or a list".to_string()),
        };
        if len >= min {
            Ok(())
        } else {
            Err(format!("must have length at least {min}, got {len}"))
        }
    }
}

pub fn non_empty() -> impl Fn(&FieldValue) -> Result<(), String> + Send + Sync + 'static {
    let at_least_one = min_len(1);
    move |value| at_least_one(value).map_err(|_| "must not be empty".to_string())
}
