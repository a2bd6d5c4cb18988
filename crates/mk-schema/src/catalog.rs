//! Ready-made sample models: `User`, `Address`, and `DetailedUser`.
//!
//! `DetailedUser` extends `User` and nests a list of `Address` values, which
//! makes the catalog a compact exercise of extension, defaults, constraints,
//! and nesting together.

use std::sync::Arc;

use crate::constraints;
use crate::error::SchemaError;
use crate::field::{FieldSpec, FieldType};
use crate::registry::SchemaRegistry;
use crate::schema::Schema;
use crate::value::FieldValue;

pub const USER: &str = "User";
pub const ADDRESS: &str = "Address";
pub const DETAILED_USER: &str = "DetailedUser";

/// `User { name, email, account_id > 0 }`.
///
/// # Errors
///
/// Never in practice; the definition is fixed and well-formed.
pub fn user() -> Result<Arc<Schema>, SchemaError> {
    let schema = Schema::builder(USER)
        .field(FieldSpec::string("name"))
        .field(FieldSpec::email("email"))
        .field(
            FieldSpec::integer("account_id")
                .constraint(constraints::positive())
                .describe("External account number"),
        )
        .build()?;
    Ok(Arc::new(schema))
}

/// # Errors
///
/// Never in practice; the definition is fixed and well-formed.
pub fn address() -> Result<Arc<Schema>, SchemaError> {
    let schema = Schema::builder(ADDRESS)
        .fields(
            ["street", "city", "country", "postal_code"]
                .into_iter()
                .map(FieldSpec::string),
        )
        .build()?;
    Ok(Arc::new(schema))
}

/// `User` plus `age >= 18`, `is_active = true`, and `addresses = []`.
///
/// # Errors
///
/// Never in practice; the definition is fixed and well-formed.
pub fn detailed_user(
    user: &Arc<Schema>,
    address: &Arc<Schema>,
) -> Result<Arc<Schema>, SchemaError> {
    let schema = Schema::builder(DETAILED_USER)
        .extends(user)
        .field(FieldSpec::integer("age").constraint(|value: &FieldValue| {
            match value.as_int() {
                Some(age) if age < 18 => {
                    Err(format!("user must be at least 18 years old, got {age}"))
                }
                _ => Ok(()),
            }
        }))
        .field(FieldSpec::boolean("is_active").with_default(true))
        .field(
            FieldSpec::new("addresses", FieldType::list(FieldType::model(address)))
                .with_default(FieldValue::List(Vec::new())),
        )
        .build()?;
    Ok(Arc::new(schema))
}

/// Define every catalog model in `registry`.
///
/// # Errors
///
/// Propagates any definition error.
pub fn register_all(registry: &mut SchemaRegistry) -> Result<(), SchemaError> {
    let user = user()?;
    let address = address()?;
    let detailed = detailed_user(&user, &address)?;
    for schema in [user, address, detailed] {
        registry.insert(schema);
    }
    Ok(())
}
