//! # mk-schema
//!
//! Schema definition, validation, and JSON codec for modelkit.
//!
//! This crate provides:
//! - `Schema` / `SchemaBuilder` / `FieldSpec`: explicit, immutable model shapes
//!   with defaults, constraints, nesting, and parent extension
//! - `SchemaRegistry`: named store of defined schemas
//! - `validate` and friends: aggregated validation producing an `Instance`
//!   or an `ErrorReport`
//! - `to_text` / `to_mapping` / `from_text`: ordered JSON conversion
//! - `catalog`: sample `User`, `Address`, and `DetailedUser` models
//!
//! ## Example
//!
//! ```
//! use mk_schema::{catalog, from_text};
//!
//! let user = catalog::user().unwrap();
//! let sarah = from_text(
//!     &user,
//!     r#"{"name": "Sarah", "email": "sarah@example.com", "account_id": 9012}"#,
//! )
//! .unwrap();
//! assert_eq!(
//!     sarah.to_text(),
//!     r#"{"name":"Sarah","email":"sarah@example.com","account_id":9012}"#
//! );
//! ```

pub mod catalog;
pub mod codec;
pub mod constraints;
mod error;
pub mod field;
pub mod registry;
pub mod schema;
pub mod validate;
pub mod value;

pub use codec::{from_text, from_text_with, to_mapping, to_text, to_text_pretty, to_value};
pub use error::{DecodeError, RegistryError, SchemaError};
pub use field::{Constraint, FieldSpec, FieldType};
pub use mk_core::{Coercion, ErrorReport, ExtraFields, FieldError, IssueKind, ValidateOptions};
pub use registry::SchemaRegistry;
pub use schema::{Schema, SchemaBuilder};
pub use validate::{validate, validate_pairs, validate_value, validate_with};
pub use value::{FieldValue, Instance};
