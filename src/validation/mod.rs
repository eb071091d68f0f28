//! # Package Schema Validation
//!
//! Checks `add`/`check` request bodies against the package field schema
//! before they go over the wire. Findings are collected as human-readable
//! strings; validation never fails with an `Err`.
//!
//! - Missing required fields and type mismatches are errors.
//! - Fields the schema does not know are warnings and never affect validity.
//! - Absent values (missing key or `null`) never cause a type error.

mod schema;
mod types;
mod validator;

pub use schema::{PackageField, REQUIRED_FIELDS};
pub use types::{FieldType, TypeSpec, ValueKind, is_absent, matches_type};
pub use validator::{
    BatchValidationResult, IndexedValidation, ValidationResult, validate_add_request,
    validate_package_fields, validate_packages,
};
