//! Schema compiler for founder and investor forms.
//!
//! [`compile`] turns an ordered field list into a [`SchemaValidator`] whose
//! [`SchemaValidator::validate`] accepts or rejects a candidate submission
//! field by field. The [`format`] predicates are shared with import column
//! inference so both paths agree on what a valid email, date or number is.

mod checks;
mod compiler;
pub mod format;
mod issue;

pub use compiler::{SchemaValidator, ValidatedData, ValidationMode, compile, compile_schema};
pub use issue::{FieldErrors, FieldIssue};
