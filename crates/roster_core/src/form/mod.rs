//! Add/edit form validation.
//!
//! # Responsibility
//! - Check submitted employee fields in one pass.
//! - Report every failing field with its own message.
//!
//! # Invariants
//! - A submission is accepted only when every field passes.
//! - Accepted values are trimmed of leading/trailing whitespace.

pub mod validator;

pub use validator::{is_valid_email, validate, FieldErrors, FormInput, FormValidation};
