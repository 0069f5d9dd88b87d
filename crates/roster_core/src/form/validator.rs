//! Employee form validator.

use crate::model::employee::{EmployeeField, EmployeeFields};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

// Local part: ASCII alphanumerics plus RFC 5322 atext symbols. Domain: one or
// more dot-separated labels of at most 63 chars with no edge hyphens.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("valid email regex")
});

/// Raw, untrimmed values as typed into the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: String,
    pub role: String,
}

/// Field-scoped error messages; passing fields have no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    messages: BTreeMap<EmployeeField, &'static str>,
}

impl FieldErrors {
    /// Message for `field`, `None` when the field passed.
    pub fn message(&self, field: EmployeeField) -> Option<&'static str> {
        self.messages.get(&field).copied()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Failing fields with their messages, in form order.
    pub fn iter(&self) -> impl Iterator<Item = (EmployeeField, &'static str)> + '_ {
        self.messages.iter().map(|(field, message)| (*field, *message))
    }

    fn insert(&mut self, field: EmployeeField, message: &'static str) {
        self.messages.insert(field, message);
    }
}

/// Outcome of validating one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValidation {
    Valid(EmployeeFields),
    Invalid(FieldErrors),
}

/// Validates every field of `input` and returns trimmed values or all errors.
pub fn validate(input: &FormInput) -> FormValidation {
    let fields = EmployeeFields {
        first_name: input.first_name.trim().to_string(),
        last_name: input.last_name.trim().to_string(),
        email: input.email.trim().to_string(),
        department: input.department.trim().to_string(),
        role: input.role.trim().to_string(),
    };

    let mut errors = FieldErrors::default();
    if fields.first_name.is_empty() {
        errors.insert(EmployeeField::FirstName, "First Name is required");
    }
    if fields.last_name.is_empty() {
        errors.insert(EmployeeField::LastName, "Last Name is required");
    }
    if !is_valid_email(&fields.email) {
        errors.insert(EmployeeField::Email, "Please enter a valid email");
    }
    if fields.department.is_empty() {
        errors.insert(EmployeeField::Department, "Department is required");
    }
    if fields.role.is_empty() {
        errors.insert(EmployeeField::Role, "Role is required");
    }

    if errors.is_empty() {
        FormValidation::Valid(fields)
    } else {
        FormValidation::Invalid(errors)
    }
}

/// Returns whether `email` matches the accepted address syntax.
///
/// Empty input is rejected.
pub fn is_valid_email(email: &str) -> bool {
    !email.is_empty() && EMAIL_RE.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::is_valid_email;

    #[test]
    fn accepts_conservative_addresses() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last+tag@sub-domain.example.org"));
        assert!(is_valid_email("o'brien@example.ie"));
        assert!(is_valid_email("user@localhost"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("a@-bad.com"));
        assert!(!is_valid_email("a@bad-.com"));
        assert!(!is_valid_email("a@b..com"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("a@b.com."));
    }
}
