//! Employee record and seed data.
//!
//! # Responsibility
//! - Define the record shape shared by the store, query and form layers.
//! - Keep the persisted JSON field naming (`firstName`, ...) in one place.
//!
//! # Invariants
//! - `id` is a positive integer and never reused within a session.
//! - Field values are stored exactly as validated (already trimmed).

use serde::{Deserialize, Serialize};

/// Stable integer identifier for an employee.
///
/// Every comparison goes through this one type, so ids read from the edit
/// marker are parsed once at the boundary instead of compared loosely.
pub type EmployeeId = u64;

/// Canonical employee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: String,
    pub role: String,
}

/// Validated, trimmed field values without identity.
///
/// Produced by the form validator and turned into an [`Employee`] once the
/// merge step knows which id applies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: String,
    pub role: String,
}

impl Employee {
    /// Builds a record from an id and validated fields.
    pub fn from_fields(id: EmployeeId, fields: EmployeeFields) -> Self {
        Self {
            id,
            first_name: fields.first_name,
            last_name: fields.last_name,
            email: fields.email,
            department: fields.department,
            role: fields.role,
        }
    }

    /// Returns the editable field values of this record.
    pub fn fields(&self) -> EmployeeFields {
        EmployeeFields {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            department: self.department.clone(),
            role: self.role.clone(),
        }
    }

    /// Returns the value of one string field.
    pub fn field(&self, field: EmployeeField) -> &str {
        match field {
            EmployeeField::FirstName => &self.first_name,
            EmployeeField::LastName => &self.last_name,
            EmployeeField::Email => &self.email,
            EmployeeField::Department => &self.department,
            EmployeeField::Role => &self.role,
        }
    }
}

/// Names one string field of an [`Employee`].
///
/// Used as the sort key and as the key of form error maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EmployeeField {
    FirstName,
    LastName,
    Email,
    Department,
    Role,
}

impl EmployeeField {
    /// All fields in form display order.
    pub const ALL: [EmployeeField; 5] = [
        EmployeeField::FirstName,
        EmployeeField::LastName,
        EmployeeField::Email,
        EmployeeField::Department,
        EmployeeField::Role,
    ];

    /// Wire name matching the persisted JSON key.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::Department => "department",
            Self::Role => "role",
        }
    }

    /// Parses a wire name; unknown names yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "firstName" => Some(Self::FirstName),
            "lastName" => Some(Self::LastName),
            "email" => Some(Self::Email),
            "department" => Some(Self::Department),
            "role" => Some(Self::Role),
            _ => None,
        }
    }
}

/// Returns the fixed roster used when nothing usable is persisted.
pub fn seed_employees() -> Vec<Employee> {
    vec![
        Employee {
            id: 1,
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: "john.doe@example.com".to_string(),
            department: "HR".to_string(),
            role: "Manager".to_string(),
        },
        Employee {
            id: 2,
            first_name: "Jane".to_string(),
            last_name: "Smith".to_string(),
            email: "jane.smith@example.com".to_string(),
            department: "Engineering".to_string(),
            role: "Developer".to_string(),
        },
        Employee {
            id: 3,
            first_name: "Michael".to_string(),
            last_name: "Brown".to_string(),
            email: "michael.brown@example.com".to_string(),
            department: "Marketing".to_string(),
            role: "Executive".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::{seed_employees, EmployeeField};
    use std::collections::HashSet;

    #[test]
    fn seed_ids_are_unique_and_positive() {
        let seed = seed_employees();
        let ids: HashSet<_> = seed.iter().map(|employee| employee.id).collect();
        assert_eq!(ids.len(), seed.len());
        assert!(seed.iter().all(|employee| employee.id > 0));
    }

    #[test]
    fn field_wire_names_parse_back() {
        for field in EmployeeField::ALL {
            assert_eq!(EmployeeField::parse(field.wire_name()), Some(field));
        }
        assert_eq!(EmployeeField::parse(""), None);
        assert_eq!(EmployeeField::parse("salary"), None);
    }
}
