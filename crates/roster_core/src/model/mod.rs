//! Employee domain model.
//!
//! # Responsibility
//! - Define the canonical employee record and its persisted wire shape.
//! - Provide the fixed seed roster used when no persisted state exists.
//!
//! # Invariants
//! - Every record is identified by one integer `EmployeeId`.
//! - Identifiers are unique within a store.

pub mod employee;
