//! Core domain logic for the employee roster.
//! This crate owns record persistence, the list query pipeline and form
//! validation; rendering stays with the host.

pub mod config;
pub mod db;
pub mod form;
pub mod kv;
pub mod logging;
pub mod model;
pub mod query;
pub mod service;
pub mod store;

pub use config::{ConfigError, RosterConfig};
pub use form::{validate, FieldErrors, FormInput, FormValidation};
pub use kv::{KeyValueStore, KvError, KvResult, SqliteKeyValueStore};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::employee::{seed_employees, Employee, EmployeeField, EmployeeFields, EmployeeId};
pub use query::{compute_view, FilterFields, PageView, QueryParams, DEFAULT_PAGE_SIZE};
pub use service::{
    FormMode, FormState, Outcome, RosterService, ServiceError, ServiceResult, UiEvent, View,
};
pub use store::{RecordStore, StoreError, StoreResult, UpsertOutcome};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
