//! Roster use-case services.
//!
//! # Responsibility
//! - Hold session query state and turn user intents into views.
//! - Orchestrate validation, merge and persistence for form submissions.
//! - Keep the rendering collaborator decoupled from store and query details.

pub mod events;
pub mod roster_service;

pub use events::{FormMode, FormState, Outcome, UiEvent, View};
pub use roster_service::{RosterService, ServiceError, ServiceResult};
