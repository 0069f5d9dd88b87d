//! Intent events and outcomes exchanged with the rendering collaborator.

use crate::form::{FieldErrors, FormInput};
use crate::model::employee::{EmployeeFields, EmployeeId};
use crate::query::PageView;

/// User intent delivered by the presentation layer, carrying literal input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    SearchChanged(String),
    FiltersApplied {
        first_name: String,
        department: String,
        role: String,
    },
    FiltersCleared,
    /// Sort select value (`firstName`, `lastName`, ...; empty for none).
    SortChanged(String),
    PageSelected(usize),
    EditRequested(EmployeeId),
    DeleteRequested(EmployeeId),
    FormSubmitted(FormInput),
    FormCancelled,
}

/// Top-level screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    List,
    Form,
}

/// What the presentation layer should do after an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Re-render the list with this page.
    Render(PageView),
    Navigate(View),
    /// Keep the form open and show these field messages.
    Rejected(FieldErrors),
}

/// Whether the form creates a record or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(EmployeeId),
}

/// Initial state of the add/edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub mode: FormMode,
    /// Prefilled values; empty in create mode.
    pub fields: EmployeeFields,
}

impl FormState {
    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Add Employee",
            FormMode::Edit(_) => "Edit Employee",
        }
    }
}
