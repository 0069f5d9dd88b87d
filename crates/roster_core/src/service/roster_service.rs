//! Roster list/form controller.
//!
//! # Invariants
//! - The current page resets to 1 whenever search, filter or sort changes.
//! - Invalid submissions never mutate the store.
//! - Lookup misses on edit/delete are no-ops, not errors.
//! - Persistence failures surface as [`ServiceError::Store`].

use super::events::{FormMode, FormState, Outcome, UiEvent, View};
use crate::config::RosterConfig;
use crate::form::{validate, FormInput, FormValidation};
use crate::kv::KeyValueStore;
use crate::model::employee::{Employee, EmployeeField, EmployeeFields, EmployeeId};
use crate::query::{compute_view, FilterFields, PageView, QueryParams};
use crate::store::{RecordStore, StoreError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failure of a roster operation.
#[derive(Debug)]
pub enum ServiceError {
    Store(StoreError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Session controller over one [`RecordStore`].
pub struct RosterService<S: KeyValueStore> {
    store: RecordStore<S>,
    params: QueryParams,
    page_size: usize,
}

impl<S: KeyValueStore> RosterService<S> {
    /// Creates a controller with default query parameters.
    pub fn new(store: RecordStore<S>, page_size: usize) -> Self {
        Self {
            store,
            params: QueryParams::default(),
            page_size: page_size.max(1),
        }
    }

    /// Loads the store from `kv` and applies `config`.
    pub fn open(kv: S, config: &RosterConfig) -> ServiceResult<Self> {
        let store = RecordStore::load(kv)?;
        Ok(Self::new(store, config.page_size))
    }

    pub fn store(&self) -> &RecordStore<S> {
        &self.store
    }

    pub fn params(&self) -> &QueryParams {
        &self.params
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Routes one intent to its handler.
    pub fn dispatch(&mut self, event: UiEvent) -> ServiceResult<Outcome> {
        let outcome = match event {
            UiEvent::SearchChanged(term) => Outcome::Render(self.set_search_term(&term)),
            UiEvent::FiltersApplied {
                first_name,
                department,
                role,
            } => Outcome::Render(self.apply_filters(&first_name, &department, &role)),
            UiEvent::FiltersCleared => Outcome::Render(self.clear_filters()),
            UiEvent::SortChanged(key) => Outcome::Render(self.set_sort(&key)),
            UiEvent::PageSelected(page) => Outcome::Render(self.select_page(page)),
            UiEvent::EditRequested(id) => match self.request_edit(id)? {
                View::Form => Outcome::Navigate(View::Form),
                View::List => Outcome::Render(self.current_view()),
            },
            UiEvent::DeleteRequested(id) => Outcome::Render(self.delete(id)?),
            UiEvent::FormSubmitted(input) => self.submit_form(&input)?,
            UiEvent::FormCancelled => Outcome::Navigate(self.cancel_form()?),
        };
        Ok(outcome)
    }

    /// Computes the page for the current parameters.
    pub fn current_view(&self) -> PageView {
        compute_view(self.store.all(), &self.params, self.page_size)
    }

    pub fn set_search_term(&mut self, raw: &str) -> PageView {
        self.params.search_term = raw.to_lowercase();
        self.params.page = 1;
        self.current_view()
    }

    pub fn apply_filters(&mut self, first_name: &str, department: &str, role: &str) -> PageView {
        self.params.filters = FilterFields::normalized(first_name, department, role);
        self.params.page = 1;
        self.current_view()
    }

    pub fn clear_filters(&mut self) -> PageView {
        self.params.filters = FilterFields::default();
        self.params.page = 1;
        self.current_view()
    }

    /// Sets the sort key from its select value; blank or unknown clears it.
    pub fn set_sort(&mut self, raw: &str) -> PageView {
        let sort_by = EmployeeField::parse(raw);
        if sort_by.is_none() && !raw.trim().is_empty() {
            warn!("event=sort_change module=service status=ignored reason=unknown_key");
        }
        self.params.sort_by = sort_by;
        self.params.page = 1;
        self.current_view()
    }

    /// Moves to `page`, clamped to the pages that currently exist.
    pub fn select_page(&mut self, page: usize) -> PageView {
        self.params.page = page;
        self.clamp_page();
        self.current_view()
    }

    /// Starts an edit session for `id` and returns the view to show.
    ///
    /// An unknown id leaves the user on the list.
    pub fn request_edit(&mut self, id: EmployeeId) -> ServiceResult<View> {
        if self.store.get(id).is_none() {
            warn!("event=edit_request module=service status=skipped reason=not_found id={id}");
            return Ok(View::List);
        }
        self.store.mark_editing(id)?;
        Ok(View::Form)
    }

    /// Deletes `id` if present and returns the refreshed page.
    pub fn delete(&mut self, id: EmployeeId) -> ServiceResult<PageView> {
        if self.store.remove(id)? {
            info!("event=employee_delete module=service status=ok id={id}");
        }
        self.clamp_page();
        Ok(self.current_view())
    }

    /// Builds the form's initial state from the edit-session marker.
    ///
    /// A marker naming a record that no longer exists opens an empty create
    /// form; the stale marker stays until save or cancel clears it.
    pub fn open_form(&self) -> ServiceResult<FormState> {
        match self.edit_target()? {
            Some(employee) => Ok(FormState {
                mode: FormMode::Edit(employee.id),
                fields: employee.fields(),
            }),
            None => Ok(FormState {
                mode: FormMode::Create,
                fields: EmployeeFields::default(),
            }),
        }
    }

    /// Validates and saves a form submission.
    ///
    /// Returns [`Outcome::Rejected`] with every field message when invalid,
    /// otherwise merges, persists and navigates back to the list.
    pub fn submit_form(&mut self, input: &FormInput) -> ServiceResult<Outcome> {
        let fields = match validate(input) {
            FormValidation::Valid(fields) => fields,
            FormValidation::Invalid(errors) => {
                info!(
                    "event=form_submit module=service status=rejected error_count={}",
                    errors.len()
                );
                return Ok(Outcome::Rejected(errors));
            }
        };

        let existing_id = self.edit_target()?.map(|employee| employee.id);
        self.merge_submission(existing_id, fields)?;
        Ok(Outcome::Navigate(View::List))
    }

    /// Writes validated `fields` into the store.
    ///
    /// With `existing_id` the matching record is replaced (a miss is a
    /// no-op); without it a new record with a fresh id is appended. Either
    /// way the edit marker is cleared afterwards.
    pub fn merge_submission(
        &mut self,
        existing_id: Option<EmployeeId>,
        fields: EmployeeFields,
    ) -> ServiceResult<Employee> {
        let employee = match existing_id {
            Some(id) => {
                let employee = Employee::from_fields(id, fields);
                if self.store.replace(employee.clone())? {
                    info!("event=employee_update module=service status=ok id={id}");
                }
                employee
            }
            None => {
                let id = self.store.allocate_id()?;
                let employee = Employee::from_fields(id, fields);
                self.store.upsert(employee.clone())?;
                info!("event=employee_create module=service status=ok id={id}");
                employee
            }
        };

        self.store.clear_editing()?;
        Ok(employee)
    }

    /// Abandons the form and drops the edit-session marker.
    pub fn cancel_form(&mut self) -> ServiceResult<View> {
        self.store.clear_editing()?;
        Ok(View::List)
    }

    fn edit_target(&self) -> ServiceResult<Option<&Employee>> {
        let Some(id) = self.store.editing_id()? else {
            return Ok(None);
        };
        let target = self.store.get(id);
        if target.is_none() {
            warn!("event=form_open module=service status=fallback reason=edit_target_missing id={id}");
        }
        Ok(target)
    }

    fn clamp_page(&mut self) {
        let total_pages = compute_view(self.store.all(), &self.params, self.page_size).total_pages;
        self.params.page = self.params.page.clamp(1, total_pages.max(1));
    }
}
