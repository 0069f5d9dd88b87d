//! View computation over an employee snapshot.

use super::collation::{collation_key, contains_folded};
use crate::model::employee::{Employee, EmployeeField};

/// Page size used by the roster list.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Per-field substring filters; empty strings are inactive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterFields {
    pub first_name: String,
    pub department: String,
    pub role: String,
}

impl FilterFields {
    /// Builds filters from raw input, trimming and lower-casing each value.
    pub fn normalized(first_name: &str, department: &str, role: &str) -> Self {
        Self {
            first_name: first_name.trim().to_lowercase(),
            department: department.trim().to_lowercase(),
            role: role.trim().to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.first_name.is_empty() && self.department.is_empty() && self.role.is_empty()
    }

    fn matches(&self, employee: &Employee) -> bool {
        contains_folded(&employee.first_name, &self.first_name)
            && contains_folded(&employee.department, &self.department)
            && contains_folded(&employee.role, &self.role)
    }
}

/// Session-local list parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams {
    /// Free-text term matched against first name, last name and email.
    pub search_term: String,
    pub filters: FilterFields,
    pub sort_by: Option<EmployeeField>,
    /// 1-based page number; callers clamp it before computing a view.
    pub page: usize,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            filters: FilterFields::default(),
            sort_by: None,
            page: 1,
        }
    }
}

/// One computed page of results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub items: Vec<Employee>,
    /// `0` when nothing matched; no page controls are shown then.
    pub total_pages: usize,
    pub current_page: usize,
}

impl PageView {
    /// True when the page has nothing to show ("No employees found.").
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Computes the visible page for `params` over `records`.
///
/// Steps run in a fixed order: search, filters, sort, paginate. The page
/// number is used as given; a page past the end yields an empty slice while
/// `total_pages` still reports the real count.
pub fn compute_view(records: &[Employee], params: &QueryParams, page_size: usize) -> PageView {
    let page_size = page_size.max(1);
    let search = params.search_term.to_lowercase();

    let mut matched: Vec<Employee> = records
        .iter()
        .filter(|employee| matches_search(employee, &search))
        .filter(|employee| params.filters.matches(employee))
        .cloned()
        .collect();

    if let Some(field) = params.sort_by {
        // Stable: equal keys keep their snapshot order.
        matched.sort_by_cached_key(|employee| collation_key(employee.field(field)));
    }

    let total_pages = matched.len().div_ceil(page_size);
    let start = params.page.saturating_sub(1).saturating_mul(page_size);
    let items = matched
        .into_iter()
        .skip(start)
        .take(page_size)
        .collect();

    PageView {
        items,
        total_pages,
        current_page: params.page,
    }
}

fn matches_search(employee: &Employee, term: &str) -> bool {
    term.is_empty()
        || contains_folded(&employee.first_name, term)
        || contains_folded(&employee.last_name, term)
        || contains_folded(&employee.email, term)
}
