//! In-memory query pipeline: search, filter, sort, paginate.
//!
//! # Responsibility
//! - Turn a record snapshot plus user parameters into one displayed page.
//!
//! # Invariants
//! - Querying never mutates its input records.
//! - The pipeline is a pure function of `(records, params, page_size)`.
//! - An empty result is data, not an error.

pub mod collation;
pub mod view;

pub use view::{compute_view, FilterFields, PageView, QueryParams, DEFAULT_PAGE_SIZE};
