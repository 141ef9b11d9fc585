//! Record operations: list, get, sort, create, update, delete

pub mod service;
pub mod sort;

pub use service::PatientService;
pub use sort::{sort_views, SortKey, SortOrder};
