//! Listing Layer
//!
//! Pure helpers shared by every listing screen: response normalization and
//! client-side filtering. Nothing in here performs I/O or returns errors.

mod filter;
mod page;

pub use filter::{Filter, FilterClause, Filterable, MatchMode};
pub use page::{normalize, page_count, Page, PageInfo, PageRequest};
