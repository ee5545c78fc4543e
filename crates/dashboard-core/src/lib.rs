//! Venture Dashboard Core
//!
//! Layered architecture:
//! - domain: records served by the backend (MVP requests, website and 3D
//!   templates, form submissions) and their edits
//! - listing: response normalization and client-side filtering
//! - store / editor: per-domain list state and the detail draft
//! - gateway: REST calls against the dashboard backend

pub mod config;
pub mod domain;
pub mod editor;
pub mod error;
pub mod gateway;
pub mod listing;
pub mod store;


pub use config::{ApiConfig, ConfigError};
pub use editor::DetailEditor;
pub use error::{GatewayError, GatewayResult};
pub use gateway::{Gateways, ListGateway, SaveGateway};
pub use store::{FetchOutcome, FetchTicket, LoadState, PageNavigation, RecordStore};

/// Fetches through `gateway` and applies the response to `store`.
///
/// Holds the store for the whole request. Callers keeping the store behind a
/// reactive signal call `begin_fetch` and `finish_fetch` themselves.
pub async fn refresh<T, G>(store: &mut RecordStore<T>, gateway: &G, query: &G::Query) -> FetchOutcome
where
    T: domain::Record + listing::Filterable,
    G: ListGateway<T> + ?Sized,
{
    let ticket = store.begin_fetch();
    let result = gateway.list(query).await;
    store.finish_fetch(ticket, result)
}
