//! Remote Gateway Layer
//!
//! Thin request/response mappers over the dashboard backend, one per domain.
//! Every operation performs exactly one HTTP call, except the MVP save which
//! chains the calls needed to persist one draft.

mod client;
mod mvp_api;
mod three_d_api;
mod website_api;

use async_trait::async_trait;

pub use client::{encode_segment, normalize_base_url, ApiClient};
pub use mvp_api::MvpGateway;
pub use three_d_api::ThreeDGateway;
pub use website_api::WebsiteGateway;

use crate::config::ApiConfig;
use crate::error::GatewayResult;
use crate::listing::Page;

/// Fetches one page of records.
///
/// Futures are not `Send`: in the browser they run on the single UI thread.
#[async_trait(?Send)]
pub trait ListGateway<T> {
    /// Filters and paging understood by the endpoint
    type Query;

    async fn list(&self, query: &Self::Query) -> GatewayResult<Page<T>>;
}

/// Persists an edited record and returns the confirmed version.
#[async_trait(?Send)]
pub trait SaveGateway<T> {
    async fn save(&self, original: &T, draft: &T) -> GatewayResult<T>;
}

/// One gateway per domain, built from configuration
#[derive(Debug, Clone)]
pub struct Gateways {
    pub mvp: MvpGateway,
    pub website: WebsiteGateway,
    pub three_d: ThreeDGateway,
}

impl Gateways {
    pub fn from_config(config: &ApiConfig) -> GatewayResult<Self> {
        let http = reqwest::Client::new();
        Ok(Self {
            mvp: MvpGateway::new(
                ApiClient::with_http(&config.mvp_base_url, http.clone())?,
                config.mvp_page_size,
            ),
            website: WebsiteGateway::new(ApiClient::with_http(&config.website_base_url, http.clone())?),
            three_d: ThreeDGateway::new(ApiClient::with_http(&config.three_d_base_url, http)?),
        })
    }
}
