//! Global Dashboard State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Each domain keeps
//! its own `RecordStore`; components subscribe to the field they render.

use leptos::prelude::*;
use reactive_stores::Store;

use dashboard_core::domain::{
    MvpQuery, MvpRecord, ThreeDForm, ThreeDFormFilter, ThreeDTemplate, WebsiteForm, WebsiteFormQuery,
    WebsiteTemplate,
};
use dashboard_core::{ApiConfig, RecordStore};

/// Global dashboard state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct DashboardState {
    /// MVP requests and their server-side filters
    pub mvps: RecordStore<MvpRecord>,
    pub mvp_query: MvpQuery,
    /// Website templates of the niche last searched
    pub website_niche: String,
    pub website_templates: RecordStore<WebsiteTemplate>,
    pub website_forms: RecordStore<WebsiteForm>,
    pub website_form_query: WebsiteFormQuery,
    /// 3D templates of the niche last searched
    pub three_d_niche: String,
    pub three_d_templates: RecordStore<ThreeDTemplate>,
    pub three_d_forms: RecordStore<ThreeDForm>,
    pub three_d_form_filter: ThreeDFormFilter,
}

impl DashboardState {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            mvps: RecordStore::new(config.mvp_page_size),
            mvp_query: MvpQuery::first_page(config.mvp_page_size),
            website_forms: RecordStore::new(config.website_form_page_size),
            website_form_query: WebsiteFormQuery::first_page(config.website_form_page_size),
            three_d_forms: RecordStore::new(config.three_d_form_page_size),
            ..Default::default()
        }
    }
}

/// Type alias for the store
pub type DashboardStore = Store<DashboardState>;

/// Get the dashboard store from context
pub fn use_dashboard_store() -> DashboardStore {
    expect_context::<DashboardStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Look up an MVP by id in the full record set
pub fn store_find_mvp(store: &DashboardStore, id: u64) -> Option<MvpRecord> {
    store.mvps().with_untracked(|mvps| mvps.get(&id).cloned())
}

pub fn store_find_website_template(store: &DashboardStore, id: u64) -> Option<WebsiteTemplate> {
    store.website_templates().with_untracked(|templates| templates.get(&id).cloned())
}

pub fn store_find_three_d_template(store: &DashboardStore, id: u64) -> Option<ThreeDTemplate> {
    store.three_d_templates().with_untracked(|templates| templates.get(&id).cloned())
}

/// Re-apply the 3D form filter over the records already held
pub fn store_filter_three_d_forms(store: &DashboardStore) {
    let filter = store.three_d_form_filter().get_untracked().to_filter();
    store.three_d_forms().write().apply_filter(filter);
}
