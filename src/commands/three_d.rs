//! 3D Website Commands
//!
//! 3D templates (per brand niche) and the 3D form submissions.

use leptos::prelude::*;
use tracing::{info, warn};

use dashboard_core::domain::{ThreeDForm, ThreeDFormFilter, ThreeDTemplate, ThreeDTemplateRequest};
use dashboard_core::gateway::ThreeDGateway;
use dashboard_core::listing::PageRequest;
use dashboard_core::{DetailEditor, ListGateway, PageNavigation};

use super::settle;
use crate::store::{store_filter_three_d_forms, DashboardStateStoreFields, DashboardStore};

pub type ThreeDTemplateEditor = RwSignal<DetailEditor<ThreeDTemplate>>;

// ========================
// Templates
// ========================

pub async fn load_three_d_templates(gateway: &ThreeDGateway, store: DashboardStore) -> Result<(), String> {
    let niche = store.three_d_niche().get_untracked();
    let ticket = store.three_d_templates().write().begin_fetch();
    let result = <ThreeDGateway as ListGateway<ThreeDTemplate>>::list(gateway, &niche).await;

    let templates_field = store.three_d_templates();
    let mut templates = templates_field.write();
    if settle(templates.finish_fetch(ticket, result))? {
        info!("Loaded {} 3D templates for niche '{}'", templates.records().len(), niche);
    }
    Ok(())
}

pub async fn create_three_d_template(
    gateway: &ThreeDGateway,
    store: DashboardStore,
    request: ThreeDTemplateRequest,
) -> Result<ThreeDTemplate, String> {
    let saved = gateway.save_template(request).await.map_err(|e| e.user_message())?;
    if store.three_d_niche().get_untracked().trim() == saved.brand_niche_id.trim() {
        load_three_d_templates(gateway, store).await?;
    }
    Ok(saved)
}

/// Saving re-posts the template. When the backend stores it under a new id
/// the niche is reloaded instead of merging.
pub async fn save_three_d_template(
    gateway: &ThreeDGateway,
    store: DashboardStore,
    editor: ThreeDTemplateEditor,
) -> Result<(), String> {
    let snapshot = editor.get_untracked();
    let Some(id) = snapshot.original().map(|record| record.id) else {
        return Err("No template selected".to_string());
    };
    let confirmed = snapshot.save(gateway).await.map_err(|e| e.user_message())?;
    let merged = editor
        .try_update(|editor| editor.confirm(&id, confirmed, &mut store.three_d_templates().write()))
        .unwrap_or(false);
    if !merged {
        warn!("3D template was stored under a new id; reloading niche");
        load_three_d_templates(gateway, store).await?;
    }
    Ok(())
}

// ========================
// Forms
// ========================

async fn fetch_three_d_forms(
    gateway: &ThreeDGateway,
    store: DashboardStore,
    request: PageRequest,
) -> Result<(), String> {
    let ticket = store.three_d_forms().write().begin_fetch();
    let result = gateway.list_forms(request).await;

    let outcome = store.three_d_forms().write().finish_fetch(ticket, result);
    if settle(outcome)? {
        store_filter_three_d_forms(&store);
        info!(
            "Loaded {} 3D form submissions",
            store.three_d_forms().with_untracked(|forms| forms.records().len())
        );
    }
    Ok(())
}

pub async fn load_three_d_forms(gateway: &ThreeDGateway, store: DashboardStore) -> Result<(), String> {
    let request = store.three_d_forms().with_untracked(|forms| forms.current_request());
    fetch_three_d_forms(gateway, store, request).await
}

/// Filters run over the submissions already held; no request is made.
pub fn filter_three_d_forms(store: DashboardStore, filter: ThreeDFormFilter) {
    store.three_d_form_filter().set(filter);
    store_filter_three_d_forms(&store);
}

pub async fn go_to_three_d_forms_page(
    gateway: &ThreeDGateway,
    store: DashboardStore,
    index: u64,
) -> Result<(), String> {
    let navigation = store.three_d_forms().write().go_to_page(index);
    match navigation {
        PageNavigation::Local | PageNavigation::OutOfRange => Ok(()),
        PageNavigation::Remote(request) => fetch_three_d_forms(gateway, store, request).await,
    }
}

pub fn find_three_d_form(store: DashboardStore, id: u64) -> Option<ThreeDForm> {
    store.three_d_forms().with_untracked(|forms| forms.get(&id).cloned())
}
