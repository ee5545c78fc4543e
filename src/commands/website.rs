//! Website Commands
//!
//! Website templates (per niche) and the website form submissions.

use leptos::prelude::*;
use tracing::info;

use dashboard_core::domain::{WebsiteForm, WebsiteFormQuery, WebsiteTemplate, WebsiteTemplateRequest};
use dashboard_core::gateway::WebsiteGateway;
use dashboard_core::listing::PageRequest;
use dashboard_core::{DetailEditor, ListGateway, PageNavigation};

use super::settle;
use crate::store::{DashboardStateStoreFields, DashboardStore};

pub type WebsiteTemplateEditor = RwSignal<DetailEditor<WebsiteTemplate>>;

// ========================
// Templates
// ========================

/// Lists the templates of the niche held in the store.
pub async fn load_website_templates(gateway: &WebsiteGateway, store: DashboardStore) -> Result<(), String> {
    let niche = store.website_niche().get_untracked();
    let ticket = store.website_templates().write().begin_fetch();
    let result = <WebsiteGateway as ListGateway<WebsiteTemplate>>::list(gateway, &niche).await;

    let templates_field = store.website_templates();
    let mut templates = templates_field.write();
    if settle(templates.finish_fetch(ticket, result))? {
        info!("Loaded {} website templates for niche '{}'", templates.records().len(), niche);
    }
    Ok(())
}

/// Creates a template; the list is reloaded when it belongs to the niche on
/// screen.
pub async fn create_website_template(
    gateway: &WebsiteGateway,
    store: DashboardStore,
    request: WebsiteTemplateRequest,
) -> Result<(), String> {
    let niche = request.niche_id.trim().to_string();
    gateway.save_template(request).await.map_err(|e| e.user_message())?;
    if store.website_niche().get_untracked().trim() == niche {
        load_website_templates(gateway, store).await?;
    }
    Ok(())
}

pub async fn save_website_template(
    gateway: &WebsiteGateway,
    store: DashboardStore,
    editor: WebsiteTemplateEditor,
) -> Result<(), String> {
    let snapshot = editor.get_untracked();
    let Some(id) = snapshot.original().map(|record| record.id) else {
        return Err("No template selected".to_string());
    };
    let confirmed = snapshot.save(gateway).await.map_err(|e| e.user_message())?;
    editor.update(|editor| {
        editor.confirm(&id, confirmed, &mut store.website_templates().write());
    });
    Ok(())
}

// ========================
// Forms
// ========================

/// Fetches the page described by the stored query.
pub async fn load_website_forms(gateway: &WebsiteGateway, store: DashboardStore) -> Result<(), String> {
    let query = store.website_form_query().get_untracked();
    let ticket = store.website_forms().write().begin_fetch();
    let result = gateway.list_forms(&query).await;

    let forms_field = store.website_forms();
    let mut forms = forms_field.write();
    if settle(forms.finish_fetch(ticket, result))? {
        // An unpaged answer means the filters were not applied server-side.
        let unpaged = forms.records().len() as u64 >= forms.server_total();
        let local = query.local_filter();
        if unpaged && !local.is_empty() {
            forms.apply_filter(local);
        }
        info!("Loaded website forms page {} ({} records)", query.page.index, forms.records().len());
    }
    Ok(())
}

/// New filters always restart from the first page.
pub async fn search_website_forms(
    gateway: &WebsiteGateway,
    store: DashboardStore,
    filters: WebsiteFormQuery,
) -> Result<(), String> {
    let size = store.website_forms().with_untracked(|forms| forms.page_size());
    store
        .website_form_query()
        .set(filters.at_page(PageRequest::first(size)));
    load_website_forms(gateway, store).await
}

pub async fn go_to_website_forms_page(
    gateway: &WebsiteGateway,
    store: DashboardStore,
    index: u64,
) -> Result<(), String> {
    let navigation = store.website_forms().write().go_to_page(index);
    match navigation {
        PageNavigation::Local | PageNavigation::OutOfRange => Ok(()),
        PageNavigation::Remote(request) => {
            store.website_form_query().update(|query| query.page = request);
            load_website_forms(gateway, store).await
        }
    }
}

pub fn find_website_form(store: DashboardStore, id: u64) -> Option<WebsiteForm> {
    store.website_forms().with_untracked(|forms| forms.get(&id).cloned())
}
