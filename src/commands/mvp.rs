//! MVP Commands
//!
//! List, save and the per-record actions (milestones, activity log, links)
//! of the MVP dashboard.

use leptos::prelude::*;
use tracing::info;

use dashboard_core::domain::{Milestone, MvpRecord};
use dashboard_core::gateway::MvpGateway;
use dashboard_core::{DetailEditor, PageNavigation};

use super::settle;
use crate::store::{DashboardStateStoreFields, DashboardStore};

/// Detail editor of the MVP screen, owned by the component tree
pub type MvpEditor = RwSignal<DetailEditor<MvpRecord>>;

// ========================
// List
// ========================

/// Fetches with the current filter bar and resolves the filters the backend
/// cannot express.
pub async fn load_mvps(gateway: &MvpGateway, store: DashboardStore) -> Result<(), String> {
    let query = store.mvp_query().get_untracked();
    let ticket = store.mvps().write().begin_fetch();
    let result = gateway.list(&query).await;

    let mvps_field = store.mvps();
    let mut mvps = mvps_field.write();
    if settle(mvps.finish_fetch(ticket, result))? {
        let local = query.local_filter();
        if !local.is_empty() {
            mvps.apply_filter(local);
        }
        info!("Loaded {} MVP requests ({} shown)", mvps.records().len(), mvps.view().len());
    }
    Ok(())
}

pub async fn go_to_mvp_page(gateway: &MvpGateway, store: DashboardStore, index: u64) -> Result<(), String> {
    let navigation = store.mvps().write().go_to_page(index);
    match navigation {
        PageNavigation::Local | PageNavigation::OutOfRange => Ok(()),
        PageNavigation::Remote(request) => {
            store.mvp_query().update(|query| query.page = request);
            load_mvps(gateway, store).await
        }
    }
}

// ========================
// Detail
// ========================

/// Opens the editor on the store's current copy of `id`.
pub fn open_mvp(store: DashboardStore, editor: MvpEditor, id: u64) -> bool {
    let Some(record) = crate::store::store_find_mvp(&store, id) else {
        return false;
    };
    editor.update(|editor| {
        editor.load(&record);
    });
    true
}

/// Persists the draft (core fields, then progress and assignment when they
/// changed) and echoes the confirmed record into the list.
pub async fn save_mvp(gateway: &MvpGateway, store: DashboardStore, editor: MvpEditor) -> Result<(), String> {
    let snapshot = editor.get_untracked();
    let Some(id) = snapshot.original().map(|record| record.id) else {
        return Err("No MVP request selected".to_string());
    };
    let confirmed = snapshot.save(gateway).await.map_err(|e| e.user_message())?;
    editor.update(|editor| {
        editor.confirm(&id, confirmed, &mut store.mvps().write());
    });
    Ok(())
}

pub fn discard_mvp_edits(store: DashboardStore, editor: MvpEditor) {
    editor.update(|editor| {
        editor.discard(&store.mvps().read());
    });
}

fn selected_id(editor: MvpEditor) -> Result<u64, String> {
    editor
        .with_untracked(|editor| editor.original().map(|record| record.id))
        .ok_or_else(|| "No MVP request selected".to_string())
}

// ========================
// Milestones & Activity
// ========================

pub async fn add_mvp_milestone(
    gateway: &MvpGateway,
    store: DashboardStore,
    editor: MvpEditor,
    milestone: Milestone,
) -> Result<(), String> {
    let id = selected_id(editor)?;
    let stored = gateway.add_milestone(id, &milestone).await.map_err(|e| e.user_message())?;
    editor.update(|editor| {
        editor.commit_change(&id, &mut store.mvps().write(), |record| {
            record.push_milestone(stored.clone());
            record.touch_now();
        });
    });
    Ok(())
}

pub async fn add_mvp_activity(
    gateway: &MvpGateway,
    store: DashboardStore,
    editor: MvpEditor,
    message: String,
) -> Result<(), String> {
    let id = selected_id(editor)?;
    let activity = gateway.add_activity(id, &message).await.map_err(|e| e.user_message())?;
    editor.update(|editor| {
        editor.commit_change(&id, &mut store.mvps().write(), |record| {
            record.touch(activity.timestamp.clone());
            record.push_activity(activity.clone());
        });
    });
    Ok(())
}

// ========================
// Links
// ========================

/// Sends the draft's live and demo URLs; only those two fields are committed.
pub async fn update_mvp_links(gateway: &MvpGateway, store: DashboardStore, editor: MvpEditor) -> Result<(), String> {
    let id = selected_id(editor)?;
    let (live, demo) = editor.with_untracked(|editor| {
        editor
            .draft()
            .map(|draft| (draft.live_url.clone(), draft.demo_url.clone()))
            .unwrap_or_default()
    });
    gateway
        .update_urls(id, live.as_deref(), demo.as_deref())
        .await
        .map_err(|e| e.user_message())?;
    editor.update(|editor| {
        editor.commit_change(&id, &mut store.mvps().write(), |record| {
            record.live_url = live.clone();
            record.demo_url = demo.clone();
        });
    });
    Ok(())
}
