//! MVP Dashboard Component
//!
//! Stats cards, server-side filter bar and the paged request table. Picking
//! a row opens the detail editor.

use leptos::prelude::*;
use leptos::task::spawn_local;

use dashboard_core::domain::{AssigneeFilter, MvpQuery, MvpStats, MvpStatus, Priority};

use crate::commands::{self, MvpEditor};
use crate::components::{LoadStatus, MvpDetail, PaginationBar};
use crate::context::use_session;
use crate::store::{use_dashboard_store, DashboardStateStoreFields};

#[component]
pub fn MvpDashboard() -> impl IntoView {
    let session = use_session();
    let store = use_dashboard_store();
    let editor: MvpEditor = RwSignal::new(Default::default());

    let reload = move || {
        let gateways = session.gateways();
        spawn_local(async move {
            if let Err(message) = commands::load_mvps(&gateways.mvp, store).await {
                session.error("MVP requests", message);
            }
        });
    };

    // Initial load
    Effect::new(move |_| reload());

    let stats = Memo::new(move |_| store.mvps().with(|m| MvpStats::from_records(m.records(), m.server_total())));

    let go_to_page = Callback::new(move |index: u64| {
        let gateways = session.gateways();
        spawn_local(async move {
            if let Err(message) = commands::go_to_mvp_page(&gateways.mvp, store, index).await {
                session.error("MVP requests", message);
            }
        });
    });

    view! {
        <section class="mvp-dashboard">
            <div class="stats-cards">
                <StatCard label="Total" value=Signal::derive(move || stats.get().total.to_string()) />
                <StatCard label="Submitted" value=Signal::derive(move || stats.get().submitted.to_string()) />
                <StatCard label="In Progress" value=Signal::derive(move || stats.get().in_progress.to_string()) />
                <StatCard label="Completed" value=Signal::derive(move || stats.get().completed.to_string()) />
                <StatCard label="Paid" value=Signal::derive(move || stats.get().paid.to_string()) />
                <StatCard label="Unpaid" value=Signal::derive(move || stats.get().unpaid.to_string()) />
                <StatCard label="Revenue" value=Signal::derive(move || format!("${:.2}", stats.get().total_revenue)) />
            </div>

            <MvpFilterBar on_apply=Callback::new(move |_: ()| reload()) />

            <LoadStatus
                state=Signal::derive(move || store.mvps().with(|m| m.state().clone()))
                on_retry=Callback::new(move |_: ()| reload())
            />

            <div class="mvp-layout">
                <table class="record-table">
                    <thead>
                        <tr>
                            <th>"Request"</th>
                            <th>"Title"</th>
                            <th>"Priority"</th>
                            <th>"Status"</th>
                            <th>"Progress"</th>
                            <th>"Assigned"</th>
                            <th>"Paid"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || store.mvps().with(|m| m.visible().to_vec()).into_iter().map(|record| {
                            let id = record.id;
                            let row_class = move || {
                                let selected = editor.with(|e| e.original().map(|r| r.id)) == Some(id);
                                if selected { "record-row selected" } else { "record-row" }
                            };
                            view! {
                                <tr class=row_class on:click=move |_| {
                                    commands::open_mvp(store, editor, id);
                                }>
                                    <td>{record.request_id.clone()}</td>
                                    <td>{record.title.clone()}</td>
                                    <td>{record.priority.to_string()}</td>
                                    <td><span class=status_class(record.status)>{record.status.to_string()}</span></td>
                                    <td>{format!("{}%", record.progress)}</td>
                                    <td>{record.assigned_to.clone().unwrap_or_else(|| "Unassigned".to_string())}</td>
                                    <td>{if record.is_paid { "Paid" } else { "Unpaid" }}</td>
                                </tr>
                            }
                        }).collect_view()}
                    </tbody>
                </table>

                <MvpDetail editor=editor />
            </div>

            <PaginationBar
                page_info=Signal::derive(move || store.mvps().with(|m| m.page_info()))
                on_select=go_to_page
            />
        </section>
    }
}

pub(crate) fn status_class(status: MvpStatus) -> &'static str {
    match status {
        MvpStatus::Submitted => "status-badge submitted",
        MvpStatus::InProgress => "status-badge in-progress",
        MvpStatus::Completed => "status-badge completed",
    }
}

#[component]
fn StatCard(label: &'static str, #[prop(into)] value: Signal<String>) -> impl IntoView {
    view! {
        <div class="stat-card">
            <span class="stat-label">{label}</span>
            <span class="stat-value">{move || value.get()}</span>
        </div>
    }
}

/// Filter inputs are kept locally until "Apply" copies them into the store.
#[component]
fn MvpFilterBar(#[prop(into)] on_apply: Callback<()>) -> impl IntoView {
    let store = use_dashboard_store();

    let (search, set_search) = signal(String::new());
    let (status, set_status) = signal(String::new());
    let (priority, set_priority) = signal(String::new());
    let (assignee_mode, set_assignee_mode) = signal(String::from("any"));
    let (assignee, set_assignee) = signal(String::new());
    let (paid, set_paid) = signal(String::new());
    let (start_date, set_start_date) = signal(String::new());
    let (end_date, set_end_date) = signal(String::new());

    // New filters always restart from the first page.
    let first_page = move || MvpQuery::first_page(store.mvps().with_untracked(|mvps| mvps.page_size()));

    let apply = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let assigned_to = match assignee_mode.get().as_str() {
            "unassigned" => AssigneeFilter::Unassigned,
            "named" if !assignee.get().trim().is_empty() => AssigneeFilter::Named(assignee.get()),
            _ => AssigneeFilter::Any,
        };
        let query = MvpQuery {
            search: search.get(),
            status: status.get().parse::<MvpStatus>().ok(),
            priority: priority.get().parse::<Priority>().ok(),
            assigned_to,
            is_paid: match paid.get().as_str() {
                "paid" => Some(true),
                "unpaid" => Some(false),
                _ => None,
            },
            start_date: start_date.get(),
            end_date: end_date.get(),
            ..first_page()
        };
        store.mvp_query().set(query);
        on_apply.run(());
    };

    let clear = move |_| {
        set_search.set(String::new());
        set_status.set(String::new());
        set_priority.set(String::new());
        set_assignee_mode.set("any".to_string());
        set_assignee.set(String::new());
        set_paid.set(String::new());
        set_start_date.set(String::new());
        set_end_date.set(String::new());
        store.mvp_query().set(first_page());
        on_apply.run(());
    };

    view! {
        <form class="filter-bar" on:submit=apply>
            <input
                type="search"
                placeholder="Search title, email, request id..."
                prop:value=move || search.get()
                on:input=move |ev| set_search.set(event_target_value(&ev))
            />
            <select prop:value=move || status.get() on:change=move |ev| set_status.set(event_target_value(&ev))>
                <option value="">"All statuses"</option>
                {MvpStatus::ALL.iter().map(|s| view! { <option value=s.as_str()>{s.as_str()}</option> }).collect_view()}
            </select>
            <select prop:value=move || priority.get() on:change=move |ev| set_priority.set(event_target_value(&ev))>
                <option value="">"All priorities"</option>
                {Priority::ALL.iter().map(|p| view! { <option value=p.as_str()>{p.as_str()}</option> }).collect_view()}
            </select>
            <select prop:value=move || assignee_mode.get() on:change=move |ev| set_assignee_mode.set(event_target_value(&ev))>
                <option value="any">"Anyone"</option>
                <option value="unassigned">"Unassigned"</option>
                <option value="named">"Assigned to..."</option>
            </select>
            <Show when=move || assignee_mode.get() == "named">
                <input
                    type="text"
                    placeholder="Assignee"
                    prop:value=move || assignee.get()
                    on:input=move |ev| set_assignee.set(event_target_value(&ev))
                />
            </Show>
            <select prop:value=move || paid.get() on:change=move |ev| set_paid.set(event_target_value(&ev))>
                <option value="">"Paid & unpaid"</option>
                <option value="paid">"Paid"</option>
                <option value="unpaid">"Unpaid"</option>
            </select>
            <input type="date" prop:value=move || start_date.get() on:input=move |ev| set_start_date.set(event_target_value(&ev)) />
            <input type="date" prop:value=move || end_date.get() on:input=move |ev| set_end_date.set(event_target_value(&ev)) />
            <button type="submit">"Apply"</button>
            <button type="button" on:click=clear>"Clear"</button>
        </form>
    }
}
