//! MVP Detail Editor Component
//!
//! Edits a draft of the selected request: basic fields, progress with the
//! derived status, assignment, milestones, activity log and links. Nothing
//! reaches the list until the backend confirms it.

use leptos::prelude::*;
use leptos::task::spawn_local;

use dashboard_core::domain::{derive_status, Milestone, MvpEdit, MvpRecord, Priority};

use crate::commands::{self, MvpEditor};
use crate::components::mvp_dashboard::status_class;
use crate::components::{TextAreaField, TextField};
use crate::context::use_session;
use crate::store::use_dashboard_store;

#[component]
pub fn MvpDetail(editor: MvpEditor) -> impl IntoView {
    let session = use_session();
    let store = use_dashboard_store();

    let draft_text = move |read: fn(&MvpRecord) -> String| {
        Signal::derive(move || editor.with(|e| e.draft().map(read).unwrap_or_default()))
    };
    let edit = move |make: fn(String) -> MvpEdit| {
        Callback::new(move |value: String| {
            editor.update(|e| {
                e.edit(make(value));
            });
        })
    };

    let progress = move || editor.with(|e| e.draft().map(|d| d.progress).unwrap_or(0));
    let is_dirty = move || editor.with(|e| e.is_dirty());

    let save = move |_| {
        let gateways = session.gateways();
        spawn_local(async move {
            let result = commands::save_mvp(&gateways.mvp, store, editor).await;
            session.report("Save MVP", &result, "MVP request updated");
        });
    };

    let update_links = move |_| {
        let gateways = session.gateways();
        spawn_local(async move {
            let result = commands::update_mvp_links(&gateways.mvp, store, editor).await;
            session.report("Links", &result, "Live and demo URLs updated");
        });
    };

    view! {
        <Show when=move || editor.with(|e| e.is_open())>
            <aside class="detail-panel">
                <header class="detail-header">
                    <h2>{let text = draft_text(|d| format!("{} · {}", d.request_id, d.title)); move || text.get()}</h2>
                    <button class="close-btn" on:click=move |_| editor.update(|e| e.close())>"×"</button>
                </header>

                <div class="detail-meta">
                    <span>{let text = draft_text(|d| d.contact_email.clone()); move || text.get()}</span>
                    <span>{let text = draft_text(|d| d.contact_phone.clone()); move || text.get()}</span>
                    <span>{let text = draft_text(|d| format!("${:.2} {}", d.price, if d.is_paid { "paid" } else { "unpaid" })); move || text.get()}</span>
                    <span>{let text = draft_text(|d| format!("Updated {}", d.last_updated)); move || text.get()}</span>
                </div>

                <TextField label="Title" value=draft_text(|d| d.title.clone()) on_input=edit(MvpEdit::Title) />
                <TextAreaField label="Description" value=draft_text(|d| d.description.clone()) on_input=edit(MvpEdit::Description) />
                <TextField label="Platform" value=draft_text(|d| d.platform.clone()) on_input=edit(MvpEdit::Platform) />
                <TextField
                    label="Target audience"
                    value=draft_text(|d| d.target_audience.clone())
                    on_input=edit(MvpEdit::TargetAudience)
                />
                <TextField
                    label="Estimated completion"
                    input_type="date"
                    value=draft_text(|d| d.estimated_completion.clone().unwrap_or_default())
                    on_input=edit(|v| MvpEdit::EstimatedCompletion(Some(v)))
                />

                <label class="field">
                    <span class="field-label">"Priority"</span>
                    <select
                        prop:value={
                            let priority = draft_text(|d| d.priority.to_string());
                            move || priority.get()
                        }
                        on:change=move |ev| {
                            if let Ok(priority) = event_target_value(&ev).parse::<Priority>() {
                                editor.update(|e| { e.edit(MvpEdit::Priority(priority)); });
                            }
                        }
                    >
                        {Priority::ALL.iter().map(|p| view! { <option value=p.as_str()>{p.as_str()}</option> }).collect_view()}
                    </select>
                </label>

                <label class="field">
                    <span class="field-label">"Progress"</span>
                    <input
                        type="range"
                        min="0"
                        max="100"
                        prop:value=move || progress().to_string()
                        on:input=move |ev| {
                            if let Ok(value) = event_target_value(&ev).parse::<u8>() {
                                editor.update(|e| { e.edit(MvpEdit::Progress(value)); });
                            }
                        }
                    />
                    <span class="progress-value">{move || format!("{}%", progress())}</span>
                    // Status shown here is what the next save will send for this progress.
                    {move || {
                        let status = editor.with(|e| e.draft().map(|d| d.status)).unwrap_or(derive_status(0));
                        view! { <span class=status_class(status)>{status.to_string()}</span> }
                    }}
                </label>

                <TextField
                    label="Assigned to"
                    placeholder="Unassigned"
                    value=draft_text(|d| d.assigned_to.clone().unwrap_or_default())
                    on_input=edit(|v| MvpEdit::AssignedTo(Some(v)))
                />

                <div class="detail-actions">
                    <button class="primary" disabled=move || !is_dirty() on:click=save>"Save"</button>
                    <button disabled=move || !is_dirty() on:click=move |_| commands::discard_mvp_edits(store, editor)>
                        "Discard"
                    </button>
                </div>

                <section class="detail-section">
                    <h3>"Links"</h3>
                    <TextField
                        label="Live URL"
                        value=draft_text(|d| d.live_url.clone().unwrap_or_default())
                        on_input=edit(|v| MvpEdit::LiveUrl(Some(v)))
                    />
                    <TextField
                        label="Demo URL"
                        value=draft_text(|d| d.demo_url.clone().unwrap_or_default())
                        on_input=edit(|v| MvpEdit::DemoUrl(Some(v)))
                    />
                    <button on:click=update_links>"Update links"</button>
                </section>

                <MilestoneSection editor=editor />
                <ActivitySection editor=editor />
            </aside>
        </Show>
    }
}

#[component]
fn MilestoneSection(editor: MvpEditor) -> impl IntoView {
    let session = use_session();
    let store = use_dashboard_store();

    let (title, set_title) = signal(String::new());
    let (notes, set_notes) = signal(String::new());
    let (due_date, set_due_date) = signal(String::new());
    let (completed, set_completed) = signal(false);

    let add = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let milestone = Milestone::new(title.get(), notes.get(), due_date.get(), completed.get());
        let gateways = session.gateways();
        spawn_local(async move {
            let result = commands::add_mvp_milestone(&gateways.mvp, store, editor, milestone).await;
            if result.is_ok() {
                set_title.set(String::new());
                set_notes.set(String::new());
                set_due_date.set(String::new());
                set_completed.set(false);
            }
            session.report("Milestone", &result, "Milestone added");
        });
    };

    view! {
        <section class="detail-section">
            <h3>"Milestones"</h3>
            <ul class="milestone-list">
                {move || editor.with(|e| e.draft().map(|d| d.milestones.clone()).unwrap_or_default())
                    .into_iter()
                    .map(|m| {
                        let class = if m.completed { "milestone done" } else { "milestone" };
                        view! {
                            <li class=class>
                                <span class="milestone-title">{m.title}</span>
                                <span class="milestone-due">{m.due_date}</span>
                                <span class="milestone-notes">{m.notes}</span>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
            <form class="inline-form" on:submit=add>
                <input
                    type="text"
                    placeholder="Milestone title"
                    prop:value=move || title.get()
                    on:input=move |ev| set_title.set(event_target_value(&ev))
                />
                <input
                    type="text"
                    placeholder="Notes"
                    prop:value=move || notes.get()
                    on:input=move |ev| set_notes.set(event_target_value(&ev))
                />
                <input type="date" prop:value=move || due_date.get() on:input=move |ev| set_due_date.set(event_target_value(&ev)) />
                <label>
                    <input
                        type="checkbox"
                        prop:checked=move || completed.get()
                        on:change=move |ev| set_completed.set(event_target_checked(&ev))
                    />
                    "Done"
                </label>
                <button type="submit">"Add"</button>
            </form>
        </section>
    }
}

#[component]
fn ActivitySection(editor: MvpEditor) -> impl IntoView {
    let session = use_session();
    let store = use_dashboard_store();
    let (message, set_message) = signal(String::new());

    let add = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let text = message.get();
        let gateways = session.gateways();
        spawn_local(async move {
            let result = commands::add_mvp_activity(&gateways.mvp, store, editor, text).await;
            if result.is_ok() {
                set_message.set(String::new());
            }
            session.report("Activity", &result, "Activity logged");
        });
    };

    view! {
        <section class="detail-section">
            <h3>"Activity"</h3>
            <form class="inline-form" on:submit=add>
                <input
                    type="text"
                    placeholder="What happened?"
                    prop:value=move || message.get()
                    on:input=move |ev| set_message.set(event_target_value(&ev))
                />
                <button type="submit">"Log"</button>
            </form>
            <ul class="activity-list">
                {move || editor.with(|e| e.draft().map(|d| d.activities.clone()).unwrap_or_default())
                    .into_iter()
                    .map(|a| view! {
                        <li>
                            <span class="activity-time">{a.timestamp}</span>
                            <span class="activity-message">{a.message}</span>
                        </li>
                    })
                    .collect_view()}
            </ul>
        </section>
    }
}
