//! Website Forms Component
//!
//! Read-only table of website form submissions with server-side filters,
//! server pagination and a detail view.

use leptos::prelude::*;
use leptos::task::spawn_local;

use dashboard_core::domain::{WebsiteForm, WebsiteFormQuery};

use crate::commands;
use crate::components::{LoadStatus, PaginationBar};
use crate::context::use_session;
use crate::store::{use_dashboard_store, DashboardStateStoreFields};

#[component]
pub fn WebsiteForms() -> impl IntoView {
    let session = use_session();
    let store = use_dashboard_store();

    let (uid, set_uid) = signal(String::new());
    let (templet_id, set_templet_id) = signal(String::new());
    let (search, set_search) = signal(String::new());
    let (selected, set_selected) = signal::<Option<WebsiteForm>>(None);

    let reload = move || {
        let gateways = session.gateways();
        spawn_local(async move {
            if let Err(message) = commands::load_website_forms(&gateways.website, store).await {
                session.error("Website forms", message);
            }
        });
    };

    // Initial load
    Effect::new(move |_| reload());

    let apply = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let filters = WebsiteFormQuery {
            uid: uid.get(),
            templet_id: templet_id.get(),
            search: search.get(),
            ..Default::default()
        };
        let gateways = session.gateways();
        spawn_local(async move {
            if let Err(message) = commands::search_website_forms(&gateways.website, store, filters).await {
                session.error("Website forms", message);
            }
        });
    };

    let go_to_page = Callback::new(move |index: u64| {
        let gateways = session.gateways();
        spawn_local(async move {
            if let Err(message) = commands::go_to_website_forms_page(&gateways.website, store, index).await {
                session.error("Website forms", message);
            }
        });
    });

    view! {
        <section class="form-submissions">
            <h3>"Website form submissions"</h3>
            <form class="filter-bar" on:submit=apply>
                <input type="text" placeholder="UID" prop:value=move || uid.get() on:input=move |ev| set_uid.set(event_target_value(&ev)) />
                <input
                    type="text"
                    placeholder="Template id"
                    prop:value=move || templet_id.get()
                    on:input=move |ev| set_templet_id.set(event_target_value(&ev))
                />
                <input
                    type="search"
                    placeholder="Name, email or phone"
                    prop:value=move || search.get()
                    on:input=move |ev| set_search.set(event_target_value(&ev))
                />
                <button type="submit">"Filter"</button>
            </form>

            <LoadStatus
                state=Signal::derive(move || store.website_forms().with(|f| f.state().clone()))
                on_retry=Callback::new(move |_: ()| reload())
            />

            <table class="record-table">
                <thead>
                    <tr>
                        <th>"Name"</th>
                        <th>"Email"</th>
                        <th>"Phone"</th>
                        <th>"UID"</th>
                        <th>"Template"</th>
                        <th>"Submitted"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || store.website_forms().with(|f| f.visible().to_vec()).into_iter().map(|form| {
                        let id = form.id;
                        view! {
                            <tr class="record-row" on:click=move |_| set_selected.set(commands::find_website_form(store, id))>
                                <td>{form.name.clone()}</td>
                                <td>{form.email.clone()}</td>
                                <td>{form.phone_number.clone()}</td>
                                <td>{form.uid.clone()}</td>
                                <td>{form.templet_id.clone()}</td>
                                <td>{form.created_date.clone().unwrap_or_default()}</td>
                            </tr>
                        }
                    }).collect_view()}
                </tbody>
            </table>

            <PaginationBar
                page_info=Signal::derive(move || store.website_forms().with(|f| f.page_info()))
                on_select=go_to_page
            />

            {move || selected.get().map(|form| view! {
                <aside class="detail-panel">
                    <header class="detail-header">
                        <h2>{form.name.clone()}</h2>
                        <button class="close-btn" on:click=move |_| set_selected.set(None)>"×"</button>
                    </header>
                    <dl class="detail-list">
                        <dt>"Email"</dt><dd>{form.email.clone()}</dd>
                        <dt>"Phone"</dt><dd>{form.phone_number.clone()}</dd>
                        <dt>"UID"</dt><dd>{form.uid.clone()}</dd>
                        <dt>"Template"</dt><dd>{form.templet_id.clone()}</dd>
                        {form.extra.iter().map(|(key, value)| {
                            let text = value.as_str().map(str::to_string).unwrap_or_else(|| value.to_string());
                            view! { <dt>{key.clone()}</dt><dd>{text}</dd> }
                        }).collect_view()}
                    </dl>
                </aside>
            })}
        </section>
    }
}
