//! 3D Forms Component
//!
//! Read-only table of 3D form submissions. Filters run locally over the
//! fetched submissions; pages are windows of five.

use leptos::prelude::*;
use leptos::task::spawn_local;

use dashboard_core::domain::{ThreeDForm, ThreeDFormFilter};

use crate::commands;
use crate::components::{LoadStatus, PaginationBar};
use crate::context::use_session;
use crate::store::{use_dashboard_store, DashboardStateStoreFields};

#[component]
pub fn ThreeDForms() -> impl IntoView {
    let session = use_session();
    let store = use_dashboard_store();
    let (selected, set_selected) = signal::<Option<ThreeDForm>>(None);

    let reload = move || {
        let gateways = session.gateways();
        spawn_local(async move {
            if let Err(message) = commands::load_three_d_forms(&gateways.three_d, store).await {
                session.error("3D forms", message);
            }
        });
    };

    // Initial load
    Effect::new(move |_| reload());

    let filter_text = move |read: fn(&ThreeDFormFilter) -> String| move || store.three_d_form_filter().with(read);
    let set_filter = move |write: fn(&mut ThreeDFormFilter, String), value: String| {
        let mut filter = store.three_d_form_filter().get_untracked();
        write(&mut filter, value);
        commands::filter_three_d_forms(store, filter);
    };

    let go_to_page = Callback::new(move |index: u64| {
        let gateways = session.gateways();
        spawn_local(async move {
            if let Err(message) = commands::go_to_three_d_forms_page(&gateways.three_d, store, index).await {
                session.error("3D forms", message);
            }
        });
    });

    view! {
        <section class="form-submissions">
            <h3>"3D form submissions"</h3>
            <div class="filter-bar">
                <input
                    type="text"
                    placeholder="UID"
                    prop:value=filter_text(|f| f.uid.clone())
                    on:input=move |ev| set_filter(|f, v| f.uid = v, event_target_value(&ev))
                />
                <input
                    type="text"
                    placeholder="Template id"
                    prop:value=filter_text(|f| f.template_id.clone())
                    on:input=move |ev| set_filter(|f, v| f.template_id = v, event_target_value(&ev))
                />
                <input
                    type="search"
                    placeholder="Name, email or number"
                    prop:value=filter_text(|f| f.search_term.clone())
                    on:input=move |ev| set_filter(|f, v| f.search_term = v, event_target_value(&ev))
                />
                <button type="button" on:click=move |_| commands::filter_three_d_forms(store, ThreeDFormFilter::default())>
                    "Clear"
                </button>
            </div>

            <LoadStatus
                state=Signal::derive(move || store.three_d_forms().with(|f| f.state().clone()))
                on_retry=Callback::new(move |_: ()| reload())
            />

            <table class="record-table">
                <thead>
                    <tr>
                        <th>"Name"</th>
                        <th>"Email"</th>
                        <th>"Number"</th>
                        <th>"UID"</th>
                        <th>"Template"</th>
                        <th>"Website"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || store.three_d_forms().with(|f| f.visible().to_vec()).into_iter().map(|form| {
                        let id = form.id;
                        view! {
                            <tr class="record-row" on:click=move |_| set_selected.set(commands::find_three_d_form(store, id))>
                                <td>{form.name.clone()}</td>
                                <td>{form.email.clone()}</td>
                                <td>{form.number.clone()}</td>
                                <td>{form.uid.clone()}</td>
                                <td>{form.templet_id.clone()}</td>
                                <td>{form.website_id.clone()}</td>
                            </tr>
                        }
                    }).collect_view()}
                </tbody>
            </table>

            <PaginationBar
                page_info=Signal::derive(move || store.three_d_forms().with(|f| f.page_info()))
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
                        <dt>"Number"</dt><dd>{form.number.clone()}</dd>
                        <dt>"UID"</dt><dd>{form.uid.clone()}</dd>
                        <dt>"Template"</dt><dd>{form.templet_id.clone()}</dd>
                        <dt>"Website"</dt><dd>{form.website_id.clone()}</dd>
                        <dt>"Submitted"</dt><dd>{form.created_at.clone()}</dd>
                    </dl>
                </aside>
            })}
        </section>
    }
}
