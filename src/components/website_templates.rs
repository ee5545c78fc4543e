//! Website Template Components
//!
//! Create form and the per-niche template manager with its editor.

use leptos::prelude::*;
use leptos::task::spawn_local;

use dashboard_core::domain::{WebsiteTemplate, WebsiteTemplateEdit, WebsiteTemplateRequest};

use crate::commands::{self, WebsiteTemplateEditor};
use crate::components::field_input::parse_price;
use crate::components::{LoadStatus, PaginationBar, TextAreaField, TextField};
use crate::context::use_session;
use crate::store::{store_find_website_template, use_dashboard_store, DashboardStateStoreFields};

#[component]
pub fn AddWebsiteTemplate() -> impl IntoView {
    let session = use_session();
    let store = use_dashboard_store();
    let request = RwSignal::new(WebsiteTemplateRequest::default());

    let text = move |read: fn(&WebsiteTemplateRequest) -> String| Signal::derive(move || request.with(read));
    let set = move |write: fn(&mut WebsiteTemplateRequest, String)| {
        Callback::new(move |value: String| request.update(|r| write(r, value)))
    };

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let payload = request.get();
        let gateways = session.gateways();
        spawn_local(async move {
            let result = commands::create_website_template(&gateways.website, store, payload).await;
            if result.is_ok() {
                request.set(WebsiteTemplateRequest::default());
            }
            session.report("Website template", &result, "Template saved");
        });
    };

    view! {
        <form class="template-form" on:submit=submit>
            <h3>"Add website template"</h3>
            <TextField label="Title" value=text(|r| r.title.clone()) on_input=set(|r, v| r.title = v) />
            <TextAreaField label="Description" value=text(|r| r.description.clone()) on_input=set(|r, v| r.description = v) />
            <TextField label="Thumbnail URL" value=text(|r| r.thumbnail.clone()) on_input=set(|r, v| r.thumbnail = v) />
            <TextField label="Demo URL" value=text(|r| r.demo_url.clone()) on_input=set(|r, v| r.demo_url = v) />
            <TextField
                label="Tags"
                placeholder="comma, separated"
                value=text(|r| r.tags.clone())
                on_input=set(|r, v| r.tags = v)
            />
            <TextField
                label="Price"
                input_type="number"
                lazy=true
                value=text(|r| r.price.to_string())
                on_input=set(|r, v| r.price = parse_price(&v).max(0.0))
            />
            <TextField label="Niche" value=text(|r| r.niche_id.clone()) on_input=set(|r, v| r.niche_id = v) />
            <button type="submit" class="primary">"Save template"</button>
        </form>
    }
}

#[component]
pub fn WebsiteTemplateManager() -> impl IntoView {
    let session = use_session();
    let store = use_dashboard_store();
    let editor: WebsiteTemplateEditor = RwSignal::new(Default::default());
    let (niche, set_niche) = signal(store.website_niche().get_untracked());

    let reload = move || {
        let gateways = session.gateways();
        spawn_local(async move {
            if let Err(message) = commands::load_website_templates(&gateways.website, store).await {
                session.error("Website templates", message);
            }
        });
    };

    let search = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        store.website_niche().set(niche.get());
        editor.update(|e| e.close());
        reload();
    };

    let open = move |id: u64| {
        if let Some(template) = store_find_website_template(&store, id) {
            editor.update(|e| {
                e.load(&template);
            });
        }
    };

    let go_to_page = Callback::new(move |index: u64| {
        store.website_templates().write().go_to_page(index);
    });

    view! {
        <section class="template-manager">
            <h3>"Manage website templates"</h3>
            <form class="filter-bar" on:submit=search>
                <input
                    type="text"
                    placeholder="Niche"
                    prop:value=move || niche.get()
                    on:input=move |ev| set_niche.set(event_target_value(&ev))
                />
                <button type="submit">"Load"</button>
            </form>

            <LoadStatus
                state=Signal::derive(move || store.website_templates().with(|t| t.state().clone()))
                on_retry=Callback::new(move |_: ()| reload())
            />

            <div class="template-grid">
                {move || store.website_templates().with(|t| t.visible().to_vec()).into_iter().map(|template| {
                    let id = template.id;
                    view! {
                        <article class="template-card" on:click=move |_| open(id)>
                            <img src=template.thumbnail.clone() alt="" />
                            <h4>{template.title.clone()}</h4>
                            <p>{template.description.clone()}</p>
                            <div class="tag-list">
                                {template.tags.iter().map(|tag| view! { <span class="tag">{tag.clone()}</span> }).collect_view()}
                            </div>
                            <span class="price">{format!("${:.2}", template.price)}</span>
                        </article>
                    }
                }).collect_view()}
            </div>

            <PaginationBar
                page_info=Signal::derive(move || store.website_templates().with(|t| t.page_info()))
                on_select=go_to_page
            />

            <WebsiteTemplateDetail editor=editor />
        </section>
    }
}

#[component]
fn WebsiteTemplateDetail(editor: WebsiteTemplateEditor) -> impl IntoView {
    let session = use_session();
    let store = use_dashboard_store();

    let draft_text = move |read: fn(&WebsiteTemplate) -> String| {
        Signal::derive(move || editor.with(|e| e.draft().map(read).unwrap_or_default()))
    };
    let edit = move |make: fn(String) -> WebsiteTemplateEdit| {
        Callback::new(move |value: String| {
            editor.update(|e| {
                e.edit(make(value));
            });
        })
    };

    let save = move |_| {
        let gateways = session.gateways();
        spawn_local(async move {
            let result = commands::save_website_template(&gateways.website, store, editor).await;
            session.report("Website template", &result, "Template updated");
        });
    };

    view! {
        <Show when=move || editor.with(|e| e.is_open())>
            <aside class="detail-panel">
                <header class="detail-header">
                    <h2>{let text = draft_text(|t| t.title.clone()); move || text.get()}</h2>
                    <button class="close-btn" on:click=move |_| editor.update(|e| e.close())>"×"</button>
                </header>
                <TextField label="Title" value=draft_text(|t| t.title.clone()) on_input=edit(WebsiteTemplateEdit::Title) />
                <TextAreaField
                    label="Description"
                    value=draft_text(|t| t.description.clone())
                    on_input=edit(WebsiteTemplateEdit::Description)
                />
                <TextField
                    label="Thumbnail URL"
                    value=draft_text(|t| t.thumbnail.clone())
                    on_input=edit(WebsiteTemplateEdit::Thumbnail)
                />
                <TextField label="Demo URL" value=draft_text(|t| t.demo_url.clone()) on_input=edit(WebsiteTemplateEdit::DemoUrl) />
                <TextField
                    label="Tags"
                    lazy=true
                    value=draft_text(|t| t.tags.join(", "))
                    on_input=edit(WebsiteTemplateEdit::Tags)
                />
                <TextField
                    label="Price"
                    input_type="number"
                    lazy=true
                    value=draft_text(|t| t.price.to_string())
                    on_input=edit(|v| WebsiteTemplateEdit::Price(parse_price(&v)))
                />
                <div class="detail-actions">
                    <button class="primary" disabled=move || !editor.with(|e| e.is_dirty()) on:click=save>"Save"</button>
                    <button
                        disabled=move || !editor.with(|e| e.is_dirty())
                        on:click=move |_| editor.update(|e| { e.discard(&store.website_templates().read()); })
                    >
                        "Discard"
                    </button>
                </div>
            </aside>
        </Show>
    }
}
