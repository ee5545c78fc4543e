//! 3D Template Components
//!
//! Create form and the per-brand-niche template manager with its editor.

use leptos::prelude::*;
use leptos::task::spawn_local;

use dashboard_core::domain::{ThreeDTemplate, ThreeDTemplateEdit, ThreeDTemplateRequest};

use crate::commands::{self, ThreeDTemplateEditor};
use crate::components::field_input::parse_price;
use crate::components::{LoadStatus, PaginationBar, TextAreaField, TextField};
use crate::context::use_session;
use crate::store::{store_find_three_d_template, use_dashboard_store, DashboardStateStoreFields};

#[component]
pub fn AddThreeDTemplate() -> impl IntoView {
    let session = use_session();
    let store = use_dashboard_store();
    let request = RwSignal::new(ThreeDTemplateRequest::default());

    let text = move |read: fn(&ThreeDTemplateRequest) -> String| Signal::derive(move || request.with(read));
    let set = move |write: fn(&mut ThreeDTemplateRequest, String)| {
        Callback::new(move |value: String| request.update(|r| write(r, value)))
    };

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let payload = request.get();
        let gateways = session.gateways();
        spawn_local(async move {
            match commands::create_three_d_template(&gateways.three_d, store, payload).await {
                Ok(saved) => {
                    request.set(ThreeDTemplateRequest::default());
                    session.success("3D template", format!("Saved '{}' (id {})", saved.title, saved.id));
                }
                Err(message) => session.error("3D template", message),
            }
        });
    };

    view! {
        <form class="template-form" on:submit=submit>
            <h3>"Add 3D template"</h3>
            <TextField label="Title" value=text(|r| r.title.clone()) on_input=set(|r, v| r.title = v) />
            <TextAreaField label="Description" value=text(|r| r.description.clone()) on_input=set(|r, v| r.description = v) />
            <TextField label="Model URL" value=text(|r| r.model_url.clone()) on_input=set(|r, v| r.model_url = v) />
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
            <TextField
                label="Brand niche"
                value=text(|r| r.brand_niche_id.clone())
                on_input=set(|r, v| r.brand_niche_id = v)
            />
            <button type="submit" class="primary">"Save template"</button>
        </form>
    }
}

#[component]
pub fn ThreeDTemplateManager() -> impl IntoView {
    let session = use_session();
    let store = use_dashboard_store();
    let editor: ThreeDTemplateEditor = RwSignal::new(Default::default());
    let (niche, set_niche) = signal(store.three_d_niche().get_untracked());

    let reload = move || {
        let gateways = session.gateways();
        spawn_local(async move {
            if let Err(message) = commands::load_three_d_templates(&gateways.three_d, store).await {
                session.error("3D templates", message);
            }
        });
    };

    let search = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        store.three_d_niche().set(niche.get());
        editor.update(|e| e.close());
        reload();
    };

    let open = move |id: u64| {
        if let Some(template) = store_find_three_d_template(&store, id) {
            editor.update(|e| {
                e.load(&template);
            });
        }
    };

    let go_to_page = Callback::new(move |index: u64| {
        store.three_d_templates().write().go_to_page(index);
    });

    view! {
        <section class="template-manager">
            <h3>"Manage 3D templates"</h3>
            <form class="filter-bar" on:submit=search>
                <input
                    type="text"
                    placeholder="Brand niche"
                    prop:value=move || niche.get()
                    on:input=move |ev| set_niche.set(event_target_value(&ev))
                />
                <button type="submit">"Load"</button>
            </form>

            <LoadStatus
                state=Signal::derive(move || store.three_d_templates().with(|t| t.state().clone()))
                on_retry=Callback::new(move |_: ()| reload())
            />

            <div class="template-grid">
                {move || store.three_d_templates().with(|t| t.visible().to_vec()).into_iter().map(|template| {
                    let id = template.id;
                    view! {
                        <article class="template-card" on:click=move |_| open(id)>
                            <h4>{template.title.clone()}</h4>
                            <p>{template.description.clone()}</p>
                            <a href=template.model_url.clone() target="_blank">"Model"</a>
                            <div class="tag-list">
                                {template.tag_list().into_iter().map(|tag| view! { <span class="tag">{tag}</span> }).collect_view()}
                            </div>
                            <span class="price">{format!("${:.2}", template.price)}</span>
                        </article>
                    }
                }).collect_view()}
            </div>

            <PaginationBar
                page_info=Signal::derive(move || store.three_d_templates().with(|t| t.page_info()))
                on_select=go_to_page
            />

            <ThreeDTemplateDetail editor=editor />
        </section>
    }
}

#[component]
fn ThreeDTemplateDetail(editor: ThreeDTemplateEditor) -> impl IntoView {
    let session = use_session();
    let store = use_dashboard_store();

    let draft_text = move |read: fn(&ThreeDTemplate) -> String| {
        Signal::derive(move || editor.with(|e| e.draft().map(read).unwrap_or_default()))
    };
    let edit = move |make: fn(String) -> ThreeDTemplateEdit| {
        Callback::new(move |value: String| {
            editor.update(|e| {
                e.edit(make(value));
            });
        })
    };

    let save = move |_| {
        let gateways = session.gateways();
        spawn_local(async move {
            let result = commands::save_three_d_template(&gateways.three_d, store, editor).await;
            session.report("3D template", &result, "Template saved");
        });
    };

    view! {
        <Show when=move || editor.with(|e| e.is_open())>
            <aside class="detail-panel">
                <header class="detail-header">
                    <h2>{let text = draft_text(|t| t.title.clone()); move || text.get()}</h2>
                    <button class="close-btn" on:click=move |_| editor.update(|e| e.close())>"×"</button>
                </header>
                <TextField label="Title" value=draft_text(|t| t.title.clone()) on_input=edit(ThreeDTemplateEdit::Title) />
                <TextAreaField
                    label="Description"
                    value=draft_text(|t| t.description.clone())
                    on_input=edit(ThreeDTemplateEdit::Description)
                />
                <TextField label="Model URL" value=draft_text(|t| t.model_url.clone()) on_input=edit(ThreeDTemplateEdit::ModelUrl) />
                <TextField label="Demo URL" value=draft_text(|t| t.demo_url.clone()) on_input=edit(ThreeDTemplateEdit::DemoUrl) />
                <TextField label="Tags" value=draft_text(|t| t.tags.clone()) on_input=edit(ThreeDTemplateEdit::Tags) />
                <TextField
                    label="Price"
                    input_type="number"
                    lazy=true
                    value=draft_text(|t| t.price.to_string())
                    on_input=edit(|v| ThreeDTemplateEdit::Price(parse_price(&v)))
                />
                <TextField
                    label="Brand niche"
                    value=draft_text(|t| t.brand_niche_id.clone())
                    on_input=edit(ThreeDTemplateEdit::BrandNicheId)
                />
                <div class="detail-actions">
                    <button class="primary" disabled=move || !editor.with(|e| e.is_dirty()) on:click=save>"Save"</button>
                    <button
                        disabled=move || !editor.with(|e| e.is_dirty())
                        on:click=move |_| editor.update(|e| { e.discard(&store.three_d_templates().read()); })
                    >
                        "Discard"
                    </button>
                </div>
            </aside>
        </Show>
    }
}
