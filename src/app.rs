//! Venture Dashboard App
//!
//! App shell: session context, the dashboard store and three tabs.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::components::{
    AddThreeDTemplate, AddWebsiteTemplate, DashboardTab, MvpDashboard, NoticeBanner, TabBar, ThreeDForms,
    ThreeDTemplateManager, WebsiteForms, WebsiteTemplateManager,
};
use crate::context::build_session;
use crate::store::DashboardState;

#[component]
pub fn App() -> impl IntoView {
    let (session, config) = match build_session() {
        Ok(built) => built,
        Err(message) => {
            tracing::error!("Dashboard configuration rejected: {}", message);
            return view! {
                <div class="fatal-error">
                    <h1>"Venture Dashboard"</h1>
                    <p>{format!("Configuration error: {}", message)}</p>
                </div>
            }
            .into_any();
        }
    };
    // Provide context to all children
    provide_context(session);
    provide_context(Store::new(DashboardState::new(&config)));

    let (current_tab, set_current_tab) = signal(DashboardTab::default());

    view! {
        <div class="app-layout">
            <header class="app-header">
                <h1>"Venture Dashboard"</h1>
                <TabBar current_tab=current_tab set_current_tab=set_current_tab />
            </header>

            <NoticeBanner />

            <main class="main-content">
                {move || match current_tab.get() {
                    DashboardTab::Mvp => view! { <MvpDashboard /> }.into_any(),
                    DashboardTab::Websites => view! {
                        <div class="domain-panel">
                            <div class="template-column">
                                <AddWebsiteTemplate />
                                <WebsiteTemplateManager />
                            </div>
                            <WebsiteForms />
                        </div>
                    }
                    .into_any(),
                    DashboardTab::ThreeD => view! {
                        <div class="domain-panel">
                            <div class="template-column">
                                <AddThreeDTemplate />
                                <ThreeDTemplateManager />
                            </div>
                            <ThreeDForms />
                        </div>
                    }
                    .into_any(),
                }}
            </main>
        </div>
    }
    .into_any()
}
