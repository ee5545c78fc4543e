//! Dashboard Tab Bar Component
//!
//! Switches between the MVP, website and 3D website screens.

use leptos::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DashboardTab {
    #[default]
    Mvp,
    Websites,
    ThreeD,
}

impl DashboardTab {
    pub const ALL: [DashboardTab; 3] = [DashboardTab::Mvp, DashboardTab::Websites, DashboardTab::ThreeD];

    pub fn label(&self) -> &'static str {
        match self {
            DashboardTab::Mvp => "MVP Requests",
            DashboardTab::Websites => "Websites",
            DashboardTab::ThreeD => "3D Websites",
        }
    }
}

/// Tab bar component
#[component]
pub fn TabBar(
    current_tab: ReadSignal<DashboardTab>,
    set_current_tab: WriteSignal<DashboardTab>,
) -> impl IntoView {
    view! {
        <nav class="dashboard-tab-bar">
            {DashboardTab::ALL.into_iter().map(|tab| {
                let tab_class = move || {
                    if current_tab.get() == tab { "dashboard-tab active" } else { "dashboard-tab" }
                };
                view! {
                    <button class=tab_class on:click=move |_| set_current_tab.set(tab)>
                        {tab.label()}
                    </button>
                }
            }).collect_view()}
        </nav>
    }
}
