//! Pagination Bar Component
//!
//! Previous / next controls plus the "page x of y" label for one list.

use leptos::prelude::*;

use dashboard_core::listing::PageInfo;
use dashboard_core::LoadState;

#[component]
pub fn PaginationBar(
    #[prop(into)] page_info: Signal<PageInfo>,
    #[prop(into)] on_select: Callback<u64>,
) -> impl IntoView {
    let previous = move |_| {
        let info = page_info.get_untracked();
        if info.has_previous() {
            on_select.run(info.page_index - 1);
        }
    };
    let next = move |_| {
        let info = page_info.get_untracked();
        if info.has_next() {
            on_select.run(info.page_index + 1);
        }
    };

    view! {
        <Show when=move || { page_info.get().total_pages > 1 }>
            <div class="pagination-bar">
                <button disabled=move || !page_info.get().has_previous() on:click=previous>"‹ Prev"</button>
                <span class="pagination-label">
                    {move || {
                        let info = page_info.get();
                        format!("Page {} of {} ({} total)", info.page_index + 1, info.total_pages, info.total_elements)
                    }}
                </span>
                <button disabled=move || !page_info.get().has_next() on:click=next>"Next ›"</button>
            </div>
        </Show>
    }
}

/// Loading / error line above a list. Records from the last good fetch stay
/// on screen while this shows an error.
#[component]
pub fn LoadStatus(
    #[prop(into)] state: Signal<LoadState>,
    #[prop(into)] on_retry: Callback<()>,
) -> impl IntoView {
    move || match state.get() {
        LoadState::Loading => view! { <p class="load-status loading">"Loading..."</p> }.into_any(),
        LoadState::LoadError(message) => view! {
            <p class="load-status error">
                {message}
                <button class="retry-btn" on:click=move |_| on_retry.run(())>"Retry"</button>
            </p>
        }
        .into_any(),
        LoadState::Empty | LoadState::Loaded => ().into_any(),
    }
}
