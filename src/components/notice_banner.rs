//! Notice Banner Component
//!
//! Shows the last success or error notice; dismisses itself after a few
//! seconds unless a newer notice replaced it.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::{use_session, NoticeKind};

const DISMISS_AFTER_MS: u32 = 5_000;

#[component]
pub fn NoticeBanner() -> impl IntoView {
    let session = use_session();
    let notice = session.notice();

    Effect::new(move |_| {
        let Some(serial) = notice.with(|n| n.as_ref().map(|n| n.serial)) else {
            return;
        };
        spawn_local(async move {
            TimeoutFuture::new(DISMISS_AFTER_MS).await;
            if notice.with_untracked(|n| n.as_ref().map(|n| n.serial)) == Some(serial) {
                session.dismiss();
            }
        });
    });

    view! {
        {move || notice.get().map(|n| {
            let class = match n.kind {
                NoticeKind::Success => "notice-banner success",
                NoticeKind::Error => "notice-banner error",
            };
            view! {
                <div class=class role="status">
                    <strong class="notice-title">{n.title}</strong>
                    <span class="notice-message">{n.message}</span>
                    <button class="notice-close" on:click=move |_| session.dismiss()>"×"</button>
                </div>
            }
        })}
    }
}
