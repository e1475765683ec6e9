//! Transient notifications ("toasts") shown in the top-center corner.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::http::{Notice, NoticeKind, Notifier};

const TOAST_LIFETIME_MS: u32 = 4_000;

/// Toast board shared by the HTTP layer and the pages.
#[derive(Clone, Copy)]
pub struct Toasts {
    items: RwSignal<Vec<(u64, Notice)>>,
    next_id: StoredValue<u64>,
}

impl Toasts {
    pub fn new() -> Self {
        Self {
            items: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(0),
        }
    }

    pub fn push(&self, notice: Notice) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);
        self.items.update(|items| items.push((id, notice)));
    }

    pub fn dismiss(&self, id: u64) {
        self.items.update(|items| items.retain(|(item_id, _)| *item_id != id));
    }
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for Toasts {
    fn notify(&self, notice: Notice) {
        log::debug!("toast {:?}: {}", notice.kind, notice.message);
        self.push(notice);
    }
}

/// Toasts from context. Pages use it for their own success messages.
pub fn use_toasts() -> Toasts {
    use_context::<Toasts>().expect("Toasts not found in component tree")
}

#[component]
pub fn Toaster() -> impl IntoView {
    let toasts = use_toasts();

    view! {
        <div class="toaster toaster--top-center">
            <For
                each=move || toasts.items.get()
                key=|(id, _)| *id
                children=move |(id, notice)| {
                    spawn_local(async move {
                        TimeoutFuture::new(TOAST_LIFETIME_MS).await;
                        toasts.dismiss(id);
                    });
                    let class = match notice.kind {
                        NoticeKind::Success => "toast toast--success",
                        NoticeKind::Error => "toast toast--error",
                        NoticeKind::Info => "toast toast--info",
                    };
                    view! {
                        <div class=class role="status" on:click=move |_| toasts.dismiss(id)>
                            {notice.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
