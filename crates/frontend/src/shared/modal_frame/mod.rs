use leptos::ev;
use leptos::prelude::*;

use crate::shared::icons::icon;

/// Dialog chrome: overlay, surface, title bar and an optional footer.
///
/// Closes on Escape and on a click that both starts and ends on the overlay,
/// so selecting text inside the dialog and releasing outside keeps it open.
#[component]
pub fn ModalFrame(
    #[prop(into)] title: Signal<String>,
    /// Called when the dialog asks to be closed (overlay, Escape, ×).
    on_close: Callback<()>,
    /// Ignore close requests while true (a save is in flight).
    #[prop(optional, into)]
    busy: Signal<bool>,
    #[prop(optional, into)] footer: Option<ViewFn>,
    children: Children,
) -> impl IntoView {
    let overlay_mouse_down = RwSignal::new(false);
    let request_close = move || {
        if !busy.get_untracked() {
            on_close.run(());
        }
    };

    let handle = window_event_listener(ev::keydown, move |ev| {
        if ev.key() == "Escape" {
            request_close();
        }
    });
    on_cleanup(move || handle.remove());

    let is_direct = |ev: &ev::MouseEvent| match (ev.target(), ev.current_target()) {
        (Some(t), Some(ct)) => t == ct,
        _ => false,
    };

    view! {
        <div
            class="modal-overlay"
            on:mousedown=move |ev| overlay_mouse_down.set(is_direct(&ev))
            on:click=move |ev| {
                let should_close = overlay_mouse_down.get_untracked() && is_direct(&ev);
                overlay_mouse_down.set(false);
                if should_close {
                    request_close();
                }
            }
        >
            <div class="modal" role="dialog" aria-modal="true">
                <div class="modal-header">
                    <h2 class="modal-title">{move || title.get()}</h2>
                    <button
                        class="button button--icon modal__close"
                        on:click=move |_| request_close()
                        disabled=move || busy.get()
                    >
                        {icon("x")}
                    </button>
                </div>
                <div class="modal-body">{children()}</div>
                {footer.map(|footer| view! { <div class="modal-footer">{footer.run()}</div> })}
            </div>
        </div>
    }
}
