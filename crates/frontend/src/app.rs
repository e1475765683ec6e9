use std::sync::Arc;

use crate::app_shell::AppShell;
use crate::shared::api_utils::api_base;
use crate::shared::http::{ApiClient, FetchTransport};
use crate::shared::toasts::{Toaster, Toasts};
use crate::system::auth::bootstrap::restore_profile;
use crate::system::auth::session::SessionStore;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::Router;

#[component]
pub fn App() -> impl IntoView {
    let session = SessionStore::persistent();
    let toasts = Toasts::new();
    let client = ApiClient::new(
        api_base(),
        Arc::new(session),
        Arc::new(FetchTransport),
        Arc::new(toasts),
    );

    provide_context(session);
    provide_context(toasts);
    provide_context(client.clone());

    // A token restored from storage comes without a profile.
    spawn_local(async move {
        restore_profile(&client, session).await;
    });

    view! {
        <Router>
            <Toaster />
            <AppShell />
        </Router>
    }
}
