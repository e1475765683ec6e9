//! Application shell: the auth gate and the routed main layout.

use crate::layout::left::Sidebar;
use crate::layout::Shell;
use crate::system::auth::context::use_session;
use crate::system::pages::change_password::ChangePasswordPage;
use crate::system::pages::login::LoginPage;
use crate::system::users::ui::details::UserDetailsPage;
use crate::system::users::ui::list::UsersListPage;
use leptos::prelude::*;
use leptos_router::components::{Redirect, Route, Routes};
use leptos_router::path;

pub const DEFAULT_ROUTE: &str = "/management/system/user";

#[component]
fn MainLayout() -> impl IntoView {
    view! {
        <Shell
            left=|| view! { <Sidebar /> }.into_any()
            center=|| {
                view! {
                    <Routes fallback=|| view! { <Redirect path=DEFAULT_ROUTE /> }>
                        <Route path=path!("/management/system/user") view=UsersListPage />
                        <Route path=path!("/management/system/user/:id") view=UserDetailsPage />
                        <Route path=path!("/profile/password") view=ChangePasswordPage />
                    </Routes>
                }.into_any()
            }
        />
    }
}

/// Auth gate: `LoginPage` without an access token, `MainLayout` with one.
#[component]
pub fn AppShell() -> impl IntoView {
    let state = use_session().state();

    view! {
        <Show
            when=move || state.with(|s| s.access_token.is_some())
            fallback=|| view! { <LoginPage /> }
        >
            <MainLayout />
        </Show>
    }
}
