//! TopHeader component - application top bar with the signed-in
//! administrator and the logout action.

use crate::shared::components::user_avatar::UserAvatar;
use crate::shared::icons::icon;
use crate::system::auth::context::use_session;
use leptos::prelude::*;

#[component]
pub fn TopHeader() -> impl IntoView {
    let session = use_session();
    let state = session.state();

    let logout = move |_| {
        log::debug!("logout");
        session.clear_user_info_and_token();
    };

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <span class="top-header__title">"Admin Console"</span>
            </div>

            <div class="top-header__actions">
                <div class="top-header__user">
                    {move || {
                        let profile = state.with(|s| s.user_info.clone());
                        let label = profile
                            .as_ref()
                            .map(|p| p.display_name())
                            .unwrap_or_else(|| "Administrator".to_string());
                        view! {
                            <UserAvatar
                                src=profile.as_ref().and_then(|p| p.avatar.clone()).unwrap_or_default()
                                name=label.clone()
                                email=profile.as_ref().map(|p| p.email.clone()).unwrap_or_default()
                                size=28
                            />
                            <span>{label}</span>
                        }
                    }}
                </div>

                <button class="top-header__icon-btn" on:click=logout title="Log out">
                    {icon("log-out")}
                </button>
            </div>
        </div>
    }
}
