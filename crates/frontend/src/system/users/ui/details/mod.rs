use contracts::system::users::{AdminUser, UserId};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;

use crate::shared::components::user_avatar::UserAvatar;
use crate::shared::date_utils::format_datetime_opt;
use crate::shared::icons::icon;
use crate::system::auth::context::use_api;
use crate::system::users::api;

/// Read-only view of one administrator, reached from the list.
#[component]
pub fn UserDetailsPage() -> impl IntoView {
    let client = use_api();
    let params = use_params_map();
    let user = RwSignal::new(None::<AdminUser>);
    let error = RwSignal::new(None::<String>);
    let loading = RwSignal::new(false);

    Effect::new(move |_| {
        let Some(id) = params.with(|p| p.get("id")) else {
            error.set(Some("Missing user id".to_string()));
            return;
        };
        let client = client.clone();
        loading.set(true);
        error.set(None);
        spawn_local(async move {
            match api::detail(&client, &UserId::from(id.as_str())).await {
                Ok(found) => {
                    user.try_set(Some(found));
                }
                Err(e) => {
                    user.try_set(None);
                    error.try_set(Some(e.to_string()));
                }
            }
            loading.try_set(false);
        });
    });

    let field = |label: &'static str, value: String| {
        view! {
            <div class="details__row">
                <span class="details__label">{label}</span>
                <span class="details__value">{value}</span>
            </div>
        }
    };

    view! {
        <div class="page">
            <A href="/management/system/user" attr:class="page__back">
                {icon("arrow-left")}
                " Back to list"
            </A>

            {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

            <Show when=move || loading.get()>
                <div class="table-loading">"Loading..."</div>
            </Show>

            {move || user.get().map(|u| {
                let name = u.full_name();
                view! {
                    <div class="details">
                        <div class="details__header">
                            <UserAvatar
                                src=u.avatar.clone().unwrap_or_default()
                                name=name.clone().unwrap_or_default()
                                email=u.email.clone()
                                size=64
                            />
                            <h1 class="page__title">{name.clone().unwrap_or_else(|| u.email.clone())}</h1>
                        </div>
                        {field("ID", u.id.to_string())}
                        {field("Email", u.email.clone())}
                        {field("First Name", u.first_name.clone().unwrap_or_else(|| "-".to_string()))}
                        {field("Last Name", u.last_name.clone().unwrap_or_else(|| "-".to_string()))}
                        {field("Status", u.status.label().to_string())}
                        {field("Joined", format_datetime_opt(u.date_joined.as_deref()))}
                    </div>
                }
            })}
        </div>
    }
}
