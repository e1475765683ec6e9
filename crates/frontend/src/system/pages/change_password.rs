use contracts::system::auth::ChangePasswordRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::http::Notice;
use crate::shared::toasts::use_toasts;
use crate::system::auth::api;
use crate::system::auth::context::use_api;
use crate::system::users::ui::modal::form::MIN_PASSWORD_LEN;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordChange {
    pub old_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl PasswordChange {
    /// Checks done before anything is sent. The first failing rule wins.
    pub fn validate(&self) -> Result<ChangePasswordRequest, String> {
        if self.old_password.is_empty() {
            return Err("Current password is required".to_string());
        }
        if self.new_password.chars().count() < MIN_PASSWORD_LEN {
            return Err(format!(
                "New password must be at least {} characters",
                MIN_PASSWORD_LEN
            ));
        }
        if self.new_password != self.confirm_password {
            return Err("Passwords do not match".to_string());
        }
        Ok(ChangePasswordRequest {
            old_password: self.old_password.clone(),
            new_password: self.new_password.clone(),
        })
    }
}

#[component]
pub fn ChangePasswordPage() -> impl IntoView {
    let client = use_api();
    let toasts = use_toasts();
    let draft = RwSignal::new(PasswordChange::default());
    let error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let request = match draft.with_untracked(PasswordChange::validate) {
            Ok(request) => request,
            Err(e) => {
                error.set(Some(e));
                return;
            }
        };
        error.set(None);
        saving.set(true);
        let client = client.clone();
        spawn_local(async move {
            match api::change_password(&client, &request).await {
                Ok(_) => {
                    toasts.push(Notice::success("Password changed"));
                    draft.try_set(PasswordChange::default());
                }
                Err(e) if e.is_validation() => {
                    error.try_set(Some(e.to_string()));
                }
                Err(e) => log::warn!("change password failed: {}", e),
            }
            saving.try_set(false);
        });
    };

    let password_input = move |id: &'static str,
                               label: &'static str,
                               read: fn(&PasswordChange) -> String,
                               write: fn(&mut PasswordChange, String)| {
        view! {
            <div class="form__group">
                <label for=id>{label}</label>
                <input
                    type="password"
                    id=id
                    class="form__input"
                    prop:value=move || draft.with(read)
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        draft.update(|d| write(d, value));
                    }
                    disabled=move || saving.get()
                />
            </div>
        }
    };

    view! {
        <div class="page page--narrow">
            <h1 class="page__title">"Change Password"</h1>

            {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

            <form on:submit=on_submit>
                {password_input(
                    "old_password",
                    "Current Password",
                    |d| d.old_password.clone(),
                    |d, v| d.old_password = v,
                )}
                {password_input(
                    "new_password",
                    "New Password",
                    |d| d.new_password.clone(),
                    |d, v| d.new_password = v,
                )}
                {password_input(
                    "confirm_password",
                    "Confirm Password",
                    |d| d.confirm_password.clone(),
                    |d, v| d.confirm_password = v,
                )}
                <button type="submit" class="btn-primary" disabled=move || saving.get()>
                    {move || if saving.get() { "Saving..." } else { "Save" }}
                </button>
            </form>
        </div>
    }
}
