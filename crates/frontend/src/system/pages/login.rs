use contracts::system::auth::ForgotPasswordRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::http::{ApiError, Notice};
use crate::shared::toasts::use_toasts;
use crate::system::auth::api;
use crate::system::auth::bootstrap::complete_sign_in;
use crate::system::auth::context::{use_api, use_session};

/// Which of the two cards the login screen shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoginView {
    SignIn,
    Forgot,
}

pub fn validate_credentials(username: &str, password: &str) -> Result<(), String> {
    if username.trim().is_empty() {
        return Err("Username is required".to_string());
    }
    if password.is_empty() {
        return Err("Password is required".to_string());
    }
    Ok(())
}

/// Message for the inline alert. Everything except validation failures was
/// already toasted by the HTTP layer.
fn inline_error(err: &ApiError) -> Option<String> {
    err.is_validation().then(|| err.to_string())
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let client = use_api();
    let session = use_session();
    let toasts = use_toasts();

    let view_mode = RwSignal::new(LoginView::SignIn);
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let error_message = RwSignal::new(None::<String>);
    let is_loading = RwSignal::new(false);

    let on_submit = {
        let client = client.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();

            let username_val = username.get_untracked();
            let password_val = password.get_untracked();
            if let Err(e) = validate_credentials(&username_val, &password_val) {
                error_message.set(Some(e));
                return;
            }

            is_loading.set(true);
            error_message.set(None);

            let client = client.clone();
            spawn_local(async move {
                match api::login(&client, username_val.trim().to_string(), password_val).await {
                    Ok(outcome) => {
                        // The stored token flips the shell to the main layout.
                        complete_sign_in(&client, session, outcome).await;
                        log::debug!("signed in");
                    }
                    Err(e) => {
                        error_message.try_set(inline_error(&e));
                    }
                }
                is_loading.try_set(false);
            });
        }
    };

    let on_forgot = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let email_val = email.get_untracked().trim().to_string();
        if email_val.is_empty() {
            error_message.set(Some("Email is required".to_string()));
            return;
        }

        is_loading.set(true);
        error_message.set(None);

        let client = client.clone();
        spawn_local(async move {
            match api::forgot_password(&client, &ForgotPasswordRequest { email: email_val }).await {
                Ok(_) => {
                    toasts.push(Notice::success("Password reset instructions sent"));
                    view_mode.try_set(LoginView::SignIn);
                }
                Err(e) => {
                    error_message.try_set(inline_error(&e));
                }
            }
            is_loading.try_set(false);
        });
    };

    let switch_to = move |mode: LoginView| {
        error_message.set(None);
        view_mode.set(mode);
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <h1>"Admin Console"</h1>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <Show
                    when=move || view_mode.get() == LoginView::SignIn
                    fallback=move || view! {
                        <h2>"Reset password"</h2>
                        <form on:submit=on_forgot.clone()>
                            <div class="form-group">
                                <label for="forgot_email">"Email"</label>
                                <input
                                    type="email"
                                    id="forgot_email"
                                    prop:value=move || email.get()
                                    on:input=move |ev| email.set(event_target_value(&ev))
                                    required
                                    disabled=move || is_loading.get()
                                />
                            </div>
                            <button type="submit" class="btn-primary" disabled=move || is_loading.get()>
                                {move || if is_loading.get() { "Sending..." } else { "Send reset link" }}
                            </button>
                            <a href="#" class="login-link" on:click=move |ev| {
                                ev.prevent_default();
                                switch_to(LoginView::SignIn);
                            }>
                                "Back to sign in"
                            </a>
                        </form>
                    }
                >
                    <h2>"Sign in"</h2>
                    <form on:submit=on_submit.clone()>
                        <div class="form-group">
                            <label for="username">"Username"</label>
                            <input
                                type="text"
                                id="username"
                                autocomplete="username"
                                prop:value=move || username.get()
                                on:input=move |ev| username.set(event_target_value(&ev))
                                required
                                disabled=move || is_loading.get()
                            />
                        </div>

                        <div class="form-group">
                            <label for="password">"Password"</label>
                            <input
                                type="password"
                                id="password"
                                autocomplete="current-password"
                                prop:value=move || password.get()
                                on:input=move |ev| password.set(event_target_value(&ev))
                                required
                                disabled=move || is_loading.get()
                            />
                        </div>

                        <button type="submit" class="btn-primary" disabled=move || is_loading.get()>
                            {move || if is_loading.get() { "Signing in..." } else { "Sign in" }}
                        </button>
                        <a href="#" class="login-link" on:click=move |ev| {
                            ev.prevent_default();
                            switch_to(LoginView::Forgot);
                        }>
                            "Forgot password?"
                        </a>
                    </form>
                </Show>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn credentials_need_both_fields() {
        assert_eq!(
            validate_credentials("  ", "x"),
            Err("Username is required".to_string())
        );
        assert_eq!(
            validate_credentials("admin", ""),
            Err("Password is required".to_string())
        );
        assert!(validate_credentials("admin", "secret").is_ok());
    }

    #[test]
    fn only_validation_errors_show_inline() {
        let rejected = ApiError::Validation {
            message: "Invalid credentials".into(),
            body: json!({"detail": "Invalid credentials"}),
        };
        assert_eq!(inline_error(&rejected).as_deref(), Some("Invalid credentials"));

        let down = ApiError::Server {
            status: 500,
            message: "boom".into(),
        };
        assert!(inline_error(&down).is_none());
    }
}
