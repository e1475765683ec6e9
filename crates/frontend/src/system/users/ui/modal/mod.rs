pub mod form;
pub mod state;

use contracts::system::users::UserStatus;
use leptos::prelude::*;
use thaw::*;

use crate::shared::modal_frame::ModalFrame;
use form::{FieldErrors, FormField, FormMode, UserForm, UserFormValues};

/// True when the dialog goes from closed (or not yet rendered) to open.
pub fn just_opened(prev: Option<bool>, open: bool) -> bool {
    open && prev != Some(true)
}

/// Create/edit dialog for a user.
///
/// Purely controlled: the page supplies the draft and decides what a save
/// means. `on_ok` receives the validated values and a reply callback; the
/// page calls it with server field errors, which are shown while the dialog
/// stays open. Only the page closes it.
#[component]
pub fn UserModal(
    #[prop(into)] title: Signal<String>,
    #[prop(into)] show: Signal<bool>,
    #[prop(into)] mode: Signal<FormMode>,
    #[prop(into)] form_value: Signal<UserFormValues>,
    #[prop(into)] loading: Signal<bool>,
    on_ok: Callback<(UserFormValues, Callback<FieldErrors>)>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let form = RwSignal::new(UserForm::default());

    // Fresh draft and no stale errors on closed -> open only. Re-runs while
    // open must keep typed values and server errors.
    Effect::new(move |prev: Option<bool>| {
        let open = show.get();
        if just_opened(prev, open) {
            form.set(UserForm::new(mode.get_untracked(), form_value.get_untracked()));
        }
        open
    });

    let on_save = move || {
        let mut submitted = None;
        form.update(|f| submitted = f.submit().ok());
        if let Some(values) = submitted {
            let reply = Callback::new(move |errors: FieldErrors| {
                form.update(|f| f.apply_server_errors(errors));
            });
            on_ok.run((values, reply));
        }
    };

    let text_field = move |field: FormField, label: Signal<&'static str>, input_type: &'static str| {
        let read = move || {
            form.with(|f| match field {
                FormField::Email => f.values.email.clone(),
                FormField::FirstName => f.values.first_name.clone(),
                FormField::LastName => f.values.last_name.clone(),
                FormField::Password => f.values.password.clone(),
                FormField::Status => String::new(),
            })
        };
        let write = move |value: String| {
            form.update(|f| {
                f.edit(field, |v| match field {
                    FormField::Email => v.email = value,
                    FormField::FirstName => v.first_name = value,
                    FormField::LastName => v.last_name = value,
                    FormField::Password => v.password = value,
                    FormField::Status => {}
                })
            })
        };
        let error = move || form.with(|f| f.errors.get(field).map(str::to_string));
        let id = format!("user_{}", field.key());
        view! {
            <div class="form__group">
                <label for=id.clone()>{move || label.get()}</label>
                <input
                    type=input_type
                    id=id.clone()
                    class="form__input"
                    class:form__input--invalid=move || error().is_some()
                    autocomplete={if field == FormField::Password { "new-password" } else { "off" }}
                    prop:value=read
                    on:input=move |ev| write(event_target_value(&ev))
                    disabled=move || loading.get()
                />
                {move || error().map(|e| view! { <div class="form__error">{e}</div> })}
            </div>
        }
    };

    let password_label = Signal::derive(move || {
        if form.with(|f| f.mode.is_create()) {
            "Password"
        } else {
            "Password (optional)"
        }
    });

    let status_radio = move |status: UserStatus| {
        let id = format!("user_status_{}", status.code());
        view! {
            <label for=id.clone() class="form__radio">
                <input
                    type="radio"
                    id=id.clone()
                    name="user_status"
                    prop:checked=move || form.with(|f| f.values.status == status)
                    on:change=move |_| form.update(|f| f.edit(FormField::Status, |v| v.status = status))
                    disabled=move || loading.get()
                />
                {status.label()}
            </label>
        }
    };

    view! {
        <Show when=move || show.get()>
            <ModalFrame
                title=title
                on_close=on_cancel
                busy=loading
                footer=move || view! {
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| on_cancel.run(())
                        disabled=loading
                    >
                        "Cancel"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| on_save()
                        disabled=loading
                    >
                        {move || if loading.get() { "Saving..." } else { "Save" }}
                    </Button>
                }
            >
                {move || form.with(|f| f.errors.form_message().map(str::to_string))
                    .map(|e| view! { <div class="alert alert--error">{e}</div> })}

                {text_field(FormField::Email, "Email".into(), "email")}
                {text_field(FormField::FirstName, "First Name".into(), "text")}
                {text_field(FormField::LastName, "Last Name".into(), "text")}
                {text_field(FormField::Password, password_label, "password")}

                <div class="form__group">
                    <span class="form__label">"Status"</span>
                    <div class="form__radio-group">
                        {status_radio(UserStatus::Enabled)}
                        {status_radio(UserStatus::Disabled)}
                    </div>
                </div>
            </ModalFrame>
        </Show>
    }
}
